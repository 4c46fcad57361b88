//! Database connection settings
//!
//! Every field can come from a flag or from the matching `DB_*` environment
//! variable. Nothing is validated here; the startup ping is the only check.

use clap::Args;
use sqlx::mysql::MySqlConnectOptions;

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// Database host
    #[arg(long = "db-host", env = "DB_HOST", default_value = "localhost")]
    pub host: String,

    /// Database port
    #[arg(long = "db-port", env = "DB_PORT", default_value_t = 3306)]
    pub port: u16,

    /// Database user
    #[arg(long = "db-user", env = "DB_USER", default_value = "")]
    pub user: String,

    /// Database password
    #[arg(long = "db-password", env = "DB_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Database name
    #[arg(long = "db-name", env = "DB_NAME", default_value = "")]
    pub name: String,
}

impl DbConfig {
    pub fn connect_options(&self) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user);

        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        if !self.name.is_empty() {
            options = options.database(&self.name);
        }
        options
    }

    /// `user@host:port/name`, for logs. Never includes the password.
    pub fn display_target(&self) -> String {
        format!("{}@{}:{}/{}", self.user, self.host, self.port, self.name)
    }
}
