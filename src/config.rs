use clap::Parser;
use once_cell::sync::Lazy;

pub const JWT_EXPRIED_TIME: i64 = 86400i64;

pub const MAIL_PATTERN: &str = "send-email";

pub static APP_CONFIG: Lazy<Config> = Lazy::new(Config::parse);

#[derive(Debug, Parser, Clone)]
pub struct Config {
    #[clap(long, env, default_value_t = 8080)]
    pub port: u16,

    #[clap(long, env, default_value_t = true)]
    pub swagger_enabled: bool,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    #[clap(long, env)]
    pub database_url: String,

    #[clap(long, env)]
    pub jwt_secret: String,

    #[clap(long, env, default_value_t = JWT_EXPRIED_TIME)]
    pub jwt_expires_in: i64,

    #[clap(long, env)]
    pub rabbitmq_uri: String,

    #[clap(long, env, default_value = "mail_service")]
    pub mail_queue: String,

    #[clap(long, env, default_value = "noreply@academy.local")]
    pub default_from_email: String,

    /// Comma separated recipients of moderation notifications
    #[clap(long, env, default_value = "")]
    pub admin_emails: String,

    #[clap(long, env, default_value = "http://localhost:8080")]
    pub site_url: String,

    #[clap(long, env, default_value = "redis://127.0.0.1:6379")]
    pub redis_url: String,

    #[clap(long, env, default_value = "admin")]
    pub admin_username: String,

    #[clap(long, env)]
    pub admin_email: String,

    #[clap(long, env)]
    pub admin_password: String,

    #[clap(long, env, default_value = "*")]
    pub cors_allowed_origins: String,

    #[clap(long, env, default_value = "local")]
    pub app_env: String,
}

impl Config {
    pub fn admin_email_list(&self) -> Vec<String> {
        split_emails(&self.admin_emails)
    }
}

pub fn split_emails(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_emails_are_trimmed_and_blank_entries_dropped() {
        let emails = split_emails(" a@x.com, ,b@y.org ,");
        assert_eq!(emails, vec!["a@x.com".to_string(), "b@y.org".to_string()]);
    }
}
