use std::path::PathBuf;

use serde::Deserialize;

use quill_core::config::Config;

/// Blog service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct BlogConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Redis connection URL; holds pending registrations and verification codes.
    pub redis_url: String,
    /// HMAC secret for signing bearer tokens.
    pub jwt_secret: String,
    /// TCP port to listen on (default 8000). Env var: `HTTP_PORT`.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// Sender address, also used as the SMTP username.
    pub smtp_sender: String,
    pub smtp_password: String,
    /// Directory uploads are written to and `/media` is served from.
    #[serde(default = "default_media_dir")]
    pub media_dir: PathBuf,
    /// Number of code-delivery workers (default 2).
    #[serde(default = "default_mail_workers")]
    pub mail_workers: usize,
    /// Pending delivery jobs before new ones are dropped (default 256).
    #[serde(default = "default_mail_queue_capacity")]
    pub mail_queue_capacity: usize,
}

impl Config for BlogConfig {}

fn default_http_port() -> u16 {
    8000
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_owned()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_media_dir() -> PathBuf {
    PathBuf::from("./media")
}

fn default_mail_workers() -> usize {
    2
}

fn default_mail_queue_capacity() -> usize {
    256
}
