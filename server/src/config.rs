use std::sync::Arc;

use clap::Parser;

use mailbridge::Requirements;

/// Upper bound on a `POST /email` body, in bytes
pub const MAX_EMAIL_SIZE: u64 = 1024 * 1024;

#[derive(Debug, Parser)]
#[command(name = "mailbridge", about = "Sends email through SendGrid or Mailgun.")]
pub struct Opt {
    /// Path to a TOML config file. Environment variables override it.
    #[arg(short, long)]
    pub config: Option<String>,

    /// Port to listen on, overriding the configured one
    #[arg(short, long)]
    pub port: Option<u16>,
}

pub struct HttpArg {
    pub port: u16,
    pub requirements: Arc<Requirements>,
}
