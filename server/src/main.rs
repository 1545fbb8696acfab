use std::sync::Arc;

use clap::Parser;

mod config;
mod controllers;
mod errors;
mod http;
mod routes;

#[tokio::main]
async fn main() {
    // .env may carry RUST_LOG, so load it before the logger
    dotenvy::dotenv().ok();
    env_logger::builder().format_timestamp_micros().init();

    let opt = config::Opt::parse();

    let settings = match mailbridge::config::load_config(opt.config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            log::error!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    log::debug!("{:?}", settings);

    let requirements = match mailbridge::Requirements::from_settings(&settings) {
        Ok(r) => r,
        Err(e) => {
            log::error!("Failed to set up providers: {}", e);
            std::process::exit(1);
        }
    };

    let arg = config::HttpArg {
        port: opt.port.unwrap_or(settings.port),
        requirements: Arc::new(requirements),
    };

    http::run(arg).await;
}
