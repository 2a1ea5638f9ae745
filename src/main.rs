#![allow(non_snake_case)]

mod cli;
mod clients;
mod config;
mod models;
mod runtime;
mod scrape;
mod service;

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use simplelog::{ColorChoice, Config as LogConfig, LevelFilter, TermLogger, TerminalMode};

use crate::clients::dongqiudi_client::{DongqiudiClient, PageFetcher};
use crate::config::{AppConfig, Settings};
use crate::service::schedule_service::ScheduleService;

const DEFAULT_RUN_MODE: &str = "api";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[tokio::main]
async fn main() {
    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    };

    let _ = TermLogger::init(
        LevelFilter::Info,
        LogConfig::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    let settings = Settings::from_config(&config);
    let fetcher: Arc<dyn PageFetcher> = Arc::new(DongqiudiClient::new(
        Duration::from_secs(settings.request_timeout_secs),
        settings.max_retries,
    ));
    let service = Arc::new(ScheduleService::new(
        fetcher,
        chrono::Duration::seconds(settings.cache_ttl_secs),
    ));

    let run_mode = config.get_prop("RUN_MODE").unwrap_or(DEFAULT_RUN_MODE.to_string());
    if run_mode == "api" {
        let bind_addr: SocketAddr = config
            .get_prop("BIND_ADDR")
            .unwrap_or(DEFAULT_BIND_ADDR.to_string())
            .parse()
            .expect("BIND_ADDR must be a valid socket address");
        runtime::run_api(service, bind_addr).await;
    } else if run_mode == "cli" {
        cli::cli(service).await;
    } else {
        println!("Invalid run mode {}", run_mode);
    }
}
