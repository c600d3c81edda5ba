use clap::ValueEnum;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "TWEETPRICE_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// `TWEETPRICE_LOG` takes precedence over `--log-level`. Logs go to stderr so
/// command output on stdout stays clean.
pub fn init_tracing(log_level: &str, format: LogFormat) -> Result<(), String> {
    let directives = std::env::var(LOG_ENV).unwrap_or_else(|_| log_level.to_string());
    let filter = EnvFilter::try_new(&directives)
        .map_err(|err| format!("invalid log filter '{directives}': {err}"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
    Ok(())
}

#[cfg(feature = "prometheus")]
pub fn init_metrics(addr: Option<SocketAddr>) -> Result<(), String> {
    let Some(addr) = addr else {
        return Ok(());
    };
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|err| format!("failed to start prometheus exporter on {addr}: {err}"))?;
    tracing::info!(metrics_addr = %addr, "serving prometheus metrics");
    Ok(())
}

#[cfg(not(feature = "prometheus"))]
pub fn init_metrics(addr: Option<SocketAddr>) -> Result<(), String> {
    match addr {
        Some(_) => Err("--metrics-addr needs the `prometheus` feature".to_string()),
        None => Ok(()),
    }
}
