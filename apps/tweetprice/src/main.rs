mod commands;
mod infra;
mod obs;

use clap::{Parser, Subcommand};
use commands::Command;
use obs::LogFormat;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tweetprice")]
#[command(
    about = "Join timestamped posts with asset prices",
    version,
    arg_required_else_help = true
)]
#[command(
    after_help = "Examples:\n  tweetprice join --config configs/sample.toml --out runs/\n  tweetprice validate --config configs/sample.toml --strict\n"
)]
struct Cli {
    /// Log filter used when TWEETPRICE_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
    /// Expose Prometheus metrics on host:port.
    #[arg(long, global = true)]
    metrics_addr: Option<SocketAddr>,
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Join posts with prices and write the run artifacts.
    Join {
        #[arg(long)]
        config: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Check both inputs and print a quality report.
    Validate {
        #[arg(long)]
        config: PathBuf,
        #[arg(long, default_value_t = false)]
        strict: bool,
        /// Also write the report as JSON to this file.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = obs::init_tracing(&cli.log_level, cli.log_format)
        .and_then(|_| obs::init_metrics(cli.metrics_addr))
    {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }

    let command = match cli.command {
        CliCommand::Join { config, out } => Command::Join { config, out },
        CliCommand::Validate {
            config,
            strict,
            out,
        } => Command::Validate {
            config,
            strict,
            out,
        },
    };

    if let Err(err) = commands::run(command) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
