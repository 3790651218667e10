use anyhow::Result;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "ooi-backend")]
#[command(about = "OOI uframe storage event service", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// Directory for daily-rolling log files
    #[arg(long)]
    log_dir: Option<String>,

    /// Emit console logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn init_logging(args: &Args) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console_json = args.json_logs.then(|| fmt::layer().json());
    let console_plain = (!args.json_logs).then(fmt::layer);

    let (file_layer, guard) = match &args.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "ooi-backend.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_json)
        .with(console_plain)
        .with(file_layer)
        .init();
    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = init_logging(&args);

    if let Some(config) = &args.config {
        std::env::set_var(backend_infrastructure::CONFIG_PATH_ENV, config);
    }

    backend_bootstrap::run().await
}
