use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mock-server")]
#[command(about = "Answers every TCP connection with a fixed HTTP reply", long_about = None)]
struct Args {
    /// Address to bind to
    #[arg(short, long, env = "LISTEN", default_value = "127.0.0.1:8080")]
    listen: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let listener = TcpListener::bind(&args.listen).await?;
    info!(listen = %args.listen, "listening");
    mock_server::run(listener).await
}
