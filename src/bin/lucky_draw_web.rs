//! Registration form server for the lucky draw participant list.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use lucky_draw::core::ConfigProvider;
use lucky_draw::utils::{logger, validation::Validate};
use lucky_draw::web::{self, AppState};
use lucky_draw::TomlConfig;
use tracing::info;

#[derive(Parser)]
#[command(name = "lucky-draw-web")]
#[command(about = "Web form for registering lucky draw participants")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Participants CSV the form appends to
    #[arg(long)]
    participants: Option<PathBuf>,

    /// Address to bind the server to
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => TomlConfig::from_file(path)?,
        None => TomlConfig::default(),
    };
    if let Some(path) = args.participants {
        config.roster.path = path;
    }
    if let Some(bind) = args.bind {
        config.web.bind = bind;
    }
    if let Some(port) = args.port {
        config.web.port = port;
    }
    config.web.json_logs |= args.json_logs;

    logger::init_server_logger(config.web.json_logs);
    config.validate()?;

    let participants = config.participants_path().to_path_buf();
    info!(participants = %participants.display(), "starting lucky-draw-web");

    let app = web::router(AppState::new(participants)?);

    let addr: SocketAddr = format!("{}:{}", config.web.bind, config.web.port).parse()?;
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
