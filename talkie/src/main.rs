use clap::Parser;
use std::net::SocketAddr;
use talkie::{Cli, app, init_logging};
use tracing::{info, warn};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();
    let cli = Cli::parse();
    if cli.elevenlabs_api_key.is_none() {
        warn!("ELEVENLABS_API_KEY not set; speech requests go out unauthenticated");
    }

    let app = app(cli.state());
    let addr: SocketAddr = cli.addr.parse()?;
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
