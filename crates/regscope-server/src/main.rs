use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use regscope_server::{AppState, router};
use regscope_store::{DEFAULT_TABLE, StoreConfig};
use tracing::info;

#[derive(Parser)]
#[command(name = "regscope-server", version, about = "Serve the regulation browser and retrieval API")]
struct Args {
    /// Address to listen on
    #[arg(long, env = "REGSCOPE_BIND", default_value = "0.0.0.0:3000")]
    bind: SocketAddr,

    /// Supabase project URL
    #[arg(long, env = "SUPABASE_URL", hide_env_values = true)]
    store_url: Option<String>,

    /// Supabase service role key
    #[arg(long, env = "SUPABASE_SERVICE_ROLE_KEY", hide_env_values = true)]
    service_key: Option<String>,

    /// Table holding the bill rows
    #[arg(long, env = "REGSCOPE_TABLE", default_value = DEFAULT_TABLE)]
    table: String,

    /// Store request timeout in seconds
    #[arg(long, env = "REGSCOPE_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("regscope_core=info".parse()?)
                .add_directive("regscope_server=info".parse()?)
                .add_directive("regscope_store=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    let args = Args::parse();
    info!("regscope-server v{}", env!("CARGO_PKG_VERSION"));

    let config = StoreConfig::new(args.store_url, args.service_key).map(|c| {
        c.with_table(args.table)
            .with_timeout(Duration::from_secs(args.timeout_secs))
    });
    let state = Arc::new(AppState::from_config(config)?);
    let app = router(state);

    info!("Starting regscope server on http://{}", args.bind);
    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("binding {}", args.bind))?;
    axum::serve(listener, app).await?;

    Ok(())
}
