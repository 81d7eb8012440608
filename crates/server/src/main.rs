use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use screentime_server::{AppState, config::load_registry, run};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
struct Args {
    #[clap(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,
    #[clap(long, env = "PORT", default_value = "3000")]
    port: u16,
    /// JSON key registry: {"admin": "<base64>", "users": [...], "viewers": [...]}
    #[clap(long, env = "KEYS_FILE")]
    keys_file: Option<PathBuf>,
    /// Base64 admin public key, used when no registry file is given
    #[clap(long, env = "ADMIN_PUBLIC_KEY")]
    admin_public_key: Option<String>,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let keys = load_registry(args.keys_file.as_deref(), args.admin_public_key.as_deref())?;
    tracing::info!(
        admin = %keys.admin.fingerprint(),
        users = keys.users.len(),
        viewers = keys.viewers.len(),
        "key registry loaded"
    );
    for (role, key) in keys.iter() {
        tracing::debug!(%role, key = %key.fingerprint(), "authorized key");
    }

    run(&args.host, args.port, AppState::new(keys)).await
}
