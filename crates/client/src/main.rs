use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use screentime_client::Client;
use screentime_core::{KeySet, PrivateKey, PublicKey, ScreenTime};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
struct Args {
    #[clap(long, env = "SCREENTIME_SERVER", default_value = "http://127.0.0.1:3000")]
    server: String,
    /// Base64 Ed25519 private key of this device
    #[clap(long, env = "SCREENTIME_PRIVATE_KEY", conflicts_with = "key_seed")]
    private_key: Option<String>,
    /// Derive this device's key from a seed string
    #[clap(long, env = "SCREENTIME_KEY_SEED")]
    key_seed: Option<String>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the public key of this device
    PublicKey,
    /// Ask the service which role this device holds
    Role,
    /// Read a week's screen time
    Get { user: String, year: i32, week: u8 },
    /// Overwrite a week's screen time
    Set {
        user: String,
        year: i32,
        week: u8,
        #[clap(long)]
        available: u32,
        #[clap(long)]
        used: u32,
    },
    /// Print the public registry for a JSON file of private keys
    DeriveKeys { file: PathBuf },
    /// Upload the public registry for a JSON file of private keys
    UploadKeys { file: PathBuf },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn device_key(args: &Args) -> Result<PrivateKey> {
    match (&args.private_key, &args.key_seed) {
        (Some(encoded), _) => PrivateKey::from_base64(encoded).context("decoding private key"),
        (None, Some(seed)) => Ok(PrivateKey::from_seed(seed)),
        (None, None) => bail!("a private key or key seed is required"),
    }
}

fn public_registry(file: &Path) -> Result<KeySet<PublicKey>> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("reading private key registry {}", file.display()))?;
    let private: KeySet<PrivateKey> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing private key registry {}", file.display()))?;
    Ok(private.map(PrivateKey::public_key))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    if let Command::DeriveKeys { file } = &args.command {
        println!("{}", serde_json::to_string_pretty(&public_registry(file)?)?);
        return Ok(());
    }

    let key = device_key(&args)?;
    if let Command::PublicKey = args.command {
        println!("{}", key.public_key());
        return Ok(());
    }

    let client = Client::new(&args.server, Arc::new(key))?;
    match args.command {
        Command::Role => match client.role().await? {
            Some(role) => println!("{role}"),
            None => println!("no role reported"),
        },
        Command::Get { user, year, week } => match client.get_time(&user, year, week).await? {
            Some(value) => println!(
                "available {} used {} remaining {}",
                value.available,
                value.used,
                value.remaining()
            ),
            None => println!("nothing recorded for {user} {year}/{week}"),
        },
        Command::Set {
            user,
            year,
            week,
            available,
            used,
        } => {
            client
                .set_time(&user, year, week, ScreenTime { available, used })
                .await?;
        }
        Command::UploadKeys { file } => {
            client.upload_keys(&public_registry(&file)?).await?;
        }
        Command::PublicKey | Command::DeriveKeys { .. } => {}
    }
    Ok(())
}
