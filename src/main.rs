//! Solana Tracker - trending tokens and wallet portfolios from the terminal

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use solana_tracker::adapters::cli::render;
use solana_tracker::adapters::cli::{CliApp, Command, ConnectCmd, OutputFormat, TrendingCmd, ValidateCmd, WalletCmd};
use solana_tracker::adapters::tracker_api::{TrackerApiClient, TrendingDataAdapter, WalletDataAdapter};
use solana_tracker::adapters::wallet_extension::{auto_approve, ConsentPrompt, KeypairWalletProvider};
use solana_tracker::application::{TrendingView, WalletBridgeError, WalletProviderBridge, WalletView};
use solana_tracker::config::{load_or_default, Config};
use solana_tracker::domain::address::AddressValidator;
use solana_tracker::domain::view_state::ViewState;
use solana_tracker::ports::TrackerDataPort;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (API key goes here, not in the config file)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    let config = load_or_default(&app.config)
        .with_context(|| format!("Failed to load configuration from {}", app.config.display()))?;
    init_logging(app.verbose, app.debug, &config.logging.level)?;

    match app.command {
        Command::Trending(cmd) => trending_command(cmd, &config).await,
        Command::Validate(cmd) => validate_command(cmd),
        Command::Wallet(cmd) => wallet_command(cmd, &config).await,
        Command::Connect(cmd) => connect_command(cmd, &config).await,
    }
}

fn init_logging(verbose: bool, debug: bool, configured: &str) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn data_provider(config: &Config) -> Result<Arc<dyn TrackerDataPort>> {
    let client = TrackerApiClient::with_config(config.api.client_config())
        .context("Failed to create Solana Tracker client")?;
    Ok(Arc::new(client))
}

async fn trending_command(cmd: TrendingCmd, config: &Config) -> Result<()> {
    let view = TrendingView::new(TrendingDataAdapter::new(data_provider(config)?));
    view.show(cmd.timeframe).await;

    match view.state().await {
        ViewState::Loaded(entries) => {
            let output = match cmd.format {
                OutputFormat::Text => render::render_trending(&entries, cmd.timeframe),
                OutputFormat::Json => render::render_json(&entries)?,
            };
            println!("{}", output.trim_end());
            Ok(())
        }
        ViewState::Errored(message) => {
            let retry_hint = view
                .last_error()
                .await
                .map(|e| e.is_retryable())
                .unwrap_or(false);
            if retry_hint {
                eprintln!("Try again in a moment.");
            }
            bail!("Error loading trending tokens: {}", message)
        }
        other => bail!("Trending view ended in unexpected state: {}", other.label()),
    }
}

fn validate_command(cmd: ValidateCmd) -> Result<()> {
    let result = AddressValidator::new().validate(&cmd.address);
    let output = render::render_validation(&cmd.address, &result);
    if result.is_valid() {
        println!("{}", output);
        Ok(())
    } else {
        bail!(output)
    }
}

async fn wallet_command(cmd: WalletCmd, config: &Config) -> Result<()> {
    show_wallet(&cmd.address, cmd.format, config).await
}

async fn show_wallet(address: &str, format: OutputFormat, config: &Config) -> Result<()> {
    let view = WalletView::new(WalletDataAdapter::new(data_provider(config)?));
    view.lookup(address).await;

    match view.state().await {
        ViewState::Loaded(portfolio) => {
            let output = match format {
                OutputFormat::Text => render::render_wallet(address.trim(), &portfolio),
                OutputFormat::Json => render::render_json(&portfolio)?,
            };
            println!("{}", output.trim_end());
            Ok(())
        }
        ViewState::Errored(message) => bail!("Error loading wallet: {}", message),
        other => bail!("Wallet view ended in unexpected state: {}", other.label()),
    }
}

async fn connect_command(cmd: ConnectCmd, config: &Config) -> Result<()> {
    let keypair_path = match cmd.keypair {
        Some(path) => shellexpand::tilde(&path.to_string_lossy()).to_string(),
        None => config.wallet.get_keypair_path(),
    };
    let consent = if cmd.yes { auto_approve() } else { stdin_consent() };

    let provider = Arc::new(KeypairWalletProvider::new(keypair_path, consent));
    let bridge = WalletProviderBridge::new(provider.clone());

    if !bridge.wait_until_available(config.wallet.poll_schedule()).await {
        let path = provider.path().display();
        bail!(
            "Wallet not found at {}\n\n\
             To create a new wallet, run:\n  \
             solana-keygen new --outfile {}\n\n\
             Or point 'keypair_path' in your config (or SOLANA_KEYPAIR_PATH) at an existing one",
            path,
            path
        );
    }

    let public_key = match bridge.connect().await {
        Ok(key) => key,
        Err(WalletBridgeError::UserRejected) => {
            println!("Connection request declined");
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to connect wallet"),
    };
    println!("{}", render::render_connection(&bridge.connection_state()));
    println!("Explorer: https://solscan.io/account/{}", public_key);

    if cmd.show_wallet {
        println!();
        show_wallet(&public_key, OutputFormat::Text, config).await?;
    }

    if cmd.disconnect {
        bridge.disconnect().await.context("Failed to disconnect wallet")?;
        println!("{}", render::render_connection(&bridge.connection_state()));
    }
    Ok(())
}

/// Ask on the terminal before handing out the public key
fn stdin_consent() -> ConsentPrompt {
    Arc::new(|public_key: &str| {
        print!("Connect wallet {}? [y/N] ", public_key);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    })
}
