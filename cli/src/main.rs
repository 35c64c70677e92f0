//! Birthday gift client: entry point for the command-line front end.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use clap::Parser;
use serde::Serialize;

use birthday_chain::{ChainClient, ChainConfig, GiftModule, RestClient};
use birthday_types::{AccountAddress, NetworkId, Octas, TimestampMillis};
use birthday_utils::{init_logging, LogFormat, SystemClock};
use birthday_views::render;
use birthday_views::{GiftPage, Trigger};
use birthday_wallet_core::signer::HTTP_SIGNER_NAME;
use birthday_wallet_core::{
    HttpSignerWallet, TxnState, WalletAdapter, WalletConnector, WatchOnlyWallet,
};

#[derive(Parser)]
#[command(name = "birthday-cli", about = "Send, claim and track on-chain birthday gifts")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "BIRTHDAY_CONFIG")]
    config: Option<PathBuf>,

    /// Network the module is deployed on: "mainnet", "testnet", "devnet" or "local".
    #[arg(long, env = "BIRTHDAY_NETWORK")]
    network: Option<String>,

    /// Fullnode REST base URL (defaults to the network's public fullnode).
    #[arg(long, env = "BIRTHDAY_FULLNODE_URL")]
    fullnode_url: Option<String>,

    /// Address the gift module is published under.
    #[arg(long, env = "BIRTHDAY_MODULE_ADDRESS")]
    module_address: Option<String>,

    /// Resource account holding the module's event streams.
    #[arg(long, env = "BIRTHDAY_RESOURCE_ACCOUNT")]
    resource_account: Option<String>,

    /// Watch this account read-only. Ignored when a signer is configured.
    #[arg(long, env = "BIRTHDAY_ACCOUNT")]
    account: Option<String>,

    /// Base URL of an external signer that holds the keys.
    #[arg(long, env = "BIRTHDAY_SIGNER_URL")]
    signer_url: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "BIRTHDAY_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "BIRTHDAY_LOG_FORMAT")]
    log_format: Option<String>,

    /// Print results as JSON instead of tables.
    #[arg(long)]
    json: bool,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Show the connected account's APT balance.
    Balance,
    /// List pending gifts sent by the account.
    Sent,
    /// List gifts addressed to the account and whether they can be claimed.
    Received,
    /// Show every gift event involving the account, newest first.
    History,
    /// Send a gift, claimable from the given release time.
    Send {
        recipient: String,
        /// Amount in APT.
        apt: f64,
        /// Release time as unix seconds.
        release_unix_secs: u64,
    },
    /// Claim the gift sent by `gifter`.
    Claim { gifter: String },
    /// Cancel the pending gift to `recipient`.
    Cancel { recipient: String },
    /// List available wallets.
    Wallets,
    /// Keep every view current until Ctrl-C.
    Watch {
        #[arg(long, default_value_t = 10)]
        interval_secs: u64,
    },
}

/// Read the config file, falling back to defaults with a warning.
fn load_file_config(path: &Path) -> (ChainConfig, Option<String>) {
    match path.to_str().map(ChainConfig::from_toml_file) {
        Some(Ok(cfg)) => (cfg, None),
        Some(Err(e)) => (
            ChainConfig::default(),
            Some(format!("Failed to load config file {}: {e}, using CLI defaults", path.display())),
        ),
        None => (
            ChainConfig::default(),
            Some(format!("Config path {} is not valid UTF-8, using CLI defaults", path.display())),
        ),
    }
}

fn merge_config(cli: &Cli, mut config: ChainConfig) -> anyhow::Result<ChainConfig> {
    if let Some(ref network) = cli.network {
        config.network = network.parse()?;
    }
    if let Some(ref url) = cli.fullnode_url {
        config.fullnode_url = Some(url.clone());
    }
    if let Some(ref address) = cli.module_address {
        config.module_address = address.clone();
    }
    if let Some(ref address) = cli.resource_account {
        config.resource_account_address = address.clone();
    }
    if let Some(ref level) = cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.log_format = format.clone();
    }
    Ok(config)
}

fn build_wallet(cli: &Cli, network: NetworkId) -> anyhow::Result<Arc<dyn WalletAdapter>> {
    if let Some(ref url) = cli.signer_url {
        let wallet = HttpSignerWallet::new(url.clone())?;
        return Ok(Arc::new(wallet));
    }
    if let Some(ref account) = cli.account {
        let address = AccountAddress::parse(account)?;
        return Ok(Arc::new(WatchOnlyWallet::new(address, network)));
    }
    bail!("no wallet: pass --account to watch an address or --signer-url to sign")
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_page(page: &GiftPage, trigger: Trigger) {
    let wallet = page.connector().snapshot();
    let now = page.now();
    println!("== {:?} @ {}", trigger, now.to_rfc3339());
    println!("{}", render::render_wallet(&wallet, page.balance().as_deref()));
    print!("{}", render::render_banners(&page.history().banners(&wallet)));
    println!("\nSent");
    print!("{}", render::render_sent(&page.sent().gifts()));
    println!("\nReceived");
    print!("{}", render::render_received(&page.received().rows_at(now), now));
    println!("\nHistory");
    print!("{}", render::render_history(&page.history().events()));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (file_config, config_warning) = match cli.config {
        Some(ref path) => load_file_config(path),
        None => (ChainConfig::default(), None),
    };
    let config = merge_config(&cli, file_config)?;

    let log_format = config.log_format.parse().unwrap_or(LogFormat::Human);
    init_logging(log_format, &config.log_level);
    if let Some(warning) = config_warning {
        tracing::warn!("{warning}");
    }
    config.validate().context("invalid configuration")?;

    tracing::info!(
        "Using {} module {}::{} via {}",
        config.network,
        config.module_address,
        config.module_name,
        config.fullnode_url(),
    );

    let client: Arc<dyn ChainClient> = Arc::new(RestClient::from_config(&config)?);
    let module = GiftModule::new(client, &config);
    let wallet = build_wallet(&cli, config.network)?;
    let connector = WalletConnector::new(wallet, module.clone(), config.network, TxnState::new());
    if cli.signer_url.is_some() {
        connector
            .connect(HTTP_SIGNER_NAME)
            .await
            .context("connecting to signer")?;
    }
    let page = GiftPage::new(connector.clone(), module, Arc::new(SystemClock));

    match cli.command {
        Command::Balance => match connector.balance().await {
            Some(balance) if cli.json => print_json(&serde_json::json!({ "balance": balance }))?,
            Some(balance) => println!("{balance} APT"),
            None => println!("{}", render::NOT_CONNECTED),
        },
        Command::Sent => {
            page.sent().refresh(&connector.snapshot()).await;
            if let Some(e) = page.sent().last_error() {
                tracing::warn!("sent gifts unavailable: {e}");
            }
            if cli.json {
                print_json(&page.sent().gifts())?;
            } else {
                print!("{}", render::render_sent(&page.sent().gifts()));
            }
        }
        Command::Received => {
            page.received().refresh(&connector.snapshot()).await;
            if let Some(e) = page.received().last_error() {
                tracing::warn!("received gifts unavailable: {e}");
            }
            let now = page.now();
            let rows = page.received().rows_at(now);
            if cli.json {
                print_json(&rows)?;
            } else {
                print!("{}", render::render_received(&rows, now));
            }
        }
        Command::History => {
            let wallet = connector.snapshot();
            page.history().refresh(&wallet).await;
            let banners = page.history().banners(&wallet);
            if cli.json {
                print_json(&serde_json::json!({
                    "banners": banners,
                    "events": page.history().events(),
                }))?;
            } else {
                print!("{}", render::render_banners(&banners));
                print!("{}", render::render_history(&page.history().events()));
            }
        }
        Command::Send {
            recipient,
            apt,
            release_unix_secs,
        } => {
            let recipient = AccountAddress::parse(&recipient)?;
            let amount =
                Octas::from_apt(apt).ok_or_else(|| anyhow!("invalid gift amount: {apt}"))?;
            let release = TimestampMillis::from_secs(release_unix_secs);
            let notice = connector.send_gift(&recipient, amount, release).await?;
            print!("{}", render::render_notification(&notice));
        }
        Command::Claim { gifter } => {
            let gifter = AccountAddress::parse(&gifter)?;
            page.received().refresh(&connector.snapshot()).await;
            match page.claim(&gifter).await {
                Some(notice) => print!("{}", render::render_notification(&notice)),
                None => bail!("gift from {gifter} was not claimed"),
            }
        }
        Command::Cancel { recipient } => {
            let recipient = AccountAddress::parse(&recipient)?;
            let notice = connector.cancel_gift(&recipient).await?;
            print!("{}", render::render_notification(&notice));
        }
        Command::Wallets => {
            let wallets = connector.wallets();
            if cli.json {
                print_json(&wallets)?;
            } else {
                print!("{}", render::render_wallets(&wallets));
            }
        }
        Command::Watch { interval_secs } => {
            let shutdown = async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!("failed to listen for Ctrl-C: {e}");
                }
            };
            page.run(Duration::from_secs(interval_secs.max(1)), shutdown, print_page)
                .await;
        }
    }

    Ok(())
}
