use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dawnkeep::account::{mask_identity, Account, AccountStore};
use dawnkeep::client::RewardClient;
use dawnkeep::config::Config;
use dawnkeep::proxy::{self, ProxyBindings, ProxyPool};
use dawnkeep::scheduler::Fleet;

#[derive(Parser)]
#[command(
    name = "dawnkeep",
    version,
    about = "Concurrent keepalive and earning monitor for Dawn accounts with proxy rotation",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    /// Configuration file path (environment variables used when absent)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the keepalive fleet over all configured accounts
    Run {
        /// Account store path
        #[arg(long, default_value = "accounts.json")]
        accounts: PathBuf,

        /// Proxy list path (overrides configuration)
        #[arg(long)]
        proxy_file: Option<PathBuf>,

        /// Disable proxy usage for this run
        #[arg(long, default_value = "false")]
        no_proxy: bool,

        /// Fetch the remote proxy list before starting
        #[arg(long, default_value = "false")]
        fetch_proxies: bool,
    },

    /// Manage the account store
    Accounts {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Inspect or refresh the proxy list
    Proxies {
        #[command(subcommand)]
        action: ProxyAction,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// List stored accounts with masked identities
    List {
        /// Account store path
        #[arg(long, default_value = "accounts.json")]
        accounts: PathBuf,
    },

    /// Add an account
    Add {
        /// Account email
        email: String,

        /// Bearer token
        token: String,

        /// Account store path
        #[arg(long, default_value = "accounts.json")]
        accounts: PathBuf,
    },

    /// Remove an account by its list number
    Remove {
        /// 1-based account number as shown by `accounts list`
        number: usize,

        /// Account store path
        #[arg(long, default_value = "accounts.json")]
        accounts: PathBuf,
    },
}

#[derive(Subcommand)]
enum ProxyAction {
    /// Parse the proxy list and report valid and rejected lines
    Check {
        /// Proxy list path
        #[arg(long, default_value = "proxy.txt")]
        file: PathBuf,
    },

    /// Fetch a remote proxy list into the local file
    Fetch {
        /// Remote list URL
        #[arg(long, default_value = proxy::DEFAULT_REMOTE_LIST_URL)]
        url: String,

        /// Destination path
        #[arg(long, default_value = "proxy.txt")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    match cli.command {
        Commands::Run {
            accounts,
            proxy_file,
            no_proxy,
            fetch_proxies,
        } => {
            run(config, accounts, proxy_file, no_proxy, fetch_proxies).await?;
        }

        Commands::Accounts { action } => match action {
            AccountAction::List { accounts } => {
                list_accounts(&AccountStore::new(accounts)).await?;
            }
            AccountAction::Add {
                email,
                token,
                accounts,
            } => {
                let store = AccountStore::new(accounts);
                let masked = mask_identity(&email);
                store.add(Account::new(email, token)).await?;
                println!("Added account {masked}");
            }
            AccountAction::Remove { number, accounts } => {
                if number == 0 {
                    anyhow::bail!("account numbers start at 1");
                }
                let store = AccountStore::new(accounts);
                let removed = store.remove(number - 1).await?;
                println!("Removed account {}", removed.masked_email());
            }
        },

        Commands::Proxies { action } => match action {
            ProxyAction::Check { file } => {
                check_proxies(&file).await?;
            }
            ProxyAction::Fetch { url, output } => {
                let lines = proxy::fetch_remote_list(&url, &output).await?;
                println!("Saved {lines} proxy lines to {}", output.display());
            }
        },
    }

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("dawnkeep=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("dawnkeep=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

async fn run(
    config: Config,
    accounts_path: PathBuf,
    proxy_file: Option<PathBuf>,
    no_proxy: bool,
    fetch_proxies: bool,
) -> Result<()> {
    config.validate()?;

    let store = AccountStore::new(accounts_path);
    let accounts = store.load().await?;
    if accounts.is_empty() {
        anyhow::bail!("no accounts configured; add one with `dawnkeep accounts add`");
    }

    let use_proxy = config.proxy.enabled && !no_proxy;
    let proxy_path = proxy_file.unwrap_or_else(|| config.proxy.file.clone());

    let pool = if use_proxy {
        load_pool(&config, &proxy_path, fetch_proxies).await
    } else {
        ProxyPool::new(Vec::new())
    };

    let client = Arc::new(RewardClient::with_config_and_base_url(
        &config.api.base_url,
        config.request_timeout(),
        config.retry_policy(),
    ));

    let fleet = Fleet::new(
        client,
        ProxyBindings::new(pool),
        use_proxy,
        config.poll_interval(),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, stopping fleet");
            let _ = shutdown_tx.send(true);
        }
    });

    fleet.run(accounts, shutdown_rx).await?;
    Ok(())
}

/// Build the proxy pool, degrading to an empty pool on any load failure
async fn load_pool(config: &Config, proxy_path: &PathBuf, fetch_proxies: bool) -> ProxyPool {
    if fetch_proxies {
        let url = config
            .proxy
            .remote_url
            .as_deref()
            .unwrap_or(proxy::DEFAULT_REMOTE_LIST_URL);
        if let Err(error) = proxy::fetch_remote_list(url, proxy_path).await {
            tracing::warn!(error = %error, "remote proxy list fetch failed, using existing file");
        }
    }

    match proxy::load_from_file(proxy_path).await {
        Ok(proxies) => {
            if proxies.is_empty() {
                tracing::warn!("proxy list is empty, accounts will run without proxies");
            }
            ProxyPool::new(proxies)
        }
        Err(error) => {
            tracing::warn!(error = %error, "proxy list unavailable, continuing without proxies");
            ProxyPool::new(Vec::new())
        }
    }
}

async fn list_accounts(store: &AccountStore) -> Result<()> {
    let accounts = store.load().await?;
    if accounts.is_empty() {
        println!("No accounts in {}", store.path().display());
        return Ok(());
    }

    for (i, account) in accounts.iter().enumerate() {
        let token_preview: String = account.token.chars().take(5).collect();
        println!(
            "{}. {} | token: {}...",
            i + 1,
            account.masked_email(),
            token_preview
        );
    }
    Ok(())
}

async fn check_proxies(file: &PathBuf) -> Result<()> {
    let content = tokio::fs::read_to_string(file).await?;
    let (proxies, rejected) = proxy::parse_lines(content.lines());

    println!(
        "{}: {} valid, {} rejected",
        file.display(),
        proxies.len(),
        rejected.len()
    );
    for (line, error) in &rejected {
        println!("  rejected: {line} ({error})");
    }
    Ok(())
}
