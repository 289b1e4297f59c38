/*
[INPUT]:  CLI arguments, .env / environment, wallets.json, OS shutdown signals
[OUTPUT]: Hourly activation passes over all wallets
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use lightmining_adapter::ContractActivator;
use lightmining_bot::{BatchRunner, DiscordWebhook, Notifier, Settings, load_wallets};

#[derive(Parser, Debug)]
#[command(name = "lightmining-bot", version, about = "Daily light-mining activation runner")]
struct Cli {
    #[arg(long = "wallets", value_name = "PATH", default_value = "wallets.json")]
    wallets_path: PathBuf,
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    #[arg(long = "log-dir", value_name = "DIR")]
    log_dir: Option<PathBuf>,
    /// Run a single pass and exit
    #[arg(long = "once")]
    once: bool,
    #[arg(long = "dry-run")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Cli::parse();
    let _guard = init_tracing(&args.log_level, args.log_dir.as_deref())?;

    info!(
        wallets_path = %args.wallets_path.display(),
        dry_run = args.dry_run,
        once = args.once,
        "starting lightmining-bot"
    );

    let wallets = load_wallets(&args.wallets_path)
        .inspect_err(|err| error!(error = %err, "no usable wallets, exiting"))
        .context("load wallets")?;
    let settings = Settings::load(args.config_path.as_deref()).context("load settings")?;
    info!(
        wallet_count = wallets.len(),
        api_url = %settings.api_url,
        notification = settings.notification,
        "configuration loaded"
    );

    let activator = ContractActivator::new(&settings.rpc_url, &settings.contract_address)
        .context("configure on-chain activator")?;
    let notifier = build_notifier(&settings)?;

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        return Ok(());
    }

    let runner = BatchRunner::new(wallets, &settings, Box::new(activator), notifier);

    if args.once {
        let report = runner.run_pass().await;
        info!(processed = report.total(), "single pass complete");
        return Ok(());
    }

    tokio::select! {
        _ = runner.run_forever() => {}
        _ = shutdown_signal() => info!("shutdown signal received"),
    }
    Ok(())
}

fn build_notifier(settings: &Settings) -> Result<Option<Box<dyn Notifier>>> {
    match settings.webhook() {
        Some(url) => {
            let webhook = DiscordWebhook::new(url).context("configure webhook")?;
            Ok(Some(Box::new(webhook)))
        }
        None => {
            if settings.notification {
                warn!("DISCORD_NOTIFICATION is set but DISCORD_WEBHOOK_URL is empty; notifications disabled");
            }
            Ok(None)
        }
    }
}

fn init_tracing(log_level: &str, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "lightmining-bot.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(guard)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT"),
        _ = terminate => info!("received SIGTERM"),
    }
}
