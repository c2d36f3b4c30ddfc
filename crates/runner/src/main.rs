//! Questbot: runs a scripted supply run against a sandbox world.
//!
//! Run with: `cargo run -p questbot -- --tick-ms 600`

mod demo;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use script_runtime::{Event, ScriptConfig, ScriptContext, Topic, config::CONFIG_PATH_ENV};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};
use world_sandbox::{Pacing, Sandbox};

/// Scripted world automation
#[derive(Parser)]
#[command(name = "questbot")]
#[command(about = "Runs a scripted supply run in a sandbox world", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file (overrides QUESTBOT_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Milliseconds between world ticks; 0 advances the world on demand
    #[arg(long, default_value_t = 0)]
    tick_ms: u64,

    /// Session name used for the log directory
    #[arg(long)]
    session: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let _guard = logging::init(cli.session.as_deref())?;

    let config = load_config(cli.config.as_deref())?;
    debug!(?config, "configuration resolved");

    let pacing = if cli.tick_ms == 0 {
        Pacing::OnDemand
    } else {
        Pacing::Ticker
    };
    let sandbox = demo::world(&config, pacing);

    let ticker = match pacing {
        Pacing::Ticker => Some(sandbox.spawn_ticker(Duration::from_millis(cli.tick_ms))),
        Pacing::OnDemand => None,
    };
    let ctx = context(&sandbox, config, pacing)?;
    spawn_event_loggers(&ctx);

    info!(?pacing, "starting supply run");
    let result = demo::supply_run(&ctx).await;

    if let Some(ticker) = ticker {
        ticker.abort();
    }
    info!(
        ticks = %ctx.snapshot().tick,
        actions = sandbox.actions().len(),
        "session finished"
    );
    result
}

/// Resolution order: `--config`, `QUESTBOT_CONFIG`, the platform config
/// directory, built-in defaults. Environment overrides apply last.
fn load_config(explicit: Option<&std::path::Path>) -> Result<ScriptConfig> {
    if let Some(path) = explicit {
        let mut config = ScriptConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?;
        config.apply_env_overrides();
        return Ok(config);
    }

    if std::env::var_os(CONFIG_PATH_ENV).is_some() {
        return ScriptConfig::from_env().context("loading config from QUESTBOT_CONFIG");
    }

    if let Some(dirs) = directories::ProjectDirs::from("", "", "questbot") {
        let path = dirs.config_dir().join("config.toml");
        if path.exists() {
            info!(path = %path.display(), "using platform config");
            let mut config = ScriptConfig::load(&path)
                .with_context(|| format!("loading config from {}", path.display()))?;
            config.apply_env_overrides();
            return Ok(config);
        }
    }

    let mut config = ScriptConfig::default();
    config.apply_env_overrides();
    Ok(config)
}

fn context(sandbox: &Arc<Sandbox>, config: ScriptConfig, pacing: Pacing) -> Result<ScriptContext> {
    let builder = ScriptContext::builder().config(config);
    let builder = match pacing {
        // The sandbox clock steps the world itself when a wait needs a tick.
        Pacing::OnDemand => builder.host(Arc::clone(sandbox)),
        Pacing::Ticker => builder
            .feed(sandbox.feed())
            .controls(Arc::clone(sandbox) as _)
            .navigator(Arc::clone(sandbox) as _)
            .dialogue(Arc::clone(sandbox) as _)
            .combat(Arc::clone(sandbox) as _)
            .spellbook(Arc::clone(sandbox) as _),
    };
    builder.build().context("assembling script context")
}

fn spawn_event_loggers(ctx: &ScriptContext) {
    let receivers = ctx
        .events()
        .subscribe_multiple(&[Topic::Session, Topic::Acquisition, Topic::Wait]);

    for (topic, mut rx) in receivers {
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => log_event(&event),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(?topic, skipped, "event logger lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
    }
}

fn log_event(event: &Event) {
    match event {
        Event::WaitTimedOut(wait) => warn!(label = %wait.label, ticks = wait.ticks, "wait timed out"),
        other => info!(event = ?other, "script event"),
    }
}
