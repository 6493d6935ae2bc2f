//! Flick CLI
//!
//! Drive the flick gesture engine from scripted input.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flick_charm::physics::{decay_curve, ticks_to_rest};
use flick_core::Point;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod script;
mod session;

use script::GestureScript;
use session::{format_trace, Session};

#[derive(Parser)]
#[command(name = "flick")]
#[command(author, version, about = "Flick gesture engine tooling", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a gesture script against a virtual surface
    Replay {
        /// Path to the gesture script (.toml)
        script: PathBuf,

        /// Engine configuration file or directory containing flick.toml
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Keep ticking after the last step until the surface comes to rest
        #[arg(long)]
        settle: bool,

        /// Print the trace as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the deceleration curve for a release velocity
    Decay {
        /// Horizontal velocity (units per tick)
        #[arg(allow_negative_numbers = true)]
        vx: i32,

        /// Vertical velocity (units per tick)
        #[arg(allow_negative_numbers = true)]
        vy: i32,

        /// Engine configuration file or directory containing flick.toml
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Replay {
            script,
            config,
            settle,
            json,
        } => cmd_replay(script, config, settle, json),
        Commands::Decay { vx, vy, config } => cmd_decay(vx, vy, config),
    }
}

fn cmd_replay(path: PathBuf, config: Option<PathBuf>, settle: bool, json: bool) -> Result<()> {
    let config = config::load_config(config.as_deref())?;
    let script = GestureScript::load(&path)?;
    info!("Replaying {} ({} steps)", path.display(), script.steps.len());

    let lines = Session::new(&script, config)
        .with_context(|| format!("Cannot replay {}", path.display()))?
        .run(&script, settle);

    if json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else {
        print!("{}", format_trace(&lines));
    }
    Ok(())
}

fn cmd_decay(vx: i32, vy: i32, config: Option<PathBuf>) -> Result<()> {
    let config = config::load_config(config.as_deref())?;
    let speed = Point::new(vx, vy);

    let ticks = ticks_to_rest(speed, config.deceleration, config.max_speed);
    info!("{} comes to rest after {} ticks", speed, ticks);

    let mut travelled = Point::ZERO;
    for (tick, v) in decay_curve(speed, &config).iter().enumerate() {
        travelled += *v;
        println!("{:>4}  velocity {:<12} travelled {}", tick + 1, v.to_string(), travelled);
    }

    let millis = u64::from(ticks).saturating_mul(config.tick_interval_ms);
    println!(
        "at rest after {} ticks ({} ms), content moved by {}",
        ticks, millis, -travelled
    );
    Ok(())
}
