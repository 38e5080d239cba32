//! ticklab CLI — backtest runs and synthetic tape generation.
//!
//! Commands:
//! - `run` — execute a backtest from a TOML config file or inline flags
//! - `synth` — write a seeded synthetic tape CSV for smoke runs

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use ticklab_core::data::generate_synthetic_tape;
use ticklab_core::strategy::{PricingPolicy, StrategySpec};
use ticklab_runner::{
    run_single_backtest, save_artifacts, write_tape, BacktestConfig, BacktestResult,
};

#[derive(Parser)]
#[command(name = "ticklab", about = "ticklab CLI — tick-replay backtesting engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a backtest from a TOML config file or inline flags.
    Run {
        /// Path to a TOML config file. Mutually exclusive with --strategy.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Strategy name: dummy, basic-ewma. Required without --config.
        #[arg(long)]
        strategy: Option<String>,

        /// Path to the historical tape CSV. Required without --config.
        #[arg(long)]
        data: Option<PathBuf>,

        /// Latency between submission and resolution, in seconds.
        #[arg(long, default_value_t = 0.0)]
        latency: f64,

        /// Flat cost per executed order.
        #[arg(long, default_value_t = 0.0)]
        order_cost: f64,

        /// Starting cash.
        #[arg(long, default_value_t = 10_000.0)]
        initial_money: f64,

        /// Starting stock quantity.
        #[arg(long, default_value_t = 0)]
        initial_stock: u64,

        /// basic-ewma: smoothing factor in (0, 1).
        #[arg(long)]
        beta: Option<f64>,

        /// basic-ewma: fractional band around the mid.
        #[arg(long)]
        margin: Option<f64>,

        /// basic-ewma: cooldown between orders, in seconds.
        #[arg(long)]
        wait_time: Option<f64>,

        /// basic-ewma: pricing policy (aggressive, passive).
        #[arg(long)]
        pricing: Option<String>,

        /// basic-ewma: fixed order quantity (exclusive with --proportional-quantity).
        #[arg(long)]
        fixed_quantity: Option<u64>,

        /// basic-ewma: fraction of available cash/stock per order, in (0, 1].
        #[arg(long)]
        proportional_quantity: Option<f64>,

        /// Output directory for result artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Generate a seeded synthetic tape CSV.
    Synth {
        /// Number of observations to generate.
        #[arg(long, default_value_t = 10_000)]
        ticks: usize,

        /// RNG seed; the same seed reproduces the same tape.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Instrument symbol (also names the file stem on load).
        #[arg(long, default_value = "SYN")]
        symbol: String,

        /// Output path.
        #[arg(long, default_value = "SYN.csv")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            strategy,
            data,
            latency,
            order_cost,
            initial_money,
            initial_stock,
            beta,
            margin,
            wait_time,
            pricing,
            fixed_quantity,
            proportional_quantity,
            output_dir,
        } => {
            let config = match (config, strategy) {
                (Some(path), None) => BacktestConfig::from_toml_file(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                (None, Some(name)) => {
                    let Some(data_file) = data else {
                        bail!("--data is required when running without --config");
                    };
                    let mut spec = StrategySpec::named(name);
                    spec.params.beta = beta;
                    spec.params.margin = margin;
                    spec.params.wait_time = wait_time;
                    spec.params.pricing = pricing.as_deref().map(parse_pricing).transpose()?;
                    spec.params.fixed_quantity = fixed_quantity;
                    spec.params.proportional_quantity = proportional_quantity;
                    BacktestConfig {
                        data_file,
                        strategy: spec,
                        latency,
                        order_cost,
                        initial_money,
                        initial_stock,
                    }
                }
                (Some(_), Some(_)) => bail!("--config and --strategy are mutually exclusive"),
                (None, None) => bail!("either --config or --strategy is required"),
            };

            let result = run_single_backtest(&config).context("backtest failed")?;
            let paths = save_artifacts(&result, &output_dir)
                .with_context(|| format!("writing artifacts to {}", output_dir.display()))?;

            print_summary(&result);
            for path in paths {
                println!("wrote {}", path.display());
            }
            Ok(())
        }
        Commands::Synth {
            ticks,
            seed,
            symbol,
            out,
        } => {
            let tape = generate_synthetic_tape(&symbol, ticks, seed);
            write_tape(&tape, &out)
                .with_context(|| format!("writing tape to {}", out.display()))?;
            println!("wrote {} ticks to {}", tape.len(), out.display());
            Ok(())
        }
    }
}

fn parse_pricing(value: &str) -> Result<PricingPolicy> {
    match value {
        "aggressive" => Ok(PricingPolicy::Aggressive),
        "passive" => Ok(PricingPolicy::Passive),
        other => bail!("unknown pricing policy '{other}' (expected aggressive or passive)"),
    }
}

fn print_summary(result: &BacktestResult) {
    let metrics = &result.metrics;
    println!(
        "{} on {}: {} ticks, {} orders, {} fills, {} rejects",
        result.strategy,
        result.symbol,
        metrics.tick_count,
        metrics.orders_submitted,
        metrics.orders_filled,
        metrics.orders_rejected,
    );
    println!(
        "equity {:.2} -> {:.2} ({:+.2}%), max drawdown {:.2}%, costs paid {:.2}",
        metrics.initial_equity,
        metrics.final_equity,
        metrics.total_return_pct,
        metrics.max_drawdown_pct,
        metrics.total_cost_paid,
    );
}
