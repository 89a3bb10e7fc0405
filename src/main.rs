#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![warn(clippy::nursery)]
#![allow(clippy::multiple_crate_versions)]
mod cli;

use crate::cli::{CalculatorConfig, Cli, Commands};
use anyhow::{Context, bail};
use clap::Parser;
use fnscript::{Calculator, Config, Value, vm::FunctionRegistry};
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Eval(cmd) => {
            let config = load_config(&cli.calculator_config)?;
            log::debug!("Using calculator config {config:?}");

            let args = cmd
                .args
                .iter()
                .map(|raw| parse_arg(raw))
                .collect::<anyhow::Result<Vec<_>>>()?;

            let calculator = Calculator::new(&config);
            let result = calculator.eval_string(&cmd.script, &args)?;

            if cmd.json {
                println!("{}", serde_json::to_string(&result)?);
            } else {
                println!("{}", result.to_plain_string());
            }
        }
        Commands::Functions => {
            for name in FunctionRegistry::default().names() {
                println!("{name}");
            }
        }
    }

    Ok(())
}

fn load_config(flags: &CalculatorConfig) -> anyhow::Result<Config> {
    let mut config = match &flags.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            Config::from_json(&raw)
                .with_context(|| format!("parsing config file {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(capacity) = flags.cache_capacity {
        config.cache_capacity = capacity;
    }
    if let Some(size) = flags.vm_pool_size {
        config.vm_pool_size = size;
    }

    Ok(config)
}

/// Convert a JSON literal into a script argument.
fn parse_arg(raw: &str) -> anyhow::Result<Value> {
    let json: serde_json::Value =
        serde_json::from_str(raw).with_context(|| format!("invalid JSON argument {raw}"))?;

    Ok(match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Decimal(
                n.to_string()
                    .parse::<Decimal>()
                    .or_else(|_| Decimal::from_scientific(&n.to_string()))
                    .with_context(|| format!("number {n} does not fit a decimal"))?,
            ),
        },
        serde_json::Value::String(s) => Value::String(s),
        other => bail!("unsupported argument {other}: only scalar JSON values are allowed"),
    })
}
