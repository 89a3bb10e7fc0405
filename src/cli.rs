use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    version,
    name = "fnscript",
    about = r#"
Evaluate SQL function expressions through the fnscript script dialect.

Scripts use `$NAME(...)` for function calls and `arguments[n]` for positional
arguments, e.g. `$IF(arguments[0] == 1, 'one', 'other')`."#
)]
pub struct Cli {
    #[command(flatten)]
    pub calculator_config: CalculatorConfig,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Evaluate a script
    Eval(EvalCommand),
    /// List the builtin functions available to scripts
    Functions,
}

/// Settings for the calculator backing the command.
#[derive(Debug, Clone, Args)]
pub struct CalculatorConfig {
    /// JSON file with calculator settings; flags override its values.
    #[arg(long, global = true, env = "FNSCRIPT_CONFIG")]
    pub config: Option<PathBuf>,
    /// Maximum number of compiled nodes kept in the script cache.
    #[arg(long, global = true, env = "FNSCRIPT_CACHE_CAPACITY")]
    pub cache_capacity: Option<usize>,
    /// Maximum number of idle script VMs kept in the pool.
    #[arg(long, global = true, env = "FNSCRIPT_VM_POOL_SIZE")]
    pub vm_pool_size: Option<usize>,
}

#[derive(Debug, Clone, Args)]
pub struct EvalCommand {
    /// Script text, e.g. `arguments[0] * 2`.
    pub script: String,
    /// Positional argument as a JSON literal (`10`, `1.5`, `"abc"`, `null`); repeatable.
    #[arg(long = "arg", short = 'a', value_name = "JSON")]
    pub args: Vec<String>,
    /// Print the result as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
