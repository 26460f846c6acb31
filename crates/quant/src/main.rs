use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;

mod eval;
mod table;
mod unit;

use eval::Backend;

#[derive(Parser)]
#[command(name = "quant")]
#[command(about = "Dimension-checked arithmetic on physical measures", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    /// Numeric representation for measure values
    #[arg(long, global = true, value_enum, default_value = "f64")]
    backend: Backend,

    /// Fixed number of decimals when printing f64 values
    #[arg(long, global = true, value_name = "N")]
    precision: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the exponent sum/difference table
    Table(table::TableArgs),

    /// Parse a unit expression and print its canonical form
    #[command(alias = "u")]
    Unit(unit::UnitArgs),

    /// Evaluate a binary expression over two measures
    #[command(alias = "e")]
    Eval(eval::EvalArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Default level depends on --debug, RUST_LOG wins
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("error")
    };
    env_logger::Builder::from_env(env).init();

    if cli.precision.is_some() && !matches!(cli.backend, Backend::F64) {
        anyhow::bail!("--precision only applies to the f64 backend");
    }

    match cli.command {
        Commands::Table(args) => table::execute(args),
        Commands::Unit(args) => unit::execute(args),
        Commands::Eval(args) => eval::execute(args, cli.backend, cli.precision),
    }
}
