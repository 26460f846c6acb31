use anyhow::{Context, Result};
use clap::Args;
use quant_core::UnitVector;
use quant_core::format::describe_unit;

#[derive(Args, Debug)]
#[command(about = "Parse a unit expression and print its canonical form")]
pub struct UnitArgs {
    /// Unit expression, e.g. "kg * m / s^2"
    pub expr: String,
}

pub fn execute(args: UnitArgs) -> Result<()> {
    let unit: UnitVector = args
        .expr
        .parse()
        .with_context(|| format!("Failed to parse unit '{}'", args.expr))?;
    log::debug!("parsed unit {unit:?}");
    println!("{}", describe_unit(&unit));
    Ok(())
}
