use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use quant_core::{DecimalOps, F64Ops, Measure, NumericOps, RationalOps, UnitVector};

#[derive(Args, Debug)]
#[command(about = "Evaluate a binary expression over two measures")]
pub struct EvalArgs {
    /// Left operand as "<number> <unit>", e.g. "9.81 m / s^2"
    #[arg(allow_hyphen_values = true)]
    pub lhs: String,

    /// One of + - * / ^ < <= == != >= >
    #[arg(allow_hyphen_values = true)]
    pub op: Op,

    /// Right operand; an integer exponent for ^
    #[arg(allow_hyphen_values = true)]
    pub rhs: String,

    /// Express the result as a multiple of this measure
    #[arg(long = "in", value_name = "MEASURE", allow_hyphen_values = true)]
    pub target: Option<String>,

    /// Display symbol for the --in measure
    #[arg(long, requires = "target")]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum Backend {
    /// IEEE double precision
    F64,
    /// 96-bit fixed-point decimal
    Decimal,
    /// Exact ratio of 64-bit integers
    Rational,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Lt,
    Le,
    Eq,
    Ne,
    Ge,
    Gt,
}

impl FromStr for Op {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s {
            "+" => Op::Add,
            "-" => Op::Sub,
            "*" => Op::Mul,
            "/" => Op::Div,
            "^" => Op::Pow,
            "<" => Op::Lt,
            "<=" => Op::Le,
            "==" => Op::Eq,
            "!=" => Op::Ne,
            ">=" => Op::Ge,
            ">" => Op::Gt,
            other => return Err(format!("unknown operator '{other}'")),
        };
        Ok(op)
    }
}

enum Outcome<O: NumericOps> {
    Measure(Measure<O>),
    Truth(bool),
}

pub fn execute(args: EvalArgs, backend: Backend, precision: Option<usize>) -> Result<()> {
    log::debug!("evaluating {:?} with the {backend:?} backend", args.op);
    let output = match backend {
        Backend::F64 => {
            let ops = match precision {
                Some(digits) => Arc::new(F64Ops::with_precision(digits)),
                None => F64Ops::shared(),
            };
            evaluate(&ops, &args)?
        }
        Backend::Decimal => evaluate(&DecimalOps::shared(), &args)?,
        Backend::Rational => evaluate(&RationalOps::shared(), &args)?,
    };
    println!("{output}");
    Ok(())
}

fn evaluate<O>(ops: &Arc<O>, args: &EvalArgs) -> Result<String>
where
    O: NumericOps,
    O::Value: FromStr,
    <O::Value as FromStr>::Err: Display + Send + Sync + 'static,
{
    let lhs = parse_measure(ops, &args.lhs)?;
    let rhs = || parse_measure(ops, &args.rhs);

    let outcome = match args.op {
        Op::Add => Outcome::Measure(lhs.plus(&rhs()?)?),
        Op::Sub => Outcome::Measure(lhs.minus(&rhs()?)?),
        Op::Mul => Outcome::Measure(lhs.times(&rhs()?)?),
        Op::Div => Outcome::Measure(lhs.over(&rhs()?)?),
        Op::Pow => {
            let exponent: i32 = args
                .rhs
                .trim()
                .parse()
                .with_context(|| format!("Invalid integer exponent '{}'", args.rhs))?;
            Outcome::Measure(lhs.to_the(exponent)?)
        }
        Op::Lt => Outcome::Truth(lhs.is_lt(&rhs()?)?),
        Op::Le => Outcome::Truth(lhs.is_le(&rhs()?)?),
        Op::Eq => Outcome::Truth(lhs.is_eq(&rhs()?)?),
        Op::Ne => Outcome::Truth(lhs.is_ne(&rhs()?)?),
        Op::Ge => Outcome::Truth(lhs.is_ge(&rhs()?)?),
        Op::Gt => Outcome::Truth(lhs.is_gt(&rhs()?)?),
    };

    match (outcome, &args.target) {
        (Outcome::Measure(result), None) => Ok(result.to_string()),
        (Outcome::Measure(result), Some(target)) => {
            let mut target = parse_measure(ops, target)?;
            if let Some(symbol) = &args.symbol {
                target = target.with_symbol(symbol.as_str());
            }
            Ok(result.in_unit(&target)?)
        }
        (Outcome::Truth(truth), None) => Ok(truth.to_string()),
        (Outcome::Truth(_), Some(_)) => {
            anyhow::bail!("--in only applies to arithmetic results")
        }
    }
}

/// Parse `"<number> <unit>"`; a bare number is dimensionless
fn parse_measure<O>(ops: &Arc<O>, input: &str) -> Result<Measure<O>>
where
    O: NumericOps,
    O::Value: FromStr,
    <O::Value as FromStr>::Err: Display + Send + Sync + 'static,
{
    let input = input.trim();
    let (number, unit) = input.split_once(char::is_whitespace).unwrap_or((input, ""));
    let value = number
        .parse::<O::Value>()
        .map_err(|e| anyhow::anyhow!("Invalid {} number '{number}': {e}", ops.name()))?;
    let unit: UnitVector = unit
        .parse()
        .with_context(|| format!("Invalid unit in measure '{input}'"))?;
    Ok(Measure::new(ops, value, unit))
}
