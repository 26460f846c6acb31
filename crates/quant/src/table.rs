use anyhow::Result;
use clap::Args;
use quant_core::exponent::{ExponentTable, TableEntry};

#[derive(Args, Debug)]
#[command(about = "Print the exponent sum/difference table")]
pub struct TableArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    /// One `a op b = r` line per entry
    Human,
    /// JSON output
    Json,
}

pub fn execute(args: TableArgs) -> Result<()> {
    let table = ExponentTable::generate();
    match args.format {
        OutputFormat::Human => {
            for entry in table.entries() {
                println!("{}", render_entry(&entry));
            }
        }
        OutputFormat::Json => {
            let entries: Vec<TableEntry> = table.entries().collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}

fn render_entry(entry: &TableEntry) -> String {
    let result = match entry.result {
        Some(result) => result.to_string(),
        None => "error".to_string(),
    };
    format!(
        "{} {} {} = {}",
        entry.lhs,
        entry.op.symbol(),
        entry.rhs,
        result
    )
}
