//! Task ordering command for CLI.

use clap::Args;
use std::path::PathBuf;
use taskpick_core::{order_by, Config, SortDirection, SortKey};

use super::{format_task, read_tasks};

#[derive(Args)]
pub struct OrderArgs {
    /// JSON file with an array of tasks ("-" reads stdin)
    #[arg(long, short)]
    file: PathBuf,
    /// Sort key: importance, time, name, createdAt, recency (default: order.key)
    #[arg(long, short)]
    key: Option<String>,
    /// Sort ascending
    #[arg(long, conflicts_with = "desc")]
    asc: bool,
    /// Sort descending
    #[arg(long)]
    desc: bool,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: OrderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let key = match args.key {
        Some(k) => k.parse::<SortKey>()?,
        None => config.order.key,
    };
    let direction = if args.asc {
        SortDirection::Ascending
    } else if args.desc {
        SortDirection::Descending
    } else {
        config.order.direction
    };

    let tasks = read_tasks(&args.file)?;
    let sorted = order_by(&tasks, key, direction);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sorted)?);
    } else {
        for task in &sorted {
            println!("{}", format_task(task));
        }
    }
    Ok(())
}
