//! Budgeted selection command for CLI.

use clap::Args;
use std::path::PathBuf;
use taskpick_core::{board, Config, SelectionStrategy, TaskSelector};

use super::{format_task, read_tasks};

#[derive(Args)]
pub struct SelectArgs {
    /// JSON file with an array of tasks ("-" reads stdin)
    #[arg(long, short)]
    file: PathBuf,
    /// Time budget (default: selector.default_budget)
    #[arg(long, short, allow_negative_numbers = true)]
    budget: Option<f64>,
    /// Consider completed tasks too
    #[arg(long)]
    include_completed: bool,
    /// Print only the best achievable total importance
    #[arg(long)]
    value_only: bool,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: SelectArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let tasks = read_tasks(&args.file)?;
    let selector = TaskSelector::with_config(config.selector());
    let budget = args.budget.unwrap_or(config.selector.default_budget);

    let candidates = if config.board.exclude_completed && !args.include_completed {
        board::pending(&tasks)
    } else {
        tasks
    };

    if args.value_only {
        let value = selector.max_value(&candidates, budget)?;
        if args.json {
            println!("{}", serde_json::json!({ "totalValue": value }));
        } else {
            println!("{value}");
        }
        return Ok(());
    }

    let result = selector.select(&candidates, budget)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match result.strategy {
        SelectionStrategy::Empty => println!("No tasks to choose from."),
        SelectionStrategy::Fallback => {
            println!("Nothing fits a budget of {budget}; suggested task:");
        }
        SelectionStrategy::Optimal => {
            println!("Selected {} task(s) for a budget of {budget}:", result.selected_tasks.len());
        }
    }
    for task in &result.selected_tasks {
        println!("  {}", format_task(task));
    }
    println!("Total value: {}", result.total_value);
    println!("Remaining time: {}", result.remaining_time);
    Ok(())
}
