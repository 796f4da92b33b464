pub mod config;
pub mod order;
pub mod select;

use std::io::Read;
use std::path::Path;

use taskpick_core::Task;

/// Read a JSON array of tasks from `path`, or from stdin when `path` is `-`.
pub fn read_tasks(path: &Path) -> Result<Vec<Task>, Box<dyn std::error::Error>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read task file {}: {e}", path.display()))?
    };

    let tasks: Vec<Task> = serde_json::from_str(&content)?;
    tracing::debug!(count = tasks.len(), source = %path.display(), "loaded tasks");
    Ok(tasks)
}

/// One line per task for human-readable output.
pub fn format_task(task: &Task) -> String {
    let status = if task.completed { " (done)" } else { "" };
    format!(
        "#{:<6} {:<32} importance {:<6} time {}{}",
        task.id, task.name, task.importance, task.time, status
    )
}
