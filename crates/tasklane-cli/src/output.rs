//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use tasklane_core::Task;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print one task as a checklist line.
pub fn task(task: &Task) {
    let mark = if task.completed {
        "[x]".green()
    } else {
        "[ ]".normal()
    };
    let title = if task.completed {
        task.title.dimmed()
    } else {
        task.title.normal()
    };
    let edited = if task.is_edited() { " (edited)" } else { "" };

    println!(
        "{} {}{}  {}",
        mark,
        title,
        edited.dimmed(),
        task.id.as_str().dimmed()
    );
}
