use colored::*;
use serde_json::json;

use super::utils::fit;
use crate::interactive::pipeline::{IssueRow, RowRegistry};

pub fn print_rows(rows: &RowRegistry, format: &str) {
    if rows.is_empty() {
        println!("{}", "No issues found.".dimmed());
        return;
    }

    match format {
        "json" => print_json(rows),
        _ => print_table(rows),
    }
}

fn print_table(rows: &RowRegistry) {
    println!("{}", "─".repeat(110).dimmed());
    println!(
        "{} {} {} {} {}",
        fit("Key", 16).bold(),
        fit("Status", 16).bold(),
        fit("Summary", 50).bold(),
        fit("Remaining", 11).bold(),
        fit("Logged", 14).bold()
    );
    println!("{}", "─".repeat(110).dimmed());

    for row in rows.iter() {
        println!(
            "{} {} {} {} {}",
            format_key(row),
            fit(row.status.as_deref().unwrap_or(""), 16).yellow(),
            fit(&row.summary, 50),
            fit(&row.remaining, 11).magenta(),
            fit(&row.total_spent, 14).green()
        );
    }
    println!("{}", "─".repeat(110).dimmed());
}

fn format_key(row: &IssueRow) -> ColoredString {
    if row.is_sub_task() {
        fit(&format!("└ {}", row.key), 16).blue()
    } else if row.is_story() {
        fit(&row.key, 16).cyan().bold()
    } else {
        fit(&row.key, 16).cyan()
    }
}

fn print_json(rows: &RowRegistry) {
    let values: Vec<_> = rows
        .iter()
        .map(|row| {
            json!({
                "key": row.key,
                "summary": row.summary,
                "parent": row.parent_key,
                "status": row.status,
                "remaining": row.remaining,
                "logged": row.total_spent,
                "transitions": row.transitions.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
                "url": row.browse_url,
            })
        })
        .collect();

    match serde_json::to_string_pretty(&values) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("{} {}", "Failed to encode issues:".red(), e),
    }
}
