use chrono::Local;
use clap::ArgMatches;
use colored::*;

use crate::cli_context::CliContext;
use crate::jira_error;
use crate::formatting::{format_duration, sum_worklogs};
use crate::timelog::{parse_date_input, started_now, validate_time_input};

pub async fn handle_log(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let key = matches
        .get_one::<String>("key")
        .ok_or_else(|| jira_error!(InvalidInput, "Issue key is required"))?;
    let time = matches
        .get_one::<String>("time")
        .ok_or_else(|| jira_error!(InvalidInput, "Time spent is required"))?;

    // checked before settings so bad input never costs a request
    let time_spent = validate_time_input(time)?;
    let date = match matches.get_one::<String>("date") {
        Some(raw) => parse_date_input(raw)?,
        None => Local::now().date_naive(),
    };

    let mut context = CliContext::load()?;
    let (client, _) = context.verified_client()?;

    let started = started_now(date);
    client
        .create_worklog(key, time_spent, &started)
        .await?;

    let issue = client.get_issue(key).await?;

    println!(
        "{} Logged {} on {}",
        "✓".green(),
        time_spent.bold(),
        key.cyan().bold()
    );
    println!(
        "{}: {}",
        "Logged".bold(),
        format_duration(sum_worklogs(issue.worklogs())).green()
    );
    println!(
        "{}: {}",
        "Remaining".bold(),
        issue.remaining_estimate().unwrap_or("-").magenta()
    );

    Ok(())
}
