use clap::ArgMatches;
use colored::*;

use crate::cli_context::CliContext;
use crate::error::JiraError;
use crate::formatting::print_rows;
use crate::interactive::RenderPipeline;
use crate::organize::OrphanPolicy;

pub async fn handle_issues(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let mut context = CliContext::load()?;
    let (client, connection) = context.verified_client()?;

    let format = matches
        .get_one::<String>("format")
        .map(|s| s.as_str())
        .unwrap_or("table");
    let orphans = if matches.get_flag("keep-orphans") {
        OrphanPolicy::Keep
    } else {
        OrphanPolicy::Drop
    };

    let mut pipeline = RenderPipeline::new(client, connection);
    pipeline.load_issues(orphans);
    pipeline.settle().await;

    if pipeline.rows().is_empty() {
        if let Some(message) = pipeline.error() {
            return Err(JiraError::Tracker(message.to_string()).into());
        }
    }

    print_rows(pipeline.rows(), format);

    // rows that failed to load still print; the last failure is reported
    if let Some(message) = pipeline.error() {
        eprintln!("{} {}", "Error:".red().bold(), message);
    }

    Ok(())
}
