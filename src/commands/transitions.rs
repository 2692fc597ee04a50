use clap::ArgMatches;
use colored::*;

use crate::cli_context::CliContext;
use crate::jira_error;

pub async fn handle_transitions(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let key = matches
        .get_one::<String>("key")
        .ok_or_else(|| jira_error!(InvalidInput, "Issue key is required"))?;

    let mut context = CliContext::load()?;
    let (client, _) = context.verified_client()?;

    let response = client
        .list_transitions(key)
        .await?;

    if response.transitions.is_empty() {
        println!("{}", "No transitions available.".dimmed());
    }
    for transition in &response.transitions {
        println!("{} {}", "•".dimmed(), transition.name);
    }

    Ok(())
}

pub async fn handle_transition(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let key = matches
        .get_one::<String>("key")
        .ok_or_else(|| jira_error!(InvalidInput, "Issue key is required"))?;
    let name = matches
        .get_one::<String>("name")
        .ok_or_else(|| jira_error!(InvalidInput, "Status name is required"))?;

    let mut context = CliContext::load()?;
    let (client, _) = context.verified_client()?;

    let response = client
        .list_transitions(key)
        .await?;

    let transition = response
        .transitions
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            let available: Vec<&str> = response.transitions.iter().map(|t| t.name.as_str()).collect();
            jira_error!(
                InvalidInput,
                "'{}' is not available for {}. Options: {}",
                name,
                key,
                available.join(", ")
            )
        })?;

    client
        .do_transition(key, &transition.id)
        .await?;

    println!(
        "{} {} moved to {}",
        "✓".green(),
        key.cyan().bold(),
        transition.name.yellow()
    );

    Ok(())
}
