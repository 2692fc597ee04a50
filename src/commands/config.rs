use clap::ArgMatches;
use colored::*;

use crate::config::{config_path, load_settings_from, save_settings_to};

pub async fn handle_config(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let path = config_path()?;
    // stored values only: env overrides must not end up in the file
    let mut settings = load_settings_from(&path)?;

    match matches.subcommand() {
        Some(("set", set_matches)) => {
            let fields: [(&str, &mut String); 6] = [
                ("username", &mut settings.username),
                ("password", &mut settings.password),
                ("description", &mut settings.description),
                ("base-url", &mut settings.base_url),
                ("api-extension", &mut settings.api_extension),
                ("jql", &mut settings.jql),
            ];

            let mut changed = 0;
            for (name, field) in fields {
                if let Some(value) = set_matches.get_one::<String>(name) {
                    *field = value.clone();
                    changed += 1;
                }
            }

            if changed == 0 {
                return Err("No settings to update. Provide at least one field.".into());
            }

            save_settings_to(&path, &settings)?;
            println!("{} Settings saved to {}", "✓".green(), path.display());
        }
        _ => {
            println!("{}: {}", "Settings file".bold(), path.display());
            println!("{}: {}", "Username".bold(), settings.username);
            println!("{}: {}", "Password".bold(), settings.masked_password());
            println!("{}: {}", "Description".bold(), settings.description);
            println!("{}: {}", "Base URL".bold(), settings.base_url);
            println!("{}: {}", "API extension".bold(), settings.api_extension);
            println!("{}: {}", "JQL".bold(), settings.jql);
        }
    }

    Ok(())
}
