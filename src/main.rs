use std::process;

use clap::{Arg, ArgAction, Command};

use jira_log_time::commands::{
    handle_config, handle_issues, handle_log, handle_transition, handle_transitions, handle_tui,
};
use jira_log_time::logging::{get_log_file_path, init_logging, install_panic_hook, log_error};
use jira_log_time::error::report;
use jira_log_time::JiraError;

fn keep_orphans_arg() -> Arg {
    Arg::new("keep-orphans")
        .long("keep-orphans")
        .help("Show sub-tasks whose parent story is not in the result")
        .action(ArgAction::SetTrue)
}

fn key_arg() -> Arg {
    Arg::new("key")
        .help("Issue key (e.g. PROJ-123)")
        .required(true)
        .index(1)
}

fn build_cli() -> Command {
    Command::new("jlt")
        .about("Log work time against Jira issues from the terminal")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(
            Command::new("tui")
                .about("Open the interactive issue table (default)")
                .arg(keep_orphans_arg()),
        )
        .subcommand(
            Command::new("issues")
                .about("List issues from the configured query with logged time")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_name("FORMAT")
                        .help("Output format")
                        .value_parser(["table", "json"])
                        .default_value("table"),
                )
                .arg(keep_orphans_arg()),
        )
        .subcommand(
            Command::new("log")
                .about("Log time spent on an issue")
                .arg(key_arg())
                .arg(
                    Arg::new("time")
                        .help("Time spent, e.g. \"1h 30m\"")
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .short('d')
                        .value_name("YYYY-MM-DD")
                        .help("Day the work was done (defaults to today)"),
                ),
        )
        .subcommand(
            Command::new("transitions")
                .about("List the status transitions available for an issue")
                .arg(key_arg()),
        )
        .subcommand(
            Command::new("transition")
                .about("Move an issue to another status")
                .arg(key_arg())
                .arg(
                    Arg::new("name")
                        .help("Transition name, as listed by `jlt transitions`")
                        .required(true)
                        .index(2),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change the stored settings")
                .subcommand(Command::new("show").about("Print the stored settings"))
                .subcommand(
                    Command::new("set")
                        .about("Update one or more stored settings")
                        .arg(Arg::new("username").long("username").value_name("USERNAME"))
                        .arg(Arg::new("password").long("password").value_name("PASSWORD"))
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .value_name("TEXT")
                                .help("Title shown above the issue table"),
                        )
                        .arg(Arg::new("base-url").long("base-url").value_name("URL"))
                        .arg(
                            Arg::new("api-extension")
                                .long("api-extension")
                                .value_name("PATH")
                                .help("REST path appended to the base URL"),
                        )
                        .arg(Arg::new("jql").long("jql").value_name("JQL")),
                ),
        )
}

#[tokio::main]
async fn main() {
    // a run without a writable cache dir still works, just unlogged
    let _ = init_logging();
    install_panic_hook();

    let matches = build_cli().get_matches();

    let result = match matches.subcommand() {
        Some(("tui", sub_matches)) => handle_tui(Some(sub_matches)).await,
        Some(("issues", sub_matches)) => handle_issues(sub_matches).await,
        Some(("log", sub_matches)) => handle_log(sub_matches).await,
        Some(("transitions", sub_matches)) => handle_transitions(sub_matches).await,
        Some(("transition", sub_matches)) => handle_transition(sub_matches).await,
        Some(("config", sub_matches)) => handle_config(sub_matches).await,
        None => handle_tui(None).await,
        _ => {
            eprintln!("Unknown command. Use 'jlt --help' for available commands.");
            process::exit(1);
        }
    };

    if let Err(e) = result {
        let message = report(e.as_ref());
        log_error(&format!("Command failed: {}", message));
        eprintln!("{}", message);
        if e.downcast_ref::<JiraError>().is_some_and(JiraError::is_config_error) {
            eprintln!("Run 'jlt config set --help' to see the available settings.");
        }
        if let Some(path) = get_log_file_path() {
            eprintln!("Details logged to {}", path.display());
        }
        process::exit(1);
    }
}
