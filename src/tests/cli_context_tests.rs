use crate::cli_context::{CliContext, CliContextBuilder};
use crate::error::{report, JiraError};

#[test]
fn test_builder_defaults_fail_validation() {
    let mut context = CliContextBuilder::new().build();
    assert!(matches!(
        context.verified_client(),
        Err(JiraError::MissingUsername)
    ));
}

#[test]
fn test_builder_with_credentials() {
    let mut context = CliContextBuilder::new()
        .with_credentials("jdoe", "secret")
        .with_base_url("https://jira.example.com")
        .with_jql("project = P")
        .build();

    let (client, connection) = context.verified_client().unwrap();
    assert_eq!(client.api_root(), "https://jira.example.com/rest/api/2");
    assert_eq!(connection.jql, "project = P");

    // second call reuses the same session
    let (again, _) = context.verified_client().unwrap();
    assert_eq!(again.api_root(), client.api_root());
}

#[test]
fn test_builder_missing_extension() {
    let mut context = CliContextBuilder::new()
        .with_credentials("jdoe", "secret")
        .with_api_extension("")
        .build();

    assert!(matches!(
        context.verified_client(),
        Err(JiraError::MissingApiExtension)
    ));
}

#[test]
fn test_malformed_settings_file_stays_a_config_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{\"username\": ").unwrap();

    let error: Box<dyn std::error::Error> = match CliContext::load_from(&path) {
        Err(e) => e.into(),
        Ok(_) => panic!("Expected a config error"),
    };
    let jira = error.downcast_ref::<JiraError>().unwrap();
    assert!(jira.is_config_error());
    assert!(report(error.as_ref()).starts_with("Error: Configuration error: Invalid settings file"));
}

#[test]
fn test_load_from_missing_file_uses_defaults() {
    let dir = tempfile::TempDir::new().unwrap();
    let context = CliContext::load_from(&dir.path().join("absent.json")).unwrap();
    assert_eq!(context.settings().base_url, "https://jira.wrs.com");
}
