use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use jira_log_time::config::Settings;
use jira_log_time::interactive::{DetailState, RenderPipeline, StatusState};
use jira_log_time::{JiraClient, OrphanPolicy};

fn pipeline_for(server: &ServerGuard, jql: &str) -> RenderPipeline {
    let settings = Settings {
        username: "jdoe".to_string(),
        password: "secret".to_string(),
        base_url: server.url(),
        jql: jql.to_string(),
        ..Settings::default()
    };
    let (credentials, connection) = settings.validate().unwrap();
    let client = JiraClient::new(&connection, credentials).unwrap();
    RenderPipeline::new(client, connection)
}

fn summary(key: &str, type_name: &str, parent: Option<&str>) -> serde_json::Value {
    let mut fields = json!({"summary": key, "issuetype": {"name": type_name}, "status": {"name": "Open"}});
    if let Some(parent) = parent {
        fields["parent"] = json!({"key": parent});
    }
    json!({"key": key, "fields": fields})
}

fn detail(key: &str, seconds: u64) -> String {
    json!({
        "key": key,
        "fields": {
            "summary": key,
            "issuetype": {"name": "Story"},
            "status": {"name": "In Progress"},
            "worklog": {"worklogs": [{"timeSpentSeconds": seconds}]},
            "timetracking": {"remainingEstimate": "1d"}
        }
    })
    .to_string()
}

async fn mock_transitions(server: &mut ServerGuard, key: &str) {
    server
        .mock("GET", format!("/rest/api/2/issue/{}/transitions", key).as_str())
        .with_status(200)
        .with_body(json!({"transitions": [{"id": "21", "name": "Done"}]}).to_string())
        .create_async()
        .await;
}

#[tokio::test]
async fn test_one_failed_row_does_not_block_others() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/rest/api/2/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({"issues": [
                summary("P-2", "Sub-Task", Some("P-1")),
                summary("P-1", "Story", None),
                summary("P-3", "Story", None),
                summary("P-9", "Sub-Task", Some("X-1"))
            ]})
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/rest/api/2/issue/P-1")
        .with_status(200)
        .with_body(detail("P-1", 5400))
        .create_async()
        .await;
    server
        .mock("GET", "/rest/api/2/issue/P-2")
        .with_status(200)
        .with_body(detail("P-2", 60))
        .create_async()
        .await;
    server
        .mock("GET", "/rest/api/2/issue/P-3")
        .with_status(403)
        .with_body(json!({"errorMessages": ["No permission for P-3"]}).to_string())
        .create_async()
        .await;
    for key in ["P-1", "P-2", "P-3"] {
        mock_transitions(&mut server, key).await;
    }

    let mut pipeline = pipeline_for(&server, "sprint in openSprints()");
    pipeline.load_issues(OrphanPolicy::Drop);
    pipeline.settle().await;

    let rows = pipeline.rows();
    assert_eq!(rows.keys(), ["P-1", "P-2", "P-3"]);

    let story = rows.get("P-1").unwrap();
    assert_eq!(story.total_spent, "1h 30m");
    assert_eq!(story.remaining, "1d");
    assert_eq!(story.transitions.len(), 1);
    assert_eq!(rows.get("P-2").unwrap().total_spent, "1m");

    let failed = rows.get("P-3").unwrap();
    assert_eq!(failed.detail, DetailState::Loaded);
    assert_eq!(failed.statuses, StatusState::Loaded);
    assert_eq!(failed.total_spent, "");
    assert_eq!(pipeline.error(), Some("No permission for P-3"));
}

#[tokio::test]
async fn test_keep_orphans_renders_unparented_sub_task() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/rest/api/2/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"issues": [summary("P-9", "Sub-Task", Some("X-1"))]}).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/rest/api/2/issue/P-9")
        .with_status(200)
        .with_body(detail("P-9", 0))
        .create_async()
        .await;
    mock_transitions(&mut server, "P-9").await;

    let mut pipeline = pipeline_for(&server, "project = P");
    pipeline.load_issues(OrphanPolicy::Keep);
    pipeline.settle().await;

    assert_eq!(pipeline.rows().keys(), ["P-9"]);
    assert_eq!(pipeline.rows().get("P-9").unwrap().total_spent, "0h");
    assert!(pipeline.error().is_none());
}

#[tokio::test]
async fn test_listing_failure_surfaces_tracker_message() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/rest/api/2/search")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(
            json!({"errorMessages": ["Error in the JQL Query"], "errors": {}}).to_string(),
        )
        .create_async()
        .await;

    let mut pipeline = pipeline_for(&server, "bad jql (");
    pipeline.load_issues(OrphanPolicy::Drop);
    pipeline.settle().await;

    assert!(pipeline.rows().is_empty());
    assert_eq!(pipeline.error(), Some("Error in the JQL Query"));
}

#[tokio::test]
async fn test_log_time_posts_worklog_then_refreshes_row() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/rest/api/2/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"issues": [summary("P-1", "Story", None)]}).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/rest/api/2/issue/P-1")
        .with_status(200)
        .with_body(detail("P-1", 3600))
        .create_async()
        .await;
    mock_transitions(&mut server, "P-1").await;
    let worklog = server
        .mock("POST", "/rest/api/2/issue/P-1/worklog")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({"timeSpent": "2h"})),
            Matcher::Regex(
                r#""started":"2024-03-05T\d{2}:\d{2}:\d{2}\.\d{3}[+-]\d{4}""#.to_string(),
            ),
        ]))
        .with_status(201)
        .with_body("{}")
        .create_async()
        .await;

    let mut pipeline = pipeline_for(&server, "project = P");
    pipeline.load_issues(OrphanPolicy::Drop);
    pipeline.settle().await;

    let row = pipeline.rows_mut().get_mut("P-1").unwrap();
    row.time_input = " 2h ".to_string();
    row.date_input = "2024-03-05".to_string();

    pipeline.log_time("P-1").unwrap();
    assert_eq!(
        pipeline.rows().get("P-1").unwrap().detail,
        DetailState::LoggingTime
    );
    pipeline.settle().await;

    worklog.assert_async().await;
    let row = pipeline.rows().get("P-1").unwrap();
    assert_eq!(row.detail, DetailState::Loaded);
    assert_eq!(row.time_input, "");
}

#[tokio::test]
async fn test_invalid_time_input_sends_no_request() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/rest/api/2/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"issues": [summary("P-1", "Story", None)]}).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/rest/api/2/issue/P-1")
        .with_status(200)
        .with_body(detail("P-1", 0))
        .create_async()
        .await;
    mock_transitions(&mut server, "P-1").await;
    let worklog = server
        .mock("POST", "/rest/api/2/issue/P-1/worklog")
        .expect(0)
        .create_async()
        .await;

    let mut pipeline = pipeline_for(&server, "project = P");
    pipeline.load_issues(OrphanPolicy::Drop);
    pipeline.settle().await;

    pipeline.rows_mut().get_mut("P-1").unwrap().time_input = "2 hours".to_string();
    assert!(pipeline.log_time("P-1").is_err());
    pipeline.settle().await;

    worklog.assert_async().await;
    assert!(pipeline
        .error()
        .unwrap()
        .starts_with("Time input in wrong format"));
}

#[tokio::test]
async fn test_change_status_commits_and_reloads_transitions() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/rest/api/2/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"issues": [summary("P-1", "Story", None)]}).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/rest/api/2/issue/P-1")
        .with_status(200)
        .with_body(detail("P-1", 0))
        .create_async()
        .await;
    mock_transitions(&mut server, "P-1").await;
    let commit = server
        .mock("POST", "/rest/api/2/issue/P-1/transitions")
        .match_body(Matcher::Json(json!({"transition": {"id": "21"}})))
        .with_status(204)
        .create_async()
        .await;

    let mut pipeline = pipeline_for(&server, "project = P");
    pipeline.load_issues(OrphanPolicy::Drop);
    pipeline.settle().await;

    pipeline.change_status("P-1", 0).unwrap();
    pipeline.settle().await;

    commit.assert_async().await;
    let row = pipeline.rows().get("P-1").unwrap();
    assert_eq!(row.status.as_deref(), Some("In Progress"));
    assert_eq!(row.statuses, StatusState::Loaded);
    assert!(pipeline.error().is_none());
}
