use serde_json::json;

use crate::cli_context::CliContextBuilder;
use crate::interactive::app::{InteractiveApp, LogField, Popup};
use crate::interactive::keys::Action;
use crate::interactive::pipeline::{DetailState, RenderPipeline, RowUpdate, StatusState};
use crate::models::{Issue, Transition};
use crate::organize::OrphanPolicy;

fn pipeline() -> RenderPipeline {
    let mut context = CliContextBuilder::new()
        .with_credentials("jdoe", "secret")
        .with_base_url("http://127.0.0.1:9")
        .build();
    let (client, connection) = context.verified_client().unwrap();
    RenderPipeline::new(client, connection)
}

fn issue(key: &str, type_name: &str, parent: Option<&str>) -> Issue {
    let mut fields = json!({
        "summary": format!("Summary of {}", key),
        "issuetype": {"name": type_name},
        "status": {"name": "Open"}
    });
    if let Some(parent) = parent {
        fields["parent"] = json!({"key": parent});
    }
    serde_json::from_value(json!({"key": key, "fields": fields})).unwrap()
}

fn detailed(key: &str, seconds: &[u64], remaining: &str) -> Issue {
    let worklogs: Vec<_> = seconds
        .iter()
        .map(|s| json!({"timeSpentSeconds": s}))
        .collect();
    serde_json::from_value(json!({
        "key": key,
        "fields": {
            "summary": "detail",
            "issuetype": {"name": "Story"},
            "status": {"name": "In Progress"},
            "worklog": {"worklogs": worklogs, "total": seconds.len()},
            "timetracking": {"remainingEstimate": remaining}
        }
    }))
    .unwrap()
}

fn rendered() -> RenderPipeline {
    let mut pipeline = pipeline();
    pipeline.render(&[
        issue("P-2", "Sub-Task", Some("P-1")),
        issue("P-1", "Story", None),
        issue("P-3", "Story", None),
    ]);
    pipeline
}

#[test]
fn test_render_creates_placeholder_rows_in_order() {
    let pipeline = rendered();
    let rows = pipeline.rows();

    assert_eq!(rows.keys(), ["P-1", "P-2", "P-3"]);
    let child = rows.get("P-2").unwrap();
    assert!(child.is_sub_task());
    assert_eq!(child.parent_key.as_deref(), Some("P-1"));
    assert_eq!(child.detail, DetailState::Loading);
    assert_eq!(child.statuses, StatusState::Loading);
    assert_eq!(child.browse_url, "http://127.0.0.1:9/browse/P-2");
    assert_eq!(child.date_input.len(), "YYYY-MM-DD".len());
}

#[test]
fn test_detail_loaded_fills_only_its_row() {
    let mut pipeline = rendered();
    pipeline.apply(RowUpdate::DetailLoaded {
        key: "P-1".to_string(),
        issue: detailed("P-1", &[3600, 1800], "2h"),
    });

    let row = pipeline.rows().get("P-1").unwrap();
    assert_eq!(row.detail, DetailState::Loaded);
    assert_eq!(row.total_spent, "1h 30m");
    assert_eq!(row.remaining, "2h");
    assert_eq!(row.status.as_deref(), Some("In Progress"));

    let other = pipeline.rows().get("P-3").unwrap();
    assert_eq!(other.detail, DetailState::Loading);
    assert!(pipeline.error().is_none());
}

#[test]
fn test_failures_set_error_last_write_wins() {
    let mut pipeline = rendered();
    pipeline.apply(RowUpdate::DetailFailed {
        key: "P-1".to_string(),
        message: "first".to_string(),
    });
    pipeline.apply(RowUpdate::TransitionsFailed {
        key: "P-3".to_string(),
        message: "second".to_string(),
    });

    assert_eq!(pipeline.error(), Some("second"));
    assert_eq!(pipeline.rows().get("P-1").unwrap().detail, DetailState::Loaded);
    assert_eq!(
        pipeline.rows().get("P-3").unwrap().statuses,
        StatusState::Loaded
    );
}

#[test]
fn test_updates_for_unknown_rows_are_ignored() {
    let mut pipeline = rendered();
    pipeline.apply(RowUpdate::TransitionsLoaded {
        key: "X-1".to_string(),
        transitions: vec![],
    });
    assert_eq!(pipeline.rows().len(), 3);
}

#[test]
fn test_listing_failure_keeps_rows_and_reports() {
    let mut pipeline = rendered();
    pipeline.apply(RowUpdate::Listed(Err("Error: 401 - Unauthorized".to_string())));

    assert!(!pipeline.is_listing());
    assert_eq!(pipeline.error(), Some("Error: 401 - Unauthorized"));
}

#[test]
fn test_log_time_rejects_invalid_input_without_state_change() {
    let mut pipeline = rendered();
    pipeline.rows_mut().get_mut("P-1").unwrap().time_input = "two hours".to_string();

    assert!(pipeline.log_time("P-1").is_err());
    assert_eq!(pipeline.rows().get("P-1").unwrap().detail, DetailState::Loading);
    assert!(pipeline
        .error()
        .unwrap()
        .starts_with("Time input in wrong format"));
}

#[test]
fn test_log_time_rejects_bad_date() {
    let mut pipeline = rendered();
    let row = pipeline.rows_mut().get_mut("P-1").unwrap();
    row.time_input = "1h".to_string();
    row.date_input = "yesterday".to_string();

    assert!(pipeline.log_time("P-1").is_err());
    assert!(pipeline.error().unwrap().contains("YYYY-MM-DD"));
}

#[test]
fn test_worklog_failure_keeps_previous_totals() {
    let mut pipeline = rendered();
    pipeline.apply(RowUpdate::DetailLoaded {
        key: "P-1".to_string(),
        issue: detailed("P-1", &[3600], "1h"),
    });
    pipeline.rows_mut().get_mut("P-1").unwrap().detail = DetailState::LoggingTime;
    pipeline.apply(RowUpdate::WorklogFailed {
        key: "P-1".to_string(),
        message: "Worklog must not be null.".to_string(),
    });

    let row = pipeline.rows().get("P-1").unwrap();
    assert_eq!(row.detail, DetailState::Loaded);
    assert_eq!(row.total_spent, "1h");
    assert_eq!(pipeline.error(), Some("Worklog must not be null."));
}

#[test]
fn test_change_status_with_bad_index_is_an_error() {
    let mut pipeline = rendered();
    assert!(pipeline.change_status("P-1", 0).is_err());
    assert!(pipeline.error().is_some());
}

fn loaded_app() -> InteractiveApp {
    let mut pipeline = rendered();
    for key in ["P-1", "P-2", "P-3"] {
        pipeline.apply(RowUpdate::DetailLoaded {
            key: key.to_string(),
            issue: detailed(key, &[], "1d"),
        });
    }
    pipeline.apply(RowUpdate::TransitionsLoaded {
        key: "P-1".to_string(),
        transitions: vec![
            Transition { id: "11".to_string(), name: "Start".to_string() },
            Transition { id: "21".to_string(), name: "Done".to_string() },
        ],
    });
    InteractiveApp::new(pipeline, "Sprint".to_string(), OrphanPolicy::Drop)
}

#[test]
fn test_selection_wraps_around() {
    let mut app = loaded_app();
    app.handle_action(Action::MoveUp);
    assert_eq!(app.selected_index, 2);
    app.handle_action(Action::MoveDown);
    assert_eq!(app.selected_index, 0);
}

#[test]
fn test_log_popup_edits_row_inputs() {
    let mut app = loaded_app();
    app.handle_action(Action::LogTime);
    assert_eq!(
        app.popup,
        Some(Popup::LogTime { key: "P-1".to_string(), field: LogField::Time })
    );

    app.handle_action(Action::TypeChar('2'));
    app.handle_action(Action::TypeChar('x'));
    app.handle_action(Action::Backspace);
    app.handle_action(Action::TypeChar('h'));
    assert_eq!(app.pipeline.rows().get("P-1").unwrap().time_input, "2h");

    app.handle_action(Action::NextField);
    app.handle_action(Action::Backspace);
    assert_eq!(app.pipeline.rows().get("P-1").unwrap().date_input.len(), 9);

    app.handle_action(Action::Cancel);
    assert!(app.popup.is_none());
}

#[test]
fn test_invalid_log_keeps_popup_open() {
    let mut app = loaded_app();
    app.handle_action(Action::LogTime);
    app.handle_action(Action::TypeChar('x'));
    app.handle_action(Action::Confirm);

    assert!(matches!(app.popup, Some(Popup::LogTime { .. })));
    assert!(app.pipeline.error().is_some());
}

#[test]
fn test_status_picker_needs_transitions() {
    let mut app = loaded_app();
    app.handle_action(Action::MoveDown);
    app.handle_action(Action::ChangeStatus);
    assert!(app.popup.is_none());

    app.handle_action(Action::MoveUp);
    app.handle_action(Action::ChangeStatus);
    app.handle_action(Action::PickerUp);
    assert_eq!(
        app.popup,
        Some(Popup::StatusPicker { key: "P-1".to_string(), index: 1 })
    );
}

#[test]
fn test_quit() {
    let mut app = loaded_app();
    app.handle_action(Action::Quit);
    assert!(app.should_quit);
}

#[tokio::test]
async fn test_stale_detail_does_not_end_a_pending_worklog() {
    let mut app = InteractiveApp::new(rendered(), "Sprint".to_string(), OrphanPolicy::Drop);
    app.handle_action(Action::LogTime);
    app.handle_action(Action::TypeChar('2'));
    app.handle_action(Action::TypeChar('h'));
    app.handle_action(Action::Confirm);
    assert!(app.popup.is_none());
    assert_eq!(
        app.pipeline.rows().get("P-1").unwrap().detail,
        DetailState::LoggingTime
    );

    // the initial detail fetch lands while the worklog is still in flight
    app.pipeline.apply(RowUpdate::DetailLoaded {
        key: "P-1".to_string(),
        issue: detailed("P-1", &[], "1d"),
    });
    app.pipeline.apply(RowUpdate::DetailFailed {
        key: "P-1".to_string(),
        message: "Error: 502 - Bad Gateway".to_string(),
    });

    let row = app.pipeline.rows().get("P-1").unwrap();
    assert_eq!(row.detail, DetailState::LoggingTime);
    assert_eq!(row.time_input, "2h");

    app.handle_action(Action::LogTime);
    assert!(app.popup.is_none());
}

#[test]
fn test_worklog_logged_refreshes_row() {
    let mut pipeline = rendered();
    let row = pipeline.rows_mut().get_mut("P-1").unwrap();
    row.detail = DetailState::LoggingTime;
    row.time_input = "2h".to_string();

    pipeline.apply(RowUpdate::WorklogLogged {
        key: "P-1".to_string(),
        detail: Ok(detailed("P-1", &[7200], "6h")),
    });

    let row = pipeline.rows().get("P-1").unwrap();
    assert_eq!(row.detail, DetailState::Loaded);
    assert_eq!(row.total_spent, "2h");
    assert_eq!(row.remaining, "6h");
    assert_eq!(row.time_input, "");
}

#[test]
fn test_worklog_logged_without_refetch_still_ends_submission() {
    let mut pipeline = rendered();
    pipeline.rows_mut().get_mut("P-3").unwrap().detail = DetailState::LoggingTime;

    pipeline.apply(RowUpdate::WorklogLogged {
        key: "P-3".to_string(),
        detail: Err("Error: 500 - Internal Server Error".to_string()),
    });

    assert_eq!(pipeline.rows().get("P-3").unwrap().detail, DetailState::Loaded);
    assert_eq!(pipeline.error(), Some("Error: 500 - Internal Server Error"));
}

#[tokio::test]
async fn test_panicked_request_task_releases_its_row() {
    let mut pipeline = pipeline();
    pipeline.render(&[issue("P-1", "Story", None)]);
    pipeline.rows_mut().get_mut("P-1").unwrap().statuses = StatusState::Loaded;

    pipeline.spawn_guarded(
        async { panic!("request task failed") },
        RowUpdate::DetailFailed {
            key: "P-1".to_string(),
            message: "Error: request task aborted".to_string(),
        },
    );

    tokio::time::timeout(std::time::Duration::from_secs(5), pipeline.settle())
        .await
        .unwrap();
    assert_eq!(pipeline.rows().get("P-1").unwrap().detail, DetailState::Loaded);
    assert_eq!(pipeline.error(), Some("Error: request task aborted"));
}
