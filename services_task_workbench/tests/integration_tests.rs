//! Integration tests for the task workbench
//!
//! These drive complete sessions with typed keys and a scripted transport.

use grading_client::{MemorySession, ScriptedTransport, SessionStore};
use grading_protocol::{HttpMethod, HttpResponse};
use result_view::{Cell, ResultSchemaPanel, ResultView, SchemaPanel};
use services_task_workbench::{
    Locale, TaskStatus, TaskWorkbench, WorkbenchAction, WorkbenchConfig, WorkbenchMode,
    WorkbenchRenderer,
};
use sql_editor_core::Key;

const TASK_JSON: &str = r#"{
    "id": 7,
    "name": "Active users",
    "difficulty": "Easy",
    "description": "Select every active user",
    "solved": false,
    "schema": [
        {"table_name": "users", "columns": [
            {"name": "id", "type": "INTEGER", "constraints": "PRIMARY KEY"},
            {"name": "name", "type": "TEXT", "constraints": null}
        ]}
    ],
    "result_schema": [{"name": "id", "type": "INTEGER", "description": "User id"}]
}"#;

fn task_bench() -> TaskWorkbench<MemorySession> {
    TaskWorkbench::new(
        WorkbenchConfig::default(),
        WorkbenchMode::Task(7),
        MemorySession::new("secret"),
    )
    .unwrap()
}

fn solved_task_json() -> String {
    TASK_JSON.replace(r#""solved": false"#, r#""solved": true"#)
}

#[test]
fn test_typing_a_query_with_indentation_and_pairs() {
    let mut bench = task_bench();
    bench.type_text("select count(*");
    bench.press_key(Key::End);
    bench.press_key(Key::Enter);
    bench.type_text("from users");

    assert_eq!(bench.editor().text(), "select count(*)\n  from users");
}

#[test]
fn test_blank_run_sends_nothing() {
    let mut bench = task_bench();
    let mut transport = ScriptedTransport::new();

    bench.type_text("   \n  ");
    let action = bench.run();
    let action = bench.drive(&mut transport, action);

    assert_eq!(action, WorkbenchAction::Continue);
    assert!(transport.sent().is_empty());
    assert_eq!(bench.error_line(), Some("Query cannot be empty"));
}

#[test]
fn test_run_renders_null_cells() {
    let mut bench = task_bench();
    let mut transport = ScriptedTransport::new().reply(
        200,
        r#"{"success": true, "results": [{"id": 1, "name": "a"}, {"id": 2, "name": null}]}"#,
    );

    bench.type_text("select id, name from users");
    let action = bench.run();
    bench.drive(&mut transport, action);

    let sent = &transport.sent()[0];
    assert_eq!(sent.method, HttpMethod::Post);
    assert_eq!(sent.path, "/api/tasks/7/run");
    assert_eq!(sent.header("Authorization"), Some("Bearer secret"));

    let results = bench.results();
    assert_eq!(results.headers(), ["id", "name"]);
    assert_eq!(results.rows().len(), 2);
    assert_eq!(results.rows()[1][1], Cell::null());
    assert_eq!(results.rows()[1][1].text, "NULL");
}

#[test]
fn test_empty_result_set() {
    let mut bench = task_bench();
    let mut transport = ScriptedTransport::new().reply(200, r#"{"success": true, "results": []}"#);

    bench.type_text("select * from users where 0");
    let action = bench.run();
    bench.drive(&mut transport, action);

    assert_eq!(
        bench.results(),
        &ResultView::NoResults {
            message: "Query returned no results".into()
        }
    );
}

#[test]
fn test_out_of_order_runs_show_latest() {
    let mut bench = task_bench();

    bench.set_query("select 1 as n");
    let WorkbenchAction::Dispatch(first) = bench.run() else {
        panic!("first run not dispatched");
    };
    bench.set_query("select 2 as n");
    let WorkbenchAction::Dispatch(second) = bench.run() else {
        panic!("second run not dispatched");
    };

    bench.handle_response(
        second.ticket,
        Ok(HttpResponse::new(200, r#"{"success": true, "results": [{"n": 2}]}"#)),
    );
    bench.handle_response(
        first.ticket,
        Ok(HttpResponse::new(200, r#"{"success": true, "results": [{"n": 1}]}"#)),
    );

    assert_eq!(bench.results().rows(), [vec![Cell::text("2")]]);
}

#[test]
fn test_superseded_failure_does_not_clobber_results() {
    let mut bench = task_bench();

    bench.set_query("select 1");
    let WorkbenchAction::Dispatch(first) = bench.run() else {
        panic!("first run not dispatched");
    };
    bench.set_query("select 2 as n");
    let WorkbenchAction::Dispatch(second) = bench.run() else {
        panic!("second run not dispatched");
    };

    bench.handle_response(
        second.ticket,
        Ok(HttpResponse::new(200, r#"{"success": true, "results": [{"n": 2}]}"#)),
    );
    bench.handle_response(first.ticket, Ok(HttpResponse::new(500, "")));

    assert!(bench.results().is_table());
    assert_eq!(bench.error_line(), None);
}

#[test]
fn test_submit_marks_solved_and_reload_keeps_it() {
    let mut bench = task_bench();
    let mut transport = ScriptedTransport::new()
        .reply(200, TASK_JSON)
        .reply(200, r#"{"success": true, "message": "Correct"}"#)
        .reply(200, r#"{"success": true}"#)
        .reply(200, solved_task_json());

    let action = bench.load_task();
    bench.drive(&mut transport, action);
    assert_eq!(bench.status(), TaskStatus::Unsolved);

    bench.type_text("select id from users where active = 1");
    let action = bench.submit();
    bench.drive(&mut transport, action);
    assert_eq!(bench.status(), TaskStatus::Solved);
    assert_eq!(bench.banner(), Some("Congratulations! Your solution is correct."));

    // repeat acceptance is a no-op for status
    let action = bench.submit();
    bench.drive(&mut transport, action);
    assert_eq!(bench.status(), TaskStatus::Solved);
    assert_eq!(bench.error_line(), None);

    let action = bench.load_task();
    bench.drive(&mut transport, action);
    assert_eq!(bench.status(), TaskStatus::Solved);
    assert_eq!(bench.view().status_label.as_deref(), Some("Solved"));
}

#[test]
fn test_fresh_view_of_solved_task() {
    let mut bench = task_bench();
    let mut transport = ScriptedTransport::new().reply(200, solved_task_json());

    let action = bench.load_task();
    bench.drive(&mut transport, action);

    let view = bench.view();
    assert_eq!(view.status, Some(TaskStatus::Solved));
    assert_eq!(view.task.unwrap().name, "Active users");
    let Some(SchemaPanel::Tables(tables)) = view.schema else {
        panic!("schema panel missing");
    };
    assert_eq!(tables[0].columns.len(), 2);
    assert!(matches!(view.result_schema, Some(ResultSchemaPanel::Columns(_))));
}

#[test]
fn test_task_without_schema_shows_placeholder() {
    let mut bench = task_bench();
    let mut transport = ScriptedTransport::new().reply(
        200,
        r#"{"id": 7, "name": "Bare", "difficulty": "Easy", "description": ""}"#,
    );

    let action = bench.load_task();
    bench.drive(&mut transport, action);

    assert_eq!(
        bench.view().schema,
        Some(SchemaPanel::Empty {
            message: "No schema information available for this task.".into()
        })
    );
}

#[test]
fn test_network_failure_clears_results() {
    let mut bench = task_bench();
    let mut transport = ScriptedTransport::new()
        .reply(200, r#"{"success": true, "results": [{"n": 1}]}"#)
        .fail("connection refused");

    bench.type_text("select 1 as n");
    let action = bench.run();
    bench.drive(&mut transport, action);
    assert!(bench.results().is_table());

    let action = bench.run();
    bench.drive(&mut transport, action);
    assert_eq!(bench.results(), &ResultView::error("Error running query"));
    assert_eq!(bench.error_line(), Some("Failed to run query"));
}

#[test]
fn test_rejected_session_redirects() {
    let mut bench = task_bench();
    let mut transport = ScriptedTransport::new().reply(401, r#"{"detail": "Not authenticated"}"#);

    let action = bench.load_task();
    let action = bench.drive(&mut transport, action);

    assert_eq!(
        action,
        WorkbenchAction::RedirectToLogin {
            location: "/".into()
        }
    );
    assert_eq!(bench.session().bearer_token(), None);
}

#[test]
fn test_missing_session_redirects_without_sending() {
    let mut bench = TaskWorkbench::new(
        WorkbenchConfig::default(),
        WorkbenchMode::Task(7),
        MemorySession::anonymous(),
    )
    .unwrap();
    let mut transport = ScriptedTransport::new();

    bench.type_text("select 1");
    let action = bench.run();
    let action = bench.drive(&mut transport, action);

    assert!(matches!(action, WorkbenchAction::RedirectToLogin { .. }));
    assert!(transport.sent().is_empty());
}

#[test]
fn test_authoring_session_in_russian() {
    let config = WorkbenchConfig::default().with_locale(Locale::russian());
    let mut bench =
        TaskWorkbench::new(config, WorkbenchMode::Authoring, MemorySession::new("admin")).unwrap();
    let mut transport = ScriptedTransport::new()
        .reply(200, r#"{"success": true, "results": []}"#)
        .reply(200, r#"{"success": false, "error": "no such table: userz"}"#);

    bench.type_text("select * from users");
    assert_eq!(bench.run(), WorkbenchAction::Continue);
    assert_eq!(bench.error_line(), Some("Хотя бы одна таблица должна быть выбрана"));

    bench.toggle_table("users");
    bench.select_table("orders");
    bench.deselect_table("orders");
    let action = bench.run();
    bench.drive(&mut transport, action);

    assert_eq!(
        transport.sent()[0].body.as_deref(),
        Some(r#"{"query":"select * from users","context":["users"]}"#)
    );
    assert_eq!(bench.results().message(), Some("Запрос ничего не вернул"));

    let action = bench.run();
    bench.drive(&mut transport, action);
    assert_eq!(bench.error_line(), Some("no such table: userz"));
    assert_eq!(bench.results().message(), Some("Ошибка при выполнении запроса"));
}

#[test]
fn test_console_rendering() {
    let mut bench = task_bench();
    let mut transport = ScriptedTransport::new()
        .reply(200, TASK_JSON)
        .reply(200, r#"{"success": true, "results": [{"id": 1}]}"#);

    let action = bench.load_task();
    bench.drive(&mut transport, action);
    bench.type_text("select id from users");
    let action = bench.run();
    bench.drive(&mut transport, action);

    let output = WorkbenchRenderer::new(2).render(&bench.view());
    assert_eq!(
        output,
        "select id from users[ ]\n~\nTASK Active users* | Unsolved\nid\n--\n1"
    );
}
