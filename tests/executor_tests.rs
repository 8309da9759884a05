mod common;
use common::Sandbox;

use surveydb::db::executor::{create_statement, run_query, run_statement, run_update};
use surveydb::db::gateway::{connect, live_sessions};
use surveydb::db::result_set::SqlValue;
use surveydb::errors::AppError;

#[test]
fn create_insert_select_round_trip() {
    let sb = Sandbox::new();
    let cfg = sb.config();

    assert!(!run_statement(&cfg, "CREATE TABLE t(id INT)").unwrap());
    assert_eq!(run_update(&cfg, "INSERT INTO t VALUES (1)").unwrap(), 1);

    let mut rows = run_query(&cfg, "SELECT * FROM t").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows.columns(), ["id"]);

    assert!(rows.advance());
    assert_eq!(rows.current().unwrap().get_i64("id"), Some(1));
    assert!(!rows.advance());
}

#[test]
fn failed_update_rolls_back_exactly_once() {
    let sb = Sandbox::new();
    let session = connect(&sb.config()).unwrap();
    let stmt = create_statement(&session).unwrap();

    stmt.execute("CREATE TABLE t(id INT PRIMARY KEY)").unwrap();
    session.commit().unwrap();

    stmt.execute_update("INSERT INTO t VALUES (1)").unwrap();
    let err = stmt
        .execute_update("INSERT INTO t VALUES (1)")
        .expect_err("duplicate key must fail");

    assert!(matches!(err, AppError::Execution { kind: "update", .. }));
    assert!(err.rollback_error().is_none());
    assert_eq!(session.rollback_attempts(), 1);
    assert!(!session.is_autocommit());

    // The first, uncommitted insert went away with the rollback.
    let rows = stmt.execute_query("SELECT COUNT(*) AS n FROM t").unwrap();
    assert_eq!(rows.row(0).unwrap().get_i64("n"), Some(0));

    session.close().unwrap();
}

#[test]
fn failed_statement_rolls_back_too() {
    let sb = Sandbox::new();
    let session = connect(&sb.config()).unwrap();
    let stmt = create_statement(&session).unwrap();

    let err = stmt.execute("DROP TABLE missing").unwrap_err();
    assert!(matches!(err, AppError::Execution { kind: "statement", .. }));
    assert!(err.to_string().starts_with("Error executing statement"));
    assert_eq!(session.rollback_attempts(), 1);

    session.close().unwrap();
}

#[test]
fn failed_query_does_not_roll_back() {
    let sb = Sandbox::new();
    let session = connect(&sb.config()).unwrap();
    let stmt = create_statement(&session).unwrap();

    stmt.execute("CREATE TABLE t(id INT)").unwrap();
    stmt.execute_update("INSERT INTO t VALUES (7)").unwrap();

    let err = stmt.execute_query("SELECT * FROM missing").unwrap_err();
    assert!(matches!(err, AppError::Execution { kind: "query", .. }));
    assert_eq!(session.rollback_attempts(), 0);

    // Pending work is still there.
    let rows = stmt.execute_query("SELECT id FROM t").unwrap();
    assert_eq!(rows.len(), 1);

    session.close().unwrap();
}

#[test]
fn query_requires_a_row_returning_statement() {
    let sb = Sandbox::new();
    let session = connect(&sb.config()).unwrap();
    let stmt = create_statement(&session).unwrap();

    let err = stmt.execute_query("CREATE TABLE t(id INT)").unwrap_err();
    assert!(matches!(err, AppError::Execution { kind: "query", .. }));

    session.close().unwrap();
}

#[test]
fn update_rejects_row_returning_statement() {
    let sb = Sandbox::new();
    let session = connect(&sb.config()).unwrap();

    let err = create_statement(&session)
        .unwrap()
        .execute_update("SELECT 1")
        .unwrap_err();
    assert!(matches!(err, AppError::Execution { kind: "update", .. }));
    assert_eq!(session.rollback_attempts(), 1);

    session.close().unwrap();
}

#[test]
fn execute_reports_whether_rows_were_produced() {
    let sb = Sandbox::new();
    let session = connect(&sb.config()).unwrap();
    let stmt = create_statement(&session).unwrap();

    assert!(!stmt.execute("CREATE TABLE t(id INT)").unwrap());
    assert!(stmt.execute("SELECT * FROM t").unwrap());

    session.close().unwrap();
}

#[test]
fn commit_failure_rolls_back_then_reports_commit_error() {
    let sb = Sandbox::new();
    let session = connect(&sb.config()).unwrap();
    let stmt = create_statement(&session).unwrap();

    stmt.execute("CREATE TABLE parent(id INTEGER PRIMARY KEY)").unwrap();
    stmt.execute(
        "CREATE TABLE child(
            id INTEGER PRIMARY KEY,
            parent_id INTEGER REFERENCES parent(id) DEFERRABLE INITIALLY DEFERRED
        )",
    )
    .unwrap();
    session.commit().unwrap();

    // Accepted now, checked at commit time.
    stmt.execute_update("INSERT INTO child VALUES (1, 42)").unwrap();

    let err = session.commit().expect_err("deferred FK violation");
    assert!(matches!(err, AppError::Commit { rollback: None, .. }));
    assert!(err.to_string().starts_with("Error doing commit"));
    assert_eq!(session.rollback_attempts(), 1);
    assert!(!session.is_autocommit());

    let rows = stmt.execute_query("SELECT * FROM child").unwrap();
    assert!(rows.is_empty());

    session.close().unwrap();
}

#[test]
fn query_helper_closes_its_session() {
    let sb = Sandbox::new();
    let cfg = sb.config();
    run_statement(&cfg, "CREATE TABLE t(id INT)").unwrap();

    let before = live_sessions();
    let rows = run_query(&cfg, "SELECT * FROM t").unwrap();
    assert!(rows.is_empty());
    assert_eq!(live_sessions(), before);
}

#[test]
fn helpers_release_session_on_failure() {
    let sb = Sandbox::new();
    let cfg = sb.config();
    let before = live_sessions();

    assert!(run_update(&cfg, "INSERT INTO missing VALUES (1)").is_err());
    assert!(run_statement(&cfg, "NOT SQL AT ALL").is_err());
    assert!(run_query(&cfg, "SELECT * FROM missing").is_err());

    assert_eq!(live_sessions(), before);
}

#[test]
fn failed_update_helper_commits_nothing() {
    let sb = Sandbox::new();
    let cfg = sb.config();
    run_statement(&cfg, "CREATE TABLE t(id INT NOT NULL)").unwrap();

    assert!(run_update(&cfg, "INSERT INTO t VALUES (NULL)").is_err());

    let rows = run_query(&cfg, "SELECT COUNT(*) FROM t").unwrap();
    assert_eq!(rows.row(0).unwrap().get(0), Some(&SqlValue::Integer(0)));
}

#[test]
fn parameterised_update_binds_values() {
    let sb = Sandbox::new();
    let session = connect(&sb.config()).unwrap();
    let stmt = create_statement(&session).unwrap();

    stmt.execute("CREATE TABLE t(name TEXT)").unwrap();
    stmt.execute_update_with("INSERT INTO t VALUES (?1)", ["O'Brien"])
        .unwrap();
    let rows = stmt
        .execute_query_with("SELECT name FROM t WHERE name = ?1", ["O'Brien"])
        .unwrap();
    assert_eq!(rows.row(0).unwrap().get_str("name"), Some("O'Brien"));

    session.close().unwrap();
}

#[test]
fn sql_commit_does_not_switch_on_autocommit() {
    let sb = Sandbox::new();
    let session = connect(&sb.config()).unwrap();
    let stmt = create_statement(&session).unwrap();

    stmt.execute("CREATE TABLE t(id INT)").unwrap();
    assert!(!stmt.execute("COMMIT").unwrap());
    assert!(!session.is_autocommit());

    // Still transactional: a rollback discards the insert.
    stmt.execute_update("INSERT INTO t VALUES (1)").unwrap();
    session.rollback().unwrap();
    let rows = stmt.execute_query("SELECT COUNT(*) AS n FROM t").unwrap();
    assert_eq!(rows.row(0).unwrap().get_i64("n"), Some(0));

    stmt.execute_update("INSERT INTO t VALUES (2)").unwrap();
    stmt.execute("ROLLBACK").unwrap();
    assert!(!session.is_autocommit());
    session.commit().unwrap();

    stmt.execute_update("INSERT INTO t VALUES (3)").unwrap();
    session.commit().unwrap();
    assert!(!session.is_autocommit());
    session.close().unwrap();

    let rows = run_query(&sb.config(), "SELECT id FROM t").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows.row(0).unwrap().get_i64("id"), Some(3));
}

#[test]
fn statement_helper_accepts_transaction_control() {
    let sb = Sandbox::new();
    let cfg = sb.config();

    assert!(!run_statement(&cfg, "COMMIT").unwrap());
    assert!(!run_statement(&cfg, "ROLLBACK").unwrap());
}
