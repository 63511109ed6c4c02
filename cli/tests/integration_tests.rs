use std::fs;
use std::path::Path;
use std::process::{Command, Output};

/// Runs the binary with logging pinned to the given level.
fn userbase(args: &[&str], log_level: &str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_userbase"))
        .args(args)
        .args(["--log-level", log_level])
        .env_remove("RUST_LOG")
        .env_remove("USERBASE_DATABASE")
        .output()
        .expect("failed to run userbase")
}

fn run_against(db: &Path, extra: &[&str]) -> (Output, String) {
    let mut args = vec!["--database", db.to_str().unwrap()];
    args.extend_from_slice(extra);
    let output = userbase(&args, "info");
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    (output, stdout)
}

fn row_count(db: &Path) -> i64 {
    let conn = rusqlite::Connection::open(db).unwrap();
    conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .unwrap()
}

// ---------------------------------------------------------------------------
// Default sequence
// ---------------------------------------------------------------------------

#[test]
fn first_run_creates_seeds_and_prints() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("database.db");

    let (output, stdout) = run_against(&db, &[]);

    assert!(output.status.success());
    assert!(stdout.contains("Connected to database"));
    assert!(stdout.contains("Table 'users' is ready."));
    assert!(stdout.contains("3 user record(s) submitted, 3 inserted."));
    assert!(stdout.contains("Fetched 3 user record(s)."));
    assert!(stdout.contains("aleksey@example.com"));
    assert!(stdout.contains("ivan@example.com"));
    assert_eq!(row_count(&db), 3);
}

#[test]
fn second_run_rejects_duplicates_and_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("database.db");

    let (first, _) = run_against(&db, &[]);
    assert!(first.status.success());

    let (second, stdout) = run_against(&db, &[]);
    assert!(second.status.success());
    assert!(stdout.contains("3 user record(s) submitted, 0 inserted."));
    assert!(stdout.contains("Row rejected"));
    let summary = stdout
        .lines()
        .find(|line| line.contains("Some records were rejected"))
        .expect("missing rejection summary");
    assert!(summary.contains("WARN"));
    assert!(summary.contains("rejected=3"));
    assert!(stdout.contains("Fetched 3 user record(s)."));
    assert_eq!(row_count(&db), 3);
}

#[test]
fn unreachable_database_still_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("no").join("such").join("dir").join("database.db");

    let (output, stdout) = run_against(&db, &[]);

    assert!(output.status.success());
    assert!(stdout.contains("failed to connect to database"));
    assert!(!stdout.contains("Fetched"));
    assert!(!db.exists());
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[test]
fn seed_file_replaces_builtin_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("database.db");
    let seed = dir.path().join("seed.yaml");
    fs::write(
        &seed,
        "users:\n  - name: Alex\n    age: 28\n    email: a@x.com\n  - name: Maria\n    email: m@x.com\n",
    )
    .unwrap();

    let (output, stdout) = run_against(&db, &["--seed", seed.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(stdout.contains("2 user record(s) submitted, 2 inserted."));
    assert!(stdout.contains("a@x.com"));
    assert!(!stdout.contains("aleksey@example.com"));
    assert_eq!(row_count(&db), 2);
}

#[test]
fn unreadable_seed_file_skips_insert() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("database.db");
    let seed = dir.path().join("absent.yaml");

    let (output, stdout) = run_against(&db, &["--seed", seed.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(stdout.contains("Failed to load seed file"));
    assert!(!stdout.contains("submitted"));
    assert!(stdout.contains("Fetched 0 user record(s)."));
}

#[test]
fn json_format_writes_only_the_document_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("database.db");

    let output = userbase(
        &["--database", db.to_str().unwrap(), "--format", "json"],
        "info",
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is not JSON");
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["id"], 1);
    assert_eq!(rows[0]["name"], "Aleksey");
    assert_eq!(rows[1]["age"], 34);
    assert_eq!(rows[1]["email"], "maria@example.com");
    assert_eq!(rows[2]["id"], 3);
    assert_eq!(rows[2]["name"], "Ivan");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Connected to database"));
    assert!(stderr.contains("Fetched 3 user record(s)."));
}

#[test]
fn yaml_format_writes_only_the_document_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("database.db");

    let output = userbase(
        &["--database", db.to_str().unwrap(), "--format", "yaml"],
        "info",
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: Vec<userbase_core::User> =
        serde_yaml::from_str(&stdout).expect("stdout is not YAML");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].email.as_deref(), Some("ivan@example.com"));
    assert_eq!(rows[0].age, Some(28));
}
