use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_data_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("taskman-{nanos}-{name}"))
}

fn write_tasks(dir: &PathBuf, tasks: serde_json::Value) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join("@tasks"), serde_json::to_string(&tasks).unwrap()).unwrap();
}

fn run(dir: &PathBuf, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_taskman"))
        .args(args)
        .env("TASKMAN_DATA_DIR", dir)
        .env("TASKMAN_DISABLE_NOTIFICATIONS", "1")
        .output()
        .expect("failed to run taskman")
}

fn sample_tasks() -> serde_json::Value {
    serde_json::json!([
        {
            "id": "1",
            "title": "walk dog",
            "description": "",
            "dueDate": "02-06-2025 08:00",
            "status": "pending",
            "priority": "high"
        },
        {
            "id": "2",
            "title": "buy milk",
            "description": "",
            "dueDate": "01-06-2025",
            "status": "completed",
            "priority": "low"
        },
        {
            "id": "3",
            "title": "call mum",
            "description": "",
            "dueDate": "03-06-2025 19:00",
            "status": "pending",
            "priority": "medium"
        }
    ])
}

#[test]
fn list_renders_a_table_with_every_task() {
    let dir = temp_data_dir("list-all");
    write_tasks(&dir, sample_tasks());

    let output = run(&dir, &["list"]);
    std::fs::remove_dir_all(&dir).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ID"));
    assert!(stdout.contains("walk dog"));
    assert!(stdout.contains("buy milk"));
    assert!(stdout.contains("call mum"));
}

#[test]
fn list_with_empty_store_prints_placeholder() {
    let dir = temp_data_dir("list-empty");

    let output = run(&dir, &["list"]);
    std::fs::remove_dir_all(&dir).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No tasks available"));
}

#[test]
fn list_filters_by_status() {
    let dir = temp_data_dir("list-filter");
    write_tasks(&dir, sample_tasks());

    let output = run(&dir, &["list", "--status", "completed"]);
    std::fs::remove_dir_all(&dir).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("buy milk"));
    assert!(!stdout.contains("walk dog"));
    assert!(!stdout.contains("call mum"));
}

#[test]
fn list_sorts_by_priority_ascending() {
    let dir = temp_data_dir("list-sort-priority");
    write_tasks(&dir, sample_tasks());

    let output = run(&dir, &["list", "--sort", "priority"]);
    std::fs::remove_dir_all(&dir).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let low = stdout.find("buy milk").unwrap();
    let medium = stdout.find("call mum").unwrap();
    let high = stdout.find("walk dog").unwrap();
    assert!(low < medium);
    assert!(medium < high);
}

#[test]
fn list_sorts_by_title() {
    let dir = temp_data_dir("list-sort-title");
    write_tasks(&dir, sample_tasks());

    let output = run(&dir, &["list", "--sort", "title"]);
    std::fs::remove_dir_all(&dir).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let first = stdout.find("buy milk").unwrap();
    let second = stdout.find("call mum").unwrap();
    let third = stdout.find("walk dog").unwrap();
    assert!(first < second);
    assert!(second < third);
}

#[test]
fn list_sorts_by_due_date() {
    let dir = temp_data_dir("list-sort-due");
    write_tasks(&dir, sample_tasks());

    let output = run(&dir, &["list", "--sort", "due-date"]);
    std::fs::remove_dir_all(&dir).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let first = stdout.find("buy milk").unwrap();
    let second = stdout.find("walk dog").unwrap();
    let third = stdout.find("call mum").unwrap();
    assert!(first < second);
    assert!(second < third);
}

#[test]
fn list_json_round_trips_the_collection() {
    let dir = temp_data_dir("list-json");
    write_tasks(&dir, sample_tasks());

    let output = run(&dir, &["list", "--json"]);
    std::fs::remove_dir_all(&dir).ok();

    assert!(output.status.success());
    let tasks: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    assert_eq!(tasks.as_array().unwrap().len(), 3);
    assert_eq!(tasks[0]["dueDate"], "02-06-2025 08:00");
}

#[test]
fn list_coerces_unknown_status_values_to_pending() {
    let dir = temp_data_dir("list-coerce");
    write_tasks(
        &dir,
        serde_json::json!([
            {
                "id": "1",
                "title": "mystery",
                "dueDate": "01-06-2025",
                "status": "archived",
                "priority": "critical"
            }
        ]),
    );

    let output = run(&dir, &["list", "--json"]);
    std::fs::remove_dir_all(&dir).ok();

    assert!(output.status.success());
    let tasks: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    assert_eq!(tasks[0]["status"], "pending");
    assert_eq!(tasks[0]["priority"], "medium");
}
