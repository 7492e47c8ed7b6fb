//! Integration tests for the `agenda` CLI.
//!
//! Each test points `agenda` at a temp state file, runs it as a subprocess,
//! and verifies stdout and/or file contents.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// A temp directory holding the state file, config and log
struct Env {
    dir: TempDir,
}

impl Env {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("agenda.log");
        fs::write(
            dir.path().join("config.toml"),
            format!("[log]\nfile = {:?}\n", log.display().to_string()),
        )
        .unwrap();
        Env { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn state(&self) -> PathBuf {
        self.path("agenda.json")
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_agenda"))
            .arg("--data")
            .arg(self.state())
            .arg("--config")
            .arg(self.path("config.toml"))
            .args(args)
            .output()
            .expect("failed to run agenda")
    }

    /// Run and assert success, returning stdout
    fn ok(&self, args: &[&str]) -> String {
        let out = self.run(args);
        assert!(
            out.status.success(),
            "agenda {:?} failed: {}",
            args,
            String::from_utf8_lossy(&out.stderr)
        );
        String::from_utf8(out.stdout).unwrap()
    }

    /// Run and assert failure, returning stderr
    fn err(&self, args: &[&str]) -> String {
        let out = self.run(args);
        assert!(!out.status.success(), "agenda {:?} unexpectedly succeeded", args);
        String::from_utf8(out.stderr).unwrap()
    }

    fn add(&self, title: &str) -> String {
        self.ok(&["add", title]).trim().to_string()
    }

    fn titles(&self) -> Vec<String> {
        let json: serde_json::Value =
            serde_json::from_str(&self.ok(&["--json", "list"])).unwrap();
        json["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["title"].as_str().unwrap().to_string())
            .collect()
    }
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

#[test]
fn list_on_fresh_state_shows_default_project() {
    let env = Env::new();
    let out = env.ok(&["list"]);
    assert_eq!(out, "Project 1 \u{00B7} 0 min\n  (no items)\n");
    // reading never creates the state file
    assert!(!env.state().exists());
}

#[test]
fn add_writes_browser_layout() {
    let env = Env::new();
    env.ok(&["add", "Welcome", "--status", "approval", "--minutes", "5"]);
    env.add("   ");

    let state = read_json(&env.state());
    assert_eq!(state["currentProject"], "Project 1");
    let items = state["projects"]["Project 1"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["title"], "Welcome");
    assert_eq!(items[0]["status"], "approval");
    assert_eq!(items[0]["minutes"], 5);
    assert_eq!(items[1]["title"], "Unnamed");
    assert_eq!(items[1]["status"], "informed");
    assert_eq!(items[1]["minutes"], 15);
}

#[test]
fn mv_before_and_after() {
    let env = Env::new();
    let a = env.add("A");
    env.add("B");
    let c = env.add("C");
    let d = env.add("D");

    env.ok(&["mv", &a, "--after", &c]);
    assert_eq!(env.titles(), vec!["B", "C", "A", "D"]);

    env.ok(&["mv", &d, "--before", &env.titles_id(0)]);
    assert_eq!(env.titles(), vec!["D", "B", "C", "A"]);
}

#[test]
fn mv_needs_a_side() {
    let env = Env::new();
    let a = env.add("A");
    let b = env.add("B");
    let stderr = env.err(&["mv", &a, &b]);
    assert!(!stderr.is_empty());
    assert_eq!(env.titles(), vec!["A", "B"]);
}

#[test]
fn mv_onto_itself_fails_without_change() {
    let env = Env::new();
    let a = env.add("A");
    env.add("B");
    let stderr = env.err(&["mv", &a, "--after", &a]);
    assert!(stderr.starts_with("error: cannot drop item"));
    assert_eq!(env.titles(), vec!["A", "B"]);
}

#[test]
fn edit_commands_update_item() {
    let env = Env::new();
    let a = env.add("Draft");
    env.ok(&["title", &a, "Budget review"]);
    env.ok(&["status", &a, "decision"]);
    env.ok(&["minutes", &a, "40"]);
    let out = env.ok(&["list"]);
    assert_eq!(
        out,
        format!("Project 1 \u{00B7} 40 min\n  1. [{a}] Budget review (Decision, 40 min)\n")
    );
    let stderr = env.err(&["minutes", &a, "0"]);
    assert_eq!(stderr, "error: minutes must be between 1 and 999\n");
}

#[test]
fn rm_removes_item() {
    let env = Env::new();
    let a = env.add("A");
    env.add("B");
    env.ok(&["rm", &a]);
    assert_eq!(env.titles(), vec!["B"]);
    let stderr = env.err(&["rm", &a]);
    assert_eq!(stderr, format!("error: item not found: {a}\n"));
}

#[test]
fn ninth_item_is_the_last() {
    let env = Env::new();
    for i in 1..=9 {
        env.add(&format!("T{i}"));
    }
    let stderr = env.err(&["add", "T10"]);
    assert_eq!(stderr, "error: Maximum 9 agenda items allowed\n");
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[test]
fn project_lifecycle() {
    let env = Env::new();
    env.add("A");
    env.ok(&["project", "add", "  Retro  "]);
    env.add("R1");

    let out = env.ok(&["projects"]);
    assert_eq!(out, "  Project 1 (1 items, 15 min)\n* Retro (1 items, 15 min)\n");

    let stderr = env.err(&["project", "add", "Retro"]);
    assert_eq!(stderr, "error: Project already exists\n");

    let stderr = env.err(&["project", "rename", "Retro", "Project 1"]);
    assert_eq!(stderr, "error: Project name already exists\n");

    env.ok(&["project", "rename", "Retro", "Sprint"]);
    env.ok(&["project", "switch", "Project 1"]);
    env.ok(&["project", "delete", "Project 1"]);

    let state = read_json(&env.state());
    assert_eq!(state["currentProject"], "Sprint");
    let stderr = env.err(&["project", "delete", "Sprint"]);
    assert_eq!(stderr, "error: Cannot delete the last project\n");
}

#[test]
fn projects_json() {
    let env = Env::new();
    env.add("A");
    let json: serde_json::Value = serde_json::from_str(&env.ok(&["--json", "projects"])).unwrap();
    assert_eq!(json[0]["name"], "Project 1");
    assert_eq!(json[0]["current"], true);
    assert_eq!(json[0]["items"], 1);
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

#[test]
fn save_and_load_backup() {
    let env = Env::new();
    env.add("Keep me");
    let backup = env.path("backup.json");
    env.ok(&["save", backup.to_str().unwrap()]);

    let saved = read_json(&backup);
    assert!(saved["exportDate"].is_string());
    assert_eq!(saved["currentProject"], "Project 1");

    let other = Env::new();
    other.add("Replace me");
    let stderr = other.err(&["load", backup.to_str().unwrap()]);
    assert!(stderr.contains("--yes"));
    assert_eq!(other.titles(), vec!["Replace me"]);

    let out = other.ok(&["load", backup.to_str().unwrap(), "--yes"]);
    assert_eq!(out, "Projects loaded successfully\n");
    assert_eq!(other.titles(), vec!["Keep me"]);
}

#[test]
fn load_rejects_bad_files() {
    let env = Env::new();
    let wrong = env.path("wrong.json");
    fs::write(&wrong, r#"{"agenda": []}"#).unwrap();
    let stderr = env.err(&["load", wrong.to_str().unwrap(), "--yes"]);
    assert_eq!(stderr, "error: Invalid file format\n");

    let broken = env.path("broken.json");
    fs::write(&broken, "{ not json").unwrap();
    let stderr = env.err(&["load", broken.to_str().unwrap(), "--yes"]);
    assert_eq!(stderr, "error: Failed to load file\n");
}

#[test]
fn export_markdown_table() {
    let env = Env::new();
    let md = env.path("agenda.md");
    let stderr = env.err(&["export", md.to_str().unwrap()]);
    assert_eq!(
        stderr,
        "error: Please add at least one agenda item before exporting\n"
    );

    env.ok(&["add", "Welcome", "--minutes", "5"]);
    env.ok(&["export", md.to_str().unwrap()]);
    let text = fs::read_to_string(&md).unwrap();
    assert!(text.starts_with("# Project 1\n"));
    assert!(text.contains("| 1 | Welcome | Informed | 5 |"));
    assert!(text.ends_with("**Total:** 5 min\n"));
}

#[test]
fn explicit_config_must_exist() {
    let env = Env::new();
    let out = Command::new(env!("CARGO_BIN_EXE_agenda"))
        .arg("--data")
        .arg(env.state())
        .arg("--config")
        .arg(env.path("missing.toml"))
        .arg("list")
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).starts_with("error: could not read"));
}

impl Env {
    /// ID of the item at `index` in the current project
    fn titles_id(&self, index: usize) -> String {
        let json: serde_json::Value =
            serde_json::from_str(&self.ok(&["--json", "list"])).unwrap();
        json["items"][index]["id"].to_string()
    }
}
