use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use rusqlite::Connection;
use tempfile::TempDir;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_cave"))
}

/// Isolated HOME and XDG dirs so tests never touch a real config.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("temp dir"),
        }
    }

    fn vault_path(&self) -> PathBuf {
        self.dir.path().join("data").join("cave").join("vault.cave")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(bin());
        cmd.env_remove("CAVE_PATH")
            .env_remove("CAVE_ACCOUNT")
            .env_remove("CAVE_CONFIG")
            .env_remove("CAVE_LOG")
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env("XDG_DATA_HOME", self.dir.path().join("data"));
        cmd
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("config").join("cave").join("config.toml")
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().expect("run cave")
    }

    fn init(&self, args: &[&str]) {
        let mut full = vec!["init"];
        full.extend_from_slice(args);
        let output = self.run(&full);
        assert!(output.status.success(), "init failed: {}", stderr(&output));
    }

    fn add(&self, account: &str, text: &str) -> u64 {
        let output = self.run(&["--quiet", "--as", account, "add", text]);
        assert!(output.status.success(), "add failed: {}", stderr(&output));
        stdout(&output).trim().parse().expect("added id")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("json output")
}

#[test]
fn test_init_add_show_random_flow() {
    let sandbox = Sandbox::new();
    sandbox.init(&[]);
    assert!(sandbox.vault_path().exists());
    assert!(sandbox
        .dir
        .path()
        .join("config")
        .join("cave")
        .join("config.toml")
        .exists());

    assert_eq!(sandbox.add("5", "hello world"), 1);

    let output = sandbox.run(&["show", "1", "--json"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let entry = json(&output);
    assert_eq!(entry["text"], "hello world");
    assert_eq!(entry["submitter_id"], 5);
    assert_eq!(entry["origin_label"], "private");
    assert_eq!(entry["view_count"], 1);

    let output = sandbox.run(&["random", "--json"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let entry = json(&output);
    assert_eq!(entry["id"], 1);
    assert_eq!(entry["view_count"], 2);
}

#[test]
fn test_add_from_group_records_label() {
    let sandbox = Sandbox::new();
    sandbox.init(&[]);

    let output = sandbox.run(&[
        "--as",
        "5",
        "add",
        "group",
        "words",
        "--group",
        "-100",
        "--group-name",
        "The Den",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Added entry #1"));

    let entry = json(&sandbox.run(&["show", "1", "--json"]));
    assert_eq!(entry["text"], "group words");
    assert_eq!(entry["origin_group_id"], -100);
    assert_eq!(entry["origin_label"], "The Den");
}

#[test]
fn test_add_from_unnamed_group_uses_unknown_label() {
    let sandbox = Sandbox::new();
    sandbox.init(&[]);

    let output = sandbox.run(&["--as", "5", "add", "anon", "--group", "77"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let entry = json(&sandbox.run(&["show", "1", "--json"]));
    assert_eq!(entry["origin_group_id"], 77);
    assert_eq!(entry["origin_label"], "unknown group");
}

#[test]
fn test_add_appends_configured_quote() {
    let sandbox = Sandbox::new();
    sandbox.init(&[]);

    let output = sandbox.run(&["add", "plain"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim_end(), "Added entry #1");

    let config = std::fs::read_to_string(sandbox.config_path()).unwrap();
    let rest: Vec<&str> = config
        .lines()
        .filter(|line| !line.starts_with("quotes"))
        .collect();
    std::fs::write(
        sandbox.config_path(),
        format!("quotes = [\"The cave echoes back.\"]\n{}\n", rest.join("\n")),
    )
    .unwrap();

    let output = sandbox.run(&["add", "quoted"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output).trim_end(),
        "Added entry #2\n\nThe cave echoes back."
    );

    // Quiet mode prints only the id.
    let output = sandbox.run(&["--quiet", "add", "silent"]);
    assert_eq!(stdout(&output).trim(), "3");
}

#[test]
fn test_missing_config_is_not_found() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["random"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("cave init"));
}

#[test]
fn test_vault_flag_works_without_config() {
    let sandbox = Sandbox::new();
    let path = sandbox.dir.path().join("direct.cave");
    let path_str = path.to_str().unwrap();

    let output = sandbox.run(&["init", path_str]);
    assert!(output.status.success(), "{}", stderr(&output));
    std::fs::remove_file(sandbox.dir.path().join("config").join("cave").join("config.toml"))
        .unwrap();

    let output = sandbox.run(&["--vault", path_str, "--as", "1", "add", "direct"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let output = sandbox.run(&["--vault", path_str, "stats", "--json"]);
    assert_eq!(json(&output)["active"], 1);
}

#[test]
fn test_invalid_input_exit_code() {
    let sandbox = Sandbox::new();
    sandbox.init(&[]);

    let output = sandbox.run(&["add", "42"]);
    assert_eq!(output.status.code(), Some(4));

    let output = sandbox.run(&["show", "abc"]);
    assert_eq!(output.status.code(), Some(4));

    let output = sandbox.run(&["show", "0"]);
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_show_unknown_id_is_not_found() {
    let sandbox = Sandbox::new();
    sandbox.init(&[]);
    sandbox.add("1", "only");

    let output = sandbox.run(&["show", "9"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_remove_permissions() {
    let sandbox = Sandbox::new();
    sandbox.init(&["--admin", "99"]);
    sandbox.add("5", "mine");
    sandbox.add("6", "theirs");

    let output = sandbox.run(&["--as", "6", "remove", "1"]);
    assert_eq!(output.status.code(), Some(5));

    let output = sandbox.run(&["--as", "5", "remove", "1"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Removed entry #1"));

    let output = sandbox.run(&["--as", "5", "remove", "1"]);
    assert_eq!(output.status.code(), Some(8));

    let output = sandbox.run(&["--as", "99", "remove", "2"]);
    assert!(output.status.success(), "{}", stderr(&output));

    // Deleted entries stay inspectable.
    let entry = json(&sandbox.run(&["show", "1", "--json"]));
    assert_eq!(entry["deleted"], true);
    assert_eq!(entry["view_count"], 0);

    let output = sandbox.run(&["random"]);
    assert_eq!(output.status.code(), Some(7));
    assert!(stdout(&output).contains("The vault is empty"));
}

#[test]
fn test_search_newest_first_and_empty() {
    let sandbox = Sandbox::new();
    sandbox.init(&[]);
    sandbox.add("1", "echo one");
    sandbox.add("1", "echo two");
    sandbox.add("1", "other");

    let output = sandbox.run(&["search", "echo", "--limit", "1", "--json"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let found = json(&output);
    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["text"], "echo two");

    let output = sandbox.run(&["search", "Echo"]);
    assert_eq!(output.status.code(), Some(7));
    assert!(stdout(&output).contains("No matching entries"));
}

#[test]
fn test_mine_pages() {
    let sandbox = Sandbox::new();
    sandbox.init(&[]);
    for text in ["a1", "a2", "a3"] {
        sandbox.add("5", text);
    }
    sandbox.add("6", "b1");

    let page = json(&sandbox.run(&["--as", "5", "mine", "--page-size", "2", "--json"]));
    assert_eq!(page["ids"], serde_json::json!([3, 2]));
    assert_eq!(page["total_count"], 3);
    assert_eq!(page["total_pages"], 2);

    let page = json(&sandbox.run(&["mine", "5", "--page", "2", "--page-size", "2", "--json"]));
    assert_eq!(page["ids"], serde_json::json!([1]));

    let output = sandbox.run(&["mine", "5", "--page", "3", "--page-size", "2"]);
    assert_eq!(output.status.code(), Some(7));
    assert!(stdout(&output).contains("out of range"));

    let output = sandbox.run(&["mine", "7"]);
    assert_eq!(output.status.code(), Some(7));
    assert!(stdout(&output).contains("No records found"));
}

#[test]
fn test_check_detects_bad_rows() {
    let sandbox = Sandbox::new();
    sandbox.init(&[]);
    sandbox.add("1", "fine");

    let output = sandbox.run(&["check"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Integrity check: OK"));

    {
        let conn = Connection::open(sandbox.vault_path()).unwrap();
        conn.execute_batch(
            "PRAGMA ignore_check_constraints = ON; UPDATE entries SET deleted = 5 WHERE id = 1;",
        )
        .unwrap();
    }

    let output = sandbox.run(&["check"]);
    assert_eq!(output.status.code(), Some(6));
    assert!(stderr(&output).contains("Integrity check: FAILED"));
}

#[test]
fn test_backup_is_a_usable_vault() {
    let sandbox = Sandbox::new();
    sandbox.init(&[]);
    sandbox.add("1", "keep me");

    let destination = sandbox.dir.path().join("backups").join("copy.cave");
    let output = sandbox.run(&["backup", destination.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));

    let entry = json(&sandbox.run(&[
        "--vault",
        destination.to_str().unwrap(),
        "show",
        "1",
        "--json",
    ]));
    assert_eq!(entry["text"], "keep me");
}

#[test]
fn test_backup_onto_vault_is_rejected() {
    let sandbox = Sandbox::new();
    sandbox.init(&[]);
    let vault = sandbox.vault_path();
    let output = sandbox.run(&["backup", vault.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(4));
    assert!(Path::new(&vault).exists());
}

#[test]
fn test_backup_onto_vault_through_relative_path_is_rejected() {
    let sandbox = Sandbox::new();
    sandbox.init(&[]);
    sandbox.add("1", "precious");
    let vault = sandbox.vault_path();

    let output = sandbox
        .command()
        .current_dir(vault.parent().unwrap())
        .args(["backup", "./vault.cave"])
        .output()
        .expect("run cave");
    assert_eq!(output.status.code(), Some(4));

    let entry = json(&sandbox.run(&["show", "1", "--json"]));
    assert_eq!(entry["text"], "precious");
}

#[cfg(unix)]
#[test]
fn test_backup_onto_symlink_to_vault_is_rejected() {
    let sandbox = Sandbox::new();
    sandbox.init(&[]);
    let link = sandbox.dir.path().join("link.cave");
    std::os::unix::fs::symlink(sandbox.vault_path(), &link).unwrap();

    let output = sandbox.run(&["backup", link.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(4));
    assert!(std::fs::symlink_metadata(&link)
        .unwrap()
        .file_type()
        .is_symlink());
}

#[test]
fn test_completions() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("cave"));
}
