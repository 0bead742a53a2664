//! Shared testing utilities for eduprompt CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated working directory for CLI runs.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Path to the directory used as the CLI's working directory.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for the compiled `eduprompt` binary, acting as the default user.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("eduprompt").expect("Failed to locate eduprompt binary");
        cmd.current_dir(&self.work_dir)
            .env("HOME", self.root.path())
            .env_remove("EDUPROMPT_CONFIG")
            .env_remove("EDUPROMPT_USER")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Build a command acting as `user`.
    pub fn cli_as(&self, user: &str) -> Command {
        let mut cmd = self.cli();
        cmd.args(["--user", user]);
        cmd
    }

    /// Write `eduprompt.toml` into the working directory.
    pub fn write_config(&self, content: &str) {
        fs::write(self.work_dir.join("eduprompt.toml"), content).expect("Failed to write config");
    }

    /// Directory holding saved library entries.
    pub fn library_dir(&self) -> PathBuf {
        self.work_dir.join(".eduprompt").join("library")
    }

    /// Generate and save a lesson plan as `user`, returning the new entry id.
    pub fn save_lesson_plan(&self, user: &str, lesson: &str) -> String {
        let output = self
            .cli_as(user)
            .args([
                "generate",
                "lesson-plan",
                "--subject",
                "Toán",
                "--grade",
                "7",
                "--lesson",
                lesson,
                "--format",
                "json",
                "--save",
            ])
            .output()
            .expect("Failed to run eduprompt");
        assert!(
            output.status.success(),
            "save failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let prompt: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("generate --format json prints JSON");
        prompt["id"].as_str().expect("prompt has an id").to_string()
    }
}
