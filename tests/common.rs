#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::path::Path;
use surveydb::config::Config;
use tempfile::TempDir;

pub fn sdb() -> Command {
    cargo_bin_cmd!("surveydb")
}

/// A scratch area: database directory and config file both live inside it.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn db_dir(&self) -> String {
        self.dir.path().join("db").to_string_lossy().to_string()
    }

    pub fn config_file(&self) -> String {
        self.dir.path().join("surveydb.conf").to_string_lossy().to_string()
    }

    pub fn config(&self) -> Config {
        Config::with_database_dir(self.db_dir())
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// CLI command isolated to this sandbox.
    pub fn cmd(&self) -> Command {
        let mut cmd = sdb();
        cmd.args(["--test", "--db-dir", &self.db_dir(), "--config", &self.config_file()]);
        cmd
    }

    /// Run `init` and assert success.
    pub fn init(&self) {
        self.cmd().arg("init").assert().success();
    }
}
