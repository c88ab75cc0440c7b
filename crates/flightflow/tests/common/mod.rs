use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const VALID_CONFIG: &str = r#"
deploy {
    formation_name "demoapp"
    flight_name "web"
    api_key "api-key"
}
timeout 5
"#;

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn write_flight_kdl(&self, content: &str) {
        let path = self.root.path().join("flight.kdl");
        fs::write(path, content).unwrap();
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    #[allow(dead_code)]
    pub fn state_file(&self) -> PathBuf {
        self.root.path().join(".flightflow").join("state.json")
    }

    #[allow(dead_code)]
    pub fn read_state(&self) -> serde_json::Value {
        let content = fs::read_to_string(self.state_file()).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    /// 外部環境の設定を読まない `flight` コマンド
    #[allow(deprecated)]
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("flight").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env_remove("FLIGHT_CONFIG_PATH")
            .env_remove("SEAPLANE_API_KEY")
            .env_remove("SEAPLANE_IDENTITY_URL")
            .env_remove("SEAPLANE_COMPUTE_URL")
            .env_remove("RUST_LOG");
        cmd
    }
}
