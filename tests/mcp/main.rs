use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use anyhow::Result;
use async_trait::async_trait;
use droidscope::{
    config::Config,
    device::{AdbCommand, CommandError, CommandRunner},
    mcp::DroidscopeMcpServer,
};
use rmcp::model::CallToolResult;
use tempfile::TempDir;

mod tools;

pub const UIAUTOMATOR_DUMP: &str = "adb shell uiautomator dump /sdcard/window_dump.xml";
pub const CAT_DUMP: &str = "adb shell cat /sdcard/window_dump.xml";

/// Login screen as uiautomator would dump it.
pub const LOGIN_SCREEN: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='yes' ?>
<hierarchy rotation="0">
  <node index="0" text="" resource-id="" class="android.widget.FrameLayout" package="com.example.app" content-desc="" checkable="false" checked="false" clickable="false" enabled="true" focusable="false" focused="false" scrollable="false" long-clickable="false" password="false" selected="false" bounds="[0,0][1080,2400]">
    <node index="0" text="Welcome back" resource-id="com.example.app:id/title" class="android.widget.TextView" package="com.example.app" content-desc="" checkable="false" checked="false" clickable="false" enabled="true" focusable="false" focused="false" scrollable="false" long-clickable="false" password="false" selected="false" bounds="[100,200][980,300]" />
    <node index="1" text="" resource-id="com.example.app:id/email" class="android.widget.EditText" package="com.example.app" content-desc="Email" checkable="false" checked="false" clickable="true" enabled="true" focusable="true" focused="false" scrollable="false" long-clickable="true" password="false" selected="false" bounds="[100,400][980,520]" />
    <node index="2" text="Login" resource-id="com.example.app:id/login" class="android.widget.Button" package="com.example.app" content-desc="" checkable="false" checked="false" clickable="true" enabled="true" focusable="true" focused="false" scrollable="false" long-clickable="false" password="false" selected="false" bounds="[100,600][980,720]" />
  </node>
</hierarchy>"#;

/// Scripted stand-in for the `adb` binary.
///
/// Replies are keyed by the rendered command line (`adb shell ...`). Commands
/// without a scripted reply succeed with empty output. Every command is
/// recorded in order.
#[derive(Default)]
pub struct FakeRunner {
    replies: Mutex<HashMap<String, Result<Vec<u8>, String>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fake device currently showing `xml`.
    pub fn showing(xml: &str) -> Arc<Self> {
        let runner = Self::new();
        runner.reply(CAT_DUMP, xml);
        runner
    }

    pub fn reply(&self, command: &str, stdout: impl Into<Vec<u8>>) {
        self.replies
            .lock()
            .unwrap()
            .insert(command.to_string(), Ok(stdout.into()));
    }

    /// Make `command` exit non-zero with `stderr`.
    pub fn fail(&self, command: &str, stderr: &str) {
        self.replies
            .lock()
            .unwrap()
            .insert(command.to_string(), Err(stderr.to_string()));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, command: &AdbCommand) -> Result<Vec<u8>, CommandError> {
        let label = command.to_string();
        self.calls.lock().unwrap().push(label.clone());

        match self.replies.lock().unwrap().get(&label) {
            Some(Ok(stdout)) => Ok(stdout.clone()),
            Some(Err(stderr)) => Err(CommandError::Failed {
                command: label,
                code: Some(1),
                stderr: stderr.clone(),
            }),
            None => Ok(Vec::new()),
        }
    }
}

/// Server wired to a fake device, with artifacts under a temporary test root.
pub struct McpTestFixture {
    _temp_dir: TempDir,
    test_root: PathBuf,
    pub runner: Arc<FakeRunner>,
    pub server: DroidscopeMcpServer,
}

impl McpTestFixture {
    pub fn new(runner: Arc<FakeRunner>) -> Result<Self> {
        Self::with_config(runner, Config::default())
    }

    pub fn with_config(runner: Arc<FakeRunner>, config: Config) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let test_root = temp_dir.path().canonicalize()?;

        let config = Config {
            test_root: test_root.to_string_lossy().to_string(),
            settle_delay_ms: 0,
            launch_wait_ms: 0,
            ..config
        };
        let server = DroidscopeMcpServer::with_runner(config, false, runner.clone());

        Ok(Self {
            _temp_dir: temp_dir,
            test_root,
            runner,
            server,
        })
    }

    pub fn root_path(&self) -> &Path {
        &self.test_root
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Text of every text item in a successful CallToolResult
///
/// Panics if the result indicates an error
pub fn result_texts(result: &CallToolResult) -> Vec<String> {
    if let Some(true) = result.is_error {
        panic!("Tool call returned an error: {:?}", result);
    }

    assert!(
        !result.content.is_empty(),
        "Tool result should have content"
    );

    result
        .content
        .iter()
        .filter_map(|content| content.as_text().map(|t| t.text.clone()))
        .collect()
}
