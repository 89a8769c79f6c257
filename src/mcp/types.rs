use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================
// Test Artifacts (create_test_folder, capture_screenshot)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateTestFolderParams {
    /// Name of the test folder to create
    pub test_name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CaptureScreenshotParams {
    /// Name of the test folder where to save the screenshot
    pub test_name: String,
    /// Name of the step for the screenshot file (e.g., "001_login")
    pub step_name: String,
}

// ============================================================
// Apps (list_apps, open_app)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListAppsParams {
    /// Name pattern to search for in app packages
    pub app_name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct OpenAppParams {
    /// Full package name of the app (e.g., com.example.app)
    pub package_name: String,
}

// ============================================================
// UI Capture (capture_ui_dump)
// ============================================================

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct CaptureUiDumpParams {
    /// Append the raw uiautomator XML after the report (defaults to the
    /// `includeRawXml` config value)
    #[serde(default)]
    pub include_raw_xml: Option<bool>,
}

// ============================================================
// Input (input_keyevent, input_tap, input_text, input_scroll)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct InputKeyEventParams {
    /// Key event to send: one of BACK, HOME, ENTER, DELETE
    pub key: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct InputTapParams {
    /// X coordinate for tap
    pub x: f64,
    /// Y coordinate for tap
    pub y: f64,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct InputTextParams {
    /// Text to input
    pub text: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct InputScrollParams {
    /// Direction to scroll: one of up, down, left, right
    pub direction: String,
}

// ============================================================
// Config (get_config)
// ============================================================

/// Effective configuration as reported to clients
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub adb_path: String,
    pub command_timeout_ms: u64,
    pub settle_delay_ms: u64,
    pub launch_wait_ms: u64,
    pub test_root: String,
    pub dump_path: String,
    pub confirmation_keywords: Vec<String>,
    pub include_raw_xml: bool,
}

impl ConfigDto {
    pub fn new(config: &crate::config::Config, from_file: bool) -> Self {
        Self {
            from_file,
            adb_path: config.adb_path.clone(),
            command_timeout_ms: config.command_timeout_ms,
            settle_delay_ms: config.settle_delay_ms,
            launch_wait_ms: config.launch_wait_ms,
            test_root: config.test_root.clone(),
            dump_path: config.dump_path.clone(),
            confirmation_keywords: config.confirmation_keywords.clone(),
            include_raw_xml: config.include_raw_xml,
        }
    }
}
