use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["adbPath"], "adb");
    assert_eq!(parsed["commandTimeoutMs"], 30000);
    assert_eq!(parsed["settleDelayMs"], 200);
    assert_eq!(parsed["launchWaitMs"], 5000);
    assert_eq!(parsed["dumpPath"], "/sdcard/window_dump.xml");
    assert_eq!(parsed["confirmationKeywords"], serde_json::json!(["Entrar"]));
    assert_eq!(parsed["includeRawXml"], true);

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Created .droidscoperc.json"));
    assert!(test.root().join(".droidscoperc.json").exists());

    let content = test.read_file(".droidscoperc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".droidscoperc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".droidscoperc.json already exists"));
    assert_eq!(test.read_file(".droidscoperc.json")?, "{}");

    Ok(())
}
