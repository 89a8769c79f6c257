use base64::{Engine, engine::general_purpose::STANDARD};
use droidscope::{
    config::Config,
    mcp::types::{CaptureScreenshotParams, CaptureUiDumpParams, CreateTestFolderParams},
};
use rmcp::{handler::server::wrapper::Parameters, model::ErrorCode};

use crate::{CAT_DUMP, FakeRunner, LOGIN_SCREEN, McpTestFixture, UIAUTOMATOR_DUMP, result_texts};

// ============================================================================
// capture_ui_dump tests
// ============================================================================

#[tokio::test]
async fn test_capture_ui_dump_reports_elements() {
    let fixture = McpTestFixture::new(FakeRunner::showing(LOGIN_SCREEN)).unwrap();

    let params = Parameters(CaptureUiDumpParams {
        include_raw_xml: Some(false),
    });
    let result = fixture.server.capture_ui_dump(params).await.unwrap();
    let texts = result_texts(&result);

    assert_eq!(texts.len(), 1);
    let report = &texts[0];
    assert!(report.starts_with("=== UI ELEMENTS ANALYSIS ==="));
    assert!(report.contains("\"Welcome back\" at center (540, 250)"));
    assert!(report.contains("\"Login\" at center (540, 660)"));
    assert!(report.contains("Value: \"Empty\" | Desc: \"Email\" at center (540, 460)"));
    assert!(report.contains(
        "SUMMARY: 3 total elements (1 texts, 1 buttons, 1 inputs, 0 switches)"
    ));

    assert_eq!(fixture.runner.calls(), vec![UIAUTOMATOR_DUMP, CAT_DUMP]);
}

#[tokio::test]
async fn test_capture_ui_dump_appends_raw_xml_by_default() {
    let fixture = McpTestFixture::new(FakeRunner::showing(LOGIN_SCREEN)).unwrap();

    let result = fixture
        .server
        .capture_ui_dump(Parameters(CaptureUiDumpParams::default()))
        .await
        .unwrap();
    let texts = result_texts(&result);

    assert_eq!(texts.len(), 2);
    assert_eq!(
        texts[1],
        format!("\n=== RAW XML UI Automator ===\n{}", LOGIN_SCREEN)
    );
}

#[tokio::test]
async fn test_capture_ui_dump_raw_default_follows_config() {
    let config = Config {
        include_raw_xml: false,
        ..Default::default()
    };
    let fixture = McpTestFixture::with_config(FakeRunner::showing(LOGIN_SCREEN), config).unwrap();

    let result = fixture
        .server
        .capture_ui_dump(Parameters(CaptureUiDumpParams::default()))
        .await
        .unwrap();

    assert_eq!(result_texts(&result).len(), 1);
}

#[tokio::test]
async fn test_capture_ui_dump_keeps_raw_text_when_unparsable() {
    let garbage = "ERROR: could not get idle state.";
    let fixture = McpTestFixture::new(FakeRunner::showing(garbage)).unwrap();

    let result = fixture
        .server
        .capture_ui_dump(Parameters(CaptureUiDumpParams::default()))
        .await
        .unwrap();
    let texts = result_texts(&result);

    assert_eq!(texts.len(), 2);
    assert!(
        texts[0].starts_with("Error processing UI dump: Failed to parse UI XML"),
        "{}",
        texts[0]
    );
    assert_eq!(texts[1], format!("\n=== RAW XML DATA ===\n{}", garbage));
}

#[tokio::test]
async fn test_capture_ui_dump_device_failure_is_internal_error() {
    let runner = FakeRunner::new();
    runner.fail(UIAUTOMATOR_DUMP, "error: no devices/emulators found");
    let fixture = McpTestFixture::new(runner).unwrap();

    let err = fixture
        .server
        .capture_ui_dump(Parameters(CaptureUiDumpParams::default()))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    assert!(err.message.starts_with("Tool execution failed: "));
    assert!(err.message.contains("no devices/emulators found"));
    // The cat is never attempted once the dump fails
    assert_eq!(fixture.runner.calls(), vec![UIAUTOMATOR_DUMP]);
}

// ============================================================================
// create_test_folder / capture_screenshot tests
// ============================================================================

#[tokio::test]
async fn test_create_test_folder() {
    let fixture = McpTestFixture::new(FakeRunner::new()).unwrap();

    let params = Parameters(CreateTestFolderParams {
        test_name: "login_flow".to_string(),
    });
    let result = fixture.server.create_test_folder(params).await.unwrap();
    let texts = result_texts(&result);

    let expected = fixture.root_path().join("login_flow");
    assert!(expected.is_dir());
    assert_eq!(
        texts,
        vec![format!("Test folder created: {}", expected.display())]
    );
    assert!(fixture.runner.calls().is_empty());
}

#[tokio::test]
async fn test_create_test_folder_rejects_escaping_names() {
    let fixture = McpTestFixture::new(FakeRunner::new()).unwrap();

    for name in ["../outside", "/abs", ""] {
        let params = Parameters(CreateTestFolderParams {
            test_name: name.to_string(),
        });
        let err = fixture.server.create_test_folder(params).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS, "{}", name);
    }
}

#[tokio::test]
async fn test_capture_screenshot_writes_png_and_returns_image() {
    let png = b"\x89PNG\r\n\x1a\nfake-image-bytes".to_vec();
    let runner = FakeRunner::new();
    runner.reply("adb exec-out screencap -p", png.clone());
    let fixture = McpTestFixture::new(runner).unwrap();

    let params = Parameters(CaptureScreenshotParams {
        test_name: "login_flow".to_string(),
        step_name: "001_login".to_string(),
    });
    let result = fixture.server.capture_screenshot(params).await.unwrap();

    let path = fixture
        .root_path()
        .join("login_flow")
        .join("001_login_step.png");
    assert_eq!(std::fs::read(&path).unwrap(), png);

    assert_eq!(result.content.len(), 2);
    assert_eq!(
        result.content[0].as_text().unwrap().text,
        format!("Screenshot captured: {}", path.display())
    );
    let image = result.content[1].as_image().unwrap();
    assert_eq!(image.mime_type, "image/png");
    assert_eq!(STANDARD.decode(&image.data).unwrap(), png);
}
