use droidscope::mcp::types::{
    InputKeyEventParams, InputScrollParams, InputTapParams, InputTextParams,
};
use rmcp::{handler::server::wrapper::Parameters, model::ErrorCode};

use crate::{CAT_DUMP, FakeRunner, LOGIN_SCREEN, McpTestFixture, UIAUTOMATOR_DUMP, result_texts};

fn login_fixture() -> McpTestFixture {
    McpTestFixture::new(FakeRunner::showing(LOGIN_SCREEN)).unwrap()
}

// ============================================================================
// input_keyevent tests
// ============================================================================

#[tokio::test]
async fn test_input_keyevent_sends_keycode_then_captures() {
    let fixture = login_fixture();

    let params = Parameters(InputKeyEventParams {
        key: "BACK".to_string(),
    });
    let result = fixture.server.input_keyevent(params).await.unwrap();
    let texts = result_texts(&result);

    assert_eq!(texts[0], "Key event sent: BACK (4)");
    assert!(texts[1].starts_with("=== UI ELEMENTS ANALYSIS ==="));
    // Input tools never append the raw XML
    assert_eq!(texts.len(), 2);

    assert_eq!(
        fixture.runner.calls(),
        vec!["adb shell input keyevent 4", UIAUTOMATOR_DUMP, CAT_DUMP]
    );
}

#[tokio::test]
async fn test_input_keyevent_codes() {
    for (key, code) in [("HOME", 3), ("ENTER", 66), ("DELETE", 67)] {
        let fixture = login_fixture();
        let params = Parameters(InputKeyEventParams {
            key: key.to_string(),
        });
        let result = fixture.server.input_keyevent(params).await.unwrap();

        assert_eq!(
            result_texts(&result)[0],
            format!("Key event sent: {} ({})", key, code)
        );
        assert_eq!(
            fixture.runner.calls()[0],
            format!("adb shell input keyevent {}", code)
        );
    }
}

#[tokio::test]
async fn test_input_keyevent_rejects_unknown_key() {
    let fixture = login_fixture();

    for key in ["MENU", "back", ""] {
        let params = Parameters(InputKeyEventParams {
            key: key.to_string(),
        });
        let err = fixture.server.input_keyevent(params).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(err.message, format!("Invalid key: {}", key));
    }
    assert!(fixture.runner.calls().is_empty());
}

// ============================================================================
// input_tap tests
// ============================================================================

#[tokio::test]
async fn test_input_tap() {
    let fixture = login_fixture();

    let params = Parameters(InputTapParams {
        x: 540.0,
        y: 660.0,
    });
    let result = fixture.server.input_tap(params).await.unwrap();
    let texts = result_texts(&result);

    assert_eq!(texts[0], "Tap executed at coordinates: (540, 660)");
    assert!(texts[1].contains("SUMMARY: 3 total elements"));
    assert_eq!(fixture.runner.calls()[0], "adb shell input tap 540 660");
}

#[tokio::test]
async fn test_input_tap_rejects_negative_coordinates() {
    let fixture = login_fixture();

    let params = Parameters(InputTapParams { x: -1.0, y: 10.0 });
    let err = fixture.server.input_tap(params).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert!(fixture.runner.calls().is_empty());
}

#[tokio::test]
async fn test_input_tap_failure_is_internal_error() {
    let runner = FakeRunner::showing(LOGIN_SCREEN);
    runner.fail("adb shell input tap 1 2", "error: device offline");
    let fixture = McpTestFixture::new(runner).unwrap();

    let params = Parameters(InputTapParams { x: 1.0, y: 2.0 });
    let err = fixture.server.input_tap(params).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    assert!(err.message.contains("device offline"));
}

// ============================================================================
// input_text tests
// ============================================================================

#[tokio::test]
async fn test_input_text_quotes_and_presses_enter() {
    let fixture = login_fixture();

    let params = Parameters(InputTextParams {
        text: "user@example.com".to_string(),
    });
    let result = fixture.server.input_text(params).await.unwrap();

    assert_eq!(result_texts(&result)[0], "Text input: user@example.com");
    assert_eq!(
        fixture.runner.calls(),
        vec![
            "adb shell input text \"user@example.com\"",
            "adb shell input keyevent 66",
            UIAUTOMATOR_DUMP,
            CAT_DUMP,
        ]
    );
}

// ============================================================================
// input_scroll tests
// ============================================================================

#[tokio::test]
async fn test_input_scroll_directions() {
    let cases = [
        ("up", "adb shell input swipe 500 800 500 400"),
        ("down", "adb shell input swipe 500 400 500 800"),
        ("left", "adb shell input swipe 800 500 400 500"),
        ("right", "adb shell input swipe 400 500 800 500"),
    ];

    for (direction, command) in cases {
        let fixture = login_fixture();
        let params = Parameters(InputScrollParams {
            direction: direction.to_string(),
        });
        let result = fixture.server.input_scroll(params).await.unwrap();

        assert_eq!(
            result_texts(&result)[0],
            format!("Scroll executed: {}", direction)
        );
        assert_eq!(fixture.runner.calls()[0], command);
    }
}

#[tokio::test]
async fn test_input_scroll_rejects_unknown_direction() {
    let fixture = login_fixture();

    let params = Parameters(InputScrollParams {
        direction: "diagonal".to_string(),
    });
    let err = fixture.server.input_scroll(params).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(err.message, "Invalid direction: diagonal");
    assert!(fixture.runner.calls().is_empty());
}
