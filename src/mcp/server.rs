use std::sync::Arc;

use anyhow::Result;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::device::{AdbRunner, CommandRunner, Device, DeviceSettings, KeyEvent, ScrollDirection};
use crate::hierarchy::ConfirmationKeywords;

use super::helpers::{capture_ui_content, tool_error};
use super::types::{
    CaptureScreenshotParams, CaptureUiDumpParams, ConfigDto, CreateTestFolderParams,
    InputKeyEventParams, InputScrollParams, InputTapParams, InputTextParams, ListAppsParams,
    OpenAppParams,
};

#[derive(Clone)]
pub struct DroidscopeMcpServer {
    device: Device,
    config: Arc<Config>,
    config_from_file: bool,
    keywords: ConfirmationKeywords,
    /// Held for the whole of each tool call so invocations never interleave
    turn: Arc<Mutex<()>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl DroidscopeMcpServer {
    /// Server driving the `adb` binary named in `config`.
    pub fn new(config: Config, config_from_file: bool) -> Self {
        let runner = AdbRunner::new(
            &config.adb_path,
            config.command_timeout(),
            config.settle_delay(),
        );
        Self::with_runner(config, config_from_file, Arc::new(runner))
    }

    pub fn with_runner(
        config: Config,
        config_from_file: bool,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            device: Device::new(runner, DeviceSettings::from(&config)),
            keywords: config.confirmation_keywords(),
            config: Arc::new(config),
            config_from_file,
            turn: Arc::new(Mutex::new(())),
            tool_router: Self::tool_router(),
        }
    }

    /// Create a folder for a test run's artifacts
    #[tool(description = "Create a test folder with the specified name")]
    pub async fn create_test_folder(
        &self,
        params: Parameters<CreateTestFolderParams>,
    ) -> Result<CallToolResult, McpError> {
        let _turn = self.turn.lock().await;

        let path = self
            .device
            .create_test_folder(&params.0.test_name)
            .map_err(tool_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Test folder created: {}",
            path.display()
        ))]))
    }

    #[tool(description = "List installed apps matching a name pattern")]
    pub async fn list_apps(
        &self,
        params: Parameters<ListAppsParams>,
    ) -> Result<CallToolResult, McpError> {
        let _turn = self.turn.lock().await;

        let packages = self
            .device
            .list_packages(&params.0.app_name)
            .await
            .map_err(tool_error)?;

        let text = if packages.is_empty() {
            "No apps found matching the pattern".to_string()
        } else {
            packages.join("\n")
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Open an app using its package name")]
    pub async fn open_app(
        &self,
        params: Parameters<OpenAppParams>,
    ) -> Result<CallToolResult, McpError> {
        let _turn = self.turn.lock().await;
        let package = &params.0.package_name;

        self.device.open_app(package).await.map_err(tool_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "App opened: {}",
            package
        ))]))
    }

    #[tool(description = "Capture a screenshot and save it to the test folder")]
    pub async fn capture_screenshot(
        &self,
        params: Parameters<CaptureScreenshotParams>,
    ) -> Result<CallToolResult, McpError> {
        let _turn = self.turn.lock().await;

        let screenshot = self
            .device
            .capture_screenshot(&params.0.test_name, &params.0.step_name)
            .await
            .map_err(tool_error)?;

        Ok(CallToolResult::success(vec![
            Content::text(format!(
                "Screenshot captured: {}",
                screenshot.path.display()
            )),
            Content::image(BASE64.encode(&screenshot.png), "image/png"),
        ]))
    }

    /// Capture and summarize the current UI hierarchy
    #[tool(
        description = "Capture UI hierarchy dump from the device. Returns a categorized summary of texts, buttons, input fields, switches and scrollable areas with their center coordinates, optionally followed by the raw XML."
    )]
    pub async fn capture_ui_dump(
        &self,
        params: Parameters<CaptureUiDumpParams>,
    ) -> Result<CallToolResult, McpError> {
        let _turn = self.turn.lock().await;
        let include_raw_xml = params.0.include_raw_xml.unwrap_or(self.config.include_raw_xml);

        let contents = capture_ui_content(&self.device, &self.keywords, include_raw_xml).await?;

        Ok(CallToolResult::success(contents))
    }

    #[tool(description = "Send key events (BACK, HOME, ENTER, DELETE)")]
    pub async fn input_keyevent(
        &self,
        params: Parameters<InputKeyEventParams>,
    ) -> Result<CallToolResult, McpError> {
        let _turn = self.turn.lock().await;

        let key: KeyEvent = params.0.key.parse().map_err(tool_error)?;
        self.device.key_event(key).await.map_err(tool_error)?;

        self.with_ui(format!("Key event sent: {} ({})", key, key.keycode()))
            .await
    }

    #[tool(description = "Tap at specific coordinates")]
    pub async fn input_tap(
        &self,
        params: Parameters<InputTapParams>,
    ) -> Result<CallToolResult, McpError> {
        let _turn = self.turn.lock().await;
        let InputTapParams { x, y } = params.0;

        self.device.tap(x, y).await.map_err(tool_error)?;

        self.with_ui(format!("Tap executed at coordinates: ({}, {})", x, y))
            .await
    }

    #[tool(description = "Input text into the current field and press ENTER")]
    pub async fn input_text(
        &self,
        params: Parameters<InputTextParams>,
    ) -> Result<CallToolResult, McpError> {
        let _turn = self.turn.lock().await;
        let text = &params.0.text;

        self.device.input_text(text).await.map_err(tool_error)?;

        self.with_ui(format!("Text input: {}", text)).await
    }

    #[tool(description = "Perform scroll action (up, down, left, right)")]
    pub async fn input_scroll(
        &self,
        params: Parameters<InputScrollParams>,
    ) -> Result<CallToolResult, McpError> {
        let _turn = self.turn.lock().await;

        let direction: ScrollDirection = params.0.direction.parse().map_err(tool_error)?;
        self.device.scroll(direction).await.map_err(tool_error)?;

        self.with_ui(format!("Scroll executed: {}", direction))
            .await
    }

    /// Get the effective droidscope configuration
    #[tool(description = "Get the effective droidscope configuration.")]
    pub async fn get_config(&self) -> Result<CallToolResult, McpError> {
        let dto = ConfigDto::new(&self.config, self.config_from_file);

        let json_str = serde_json::to_string_pretty(&dto).map_err(|e| {
            McpError::internal_error(format!("JSON serialization failed: {}", e), None)
        })?;

        Ok(CallToolResult::success(vec![Content::text(json_str)]))
    }

    /// Acknowledge an action, followed by the UI it left behind.
    async fn with_ui(&self, message: String) -> Result<CallToolResult, McpError> {
        let mut contents = vec![Content::text(message)];
        contents.extend(capture_ui_content(&self.device, &self.keywords, false).await?);
        Ok(CallToolResult::success(contents))
    }
}

#[tool_handler]
impl ServerHandler for DroidscopeMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Droidscope drives an Android device over adb.\n\n\
                 Available tools:\n\
                 1. create_test_folder - Create a folder for test artifacts\n\
                 2. list_apps - Find installed packages by name\n\
                 3. open_app - Launch an app by package name\n\
                 4. capture_screenshot - Save a screenshot into a test folder\n\
                 5. capture_ui_dump - Summarize the on-screen UI with tap coordinates\n\
                 6. input_tap / input_text / input_keyevent / input_scroll - Interact, then get the new UI summary\n\
                 7. get_config - Show the effective configuration\n\n\
                 Recommended Workflow:\n\
                 1. Use capture_ui_dump to see what is on screen\n\
                 2. Tap elements using the center coordinates from the summary\n\
                 3. Read the UI summary returned by each input tool before the next step"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server(config: Config, config_from_file: bool) -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = DroidscopeMcpServer::new(config, config_from_file);
            tracing::info!("droidscope MCP server listening on stdio");
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
