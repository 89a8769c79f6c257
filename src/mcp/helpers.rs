use rmcp::{ErrorData as McpError, model::Content};

use crate::device::{Device, DeviceError};
use crate::hierarchy::report::{RAW_XML_HEADER, RAW_XML_ON_ERROR_HEADER};
use crate::hierarchy::{ConfirmationKeywords, capture_and_classify};

/// Map a device failure onto an MCP error.
///
/// Bad arguments are the caller's fault; everything else is reported as an
/// internal error and the server keeps running.
pub fn tool_error(err: DeviceError) -> McpError {
    match err {
        DeviceError::InvalidArgument(message) => McpError::invalid_params(message, None),
        other => {
            tracing::warn!(error = %other, "tool execution failed");
            McpError::internal_error(format!("Tool execution failed: {}", other), None)
        }
    }
}

/// Turn a raw dump into response content.
///
/// A dump that fails to parse is still returned verbatim next to the error so
/// the caller can see what the device produced.
pub fn ui_contents(
    xml: &str,
    keywords: &ConfirmationKeywords,
    include_raw_xml: bool,
) -> Vec<Content> {
    match capture_and_classify(xml, keywords) {
        Ok(capture) => {
            let mut contents = vec![Content::text(capture.report)];
            if include_raw_xml {
                contents.push(Content::text(format!("{}{}", RAW_XML_HEADER, xml)));
            }
            contents
        }
        Err(err) => {
            tracing::warn!(error = %err, bytes = xml.len(), "could not parse UI dump");
            vec![
                Content::text(format!("Error processing UI dump: {}", err)),
                Content::text(format!("{}{}", RAW_XML_ON_ERROR_HEADER, err.raw_markup())),
            ]
        }
    }
}

/// Dump the device hierarchy and render it.
pub async fn capture_ui_content(
    device: &Device,
    keywords: &ConfirmationKeywords,
    include_raw_xml: bool,
) -> Result<Vec<Content>, McpError> {
    let xml = device.dump_hierarchy().await.map_err(tool_error)?;
    Ok(ui_contents(&xml, keywords, include_raw_xml))
}
