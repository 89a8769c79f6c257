use serde::Serialize;

use super::classifier::classify;
use super::geometry::{Point, Rect, Size, parse_rect};

/// Semantic widget role inferred from a node's attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Button,
    Input,
    Switch,
    Checkbox,
    Radio,
    Progress,
    Spinner,
    List,
    Image,
    #[default]
    View,
}

/// The known attributes of a uiautomator `<node>`.
///
/// Every field is defaulted when the attribute is missing. Attributes this
/// record does not know about are dropped when it is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeAttributes {
    pub text: String,
    pub content_desc: String,
    pub resource_id: String,
    pub class_name: String,
    pub package: String,
    pub bounds: Rect,
    pub clickable: bool,
    pub enabled: bool,
    pub focusable: bool,
    pub scrollable: bool,
    pub selected: bool,
    pub checked: bool,
}

impl NodeAttributes {
    /// Build the record from raw `(name, value)` pairs in document order.
    ///
    /// Boolean attributes are true only for the exact string `"true"`.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut attrs = Self::default();
        for (key, value) in pairs {
            let value = value.into();
            match key.as_ref() {
                "text" => attrs.text = value,
                "content-desc" => attrs.content_desc = value,
                "resource-id" => attrs.resource_id = value,
                "class" => attrs.class_name = value,
                "package" => attrs.package = value,
                "bounds" => attrs.bounds = parse_rect(&value),
                "clickable" => attrs.clickable = value == "true",
                "enabled" => attrs.enabled = value == "true",
                "focusable" => attrs.focusable = value == "true",
                "scrollable" => attrs.scrollable = value == "true",
                "selected" => attrs.selected = value == "true",
                "checked" => attrs.checked = value == "true",
                _ => {}
            }
        }
        attrs
    }

    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    pub fn has_content_desc(&self) -> bool {
        !self.content_desc.trim().is_empty()
    }

    pub fn has_resource_id(&self) -> bool {
        !self.resource_id.trim().is_empty()
    }
}

/// A classified UI element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub kind: ElementKind,
    pub text: String,
    pub content_desc: String,
    pub resource_id: String,
    pub class_name: String,
    pub package: String,
    pub bounds: Rect,
    pub center: Point,
    pub size: Size,
    pub clickable: bool,
    pub enabled: bool,
    pub focusable: bool,
    pub scrollable: bool,
    pub selected: bool,
    pub checked: bool,
}

impl Element {
    pub fn from_attributes(attrs: &NodeAttributes) -> Self {
        Self {
            kind: classify(attrs).kind,
            text: attrs.text.clone(),
            content_desc: attrs.content_desc.clone(),
            resource_id: attrs.resource_id.clone(),
            class_name: attrs.class_name.clone(),
            package: attrs.package.clone(),
            bounds: attrs.bounds,
            center: attrs.bounds.center(),
            size: attrs.bounds.size(),
            clickable: attrs.clickable,
            enabled: attrs.enabled,
            focusable: attrs.focusable,
            scrollable: attrs.scrollable,
            selected: attrs.selected,
            checked: attrs.checked,
        }
    }

    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    pub fn has_content_desc(&self) -> bool {
        !self.content_desc.trim().is_empty()
    }
}
