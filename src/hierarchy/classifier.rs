//! Widget-role heuristics for uiautomator nodes.
//!
//! Classification walks [`RULES`] top to bottom and the first matching rule
//! decides the [`ElementKind`]. Class-name checks are case-sensitive substring
//! matches, so rule order matters: `RadioButton` contains `Button` and is
//! claimed by the button rule before the radio rule is reached.

use super::element::{ElementKind, NodeAttributes};

/// A single entry of the classification table.
pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&NodeAttributes) -> bool,
    pub kind: ElementKind,
}

fn class_contains_any(attrs: &NodeAttributes, needles: &[&str]) -> bool {
    needles.iter().any(|needle| attrs.class_name.contains(needle))
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "switch-class",
        matches: |a| class_contains_any(a, &["Switch", "Toggle"]),
        kind: ElementKind::Switch,
    },
    Rule {
        name: "input-class",
        matches: |a| class_contains_any(a, &["EditText", "Input"]),
        kind: ElementKind::Input,
    },
    Rule {
        name: "button-class",
        matches: |a| class_contains_any(a, &["Button"]),
        kind: ElementKind::Button,
    },
    Rule {
        name: "checkbox-class",
        matches: |a| class_contains_any(a, &["CheckBox"]),
        kind: ElementKind::Checkbox,
    },
    Rule {
        name: "radio-class",
        matches: |a| class_contains_any(a, &["RadioButton"]),
        kind: ElementKind::Radio,
    },
    Rule {
        name: "progress-class",
        matches: |a| class_contains_any(a, &["SeekBar", "Progress"]),
        kind: ElementKind::Progress,
    },
    Rule {
        name: "spinner-class",
        matches: |a| class_contains_any(a, &["Spinner"]),
        kind: ElementKind::Spinner,
    },
    Rule {
        name: "list-class",
        matches: |a| class_contains_any(a, &["ListView", "RecyclerView"]),
        kind: ElementKind::List,
    },
    Rule {
        name: "image-class",
        matches: |a| class_contains_any(a, &["ImageView"]),
        kind: ElementKind::Image,
    },
    Rule {
        name: "clickable",
        matches: |a| a.clickable,
        kind: ElementKind::Button,
    },
    Rule {
        name: "labelled",
        matches: |a| a.has_text() || a.has_content_desc(),
        kind: ElementKind::Text,
    },
];

/// Class-name fragments that make a node worth reporting on their own.
const RELEVANT_CLASSES: &[&str] = &["EditText", "Button", "Switch", "CheckBox"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: ElementKind,
    pub relevant: bool,
}

/// Classify a node and decide whether it belongs in the extracted sequence.
pub fn classify(attrs: &NodeAttributes) -> Classification {
    Classification {
        kind: matching_rule(attrs).map_or(ElementKind::View, |rule| rule.kind),
        relevant: is_relevant(attrs),
    }
}

/// The first rule in [`RULES`] that matches, if any.
pub fn matching_rule(attrs: &NodeAttributes) -> Option<&'static Rule> {
    RULES.iter().find(|rule| (rule.matches)(attrs))
}

/// Whether a node carries enough signal to be reported.
///
/// Dumps typically contain hundreds of layout containers with no text, id or
/// interaction; those are dropped.
pub fn is_relevant(attrs: &NodeAttributes) -> bool {
    attrs.has_text()
        || attrs.has_content_desc()
        || attrs.clickable
        || attrs.scrollable
        || class_contains_any(attrs, RELEVANT_CLASSES)
        || attrs.has_resource_id()
}
