//! Partition of extracted elements into reporting categories.
//!
//! Categories overlap: a clickable `Button` is listed under both buttons and
//! clickables. The bundle owns the elements once and each category is an
//! ordered list of indices into them.

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

use super::element::{Element, ElementKind};

pub const DEFAULT_CONFIRMATION_KEYWORDS: &[&str] = &["Entrar"];

/// Content-description fragments that mark a clickable element as a button
/// even when neither its class nor its kind say so.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationKeywords(Vec<String>);

impl ConfirmationKeywords {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keywords.into_iter().map(Into::into).collect())
    }

    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn matches(&self, content_desc: &str) -> bool {
        self.0.iter().any(|k| content_desc.contains(k.as_str()))
    }
}

impl Default for ConfirmationKeywords {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIRMATION_KEYWORDS.iter().copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Texts,
    Buttons,
    Inputs,
    Switches,
    Clickables,
    Scrollables,
    All,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Texts,
        Category::Buttons,
        Category::Inputs,
        Category::Switches,
        Category::Clickables,
        Category::Scrollables,
        Category::All,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Texts => "texts",
            Category::Buttons => "buttons",
            Category::Inputs => "inputs",
            Category::Switches => "switches",
            Category::Clickables => "clickables",
            Category::Scrollables => "scrollables",
            Category::All => "all",
        }
    }

    fn admits(&self, el: &Element, keywords: &ConfirmationKeywords) -> bool {
        match self {
            Category::Texts => {
                (el.kind == ElementKind::Text && (el.has_text() || el.has_content_desc()))
                    || (el.has_content_desc() && !el.clickable)
            }
            Category::Buttons => {
                el.kind == ElementKind::Button
                    || (el.clickable && el.class_name.contains("Button"))
                    || (el.clickable && keywords.matches(&el.content_desc))
            }
            Category::Inputs => el.kind == ElementKind::Input || el.class_name.contains("EditText"),
            Category::Switches => {
                el.kind == ElementKind::Switch || el.class_name.contains("Switch")
            }
            Category::Clickables => el.clickable,
            Category::Scrollables => el.scrollable,
            Category::All => true,
        }
    }
}

/// Read-only categorized view over an element sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiBundle {
    elements: Vec<Element>,
    texts: Vec<usize>,
    buttons: Vec<usize>,
    inputs: Vec<usize>,
    switches: Vec<usize>,
    clickables: Vec<usize>,
    scrollables: Vec<usize>,
}

/// Sort elements into categories. The input order is kept within each one.
pub fn aggregate(elements: Vec<Element>, keywords: &ConfirmationKeywords) -> UiBundle {
    let members = |category: Category| -> Vec<usize> {
        elements
            .iter()
            .enumerate()
            .filter(|(_, el)| category.admits(el, keywords))
            .map(|(i, _)| i)
            .collect()
    };

    UiBundle {
        texts: members(Category::Texts),
        buttons: members(Category::Buttons),
        inputs: members(Category::Inputs),
        switches: members(Category::Switches),
        clickables: members(Category::Clickables),
        scrollables: members(Category::Scrollables),
        elements,
    }
}

impl UiBundle {
    /// Every extracted element, in document order.
    pub fn all(&self) -> &[Element] {
        &self.elements
    }

    pub fn get(&self, category: Category) -> Vec<&Element> {
        match self.indices(category) {
            Some(indices) => indices.iter().map(|&i| &self.elements[i]).collect(),
            None => self.elements.iter().collect(),
        }
    }

    pub fn count(&self, category: Category) -> usize {
        self.indices(category)
            .map_or(self.elements.len(), |indices| indices.len())
    }

    pub fn texts(&self) -> Vec<&Element> {
        self.get(Category::Texts)
    }

    pub fn buttons(&self) -> Vec<&Element> {
        self.get(Category::Buttons)
    }

    pub fn inputs(&self) -> Vec<&Element> {
        self.get(Category::Inputs)
    }

    pub fn switches(&self) -> Vec<&Element> {
        self.get(Category::Switches)
    }

    pub fn scrollables(&self) -> Vec<&Element> {
        self.get(Category::Scrollables)
    }

    fn indices(&self, category: Category) -> Option<&[usize]> {
        match category {
            Category::Texts => Some(&self.texts),
            Category::Buttons => Some(&self.buttons),
            Category::Inputs => Some(&self.inputs),
            Category::Switches => Some(&self.switches),
            Category::Clickables => Some(&self.clickables),
            Category::Scrollables => Some(&self.scrollables),
            Category::All => None,
        }
    }
}

impl Serialize for UiBundle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("UiBundle", Category::ALL.len())?;
        for category in Category::ALL {
            state.serialize_field(category.name(), &self.get(category))?;
        }
        state.end()
    }
}
