//! Plain-text rendering of a [`UiBundle`].
//!
//! The layout is stable so that agents can rely on it: one section per
//! non-empty category, 1-based numbering per section, then a summary line.

use std::fmt;

use super::bundle::{Category, UiBundle};
use super::element::Element;

const DISABLED_LINE: &str = "     \u{26a0}\u{fe0f}  DISABLED"; // ⚠️

/// Precedes the raw dump when it is appended to a report.
pub const RAW_XML_HEADER: &str = "\n=== RAW XML UI Automator ===\n";
/// Precedes the raw dump when it could not be parsed.
pub const RAW_XML_ON_ERROR_HEADER: &str = "\n=== RAW XML DATA ===\n";

/// Render the report for a bundle.
pub fn format(bundle: &UiBundle) -> String {
    Report(bundle).to_string()
}

/// Display adapter that writes the report for a bundle.
pub struct Report<'a>(pub &'a UiBundle);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bundle = self.0;

        writeln!(f, "=== UI ELEMENTS ANALYSIS ===")?;
        writeln!(f)?;

        section(f, "TEXTS", &bundle.texts(), |f, el| {
            let label = first_non_empty(&[&el.text, &el.content_desc], "Empty text");
            entry_line(f, &format!("\"{}\"", label), el)?;
            id_line(f, el)?;
            if !el.content_desc.is_empty() && el.content_desc != el.text {
                writeln!(f, "     DESC: {}", el.content_desc)?;
            }
            Ok(())
        })?;

        section(f, "BUTTONS/CLICKABLES", &bundle.buttons(), |f, el| {
            let label = first_non_empty(&[&el.content_desc, &el.text], "Unlabeled button");
            entry_line(f, &format!("\"{}\"", label), el)?;
            id_line(f, el)?;
            if !el.class_name.is_empty() {
                writeln!(f, "     CLASS: {}", el.class_name)?;
            }
            disabled_line(f, el)
        })?;

        section(f, "INPUT FIELDS", &bundle.inputs(), |f, el| {
            let value = first_non_empty(&[&el.text], "Empty");
            let desc = first_non_empty(&[&el.content_desc], "No description");
            entry_line(f, &format!("Value: \"{}\" | Desc: \"{}\"", value, desc), el)?;
            id_line(f, el)?;
            disabled_line(f, el)
        })?;

        section(f, "SWITCHES/TOGGLES", &bundle.switches(), |f, el| {
            let label = first_non_empty(&[&el.content_desc, &el.text], "Unlabeled switch");
            let state = if el.checked { "ON" } else { "OFF" };
            entry_line(f, &format!("\"{}\" [{}]", label, state), el)?;
            id_line(f, el)
        })?;

        section(f, "SCROLLABLE AREAS", &bundle.scrollables(), |f, el| {
            let label = first_non_empty(&[&el.content_desc, &el.resource_id], "Scrollable area");
            entry_line(f, &format!("\"{}\"", label), el)
        })?;

        writeln!(
            f,
            "SUMMARY: {} total elements ({} texts, {} buttons, {} inputs, {} switches)",
            bundle.count(Category::All),
            bundle.count(Category::Texts),
            bundle.count(Category::Buttons),
            bundle.count(Category::Inputs),
            bundle.count(Category::Switches),
        )
    }
}

fn section<F>(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    elements: &[&Element],
    mut write_entry: F,
) -> fmt::Result
where
    F: FnMut(&mut fmt::Formatter<'_>, &Element) -> fmt::Result,
{
    if elements.is_empty() {
        return Ok(());
    }

    writeln!(f, "{}:", title)?;
    for (i, &el) in elements.iter().enumerate() {
        write!(f, "  {}. ", i + 1)?;
        write_entry(f, el)?;
    }
    writeln!(f)
}

fn entry_line(f: &mut fmt::Formatter<'_>, label: &str, el: &Element) -> fmt::Result {
    writeln!(
        f,
        "{} at center ({}, {}) [size {}x{}]",
        label, el.center.x, el.center.y, el.size.width, el.size.height
    )
}

fn id_line(f: &mut fmt::Formatter<'_>, el: &Element) -> fmt::Result {
    if el.resource_id.is_empty() {
        return Ok(());
    }
    writeln!(f, "     ID: {}", el.resource_id)
}

fn disabled_line(f: &mut fmt::Formatter<'_>, el: &Element) -> fmt::Result {
    if el.enabled {
        return Ok(());
    }
    writeln!(f, "{}", DISABLED_LINE)
}

fn first_non_empty<'a>(candidates: &[&'a str], fallback: &'a str) -> &'a str {
    candidates
        .iter()
        .copied()
        .find(|s| !s.is_empty())
        .unwrap_or(fallback)
}
