//! Plain-text rendering of a menu body.

use super::state::{MenuBody, MenuRow};

pub const LOADING_TEXT: &str = "Loading categories...";
pub const EMPTY_TEXT: &str = "No categories";

/// Row markers used by [`render_body`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    pub collapsed: &'static str,
    pub expanded: &'static str,
    pub leaf: &'static str,
    pub inert: &'static str,
}

impl RenderStyle {
    pub const fn unicode() -> Self {
        Self {
            collapsed: "▸",
            expanded: "▾",
            leaf: "·",
            inert: "~",
        }
    }

    /// Markers for terminals without unicode support.
    pub const fn ascii() -> Self {
        Self {
            collapsed: "+",
            expanded: "-",
            leaf: "*",
            inert: "~",
        }
    }

    fn marker(&self, row: &MenuRow) -> &'static str {
        if row.inert {
            self.inert
        } else if row.expanded {
            self.expanded
        } else if row.expandable {
            self.collapsed
        } else {
            self.leaf
        }
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::unicode()
    }
}

/// Renders `body` as newline-terminated lines.
///
/// Status bodies render as a single line; `NotLoaded` renders nothing.
pub fn render_body(body: &MenuBody, style: &RenderStyle) -> String {
    match body {
        MenuBody::NotLoaded => String::new(),
        MenuBody::Loading => format!("{LOADING_TEXT}\n"),
        MenuBody::Error(message) => format!("{message}\n"),
        MenuBody::Empty => format!("{EMPTY_TEXT}\n"),
        MenuBody::Rows(rows) => rows
            .iter()
            .map(|row| {
                format!(
                    "{:indent$}{} {}\n",
                    "",
                    style.marker(row),
                    row.name,
                    indent = row.indent
                )
            })
            .collect(),
    }
}
