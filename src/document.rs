//! Line-preserving editing of systemd-networkd `.network` files.
//!
//! Only the values of `Address=`, `Gateway=`, `Table=` and `From=` lines are
//! ever replaced. Every other line, including comments, blank lines and
//! section headers, is kept byte for byte at its original position.

use std::fmt;

use crate::derive::DerivedRouting;

/// Line prefixes recognized by the rewriter.
pub mod key {
    /// Interface address, rewritten to the new address with mask.
    pub const ADDRESS: &str = "Address=";
    /// Default gateway, rewritten to the derived gateway.
    pub const GATEWAY: &str = "Gateway=";
    /// Policy routing table, rewritten to the derived table id.
    pub const TABLE: &str = "Table=";
    /// Routing policy source, rewritten to the new address with mask.
    pub const FROM: &str = "From=";
}

/// An ordered sequence of lines from a `.network` file.
///
/// Lines are split on `\n` (a trailing `\r` is dropped) and rendered with
/// `\n`. A trailing newline in the source is remembered and reproduced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NetworkDocument {
    lines: Vec<String>,
    trailing_newline: bool,
}

impl NetworkDocument {
    /// Splits `text` into a document.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
            trailing_newline: text.ends_with('\n'),
        }
    }

    /// Returns the document lines in order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the value of the first `Address=` line.
    ///
    /// Lines are trimmed before matching; blank lines and `#` comments are
    /// skipped. Returns `None` when no address is configured.
    #[must_use]
    pub fn current_address(&self) -> Option<&str> {
        self.lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .find_map(|line| line.strip_prefix(key::ADDRESS))
    }

    /// Returns a copy with every recognized line pointing at `routing`.
    ///
    /// Every matching line is rewritten, not just the first. Fields that
    /// are missing from the document stay missing; nothing is added or
    /// removed.
    #[must_use]
    pub fn rewrite(&self, routing: &DerivedRouting) -> Self {
        Self {
            lines: self
                .lines
                .iter()
                .map(|line| rewrite_line(line, routing))
                .collect(),
            trailing_newline: self.trailing_newline,
        }
    }

    /// Renders the document back to text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut text = self.lines.join("\n");
        if self.trailing_newline {
            text.push('\n');
        }
        text
    }
}

impl fmt::Display for NetworkDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn rewrite_line(line: &str, routing: &DerivedRouting) -> String {
    if line.starts_with(key::ADDRESS) {
        format!("{}{}", key::ADDRESS, routing.address)
    } else if line.starts_with(key::GATEWAY) {
        format!("{}{}", key::GATEWAY, routing.gateway)
    } else if line.starts_with(key::TABLE) {
        format!("{}{}", key::TABLE, routing.table)
    } else if line.starts_with(key::FROM) {
        format!("{}{}", key::FROM, routing.address)
    } else {
        line.to_string()
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
