//! Source formatting collaborator

use crate::error::Result;
use async_trait::async_trait;

/// Style parser a formatter should apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleParser {
    /// TypeScript-flavored source
    #[default]
    TypeScript,
    /// Plain JavaScript source
    Babel,
}

impl std::fmt::Display for StyleParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StyleParser::TypeScript => write!(f, "typescript"),
            StyleParser::Babel => write!(f, "babel"),
        }
    }
}

/// Formats generated declaration source
///
/// Formatting is the one async suspension point of a conversion. A failure
/// here is non-fatal: callers fall back to the unformatted source.
#[async_trait]
pub trait CodeFormatter: Send + Sync {
    /// Format source text according to the selected style parser
    async fn format(&self, source: &str, parser: StyleParser) -> Result<String>;
}

/// Formatter with a small built-in style
///
/// Re-indents lines one level per unbalanced bracket line, collapses runs
/// of blank lines, and ends the output with a newline. Not a real parser,
/// but enough to make emitted declarations readable without an external
/// tool.
#[derive(Debug, Clone)]
pub struct BuiltinFormatter {
    indent_width: usize,
}

impl Default for BuiltinFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinFormatter {
    /// Create a formatter with two-space indentation
    pub fn new() -> Self {
        Self { indent_width: 2 }
    }

    /// Set the indentation width
    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }
}

#[async_trait]
impl CodeFormatter for BuiltinFormatter {
    async fn format(&self, source: &str, _parser: StyleParser) -> Result<String> {
        Ok(reindent(source, &" ".repeat(self.indent_width)))
    }
}

/// Formatter that returns source unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughFormatter;

#[async_trait]
impl CodeFormatter for PassthroughFormatter {
    async fn format(&self, source: &str, _parser: StyleParser) -> Result<String> {
        Ok(source.to_string())
    }
}

fn reindent(source: &str, indent: &str) -> String {
    let mut out = String::new();
    let mut depth: usize = 0;
    let mut previous_blank = false;

    for line in source.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !previous_blank && !out.is_empty() {
                out.push('\n');
            }
            previous_blank = true;
            continue;
        }
        previous_blank = false;

        let (opens, closes, leading_closes) = bracket_counts(trimmed);
        if leading_closes > 0 {
            depth = depth.saturating_sub(1);
        }
        for _ in 0..depth {
            out.push_str(indent);
        }
        out.push_str(trimmed);
        out.push('\n');
        // A line opening more brackets than it closes nests one level,
        // however many brackets it stacks on that line.
        if opens > closes {
            depth += 1;
        } else if closes > opens && leading_closes == 0 {
            depth = depth.saturating_sub(1);
        }
    }

    out
}

/// Count bracket opens/closes outside string literals, plus how many
/// closers the line leads with
fn bracket_counts(line: &str) -> (usize, usize, usize) {
    let mut opens = 0;
    let mut closes = 0;
    let mut leading_closes = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut seen_content = false;

    for ch in line.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => {
                in_string = !in_string;
                seen_content = true;
            }
            '{' | '[' | '(' if !in_string => {
                opens += 1;
                seen_content = true;
            }
            '}' | ']' | ')' if !in_string => {
                closes += 1;
                if !seen_content {
                    leading_closes += 1;
                }
            }
            c => {
                if in_string || !c.is_whitespace() {
                    seen_content = true;
                }
            }
        }
    }

    (opens, closes, leading_closes)
}
