//! Text format → knowledge base
//!
//! A tolerant line scanner. Each line is matched against the patterns that
//! are valid in the current state; anything else is skipped and recorded in
//! the [`ParseReport`]. The only failure is input that yields no entities and
//! carries no explicit "none" marker.

use super::format::{
    indentation, ITEM_DEPTH, LIST_MARKER, NONE_MARKER, NOTE_DEPTH, NOTE_PREFIX, SECURE_MARKER,
    SUB_ITEM_DEPTH, TYPE_LABEL, VARIABLE_DEPTH,
};
use super::types::{Category, Item, KnowledgeBase, Note, SubItem, Variable, VariableType};
use crate::error::FormatError;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Why a line did not contribute to the knowledge base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Content before the first section marker
    OutsideSection,
    /// Variables line whose type suffix is missing or not a known tag
    UnknownVariableType,
    /// Sub-item line with no item open
    NoOpenItem,
    /// Note line with no sub-item open
    NoOpenSubItem,
    /// Matches no pattern for the current state
    Unrecognized,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::OutsideSection => "outside of any section",
            SkipReason::UnknownVariableType => "unrecognized variable type",
            SkipReason::NoOpenItem => "sub-item without an item",
            SkipReason::NoOpenSubItem => "note without a sub-item",
            SkipReason::Unrecognized => "unrecognized line",
        };
        f.write_str(s)
    }
}

/// A non-blank line the parser ignored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number
    pub line_number: usize,
    pub content: String,
    pub reason: SkipReason,
}

/// Lines skipped during a parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub skipped: Vec<SkippedLine>,
}

impl ParseReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Parse the text format into a knowledge base with fresh identities
pub fn parse(text: &str) -> Result<KnowledgeBase, FormatError> {
    parse_with_report(text).map(|(kb, _)| kb)
}

/// Like [`parse`], also returning the lines that were skipped
pub fn parse_with_report(text: &str) -> Result<(KnowledgeBase, ParseReport), FormatError> {
    let mut parser = Parser::default();
    for (index, line) in text.lines().enumerate() {
        parser.feed(index + 1, line);
    }

    let Parser { kb, report, .. } = parser;

    if kb.is_empty() && !text.contains(NONE_MARKER) {
        return Err(FormatError::no_data());
    }

    tracing::debug!(
        entities = kb.entity_count(),
        skipped = report.skipped.len(),
        "Parsed knowledge base"
    );

    Ok((kb, report))
}

/// Matches the part of a variable line after the list marker
fn variable_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let tags = VariableType::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(
            r"^(?P<name>.*?)\s*\({}:\s*(?P<type>{})(?P<secure>,\s*{})?\)$",
            TYPE_LABEL, tags, SECURE_MARKER
        );
        // Built from crate constants only.
        Regex::new(&pattern).expect("variable pattern is valid")
    })
}

/// Scanner state: current section plus cursors into the open item/sub-item
#[derive(Default)]
struct Parser {
    kb: KnowledgeBase,
    report: ParseReport,
    category: Option<Category>,
    item: Option<usize>,
    sub_item: Option<usize>,
}

impl Parser {
    fn feed(&mut self, line_number: usize, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }

        if let Some(category) = Category::from_section_line(line) {
            self.category = Some(category);
            self.item = None;
            self.sub_item = None;
            return;
        }

        if trimmed.starts_with('#') || trimmed == NONE_MARKER {
            return;
        }

        let Some(category) = self.category else {
            self.skip(line_number, line, SkipReason::OutsideSection);
            return;
        };

        let depth = indentation(line);
        let outcome = if category.holds_items() {
            self.item_line(category, depth, trimmed)
        } else {
            self.variable_line(depth, trimmed)
        };

        if let Err(reason) = outcome {
            self.skip(line_number, line, reason);
        }
    }

    fn variable_line(&mut self, depth: usize, trimmed: &str) -> Result<(), SkipReason> {
        let entry = match trimmed.strip_prefix(LIST_MARKER) {
            Some(entry) if depth == VARIABLE_DEPTH => entry.trim(),
            _ => return Err(SkipReason::Unrecognized),
        };

        let caps = variable_pattern()
            .captures(entry)
            .ok_or(SkipReason::UnknownVariableType)?;
        let var_type = caps["type"]
            .parse::<VariableType>()
            .map_err(|_| SkipReason::UnknownVariableType)?;

        let mut variable = Variable::new(caps["name"].trim(), var_type);
        variable.secure = caps.name("secure").is_some();
        self.kb.variables.push(variable);
        Ok(())
    }

    fn item_line(
        &mut self,
        category: Category,
        depth: usize,
        trimmed: &str,
    ) -> Result<(), SkipReason> {
        match depth {
            ITEM_DEPTH => {
                let name = list_entry(trimmed).ok_or(SkipReason::Unrecognized)?;
                let items = self
                    .kb
                    .items_mut(category)
                    .ok_or(SkipReason::Unrecognized)?;
                items.push(Item::new(name));
                let index = items.len() - 1;
                self.item = Some(index);
                self.sub_item = None;
                Ok(())
            }
            SUB_ITEM_DEPTH => {
                let name = list_entry(trimmed).ok_or(SkipReason::Unrecognized)?;
                let item = self.open_item(category).ok_or(SkipReason::NoOpenItem)?;
                item.sub_items.push(SubItem::new(name));
                let index = item.sub_items.len() - 1;
                self.sub_item = Some(index);
                Ok(())
            }
            NOTE_DEPTH => {
                let content = trimmed
                    .strip_prefix(NOTE_PREFIX)
                    .ok_or(SkipReason::Unrecognized)?
                    .trim();
                let sub_item_index = self.sub_item.ok_or(SkipReason::NoOpenSubItem)?;
                let sub_item = self
                    .open_item(category)
                    .and_then(|item| item.sub_items.get_mut(sub_item_index))
                    .ok_or(SkipReason::NoOpenSubItem)?;
                sub_item.notes.push(Note::new(content));
                Ok(())
            }
            _ => Err(SkipReason::Unrecognized),
        }
    }

    fn open_item(&mut self, category: Category) -> Option<&mut Item> {
        let index = self.item?;
        self.kb.items_mut(category)?.get_mut(index)
    }

    fn skip(&mut self, line_number: usize, line: &str, reason: SkipReason) {
        tracing::debug!(line_number, %reason, "Skipping line: {}", line);
        self.report.skipped.push(SkippedLine {
            line_number,
            content: line.to_string(),
            reason,
        });
    }
}

/// Name following the list marker, if non-empty
fn list_entry(trimmed: &str) -> Option<&str> {
    let name = trimmed.strip_prefix(LIST_MARKER)?.trim();
    (!name.is_empty()).then_some(name)
}
