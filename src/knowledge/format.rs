//! Literals of the knowledge base text format
//!
//! ```text
//! ### BASE DE CONHECIMENTO ###
//!
//! ## GATILHOS
//!   - <Item>
//!     - <SubItem>
//!       - Note: <content>
//!
//! ## AÇÕES
//!   (nenhum)
//!
//! ## RESTRIÇÕES
//!   ...
//!
//! ## VARIÁVEIS
//!   - <Name> (Tipo: <Type>[, Segura])
//! ```
//!
//! All literals are matched case-sensitively.

use super::types::Category;

/// First line of every export
pub const BANNER: &str = "### BASE DE CONHECIMENTO ###";

/// Written in place of an empty category's entries
pub const NONE_MARKER: &str = "(nenhum)";

/// Prefix of item, sub-item and variable lines (after indentation)
pub const LIST_MARKER: &str = "- ";

/// Prefix of note lines (after indentation)
pub const NOTE_PREFIX: &str = "- Note:";

/// Label introducing the variable type inside the parenthesized suffix
pub const TYPE_LABEL: &str = "Tipo";

/// Trailing marker of secure variables
pub const SECURE_MARKER: &str = "Segura";

/// Spaces per nesting level
pub const INDENT_UNIT: usize = 2;

/// Indentation of item lines
pub const ITEM_DEPTH: usize = INDENT_UNIT;

/// Indentation of sub-item lines
pub const SUB_ITEM_DEPTH: usize = 2 * INDENT_UNIT;

/// Indentation of note lines
pub const NOTE_DEPTH: usize = 3 * INDENT_UNIT;

/// Indentation of variable lines
pub const VARIABLE_DEPTH: usize = INDENT_UNIT;

impl Category {
    /// Section header line introducing this category
    pub fn section_marker(self) -> &'static str {
        match self {
            Category::Triggers => "## GATILHOS",
            Category::Actions => "## AÇÕES",
            Category::Constraints => "## RESTRIÇÕES",
            Category::Variables => "## VARIÁVEIS",
        }
    }

    /// Category whose section marker prefixes `line`
    pub fn from_section_line(line: &str) -> Option<Category> {
        let line = line.trim_start();
        Category::ALL
            .into_iter()
            .find(|c| line.starts_with(c.section_marker()))
    }
}

/// Number of leading ASCII spaces
pub fn indentation(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// Collapse every line break (`\r\n`, `\n`, `\r`) into a single space
pub fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// Text as it reads back from a line: single line, no surrounding whitespace
pub fn entry_text(text: &str) -> String {
    single_line(text).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_markers_are_distinct() {
        for a in Category::ALL {
            for b in Category::ALL {
                if a != b {
                    assert!(!a.section_marker().starts_with(b.section_marker()));
                }
            }
        }
    }

    #[test]
    fn test_from_section_line() {
        assert_eq!(
            Category::from_section_line("## GATILHOS"),
            Some(Category::Triggers)
        );
        assert_eq!(
            Category::from_section_line("## VARIÁVEIS (3)"),
            Some(Category::Variables)
        );
        assert_eq!(
            Category::from_section_line("  ## AÇÕES"),
            Some(Category::Actions)
        );
        assert_eq!(Category::from_section_line("## gatilhos"), None);
        assert_eq!(Category::from_section_line(BANNER), None);
    }

    #[test]
    fn test_indentation() {
        assert_eq!(indentation("no indent"), 0);
        assert_eq!(indentation("  - item"), 2);
        assert_eq!(indentation("      - Note: x"), 6);
        assert_eq!(indentation("\t- tab"), 0);
        assert_eq!(indentation(""), 0);
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("a\nb"), "a b");
        assert_eq!(single_line("a\r\nb"), "a b");
        assert_eq!(single_line("a\rb\n\nc"), "a b  c");
        assert_eq!(single_line("plain"), "plain");
    }

    #[test]
    fn test_entry_text() {
        assert_eq!(entry_text("  Padded  "), "Padded");
        assert_eq!(entry_text("two\nlines\n"), "two lines");
        assert_eq!(entry_text(""), "");
    }
}
