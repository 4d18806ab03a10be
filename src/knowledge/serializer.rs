//! Knowledge base → text format
//!
//! Total and side-effect free. Names and note content are written the way
//! the parser reads them back: flattened to a single line and trimmed. Line
//! breaks and surrounding whitespace therefore do not survive a round trip.

use super::format::{
    entry_text, BANNER, ITEM_DEPTH, LIST_MARKER, NONE_MARKER, NOTE_DEPTH, NOTE_PREFIX,
    SECURE_MARKER, SUB_ITEM_DEPTH, TYPE_LABEL, VARIABLE_DEPTH,
};
use super::types::{Category, Item, KnowledgeBase, Variable};

/// Render a knowledge base in the canonical text format
pub fn serialize(kb: &KnowledgeBase) -> String {
    let mut lines: Vec<String> = vec![BANNER.to_string()];

    for category in Category::ALL {
        lines.push(String::new());
        lines.push(category.section_marker().to_string());

        match kb.items(category) {
            Some(items) => push_items(&mut lines, items),
            None => push_variables(&mut lines, &kb.variables),
        }
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

fn push_items(lines: &mut Vec<String>, items: &[Item]) {
    if items.is_empty() {
        lines.push(indented(ITEM_DEPTH, NONE_MARKER));
        return;
    }

    for item in items {
        lines.push(list_line(ITEM_DEPTH, &item.name));
        for sub_item in &item.sub_items {
            lines.push(list_line(SUB_ITEM_DEPTH, &sub_item.name));
            for note in &sub_item.notes {
                lines.push(indented(
                    NOTE_DEPTH,
                    &format!("{} {}", NOTE_PREFIX, entry_text(&note.content)),
                ));
            }
        }
    }
}

fn push_variables(lines: &mut Vec<String>, variables: &[Variable]) {
    if variables.is_empty() {
        lines.push(indented(VARIABLE_DEPTH, NONE_MARKER));
        return;
    }

    for variable in variables {
        lines.push(list_line(VARIABLE_DEPTH, &variable_entry(variable)));
    }
}

/// `Name (Tipo: Type[, Segura])`; an empty name leaves just the suffix
fn variable_entry(variable: &Variable) -> String {
    let mut entry = entry_text(&variable.name);
    if !entry.is_empty() {
        entry.push(' ');
    }
    entry.push_str(&format!("({}: {}", TYPE_LABEL, variable.var_type));
    if variable.secure {
        entry.push_str(", ");
        entry.push_str(SECURE_MARKER);
    }
    entry.push(')');
    entry
}

fn list_line(depth: usize, name: &str) -> String {
    indented(depth, &format!("{}{}", LIST_MARKER, entry_text(name)))
}

fn indented(depth: usize, content: &str) -> String {
    format!("{:width$}{}", "", content, width = depth)
}
