//! Knowledge base data model
//!
//! A knowledge base is a four-category catalog. Triggers, actions and
//! constraints hold named items with nested sub-items and notes; variables
//! hold a name, a type tag and a secure flag.
//!
//! Identities are opaque UUIDs. The text format carries none, so every parse
//! allocates fresh ones.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Knowledge base category, in text-format order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Triggers,
    Actions,
    Constraints,
    Variables,
}

impl Category {
    /// All categories in the order they appear in the text format
    pub const ALL: [Category; 4] = [
        Category::Triggers,
        Category::Actions,
        Category::Constraints,
        Category::Variables,
    ];

    /// Categories that hold items (everything except variables)
    pub const ITEM_CATEGORIES: [Category; 3] =
        [Category::Triggers, Category::Actions, Category::Constraints];

    /// Whether this category holds items rather than variables
    pub fn holds_items(self) -> bool {
        !matches!(self, Category::Variables)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Triggers => "triggers",
            Category::Actions => "actions",
            Category::Constraints => "constraints",
            Category::Variables => "variables",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of variable type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableType {
    Boolean,
    Integer,
    String,
    Decimal,
    Dictionary,
    List,
}

impl VariableType {
    pub const ALL: [VariableType; 6] = [
        VariableType::Boolean,
        VariableType::Integer,
        VariableType::String,
        VariableType::Decimal,
        VariableType::Dictionary,
        VariableType::List,
    ];

    /// Tag as written in the text format
    pub fn as_str(self) -> &'static str {
        match self {
            VariableType::Boolean => "Boolean",
            VariableType::Integer => "Integer",
            VariableType::String => "String",
            VariableType::Decimal => "Decimal",
            VariableType::Dictionary => "Dictionary",
            VariableType::List => "List",
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a type tag is outside the closed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown variable type '{0}'")]
pub struct UnknownVariableType(pub String);

impl FromStr for VariableType {
    type Err = UnknownVariableType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VariableType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVariableType(s.to_string()))
    }
}

/// Free-text context attached to a sub-item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub content: String,
}

impl Note {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
        }
    }
}

/// Named refinement of an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubItem {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl SubItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            notes: Vec::new(),
        }
    }

    /// Append a note (builder style)
    pub fn with_note(mut self, content: impl Into<String>) -> Self {
        self.notes.push(Note::new(content));
        self
    }
}

/// Named entry of a trigger, action or constraint category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub sub_items: Vec<SubItem>,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            sub_items: Vec::new(),
        }
    }

    /// Append a sub-item (builder style)
    pub fn with_sub_item(mut self, sub_item: SubItem) -> Self {
        self.sub_items.push(sub_item);
        self
    }
}

/// Typed variable
///
/// `description` is application-side only and is not part of the text format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub var_type: VariableType,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub description: String,
}

impl Variable {
    pub fn new(name: impl Into<String>, var_type: VariableType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            var_type,
            secure: false,
            description: String::new(),
        }
    }

    /// Mark the variable as secure (builder style)
    pub fn secure(mut self) -> Self {
        self.secure = true;
        self
    }
}

/// The four-category catalog that is the unit of serialization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KnowledgeBase {
    pub triggers: Vec<Item>,
    pub actions: Vec<Item>,
    pub constraints: Vec<Item>,
    pub variables: Vec<Variable>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items of an item-bearing category; `None` for variables
    pub fn items(&self, category: Category) -> Option<&[Item]> {
        match category {
            Category::Triggers => Some(&self.triggers),
            Category::Actions => Some(&self.actions),
            Category::Constraints => Some(&self.constraints),
            Category::Variables => None,
        }
    }

    pub fn items_mut(&mut self, category: Category) -> Option<&mut Vec<Item>> {
        match category {
            Category::Triggers => Some(&mut self.triggers),
            Category::Actions => Some(&mut self.actions),
            Category::Constraints => Some(&mut self.constraints),
            Category::Variables => None,
        }
    }

    /// Top-level entities: items across the three item categories plus variables
    pub fn entity_count(&self) -> usize {
        self.triggers.len() + self.actions.len() + self.constraints.len() + self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_count() == 0
    }

    /// Per-category counts for display
    pub fn summary(&self) -> KnowledgeSummary {
        let all_items = || {
            self.triggers
                .iter()
                .chain(&self.actions)
                .chain(&self.constraints)
        };

        KnowledgeSummary {
            triggers: self.triggers.len(),
            actions: self.actions.len(),
            constraints: self.constraints.len(),
            variables: self.variables.len(),
            secure_variables: self.variables.iter().filter(|v| v.secure).count(),
            sub_items: all_items().map(|i| i.sub_items.len()).sum(),
            notes: all_items()
                .flat_map(|i| &i.sub_items)
                .map(|s| s.notes.len())
                .sum(),
        }
    }
}

/// Entity counts of a knowledge base
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeSummary {
    pub triggers: usize,
    pub actions: usize,
    pub constraints: usize,
    pub variables: usize,
    pub secure_variables: usize,
    pub sub_items: usize,
    pub notes: usize,
}

impl fmt::Display for KnowledgeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "triggers: {}, actions: {}, constraints: {}, variables: {} ({} secure), sub-items: {}, notes: {}",
            self.triggers,
            self.actions,
            self.constraints,
            self.variables,
            self.secure_variables,
            self.sub_items,
            self.notes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order() {
        assert_eq!(
            Category::ALL,
            [
                Category::Triggers,
                Category::Actions,
                Category::Constraints,
                Category::Variables
            ]
        );
        assert!(Category::ITEM_CATEGORIES.iter().all(|c| c.holds_items()));
        assert!(!Category::Variables.holds_items());
    }

    #[test]
    fn test_variable_type_from_str() {
        for t in VariableType::ALL {
            assert_eq!(t.as_str().parse::<VariableType>().unwrap(), t);
        }
        assert!("Unknown".parse::<VariableType>().is_err());
        assert!("string".parse::<VariableType>().is_err());
    }

    #[test]
    fn test_unknown_variable_type_error() {
        let err = "Text".parse::<VariableType>().unwrap_err();
        assert_eq!(err, UnknownVariableType("Text".to_string()));
        assert_eq!(err.to_string(), "unknown variable type 'Text'");
    }

    #[test]
    fn test_fresh_identities() {
        let a = Item::new("Same");
        let b = Item::new("Same");
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, b.name);
    }

    #[test]
    fn test_items_accessor() {
        let mut kb = KnowledgeBase::new();
        kb.items_mut(Category::Actions)
            .unwrap()
            .push(Item::new("Send email"));

        assert_eq!(kb.items(Category::Actions).unwrap().len(), 1);
        assert!(kb.items(Category::Triggers).unwrap().is_empty());
        assert!(kb.items(Category::Variables).is_none());
        assert!(kb.items_mut(Category::Variables).is_none());
    }

    #[test]
    fn test_summary() {
        let kb = KnowledgeBase {
            triggers: vec![Item::new("Order placed")
                .with_sub_item(SubItem::new("Online").with_note("a").with_note("b"))
                .with_sub_item(SubItem::new("In store"))],
            constraints: vec![Item::new("Business hours")],
            variables: vec![
                Variable::new("Token", VariableType::String).secure(),
                Variable::new("Retries", VariableType::Integer),
            ],
            ..Default::default()
        };

        let summary = kb.summary();
        assert_eq!(summary.triggers, 1);
        assert_eq!(summary.actions, 0);
        assert_eq!(summary.constraints, 1);
        assert_eq!(summary.variables, 2);
        assert_eq!(summary.secure_variables, 1);
        assert_eq!(summary.sub_items, 2);
        assert_eq!(summary.notes, 2);
        assert_eq!(kb.entity_count(), 4);
        assert!(!kb.is_empty());
        assert!(KnowledgeBase::new().is_empty());
    }

    #[test]
    fn test_json_without_ids() {
        let json = r#"{
            "actions": [{"name": "Notify", "subItems": [{"name": "By SMS"}]}],
            "variables": [{"name": "Login", "type": "String", "secure": true}]
        }"#;
        let kb: KnowledgeBase = serde_json::from_str(json).unwrap();

        assert!(kb.triggers.is_empty());
        assert_eq!(kb.actions[0].name, "Notify");
        assert_eq!(kb.actions[0].sub_items[0].name, "By SMS");
        assert!(kb.actions[0].sub_items[0].notes.is_empty());
        assert_eq!(kb.variables[0].var_type, VariableType::String);
        assert!(kb.variables[0].secure);
        assert!(kb.variables[0].description.is_empty());
    }

    #[test]
    fn test_json_field_names() {
        let kb = KnowledgeBase {
            triggers: vec![Item::new("Start").with_sub_item(SubItem::new("Now"))],
            ..Default::default()
        };
        let json = serde_json::to_string(&kb).unwrap();
        assert!(json.contains("\"subItems\""));
        assert!(json.contains("\"variables\":[]"));
    }
}
