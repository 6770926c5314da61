use serde::{Deserialize, Serialize};
use std::fmt;

/// The placeholder target of a rule that is still being edited.
pub const EMPTY_TARGET: &str = "";

/// A directed, possibly conditional edge leaving one source block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,
    #[serde(alias = "sourceId")]
    pub source_id: String,
    /// Target used when no rule matches.
    #[serde(alias = "defaultTargetId", default)]
    pub default_target_id: Option<String>,
    /// Evaluated in array order; the first matching rule wins.
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(alias = "orderIndex", default)]
    pub order_index: i64,
    /// `false` for connections synthesized by the synchronizer, which may be replaced silently.
    #[serde(alias = "isExplicit", default = "explicit_by_default")]
    pub is_explicit: bool,
}

fn explicit_by_default() -> bool {
    true
}

impl Connection {
    /// Creates a user-authored connection.
    pub fn explicit(
        id: impl Into<String>,
        source_id: impl Into<String>,
        default_target_id: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            source_id: source_id.into(),
            default_target_id: default_target_id.map(str::to_string),
            rules: Vec::new(),
            order_index: 0,
            is_explicit: true,
        }
    }

    /// Creates the sequential connection the synchronizer inserts between two blocks.
    pub fn sequential(source_id: &str, target_id: &str, order_index: i64) -> Self {
        Self {
            id: format!("auto_{}_{}", source_id, target_id),
            source_id: source_id.to_string(),
            default_target_id: Some(target_id.to_string()),
            rules: Vec::new(),
            order_index,
            is_explicit: false,
        }
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_order(mut self, order_index: i64) -> Self {
        self.order_index = order_index;
        self
    }

    /// Every block this connection can lead to: the default target followed by rule targets.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.default_target_id
            .as_deref()
            .into_iter()
            .chain(self.rules.iter().filter_map(|r| r.target()))
    }

    /// Whether any path of this connection (default or rule) points at `block_id`.
    pub fn points_to(&self, block_id: &str) -> bool {
        self.targets().any(|t| t == block_id)
    }
}

/// A (condition group, target) pair attached to a connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    #[serde(alias = "targetBlockId", default)]
    pub target_block_id: String,
    #[serde(alias = "conditionGroup", default)]
    pub condition_group: ConditionGroup,
}

impl Rule {
    pub fn new(id: impl Into<String>, target_block_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            target_block_id: target_block_id.into(),
            condition_group: ConditionGroup::default(),
        }
    }

    pub fn when(mut self, group: ConditionGroup) -> Self {
        self.condition_group = group;
        self
    }

    /// The target, or `None` while the rule still holds the empty placeholder.
    pub fn target(&self) -> Option<&str> {
        if self.target_block_id == EMPTY_TARGET {
            None
        } else {
            Some(&self.target_block_id)
        }
    }
}

/// AND/OR combination of atomic conditions. An empty group always passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionGroup {
    #[serde(alias = "logicalOperator", default)]
    pub logical_operator: LogicalOperator,
    #[serde(default)]
    pub conditions: Vec<ConditionRule>,
}

impl ConditionGroup {
    pub fn all(conditions: Vec<ConditionRule>) -> Self {
        Self {
            logical_operator: LogicalOperator::And,
            conditions,
        }
    }

    pub fn any(conditions: Vec<ConditionRule>) -> Self {
        Self {
            logical_operator: LogicalOperator::Or,
            conditions,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOperator {
    #[default]
    #[serde(alias = "and")]
    And,
    #[serde(alias = "or")]
    Or,
}

/// One atomic condition over the answer of the block being left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionRule {
    pub field: ConditionField,
    pub operator: ConditionOperator,
    pub value: ConditionValue,
}

impl ConditionRule {
    pub fn new(
        field: ConditionField,
        operator: ConditionOperator,
        value: impl Into<ConditionValue>,
    ) -> Self {
        Self {
            field,
            operator,
            value: value.into(),
        }
    }
}

/// What a condition inspects.
///
/// Stored as a plain string: `"answer"`, `"selected"`, `"choice:<value>"`,
/// or the id of an option-bearing source block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConditionField {
    Answer,
    Selected,
    Choice(String),
    Block(String),
}

impl From<String> for ConditionField {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "answer" => ConditionField::Answer,
            "selected" => ConditionField::Selected,
            _ => match raw.strip_prefix("choice:") {
                Some(choice) => ConditionField::Choice(choice.to_string()),
                None => ConditionField::Block(raw),
            },
        }
    }
}

impl From<&str> for ConditionField {
    fn from(raw: &str) -> Self {
        ConditionField::from(raw.to_string())
    }
}

impl From<ConditionField> for String {
    fn from(field: ConditionField) -> Self {
        field.to_string()
    }
}

impl fmt::Display for ConditionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionField::Answer => write!(f, "answer"),
            ConditionField::Selected => write!(f, "selected"),
            ConditionField::Choice(choice) => write!(f, "choice:{}", choice),
            ConditionField::Block(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    Contains,
    GreaterThan,
    LessThan,
}

impl ConditionOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            ConditionOperator::Equals => "==",
            ConditionOperator::NotEquals => "!=",
            ConditionOperator::Contains => "contains",
            ConditionOperator::GreaterThan => ">",
            ConditionOperator::LessThan => "<",
        }
    }
}

/// The literal a condition compares against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl ConditionValue {
    /// Numeric view of the value; text is parsed leniently (surrounding whitespace ignored).
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ConditionValue::Number(n) => Some(*n),
            ConditionValue::Text(s) => s.trim().parse().ok(),
            ConditionValue::Bool(_) => None,
        }
    }

    /// Truthiness used by presence checks.
    pub fn as_flag(&self) -> bool {
        match self {
            ConditionValue::Bool(b) => *b,
            ConditionValue::Number(n) => *n != 0.0,
            ConditionValue::Text(s) => !matches!(s.trim(), "" | "false" | "0" | "no"),
        }
    }
}

impl fmt::Display for ConditionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionValue::Bool(b) => write!(f, "{}", b),
            // Whole numbers print without `.0`, at any magnitude.
            ConditionValue::Number(n) => write!(f, "{}", n),
            ConditionValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for ConditionValue {
    fn from(s: &str) -> Self {
        ConditionValue::Text(s.to_string())
    }
}

impl From<String> for ConditionValue {
    fn from(s: String) -> Self {
        ConditionValue::Text(s)
    }
}

impl From<f64> for ConditionValue {
    fn from(n: f64) -> Self {
        ConditionValue::Number(n)
    }
}

impl From<bool> for ConditionValue {
    fn from(b: bool) -> Self {
        ConditionValue::Bool(b)
    }
}
