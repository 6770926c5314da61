use serde::{Deserialize, Serialize};

/// One question or step of a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    pub subtype: BlockSubtype,
    /// Default sequential position. Once connections exist they decide navigation instead.
    #[serde(alias = "orderIndex", default)]
    pub order_index: i64,
    #[serde(default)]
    pub settings: BlockSettings,
}

impl Block {
    pub fn new(id: impl Into<String>, subtype: BlockSubtype, order_index: i64) -> Self {
        Self {
            id: id.into(),
            subtype,
            order_index,
            settings: BlockSettings::default(),
        }
    }

    /// Attaches an option list, as used by choice, dropdown and checkbox blocks.
    pub fn with_options(mut self, options: Vec<BlockOption>) -> Self {
        self.settings.options = options;
        self
    }

    /// Looks up one of this block's options by identifier.
    pub fn option(&self, option_id: &str) -> Option<&BlockOption> {
        self.settings.options.iter().find(|o| o.id == option_id)
    }
}

/// The closed set of block subtypes the engine distinguishes.
///
/// Condition evaluation matches on this tag; subtypes the engine does not know
/// about deserialize into `Unknown` and are treated like free-text blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockSubtype {
    ShortText,
    LongText,
    Email,
    Number,
    Date,
    Rating,
    #[serde(alias = "single_choice", alias = "radio")]
    MultipleChoice,
    #[serde(alias = "select")]
    Dropdown,
    #[serde(alias = "checkbox", alias = "checkboxes")]
    CheckboxGroup,
    #[serde(alias = "dynamic-ai", alias = "ai_dynamic")]
    DynamicAi,
    Statement,
    #[serde(other)]
    Unknown,
}

impl BlockSubtype {
    /// Single-select blocks whose answer is one option identifier.
    pub fn is_single_select(self) -> bool {
        matches!(self, BlockSubtype::MultipleChoice | BlockSubtype::Dropdown)
    }

    /// Blocks that carry an option list in their settings.
    pub fn has_options(self) -> bool {
        self.is_single_select() || self == BlockSubtype::CheckboxGroup
    }
}

/// Subtype-specific settings. Only the option list matters to the engine;
/// everything else is carried through untouched for the rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockSettings {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<BlockOption>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A selectable option of a choice, dropdown or checkbox block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockOption {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub value: String,
}

impl BlockOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            id: id.into(),
            value: label.to_lowercase(),
            label,
        }
    }
}

/// Canvas coordinates of a block, produced by auto-layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Returns block indices sorted by `order_index`, ties kept in slice order.
pub fn sequential_order(blocks: &[Block]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..blocks.len()).collect();
    order.sort_by_key(|&i| blocks[i].order_index);
    order
}

/// Finds the slice index of a block by id.
pub fn index_of(blocks: &[Block], block_id: &str) -> Option<usize> {
    blocks.iter().position(|b| b.id == block_id)
}
