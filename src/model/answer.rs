use serde::{Deserialize, Serialize};
use std::fmt;

/// A respondent's answer to one block, as handed over by the question renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Bool(bool),
    Number(f64),
    Text(String),
    /// Selected option identifiers of a checkbox group.
    List(Vec<String>),
    Object(serde_json::Map<String, serde_json::Value>),
}

impl Answer {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Answer::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the answer; text is parsed leniently.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Answer::Number(n) => Some(*n),
            Answer::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Whether the respondent actually provided something.
    pub fn is_present(&self) -> bool {
        match self {
            Answer::Bool(b) => *b,
            Answer::Number(_) => true,
            Answer::Text(s) => !s.trim().is_empty(),
            Answer::List(items) => !items.is_empty(),
            Answer::Object(map) => !map.is_empty(),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Bool(b) => write!(f, "{}", b),
            // Whole numbers print without `.0`, at any magnitude.
            Answer::Number(n) => write!(f, "{}", n),
            Answer::Text(s) => write!(f, "{}", s),
            Answer::List(items) => write!(f, "[{}]", items.join(", ")),
            Answer::Object(map) => write!(f, "{}", serde_json::Value::Object(map.clone())),
        }
    }
}

impl From<&str> for Answer {
    fn from(s: &str) -> Self {
        Answer::Text(s.to_string())
    }
}

impl From<String> for Answer {
    fn from(s: String) -> Self {
        Answer::Text(s)
    }
}

impl From<f64> for Answer {
    fn from(n: f64) -> Self {
        Answer::Number(n)
    }
}

impl From<bool> for Answer {
    fn from(b: bool) -> Self {
        Answer::Bool(b)
    }
}

impl From<Vec<&str>> for Answer {
    fn from(items: Vec<&str>) -> Self {
        Answer::List(items.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_deserialize_by_shape() {
        let answers: Vec<Answer> =
            serde_json::from_str(r#"[true, 4, "hi", ["o1", "o2"], {"street": "Main"}]"#).unwrap();
        assert_eq!(answers[0], Answer::Bool(true));
        assert_eq!(answers[1], Answer::Number(4.0));
        assert_eq!(answers[2], Answer::Text("hi".to_string()));
        assert_eq!(answers[3], Answer::from(vec!["o1", "o2"]));
        assert!(matches!(answers[4], Answer::Object(_)));
    }

    #[test]
    fn display_is_compact() {
        assert_eq!(Answer::Number(42.0).to_string(), "42");
        assert_eq!(Answer::from(vec!["a", "b"]).to_string(), "[a, b]");
    }

    #[test]
    fn display_keeps_huge_whole_numbers_exact() {
        assert_eq!(Answer::Number(1e19).to_string(), "10000000000000000000");
        assert_eq!(Answer::Number(-2.5).to_string(), "-2.5");
    }
}
