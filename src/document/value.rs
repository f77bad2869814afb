use serde::{Deserialize, Serialize};

/// The declared type of a temporal variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    Bool,
    Int,
    Float,
    String,
}

impl VariableType {
    /// Whether a literal's runtime shape is compatible with this
    /// declared type.
    pub fn accepts(self, value: &LiteralValue) -> bool {
        matches!(
            (self, value),
            (VariableType::Bool, LiteralValue::Bool(_))
                | (VariableType::Int, LiteralValue::Int(_))
                | (VariableType::Float, LiteralValue::Float(_))
                | (VariableType::Float, LiteralValue::Int(_))
                | (VariableType::String, LiteralValue::String(_))
        )
    }
}

/// A typed scalar literal, used both in the LTL formula AST and in trace
/// snapshots fed to the checker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl LiteralValue {
    /// Coerce to boolean in a propositional context: a variable read at
    /// a trace index is truthy by the same rules most scripting
    /// languages use for non-boolean values.
    pub fn as_bool(&self) -> bool {
        match self {
            LiteralValue::Bool(b) => *b,
            LiteralValue::Int(i) => *i != 0,
            LiteralValue::Float(f) => *f != 0.0,
            LiteralValue::String(s) => !s.is_empty(),
        }
    }
}
