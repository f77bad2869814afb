use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::ltl::LtlFormula;
use super::value::VariableType;
use crate::base::Name;

/// A named temporal property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Property {
    pub name: String,
    pub formula: LtlFormula,
}

/// A temporal-logic trace property document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemporalSemantics {
    pub logic: String,
    pub variables: IndexMap<Name, VariableType>,
    pub properties: Vec<Property>,
}

impl TemporalSemantics {
    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }
}
