use serde::{Deserialize, Serialize};

/// Which code unit a [`ConstraintsSemantics`] document describes.
///
/// All three fields are optional at the decode layer. Whether exactly
/// one of `function`, `method`+`class`, or `module` is present is a
/// semantic check the validator makes, not a structural one, so a
/// document with zero or several of these fields still decodes and
/// gets a precise diagnostic rather than an opaque parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstraintTarget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

impl ConstraintTarget {
    /// `true` iff exactly one of `function`, `method`+`class`, `module`
    /// is present, with `method` and `class` required together.
    pub fn is_well_formed(&self) -> bool {
        let has_function = self.function.is_some();
        let has_method_pair = self.method.is_some() && self.class.is_some();
        let has_dangling_method = self.method.is_some() != self.class.is_some();
        let has_module = self.module.is_some();

        if has_dangling_method {
            return false;
        }
        [has_function, has_method_pair, has_module]
            .into_iter()
            .filter(|present| *present)
            .count()
            == 1
    }
}

/// A single pre/post/invariant condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Constraint {
    pub description: String,
    pub expression: String,
}

/// A pre/post/invariant contract on a function, method, or module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstraintsSemantics {
    pub target: ConstraintTarget,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preconditions: Vec<Constraint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub postconditions: Vec<Constraint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invariants: Vec<Constraint>,
}
