use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::value::{LiteralValue, VariableType};
use crate::base::Name;

/// A node in the LTL formula tree.
///
/// Owned by the containing [`super::temporal::Property`]: no sharing,
/// no back-edges. An arena would pay for itself on very large property
/// sets, but a plain recursive owned tree is sufficient at this scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum LtlFormula {
    Variable { name: Name },
    Literal { value: LiteralValue },
    Not { operand: Box<LtlFormula> },
    And { left: Box<LtlFormula>, right: Box<LtlFormula> },
    Or { left: Box<LtlFormula>, right: Box<LtlFormula> },
    Implies { left: Box<LtlFormula>, right: Box<LtlFormula> },
    Iff { left: Box<LtlFormula>, right: Box<LtlFormula> },
    Next { operand: Box<LtlFormula> },
    Globally { operand: Box<LtlFormula> },
    Finally { operand: Box<LtlFormula> },
    Until { left: Box<LtlFormula>, right: Box<LtlFormula> },
    Release { left: Box<LtlFormula>, right: Box<LtlFormula> },
}

impl LtlFormula {
    /// Every variable name referenced anywhere in this formula, for the
    /// validator's "every LTL `variable` leaf names a declared variable"
    /// check.
    pub fn variable_refs(&self, out: &mut Vec<Name>) {
        match self {
            LtlFormula::Variable { name } => out.push(name.clone()),
            LtlFormula::Literal { .. } => {}
            LtlFormula::Not { operand }
            | LtlFormula::Next { operand }
            | LtlFormula::Globally { operand }
            | LtlFormula::Finally { operand } => operand.variable_refs(out),
            LtlFormula::And { left, right }
            | LtlFormula::Or { left, right }
            | LtlFormula::Implies { left, right }
            | LtlFormula::Iff { left, right }
            | LtlFormula::Until { left, right }
            | LtlFormula::Release { left, right } => {
                left.variable_refs(out);
                right.variable_refs(out);
            }
        }
    }

    /// Variable/literal pairs that appear as the two direct operands of
    /// a binary connective whose declared and literal types disagree
    /// (e.g. `iff(variable x, literal "red")` where `x` is declared
    /// `bool`). Unresolvable variable references are skipped here; the
    /// "unknown variable" check already covers those.
    pub fn type_mismatches<'a>(
        &'a self,
        variables: &IndexMap<Name, VariableType>,
        out: &mut Vec<(&'a Name, &'a LiteralValue)>,
    ) {
        match self {
            LtlFormula::Variable { .. } | LtlFormula::Literal { .. } => {}
            LtlFormula::Not { operand }
            | LtlFormula::Next { operand }
            | LtlFormula::Globally { operand }
            | LtlFormula::Finally { operand } => operand.type_mismatches(variables, out),
            LtlFormula::And { left, right }
            | LtlFormula::Or { left, right }
            | LtlFormula::Implies { left, right }
            | LtlFormula::Iff { left, right }
            | LtlFormula::Until { left, right }
            | LtlFormula::Release { left, right } => {
                check_pair(left, right, variables, out);
                left.type_mismatches(variables, out);
                right.type_mismatches(variables, out);
            }
        }
    }
}

fn check_pair<'a>(
    left: &'a LtlFormula,
    right: &'a LtlFormula,
    variables: &IndexMap<Name, VariableType>,
    out: &mut Vec<(&'a Name, &'a LiteralValue)>,
) {
    let pairs = [(left, right), (right, left)];
    for (var_side, lit_side) in pairs {
        if let (LtlFormula::Variable { name }, LtlFormula::Literal { value }) = (var_side, lit_side) {
            if let Some(declared) = variables.get(name) {
                if !declared.accepts(value) {
                    out.push((name, value));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_variables_across_nesting() {
        let formula = LtlFormula::Globally {
            operand: Box::new(LtlFormula::Implies {
                left: Box::new(LtlFormula::Variable { name: "x".into() }),
                right: Box::new(LtlFormula::Next {
                    operand: Box::new(LtlFormula::Variable { name: "y".into() }),
                }),
            }),
        };
        let mut refs = Vec::new();
        formula.variable_refs(&mut refs);
        assert_eq!(refs, vec![Name::from("x"), Name::from("y")]);
    }

    #[test]
    fn flags_literal_incompatible_with_declared_variable_type() {
        let mut variables = IndexMap::new();
        variables.insert(Name::from("x"), VariableType::Bool);
        let formula = LtlFormula::And {
            left: Box::new(LtlFormula::Variable { name: "x".into() }),
            right: Box::new(LtlFormula::Literal { value: LiteralValue::Int(5) }),
        };
        let mut mismatches = Vec::new();
        formula.type_mismatches(&variables, &mut mismatches);
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].0, &Name::from("x"));
    }

    #[test]
    fn accepts_float_literal_for_int_variable_by_widening() {
        let mut variables = IndexMap::new();
        variables.insert(Name::from("x"), VariableType::Float);
        let formula = LtlFormula::Iff {
            left: Box::new(LtlFormula::Variable { name: "x".into() }),
            right: Box::new(LtlFormula::Literal { value: LiteralValue::Int(1) }),
        };
        let mut mismatches = Vec::new();
        formula.type_mismatches(&variables, &mut mismatches);
        assert!(mismatches.is_empty());
    }
}
