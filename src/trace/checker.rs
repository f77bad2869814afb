//! Finite-trace LTL evaluation.
//!
//! Each sub-formula's truth value at each trace index is memoized by
//! `(node identity, index)`, so a formula with repeated sub-structure
//! (or a long trace) still evaluates in time linear in
//! `|formula| * |trace|` rather than recomputing shared work. The
//! formula tree has no arena index of its own (it is a plain owned
//! tree, so the node's address stands in for one:
//! valid for the lifetime of a single `check_trace` call, which is the
//! only place the cache is read.

use std::collections::HashMap;

use crate::document::{LiteralValue, LtlFormula};

use super::outcome::TraceOutcome;
use super::snapshot::Snapshot;

/// Evaluate `formula` against `trace`, returning whether it holds at
/// index 0 and, on failure, the smallest index at which the shallowest
/// violated sub-formula fails.
pub fn check_trace(formula: &LtlFormula, trace: &[Snapshot]) -> TraceOutcome {
    if trace.is_empty() {
        // There is no index 0 to evaluate at; every formula holds
        // vacuously on the empty trace.
        return TraceOutcome::holding();
    }
    let mut evaluator = Evaluator { trace, memo: HashMap::new() };
    let (holds, witness) = evaluator.eval(formula, 0);
    if holds {
        TraceOutcome::holding()
    } else {
        TraceOutcome::violated(witness.unwrap_or(0))
    }
}

struct Evaluator<'a> {
    trace: &'a [Snapshot],
    memo: HashMap<(usize, usize), (bool, Option<usize>)>,
}

impl Evaluator<'_> {
    fn eval(&mut self, formula: &LtlFormula, i: usize) -> (bool, Option<usize>) {
        let key = (formula as *const LtlFormula as usize, i);
        if let Some(cached) = self.memo.get(&key) {
            return *cached;
        }
        let result = self.eval_uncached(formula, i);
        self.memo.insert(key, result);
        result
    }

    fn eval_uncached(&mut self, formula: &LtlFormula, i: usize) -> (bool, Option<usize>) {
        let n = self.trace.len();
        match formula {
            LtlFormula::Variable { name } => {
                let holds = self.trace[i].get(name).map(LiteralValue::as_bool).unwrap_or(false);
                with_witness(holds, i)
            }
            LtlFormula::Literal { value } => with_witness(value.as_bool(), i),
            LtlFormula::Not { operand } => {
                let (holds, _) = self.eval(operand, i);
                with_witness(!holds, i)
            }
            LtlFormula::And { left, right } => {
                let (lh, lw) = self.eval(left, i);
                let (rh, rw) = self.eval(right, i);
                let holds = lh && rh;
                (holds, if holds { None } else { lw.or(rw).or(Some(i)) })
            }
            LtlFormula::Or { left, right } => {
                let (lh, lw) = self.eval(left, i);
                let (rh, rw) = self.eval(right, i);
                let holds = lh || rh;
                (holds, if holds { None } else { lw.or(rw).or(Some(i)) })
            }
            LtlFormula::Implies { left, right } => {
                let (lh, _) = self.eval(left, i);
                if !lh {
                    return (true, None);
                }
                let (rh, rw) = self.eval(right, i);
                (rh, if rh { None } else { rw.or(Some(i)) })
            }
            LtlFormula::Iff { left, right } => {
                let (lh, _) = self.eval(left, i);
                let (rh, _) = self.eval(right, i);
                with_witness(lh == rh, i)
            }
            LtlFormula::Next { operand } => {
                if i + 1 >= n {
                    // Strict interpretation: X is false at the last index.
                    (false, Some(i))
                } else {
                    let (holds, witness) = self.eval(operand, i + 1);
                    (holds, if holds { None } else { witness.or(Some(i + 1)) })
                }
            }
            LtlFormula::Globally { operand } => {
                for j in i..n {
                    let (holds, witness) = self.eval(operand, j);
                    if !holds {
                        return (false, witness.or(Some(j)));
                    }
                }
                (true, None)
            }
            LtlFormula::Finally { operand } => {
                for j in i..n {
                    let (holds, _) = self.eval(operand, j);
                    if holds {
                        return (true, None);
                    }
                }
                (false, Some(i))
            }
            LtlFormula::Until { left, right } => {
                for k in i..n {
                    let (psi_holds, _) = self.eval(right, k);
                    if psi_holds {
                        for j in i..k {
                            let (phi_holds, phi_witness) = self.eval(left, j);
                            if !phi_holds {
                                return (false, phi_witness.or(Some(j)));
                            }
                        }
                        return (true, None);
                    }
                }
                (false, Some(i))
            }
            LtlFormula::Release { left, right } => {
                for k in i..n {
                    let (psi_holds, psi_witness) = self.eval(right, k);
                    if !psi_holds {
                        return (false, psi_witness.or(Some(k)));
                    }
                    let (phi_holds, _) = self.eval(left, k);
                    if phi_holds {
                        return (true, None);
                    }
                }
                (true, None)
            }
        }
    }
}

fn with_witness(holds: bool, i: usize) -> (bool, Option<usize>) {
    (holds, if holds { None } else { Some(i) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn snapshot(x: bool) -> Snapshot {
        let mut map = IndexMap::new();
        map.insert("x".into(), LiteralValue::Bool(x));
        map
    }

    fn var(name: &str) -> LtlFormula {
        LtlFormula::Variable { name: name.into() }
    }

    #[test]
    fn globally_holds_when_every_step_is_true() {
        let formula = LtlFormula::Globally { operand: Box::new(var("x")) };
        let trace = vec![snapshot(true), snapshot(true), snapshot(true)];
        let outcome = check_trace(&formula, &trace);
        assert!(outcome.holds);
    }

    #[test]
    fn globally_fails_at_the_first_false_step() {
        let formula = LtlFormula::Globally { operand: Box::new(var("x")) };
        let trace = vec![snapshot(true), snapshot(false), snapshot(true)];
        let outcome = check_trace(&formula, &trace);
        assert!(!outcome.holds);
        assert_eq!(outcome.witness, Some(1));
    }

    #[test]
    fn classical_subsumption_g_equals_not_f_not() {
        for trace in [
            vec![snapshot(true), snapshot(true), snapshot(true)],
            vec![snapshot(true), snapshot(false), snapshot(true)],
            vec![snapshot(false), snapshot(false), snapshot(false)],
        ] {
            let g = LtlFormula::Globally { operand: Box::new(var("x")) };
            let not_f_not = LtlFormula::Not {
                operand: Box::new(LtlFormula::Finally {
                    operand: Box::new(LtlFormula::Not { operand: Box::new(var("x")) }),
                }),
            };
            assert_eq!(check_trace(&g, &trace).holds, check_trace(&not_f_not, &trace).holds);
        }
    }

    #[test]
    fn next_is_false_at_the_last_index_strict_semantics() {
        let formula = LtlFormula::Next { operand: Box::new(var("x")) };
        let trace = vec![snapshot(true)];
        let outcome = check_trace(&formula, &trace);
        assert!(!outcome.holds);
    }

    #[test]
    fn until_holds_when_psi_eventually_holds_with_phi_before_it() {
        let mut phi_then_psi = Vec::new();
        for v in [true, true, false] {
            phi_then_psi.push(snapshot(v));
        }
        // x U (not x): x holds at 0,1 then becomes false at 2; "not x"
        // (psi) becomes true exactly when x (phi) stops holding.
        let formula = LtlFormula::Until {
            left: Box::new(var("x")),
            right: Box::new(LtlFormula::Not { operand: Box::new(var("x")) }),
        };
        let outcome = check_trace(&formula, &phi_then_psi);
        assert!(outcome.holds);
    }

    #[test]
    fn until_fails_when_psi_never_holds() {
        let trace = vec![snapshot(true), snapshot(true)];
        let formula = LtlFormula::Until {
            left: Box::new(var("x")),
            right: Box::new(LtlFormula::Not { operand: Box::new(var("x")) }),
        };
        let outcome = check_trace(&formula, &trace);
        assert!(!outcome.holds);
    }

    #[test]
    fn release_holds_when_psi_holds_forever() {
        let trace = vec![snapshot(true), snapshot(true)];
        let formula = LtlFormula::Release { left: Box::new(var("missing")), right: Box::new(var("x")) };
        let outcome = check_trace(&formula, &trace);
        assert!(outcome.holds);
    }

    #[test]
    fn empty_trace_vacuously_holds() {
        let formula = LtlFormula::Globally { operand: Box::new(var("x")) };
        let outcome = check_trace(&formula, &[]);
        assert!(outcome.holds);
    }
}
