//! Draft 2020-12 JSON Schema export for the document model.
//!
//! External tooling (editors, linters, registries) wants a schema it can
//! hand to an off-the-shelf validator rather than link against this
//! crate; this module is the one place that schema is assembled, built
//! directly as `serde_json::json!` trees rather than from a template
//! string so the `$defs` table stays easy to diff against the typed
//! model it mirrors.

use serde_json::{json, Value};

/// The full document schema, keyed under `$defs` by type name.
pub fn json_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "https://bsif.dev/schema/document.json",
        "title": "BsifDocument",
        "type": "object",
        "required": ["metadata", "semantics"],
        "additionalProperties": false,
        "properties": {
            "metadata": { "$ref": "#/$defs/metadata" },
            "semantics": { "$ref": "#/$defs/semantics" },
            "references": {
                "type": "object",
                "additionalProperties": { "$ref": "#/$defs/referenceSpec" }
            }
        },
        "$defs": defs()
    })
}

fn defs() -> Value {
    json!({
        "metadata": {
            "type": "object",
            "required": ["bsif_version", "name"],
            "additionalProperties": false,
            "properties": {
                "bsif_version": { "type": "string", "pattern": "^[0-9]+\\.[0-9]+\\.[0-9]+$" },
                "name": { "type": "string" },
                "version": { "type": "string" },
                "description": { "type": "string" },
                "authors": { "type": "array", "items": { "type": "string" } },
                "tags": { "type": "array", "items": { "type": "string" } }
            }
        },
        "referenceSpec": {
            "type": "object",
            "required": ["path"],
            "additionalProperties": false,
            "properties": {
                "path": { "type": "string" },
                "version": { "type": "string" }
            }
        },
        "semantics": {
            "oneOf": [
                { "$ref": "#/$defs/stateMachine" },
                { "$ref": "#/$defs/temporal" },
                { "$ref": "#/$defs/constraints" },
                { "$ref": "#/$defs/events" },
                { "$ref": "#/$defs/interaction" },
                { "$ref": "#/$defs/hybrid" }
            ]
        },
        "nonHybridSemantics": {
            "oneOf": [
                { "$ref": "#/$defs/stateMachine" },
                { "$ref": "#/$defs/temporal" },
                { "$ref": "#/$defs/constraints" },
                { "$ref": "#/$defs/events" },
                { "$ref": "#/$defs/interaction" }
            ]
        },
        "stateMachine": {
            "type": "object",
            "required": ["type", "states", "transitions", "initial"],
            "additionalProperties": false,
            "properties": {
                "type": { "const": "state-machine" },
                "states": { "type": "array", "items": { "$ref": "#/$defs/state" } },
                "transitions": { "type": "array", "items": { "$ref": "#/$defs/transition" } },
                "initial": { "type": "string" },
                "final": { "type": "array", "items": { "type": "string" } }
            }
        },
        "state": {
            "type": "object",
            "required": ["name"],
            "additionalProperties": false,
            "properties": {
                "name": { "type": "string" },
                "parent": { "type": "string" },
                "parallel": { "type": "boolean" },
                "entry": { "type": "string" },
                "exit": { "type": "string" }
            }
        },
        "transition": {
            "type": "object",
            "required": ["from", "to"],
            "additionalProperties": false,
            "properties": {
                "from": { "type": "string" },
                "to": { "type": "string" },
                "event": { "type": "string" },
                "guard": { "type": "string" },
                "action": { "type": "string" }
            }
        },
        "temporal": {
            "type": "object",
            "required": ["type", "logic", "variables", "properties"],
            "additionalProperties": false,
            "properties": {
                "type": { "const": "temporal" },
                "logic": { "type": "string" },
                "variables": {
                    "type": "object",
                    "additionalProperties": { "$ref": "#/$defs/variableType" }
                },
                "properties": { "type": "array", "items": { "$ref": "#/$defs/property" } }
            }
        },
        "variableType": { "enum": ["bool", "int", "float", "string"] },
        "property": {
            "type": "object",
            "required": ["name", "formula"],
            "additionalProperties": false,
            "properties": {
                "name": { "type": "string" },
                "formula": { "$ref": "#/$defs/ltlFormula" }
            }
        },
        "ltlFormula": {
            "type": "object",
            "required": ["op"],
            "properties": {
                "op": {
                    "enum": [
                        "variable", "literal", "not", "and", "or", "implies",
                        "iff", "next", "globally", "finally", "until", "release"
                    ]
                },
                "name": { "type": "string" },
                "value": {},
                "operand": { "$ref": "#/$defs/ltlFormula" },
                "left": { "$ref": "#/$defs/ltlFormula" },
                "right": { "$ref": "#/$defs/ltlFormula" }
            }
        },
        "constraints": {
            "type": "object",
            "required": ["type", "target"],
            "additionalProperties": false,
            "properties": {
                "type": { "const": "constraints" },
                "target": { "$ref": "#/$defs/constraintTarget" },
                "preconditions": { "type": "array", "items": { "$ref": "#/$defs/constraint" } },
                "postconditions": { "type": "array", "items": { "$ref": "#/$defs/constraint" } },
                "invariants": { "type": "array", "items": { "$ref": "#/$defs/constraint" } }
            }
        },
        "constraintTarget": {
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "function": { "type": "string" },
                "method": { "type": "string" },
                "class": { "type": "string" },
                "module": { "type": "string" }
            }
        },
        "constraint": {
            "type": "object",
            "required": ["description", "expression"],
            "additionalProperties": false,
            "properties": {
                "description": { "type": "string" },
                "expression": { "type": "string" }
            }
        },
        "events": {
            "type": "object",
            "required": ["type", "events"],
            "additionalProperties": false,
            "properties": {
                "type": { "const": "events" },
                "events": {
                    "type": "object",
                    "additionalProperties": { "$ref": "#/$defs/eventDeclaration" }
                },
                "handlers": { "type": "array", "items": { "$ref": "#/$defs/handler" } },
                "types": { "type": "object" }
            }
        },
        "eventDeclaration": {
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "payload_type": { "type": "string" }
            }
        },
        "handler": {
            "type": "object",
            "required": ["event", "action"],
            "additionalProperties": false,
            "properties": {
                "event": { "type": "string" },
                "action": { "type": "string" },
                "guard": { "type": "string" }
            }
        },
        "interaction": {
            "type": "object",
            "required": ["type", "participants", "messages"],
            "additionalProperties": false,
            "properties": {
                "type": { "const": "interaction" },
                "participants": { "type": "array", "items": { "type": "string" } },
                "messages": { "type": "array", "items": { "$ref": "#/$defs/message" } }
            }
        },
        "message": {
            "type": "object",
            "required": ["from", "to", "message"],
            "additionalProperties": false,
            "properties": {
                "from": { "type": "string" },
                "to": { "type": "string" },
                "message": { "type": "string" },
                "condition": { "type": "string" }
            }
        },
        "hybrid": {
            "type": "object",
            "required": ["type", "members"],
            "additionalProperties": false,
            "properties": {
                "type": { "const": "hybrid" },
                "members": { "type": "array", "items": { "$ref": "#/$defs/nonHybridSemantics" } }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_a_well_formed_draft_2020_12_document() {
        let schema = json_schema();
        assert_eq!(schema["$schema"], "https://json-schema.org/draft/2020-12/schema");
        assert!(schema["$defs"]["stateMachine"].is_object());
    }

    #[test]
    fn every_semantics_variant_has_a_def() {
        let schema = json_schema();
        for kind in ["stateMachine", "temporal", "constraints", "events", "interaction", "hybrid"] {
            assert!(schema["$defs"][kind].is_object(), "missing def for {kind}");
        }
    }

    #[test]
    fn ltl_formula_def_lists_all_twelve_operators() {
        let schema = json_schema();
        let ops = schema["$defs"]["ltlFormula"]["properties"]["op"]["enum"].as_array().unwrap();
        assert_eq!(ops.len(), 12);
    }
}
