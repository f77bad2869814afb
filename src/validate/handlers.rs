use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::document::EventsSemantics;

/// Each handler's `event` must name a declared event in the same document.
pub fn check_handlers(events: &EventsSemantics, prefix: &[String], out: &mut Vec<Diagnostic>) {
    for (idx, handler) in events.handlers.iter().enumerate() {
        if !events.has_event(&handler.event) {
            out.push(
                Diagnostic::new(
                    DiagnosticCode::UnknownEvent,
                    format!("handler references undeclared event `{}`", handler.event),
                )
                .with_path(prefix.iter().cloned().chain([
                    "handlers".to_string(),
                    idx.to_string(),
                    "event".to_string(),
                ])),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{EventDeclaration, Handler};
    use indexmap::IndexMap;

    #[test]
    fn flags_undeclared_event() {
        let mut events = IndexMap::new();
        events.insert("go".into(), EventDeclaration::default());
        let es = EventsSemantics {
            events,
            handlers: vec![Handler { event: "stop".into(), action: "a".into(), guard: None }],
            types: None,
        };
        let mut out = Vec::new();
        check_handlers(&es, &["semantics".to_string()], &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].code, DiagnosticCode::UnknownEvent);
    }

    #[test]
    fn accepts_declared_event() {
        let mut events = IndexMap::new();
        events.insert("go".into(), EventDeclaration::default());
        let es = EventsSemantics {
            events,
            handlers: vec![Handler { event: "go".into(), action: "a".into(), guard: None }],
            types: None,
        };
        let mut out = Vec::new();
        check_handlers(&es, &["semantics".to_string()], &mut out);
        assert!(out.is_empty());
    }
}
