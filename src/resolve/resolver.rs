//! The resolver's core algorithm: load a root document, canonicalize
//! and recurse into its `references` section, memoizing by canonical
//! path and detecting cycles via an in-flight stack that lives only for
//! the duration of one `resolve` call.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;

use super::document::ResolvedDocument;
use super::limits::ResolverLimits;
use super::loader::FileLoader;
use crate::base::{FileId, FileTable};
use crate::decode::{decode, DecodeLimits};
use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::validate::{validate, ValidationOptions};

/// Load `root_path` and its transitive `references`, returning the
/// resolved DAG or every diagnostic collected along the way.
///
/// Unlike the decoder, the resolver accumulates diagnostics across the
/// whole graph rather than stopping at the first node that fails; a
/// cycle or a limit breach at one branch does not prevent reporting
/// problems in a sibling branch.
pub fn resolve(
    root_path: &Path,
    loader: &dyn FileLoader,
    decode_limits: &DecodeLimits,
    resolver_limits: &ResolverLimits,
) -> Result<Arc<ResolvedDocument>, Vec<Diagnostic>> {
    let mut ctx = Context {
        loader,
        decode_limits,
        resolver_limits,
        files: FileTable::new(),
        memo: HashMap::new(),
        stack: Vec::new(),
        diagnostics: Vec::new(),
    };

    let canonical_root = match root_path.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            ctx.diagnostics.push(Diagnostic::new(
                DiagnosticCode::MissingRequiredField,
                format!("root document `{}` could not be opened: {e}", root_path.display()),
            ));
            return Err(ctx.diagnostics);
        }
    };

    match ctx.resolve_node(&canonical_root, None, 0) {
        Some(resolved) if !ctx.diagnostics.iter().any(Diagnostic::is_error) => Ok(resolved),
        _ => Err(ctx.diagnostics),
    }
}

struct Context<'a> {
    loader: &'a dyn FileLoader,
    decode_limits: &'a DecodeLimits,
    resolver_limits: &'a ResolverLimits,
    /// Interns each canonicalized path to a small, cheaply-compared
    /// [`FileId`], scoped to this one `resolve()` call: the in-flight
    /// stack and memo table key on it instead of repeatedly comparing
    /// `PathBuf`s.
    files: FileTable,
    memo: HashMap<FileId, Arc<ResolvedDocument>>,
    stack: Vec<FileId>,
    diagnostics: Vec<Diagnostic>,
}

impl Context<'_> {
    /// Resolve one node of the DAG. `root_major` is `None` only on the
    /// very first call (the root document itself establishes it); every
    /// recursive call passes the same value down so every descendant is
    /// compared against the root's major version, not its immediate
    /// parent's.
    fn resolve_node(
        &mut self,
        canonical_path: &Path,
        root_major: Option<u64>,
        depth: usize,
    ) -> Option<Arc<ResolvedDocument>> {
        let file_id = self.files.intern(canonical_path.to_path_buf());

        if let Some(cached) = self.memo.get(&file_id) {
            return Some(cached.clone());
        }

        if self.stack.contains(&file_id) {
            self.diagnostics.push(Diagnostic::new(
                DiagnosticCode::CircularReference,
                format!("reference cycle detected at `{}`", canonical_path.display()),
            ));
            return None;
        }

        if depth > self.resolver_limits.max_depth {
            self.diagnostics.push(Diagnostic::new(
                DiagnosticCode::ResolutionLimit,
                format!(
                    "reference depth exceeds the {}-level limit at `{}`",
                    self.resolver_limits.max_depth,
                    canonical_path.display()
                ),
            ));
            return None;
        }

        let bytes = match self.loader.read(canonical_path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.diagnostics.push(Diagnostic::new(
                    DiagnosticCode::MissingRequiredField,
                    format!("failed to read `{}`: {e}", canonical_path.display()),
                ));
                return None;
            }
        };

        tracing::debug!(path = %canonical_path.display(), depth, "resolving reference");

        let document = match decode(&bytes, Some(canonical_path), self.decode_limits) {
            Ok(doc) => doc,
            Err(diagnostic) => {
                self.diagnostics.push(diagnostic);
                return None;
            }
        };

        let report = validate(&document, ValidationOptions::default());
        self.diagnostics.extend(report.diagnostics);

        let major = document.metadata.major_version();
        let root_major = root_major.or(major);
        if let (Some(root_major), Some(major)) = (root_major, major) {
            if major != root_major {
                self.diagnostics.push(
                    Diagnostic::new(
                        DiagnosticCode::IncompatibleVersion,
                        format!(
                            "`{}` is bsif_version major {major} but the root is major {root_major}",
                            canonical_path.display()
                        ),
                    )
                    .with_path(["metadata", "bsif_version"]),
                );
                return None;
            }
        }

        if document.references.len() > self.resolver_limits.max_fanout {
            self.diagnostics.push(Diagnostic::new(
                DiagnosticCode::ResolutionLimit,
                format!(
                    "`{}` has {} references, exceeding the {}-item fanout limit",
                    canonical_path.display(),
                    document.references.len(),
                    self.resolver_limits.max_fanout
                ),
            ));
            return None;
        }

        self.stack.push(file_id);
        let base_dir = canonical_path.parent().map(Path::to_path_buf).unwrap_or_default();
        let mut references = IndexMap::new();
        let mut all_resolved = true;
        for (name, spec) in &document.references {
            let target = base_dir.join(&spec.path);
            match target.canonicalize() {
                Ok(canonical_target) => match self.resolve_node(&canonical_target, root_major, depth + 1) {
                    Some(child) => {
                        references.insert(name.clone(), child);
                    }
                    None => all_resolved = false,
                },
                Err(_) => {
                    self.diagnostics.push(
                        Diagnostic::new(
                            DiagnosticCode::MissingRequiredField,
                            format!("reference `{name}` path `{}` does not exist", spec.path),
                        )
                        .with_path(["references", name.as_str(), "path"]),
                    );
                    all_resolved = false;
                }
            }
        }
        self.stack.pop();

        if !all_resolved {
            return None;
        }

        let resolved = Arc::new(ResolvedDocument {
            path: canonical_path.to_path_buf(),
            document,
            references,
        });
        self.memo.insert(file_id, resolved.clone());
        Some(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::loader::StdFsLoader;
    use std::fs;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn leaf_doc(name: &str) -> String {
        format!(
            r#"{{"metadata": {{"bsif_version": "1.0.0", "name": "{name}"}}, "semantics": {{"type": "events", "events": {{}}}}}}"#
        )
    }

    #[test]
    fn resolves_a_single_reference() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "leaf.json", &leaf_doc("leaf"));
        let root = format!(
            r#"{{"metadata": {{"bsif_version": "1.0.0", "name": "root"}}, "semantics": {{"type": "events", "events": {{}}}}, "references": {{"leaf": {{"path": "leaf.json"}}}}}}"#
        );
        let root_path = write(dir.path(), "root.json", &root);

        let resolved = resolve(&root_path, &StdFsLoader, &DecodeLimits::default(), &ResolverLimits::default()).unwrap();
        assert!(resolved.get("leaf").is_some());
    }

    #[test]
    fn detects_circular_reference() {
        let dir = tempfile::tempdir().unwrap();
        let a = r#"{"metadata": {"bsif_version": "1.0.0", "name": "a"}, "semantics": {"type": "events", "events": {}}, "references": {"b": {"path": "b.json"}}}"#;
        let b = r#"{"metadata": {"bsif_version": "1.0.0", "name": "b"}, "semantics": {"type": "events", "events": {}}, "references": {"a": {"path": "a.json"}}}"#;
        let a_path = write(dir.path(), "a.json", a);
        write(dir.path(), "b.json", b);

        let err = resolve(&a_path, &StdFsLoader, &DecodeLimits::default(), &ResolverLimits::default()).unwrap_err();
        assert!(err.iter().any(|d| d.code == DiagnosticCode::CircularReference));
    }

    #[test]
    fn detects_incompatible_major_version() {
        let dir = tempfile::tempdir().unwrap();
        let child = r#"{"metadata": {"bsif_version": "2.0.0", "name": "child"}, "semantics": {"type": "events", "events": {}}}"#;
        write(dir.path(), "child.json", child);
        let root = r#"{"metadata": {"bsif_version": "1.0.0", "name": "root"}, "semantics": {"type": "events", "events": {}}, "references": {"child": {"path": "child.json"}}}"#;
        let root_path = write(dir.path(), "root.json", root);

        let err = resolve(&root_path, &StdFsLoader, &DecodeLimits::default(), &ResolverLimits::default()).unwrap_err();
        assert!(err.iter().any(|d| d.code == DiagnosticCode::IncompatibleVersion));
    }

    #[test]
    fn shares_a_diamond_reference_instead_of_reloading() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "shared.json", &leaf_doc("shared"));
        let left = r#"{"metadata": {"bsif_version": "1.0.0", "name": "left"}, "semantics": {"type": "events", "events": {}}, "references": {"shared": {"path": "shared.json"}}}"#;
        let right = r#"{"metadata": {"bsif_version": "1.0.0", "name": "right"}, "semantics": {"type": "events", "events": {}}, "references": {"shared": {"path": "shared.json"}}}"#;
        write(dir.path(), "left.json", left);
        write(dir.path(), "right.json", right);
        let root = r#"{"metadata": {"bsif_version": "1.0.0", "name": "root"}, "semantics": {"type": "events", "events": {}}, "references": {"left": {"path": "left.json"}, "right": {"path": "right.json"}}}"#;
        let root_path = write(dir.path(), "root.json", root);

        let resolved = resolve(&root_path, &StdFsLoader, &DecodeLimits::default(), &ResolverLimits::default()).unwrap();
        let left_shared = resolved.get("left").unwrap().get("shared").unwrap();
        let right_shared = resolved.get("right").unwrap().get("shared").unwrap();
        assert!(Arc::ptr_eq(left_shared, right_shared));
    }

    #[test]
    fn exceeding_depth_limit_fails() {
        let dir = tempfile::tempdir().unwrap();
        // Build a chain a0 -> a1 -> a2 -> a3, and cap max_depth at 1.
        for i in (0..4).rev() {
            let refs = if i < 3 {
                format!(r#", "references": {{"next": {{"path": "a{}.json"}}}}"#, i + 1)
            } else {
                String::new()
            };
            let content = format!(
                r#"{{"metadata": {{"bsif_version": "1.0.0", "name": "a{i}"}}, "semantics": {{"type": "events", "events": {{}}}}{refs}}}"#
            );
            write(dir.path(), &format!("a{i}.json"), &content);
        }
        let root_path = dir.path().join("a0.json");
        let limits = ResolverLimits { max_depth: 1, max_fanout: 32 };
        let err = resolve(&root_path, &StdFsLoader, &DecodeLimits::default(), &limits).unwrap_err();
        assert!(err.iter().any(|d| d.code == DiagnosticCode::ResolutionLimit));
    }
}
