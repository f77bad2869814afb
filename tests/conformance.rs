//! Fixture-driven conformance sweep: every document under
//! `tests/fixtures/valid` decodes and validates clean; every document
//! under `tests/fixtures/invalid` either fails to decode or decodes but
//! fails validation. `spec.md` §8 requires at least 15 of each.

use std::path::{Path, PathBuf};

use bsif_core::decode::{decode, DecodeLimits};
use bsif_core::validate::{validate, ValidationOptions};
use once_cell::sync::Lazy;
use rstest::rstest;

static VALID_FIXTURES: Lazy<Vec<PathBuf>> = Lazy::new(|| collect_fixtures("tests/fixtures/valid"));
static INVALID_FIXTURES: Lazy<Vec<PathBuf>> = Lazy::new(|| collect_fixtures("tests/fixtures/invalid"));

fn collect_fixtures(dir: &str) -> Vec<PathBuf> {
    walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect()
}

#[test]
fn conformance_corpus_meets_the_minimum_fixture_count() {
    assert!(
        VALID_FIXTURES.len() >= 15,
        "expected at least 15 valid fixtures, found {}",
        VALID_FIXTURES.len()
    );
    assert!(
        INVALID_FIXTURES.len() >= 15,
        "expected at least 15 invalid fixtures, found {}",
        INVALID_FIXTURES.len()
    );
}

#[rstest]
#[files("tests/fixtures/valid/*")]
fn valid_fixture_decodes_and_validates_clean(path: PathBuf) {
    let bytes = std::fs::read(&path).unwrap_or_else(|e| panic!("could not read {}: {e}", path.display()));
    let doc = decode(&bytes, Some(path.as_path()), &DecodeLimits::default())
        .unwrap_or_else(|d| panic!("{} failed to decode: {}", path.display(), d.message));
    let report = validate(&doc, ValidationOptions::default());
    assert!(
        report.valid(),
        "{} validated with errors: {:?}",
        path.display(),
        report.errors().collect::<Vec<_>>()
    );
}

#[rstest]
#[files("tests/fixtures/invalid/*")]
fn invalid_fixture_is_rejected_by_decode_or_validate(path: PathBuf) {
    match decode_fixture(&path) {
        Err(_) => {}
        Ok(doc) => {
            let report = validate(&doc, ValidationOptions::default());
            assert!(!report.valid(), "{} unexpectedly decoded and validated clean", path.display());
        }
    }
}

fn decode_fixture(path: &Path) -> Result<bsif_core::BsifDocument, bsif_core::Diagnostic> {
    let bytes = std::fs::read(path).unwrap_or_else(|e| panic!("could not read {}: {e}", path.display()));
    decode(&bytes, Some(path), &DecodeLimits::default())
}
