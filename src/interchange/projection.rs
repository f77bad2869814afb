//! The formal-methods projection boundary.
//!
//! The TLA+, SCXML, and SMT-LIB mappers are external collaborators; the
//! only obligation this core places on them is round-tripping the
//! six-way `semantics.type` discriminator, which is exactly
//! [`crate::document::SemanticsKind`] — re-exported here under the
//! `interchange` feature rather than duplicated, since it is the same
//! value the decoder and validator already use.

pub use crate::document::SemanticsKind;
