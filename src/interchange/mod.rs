//! Interchange surfaces gated behind the `interchange` feature: a
//! canonical-form JSON renderer for diffing and signing documents, a
//! JSON Schema export for third-party tooling, and the discriminator
//! re-export the formal-methods mappers round-trip against.

mod canonical;
mod projection;
mod schema;

pub use canonical::to_canonical_json;
pub use projection::SemanticsKind;
pub use schema::json_schema;
