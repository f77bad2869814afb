use smol_str::SmolStr;

/// An interned name (state, participant, event, or variable identifier).
///
/// Backed by [`SmolStr`] so short identifiers (the common case for BSIF
/// names) are stored inline without a heap allocation, and equality is a
/// cheap byte comparison rather than a pointer chase.
pub type Name = SmolStr;
