//! Turns raw JSON or YAML bytes into a typed [`crate::document::BsifDocument`].

mod decoder;
mod format;
mod limits;
mod source_map;
mod tree;

pub use decoder::decode;
pub use format::Format;
pub use limits::DecodeLimits;
pub use tree::DecodeValue;
