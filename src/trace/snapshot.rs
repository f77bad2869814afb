use indexmap::IndexMap;

use crate::base::Name;
use crate::document::LiteralValue;

/// One step of a finite trace: the value every observed variable holds
/// at that point. A variable absent from a snapshot reads as falsy,
/// matching [`LiteralValue::as_bool`]'s default for missing data.
pub type Snapshot = IndexMap<Name, LiteralValue>;
