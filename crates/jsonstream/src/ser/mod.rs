//! Adapts any `serde::Serialize` type into a [`Value`](crate::Value).
//!
//! Structs become records, sequences and tuples become sequences, and maps
//! become mappings whose integer keys stay index keys, so a map keyed
//! `0, 1, 2` is still written as an array. Enums use the external tagging
//! serde_json uses.

mod value_builder;

pub use value_builder::to_value;
