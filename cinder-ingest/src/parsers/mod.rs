//! Source-format parsers.

pub mod roster_json;
