//! Input schema for Mindflux
//!
//! Defines the `RawInput` record collected by the wellness form, its form
//! defaults and the value ranges each field is allowed to take.

pub mod raw_input;

pub use raw_input::{FieldRange, RawInput, ValidationError, FIELD_RANGES, SCHEMA_VERSION};
