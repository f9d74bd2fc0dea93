//! Encoding and unit helpers shared by the readers.

pub mod encoding;
pub mod unit;
