//! Cinder: prepared statements for embedded SQL engines.
//!
//! Compile SQL once with [`Connection::prepare`], bind parameters by position or by name, execute
//! it as many times as needed and close it. Engines plug in by implementing [`Driver`].
pub use cinder_core::*;
