//! Common types and utilities shared across the package and editing layers.

pub mod unit;
pub mod xml;

pub use unit::Emu;
