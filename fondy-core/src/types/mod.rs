//! Core types used across the Fondy Kit.

mod common;
mod field;

pub use common::*;
pub use field::*;
