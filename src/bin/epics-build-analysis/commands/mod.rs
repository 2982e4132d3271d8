//! Command implementations

pub mod analyze;
pub mod compare;
pub mod deps;
