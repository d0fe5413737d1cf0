//! Command implementations

pub mod apply;
pub mod common;
pub mod sanitize;
pub mod status;
