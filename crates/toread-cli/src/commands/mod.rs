//! Command implementations

pub mod add;
pub mod classify;
pub mod config;
pub mod list;
pub mod remove;
pub mod summary;
pub mod tags;
