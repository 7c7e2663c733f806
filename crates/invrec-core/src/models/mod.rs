//! Data models shared by extraction and reconciliation.

pub mod config;
pub mod document;
pub mod extracted;
