//! Auth types shared across Quill crates.
//!
//! Provides JWT claims and validation, plus the bearer-token identity extractors.

pub mod identity;
pub mod token;
