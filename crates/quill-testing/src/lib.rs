//! Test utilities for Quill services.
//!
//! Provides `MockAuth` for minting bearer tokens in router tests.
//! Import in `#[cfg(test)]` blocks and `tests/` only; never in production code.

pub mod auth;
