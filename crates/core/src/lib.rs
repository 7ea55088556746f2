//! `permgate-core` — primitives shared by the permission expression engine.
//!
//! This crate contains **pure** value types (no I/O, no global state).

pub mod error;
pub mod permission;

pub use error::{ExprResult, SyntaxError};
pub use permission::{Permission, WILDCARD, is_wildcard, parse_literal};
