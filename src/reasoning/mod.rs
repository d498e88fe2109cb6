//! Reasoning: the bounded forward-chaining closure engine and the opaque
//! adapter (C6) the rest of the crate talks to.

pub mod adapter;
pub mod closure;

pub use adapter::ReasonerAdapter;
