//! Parameterized statements
//!
//! Each command runs exactly one statement on a connection the caller has
//! already placed inside a transaction. Faults are returned untouched; the
//! repositories classify them.

pub(crate) mod delete;
pub(crate) mod insert;
pub(crate) mod list;
pub(crate) mod search;
