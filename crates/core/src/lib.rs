//! tablegate_core - pure types and functions for the tablegate gateway.
//!
//! Nothing in this crate performs I/O. The HTTP server and the storage
//! backends build on these types.

pub mod expression;
pub mod item;
pub mod paging;
pub mod storage;
pub mod table;
pub mod update;
