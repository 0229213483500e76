//! # MiniDEX Types
//!
//! Shared identifier types for the MiniDEX pool engine and its hosts.
//!
//! - **Typed identities**: [`AssetId`], [`AuthorityId`], and [`PoolKey`] wrap
//!   32-byte ledger identities so roles cannot be mixed up at compile time
//! - **Pool addressing**: [`pool_key`] derives a pool's address from its two
//!   assets as a pure function, independent of any ledger account model
//! - **Validation**: malformed identifiers surface as [`ValidationError`]

pub mod common;

pub use common::errors::ValidationError;
pub use common::identifiers::{pool_key, AssetId, AuthorityId, PoolKey, IDENTIFIER_LEN};
