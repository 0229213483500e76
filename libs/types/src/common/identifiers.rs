//! # Typed Identifiers for Pool Participants
//!
//! Assets, authorities, and pools are all addressed by opaque 32-byte values on
//! the host ledger. Wrapping each role in its own type keeps a token identity
//! from being passed where an authority or pool key is expected:
//!
//! ```rust
//! use minidex_types::{pool_key, AssetId, AuthorityId};
//!
//! let usdc = AssetId::new([1u8; 32]);
//! let wsol = AssetId::new([2u8; 32]);
//! let creator = AuthorityId::new([9u8; 32]);
//!
//! let key = pool_key(&usdc, &wsol);
//! assert_ne!(key, pool_key(&wsol, &usdc));
//! # let _ = creator;
//! ```
//!
//! All identifier types display and serialize as `0x`-prefixed lowercase hex,
//! and parse from hex with or without the prefix.

use super::errors::ValidationError;
use minidex_config::protocol::POOL_SEED;
use sha3::{Digest, Sha3_256};

/// Byte length of every ledger identifier
pub const IDENTIFIER_LEN: usize = 32;

/// Macro for generating typed 32-byte identifier wrappers
///
/// Each generated type is `Copy`, ordered, hashable, and carries hex
/// parsing, hex display, and serde support as a hex string.
macro_rules! define_identifier {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[repr(transparent)]
        pub struct $name(pub [u8; $crate::IDENTIFIER_LEN]);

        impl $name {
            /// Create a new identifier from raw bytes
            #[inline(always)]
            pub const fn new(inner: [u8; $crate::IDENTIFIER_LEN]) -> Self {
                Self(inner)
            }

            /// Borrow the raw bytes
            #[inline(always)]
            pub const fn inner(&self) -> &[u8; $crate::IDENTIFIER_LEN] {
                &self.0
            }

            /// Extract the raw bytes by value
            #[inline(always)]
            pub const fn into_inner(self) -> [u8; $crate::IDENTIFIER_LEN] {
                self.0
            }

            #[inline(always)]
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            /// Build from a byte slice, rejecting anything but exactly 32 bytes
            pub fn from_slice(bytes: &[u8]) -> Result<Self, ValidationError> {
                let array: [u8; $crate::IDENTIFIER_LEN] =
                    bytes
                        .try_into()
                        .map_err(|_| ValidationError::InvalidLength {
                            expected: $crate::IDENTIFIER_LEN,
                            actual: bytes.len(),
                        })?;
                Ok(Self(array))
            }

            /// Parse from hex, with or without a `0x` prefix
            pub fn from_hex(input: &str) -> Result<Self, ValidationError> {
                let trimmed = input.strip_prefix("0x").unwrap_or(input);
                let bytes = hex::decode(trimmed).map_err(|e| ValidationError::InvalidHex {
                    input: input.to_string(),
                    reason: e.to_string(),
                })?;
                Self::from_slice(&bytes)
            }

            /// `0x`-prefixed lowercase hex
            pub fn to_hex(&self) -> String {
                format!("0x{}", hex::encode(self.0))
            }

            /// True for the all-zero identifier
            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl From<[u8; $crate::IDENTIFIER_LEN]> for $name {
            #[inline(always)]
            fn from(inner: [u8; $crate::IDENTIFIER_LEN]) -> Self {
                Self(inner)
            }
        }

        impl From<$name> for [u8; $crate::IDENTIFIER_LEN] {
            #[inline(always)]
            fn from(wrapper: $name) -> [u8; $crate::IDENTIFIER_LEN] {
                wrapper.0
            }
        }

        impl AsRef<[u8]> for $name {
            #[inline(always)]
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        // Serialized as a hex string so persisted pool records stay readable
        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

define_identifier! {
    /// Identity of one of the two assets traded by a pool (a token mint)
    AssetId
}

define_identifier! {
    /// Identity of the account that created a pool
    AuthorityId
}

define_identifier! {
    /// Deterministic address of a pool, derived from its two assets
    PoolKey
}

/// Derive the address of the pool trading `token_a` against `token_b`
///
/// SHA3-256 over `POOL_SEED ‖ token_a ‖ token_b`. Order matters: the pool for
/// (A, B) and the pool for (B, A) are different pools, mirroring how the host
/// ledger derives pool accounts from an ordered seed list.
pub fn pool_key(token_a: &AssetId, token_b: &AssetId) -> PoolKey {
    let mut hasher = Sha3_256::new();
    hasher.update(POOL_SEED);
    hasher.update(token_a.as_bytes());
    hasher.update(token_b.as_bytes());
    PoolKey(hasher.finalize().into())
}
