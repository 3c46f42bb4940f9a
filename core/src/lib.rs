//! PASETO Keygen Core Library
//!
//! Generates Ed25519 signing keypairs for PASETO v2 `public` tokens and exports
//! them as lowercase hex. The secret key is exported in the standard 64-byte
//! keypair encoding (seed followed by public key) so that downstream signing
//! libraries can load it unchanged.

pub mod crypto;
pub mod export;
pub mod version;

pub use crypto::{KeyPair, PublicKey, SecretKey};
pub use version::version_string;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Secure randomness source unavailable: {0}")]
    RandomnessUnavailable(#[source] rand::Error),

    #[error("Output destination unavailable: {target}")]
    DestinationUnavailable {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid report: {0}")]
    InvalidReport(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}
