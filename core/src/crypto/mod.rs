//! Cryptographic primitives module
//!
//! This module provides:
//! - Ed25519 secret key generation from the OS CSPRNG
//! - Public key derivation
//! - Parsing of previously exported key material

pub mod signing;

pub use signing::{KeyPair, PublicKey, SecretKey};
