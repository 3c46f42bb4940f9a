//! Ed25519 key generation for PASETO v2 `public` tokens

use crate::{Error, Result};
use ed25519_dalek::{KEYPAIR_LENGTH, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use std::fmt;
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

/// Ed25519 secret key
///
/// Exported as the standard 64-byte keypair encoding: the 32-byte seed
/// followed by the 32-byte public key derived from it.
#[derive(Clone)]
pub struct SecretKey {
    inner: ed25519_dalek::SigningKey,
}

impl SecretKey {
    /// Generate a new secret key from the operating system's CSPRNG
    pub fn generate() -> Result<Self> {
        Self::generate_with(&mut OsRng)
    }

    /// Generate a new secret key from the given randomness source.
    ///
    /// A source that fails to supply bytes yields
    /// [`Error::RandomnessUnavailable`]; there is no fallback source.
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        let mut seed = Zeroizing::new([0u8; SECRET_KEY_LENGTH]);
        rng.try_fill_bytes(&mut seed[..])
            .map_err(Error::RandomnessUnavailable)?;

        let inner = ed25519_dalek::SigningKey::from_bytes(&seed);
        debug!("Generated Ed25519 secret key");
        Ok(Self { inner })
    }

    /// Load a secret key from its 64-byte keypair encoding.
    ///
    /// The embedded public half must match the one derived from the seed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; KEYPAIR_LENGTH] = bytes.try_into().map_err(|_| {
            Error::InvalidKey(format!(
                "expected {} secret key bytes, got {}",
                KEYPAIR_LENGTH,
                bytes.len()
            ))
        })?;

        let inner = ed25519_dalek::SigningKey::from_keypair_bytes(bytes)
            .map_err(|e| Error::InvalidKey(format!("Inconsistent keypair encoding: {}", e)))?;
        Ok(Self { inner })
    }

    /// Load a secret key from the hex rendering of its 64-byte encoding
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = Zeroizing::new(
            hex::decode(s).map_err(|e| Error::InvalidKey(format!("Invalid hex: {}", e)))?,
        );
        Self::from_bytes(&bytes)
    }

    /// Get the 64-byte keypair encoding (seed || public key)
    pub fn to_bytes(&self) -> [u8; KEYPAIR_LENGTH] {
        self.inner.to_keypair_bytes()
    }

    /// Get the 32-byte seed only
    pub fn seed(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.inner.to_bytes()
    }

    /// Lowercase hex of the 64-byte encoding, wiped on drop
    pub fn to_hex(&self) -> Zeroizing<String> {
        let mut bytes = self.to_bytes();
        let hex = Zeroizing::new(hex::encode(bytes));
        bytes.zeroize();
        hex
    }

    /// Derive the public key
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: self.inner.verifying_key(),
        }
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(public: {})", self.public_key())
    }
}

/// Ed25519 public key
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    inner: ed25519_dalek::VerifyingKey,
}

impl PublicKey {
    /// Create public key from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|_| {
            Error::InvalidKey(format!(
                "expected {} public key bytes, got {}",
                PUBLIC_KEY_LENGTH,
                bytes.len()
            ))
        })?;

        let inner = ed25519_dalek::VerifyingKey::from_bytes(bytes)
            .map_err(|e| Error::InvalidKey(format!("Invalid public key: {}", e)))?;
        Ok(Self { inner })
    }

    /// Create public key from lowercase or uppercase hex
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| Error::InvalidKey(format!("Invalid hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Get the public key bytes
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.inner.to_bytes()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// A secret key together with the public key derived from it
#[derive(Clone, Debug)]
pub struct KeyPair {
    secret: SecretKey,
    public: PublicKey,
}

impl KeyPair {
    /// Generate a new random keypair
    pub fn generate() -> Result<Self> {
        SecretKey::generate().map(Self::from_secret)
    }

    pub fn from_secret(secret: SecretKey) -> Self {
        let public = secret.public_key();
        Self { secret, public }
    }

    pub fn secret(&self) -> &SecretKey {
        &self.secret
    }

    pub fn public(&self) -> &PublicKey {
        &self.public
    }
}
