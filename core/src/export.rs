//! Hex export of generated keypairs
//!
//! The text report is exactly two lines:
//!
//! ```text
//! Public: <64 lowercase hex characters>
//! Private: <128 lowercase hex characters>
//! ```
//!
//! The report is rendered in memory before the sink is touched, so a sink
//! either receives the whole report or the write fails.

use crate::crypto::{KeyPair, PublicKey, SecretKey};
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use zeroize::{Zeroize, Zeroizing};

const PUBLIC_PREFIX: &str = "Public: ";
const PRIVATE_PREFIX: &str = "Private: ";

/// Render bytes as lowercase hex, two characters per byte, no prefix
pub fn to_hex(bytes: impl AsRef<[u8]>) -> String {
    hex::encode(bytes)
}

/// Write the two-line text report to any sink
pub fn write_report<W: Write>(writer: &mut W, public_hex: &str, private_hex: &str) -> io::Result<()> {
    let text = Zeroizing::new(format_text(public_hex, private_hex));
    writer.write_all(text.as_bytes())
}

fn format_text(public_hex: &str, private_hex: &str) -> String {
    format!(
        "{}{}\n{}{}\n",
        PUBLIC_PREFIX, public_hex, PRIVATE_PREFIX, private_hex
    )
}

/// Where a report ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    /// Created, or truncated if it already exists
    File(PathBuf),
}

impl OutputTarget {
    /// Map the optional `-o` flag value; absent or empty means stdout
    pub fn from_flag(path: Option<&str>) -> Self {
        match path {
            Some(p) if !p.is_empty() => OutputTarget::File(PathBuf::from(p)),
            _ => OutputTarget::Stdout,
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Stdout => write!(f, "stdout"),
            OutputTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Report encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// `Public: ..` / `Private: ..` lines
    #[default]
    Text,
    /// `{"paseto": {"public": .., "private": ..}}`, the server config layout
    Json,
}

/// Hex renderings of one keypair
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub public: String,
    pub private: String,
}

#[derive(Serialize)]
struct PasetoSection<'a> {
    paseto: &'a Report,
}

impl Report {
    pub fn new(public: String, private: String) -> Self {
        Self { public, private }
    }

    pub fn from_keypair(keypair: &KeyPair) -> Self {
        Self {
            public: keypair.public().to_hex(),
            private: keypair.secret().to_hex().to_string(),
        }
    }

    /// Parse a text report previously produced by [`Report::write_to`].
    ///
    /// Only the exact layout written by this crate is accepted: `\n` line
    /// endings and a final newline.
    pub fn parse(input: &str) -> Result<Self> {
        if input.contains('\r') {
            return Err(Error::InvalidReport("unexpected carriage return".to_string()));
        }
        let body = input
            .strip_suffix('\n')
            .ok_or_else(|| Error::InvalidReport("missing final newline".to_string()))?;
        let mut lines = body.split('\n');

        let public = lines
            .next()
            .and_then(|l| l.strip_prefix(PUBLIC_PREFIX))
            .ok_or_else(|| Error::InvalidReport("missing `Public:` line".to_string()))?;
        let private = lines
            .next()
            .and_then(|l| l.strip_prefix(PRIVATE_PREFIX))
            .ok_or_else(|| Error::InvalidReport("missing `Private:` line".to_string()))?;

        if lines.next().is_some() {
            return Err(Error::InvalidReport("unexpected trailing content".to_string()));
        }

        Ok(Self::new(public.to_string(), private.to_string()))
    }

    /// Check the report describes a consistent keypair and load it
    pub fn to_keypair(&self) -> Result<KeyPair> {
        let secret = SecretKey::from_hex(&self.private)?;
        let public = PublicKey::from_hex(&self.public)?;

        if secret.public_key() != public {
            return Err(Error::InvalidKey(
                "public key was not derived from the private key".to_string(),
            ));
        }
        if public.to_hex() != self.public || *secret.to_hex() != self.private {
            return Err(Error::InvalidReport("hex must be lowercase".to_string()));
        }

        Ok(KeyPair::from_secret(secret))
    }

    /// Render the complete report
    pub fn render(&self, format: ReportFormat) -> Result<Zeroizing<String>> {
        match format {
            ReportFormat::Text => Ok(Zeroizing::new(format_text(&self.public, &self.private))),
            ReportFormat::Json => {
                let mut json = serde_json::to_string_pretty(&PasetoSection { paseto: self })
                    .map_err(|e| Error::Serialization(e.to_string()))?;
                json.push('\n');
                Ok(Zeroizing::new(json))
            }
        }
    }

    /// Write the report to `target`
    pub fn write_to(&self, target: &OutputTarget, format: ReportFormat) -> Result<()> {
        let rendered = self.render(format)?;

        let written = match target {
            OutputTarget::Stdout => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                handle
                    .write_all(rendered.as_bytes())
                    .and_then(|_| handle.flush())
            }
            OutputTarget::File(path) => write_file(path, rendered.as_bytes()),
        };

        written.map_err(|source| Error::DestinationUnavailable {
            target: target.to_string(),
            source,
        })?;

        if let OutputTarget::File(path) = target {
            info!("Wrote keypair report to {}", path.display());
        }
        Ok(())
    }
}

impl fmt::Debug for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Report")
            .field("public", &self.public)
            .field("private", &"<redacted>")
            .finish()
    }
}

impl Drop for Report {
    fn drop(&mut self) {
        self.private.zeroize();
    }
}

/// Create/truncate `path` and write `contents`
fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    write_file_with(path, |file| {
        file.write_all(contents)?;
        file.flush()?;
        // Devices, pipes and ttys reject fsync
        if file.metadata()?.is_file() {
            file.sync_all()?;
        }
        Ok(())
    })
}

/// Run `write` against the created file. On failure the partial report is
/// removed, but only when `path` itself is a plain file; device nodes and
/// symlinks are never unlinked.
fn write_file_with<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let removable = match fs::symlink_metadata(path) {
        Ok(meta) => meta.file_type().is_file(),
        Err(e) => e.kind() == io::ErrorKind::NotFound,
    };

    let mut file = File::create(path)?;

    if let Err(e) = write(&mut file) {
        drop(file);
        if !removable {
            warn!("Write to {} failed; not a regular file, left in place", path.display());
        } else if let Err(cleanup) = fs::remove_file(path) {
            warn!("Failed to remove partial report {}: {}", path.display(), cleanup);
        }
        return Err(e);
    }

    Ok(())
}
