//! Version information for paseto-keygen

/// Crate version (semver format)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// PASETO protocol version the generated keys are meant for
pub const PASETO_VERSION: &str = "v2";

/// PASETO purpose the generated keys are meant for
pub const PASETO_PURPOSE: &str = "public";

/// Git commit hash (if available)
pub const GIT_HASH: Option<&str> = option_env!("GIT_HASH");

/// Build profile (debug/release)
pub const BUILD_PROFILE: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "release"
};

/// Full version string with metadata
pub fn version_string() -> String {
    let mut version = format!(
        "paseto-keygen v{} ({}.{})",
        VERSION, PASETO_VERSION, PASETO_PURPOSE
    );

    if let Some(hash) = GIT_HASH {
        version.push_str(&format!(" ({})", short_hash(hash)));
    }

    if BUILD_PROFILE == "debug" {
        version.push_str(" [debug]");
    }

    version
}

/// First eight bytes of a commit hash, or all of it if that would split a character
fn short_hash(hash: &str) -> &str {
    hash.get(..8).unwrap_or(hash)
}
