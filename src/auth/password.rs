use std::str::FromStr;

use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use pbkdf2::Pbkdf2;
use rand::rngs::OsRng;
use serde::Deserialize;
use tracing::error;

/// Hashing scheme. Stored hashes are PHC strings, so the scheme travels
/// with every row in its `$<ident>$` prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordScheme {
    #[default]
    Argon2,
    Pbkdf2,
}

impl PasswordScheme {
    fn from_ident(ident: &str) -> anyhow::Result<Self> {
        match ident {
            "argon2id" | "argon2i" | "argon2d" => Ok(Self::Argon2),
            // bare "pbkdf2" is PBKDF2-SHA1, which is not built in
            "pbkdf2-sha256" | "pbkdf2-sha512" => Ok(Self::Pbkdf2),
            other => anyhow::bail!("unsupported password hash scheme: {other}"),
        }
    }

    /// Scheme that produced `stored`.
    pub fn of(stored: &str) -> anyhow::Result<Self> {
        let parsed = parse(stored)?;
        Self::from_ident(parsed.algorithm.as_str())
    }
}

impl FromStr for PasswordScheme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "argon2" | "argon2id" => Ok(Self::Argon2),
            "pbkdf2" | "pbkdf2-sha256" => Ok(Self::Pbkdf2),
            other => anyhow::bail!("unknown PASSWORD_SCHEME {other:?} (expected argon2 or pbkdf2)"),
        }
    }
}

fn parse(stored: &str) -> anyhow::Result<PasswordHash<'_>> {
    PasswordHash::new(stored).map_err(|e| {
        error!(error = %e, "parse password hash error");
        anyhow::anyhow!(e.to_string())
    })
}

pub fn hash_password(scheme: PasswordScheme, plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hashed = match scheme {
        PasswordScheme::Argon2 => Argon2::default().hash_password(plain.as_bytes(), &salt),
        PasswordScheme::Pbkdf2 => Pbkdf2.hash_password(plain.as_bytes(), &salt),
    };
    let hash = hashed
        .map_err(|e| {
            error!(error = %e, ?scheme, "hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Checks `plain` against `stored` using whichever scheme wrote `stored`.
/// `Ok(false)` is a mismatch; malformed or unknown hashes are errors.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let parsed = parse(stored)?;
    let scheme = PasswordScheme::from_ident(parsed.algorithm.as_str())?;
    let outcome = match scheme {
        PasswordScheme::Argon2 => Argon2::default().verify_password(plain.as_bytes(), &parsed),
        PasswordScheme::Pbkdf2 => Pbkdf2.verify_password(plain.as_bytes(), &parsed),
    };
    match outcome {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => {
            error!(error = %e, ?scheme, "verify_password error");
            Err(anyhow::anyhow!(e.to_string()))
        }
    }
}
