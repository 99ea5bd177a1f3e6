//! Session and token secret configuration read from the environment.
//!
//! Release builds insist on explicit toggles and on-disk secrets; debug builds
//! warn and fall back to safe defaults so `cargo run` works out of the box.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use rand::RngCore;
use tracing::warn;
use zeroize::{Zeroize, Zeroizing};

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const JWT_SECRET_DEFAULT_PATH: &str = "/var/run/secrets/jwt_secret";
const SESSION_KEY_MIN_LEN: usize = 64;
const JWT_SECRET_MIN_LEN: usize = 32;
const EPHEMERAL_SECRET_LEN: usize = 64;
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const JWT_SECRET_FILE_ENV: &str = "JWT_SECRET_FILE";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings for missing toggles.
    Debug,
    /// Release builds require explicit, valid toggles and secrets.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use crudhub::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Cookie and token settings derived from the environment.
pub struct SessionSettings {
    /// Signing key for the session cookie.
    pub key: Key,
    /// Whether cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy for cookies.
    pub same_site: SameSite,
    /// HMAC secret for access and refresh tokens.
    pub token_secret: Zeroizing<Vec<u8>>,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("secret at {path} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build session settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use crudhub::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = std::env::temp_dir();
/// let key_path = dir.join("crudhub_session_key_example");
/// let jwt_path = dir.join("crudhub_jwt_secret_example");
/// std::fs::write(&key_path, vec![b'a'; 64])?;
/// std::fs::write(&jwt_path, vec![b'b'; 32])?;
///
/// let key = key_path.to_string_lossy().into_owned();
/// let jwt = jwt_path.to_string_lossy().into_owned();
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "SESSION_KEY_FILE" => Some(key.clone()),
///     "JWT_SECRET_FILE" => Some(jwt.clone()),
///     "SESSION_COOKIE_SECURE" => Some("1".to_owned()),
///     "SESSION_SAMESITE" => Some("Strict".to_owned()),
///     "SESSION_ALLOW_EPHEMERAL" => Some("0".to_owned()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Release)?;
/// assert!(settings.cookie_secure);
/// assert_eq!(settings.token_secret.len(), 32);
///
/// std::fs::remove_file(&key_path)?;
/// std::fs::remove_file(&jwt_path)?;
/// # Ok(())
/// # }
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = bool_from_env(env, mode, COOKIE_SECURE_ENV, true)?;
    let same_site = same_site_from_env(env, mode, cookie_secure)?;
    let allow_ephemeral = bool_from_env(env, mode, ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let fallback_allowed = mode.is_debug() || allow_ephemeral;

    let key = {
        let secret_file = SecretFile {
            env_name: KEY_FILE_ENV,
            default_path: SESSION_KEY_DEFAULT_PATH,
            min_len: SESSION_KEY_MIN_LEN,
        };
        match secret_file.read(env, mode, fallback_allowed)? {
            Some(bytes) => Key::derive_from(&bytes),
            None => Key::generate(),
        }
    };
    let token_secret = {
        let secret_file = SecretFile {
            env_name: JWT_SECRET_FILE_ENV,
            default_path: JWT_SECRET_DEFAULT_PATH,
            min_len: JWT_SECRET_MIN_LEN,
        };
        secret_file.read(env, mode, fallback_allowed)?
            .unwrap_or_else(ephemeral_secret)
    };

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
        token_secret,
    })
}

fn bool_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    debug_default: bool,
) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(name) else {
        if mode.is_debug() {
            warn!(variable = name, default = debug_default, "toggle not set; using default");
            return Ok(debug_default);
        }
        return Err(SessionConfigError::MissingEnv { name });
    };
    if let Some(flag) = parse_bool(&value) {
        return Ok(flag);
    }
    if mode.is_debug() {
        warn!(variable = name, value = %value, default = debug_default, "invalid toggle; using default");
        Ok(debug_default)
    } else {
        Err(SessionConfigError::InvalidEnv {
            name,
            value,
            expected: BOOL_EXPECTED,
        })
    }
}

fn same_site_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let default_same_site = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };

    let Some(value) = env.string(SAMESITE_ENV) else {
        if mode.is_debug() {
            warn!("SESSION_SAMESITE not set; using default");
            return Ok(default_same_site);
        }
        return Err(SessionConfigError::MissingEnv { name: SAMESITE_ENV });
    };

    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" if mode.is_debug() => {
            warn!("SESSION_SAMESITE=None without secure cookies; browsers may drop them");
            Ok(SameSite::None)
        }
        "none" => Err(SessionConfigError::InsecureSameSiteNone),
        _ if mode.is_debug() => {
            warn!(value = %value, "invalid SESSION_SAMESITE; using default");
            Ok(default_same_site)
        }
        _ => Err(SessionConfigError::InvalidEnv {
            name: SAMESITE_ENV,
            value,
            expected: SAMESITE_EXPECTED,
        }),
    }
}

/// Where a secret lives and how long it must be in release builds.
struct SecretFile {
    env_name: &'static str,
    default_path: &'static str,
    min_len: usize,
}

impl SecretFile {
    /// `Ok(None)` means the file is unreadable and a temporary secret may be used.
    fn read<E: Env>(
        &self,
        env: &E,
        mode: BuildMode,
        fallback_allowed: bool,
    ) -> Result<Option<Zeroizing<Vec<u8>>>, SessionConfigError> {
        let path = PathBuf::from(
            env.string(self.env_name)
                .unwrap_or_else(|| self.default_path.to_owned()),
        );
        match std::fs::read(&path) {
            Ok(mut bytes) => {
                let length = bytes.len();
                if mode == BuildMode::Release && length < self.min_len {
                    bytes.zeroize();
                    return Err(SessionConfigError::SecretTooShort {
                        path,
                        length,
                        min_len: self.min_len,
                    });
                }
                Ok(Some(Zeroizing::new(bytes)))
            }
            Err(error) if fallback_allowed => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary secret (dev only)"
                );
                Ok(None)
            }
            Err(error) => Err(SessionConfigError::SecretRead {
                path,
                source: error,
            }),
        }
    }
}

fn ephemeral_secret() -> Zeroizing<Vec<u8>> {
    let mut bytes = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
    rand::thread_rng().fill_bytes(bytes.as_mut_slice());
    bytes
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
