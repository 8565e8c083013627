//! Environment lookups for session toggles.
//!
//! [`lookup`] reports a missing or unparsable variable as an error, and
//! [`or_debug_default`] decides per build mode whether that error is fatal.

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, SessionConfigError};

pub(super) const FLAG_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
pub(super) const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Read `name` and parse it, naming the accepted spellings on failure.
pub(super) fn lookup<E, T, P>(
    env: &E,
    name: &'static str,
    parse: P,
    expected: &'static str,
) -> Result<T, SessionConfigError>
where
    E: Env,
    P: FnOnce(&str) -> Option<T>,
{
    let raw = env
        .string(name)
        .ok_or(SessionConfigError::MissingEnv { name })?;
    parse(&raw).ok_or(SessionConfigError::InvalidEnv {
        name,
        value: raw,
        expected,
    })
}

/// Debug builds log the error and use `default`; release builds fail.
pub(super) fn or_debug_default<T>(
    result: Result<T, SessionConfigError>,
    mode: BuildMode,
    default: T,
) -> Result<T, SessionConfigError> {
    match result {
        Ok(value) => Ok(value),
        Err(error) if mode.is_debug() => {
            warn!(%error, "session setting falls back to its debug default");
            Ok(default)
        }
        Err(error) => Err(error),
    }
}

/// Accept the usual boolean spellings, ignoring case and padding.
pub(super) fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

pub(super) fn parse_same_site(raw: &str) -> Option<SameSite> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "lax" => Some(SameSite::Lax),
        "strict" => Some(SameSite::Strict),
        "none" => Some(SameSite::None),
        _ => None,
    }
}
