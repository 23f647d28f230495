//! Environment-driven property-test run profile.
//!
//! Property suites read their case count and fork mode through
//! [`PbtProfile::load`] so CI can raise the case count and local runs can
//! stay fast without editing tests.

use std::{env, fmt};

/// Environment variable overriding the number of cases per property.
pub const CASES_ENV_KEY: &str = "CSRGRAPH_PBT_CASES";
/// Environment variable enabling forked proptest execution.
pub const FORK_ENV_KEY: &str = "CSRGRAPH_PBT_FORK";

/// Case count and fork mode for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PbtProfile {
    cases: u32,
    fork: bool,
}

impl PbtProfile {
    /// Loads the profile, falling back to the given defaults for unset or
    /// malformed variables. Malformed values are logged at `warn`.
    ///
    /// # Examples
    /// ```
    /// use csrgraph_test_support::proptest_profile::PbtProfile;
    ///
    /// let profile = PbtProfile::load(32, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: read_override(CASES_ENV_KEY, parse_cases).unwrap_or(default_cases),
            fork: read_override(FORK_ENV_KEY, parse_flag).unwrap_or(default_fork),
        }
    }

    /// Number of cases per property.
    #[must_use]
    #[rustfmt::skip]
    pub fn cases(&self) -> u32 { self.cases }

    /// Whether cases run in forked subprocesses.
    #[must_use]
    #[rustfmt::skip]
    pub fn fork(&self) -> bool { self.fork }
}

#[derive(Debug, PartialEq, Eq)]
enum OverrideError {
    NotANumber,
    ZeroCases,
    NotAFlag,
}

impl fmt::Display for OverrideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotANumber => "expected a positive integer",
            Self::ZeroCases => "case count must be at least 1",
            Self::NotAFlag => "expected one of 1/0/true/false/yes/no/on/off",
        })
    }
}

fn read_override<T>(key: &'static str, parse: fn(&str) -> Result<T, OverrideError>) -> Option<T> {
    let raw = env::var(key).ok()?;
    parse(raw.trim())
        .inspect_err(|reason| {
            tracing::warn!(env = key, raw = %raw, %reason, "ignoring malformed property-test override");
        })
        .ok()
}

fn parse_cases(raw: &str) -> Result<u32, OverrideError> {
    match raw.parse::<u32>() {
        Ok(0) => Err(OverrideError::ZeroCases),
        Ok(cases) => Ok(cases),
        Err(_) => Err(OverrideError::NotANumber),
    }
}

fn parse_flag(raw: &str) -> Result<bool, OverrideError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(OverrideError::NotAFlag),
    }
}
