//! Platform classification.
//!
//! Total over its input: anything that is not recognised as Apple or Windows
//! (including a missing descriptor) classifies as `Other`. Apple patterns are
//! checked first.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

// A pattern that fails to build matches nothing, so classification degrades
// to `Other` instead of panicking.
static MAC_LIKE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)(Mac|iPhone|iPod|iPad)").ok());
static WINDOWS: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?i)Win").ok());

fn matches(pattern: &LazyLock<Option<Regex>>, raw: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(raw))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Platform {
    Mac,
    Win,
    #[default]
    Other,
}

impl Platform {
    /// Classify a host platform descriptor (e.g. `navigator.platform`, `std::env::consts::OS`).
    pub fn classify(descriptor: Option<&str>) -> Self {
        let Some(raw) = descriptor else {
            return Platform::Other;
        };
        if matches(&MAC_LIKE, raw) {
            Platform::Mac
        } else if matches(&WINDOWS, raw) {
            Platform::Win
        } else {
            Platform::Other
        }
    }

    /// Classification of the platform this process was compiled for.
    pub fn host() -> Self {
        let p = Self::classify(Some(std::env::consts::OS));
        tracing::trace!(target: "events.platform", os = std::env::consts::OS, platform = %p, "host_platform");
        p
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Platform::Mac => "mac",
            Platform::Win => "win",
            Platform::Other => "other",
        }
    }

    pub const ALL: [Platform; 3] = [Platform::Mac, Platform::Win, Platform::Other];
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlatform(pub String);

impl fmt::Display for UnknownPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown platform tag `{}` (expected mac, win or other)", self.0)
    }
}

impl std::error::Error for UnknownPlatform {}

/// Parses the canonical tags only; use [`Platform::classify`] for free-form descriptors.
impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mac" => Ok(Platform::Mac),
            "win" => Ok(Platform::Win),
            "other" => Ok(Platform::Other),
            _ => Err(UnknownPlatform(s.to_string())),
        }
    }
}
