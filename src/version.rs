//! Build metadata
//!
//! Injected at compile time via `KINDLING_VERSION`, `KINDLING_COMMIT` and
//! `KINDLING_BUILD_DATE`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub date: &'static str,
}

pub const BUILD_INFO: BuildInfo = BuildInfo {
    version: match option_env!("KINDLING_VERSION") {
        Some(version) => version,
        None => env!("CARGO_PKG_VERSION"),
    },
    commit: match option_env!("KINDLING_COMMIT") {
        Some(commit) => commit,
        None => "none",
    },
    date: match option_env!("KINDLING_BUILD_DATE") {
        Some(date) => date,
        None => "unknown",
    },
};

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Kindling Version: {}", self.version)?;
        writeln!(f, "Git Commit:       {}", self.commit)?;
        write!(f, "Build Date:       {}", self.date)
    }
}
