//! Version numbers reported by external tools.

use regex::Regex;
use std::sync::OnceLock;

/// A dotted `major.minor[.patch]` version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ToolVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").expect("version regex"))
}

impl ToolVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Find the first version number in `text`, e.g. `cmake version 3.28.1`
    pub fn parse(text: &str) -> Option<Self> {
        let caps = version_pattern().captures(text)?;
        let part = |i: usize| {
            caps.get(i)
                .map(|m| m.as_str().parse::<u32>().ok())
                .unwrap_or(Some(0))
        };
        Some(Self::new(part(1)?, part(2)?, part(3)?))
    }
}

impl std::fmt::Display for ToolVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
