//! Boot manifest model and exclusion filtering.
//!
//! The manifest (`blazor.boot.json`) maps resource categories to resource
//! name → content-hash entries. Only the `assembly` section's keys are
//! consumed; the hash values are for the browser's boot process.

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::error::BlazorgrabError;

/// Built-in vendor/runtime patterns applied by the `--exclude` flag.
pub const VENDOR_EXCLUDE_PATTERNS: [&str; 2] = ["Microsoft", "System"];

/// Parsed boot manifest. Key order follows the document.
#[derive(Debug, Deserialize)]
pub struct BootManifest {
    pub resources: BootResources,
}

/// Resource sections of the manifest. Sections this tool ignores are not
/// modeled; a manifest without an `assembly` section yields an empty map.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BootResources {
    pub assembly: serde_json::Map<String, Value>,
}

impl BootManifest {
    pub fn parse(body: &str) -> Result<BootManifest, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Assembly resource names in declaration order, minus excluded ones.
    pub fn assembly_names(&self, excludes: &ExcludeSet) -> Vec<String> {
        self.resources
            .assembly
            .keys()
            .filter(|name| !excludes.is_excluded(name))
            .cloned()
            .collect()
    }
}

/// Ordered set of compiled exclusion patterns.
#[derive(Debug)]
pub struct ExcludeSet {
    patterns: Vec<Regex>,
}

impl ExcludeSet {
    /// A set that excludes nothing.
    pub fn empty() -> ExcludeSet {
        ExcludeSet { patterns: Vec::new() }
    }

    pub fn from_patterns(patterns: &[String]) -> Result<ExcludeSet, BlazorgrabError> {
        let mut compiled = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let regex =
                Regex::new(pattern).map_err(|source| BlazorgrabError::InvalidExcludePattern {
                    pattern: pattern.clone(),
                    source,
                })?;
            compiled.push(regex);
        }
        Ok(ExcludeSet { patterns: compiled })
    }

    /// True when any pattern matches anywhere in the name.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(name))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
