//! Classification rule sets and their TOML configuration.
//!
//! A [`RuleSet`] is built once at startup (from the built-in production lists
//! or from a rule file) and is only ever read afterwards. It holds no interior
//! mutability, so it can be shared freely between threads.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use stockfilter_core::ColumnNames;

pub const DEFAULT_EXCLUDED_PREFIXES: &[&str] = &[
    "AE5", "ARM", "COB", "DLM", "FDC", "HTS", "HS2", "LD6", "EL8", "MIC", "VFD", "RHT", "RMO",
    "RD3", "RD5", "RD2", "R30", "TRE", "TUB", "TIV", "SIP", "SPS", "ACN", "AEC", "AGA", "BRN",
    "CAL", "CBD", "CHT", "CMI", "PWD", "DF2", "PSK", "T30", "SC5", "MGL", "ME1", "ETL", "EQ1",
    "ATH", "AMD", "AKT", "AHN",
];

pub const DEFAULT_PRESERVED_DESCRIPTIONS: &[&str] = &[
    "fortbio 1008",
    "fortbio 1009",
    "fortbio 1007",
    "fortbio 1010",
    "fortdoss 70",
];

pub const DEFAULT_ALLOWED_CODES: &[&str] = &[
    "973473.L1",
    "973514.L1",
    "977259.L1",
    "973515.L1",
    "148326.K6",
    "148478.L1",
    "222654.L1",
];

pub const DEFAULT_RESTRICTED_DESCRIPTION_PREFIX: &str = "coladur";

/// Length, in characters, of an item-code prefix.
pub const PREFIX_LEN: usize = 3;

#[derive(Debug, Error)]
pub enum RuleSetError {
    #[error("failed to read rule file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rule file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid rule set: {0}")]
    Invalid(String),
}

/// Immutable business rules consulted by the classifier and the row filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    excluded_prefixes: HashSet<String>,
    preserved_descriptions: HashSet<String>,
    allowed_codes: HashSet<String>,
    restricted_description_prefix: String,
}

impl RuleSet {
    /// Build a rule set, validating prefix lengths and lower-casing the
    /// description-side entries.
    pub fn new<P, D, A>(
        excluded_prefixes: P,
        preserved_descriptions: D,
        allowed_codes: A,
        restricted_description_prefix: impl Into<String>,
    ) -> Result<Self, RuleSetError>
    where
        P: IntoIterator,
        P::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        let excluded_prefixes: HashSet<String> =
            excluded_prefixes.into_iter().map(Into::into).collect();
        if let Some(bad) = excluded_prefixes
            .iter()
            .find(|p| p.chars().count() != PREFIX_LEN)
        {
            return Err(RuleSetError::Invalid(format!(
                "excluded prefix {bad:?} must be exactly {PREFIX_LEN} characters"
            )));
        }

        let restricted_description_prefix = restricted_description_prefix.into().to_lowercase();
        if restricted_description_prefix.is_empty() {
            return Err(RuleSetError::Invalid(
                "restricted description prefix cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            excluded_prefixes,
            preserved_descriptions: preserved_descriptions
                .into_iter()
                .map(|d| d.into().to_lowercase())
                .collect(),
            allowed_codes: allowed_codes.into_iter().map(Into::into).collect(),
            restricted_description_prefix,
        })
    }

    pub fn is_excluded_prefix(&self, prefix: &str) -> bool {
        self.excluded_prefixes.contains(prefix)
    }

    /// `description` must already be lower-cased.
    pub fn is_preserved_description(&self, description: &str) -> bool {
        self.preserved_descriptions.contains(description)
    }

    pub fn is_allowed_code(&self, code: &str) -> bool {
        self.allowed_codes.contains(code)
    }

    pub fn restricted_description_prefix(&self) -> &str {
        &self.restricted_description_prefix
    }

    pub fn excluded_prefix_count(&self) -> usize {
        self.excluded_prefixes.len()
    }

    pub fn preserved_description_count(&self) -> usize {
        self.preserved_descriptions.len()
    }

    pub fn allowed_code_count(&self) -> usize {
        self.allowed_codes.len()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            excluded_prefixes: owned_set(DEFAULT_EXCLUDED_PREFIXES),
            preserved_descriptions: owned_set(DEFAULT_PRESERVED_DESCRIPTIONS),
            allowed_codes: owned_set(DEFAULT_ALLOWED_CODES),
            restricted_description_prefix: DEFAULT_RESTRICTED_DESCRIPTION_PREFIX.to_string(),
        }
    }
}

fn owned_set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Everything a run needs besides the input table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    pub rules: RuleSet,
    pub columns: ColumnNames,
}

/// On-disk shape of a rule file. Every key is optional; absent keys fall back
/// to the built-in production values.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleFile {
    excluded_prefixes: Option<Vec<String>>,
    preserved_descriptions: Option<Vec<String>>,
    allowed_codes: Option<Vec<String>>,
    restricted_description_prefix: Option<String>,
    #[serde(default)]
    columns: ColumnNames,
}

fn or_default(list: Option<Vec<String>>, default: &[&str]) -> Vec<String> {
    list.unwrap_or_else(|| default.iter().map(|s| s.to_string()).collect())
}

impl FilterConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, RuleSetError> {
        let file: RuleFile = toml::from_str(content)?;
        let rules = RuleSet::new(
            or_default(file.excluded_prefixes, DEFAULT_EXCLUDED_PREFIXES),
            or_default(file.preserved_descriptions, DEFAULT_PRESERVED_DESCRIPTIONS),
            or_default(file.allowed_codes, DEFAULT_ALLOWED_CODES),
            file.restricted_description_prefix
                .unwrap_or_else(|| DEFAULT_RESTRICTED_DESCRIPTION_PREFIX.to_string()),
        )?;
        Ok(Self {
            rules,
            columns: file.columns,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RuleSetError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RuleSetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            excluded_prefixes = config.rules.excluded_prefix_count(),
            preserved_descriptions = config.rules.preserved_description_count(),
            allowed_codes = config.rules.allowed_code_count(),
            "loaded rule file"
        );
        Ok(config)
    }
}
