use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Default vendor-extension key pattern.
pub const DEFAULT_EXTENSION_PATTERN: &str = "^x-";

/// What to do when a mapping contains a YAML merge key (`<<`).
///
/// Merge content is never applied; the policies only differ in how loudly
/// the unmerged key is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeKeyPolicy {
    /// Log a warning and continue.
    #[default]
    Warn,
    /// Fail the Build with [`BuildError::MergeKey`](crate::BuildError::MergeKey).
    Reject,
    /// Continue silently.
    Ignore,
}

impl FromStr for MergeKeyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warn" => Ok(MergeKeyPolicy::Warn),
            "reject" => Ok(MergeKeyPolicy::Reject),
            "ignore" => Ok(MergeKeyPolicy::Ignore),
            other => Err(format!("unknown merge key policy '{}'", other)),
        }
    }
}

impl fmt::Display for MergeKeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MergeKeyPolicy::Warn => "warn",
            MergeKeyPolicy::Reject => "reject",
            MergeKeyPolicy::Ignore => "ignore",
        };
        f.write_str(name)
    }
}

/// Settings consulted by every Build through the index.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    extension_pattern: Regex,
    /// Merge key handling.
    pub merge_keys: MergeKeyPolicy,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            extension_pattern: Regex::new(DEFAULT_EXTENSION_PATTERN).expect("invalid regex"),
            merge_keys: MergeKeyPolicy::default(),
        }
    }
}

impl ExtractOptions {
    /// Replaces the vendor-extension key pattern.
    pub fn with_extension_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.extension_pattern = Regex::new(pattern)?;
        Ok(self)
    }

    /// Replaces the merge key policy.
    pub fn with_merge_keys(mut self, policy: MergeKeyPolicy) -> Self {
        self.merge_keys = policy;
        self
    }

    /// Pattern source text.
    pub fn extension_pattern(&self) -> &str {
        self.extension_pattern.as_str()
    }

    /// Returns true if `key` names a vendor extension.
    pub fn is_extension(&self, key: &str) -> bool {
        self.extension_pattern.is_match(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pattern_matches_prefix_only() {
        let options = ExtractOptions::default();
        assert!(options.is_extension("x-internal"));
        assert!(!options.is_extension("max-items"));
        assert!(!options.is_extension("X-Upper"));
    }

    #[test]
    fn custom_pattern() {
        let options = ExtractOptions::default()
            .with_extension_pattern("^(x|ext)-")
            .unwrap();
        assert!(options.is_extension("ext-a"));
        assert!(ExtractOptions::default().with_extension_pattern("(").is_err());
    }

    #[test]
    fn merge_policy_parses() {
        assert_eq!("reject".parse::<MergeKeyPolicy>().unwrap(), MergeKeyPolicy::Reject);
        assert!("merge".parse::<MergeKeyPolicy>().is_err());
    }
}
