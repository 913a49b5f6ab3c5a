//! Suffix-rule classification.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::{Arch, Error, Result};

/// OS label assigned to unmatched files under [`ClassifyPolicy::Lenient`].
pub const OTHER_OS: &str = "other";

/// Operating system and CPU labels of one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
    pub os:  String,
    pub cpu: String,
}

/// Maps a file name suffix to a platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub suffix: String,
    pub os:     String,
    pub cpu:    String,
}

impl Rule {
    pub fn new(suffix: &str, os: &str, cpu: &str) -> Self {
        Self {
            suffix: suffix.to_string(),
            os:     os.to_string(),
            cpu:    cpu.to_string(),
        }
    }

    pub fn matches(&self, filename: &str) -> bool { filename.ends_with(&self.suffix) }

    fn platform(&self) -> Platform {
        Platform {
            os:  self.os.clone(),
            cpu: self.cpu.clone(),
        }
    }
}

/// Ordered, versioned rule table. Earlier rules take precedence, so the
/// most specific suffixes come first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub version: u32,
    pub rules:   Vec<Rule>,
}

static BUILTIN: Lazy<RuleSet> = Lazy::new(|| RuleSet {
    version: 1,
    rules:   vec![
        Rule::new("el6.centos.x86_64.rpm", "RHEL/CentOS 6", "x86_64"),
        Rule::new("el6.x86_64.rpm", "RHEL/CentOS 6", "x86_64"),
        Rule::new("el7.centos.x86_64.rpm", "RHEL/CentOS 7", "x86_64"),
        Rule::new("el7.x86_64.rpm", "RHEL/CentOS 7", "x86_64"),
        Rule::new(".x86_64.rpm", "RHEL/CentOS/Fedora", "x86_64"),
        Rule::new(".apk", "Alpine Linux", "x86_64"),
        Rule::new(".deb", "Debian/Ubuntu", "x86_64"),
    ],
});

impl Default for RuleSet {
    fn default() -> Self { BUILTIN.clone() }
}

impl RuleSet {
    /// Build a table from caller-supplied rules, rejecting empty suffixes
    /// (they would match every file).
    pub fn new(version: u32, rules: Vec<Rule>) -> Result<Self> {
        if let Some(pos) = rules.iter().position(|r| r.suffix.is_empty()) {
            return Err(Error::EmptySuffix(pos));
        }
        Ok(Self { version, rules })
    }

    pub fn find(&self, filename: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(filename))
    }
}

/// What to do with a file no rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifyPolicy {
    /// A miss is [`Error::UnrecognizedPlatform`].
    #[default]
    Strict,
    /// A miss is labelled [`OTHER_OS`] with a CPU guessed from the name.
    Lenient,
}

#[derive(Debug, Clone, Default)]
pub struct Classifier {
    rules:  RuleSet,
    policy: ClassifyPolicy,
}

impl Classifier {
    pub fn new(rules: RuleSet, policy: ClassifyPolicy) -> Self { Self { rules, policy } }

    pub fn with_policy(policy: ClassifyPolicy) -> Self { Self::new(RuleSet::default(), policy) }

    pub fn policy(&self) -> ClassifyPolicy { self.policy }

    pub fn rules(&self) -> &RuleSet { &self.rules }

    pub fn classify(&self, filename: &str) -> Result<Platform> {
        if let Some(rule) = self.rules.find(filename) {
            return Ok(rule.platform());
        }

        match self.policy {
            ClassifyPolicy::Strict => Err(Error::UnrecognizedPlatform {
                filename: filename.to_string(),
            }),
            ClassifyPolicy::Lenient => Ok(Platform {
                os:  OTHER_OS.to_string(),
                cpu: Arch::guess(filename).label().to_string(),
            }),
        }
    }
}
