//! Classification of distributable file names into platform labels.
//!
//! A [`Classifier`] walks an ordered table of suffix [`Rule`]s and returns the
//! first match. Whether a miss is fatal is decided by the [`ClassifyPolicy`]
//! the caller constructs it with.

pub use error::{Error, Result};

pub mod arch;
pub mod classify;
mod error;

pub use arch::Arch;
pub use classify::{Classifier, ClassifyPolicy, OTHER_OS, Platform, Rule, RuleSet};
