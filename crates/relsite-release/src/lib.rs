//! Release-record normalization.
//!
//! Raw upstream records are validated into [`RawRelease`] at the boundary and
//! turned into the display model [`Release`] by a [`Normalizer`]. Everything
//! here is pure: callers do the reading and fetching.

mod error;
pub mod format;
mod model;
mod normalize;
mod raw;

pub use error::{Error, Result};
pub use format::{format_date, format_size, natural_cmp};
pub use model::{Asset, BinaryAssets, Release, SourceArtifact};
pub use normalize::{DEFAULT_TIME_ZONE, NormalizeOptions, Normalizer};
pub use raw::{RawAsset, RawRelease, UPLOADED};

pub use relsite_platform::{ClassifyPolicy, Platform, Rule, RuleSet};
