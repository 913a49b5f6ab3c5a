//! The display model.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::format::natural_cmp;

/// A source download synthesized from the release archive URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceArtifact {
    pub url:  String,
    pub name: String,
}

/// A binary download, keyed by OS label in [`BinaryAssets`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub cpu:  String,
    pub name: String,
    pub size: String,
    pub url:  String,
}

/// OS label → asset, at most one entry per label, iterated in natural
/// case-insensitive key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryAssets {
    entries: Vec<(String, Asset)>,
}

impl BinaryAssets {
    pub fn new() -> Self { Self::default() }

    /// Insert or replace. Returns the asset previously stored under `os`.
    pub fn insert(&mut self, os: String, asset: Asset) -> Option<Asset> {
        match self.entries.iter_mut().find(|(k, _)| *k == os) {
            Some((_, slot)) => Some(std::mem::replace(slot, asset)),
            None => {
                let pos = self
                    .entries
                    .partition_point(|(k, _)| natural_cmp(k, &os).is_lt());
                self.entries.insert(pos, (os, asset));
                None
            }
        }
    }

    pub fn get(&self, os: &str) -> Option<&Asset> {
        self.entries.iter().find(|(k, _)| k == os).map(|(_, a)| a)
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn keys(&self) -> impl Iterator<Item = &str> { self.entries.iter().map(|(k, _)| k.as_str()) }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Asset)> {
        self.entries.iter().map(|(k, a)| (k.as_str(), a))
    }
}

impl Serialize for BinaryAssets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (os, asset) in &self.entries {
            map.serialize_entry(os, asset)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for BinaryAssets {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AssetsVisitor;

        impl<'de> Visitor<'de> for AssetsVisitor {
            type Value = BinaryAssets;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of OS labels to assets")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut assets = BinaryAssets::new();
                while let Some((os, asset)) = access.next_entry::<String, Asset>()? {
                    assets.insert(os, asset);
                }
                Ok(assets)
            }
        }

        deserializer.deserialize_map(AssetsVisitor)
    }
}

/// A published release, ready for display. Built by
/// [`Normalizer`](crate::Normalizer) and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    name:             String,
    html_url:         String,
    body:             String,
    date:             String,
    source_artifacts: [SourceArtifact; 2],
    binary_assets:    BinaryAssets,
}

impl Release {
    pub(crate) fn new(
        name: String,
        html_url: String,
        body: String,
        date: String,
        source_artifacts: [SourceArtifact; 2],
        binary_assets: BinaryAssets,
    ) -> Self {
        Self {
            name,
            html_url,
            body,
            date,
            source_artifacts,
            binary_assets,
        }
    }

    pub fn name(&self) -> &str { &self.name }

    /// Release notes page.
    pub fn html_url(&self) -> &str { &self.html_url }

    pub fn body(&self) -> &str { &self.body }

    pub fn date(&self) -> &str { &self.date }

    /// Tarball, then zipball.
    pub fn source_artifacts(&self) -> &[SourceArtifact; 2] { &self.source_artifacts }

    pub fn binary_assets(&self) -> &BinaryAssets { &self.binary_assets }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str) -> Asset {
        Asset {
            cpu:  "x86_64".to_string(),
            name: name.to_string(),
            size: "1.00 MB".to_string(),
            url:  format!("https://example.com/{name}"),
        }
    }

    #[test]
    fn test_insert_keeps_natural_order() {
        let mut assets = BinaryAssets::new();
        assets.insert("RHEL/CentOS 7".into(), asset("a"));
        assets.insert("debian/Ubuntu".into(), asset("b"));
        assets.insert("RHEL/CentOS 10".into(), asset("c"));
        assets.insert("Alpine Linux".into(), asset("d"));

        let keys: Vec<_> = assets.keys().collect();
        assert_eq!(keys, vec!["Alpine Linux", "debian/Ubuntu", "RHEL/CentOS 7", "RHEL/CentOS 10"]);
    }

    #[test]
    fn test_insert_replaces() {
        let mut assets = BinaryAssets::new();
        assert!(assets.insert("Alpine Linux".into(), asset("first")).is_none());
        let old = assets.insert("Alpine Linux".into(), asset("second")).unwrap();

        assert_eq!(old.name, "first");
        assert_eq!(assets.len(), 1);
        assert_eq!(assets.get("Alpine Linux").unwrap().name, "second");
    }

    #[test]
    fn test_serialize_in_order() {
        let mut assets = BinaryAssets::new();
        assets.insert("b".into(), asset("2"));
        assets.insert("A".into(), asset("1"));

        let json = serde_json::to_string(&assets).unwrap();
        let a = json.find("\"A\"").unwrap();
        let b = json.find("\"b\"").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_deserialize_restores_order() {
        let json = r#"{
            "RHEL/CentOS 7": {"cpu": "x86_64", "name": "r", "size": "1.00 MB", "url": "u"},
            "Alpine Linux": {"cpu": "x86_64", "name": "a", "size": "1.00 MB", "url": "u"}
        }"#;
        let assets: BinaryAssets = serde_json::from_str(json).unwrap();
        let keys: Vec<_> = assets.keys().collect();
        assert_eq!(keys, vec!["Alpine Linux", "RHEL/CentOS 7"]);
    }
}
