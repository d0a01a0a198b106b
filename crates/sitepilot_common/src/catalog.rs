//! Intent catalog - the static table of site-navigation intents.
//!
//! Loaded once at startup from TOML (`[[intent]]` tables) and never mutated.
//! Definition order is significant: the resolver tries intents in this order
//! and the suggestion ranker starts from it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

use crate::error::CatalogError;

/// Bundled catalog for the GS1 site
const BUILTIN_CATALOG: &str = include_str!("../data/catalog.toml");

/// A navigation intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Intent {
    pub key: String,
    /// Lower-cased, trimmed synonym phrases
    pub synonyms: Vec<String>,
    /// Target path relative to the site base URL
    pub path: String,
    /// Canonical suggestion sentence ("navigate to ... page")
    pub suggestion: String,
}

/// One `[[intent]]` table as written in a catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentDef {
    pub key: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    pub path: String,
    pub suggestion: String,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    intent: Vec<IntentDef>,
}

/// Ordered, immutable set of intents
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    intents: Vec<Intent>,
}

impl Catalog {
    /// Build a catalog from definitions in order.
    ///
    /// A repeated key replaces the earlier definition but keeps its position.
    pub fn from_defs(defs: impl IntoIterator<Item = IntentDef>) -> Self {
        let mut intents: Vec<Intent> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for def in defs {
            let intent = Intent::from(def);
            match positions.get(&intent.key) {
                Some(&idx) => {
                    warn!(
                        "Duplicate intent key '{}' in catalog, later definition wins",
                        intent.key
                    );
                    intents[idx] = intent;
                }
                None => {
                    positions.insert(intent.key.clone(), intents.len());
                    intents.push(intent);
                }
            }
        }

        Self { intents }
    }

    /// Parse a TOML catalog document
    pub fn from_toml_str(s: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(s)?;
        Ok(Self::from_defs(file.intent))
    }

    /// Load a TOML catalog from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// The catalog shipped with the crate
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn get(&self, key: &str) -> Option<&Intent> {
        self.intents.iter().find(|i| i.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Intent> {
        self.intents.iter()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    /// Suggestion sentences in catalog order
    pub fn suggestions(&self) -> Vec<String> {
        self.intents.iter().map(|i| i.suggestion.clone()).collect()
    }
}

impl From<IntentDef> for Intent {
    fn from(def: IntentDef) -> Self {
        let synonyms = def
            .synonyms
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            key: def.key,
            synonyms,
            path: def.path,
            suggestion: def.suggestion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(key: &str, synonyms: &[&str], path: &str) -> IntentDef {
        IntentDef {
            key: key.to_string(),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
            path: path.to_string(),
            suggestion: format!("navigate to {} page", key),
        }
    }

    #[test]
    fn test_builtin_catalog_loads_in_order() {
        let catalog = Catalog::builtin().unwrap();
        let keys: Vec<&str> = catalog.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "about",
                "whychoose",
                "team",
                "boardmember",
                "gs1benefits",
                "gs1systemstandards",
                "globalproductclassification",
            ]
        );
        assert_eq!(catalog.get("team").unwrap().path, "our-team");
    }

    #[test]
    fn test_duplicate_key_last_wins_in_first_position() {
        let catalog = Catalog::from_defs(vec![
            def("kpi", &["kpi"], "kpi-old"),
            def("gs1", &["gs1"], "gs1"),
            def("kpi", &["indicators"], "kpi-new"),
        ]);

        assert_eq!(catalog.len(), 2);
        let first = catalog.iter().next().unwrap();
        assert_eq!(first.key, "kpi");
        assert_eq!(first.path, "kpi-new");
        assert_eq!(first.synonyms, vec!["indicators"]);
    }

    #[test]
    fn test_synonyms_normalized() {
        let catalog = Catalog::from_defs(vec![def("about", &["  About Us ", "", "   "], "about-us")]);
        assert_eq!(catalog.get("about").unwrap().synonyms, vec!["about us"]);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(
            &path,
            r#"
[[intent]]
key = "kpi"
path = "kpi"
suggestion = "navigate to kpi page"
synonyms = ["kpi", "key performance"]
"#,
        )
        .unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.suggestions(), vec!["navigate to kpi page"]);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Catalog::load("/nonexistent/catalog.toml").unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }

    #[test]
    fn test_empty_document_is_empty_catalog() {
        let catalog = Catalog::from_toml_str("").unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.suggestions().is_empty());
    }
}
