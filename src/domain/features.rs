//! Feature frames, column manifests and schema alignment.
//!
//! A trained model only understands the exact ordered column set it was fit
//! against. Live requests produce a loosely shaped [`FeatureFrame`] whose
//! categorical values may or may not have been seen during training; the
//! aligner reconciles the two so that heterogeneous input is always safe to
//! feed into a fixed-shape model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single feature value before alignment.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    /// Already numeric.
    Num(f64),
    /// Still categorical; one-hot expanded during alignment.
    Text(String),
}

/// A request-scoped, insertion-ordered mapping from column name to value.
///
/// Built fresh for every prediction or optimization trial and discarded
/// afterwards; never shared across requests.
#[derive(Debug, Clone, Default)]
pub struct FeatureFrame {
    columns: Vec<(String, FeatureValue)>,
}

impl FeatureFrame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a column, replacing any previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: FeatureValue) {
        let name = name.into();
        if let Some(slot) = self.columns.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.columns.push((name, value));
        }
    }

    pub fn insert_num(&mut self, name: impl Into<String>, value: f64) {
        self.insert(name, FeatureValue::Num(value));
    }

    pub fn insert_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.insert(name, FeatureValue::Text(value.into()));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate over columns in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Map every column through `f`, keeping insertion order.
    #[must_use]
    pub fn map_values(&self, mut f: impl FnMut(&str, &FeatureValue) -> FeatureValue) -> Self {
        Self {
            columns: self
                .columns
                .iter()
                .map(|(n, v)| (n.clone(), f(n, v)))
                .collect(),
        }
    }
}

/// Versioned table of historical column misnamings: a logical field name
/// mapped to the physical names it may appear under in a given manifest.
///
/// The lifespan model was trained after a find/replace accident turned
/// "na" into "NaN" inside one column name. The artifact cannot be fixed,
/// so the aligner renames the logical column to whichever historical
/// spelling the manifest actually carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasTable {
    entries: Vec<(String, Vec<String>)>,
}

impl AliasTable {
    /// An empty table (no historical misnamings).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a logical column and the historical spellings it may appear as.
    #[must_use]
    pub fn with(mut self, logical: impl Into<String>, physical: &[&str]) -> Self {
        self.entries.push((
            logical.into(),
            physical.iter().map(|s| (*s).to_string()).collect(),
        ));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(l, p)| (l.as_str(), p.as_slice()))
    }
}

impl Default for AliasTable {
    /// The known historical misnamings shipped with the current artifacts.
    fn default() -> Self {
        Self::empty().with("mp_vaccination_status", &["mp_vacciNaNtion_status"])
    }
}

/// The frozen, ordered column set a specific trained model was fit against,
/// plus the alias table used to reconcile historical misnamings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnManifest {
    columns: Vec<String>,
    #[serde(default = "AliasTable::empty")]
    aliases: AliasTable,
}

impl ColumnManifest {
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            aliases: AliasTable::empty(),
        }
    }

    #[must_use]
    pub fn with_aliases(mut self, aliases: AliasTable) -> Self {
        self.aliases = aliases;
        self
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Conform a frame to this manifest. Steps, order-sensitive:
    ///
    /// 1. one-hot expand every [`FeatureValue::Text`] column into a binary
    ///    column named `{column}_{value}`;
    /// 2. rename logical columns to the historical spelling this manifest
    ///    actually carries;
    /// 3. reindex to the manifest: zero-fill absent columns, drop extras.
    ///
    /// The output length and order always equal the manifest, no matter
    /// which categories were present in the input.
    #[must_use]
    pub fn align(&self, frame: &FeatureFrame) -> Vec<f64> {
        let mut expanded: BTreeMap<String, f64> = BTreeMap::new();
        for (name, value) in frame.iter() {
            match value {
                FeatureValue::Num(v) => {
                    expanded.insert(name.to_string(), *v);
                }
                FeatureValue::Text(s) => {
                    expanded.insert(format!("{name}_{s}"), 1.0);
                }
            }
        }

        for (logical, physicals) in self.aliases.iter() {
            if self.contains(logical) {
                continue;
            }
            let Some(physical) = physicals.iter().find(|p| self.contains(p)) else {
                continue;
            };
            if let Some(value) = expanded.remove(logical) {
                expanded.insert(physical.clone(), value);
            }
        }

        self.columns
            .iter()
            .map(|c| expanded.get(c).copied().unwrap_or(0.0))
            .collect()
    }
}
