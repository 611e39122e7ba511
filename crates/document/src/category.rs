//! Category key → tag mapping and category-data serialization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use feedforge_core::{AttributeTree, FeedError, FeedResult, Value};

use crate::serializer::Emitter;

/// Categories every registry starts with.
pub const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("ce", "CE"),
    ("fba", "FBA"),
    ("eu_compliance", "EUCompliance"),
];

/// Naming rules for category data.
///
/// - `categories`: category key → tag of the node wrapping the data.
/// - `element_tags`: attribute key → tag, for keys whose vendor name differs
///   from the key. Unmapped keys are written verbatim.
/// - `list_item_tags`: attribute key → tag repeated once per list element
///   (`used_fors` → `UsedFor`). Unmapped list keys repeat their element tag.
///
/// Registries are plain data: deployments add categories by merging entries
/// (for example from JSON) rather than by changing code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryRegistry {
    categories: BTreeMap<String, String>,
    element_tags: BTreeMap<String, String>,
    list_item_tags: BTreeMap<String, String>,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for (key, tag) in DEFAULT_CATEGORIES {
            registry.register(*key, *tag);
        }
        registry
    }
}

impl CategoryRegistry {
    /// A registry without the default categories.
    pub fn empty() -> Self {
        Self {
            categories: BTreeMap::new(),
            element_tags: BTreeMap::new(),
            list_item_tags: BTreeMap::new(),
        }
    }

    /// Default categories plus everything in `json`.
    pub fn from_json(json: &str) -> FeedResult<Self> {
        let extra: CategoryRegistry = serde_json::from_str(json)
            .map_err(|e| FeedError::config(format!("category registry: {e}")))?;
        let mut registry = Self::default();
        registry.merge(extra);
        Ok(registry)
    }

    /// Add or replace a category. Returns the tag it previously mapped to.
    pub fn register(&mut self, key: impl Into<String>, tag: impl Into<String>) -> Option<String> {
        self.categories.insert(key.into(), tag.into())
    }

    pub fn register_element_tag(
        &mut self,
        key: impl Into<String>,
        tag: impl Into<String>,
    ) -> Option<String> {
        self.element_tags.insert(key.into(), tag.into())
    }

    pub fn register_list_item_tag(
        &mut self,
        key: impl Into<String>,
        tag: impl Into<String>,
    ) -> Option<String> {
        self.list_item_tags.insert(key.into(), tag.into())
    }

    /// Entries of `other` win over existing ones.
    pub fn merge(&mut self, other: CategoryRegistry) {
        self.categories.extend(other.categories);
        self.element_tags.extend(other.element_tags);
        self.list_item_tags.extend(other.list_item_tags);
    }

    pub fn tag_for(&self, category_key: &str) -> Option<&str> {
        self.categories.get(category_key).map(String::as_str)
    }

    pub fn contains(&self, category_key: &str) -> bool {
        self.categories.contains_key(category_key)
    }

    pub fn category_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.categories.keys().map(String::as_str)
    }

    pub fn element_tag<'a>(&'a self, key: &'a str) -> &'a str {
        self.element_tags.get(key).map_or(key, String::as_str)
    }

    pub fn list_item_tag<'a>(&'a self, key: &'a str) -> &'a str {
        self.list_item_tags
            .get(key)
            .map_or_else(|| self.element_tag(key), String::as_str)
    }
}

/// Writes an entity's category data under its category tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryDispatcher {
    registry: CategoryRegistry,
}

impl CategoryDispatcher {
    pub fn new(registry: CategoryRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    /// Emit `<Tag>...tree...</Tag>` where `Tag` is the registered tag for
    /// `category_key`.
    ///
    /// # Errors
    ///
    /// [`FeedError::UnknownCategory`] when the key is not registered; nothing
    /// is emitted in that case.
    #[instrument(level = "debug", skip(self, tree, emitter))]
    pub fn serialize(
        &self,
        category_key: &str,
        tree: &AttributeTree,
        emitter: &mut Emitter<'_>,
    ) -> FeedResult<()> {
        let tag = self
            .registry
            .tag_for(category_key)
            .ok_or_else(|| FeedError::unknown_category(category_key))?;
        debug!(tag, entries = tree.len(), "writing category data");
        emitter.emit_scoped(tag, |e| self.write_tree(tree, e))
    }

    /// Emit every entry of `tree` into the current node.
    pub fn write_tree(&self, tree: &AttributeTree, emitter: &mut Emitter<'_>) -> FeedResult<()> {
        for (key, value) in tree.entries() {
            match value {
                Value::Scalar(scalar) => emitter.emit(self.registry.element_tag(key), scalar)?,
                Value::List(items) => {
                    emitter.emit_each(self.registry.list_item_tag(key), items)?;
                }
                Value::Tree(child) => {
                    emitter.emit_scoped(self.registry.element_tag(key), |e| {
                        self.write_tree(child, e)
                    })?;
                }
            }
        }
        Ok(())
    }
}
