//! Nested path mutation over mapping-shaped documents.
//!
//! YAML, JSON and TOML documents are all trees of string-keyed mappings with
//! scalar leaves. [`MappingNode`] abstracts over the three native mapping
//! types so [`set_path`] is written once.
//!
//! Intermediate segments always resolve to a mapping: a scalar (or list)
//! in the way is replaced by a fresh empty mapping, never merged.

mod path;

pub use path::DottedPath;

/// A string-keyed mapping node in a document tree.
pub trait MappingNode {
    /// Mapping under `key`, replacing any non-mapping value there with an
    /// empty mapping (or creating one if the key is absent).
    fn child_mapping_mut(&mut self, key: &str) -> &mut Self;

    /// Mapping under `key`, if the value there is a mapping.
    fn child_mapping(&self, key: &str) -> Option<&Self>;

    /// String leaf under `key`. Non-string values are not string leaves.
    fn string_leaf(&self, key: &str) -> Option<&str>;

    /// Store `value` as a string leaf under `key`, keeping the key's
    /// position if it already exists.
    fn insert_string(&mut self, key: &str, value: &str);
}

/// Set the leaf at `path` to `value`, creating intermediate mappings.
///
/// Returns whether the leaf changed. A leaf that was absent, or held a
/// non-string value, counts as changed.
pub fn set_path<N: MappingNode>(root: &mut N, path: &DottedPath, value: &str) -> bool {
    let (parents, leaf) = path.split_leaf();

    let mut current = root;
    for segment in parents {
        current = current.child_mapping_mut(segment);
    }

    let changed = current.string_leaf(leaf) != Some(value);
    current.insert_string(leaf, value);
    changed
}

/// Read the string leaf at `path`, if every segment resolves.
pub fn get_path<'a, N: MappingNode>(root: &'a N, path: &DottedPath) -> Option<&'a str> {
    let (parents, leaf) = path.split_leaf();

    let mut current = root;
    for segment in parents {
        current = current.child_mapping(segment)?;
    }
    current.string_leaf(leaf)
}

impl MappingNode for serde_yaml::Mapping {
    fn child_mapping_mut(&mut self, key: &str) -> &mut Self {
        use serde_yaml::Value;

        let slot = self
            .entry(Value::String(key.to_string()))
            .or_insert(Value::Null);
        if !slot.is_mapping() {
            *slot = Value::Mapping(serde_yaml::Mapping::new());
        }
        match slot {
            Value::Mapping(mapping) => mapping,
            _ => unreachable!("slot was just set to a mapping"),
        }
    }

    fn child_mapping(&self, key: &str) -> Option<&Self> {
        self.get(key).and_then(serde_yaml::Value::as_mapping)
    }

    fn string_leaf(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(serde_yaml::Value::as_str)
    }

    fn insert_string(&mut self, key: &str, value: &str) {
        self.insert(
            serde_yaml::Value::String(key.to_string()),
            serde_yaml::Value::String(value.to_string()),
        );
    }
}

impl MappingNode for serde_json::Map<String, serde_json::Value> {
    fn child_mapping_mut(&mut self, key: &str) -> &mut Self {
        use serde_json::Value;

        let slot = self.entry(key).or_insert(Value::Null);
        if !slot.is_object() {
            *slot = Value::Object(serde_json::Map::new());
        }
        match slot {
            Value::Object(map) => map,
            _ => unreachable!("slot was just set to an object"),
        }
    }

    fn child_mapping(&self, key: &str) -> Option<&Self> {
        self.get(key).and_then(serde_json::Value::as_object)
    }

    fn string_leaf(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(serde_json::Value::as_str)
    }

    fn insert_string(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), serde_json::Value::String(value.to_string()));
    }
}

impl MappingNode for toml::Table {
    fn child_mapping_mut(&mut self, key: &str) -> &mut Self {
        use toml::Value;

        let slot = self
            .entry(key)
            .or_insert(Value::Table(toml::Table::new()));
        if !slot.is_table() {
            *slot = Value::Table(toml::Table::new());
        }
        match slot {
            Value::Table(table) => table,
            _ => unreachable!("slot was just set to a table"),
        }
    }

    fn child_mapping(&self, key: &str) -> Option<&Self> {
        self.get(key).and_then(toml::Value::as_table)
    }

    fn string_leaf(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(toml::Value::as_str)
    }

    fn insert_string(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), toml::Value::String(value.to_string()));
    }
}
