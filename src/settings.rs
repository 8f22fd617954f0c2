//! The resolved settings table.

use std::collections::BTreeMap;

use crate::error::{ConfigError, Result};

/// Resolved name -> value mapping.
///
/// Each name may be written once. Iteration is in lexicographic name order,
/// which is the order the emitter writes them in.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SettingsTable {
    values: BTreeMap<String, String>,
}

impl SettingsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a setting. Fails if `name` was already recorded.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let name = name.into();
        if self.values.contains_key(&name) {
            return Err(ConfigError::DuplicateSetting(name));
        }
        self.values.insert(name, value.into());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Settings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Setting names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut table = SettingsTable::new();
        assert!(table.is_empty());
        table.insert("CC", "/usr/bin/g++").unwrap();
        assert_eq!(table.get("CC"), Some("/usr/bin/g++"));
        assert!(table.contains("CC"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_write_once() {
        let mut table = SettingsTable::new();
        table.insert("CC", "a").unwrap();
        let err = table.insert("CC", "b").unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateSetting(ref n) if n == "CC"));
        assert_eq!(table.get("CC"), Some("a"));
    }

    #[test]
    fn test_iteration_is_sorted() {
        let mut table = SettingsTable::new();
        for name in ["VERBOSE", "AR", "OUTLIB", "CC", "OUTBIN"] {
            table.insert(name, "").unwrap();
        }
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, vec!["AR", "CC", "OUTBIN", "OUTLIB", "VERBOSE"]);
    }
}
