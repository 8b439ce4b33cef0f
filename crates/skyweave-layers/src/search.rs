use glam::Vec3;
use skyweave_core::alloc::{HashMap, HashSet};

/// A named object a layer can point the user at.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Name as the source spells it.
    pub name: String,
    /// Where the object is on the celestial sphere.
    pub location: Vec3,
}

impl SearchResult {
    pub fn new(name: impl Into<String>, location: Vec3) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

/// Case-insensitive name index used by searchable layers.
#[derive(Debug, Default)]
pub(crate) struct SearchIndex {
    by_name: HashMap<String, SearchResult>,
}

impl SearchIndex {
    pub(crate) fn insert(&mut self, result: SearchResult) {
        self.by_name.insert(result.name.to_lowercase(), result);
    }

    pub(crate) fn find(&self, name: &str) -> Option<&SearchResult> {
        self.by_name.get(&name.to_lowercase())
    }

    /// Original spellings of every name starting with `prefix`, ignoring case.
    pub(crate) fn names_with_prefix(&self, prefix: &str) -> HashSet<String> {
        let prefix = prefix.to_lowercase();
        self.by_name
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(_, result)| result.name.clone())
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_name.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        let mut index = SearchIndex::default();
        index.insert(SearchResult::new("Betelgeuse", Vec3::X));

        assert_eq!(index.find("betelgeuse").map(|r| r.location), Some(Vec3::X));
        assert!(index.find("rigel").is_none());
    }

    #[test]
    fn prefix_returns_original_spelling() {
        let mut index = SearchIndex::default();
        index.insert(SearchResult::new("Mars", Vec3::X));
        index.insert(SearchResult::new("Mercury", Vec3::Y));
        index.insert(SearchResult::new("Venus", Vec3::Z));

        let names = index.names_with_prefix("m");
        assert_eq!(names.len(), 2);
        assert!(names.contains("Mars"));
        assert!(names.contains("Mercury"));
    }
}
