//! Interning of locale tags into small opaque ids.

use ecow::EcoString;
use rustc_hash::FxHashMap;

/// An opaque handle for an interned locale tag.
///
/// Runs carry only this id; the tag itself is resolved lazily through the
/// [`LocaleCache`] when hyphenation needs it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct LocaleId(u32);

/// A caller-owned interner from locale tags to [`LocaleId`]s.
#[derive(Debug, Default, Clone)]
pub struct LocaleCache {
    ids: FxHashMap<EcoString, LocaleId>,
    tags: Vec<EcoString>,
}

impl LocaleCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a locale tag, returning the same id for equal tags.
    pub fn intern(&mut self, tag: &str) -> LocaleId {
        if let Some(&id) = self.ids.get(tag) {
            return id;
        }
        let id = LocaleId(self.tags.len() as u32);
        self.tags.push(tag.into());
        self.ids.insert(tag.into(), id);
        id
    }

    /// Resolves an id back to its tag.
    ///
    /// Panics if the id was not produced by this cache.
    pub fn resolve(&self, id: LocaleId) -> &str {
        &self.tags[id.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interning() {
        let mut cache = LocaleCache::new();
        let en = cache.intern("en-US");
        let pl = cache.intern("pl");
        assert_eq!(cache.intern("en-US"), en);
        assert_ne!(en, pl);
        assert_eq!(cache.resolve(en), "en-US");
        assert_eq!(cache.resolve(pl), "pl");
    }
}
