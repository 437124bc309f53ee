//! Object metadata cache invalidated by DDL.
//!
//! Callers keep whatever they learned about a database object (columns,
//! routine parameters, ...) under its qualified name. When a script that
//! creates, alters or drops objects is run, [`ObjectCache::invalidate_document`]
//! drops every entry the script may have made stale.

use crate::sql::{document::Document, keyword::StatementType, reference::ObjectRef};
use crate::*;

/// Normalized, possibly schema-qualified object name.
///
/// Unquoted parts fold to upper case the way the database folds them; quoted
/// parts keep their exact text with the quotes removed and `""` unescaped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    pub schema: Option<String>,
    pub name: String,
}

impl ObjectKey {
    pub fn new(schema: Option<&str>, name: &str) -> Self {
        Self {
            schema: schema.map(normalize),
            name: normalize(name),
        }
    }
}

fn normalize(part: &str) -> String {
    match part.strip_prefix('"').and_then(|p| p.strip_suffix('"')) {
        Some(quoted) => quoted.replace("\"\"", "\""),
        None => part.to_uppercase(),
    }
}

/// Bounded, thread-safe cache of object metadata.
#[derive(Clone)]
pub struct ObjectCache<V: Clone + Send + Sync + 'static> {
    cache: moka::sync::Cache<ObjectKey, V>,
}

impl<V: Clone + Send + Sync + 'static> ObjectCache<V> {
    pub fn new(capacity: u64) -> Self {
        Self {
            cache: moka::sync::Cache::new(capacity),
        }
    }

    pub fn insert(&self, key: ObjectKey, value: V) {
        self.cache.insert(key, value);
    }

    pub fn get(&self, key: &ObjectKey) -> Option<V> {
        self.cache.get(key)
    }

    pub fn invalidate(&self, key: &ObjectKey) {
        self.cache.invalidate(key);
    }

    /// Drop every entry named by a `CREATE`, `ALTER` or `DROP` in `document`
    /// and return how many were removed.
    ///
    /// A schema reference drops the whole schema. An unqualified name drops
    /// that name in every schema. `DECLARE` only names session-local objects
    /// and never invalidates anything.
    pub fn invalidate_document(&self, document: &Document) -> usize {
        let removed: usize = document
            .statements()
            .iter()
            .filter(|s| {
                matches!(
                    s.statement_type,
                    StatementType::Create | StatementType::Alter | StatementType::Drop
                )
            })
            .flat_map(|s| s.object_references())
            .map(|reference| self.invalidate_reference(reference))
            .sum();
        debug!("Invalidated {removed} cached objects");
        removed
    }

    fn invalidate_reference(&self, reference: &ObjectRef) -> usize {
        let schema = reference.object.schema.as_deref().map(normalize);
        let name = reference.object.name.as_deref().map(normalize);

        let stale: Vec<ObjectKey> = self
            .cache
            .iter()
            .map(|(key, _)| key)
            .filter(|key| match (&schema, &name) {
                (Some(schema), None) => key.schema.as_ref() == Some(schema),
                (wanted, Some(name)) => {
                    key.name == *name && (wanted.is_none() || key.schema == *wanted)
                }
                (None, None) => false,
            })
            .map(|key| ObjectKey::clone(&key))
            .collect();

        for key in &stale {
            trace!("Invalidating {key:?} after {} statement", reference.statement_type);
            self.cache.invalidate(key);
        }
        stale.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn filled() -> ObjectCache<&'static str> {
        let cache = ObjectCache::new(64);
        cache.insert(ObjectKey::new(Some("lib"), "orders"), "orders");
        cache.insert(ObjectKey::new(Some("LIB"), "items"), "items");
        cache.insert(ObjectKey::new(Some("app"), "orders"), "app orders");
        cache.insert(ObjectKey::new(Some("\"Mixed\""), "\"Tab\"\"le\""), "mixed");
        cache
    }

    #[rstest]
    #[case(ObjectKey::new(Some("lib"), "orders"), Some("LIB"), "ORDERS")]
    #[case(ObjectKey::new(None, "\"My Table\""), None, "My Table")]
    #[case(ObjectKey::new(Some("\"s\""), "\"a\"\"b\""), Some("s"), "a\"b")]
    fn keys_normalize(
        #[case] key: ObjectKey,
        #[case] schema: Option<&str>,
        #[case] name: &str,
    ) {
        assert_eq!(key.schema.as_deref(), schema);
        assert_eq!(key.name, name);
    }

    #[test]
    fn lookup_is_case_insensitive_for_plain_names() {
        let cache = filled();
        assert_eq!(cache.get(&ObjectKey::new(Some("Lib"), "Orders")), Some("orders"));
        assert_eq!(cache.get(&ObjectKey::new(Some("Mixed"), "Tab\"le")), None);
        cache.invalidate(&ObjectKey::new(Some("LIB"), "ORDERS"));
        assert_eq!(cache.get(&ObjectKey::new(Some("lib"), "orders")), None);
    }

    #[test]
    fn drop_invalidates_qualified_object() {
        let cache = filled();
        let removed = cache.invalidate_document(&Document::new("DROP TABLE lib.orders;"));
        assert_eq!(removed, 1);
        assert_eq!(cache.get(&ObjectKey::new(Some("lib"), "orders")), None);
        assert_eq!(cache.get(&ObjectKey::new(Some("app"), "orders")), Some("app orders"));
    }

    #[test]
    fn unqualified_name_hits_every_schema() {
        let cache = filled();
        let removed = cache.invalidate_document(&Document::new("ALTER TABLE orders ADD COLUMN x INT"));
        assert_eq!(removed, 2);
        assert_eq!(cache.get(&ObjectKey::new(Some("lib"), "items")), Some("items"));
    }

    #[test]
    fn schema_reference_drops_schema() {
        let cache = filled();
        let removed = cache.invalidate_document(&Document::new("CREATE SCHEMA lib;"));
        assert_eq!(removed, 2);
        assert_eq!(cache.get(&ObjectKey::new(Some("app"), "orders")), Some("app orders"));
    }

    #[test]
    fn quoted_names_match_exactly() {
        let cache = filled();
        let removed = cache.invalidate_document(&Document::new(
            "CREATE OR REPLACE VIEW \"Mixed\".\"Tab\"\"le\" AS SELECT 1 FROM t",
        ));
        assert_eq!(removed, 1);
    }

    #[test]
    fn declare_and_queries_do_not_invalidate() {
        let cache = filled();
        let doc = Document::new(
            "DECLARE GLOBAL TEMPORARY TABLE lib.orders (a INT); SELECT * FROM lib.items;",
        );
        assert_eq!(cache.invalidate_document(&doc), 0);
        assert_eq!(cache.get(&ObjectKey::new(Some("lib"), "orders")), Some("orders"));
    }
}
