//! Cache key generation using SHA-256 hashes

use sha2::{Digest, Sha256};

use crate::client::Family;

/// Generate a deterministic cache key from a resource key's components.
///
/// The key is a SHA-256 hash of (family, view, sorted parameters). Sorting
/// makes the key independent of parameter order, so two queries that
/// differ only in how their flags were spelled coalesce onto one entry.
///
/// `view` distinguishes the kinds of entry within a family: "list",
/// "detail", "summary", "active-timer", and the lookup collections.
pub fn cache_key(family: Family, view: &str, params: &[(&str, String)]) -> String {
    let mut hasher = Sha256::new();

    hasher.update(family.as_str().as_bytes());
    hasher.update(b"|");
    hasher.update(view.as_bytes());
    hasher.update(b"|");

    let mut sorted_params: Vec<_> = params.iter().collect();
    sorted_params.sort_by_key(|(k, _)| *k);

    for (k, v) in sorted_params {
        hasher.update(k.as_bytes());
        hasher.update(b"=");
        hasher.update(v.as_bytes());
        hasher.update(b"&");
    }

    format!("{:x}", hasher.finalize())
}

/// Key of the single-entity entry for `id` within a family.
pub fn entity_key(family: Family, id: i64) -> String {
    cache_key(family, "detail", &[("id", id.to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_param_order_independent() {
        let key1 = cache_key(
            Family::Tasks,
            "list",
            &[("limit", "10".to_string()), ("page", "1".to_string())],
        );
        let key2 = cache_key(
            Family::Tasks,
            "list",
            &[("page", "1".to_string()), ("limit", "10".to_string())],
        );

        assert_eq!(key1, key2);
    }

    #[test]
    fn test_cache_key_families_distinct() {
        let key1 = cache_key(Family::Tasks, "list", &[]);
        let key2 = cache_key(Family::Projects, "list", &[]);

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_cache_key_views_distinct() {
        let key1 = cache_key(Family::TimeEntries, "list", &[]);
        let key2 = cache_key(Family::TimeEntries, "summary", &[]);

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_cache_key_filters_distinct() {
        let key1 = cache_key(
            Family::Tasks,
            "list",
            &[("project_id", "1".to_string())],
        );
        let key2 = cache_key(
            Family::Tasks,
            "list",
            &[("project_id", "2".to_string())],
        );

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_entity_key_per_id() {
        assert_ne!(
            entity_key(Family::Clients, 1),
            entity_key(Family::Clients, 2)
        );
        assert_ne!(
            entity_key(Family::Clients, 1),
            entity_key(Family::Projects, 1)
        );
    }
}
