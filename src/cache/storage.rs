//! SQLite-based cache storage
//!
//! One row per resource key. Rows expire by TTL but are never evicted by
//! policy; invalidation deletes whole families after mutations.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::CacheError;

/// Schema version - increment to trigger nuke-and-rebuild
const SCHEMA_VERSION: i32 = 2;

type Result<T> = std::result::Result<T, CacheError>;

/// SQLite-backed cache storage
pub struct CacheStorage {
    conn: Connection,
}

impl CacheStorage {
    /// Open or create cache storage at the default XDG cache location
    pub fn open() -> Result<Self> {
        let cache_dir = Self::cache_dir()?;
        Self::open_at(&cache_dir)
    }

    /// Get the cache directory path (~/.cache/traq on Linux/macOS)
    pub fn cache_dir() -> Result<PathBuf> {
        let cache_base = dirs::cache_dir().ok_or(CacheError::NoHome)?;
        Ok(cache_base.join("traq"))
    }

    /// Open cache storage at a specific directory (for testing)
    pub fn open_at(cache_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(cache_dir)
            .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {}", e)))?;

        let db_path = cache_dir.join("cache.db");
        let conn = Connection::open(&db_path)?;

        // Check schema version - nuke if mismatched
        let version: i32 = conn
            .pragma_query_value(None, "user_version", |r| r.get(0))
            .unwrap_or(0);

        if version != 0 && version != SCHEMA_VERSION {
            log::info!(
                "Cache schema version mismatch ({} != {}), rebuilding",
                version,
                SCHEMA_VERSION
            );
            drop(conn);
            std::fs::remove_file(&db_path)
                .map_err(|e| CacheError::Io(format!("Failed to remove cache DB: {}", e)))?;
            return Self::open_at(cache_dir);
        }

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS cache_entries (
                cache_key TEXT PRIMARY KEY NOT NULL,
                family TEXT NOT NULL,
                view TEXT NOT NULL,
                data TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                expires_at INTEGER NOT NULL,
                size_bytes INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_expires_at ON cache_entries(expires_at);
            CREATE INDEX IF NOT EXISTS idx_family ON cache_entries(family);
            "#,
        )?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        Ok(Self { conn })
    }

    /// Get cached data if fresh (not expired)
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let now = Utc::now().timestamp();

        let data: Option<String> = self
            .conn
            .query_row(
                "SELECT data FROM cache_entries
                 WHERE cache_key = ?1 AND expires_at > ?2",
                params![key, now],
                |row| row.get(0),
            )
            .optional()?;

        Ok(data.map(String::into_bytes))
    }

    /// Get cached data regardless of expiry (stale-while-error reads)
    pub fn get_stale(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let data: Option<String> = self
            .conn
            .query_row(
                "SELECT data FROM cache_entries WHERE cache_key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        Ok(data.map(String::into_bytes))
    }

    /// Store data under a key with a TTL
    pub fn put(
        &self,
        key: &str,
        data: &[u8],
        family: &str,
        view: &str,
        ttl: Duration,
    ) -> Result<()> {
        let now = Utc::now().timestamp();
        let expires = now + ttl.as_secs() as i64;

        self.conn.execute(
            "INSERT OR REPLACE INTO cache_entries
             (cache_key, family, view, data, created_at, expires_at, size_bytes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                key,
                family,
                view,
                String::from_utf8_lossy(data).to_string(),
                now,
                expires,
                data.len()
            ],
        )?;
        Ok(())
    }

    /// Delete a specific cache entry by key
    pub fn delete_by_key(&self, key: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM cache_entries WHERE cache_key = ?1", [key])?;
        Ok(deleted > 0)
    }

    /// Delete every entry belonging to a resource family.
    ///
    /// This is the invalidation primitive used after mutations: all list
    /// pages, filtered views, details, and derived views of the family go
    /// at once, regardless of their pagination/filter components.
    pub fn delete_by_family(&self, family: &str) -> Result<usize> {
        let deleted = self.conn.execute(
            "DELETE FROM cache_entries WHERE family = ?1",
            params![family],
        )?;
        Ok(deleted)
    }

    /// Clear all cache entries
    pub fn clear_all(&self) -> Result<ClearStats> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM cache_entries", [], |r| r.get(0))?;

        self.conn.execute("DELETE FROM cache_entries", [])?;

        Ok(ClearStats {
            entries_removed: count as usize,
        })
    }

    /// Rewrite every entry's expiry into the past (test hook)
    #[cfg(test)]
    pub fn force_expire_all(&self) -> Result<()> {
        self.conn
            .execute("UPDATE cache_entries SET expires_at = 0", [])?;
        Ok(())
    }

    /// Get cache statistics
    pub fn stats(&self) -> Result<CacheStats> {
        let now = Utc::now().timestamp();

        let total_entries: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM cache_entries", [], |r| r.get(0))?;

        let valid_entries: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM cache_entries WHERE expires_at > ?1",
            [now],
            |r| r.get(0),
        )?;

        let total_size: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(size_bytes), 0) FROM cache_entries",
            [],
            |r| r.get(0),
        )?;

        let oldest: Option<i64> = self
            .conn
            .query_row(
                "SELECT MIN(created_at) FROM cache_entries WHERE expires_at > ?1",
                [now],
                |r| r.get(0),
            )
            .optional()?
            .flatten();

        let newest: Option<i64> = self
            .conn
            .query_row(
                "SELECT MAX(created_at) FROM cache_entries WHERE expires_at > ?1",
                [now],
                |r| r.get(0),
            )
            .optional()?
            .flatten();

        Ok(CacheStats {
            total_entries: total_entries as usize,
            valid_entries: valid_entries as usize,
            expired_entries: (total_entries - valid_entries) as usize,
            total_size_bytes: total_size as usize,
            oldest_entry: oldest,
            newest_entry: newest,
        })
    }
}

/// Statistics about cache clear operation
#[derive(Debug)]
pub struct ClearStats {
    pub entries_removed: usize,
}

/// Statistics about cache state
#[derive(Debug)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
    pub total_size_bytes: usize,
    pub oldest_entry: Option<i64>,
    pub newest_entry: Option<i64>,
}
