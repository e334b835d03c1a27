//! SQLite-backed object store.
//!
//! Provides [`LocalStore`], which keeps declared shapes and objects in a
//! `rusqlite::Connection` and runs schema migrations on open. Blocking
//! database work is moved off the async executor with `spawn_blocking`.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use tracing::{debug, info, trace, warn};

use super::{migrations, validation, ObjectStore};
use crate::types::bookmark::{CONTEXT_KEY, CONTEXT_PREFIX};
use crate::types::errors::StoreError;

/// Object store kept in a local SQLite database.
///
/// Has no cache layer of its own, so the `max_age` hint on
/// [`ObjectStore::get_all`] is accepted and ignored.
#[derive(Clone)]
pub struct LocalStore {
    conn: Arc<Mutex<Connection>>,
}

impl LocalStore {
    /// Opens (or creates) a store at the given file path and runs migrations.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref())?;
        migrations::run_all(&conn)?;
        info!(path = %path.as_ref().display(), "opened local object store");
        Ok(Self::from_connection(conn))
    }

    /// Opens an in-memory store. Everything is discarded on drop.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        migrations::run_all(&conn)?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs `f` against the connection on the blocking pool.
    async fn with_conn<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|e| StoreError::Unavailable(format!("connection lock poisoned: {}", e)))?;
            f(&*guard)
        })
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?
    }
}

/// Splits `a/b/c` into (`a/b/`, `c`).
fn split_path(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(idx) => (&path[..=idx], &path[idx + 1..]),
        None => ("", path),
    }
}

fn load_shape(conn: &Connection, tag: &str) -> Result<Option<Value>, StoreError> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT shape FROM object_types WHERE tag = ?1",
            params![tag],
            |row| row.get(0),
        )
        .optional()?;
    raw.map(|s| serde_json::from_str(&s).map_err(StoreError::from))
        .transpose()
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn declare_type(&self, tag: &str, shape: &Value) -> Result<(), StoreError> {
        let tag = tag.to_string();
        let shape = serde_json::to_string(shape)?;
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO object_types (tag, shape, declared_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(tag) DO UPDATE SET shape = excluded.shape",
                params![tag, shape, chrono::Utc::now().timestamp()],
            )?;
            debug!(%tag, "declared object type");
            Ok(())
        })
        .await
    }

    async fn get_object(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let path = path.to_string();
        self.with_conn(move |conn| {
            let body: Option<String> = conn
                .query_row(
                    "SELECT body FROM objects WHERE path = ?1",
                    params![path],
                    |row| row.get(0),
                )
                .optional()?;
            trace!(%path, found = body.is_some(), "get_object");
            body.map(|b| serde_json::from_str(&b).map_err(StoreError::from))
                .transpose()
        })
        .await
    }

    async fn get_all(
        &self,
        prefix: &str,
        max_age: Option<Duration>,
    ) -> Result<Option<BTreeMap<String, Value>>, StoreError> {
        trace!(%prefix, ?max_age, "get_all");
        let prefix = prefix.to_string();
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare("SELECT name, body FROM objects WHERE parent = ?1")?;
            let rows = stmt.query_map(params![prefix], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?;

            let mut listing: BTreeMap<String, Value> = BTreeMap::new();
            for row in rows {
                let (name, body) = row?;
                listing.insert(name, serde_json::from_str(&body)?);
            }

            if listing.is_empty() {
                Ok(None)
            } else {
                Ok(Some(listing))
            }
        })
        .await
    }

    async fn store_object(&self, tag: &str, path: &str, object: &Value) -> Result<(), StoreError> {
        let tag = tag.to_string();
        let path = path.to_string();
        let mut body = object.clone();
        self.with_conn(move |conn| {
            let shape = load_shape(conn, &tag)?.ok_or_else(|| StoreError::UnknownType(tag.clone()))?;

            if let Value::Object(map) = &mut body {
                map.insert(
                    CONTEXT_KEY.to_string(),
                    Value::String(format!("{}{}", CONTEXT_PREFIX, tag)),
                );
            }
            if let Err(e) = validation::validate(&tag, &shape, &body) {
                warn!(%tag, %path, error = %e, "rejected object");
                return Err(e);
            }

            let (parent, name) = split_path(&path);
            conn.execute(
                "INSERT INTO objects (path, parent, name, type_tag, body, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(path) DO UPDATE SET
                     type_tag = excluded.type_tag,
                     body = excluded.body,
                     updated_at = excluded.updated_at",
                params![
                    path,
                    parent,
                    name,
                    tag,
                    serde_json::to_string(&body)?,
                    chrono::Utc::now().timestamp()
                ],
            )?;
            debug!(%tag, %path, "stored object");
            Ok(())
        })
        .await
    }

    async fn remove(&self, path: &str) -> Result<(), StoreError> {
        let path = path.to_string();
        self.with_conn(move |conn| {
            let affected = conn.execute("DELETE FROM objects WHERE path = ?1", params![path])?;
            debug!(%path, affected, "removed object");
            Ok(())
        })
        .await
    }
}
