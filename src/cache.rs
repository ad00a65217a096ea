use crate::db::Db;
use crate::models::{Channel, Video};
use crate::store;
use rusqlite::Connection;
use std::future::Future;

/// A record that lives in the local store under a string key.
pub trait CachedRecord: Sized {
    fn load(conn: &Connection, key: &str) -> rusqlite::Result<Option<Self>>;
    fn persist(&mut self, conn: &Connection) -> rusqlite::Result<()>;
}

impl CachedRecord for Channel {
    fn load(conn: &Connection, key: &str) -> rusqlite::Result<Option<Self>> {
        store::get_channel(conn, key)
    }

    fn persist(&mut self, conn: &Connection) -> rusqlite::Result<()> {
        store::put_channel(conn, self)
    }
}

impl CachedRecord for Video {
    fn load(conn: &Connection, key: &str) -> rusqlite::Result<Option<Self>> {
        store::get_video(conn, key)
    }

    fn persist(&mut self, conn: &Connection) -> rusqlite::Result<()> {
        store::put_video(conn, self)
    }
}

/// Returns the stored record for `key` if there is one; otherwise awaits `fetch`
/// and persists whatever it produced.
///
/// Stored records are returned as-is, regardless of `last_updated`. A fetch that
/// yields `None` leaves the store untouched. The connection lock is released
/// while `fetch` runs.
pub async fn cache_first<T, F, Fut>(db: &Db, key: &str, fetch: F) -> rusqlite::Result<Option<T>>
where
    T: CachedRecord,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let cached = {
        let conn = db.lock();
        T::load(&conn, key)?
    };
    if let Some(record) = cached {
        tracing::debug!("[cache] Hit for {}", key);
        return Ok(Some(record));
    }

    let mut fetched = match fetch().await {
        Some(record) => record,
        None => return Ok(None),
    };

    {
        let conn = db.lock();
        fetched.persist(&conn)?;
    }
    Ok(Some(fetched))
}
