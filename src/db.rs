use parking_lot::Mutex;
use rusqlite::Connection;
use std::sync::Arc;

pub type Db = Arc<Mutex<Connection>>;

pub fn open(path: &str) -> rusqlite::Result<Connection> {
    tracing::info!("[db] Database: {}", path);
    let conn = Connection::open(path)?;

    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;
    relax_foreign_keys(&conn)?;

    create_tables(&conn)?;

    Ok(conn)
}

#[cfg(test)]
pub fn open_memory() -> Connection {
    let conn = Connection::open_in_memory().expect("Failed to open in-memory database");
    relax_foreign_keys(&conn).expect("Failed to set PRAGMA");
    create_tables(&conn).expect("Failed to create tables");

    conn
}

#[cfg(test)]
pub fn shared_memory() -> Db {
    Arc::new(Mutex::new(open_memory()))
}

/// `videos.channel_id` is a plain reference: videos can be stored before their
/// channel row exists. The bundled SQLite enforces foreign keys by default.
fn relax_foreign_keys(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = OFF;")
}

fn create_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS channels (
            channel_id TEXT PRIMARY KEY,
            title TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL DEFAULT '',
            custom_url TEXT NOT NULL DEFAULT '',
            subscriber_count INTEGER NOT NULL DEFAULT 0,
            view_count INTEGER NOT NULL DEFAULT 0,
            video_count INTEGER NOT NULL DEFAULT 0,
            thumbnail TEXT NOT NULL DEFAULT '',
            banner_url TEXT NOT NULL DEFAULT '',
            published_at TEXT NOT NULL DEFAULT '',
            last_updated TEXT
        );

        CREATE TABLE IF NOT EXISTS videos (
            video_id TEXT PRIMARY KEY,
            channel_id TEXT NOT NULL,
            title TEXT NOT NULL DEFAULT '',
            thumbnail TEXT NOT NULL DEFAULT '',
            view_count INTEGER NOT NULL DEFAULT 0,
            comment_count INTEGER NOT NULL DEFAULT 0,
            published_at TEXT NOT NULL DEFAULT '',
            duration TEXT NOT NULL DEFAULT '',
            duration_seconds INTEGER NOT NULL DEFAULT 0,
            is_short INTEGER NOT NULL DEFAULT 0,
            last_updated TEXT,
            FOREIGN KEY (channel_id) REFERENCES channels(channel_id)
        );

        CREATE INDEX IF NOT EXISTS idx_videos_latest ON videos (channel_id, is_short, published_at DESC);
        CREATE INDEX IF NOT EXISTS idx_videos_popular ON videos (channel_id, is_short, view_count DESC);",
    )
}
