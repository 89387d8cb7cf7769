use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS posts (
            id          INTEGER PRIMARY KEY,
            partition   TEXT NOT NULL,
            subject     TEXT NOT NULL,
            content     TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_posts_partition_created
            ON posts(partition, created_at);

        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY,
            partition   TEXT NOT NULL,
            username    TEXT NOT NULL,
            password    TEXT NOT NULL,
            email       TEXT,
            created_at  TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(partition, username)
        );
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
