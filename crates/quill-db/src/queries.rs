use anyhow::Result;
use rusqlite::Connection;

use crate::models::{PostRow, UserRow};
use crate::{Database, StoreError};

impl Database {
    // -- Posts --

    /// Insert a post under `partition` and return its numeric id.
    pub fn create_post(&self, partition: &str, subject: &str, content: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO posts (partition, subject, content) VALUES (?1, ?2, ?3)",
                (partition, subject, content),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Most recent posts, newest first. Rowid breaks ties within a second.
    pub fn recent_posts(&self, partition: &str, limit: u32) -> Result<Vec<PostRow>> {
        self.with_conn(|conn| query_recent_posts(conn, partition, limit))
    }

    pub fn get_post(&self, partition: &str, id: i64) -> Result<Option<PostRow>> {
        self.with_conn(|conn| query_post_by_id(conn, partition, id))
    }

    // -- Users --

    /// Insert a user under `partition` and return its numeric id.
    ///
    /// Uniqueness of (partition, username) is enforced by the store itself,
    /// so two concurrent signups that both passed the lookup still cannot
    /// both land; the loser gets [`StoreError::UsernameTaken`].
    pub fn create_user(
        &self,
        partition: &str,
        username: &str,
        password_hash: &str,
        email: Option<&str>,
    ) -> Result<i64, StoreError> {
        self.with_conn(|conn| {
            match conn.execute(
                "INSERT INTO users (partition, username, password, email) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![partition, username, password_hash, email],
            ) {
                Ok(_) => Ok(Ok(conn.last_insert_rowid())),
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Ok(Err(StoreError::UsernameTaken))
                }
                Err(e) => Err(e.into()),
            }
        })
        .map_err(StoreError::Other)?
    }

    pub fn get_user_by_username(&self, partition: &str, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_username(conn, partition, username))
    }

    pub fn get_user_by_id(&self, partition: &str, id: i64) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_id(conn, partition, id))
    }
}

fn query_recent_posts(conn: &Connection, partition: &str, limit: u32) -> Result<Vec<PostRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, subject, content, created_at
         FROM posts
         WHERE partition = ?1
         ORDER BY created_at DESC, id DESC
         LIMIT ?2",
    )?;

    let rows = stmt
        .query_map(rusqlite::params![partition, limit], |row| {
            Ok(PostRow {
                id: row.get(0)?,
                subject: row.get(1)?,
                content: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_post_by_id(conn: &Connection, partition: &str, id: i64) -> Result<Option<PostRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, subject, content, created_at FROM posts WHERE partition = ?1 AND id = ?2",
    )?;

    let row = stmt
        .query_row(rusqlite::params![partition, id], |row| {
            Ok(PostRow {
                id: row.get(0)?,
                subject: row.get(1)?,
                content: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_user_by_username(
    conn: &Connection,
    partition: &str,
    username: &str,
) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, password, email, created_at
         FROM users WHERE partition = ?1 AND username = ?2",
    )?;

    let row = stmt
        .query_row(rusqlite::params![partition, username], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                password: row.get(2)?,
                email: row.get(3)?,
                created_at: row.get(4)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_user_by_id(conn: &Connection, partition: &str, id: i64) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, password, email, created_at
         FROM users WHERE partition = ?1 AND id = ?2",
    )?;

    let row = stmt
        .query_row(rusqlite::params![partition, id], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                password: row.get(2)?,
                email: row.get(3)?,
                created_at: row.get(4)?,
            })
        })
        .optional()?;

    Ok(row)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{BLOG_ROOT, Database, StoreError, USER_ROOT};

    fn open_test_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(&dir.path().join("quill.db")).unwrap();
        (dir, db)
    }

    #[test]
    fn create_and_read_post() {
        let (_dir, db) = open_test_db();

        let id = db.create_post(BLOG_ROOT, "First!", "hello\nworld").unwrap();
        let post = db.get_post(BLOG_ROOT, id).unwrap().unwrap();
        assert_eq!(post.subject, "First!");
        assert_eq!(post.content, "hello\nworld");
        assert!(!post.created_at.is_empty());
    }

    #[test]
    fn missing_post_is_none() {
        let (_dir, db) = open_test_db();
        assert!(db.get_post(BLOG_ROOT, 999).unwrap().is_none());
    }

    #[test]
    fn post_is_scoped_to_its_partition() {
        let (_dir, db) = open_test_db();
        let id = db.create_post(BLOG_ROOT, "s", "c").unwrap();
        assert!(db.get_post("elsewhere", id).unwrap().is_none());
    }

    #[test]
    fn recent_posts_returns_ten_newest_descending() {
        let (_dir, db) = open_test_db();
        for i in 1..=12 {
            db.create_post(BLOG_ROOT, &format!("post {i}"), "body").unwrap();
        }

        let recent = db.recent_posts(BLOG_ROOT, 10).unwrap();
        assert_eq!(recent.len(), 10);
        let subjects: Vec<_> = recent.iter().map(|p| p.subject.as_str()).collect();
        let expected: Vec<String> = (3..=12).rev().map(|i| format!("post {i}")).collect();
        assert_eq!(subjects, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn create_user_and_look_up_both_ways() {
        let (_dir, db) = open_test_db();

        let id = db
            .create_user(USER_ROOT, "alice", "salt0|deadbeef", Some("a@b.c"))
            .unwrap();

        let by_name = db.get_user_by_username(USER_ROOT, "alice").unwrap().unwrap();
        assert_eq!(by_name.id, id);
        assert_eq!(by_name.password, "salt0|deadbeef");
        assert_eq!(by_name.email.as_deref(), Some("a@b.c"));

        let by_id = db.get_user_by_id(USER_ROOT, id).unwrap().unwrap();
        assert_eq!(by_id.username, "alice");
    }

    #[test]
    fn duplicate_username_is_a_conflict() {
        let (_dir, db) = open_test_db();

        db.create_user(USER_ROOT, "alice", "s|h", None).unwrap();
        let err = db.create_user(USER_ROOT, "alice", "s|h2", None).unwrap_err();
        assert!(matches!(err, StoreError::UsernameTaken));

        // Only the first insert landed.
        let row = db.get_user_by_username(USER_ROOT, "alice").unwrap().unwrap();
        assert_eq!(row.password, "s|h");
    }

    #[test]
    fn username_uniqueness_is_per_partition() {
        let (_dir, db) = open_test_db();
        db.create_user(USER_ROOT, "alice", "s|h", None).unwrap();
        db.create_user("staging", "alice", "s|h", None).unwrap();
    }

    #[test]
    fn absent_user_lookups_are_none() {
        let (_dir, db) = open_test_db();
        assert!(db.get_user_by_username(USER_ROOT, "ghost").unwrap().is_none());
        assert!(db.get_user_by_id(USER_ROOT, 42).unwrap().is_none());
    }
}
