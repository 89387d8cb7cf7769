/// Database row types — these map directly to SQLite rows.

pub struct PostRow {
    pub id: i64,
    pub subject: String,
    pub content: String,
    pub created_at: String,
}

pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub created_at: String,
}
