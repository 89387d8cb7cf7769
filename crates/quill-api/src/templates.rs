//! Askama template structs, one per page. Every field a template reads is
//! listed here explicitly; there is no ambient render context.

use askama::Template;
use askama_web::WebTemplate;
use chrono::NaiveDateTime;

use quill_db::models::PostRow;

/// A post prepared for display.
pub struct PostView {
    pub id: i64,
    pub subject: String,
    pub content: String,
    pub created: String,
}

impl From<PostRow> for PostView {
    fn from(row: PostRow) -> Self {
        // SQLite's datetime('now') yields "YYYY-MM-DD HH:MM:SS" with no
        // zone marker; shown raw if it ever fails to parse.
        let created = NaiveDateTime::parse_from_str(&row.created_at, "%Y-%m-%d %H:%M:%S")
            .map(|dt| dt.format("%b %d, %Y at %H:%M").to_string())
            .unwrap_or_else(|_| row.created_at.clone());

        Self {
            id: row.id,
            subject: row.subject,
            content: row.content,
            created,
        }
    }
}

/// Front page: the most recent posts.
#[derive(Template, WebTemplate)]
#[template(path = "front.html")]
pub struct FrontTemplate {
    pub posts: Vec<PostView>,
}

/// New-post form, with the submitted values echoed back on rejection.
#[derive(Template, WebTemplate)]
#[template(path = "post_form.html")]
pub struct PostFormTemplate {
    pub subject: String,
    pub content: String,
    pub error: Option<&'static str>,
}

impl PostFormTemplate {
    pub fn empty() -> Self {
        Self {
            subject: String::new(),
            content: String::new(),
            error: None,
        }
    }
}

/// A single post at its permalink.
#[derive(Template, WebTemplate)]
#[template(path = "permalink.html")]
pub struct PermalinkTemplate {
    pub post: PostView,
}

/// Signup form. Username and email are echoed back on rejection; the
/// password fields never are.
#[derive(Template, WebTemplate)]
#[template(path = "signup_form.html")]
pub struct SignupFormTemplate {
    pub username: String,
    pub email: String,
    pub username_error: Option<&'static str>,
    pub password_error: Option<&'static str>,
    pub verify_error: Option<&'static str>,
    pub email_error: Option<&'static str>,
}

impl SignupFormTemplate {
    pub fn empty() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            username_error: None,
            password_error: None,
            verify_error: None,
            email_error: None,
        }
    }
}

/// Signup confirmation page.
#[derive(Template, WebTemplate)]
#[template(path = "thanks.html")]
pub struct ThanksTemplate {
    pub username: String,
}
