use std::sync::LazyLock;

use regex::Regex;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]{3,20}$").unwrap());

static PASSWORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^.{3,20}$").unwrap());

// NOTE: the dot before the final run is unescaped and matches any
// character, so "a@b?c" passes. Pinned by email_dot_is_permissive below.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\S]+@[\S]+.[\S]+$").unwrap());

/// 3-20 characters from [a-zA-Z0-9_-], nothing else anywhere.
pub fn valid_username(username: &str) -> bool {
    !username.is_empty() && USERNAME_RE.is_match(username)
}

/// Any 3-20 characters.
pub fn valid_password(password: &str) -> bool {
    !password.is_empty() && PASSWORD_RE.is_match(password)
}

/// Email is optional: empty passes. Non-empty must look like
/// something@something.something, loosely.
pub fn valid_email(email: &str) -> bool {
    email.is_empty() || EMAIL_RE.is_match(email)
}
