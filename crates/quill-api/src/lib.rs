//! Quill web layer: request handlers, templates, and the router.
//!
//! The post workflow lives in [`posts`], the signup workflow in [`signup`].
//! Both talk to the store through [`state::AppState`] and render through
//! the askama template structs in [`templates`]. The identifying cookie is
//! read and written through the codec in [`session`].

pub mod posts;
pub mod routes;
pub mod session;
pub mod signup;
pub mod state;
pub mod templates;

pub use routes::router;
pub use state::{AppState, AppStateInner};
