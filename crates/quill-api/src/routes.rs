use axum::{Router, routing::get};

use crate::state::AppState;
use crate::{posts, signup};

/// All routes. `/{id}` is registered last in source order for
/// readability, but axum matches static segments first regardless, so
/// `/newpost` and `/signup` are never shadowed.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(posts::front_page))
        .route("/newpost", get(posts::new_post_form).post(posts::create_post))
        .route("/signup", get(signup::signup_form).post(signup::signup))
        .route("/signup/thanks", get(signup::signup_thanks))
        .route("/{id}", get(posts::permalink))
        .with_state(state)
}
