use std::sync::Arc;

use quill_db::Database;

use crate::session::{IdentityCodec, PlainIdentity};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub identity: Box<dyn IdentityCodec>,
}

impl AppStateInner {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            identity: Box::new(PlainIdentity),
        }
    }
}
