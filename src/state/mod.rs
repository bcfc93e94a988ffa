use std::path::PathBuf;
use std::sync::Arc;

pub type SharedState = axum::extract::State<Arc<State>>;
pub type NestedRouter = axum::Router<Arc<State>>;

#[derive(Debug)]
pub struct State {
    pub db: sqlx::SqlitePool,
    pub media_root: PathBuf,
}

impl State {
    pub fn new(db: sqlx::SqlitePool, media_root: PathBuf) -> State {
        State { db, media_root }
    }
}
