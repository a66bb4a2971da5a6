use crate::db::OrmConn;

#[derive(Clone)]
pub struct AppState {
    pub orm: OrmConn,
}
