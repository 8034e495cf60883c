use crate::state::AppState;
use axum::Router;

mod fallback;
pub mod generator;
pub mod handlers;
pub mod normalize;
pub mod types;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::plan_routes())
}
