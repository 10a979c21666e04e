use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_hospital, delete_hospital, get_hospital, get_hospitals, update_hospital,
};

pub fn init_hospitals_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_hospital).get(get_hospitals))
        .route(
            "/{id}",
            get(get_hospital).put(update_hospital).delete(delete_hospital),
        )
}
