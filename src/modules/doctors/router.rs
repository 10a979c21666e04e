use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_doctor, delete_doctor, get_doctor, get_doctors, update_doctor};

pub fn init_doctors_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_doctor).get(get_doctors))
        .route(
            "/{id}",
            get(get_doctor).put(update_doctor).delete(delete_doctor),
        )
}
