use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_patient, delete_patient, get_patient, get_patients, update_patient};

pub fn init_patients_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_patient).get(get_patients))
        .route(
            "/{id}",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
}
