use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_prescription, delete_prescription, get_prescription, get_prescriptions,
    update_prescription,
};

pub fn init_prescriptions_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_prescription).get(get_prescriptions))
        .route(
            "/{id}",
            get(get_prescription)
                .put(update_prescription)
                .delete(delete_prescription),
        )
}
