use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use super::controller::{
    create_hospital_admin, delete_hospital_admin, get_hospital_admins, get_my_hospital,
    update_hospital_admin,
};

pub fn init_hospital_admins_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_hospital_admins).post(create_hospital_admin))
        .route("/my-hospital", get(get_my_hospital))
        .route(
            "/{id}",
            put(update_hospital_admin).delete(delete_hospital_admin),
        )
}
