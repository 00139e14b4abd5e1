//! Axum router wiring.
//!
//! Each configured counter name gets its own pair of routes,
//! `/api/{name}/hit` and `/api/{name}/get`. Names outside the config fall
//! through to axum's 404.

use std::sync::Arc;

use axum::{extract::State, routing::get, Router};

use crate::{api, app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(api::root))
        .route("/api/counters", get(api::list))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics));

    for name in &state.cfg().counters.names {
        let name: Arc<str> = Arc::from(name.as_str());

        let hit_name = Arc::clone(&name);
        router = router.route(
            &format!("/api/{name}/hit"),
            get(move |State(state): State<AppState>| {
                let name = Arc::clone(&hit_name);
                async move { api::hit(&state, &name).await }
            }),
        );

        let get_name = Arc::clone(&name);
        router = router.route(
            &format!("/api/{name}/get"),
            get(move |State(state): State<AppState>| {
                let name = Arc::clone(&get_name);
                async move { api::get(&state, &name).await }
            }),
        );
    }

    router.with_state(state)
}
