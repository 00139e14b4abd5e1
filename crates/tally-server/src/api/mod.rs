//! Counter-facing HTTP handlers.
//!
//! Every counter route answers 200 with the in-memory value. Persistence
//! problems are handled inside the store and never turn into error responses.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct ValueBody {
    pub value: u64,
}

#[derive(Debug, Serialize)]
pub struct CountersBody {
    pub counters: BTreeMap<String, u64>,
}

pub async fn hit(state: &AppState, name: &str) -> Json<ValueBody> {
    let value = state.store().increment(name).await;
    tracing::debug!(counter = name, value, "hit");
    Json(ValueBody { value })
}

pub async fn get(state: &AppState, name: &str) -> Json<ValueBody> {
    let value = state.store().read(name).await;
    Json(ValueBody { value })
}

/// `GET /`
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": state.cfg().server.service_name,
    }))
}

/// `GET /api/counters`: every routed counter, 0 when never hit.
pub async fn list(State(state): State<AppState>) -> Json<CountersBody> {
    let table = state.store().snapshot().await;
    let counters = state
        .cfg()
        .counters
        .names
        .iter()
        .map(|name| (name.clone(), table.get(name)))
        .collect();
    Json(CountersBody { counters })
}
