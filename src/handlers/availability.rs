use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::services::scheduling::{self, SlotAvailability};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<String>,
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub date: String,
    pub slots: Vec<SlotAvailability>,
}

// GET /api/availability?date=
pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let date = query.date.unwrap_or_default();

    let existing = {
        let db = state.db.lock().unwrap();
        queries::bookings_for_date(&db, &date)?
    };

    let slots = scheduling::slot_availability(&date, &existing);

    Ok(Json(AvailabilityResponse { date, slots }))
}
