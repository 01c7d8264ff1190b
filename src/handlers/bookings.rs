use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingRequest, IntField};
use crate::services::scheduling;
use crate::state::AppState;

const CONFLICT_MESSAGE: &str =
    "A booking already exists that overlaps with the selected date, time, or duration.";

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let errors = body.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    // validate() guarantees date and time parse
    let date = body.date.clone().unwrap_or_default();
    let start = scheduling::slot_datetime(&date, body.time.as_deref().unwrap_or_default())
        .ok_or_else(|| anyhow::anyhow!("validated date/time failed to parse"))?;
    let hours = body.hours.as_ref().and_then(IntField::as_i64).unwrap_or_default();

    let db = state.db.lock().unwrap();

    // Check-then-insert is not one transaction; two concurrent creates for
    // the same slot can both pass the check. Matches the reference behavior.
    let existing = queries::bookings_for_date(&db, &date)?;
    if let Some(conflict) = scheduling::find_conflict(start, hours, &existing) {
        tracing::info!(
            date = %date,
            conflicting_id = %conflict.id,
            "rejected overlapping booking"
        );
        return Err(AppError::Conflict(CONFLICT_MESSAGE.to_string()));
    }

    let booking = body.into_booking(uuid::Uuid::new_v4().to_string());
    queries::insert_booking(&db, &booking)?;

    tracing::info!(id = %booking.id, date = %booking.date, time = %booking.time, "created booking");

    Ok((StatusCode::CREATED, Json(booking)))
}

// GET /api/bookings?page=&limit=
#[derive(Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub total_bookings: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub bookings: Vec<Booking>,
}

/// Upper bound on page size; also keeps the offset and page-count arithmetic
/// below away from i64 overflow on hostile query params.
const MAX_PAGE_SIZE: i64 = 100;

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).clamp(1, MAX_PAGE_SIZE);
    let offset = page.saturating_sub(1).saturating_mul(limit);

    let db = state.db.lock().unwrap();
    let bookings = queries::list_bookings(&db, limit, offset)?;
    let total_bookings = queries::count_bookings(&db)?;

    Ok(Json(ListResponse {
        total_bookings,
        total_pages: (total_bookings + limit - 1) / limit,
        current_page: page,
        bookings,
    }))
}

// DELETE /api/bookings/:id
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removed = {
        let db = state.db.lock().unwrap();
        queries::delete_booking(&db, &id)?
    };

    if !removed {
        tracing::debug!(%id, "delete for unknown booking id");
    }

    // Idempotent: missing ids still report success.
    Ok(Json(
        serde_json::json!({ "message": "Booking deleted successfully" }),
    ))
}
