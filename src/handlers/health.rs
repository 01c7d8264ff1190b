use axum::http::StatusCode;

pub async fn welcome() -> &'static str {
    "Welcome to the Restaurant Booking API"
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
