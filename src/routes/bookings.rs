use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::bookings::{BookingWithFieldList, CreateBookingRequest, CreatedBooking},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Booking,
    response::ApiResponse,
    services::booking_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_booking))
        .route("/mine", get(my_bookings))
        .route("/{id}/confirm", patch(confirm_booking))
}

#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Submit a pending one-hour booking", body = ApiResponse<CreatedBooking>),
        (status = 400, description = "Missing, unknown or past slot; inactive field"),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Customers only"),
        (status = 404, description = "Field not found"),
        (status = 409, description = "Slot already taken"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Bookings"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CreatedBooking>>)> {
    let resp = booking_service::create_booking(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/bookings/mine",
    responses(
        (status = 200, description = "The caller's bookings", body = ApiResponse<BookingWithFieldList>),
        (status = 403, description = "Customers only")
    ),
    security(("bearer_auth" = [])),
    tag = "Bookings"
)]
pub async fn my_bookings(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<BookingWithFieldList>>> {
    let resp = booking_service::list_customer_bookings(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/bookings/{id}/confirm",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Confirm a pending booking on one of the caller's fields", body = ApiResponse<Booking>),
        (status = 400, description = "Booking is not pending"),
        (status = 403, description = "Owners only"),
        (status = 404, description = "Booking not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Bookings"
)]
pub async fn confirm_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    let resp = booking_service::confirm_booking(&state, &user, id).await?;
    Ok(Json(resp))
}
