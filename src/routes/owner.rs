use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::{
        bookings::{BookingWithFieldList, OwnerDashboard},
        fields::FieldList,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::BookingListQuery,
    services::{field_service, owner_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/fields", get(my_fields))
        .route("/bookings", get(field_bookings))
        .route("/dashboard", get(dashboard))
}

#[utoipa::path(
    get,
    path = "/api/owner/fields",
    responses(
        (status = 200, description = "Fields owned by the caller", body = ApiResponse<FieldList>),
        (status = 403, description = "Owners only")
    ),
    security(("bearer_auth" = [])),
    tag = "Owner"
)]
pub async fn my_fields(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<FieldList>>> {
    let resp = field_service::list_owner_fields(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/owner/bookings",
    params(BookingListQuery),
    responses(
        (status = 200, description = "Bookings on the caller's fields", body = ApiResponse<BookingWithFieldList>),
        (status = 403, description = "Owners only")
    ),
    security(("bearer_auth" = [])),
    tag = "Owner"
)]
pub async fn field_bookings(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<ApiResponse<BookingWithFieldList>>> {
    let resp = owner_service::list_owner_bookings(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/owner/dashboard",
    responses(
        (status = 200, description = "Booking counts and confirmed revenue", body = ApiResponse<OwnerDashboard>),
        (status = 403, description = "Owners only")
    ),
    security(("bearer_auth" = [])),
    tag = "Owner"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<OwnerDashboard>>> {
    let resp = owner_service::dashboard(&state, &user).await?;
    Ok(Json(resp))
}
