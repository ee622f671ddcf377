use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    availability::WeekGrid,
    dto::{
        bookings::BookedSlotList,
        fields::{CreateFieldRequest, FieldList, UpdateFieldRequest},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::Field,
    response::ApiResponse,
    routes::params::{AvailabilityQuery, FieldQuery},
    services::{booking_service, field_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_fields).post(create_field))
        .route(
            "/{id}",
            get(get_field).put(update_field).delete(delete_field),
        )
        .route("/{id}/availability", get(field_availability))
        .route("/{id}/booked-slots", get(booked_slots))
}

#[utoipa::path(
    get,
    path = "/api/fields",
    params(FieldQuery),
    responses(
        (status = 200, description = "Browse active fields", body = ApiResponse<FieldList>)
    ),
    tag = "Fields"
)]
pub async fn list_fields(
    State(state): State<AppState>,
    Query(query): Query<FieldQuery>,
) -> AppResult<Json<ApiResponse<FieldList>>> {
    let resp = field_service::list_fields(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/fields/{id}",
    params(("id" = Uuid, Path, description = "Field ID")),
    responses(
        (status = 200, description = "Field details with images and amenities", body = ApiResponse<Field>),
        (status = 404, description = "Field not found")
    ),
    tag = "Fields"
)]
pub async fn get_field(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Field>>> {
    let resp = field_service::get_field(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/fields",
    request_body = CreateFieldRequest,
    responses(
        (status = 201, description = "Create a field", body = ApiResponse<Field>),
        (status = 403, description = "Owners only"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Fields"
)]
pub async fn create_field(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateFieldRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Field>>)> {
    let resp = field_service::create_field(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/fields/{id}",
    params(("id" = Uuid, Path, description = "Field ID")),
    request_body = UpdateFieldRequest,
    responses(
        (status = 200, description = "Update one of the caller's fields", body = ApiResponse<Field>),
        (status = 403, description = "Owners only"),
        (status = 404, description = "Field not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Fields"
)]
pub async fn update_field(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFieldRequest>,
) -> AppResult<Json<ApiResponse<Field>>> {
    let resp = field_service::update_field(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/fields/{id}",
    params(("id" = Uuid, Path, description = "Field ID")),
    responses(
        (status = 200, description = "Delete one of the caller's fields"),
        (status = 403, description = "Owners only"),
        (status = 404, description = "Field not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Fields"
)]
pub async fn delete_field(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = field_service::delete_field(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/fields/{id}/availability",
    params(("id" = Uuid, Path, description = "Field ID"), AvailabilityQuery),
    responses(
        (status = 200, description = "Seven-day slot grid starting at `week_start`", body = ApiResponse<WeekGrid>),
        (status = 400, description = "Malformed selected_time"),
        (status = 404, description = "Field not found")
    ),
    tag = "Availability"
)]
pub async fn field_availability(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<ApiResponse<WeekGrid>>> {
    let resp = booking_service::field_availability(&state, id, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/fields/{id}/booked-slots",
    params(("id" = Uuid, Path, description = "Field ID")),
    responses(
        (status = 200, description = "Pending and confirmed slots of the field", body = ApiResponse<BookedSlotList>),
        (status = 404, description = "Field not found")
    ),
    tag = "Availability"
)]
pub async fn booked_slots(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<BookedSlotList>>> {
    let resp = booking_service::list_booked_slots(&state, id).await?;
    Ok(Json(resp))
}
