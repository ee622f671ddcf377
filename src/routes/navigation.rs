use axum::{Json, Router, extract::Query, routing::get};

use crate::{
    dto::navigation::{ResolveQuery, RouteDecision},
    middleware::auth::{AuthUser, session_state},
    navigation::{AppRoute, resolve},
    response::ApiResponse,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/resolve", get(resolve_route))
}

#[utoipa::path(
    get,
    path = "/api/navigation/resolve",
    params(("path" = String, Query, description = "Client path, e.g. /book/{field_id}")),
    responses(
        (status = 200, description = "Render, or where to redirect the caller", body = ApiResponse<RouteDecision>)
    ),
    security((), ("bearer_auth" = [])),
    tag = "Navigation"
)]
pub async fn resolve_route(
    user: Option<AuthUser>,
    Query(query): Query<ResolveQuery>,
) -> Json<ApiResponse<RouteDecision>> {
    let state = session_state(user.as_ref());
    let decision = RouteDecision {
        required_role: AppRoute::parse(&query.path).required_role(),
        decision: resolve(&query.path, &state),
        path: query.path,
    };
    Json(ApiResponse::item("Route resolved", decision))
}
