use axum::{
    Json, Router,
    http::{HeaderMap, header},
    routing::get,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{
    dto::locale::{LocaleView, SetLanguageRequest},
    locale::{LANGUAGE_COOKIE, resolve},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(current_locale).put(set_locale))
}

#[utoipa::path(
    get,
    path = "/api/locale",
    responses(
        (status = 200, description = "Language from the cookie, else Accept-Language, else English", body = ApiResponse<LocaleView>)
    ),
    tag = "Locale"
)]
pub async fn current_locale(jar: CookieJar, headers: HeaderMap) -> Json<ApiResponse<LocaleView>> {
    let stored = jar.get(LANGUAGE_COOKIE).map(|c| c.value());
    let browser = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok());
    let language = resolve(stored, browser);
    Json(ApiResponse::success(
        "Locale",
        LocaleView::for_language(language),
        Some(Meta::empty()),
    ))
}

#[utoipa::path(
    put,
    path = "/api/locale",
    request_body = SetLanguageRequest,
    responses(
        (status = 200, description = "Remember the language choice", body = ApiResponse<LocaleView>),
        (status = 422, description = "Unsupported language")
    ),
    tag = "Locale"
)]
pub async fn set_locale(
    jar: CookieJar,
    Json(payload): Json<SetLanguageRequest>,
) -> (CookieJar, Json<ApiResponse<LocaleView>>) {
    let cookie = Cookie::build((LANGUAGE_COOKIE, payload.language.to_string()))
        .path("/")
        .same_site(SameSite::Lax)
        .permanent()
        .build();
    tracing::debug!(language = %payload.language, "language changed");
    (
        jar.add(cookie),
        Json(ApiResponse::success(
            "Language updated",
            LocaleView::for_language(payload.language),
            Some(Meta::empty()),
        )),
    )
}
