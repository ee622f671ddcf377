use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};

use crate::{
    cache::CacheTag,
    dto::bookings::BookingWithFieldList,
    entity::{
        bookings::{Column as BookingCol, Entity as Bookings},
        fields::Entity as Fields,
    },
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    models::BookingWithField,
    response::{ApiResponse, Meta},
    routes::params::{BookingListQuery, SortOrder},
    services::booking_service::with_field,
    state::AppState,
};

#[derive(Debug, Serialize, Deserialize)]
struct BookingPage {
    items: Vec<BookingWithField>,
    total: i64,
}

pub async fn list_all_bookings(
    state: &AppState,
    user: &AuthUser,
    query: BookingListQuery,
) -> AppResult<ApiResponse<BookingWithFieldList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let result = state
        .cache
        .get_or_load(CacheTag::AllBookings, &query.cache_scope(), || async {
            let mut condition = Condition::all();
            if let Some(status) = query.status {
                condition = condition.add(BookingCol::Status.eq(status));
            }

            let mut finder = Bookings::find().find_also_related(Fields).filter(condition);
            finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
                SortOrder::Asc => finder.order_by_asc(BookingCol::CreatedAt),
                SortOrder::Desc => finder.order_by_desc(BookingCol::CreatedAt),
            };

            let total = finder.clone().count(&state.orm).await? as i64;
            let items = finder
                .limit(limit as u64)
                .offset(offset as u64)
                .all(&state.orm)
                .await?
                .into_iter()
                .filter_map(with_field)
                .collect();
            Ok(BookingPage { items, total })
        })
        .await?;

    let meta = Meta::new(page, limit, result.total);
    Ok(ApiResponse::success(
        "Bookings",
        BookingWithFieldList {
            items: result.items,
        },
        Some(meta),
    ))
}
