use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};

use crate::{
    cache::CacheTag,
    dto::bookings::{BookingWithFieldList, OwnerDashboard},
    entity::{
        bookings::{Column as BookingCol, Entity as Bookings},
        fields::{Column as FieldCol, Entity as Fields},
    },
    error::AppResult,
    middleware::auth::{AuthUser, ensure_owner},
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

#[derive(Debug, sqlx::FromRow)]
struct DashboardRow {
    total_fields: i64,
    total_bookings: i64,
    pending_bookings: i64,
    confirmed_bookings: i64,
    revenue: Decimal,
}

/// Bookings across every field the caller owns, newest slot first.
pub async fn list_owner_bookings(
    state: &AppState,
    user: &AuthUser,
    query: BookingListQuery,
) -> AppResult<ApiResponse<BookingWithFieldList>> {
    ensure_owner(user)?;
    let (page, limit, offset) = query.pagination().normalize();
    let scope = format!("{}|{}", user.user_id, query.cache_scope());

    let result = state
        .cache
        .get_or_load(CacheTag::OwnerBookings, &scope, || async {
            let mut condition = Condition::all().add(FieldCol::OwnerId.eq(user.user_id));
            if let Some(status) = query.status {
                condition = condition.add(BookingCol::Status.eq(status));
            }

            let mut finder = Bookings::find().find_also_related(Fields).filter(condition);
            finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
                SortOrder::Asc => finder
                    .order_by_asc(BookingCol::BookingDate)
                    .order_by_asc(BookingCol::StartTime),
                SortOrder::Desc => finder
                    .order_by_desc(BookingCol::BookingDate)
                    .order_by_desc(BookingCol::StartTime),
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

    Ok(ApiResponse::success(
        "Owner bookings",
        BookingWithFieldList {
            items: result.items,
        },
        Some(Meta::new(page, limit, result.total)),
    ))
}

pub async fn dashboard(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<OwnerDashboard>> {
    ensure_owner(user)?;

    let row = sqlx::query_as::<_, DashboardRow>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM fields WHERE owner_id = $1) AS total_fields,
            COUNT(b.id) AS total_bookings,
            COUNT(b.id) FILTER (WHERE b.status = 'pending') AS pending_bookings,
            COUNT(b.id) FILTER (WHERE b.status = 'confirmed') AS confirmed_bookings,
            COALESCE(SUM(b.total_amount) FILTER (WHERE b.status = 'confirmed'), 0)::NUMERIC(12, 2) AS revenue
        FROM bookings b
        JOIN fields f ON f.id = b.field_id
        WHERE f.owner_id = $1
        "#,
    )
    .bind(user.user_id)
    .fetch_one(&state.pool)
    .await?;

    let stats = OwnerDashboard {
        total_fields: row.total_fields.max(0) as u64,
        total_bookings: row.total_bookings.max(0) as u64,
        pending_bookings: row.pending_bookings.max(0) as u64,
        confirmed_bookings: row.confirmed_bookings.max(0) as u64,
        revenue: row.revenue,
    };
    Ok(ApiResponse::item("Dashboard", stats))
}
