use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::models::BookingStatus;

/// Highest page number honoured; larger requests read the last reachable page.
pub const MAX_PAGE: i64 = 100_000;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).clamp(1, MAX_PAGE);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldSortBy {
    CreatedAt,
    Price,
    Rating,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FieldQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Case-insensitive match on the field name.
    pub q: Option<String>,
    /// Case-insensitive match on the location.
    pub location: Option<String>,
    pub sort_by: Option<FieldSortBy>,
    pub sort_order: Option<SortOrder>,
}

impl FieldQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }

    /// Stable key for the query cache.
    pub fn cache_scope(&self) -> String {
        format!(
            "q={}|loc={}|sort={:?}|order={:?}|page={:?}|per={:?}",
            self.q.as_deref().unwrap_or_default().trim().to_lowercase(),
            self.location.as_deref().unwrap_or_default().trim().to_lowercase(),
            self.sort_by,
            self.sort_order,
            self.page,
            self.per_page,
        )
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<BookingStatus>,
    pub sort_order: Option<SortOrder>,
}

impl BookingListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }

    pub fn cache_scope(&self) -> String {
        format!(
            "status={:?}|order={:?}|page={:?}|per={:?}",
            self.status, self.sort_order, self.page, self.per_page
        )
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    /// First day shown; defaults to today.
    pub week_start: Option<NaiveDate>,
    pub selected_date: Option<NaiveDate>,
    /// `HH:MM` label of the selected slot.
    pub selected_time: Option<String>,
}
