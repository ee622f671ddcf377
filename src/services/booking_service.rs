use chrono::{Local, NaiveDateTime, NaiveTime, Utc};
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, EntityTrait, QueryFilter,
    Iterable, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit,
    availability::{BookedSlot, Slot, WeekGrid, is_past_slot, is_slot_time, parse_time_label, slot_end},
    cache::{CacheTag, Mutation},
    dto::bookings::{BookedSlotList, BookingWithFieldList, CreateBookingRequest, CreatedBooking},
    entity::{
        bookings::{ActiveModel as BookingActive, Column as BookingCol, Entity as Bookings, Model as BookingModel},
        fields::{Column as FieldCol, Entity as Fields, Model as FieldModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_customer, ensure_owner},
    models::{Booking, BookingStatus, BookingWithField, FieldStatus, Role},
    navigation::home_path,
    response::{ApiResponse, Meta},
    routes::params::AvailabilityQuery,
    state::AppState,
};

/// A submission that passed every check that needs no database.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub field_id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub slot: Slot,
    pub end_time: NaiveTime,
}

pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Check the form and the chosen slot against `now`.
pub fn validate_submission(
    payload: CreateBookingRequest,
    now: NaiveDateTime,
) -> AppResult<BookingDraft> {
    let payload = payload.normalized();
    payload.validate()?;

    let (date, time) = match (payload.booking_date, payload.start_time.as_deref()) {
        (Some(date), Some(time)) if !time.is_empty() => (date, time),
        (None, _) => return Err(AppError::BadRequest("Please select a date".into())),
        _ => return Err(AppError::BadRequest("Please select a time".into())),
    };

    let start = parse_time_label(time)
        .filter(|t| is_slot_time(*t))
        .ok_or_else(|| AppError::BadRequest(format!("{time} is not a bookable time")))?;
    if is_past_slot(date, start, now) {
        return Err(AppError::BadRequest("The selected slot is in the past".into()));
    }
    let end_time = slot_end(start)
        .ok_or_else(|| AppError::BadRequest(format!("{time} is not a bookable time")))?;

    Ok(BookingDraft {
        field_id: payload.field_id,
        customer_name: payload.customer_name,
        customer_phone: payload.customer_phone,
        slot: Slot { date, time: start },
        end_time,
    })
}

pub async fn create_booking(
    state: &AppState,
    user: &AuthUser,
    payload: CreateBookingRequest,
) -> AppResult<ApiResponse<CreatedBooking>> {
    ensure_customer(user)?;
    let draft = validate_submission(payload, local_now())?;

    let field = Fields::find_by_id(draft.field_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    if field.status != FieldStatus::Active {
        return Err(AppError::BadRequest("This field is not accepting bookings".into()));
    }

    let inserted = BookingActive {
        id: Set(Uuid::new_v4()),
        field_id: Set(field.id),
        customer_id: Set(user.user_id),
        customer_name: Set(draft.customer_name),
        customer_phone: Set(draft.customer_phone),
        booking_date: Set(draft.slot.date),
        start_time: Set(draft.slot.time),
        end_time: Set(draft.end_time),
        // charged at the price in force when the booking is submitted
        total_amount: Set(field.price_per_booking),
        status: Set(BookingStatus::Pending),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await;

    let booking = match inserted {
        Ok(model) => model,
        Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            tracing::info!(field_id = %field.id, date = %draft.slot.date, "slot already taken");
            return Err(AppError::Conflict("This slot has already been booked".into()));
        }
        Err(err) => return Err(err.into()),
    };

    state.cache.invalidate(Mutation::BookingCreated);
    tracing::info!(booking_id = %booking.id, field_id = %booking.field_id, "booking created");
    audit::record(
        &state.pool,
        Some(user.user_id),
        "booking_create",
        "bookings",
        serde_json::json!({ "booking_id": booking.id, "field_id": booking.field_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Booking submitted",
        CreatedBooking {
            booking: booking_from_entity(booking),
            redirect_to: home_path(Some(Role::Customer)).to_string(),
        },
        Some(Meta::empty()),
    ))
}

/// Move one of the caller's bookings from pending to confirmed.
pub async fn confirm_booking(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Booking>> {
    ensure_owner(user)?;

    let txn = state.orm.begin().await?;
    let booking = Bookings::find()
        .inner_join(Fields)
        .filter(
            Condition::all()
                .add(BookingCol::Id.eq(id))
                .add(FieldCol::OwnerId.eq(user.user_id)),
        )
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    if booking.status != BookingStatus::Pending {
        return Err(AppError::BadRequest(format!(
            "Only pending bookings can be confirmed (current status: {})",
            booking.status
        )));
    }

    let mut active: BookingActive = booking.into();
    active.status = Set(BookingStatus::Confirmed);
    active.updated_at = Set(Utc::now().into());
    let booking = active.update(&txn).await?;
    txn.commit().await?;

    state.cache.invalidate(Mutation::BookingStatusChanged);
    tracing::info!(booking_id = %booking.id, "booking confirmed");
    audit::record(
        &state.pool,
        Some(user.user_id),
        "booking_confirm",
        "bookings",
        serde_json::json!({ "booking_id": booking.id, "status": booking.status.as_ref() }),
    )
    .await;

    Ok(ApiResponse::success(
        "Booking confirmed",
        booking_from_entity(booking),
        Some(Meta::empty()),
    ))
}

/// Pending and confirmed slots of one field.
pub async fn booked_slots(state: &AppState, field_id: Uuid) -> AppResult<Vec<BookedSlot>> {
    state
        .cache
        .get_or_load(CacheTag::FieldBookings, &field_id.to_string(), || async {
            let rows = Bookings::find()
                .filter(BookingCol::FieldId.eq(field_id))
                .filter(BookingCol::Status.is_in(BookingStatus::iter().filter(|s| s.holds_slot())))
                .order_by_asc(BookingCol::BookingDate)
                .order_by_asc(BookingCol::StartTime)
                .all(&state.orm)
                .await?;
            Ok(rows
                .into_iter()
                .map(|b| BookedSlot {
                    date: b.booking_date,
                    start_time: b.start_time,
                    status: b.status,
                })
                .collect())
        })
        .await
}

pub async fn list_booked_slots(
    state: &AppState,
    field_id: Uuid,
) -> AppResult<ApiResponse<BookedSlotList>> {
    ensure_field_exists(state, field_id).await?;
    let items = booked_slots(state, field_id).await?;
    Ok(ApiResponse::success(
        "Booked slots",
        BookedSlotList { items },
        Some(Meta::empty()),
    ))
}

pub async fn field_availability(
    state: &AppState,
    field_id: Uuid,
    query: AvailabilityQuery,
) -> AppResult<ApiResponse<WeekGrid>> {
    ensure_field_exists(state, field_id).await?;

    let now = local_now();
    let week_start = query.week_start.unwrap_or(now.date());
    let selected = match (query.selected_date, query.selected_time.as_deref()) {
        (Some(date), Some(time)) => {
            let time = parse_time_label(time)
                .ok_or_else(|| AppError::BadRequest("selected_time must be HH:MM".into()))?;
            Some(Slot { date, time })
        }
        _ => None,
    };

    let booked = booked_slots(state, field_id).await?;
    let grid = WeekGrid::build(week_start, &booked, now, selected);
    Ok(ApiResponse::item("Availability", grid))
}

pub async fn list_customer_bookings(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<BookingWithFieldList>> {
    ensure_customer(user)?;
    let items: Vec<BookingWithField> = state
        .cache
        .get_or_load(CacheTag::CustomerBookings, &user.user_id.to_string(), || async {
            let rows = Bookings::find()
                .find_also_related(Fields)
                .filter(BookingCol::CustomerId.eq(user.user_id))
                .order_by_desc(BookingCol::BookingDate)
                .order_by_desc(BookingCol::StartTime)
                .all(&state.orm)
                .await?;
            Ok(rows.into_iter().filter_map(with_field).collect())
        })
        .await?;

    let meta = Meta::unpaged(items.len());
    Ok(ApiResponse::success(
        "My bookings",
        BookingWithFieldList { items },
        Some(meta),
    ))
}

async fn ensure_field_exists(state: &AppState, field_id: Uuid) -> AppResult<()> {
    Fields::find_by_id(field_id)
        .one(&state.orm)
        .await?
        .map(|_| ())
        .ok_or(AppError::NotFound)
}

pub(crate) fn with_field((booking, field): (BookingModel, Option<FieldModel>)) -> Option<BookingWithField> {
    let field = field?;
    Some(BookingWithField {
        booking: booking_from_entity(booking),
        field_name: field.name,
        field_location: field.location,
    })
}

pub(crate) fn booking_from_entity(model: BookingModel) -> Booking {
    Booking {
        id: model.id,
        field_id: model.field_id,
        customer_id: model.customer_id,
        customer_name: model.customer_name,
        customer_phone: model.customer_phone,
        booking_date: model.booking_date,
        start_time: model.start_time,
        end_time: model.end_time,
        total_amount: model.total_amount,
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
