use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use fieldbook_api::{
    dto::bookings::CreateBookingRequest,
    error::AppError,
    models::BookingStatus,
    services::booking_service::validate_submission,
};
use uuid::Uuid;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 10)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

fn request(date: Option<(i32, u32, u32)>, time: Option<&str>) -> CreateBookingRequest {
    CreateBookingRequest {
        field_id: Uuid::new_v4(),
        customer_name: "  Ahmed Ali ".into(),
        customer_phone: "0501234567".into(),
        booking_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        start_time: time.map(str::to_string),
    }
}

#[test]
fn accepts_a_future_catalogue_slot() {
    let draft = validate_submission(request(Some((2025, 3, 10)), Some("10:00")), now()).unwrap();

    assert_eq!(draft.customer_name, "Ahmed Ali");
    assert_eq!(draft.slot.date, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
    assert_eq!(draft.slot.time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
    assert_eq!(draft.end_time, NaiveTime::from_hms_opt(11, 0, 0).unwrap());
}

#[test]
fn last_slot_ends_at_twenty_three() {
    let draft = validate_submission(request(Some((2025, 3, 11)), Some("22:00")), now()).unwrap();
    assert_eq!(draft.end_time, NaiveTime::from_hms_opt(23, 0, 0).unwrap());
}

#[test]
fn requires_date_and_time() {
    let missing_date = validate_submission(request(None, Some("10:00")), now());
    assert!(matches!(missing_date, Err(AppError::BadRequest(_))));

    let missing_time = validate_submission(request(Some((2025, 3, 11)), None), now());
    assert!(matches!(missing_time, Err(AppError::BadRequest(_))));

    let blank_time = validate_submission(request(Some((2025, 3, 11)), Some("  ")), now());
    assert!(matches!(blank_time, Err(AppError::BadRequest(_))));
}

#[test]
fn rejects_times_outside_the_catalogue() {
    for time in ["05:00", "23:00", "10:30", "ten"] {
        let result = validate_submission(request(Some((2025, 3, 11)), Some(time)), now());
        assert!(matches!(result, Err(AppError::BadRequest(_))), "{time} accepted");
    }
}

#[test]
fn rejects_a_slot_that_already_started() {
    let started = validate_submission(request(Some((2025, 3, 10)), Some("09:00")), now());
    assert!(matches!(started, Err(AppError::BadRequest(_))));

    let yesterday = validate_submission(request(Some((2025, 3, 9)), Some("20:00")), now());
    assert!(matches!(yesterday, Err(AppError::BadRequest(_))));
}

#[test]
fn form_fields_are_validated() {
    let mut short_phone = request(Some((2025, 3, 11)), Some("10:00"));
    short_phone.customer_phone = "12345".into();
    assert!(matches!(
        validate_submission(short_phone, now()),
        Err(AppError::Validation(_))
    ));

    let mut blank_name = request(Some((2025, 3, 11)), Some("10:00"));
    blank_name.customer_name = "   ".into();
    assert!(matches!(
        validate_submission(blank_name, now()),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn only_cancelled_bookings_release_their_slot() {
    assert!(BookingStatus::Pending.holds_slot());
    assert!(BookingStatus::Confirmed.holds_slot());
    assert!(!BookingStatus::Cancelled.holds_slot());
}
