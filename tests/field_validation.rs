use fieldbook_api::{
    dto::fields::{CreateFieldRequest, UpdateFieldRequest},
    routes::params::{MAX_PAGE, Pagination},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use validator::Validate;

fn field(price: Decimal) -> CreateFieldRequest {
    CreateFieldRequest {
        name: "Al Nakheel Arena".into(),
        location: "Riyadh".into(),
        address: None,
        description: None,
        price_per_booking: price,
        operating_hours: None,
        images: vec![],
        amenities: vec![],
    }
}

#[test]
fn price_with_two_decimals_is_accepted() {
    assert!(field(dec!(50.00)).validate().is_ok());
    assert!(field(dec!(12.5)).validate().is_ok());
    assert!(field(dec!(0.01)).validate().is_ok());
}

#[test]
fn price_that_rounds_to_zero_is_rejected() {
    let err = field(dec!(0.004)).validate().unwrap_err();
    assert!(err.field_errors().contains_key("price_per_booking"));
}

#[test]
fn sub_cent_prices_are_rejected_on_update() {
    let update = UpdateFieldRequest {
        price_per_booking: Some(dec!(49.999)),
        ..Default::default()
    };
    assert!(update.validate().is_err());
}

#[test]
fn zero_and_oversized_prices_are_rejected() {
    assert!(field(Decimal::ZERO).validate().is_err());
    assert!(field(dec!(-5)).validate().is_err());
    assert!(field(dec!(10000.01)).validate().is_err());
}

#[test]
fn pagination_defaults_to_first_page() {
    let (page, per_page, offset) = Pagination::default().normalize();
    assert_eq!((page, per_page, offset), (1, 20, 0));
}

#[test]
fn huge_page_numbers_are_clamped() {
    let (page, per_page, offset) = Pagination {
        page: Some(i64::MAX),
        per_page: Some(100),
    }
    .normalize();

    assert_eq!(page, MAX_PAGE);
    assert_eq!(per_page, 100);
    assert_eq!(offset, (MAX_PAGE - 1) * 100);
}

#[test]
fn negative_values_fall_back_to_bounds() {
    let (page, per_page, offset) = Pagination {
        page: Some(-3),
        per_page: Some(i64::MIN),
    }
    .normalize();
    assert_eq!((page, per_page, offset), (1, 1, 0));
}
