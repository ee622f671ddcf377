use chrono::{Days, Local, NaiveTime};
use fieldbook_api::{
    availability::SlotStatus,
    config::AppConfig,
    db::{create_pool, run_migrations},
    dto::{auth::RegisterRequest, bookings::CreateBookingRequest, fields::CreateFieldRequest},
    error::AppError,
    middleware::auth::AuthUser,
    models::{BookingStatus, Role},
    routes::params::{AvailabilityQuery, BookingListQuery},
    services::{auth_service, booking_service, field_service, owner_service},
    state::AppState,
};
use rust_decimal_macros::dec;
use uuid::Uuid;

// Integration flow: owner lists a field -> customer books -> double booking refused -> owner confirms.
#[tokio::test]
async fn submit_and_confirm_booking_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    let owner = register(&state, Role::Owner).await?;
    let other_owner = register(&state, Role::Owner).await?;
    let customer = register(&state, Role::Customer).await?;

    let field = field_service::create_field(
        &state,
        &owner,
        CreateFieldRequest {
            name: "Flow Test Arena".into(),
            location: "Riyadh".into(),
            address: None,
            description: Some("Five-a-side".into()),
            price_per_booking: dec!(50.00),
            operating_hours: None,
            images: vec![],
            amenities: vec!["Parking".into(), " Parking ".into()],
        },
    )
    .await?
    .data
    .expect("field");
    assert_eq!(field.amenities.len(), 1);
    assert_eq!(field.operating_hours, "6:00 AM - 10:00 PM");

    let day = Local::now()
        .date_naive()
        .checked_add_days(Days::new(30))
        .expect("date");
    let request_at = |time: &str| CreateBookingRequest {
        field_id: field.id,
        customer_name: "Flow Customer".into(),
        customer_phone: "0501234567".into(),
        booking_date: Some(day),
        start_time: Some(time.into()),
    };
    let request = || request_at("10:00");

    // warm the slot cache so the booking has to invalidate it
    let before = booking_service::booked_slots(&state, field.id).await?;
    assert!(before.is_empty());

    let created = booking_service::create_booking(&state, &customer, request())
        .await?
        .data
        .expect("booking");
    assert_eq!(created.redirect_to, "/customer");
    let booking = created.booking;
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.total_amount, dec!(50.00));
    assert_eq!(booking.start_time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
    assert_eq!(booking.end_time, NaiveTime::from_hms_opt(11, 0, 0).unwrap());

    let after = booking_service::booked_slots(&state, field.id).await?;
    assert_eq!(after.len(), 1);

    let grid = booking_service::field_availability(
        &state,
        field.id,
        AvailabilityQuery {
            week_start: Some(day),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("grid");
    let cell = grid
        .cell(day, NaiveTime::from_hms_opt(10, 0, 0).unwrap())
        .expect("cell");
    assert_eq!(cell.status, SlotStatus::Pending);
    assert!(!cell.selectable);

    let duplicate = booking_service::create_booking(&state, &customer, request()).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let neighbour = booking_service::create_booking(&state, &customer, request_at("12:00"))
        .await?
        .data
        .expect("second booking")
        .booking;
    assert_eq!(neighbour.status, BookingStatus::Pending);

    let foreign = booking_service::confirm_booking(&state, &other_owner, booking.id).await;
    assert!(matches!(foreign, Err(AppError::NotFound)));

    let confirmed = booking_service::confirm_booking(&state, &owner, booking.id)
        .await?
        .data
        .expect("confirmed");
    assert_eq!(confirmed.id, booking.id);
    assert_eq!(confirmed.status, BookingStatus::Confirmed);

    let again = booking_service::confirm_booking(&state, &owner, booking.id).await;
    assert!(matches!(again, Err(AppError::BadRequest(_))));

    // confirming one booking leaves the others on the field untouched
    let slots = booking_service::booked_slots(&state, field.id).await?;
    assert_eq!(slots.len(), 2);
    let status_at = |hour: u32| {
        slots
            .iter()
            .find(|s| s.start_time == NaiveTime::from_hms_opt(hour, 0, 0).unwrap())
            .map(|s| s.status)
    };
    assert_eq!(status_at(10), Some(BookingStatus::Confirmed));
    assert_eq!(status_at(12), Some(BookingStatus::Pending));

    let mine = booking_service::list_customer_bookings(&state, &customer)
        .await?
        .data
        .expect("mine");
    assert_eq!(mine.items.len(), 2);
    let mine_confirmed = mine
        .items
        .iter()
        .find(|b| b.booking.id == booking.id)
        .expect("confirmed booking listed");
    assert_eq!(mine_confirmed.field_name, "Flow Test Arena");
    assert_eq!(mine_confirmed.booking.status, BookingStatus::Confirmed);

    let pending = owner_service::list_owner_bookings(
        &state,
        &owner,
        BookingListQuery {
            status: Some(BookingStatus::Pending),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("owner bookings");
    assert_eq!(pending.items.len(), 1);
    assert_eq!(pending.items[0].booking.id, neighbour.id);
    assert_eq!(pending.items[0].booking.status, BookingStatus::Pending);

    let stats = owner_service::dashboard(&state, &owner)
        .await?
        .data
        .expect("dashboard");
    assert_eq!(stats.total_fields, 1);
    assert_eq!(stats.total_bookings, 2);
    assert_eq!(stats.pending_bookings, 1);
    assert_eq!(stats.confirmed_bookings, 1);
    assert_eq!(stats.revenue, dec!(50.00));

    Ok(())
}

#[tokio::test]
async fn owner_cannot_book_and_admin_cannot_sign_up() -> anyhow::Result<()> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => return Ok(()),
    };
    let state = setup_state(&database_url).await?;

    let admin_signup = auth_service::register_user(&state, register_request(Role::Admin)).await;
    assert!(matches!(admin_signup, Err(AppError::BadRequest(_))));

    let owner = register(&state, Role::Owner).await?;
    let owner_booking = booking_service::create_booking(
        &state,
        &owner,
        CreateBookingRequest {
            field_id: Uuid::new_v4(),
            customer_name: "Owner".into(),
            customer_phone: "0501234567".into(),
            booking_date: Local::now().date_naive().checked_add_days(Days::new(3)),
            start_time: Some("12:00".into()),
        },
    )
    .await;
    assert!(matches!(owner_booking, Err(AppError::Forbidden)));

    let customer = register(&state, Role::Customer).await?;
    let unknown_field = booking_service::create_booking(
        &state,
        &customer,
        CreateBookingRequest {
            field_id: Uuid::new_v4(),
            customer_name: "Nobody".into(),
            customer_phone: "0501234567".into(),
            booking_date: Local::now().date_naive().checked_add_days(Days::new(3)),
            start_time: Some("12:00".into()),
        },
    )
    .await;
    assert!(matches!(unknown_field, Err(AppError::NotFound)));

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    run_migrations(&pool).await?;
    let config = AppConfig {
        database_url: database_url.to_string(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "flow-secret".into(),
        jwt_ttl_hours: 1,
        cache_ttl_secs: 30,
    };
    Ok(AppState::new(pool, config))
}

fn register_request(role: Role) -> RegisterRequest {
    RegisterRequest {
        email: format!("{}-{}@example.com", role, Uuid::new_v4()),
        password: "secret123".into(),
        name: format!("Test {role}"),
        role,
    }
}

async fn register(state: &AppState, role: Role) -> anyhow::Result<AuthUser> {
    let resp = auth_service::register_user(state, register_request(role))
        .await?
        .data
        .expect("profile");
    Ok(AuthUser {
        user_id: resp.profile.id,
        role: resp.profile.role,
    })
}
