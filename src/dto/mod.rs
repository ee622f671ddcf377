pub mod auth;
pub mod bookings;
pub mod fields;
pub mod locale;
pub mod navigation;
