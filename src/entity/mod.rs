pub mod bookings;
pub mod field_amenities;
pub mod field_images;
pub mod fields;
pub mod profiles;

pub use bookings::Entity as Bookings;
pub use field_amenities::Entity as FieldAmenities;
pub use field_images::Entity as FieldImages;
pub use fields::Entity as Fields;
pub use profiles::Entity as Profiles;
