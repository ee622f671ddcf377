use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    availability::BookedSlot,
    models::{Booking, BookingWithField},
};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    pub field_id: Uuid,
    #[validate(length(min = 1, max = 100, message = "Customer name is required"))]
    pub customer_name: String,
    #[validate(length(min = 10, max = 20, message = "Valid phone number is required"))]
    pub customer_phone: String,
    pub booking_date: Option<NaiveDate>,
    #[schema(example = "10:00")]
    pub start_time: Option<String>,
}

impl CreateBookingRequest {
    pub fn normalized(self) -> Self {
        Self {
            customer_name: self.customer_name.trim().to_string(),
            customer_phone: self.customer_phone.trim().to_string(),
            start_time: self.start_time.map(|t| t.trim().to_string()),
            ..self
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedBooking {
    pub booking: Booking,
    pub redirect_to: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct BookingWithFieldList {
    #[schema(value_type = Vec<BookingWithField>)]
    pub items: Vec<BookingWithField>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct BookedSlotList {
    #[schema(value_type = Vec<BookedSlot>)]
    pub items: Vec<BookedSlot>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OwnerDashboard {
    pub total_fields: u64,
    pub total_bookings: u64,
    pub pending_bookings: u64,
    pub confirmed_bookings: u64,
    #[schema(value_type = String, example = "150.00")]
    pub revenue: Decimal,
}
