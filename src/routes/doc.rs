use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    availability::{BookedSlot, GridCell, GridRow, Slot, SlotStatus, WeekGrid},
    dto::{
        auth::{AuthResponse, LoginRequest, LogoutResponse, RegisterRequest, SessionView},
        bookings::{BookedSlotList, BookingWithFieldList, CreateBookingRequest, CreatedBooking, OwnerDashboard},
        fields::{CreateFieldRequest, FieldImageInput, FieldList, UpdateFieldRequest},
        locale::{LocaleView, SetLanguageRequest},
        navigation::{ResolveQuery, RouteDecision},
    },
    locale::{Direction, Language},
    models::{Booking, BookingStatus, BookingWithField, Field, FieldAmenity, FieldImage, FieldStatus, Profile, Role},
    navigation::GuardDecision,
    response::{ApiResponse, Meta},
    routes::{admin, auth, bookings, fields, health, locale, navigation, owner, params},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::me,
        auth::logout,
        fields::list_fields,
        fields::get_field,
        fields::create_field,
        fields::update_field,
        fields::delete_field,
        fields::field_availability,
        fields::booked_slots,
        bookings::create_booking,
        bookings::my_bookings,
        bookings::confirm_booking,
        owner::my_fields,
        owner::field_bookings,
        owner::dashboard,
        admin::list_all_bookings,
        navigation::resolve_route,
        locale::current_locale,
        locale::set_locale
    ),
    components(
        schemas(
            Role,
            Profile,
            FieldStatus,
            Field,
            FieldImage,
            FieldAmenity,
            BookingStatus,
            Booking,
            BookingWithField,
            SlotStatus,
            BookedSlot,
            Slot,
            GridCell,
            GridRow,
            WeekGrid,
            GuardDecision,
            Language,
            Direction,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            SessionView,
            LogoutResponse,
            CreateFieldRequest,
            UpdateFieldRequest,
            FieldImageInput,
            FieldList,
            CreateBookingRequest,
            CreatedBooking,
            BookingWithFieldList,
            BookedSlotList,
            OwnerDashboard,
            ResolveQuery,
            RouteDecision,
            LocaleView,
            SetLanguageRequest,
            params::Pagination,
            params::SortOrder,
            params::FieldSortBy,
            params::FieldQuery,
            params::BookingListQuery,
            params::AvailabilityQuery,
            health::HealthData,
            Meta,
            ApiResponse<Field>,
            ApiResponse<FieldList>,
            ApiResponse<WeekGrid>,
            ApiResponse<CreatedBooking>,
            ApiResponse<BookingWithFieldList>,
            ApiResponse<AuthResponse>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Sign-up, sign-in and session"),
        (name = "Fields", description = "Browse and manage football fields"),
        (name = "Availability", description = "Weekly slot grid of a field"),
        (name = "Bookings", description = "Submit and confirm bookings"),
        (name = "Owner", description = "Owner dashboard endpoints"),
        (name = "Admin", description = "Admin endpoints"),
        (name = "Navigation", description = "Role guard for client routes"),
        (name = "Locale", description = "Arabic and English strings"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
