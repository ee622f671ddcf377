use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Name of the cookie that remembers the chosen language.
pub const LANGUAGE_COOKIE: &str = "language";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    Ar,
    #[default]
    En,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Rtl,
    Ltr,
}

impl Language {
    pub fn direction(self) -> Direction {
        match self {
            Language::Ar => Direction::Rtl,
            Language::En => Direction::Ltr,
        }
    }

    pub fn is_rtl(self) -> bool {
        self.direction() == Direction::Rtl
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::Ar => AR,
            Language::En => EN,
        }
    }
}

/// Pick the language for a request.
///
/// A stored choice of `ar` or `en` wins. Otherwise a browser language starting
/// with `ar` selects Arabic. Everything else falls back to English.
pub fn resolve(stored: Option<&str>, browser: Option<&str>) -> Language {
    if let Some(lang) = stored.and_then(|s| s.parse::<Language>().ok()) {
        return lang;
    }
    let prefers_arabic = browser
        .and_then(primary_browser_language)
        .is_some_and(|tag| tag.to_ascii_lowercase().starts_with("ar"));
    if prefers_arabic {
        Language::Ar
    } else {
        Language::default()
    }
}

/// First tag of an `Accept-Language` value, e.g. `ar-SA` from `ar-SA,ar;q=0.9`.
fn primary_browser_language(header: &str) -> Option<&str> {
    header
        .split(',')
        .next()
        .and_then(|tag| tag.split(';').next())
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
}

/// Look up `key`, returning the key itself when no string exists.
pub fn translate(lang: Language, key: &str) -> String {
    lang.table()
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| (*v).to_string())
        .unwrap_or_else(|| key.to_string())
}

pub fn strings(lang: Language) -> BTreeMap<String, String> {
    lang.table()
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

const AR: &[(&str, &str)] = &[
    ("nav.switchRole", "تبديل الدور"),
    ("nav.dashboard", "الذهاب إلى لوحة التحكم"),
    ("nav.logout", "تسجيل الخروج"),
    ("nav.backToHome", "العودة إلى الصفحة الرئيسية"),
    ("nav.browseFields", "تصفح الملاعب"),
    ("nav.myBookings", "حجوزاتي"),
    ("calendar.title", "اختر موعدك"),
    ("calendar.available", "متاح"),
    ("calendar.booked", "محجوز"),
    ("calendar.pending", "قيد الانتظار"),
    ("calendar.selected", "محدد"),
    ("calendar.past", "انتهى الوقت"),
    ("calendar.clickToBook", "اضغط للحجز"),
    ("calendar.selectedSlot", "الموعد المحدد"),
    ("booking.submitted", "تم إرسال طلب الحجز إلى مالك الملعب"),
    ("booking.failed", "فشل الحجز، يرجى المحاولة مرة أخرى"),
    ("booking.selectSlot", "يرجى اختيار التاريخ والوقت"),
    ("booking.loginRequired", "يرجى تسجيل الدخول للحجز"),
    ("owner.dashboard", "لوحة تحكم المالك"),
    ("owner.totalFields", "إجمالي الملاعب"),
    ("owner.totalBookings", "إجمالي الحجوزات"),
    ("owner.pendingBookings", "حجوزات قيد الانتظار"),
    ("owner.revenue", "الإيرادات"),
    ("owner.pending", "قيد الانتظار"),
    ("owner.confirmed", "مؤكد"),
    ("owner.confirm", "تأكيد"),
    ("owner.noBookings", "لا توجد حجوزات"),
    ("toast.loginSuccess", "مرحباً بعودتك!"),
    ("toast.loginFailed", "فشل تسجيل الدخول"),
    ("toast.signupSuccess", "تم إنشاء الحساب!"),
    ("toast.signupFailed", "فشل إنشاء الحساب"),
    ("toast.validationError", "خطأ في التحقق"),
    ("toast.confirmSuccess", "تم التأكيد بنجاح"),
    ("toast.confirmFailed", "فشل التأكيد"),
    ("common.loading", "جاري التحميل..."),
    ("common.bookNow", "احجز الآن"),
    ("common.perHour", "ريال/ساعة"),
    ("common.sar", "ريال"),
    ("forbidden.title", "غير مصرح لك بالوصول"),
    ("notFound.title", "الصفحة غير موجودة"),
];

const EN: &[(&str, &str)] = &[
    ("nav.switchRole", "Switch Role"),
    ("nav.dashboard", "Go to Dashboard"),
    ("nav.logout", "Logout"),
    ("nav.backToHome", "Back to Home"),
    ("nav.browseFields", "Browse Fields"),
    ("nav.myBookings", "My Bookings"),
    ("calendar.title", "Choose your slot"),
    ("calendar.available", "Available"),
    ("calendar.booked", "Booked"),
    ("calendar.pending", "Pending"),
    ("calendar.selected", "Selected"),
    ("calendar.past", "Past"),
    ("calendar.clickToBook", "Click to book"),
    ("calendar.selectedSlot", "Selected slot"),
    ("booking.submitted", "Your booking request has been sent to the field owner"),
    ("booking.failed", "Booking failed, please try again"),
    ("booking.selectSlot", "Please select a date and time"),
    ("booking.loginRequired", "Please sign in to book"),
    ("owner.dashboard", "Owner Dashboard"),
    ("owner.totalFields", "Total Fields"),
    ("owner.totalBookings", "Total Bookings"),
    ("owner.pendingBookings", "Pending Bookings"),
    ("owner.revenue", "Revenue"),
    ("owner.pending", "Pending"),
    ("owner.confirmed", "Confirmed"),
    ("owner.confirm", "Confirm"),
    ("owner.noBookings", "No bookings"),
    ("toast.loginSuccess", "Welcome back!"),
    ("toast.loginFailed", "Login failed"),
    ("toast.signupSuccess", "Account created!"),
    ("toast.signupFailed", "Sign up failed"),
    ("toast.validationError", "Validation error"),
    ("toast.confirmSuccess", "Confirmed successfully"),
    ("toast.confirmFailed", "Confirmation failed"),
    ("common.loading", "Loading..."),
    ("common.bookNow", "Book Now"),
    ("common.perHour", "SAR/hour"),
    ("common.sar", "SAR"),
    ("forbidden.title", "You do not have access to this page"),
    ("notFound.title", "Page not found"),
];
