use fieldbook_api::{
    dto::locale::LocaleView,
    locale::{Direction, Language, resolve, strings, translate},
};

#[test]
fn stored_choice_wins() {
    assert_eq!(resolve(Some("ar"), Some("en-US")), Language::Ar);
    assert_eq!(resolve(Some("en"), Some("ar-SA")), Language::En);
}

#[test]
fn browser_language_decides_without_a_stored_choice() {
    assert_eq!(resolve(None, Some("ar-SA,ar;q=0.9,en;q=0.8")), Language::Ar);
    assert_eq!(resolve(None, Some("AR")), Language::Ar);
    assert_eq!(resolve(None, Some("fr-FR,ar;q=0.9")), Language::En);
}

#[test]
fn unknown_stored_value_is_ignored() {
    assert_eq!(resolve(Some("de"), Some("ar")), Language::Ar);
    assert_eq!(resolve(Some("de"), None), Language::En);
    assert_eq!(resolve(None, None), Language::En);
}

#[test]
fn arabic_is_right_to_left() {
    assert_eq!(Language::Ar.direction(), Direction::Rtl);
    assert!(Language::Ar.is_rtl());
    assert_eq!(Language::En.direction(), Direction::Ltr);
    assert!(!Language::En.is_rtl());
}

#[test]
fn translates_known_keys_and_echoes_unknown_ones() {
    assert_eq!(translate(Language::En, "calendar.booked"), "Booked");
    assert_eq!(translate(Language::Ar, "calendar.booked"), "محجوز");
    assert_eq!(translate(Language::Ar, "no.such.key"), "no.such.key");
}

#[test]
fn both_languages_cover_the_same_keys() {
    let ar: Vec<String> = strings(Language::Ar).into_keys().collect();
    let en: Vec<String> = strings(Language::En).into_keys().collect();
    assert_eq!(ar, en);
}

#[test]
fn locale_view_serializes_lowercase() {
    let json = serde_json::to_value(LocaleView::for_language(Language::Ar)).unwrap();
    assert_eq!(json["language"], "ar");
    assert_eq!(json["direction"], "rtl");
    assert_eq!(json["strings"]["owner.confirm"], "تأكيد");
}
