use fieldbook_api::routes::health::health_check;

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check().await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.service, "fieldbook-api");
}

#[test]
fn unpaged_meta_is_a_single_full_page() {
    use fieldbook_api::response::{ApiResponse, Meta};

    assert_eq!(Meta::unpaged(3), Meta::new(1, 3, 3));

    let item = ApiResponse::item("Field", 7);
    assert_eq!(item.meta, Some(Meta::empty()));
    assert_eq!(item.data, Some(7));
}
