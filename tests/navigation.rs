use fieldbook_api::{
    models::Role,
    navigation::{
        AppRoute, GuardDecision, Session, SessionState, guard, home_path, resolve,
    },
};
use uuid::Uuid;

fn signed_in(role: Role) -> SessionState {
    SessionState::Authenticated(Session {
        user_id: Uuid::new_v4(),
        role,
    })
}

fn redirect(location: &str) -> GuardDecision {
    GuardDecision::Redirect {
        location: location.to_string(),
    }
}

#[test]
fn each_role_has_a_home() {
    assert_eq!(home_path(Some(Role::Customer)), "/customer");
    assert_eq!(home_path(Some(Role::Owner)), "/owner/dashboard");
    assert_eq!(home_path(Some(Role::Admin)), "/admin/dashboard");
    assert_eq!(home_path(None), "/");
}

#[test]
fn parses_client_paths() {
    assert_eq!(AppRoute::parse("/"), AppRoute::Landing);
    assert_eq!(AppRoute::parse("/customer"), AppRoute::CustomerHome);
    assert_eq!(AppRoute::parse("/customer/"), AppRoute::CustomerHome);
    assert_eq!(AppRoute::parse("/book/abc"), AppRoute::Booking("abc".into()));
    assert_eq!(AppRoute::parse("/field/abc?x=1"), AppRoute::FieldDetails("abc".into()));
    assert_eq!(AppRoute::parse("/owner/dashboard"), AppRoute::OwnerDashboard);
    assert_eq!(AppRoute::parse("/nowhere"), AppRoute::NotFound);
}

#[test]
fn guard_waits_while_loading() {
    assert_eq!(guard(&SessionState::Loading, Some(Role::Owner)), GuardDecision::Wait);
}

#[test]
fn guard_sends_signed_out_users_to_sign_in() {
    assert_eq!(guard(&SessionState::Unauthenticated, Some(Role::Customer)), redirect("/auth"));
    assert_eq!(guard(&SessionState::Unauthenticated, None), redirect("/auth"));
}

#[test]
fn guard_forbids_the_wrong_role() {
    assert_eq!(guard(&signed_in(Role::Customer), Some(Role::Owner)), redirect("/forbidden"));
    assert_eq!(guard(&signed_in(Role::Admin), Some(Role::Customer)), redirect("/forbidden"));
}

#[test]
fn guard_renders_for_matching_role_or_no_requirement() {
    assert_eq!(guard(&signed_in(Role::Owner), Some(Role::Owner)), GuardDecision::Render);
    assert_eq!(guard(&signed_in(Role::Customer), None), GuardDecision::Render);
}

#[test]
fn booking_page_requires_a_customer() {
    let path = "/book/0b6f7a1e-6c55-4c84-8d0e-3f1f3c0f5a11";
    assert_eq!(resolve(path, &SessionState::Unauthenticated), redirect("/auth"));
    assert_eq!(resolve(path, &signed_in(Role::Owner)), redirect("/forbidden"));
    assert_eq!(resolve(path, &signed_in(Role::Customer)), GuardDecision::Render);
}

#[test]
fn public_pages_render_for_everyone() {
    for path in ["/", "/auth", "/field/abc", "/forbidden", "/missing"] {
        assert_eq!(resolve(path, &SessionState::Unauthenticated), GuardDecision::Render);
        assert_eq!(resolve(path, &SessionState::Loading), GuardDecision::Render);
    }
}

#[test]
fn decision_serializes_with_outcome_tag() {
    let json = serde_json::to_value(redirect("/auth")).unwrap();
    assert_eq!(json["outcome"], "redirect");
    assert_eq!(json["location"], "/auth");

    let json = serde_json::to_value(GuardDecision::Render).unwrap();
    assert_eq!(json["outcome"], "render");
}
