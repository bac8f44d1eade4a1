//! End-to-end checks of the state core against a fake backend.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, Respond, ResponseTemplate};

use super::session::LoginStatus;
use super::*;
use crate::backend::runner;
use crate::backend::types::RecipeId;
use crate::backend::BackendClient;

/// Answers `check_results` from a fixed saved set, like the real server
struct MembershipFixture {
    saved: HashSet<RecipeId>,
}

impl Respond for MembershipFixture {
    fn respond(&self, request: &wiremock::Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        let checked: Vec<Value> = body["results_list"]
            .as_array()
            .unwrap()
            .iter()
            .map(|recipe| {
                let id = recipe["id"].as_i64().unwrap();
                json!({
                    "recipe_id": id,
                    "title": recipe["title"],
                    "servings": 2,
                    "ready_mins": 45,
                    "is_saved": self.saved.contains(&id)
                })
            })
            .collect();
        ResponseTemplate::new(200).set_body_json(json!({ "checked_recipes": checked }))
    }
}

fn client_for(server: &MockServer) -> Arc<BackendClient> {
    Arc::new(BackendClient::new(&server.uri(), Duration::from_secs(5)).unwrap())
}

/// Run effects one at a time, feeding every answer back in, until quiet
async fn drive(controller: &mut Controller, client: &Arc<BackendClient>, effects: Vec<Effect>) {
    let mut queue: VecDeque<Effect> = effects.into();
    while let Some(effect) = queue.pop_front() {
        let event = runner::run(Arc::clone(client), effect).await;
        queue.extend(controller.handle(event));
    }
}

fn raw_json(ids: &[RecipeId]) -> Value {
    Value::Array(
        ids.iter()
            .map(|id| {
                json!({
                    "id": id,
                    "title": format!("Recipe {}", id),
                    "image": format!("https://img.example/{}.jpg", id),
                    "usedIngredientCount": 2
                })
            })
            .collect(),
    )
}

async fn mount_session(server: &MockServer, in_session: bool, times: u64) {
    Mock::given(method("GET"))
        .and(path("/api/check_session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "in_session": in_session })))
        .expect(times)
        .mount(server)
        .await;
}

fn message(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "message": text }))
}

#[tokio::test]
async fn test_logged_out_session_hides_saved_and_logout_links() {
    let server = MockServer::start().await;
    // first answer flips Unknown -> LoggedOut, the second confirms it
    mount_session(&server, false, 2).await;
    let client = client_for(&server);

    let mut controller = Controller::new(false);
    let effects = controller.mount(Route::Homepage);
    drive(&mut controller, &client, effects).await;

    assert_eq!(controller.session().status(), LoginStatus::LoggedOut);
    let routes: Vec<Route> = controller.nav_links().iter().map(|l| l.route).collect();
    assert!(routes.contains(&Route::Login));
    assert!(routes.contains(&Route::CreateAccount));
    assert!(!routes.contains(&Route::SavedRecipes));
    assert!(!routes.contains(&Route::Logout));
}

#[tokio::test]
async fn test_login_scenario_alerts_and_resets_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"email": "a@b.com", "password": "x"})))
        .respond_with(message("Logged in"))
        .expect(1)
        .mount(&server)
        .await;
    mount_session(&server, true, 2).await;
    let client = client_for(&server);

    let mut controller = Controller::new(false);
    controller.dispatch(Action::EmailChanged(AuthMode::Login, "a@b.com".to_string()));
    controller.dispatch(Action::PasswordChanged(AuthMode::Login, "x".to_string()));
    let effects = controller.dispatch(Action::AuthSubmitted(AuthMode::Login));
    drive(&mut controller, &client, effects).await;

    let notice = controller.notices().front().unwrap();
    assert_eq!(notice.kind, NoticeKind::Info);
    assert_eq!(notice.text, "Logged in");
    assert_eq!(controller.form(AuthMode::Login).email(), "");
    assert_eq!(controller.form(AuthMode::Login).password(), "");
    assert!(controller.session().is_logged_in());
}

#[tokio::test]
async fn test_rejected_signup_reports_error_and_keeps_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/create_account"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"message": "Email already in use"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_session(&server, false, 2).await;
    let client = client_for(&server);

    let mut controller = Controller::new(false);
    controller.dispatch(Action::EmailChanged(
        AuthMode::CreateAccount,
        "a@b.com".to_string(),
    ));
    controller.dispatch(Action::PasswordChanged(
        AuthMode::CreateAccount,
        "x".to_string(),
    ));
    let effects = controller.dispatch(Action::AuthSubmitted(AuthMode::CreateAccount));
    drive(&mut controller, &client, effects).await;

    let notice = controller.notices().front().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, "Email already in use");
    assert_eq!(controller.form(AuthMode::CreateAccount).email(), "a@b.com");
    assert_eq!(controller.form(AuthMode::CreateAccount).password(), "");
}

#[tokio::test]
async fn test_search_scenario_posts_navigates_then_checks_results() {
    let server = MockServer::start().await;
    let raw = raw_json(&[11, 12]);
    Mock::given(method("POST"))
        .and(path("/api/search_results"))
        .and(body_json(json!({"ingredients": "beef, potato"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(raw.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/check_results"))
        .and(body_json(json!({ "results_list": raw })))
        .respond_with(MembershipFixture {
            saved: HashSet::from([12]),
        })
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let mut controller = Controller::new(false);
    controller.dispatch(Action::SearchInputChanged("beef, potato".to_string()));
    let effects = controller.dispatch(Action::SearchSubmitted);

    // navigation does not wait for the answer
    assert_eq!(controller.route(), Route::SearchResults);
    assert_eq!(controller.search_input(), "");
    assert_eq!(controller.results_view(), ResultsView::Searching);

    drive(&mut controller, &client, effects).await;

    let paths: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(paths, vec!["/api/search_results", "/api/check_results"]);

    match controller.results_view() {
        ResultsView::Results(results) => {
            let flags: Vec<(RecipeId, bool)> =
                results.iter().map(|r| (r.recipe_id, r.is_saved)).collect();
            assert_eq!(flags, vec![(11, false), (12, true)]);
        }
        ResultsView::Searching => panic!("Expected annotated results"),
    }
}

#[tokio::test]
async fn test_zero_results_keep_searching_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search_results"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/check_results"))
        .respond_with(MembershipFixture {
            saved: HashSet::new(),
        })
        .expect(0)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let mut controller = Controller::new(false);
    controller.dispatch(Action::SearchInputChanged("gravel".to_string()));
    let effects = controller.dispatch(Action::SearchSubmitted);
    drive(&mut controller, &client, effects).await;

    assert!(controller.raw_results().is_empty());
    assert_eq!(controller.results_view(), ResultsView::Searching);
}

#[tokio::test]
async fn test_membership_flag_matches_backend_saved_set() {
    let saved: HashSet<RecipeId> = HashSet::from([2, 3, 5]);
    let ids: Vec<RecipeId> = (1..=6).collect();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search_results"))
        .respond_with(ResponseTemplate::new(200).set_body_json(raw_json(&ids)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/check_results"))
        .respond_with(MembershipFixture {
            saved: saved.clone(),
        })
        .mount(&server)
        .await;
    let client = client_for(&server);

    let mut controller = Controller::new(false);
    controller.dispatch(Action::SearchInputChanged("flour".to_string()));
    let effects = controller.dispatch(Action::SearchSubmitted);
    drive(&mut controller, &client, effects).await;

    let ResultsView::Results(results) = controller.results_view() else {
        panic!("Expected annotated results");
    };
    assert_eq!(results.len(), ids.len());
    for result in results {
        assert_eq!(result.is_saved, saved.contains(&result.recipe_id));
    }
}

#[tokio::test]
async fn test_removing_saved_recipe_refetches_exactly_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/saved_recipes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "saved_recipes": [
                {"recipe_id": 7, "title": "Shepherd's Pie", "saved_id": 1},
                {"recipe_id": 8, "title": "Gratin", "saved_id": 2}
            ]
        })))
        // one on mount, one after the removal
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/remove_recipe"))
        .and(body_json(json!({"recipe_id": 7})))
        .respond_with(message("Recipe removed"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/check_results"))
        .respond_with(MembershipFixture {
            saved: HashSet::new(),
        })
        .expect(0)
        .mount(&server)
        .await;
    let client = client_for(&server);

    // an earlier search left results behind; the saved view must not re-check them
    let mut controller = Controller::new(false);
    controller.dispatch(Action::SearchSubmitted);
    controller.handle(Event::SearchCompleted {
        seq: 1,
        result: Ok(serde_json::from_value(raw_json(&[4])).unwrap()),
    });
    assert!(!controller.raw_results().is_empty());

    let effects = controller.dispatch(Action::Navigate(Route::SavedRecipes));
    drive(&mut controller, &client, effects).await;
    assert_eq!(controller.saved().recipes().len(), 2);

    let effects = controller.dispatch(Action::RemoveRecipe(7));
    let names: Vec<&str> = effects.iter().map(|e| e.request.name()).collect();
    assert_eq!(names, vec!["remove_recipe"]);
    drive(&mut controller, &client, effects).await;

    assert_eq!(controller.notices().front().unwrap().text, "Recipe removed");
    let paths: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert!(!paths.iter().any(|p| p == "/api/check_results"));
}

#[tokio::test]
async fn test_rejected_saved_fetch_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/saved_recipes"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Please log in"})))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let mut controller = Controller::new(false);
    let effects = controller.dispatch(Action::Navigate(Route::SavedRecipes));
    drive(&mut controller, &client, effects).await;

    assert!(!controller.saved().is_loaded());
    assert_eq!(controller.saved().failure(), Some("Please log in"));
    let notice = controller.notices().front().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, "Please log in");
}

#[tokio::test]
async fn test_failed_check_of_new_search_hides_previous_results() {
    let server = MockServer::start().await;
    let first = raw_json(&[1]);
    let second = raw_json(&[2]);
    Mock::given(method("POST"))
        .and(path("/api/search_results"))
        .and(body_json(json!({"ingredients": "rice"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(first.clone()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/search_results"))
        .and(body_json(json!({"ingredients": "kale"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(second.clone()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/check_results"))
        .and(body_json(json!({ "results_list": first })))
        .respond_with(MembershipFixture {
            saved: HashSet::from([1]),
        })
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/check_results"))
        .and(body_json(json!({ "results_list": second })))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let mut controller = Controller::new(false);
    controller.dispatch(Action::SearchInputChanged("rice".to_string()));
    let effects = controller.dispatch(Action::SearchSubmitted);
    drive(&mut controller, &client, effects).await;
    assert!(matches!(controller.results_view(), ResultsView::Results(_)));

    controller.dispatch(Action::SearchInputChanged("kale".to_string()));
    let effects = controller.dispatch(Action::SearchSubmitted);
    drive(&mut controller, &client, effects).await;

    assert_eq!(controller.raw_results()[0].id, 2);
    assert_eq!(controller.results_view(), ResultsView::Searching);
    assert_eq!(
        controller.detail(1, OriginList::SearchResults),
        DetailView::Missing
    );
}

#[tokio::test]
async fn test_logout_redirects_home_after_completion() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/logout"))
        .respond_with(message("Logged out"))
        .expect(1)
        .mount(&server)
        .await;
    mount_session(&server, false, 2).await;
    let client = client_for(&server);

    let mut controller = Controller::new(false);
    let effects = controller.dispatch(Action::Navigate(Route::Logout));
    assert_eq!(controller.route(), Route::Logout);

    drive(&mut controller, &client, effects).await;

    assert_eq!(controller.route(), Route::Homepage);
    assert_eq!(controller.notices().front().unwrap().text, "Logged out");
    assert_eq!(controller.session().status(), LoginStatus::LoggedOut);
}

#[tokio::test]
async fn test_leaving_saved_view_drops_its_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/saved_recipes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"saved_recipes": []})))
        .expect(0)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let mut controller = Controller::new(false);
    let pending = controller.dispatch(Action::Navigate(Route::SavedRecipes));
    controller.dispatch(Action::Navigate(Route::Homepage));

    drive(&mut controller, &client, pending).await;
    assert!(!controller.saved().is_loaded());
}

#[tokio::test]
async fn test_details_read_from_origin_and_back_returns_there() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search_results"))
        .respond_with(ResponseTemplate::new(200).set_body_json(raw_json(&[21, 22])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/check_results"))
        .respond_with(MembershipFixture {
            saved: HashSet::from([21]),
        })
        // once for the search, once when the results view mounts again
        .expect(2)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let mut controller = Controller::new(false);
    controller.dispatch(Action::SearchInputChanged("leek".to_string()));
    let effects = controller.dispatch(Action::SearchSubmitted);
    drive(&mut controller, &client, effects).await;

    let details = Route::RecipeDetails {
        id: 21,
        origin: OriginList::SearchResults,
    };
    let effects = controller.dispatch(Action::Navigate(details));
    assert!(effects.is_empty());
    match controller.detail(21, OriginList::SearchResults) {
        DetailView::Found { recipe, .. } => {
            assert!(recipe.is_saved);
            assert_eq!(recipe.ready_mins, Some(45));
        }
        other => panic!("Expected recipe 21, got {:?}", other),
    }
    assert_eq!(
        controller.detail(99, OriginList::SearchResults),
        DetailView::Missing
    );

    let effects = controller.dispatch(Action::Back);
    assert_eq!(controller.route(), Route::SearchResults);
    drive(&mut controller, &client, effects).await;
}

#[test]
fn test_superseded_search_cannot_overwrite_newer_results() {
    let mut controller = Controller::new(false);
    controller.dispatch(Action::SearchInputChanged("eggs".to_string()));
    controller.dispatch(Action::SearchSubmitted);
    controller.dispatch(Action::SearchInputChanged("eggs, ham".to_string()));
    controller.dispatch(Action::SearchSubmitted);

    let newer = serde_json::from_value(raw_json(&[2])).unwrap();
    let older = serde_json::from_value(raw_json(&[1])).unwrap();

    let effects = controller.handle(Event::SearchCompleted {
        seq: 2,
        result: Ok(newer),
    });
    assert_eq!(effects.len(), 1);

    let effects = controller.handle(Event::SearchCompleted {
        seq: 1,
        result: Ok(older),
    });
    assert!(effects.is_empty());
    assert_eq!(controller.raw_results()[0].id, 2);
}

#[test]
fn test_save_from_results_rechecks_membership() {
    let mut controller = Controller::new(false);
    controller.dispatch(Action::SearchSubmitted);
    controller.handle(Event::SearchCompleted {
        seq: 1,
        result: Ok(serde_json::from_value(raw_json(&[4])).unwrap()),
    });

    let effects = controller.dispatch(Action::SaveRecipe(4));
    assert_eq!(effects.len(), 1);

    let effects = controller.handle(Event::RecipeSaved {
        id: 4,
        result: Ok("Recipe saved".to_string()),
    });
    let names: Vec<&str> = effects.iter().map(|e| e.request.name()).collect();
    assert_eq!(names, vec!["check_results"]);
}

#[test]
fn test_auth_forms_render_only_while_logged_out() {
    let mut controller = Controller::new(false);
    // unknown counts as logged out
    assert!(controller.shows_auth_forms());

    controller.handle(Event::SessionChecked(Ok(true)));
    assert!(!controller.shows_auth_forms());

    controller.handle(Event::SessionChecked(Ok(false)));
    assert!(controller.shows_auth_forms());
}

#[test]
fn test_back_from_directly_opened_detail_lands_on_its_list() {
    let mut controller = Controller::new(false);
    controller.mount(Route::RecipeDetails {
        id: 5,
        origin: OriginList::SavedRecipes,
    });
    assert_eq!(controller.history_len(), 0);

    let effects = controller.dispatch(Action::Back);

    assert_eq!(controller.route(), Route::SavedRecipes);
    let names: Vec<&str> = effects.iter().map(|e| e.request.name()).collect();
    assert_eq!(names, vec!["saved_recipes"]);
}

#[test]
fn test_back_without_history_elsewhere_stays_put() {
    let mut controller = Controller::new(false);
    controller.mount(Route::SearchResults);

    assert!(controller.dispatch(Action::Back).is_empty());
    assert_eq!(controller.route(), Route::SearchResults);
}
