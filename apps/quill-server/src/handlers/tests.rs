use std::path::Path;
use std::sync::Arc;

use actix_web::{
    App,
    cookie::{Cookie, time::Duration},
    dev::ServiceResponse,
    http::{StatusCode, header},
    test, web,
};
use uuid::Uuid;

use quill_core::domain::{Post, User};
use quill_core::ports::BaseRepository;
use quill_infra::{Argon2PasswordService, InMemoryDatabase, JwtSessionService, SessionConfig};

use super::{FORM_LIMIT_BYTES, configure_routes, not_found, static_files};
use crate::config::DEFAULT_STATIC_DIR;
use crate::middleware::auth::{SESSION_COOKIE, session_cookie};
use crate::middleware::flash::{FLASH_COOKIE, FlashMessage, FlashMiddleware, flash_cookie};
use crate::state::AppState;

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(FlashMiddleware)
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes)
                .service(static_files(Path::new(DEFAULT_STATIC_DIR)))
                .default_service(web::to(not_found)),
        )
        .await
    };
}

fn test_state() -> (AppState, InMemoryDatabase) {
    let db = InMemoryDatabase::new();
    let sessions = JwtSessionService::new(SessionConfig {
        secret: "test-secret".to_string(),
        ..SessionConfig::default()
    });
    let state = AppState::in_memory(
        db.clone(),
        Arc::new(Argon2PasswordService::with_cost(64, 1).unwrap()),
        Arc::new(sessions),
        false,
    );
    (state, db)
}

async fn seed_user(state: &AppState, username: &str, email: &str, password: &str) -> User {
    let hash = state.passwords.hash(password).unwrap();
    state
        .users
        .insert(User::new(username.into(), email.into(), hash))
        .await
        .unwrap()
}

async fn seed_post(db: &InMemoryDatabase, author: &User, title: &str) -> Post {
    db.posts()
        .insert(Post::new(author.id, title.into(), "Some content".into()))
        .await
        .unwrap()
}

fn login_cookie(state: &AppState, user: &User) -> Cookie<'static> {
    let token = state.sessions.issue_session(user.id, false).unwrap();
    session_cookie(&token, false)
}

fn location<B>(res: &ServiceResponse<B>) -> String {
    res.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn response_cookie<B>(res: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}

fn flash_texts<B>(res: &ServiceResponse<B>) -> Vec<String> {
    response_cookie(res, FLASH_COOKIE)
        .and_then(|c| serde_json::from_str::<Vec<FlashMessage>>(c.value()).ok())
        .unwrap_or_default()
        .into_iter()
        .map(|m| m.text)
        .collect()
}

fn body_text(bytes: actix_web::web::Bytes) -> String {
    String::from_utf8(bytes.to_vec()).unwrap()
}

// Pages

#[actix_rt::test]
async fn test_home_lists_posts_newest_first() {
    let (state, db) = test_state();
    let alice = seed_user(&state, "alice", "a@x.com", "p1").await;
    let mut older = Post::new(alice.id, "First post".into(), "Hello".into());
    older.created_at -= chrono::TimeDelta::hours(1);
    db.posts().insert(older).await.unwrap();
    seed_post(&db, &alice, "Second post").await;
    let app = test_app!(state);

    for uri in ["/", "/home"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let body = body_text(test::call_and_read_body(&app, req).await);

        let second = body.find("Second post").expect("newer post listed");
        let first = body.find("First post").expect("older post listed");
        assert!(second < first);
        assert!(body.contains("/static/profile_pics/default.jpg"));
        assert!(body.contains("href=\"/login\""));
    }
}

#[actix_rt::test]
async fn test_about_page() {
    let (state, _) = test_state();
    let app = test_app!(state);

    let res = test::call_service(&app, test::TestRequest::get().uri("/about").to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(test::read_body(res).await);
    assert!(body.contains("About Page"));
    assert!(body.contains("<title>Quill - About</title>"));
}

#[actix_rt::test]
async fn test_unknown_path_is_not_found() {
    let (state, _) = test_state();
    let app = test_app!(state);

    let res =
        test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = body_text(test::read_body(res).await);
    assert!(body.contains("Page Not Found"));
}

#[actix_rt::test]
async fn test_static_assets_are_served() {
    let (state, _) = test_state();
    let app = test_app!(state);

    for path in ["/static/main.css", "/static/profile_pics/default.jpg"] {
        let req = test::TestRequest::get().uri(path).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK, "{path}");
    }

    let req = test::TestRequest::get()
        .uri("/static/profile_pics/missing.jpg")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_invalid_session_cookie_is_anonymous() {
    let (state, _) = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/home")
        .cookie(Cookie::new(SESSION_COOKIE, "garbage"))
        .to_request();
    let body = body_text(test::call_and_read_body(&app, req).await);

    assert!(body.contains("href=\"/login\""));
    assert!(!body.contains("href=\"/logout\""));
}

#[actix_rt::test]
async fn test_session_for_deleted_user_is_anonymous() {
    let (state, _) = test_state();
    let alice = seed_user(&state, "alice", "a@x.com", "p1").await;
    let cookie = login_cookie(&state, &alice);
    state.users.delete(alice.id).await.unwrap();
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/account").cookie(cookie).to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/login");
}

// Flash messages

#[actix_rt::test]
async fn test_flash_is_shown_once() {
    let (state, _) = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/login")
        .cookie(flash_cookie(&[FlashMessage::success(
            "Account created successfully. Login now",
        )]))
        .to_request();
    let res = test::call_service(&app, req).await;

    let removal = response_cookie(&res, FLASH_COOKIE).expect("flash cookie cleared");
    assert_eq!(removal.max_age(), Some(Duration::ZERO));
    let body = body_text(test::read_body(res).await);
    assert!(body.contains("alert-success"));
    assert!(body.contains("Account created successfully. Login now"));
}

// Registration

#[actix_rt::test]
async fn test_register_then_duplicate_email_rejected() {
    let (state, _) = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/register")
        .set_form([
            ("username", "alice"),
            ("email", "a@x.com"),
            ("password", "p1"),
            ("confirm_password", "p1"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/login");
    assert_eq!(flash_texts(&res), ["Account created successfully. Login now"]);

    let stored = state.users.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(stored.username, "alice");
    assert_ne!(stored.password_hash, "p1");
    assert!(state.passwords.verify("p1", &stored.password_hash).unwrap());

    let req = test::TestRequest::post()
        .uri("/register")
        .set_form([
            ("username", "alice2"),
            ("email", "a@x.com"),
            ("password", "p1"),
            ("confirm_password", "p1"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(test::read_body(res).await);
    assert!(body.contains("That email is taken. Use a new one instead"));
    assert!(state.users.find_by_username("alice2").await.unwrap().is_none());
}

#[actix_rt::test]
async fn test_register_with_long_email() {
    let (state, _) = test_state();
    let app = test_app!(state);

    let email = format!("{}@{}.com", "a".repeat(64), "b".repeat(60));
    assert!(email.len() > 120);

    let req = test::TestRequest::post()
        .uri("/register")
        .set_form([
            ("username", "alice"),
            ("email", email.as_str()),
            ("password", "p1"),
            ("confirm_password", "p1"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/login");
    assert!(state.users.find_by_email(&email).await.unwrap().is_some());
}

#[actix_rt::test]
async fn test_register_duplicate_username_rejected() {
    let (state, _) = test_state();
    seed_user(&state, "alice", "a@x.com", "p1").await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/register")
        .set_form([
            ("username", "alice"),
            ("email", "other@x.com"),
            ("password", "p1"),
            ("confirm_password", "p1"),
        ])
        .to_request();
    let body = body_text(test::call_and_read_body(&app, req).await);

    assert!(body.contains("That username is taken. Use a new one instead"));
    assert!(state.users.find_by_email("other@x.com").await.unwrap().is_none());
}

#[actix_rt::test]
async fn test_register_rerenders_with_field_errors() {
    let (state, _) = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/register")
        .set_form([
            ("username", "a"),
            ("email", "not-an-email"),
            ("password", "secret-one"),
            ("confirm_password", "secret-two"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(test::read_body(res).await);
    assert!(body.contains("Field must be between 2 and 20 characters long."));
    assert!(body.contains("Invalid email address."));
    assert!(body.contains("Field must be equal to password."));
    assert!(!body.contains("secret-one"));
    assert!(body.contains("value=\"not-an-email\""));
}

#[actix_rt::test]
async fn test_register_with_missing_fields() {
    let (state, _) = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/register")
        .set_form([("username", "alice")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(test::read_body(res).await);
    assert!(body.contains("This field is required."));
}

#[actix_rt::test]
async fn test_register_redirects_signed_in_user() {
    let (state, _) = test_state();
    let alice = seed_user(&state, "alice", "a@x.com", "p1").await;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/register")
        .cookie(login_cookie(&state, &alice))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/home");
}

// Login and logout

#[actix_rt::test]
async fn test_login_issues_browser_session() {
    let (state, _) = test_state();
    let alice = seed_user(&state, "alice", "a@x.com", "p1").await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_form([("email", "a@x.com"), ("password", "p1")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/home");
    let cookie = response_cookie(&res, SESSION_COOKIE).expect("session cookie");
    assert_eq!(cookie.max_age(), None);
    let claims = state.sessions.validate_session(cookie.value()).unwrap();
    assert_eq!(claims.user_id, alice.id);
    assert!(!claims.remember);
}

#[actix_rt::test]
async fn test_login_remember_me_persists_cookie() {
    let (state, _) = test_state();
    seed_user(&state, "alice", "a@x.com", "p1").await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_form([("email", "a@x.com"), ("password", "p1"), ("remember", "y")])
        .to_request();
    let res = test::call_service(&app, req).await;

    let cookie = response_cookie(&res, SESSION_COOKIE).expect("session cookie");
    assert_eq!(cookie.max_age(), Some(Duration::days(365)));
}

#[actix_rt::test]
async fn test_login_failures_are_indistinguishable() {
    let (state, _) = test_state();
    seed_user(&state, "alice", "a@x.com", "p1").await;
    let app = test_app!(state);

    let wrong_password = test::TestRequest::post()
        .uri("/login")
        .set_form([("email", "a@x.com"), ("password", "nope")])
        .to_request();
    let unknown_email = test::TestRequest::post()
        .uri("/login")
        .set_form([("email", "b@x.com"), ("password", "p1")])
        .to_request();

    let res_a = test::call_service(&app, wrong_password).await;
    let res_b = test::call_service(&app, unknown_email).await;

    assert_eq!(res_a.status(), StatusCode::OK);
    assert_eq!(res_b.status(), StatusCode::OK);
    assert!(response_cookie(&res_a, SESSION_COOKIE).is_none());
    assert!(response_cookie(&res_b, SESSION_COOKIE).is_none());

    let body_a = body_text(test::read_body(res_a).await);
    let body_b = body_text(test::read_body(res_b).await);
    let message = "Login Unsuccessful. Please check email and password";
    assert!(body_a.contains(message));
    assert!(body_b.contains(message));
    assert!(body_a.contains("alert-danger"));
}

#[actix_rt::test]
async fn test_logout_clears_session() {
    let (state, _) = test_state();
    let alice = seed_user(&state, "alice", "a@x.com", "p1").await;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/logout")
        .cookie(login_cookie(&state, &alice))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/home");
    let cookie = response_cookie(&res, SESSION_COOKIE).expect("removal cookie");
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(Duration::ZERO));
}

// Account

#[actix_rt::test]
async fn test_account_requires_login() {
    let (state, _) = test_state();
    let app = test_app!(state);

    let res =
        test::call_service(&app, test::TestRequest::get().uri("/account").to_request()).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/login");
    assert_eq!(flash_texts(&res), ["Please log in to access this page."]);
}

#[actix_rt::test]
async fn test_account_prefills_current_values() {
    let (state, _) = test_state();
    let alice = seed_user(&state, "alice", "a@x.com", "p1").await;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/account")
        .cookie(login_cookie(&state, &alice))
        .to_request();
    let body = body_text(test::call_and_read_body(&app, req).await);

    assert!(body.contains("value=\"alice\""));
    assert!(body.contains("value=\"a@x.com\""));
    assert!(body.contains("/static/profile_pics/default.jpg"));
}

#[actix_rt::test]
async fn test_account_update_with_own_values_succeeds() {
    let (state, _) = test_state();
    let alice = seed_user(&state, "alice", "a@x.com", "p1").await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/account")
        .cookie(login_cookie(&state, &alice))
        .set_form([("username", "alice"), ("email", "a@x.com")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/account");
    assert_eq!(flash_texts(&res), ["Your account has been updated successfully"]);
}

#[actix_rt::test]
async fn test_account_update_changes_profile() {
    let (state, _) = test_state();
    let alice = seed_user(&state, "alice", "a@x.com", "p1").await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/account")
        .cookie(login_cookie(&state, &alice))
        .set_form([("username", "alicia"), ("email", "alicia@x.com")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    let stored = state.users.find_by_id(alice.id).await.unwrap().unwrap();
    assert_eq!(stored.username, "alicia");
    assert_eq!(stored.email, "alicia@x.com");
    assert_eq!(stored.password_hash, alice.password_hash);
}

#[actix_rt::test]
async fn test_account_update_rejects_taken_username() {
    let (state, _) = test_state();
    let alice = seed_user(&state, "alice", "a@x.com", "p1").await;
    seed_user(&state, "bob", "b@x.com", "p2").await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/account")
        .cookie(login_cookie(&state, &alice))
        .set_form([("username", "bob"), ("email", "a@x.com")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(test::read_body(res).await);
    assert!(body.contains("That username is taken. Use a new one instead"));
    let stored = state.users.find_by_id(alice.id).await.unwrap().unwrap();
    assert_eq!(stored.username, "alice");
}

// Posts

#[actix_rt::test]
async fn test_new_post_requires_login() {
    let (state, _) = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/post/new")
        .set_form([("title", "T"), ("content", "C")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/login");
}

#[actix_rt::test]
async fn test_create_post() {
    let (state, _) = test_state();
    let alice = seed_user(&state, "alice", "a@x.com", "p1").await;
    let app = test_app!(state);

    let form_page = test::TestRequest::get()
        .uri("/post/new")
        .cookie(login_cookie(&state, &alice))
        .to_request();
    let body = body_text(test::call_and_read_body(&app, form_page).await);
    assert!(body.contains("Create a new post"));

    let req = test::TestRequest::post()
        .uri("/post/new")
        .cookie(login_cookie(&state, &alice))
        .set_form([("title", "Hello"), ("content", "First!")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/home");
    assert_eq!(flash_texts(&res), ["Great! Your post has been created"]);

    let posts = state.posts.list_with_authors().await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].post.title, "Hello");
    assert_eq!(posts[0].author.id, alice.id);
}

#[actix_rt::test]
async fn test_create_post_with_long_title_and_content() {
    let (state, _) = test_state();
    let alice = seed_user(&state, "alice", "a@x.com", "p1").await;
    let app = test_app!(state);

    let title = "t".repeat(150);
    let content = "c".repeat(20_000);

    let req = test::TestRequest::post()
        .uri("/post/new")
        .cookie(login_cookie(&state, &alice))
        .set_form([("title", title.as_str()), ("content", content.as_str())])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/home");

    let posts = state.posts.list_with_authors().await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].post.title, title);
    assert_eq!(posts[0].post.content.len(), 20_000);
}

#[actix_rt::test]
async fn test_oversized_form_is_rejected() {
    let (state, _) = test_state();
    let alice = seed_user(&state, "alice", "a@x.com", "p1").await;
    let app = test_app!(state);

    let content = "c".repeat(FORM_LIMIT_BYTES + 1);
    let req = test::TestRequest::post()
        .uri("/post/new")
        .cookie(login_cookie(&state, &alice))
        .set_form([("title", "Big"), ("content", content.as_str())])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(state.posts.list_with_authors().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_create_post_requires_title_and_content() {
    let (state, _) = test_state();
    let alice = seed_user(&state, "alice", "a@x.com", "p1").await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/post/new")
        .cookie(login_cookie(&state, &alice))
        .set_form([("title", ""), ("content", "")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(test::read_body(res).await);
    assert_eq!(body.matches("This field is required.").count(), 2);
    assert!(state.posts.list_with_authors().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_view_post_shows_controls_only_to_author() {
    let (state, db) = test_state();
    let alice = seed_user(&state, "alice", "a@x.com", "p1").await;
    let bob = seed_user(&state, "bob", "b@x.com", "p2").await;
    let post = seed_post(&db, &alice, "Alice's thoughts").await;
    let app = test_app!(state);
    let uri = format!("/post/{}", post.id);

    let as_author = test::TestRequest::get()
        .uri(&uri)
        .cookie(login_cookie(&state, &alice))
        .to_request();
    let as_other = test::TestRequest::get()
        .uri(&uri)
        .cookie(login_cookie(&state, &bob))
        .to_request();
    let anonymous = test::TestRequest::get().uri(&uri).to_request();

    let update_link = format!("/post/{}/update", post.id);
    let author_body = body_text(test::call_and_read_body(&app, as_author).await);
    let other_body = body_text(test::call_and_read_body(&app, as_other).await);
    let anonymous_body = body_text(test::call_and_read_body(&app, anonymous).await);

    assert!(author_body.contains(&update_link));
    assert!(!other_body.contains(&update_link));
    assert!(!anonymous_body.contains(&update_link));
    assert!(anonymous_body.contains("Some content"));
}

#[actix_rt::test]
async fn test_missing_post_is_not_found_everywhere() {
    let (state, _) = test_state();
    let alice = seed_user(&state, "alice", "a@x.com", "p1").await;
    let app = test_app!(state);
    let missing = Uuid::new_v4();

    let uris = [
        format!("/post/{}", missing),
        format!("/post/{}/update", missing),
        format!("/post/{}/delete", missing),
        "/post/not-a-uuid".to_string(),
        "/post/42/update".to_string(),
    ];

    for uri in uris {
        let req = test::TestRequest::get()
            .uri(&uri)
            .cookie(login_cookie(&state, &alice))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[actix_rt::test]
async fn test_update_post_by_author() {
    let (state, db) = test_state();
    let alice = seed_user(&state, "alice", "a@x.com", "p1").await;
    let post = seed_post(&db, &alice, "Draft").await;
    let app = test_app!(state);

    let form_page = test::TestRequest::get()
        .uri(&format!("/post/{}/update", post.id))
        .cookie(login_cookie(&state, &alice))
        .to_request();
    let body = body_text(test::call_and_read_body(&app, form_page).await);
    assert!(body.contains("Update post"));
    assert!(body.contains("value=\"Draft\""));

    let req = test::TestRequest::post()
        .uri(&format!("/post/{}/update", post.id))
        .cookie(login_cookie(&state, &alice))
        .set_form([("title", "Final"), ("content", "Edited")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), format!("/post/{}", post.id));
    assert_eq!(flash_texts(&res), ["Your post has been updated!"]);

    let stored = db.posts().find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Final");
    assert_eq!(stored.content, "Edited");
    assert_eq!(stored.user_id, alice.id);
    assert_eq!(stored.created_at, post.created_at);
}

#[actix_rt::test]
async fn test_non_author_cannot_update_or_delete() {
    let (state, db) = test_state();
    let alice = seed_user(&state, "alice", "a@x.com", "p1").await;
    let bob = seed_user(&state, "bob", "b@x.com", "p2").await;
    let post = seed_post(&db, &alice, "Mine").await;
    let app = test_app!(state);

    let update_form = test::TestRequest::get()
        .uri(&format!("/post/{}/update", post.id))
        .cookie(login_cookie(&state, &bob))
        .to_request();
    let update = test::TestRequest::post()
        .uri(&format!("/post/{}/update", post.id))
        .cookie(login_cookie(&state, &bob))
        .set_form([("title", "Hijacked"), ("content", "Hijacked")])
        .to_request();
    let delete = test::TestRequest::post()
        .uri(&format!("/post/{}/delete", post.id))
        .cookie(login_cookie(&state, &bob))
        .to_request();

    for req in [update_form, update, delete] {
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    let stored = db.posts().find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored, post);
}

#[actix_rt::test]
async fn test_delete_post_by_author() {
    let (state, db) = test_state();
    let alice = seed_user(&state, "alice", "a@x.com", "p1").await;
    let post = seed_post(&db, &alice, "Short-lived").await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri(&format!("/post/{}/delete", post.id))
        .cookie(login_cookie(&state, &alice))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/home");
    assert_eq!(flash_texts(&res), ["Your post was deleted successfully"]);
    assert!(db.posts().find_by_id(post.id).await.unwrap().is_none());
}
