mod common;

use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use user_service::domain::user::models::DisplayName;
use user_service::domain::user::models::EmailAddress;
use user_service::domain::user::models::NewUser;
use user_service::domain::user::models::UserStatus;
use user_service::domain::user::ports::UserRepository;

const PASSWORD: &str = "Passw0rd!";

async fn body(response: reqwest::Response) -> serde_json::Value {
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::spawn().await;

    let response = app.signup("a@b.com", PASSWORD, "Tester").await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "회원가입이 완료되었습니다.");
    assert_eq!(body["data"]["name"], "Tester");
    assert_eq!(body["data"]["userId"], 1);
    assert!(body["data"]["redirectMessage"].is_string());

    let token = body["data"]["token"].as_str().unwrap();
    assert_eq!(
        app.authenticator.tokens().extract_subject(token),
        Some("1".to_string())
    );
    assert_eq!(
        app.authenticator.tokens().extract_roles(token),
        vec!["USER".to_string()]
    );
}

#[tokio::test]
async fn test_signup_login_me_round_trip() {
    let app = TestApp::spawn().await;

    let response = app.signup("a@b.com", PASSWORD, "Tester").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.login("a@b.com", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body_json = body(response).await;
    assert_eq!(body_json["message"], "로그인 성공");
    let token = body_json["data"]["token"].as_str().unwrap().to_string();
    assert!(!token.is_empty());

    let response = app
        .get_authenticated("/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body(response).await;
    assert_eq!(body["message"], "사용자 정보 조회 성공");
    assert_eq!(body["data"]["userId"], 1);
    assert_eq!(body["data"]["email"], "a@b.com");
    assert_eq!(body["data"]["name"], "Tester");
    assert_eq!(body["data"]["status"], "ACTIVE");
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = TestApp::spawn().await;

    let response = app.signup("a@b.com", PASSWORD, "Tester").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.signup("a@b.com", "0therPass#", "Other").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("이미 사용 중"));
    assert!(body["data"].is_null());

    assert_eq!(app.repository.len().await, 1);
}

#[tokio::test]
async fn test_signup_validation_failures() {
    let app = TestApp::spawn().await;

    let cases = [
        ("not-an-email", PASSWORD, "Tester"),
        ("a@b.com", "short1!", "Tester"),
        ("a@b.com", "NoDigits!!", "Tester"),
        ("a@b.com", "NoSpecial1", "Tester"),
        ("a@b.com", "Has Space1!", "Tester"),
        ("a@b.com", PASSWORD, "T"),
        ("a@b.com", PASSWORD, "   "),
    ];

    for (email, password, name) in cases {
        let response = app.signup(email, password, name).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "{} / {} / {}",
            email,
            password,
            name
        );

        let body = body(response).await;
        assert_eq!(body["message"], "입력값이 올바르지 않습니다.");
    }

    assert!(app.repository.is_empty().await);
}

#[tokio::test]
async fn test_signup_malformed_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/signup")
        .header("content-type", "application/json")
        .body("{\"email\": ")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post("/signup")
        .json(&json!({ "email": "a@b.com" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body(response).await;
    assert_eq!(body["message"], "입력값이 올바르지 않습니다.");
}

#[tokio::test]
async fn test_login_unknown_email_and_wrong_password_look_identical() {
    let app = TestApp::spawn().await;
    app.signup("a@b.com", PASSWORD, "Tester").await;

    let unknown = app.login("nobody@b.com", PASSWORD).await;
    let wrong = app.login("a@b.com", "Wr0ngPass!").await;

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let unknown = body(unknown).await;
    let wrong = body(wrong).await;
    assert_eq!(unknown, wrong);
    assert_eq!(unknown["message"], "이메일 또는 비밀번호가 올바르지 않습니다.");
}

#[tokio::test]
async fn test_login_blank_password_is_validation_failure() {
    let app = TestApp::spawn().await;

    let response = app.login("a@b.com", "").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_disabled_account() {
    let app = TestApp::spawn().await;

    let now = Utc::now();
    app.repository
        .create(NewUser {
            email: EmailAddress::new("off@b.com".to_string()).unwrap(),
            password_hash: app.authenticator.hash_password(PASSWORD).unwrap(),
            display_name: DisplayName::new("Dormant".to_string()).unwrap(),
            is_admin: false,
            status: UserStatus::Inactive,
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap();

    let response = app.login("off@b.com", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body(response).await["message"], "비활성화된 계정입니다.");

    let response = app.login("off@b.com", "Wr0ngPass!").await;
    assert_eq!(
        body(response).await["message"],
        "이메일 또는 비밀번호가 올바르지 않습니다."
    );
}

#[tokio::test]
async fn test_login_admin_token_carries_admin_role() {
    let app = TestApp::spawn().await;

    let now = Utc::now();
    app.repository
        .create(NewUser {
            email: EmailAddress::new("root@b.com".to_string()).unwrap(),
            password_hash: app.authenticator.hash_password(PASSWORD).unwrap(),
            display_name: DisplayName::new("Admin".to_string()).unwrap(),
            is_admin: true,
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap();

    let response = app.login("root@b.com", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body(response).await;
    let token = body["data"]["token"].as_str().unwrap();
    assert_eq!(
        app.authenticator.tokens().extract_roles(token),
        vec!["USER".to_string(), "ADMIN".to_string()]
    );
}

#[tokio::test]
async fn test_me_without_token() {
    let app = TestApp::spawn().await;

    let response = app.get("/me").send().await.expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body(response).await["message"], "인증이 필요합니다.");
}

#[tokio::test]
async fn test_me_with_non_bearer_header_is_unauthenticated() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/me")
        .header("Authorization", "InvalidToken")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body(response).await["message"], "인증이 필요합니다.");
}

#[tokio::test]
async fn test_me_with_invalid_bearer_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/me", "not.a.jwt")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "유효하지 않은 토큰입니다.");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_invalid_bearer_token_rejected_on_public_route() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/login")
        .bearer_auth("not.a.jwt")
        .json(&json!({ "email": "a@b.com", "password": PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body(response).await["message"], "유효하지 않은 토큰입니다.");
}

#[tokio::test]
async fn test_me_with_expired_token() {
    let app = TestApp::spawn().await;
    app.signup("a@b.com", PASSWORD, "Tester").await;

    let token = app
        .authenticator
        .tokens()
        .issue_at("1", &["USER".to_string()], Utc::now() - Duration::hours(25))
        .unwrap();

    let response = app
        .get_authenticated("/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body(response).await["message"], "유효하지 않은 토큰입니다.");
}

#[tokio::test]
async fn test_me_with_token_from_other_secret() {
    let app = TestApp::spawn().await;
    app.signup("a@b.com", PASSWORD, "Tester").await;

    let other = auth::Authenticator::new(
        b"another-secret-key-that-is-32-bytes-long",
        Duration::hours(1),
    );
    let token = other
        .issue_token("1", &["USER".to_string()])
        .unwrap()
        .access_token;

    let response = app
        .get_authenticated("/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_non_numeric_subject() {
    let app = TestApp::spawn().await;

    let token = app
        .authenticator
        .issue_token("someone", &["USER".to_string()])
        .unwrap()
        .access_token;

    let response = app
        .get_authenticated("/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body(response).await["message"], "유효하지 않은 토큰입니다.");
}

#[tokio::test]
async fn test_me_for_missing_user() {
    let app = TestApp::spawn().await;

    let token = app
        .authenticator
        .issue_token("42", &["USER".to_string()])
        .unwrap()
        .access_token;

    let response = app
        .get_authenticated("/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body(response).await["message"], "사용자를 찾을 수 없습니다.");
}
