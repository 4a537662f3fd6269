use chrono::Duration;
use sea_orm::{ActiveModelTrait, IntoActiveModel, Set};
use serde_json::json;

use paddock_server::entity::role::Role;
use paddock_server::utils::datetime;

use crate::common::{TestApp, TestResponse, routes};

const EMAIL: &str = "leaving@paddock.test";

fn result_code(res: &TestResponse) -> &str {
    let start = res
        .text
        .find("data-result=\"")
        .map(|i| i + "data-result=\"".len())
        .expect("page should carry a result");
    let len = res.text[start..].find('"').unwrap();
    &res.text[start..start + len]
}

async fn request_code(app: &TestApp) -> String {
    app.insert_member(EMAIL, Some("password123"), Role::Member)
        .await;
    let res = app
        .post_without_token(routes::DELETE_ACCOUNT_OTP, &json!({ "email": EMAIL }))
        .await;
    assert_eq!(res.status, 200);
    app.find_member(EMAIL).await.unwrap().otp.unwrap()
}

#[tokio::test]
async fn form_is_served() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::DELETE_ACCOUNT_FORM).await;

    assert_eq!(res.status, 200);
    assert!(res.text.contains("<form method=\"post\" action=\"/requestDeleteAccount\">"));
    assert!(res.text.contains("name=\"otp\""));
}

#[tokio::test]
async fn valid_code_records_the_request_and_consumes_the_code() {
    let app = TestApp::spawn().await;
    let otp = request_code(&app).await;

    let res = app
        .post_form(
            routes::DELETE_ACCOUNT_FORM,
            &[("email", EMAIL), ("otp", otp.as_str()), ("reason", "Sold the bike")],
        )
        .await;

    assert_eq!(res.status, 200);
    assert_eq!(result_code(&res), "success");
    let member = app.find_member(EMAIL).await.unwrap();
    assert!(member.otp.is_none());
}

#[tokio::test]
async fn wrong_or_stale_codes_are_refused() {
    let app = TestApp::spawn().await;
    let otp = request_code(&app).await;

    let res = app
        .post_form(routes::DELETE_ACCOUNT_FORM, &[("email", EMAIL), ("otp", "0000")])
        .await;
    assert_eq!(result_code(&res), "invalid_otp");

    let member = app.find_member(EMAIL).await.unwrap();
    let mut active = member.into_active_model();
    active.otp_date = Set(Some(datetime::now() - Duration::minutes(30)));
    active.update(&app.db).await.unwrap();

    let res = app
        .post_form(routes::DELETE_ACCOUNT_FORM, &[("email", EMAIL), ("otp", otp.as_str())])
        .await;
    assert_eq!(result_code(&res), "expired_otp");
}

#[tokio::test]
async fn missing_or_unknown_email_is_reported() {
    let app = TestApp::spawn().await;

    let res = app
        .post_form(routes::DELETE_ACCOUNT_FORM, &[("email", ""), ("otp", "1234")])
        .await;
    assert_eq!(result_code(&res), "missing_email");

    let res = app
        .post_form(
            routes::DELETE_ACCOUNT_FORM,
            &[("email", "ghost@paddock.test"), ("otp", "1234")],
        )
        .await;
    assert_eq!(result_code(&res), "member_not_found");
}
