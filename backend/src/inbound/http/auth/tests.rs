//! Handler tests for the auth routes over an in-memory directory.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::Value;

use super::*;
use crate::domain::AuthService;
use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
use crate::outbound::hashing::{Argon2CredentialHasher, KdfParams};
use crate::outbound::memory::InMemoryUserDirectory;

fn state_with(directory: Arc<InMemoryUserDirectory>) -> HttpState {
    let hasher = Arc::new(Argon2CredentialHasher::new(KdfParams::new(1024, 1)));
    HttpState::new(Arc::new(AuthService::new(directory, hasher)))
}

async fn init(
    directory: Arc<InMemoryUserDirectory>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state_with(directory)))
            .wrap(test_session_middleware())
            .configure(crate::inbound::http::configure),
    )
    .await
}

fn body(email: &str, password: &str) -> CredentialsRequest {
    CredentialsRequest {
        email: email.to_owned(),
        password: password.to_owned(),
    }
}

async fn post<S>(app: &S, uri: &str, payload: &CredentialsRequest) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(payload)
        .to_request();
    actix_test::call_service(app, req).await
}

async fn get<S>(app: &S, uri: &str, cookie: Option<Cookie<'static>>) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut req = actix_test::TestRequest::get().uri(uri);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie);
    }
    actix_test::call_service(app, req.to_request()).await
}

async fn json(res: ServiceResponse) -> Value {
    let bytes = actix_test::read_body(res).await;
    serde_json::from_slice(&bytes).expect("JSON body")
}

#[actix_web::test]
async fn signup_creates_user_and_binds_session() {
    let app = init(Arc::new(InMemoryUserDirectory::new())).await;

    let res = post(&app, "/auth/signup", &body("a@b.com", "pw1")).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let cookie = session_cookie(&res);
    let created: UserResponse = actix_test::read_body_json(res).await;
    assert_eq!(
        created,
        UserResponse {
            id: 1,
            email: "a@b.com".to_owned()
        }
    );

    let me = get(&app, "/auth/whoami", Some(cookie)).await;
    assert_eq!(me.status(), StatusCode::OK);
    let me: Option<UserResponse> = actix_test::read_body_json(me).await;
    assert_eq!(me, Some(created));
}

#[actix_web::test]
async fn signup_response_never_exposes_credential() {
    let app = init(Arc::new(InMemoryUserDirectory::new())).await;

    let res = post(&app, "/auth/signup", &body("a@b.com", "pw1")).await;
    let value = json(res).await;
    let object = value.as_object().expect("object body");
    assert_eq!(object.len(), 2);
    assert!(object.contains_key("id"));
    assert!(object.contains_key("email"));
}

#[actix_web::test]
async fn duplicate_signup_is_rejected_without_mutation() {
    let directory = Arc::new(InMemoryUserDirectory::new());
    let app = init(directory.clone()).await;

    let first = post(&app, "/auth/signup", &body("a@b.com", "pw1")).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post(&app, "/auth/signup", &body("a@b.com", "pw2")).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let value = json(second).await;
    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["message"], "email already in use");
    assert_eq!(directory.len().expect("len"), 1);
}

#[rstest]
#[case("a@b.com", "wrong")]
#[case("nobody@b.com", "pw1")]
#[actix_web::test]
async fn signin_failures_share_one_response(#[case] email: &str, #[case] password: &str) {
    let app = init(Arc::new(InMemoryUserDirectory::new())).await;
    post(&app, "/auth/signup", &body("a@b.com", "pw1")).await;

    let res = post(&app, "/auth/signin", &body(email, password)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let value = json(res).await;
    assert_eq!(value["message"], "invalid credentials");
    assert!(value.get("details").is_none());
}

#[actix_web::test]
async fn signin_binds_existing_user() {
    let app = init(Arc::new(InMemoryUserDirectory::new())).await;
    post(&app, "/auth/signup", &body("a@b.com", "pw1")).await;

    let res = post(&app, "/auth/signin", &body(" a@b.com ", "pw1")).await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = session_cookie(&res);
    let signed_in: UserResponse = actix_test::read_body_json(res).await;
    assert_eq!(signed_in.id, 1);

    let me: Option<UserResponse> =
        actix_test::read_body_json(get(&app, "/auth/whoami", Some(cookie)).await).await;
    assert_eq!(me.map(|user| user.email), Some("a@b.com".to_owned()));
}

#[rstest]
#[case("", "pw1", "email", "empty_email")]
#[case("not-an-email", "pw1", "email", "invalid_email")]
#[case("a@b.com", "", "password", "empty_password")]
#[actix_web::test]
async fn invalid_payloads_report_the_field(
    #[case] email: &str,
    #[case] password: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = init(Arc::new(InMemoryUserDirectory::new())).await;

    let res = post(&app, "/auth/signup", &body(email, password)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let value = json(res).await;
    assert_eq!(value["details"]["field"], field);
    assert_eq!(value["details"]["code"], code);
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let app = init(Arc::new(InMemoryUserDirectory::new())).await;

    let req = actix_test::TestRequest::post()
        .uri("/auth/signup")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"email\":")
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(res).await["code"], "invalid_request");
}

#[actix_web::test]
async fn whoami_without_session_is_null() {
    let app = init(Arc::new(InMemoryUserDirectory::new())).await;

    let res = get(&app, "/auth/whoami", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json(res).await, Value::Null);
}

#[actix_web::test]
async fn signout_clears_binding() {
    let app = init(Arc::new(InMemoryUserDirectory::new())).await;
    let res = post(&app, "/auth/signup", &body("a@b.com", "pw1")).await;
    let cookie = session_cookie(&res);

    let req = actix_test::TestRequest::post()
        .uri("/auth/signout")
        .cookie(cookie)
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let cleared = session_cookie(&res);

    let me = get(&app, "/auth/whoami", Some(cleared)).await;
    assert_eq!(json(me).await, Value::Null);
}

#[rstest]
#[case("/auth/1", StatusCode::OK)]
#[case("/auth/2", StatusCode::NOT_FOUND)]
#[case("/auth/0", StatusCode::BAD_REQUEST)]
#[case("/auth/abc", StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn find_user_by_id(#[case] uri: &str, #[case] expected: StatusCode) {
    let app = init(Arc::new(InMemoryUserDirectory::new())).await;
    post(&app, "/auth/signup", &body("a@b.com", "pw1")).await;

    let res = get(&app, uri, None).await;
    assert_eq!(res.status(), expected);
}

#[actix_web::test]
async fn email_lookup_requires_a_session() {
    let app = init(Arc::new(InMemoryUserDirectory::new())).await;

    let res = get(&app, "/auth?email=a@b.com", None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn email_lookup_requires_admin() {
    let app = init(Arc::new(InMemoryUserDirectory::new())).await;
    let res = post(&app, "/auth/signup", &body("a@b.com", "pw1")).await;
    let cookie = session_cookie(&res);

    let res = get(&app, "/auth?email=a@b.com", Some(cookie)).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn admins_can_look_up_by_email() {
    let directory = Arc::new(InMemoryUserDirectory::new());
    let app = init(directory.clone()).await;
    let res = post(&app, "/auth/signup", &body("root@b.com", "pw1")).await;
    let cookie = session_cookie(&res);
    post(&app, "/auth/signup", &body("a@b.com", "pw1")).await;
    directory
        .grant_admin(UserId::new(1).expect("id"))
        .expect("grant admin");

    let res = get(&app, "/auth?email=a@b.com", Some(cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let users: Vec<UserResponse> = actix_test::read_body_json(res).await;
    assert_eq!(
        users,
        vec![UserResponse {
            id: 2,
            email: "a@b.com".to_owned()
        }]
    );
}
