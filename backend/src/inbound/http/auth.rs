//! Authentication API handlers.
//!
//! ```text
//! POST /auth/signup  {"email":"a@b.com","password":"pw1"}
//! POST /auth/signin  {"email":"a@b.com","password":"pw1"}
//! POST /auth/signout
//! GET  /auth/whoami
//! GET  /auth/{id}
//! GET  /auth?email=a@b.com   (admin only)
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    AuthCredentials, AuthValidationError, EmailAddress, Error, User, UserId, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::current_user::{CurrentUser, require_admin};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Signup and signin request body.
///
/// Example JSON: `{"email":"a@b.com","password":"pw1"}`
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CredentialsRequest {
    #[schema(example = "a@b.com")]
    pub email: String,
    #[schema(example = "pw1")]
    pub password: String,
}

impl TryFrom<&CredentialsRequest> for AuthCredentials {
    type Error = AuthValidationError;

    fn try_from(value: &CredentialsRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Public projection of a user. The credential and admin flag stay
/// server-side.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "a@b.com")]
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().value(),
            email: user.email().to_string(),
        }
    }
}

/// Query string for `GET /auth`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    /// Exact email to look up.
    pub email: String,
}

fn map_email_error(err: UserValidationError) -> Error {
    let code = match err {
        UserValidationError::EmptyEmail => "empty_email",
        UserValidationError::EmailTooLong { .. } => "email_too_long",
        _ => "invalid_email",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": "email", "code": code }))
}

fn map_credentials_error(err: AuthValidationError) -> Error {
    match err {
        AuthValidationError::Email(inner) => map_email_error(inner),
        AuthValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

fn parse_credentials(payload: &CredentialsRequest) -> ApiResult<AuthCredentials> {
    AuthCredentials::try_from(payload).map_err(map_credentials_error)
}

/// Create an account and sign it in.
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request or email in use", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = parse_credentials(&payload)?;
    let user = state.auth.signup(&credentials).await?;
    session.persist_user(user.id())?;
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// Authenticate an existing account and bind it to the session.
///
/// Unknown emails and wrong passwords produce the same response.
#[utoipa::path(
    post,
    path = "/auth/signin",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Signed in", body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request or invalid credentials", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signin",
    security([])
)]
#[post("/signin")]
pub async fn signin(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = parse_credentials(&payload)?;
    let user = state.auth.signin(&credentials).await?;
    session.persist_user(user.id())?;
    Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
}

/// Clear the session binding.
#[utoipa::path(
    post,
    path = "/auth/signout",
    responses((status = 200, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "signout"
)]
#[post("/signout")]
pub async fn signout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::Ok().finish()
}

/// Return the signed-in user, or `null` when nobody is signed in.
#[utoipa::path(
    get,
    path = "/auth/whoami",
    responses(
        (status = 200, description = "Current user or null", body = Option<UserResponse>),
        (status = 503, description = "User store unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "whoami"
)]
#[get("/whoami")]
pub async fn whoami(current: CurrentUser) -> web::Json<Option<UserResponse>> {
    web::Json(current.user().map(UserResponse::from))
}

/// Fetch a user by id.
#[utoipa::path(
    get,
    path = "/auth/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "No user with that id", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "findUser"
)]
#[get("/{id}")]
pub async fn find_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id: UserId = path.parse().map_err(|err: UserValidationError| {
        Error::invalid_request(err.to_string()).with_details(json!({ "field": "id" }))
    })?;
    let user = state.auth.find_user(id).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// List users registered under an email. Admins only.
#[utoipa::path(
    get,
    path = "/auth",
    params(EmailQuery),
    responses(
        (status = 200, description = "Matching users", body = [UserResponse]),
        (status = 400, description = "Invalid email", body = ErrorSchema),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 403, description = "Not an admin", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "findUsersByEmail"
)]
#[get("")]
pub async fn find_users_by_email(
    state: web::Data<HttpState>,
    current: CurrentUser,
    query: web::Query<EmailQuery>,
) -> ApiResult<web::Json<Vec<UserResponse>>> {
    require_admin(&current)?;
    let email = EmailAddress::new(&query.email).map_err(map_email_error)?;
    let users = state.auth.users_by_email(&email).await?;
    Ok(web::Json(users.iter().map(UserResponse::from).collect()))
}

/// Register the auth routes under `/auth`.
///
/// `whoami` is registered before `{id}` so the literal segment wins.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(signup)
            .service(signin)
            .service(signout)
            .service(whoami)
            .service(find_user)
            .service(find_users_by_email),
    );
}

#[cfg(test)]
mod tests;
