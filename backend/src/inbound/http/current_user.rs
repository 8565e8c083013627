//! Request-scoped current user and the admin gate.
//!
//! [`CurrentUser`] re-hydrates the user bound to the session cookie on each
//! request. Handlers receive it as an explicit extractor value and pass it to
//! authorization checks such as [`require_admin`].

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{AuthError, Error, User};

use super::session::SessionContext;
use super::state::HttpState;

/// The user bound to this request's session, if any.
#[derive(Debug, Clone)]
pub struct CurrentUser(Option<User>);

impl CurrentUser {
    /// Wrap an optional user.
    pub fn new(user: Option<User>) -> Self {
        Self(user)
    }

    /// Borrow the user, if one is signed in.
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }

    /// Take the user, if one is signed in.
    pub fn into_inner(self) -> Option<User> {
        self.0
    }
}

/// Require a signed-in administrator.
///
/// Returns `401` when nobody is signed in and `403` when the user is not an
/// admin.
pub fn require_admin(current: &CurrentUser) -> Result<&User, Error> {
    let user = current
        .user()
        .ok_or_else(|| Error::unauthorized("login required"))?;
    if !user.is_admin() {
        return Err(Error::forbidden("admin access required"));
    }
    Ok(user)
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let session = session.await?;
            let Some(id) = session.user_id()? else {
                return Ok(Self(None));
            };
            let state = state
                .ok_or_else(|| Error::internal("HTTP state is not configured for this app"))?;
            match state.auth.find_user(id).await {
                Ok(user) => Ok(Self(Some(user))),
                Err(AuthError::NotFound { .. }) => {
                    debug!(user_id = %id, "session refers to a missing user");
                    Ok(Self(None))
                }
                Err(error) => Err(Error::from(error).into()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Credential, EmailAddress, ErrorCode, UserId};
    use rstest::{fixture, rstest};

    #[fixture]
    fn user() -> User {
        User::new(
            UserId::new(1).expect("id"),
            EmailAddress::new("a@b.com").expect("email"),
            Credential::parse("0011223344556677.beef").expect("credential"),
        )
    }

    #[rstest]
    fn anonymous_requests_are_unauthorised() {
        let error = require_admin(&CurrentUser::new(None)).expect_err("anonymous");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    fn regular_users_are_forbidden(user: User) {
        let error = require_admin(&CurrentUser::new(Some(user))).expect_err("not admin");
        assert_eq!(error.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    fn admins_pass(user: User) {
        let current = CurrentUser::new(Some(user.with_admin(true)));
        let admin = require_admin(&current).expect("admin passes");
        assert_eq!(admin.id().value(), 1);
    }
}
