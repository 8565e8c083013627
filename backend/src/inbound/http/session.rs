//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers only bind, read, or clear the
//! authenticated user id.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Bind the authenticated user's id to the session cookie.
    ///
    /// The session id is renewed so a pre-login cookie cannot be replayed.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.value())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the bound user id, if present.
    ///
    /// A value that does not decode to a valid id is treated as absent.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = match self.0.get::<i64>(USER_ID_KEY) {
            Ok(raw) => raw,
            Err(error) => {
                warn!(%error, "unreadable user id in session cookie");
                return Ok(None);
            }
        };
        match raw.map(UserId::new).transpose() {
            Ok(id) => Ok(id),
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                Ok(None)
            }
        }
    }

    /// Drop the user binding and every other session value.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
