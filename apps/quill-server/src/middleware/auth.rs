//! Session extractors - resolve the logged-in user from the session cookie.

use actix_web::{
    FromRequest, HttpRequest,
    cookie::{Cookie, SameSite, time::Duration},
    dev::Payload,
    web,
};
use futures::future::LocalBoxFuture;

use quill_core::domain::User;
use quill_core::ports::SessionToken;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "quill_session";

/// Build the session cookie for a freshly issued token.
///
/// Only remembered sessions carry a `Max-Age`; other sessions end with the browser.
pub fn session_cookie(token: &SessionToken, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, token.value.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .finish();

    if let Some(seconds) = token.max_age {
        cookie.set_max_age(Duration::seconds(seconds));
    }
    cookie
}

/// Cookie that expires the session on the client.
pub fn session_removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// The current user, if the request carries a valid session.
///
/// Invalid, expired or orphaned tokens resolve to `None`.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

impl FromRequest for MaybeUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_owned());
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let (Some(token), Some(state)) = (token, state) else {
                return Ok(MaybeUser(None));
            };

            let claims = match state.sessions.validate_session(&token) {
                Ok(claims) => claims,
                Err(e) => {
                    tracing::debug!("Ignoring session cookie: {}", e);
                    return Ok(MaybeUser(None));
                }
            };

            let user = state.users.find_by_id(claims.user_id).await?;
            if user.is_none() {
                tracing::debug!(user_id = %claims.user_id, "Session refers to a missing user");
            }

            Ok(MaybeUser(user))
        })
    }
}

/// The logged-in user. Handlers taking this redirect anonymous visitors to the login page.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let maybe_user = MaybeUser::from_request(req, payload);

        Box::pin(async move {
            match maybe_user.await? {
                MaybeUser(Some(user)) => Ok(CurrentUser(user)),
                MaybeUser(None) => Err(AppError::LoginRequired),
            }
        })
    }
}
