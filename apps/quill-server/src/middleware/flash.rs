//! One-shot flash messages carried across a redirect in a cookie.

use actix_web::{
    Error, FromRequest, HttpRequest,
    cookie::{Cookie, SameSite, time::Duration},
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use serde::{Deserialize, Serialize};
use std::future::{Future, Ready, ready};
use std::pin::Pin;

/// Name of the cookie holding pending messages.
pub const FLASH_COOKIE: &str = "quill.flash";

const FLASH_MAX_AGE_SECS: i64 = 60;

/// Severity of a flash message. Maps onto the alert styles of the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Info,
    Success,
    Warning,
    Danger,
}

impl FlashLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            FlashLevel::Info => "alert-info",
            FlashLevel::Success => "alert-success",
            FlashLevel::Warning => "alert-warning",
            FlashLevel::Danger => "alert-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub text: String,
}

impl FlashMessage {
    pub fn new(level: FlashLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(FlashLevel::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(FlashLevel::Success, text)
    }

    pub fn danger(text: impl Into<String>) -> Self {
        Self::new(FlashLevel::Danger, text)
    }
}

/// Cookie carrying `messages` to the next request.
pub fn flash_cookie(messages: &[FlashMessage]) -> Cookie<'static> {
    let value = serde_json::to_string(messages).unwrap_or_default();

    Cookie::build(FLASH_COOKIE, value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(FLASH_MAX_AGE_SECS))
        .finish()
}

/// Messages that arrived with the request.
///
/// A missing or unreadable cookie yields no messages.
#[derive(Debug, Clone, Default)]
pub struct IncomingFlash(pub Vec<FlashMessage>);

impl IncomingFlash {
    fn from_cookie(cookie: Option<Cookie<'static>>) -> Self {
        let messages = cookie
            .and_then(|c| serde_json::from_str(c.value()).ok())
            .unwrap_or_default();
        Self(messages)
    }
}

impl FromRequest for IncomingFlash {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_cookie(req.cookie(FLASH_COOKIE))))
    }
}

/// Middleware that expires the flash cookie once its messages were served.
///
/// Responses that set a fresh flash cookie keep it.
pub struct FlashMiddleware;

impl<S, B> Transform<S, ServiceRequest> for FlashMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = FlashService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(FlashService { service }))
    }
}

pub struct FlashService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for FlashService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let had_flash = req.cookie(FLASH_COOKIE).is_some();
        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;

            let replaced = res
                .response()
                .cookies()
                .any(|cookie| cookie.name() == FLASH_COOKIE);

            if had_flash && !replaced {
                let removal = Cookie::build(FLASH_COOKIE, "").path("/").finish();
                if let Err(e) = res.response_mut().add_removal_cookie(&removal) {
                    tracing::warn!("Failed to clear flash cookie: {}", e);
                }
            }

            Ok(res)
        })
    }
}
