//! Page models and HTML rendering.

use actix_web::{HttpResponse, http::header};
use askama::Template;

use quill_core::domain::{PostWithAuthor, User};
use quill_core::forms::{AccountForm, FormErrors, LoginForm, PostForm, RegistrationForm};

use crate::middleware::error::AppResult;
use crate::middleware::flash::{FlashMessage, IncomingFlash, flash_cookie};

/// Data every page needs: its title, the navigation state and pending messages.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub title: String,
    pub current_user: Option<User>,
    pub messages: Vec<FlashMessage>,
}

impl PageContext {
    pub fn new(title: impl Into<String>, current_user: Option<User>, flash: IncomingFlash) -> Self {
        Self {
            title: title.into(),
            current_user,
            messages: flash.0,
        }
    }

    /// Context for pages rendered outside a handler, such as error pages.
    pub fn anonymous(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Show a message raised while handling the current request.
    pub fn with_message(mut self, message: FlashMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub page: PageContext,
    pub posts: Vec<PostWithAuthor>,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutPage {
    pub page: PageContext,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub page: PageContext,
    pub form: RegistrationForm,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub page: PageContext,
    pub form: LoginForm,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "account.html")]
pub struct AccountPage {
    pub page: PageContext,
    pub user: User,
    pub form: AccountForm,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "create_post.html")]
pub struct PostFormPage {
    pub page: PageContext,
    pub legend: &'static str,
    pub form: PostForm,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostPage {
    pub page: PageContext,
    pub item: PostWithAuthor,
    /// Show the update and delete controls.
    pub is_author: bool,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub page: PageContext,
    pub heading: String,
    pub detail: String,
}

pub fn render_html<T: Template>(template: &T) -> askama::Result<String> {
    template.render()
}

/// Render a page as a `200 OK` HTML response.
pub fn render<T: Template>(template: &T) -> AppResult<HttpResponse> {
    let body = render_html(template)?;
    Ok(HttpResponse::Ok()
        .content_type(header::ContentType::html())
        .body(body))
}

/// `302 Found` to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// `302 Found` to `location`, showing `message` on the next page.
pub fn redirect_with_flash(location: &str, message: FlashMessage) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .cookie(flash_cookie(&[message]))
        .finish()
}
