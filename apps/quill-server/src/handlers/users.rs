//! Registration, login and account handlers.

use actix_web::{HttpResponse, http::header, web};

use quill_core::domain::User;
use quill_core::forms::{AccountForm, FormErrors, LoginForm, RegistrationForm};

use crate::middleware::auth::{CurrentUser, MaybeUser, session_cookie, session_removal_cookie};
use crate::middleware::error::AppResult;
use crate::middleware::flash::{FlashMessage, IncomingFlash};
use crate::state::AppState;
use crate::views::{self, AccountPage, LoginPage, PageContext, RegisterPage};

pub const LOGIN_FAILED: &str = "Login Unsuccessful. Please check email and password";

/// GET /register
pub async fn register_form(
    MaybeUser(user): MaybeUser,
    flash: IncomingFlash,
) -> AppResult<HttpResponse> {
    if user.is_some() {
        return Ok(views::redirect("/home"));
    }

    views::render(&RegisterPage {
        page: PageContext::new("Register", None, flash),
        form: RegistrationForm::default(),
        errors: FormErrors::new(),
    })
}

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    MaybeUser(user): MaybeUser,
    flash: IncomingFlash,
    form: web::Form<RegistrationForm>,
) -> AppResult<HttpResponse> {
    if user.is_some() {
        return Ok(views::redirect("/home"));
    }

    let form = form.into_inner();
    let errors = form.validate(state.users.as_ref()).await?;

    if !errors.is_empty() {
        return views::render(&RegisterPage {
            page: PageContext::new("Register", None, flash),
            form: RegistrationForm {
                password: String::new(),
                confirm_password: String::new(),
                ..form
            },
            errors,
        });
    }

    let password_hash = state.passwords.hash(&form.password)?;
    let user = state
        .users
        .insert(User::new(form.username, form.email, password_hash))
        .await?;

    tracing::info!(user_id = %user.id, "Registered new user");

    Ok(views::redirect_with_flash(
        "/login",
        FlashMessage::success("Account created successfully. Login now"),
    ))
}

/// GET /login
pub async fn login_form(
    MaybeUser(user): MaybeUser,
    flash: IncomingFlash,
) -> AppResult<HttpResponse> {
    if user.is_some() {
        return Ok(views::redirect("/home"));
    }

    views::render(&LoginPage {
        page: PageContext::new("Login", None, flash),
        form: LoginForm::default(),
        errors: FormErrors::new(),
    })
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    MaybeUser(user): MaybeUser,
    flash: IncomingFlash,
    form: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    if user.is_some() {
        return Ok(views::redirect("/home"));
    }

    let form = form.into_inner();
    let errors = form.validate();
    let page = PageContext::new("Login", None, flash);

    if !errors.is_empty() {
        return views::render(&LoginPage {
            page,
            form: LoginForm {
                password: String::new(),
                ..form
            },
            errors,
        });
    }

    // Unknown email and wrong password get the same answer.
    let user = match state.users.find_by_email(&form.email).await? {
        Some(user) if state.passwords.verify(&form.password, &user.password_hash)? => user,
        _ => {
            tracing::debug!("Login rejected");
            return views::render(&LoginPage {
                page: page.with_message(FlashMessage::danger(LOGIN_FAILED)),
                form: LoginForm {
                    password: String::new(),
                    ..form
                },
                errors,
            });
        }
    };

    let token = state.sessions.issue_session(user.id, form.remember_me())?;
    tracing::info!(user_id = %user.id, remember = form.remember_me(), "User logged in");

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, "/home"))
        .cookie(session_cookie(&token, state.secure_cookies))
        .finish())
}

/// GET /logout
pub async fn logout() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/home"))
        .cookie(session_removal_cookie())
        .finish()
}

/// GET /account
pub async fn account(
    CurrentUser(user): CurrentUser,
    flash: IncomingFlash,
) -> AppResult<HttpResponse> {
    views::render(&AccountPage {
        form: AccountForm::from_user(&user),
        page: PageContext::new("Account", Some(user.clone()), flash),
        user,
        errors: FormErrors::new(),
    })
}

/// POST /account
pub async fn update_account(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    flash: IncomingFlash,
    form: web::Form<AccountForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let errors = form.validate(&user, state.users.as_ref()).await?;

    if !errors.is_empty() {
        return views::render(&AccountPage {
            page: PageContext::new("Account", Some(user.clone()), flash),
            user,
            form,
            errors,
        });
    }

    let updated = state
        .users
        .update_profile(user.id, &form.username, &form.email)
        .await?;

    tracing::info!(user_id = %updated.id, "Account updated");

    Ok(views::redirect_with_flash(
        "/account",
        FlashMessage::success("Your account has been updated successfully"),
    ))
}
