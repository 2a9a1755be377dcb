//! HTTP handlers and route configuration.

mod pages;
mod posts;
mod users;

#[cfg(test)]
mod tests;

use std::path::Path;

use actix_files::Files;
use actix_web::{HttpRequest, error::UrlencodedError, web};

pub use pages::not_found;

/// Largest accepted form body. Post content is otherwise unbounded.
pub const FORM_LIMIT_BYTES: usize = 1024 * 1024;

fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .limit(FORM_LIMIT_BYTES)
        .error_handler(|err: UrlencodedError, req: &HttpRequest| {
            match &err {
                UrlencodedError::Overflow { size, limit } => {
                    tracing::warn!(path = %req.path(), size, limit, "Form body too large");
                }
                other => tracing::debug!(path = %req.path(), "Rejected form body: {}", other),
            }
            err.into()
        })
}

/// `/static` file service over `dir`.
pub fn static_files(dir: &Path) -> Files {
    Files::new("/static", dir)
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(form_config())
        .route("/", web::get().to(pages::home))
        .route("/home", web::get().to(pages::home))
        .route("/about", web::get().to(pages::about))
        // Accounts
        .service(
            web::resource("/register")
                .route(web::get().to(users::register_form))
                .route(web::post().to(users::register)),
        )
        .service(
            web::resource("/login")
                .route(web::get().to(users::login_form))
                .route(web::post().to(users::login)),
        )
        .route("/logout", web::get().to(users::logout))
        .service(
            web::resource("/account")
                .route(web::get().to(users::account))
                .route(web::post().to(users::update_account)),
        )
        // Posts; "/post/new" must be registered before "/post/{id}"
        .service(
            web::resource("/post/new")
                .route(web::get().to(posts::new_post_form))
                .route(web::post().to(posts::create_post)),
        )
        .route("/post/{id}", web::get().to(posts::show_post))
        .service(
            web::resource("/post/{id}/update")
                .route(web::get().to(posts::update_post_form))
                .route(web::post().to(posts::update_post)),
        )
        .service(
            web::resource("/post/{id}/delete")
                .route(web::get().to(posts::delete_post))
                .route(web::post().to(posts::delete_post)),
        );
}
