//! Public pages.

use actix_web::{HttpRequest, HttpResponse, web};

use crate::middleware::auth::MaybeUser;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::flash::IncomingFlash;
use crate::state::AppState;
use crate::views::{self, AboutPage, HomePage, PageContext};

/// GET / and GET /home
pub async fn home(
    state: web::Data<AppState>,
    MaybeUser(user): MaybeUser,
    flash: IncomingFlash,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list_with_authors().await?;

    views::render(&HomePage {
        page: PageContext::new("Home", user, flash),
        posts,
    })
}

/// GET /about
pub async fn about(MaybeUser(user): MaybeUser, flash: IncomingFlash) -> AppResult<HttpResponse> {
    views::render(&AboutPage {
        page: PageContext::new("About", user, flash),
    })
}

/// Fallback for unknown paths.
pub async fn not_found(req: HttpRequest) -> AppResult<HttpResponse> {
    Err(AppError::NotFound(format!("no route for {}", req.path())))
}
