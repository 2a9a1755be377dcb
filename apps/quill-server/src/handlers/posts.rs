//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::DomainError;
use quill_core::domain::{Post, PostWithAuthor, User};
use quill_core::forms::{FormErrors, PostForm};

use crate::middleware::auth::{CurrentUser, MaybeUser};
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::flash::{FlashMessage, IncomingFlash};
use crate::state::AppState;
use crate::views::{self, PageContext, PostFormPage, PostPage};

const NEW_POST_LEGEND: &str = "Create a new post";
const UPDATE_POST_LEGEND: &str = "Update post";

/// Ids that are not UUIDs cannot name a post.
fn parse_post_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("post {}", raw)))
}

async fn find_post(state: &AppState, raw_id: &str) -> AppResult<PostWithAuthor> {
    let id = parse_post_id(raw_id)?;

    state
        .posts
        .find_with_author(id)
        .await?
        .ok_or_else(|| DomainError::PostNotFound(id).into())
}

/// Load a post the current user may change.
async fn find_own_post(state: &AppState, raw_id: &str, user: &User) -> AppResult<PostWithAuthor> {
    let item = find_post(state, raw_id).await?;

    if !item.post.is_authored_by(user.id) {
        return Err(DomainError::NotAuthor {
            user_id: user.id,
            post_id: item.post.id,
        }
        .into());
    }

    Ok(item)
}

/// GET /post/new
pub async fn new_post_form(
    CurrentUser(user): CurrentUser,
    flash: IncomingFlash,
) -> AppResult<HttpResponse> {
    views::render(&PostFormPage {
        page: PageContext::new("New Post", Some(user), flash),
        legend: NEW_POST_LEGEND,
        form: PostForm::default(),
        errors: FormErrors::new(),
    })
}

/// POST /post/new
pub async fn create_post(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    flash: IncomingFlash,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let errors = form.validate();

    if !errors.is_empty() {
        return views::render(&PostFormPage {
            page: PageContext::new("New Post", Some(user), flash),
            legend: NEW_POST_LEGEND,
            form,
            errors,
        });
    }

    let post = state
        .posts
        .insert(Post::new(user.id, form.title, form.content))
        .await?;

    tracing::info!(post_id = %post.id, user_id = %user.id, "Post created");

    Ok(views::redirect_with_flash(
        "/home",
        FlashMessage::success("Great! Your post has been created"),
    ))
}

/// GET /post/{id}
pub async fn show_post(
    state: web::Data<AppState>,
    MaybeUser(user): MaybeUser,
    flash: IncomingFlash,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let item = find_post(&state, &path).await?;
    let is_author = user
        .as_ref()
        .is_some_and(|u| item.post.is_authored_by(u.id));

    views::render(&PostPage {
        page: PageContext::new(item.post.title.clone(), user, flash),
        item,
        is_author,
    })
}

/// GET /post/{id}/update
pub async fn update_post_form(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    flash: IncomingFlash,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let item = find_own_post(&state, &path, &user).await?;

    views::render(&PostFormPage {
        page: PageContext::new("Update Post", Some(user), flash),
        legend: UPDATE_POST_LEGEND,
        form: PostForm::from_post(&item.post),
        errors: FormErrors::new(),
    })
}

/// POST /post/{id}/update
pub async fn update_post(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    flash: IncomingFlash,
    path: web::Path<String>,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let item = find_own_post(&state, &path, &user).await?;
    let form = form.into_inner();
    let errors = form.validate();

    if !errors.is_empty() {
        return views::render(&PostFormPage {
            page: PageContext::new("Update Post", Some(user), flash),
            legend: UPDATE_POST_LEGEND,
            form,
            errors,
        });
    }

    let post = state
        .posts
        .update_content(item.post.id, &form.title, &form.content)
        .await?;

    tracing::info!(post_id = %post.id, "Post updated");

    Ok(views::redirect_with_flash(
        &format!("/post/{}", post.id),
        FlashMessage::success("Your post has been updated!"),
    ))
}

/// GET or POST /post/{id}/delete
pub async fn delete_post(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let item = find_own_post(&state, &path, &user).await?;

    state.posts.delete(item.post.id).await?;

    tracing::info!(post_id = %item.post.id, user_id = %user.id, "Post deleted");

    Ok(views::redirect_with_flash(
        "/home",
        FlashMessage::info("Your post was deleted successfully"),
    ))
}
