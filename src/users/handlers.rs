use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use serde_json::json;
use tera::{Context, Tera};

use crate::config::Settings;
use crate::db::Pool;
use crate::errors::{AppError, AppResult};
use crate::users::forms::RegistrationForm;
use crate::users::models::{Profile, User};
use crate::users::store;

fn render(tera: &Tera, template: &str, context: &Context) -> AppResult<HttpResponse> {
    let rendered = tera.render(template, context)?;
    Ok(HttpResponse::Ok().content_type("text/html").body(rendered))
}

pub async fn index(tera: web::Data<Tera>) -> AppResult<HttpResponse> {
    let mut context = Context::new();
    context.insert("title", "Register");
    render(&tera, "register.html", &context)
}

#[tracing::instrument(skip_all)]
pub async fn register_post(
    pool: web::Data<Pool>,
    settings: web::Data<Settings>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let form = RegistrationForm::from_multipart(payload, settings.max_picture_bytes).await?;
    let has_picture = form.picture.is_some();

    let user = web::block(move || -> AppResult<User> {
        let mut conn = pool.get()?;
        store::register(&mut conn, &form)
    })
    .await??;

    tracing::info!(user_id = user.id, has_picture, "registered user");
    Ok(HttpResponse::Ok().json(json!({
        "message": "User registered successfully",
        "id": user.id,
    })))
}

pub async fn all_users(pool: web::Data<Pool>, tera: web::Data<Tera>) -> AppResult<HttpResponse> {
    let users = web::block(move || -> AppResult<Vec<User>> {
        let mut conn = pool.get()?;
        Ok(store::all_users(&mut conn)?)
    })
    .await??;

    let mut context = Context::new();
    context.insert("title", "All users");
    context.insert("users", &users);
    render(&tera, "users.html", &context)
}

fn lookup(pool: &Pool, user_id: i32) -> AppResult<(User, Option<Profile>)> {
    let mut conn = pool.get()?;
    let user = store::find_user(&mut conn, user_id)?.ok_or(AppError::UserNotFound)?;
    let profile = store::find_profile(&mut conn, &user)?;
    Ok((user, profile))
}

fn detail_context(user: &User, profile: Option<&Profile>) -> Context {
    let mut context = Context::new();
    context.insert("title", &user.name);
    context.insert("id", &user.id);
    context.insert("full_name", &user.name);
    context.insert("email", &user.email);
    context.insert("phone", &user.phone);
    context.insert(
        "profile_picture",
        &profile.map(|_| format!("/users/{}/picture", user.id)),
    );
    context
}

pub async fn user_detail(
    path: web::Path<i32>,
    pool: web::Data<Pool>,
    tera: web::Data<Tera>,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    let (user, profile) = web::block(move || lookup(&pool, user_id)).await??;
    render(&tera, "userdetails.html", &detail_context(&user, profile.as_ref()))
}

pub async fn profile_picture(
    path: web::Path<i32>,
    pool: web::Data<Pool>,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    let (_, profile) = web::block(move || lookup(&pool, user_id)).await??;
    let profile = profile.ok_or(AppError::PictureNotFound)?;

    Ok(HttpResponse::Ok()
        .content_type(profile.content_type)
        .body(profile.profile_picture))
}
