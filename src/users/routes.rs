use actix_web::web;
use crate::users::handlers;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(web::resource("/").route(web::get().to(handlers::index)))
        .service(web::resource("/register").route(web::post().to(handlers::register_post)))
        .service(web::resource("/allusers").route(web::get().to(handlers::all_users)))
        .service(web::resource("/users/{user_id}").route(web::get().to(handlers::user_detail)))
        .service(
            web::resource("/users/{user_id}/picture")
                .route(web::get().to(handlers::profile_picture)),
        );
}
