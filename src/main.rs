use std::io;

use actix_files as files;
use actix_web::{web, App, HttpServer};
use tera::Tera;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

//modules
mod config;
mod db;
mod errors;
mod users;
#[cfg(test)]
mod test_util;

fn startup_error<E>(context: &'static str) -> impl FnOnce(E) -> io::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    move |err| {
        tracing::error!(error = %err, "{context}");
        io::Error::new(io::ErrorKind::Other, err)
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = Settings::from_env().map_err(startup_error("invalid configuration"))?;

    let pool = db::init_pool(&settings.database_url, settings.pool_size)
        .map_err(startup_error("failed to create connection pool"))?;
    {
        let mut conn = pool.get().map_err(startup_error("failed to connect to database"))?;
        db::create_tables(&mut conn).map_err(startup_error("failed to create tables"))?;
    }

    let tera = Tera::new(&settings.templates_glob())
        .map_err(startup_error("failed to load templates"))?;

    let bind = (settings.host.clone(), settings.port);
    let static_dir = settings.static_dir.clone();
    let pool = web::Data::new(pool);
    let tera = web::Data::new(tera);
    let settings = web::Data::new(settings);

    tracing::info!(host = %bind.0, port = bind.1, "starting server");
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(pool.clone())
            .app_data(tera.clone())
            .app_data(settings.clone())
            .configure(users::routes::config)
            .service(files::Files::new("/static", static_dir.clone()))
    })
    .bind(bind)?
    .run()
    .await
}
