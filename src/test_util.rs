//! Fixtures shared by the handler, form and store tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use actix_web::http::header;
use actix_web::test::TestRequest;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use tera::Tera;

use crate::db::{self, Pool};

const BOUNDARY: &str = "registry-test-boundary";

/// A file part for [`multipart_request`].
pub struct Upload<'a> {
    filename: &'a str,
    content_type: &'a str,
    bytes: &'a [u8],
}

impl<'a> Upload<'a> {
    pub fn new(filename: &'a str, content_type: &'a str, bytes: &'a [u8]) -> Self {
        Upload {
            filename,
            content_type,
            bytes,
        }
    }
}

pub fn multipart_request(
    uri: &str,
    fields: &[(&str, &str)],
    upload: Option<Upload<'_>>,
) -> TestRequest {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(upload) = upload {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; \
                 name=\"profile\"; filename=\"{}\"\r\n",
                upload.filename
            )
            .as_bytes(),
        );
        // an empty content type leaves the header out
        if !upload.content_type.is_empty() {
            body.extend_from_slice(format!("Content-Type: {}\r\n", upload.content_type).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(upload.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    TestRequest::post()
        .uri(uri)
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
}

pub fn tera() -> Tera {
    Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*")).unwrap()
}

/// Email/phone values no other test (or earlier run) uses.
pub fn unique(tag: &str) -> String {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!(
        "{tag}-{}-{}-{nanos}",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    )
}

/// A pool that never touches the database until a connection is requested.
pub fn lazy_pool() -> Pool {
    let manager = ConnectionManager::<PgConnection>::new("postgres://127.0.0.1:1/unreachable");
    r2d2::Pool::builder()
        .max_size(1)
        .min_idle(Some(0))
        .build_unchecked(manager)
}

#[derive(Debug)]
struct RollbackOnRelease;

impl CustomizeConnection<PgConnection, r2d2::Error> for RollbackOnRelease {
    fn on_acquire(&self, conn: &mut PgConnection) -> Result<(), r2d2::Error> {
        conn.begin_test_transaction().map_err(r2d2::Error::QueryError)
    }
}

pub fn database_url() -> String {
    std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set")
}

/// Single-connection pool against `TEST_DATABASE_URL` whose connection sits
/// in a transaction that is never committed.
pub fn database_pool() -> Pool {
    let manager = ConnectionManager::<PgConnection>::new(database_url());
    let pool = r2d2::Pool::builder()
        .max_size(1)
        .connection_customizer(Box::new(RollbackOnRelease))
        .build(manager)
        .unwrap();
    db::create_tables(&mut pool.get().unwrap()).unwrap();
    pool
}
