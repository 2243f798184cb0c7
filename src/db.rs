use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{self, ConnectionManager, PoolError};
use diesel::QueryResult;

pub type Pool = r2d2::Pool<ConnectionManager<PgConnection>>;

pub fn init_pool(database_url: &str, max_size: u32) -> Result<Pool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    r2d2::Pool::builder().max_size(max_size).build(manager)
}

// Constraint names are matched in `users::store` to tell the duplicates apart.
const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    name VARCHAR NOT NULL,
    email VARCHAR NOT NULL,
    password VARCHAR NOT NULL,
    phone VARCHAR NOT NULL,
    CONSTRAINT users_email_key UNIQUE (email),
    CONSTRAINT users_phone_key UNIQUE (phone)
);

CREATE TABLE IF NOT EXISTS profile (
    id SERIAL PRIMARY KEY,
    user_id INTEGER NOT NULL REFERENCES users (id),
    profile_picture BYTEA NOT NULL,
    content_type VARCHAR NOT NULL DEFAULT 'application/octet-stream'
);

CREATE INDEX IF NOT EXISTS profile_user_id_idx ON profile (user_id);
"#;

/// Creates the `users` and `profile` tables if they are absent. Existing
/// tables are left untouched.
pub fn create_tables(conn: &mut PgConnection) -> QueryResult<()> {
    conn.batch_execute(CREATE_TABLES)
}
