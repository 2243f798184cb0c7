use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::errors::{AppError, AppResult};
use crate::users::forms::RegistrationForm;
use crate::users::models::{NewProfile, NewUser, Profile, User};
use crate::users::schema::{profile, users};

// Declared by `db::create_tables`.
const EMAIL_CONSTRAINT: &str = "users_email_key";
const PHONE_CONSTRAINT: &str = "users_phone_key";

/// Inserts the user and, when a picture was uploaded, its profile in a single
/// transaction. Duplicate emails and phones are detected by the unique
/// constraints on `users`.
pub fn register(conn: &mut PgConnection, form: &RegistrationForm) -> AppResult<User> {
    conn.transaction::<_, AppError, _>(|conn| {
        let user = diesel::insert_into(users::table)
            .values(&NewUser {
                name: &form.name,
                email: &form.email,
                password: &form.password,
                phone: &form.phone,
            })
            .returning(User::as_returning())
            .get_result(conn)
            .map_err(classify)?;

        if let Some(picture) = &form.picture {
            diesel::insert_into(profile::table)
                .values(&NewProfile {
                    user_id: user.id,
                    profile_picture: &picture.bytes,
                    content_type: &picture.content_type,
                })
                .execute(conn)?;
        }

        Ok(user)
    })
}

fn classify(err: DieselError) -> AppError {
    let constraint = match &err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            info.constraint_name().map(str::to_owned)
        }
        _ => None,
    };

    match constraint.as_deref() {
        Some(EMAIL_CONSTRAINT) => AppError::DuplicateEmail,
        Some(PHONE_CONSTRAINT) => AppError::DuplicatePhone,
        _ => AppError::Database(err),
    }
}

pub fn all_users(conn: &mut PgConnection) -> QueryResult<Vec<User>> {
    users::table
        .order(users::id.asc())
        .select(User::as_select())
        .load(conn)
}

pub fn find_user(conn: &mut PgConnection, user_id: i32) -> QueryResult<Option<User>> {
    users::table
        .find(user_id)
        .select(User::as_select())
        .first(conn)
        .optional()
}

pub fn find_profile(conn: &mut PgConnection, user: &User) -> QueryResult<Option<Profile>> {
    Profile::belonging_to(user)
        .order(profile::id.asc())
        .select(Profile::as_select())
        .first(conn)
        .optional()
}
