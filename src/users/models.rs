use diesel::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = crate::users::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub phone: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::users::schema::users)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub phone: &'a str,
}

#[derive(Debug, Queryable, Selectable, Identifiable, Associations)]
#[diesel(belongs_to(User))]
#[diesel(table_name = crate::users::schema::profile)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Profile {
    pub id: i32,
    pub user_id: i32,
    pub profile_picture: Vec<u8>,
    pub content_type: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::users::schema::profile)]
pub struct NewProfile<'a> {
    pub user_id: i32,
    pub profile_picture: &'a [u8],
    pub content_type: &'a str,
}
