diesel::table! {
    users (id) {
        id -> Int4,
        name -> Varchar,
        email -> Varchar,
        password -> Varchar, // stored as given
        phone -> Varchar,
    }
}

diesel::table! {
    profile (id) {
        id -> Int4,
        user_id -> Int4,
        profile_picture -> Bytea,
        content_type -> Varchar,
    }
}

diesel::joinable!(profile -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(profile, users);
