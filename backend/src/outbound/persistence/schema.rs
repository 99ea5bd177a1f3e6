//! Diesel table definitions.
//!
//! Keep these in step with `backend/migrations`; `diesel print-schema`
//! against a migrated database regenerates them.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        email -> Varchar,
        /// PHC-encoded Argon2id hash.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Members directory; `id` is a serial.
    members (id) {
        id -> Int4,
        name -> Varchar,
        email -> Varchar,
    }
}

diesel::table! {
    employees (id) {
        id -> Uuid,
        name -> Text,
        gf -> Bool,
        address -> Text,
        salary -> Int8,
    }
}

diesel::table! {
    intents (id) {
        id -> Uuid,
        name -> Varchar,
        description -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, members, employees, intents);
