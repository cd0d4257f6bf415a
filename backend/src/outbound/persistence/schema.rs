//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. `username` carries a unique index.
    accounts (id) {
        id -> Uuid,
        username -> Varchar,
        password_hash -> Text,
        /// `user` or `admin`.
        role -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    categories (id) {
        id -> Uuid,
        name -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks owned by an account, optionally grouped under a category.
    tasks (id) {
        id -> Uuid,
        /// Cascades on account removal.
        owner_id -> Uuid,
        title -> Varchar,
        description -> Text,
        /// `low`, `medium` or `high`.
        priority -> Varchar,
        is_completed -> Bool,
        /// Set to null when the category is deleted.
        category_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> accounts (owner_id));
diesel::joinable!(tasks -> categories (category_id));

diesel::allow_tables_to_appear_in_same_query!(accounts, categories, tasks);
