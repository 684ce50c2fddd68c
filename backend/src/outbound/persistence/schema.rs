//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Users mirrored from the authentication subsystem. Read-only here.
    users (id) {
        /// Stable identifier issued by the authentication subsystem.
        id -> Varchar,
        /// Email address, when known.
        email -> Nullable<Varchar>,
        /// Display name, when known.
        name -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Role assignments. The composite key makes duplicates impossible.
    user_roles (user_id, role) {
        /// Assigned user.
        user_id -> Varchar,
        /// Role storage name.
        role -> Varchar,
    }
}

diesel::table! {
    /// Operator-controlled feature switches.
    feature_toggles (id) {
        /// Kebab-case feature identifier.
        id -> Varchar,
        /// Whether the feature is switched on.
        is_enabled -> Bool,
        /// `manual` or `permission`.
        toggle_type -> Varchar,
    }
}

diesel::table! {
    /// Short links. The same alias may appear on several rows over time.
    short_links (id) {
        /// Primary identifier.
        id -> Varchar,
        /// Alias shown in the short URL.
        alias -> Varchar,
        /// Redirect target.
        long_link -> Text,
        /// Creation time; orders variants of one alias.
        created_at -> Timestamptz,
        /// Last instant at which the link is active.
        expire_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Ownership relation. Keyed by link, so each link has one owner.
    user_short_links (short_link_id) {
        /// Owned link.
        short_link_id -> Varchar,
        /// Owning user.
        user_id -> Varchar,
        /// Alias of the link at creation time.
        alias -> Varchar,
        /// Insertion time, used to order the forward index.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(user_short_links -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    feature_toggles,
    short_links,
    user_roles,
    user_short_links,
    users,
);
