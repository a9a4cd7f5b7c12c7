//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match the migrations exactly; regenerate with
//! `diesel print-schema` when migrations change.

diesel::table! {
    /// Registered societies with their top-level profile fields.
    /// Embedded id-less lists (social links, eligibility) live as JSONB.
    societies (id) {
        id -> Uuid,
        name -> Text,
        username -> Text,
        email -> Text,
        password_hash -> Text,
        about -> Text,
        website -> Text,
        logo -> Text,
        society_type -> Text,
        faculty_coordinator -> Text,
        audition_open -> Bool,
        centralized -> Bool,
        social -> Jsonb,
        eligibility -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Roster entries, one row per member, cascading with their society.
    team_members (id) {
        id -> Uuid,
        society_id -> Uuid,
        name -> Text,
        designation -> Text,
        mobile -> Text,
        email -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Published events; the contact list is embedded as JSONB.
    events (id) {
        id -> Uuid,
        society_id -> Uuid,
        title -> Text,
        event_type -> Text,
        start_date -> Nullable<Text>,
        end_date -> Nullable<Text>,
        venue -> Text,
        time -> Text,
        about -> Text,
        contact -> Jsonb,
        social_group -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Student accounts; wishlist and reminders live as JSONB reference
    /// lists.
    users (id) {
        id -> Uuid,
        name -> Text,
        username -> Text,
        email -> Text,
        branch -> Text,
        section -> Text,
        batch_start -> Nullable<Int4>,
        batch_end -> Nullable<Int4>,
        wishlist -> Jsonb,
        reminders -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(team_members -> societies (society_id));
diesel::joinable!(events -> societies (society_id));

diesel::allow_tables_to_appear_in_same_query!(societies, team_members, events, users);
