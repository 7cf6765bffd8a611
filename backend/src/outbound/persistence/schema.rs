//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when the migration changes.

diesel::table! {
    /// User records owned by the CRUD service.
    ///
    /// `id` is an opaque text key; the service writes UUID v4 strings.
    users (id) {
        id -> Text,
        name -> Text,
        email -> Text,
    }
}
