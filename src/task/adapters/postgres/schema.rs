//! Diesel schema for task persistence.

diesel::table! {
    /// Task records, one collection per user.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning user identifier.
        #[max_length = 128]
        user_id -> Varchar,
        /// Display title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Optional category label.
        #[max_length = 100]
        category -> Nullable<Varchar>,
        /// Optional due instant.
        due_at -> Nullable<Timestamptz>,
        /// User-controlled completion flag.
        completed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
