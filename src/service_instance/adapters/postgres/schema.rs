//! Diesel schema for service-instance persistence.

diesel::table! {
    /// User-provided service instances.
    service_instances (guid) {
        /// Instance identifier.
        guid -> Uuid,
        /// Instance name, unique per space via
        /// `idx_service_instances_space_name_unique`.
        #[max_length = 255]
        name -> Varchar,
        /// Owning space GUID.
        #[max_length = 255]
        space_guid -> Varchar,
        /// Credentials object.
        credentials -> Jsonb,
        /// Syslog drain URL.
        syslog_drain_url -> Nullable<Text>,
        /// Route service URL.
        route_service_url -> Nullable<Text>,
        /// Tags as a JSON array.
        tags -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Labels attached to service instances.
    service_instance_labels (id) {
        /// Row identifier.
        id -> Uuid,
        /// Owning instance.
        resource_guid -> Uuid,
        /// Optional DNS prefix.
        #[max_length = 253]
        key_prefix -> Nullable<Varchar>,
        /// Key name.
        #[max_length = 63]
        key_name -> Varchar,
        /// Label value.
        #[max_length = 63]
        value -> Varchar,
    }
}

diesel::table! {
    /// Annotations attached to service instances.
    service_instance_annotations (id) {
        /// Row identifier.
        id -> Uuid,
        /// Owning instance.
        resource_guid -> Uuid,
        /// Optional DNS prefix.
        #[max_length = 253]
        key_prefix -> Nullable<Varchar>,
        /// Key name.
        #[max_length = 63]
        key_name -> Varchar,
        /// Annotation value.
        #[max_length = 5000]
        value -> Varchar,
    }
}

diesel::joinable!(service_instance_labels -> service_instances (resource_guid));
diesel::joinable!(service_instance_annotations -> service_instances (resource_guid));

diesel::allow_tables_to_appear_in_same_query!(
    service_instances,
    service_instance_labels,
    service_instance_annotations,
);
