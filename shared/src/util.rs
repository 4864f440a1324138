/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a record key (simple-form UUID v4, 32 hex chars)
pub fn new_key() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
