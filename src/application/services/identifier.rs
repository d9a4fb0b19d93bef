use uuid::Uuid;

/// Random 128-bit identifier rendered as 32 lowercase hex characters.
pub fn new_identifier() -> String {
    Uuid::new_v4().simple().to_string()
}
