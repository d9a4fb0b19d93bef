use serde::{Deserialize, Serialize};

/// One field-level constraint violation, already rendered in the request locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationItem {
    pub field: String,
    pub message: String,
    pub value: String,
}
