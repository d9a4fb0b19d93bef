use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SupabaseSecrets {
    #[serde(rename = "storageUrl")]
    pub storage_url: String,
    #[serde(rename = "apiKey")]
    pub api_key: String,
    #[serde(rename = "bucketName")]
    pub bucket_name: String,
}
