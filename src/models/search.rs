use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Issue;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub issues: Vec<Issue>,
}

/// Error payload returned by the tracker on non-2xx responses.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ErrorBody {
    #[serde(rename = "errorMessages", default)]
    pub error_messages: Vec<String>,
    #[serde(default)]
    pub errors: HashMap<String, String>,
}
