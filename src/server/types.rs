use serde::{Deserialize, Serialize};

pub const ANALYZE_ERROR_MESSAGE: &str = "Error during analysis.";
pub const ASK_ERROR_MESSAGE: &str = "Unable to answer right now.";

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub image: String,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub query: String,
}

/// Body of every `/analyze` and `/ask` reply, successful or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistResponse {
    pub response: String,
}

impl AssistResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}
