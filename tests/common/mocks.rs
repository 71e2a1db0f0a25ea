use async_trait::async_trait;
use sightline::{
    Error, Result,
    llm::{GenerateRequest, ModelClient},
};
use std::sync::{Arc, Mutex};

/// Mock model client for testing
#[derive(Debug, Clone)]
pub struct MockModelClient {
    pub reply: String,
    pub requests: Arc<Mutex<Vec<GenerateRequest>>>,
    pub error: Option<String>,
}

impl MockModelClient {
    pub fn new() -> Self {
        Self {
            reply: "Mock reply".to_string(),
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = reply.into();
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn get_requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request);

        if let Some(ref error) = self.error {
            return Err(Error::llm(error.clone()));
        }

        Ok(self.reply.clone())
    }
}

impl Default for MockModelClient {
    fn default() -> Self {
        Self::new()
    }
}
