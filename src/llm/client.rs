use super::types::*;
use crate::{Error, Result, config::LlmConfig};
use async_openai::{Client, config::OpenAIConfig, types as openai_types};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use std::time::Duration;
use tracing::debug;

/// Gemini's OpenAI-compatible surface, used when no base URL is configured.
pub const GEMINI_OPENAI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Submits one prompt (and optional image) and returns the raw reply text.
    async fn generate(&self, request: GenerateRequest) -> Result<String>;
}

pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
    has_api_key: bool,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let has_api_key = !config.api_key.trim().is_empty();

        let api_base = if config.base_url.is_empty() {
            GEMINI_OPENAI_BASE.to_string()
        } else {
            config.base_url.trim_end_matches('/').to_string()
        };

        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key)
            .with_api_base(api_base);

        let mut http = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            http = http.timeout(Duration::from_secs(secs));
        }

        // A zero elapsed-time budget makes the first failed attempt final.
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        let client = Client::with_config(openai_config)
            .with_http_client(http.build()?)
            .with_backoff(no_retry);

        Ok(Self {
            client,
            model: config.model,
            has_api_key,
        })
    }

    fn user_message(request: GenerateRequest) -> Result<openai_types::ChatCompletionRequestMessage> {
        let content = match request.image {
            None => openai_types::ChatCompletionRequestUserMessageContent::Text(request.prompt),
            Some(image) => openai_types::ChatCompletionRequestUserMessageContent::Array(vec![
                openai_types::ChatCompletionRequestUserMessageContentPart::Text(
                    openai_types::ChatCompletionRequestMessageContentPartText {
                        text: request.prompt,
                    },
                ),
                openai_types::ChatCompletionRequestUserMessageContentPart::ImageUrl(
                    openai_types::ChatCompletionRequestMessageContentPartImage {
                        image_url: openai_types::ImageUrl {
                            url: image.to_data_url(),
                            detail: None,
                        },
                    },
                ),
            ]),
        };

        let message = openai_types::ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?;

        Ok(message.into())
    }
}

#[async_trait]
impl ModelClient for OpenAiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        if !self.has_api_key {
            return Err(Error::config("GEMINI_API_KEY is not set"));
        }

        debug!(
            model = %self.model,
            prompt_len = request.prompt.len(),
            has_image = request.image.is_some(),
            "Creating chat completion"
        );

        let openai_request = openai_types::CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![Self::user_message(request)?])
            .build()?;

        let response = self.client.chat().create(openai_request).await?;

        debug!(
            "Received chat completion response with {} choices",
            response.choices.len()
        );

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::llm("Chat completion contained no text"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_openai::types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageContent,
        ChatCompletionRequestUserMessageContentPart,
    };
    use pretty_assertions::assert_eq;

    fn create_test_config() -> LlmConfig {
        LlmConfig {
            provider: "openai".to_string(),
            base_url: String::new(),
            api_key: "test-api-key".to_string(),
            model: "gemini-1.5-flash".to_string(),
            timeout_secs: Some(30),
        }
    }

    #[test]
    fn test_openai_client_creation() {
        let client = OpenAiClient::new(create_test_config()).unwrap();

        assert_eq!(client.model, "gemini-1.5-flash");
        assert!(client.has_api_key);
    }

    #[test]
    fn test_text_request_becomes_plain_user_message() {
        let message = OpenAiClient::user_message(GenerateRequest::text("hello")).unwrap();

        match message {
            ChatCompletionRequestMessage::User(user) => match user.content {
                ChatCompletionRequestUserMessageContent::Text(text) => assert_eq!(text, "hello"),
                other => panic!("unexpected content: {:?}", other),
            },
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_image_request_carries_data_url_part() {
        let image = ImagePayload::new("image/png", b"png".to_vec());
        let message =
            OpenAiClient::user_message(GenerateRequest::with_image("describe", image)).unwrap();

        let ChatCompletionRequestMessage::User(user) = message else {
            panic!("expected a user message");
        };
        let ChatCompletionRequestUserMessageContent::Array(parts) = user.content else {
            panic!("expected multi-part content");
        };

        assert_eq!(parts.len(), 2);
        assert!(matches!(
            &parts[0],
            ChatCompletionRequestUserMessageContentPart::Text(t) if t.text == "describe"
        ));
        assert!(matches!(
            &parts[1],
            ChatCompletionRequestUserMessageContentPart::ImageUrl(i)
                if i.image_url.url == "data:image/png;base64,cG5n"
        ));
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_at_call_time() {
        let mut config = create_test_config();
        config.api_key = String::new();
        let client = OpenAiClient::new(config).unwrap();

        let err = client
            .generate(GenerateRequest::text("hello"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Config(_)));
    }
}
