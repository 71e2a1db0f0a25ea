use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use base64::{Engine as _, engine::general_purpose};
use image::{ImageFormat, Rgb, RgbImage};
use serde_json::Value;
use sightline::{
    config::{Config, LlmConfig, LogsConfig, ServerConfig},
    llm::ModelClient,
    server::{self, AppState},
};
use std::{io::Cursor, sync::Arc};

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
            max_body_bytes: 16 * 1024 * 1024,
            cors: false,
        },
        llm: LlmConfig {
            provider: "gemini".to_string(),
            base_url: String::new(),
            api_key: "test-api-key".to_string(),
            model: "gemini-1.5-flash".to_string(),
            timeout_secs: Some(5),
        },
    }
}

/// Build the full router around any model client
pub fn create_test_app(model: Arc<dyn ModelClient>) -> Router {
    server::router(AppState::new(model), &create_test_config().server)
}

/// Encode a small solid-colour image as bytes in the given format
pub fn image_bytes(format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_pixel(8, 8, Rgb([30, 144, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format)
        .expect("Failed to encode test image");
    bytes
}

/// A browser-style data URL for a small JPEG frame
pub fn jpeg_data_url() -> String {
    format!(
        "data:image/jpeg;base64,{}",
        general_purpose::STANDARD.encode(image_bytes(ImageFormat::Jpeg))
    )
}

pub fn json_post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}
