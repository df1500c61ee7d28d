//! Gemini client for document analysis via the Generative Language API

use std::time::Duration;

use crate::config::ModelConfig;
use crate::error::{Error, Result};

use super::prompt::PromptBuilder;

/// Client for the hosted Gemini model
///
/// The credential is supplied per call: every session carries its own
/// user-provided API key, so the client itself holds no secrets. The key
/// travels in the `x-goog-api-key` header and never appears in the URL.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiClient {
    /// Create a new client from the model configuration
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        })
    }

    /// The configured model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the API endpoint URL
    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn build_request(&self, prompt: String) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        }
    }

    /// Ask one question about a document and return the model's answer
    ///
    /// The full document text is embedded in the prompt; no truncation,
    /// no retries. One call per question.
    pub async fn answer(
        &self,
        credential: &str,
        document_text: &str,
        question: &str,
    ) -> Result<String> {
        let prompt = PromptBuilder::build_analysis_prompt(document_text, question);
        let request = self.build_request(prompt);

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", credential)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::ModelCall(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ModelCall(format!(
                "generation failed ({}): {}",
                status, body
            )));
        }

        let gen_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::ModelCall(format!("failed to parse response: {}", e)))?;

        gen_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| Error::ModelCall("no text in model response".to_string()))
    }
}

#[derive(serde::Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(serde::Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(serde::Serialize)]
struct Part {
    text: String,
}

#[derive(serde::Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(serde::Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(serde::Deserialize)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(serde::Deserialize)]
struct ResponsePart {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::{spawn_failing_model, spawn_stub_model};
    use axum::http::StatusCode;

    fn client_for(base_url: String) -> GeminiClient {
        let config = ModelConfig {
            base_url,
            ..ModelConfig::default()
        };
        GeminiClient::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_includes_model() {
        let client = GeminiClient::new(&ModelConfig::default()).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let client = GeminiClient::new(&ModelConfig::default()).unwrap();
        let request = client.build_request("analyze this".to_string());
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "analyze this");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 1024);
        let temperature = value["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.3).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_answer_happy_path() {
        let base_url = spawn_stub_model("The document describes Q3 results.").await;
        let client = client_for(base_url);

        let answer = client
            .answer("test-key", "Q3 revenue was $4.2M.", "Summarize.")
            .await
            .unwrap();
        assert_eq!(answer, "The document describes Q3 results.");
    }

    #[tokio::test]
    async fn test_answer_sends_document_and_question() {
        use axum::extract::State;
        use std::sync::{Arc, Mutex};

        type Captured = Arc<Mutex<Option<serde_json::Value>>>;
        let captured: Captured = Arc::new(Mutex::new(None));

        let app = axum::Router::new()
            .fallback(
                |State(captured): State<Captured>,
                 axum::Json(body): axum::Json<serde_json::Value>| async move {
                    *captured.lock().unwrap() = Some(body);
                    axum::Json(serde_json::json!({
                        "candidates": [{ "content": { "parts": [{ "text": "fine" }] } }]
                    }))
                },
            )
            .with_state(captured.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = client_for(format!("http://{}", addr));
        client
            .answer("key-123", "The sky is blue.", "What color is the sky?")
            .await
            .unwrap();

        let body = captured.lock().unwrap().take().unwrap();
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap().to_string();
        assert!(prompt.contains("The sky is blue."));
        assert!(prompt.contains("What color is the sky?"));
    }

    #[tokio::test]
    async fn test_upstream_error_maps_to_model_call_failure() {
        let base_url = spawn_failing_model(StatusCode::TOO_MANY_REQUESTS).await;
        let client = client_for(base_url);

        let err = client
            .answer("test-key", "doc", "question")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ModelCall(_)));
        assert!(err.to_string().contains("429"));
    }

    #[tokio::test]
    async fn test_malformed_reply_maps_to_model_call_failure() {
        let app = axum::Router::new().fallback(|| async { "this is not json" });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = client_for(format!("http://{}", addr));
        let err = client
            .answer("test-key", "doc", "question")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ModelCall(_)));
        assert!(err.to_string().contains("parse"));
    }
}
