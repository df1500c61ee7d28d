//! Hosted model integration: prompt composition and the Gemini client

mod gemini;
mod prompt;

pub use gemini::GeminiClient;
pub use prompt::{PresetQuestion, PromptBuilder, PRESET_QUESTIONS};

/// Stub model endpoints for tests
#[cfg(test)]
pub(crate) mod testing {
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::Json;

    async fn serve(app: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// Bind a stub generation endpoint on a local port.
    ///
    /// Replies with a single-candidate answer when the request carries an
    /// `x-goog-api-key` header, 401 otherwise.
    pub(crate) async fn spawn_stub_model(answer: &'static str) -> String {
        let app = axum::Router::new().fallback(move |headers: HeaderMap| async move {
            if headers.get("x-goog-api-key").is_none() {
                return (StatusCode::UNAUTHORIZED, "missing api key").into_response();
            }
            Json(serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": answer }] } }]
            }))
            .into_response()
        });
        serve(app).await
    }

    /// Bind a stub endpoint that always fails with the given status
    pub(crate) async fn spawn_failing_model(status: StatusCode) -> String {
        let app = axum::Router::new().fallback(move || async move {
            (
                status,
                Json(serde_json::json!({
                    "error": { "message": "stub failure" }
                })),
            )
        });
        serve(app).await
    }
}
