//! Document analyzer server binary
//!
//! Run with: cargo run --bin doc-analyzer-server [config.toml]

use doc_analyzer::{config::AnalyzerConfig, server::AnalyzerServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doc_analyzer=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║                    Document Analyzer                      ║
║         Upload a document, ask it anything                ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    // Load configuration from an explicit path argument, falling back to
    // doc-analyzer.toml in the working directory, then to defaults
    let config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path);
            AnalyzerConfig::from_file(&path)?
        }
        None if std::path::Path::new("doc-analyzer.toml").exists() => {
            tracing::info!("Loading configuration from doc-analyzer.toml");
            AnalyzerConfig::from_file("doc-analyzer.toml")?
        }
        None => AnalyzerConfig::default(),
    };

    tracing::info!("Configuration loaded");
    tracing::info!("  - Model: {}", config.model.model);
    tracing::info!("  - Model endpoint: {}", config.model.base_url);
    tracing::info!(
        "  - Max upload size: {} MB",
        config.server.max_upload_size / (1024 * 1024)
    );
    tracing::info!("  - Preview length: {} chars", config.extraction.preview_chars);

    // Create and start server
    let server = AnalyzerServer::new(config)?;

    println!("\nServer starting...");
    println!("  UI: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/sessions                  - Create a session");
    println!("  PUT  /api/sessions/:id/credential   - Set your API key");
    println!("  POST /api/sessions/:id/document     - Upload a document");
    println!("  POST /api/sessions/:id/query        - Ask a question");
    println!("  GET  /api/sessions/:id/download     - Download the answer");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
