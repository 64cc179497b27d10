use financial_document_crew::{
    config::Settings,
    crew::{default_crew, CrewManifest},
    execution::ToolExecutor,
    tools::create_default_registry,
    DocumentLoader,
};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env();
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| settings.document_path.clone());

    info!("Financial Document Crew starting");

    if !DocumentLoader::new().has_backend() {
        warn!("Built without the 'pdf' feature; documents cannot be read");
    }

    let registry = create_default_registry(&settings);
    let manifest = CrewManifest::new(default_crew(), &registry, &settings)?;

    println!("=== CREW MANIFEST ===");
    println!("{}", manifest.to_json_pretty()?);
    println!("Fingerprint: {}", manifest.fingerprint());

    let executor = ToolExecutor::new(registry);
    info!(tools = ?executor.registry().list(), "Tools registered");

    info!(path = %path, "Reading document");

    let observation = executor
        .invoke("read_financial_document", json!({ "path": path }))
        .await;

    println!("\n=== DOCUMENT ({}) ===", observation.status);
    match observation.tool_output.as_str() {
        Some(text) => println!("{}", text),
        None => println!("{}", observation.tool_output),
    }

    Ok(())
}
