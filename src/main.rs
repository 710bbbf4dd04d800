use std::{env, error::Error, sync::Arc};

use tracing::{Level, info};
use tracing_subscriber::{
    Layer, filter::filter_fn, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use ai_llm_service::config::default_config::{config_embedding, config_generation};
use ai_llm_service::telemetry;
use ai_llm_service::service_profiles::LlmServiceProfiles;
use answer_engine::cfg::AskOptions;
use api::AppState;
use doc_store::DocStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file, if present.
    dotenvy::dotenv().ok();

    // LLM service events get the library-scoped layer (RFC3339 timestamps,
    // file:line); everything else goes through the plain fmt layer. The
    // target filter keeps the two disjoint.
    let app_events = fmt::layer()
        .with_target(true)
        .with_filter(filter_fn(|meta| {
            !meta.target().starts_with(telemetry::TARGET_PREFIX)
        }));
    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("info", Level::INFO))
        .with(telemetry::layer())
        .with(app_events)
        .init();

    // The collection is mandatory: a process without it must not serve.
    let collection_path =
        env::var("COLLECTION_PATH").unwrap_or_else(|_| "data/collection.jsonl".to_string());
    let store = Arc::new(DocStore::load(&collection_path).await?);

    let llm = Arc::new(LlmServiceProfiles::new(
        config_generation()?,
        config_embedding()?,
    ));

    let options = AskOptions::from_env();
    info!(chunks = store.len(), top_k = options.top_k, "startup complete");

    api::start(AppState::new(store, llm, options)).await?;

    Ok(())
}
