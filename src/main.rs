use clap::{Parser, Subcommand};
use pitchside::{
    AppState, AstraVectorStore, Config, HttpScraper, IngestionPipeline, OpenAiEmbeddingClient,
    TextChunker, api,
    cli::Output,
    db::VectorStore,
    rag::EmbeddingClient,
    scrape::Scraper,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "pitchside-server",
    version,
    about = "Retrieval-augmented chat server for football news"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the chat API server
    Serve {
        /// Bind address (overrides HOST)
        #[arg(long)]
        host: Option<String>,
        /// Bind port (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Scrape, chunk, embed and index the source corpus
    Ingest {
        /// Source URL to ingest (repeatable); defaults to the configured corpus
        #[arg(long = "url")]
        urls: Vec<String>,
        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pitchside=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Command::Serve { host, port } => serve(config, host, port).await,
        Command::Ingest { urls, no_color } => ingest(config, urls, no_color).await,
    }
}

async fn serve(config: Config, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    let state = AppState::from_config(config);
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn ingest(config: Config, urls: Vec<String>, no_color: bool) -> anyhow::Result<()> {
    let out = if no_color {
        Output::no_color()
    } else {
        Output::new()
    };
    out.banner();

    let embeddings: Arc<dyn EmbeddingClient> = Arc::new(OpenAiEmbeddingClient::new(
        config.openai.api_key.clone(),
        config.openai.api_base.clone(),
        config.openai.embedding_model.clone(),
    ));
    let store: Arc<dyn VectorStore> = Arc::new(AstraVectorStore::new(
        &config.astra.api_endpoint,
        &config.astra.keyspace,
        config.astra.application_token.clone(),
    ));
    let scraper: Arc<dyn Scraper> = Arc::new(HttpScraper::new());
    let chunker = TextChunker::new(config.rag.chunk_size, config.rag.chunk_overlap);

    let pipeline = IngestionPipeline::new(
        scraper,
        chunker,
        embeddings,
        store,
        config.astra.collection.clone(),
        config.rag.embedding_dimension,
        config.rag.metric,
    );

    let urls = if urls.is_empty() {
        config.rag.source_urls.clone()
    } else {
        urls
    };

    out.status(&format!(
        "Ingesting {} sources into collection '{}'",
        urls.len(),
        config.astra.collection
    ));

    match pipeline.run(&urls).await {
        Ok(report) => {
            out.ingest_summary(&report);
            Ok(())
        }
        Err(e) => {
            out.error(&format!("Ingestion failed: {}", e));
            Err(e.into())
        }
    }
}
