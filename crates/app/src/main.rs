use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use doc_search_core::{
    decode_document, init_lexicon, load_folder_documents, search, Document, Embedder,
    TfIdfEmbedder, DEFAULT_EMBEDDING_FEATURES, DEFAULT_TOP_K,
};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "doc-search", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search a document set with a free-text query and print ranked hits.
    Search {
        /// Search query
        #[arg(long)]
        query: String,
        /// Number of results to return.
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
        /// Folder of mixed-format files to decode and search.
        #[arg(long, conflicts_with = "documents")]
        folder: Option<String>,
        /// JSON file holding an array of documents {id, title, content, tags}.
        #[arg(long)]
        documents: Option<String>,
        /// Print results as a JSON array instead of human-readable lines.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Produce a standalone TF-IDF embedding for one file or literal text.
    Embed {
        /// File to decode and embed.
        #[arg(long, conflicts_with = "text")]
        file: Option<String>,
        /// Literal text to embed.
        #[arg(long)]
        text: Option<String>,
        /// Vocabulary cap for the embedding.
        #[arg(long, default_value_t = DEFAULT_EMBEDDING_FEATURES)]
        max_features: usize,
    },
    /// Decode a single file to plain text and print it.
    Decode {
        /// File to decode.
        #[arg(long)]
        path: String,
    },
}

fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    // Language resources are process-wide and must load before any
    // normalization; a failure here is fatal rather than degrading search.
    init_lexicon().context("failed to load language resources")?;
    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        "doc-search boot"
    );

    match cli.command {
        Command::Search {
            query,
            top_k,
            folder,
            documents,
            json,
        } => {
            let corpus = match (folder, documents) {
                (Some(folder), None) => {
                    let report = load_folder_documents(Path::new(&folder))
                        .map_err(|error| anyhow::anyhow!(error.to_string()))?;

                    if !report.skipped_files.is_empty() {
                        warn!(
                            "skipped_files={} for folder={}",
                            report.skipped_files.len(),
                            folder
                        );
                        for skipped in report.skipped_files {
                            warn!(path = %skipped.path.display(), reason = %skipped.reason, "skipped file");
                        }
                    }
                    report.documents
                }
                (None, Some(documents)) => {
                    let raw = std::fs::read_to_string(&documents)
                        .with_context(|| format!("cannot read document file {documents}"))?;
                    serde_json::from_str::<Vec<Document>>(&raw)
                        .with_context(|| format!("cannot parse document file {documents}"))?
                }
                _ => anyhow::bail!("pass exactly one of --folder or --documents"),
            };

            info!(document_count = corpus.len(), top_k, "running search");
            let results = search(&corpus, &query, top_k)
                .map_err(|error| anyhow::anyhow!(error.to_string()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                println!("query: {query}");
                for result in results {
                    println!(
                        "score={:.4} id={} title={}",
                        result.score, result.id, result.title
                    );
                    if !result.tags.is_empty() {
                        println!("  tags={}", result.tags.join(","));
                    }
                }
            }
        }
        Command::Embed {
            file,
            text,
            max_features,
        } => {
            let text = match (file, text) {
                (Some(file), None) => decode_document(Path::new(&file)),
                (None, Some(text)) => text,
                _ => anyhow::bail!("pass exactly one of --file or --text"),
            };

            let embedder = TfIdfEmbedder { max_features };
            let embedding = embedder
                .embed(&text)
                .map_err(|error| anyhow::anyhow!(error.to_string()))?;

            info!(dimensions = embedding.len(), "embedding built");
            println!("{}", serde_json::to_string(&embedding)?);
        }
        Command::Decode { path } => {
            let text = decode_document(Path::new(&path));
            if text.is_empty() {
                warn!(path = %path, "file decoded to empty text");
            }
            println!("{text}");
        }
    }

    Ok(())
}
