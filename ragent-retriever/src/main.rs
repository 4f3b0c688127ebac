use clap::Parser;
use ragent_embed::{
    EmbedConfig, EmbedModel, EmbeddingProvider, FastEmbedProvider, HashingConfig, HashingProvider,
    TimeoutProvider,
};
use ragent_retriever::{RetrievalEngine, ScoredDocument};
use serde::Serialize;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const DEMO_CORPUS: &[&str] = &[
    "The capital of France is Paris.",
    "Pygame is a cross-platform set of Python modules designed for writing video games.",
    "The solar system consists of the Sun and the objects that orbit it.",
    "Artificial intelligence is intelligence demonstrated by machines.",
    "A CPU is the electronic circuitry that executes instructions comprising a computer program.",
];

const DEMO_QUESTIONS: &[&str] = &[
    "What is the main city in France?",
    "How do you make games in Python?",
];

/// Answer questions with the documents nearest to them in embedding space.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File with one document per line (defaults to a built-in demo corpus)
    #[arg(short, long)]
    corpus: Option<PathBuf>,

    /// Embedding provider: hashing or fastembed
    #[arg(short, long, default_value = "hashing")]
    provider: ProviderKind,

    /// Vector dimension for the hashing provider
    #[arg(long, default_value_t = 256)]
    dimension: usize,

    /// Model for the fastembed provider
    #[arg(long, default_value = "all-minilm-l6-v2")]
    model: EmbedModel,

    /// Directory where fastembed caches model weights
    #[arg(long, default_value = ".fastembed_cache")]
    cache_dir: PathBuf,

    /// Give up on an embedding call after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Number of documents to return per question
    #[arg(short = 'k', long, default_value_t = 1)]
    top_k: usize,

    /// Output format
    #[arg(short, long, default_value = "summary")]
    format: OutputFormat,

    /// Questions to ask (defaults to two demo questions)
    questions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ProviderKind {
    Hashing,
    FastEmbed,
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hashing" => Ok(ProviderKind::Hashing),
            "fastembed" => Ok(ProviderKind::FastEmbed),
            _ => Err(format!("Invalid provider: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum OutputFormat {
    Summary,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" => Ok(OutputFormat::Summary),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid format: {s}")),
        }
    }
}

#[derive(Serialize)]
struct Answer {
    question: String,
    results: Vec<ScoredDocument>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    let corpus = load_corpus(args.corpus.as_ref()).await?;
    let provider = create_provider(&args).await?;
    let engine = RetrievalEngine::build(corpus, provider).await?;

    let questions: Vec<String> = if args.questions.is_empty() {
        DEMO_QUESTIONS.iter().map(|q| q.to_string()).collect()
    } else {
        args.questions
    };

    let mut answers = Vec::with_capacity(questions.len());
    for question in questions {
        let results = engine.query(&question, args.top_k).await?;
        answers.push(Answer { question, results });
    }

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&answers)?);
        }
        OutputFormat::Summary => {
            for answer in &answers {
                println!("Searching for: '{}'", answer.question);
                for (rank, hit) in answer.results.iter().enumerate() {
                    println!(
                        "  {}. [{}] {} (distance {:.4})",
                        rank + 1,
                        hit.document.id,
                        hit.document.text,
                        hit.distance
                    );
                }
            }
        }
    }

    Ok(())
}

/// One document per non-blank line of `path`, or the demo corpus.
async fn load_corpus(path: Option<&PathBuf>) -> anyhow::Result<Vec<String>> {
    let Some(path) = path else {
        return Ok(DEMO_CORPUS.iter().map(|d| d.to_string()).collect());
    };

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read corpus {}: {}", path.display(), e))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

async fn create_provider(args: &Args) -> anyhow::Result<Arc<dyn EmbeddingProvider>> {
    let provider: Arc<dyn EmbeddingProvider> = match args.provider {
        ProviderKind::Hashing => {
            Arc::new(HashingProvider::new(HashingConfig::new(args.dimension))?)
        }
        ProviderKind::FastEmbed => {
            let config = EmbedConfig::new(args.model)
                .with_cache_dir(args.cache_dir.clone())
                .with_download_progress(true);
            Arc::new(FastEmbedProvider::create(config).await?)
        }
    };

    Ok(match args.timeout_secs {
        Some(secs) => Arc::new(TimeoutProvider::new(provider, Duration::from_secs(secs))),
        None => provider,
    })
}
