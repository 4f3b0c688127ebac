//! Embeds a few sentences with the local MiniLM model and with the hashing
//! provider, then prints their pairwise squared distances.

use ragent_embed::{EmbedConfig, EmbeddingProvider, FastEmbedProvider, HashingProvider};

fn squared_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

async fn report(provider: &dyn EmbeddingProvider, texts: &[String]) -> anyhow::Result<()> {
    let result = provider.encode(texts).await?;
    println!(
        "{}: {} embeddings of dimension {}",
        provider.provider_name(),
        result.len(),
        result.dimension
    );

    for (i, a) in result.embeddings.iter().enumerate() {
        for (j, b) in result.embeddings.iter().enumerate().skip(i + 1) {
            println!("   d({i}, {j}) = {:.4}", squared_distance(a, b));
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let texts = vec![
        "Rust is a systems programming language.".to_string(),
        "C is a systems programming language too.".to_string(),
        "The solar system consists of the Sun and the objects that orbit it.".to_string(),
    ];

    let hashing = HashingProvider::with_dimension(256)?;
    report(&hashing, &texts).await?;

    let cache_dir = tempfile::tempdir()?;
    let config = EmbedConfig::default()
        .with_cache_dir(cache_dir.path())
        .with_batch_size(2)
        .with_download_progress(true);
    let fastembed = FastEmbedProvider::create(config).await?;
    report(&fastembed, &texts).await?;

    Ok(())
}
