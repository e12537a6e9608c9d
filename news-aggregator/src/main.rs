use clap::{Parser, Subcommand};
use news_aggregator::{AggregatorConfig, Article, Category, NewsAggregator};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "news-aggregator", about = "Aggregate, categorize and cache news from RSS sources")]
struct Cli {
    /// Override the cache file location
    #[arg(long, global = true)]
    cache_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List aggregated articles, newest first
    List {
        #[arg(long)]
        category: Option<Category>,
        /// Ignore the cache and fetch every source again
        #[arg(long)]
        refresh: bool,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Show one article by its position in the full list
    Show { id: usize },
    /// Find articles whose title or text contains QUERY
    Search { query: String },
    /// Delete the cache file and rebuild it
    Refresh,
    /// Print the configured sources
    Sources,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to load .env: {}", e);
        }
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let cli = Cli::parse();

    let mut config = AggregatorConfig::from_env();
    if let Some(path) = cli.cache_file {
        config = config.with_cache_file(path);
    }
    info!("Using cache file {}", config.cache_file.display());

    let aggregator = NewsAggregator::new(config)?;

    match cli.command {
        Command::List { category, refresh, limit } => {
            let feed = aggregator.get_feed(category, refresh).await;
            if let Some(advisory) = &feed.advisory {
                println!("{}", advisory);
            }
            for article in feed.articles.iter().take(limit) {
                print_headline(article);
            }
        }
        Command::Show { id } => {
            let article = aggregator.get_article_by_id(id).await?;
            print_article(&article);
        }
        Command::Search { query } => {
            let matches = aggregator.search_articles(&query).await;
            println!("{} articles match {:?}", matches.len(), query);
            for article in &matches {
                print_headline(article);
            }
        }
        Command::Refresh => {
            if let Some(path) = aggregator.cache_path() {
                match std::fs::remove_file(path) {
                    Ok(()) => info!("Deleted {}", path.display()),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => warn!("Could not delete {}: {}", path.display(), e),
                }
            }
            let feed = aggregator.get_feed(None, false).await;
            match feed.advisory {
                Some(advisory) => println!("{}", advisory),
                None => println!("Cached {} articles", feed.articles.len()),
            }
        }
        Command::Sources => {
            for source in aggregator.feed_manager().sources() {
                println!("{:<32} {:<14} {:?}  {}", source.name, source.category, source.kind, source.location);
            }
            let mut stats: Vec<(String, i64)> = aggregator.feed_manager().get_feed_stats().into_iter().collect();
            stats.sort();
            println!();
            for (name, count) in stats {
                println!("{:<14} {}", name, count);
            }
        }
    }

    Ok(())
}

fn print_headline(article: &Article) {
    println!(
        "[{}] {} | {} | {} | {}",
        article.id.unwrap_or_default(),
        article.published,
        article.category,
        article.source,
        article.title
    );
}

fn print_article(article: &Article) {
    println!("{}", article.title);
    println!("{} | {} | {}", article.source, article.published, article.category);
    if !article.authors.is_empty() {
        println!("By {}", article.authors.join(", "));
    }
    println!("{}", article.url);
    if let Some(image) = &article.image {
        println!("Image: {}", image);
    }
    println!();
    for paragraph in &article.paragraphs {
        println!("{}\n", paragraph);
    }
    if !article.keywords.is_empty() {
        println!("Keywords: {}", article.keywords.join(", "));
    }
}
