use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use storefront_client::{
    CacheBuster, CatalogAggregator, DetailAggregator, DetailOutcome, HttpBackend,
    StorefrontConfig, StorefrontPolicy, Theme,
};
use storefront_core::{CategoryKey, ProductId};
use storefront_observability::LogFormat;
use storefront_products::{CategorySelection, FilterState, SortMode};

#[derive(Parser, Debug)]
#[command(name = "storefront", version, about = "Storefront catalog and detail views")]
struct Cli {
    /// Theme preset (classic, nordwood, neongrid); overrides STOREFRONT_THEME
    #[arg(long, global = true)]
    theme: Option<Theme>,
    /// Backend origin; overrides STOREFRONT_API_URL and the theme default
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Log output format (json or compact)
    #[arg(long, global = true, default_value = "json")]
    log_format: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
enum Commands {
    /// List the catalog with optional filters
    List {
        /// Category key, or "all"
        #[arg(long, default_value = "all")]
        category: String,
        #[arg(long)]
        min_price: Option<f64>,
        /// 0 means no upper bound
        #[arg(long)]
        max_price: Option<f64>,
        /// Minimum average rating; 0 means no filter
        #[arg(long)]
        min_rating: Option<f64>,
        /// original, price-asc, price-desc or rating-desc
        #[arg(long, default_value = "original")]
        sort: SortMode,
    },
    /// Show one product's detail view
    Show {
        #[arg(long)]
        cat: String,
        #[arg(long)]
        id: String,
        /// Number of extra comment pages to reveal
        #[arg(long, default_value_t = 0)]
        more: usize,
    },
}

fn load_config(cli: &Cli) -> Result<StorefrontConfig> {
    let mut config = StorefrontConfig::from_env_with_theme(cli.theme)
        .context("reading storefront configuration")?;
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url.clone());
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(format) = LogFormat::parse(&cli.log_format) else {
        bail!("unknown log format: {}", cli.log_format);
    };
    storefront_observability::init_with(format);

    let config = load_config(&cli)?;
    tracing::info!(theme = config.theme.as_str(), api_url = %config.api_url, "storefront starting");

    let backend = HttpBackend::from_config(&config).context("building backend client")?;

    match cli.command {
        Commands::List {
            category,
            min_price,
            max_price,
            min_rating,
            sort,
        } => {
            let filter = FilterState {
                category: CategorySelection::parse(&category),
                min_price,
                max_price,
                min_rating,
                sort,
            };
            list(backend, config.policy, filter).await
        }
        Commands::Show { cat, id, more } => show(backend, config.policy, &cat, &id, more).await,
    }
}

async fn list(backend: HttpBackend, policy: StorefrontPolicy, filter: FilterState) -> Result<()> {
    let mut page = CatalogAggregator::new(backend, policy).load_catalog().await;
    page.set_filter(filter);

    let cards = page.cards(CacheBuster::now());
    if cards.is_empty() {
        println!("no products match");
        return Ok(());
    }
    for card in cards {
        let votes = if card.total > 0 {
            format!(" ({})", card.total)
        } else {
            String::new()
        };
        println!(
            "{:<12} {:<32} {:>10.2}  {:<5} {:.1}{}  {}",
            card.product.id.as_str(),
            card.product.name,
            card.product.price,
            "★".repeat(card.stars),
            card.display_average,
            votes,
            card.detail_link.unwrap_or_default(),
        );
    }
    Ok(())
}

async fn show(
    backend: HttpBackend,
    policy: StorefrontPolicy,
    cat: &str,
    id: &str,
    more: usize,
) -> Result<()> {
    let category = CategoryKey::new(cat).context("--cat")?;
    let product_id = ProductId::new(id).context("--id")?;

    let mut page = match DetailAggregator::new(backend, policy)
        .load_detail(&category, &product_id)
        .await
    {
        DetailOutcome::Loaded(page) => page,
        DetailOutcome::MissingParameter(missing) => bail!("{missing}"),
        DetailOutcome::NotFound { category, product_id } => {
            bail!("product {product_id} not found in {category}")
        }
        DetailOutcome::LoadFailed(error) => {
            return Err(error).context("loading product detail");
        }
    };

    let product = page.product();
    println!("{} ({})", product.name, product.category);
    println!("{:.2}", product.price);
    println!(
        "{} {:.1} ({} ratings)",
        "★".repeat(page.stars()),
        page.display_average(),
        page.summary().total
    );
    for row in page.distribution() {
        println!("  {}★ {:>3}% {}", row.star, row.percent, row.count);
    }

    let sizes: Vec<String> = page
        .sizes()
        .entries()
        .iter()
        .map(|e| {
            if e.is_available {
                e.size.clone()
            } else {
                format!("{} (out of stock)", e.size)
            }
        })
        .collect();
    if !sizes.is_empty() {
        println!("sizes: {}", sizes.join(", "));
    }
    for url in page.image_urls(CacheBuster::now()) {
        println!("image: {url}");
    }

    for _ in 0..more {
        page.show_more_comments();
    }
    let comments = page.comment_page();
    for comment in &comments.visible {
        let rating = comment
            .valid_rating()
            .map_or_else(|| "-".to_string(), |r| format!("{r}"));
        println!(
            "- {} [{}]: {}",
            comment.user,
            rating,
            comment.text.as_deref().unwrap_or_default().trim()
        );
    }
    if comments.has_more() {
        println!("... {} more comments", comments.remaining());
    }
    Ok(())
}
