use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shopfront_api::StoreClient;
use shopfront_core::{
    filter,
    models::{FilterCriteria, Product, WILDCARD_CATEGORY},
    Config, ProductSource, StoreSource,
};
use shopfront_tui::{run_tui, App};

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(version, about = "Terminal product catalog browser", long_about = None)]
struct Cli {
    /// Override the configured catalog endpoint base URL
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print the product catalog to stdout
    List {
        /// Only products in this category (exact match)
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive search over title, description, and category
        #[arg(long)]
        query: Option<String>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show a single product
    Show {
        /// Product id
        id: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shopfront=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(endpoint) = cli.endpoint {
        config.store.endpoint = endpoint;
    }

    let client = StoreClient::with_base_url(config.store.endpoint.clone());
    let source = StoreSource::new(client);

    match cli.command {
        Some(Commands::List {
            category,
            query,
            json,
        }) => {
            let products = source.fetch_products().await?;
            let criteria = FilterCriteria {
                search_query: query.unwrap_or_default(),
                category: category.unwrap_or_else(|| WILDCARD_CATEGORY.to_string()),
                ..Default::default()
            };
            let visible = filter::apply(&products, &criteria);

            if json {
                println!("{}", serde_json::to_string_pretty(&visible)?);
            } else {
                tracing::info!(
                    shown = visible.len(),
                    total = products.len(),
                    "catalog fetched"
                );
                print_table(&visible);
            }
        }
        Some(Commands::Show { id }) => {
            let product = source.fetch_product(id).await?;
            print_product(&product);
        }
        None => {
            let app = App::new();
            run_tui(app, Arc::new(source), config.ui.mouse_enabled).await?;
        }
    }

    Ok(())
}

fn print_table(products: &[Product]) {
    if products.is_empty() {
        println!("no products matched");
        return;
    }

    println!(
        "{:>5}  {:>10}  {:>6}  {:<18}  {}",
        "ID", "PRICE", "RATING", "CATEGORY", "TITLE"
    );
    for product in products {
        println!(
            "{:>5}  {:>10}  {:>6}  {:<18}  {}",
            product.id,
            format!("Rs.{:.2}", product.price),
            format!("{:.1}", product.rating.rate),
            product.category,
            product.title
        );
    }
}

fn print_product(product: &Product) {
    println!("{}", product.title);
    println!("  id:        {}", product.id);
    println!("  category:  {}", product.category);
    println!("  price:     Rs.{:.2}", product.price);
    println!(
        "  rating:    {} ({} reviews)",
        product.rating.rate, product.rating.count
    );
    if !product.image.is_empty() {
        println!("  image:     {}", product.image);
    }
    println!();
    println!("{}", product.description);
}
