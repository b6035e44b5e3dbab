use anyhow::{Context, Result};
use rental_market::{
    MemoryBackend, PropertyBackend, PropertyService, RestBackend, SearchCriteria, SearchResult,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const RESULTS_FILE: &str = "search_results.json";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let listings = args.next().filter(|arg| arg != "-");
    let criteria = match args.next() {
        Some(json) => serde_json::from_str::<SearchCriteria>(&json)
            .context("Search criteria must be a JSON object")?,
        None => SearchCriteria::default(),
    };

    info!("🏠 Rental Market - property search");
    info!("Criteria: {}", serde_json::to_string(&criteria)?);

    let result = match listings {
        Some(path) => {
            let backend = MemoryBackend::from_json_file(&path).await?;
            search(PropertyService::new(backend), &criteria).await?
        }
        None => {
            let backend = RestBackend::from_env()?;
            search(PropertyService::new(backend), &criteria).await?
        }
    };

    // Display results
    info!("✅ {} matching properties, showing {}", result.total, result.items.len());

    for (i, property) in result.items.iter().enumerate() {
        println!("{}. {} ({} {})", i + 1, property.title, property.price, property.currency);
        println!(
            "   {} · {} bd, {} ba, {} m²",
            property.property_type, property.bedrooms, property.bathrooms, property.area_sqm
        );
        if !property.location.is_empty() {
            println!("   Location: {}", property.location);
        }
        println!("   ID: {}", property.id);
        if property.is_featured {
            println!("   ⭐ Featured");
        }
        println!();
    }

    let json = serde_json::to_string_pretty(&result)?;
    tokio::fs::write(RESULTS_FILE, json).await?;
    info!("💾 Saved results to {}", RESULTS_FILE);

    Ok(())
}

async fn search<B: PropertyBackend>(
    service: PropertyService<B>,
    criteria: &SearchCriteria,
) -> Result<SearchResult> {
    info!("Searching via {} backend", service.backend().backend_name());
    service.search(criteria).await
}
