use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use murale::application::{CatalogService, FavoritesLedger};
use murale::domain::entities::{Asset, Category, LoadState};
use murale::domain::ports::SettingsPort;
use murale::infrastructure::{
    CatalogClient, CliArgs, HttpImageTransport, LoaderConfig, MemoryImageCache, RemoteImageLoader,
    SettingsStore, StorageManager,
};

fn init_logging(args: &CliArgs) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.to_string()));

    if let Some(log_path) = &args.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    init_logging(&args)?;

    info!(version = murale::VERSION, "Starting Murale");

    let storage = StorageManager::new()?;
    let config = storage.load_remote_config(args.config.as_deref());

    let settings = Arc::new(SettingsStore::new(storage));
    if let Some(hd) = args.hd {
        settings.set_hd_thumbnails(hd);
    }
    let hd_thumbnails = settings.hd_thumbnails();

    let favorites = FavoritesLedger::new(settings);
    let catalog = Arc::new(CatalogClient::new(&config)?);
    let service = CatalogService::new(catalog, config.resolver(), config.categories.clone());

    if let Some(version) = service.refresh_remote_version().await {
        info!(version, "Latest published version");
    }

    let snapshot = service.refresh_categories(favorites.len()).await;
    if snapshot.offline {
        println!("(offline: showing fallback catalog)");
    }
    println!("Categories:");
    for category in &snapshot.categories {
        println!("  {category}");
    }

    let selected = args.category.map_or_else(
        || {
            snapshot
                .categories
                .first()
                .cloned()
                .unwrap_or(Category::Favorites)
        },
        Category::named,
    );
    if let Some(reselected) = service.resolve_selection(&selected) {
        println!("\n{selected} is unavailable, showing {reselected} instead");
        return list_assets(&service, &favorites, &reselected, hd_thumbnails).await;
    }

    list_assets(&service, &favorites, &selected, hd_thumbnails).await
}

async fn list_assets(
    service: &CatalogService,
    favorites: &FavoritesLedger,
    category: &Category,
    hd_thumbnails: bool,
) -> Result<()> {
    println!("\nAssets in {category}:");
    let assets = service.fetch_assets(category, favorites).await?;
    if assets.is_empty() {
        println!("  (none)");
    }
    for asset in &assets {
        let marker = if favorites.contains(&asset.id) {
            "*"
        } else {
            " "
        };
        println!("  {marker} {}", asset.grid_url(hd_thumbnails));
    }

    if let Some(first) = assets.first() {
        preview(first, hd_thumbnails).await?;
    }
    Ok(())
}

/// Fetches the first asset through the full image pipeline and reports the
/// decoded dimensions, as a connectivity check.
async fn preview(asset: &Asset, hd_thumbnails: bool) -> Result<()> {
    let client = reqwest::Client::builder().build()?;
    let transport = Arc::new(HttpImageTransport::new(client));
    let cache = Arc::new(MemoryImageCache::with_default_capacity());
    let loader = RemoteImageLoader::new(
        asset.grid_url(hd_thumbnails),
        cache,
        transport,
        LoaderConfig::default(),
    );

    let mut rx = loader.subscribe();
    loader.load();
    let state = rx.wait_for(|s| s.is_success() || s.is_failed()).await?;
    match &*state {
        LoadState::Success(img) => {
            println!("\nPreview: {} ({}x{})", loader.url(), img.width(), img.height());
        }
        _ => println!("\nPreview unavailable for {}", loader.url()),
    }
    Ok(())
}
