use std::sync::Arc;

use anyhow::{bail, Result};

use galeri::config::GalleryConfig;
use galeri::controller::GalleryController;
use galeri::layout::MasonryLayout;
use galeri::models::LoadingPhase;
use galeri::normalize::Normalizer;
use galeri::service::HttpAssetService;

/// Minimal shell: fetches one folder and prints the masonry assignment.
///
///     galeri <api-base-url> [folder] [viewport-width]
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("galeri=info".parse().unwrap()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(base_url) = args.next() else {
        bail!("usage: galeri <api-base-url> [folder] [viewport-width]");
    };
    let folder = args.next();
    let viewport_width: u32 = args.next().as_deref().unwrap_or("1280").parse()?;

    let config = GalleryConfig::default();
    let service = Arc::new(HttpAssetService::new(base_url)?);
    let controller = GalleryController::new(service, Normalizer::new(config.clone()));

    controller.set_folder(folder).await;

    let state = controller.state();
    match state.phase {
        LoadingPhase::Ready => {
            let columns = MasonryLayout::new()
                .compute(&state.items, config.columns_for_width(viewport_width));
            for column in &columns {
                println!(
                    "column {} ({:.2} height units):",
                    column.column_index, column.height_units
                );
                for item in &column.items {
                    let kind = if item.is_video { "video" } else { "image" };
                    println!("  [{kind}] {} ({:.2})", item.id, item.aspect_ratio);
                }
            }
        }
        LoadingPhase::Empty => println!("No media in this folder yet."),
        LoadingPhase::Error => {
            bail!(state.error.unwrap_or_else(|| "fetch failed".to_string()))
        }
        LoadingPhase::Idle | LoadingPhase::Loading => {
            unreachable!("set_folder resolves to a terminal phase")
        }
    }

    Ok(())
}
