// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use shopcrawl::application::use_cases::crawl_use_case::CrawlOrchestrator;
use shopcrawl::config::settings::Settings;
use shopcrawl::domain::services::crawl_service::PageCrawler;
use shopcrawl::domain::services::discovery_service::CategoryDiscovery;
use shopcrawl::domain::services::extraction_service::{FieldExtractor, ItemSelectors};
use shopcrawl::engines::reqwest_engine::ReqwestEngine;
use shopcrawl::engines::traits::FetchEngine;
use shopcrawl::infrastructure::export::CsvExporter;
use shopcrawl::infrastructure::image_cache::ImageCache;
use shopcrawl::utils::telemetry;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use url::Url;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并执行爬取
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting shopcrawl...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Build the fetch engine
    let engine: Arc<dyn FetchEngine> = Arc::new(ReqwestEngine::new(
        &settings.site.user_agent,
        Duration::from_secs(settings.site.request_timeout_secs),
    )?);

    // 4. Wire up the pipeline
    let root_url = Url::parse(&settings.site.root_url)?;
    let discovery = CategoryDiscovery::new(
        engine.clone(),
        root_url,
        settings.site.root_category_label.clone(),
    );
    let image_cache = Arc::new(ImageCache::new(&settings.storage.images_dir, engine.clone()));
    let crawler = PageCrawler::new(
        engine,
        FieldExtractor::new(ItemSelectors::default()),
        image_cache,
        settings.crawl.max_pages_per_category,
    );
    let exporter = CsvExporter::new(&settings.export.output_path);
    let orchestrator = CrawlOrchestrator::new(discovery, crawler, exporter);

    // 5. Run the crawl
    let summary = orchestrator.run().await?;
    for (name, count) in &summary.per_category {
        info!(category = %name, count, "category summary");
    }
    info!(
        categories = summary.categories,
        total = summary.total,
        "Scraping completed"
    );

    Ok(())
}
