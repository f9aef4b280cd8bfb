// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 端到端流水线测试
//!
//! 用wiremock搭建一个微型两分类站点，驱动完整的
//! 发现 → 爬取 → 缓存 → 导出流程并校验产物。

use shopcrawl::application::use_cases::crawl_use_case::CrawlOrchestrator;
use shopcrawl::domain::services::crawl_service::PageCrawler;
use shopcrawl::domain::services::discovery_service::CategoryDiscovery;
use shopcrawl::domain::services::extraction_service::{FieldExtractor, ItemSelectors};
use shopcrawl::engines::reqwest_engine::ReqwestEngine;
use shopcrawl::engines::traits::FetchEngine;
use shopcrawl::infrastructure::export::CsvExporter;
use shopcrawl::infrastructure::image_cache::ImageCache;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ROOT: &str = r#"<html><body>
    <ul class="nav nav-list">
        <li><a href="catalogue/category/books_1/index.html">Books</a>
            <ul>
                <li><a href="catalogue/category/books/travel_2/index.html">Travel</a></li>
                <li><a href="catalogue/category/books/mystery_3/index.html">Mystery</a></li>
            </ul>
        </li>
    </ul>
</body></html>"#;

fn book(title: &str, price: &str, rating: &str, img: &str) -> String {
    format!(
        r#"<article class="product_pod">
            <div class="image_container"><img src="{img}"/></div>
            <p class="star-rating {rating}"></p>
            <h3><a href="book.html" title="{title}">{title}</a></h3>
            <p class="price_color">{price}</p>
            <p class="instock availability"> In stock </p>
        </article>"#
    )
}

fn orchestrator(server: &MockServer, images_dir: &TempDir, output: &std::path::Path) -> CrawlOrchestrator {
    let engine: Arc<dyn FetchEngine> =
        Arc::new(ReqwestEngine::new("shopcrawl-test/0.1", Duration::from_secs(5)).unwrap());
    let discovery = CategoryDiscovery::new(
        engine.clone(),
        Url::parse(&server.uri()).unwrap(),
        "Books".to_string(),
    );
    let image_cache = Arc::new(ImageCache::new(images_dir.path(), engine.clone()));
    let crawler = PageCrawler::new(
        engine,
        FieldExtractor::new(ItemSelectors::default()),
        image_cache,
        100,
    );
    CrawlOrchestrator::new(discovery, crawler, CsvExporter::new(output))
}

#[tokio::test]
async fn test_full_pipeline_two_categories_with_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ROOT))
        .mount(&server)
        .await;

    // Travel: one page, no pagination
    Mock::given(method("GET"))
        .and(path("/catalogue/category/books/travel_2/index.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "<html><body>{}</body></html>",
            book("Atlas", "£45.17", "Two", "/media/atlas.jpg")
        )))
        .mount(&server)
        .await;

    // Mystery: two pages
    Mock::given(method("GET"))
        .and(path("/catalogue/category/books/mystery_3/index.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<html><body>{}<ul class="pager"><li class="next"><a href="page-2.html">next</a></li></ul></body></html>"#,
            book("Sharp Objects", "£47.82", "Four", "/media/sharp.jpg")
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/catalogue/category/books/mystery_3/page-2.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "<html><body>{}</body></html>",
            book("In a Dark Wood", "£19.63", "One", "/media/wood.jpg")
        )))
        .mount(&server)
        .await;

    for img in ["atlas", "sharp", "wood"] {
        Mock::given(method("GET"))
            .and(path(format!("/media/{}.jpg", img)))
            .respond_with(ResponseTemplate::new(200).set_body_raw(&b"img"[..], "image/jpeg"))
            .expect(1)
            .mount(&server)
            .await;
    }

    let images_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("books.csv");

    let summary = orchestrator(&server, &images_dir, &output)
        .run()
        .await
        .unwrap();

    assert_eq!(summary.categories, 2);
    assert_eq!(
        summary.per_category,
        vec![("Travel".to_string(), 1), ("Mystery".to_string(), 2)]
    );
    assert_eq!(summary.total, 3);

    // CSV preserves category order then page order
    let content = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("Atlas,£45.17,,Two,In stock"));
    assert!(lines[2].starts_with("Sharp Objects"));
    assert!(lines[3].starts_with("In a Dark Wood"));

    // Images landed in sanitized per-category directories
    let travel_images: Vec<_> = std::fs::read_dir(images_dir.path().join("Travel"))
        .unwrap()
        .collect();
    assert_eq!(travel_images.len(), 1);
    let mystery_images: Vec<_> = std::fs::read_dir(images_dir.path().join("Mystery"))
        .unwrap()
        .collect();
    assert_eq!(mystery_images.len(), 2);
}

#[tokio::test]
async fn test_pipeline_without_navigation_exports_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>no nav here</body></html>"),
        )
        .mount(&server)
        .await;

    let images_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("books.csv");

    let summary = orchestrator(&server, &images_dir, &output)
        .run()
        .await
        .unwrap();

    assert_eq!(summary.total, 0);
    assert!(summary.per_category.is_empty());
    assert!(!output.exists());
}

#[tokio::test]
async fn test_pipeline_rerun_downloads_each_image_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ROOT))
        .mount(&server)
        .await;
    for cat in ["travel_2", "mystery_3"] {
        Mock::given(method("GET"))
            .and(path(format!("/catalogue/category/books/{}/index.html", cat)))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!(
                "<html><body>{}</body></html>",
                book("Same Book", "£10.00", "Three", "/media/shared.jpg")
            )))
            .mount(&server)
            .await;
    }
    // Both categories and both runs reference the same image URL; the
    // per-category namespace gives two files, the rerun adds no fetches
    Mock::given(method("GET"))
        .and(path("/media/shared.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(&b"img"[..], "image/jpeg"))
        .expect(2)
        .mount(&server)
        .await;

    let images_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("books.csv");

    let first = orchestrator(&server, &images_dir, &output).run().await.unwrap();
    assert_eq!(first.total, 2);

    let second = orchestrator(&server, &images_dir, &output).run().await.unwrap();
    assert_eq!(second.total, 2);
}
