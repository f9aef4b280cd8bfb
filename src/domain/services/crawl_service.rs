// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::category::Category;
use crate::domain::models::item::ItemRecord;
use crate::domain::services::extraction_service::{ExtractedItem, FieldExtractor};
use crate::engines::traits::{EngineError, FetchEngine};
use crate::infrastructure::image_cache::{ImageCache, ImageKey};
use crate::utils::url_utils;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

/// 页面抓取错误类型
#[derive(Error, Debug)]
pub enum PageFetchError {
    /// 引擎错误
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
    /// 非成功状态码
    #[error("Unexpected status code: {0}")]
    Status(u16),
}

/// 分页爬取服务
///
/// 沿"下一页"链接迭代爬完一个分类。分页链由服务端标记驱动，
/// 已访问URL集合与翻页上限共同防御环状或畸形的链接。
pub struct PageCrawler {
    /// 抓取引擎
    engine: Arc<dyn FetchEngine>,
    /// 字段提取服务
    extractor: FieldExtractor,
    /// 图片缓存
    image_cache: Arc<ImageCache>,
    /// 每个分类的最大翻页数
    max_pages: u32,
}

impl PageCrawler {
    pub fn new(
        engine: Arc<dyn FetchEngine>,
        extractor: FieldExtractor,
        image_cache: Arc<ImageCache>,
        max_pages: u32,
    ) -> Self {
        Self {
            engine,
            extractor,
            image_cache,
            max_pages,
        }
    }

    /// 爬取一个分类的完整分页链
    ///
    /// 任一页面抓取失败即在该页截断，此前各页已收集的记录保留。
    /// 返回的记录顺序为页内顺序接跨页顺序。
    pub async fn crawl_category(&self, category: &Category) -> Vec<ItemRecord> {
        let mut records = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut current = category.entry_url.clone();
        let mut pages = 0u32;

        loop {
            if !visited.insert(current.to_string()) {
                warn!(
                    url = %current,
                    category = %category.name,
                    "pagination cycle detected, stopping category"
                );
                break;
            }
            if pages >= self.max_pages {
                warn!(
                    category = %category.name,
                    max_pages = self.max_pages,
                    "page limit reached, stopping category"
                );
                break;
            }
            pages += 1;

            info!(url = %current, category = %category.name, "fetching page");
            let html = match self.fetch_page(&current).await {
                Ok(html) => html,
                Err(e) => {
                    warn!(
                        url = %current,
                        category = %category.name,
                        error = %e,
                        "page fetch failed, truncating category"
                    );
                    break;
                }
            };

            let parsed = self.extractor.parse_page(&html, &current, &category.name);
            debug!(
                url = %current,
                items = parsed.items.len(),
                has_next = parsed.next_page_href.is_some(),
                "page parsed"
            );

            for item in parsed.items {
                records.push(self.finalize_item(item, &category.name).await);
            }

            match parsed.next_page_href {
                // Next hrefs resolve against the category entry, not the current
                // deep page URL
                Some(href) => match url_utils::resolve_url(&category.entry_url, &href) {
                    Ok(next) => current = next,
                    Err(e) => {
                        warn!(
                            href,
                            category = %category.name,
                            error = %e,
                            "unresolvable next link, stopping category"
                        );
                        break;
                    }
                },
                None => break,
            }
        }

        records
    }

    async fn fetch_page(&self, url: &Url) -> Result<String, PageFetchError> {
        let response = self.engine.fetch(url.as_str()).await?;
        if !response.is_success() {
            return Err(PageFetchError::Status(response.status_code));
        }
        Ok(response.text())
    }

    /// 下载商品图片并回填本地路径
    ///
    /// 缓存失败只记录日志，记录以无图状态继续
    async fn finalize_item(&self, item: ExtractedItem, category: &str) -> ItemRecord {
        let mut record = item.record;

        if let Some(url) = &item.primary_image_url {
            record.primary_image_path = self
                .cache_image(url, record.handle.as_deref(), "primary", category)
                .await;
        }
        if let Some(url) = &item.secondary_image_url {
            record.secondary_image_path = self
                .cache_image(url, record.handle.as_deref(), "secondary", category)
                .await;
        }

        debug!(title = %record.title, category, "processed item");
        record
    }

    async fn cache_image(
        &self,
        url: &Url,
        handle: Option<&str>,
        role: &str,
        category: &str,
    ) -> Option<std::path::PathBuf> {
        // Handle-bearing markup names files by handle and role; everything
        // else falls back to the per-category hash scheme
        let key = match handle {
            Some(handle) => ImageKey::HandleRole { handle, role },
            None => ImageKey::UrlHash { category },
        };
        match self.image_cache.fetch_and_cache(url.as_str(), key).await {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(image_url = %url, category, error = %e, "image download failed");
                None
            }
        }
    }
}
