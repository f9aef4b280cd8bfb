// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::crawl_service::PageCrawler;
use crate::domain::services::discovery_service::CategoryDiscovery;
use crate::infrastructure::export::CsvExporter;
use anyhow::Result;
use tracing::{error, info};

/// 爬取汇总
///
/// 运行结束时对用户可见的计数，单项失败只出现在日志里
#[derive(Debug, Default)]
pub struct CrawlSummary {
    /// 发现的分类数
    pub categories: usize,
    /// 每个分类的记录数，按处理顺序
    pub per_category: Vec<(String, usize)>,
    /// 导出的记录总数
    pub total: usize,
}

/// 爬取编排用例
///
/// 顺序驱动完整流程：发现分类 → 逐分类分页爬取 → 聚合 → 导出。
/// 没有回滚语义：导出在最后发生一次，覆盖成功收集到的全部记录，
/// 个别分类的失败不阻塞其他分类的结果导出。
pub struct CrawlOrchestrator {
    discovery: CategoryDiscovery,
    crawler: PageCrawler,
    exporter: CsvExporter,
}

impl CrawlOrchestrator {
    pub fn new(discovery: CategoryDiscovery, crawler: PageCrawler, exporter: CsvExporter) -> Self {
        Self {
            discovery,
            crawler,
            exporter,
        }
    }

    /// 执行完整爬取流程
    ///
    /// 发现失败或没有分类时快速失败：记录错误并返回零汇总，
    /// 不产生输出文件，也不向上抛出。
    pub async fn run(&self) -> Result<CrawlSummary> {
        let categories = match self.discovery.list_categories().await {
            Ok(categories) => categories,
            Err(e) => {
                error!(error = %e, "category discovery failed, nothing to crawl");
                return Ok(CrawlSummary::default());
            }
        };
        if categories.is_empty() {
            error!("no categories found, nothing to crawl");
            return Ok(CrawlSummary::default());
        }
        info!(count = categories.len(), "categories discovered");

        let mut all_records = Vec::new();
        let mut per_category = Vec::new();
        for category in &categories {
            info!(category = %category.name, "processing category");
            let records = self.crawler.crawl_category(category).await;
            info!(
                category = %category.name,
                count = records.len(),
                "category completed"
            );
            per_category.push((category.name.clone(), records.len()));
            all_records.extend(records);
        }

        self.exporter.export(&all_records)?;

        Ok(CrawlSummary {
            categories: categories.len(),
            per_category,
            total: all_records.len(),
        })
    }
}
