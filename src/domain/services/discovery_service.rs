// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::category::Category;
use crate::engines::traits::{EngineError, FetchEngine};
use scraper::{Html, Selector};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

/// 分类发现错误类型
///
/// 发现失败对整次运行是致命的：没有分类就没有可爬内容
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// 引擎错误
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
    /// 非成功状态码
    #[error("Unexpected status code: {0}")]
    Status(u16),
}

/// 分类发现服务
///
/// 解析站点首页的导航结构，列出全部分类入口。
/// 导航中的"全部商品"哨兵条目按配置标签过滤掉。
pub struct CategoryDiscovery {
    /// 抓取引擎
    engine: Arc<dyn FetchEngine>,
    /// 站点根URL
    root_url: Url,
    /// 哨兵条目标签
    root_category_label: String,
    /// 导航选择器回退链
    nav_selectors: Vec<String>,
}

impl CategoryDiscovery {
    pub fn new(engine: Arc<dyn FetchEngine>, root_url: Url, root_category_label: String) -> Self {
        Self {
            engine,
            root_url,
            root_category_label,
            nav_selectors: vec![
                ".nav-list ul li a".to_string(),
                "ul.nav li a".to_string(),
            ],
        }
    }

    /// 发现全部分类入口
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<Category>)` - 分类列表，导航缺失时为空列表
    /// * `Err(DiscoveryError)` - 首页抓取失败
    pub async fn list_categories(&self) -> Result<Vec<Category>, DiscoveryError> {
        info!(root = %self.root_url, "fetching categories");
        let response = self.engine.fetch(self.root_url.as_str()).await?;
        if !response.is_success() {
            return Err(DiscoveryError::Status(response.status_code));
        }
        Ok(self.parse_nav(&response.text()))
    }

    fn parse_nav(&self, html: &str) -> Vec<Category> {
        let document = Html::parse_document(html);
        let mut categories = Vec::new();

        for selector_str in &self.nav_selectors {
            let selector = match Selector::parse(selector_str) {
                Ok(s) => s,
                Err(_) => continue,
            };
            for link in document.select(&selector) {
                let name = link
                    .text()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ");
                let Some(href) = link.value().attr("href") else {
                    continue;
                };
                if name.is_empty() || name == self.root_category_label {
                    continue;
                }
                match self.root_url.join(href) {
                    Ok(entry_url) => {
                        debug!(category = %name, url = %entry_url, "found category");
                        categories.push(Category { name, entry_url });
                    }
                    Err(e) => {
                        warn!(category = %name, href, error = %e, "unresolvable category link");
                    }
                }
            }
            // Fallback selectors only apply when the primary matched nothing
            if !categories.is_empty() {
                break;
            }
        }

        categories
    }
}
