// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含站点、爬取、存储和导出等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 目标站点配置
    pub site: SiteSettings,
    /// 爬取配置
    pub crawl: CrawlSettings,
    /// 存储配置
    pub storage: StorageSettings,
    /// 导出配置
    pub export: ExportSettings,
}

/// 目标站点配置设置
#[derive(Debug, Deserialize)]
pub struct SiteSettings {
    /// 站点根URL
    pub root_url: String,
    /// 请求使用的User-Agent
    pub user_agent: String,
    /// 单次请求超时时间（秒）
    pub request_timeout_secs: u64,
    /// 导航中的"全部商品"哨兵条目标签，发现分类时跳过
    pub root_category_label: String,
}

/// 爬取配置设置
#[derive(Debug, Deserialize)]
pub struct CrawlSettings {
    /// 每个分类的最大翻页数，防御畸形分页链
    pub max_pages_per_category: u32,
}

/// 存储配置设置
#[derive(Debug, Deserialize)]
pub struct StorageSettings {
    /// 图片缓存根目录
    pub images_dir: String,
}

/// 导出配置设置
#[derive(Debug, Deserialize)]
pub struct ExportSettings {
    /// CSV输出文件路径
    pub output_path: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("site.root_url", "https://books.toscrape.com")?
            .set_default(
                "site.user_agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
            )?
            .set_default("site.request_timeout_secs", 10)?
            .set_default("site.root_category_label", "Books")?
            // Default Crawl settings
            .set_default("crawl.max_pages_per_category", 100)?
            // Default Storage settings
            .set_default("storage.images_dir", "images")?
            // Default Export settings
            .set_default("export.output_path", "books.csv")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("SHOPCRAWL").separator("__"));

        builder.build()?.try_deserialize()
    }
}
