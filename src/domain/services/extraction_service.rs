// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::item::ItemRecord;
use crate::utils::url_utils;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::warn;
use url::Url;

/// 提取错误类型
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// 缺失关键字段
    #[error("Missing critical field: {0}")]
    MissingField(&'static str),
}

/// 选择器策略
///
/// 一条具体的取值方式：在商品节点内执行CSS选择器，
/// 提取文本或指定属性。空选择器表示商品节点自身。
#[derive(Debug, Clone)]
pub struct SelectorStrategy {
    /// CSS选择器
    pub selector: String,
    /// 提取的属性名，None表示提取文本内容
    pub attr: Option<String>,
}

impl SelectorStrategy {
    /// 文本提取策略
    pub fn text(selector: &str) -> Self {
        Self {
            selector: selector.to_string(),
            attr: None,
        }
    }

    /// 属性提取策略
    pub fn attr(selector: &str, attr: &str) -> Self {
        Self {
            selector: selector.to_string(),
            attr: Some(attr.to_string()),
        }
    }
}

/// 字段提取规则
///
/// 按顺序尝试的回退策略列表，第一个产生非空值的策略胜出。
/// 站点改版引入的备用类名只需在列表里补一条策略即可兼容。
#[derive(Debug, Clone, Default)]
pub struct FieldRule {
    pub strategies: Vec<SelectorStrategy>,
}

impl FieldRule {
    pub fn new(strategies: Vec<SelectorStrategy>) -> Self {
        Self { strategies }
    }

    /// 在给定节点范围内应用回退链，返回第一个非空修剪值
    pub fn first_match(&self, scope: ElementRef) -> Option<String> {
        for strategy in &self.strategies {
            if strategy.selector.is_empty() {
                // Own-node strategy: only attribute extraction makes sense here
                let value = strategy
                    .attr
                    .as_deref()
                    .and_then(|attr| scope.value().attr(attr))
                    .and_then(non_empty);
                if value.is_some() {
                    return value;
                }
                continue;
            }

            let selector = match Selector::parse(&strategy.selector) {
                Ok(s) => s,
                Err(_) => continue, // Skip invalid selectors
            };
            for element in scope.select(&selector) {
                let value = match &strategy.attr {
                    Some(attr) => element.value().attr(attr).map(str::to_string),
                    None => Some(element.text().collect::<Vec<_>>().join(" ")),
                };
                if let Some(value) = value.as_deref().and_then(non_empty) {
                    return Some(value);
                }
            }
        }
        None
    }
}

/// 商品字段选择器表
///
/// 每个逻辑字段对应一条回退规则。默认表合并了两类已观察到的
/// 商品列表标记：经典目录页（product_pod）与Shopify风格的
/// 商品网格（grid-product）。
#[derive(Debug, Clone)]
pub struct ItemSelectors {
    /// 商品节点选择器（节点级回退：第一个命中的选择器胜出）
    pub item: Vec<String>,
    /// 标题（关键字段）
    pub title: FieldRule,
    /// 原价
    pub price: FieldRule,
    /// 促销价
    pub sale_price: FieldRule,
    /// 评分或状态
    pub rating: FieldRule,
    /// 库存情况
    pub availability: FieldRule,
    /// 商品handle
    pub handle: FieldRule,
    /// 商品ID
    pub product_id: FieldRule,
    /// 主图
    pub primary_image: FieldRule,
    /// 副图
    pub secondary_image: FieldRule,
    /// 下一页链接（作用于整个文档）
    pub next_page: FieldRule,
}

impl Default for ItemSelectors {
    fn default() -> Self {
        Self {
            item: vec![
                "article.product_pod".to_string(),
                "div.grid__item.grid-product".to_string(),
            ],
            title: FieldRule::new(vec![
                SelectorStrategy::attr("h3 a", "title"),
                SelectorStrategy::text("h3 a"),
                SelectorStrategy::text(".grid-product__title"),
                SelectorStrategy::text(".grid-product__title--body"),
            ]),
            price: FieldRule::new(vec![
                SelectorStrategy::text(".price_color"),
                SelectorStrategy::text(".grid-product__price--original .money"),
                SelectorStrategy::text(".price-item--regular"),
            ]),
            sale_price: FieldRule::new(vec![SelectorStrategy::text(
                ".grid-product__price:not(.grid-product__price--original) .money",
            )]),
            rating: FieldRule::new(vec![SelectorStrategy::attr(".star-rating", "class")]),
            availability: FieldRule::new(vec![
                SelectorStrategy::text(".instock"),
                SelectorStrategy::text(".availability"),
            ]),
            handle: FieldRule::new(vec![SelectorStrategy::attr("", "data-product-handle")]),
            product_id: FieldRule::new(vec![SelectorStrategy::attr("", "data-product-id")]),
            primary_image: FieldRule::new(vec![
                SelectorStrategy::attr(".image-wrap img", "src"),
                SelectorStrategy::attr(".grid__image img", "src"),
                SelectorStrategy::attr("img", "src"),
            ]),
            secondary_image: FieldRule::new(vec![SelectorStrategy::attr(
                ".grid-product__secondary-image img",
                "src",
            )]),
            next_page: FieldRule::new(vec![
                SelectorStrategy::attr("li.next a", "href"),
                SelectorStrategy::attr(".pagination .next a", "href"),
            ]),
        }
    }
}

/// 单个商品的提取结果
///
/// 图片此时仍是远端URL，下载与本地路径回填由爬取服务完成
#[derive(Debug, Clone)]
pub struct ExtractedItem {
    /// 商品记录（图片路径尚未填充）
    pub record: ItemRecord,
    /// 规范化后的主图URL
    pub primary_image_url: Option<Url>,
    /// 规范化后的副图URL
    pub secondary_image_url: Option<Url>,
}

/// 单页解析结果
///
/// 纯数据结构：解析在await之前同步完成，解析树不跨越异步边界
#[derive(Debug)]
pub struct ParsedPage {
    /// 按页面出现顺序排列的商品
    pub items: Vec<ExtractedItem>,
    /// 下一页链接的原始href
    pub next_page_href: Option<String>,
}

/// 字段提取服务
///
/// 对单个商品节点按字段应用回退选择器链，构造商品记录。
/// 非关键字段缺失容忍为None，关键字段缺失只跳过该商品。
pub struct FieldExtractor {
    selectors: ItemSelectors,
}

impl FieldExtractor {
    pub fn new(selectors: ItemSelectors) -> Self {
        Self { selectors }
    }

    /// 解析整页
    ///
    /// 提取页面上的所有商品节点与下一页链接。单个商品提取失败
    /// 记录日志并继续处理其余商品，顺序保持页面出现顺序。
    ///
    /// # 参数
    ///
    /// * `html` - 页面HTML内容
    /// * `page_url` - 页面URL，用于图片等相对地址的解析
    /// * `category` - 所属分类名称
    pub fn parse_page(&self, html: &str, page_url: &Url, category: &str) -> ParsedPage {
        let document = Html::parse_document(html);
        let root = document.root_element();

        let mut items = Vec::new();
        for (index, node) in self.item_nodes(root).into_iter().enumerate() {
            match self.extract(node, page_url, category) {
                Ok(item) => items.push(item),
                Err(e) => {
                    warn!(
                        url = %page_url,
                        category,
                        item_index = index,
                        error = %e,
                        "skipping item"
                    );
                }
            }
        }

        let next_page_href = self.selectors.next_page.first_match(root);
        ParsedPage {
            items,
            next_page_href,
        }
    }

    /// 提取单个商品节点
    ///
    /// # 返回值
    ///
    /// * `Ok(ExtractedItem)` - 提取出的商品
    /// * `Err(ExtractionError)` - 关键字段缺失
    pub fn extract(
        &self,
        node: ElementRef,
        page_url: &Url,
        category: &str,
    ) -> Result<ExtractedItem, ExtractionError> {
        let title = self
            .selectors
            .title
            .first_match(node)
            .ok_or(ExtractionError::MissingField("title"))?;

        let handle = self.selectors.handle.first_match(node);
        let link = handle
            .as_deref()
            .and_then(|h| page_url.join(&format!("/products/{}", h)).ok())
            .map(|u| u.to_string());

        let record = ItemRecord {
            title,
            price_text: self.selectors.price.first_match(node),
            sale_price_text: self.selectors.sale_price.first_match(node),
            rating_or_status: self
                .selectors
                .rating
                .first_match(node)
                .map(|v| strip_class_token(&v, "star-rating"))
                .filter(|v| !v.is_empty()),
            availability_text: self.selectors.availability.first_match(node),
            handle,
            product_id: self.selectors.product_id.first_match(node),
            link,
            primary_image_path: None,
            secondary_image_path: None,
            category: category.to_string(),
        };

        Ok(ExtractedItem {
            primary_image_url: self.image_url(&self.selectors.primary_image, node, page_url),
            secondary_image_url: self.image_url(&self.selectors.secondary_image, node, page_url),
            record,
        })
    }

    fn item_nodes<'a>(&self, root: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        for selector_str in &self.selectors.item {
            let selector = match Selector::parse(selector_str) {
                Ok(s) => s,
                Err(_) => continue,
            };
            let nodes: Vec<ElementRef<'a>> = root.select(&selector).collect();
            if !nodes.is_empty() {
                return nodes;
            }
        }
        Vec::new()
    }

    fn image_url(&self, rule: &FieldRule, node: ElementRef, page_url: &Url) -> Option<Url> {
        let raw = rule.first_match(node)?;
        match url_utils::normalize_image_url(page_url, &raw) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(page = %page_url, raw, error = %e, "unparseable image url");
                None
            }
        }
    }
}

/// 修剪并压缩连续空白为单个空格，空结果视为未命中
fn non_empty(value: &str) -> Option<String> {
    let normalized = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// 从class属性值中剔除给定令牌
///
/// 目标站点把评分编码为`star-rating Three`这样的第二个class，
/// 剔除固定令牌后剩下的就是评分文本
fn strip_class_token(value: &str, token: &str) -> String {
    value
        .split_whitespace()
        .filter(|t| *t != token)
        .collect::<Vec<_>>()
        .join(" ")
}
