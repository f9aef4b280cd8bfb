// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::Url;

/// 商品分类实体
///
/// 表示站点导航中发现的一个分类入口，由分类发现服务生成，
/// 被编排器消费一次后即进入该分类的分页爬取。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// 分类名称
    pub name: String,
    /// 分类入口URL，同时作为该分类下翻页链接的解析基准
    pub entry_url: Url,
}
