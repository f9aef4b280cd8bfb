// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::PathBuf;

/// 商品记录实体
///
/// 表示从单个商品节点提取出的一条记录。除标题外所有字段
/// 均为尽力而为：缺失不是错误，对应字段保持为None。
/// 价格、评分等均为原始修剪文本，不做数值或货币解析。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemRecord {
    /// 商品标题（关键字段）
    pub title: String,
    /// 原价文本
    pub price_text: Option<String>,
    /// 促销价文本，仅促销中的商品存在
    pub sale_price_text: Option<String>,
    /// 评分或状态文本
    pub rating_or_status: Option<String>,
    /// 库存情况文本
    pub availability_text: Option<String>,
    /// 商品handle（站点提供的URL友好标识）
    pub handle: Option<String>,
    /// 商品ID
    pub product_id: Option<String>,
    /// 商品详情页链接
    pub link: Option<String>,
    /// 主图的本地缓存路径
    pub primary_image_path: Option<PathBuf>,
    /// 副图的本地缓存路径
    pub secondary_image_path: Option<PathBuf>,
    /// 所属分类名称
    pub category: String,
}

impl ItemRecord {
    /// 判断商品是否在促销中
    pub fn is_on_sale(&self) -> bool {
        self.sale_price_text.is_some()
    }
}
