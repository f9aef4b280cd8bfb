// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务：
/// - 分类发现服务（discovery_service）：解析站点导航，列出分类入口
/// - 提取服务（extraction_service）：按回退选择器链提取商品字段
/// - 爬取服务（crawl_service）：沿"下一页"链接爬完单个分类
///
/// 错误的处理范围即服务边界：单个商品失败不越过页面，
/// 单个页面失败不越过分类，分类发现失败才终止整次运行。
pub mod crawl_service;
pub mod discovery_service;
pub mod extraction_service;
