// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 分类（category）：站点导航中发现的分类入口
/// - 商品记录（item）：从页面提取出的结构化商品数据
pub mod category;
pub mod item;
