// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：核心业务实体和数据结构
/// - 服务（services）：分类发现、字段提取和分页爬取
///
/// 领域层是系统的核心，体现了纯粹的业务逻辑和业务规则。
pub mod models;
pub mod services;
