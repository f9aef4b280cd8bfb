// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，负责与本地文件系统的交互。
///
/// 包含的子模块：
/// - 图片缓存（image_cache）：内容寻址的本地图片缓存
/// - 导出（export）：聚合记录的CSV落盘
pub mod export;
pub mod image_cache;
