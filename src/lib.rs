// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含爬取流程的编排用例
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心业务实体和服务
pub mod domain;

/// 引擎模块
///
/// 实现网页与图片的HTTP抓取引擎
pub mod engines;

/// 基础设施模块
///
/// 提供图片缓存与CSV导出等本地文件系统集成
pub mod infrastructure;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
