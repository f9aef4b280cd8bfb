// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含应用程序层的编排逻辑
/// 该模块负责协调领域服务与基础设施，完成完整的业务流程
pub mod use_cases;
