// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含字段提取与记录校验两个纯领域服务
pub mod extraction_service;
pub mod validation_service;
