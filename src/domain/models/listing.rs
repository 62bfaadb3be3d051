// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 候选房源记录
///
/// 由字段提取器从单个房源片段产出。页面标记结构多变，
/// 任何字段都可能缺失；字段以原始文本保存，类型约束
/// 全部留给校验器执行。
#[derive(Debug, Clone, Default)]
pub struct CandidateListing {
    /// 房源标题
    pub title: Option<String>,
    /// 搜索地点（来自运行参数，不从页面提取）
    pub location: String,
    /// 每晚价格的原始文本，例如 "$1,200"
    pub price_per_night: Option<String>,
    /// 评分的原始文本
    pub rating: Option<String>,
    /// 图片URL列表（可能为空）
    pub image_urls: Vec<String>,
}

/// 已验证房源记录
///
/// 所有字段齐全且类型正确，是记录允许投递前必须满足的不变量。
/// 序列化结果即为Sink创建接口的线上负载。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedListing {
    /// 房源标题
    pub title: String,
    /// 搜索地点
    pub location: String,
    /// 每晚价格，非负定点数
    pub price_per_night: Decimal,
    /// 评分，范围 [0.0, 5.0]
    #[serde(rename = "ratings")]
    pub rating: f64,
    /// 图片URL列表，至少一条
    pub image_urls: Vec<String>,
}
