// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 运行参数实体
///
/// 一次抓取运行的完整搜索条件。运行开始后不再变更，
/// 以值传递给需要它的组件，组件之间不共享任何隐式状态。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunParameters {
    /// 搜索地点，作为搜索URL的路径段
    pub location: String,
    /// 入住日期
    pub checkin: NaiveDate,
    /// 退房日期
    pub checkout: NaiveDate,
    /// 入住人数（至少为1）
    pub guests: u32,
}

/// 投递状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    /// 已成功写入Sink
    Delivered,
    /// 校验失败，未发起投递
    Rejected,
    /// 投递失败（传输错误或Sink拒绝）
    Failed,
}

/// 单条记录的投递结果
#[derive(Debug, Clone)]
pub struct DeliveryOutcome {
    /// 投递状态
    pub status: DeliveryStatus,
    /// 记录引用（房源标题，可能缺失）
    pub title: Option<String>,
    /// 失败或拒绝时的错误详情
    pub error: Option<String>,
}

impl DeliveryOutcome {
    pub fn delivered(title: String) -> Self {
        Self {
            status: DeliveryStatus::Delivered,
            title: Some(title),
            error: None,
        }
    }

    pub fn rejected(title: Option<String>, reason: impl fmt::Display) -> Self {
        Self {
            status: DeliveryStatus::Rejected,
            title,
            error: Some(reason.to_string()),
        }
    }

    pub fn failed(title: String, error: impl fmt::Display) -> Self {
        Self {
            status: DeliveryStatus::Failed,
            title: Some(title),
            error: Some(error.to_string()),
        }
    }
}

/// 运行摘要
///
/// 每条记录的投递结果逐一折叠进计数器，运行结束时定稿。
/// 四个计数都是交换律求和，折叠顺序不影响结果。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// 处理过的片段总数
    pub attempted: u64,
    /// 成功投递的记录数
    pub delivered: u64,
    /// 校验拒绝的记录数
    pub rejected: u64,
    /// 投递失败的记录数
    pub failed: u64,
}

impl RunSummary {
    /// 将一条投递结果折叠进摘要
    pub fn record(&mut self, outcome: &DeliveryOutcome) {
        self.attempted += 1;
        match outcome.status {
            DeliveryStatus::Delivered => self.delivered += 1,
            DeliveryStatus::Rejected => self.rejected += 1,
            DeliveryStatus::Failed => self.failed += 1,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "attempted: {}, delivered: {}, rejected: {}, failed: {}",
            self.attempted, self.delivered, self.rejected, self.failed
        )
    }
}
