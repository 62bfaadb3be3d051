// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::listing::ValidatedListing;

/// 投递错误类型
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// 传输失败（连接拒绝、超时等）
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Sink返回非2xx响应
    #[error("Sink rejected listing with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl DeliveryError {
    /// 判断错误是否可重试
    ///
    /// 只有传输层失败可重试。Sink已判定请求格式错误的4xx
    /// 重试不可能成功；5xx说明请求已到达Sink，对非幂等的
    /// 创建接口重放可能重复写入，同样不重试。
    pub fn is_retryable(&self) -> bool {
        match self {
            DeliveryError::Transport(e) => e.is_timeout() || e.is_connect(),
            DeliveryError::Rejected { .. } => false,
        }
    }
}

/// 房源记录Sink接口
///
/// 持久化由外部存储服务负责，核心只依赖该抽象。
#[async_trait]
pub trait ListingSink: Send + Sync {
    /// 向Sink提交一条已验证记录
    async fn create_listing(&self, listing: &ValidatedListing) -> Result<(), DeliveryError>;
}
