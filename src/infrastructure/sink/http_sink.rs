// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::warn;
use url::Url;

use crate::config::settings::SinkSettings;
use crate::domain::models::listing::ValidatedListing;
use crate::domain::repositories::listing_sink::{DeliveryError, ListingSink};
use crate::utils::retry_policy::RetryPolicy;

/// Sink创建接口的路径
const CREATE_LISTING_PATH: &str = "/api/add_listing";

/// HTTP房源记录Sink
///
/// 将已验证记录序列化为JSON并提交到Sink的创建接口。
/// 传输层失败按重试策略有限次立即重试；非2xx响应一律终止，
/// Sink自身的唯一性等规则原样作为失败详情上报。
pub struct HttpListingSink {
    /// HTTP 客户端
    client: reqwest::Client,
    /// 创建接口的完整URL
    endpoint: Url,
    /// 传输失败重试策略
    retry_policy: RetryPolicy,
}

impl HttpListingSink {
    /// 根据Sink配置创建新的实例
    pub fn new(settings: &SinkSettings) -> Result<Self, url::ParseError> {
        let endpoint = Url::parse(&format!(
            "{}{}",
            settings.base_url.trim_end_matches('/'),
            CREATE_LISTING_PATH
        ))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout))
            .build()
            .unwrap_or_default();

        Ok(Self {
            client,
            endpoint,
            retry_policy: RetryPolicy::with_max_retries(settings.max_retries),
        })
    }

    /// 替换重试策略
    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    async fn attempt(&self, listing: &ValidatedListing) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Content-Type", "application/json")
            .json(listing)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(DeliveryError::Rejected { status, body })
        }
    }
}

#[async_trait]
impl ListingSink for HttpListingSink {
    async fn create_listing(&self, listing: &ValidatedListing) -> Result<(), DeliveryError> {
        let mut retries = 0u32;
        loop {
            match self.attempt(listing).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    if !e.is_retryable() || !self.retry_policy.should_retry(retries) {
                        return Err(e);
                    }
                    retries += 1;
                    let backoff = self.retry_policy.calculate_backoff(retries);
                    warn!(
                        "Delivery attempt failed, retry {}/{} in {:?}: {}",
                        retries, self.retry_policy.max_retries, backoff, e
                    );
                    sleep(backoff).await;
                }
            }
        }
    }
}
