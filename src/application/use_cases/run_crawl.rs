// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;
use std::time::Duration;

use scraper::Html;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::settings::MarketplaceSettings;
use crate::domain::models::listing::CandidateListing;
use crate::domain::models::run::{DeliveryOutcome, RunParameters, RunSummary};
use crate::domain::repositories::listing_sink::ListingSink;
use crate::domain::services::extraction_service::ListingExtractor;
use crate::domain::services::validation_service::ValidationService;
use crate::engines::traits::{FetchEngine, FetchError, FetchRequest};
use crate::utils::url_utils;

/// 抓取会话
///
/// 驱动一次完整运行：根据运行参数构建搜索请求，抓取首个
/// 结果页，将每个房源片段依次送入提取、校验、投递，并把
/// 投递结果折叠为运行摘要。单个片段的失败只记录不中断，
/// 只有搜索页抓取本身的失败会终止运行。
pub struct CrawlSession<E, S>
where
    E: FetchEngine,
    S: ListingSink,
{
    engine: Arc<E>,
    sink: Arc<S>,
    marketplace: MarketplaceSettings,
    run_id: Uuid,
}

impl<E, S> CrawlSession<E, S>
where
    E: FetchEngine,
    S: ListingSink,
{
    /// 创建新的抓取会话实例
    pub fn new(engine: Arc<E>, sink: Arc<S>, marketplace: MarketplaceSettings) -> Self {
        Self {
            engine,
            sink,
            marketplace,
            run_id: Uuid::new_v4(),
        }
    }

    /// 执行一次运行
    ///
    /// # 参数
    ///
    /// * `params` - 本次运行的搜索参数
    ///
    /// # 返回值
    ///
    /// * `Ok(RunSummary)` - 运行摘要（零片段时各计数为零）
    /// * `Err(FetchError)` - 搜索页抓取失败，运行中止
    pub async fn run(&self, params: &RunParameters) -> Result<RunSummary, FetchError> {
        let search_url = url_utils::build_search_url(&self.marketplace.base_url, params)?;
        info!(
            run_id = %self.run_id,
            url = %search_url,
            engine = self.engine.name(),
            "Fetching search page"
        );

        let request = FetchRequest {
            url: search_url.to_string(),
            timeout: Duration::from_secs(self.marketplace.fetch_timeout),
        };
        let response = self.engine.fetch(&request).await?;
        if !response.is_success() {
            return Err(FetchError::Status(response.status_code));
        }
        info!(
            run_id = %self.run_id,
            status = response.status_code,
            response_time_ms = response.response_time_ms,
            "Search page fetched"
        );

        // Html is not Send, so extraction runs in one scoped pass before any await
        let candidates = {
            let document = Html::parse_document(&response.content);
            let extractor = ListingExtractor::new(search_url);
            ListingExtractor::fragments(&document)
                .map(|fragment| extractor.extract(fragment, &params.location))
                .collect::<Vec<_>>()
        };

        if candidates.is_empty() {
            // An empty result page is a legitimate outcome, not an error
            info!(run_id = %self.run_id, "No listing fragments found");
            return Ok(RunSummary::default());
        }

        let mut summary = RunSummary::default();
        for candidate in candidates {
            let outcome = self.process(candidate).await;
            summary.record(&outcome);
        }

        info!(run_id = %self.run_id, %summary, "Run finished");
        Ok(summary)
    }

    /// 处理单个候选记录：校验后投递
    async fn process(&self, candidate: CandidateListing) -> DeliveryOutcome {
        let title = candidate.title.clone();
        match ValidationService::validate(candidate) {
            Err(reason) => {
                warn!(run_id = %self.run_id, %reason, "Listing rejected");
                DeliveryOutcome::rejected(title, reason)
            }
            Ok(listing) => match self.sink.create_listing(&listing).await {
                Ok(()) => DeliveryOutcome::delivered(listing.title),
                Err(e) => {
                    error!(run_id = %self.run_id, title = %listing.title, "Delivery failed: {}", e);
                    DeliveryOutcome::failed(listing.title, e)
                }
            },
        }
    }
}
