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

//! 端到端管线测试
//!
//! 用 wiremock 同时模拟市场站点与存储Sink，驱动完整的
//! 抓取-提取-校验-投递流程。

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use staycrawl::application::use_cases::run_crawl::CrawlSession;
use staycrawl::config::settings::{MarketplaceSettings, SinkSettings};
use staycrawl::domain::models::run::{RunParameters, RunSummary};
use staycrawl::engines::reqwest_engine::ReqwestEngine;
use staycrawl::engines::traits::FetchError;
use staycrawl::infrastructure::sink::http_sink::HttpListingSink;
use staycrawl::utils::retry_policy::RetryPolicy;

fn params() -> RunParameters {
    RunParameters {
        location: "Lisbon".to_string(),
        checkin: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        checkout: NaiveDate::from_ymd_opt(2026, 9, 5).unwrap(),
        guests: 2,
    }
}

fn fragment(title: Option<&str>, price: &str, rating: &str) -> String {
    let title_span = title
        .map(|t| format!(r#"<span class="_1whrsux9">{}</span>"#, t))
        .unwrap_or_default();
    format!(
        r#"<div class="_8ssblpx">
            {}
            <span class="_olc9rf0">{}</span>
            <span class="_10fy1f8">{}</span>
            <img src="https://img.example.com/a.jpg">
        </div>"#,
        title_span, price, rating
    )
}

fn page(fragments: &[String]) -> String {
    format!("<html><body>{}</body></html>", fragments.concat())
}

/// 无抖动、短退避的测试重试策略
fn test_retry_policy() -> RetryPolicy {
    RetryPolicy {
        max_retries: 2,
        initial_backoff: Duration::from_millis(10),
        max_backoff: Duration::from_millis(100),
        backoff_multiplier: 2.0,
        jitter_factor: 0.0,
        exponential_backoff: true,
        enable_jitter: false,
    }
}

fn session(
    marketplace: &MockServer,
    sink: &MockServer,
    sink_timeout: u64,
) -> CrawlSession<ReqwestEngine, HttpListingSink> {
    let sink_settings = SinkSettings {
        base_url: sink.uri(),
        timeout: sink_timeout,
        max_retries: 2,
    };
    let sink = HttpListingSink::new(&sink_settings)
        .unwrap()
        .with_retry_policy(test_retry_policy());
    CrawlSession::new(
        Arc::new(ReqwestEngine),
        Arc::new(sink),
        MarketplaceSettings {
            base_url: marketplace.uri(),
            fetch_timeout: 5,
        },
    )
}

async fn mount_search_page(marketplace: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/s/Lisbon/homes"))
        .and(query_param("checkin", "2026-09-01"))
        .and(query_param("checkout", "2026-09-05"))
        .and(query_param("adults", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(marketplace)
        .await;
}

#[tokio::test]
async fn test_well_formed_listings_are_delivered() {
    let marketplace = MockServer::start().await;
    let sink = MockServer::start().await;

    let body = page(&[
        fragment(Some("Alfama loft"), "$120", "4.8"),
        fragment(Some("Belém studio"), "$1,200", "5.0"),
    ]);
    mount_search_page(&marketplace, body).await;

    Mock::given(method("POST"))
        .and(path("/api/add_listing"))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&sink)
        .await;

    let summary = session(&marketplace, &sink, 5).run(&params()).await.unwrap();
    assert_eq!(
        summary,
        RunSummary {
            attempted: 2,
            delivered: 2,
            rejected: 0,
            failed: 0,
        }
    );
}

#[tokio::test]
async fn test_delivery_payload_shape() {
    let marketplace = MockServer::start().await;
    let sink = MockServer::start().await;

    mount_search_page(&marketplace, page(&[fragment(Some("Alfama loft"), "$1,200", "4.8")])).await;

    // Price arrives normalized, rating under the sink's "ratings" key
    Mock::given(method("POST"))
        .and(path("/api/add_listing"))
        .and(body_partial_json(json!({
            "title": "Alfama loft",
            "location": "Lisbon",
            "price_per_night": "1200",
            "ratings": 4.8,
            "image_urls": ["https://img.example.com/a.jpg"],
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&sink)
        .await;

    let summary = session(&marketplace, &sink, 5).run(&params()).await.unwrap();
    assert_eq!(summary.delivered, 1);
}

#[tokio::test]
async fn test_zero_fragments_returns_zero_summary() {
    let marketplace = MockServer::start().await;
    let sink = MockServer::start().await;

    mount_search_page(&marketplace, "<html><body><p>No results</p></body></html>".to_string())
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&sink)
        .await;

    let summary = session(&marketplace, &sink, 5).run(&params()).await.unwrap();
    assert_eq!(summary, RunSummary::default());
}

#[tokio::test]
async fn test_failed_fetch_aborts_without_delivery() {
    let marketplace = MockServer::start().await;
    let sink = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&marketplace)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&sink)
        .await;

    let result = session(&marketplace, &sink, 5).run(&params()).await;
    assert!(matches!(result, Err(FetchError::Status(500))));
}

#[tokio::test]
async fn test_sink_rejection_is_not_retried() {
    let marketplace = MockServer::start().await;
    let sink = MockServer::start().await;

    mount_search_page(&marketplace, page(&[fragment(Some("Alfama loft"), "$120", "4.8")])).await;

    // A 4xx means the sink already judged the payload; exactly one attempt
    Mock::given(method("POST"))
        .and(path("/api/add_listing"))
        .respond_with(ResponseTemplate::new(400).set_body_string("duplicate listing"))
        .expect(1)
        .mount(&sink)
        .await;

    let summary = session(&marketplace, &sink, 5).run(&params()).await.unwrap();
    assert_eq!(
        summary,
        RunSummary {
            attempted: 1,
            delivered: 0,
            rejected: 0,
            failed: 1,
        }
    );
}

#[tokio::test]
async fn test_partial_failures_yield_mixed_summary() {
    let marketplace = MockServer::start().await;
    let sink = MockServer::start().await;

    // Fragment 3 misses its title; fragment 4's delivery times out at the
    // transport level and exhausts its retries
    let body = page(&[
        fragment(Some("One"), "$100", "4.5"),
        fragment(Some("Two"), "$200", "4.6"),
        fragment(None, "$300", "4.7"),
        fragment(Some("Four"), "$400", "4.8"),
        fragment(Some("Five"), "$500", "4.9"),
    ]);
    mount_search_page(&marketplace, body).await;

    for title in ["One", "Two", "Five"] {
        Mock::given(method("POST"))
            .and(path("/api/add_listing"))
            .and(body_partial_json(json!({ "title": title })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&sink)
            .await;
    }

    // Initial attempt plus two retries for the timed-out delivery
    Mock::given(method("POST"))
        .and(path("/api/add_listing"))
        .and(body_partial_json(json!({ "title": "Four" })))
        .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_secs(3)))
        .expect(3)
        .mount(&sink)
        .await;

    let summary = session(&marketplace, &sink, 1).run(&params()).await.unwrap();
    assert_eq!(
        summary,
        RunSummary {
            attempted: 5,
            delivered: 3,
            rejected: 1,
            failed: 1,
        }
    );
}
