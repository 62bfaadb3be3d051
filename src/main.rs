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

use anyhow::Context;
use clap::Parser;
use staycrawl::application::dto::run_request::RunRequestDto;
use staycrawl::application::use_cases::run_crawl::CrawlSession;
use staycrawl::config::settings::Settings;
use staycrawl::engines::reqwest_engine::ReqwestEngine;
use staycrawl::infrastructure::sink::http_sink::HttpListingSink;
use staycrawl::utils::telemetry;
use tracing::info;

/// 命令行参数
#[derive(Debug, Parser)]
#[command(name = "staycrawl", about = "Scrape marketplace listings into the storage sink")]
struct Cli {
    /// 搜索地点
    #[arg(long)]
    location: String,
    /// 入住日期 (YYYY-MM-DD)
    #[arg(long)]
    checkin: String,
    /// 退房日期 (YYYY-MM-DD)
    #[arg(long)]
    checkout: String,
    /// 入住人数
    #[arg(long)]
    guests: u32,
}

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并执行一次运行
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();

    // 2. Validate run arguments, before any network activity
    let cli = Cli::parse();
    let dto = RunRequestDto {
        location: cli.location,
        checkin: cli.checkin,
        checkout: cli.checkout,
        guests: cli.guests,
    };
    let params = dto.into_run_parameters()?;

    // 3. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 4. Initialize components
    let engine = Arc::new(ReqwestEngine);
    let sink = Arc::new(
        HttpListingSink::new(&settings.sink).context("Invalid sink base URL")?,
    );
    let session = CrawlSession::new(engine, sink, settings.marketplace);

    // 5. Run and report
    let summary = session.run(&params).await.context("Search page fetch failed")?;
    println!("{}", summary);

    Ok(())
}
