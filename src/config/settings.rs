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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含市场站点和存储Sink两部分配置
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 市场站点配置
    pub marketplace: MarketplaceSettings,
    /// 存储Sink配置
    pub sink: SinkSettings,
}

/// 市场站点配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MarketplaceSettings {
    /// 搜索页所在站点的基础URL
    pub base_url: String,
    /// 搜索页抓取超时时间（秒）
    pub fetch_timeout: u64,
}

/// 存储Sink配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SinkSettings {
    /// Sink服务的基础URL
    pub base_url: String,
    /// 单次投递请求超时时间（秒）
    pub timeout: u64,
    /// 传输失败时的最大重试次数
    pub max_retries: u32,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Default marketplace settings
            .set_default("marketplace.base_url", "https://www.airbnb.com")?
            .set_default("marketplace.fetch_timeout", 30)?
            // Default sink settings
            .set_default("sink.base_url", "http://localhost:8000")?
            .set_default("sink.timeout", 10)?
            .set_default("sink.max_retries", 2)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("STAYCRAWL").separator("__"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::new().unwrap();
        assert_eq!(settings.marketplace.base_url, "https://www.airbnb.com");
        assert_eq!(settings.marketplace.fetch_timeout, 30);
        assert_eq!(settings.sink.base_url, "http://localhost:8000");
        assert_eq!(settings.sink.max_retries, 2);
    }
}
