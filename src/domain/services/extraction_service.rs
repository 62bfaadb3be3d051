// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::domain::models::listing::CandidateListing;
use crate::utils::url_utils;

/// 房源片段选择器，匹配结果页中每个房源的标记区域
static FRAGMENT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div._8ssblpx").unwrap());
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("span._1whrsux9").unwrap());
static PRICE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("span._olc9rf0").unwrap());
static RATING_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("span._10fy1f8").unwrap());
static IMAGE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

/// 房源字段提取器
///
/// 对单个房源片段应用一组固定的结构选择器，每个字段取
/// 首个匹配的文本或属性值，图片取全部匹配。提取永不失败：
/// 字段缺失或不可用时降级为缺省，正确性约束全部交给校验器，
/// 提取本身保持纯机械、可针对固定标记独立测试。
pub struct ListingExtractor {
    /// 已抓取页面的URL，用于解析相对图片地址
    page_url: Url,
}

impl ListingExtractor {
    /// 创建新的字段提取器实例
    pub fn new(page_url: Url) -> Self {
        Self { page_url }
    }

    /// 按文档顺序返回页面中的所有房源片段
    pub fn fragments<'a>(document: &'a Html) -> impl Iterator<Item = ElementRef<'a>> {
        document.select(&FRAGMENT_SELECTOR)
    }

    /// 从单个片段提取候选记录
    ///
    /// `location` 来自运行参数，不从页面提取。
    pub fn extract(&self, fragment: ElementRef<'_>, location: &str) -> CandidateListing {
        CandidateListing {
            title: Self::first_text(fragment, &TITLE_SELECTOR),
            location: location.to_string(),
            price_per_night: Self::first_text(fragment, &PRICE_SELECTOR),
            rating: Self::first_text(fragment, &RATING_SELECTOR),
            image_urls: self.image_urls(fragment),
        }
    }

    fn first_text(fragment: ElementRef<'_>, selector: &Selector) -> Option<String> {
        fragment
            .select(selector)
            .next()
            .map(|e| {
                e.text()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .trim()
                    .to_string()
            })
            .filter(|text| !text.is_empty())
    }

    fn image_urls(&self, fragment: ElementRef<'_>) -> Vec<String> {
        fragment
            .select(&IMAGE_SELECTOR)
            .filter_map(|e| e.value().attr("src"))
            .filter(|src| !src.trim().is_empty())
            // 相对路径相对页面URL解析，解析失败的地址跳过
            .filter_map(|src| url_utils::resolve_url(&self.page_url, src).ok())
            .map(|url| url.to_string())
            .collect()
    }
}
