// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

use crate::domain::models::run::RunParameters;

/// 根据运行参数构建搜索页URL
///
/// 路径格式为 `/s/{location}/homes`，location 会进行百分号编码；
/// 入住、退房日期和成人数作为查询参数附加。
pub fn build_search_url(base: &str, params: &RunParameters) -> Result<Url, ParseError> {
    let full = format!(
        "{}/s/{}/homes",
        base.trim_end_matches('/'),
        urlencoding::encode(&params.location)
    );
    let mut url = Url::parse(&full)?;
    url.query_pairs_mut()
        .append_pair("checkin", &params.checkin.to_string())
        .append_pair("checkout", &params.checkout.to_string())
        .append_pair("adults", &params.guests.to_string());
    Ok(url)
}

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}
