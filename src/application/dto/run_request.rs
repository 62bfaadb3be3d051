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

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::domain::models::run::RunParameters;

/// 日期参数的解析格式
const DATE_FORMAT: &str = "%Y-%m-%d";

/// 运行请求数据传输对象
///
/// 封装调用方提交的一次抓取运行的搜索参数，
/// 校验通过后才转换为运行参数，早于任何网络活动
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct RunRequestDto {
    /// 搜索地点
    #[validate(length(min = 1, message = "Location cannot be empty"))]
    pub location: String,
    /// 入住日期 (YYYY-MM-DD)
    pub checkin: String,
    /// 退房日期 (YYYY-MM-DD)
    pub checkout: String,
    /// 入住人数
    #[validate(range(min = 1, message = "Guest count must be positive"))]
    pub guests: u32,
}

/// 运行请求校验错误
#[derive(Error, Debug)]
pub enum RunRequestError {
    #[error("Validation failed: {0}")]
    Invalid(#[from] validator::ValidationErrors),
    #[error("Invalid {field} date '{value}', expected YYYY-MM-DD")]
    BadDate { field: &'static str, value: String },
    #[error("Checkout date must be after checkin date")]
    DateOrder,
}

impl RunRequestDto {
    /// 校验并转换为运行参数
    pub fn into_run_parameters(self) -> Result<RunParameters, RunRequestError> {
        self.validate()?;

        let checkin = Self::parse_date("checkin", &self.checkin)?;
        let checkout = Self::parse_date("checkout", &self.checkout)?;
        if checkout <= checkin {
            return Err(RunRequestError::DateOrder);
        }

        Ok(RunParameters {
            location: self.location.trim().to_string(),
            checkin,
            checkout,
            guests: self.guests,
        })
    }

    fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, RunRequestError> {
        NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
            RunRequestError::BadDate {
                field,
                value: value.to_string(),
            }
        })
    }
}
