// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::models::listing::{CandidateListing, ValidatedListing};

/// 评分下限（市场的评分刻度）
const RATING_MIN: f64 = 0.0;
/// 评分上限
const RATING_MAX: f64 = 5.0;

/// 字段故障类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// 字段缺失
    Missing,
    /// 字段无法解析
    Unparsable,
    /// 数值超出允许范围
    OutOfRange,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultKind::Missing => write!(f, "missing"),
            FaultKind::Unparsable => write!(f, "unparsable"),
            FaultKind::OutOfRange => write!(f, "out of range"),
        }
    }
}

/// 单个字段的校验故障
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFault {
    /// 字段名
    pub field: &'static str,
    /// 故障类型
    pub kind: FaultKind,
}

impl fmt::Display for FieldFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.kind)
    }
}

/// 校验拒绝原因
///
/// 列出候选记录中全部未通过校验的字段及各自的故障类型。
/// 被拒绝的记录不会进入投递客户端。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid listing: {}", self.describe())]
pub struct RejectionReason {
    /// 未通过校验的字段列表
    pub faults: Vec<FieldFault>,
}

impl RejectionReason {
    /// 指定字段是否在故障列表中
    pub fn cites(&self, field: &str) -> bool {
        self.faults.iter().any(|fault| fault.field == field)
    }

    fn describe(&self) -> String {
        self.faults
            .iter()
            .map(FieldFault::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// 记录校验/规范化服务
///
/// 对候选记录执行必填与类型规则，产出可投递的已验证记录。
/// location 由运行参数提供而非页面提取，无需检查。
pub struct ValidationService;

impl ValidationService {
    /// 校验并规范化候选记录
    ///
    /// # 返回值
    ///
    /// * `Ok(ValidatedListing)` - 全部字段齐全且类型正确
    /// * `Err(RejectionReason)` - 列出所有未通过的字段
    pub fn validate(candidate: CandidateListing) -> Result<ValidatedListing, RejectionReason> {
        let mut faults = Vec::new();

        let title = match candidate.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => Some(t.to_string()),
            _ => {
                faults.push(FieldFault {
                    field: "title",
                    kind: FaultKind::Missing,
                });
                None
            }
        };

        let price_per_night = match candidate.price_per_night.as_deref() {
            None => {
                faults.push(FieldFault {
                    field: "price_per_night",
                    kind: FaultKind::Missing,
                });
                None
            }
            Some(raw) => match Self::parse_price(raw) {
                Ok(price) if price.is_sign_negative() => {
                    faults.push(FieldFault {
                        field: "price_per_night",
                        kind: FaultKind::OutOfRange,
                    });
                    None
                }
                Ok(price) => Some(price),
                Err(_) => {
                    faults.push(FieldFault {
                        field: "price_per_night",
                        kind: FaultKind::Unparsable,
                    });
                    None
                }
            },
        };

        let rating = match candidate.rating.as_deref() {
            None => {
                faults.push(FieldFault {
                    field: "rating",
                    kind: FaultKind::Missing,
                });
                None
            }
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(value) if !value.is_finite() => {
                    faults.push(FieldFault {
                        field: "rating",
                        kind: FaultKind::Unparsable,
                    });
                    None
                }
                // 边界值包含在内，超出范围的评分拒绝而非截断
                Ok(value) if !(RATING_MIN..=RATING_MAX).contains(&value) => {
                    faults.push(FieldFault {
                        field: "rating",
                        kind: FaultKind::OutOfRange,
                    });
                    None
                }
                Ok(value) => Some(value),
                Err(_) => {
                    faults.push(FieldFault {
                        field: "rating",
                        kind: FaultKind::Unparsable,
                    });
                    None
                }
            },
        };

        if candidate.image_urls.is_empty() {
            faults.push(FieldFault {
                field: "image_urls",
                kind: FaultKind::Missing,
            });
        }

        if !faults.is_empty() {
            return Err(RejectionReason { faults });
        }

        Ok(ValidatedListing {
            title: title.unwrap(),
            location: candidate.location,
            price_per_night: price_per_night.unwrap(),
            rating: rating.unwrap(),
            image_urls: candidate.image_urls,
        })
    }

    /// 解析价格文本
    ///
    /// 先剥离货币符号、千位分隔符和空白，再按定点数解析。
    /// 对自身规范化输出重复解析得到相同数值。
    pub fn parse_price(raw: &str) -> Result<Decimal, rust_decimal::Error> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();
        Decimal::from_str(&normalized)
    }
}
