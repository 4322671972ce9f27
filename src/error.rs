//! 错误类型

use rust_decimal::Decimal;
use thiserror::Error;

/// 汇率/换算错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExchangeError {
    /// 金额为负数
    #[error("amount cannot be negative: {0}")]
    InvalidAmount(Decimal),

    #[error("exchange rate must be positive, got {0}")]
    NonPositiveRate(Decimal),

    #[error("conversion result is out of range")]
    Overflow,

    /// 输入是合法数字，但超出 Decimal 可表示的范围
    #[error("amount is out of range: {0}")]
    OutOfRange(String),
}

/// 配置文件错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid exchange rate in config: {0}")]
    Rate(#[from] ExchangeError),

    #[error("invalid status bar color: {0:?}")]
    InvalidColor(String),

    #[error("display.decimals must be at most 8, got {0}")]
    Decimals(u32),
}
