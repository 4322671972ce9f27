use std::str::FromStr;

use chrono::{DateTime, Local};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::ExchangeError;

/// 默认汇率：8 GTQ = 1 USD
pub const DEFAULT_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// 汇率（每 1 单位目标货币对应的源货币数量），恒为正
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeRate(Decimal);

impl ExchangeRate {
    pub fn new(rate: Decimal) -> Result<Self, ExchangeError> {
        if rate <= Decimal::ZERO {
            return Err(ExchangeError::NonPositiveRate(rate));
        }
        Ok(Self(rate))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self(DEFAULT_RATE)
    }
}

/// 汇率来源
pub trait RateProvider {
    fn rate(&self) -> ExchangeRate;
}

/// 启动时注入、运行期不可变的固定汇率
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedRate {
    rate: ExchangeRate,
}

impl FixedRate {
    pub fn new(rate: ExchangeRate) -> Self {
        Self { rate }
    }
}

impl RateProvider for FixedRate {
    fn rate(&self) -> ExchangeRate {
        self.rate
    }
}

/// 一次成功的换算记录（用于结果卡片）
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: Decimal,
    pub result: Decimal,
    pub rate: ExchangeRate,
    pub converted_at: DateTime<Local>,
}

/// 换算器
#[derive(Debug, Clone, Default)]
pub struct Exchange<P = FixedRate> {
    provider: P,
}

impl<P: RateProvider> Exchange<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn rate(&self) -> ExchangeRate {
        self.provider.rate()
    }

    /// 源货币金额 / 汇率，不做舍入
    pub fn convert(&self, amount: Decimal) -> Result<Decimal, ExchangeError> {
        if amount < Decimal::ZERO {
            return Err(ExchangeError::InvalidAmount(amount));
        }
        amount
            .checked_div(self.rate().value())
            .ok_or(ExchangeError::Overflow)
    }

    /// 换算并记录汇率与时间
    pub fn conversion(&self, amount: Decimal) -> Result<Conversion, ExchangeError> {
        let result = self.convert(amount)?;
        Ok(Conversion {
            amount,
            result,
            rate: self.rate(),
            converted_at: Local::now(),
        })
    }
}

fn normalize_decimal_string(s: &str) -> String {
    s.trim().replace(',', ".")
}

/// 将输入框文本转换为金额
///
/// 无法解析的文本（空串、NaN、Infinity 等）视为 0；
/// 能解析为有限数字但超出 Decimal 范围时返回 `OutOfRange`
pub fn parse_amount(input: &str) -> Result<Decimal, ExchangeError> {
    let normalized = normalize_decimal_string(input);
    let parsed = match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => return Ok(Decimal::ZERO),
    };
    let negative = parsed < 0.0;

    match Decimal::from_str(&normalized).or_else(|_| Decimal::from_scientific(&normalized)) {
        // 负数下溢为 0 时不能丢掉符号
        Ok(value) if value.is_zero() && negative => Err(ExchangeError::OutOfRange(normalized)),
        // "-0" 之类的输入统一为正零
        Ok(value) if value.is_zero() => Ok(Decimal::ZERO),
        Ok(value) => Ok(value),
        // 正数下溢（如 1e-40）在精度内等于 0
        Err(_) if !negative && parsed < 1.0 => Ok(Decimal::ZERO),
        Err(_) => Err(ExchangeError::OutOfRange(normalized)),
    }
}

/// 按银行家舍入保留 `decimals` 位小数并补零
pub fn format_amount(value: Decimal, decimals: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointNearestEven);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    format!("{:.*}", decimals as usize, rounded)
}
