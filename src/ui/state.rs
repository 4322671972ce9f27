//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关类型

use rust_decimal::Decimal;

use crate::clipboard::{ClipboardSink, SystemClipboard};
use crate::config::{Config, StatusBarConfig};
use crate::error::ExchangeError;
use crate::exchange::{Conversion, Exchange, FixedRate, format_amount};

/// 应用状态
pub struct App {
    pub exchange: Exchange<FixedRate>,
    pub source: String,
    pub target: String,
    pub decimals: u32,
    pub input_buffer: String,
    /// 输入框解析出的金额，超出范围时为错误
    pub amount: Result<Decimal, ExchangeError>,
    pub result: Option<Conversion>,
    pub error: Option<ExchangeError>,
    pub message: Option<String>,
    pub status_bar: StatusBarConfig,
    pub clipboard: Box<dyn ClipboardSink>,
}

impl App {
    /// 创建新的应用实例
    pub fn new(config: Config, clipboard: Box<dyn ClipboardSink>) -> Self {
        Self {
            exchange: Exchange::new(FixedRate::new(config.rate)),
            source: config.source,
            target: config.target,
            decimals: config.decimals,
            input_buffer: String::new(),
            amount: Ok(Decimal::ZERO),
            result: None,
            error: None,
            message: None,
            status_bar: config.status_bar,
            clipboard,
        }
    }

    /// 当前结果的显示文本
    pub fn formatted_result(&self) -> Option<String> {
        self.result
            .as_ref()
            .map(|conversion| format_amount(conversion.result, self.decimals))
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default(), Box::new(SystemClipboard))
    }
}
