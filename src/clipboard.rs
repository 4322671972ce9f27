//! 剪贴板
//!
//! 结果卡片的复制操作通过 `ClipboardSink` 写入剪贴板，便于测试时替换

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Access(String),
}

/// 剪贴板写入接口
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// 系统剪贴板（arboard）
///
/// 每次写入时重新打开剪贴板，无图形环境时返回错误而不是在启动时失败
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Access(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::Access(e.to_string()))
    }
}
