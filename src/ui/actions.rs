//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,

    // 换算
    Convert, // Enter
    Clear,   // Esc
    CopyResult,

    // 状态栏
    ToggleStatusBar,
    CycleStatusBarStyle,

    // 金额输入
    Input(char),
    DeleteChar, // Backspace
}
