//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use std::io;

use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::App;

/// 金额输入框接受的字符
fn is_amount_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | 'e' | 'E')
}

/// 根据按键获取对应的 Action
pub fn get_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Enter => Some(Action::Convert),
        KeyCode::Esc => Some(Action::Clear),
        KeyCode::Char('y') => Some(Action::CopyResult),
        KeyCode::Char('s') => Some(Action::ToggleStatusBar),
        KeyCode::Char('t') => Some(Action::CycleStatusBarStyle),
        KeyCode::Backspace => Some(Action::DeleteChar),
        KeyCode::Char(c) if is_amount_char(c) => Some(Action::Input(c)),
        _ => None,
    }
}

/// 处理按键事件，返回 true 表示退出
pub fn handle_key_event(app: &mut App, key: KeyCode) -> io::Result<bool> {
    if let Some(action) = get_action(key) {
        Ok(app.dispatch(action))
    } else {
        Ok(false)
    }
}
