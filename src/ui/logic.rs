//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑和各种处理方法

use log::{debug, error, warn};
use rust_decimal::Decimal;

use super::actions::Action;
use super::state::App;
use crate::exchange::parse_amount;

impl App {
    /// 核心逻辑分发
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::Convert => self.convert(),
            Action::Clear => self.clear(),
            Action::CopyResult => self.copy_result(),
            Action::ToggleStatusBar => self.toggle_status_bar(),
            Action::CycleStatusBarStyle => self.cycle_status_bar_style(),
            Action::Input(c) => {
                self.input_buffer.push(c);
                self.on_amount_change();
            }
            Action::DeleteChar => {
                self.input_buffer.pop();
                self.on_amount_change();
            }
        }
        false
    }

    // ============ 换算相关 ============

    /// 输入框内容变化后重新解析金额
    pub fn on_amount_change(&mut self) {
        self.amount = parse_amount(&self.input_buffer);
    }

    /// 用当前金额换算，失败时清空结果并显示错误
    pub fn convert(&mut self) {
        let conversion = self
            .amount
            .clone()
            .and_then(|amount| self.exchange.conversion(amount));

        match conversion {
            Ok(conversion) => {
                debug!(
                    "converted {} {} -> {} {}",
                    conversion.amount, self.source, conversion.result, self.target
                );
                self.result = Some(conversion);
                self.error = None;
                self.message = None;
            }
            Err(e) => {
                warn!("error converting currency: {}", e);
                self.result = None;
                self.error = Some(e);
                self.message = None;
            }
        }
    }

    /// 金额归零、结果清空
    pub fn clear(&mut self) {
        self.input_buffer.clear();
        self.amount = Ok(Decimal::ZERO);
        self.result = None;
        self.error = None;
        self.message = None;
    }

    /// 复制结果到剪贴板，失败只记录日志
    pub fn copy_result(&mut self) {
        let Some(text) = self.formatted_result() else {
            self.message = Some("暂无结果可复制".to_string());
            return;
        };

        match self.clipboard.set_text(&text) {
            Ok(()) => self.message = Some(format!("已复制 {}", text)),
            Err(e) => {
                error!("error copying result to clipboard: {}", e);
                self.message = Some("复制失败".to_string());
            }
        }
    }

    // ============ 状态栏相关 ============

    pub fn toggle_status_bar(&mut self) {
        self.status_bar.visible = !self.status_bar.visible;
    }

    pub fn cycle_status_bar_style(&mut self) {
        self.status_bar.style = self.status_bar.style.next();
    }
}
