//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::state::App;
use crate::config::{StatusBarConfig, StatusBarStyle};
use crate::error::ExchangeError;
use components::{ResultCard, render_input_widget, render_result_card};

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let status_height = if app.status_bar.visible { 1 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // 标题
            Constraint::Length(3),             // 金额输入
            Constraint::Length(7),             // 结果
            Constraint::Min(0),                // 留白
            Constraint::Length(3),             // 帮助
            Constraint::Length(status_height), // 状态栏
        ])
        .split(frame.area());

    render_title(frame, app, chunks[0]);
    render_amount_input(frame, app, chunks[1]);
    render_result(frame, app, chunks[2]);
    render_help(frame, app, chunks[4]);

    if app.status_bar.visible {
        render_status_bar(frame, app, chunks[5]);
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let title = Paragraph::new(format!("💱 {} → {} 汇率换算", app.source, app.target))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_amount_input(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!("金额 ({})", app.source);
    render_input_widget(
        frame,
        area,
        &title,
        &app.input_buffer,
        "0",
        Color::Yellow,
    );
}

fn render_result(frame: &mut Frame, app: &App, area: Rect) {
    let label = format!("结果 ({})", app.target);

    if let Some(conversion) = &app.result {
        let card = ResultCard {
            label: &label,
            source: &app.source,
            target: &app.target,
            decimals: app.decimals,
        };
        render_result_card(frame, area, &card, conversion);
        return;
    }

    let (text, style) = match &app.error {
        Some(ExchangeError::InvalidAmount(_)) => (
            "金额不能为负数".to_string(),
            Style::default().fg(Color::Red),
        ),
        Some(ExchangeError::OutOfRange(_)) => (
            "金额超出范围".to_string(),
            Style::default().fg(Color::Red),
        ),
        Some(e) => (format!("换算失败: {}", e), Style::default().fg(Color::Red)),
        None => (
            "输入金额后按 [Enter] 换算".to_string(),
            Style::default().fg(Color::Gray),
        ),
    };

    let widget = Paragraph::new(text)
        .style(style)
        .block(Block::default().title(label).borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = "[Enter] 换算  [Esc] 清除  [y] 复制  [s] 状态栏  [t] 样式  [q] 退出";

    let message = app.message.as_deref().unwrap_or("");
    let text = if message.is_empty() {
        help_text.to_string()
    } else {
        format!("{}  |  {}", help_text, message)
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

/// 状态栏颜色：配置的背景色优先于样式自带的背景色
pub fn status_bar_style(config: &StatusBarConfig) -> Style {
    let (fg, bg) = match config.style {
        StatusBarStyle::Default => (Color::Gray, Color::Reset),
        StatusBarStyle::Dark => (Color::White, Color::Black),
        StatusBarStyle::Light => (Color::Black, Color::White),
    };
    Style::default().fg(fg).bg(config.background.unwrap_or(bg))
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let text = format!(
        " 1 {} = {} {}  |  {}",
        app.target,
        app.exchange.rate().value(),
        app.source,
        app.status_bar.style.label()
    );
    let bar = Paragraph::new(text).style(status_bar_style(&app.status_bar));
    frame.render_widget(bar, area);
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    use super::*;
    use crate::ui::actions::Action;

    fn render_to_buffer(app: &mut App) -> Buffer {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn render_to_string(app: &mut App) -> String {
        render_to_buffer(app)
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    /// 按行拼接，宽字符的占位格被跳过
    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .filter(|symbol| !symbol.trim().is_empty())
            .collect()
    }

    #[test]
    fn test_render_result() {
        let mut app = App::default();
        app.dispatch(Action::Input('8'));
        app.dispatch(Action::Input('0'));
        app.dispatch(Action::Convert);

        let screen = render_to_string(&mut app);
        assert!(screen.contains("10.00 USD"));
        assert!(screen.contains("80 GTQ"));
    }

    #[test]
    fn test_render_negative_amount_error() {
        let mut app = App::default();
        for c in "-5".chars() {
            app.dispatch(Action::Input(c));
        }
        app.dispatch(Action::Convert);

        let buffer = render_to_buffer(&mut app);
        let screen: Vec<String> = (0..buffer.area.height)
            .map(|y| row_text(&buffer, y))
            .collect();

        let error_row = screen
            .iter()
            .position(|line| line.contains("金额不能为负数"))
            .expect("error line rendered");
        let x = (0..buffer.area.width)
            .find(|&x| buffer[(x, error_row as u16)].symbol() == "金")
            .unwrap();
        assert_eq!(buffer[(x, error_row as u16)].fg, Color::Red);

        assert!(!screen.iter().any(|line| line.contains("USD") && line.contains("0.")));
        assert!(!screen.iter().any(|line| line.contains("汇率:") || line.contains("换算于")));
    }

    #[test]
    fn test_render_out_of_range_error() {
        let mut app = App::default();
        for c in "1e30".chars() {
            app.dispatch(Action::Input(c));
        }
        app.dispatch(Action::Convert);

        let buffer = render_to_buffer(&mut app);
        let screen: String = (0..buffer.area.height)
            .map(|y| row_text(&buffer, y))
            .collect();
        assert!(screen.contains("金额超出范围"));
        assert!(!screen.contains("0.00USD"));
    }

    #[test]
    fn test_render_hides_status_bar() {
        let mut app = App::default();
        assert!(render_to_string(&mut app).contains("default"));

        app.dispatch(Action::ToggleStatusBar);
        assert!(!render_to_string(&mut app).contains("default"));
    }

    #[test]
    fn test_status_bar_background_override() {
        let mut config = StatusBarConfig {
            style: StatusBarStyle::Dark,
            visible: true,
            background: None,
        };
        assert_eq!(status_bar_style(&config).bg, Some(Color::Black));

        config.background = Some(Color::Blue);
        assert_eq!(status_bar_style(&config).bg, Some(Color::Blue));
    }
}
