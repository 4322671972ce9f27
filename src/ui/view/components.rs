//! 通用 UI 组件
//!
//! 输入框、结果卡片

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::exchange::{Conversion, format_amount};

/// [组件] 带有标题和样式的输入框
pub fn render_input_widget(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    placeholder: &str,
    active_color: Color,
) {
    let (text, style) = if value.is_empty() {
        (placeholder, Style::default().fg(Color::DarkGray))
    } else {
        (
            value,
            Style::default()
                .fg(active_color)
                .add_modifier(Modifier::BOLD),
        )
    };

    let input = Paragraph::new(text)
        .style(style)
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(input, area);
}

/// 结果卡片所需的显示参数
pub struct ResultCard<'a> {
    pub label: &'a str,
    pub source: &'a str,
    pub target: &'a str,
    pub decimals: u32,
}

/// [组件] 换算结果卡片
pub fn render_result_card(
    frame: &mut Frame,
    area: Rect,
    card: &ResultCard,
    conversion: &Conversion,
) {
    let lines = vec![
        Line::from(Span::styled(
            format!(
                "{} {}",
                format_amount(conversion.result, card.decimals),
                card.target
            ),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{} {} → {}",
            conversion.amount, card.source, card.target
        )),
        Line::from(format!(
            "汇率: 1 {} = {} {}",
            card.target,
            conversion.rate.value(),
            card.source
        )),
        Line::from(Span::styled(
            format!("换算于 {}", conversion.converted_at.format("%H:%M:%S")),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled("[y] 复制", Style::default().fg(Color::Cyan))),
    ];

    let widget = Paragraph::new(lines)
        .block(Block::default().title(card.label).borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}
