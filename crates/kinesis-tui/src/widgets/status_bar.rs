use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let progress = (app.page.scroll_state().global_progress * 100.0).round() as u32;

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            let hover = app
                .hovered()
                .map(|block| format!(" | {:?}", block))
                .unwrap_or_default();
            format!(" KINESIS | {} | {:>3}%{}", app.current_section(), progress, hover)
        };

        let help_hint = " q:quit j/k:scroll gg/G:top/bottom r:replay ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg).bg(theme.card)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.card)),
            Span::styled(help_hint, Style::default().fg(theme.muted).bg(theme.card)),
        ]);

        let paragraph = Paragraph::new(line);
        frame.render_widget(paragraph, area);
    }
}
