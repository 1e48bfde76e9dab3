use ratatui::{
    buffer::Buffer,
    style::{Modifier, Style},
};

use super::{entrance_rise, Projection};
use crate::app::App;
use crate::page::content::STATS;
use crate::page::Block;
use crate::theme::Theme;
use crate::PX_PER_ROW;

pub struct StatsWidget;

impl StatsWidget {
    pub fn render(buf: &mut Buffer, projection: &Projection, app: &App) {
        let layout = app.page.layout();
        if !projection.is_visible(&layout.sections().stats) {
            return;
        }
        let theme = &app.theme;
        let labels = app.page.counter_labels();

        for (i, stat) in STATS.iter().enumerate() {
            let Some(rect) = layout.rect(Block::Stat(i)) else {
                continue;
            };
            let value = app.page.entrance(Block::Stat(i)).first().copied().unwrap_or(0.0);
            let y = rect.y + entrance_rise(value);
            let number = labels.get(i).map(String::as_str).unwrap_or("");

            let big = Style::default()
                .fg(Theme::fade(theme.fg, theme.bg, value))
                .bg(theme.bg)
                .add_modifier(Modifier::BOLD);
            let small = Style::default()
                .fg(Theme::fade(theme.muted, theme.bg, value))
                .bg(theme.bg);

            projection.put_str(buf, rect.x + 2.0, y + 2.0, number, big);
            projection.put_str(buf, rect.x + 2.0, y + 8.0, &stat.label.to_uppercase(), small);
            if i > 0 {
                let rule = Style::default().fg(theme.rule).bg(theme.bg);
                let mut row_y = rect.y;
                while row_y < rect.bottom() {
                    projection.put_str(buf, rect.x, row_y, "│", rule);
                    row_y += PX_PER_ROW;
                }
            }
        }
    }
}
