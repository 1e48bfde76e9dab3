use ratatui::{
    buffer::Buffer,
    style::{Modifier, Style},
};
use unicode_width::UnicodeWidthStr;

use super::{entrance_rise, Projection};
use crate::app::App;
use crate::page::content::{PORTFOLIO_CAPTION, WORKS};
use crate::page::Block;
use crate::theme::Theme;

const ARROW: &str = "↗";

pub struct PortfolioWidget;

impl PortfolioWidget {
    pub fn render(buf: &mut Buffer, projection: &Projection, app: &App) {
        let layout = app.page.layout();
        if !projection.is_visible(&layout.sections().portfolio) {
            return;
        }
        let theme = &app.theme;

        if let Some(rect) = layout.rect(Block::PortfolioHeading) {
            render_split_heading(buf, projection, app, Block::PortfolioHeading, rect, theme.fg, theme.bg);
            let caption = Style::default().fg(theme.faint).bg(theme.bg);
            let x = layout.viewport().width - 4.0 - PORTFOLIO_CAPTION.width() as f64;
            projection.put_str(buf, x, rect.y + 2.0, PORTFOLIO_CAPTION, caption);
        }

        for (i, work) in WORKS.iter().enumerate() {
            let block = Block::Card(i);
            let Some(rect) = layout.rect(block) else {
                continue;
            };
            let value = app.page.entrance(block).first().copied().unwrap_or(0.0);
            let shift = app.page.parallax(block) * rect.height;
            let card = rect.offset_y(shift + entrance_rise(value));
            let hovered = app.hovered() == Some(block);

            let border = if hovered { theme.fg } else { theme.dim };
            projection.outline(
                buf,
                &card,
                Style::default().fg(Theme::fade(border, theme.bg, value)).bg(theme.bg),
            );

            let index = Style::default()
                .fg(Theme::fade(theme.faint, theme.bg, value))
                .bg(theme.bg);
            projection.put_str(buf, card.x + 2.0, card.y + 2.0, &format!("{:02}", i + 1), index);

            let mut title = Style::default()
                .fg(Theme::fade(theme.fg, theme.bg, value))
                .bg(theme.bg)
                .add_modifier(Modifier::BOLD);
            if hovered {
                title = title.add_modifier(Modifier::UNDERLINED);
            }
            let category = Style::default()
                .fg(Theme::fade(theme.muted, theme.bg, value))
                .bg(theme.bg);
            projection.put_str(buf, card.x + 2.0, card.bottom() - 8.0, work.title, title);
            projection.put_str(buf, card.x + 2.0, card.bottom() - 5.0, work.category, category);

            let (dx, dy) = app.page.nudge_offset(block);
            let arrow = if hovered { title } else { category };
            projection.put_str(buf, card.right() - 5.0 + dx, card.bottom() - 8.0 + dy, ARROW, arrow);
        }
    }
}

/// Heading whose words rise in one after another
pub(super) fn render_split_heading(
    buf: &mut Buffer,
    projection: &Projection,
    app: &App,
    block: Block,
    rect: kinesis_core::Rect,
    fg: ratatui::style::Color,
    bg: ratatui::style::Color,
) {
    let words = block.split_words().unwrap_or_default();
    let values = app.page.entrance(block);
    let mut x = rect.x;
    for (word, value) in words.iter().zip(values) {
        let style = Style::default()
            .fg(Theme::fade(fg, bg, value))
            .bg(bg)
            .add_modifier(Modifier::BOLD);
        let text = word.to_uppercase();
        projection.put_str(buf, x, rect.y + entrance_rise(value), &text, style);
        x += text.width() as f64 + 1.0;
    }
}
