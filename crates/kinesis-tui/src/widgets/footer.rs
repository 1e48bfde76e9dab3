use ratatui::{
    buffer::Buffer,
    style::{Modifier, Style},
};

use super::{entrance_rise, letter_spaced, Projection};
use crate::app::App;
use crate::page::content::{COPYRIGHT, FOOTER_KICKER, FOOTER_LINKS};
use crate::page::Block;
use crate::theme::Theme;

pub struct FooterWidget;

impl FooterWidget {
    pub fn render(buf: &mut Buffer, projection: &Projection, app: &App) {
        let layout = app.page.layout();
        let section = layout.sections().footer;
        if !projection.is_visible(&section) {
            return;
        }
        let theme = &app.theme;
        let center_x = layout.viewport().width / 2.0;

        let kicker = Style::default().fg(theme.muted).bg(theme.bg);
        projection.put_centered(buf, center_x, section.y + 4.0, &letter_spaced(FOOTER_KICKER, 1), kicker);

        if let Some(rect) = layout.rect(Block::FooterTitle) {
            let value = app.page.entrance(Block::FooterTitle).first().copied().unwrap_or(0.0);
            let style = Style::default()
                .fg(Theme::fade(theme.fg, theme.bg, value))
                .bg(theme.bg)
                .add_modifier(Modifier::BOLD);
            let title = letter_spaced(&app.page.scramble_text(), 1);
            projection.put_centered(buf, center_x, rect.y + 8.0 + entrance_rise(value), &title, style);
        }

        for (i, label) in FOOTER_LINKS.iter().enumerate() {
            let block = Block::FooterLink(i);
            let Some(rect) = layout.rect(block) else {
                continue;
            };
            let value = app.page.entrance(block).first().copied().unwrap_or(0.0);
            let (dx, dy) = app.page.magnetic_offset(block);
            let mut style = Style::default()
                .fg(Theme::fade(theme.muted, theme.bg, value))
                .bg(theme.bg);
            if app.hovered() == Some(block) {
                style = style.fg(theme.fg).add_modifier(Modifier::UNDERLINED);
            }
            projection.put_str(
                buf,
                rect.x + 2.0 + dx,
                rect.y + dy + entrance_rise(value),
                label,
                style,
            );
        }

        let copyright = Style::default().fg(theme.dim).bg(theme.bg);
        projection.put_centered(buf, center_x, section.bottom() - 6.0, COPYRIGHT, copyright);
    }
}
