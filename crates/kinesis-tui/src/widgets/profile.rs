use ratatui::{
    buffer::Buffer,
    style::{Modifier, Style},
};

use super::{entrance_rise, wrap, Projection};
use crate::app::App;
use crate::page::content::{PROFILE_BODY, PROFILE_HEADING};
use crate::page::Block;
use crate::theme::Theme;
use crate::PX_PER_ROW;

/// Portrait shading, light to dark
const SHADES: [char; 4] = ['░', '▒', '▓', '█'];

pub struct ProfileWidget;

impl ProfileWidget {
    pub fn render(buf: &mut Buffer, projection: &Projection, app: &App) {
        let layout = app.page.layout();
        if !projection.is_visible(&layout.sections().profile) {
            return;
        }
        let Some(rect) = layout.rect(Block::ProfileImage) else {
            return;
        };
        let theme = &app.theme;
        let reveal = app.page.entrance(Block::ProfileImage).first().copied().unwrap_or(0.0);
        let shift = app.page.parallax(Block::ProfileImage);

        // The portrait slides inside a fixed frame; the curtain wipes top-down
        let shade = Style::default().fg(theme.dim).bg(theme.bg);
        let mut row = 0.0;
        while row < rect.height {
            let local = row / rect.height;
            if local < reveal {
                let band = ((local + shift) * SHADES.len() as f64).floor();
                let index = (band.max(0.0) as usize).min(SHADES.len() - 1);
                let strip = kinesis_core::Rect::new(rect.x + 1.0, rect.y + row, rect.width - 2.0, PX_PER_ROW);
                projection.fill(buf, &strip, SHADES[index], shade);
            }
            row += PX_PER_ROW;
        }
        let border = if app.hovered() == Some(Block::ProfileImage) {
            theme.fg
        } else {
            theme.faint
        };
        projection.outline(buf, &rect, Style::default().fg(border).bg(theme.bg));

        let text_x = rect.right() + 6.0;
        let text_width = (layout.viewport().width - text_x - 4.0).max(8.0) as usize;
        let mut y = rect.y + 4.0 + entrance_rise(reveal);
        let heading = Style::default()
            .fg(Theme::fade(theme.fg, theme.bg, reveal))
            .bg(theme.bg)
            .add_modifier(Modifier::BOLD);
        for line in wrap(PROFILE_HEADING, text_width) {
            projection.put_str(buf, text_x, y, &line, heading);
            y += PX_PER_ROW;
        }
        y += PX_PER_ROW * 2.0;
        let body = Style::default()
            .fg(Theme::fade(theme.muted, theme.bg, reveal))
            .bg(theme.bg);
        for line in wrap(PROFILE_BODY, text_width) {
            projection.put_str(buf, text_x, y, &line, body);
            y += PX_PER_ROW;
        }
    }
}
