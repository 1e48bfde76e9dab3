use ratatui::{buffer::Buffer, style::Style};
use unicode_width::UnicodeWidthStr;

use super::portfolio::render_split_heading;
use super::{entrance_rise, Projection};
use crate::app::App;
use crate::page::content::{INSTAGRAM_BUTTON, PRODUCTION_CAPTION};
use crate::page::Block;
use crate::theme::Theme;

pub struct ProductionWidget;

impl ProductionWidget {
    pub fn render(buf: &mut Buffer, projection: &Projection, app: &App) {
        let layout = app.page.layout();
        let section = layout.sections().production;
        if !projection.is_visible(&section) {
            return;
        }
        let theme = &app.theme;
        projection.fill(buf, &section, ' ', Style::default().bg(theme.light_bg));

        if let Some(rect) = layout.rect(Block::ProductionHeading) {
            render_split_heading(
                buf,
                projection,
                app,
                Block::ProductionHeading,
                rect,
                theme.light_fg,
                theme.light_bg,
            );
            let caption = Style::default().fg(theme.light_muted).bg(theme.light_bg);
            projection.put_str(buf, rect.x, rect.y + 4.0, PRODUCTION_CAPTION, caption);
        }

        if let Some(rect) = layout.rect(Block::InstagramButton) {
            let value = app
                .page
                .entrance(Block::InstagramButton)
                .first()
                .copied()
                .unwrap_or(0.0);
            let (dx, dy) = app.page.magnetic_offset(Block::InstagramButton);
            let button = kinesis_core::Rect::new(
                rect.x + dx,
                rect.y + dy + entrance_rise(value),
                rect.width,
                rect.height,
            );
            let ink = Theme::fade(theme.light_fg, theme.light_bg, value);
            let style = if app.hovered() == Some(Block::InstagramButton) {
                projection.fill(buf, &button, ' ', Style::default().bg(ink));
                Style::default().fg(theme.light_bg).bg(ink)
            } else {
                projection.outline(buf, &button, Style::default().fg(ink).bg(theme.light_bg));
                Style::default().fg(ink).bg(theme.light_bg)
            };
            let label_x = button.center().x - INSTAGRAM_BUTTON.width() as f64 / 2.0;
            projection.put_str(buf, label_x, button.center().y, INSTAGRAM_BUTTON, style);
        }

        for i in 0..4 {
            let block = Block::Thumb(i);
            let Some(rect) = layout.rect(block) else {
                continue;
            };
            let value = app.page.entrance(block).first().copied().unwrap_or(0.0);
            let thumb = rect.offset_y(entrance_rise(value));
            let fill = Theme::fade(theme.light_card, theme.light_bg, value);
            projection.fill(buf, &thumb, ' ', Style::default().bg(fill));
            let border = if app.hovered() == Some(block) {
                theme.light_fg
            } else {
                theme.light_muted
            };
            projection.outline(
                buf,
                &thumb,
                Style::default().fg(Theme::fade(border, theme.light_bg, value)).bg(fill),
            );
            let label = Style::default().fg(theme.light_muted).bg(fill);
            projection.put_str(buf, thumb.x + 2.0, thumb.y + 2.0, &format!("STUDY {:02}", i + 1), label);
        }
    }
}
