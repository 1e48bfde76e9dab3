use ratatui::{
    buffer::Buffer,
    style::{Modifier, Style},
};

use super::{entrance_rise, letter_spaced, Projection};
use crate::app::App;
use crate::page::content::{HERO_KICKER, HERO_NAME, HERO_SUBTITLE};
use crate::page::Block;
use crate::theme::Theme;

/// Name letters close up once the hero has shrunk this far
const TIGHT_SCALE: f64 = 0.94;

pub struct HeroWidget;

impl HeroWidget {
    pub fn render(buf: &mut Buffer, projection: &Projection, app: &App) {
        let layout = app.page.layout();
        if !projection.is_visible(&layout.sections().hero) {
            return;
        }

        let theme = &app.theme;
        let hero = app.page.hero();
        let center_x = layout.viewport().width / 2.0;
        let gap = if hero.scale > TIGHT_SCALE { 1 } else { 0 };

        for block in [Block::HeroKicker, Block::HeroTitle, Block::HeroSubtitle] {
            let Some(rect) = layout.rect(block) else {
                continue;
            };
            let value = app.page.entrance(block).first().copied().unwrap_or(1.0);
            let opacity = hero.opacity * value;
            let y = rect.y + hero.y + entrance_rise(value);

            match block {
                Block::HeroKicker => {
                    let style = Style::default()
                        .fg(Theme::fade(theme.muted, theme.bg, opacity))
                        .bg(theme.bg);
                    projection.put_centered(buf, center_x, y, &letter_spaced(HERO_KICKER, 1), style);
                }
                Block::HeroTitle => {
                    let style = Style::default()
                        .fg(Theme::fade(theme.fg, theme.bg, opacity))
                        .bg(theme.bg)
                        .add_modifier(Modifier::BOLD);
                    let (first, last) = HERO_NAME;
                    projection.put_centered(buf, center_x, y + 1.0, &letter_spaced(first, gap), style);
                    projection.put_centered(buf, center_x, y + 5.0, &letter_spaced(last, gap), style);
                }
                _ => {
                    let style = Style::default()
                        .fg(Theme::fade(theme.faint, theme.bg, opacity))
                        .bg(theme.bg);
                    projection.put_centered(buf, center_x, y, HERO_SUBTITLE, style);
                }
            }
        }
    }
}
