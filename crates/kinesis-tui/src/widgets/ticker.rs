use ratatui::{buffer::Buffer, style::Style};

use super::Projection;
use crate::app::App;

pub struct TickerWidget;

impl TickerWidget {
    pub fn render(buf: &mut Buffer, projection: &Projection, app: &App) {
        let layout = app.page.layout();
        let sections = layout.sections();
        let theme = &app.theme;
        let offsets = app.page.ticker_offsets();
        let width = layout.viewport().width;

        for (index, band) in [sections.lead_ticker, sections.trail_ticker].iter().enumerate() {
            if !projection.is_visible(band) {
                continue;
            }
            // Lead band is inverted, trail band sits on the page
            let style = if index == 0 {
                Style::default().fg(theme.bg).bg(theme.fg)
            } else {
                Style::default().fg(theme.muted).bg(theme.rule)
            };
            projection.fill(buf, band, ' ', style);

            let Some(pass_width) = app.page.ticker_width(index) else {
                continue;
            };
            let strip = app.page.ticker_strip(index);
            let offset = offsets.get(index).copied().unwrap_or(0.0);
            // Forward offsets run (-w, 0], reverse ones [0, w)
            let mut x = if offset <= 0.0 { offset } else { offset - pass_width };
            let y = band.y + band.height / 2.0;
            // The strip holds two passes; repeat it for viewports wider than that
            while x < width {
                projection.put_str(buf, x, y, &strip, style);
                x += pass_width * 2.0;
            }
        }
    }
}
