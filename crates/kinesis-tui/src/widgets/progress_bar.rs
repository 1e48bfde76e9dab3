use ratatui::{buffer::Buffer, layout::Rect, style::Style};

use crate::app::App;

/// Thin bar along the top edge, scaled by the sprung scroll progress
pub struct ProgressBarWidget;

impl ProgressBarWidget {
    pub fn render(buf: &mut Buffer, area: Rect, app: &App) {
        if area.height == 0 {
            return;
        }
        let scale = app.page.progress_bar().clamp(0.0, 1.0);
        let filled = (area.width as f64 * scale).round() as u16;
        let style = Style::default().fg(app.theme.fg);
        for x in area.x..area.x + filled.min(area.width) {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char('▔').set_style(style);
            }
        }
    }
}
