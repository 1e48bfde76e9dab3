use kinesis_core::cursor::{BlendMode, CursorFrame, Shade};
use ratatui::{buffer::Buffer, style::Modifier};

use super::Projection;
use crate::app::App;
use crate::theme::Theme;
use crate::{CURSOR_SCALE, PX_PER_ROW};

/// Pointer disc drawn over everything else
pub struct CursorWidget;

impl CursorWidget {
    pub fn render(buf: &mut Buffer, projection: &Projection, app: &App) {
        let Some(frame) = app.page.cursor() else {
            return;
        };
        Self::draw(buf, projection, &frame, &app.theme);
    }

    fn draw(buf: &mut Buffer, projection: &Projection, frame: &CursorFrame, theme: &Theme) {
        let radius = (frame.size * CURSOR_SCALE / 2.0).max(1.0);
        let shade_color = |shade: Shade| match shade {
            Shade::Light => theme.fg,
            Shade::Dark => theme.light_fg,
        };

        let area = projection.area();
        let left = projection.column(frame.x - radius);
        let right = projection.column(frame.x + radius);
        let top = projection.viewport_row(frame.y - radius);
        let bottom = projection.viewport_row(frame.y + radius);

        for row in top..=bottom {
            for column in left..=right {
                // Distance from the cell centre, in pixels
                let px = (column - area.x as i32) as f64 + 0.5;
                let py = (row - area.y as i32) as f64 * PX_PER_ROW + PX_PER_ROW / 2.0;
                let distance = ((px - frame.x).powi(2) + (py - frame.y).powi(2)).sqrt();
                if distance > radius {
                    continue;
                }
                let Some(cell) = projection.cell_mut(buf, column, row) else {
                    continue;
                };

                if let Some(fill) = frame.style.fill {
                    match frame.style.blend {
                        BlendMode::Difference => {
                            cell.modifier.toggle(Modifier::REVERSED);
                        }
                        BlendMode::Normal => {
                            cell.bg = shade_color(fill);
                        }
                    }
                } else if let Some(border) = frame.style.border {
                    if distance < radius - border.width.max(1.0) {
                        continue;
                    }
                    let under = cell.bg;
                    cell.fg = Theme::fade(shade_color(border.shade), under, border.alpha);
                    if cell.symbol() == " " {
                        cell.set_char('·');
                    }
                }
            }
        }
    }
}
