mod cursor;
mod footer;
mod hero;
mod portfolio;
mod production;
mod profile;
mod progress_bar;
mod stats;
mod status_bar;
mod ticker;

pub use cursor::CursorWidget;
pub use footer::FooterWidget;
pub use hero::HeroWidget;
pub use portfolio::PortfolioWidget;
pub use production::ProductionWidget;
pub use profile::ProfileWidget;
pub use progress_bar::ProgressBarWidget;
pub use stats::StatsWidget;
pub use status_bar::StatusBarWidget;
pub use ticker::TickerWidget;

use ratatui::{
    buffer::{Buffer, Cell},
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::App;
use crate::PX_PER_ROW;

/// Entrances slide up from this far below their resting place (pixels)
pub const ENTRANCE_RISE_PX: f64 = 6.0;

/// Maps document pixels onto the cells of a terminal area
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    area: Rect,
    scroll_offset: f64,
}

impl Projection {
    pub fn new(area: Rect, scroll_offset: f64) -> Self {
        Self {
            area,
            scroll_offset,
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Screen column for a document x; may fall outside the area
    pub fn column(&self, x: f64) -> i32 {
        self.area.x as i32 + x.floor() as i32
    }

    /// Screen row for a document y; may fall outside the area
    pub fn row(&self, y: f64) -> i32 {
        self.area.y as i32 + ((y - self.scroll_offset) / PX_PER_ROW).floor() as i32
    }

    /// Screen row for a viewport y (already scrolled)
    pub fn viewport_row(&self, y: f64) -> i32 {
        self.area.y as i32 + (y / PX_PER_ROW).floor() as i32
    }

    fn contains(&self, column: i32, row: i32) -> bool {
        column >= self.area.x as i32
            && column < self.area.right() as i32
            && row >= self.area.y as i32
            && row < self.area.bottom() as i32
    }

    /// Whether any part of a document rectangle is on screen
    pub fn is_visible(&self, rect: &kinesis_core::Rect) -> bool {
        let top = self.row(rect.y);
        let bottom = self.row(rect.bottom() - 0.001);
        bottom >= self.area.y as i32 && top < self.area.bottom() as i32
    }

    /// Cell at a screen position, if it is on screen
    pub fn cell_mut<'a>(&self, buf: &'a mut Buffer, column: i32, row: i32) -> Option<&'a mut Cell> {
        if !self.contains(column, row) {
            return None;
        }
        buf.cell_mut((column as u16, row as u16))
    }

    /// Style one cell, if it is on screen
    pub fn style_cell(&self, buf: &mut Buffer, column: i32, row: i32, style: Style) {
        if !self.contains(column, row) {
            return;
        }
        if let Some(cell) = buf.cell_mut((column as u16, row as u16)) {
            cell.set_style(style);
        }
    }

    /// Draw `text` starting at a screen position, clipped to the area
    pub fn put_str_at(&self, buf: &mut Buffer, column: i32, row: i32, text: &str, style: Style) {
        if row < self.area.y as i32 || row >= self.area.bottom() as i32 {
            return;
        }
        let mut x = column;
        for c in text.chars() {
            let width = c.width().unwrap_or(0) as i32;
            if width == 0 {
                continue;
            }
            if self.contains(x, row) {
                if let Some(cell) = buf.cell_mut((x as u16, row as u16)) {
                    cell.set_char(c).set_style(style);
                }
            }
            x += width;
            if x >= self.area.right() as i32 {
                break;
            }
        }
    }

    /// Draw `text` at a document position
    pub fn put_str(&self, buf: &mut Buffer, x: f64, y: f64, text: &str, style: Style) {
        self.put_str_at(buf, self.column(x), self.row(y), text, style);
    }

    /// Draw `text` centred horizontally on document x
    pub fn put_centered(&self, buf: &mut Buffer, center_x: f64, y: f64, text: &str, style: Style) {
        let width = UnicodeWidthStr::width(text) as f64;
        self.put_str(buf, center_x - width / 2.0, y, text, style);
    }

    /// Fill a document rectangle with `symbol`
    pub fn fill(&self, buf: &mut Buffer, rect: &kinesis_core::Rect, symbol: char, style: Style) {
        let left = self.column(rect.x);
        let right = self.column(rect.right());
        let top = self.row(rect.y);
        let bottom = self.row(rect.bottom());
        for row in top..bottom {
            for column in left..right {
                if !self.contains(column, row) {
                    continue;
                }
                if let Some(cell) = buf.cell_mut((column as u16, row as u16)) {
                    cell.set_char(symbol).set_style(style);
                }
            }
        }
    }

    /// Light box outline around a document rectangle
    pub fn outline(&self, buf: &mut Buffer, rect: &kinesis_core::Rect, style: Style) {
        let left = self.column(rect.x);
        let right = self.column(rect.right()) - 1;
        let top = self.row(rect.y);
        let bottom = self.row(rect.bottom()) - 1;
        if right <= left || bottom <= top {
            return;
        }
        for column in left + 1..right {
            self.put_str_at(buf, column, top, "─", style);
            self.put_str_at(buf, column, bottom, "─", style);
        }
        for row in top + 1..bottom {
            self.put_str_at(buf, left, row, "│", style);
            self.put_str_at(buf, right, row, "│", style);
        }
        self.put_str_at(buf, left, top, "┌", style);
        self.put_str_at(buf, right, top, "┐", style);
        self.put_str_at(buf, left, bottom, "└", style);
        self.put_str_at(buf, right, bottom, "┘", style);
    }
}

/// Greedy word wrap on display width
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.width()
        } else {
            line.width() + 1 + word.width()
        };
        if needed > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Spread letters apart, e.g. "RAY" -> "R A Y"
pub fn letter_spaced(text: &str, gap: usize) -> String {
    let spacer = " ".repeat(gap);
    text.chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(&spacer)
}

/// Vertical shift of an entrance at eased progress `value`
pub fn entrance_rise(value: f64) -> f64 {
    (1.0 - value.clamp(0.0, 1.0)) * ENTRANCE_RISE_PX
}

/// The whole page: sections, overlays and the status bar
pub struct PageView;

impl PageView {
    pub fn render(frame: &mut Frame, app: &App) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(frame.area());
        let content = chunks[0];

        let offset = app.page.scroll_state().smoothed_offset;
        let projection = Projection::new(content, offset);
        {
            let buf = frame.buffer_mut();
            buf.set_style(content, Style::default().bg(app.theme.bg).fg(app.theme.fg));
            HeroWidget::render(buf, &projection, app);
            TickerWidget::render(buf, &projection, app);
            StatsWidget::render(buf, &projection, app);
            ProfileWidget::render(buf, &projection, app);
            PortfolioWidget::render(buf, &projection, app);
            ProductionWidget::render(buf, &projection, app);
            FooterWidget::render(buf, &projection, app);
            ProgressBarWidget::render(buf, content, app);
            CursorWidget::render(buf, &projection, app);
        }
        StatusBarWidget::render(frame, chunks[1], app);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_rows_follow_scroll() {
        let projection = Projection::new(Rect::new(0, 0, 80, 20), 10.0);
        assert_eq!(projection.row(10.0), 0);
        assert_eq!(projection.row(13.0), 1);
        assert_eq!(projection.row(4.0), -3);
        assert_eq!(projection.column(12.7), 12);
        assert!(projection.is_visible(&kinesis_core::Rect::new(0.0, 0.0, 5.0, 12.0)));
        assert!(!projection.is_visible(&kinesis_core::Rect::new(0.0, 0.0, 5.0, 10.0)));
    }

    #[test]
    fn test_put_str_clips_to_area() {
        let area = Rect::new(0, 0, 6, 2);
        let mut buf = Buffer::empty(area);
        let projection = Projection::new(area, 0.0);
        projection.put_str(&mut buf, -2.0, 0.0, "ABCDEFGHIJ", Style::default());
        projection.put_str(&mut buf, 0.0, 8.0, "hidden", Style::default());
        assert_eq!(buf[(0, 0)].symbol(), "C");
        assert_eq!(buf[(5, 0)].symbol(), "H");
        assert_eq!(buf[(0, 1)].symbol(), " ");
    }

    #[test]
    fn test_wrap() {
        assert_eq!(
            wrap("crafting visual worlds that move", 14),
            vec!["crafting", "visual worlds", "that move"]
        );
        assert!(wrap("", 10).is_empty());
    }

    fn screen_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_page_view_draws_hero_and_status() {
        use kinesis_core::MotionConfig;
        use ratatui::{backend::TestBackend, Terminal};
        use std::sync::Arc;

        let mut app = App::with_seed(Arc::new(MotionConfig::default()), 100, 41, 5).unwrap();
        let mut clock = 0.0;
        for _ in 0..200 {
            app.tick_at(clock);
            clock += 16.0;
        }
        let mut terminal = Terminal::new(TestBackend::new(100, 41)).unwrap();
        terminal.draw(|frame| PageView::render(frame, &app)).unwrap();
        let text = screen_text(terminal.backend().buffer());
        assert!(text.contains("R A Y"));
        assert!(text.contains("D H A R M A"));
        assert!(text.contains("HERO"));
    }

    #[test]
    fn test_page_view_draws_footer_at_bottom() {
        use kinesis_core::MotionConfig;
        use ratatui::{backend::TestBackend, Terminal};
        use std::sync::Arc;

        let mut app = App::with_seed(Arc::new(MotionConfig::default()), 100, 41, 5).unwrap();
        app.page.scroll_to(f64::MAX);
        let mut clock = 0.0;
        for _ in 0..600 {
            app.tick_at(clock);
            clock += 16.0;
        }
        let mut terminal = Terminal::new(TestBackend::new(100, 41)).unwrap();
        terminal.draw(|frame| PageView::render(frame, &app)).unwrap();
        let text = screen_text(terminal.backend().buffer());
        assert!(text.contains("L E T ' S   T A L K ."));
        assert!(text.contains("INSTAGRAM"));
        assert!(text.contains("CONTACT"));
    }

    #[test]
    fn test_letter_spaced() {
        assert_eq!(letter_spaced("RAY", 1), "R A Y");
        assert_eq!(letter_spaced("RAY", 0), "RAY");
    }
}
