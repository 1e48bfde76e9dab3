use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use kinesis_core::{MotionConfig, Point, Viewport};
use tracing::debug;

use crate::event::{AppEvent, FramePacer};
use crate::input::{handle_key_event, handle_mouse_event, Action};
use crate::keymap::Keymap;
use crate::page::{Block, Page};
use crate::theme::Theme;
use crate::PX_PER_ROW;

/// Fraction of the viewport moved by a page key
const PAGE_FRACTION: f64 = 0.9;

/// Terminal host state around one [`Page`]
pub struct App {
    pub page: Page,
    pub config: Arc<MotionConfig>,
    pub theme: Theme,
    pub should_quit: bool,
    /// First key of a pending sequence (e.g. 'g' of "gg")
    pub pending_key: Option<char>,
    pub status_message: Option<String>,
    /// Terminal rows given to the page, status bar excluded
    content_rows: u16,
    started: Instant,
}

impl App {
    pub fn new(config: Arc<MotionConfig>, cols: u16, rows: u16) -> Result<Self> {
        let page = Page::new(&config, Self::viewport_for(cols, rows))?;
        Ok(Self::with_page(page, config, rows))
    }

    /// App over a page with a seeded scramble generator
    pub fn with_seed(config: Arc<MotionConfig>, cols: u16, rows: u16, seed: u64) -> Result<Self> {
        let page = Page::with_seed(&config, Self::viewport_for(cols, rows), seed)?;
        Ok(Self::with_page(page, config, rows))
    }

    fn with_page(page: Page, config: Arc<MotionConfig>, rows: u16) -> Self {
        Self {
            page,
            config,
            theme: Theme::default(),
            should_quit: false,
            pending_key: None,
            status_message: None,
            content_rows: rows.saturating_sub(1),
            started: Instant::now(),
        }
    }

    /// Page viewport in pixels for a terminal of `cols` x `rows`; the last
    /// row is the status bar
    pub fn viewport_for(cols: u16, rows: u16) -> Viewport {
        Viewport::new(
            cols as f64,
            rows.saturating_sub(1) as f64 * PX_PER_ROW,
        )
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        debug!(cols, rows, "Terminal resized");
        self.content_rows = rows.saturating_sub(1);
        self.page.resize(Self::viewport_for(cols, rows));
    }

    /// Run a frame stamped with the time since startup, if `pacer` says
    /// one is due at `now`
    pub fn frame_if_due(&mut self, pacer: &mut FramePacer, now: Instant) -> bool {
        if !pacer.try_frame(now) {
            return false;
        }
        let timestamp_ms = now.saturating_duration_since(self.started).as_secs_f64() * 1000.0;
        self.tick_at(timestamp_ms);
        true
    }

    pub fn tick_at(&mut self, timestamp_ms: f64) {
        self.page.frame(timestamp_ms);
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }

    fn scroll_step_px(&self) -> f64 {
        self.config.ui.scroll_step as f64 * PX_PER_ROW
    }

    /// Centre of a terminal cell, in viewport pixels
    pub fn cell_to_pointer(column: u16, row: u16) -> Point {
        Point::new(column as f64 + 0.5, row as f64 * PX_PER_ROW + PX_PER_ROW / 2.0)
    }

    /// Dispatch one terminal event; never runs a frame
    pub fn handle_event(&mut self, event: AppEvent, keymap: &Keymap) {
        match event {
            AppEvent::Key(key) => {
                let action = handle_key_event(key, self, keymap);
                self.handle_action(action);
            }
            AppEvent::Mouse(mouse) => {
                self.handle_action(handle_mouse_event(mouse));
            }
            AppEvent::Resize(cols, rows) => {
                self.resize(cols, rows);
            }
            AppEvent::FocusLost => {
                self.handle_action(Action::PointerLeave);
            }
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        if action != Action::PendingG {
            self.clear_pending_key();
        }
        // Pointer traffic leaves the status line alone
        if !matches!(
            action,
            Action::PointerMove { .. } | Action::PointerLeave | Action::None
        ) {
            self.clear_status();
        }

        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::ScrollDown => {
                let step = self.scroll_step_px();
                self.page.scroll_by(step);
            }
            Action::ScrollUp => {
                let step = self.scroll_step_px();
                self.page.scroll_by(-step);
            }
            Action::PageDown => {
                let page = self.page.layout().viewport().height * PAGE_FRACTION;
                self.page.scroll_by(page);
            }
            Action::PageUp => {
                let page = self.page.layout().viewport().height * PAGE_FRACTION;
                self.page.scroll_by(-page);
            }
            Action::JumpToTop => {
                self.page.scroll_to(0.0);
            }
            Action::JumpToBottom => {
                let bottom = self.page.layout().scrollable_height();
                self.page.scroll_to(bottom);
            }
            Action::PendingG => {
                self.pending_key = Some('g');
            }
            Action::Rescramble => {
                self.page.rescramble();
                self.set_status("Replaying footer title");
            }
            Action::PointerMove { column, row } => {
                if row >= self.content_rows {
                    // Over the status bar
                    self.page.pointer_leave();
                } else {
                    self.page.pointer_move(Self::cell_to_pointer(column, row));
                }
            }
            Action::PointerLeave => {
                self.page.pointer_leave();
            }
            Action::None => {}
        }
    }

    /// Name of the section under the middle of the viewport
    pub fn current_section(&self) -> &'static str {
        let layout = self.page.layout();
        let s = layout.sections();
        let mid = self.page.scroll_state().smoothed_offset + layout.viewport().height / 2.0;
        let bands = [
            (s.hero, "HERO"),
            (s.lead_ticker, "TICKER"),
            (s.stats, "STATS"),
            (s.profile, "PROFILE"),
            (s.trail_ticker, "TICKER"),
            (s.portfolio, "WORKS"),
            (s.production, "PRODUCTION"),
            (s.footer, "CONTACT"),
        ];
        bands
            .iter()
            .find(|(rect, _)| mid >= rect.y && mid < rect.bottom())
            .map(|(_, name)| *name)
            .unwrap_or("CONTACT")
    }

    pub fn hovered(&self) -> Option<Block> {
        self.page.hovered()
    }
}
