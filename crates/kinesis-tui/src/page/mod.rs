//! The single-page scene
//!
//! [`Page`] owns every motion component of the page, wires them to one
//! [`FrameScheduler`] and translates host input (scroll, pointer, resize)
//! into component calls. It knows nothing about terminals: hosts draw from
//! its accessors and feed it pixels.

pub mod content;
pub mod layout;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use kinesis_core::cursor::CursorFrame;
use kinesis_core::motion::transform::{parallax_shift, HeroTransform};
use kinesis_core::motion::StepLimits;
use kinesis_core::reveal::{Counter, EntranceTween, RevealOptions, ViewportObserver};
use kinesis_core::scroll::{ElementTracker, ProgressBar, ScrollOffsets, ScrollState, ScrollTracker};
use kinesis_core::{
    CursorContext, FrameScheduler, HoverNudge, Magnetic, MotionConfig, Point, Result,
    ScrambleText, SpringParams, Subscription, Ticker, Viewport,
};
use serde::Serialize;
use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

use self::content::{FOOTER_TITLE, LEAD_TICKER, STATS, TRAIL_TICKER, WORKS};
pub use self::layout::{Block, PageLayout, Sections};

type Shared<T> = Rc<RefCell<T>>;

fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Portrait parallax: -10% to +10% of its height
const PROFILE_PARALLAX: f64 = 0.10;
/// Portfolio cards: alternating +-4%
const CARD_PARALLAX: f64 = 0.04;

/// One ticker item as drawn, trailing separator included
pub fn ticker_segment(item: &str) -> String {
    format!("   {}   ·", item.to_uppercase())
}

/// The ticker's doubled item sequence as one drawable strip
pub fn ticker_strip(ticker: &Ticker) -> String {
    ticker.rendered_items().map(ticker_segment).collect()
}

/// Per-frame state dump for headless runs
#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub frame: u64,
    pub timestamp_ms: f64,
    pub scroll: ScrollState,
    pub progress_bar: f64,
    pub hero: HeroTransform,
    pub tickers: Vec<f64>,
    pub counters: Vec<String>,
    pub revealed: usize,
    pub scramble: String,
    pub cursor: Option<CursorFrame>,
    pub hovered: Option<Block>,
    /// Smoothed scroll still catching up with the target
    pub gliding: bool,
}

pub struct Page {
    layout: PageLayout,
    scheduler: FrameScheduler,
    subscriptions: Vec<Subscription>,
    scroll: Shared<ScrollTracker>,
    progress_bar: Shared<ProgressBar>,
    tickers: Vec<Shared<Ticker>>,
    counters: Vec<Shared<Counter>>,
    tweens: BTreeMap<Block, Vec<Shared<EntranceTween>>>,
    magnets: BTreeMap<Block, Shared<Magnetic>>,
    nudges: BTreeMap<Block, Shared<HoverNudge>>,
    cursor: Shared<CursorContext>,
    /// Cursor as of the last frame; pointer samples in between are coalesced
    cursor_frame: Option<CursorFrame>,
    scramble: Shared<ScrambleText>,
    elements: ElementTracker,
    observer: ViewportObserver,
    hovered: Option<Block>,
    pointer: Option<Point>,
    frames: u64,
    timestamp_ms: f64,
}

impl Page {
    pub fn new(config: &MotionConfig, viewport: Viewport) -> Result<Self> {
        let scramble = ScrambleText::new(FOOTER_TITLE, &config.scramble);
        Self::build(config, viewport, scramble)
    }

    /// Page whose scramble effect draws from a seeded generator
    pub fn with_seed(config: &MotionConfig, viewport: Viewport, seed: u64) -> Result<Self> {
        let scramble = ScrambleText::with_seed(FOOTER_TITLE, &config.scramble, seed);
        Self::build(config, viewport, scramble)
    }

    fn build(config: &MotionConfig, viewport: Viewport, scramble: ScrambleText) -> Result<Self> {
        let layout = PageLayout::compute(viewport);
        let limits = StepLimits::from(&config.clock);

        let scroll = shared(ScrollTracker::new(&config.scroll));
        let progress_bar = shared(ProgressBar::new(&config.springs.progress_bar));

        let lead = LEAD_TICKER.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let trail = TRAIL_TICKER.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let tickers = vec![
            shared(Ticker::new(lead, config.ticker.lead_speed_px_per_s, false)?),
            shared(Ticker::new(trail, config.ticker.trail_speed_px_per_s, true)?),
        ];
        for ticker in &tickers {
            let mut ticker = ticker.borrow_mut();
            let strip_width = UnicodeWidthStr::width(ticker_strip(&ticker).as_str());
            ticker.measure_rendered(strip_width as f64);
        }

        let counters: Vec<Shared<Counter>> = STATS
            .iter()
            .map(|stat| shared(Counter::from_config(stat.target, stat.suffix, &config.reveal)))
            .collect();

        let mut tweens = BTreeMap::new();
        let mut magnets = BTreeMap::new();
        let mut nudges = BTreeMap::new();
        for (block, _) in layout.blocks() {
            let entrances: Vec<Shared<EntranceTween>> =
                block.entrances().into_iter().map(shared).collect();
            if block.plays_on_load() {
                for tween in &entrances {
                    tween.borrow_mut().start();
                }
            }
            tweens.insert(block, entrances);

            if let Some(strength) = block.magnetic_strength() {
                let track = config
                    .springs
                    .magnetic_track
                    .params()
                    .unwrap_or(SpringParams::MAGNETIC_TRACK);
                let snap = config
                    .springs
                    .magnetic_snap
                    .params()
                    .unwrap_or(SpringParams::MAGNETIC_SNAP);
                let magnet = Magnetic::with_springs(strength, track, snap).with_limits(limits);
                magnets.insert(block, shared(magnet));
            }

            if let Some(target) = block.hover_nudge() {
                let nudge =
                    HoverNudge::from_config(target, &config.springs.arrow_hover).with_limits(limits);
                nudges.insert(block, shared(nudge));
            }
        }

        let cursor = shared(CursorContext::new(config));
        let scramble = shared(scramble);
        // Plays once when the footer mounts; hovering the title replays it
        scramble.borrow_mut().trigger();

        let scheduler = FrameScheduler::new();
        let mut subscriptions = vec![scheduler.attach(scroll.clone())];
        {
            let scroll = scroll.clone();
            let bar = progress_bar.clone();
            subscriptions.push(scheduler.subscribe(move |_| {
                let progress = scroll.borrow().progress();
                bar.borrow_mut().set_progress(progress);
            }));
        }
        subscriptions.push(scheduler.attach(progress_bar.clone()));
        for ticker in &tickers {
            subscriptions.push(scheduler.attach(ticker.clone()));
        }
        for counter in &counters {
            subscriptions.push(scheduler.attach(counter.clone()));
        }
        for tween in tweens.values().flatten() {
            subscriptions.push(scheduler.attach(tween.clone()));
        }
        for magnet in magnets.values() {
            subscriptions.push(scheduler.attach(magnet.clone()));
        }
        for nudge in nudges.values() {
            subscriptions.push(scheduler.attach(nudge.clone()));
        }
        subscriptions.push(scheduler.attach(cursor.clone()));
        subscriptions.push(scheduler.attach(scramble.clone()));

        let mut elements = ElementTracker::new();
        elements.track(Block::ProfileImage.id(), ScrollOffsets::default());
        for i in 0..WORKS.len() {
            elements.track(Block::Card(i).id(), ScrollOffsets::default());
        }

        let mut observer = ViewportObserver::new();
        for (block, _) in layout.blocks() {
            if block.plays_on_load() {
                continue;
            }
            let options = match block {
                Block::Stat(_) => RevealOptions::from_config(&config.reveal),
                _ => RevealOptions::default().with_threshold(0.0),
            }
            .with_margin(layout.reveal_margin(block));
            observer.observe(block.id(), options);

            let entrances = tweens.get(&block).cloned().unwrap_or_default();
            let counter = match block {
                Block::Stat(i) => counters.get(i).cloned(),
                _ => None,
            };
            observer.subscribe(block.id(), move |event| {
                debug!(?block, ratio = event.ratio, "Block revealed");
                for tween in &entrances {
                    tween.borrow_mut().start();
                }
                if let Some(counter) = &counter {
                    counter.borrow_mut().start();
                }
            });
        }

        info!(
            subscribers = scheduler.subscriber_count(),
            document_height = layout.document_height(),
            "Page scene built"
        );

        let mut page = Self {
            layout,
            scheduler,
            subscriptions,
            scroll,
            progress_bar,
            tickers,
            counters,
            tweens,
            magnets,
            nudges,
            cursor,
            cursor_frame: None,
            scramble,
            elements,
            observer,
            hovered: None,
            pointer: None,
            frames: 0,
            timestamp_ms: 0.0,
        };
        page.apply_layout();
        Ok(page)
    }

    fn apply_layout(&mut self) {
        let viewport = self.layout.viewport();
        let scrollable = self.layout.scrollable_height();
        {
            let mut scroll = self.scroll.borrow_mut();
            scroll.on_resize(viewport, scrollable);
            // A shrinking document clamps in place rather than gliding
            let state = scroll.state();
            if state.raw_offset > scrollable || state.smoothed_offset > scrollable {
                scroll.jump_to(state.raw_offset.min(scrollable));
            }
        }
        self.elements.on_resize(viewport);
        for (block, rect) in self.layout.blocks() {
            self.elements.set_geometry(block.id(), rect);
            self.observer.set_geometry(block.id(), rect);
        }
    }

    /// Viewport size changed (pixels)
    pub fn resize(&mut self, viewport: Viewport) {
        self.layout = PageLayout::compute(viewport);
        debug!(
            width = self.layout.viewport().width,
            height = self.layout.viewport().height,
            "Page resized"
        );
        self.apply_layout();
    }

    /// Move the scroll target by `delta_px`, clamped to the document
    pub fn scroll_by(&mut self, delta_px: f64) {
        let raw = self.scroll.borrow().state().raw_offset;
        self.scroll_to(raw + delta_px);
    }

    pub fn scroll_to(&mut self, offset_px: f64) {
        if !offset_px.is_finite() {
            return;
        }
        let target = offset_px.clamp(0.0, self.layout.scrollable_height());
        self.scroll.borrow_mut().on_scroll(target);
    }

    /// Pointer sample in viewport pixels
    pub fn pointer_move(&mut self, pointer: Point) {
        if !pointer.is_finite() {
            return;
        }
        self.pointer = Some(pointer);
        self.cursor.borrow_mut().pointer_move(pointer);
        self.refresh_hover();
    }

    /// Pointer left the page
    pub fn pointer_leave(&mut self) {
        self.pointer = None;
        self.set_hovered(None, None);
    }

    /// Replay the footer scramble
    pub fn rescramble(&mut self) {
        self.scramble.borrow_mut().trigger();
    }

    fn document_point(&self, pointer: Point) -> Point {
        let offset = self.scroll.borrow().state().smoothed_offset;
        Point::new(pointer.x, pointer.y + offset)
    }

    /// Content moves under a resting pointer while the page glides, so hover
    /// state is re-derived every frame as well as on pointer input
    fn refresh_hover(&mut self) {
        let Some(pointer) = self.pointer else {
            return;
        };
        let point = self.document_point(pointer);
        let block = self.layout.hit_test(point);
        self.set_hovered(block, Some(point));
        self.cursor
            .borrow_mut()
            .set_inverted_surface(self.layout.is_light_surface(point));
    }

    fn set_hovered(&mut self, block: Option<Block>, point: Option<Point>) {
        if block != self.hovered {
            if let Some(previous) = self.hovered {
                if previous.cursor_variant().is_some() {
                    self.cursor.borrow_mut().release_variant();
                }
                if let Some(magnet) = self.magnets.get(&previous) {
                    magnet.borrow_mut().pointer_leave();
                }
                if let Some(nudge) = self.nudges.get(&previous) {
                    nudge.borrow_mut().pointer_leave();
                }
            }
            if let Some(next) = block {
                if let Some(variant) = next.cursor_variant() {
                    self.cursor.borrow_mut().request_variant(variant);
                }
                if let Some(nudge) = self.nudges.get(&next) {
                    nudge.borrow_mut().pointer_enter();
                }
                if next == Block::FooterTitle {
                    self.scramble.borrow_mut().trigger();
                }
            }
            self.hovered = block;
        }

        if let (Some(block), Some(point)) = (block, point) {
            if let (Some(magnet), Some(rect)) = (self.magnets.get(&block), self.layout.rect(block)) {
                magnet.borrow_mut().pointer_move(point, &rect);
            }
        }
    }

    /// Run one display frame
    pub fn frame(&mut self, timestamp_ms: f64) {
        self.scheduler.frame(timestamp_ms);
        self.timestamp_ms = timestamp_ms;
        self.frames += 1;

        let smoothed = self.scroll.borrow().state().smoothed_offset;
        let viewport = self.layout.viewport();
        let visible = viewport.visible_rect(smoothed);

        // Only elements near the viewport get their progress recomputed
        let nearby = visible.inflate(viewport.height);
        for (block, rect) in self.layout.blocks() {
            if matches!(block, Block::ProfileImage | Block::Card(_)) {
                let near = rect.intersection(&nearby).is_some();
                self.elements.set_observed(block.id(), near);
            }
        }
        self.elements.on_scroll(smoothed);

        let revealed = self.observer.on_viewport(&visible);
        if !revealed.is_empty() {
            debug!(count = revealed.len(), "Reveals fired");
        }

        self.refresh_hover();

        if let Some(cursor) = self.cursor.borrow_mut().take_frame() {
            self.cursor_frame = Some(cursor);
        }
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll.borrow().state()
    }

    pub fn progress_bar(&self) -> f64 {
        self.progress_bar.borrow().scale()
    }

    pub fn hero(&self) -> HeroTransform {
        HeroTransform::from_progress(self.scroll.borrow().smoothed_progress())
    }

    /// Ticker offsets, lead band first
    pub fn ticker_offsets(&self) -> Vec<f64> {
        self.tickers.iter().map(|t| t.borrow().offset()).collect()
    }

    /// Doubled item strip of a band, ready to draw
    pub fn ticker_strip(&self, index: usize) -> String {
        self.tickers
            .get(index)
            .map(|t| ticker_strip(&t.borrow()))
            .unwrap_or_default()
    }

    /// Width of one unduplicated pass, once measured
    pub fn ticker_width(&self, index: usize) -> Option<f64> {
        self.tickers
            .get(index)
            .and_then(|t| t.borrow().state().content_width)
    }

    pub fn counter_labels(&self) -> Vec<String> {
        self.counters.iter().map(|c| c.borrow().display()).collect()
    }

    /// Eased entrance progress; split headings report one value per word
    pub fn entrance(&self, block: Block) -> Vec<f64> {
        self.tweens
            .get(&block)
            .map(|tweens| tweens.iter().map(|t| t.borrow().value()).collect())
            .unwrap_or_default()
    }

    /// Parallax shift as a fraction of the block's height
    pub fn parallax(&self, block: Block) -> f64 {
        let Some(progress) = self.elements.progress(block.id()) else {
            return 0.0;
        };
        match block {
            Block::ProfileImage => parallax_shift(progress.progress, PROFILE_PARALLAX, false),
            // Even cards drift up, odd cards drift down
            Block::Card(i) => parallax_shift(progress.progress, CARD_PARALLAX, i % 2 == 0),
            _ => 0.0,
        }
    }

    pub fn magnetic_offset(&self, block: Block) -> (f64, f64) {
        self.magnets
            .get(&block)
            .map(|m| {
                let offset = m.borrow().offset();
                (offset.x, offset.y)
            })
            .unwrap_or((0.0, 0.0))
    }

    /// Hover nudge offset in pixels, for blocks that have one
    pub fn nudge_offset(&self, block: Block) -> (f64, f64) {
        self.nudges
            .get(&block)
            .map(|n| {
                let offset = n.borrow().offset();
                (offset.x, offset.y)
            })
            .unwrap_or((0.0, 0.0))
    }

    pub fn is_revealed(&self, block: Block) -> bool {
        block.plays_on_load() || self.observer.is_triggered(block.id())
    }

    pub fn scramble_text(&self) -> String {
        self.scramble.borrow().displayed().to_string()
    }

    /// Cursor as drawn by the last frame, once the pointer has been seen
    pub fn cursor(&self) -> Option<CursorFrame> {
        self.cursor_frame
    }

    pub fn hovered(&self) -> Option<Block> {
        self.hovered
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let revealed = self
            .layout
            .blocks()
            .filter(|(block, _)| !block.plays_on_load() && self.observer.is_triggered(block.id()))
            .count();
        PageSnapshot {
            frame: self.frames,
            timestamp_ms: self.timestamp_ms,
            scroll: self.scroll_state(),
            progress_bar: self.progress_bar(),
            hero: self.hero(),
            tickers: self.ticker_offsets(),
            counters: self.counter_labels(),
            revealed,
            scramble: self.scramble_text(),
            cursor: self.cursor(),
            hovered: self.hovered,
            gliding: self.scroll.borrow().is_gliding(),
        }
    }

    /// Cancel every frame subscription, disconnect observers and stop
    /// tracking elements. Idempotent.
    pub fn teardown(&mut self) {
        for subscription in &self.subscriptions {
            subscription.cancel();
        }
        let blocks: Vec<Block> = self.layout.blocks().map(|(block, _)| block).collect();
        for block in blocks {
            self.observer.disconnect(block.id());
            self.elements.untrack(block.id());
        }
        self.scramble.borrow_mut().cancel();
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.teardown();
    }
}
