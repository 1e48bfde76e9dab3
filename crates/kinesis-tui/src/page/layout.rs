//! Document geometry of the page, in pixels
//!
//! Everything here lives in document space: `y = 0` is the top of the hero
//! and the viewport slides over it as the page scrolls. The host decides how
//! pixels map onto its own cells.

use std::collections::BTreeMap;

use kinesis_core::cursor::CursorVariant;
use kinesis_core::motion::EasingType;
use kinesis_core::reveal::{stagger, EntranceTween};
use kinesis_core::scroll::ElementId;
use kinesis_core::{Point, Rect, Viewport};
use serde::Serialize;

use super::content::{FOOTER_LINKS, PORTFOLIO_HEADING, PRODUCTION_HEADING, STATS, WORKS};

pub const TICKER_HEIGHT: f64 = 6.0;
const GUTTER: f64 = 4.0;
const MIN_WIDTH: f64 = 40.0;
const MIN_HEIGHT: f64 = 24.0;
/// Delay before the hero plays its entrance
const HERO_LOAD_MS: f64 = 300.0;
/// Split-word headings stagger each word by this much
pub const WORD_STAGGER_MS: f64 = 70.0;
/// Card reveal margin for a 1000px tall viewport, scaled to the real height
const CARD_MARGIN_PX: f64 = -50.0;

/// Addressable piece of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    HeroKicker,
    HeroTitle,
    HeroSubtitle,
    Stat(usize),
    ProfileImage,
    PortfolioHeading,
    Card(usize),
    ProductionHeading,
    InstagramButton,
    Thumb(usize),
    FooterTitle,
    FooterLink(usize),
}

impl Block {
    pub fn id(&self) -> ElementId {
        let raw = match *self {
            Block::HeroKicker => 1,
            Block::HeroTitle => 2,
            Block::HeroSubtitle => 3,
            Block::Stat(i) => 10 + i as u64,
            Block::ProfileImage => 20,
            Block::PortfolioHeading => 30,
            Block::Card(i) => 31 + i as u64,
            Block::ProductionHeading => 40,
            Block::InstagramButton => 41,
            Block::Thumb(i) => 42 + i as u64,
            Block::FooterTitle => 50,
            Block::FooterLink(i) => 51 + i as u64,
        };
        ElementId(raw)
    }

    /// Cursor variant requested while the pointer is over this block
    pub fn cursor_variant(&self) -> Option<CursorVariant> {
        match self {
            Block::HeroTitle | Block::FooterTitle => Some(CursorVariant::Text),
            Block::ProfileImage
            | Block::Card(_)
            | Block::InstagramButton
            | Block::Thumb(_)
            | Block::FooterLink(_) => Some(CursorVariant::Hover),
            _ => None,
        }
    }

    /// Strength of the magnetic pull, for blocks that lean toward the pointer
    pub fn magnetic_strength(&self) -> Option<f64> {
        match self {
            Block::InstagramButton => Some(0.3),
            Block::FooterLink(_) => Some(0.5),
            _ => None,
        }
    }

    /// Offset (pixels) a block's arrow springs to while hovered
    pub fn hover_nudge(&self) -> Option<Point> {
        match self {
            Block::Card(_) => Some(Point::new(3.0, -3.0)),
            _ => None,
        }
    }

    /// Hero blocks play on load instead of waiting for a reveal
    pub fn plays_on_load(&self) -> bool {
        matches!(self, Block::HeroKicker | Block::HeroTitle | Block::HeroSubtitle)
    }

    /// Words revealed one by one, for split headings
    pub fn split_words(&self) -> Option<Vec<&'static str>> {
        match self {
            Block::PortfolioHeading => Some(PORTFOLIO_HEADING.split(' ').collect()),
            Block::ProductionHeading => Some(PRODUCTION_HEADING.split(' ').collect()),
            _ => None,
        }
    }

    /// Entrance tweens for this block: one per word for split headings
    pub fn entrances(&self) -> Vec<EntranceTween> {
        let smooth = |delay, duration| EntranceTween::new(delay, duration, EasingType::Smooth);
        let single = match *self {
            Block::HeroKicker => smooth(HERO_LOAD_MS + 400.0, 1000.0),
            Block::HeroTitle => smooth(HERO_LOAD_MS + 600.0, 1200.0),
            Block::HeroSubtitle => smooth(HERO_LOAD_MS + 1300.0, 1000.0),
            Block::Stat(i) => smooth(stagger(0.0, i, 100.0), 800.0),
            // Curtain wipe off the portrait
            Block::ProfileImage => EntranceTween::new(200.0, 1200.0, EasingType::InOut),
            Block::Card(i) => smooth(stagger(0.0, i % 3, 80.0), 900.0),
            Block::InstagramButton => smooth(300.0, 800.0),
            Block::Thumb(i) => smooth(stagger(0.0, i, 100.0), 900.0),
            Block::FooterTitle => smooth(0.0, 1300.0),
            Block::FooterLink(_) => smooth(300.0, 800.0),
            Block::PortfolioHeading | Block::ProductionHeading => {
                let words = self.split_words().unwrap_or_default();
                return (0..words.len().max(1))
                    .map(|i| smooth(stagger(0.0, i, WORD_STAGGER_MS), 900.0))
                    .collect();
            }
        };
        vec![single]
    }
}

/// Section bands, top to bottom
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sections {
    pub hero: Rect,
    pub lead_ticker: Rect,
    pub stats: Rect,
    pub profile: Rect,
    pub trail_ticker: Rect,
    pub portfolio: Rect,
    /// The light section; the cursor inverts over it
    pub production: Rect,
    pub footer: Rect,
}

#[derive(Debug, Clone)]
pub struct PageLayout {
    viewport: Viewport,
    sections: Sections,
    blocks: BTreeMap<Block, Rect>,
    document_height: f64,
}

struct Stack {
    y: f64,
    width: f64,
}

impl Stack {
    fn push(&mut self, height: f64) -> Rect {
        let rect = Rect::new(0.0, self.y, self.width, height);
        self.y += height;
        rect
    }
}

fn centered(width: f64, outer: f64, y: f64, w: f64, h: f64) -> Rect {
    let w = w.min(width);
    Rect::new(((outer - w) / 2.0).floor(), y, w, h)
}

impl PageLayout {
    pub fn compute(viewport: Viewport) -> Self {
        let width = if viewport.width.is_finite() {
            viewport.width.max(MIN_WIDTH)
        } else {
            MIN_WIDTH
        };
        let height = if viewport.height.is_finite() {
            viewport.height.max(MIN_HEIGHT)
        } else {
            MIN_HEIGHT
        };
        let inner_x = GUTTER;
        let inner_w = width - GUTTER * 2.0;

        let mut stack = Stack { y: 0.0, width };
        let sections = Sections {
            hero: stack.push(height),
            lead_ticker: stack.push(TICKER_HEIGHT),
            stats: stack.push(28.0),
            profile: stack.push(64.0),
            trail_ticker: stack.push(TICKER_HEIGHT),
            portfolio: stack.push(74.0),
            production: stack.push(64.0),
            footer: stack.push(72.0),
        };
        let document_height = stack.y;

        let mut blocks = BTreeMap::new();

        let mid = sections.hero.y + height / 2.0;
        blocks.insert(Block::HeroKicker, centered(inner_w, width, mid - 10.0, 26.0, 2.0));
        blocks.insert(Block::HeroTitle, centered(inner_w, width, mid - 5.0, 24.0, 8.0));
        blocks.insert(Block::HeroSubtitle, centered(inner_w, width, mid + 6.0, 40.0, 2.0));

        let cell_w = inner_w / STATS.len() as f64;
        for i in 0..STATS.len() {
            blocks.insert(
                Block::Stat(i),
                Rect::new(inner_x + i as f64 * cell_w, sections.stats.y + 6.0, cell_w, 14.0),
            );
        }

        blocks.insert(
            Block::ProfileImage,
            Rect::new(
                inner_x,
                sections.profile.y + 6.0,
                (inner_w * 0.45).floor(),
                52.0,
            ),
        );

        blocks.insert(
            Block::PortfolioHeading,
            Rect::new(inner_x, sections.portfolio.y + 6.0, (inner_w / 2.0).floor(), 4.0),
        );
        let gap = 2.0;
        let card_w = ((inner_w - gap * 2.0) / 3.0).floor();
        let card_h = 24.0;
        for i in 0..WORKS.len() {
            let (row, col) = (i / 3, i % 3);
            blocks.insert(
                Block::Card(i),
                Rect::new(
                    inner_x + col as f64 * (card_w + gap),
                    sections.portfolio.y + 16.0 + row as f64 * (card_h + gap),
                    card_w,
                    card_h,
                ),
            );
        }

        blocks.insert(
            Block::ProductionHeading,
            Rect::new(inner_x, sections.production.y + 8.0, (inner_w * 0.6).floor(), 6.0),
        );
        let button_w = 22.0_f64.min(inner_w);
        blocks.insert(
            Block::InstagramButton,
            Rect::new(
                inner_x + inner_w - button_w,
                sections.production.y + 8.0,
                button_w,
                4.0,
            ),
        );
        let thumb_w = ((inner_w - gap * 3.0) / 4.0).floor();
        for i in 0..4 {
            blocks.insert(
                Block::Thumb(i),
                Rect::new(
                    inner_x + i as f64 * (thumb_w + gap),
                    sections.production.y + 24.0,
                    thumb_w,
                    20.0,
                ),
            );
        }

        blocks.insert(
            Block::FooterTitle,
            Rect::new(inner_x, sections.footer.y + 8.0, inner_w, 20.0),
        );
        let link_widths: Vec<f64> = FOOTER_LINKS
            .iter()
            .map(|label| label.chars().count() as f64 + 4.0)
            .collect();
        let links_gap = 8.0;
        let total: f64 = link_widths.iter().sum::<f64>() + links_gap * (link_widths.len() - 1) as f64;
        let mut x = ((width - total) / 2.0).floor().max(0.0);
        for (i, w) in link_widths.iter().enumerate() {
            blocks.insert(
                Block::FooterLink(i),
                Rect::new(x, sections.footer.y + 32.0, *w, 2.0),
            );
            x += w + links_gap;
        }

        Self {
            viewport: Viewport::new(width, height),
            sections,
            blocks,
            document_height,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    pub fn document_height(&self) -> f64 {
        self.document_height
    }

    /// Document height minus one viewport
    pub fn scrollable_height(&self) -> f64 {
        (self.document_height - self.viewport.height).max(0.0)
    }

    pub fn rect(&self, block: Block) -> Option<Rect> {
        self.blocks.get(&block).copied()
    }

    pub fn blocks(&self) -> impl Iterator<Item = (Block, Rect)> + '_ {
        self.blocks.iter().map(|(block, rect)| (*block, *rect))
    }

    /// Topmost interactive block under a document-space point
    pub fn hit_test(&self, point: Point) -> Option<Block> {
        self.blocks
            .iter()
            .rev()
            .find(|(block, rect)| {
                (block.cursor_variant().is_some() || block.magnetic_strength().is_some())
                    && rect.contains(point)
            })
            .map(|(block, _)| *block)
    }

    pub fn is_light_surface(&self, point: Point) -> bool {
        self.sections.production.contains(point)
    }

    /// Viewport margin for a block's reveal
    pub fn reveal_margin(&self, block: Block) -> f64 {
        match block {
            Block::Card(_) => (CARD_MARGIN_PX * self.viewport.height / 1000.0).round(),
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> PageLayout {
        PageLayout::compute(Viewport::new(120.0, 80.0))
    }

    #[test]
    fn test_sections_stack_without_gaps() {
        let layout = layout();
        let s = layout.sections();
        let order = [
            s.hero,
            s.lead_ticker,
            s.stats,
            s.profile,
            s.trail_ticker,
            s.portfolio,
            s.production,
            s.footer,
        ];
        for pair in order.windows(2) {
            assert_eq!(pair[0].bottom(), pair[1].y);
        }
        assert_eq!(s.footer.bottom(), layout.document_height());
        assert_eq!(layout.scrollable_height(), layout.document_height() - 80.0);
    }

    #[test]
    fn test_blocks_sit_inside_their_sections() {
        let layout = layout();
        let s = layout.sections();
        let inside = |outer: Rect, inner: Rect| {
            inner.y >= outer.y && inner.bottom() <= outer.bottom() && inner.right() <= outer.right()
        };
        for i in 0..4 {
            assert!(inside(s.stats, layout.rect(Block::Stat(i)).unwrap()));
            assert!(inside(s.production, layout.rect(Block::Thumb(i)).unwrap()));
        }
        for i in 0..6 {
            assert!(inside(s.portfolio, layout.rect(Block::Card(i)).unwrap()));
        }
        assert!(inside(s.footer, layout.rect(Block::FooterLink(1)).unwrap()));
    }

    #[test]
    fn test_hit_test() {
        let layout = layout();
        let title = layout.rect(Block::HeroTitle).unwrap();
        assert_eq!(layout.hit_test(title.center()), Some(Block::HeroTitle));

        let kicker = layout.rect(Block::HeroKicker).unwrap();
        assert_eq!(layout.hit_test(kicker.center()), None);

        let button = layout.rect(Block::InstagramButton).unwrap();
        assert_eq!(layout.hit_test(button.center()), Some(Block::InstagramButton));
        assert!(layout.is_light_surface(button.center()));
        assert!(!layout.is_light_surface(title.center()));
    }

    #[test]
    fn test_tiny_viewport_is_clamped() {
        let layout = PageLayout::compute(Viewport::new(0.0, f64::NAN));
        assert_eq!(layout.viewport(), Viewport::new(40.0, 24.0));
        assert!(layout.document_height() > 24.0);
    }

    #[test]
    fn test_split_headings_stagger_words() {
        let tweens = Block::PortfolioHeading.entrances();
        assert_eq!(tweens.len(), 2);
        assert_eq!(tweens[1].delay_ms - tweens[0].delay_ms, WORD_STAGGER_MS);
        assert_eq!(Block::FooterTitle.entrances().len(), 1);
    }

    #[test]
    fn test_card_margin_scales_with_viewport() {
        let layout = PageLayout::compute(Viewport::new(120.0, 1000.0));
        assert_eq!(layout.reveal_margin(Block::Card(0)), -50.0);
        assert_eq!(layout.reveal_margin(Block::Stat(0)), 0.0);
    }
}
