pub mod app;
pub mod event;
pub mod input;
pub mod keymap;
pub mod page;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use page::{Block, Page, PageLayout, PageSnapshot};
pub use theme::Theme;

/// Terminal rows are about twice as tall as columns are wide, so one row
/// covers two page pixels while one column covers one
pub const PX_PER_ROW: f64 = 2.0;

/// The cursor disc is drawn at this fraction of its pixel size
pub const CURSOR_SCALE: f64 = 0.25;
