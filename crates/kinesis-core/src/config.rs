use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::motion::SpringParams;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MotionConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub springs: SpringsConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub ticker: TickerConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub scramble: ScrambleConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log files live here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Frame deltas above this are clamped before integration (throttled hosts)
    #[serde(default = "default_max_frame_delta")]
    pub max_frame_delta_ms: f64,
    /// Longest single spring integration step
    #[serde(default = "default_spring_substep")]
    pub spring_substep_ms: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            max_frame_delta_ms: default_max_frame_delta(),
            spring_substep_ms: default_spring_substep(),
        }
    }
}

/// Spring coefficients as they appear in the config file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    /// Distance from target below which the spring may settle
    #[serde(default = "default_rest_delta")]
    pub rest_delta: f64,
    /// Speed below which the spring may settle
    #[serde(default = "default_rest_speed")]
    pub rest_speed: f64,
}

impl SpringConfig {
    pub const fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            rest_delta: 0.01,
            rest_speed: 0.01,
        }
    }

    pub fn params(&self) -> crate::Result<SpringParams> {
        SpringParams::new(self.stiffness, self.damping)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpringsConfig {
    /// Cursor indicator position and size
    #[serde(default = "default_cursor_spring")]
    pub cursor: SpringConfig,
    /// Magnetic wrapper while the pointer is inside
    #[serde(default = "default_magnetic_track_spring")]
    pub magnetic_track: SpringConfig,
    /// Magnetic wrapper returning to rest after pointer leave
    #[serde(default = "default_magnetic_snap_spring")]
    pub magnetic_snap: SpringConfig,
    /// Scroll progress bar
    #[serde(default = "default_progress_bar_spring")]
    pub progress_bar: SpringConfig,
    /// Hover nudge on card arrows
    #[serde(default = "default_arrow_hover_spring")]
    pub arrow_hover: SpringConfig,
}

impl Default for SpringsConfig {
    fn default() -> Self {
        Self {
            cursor: default_cursor_spring(),
            magnetic_track: default_magnetic_track_spring(),
            magnetic_snap: default_magnetic_snap_spring(),
            progress_bar: default_progress_bar_spring(),
            arrow_hover: default_arrow_hover_spring(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Per-reference-frame interpolation factor for the smoothed offset
    #[serde(default = "default_scroll_lerp")]
    pub lerp: f64,
    /// Frame duration the lerp factor was tuned at
    #[serde(default = "default_reference_frame")]
    pub reference_frame_ms: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            lerp: default_scroll_lerp(),
            reference_frame_ms: default_reference_frame(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerConfig {
    /// Speed of the band under the hero, in pixels per second
    #[serde(default = "default_lead_ticker_speed")]
    pub lead_speed_px_per_s: f64,
    /// Speed of the reversed band before the portfolio
    #[serde(default = "default_trail_ticker_speed")]
    pub trail_speed_px_per_s: f64,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            lead_speed_px_per_s: default_lead_ticker_speed(),
            trail_speed_px_per_s: default_trail_ticker_speed(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Visible fraction that fires a reveal
    #[serde(default = "default_reveal_threshold")]
    pub threshold: f64,
    /// Wall-clock length of the counter animation
    #[serde(default = "default_counter_duration")]
    pub counter_duration_secs: f64,
    /// Counter increments per second
    #[serde(default = "default_counter_rate")]
    pub counter_steps_per_sec: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: default_reveal_threshold(),
            counter_duration_secs: default_counter_duration(),
            counter_steps_per_sec: default_counter_rate(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrambleConfig {
    #[serde(default = "default_scramble_tick")]
    pub tick_ms: f64,
    /// Iteration increment per tick
    #[serde(default = "default_scramble_step")]
    pub step: f64,
    /// Replacement characters for unrevealed positions
    #[serde(default = "default_scramble_alphabet")]
    pub alphabet: String,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_scramble_tick(),
            step: default_scramble_step(),
            alphabet: default_scramble_alphabet(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Target frames per second for the terminal host
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// Rows scrolled per wheel notch or key press
    #[serde(default = "default_scroll_step")]
    pub scroll_step: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            scroll_step: default_scroll_step(),
        }
    }
}

impl UiConfig {
    /// Frame period in milliseconds, falling back to ~60fps
    pub fn frame_period_ms(&self) -> u64 {
        if self.frame_rate == 0 {
            16
        } else {
            (1000 / self.frame_rate as u64).max(1)
        }
    }
}

/// Vim-style key bindings for the terminal host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default = "default_key_quit")]
    pub quit: String,

    // Scrolling
    #[serde(default = "default_key_scroll_down")]
    pub scroll_down: String,
    #[serde(default = "default_key_scroll_up")]
    pub scroll_up: String,
    #[serde(default = "default_key_page_down")]
    pub page_down: String,
    #[serde(default = "default_key_page_up")]
    pub page_up: String,
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,

    /// Replay the footer scramble
    #[serde(default = "default_key_rescramble")]
    pub rescramble: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            scroll_down: default_key_scroll_down(),
            scroll_up: default_key_scroll_up(),
            page_down: default_key_page_down(),
            page_up: default_key_page_up(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
            rescramble: default_key_rescramble(),
        }
    }
}

fn default_key_quit() -> String {
    "q".to_string()
}

fn default_key_scroll_down() -> String {
    "j".to_string()
}

fn default_key_scroll_up() -> String {
    "k".to_string()
}

fn default_key_page_down() -> String {
    "<PageDown>".to_string()
}

fn default_key_page_up() -> String {
    "<PageUp>".to_string()
}

fn default_key_jump_to_top() -> String {
    "gg".to_string()
}

fn default_key_jump_to_bottom() -> String {
    "G".to_string()
}

fn default_key_rescramble() -> String {
    "r".to_string()
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kinesis")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_frame_delta() -> f64 {
    1000.0
}

fn default_spring_substep() -> f64 {
    8.0
}

fn default_rest_delta() -> f64 {
    0.01
}

fn default_rest_speed() -> f64 {
    0.01
}

fn default_cursor_spring() -> SpringConfig {
    SpringConfig::new(500.0, 35.0)
}

fn default_magnetic_track_spring() -> SpringConfig {
    SpringConfig::new(600.0, 40.0)
}

fn default_magnetic_snap_spring() -> SpringConfig {
    SpringConfig::new(300.0, 20.0)
}

fn default_arrow_hover_spring() -> SpringConfig {
    SpringConfig::new(400.0, 10.0)
}

fn default_progress_bar_spring() -> SpringConfig {
    SpringConfig {
        rest_delta: 0.001,
        ..SpringConfig::new(100.0, 30.0)
    }
}

fn default_scroll_lerp() -> f64 {
    0.07
}

fn default_reference_frame() -> f64 {
    1000.0 / 60.0
}

fn default_lead_ticker_speed() -> f64 {
    28.0
}

fn default_trail_ticker_speed() -> f64 {
    22.0
}

fn default_reveal_threshold() -> f64 {
    0.5
}

fn default_counter_duration() -> f64 {
    2.0
}

fn default_counter_rate() -> f64 {
    60.0
}

fn default_scramble_tick() -> f64 {
    30.0
}

fn default_scramble_step() -> f64 {
    0.5
}

fn default_scramble_alphabet() -> String {
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789".to_string()
}

fn default_frame_rate() -> u32 {
    60
}

fn default_scroll_step() -> u16 {
    3
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl MotionConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML document
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Render configuration as a TOML document
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/kinesis/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("kinesis")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the log file path used by the interactive host
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("kinesis.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MotionConfig::default();
        assert_eq!(config.springs.cursor, SpringConfig::new(500.0, 35.0));
        assert_eq!(config.springs.progress_bar.rest_delta, 0.001);
        assert!((config.scroll.lerp - 0.07).abs() < f64::EPSILON);
        assert_eq!(config.scramble.tick_ms, 30.0);
        assert_eq!(config.reveal.threshold, 0.5);
        assert_eq!(config.ui.frame_period_ms(), 16);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = MotionConfig::from_toml(
            r#"
            [ticker]
            lead_speed_px_per_s = 40.0

            [springs.cursor]
            stiffness = 420.0
            damping = 28.0
            "#,
        )
        .unwrap();
        assert_eq!(config.ticker.lead_speed_px_per_s, 40.0);
        assert_eq!(config.ticker.trail_speed_px_per_s, 22.0);
        assert_eq!(config.springs.cursor.stiffness, 420.0);
        assert_eq!(config.springs.cursor.rest_delta, 0.01);
        assert_eq!(config.springs.magnetic_snap, SpringConfig::new(300.0, 20.0));
        assert_eq!(config.scramble.alphabet.len(), 36);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = MotionConfig::from_toml("[ticker]\nlead_speed_px_per_s = \"fast\"").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_toml_round_trip_keeps_values() {
        let mut config = MotionConfig::default();
        config.ui.frame_rate = 30;
        let text = config.to_toml().unwrap();
        let parsed = MotionConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.ui.frame_rate, 30);
        assert_eq!(parsed.ui.frame_period_ms(), 33);
    }

    #[test]
    fn test_zero_frame_rate_falls_back() {
        let ui = UiConfig {
            frame_rate: 0,
            ..Default::default()
        };
        assert_eq!(ui.frame_period_ms(), 16);
    }
}
