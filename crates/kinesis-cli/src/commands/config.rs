use anyhow::Result;
use tracing::info;

use kinesis_core::MotionConfig;

pub fn run(config: &MotionConfig, init: bool) -> Result<()> {
    let path = MotionConfig::config_path();

    if init {
        if path.exists() {
            println!("Config already exists at {}", path.display());
        } else {
            config.save()?;
            info!(path = %path.display(), "Wrote default configuration");
            println!("Wrote configuration to {}", path.display());
        }
        return Ok(());
    }

    print!("{}", render(config)?);
    Ok(())
}

/// Effective configuration as TOML, headed by the file it is read from
fn render(config: &MotionConfig) -> Result<String> {
    let path = MotionConfig::config_path();
    Ok(format!("# {}\n{}", path.display(), config.to_toml()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_parses_back() {
        let rendered = render(&MotionConfig::default()).unwrap();
        assert!(rendered.starts_with("# "));
        let parsed = MotionConfig::from_toml(&rendered).unwrap();
        assert_eq!(parsed.ui.frame_rate, 60);
        assert_eq!(parsed.keymap.jump_to_top, "gg");
    }
}
