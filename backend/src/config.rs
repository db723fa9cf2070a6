use std::path::PathBuf;

pub const WINDOW_TITLE: &str = "Window Display using SDL2 Library";
pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const FPS: u32 = 60;
pub const SPRITE_BMP: &str = "sprite.bmp";

/// Window and pacing settings for the display demo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Bitmap swapped into the block sprite, relative to the working directory.
    pub sprite_path: PathBuf,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: WINDOW_TITLE.to_string(),
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            fps: FPS,
            sprite_path: PathBuf::from(SPRITE_BMP),
        }
    }
}

impl DisplayConfig {
    pub fn center(&self) -> (i32, i32) {
        ((self.width / 2) as i32, (self.height / 2) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_window() {
        let config = DisplayConfig::default();
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.fps, 60);
        assert_eq!(config.center(), (400, 300));
        assert_eq!(config.sprite_path, PathBuf::from("sprite.bmp"));
    }
}
