use crate::pipeline::passes::RenderStyle;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub controls: ControlsConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_target_fps")]
    pub target_fps: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
            target_fps: default_target_fps(),
        }
    }
}

fn default_width() -> usize {
    1600
}
fn default_height() -> usize {
    1000
}
fn default_title() -> String {
    "Letter 3D".to_string()
}
fn default_target_fps() -> usize {
    60
}

/// Per-frame deltas applied while a key is held.
#[derive(Debug, Deserialize, PartialEq)]
pub struct ControlsConfig {
    /// World units per frame.
    #[serde(default = "default_move_step")]
    pub move_step: f32,
    /// Degrees per frame.
    #[serde(default = "default_rotate_step")]
    pub rotate_step: f32,
    /// Scale grows by (1 + step) or shrinks by (1 - step) per frame.
    #[serde(default = "default_scale_step")]
    pub scale_step: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            move_step: default_move_step(),
            rotate_step: default_rotate_step(),
            scale_step: default_scale_step(),
        }
    }
}

fn default_move_step() -> f32 {
    0.1
}
fn default_rotate_step() -> f32 {
    2.0
}
fn default_scale_step() -> f32 {
    0.1
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct RenderConfig {
    #[serde(default = "default_background")]
    pub background: [f32; 3],
    #[serde(default = "default_grid_color")]
    pub grid_color: [f32; 3],
    #[serde(default = "default_axis_length")]
    pub axis_length: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            grid_color: default_grid_color(),
            axis_length: default_axis_length(),
        }
    }
}

fn default_background() -> [f32; 3] {
    [0.15, 0.15, 0.15]
}
fn default_grid_color() -> [f32; 3] {
    [0.2, 0.2, 0.2]
}
fn default_axis_length() -> f32 {
    5.0
}

impl RenderConfig {
    pub fn style(&self) -> RenderStyle {
        RenderStyle {
            background: self.background.into(),
            grid_color: self.grid_color.into(),
            axis_length: self.axis_length,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        let config: Self =
            toml::from_str(content).map_err(|e| format!("Failed to parse TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(format!(
                "Window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            ));
        }
        if self.window.target_fps == 0 {
            return Err("target_fps must be at least 1".to_string());
        }
        if !(self.render.axis_length > 0.0) {
            return Err(format!(
                "axis_length must be positive, got {}",
                self.render.axis_length
            ));
        }
        for (name, color) in [
            ("background", self.render.background),
            ("grid_color", self.render.grid_color),
        ] {
            if color.iter().any(|c| !(0.0..=1.0).contains(c)) {
                return Err(format!("{} channels must lie in [0, 1], got {:?}", name, color));
            }
        }
        Ok(())
    }
}
