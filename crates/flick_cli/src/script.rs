//! Gesture scripts
//!
//! ```toml
//! [surface]
//! max_x = 0
//! max_y = 2000
//! start_y = 500
//! axes = "vertical"
//!
//! [[steps]]
//! kind = "press"
//! x = 40
//! y = 300
//!
//! [[steps]]
//! kind = "tick"
//! count = 3
//! ```

use anyhow::{Context, Result};
use flick_charm::FlickAxes;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A scripted gesture session against one surface
#[derive(Debug, Deserialize)]
pub struct GestureScript {
    pub surface: SurfaceSpec,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Scroll range and starting position of the virtual surface
#[derive(Debug, Deserialize)]
pub struct SurfaceSpec {
    #[serde(default)]
    pub max_x: i32,
    #[serde(default)]
    pub max_y: i32,
    #[serde(default)]
    pub start_x: i32,
    #[serde(default)]
    pub start_y: i32,
    #[serde(default)]
    pub axes: FlickAxes,
}

/// One scripted input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Step {
    Press { x: i32, y: i32 },
    Move { x: i32, y: i32 },
    Release { x: i32, y: i32 },
    Tick {
        #[serde(default = "default_tick_count")]
        count: u32,
    },
}

fn default_tick_count() -> u32 {
    1
}

impl Step {
    pub fn label(&self) -> String {
        match self {
            Step::Press { x, y } => format!("press ({x}, {y})"),
            Step::Move { x, y } => format!("move ({x}, {y})"),
            Step::Release { x, y } => format!("release ({x}, {y})"),
            Step::Tick { count } => format!("tick x{count}"),
        }
    }
}

impl GestureScript {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid gesture script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }
}
