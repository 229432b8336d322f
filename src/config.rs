//! Static host configuration for capture runs.

use serde::{Deserialize, Serialize};

use crate::foundation::core::FrameSize;
use crate::foundation::error::{TurnshotError, TurnshotResult};

/// Host-configured fields for a capture batch.
///
/// Every field has a default; JSON input may specify any subset.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Output image dimensions.
    #[serde(default = "default_frame")]
    pub frame: FrameSize,
    /// Seconds a still burst stays open between start and stop.
    #[serde(default = "default_frame_duration_secs")]
    pub frame_duration_secs: f64,
    /// Decimation factor for continuous capture: forward every Nth frame.
    #[serde(default = "default_frame_skip")]
    pub frame_skip: u32,
    /// Settle time after each rotate/refocus step, in seconds.
    #[serde(default = "default_auto_focus_secs")]
    pub auto_focus_secs: f64,
    /// Continuous capture length, unless the asset declares its own.
    #[serde(default = "default_clip_secs")]
    pub clip_secs: f64,
    /// Cooperative scheduler rate (ticks per rendered second).
    #[serde(default = "default_ticks_per_second")]
    pub ticks_per_second: u32,
}

fn default_frame() -> FrameSize {
    FrameSize {
        width: 640,
        height: 480,
    }
}

fn default_frame_duration_secs() -> f64 {
    0.1
}

fn default_frame_skip() -> u32 {
    4
}

fn default_auto_focus_secs() -> f64 {
    3.0
}

fn default_clip_secs() -> f64 {
    3.0
}

fn default_ticks_per_second() -> u32 {
    60
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            frame: default_frame(),
            frame_duration_secs: default_frame_duration_secs(),
            frame_skip: default_frame_skip(),
            auto_focus_secs: default_auto_focus_secs(),
            clip_secs: default_clip_secs(),
            ticks_per_second: default_ticks_per_second(),
        }
    }
}

impl CaptureConfig {
    /// Check field ranges.
    pub fn validate(&self) -> TurnshotResult<()> {
        if self.frame.width == 0 || self.frame.height == 0 {
            return Err(TurnshotError::validation(
                "capture width/height must be non-zero",
            ));
        }
        if self.frame_skip == 0 {
            return Err(TurnshotError::validation("frame_skip must be >= 1"));
        }
        if !self.frame_duration_secs.is_finite() || self.frame_duration_secs <= 0.0 {
            return Err(TurnshotError::validation(
                "frame_duration_secs must be > 0",
            ));
        }
        if !self.auto_focus_secs.is_finite() || self.auto_focus_secs < 0.0 {
            return Err(TurnshotError::validation("auto_focus_secs must be >= 0"));
        }
        if !self.clip_secs.is_finite() || self.clip_secs <= 0.0 {
            return Err(TurnshotError::validation("clip_secs must be > 0"));
        }
        if self.ticks_per_second == 0 {
            return Err(TurnshotError::validation("ticks_per_second must be >= 1"));
        }
        Ok(())
    }

    /// Parse and validate a JSON config; absent fields take defaults.
    pub fn from_json_str(json: &str) -> TurnshotResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| TurnshotError::validation(format!("invalid capture config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
