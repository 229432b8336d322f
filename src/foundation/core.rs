use crate::foundation::error::{TurnshotError, TurnshotResult};

/// Output frame dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameSize {
    /// Create a validated frame size with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> TurnshotResult<Self> {
        if width == 0 || height == 0 {
            return Err(TurnshotError::validation(
                "frame width/height must be non-zero",
            ));
        }
        Ok(Self { width, height })
    }

    /// Byte length of one RGBA8 frame of this size.
    pub fn rgba8_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

/// One step of the cooperative scheduling substrate (one tick per rendered
/// frame).
///
/// `now_secs` is the substrate's wall-clock position; duration waits compare
/// against it, so a tick source must produce a non-decreasing value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    /// 0-based tick index.
    pub index: u64,
    /// Scheduler time in seconds at this tick.
    pub now_secs: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_size_rejects_zero_dimensions() {
        assert!(FrameSize::new(0, 480).is_err());
        assert!(FrameSize::new(640, 0).is_err());
        assert!(FrameSize::new(640, 480).is_ok());
    }

    #[test]
    fn rgba8_len_counts_four_bytes_per_pixel() {
        let size = FrameSize::new(8, 4).unwrap();
        assert_eq!(size.rgba8_len(), 8 * 4 * 4);
    }
}
