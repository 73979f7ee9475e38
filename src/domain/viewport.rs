// Responsive column resolution
use serde::Serialize;

const SMALL_BREAKPOINT_PX: u32 = 640;
const MEDIUM_BREAKPOINT_PX: u32 = 1024;

/// Number of grid columns, always 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ColumnCount(u8);

impl ColumnCount {
    pub fn for_width(width_px: u32) -> Self {
        if width_px < SMALL_BREAKPOINT_PX {
            Self(1)
        } else if width_px < MEDIUM_BREAKPOINT_PX {
            Self(2)
        } else {
            Self(3)
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}
