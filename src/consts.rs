//! Shared constants for the scene crate.

use crate::style::Color;

// ── Viewport ────────────────────────────────────────────────────

/// Smallest zoom factor the camera accepts by default.
pub const ZOOM_MIN: f64 = 0.1;

/// Largest zoom factor the camera accepts by default.
pub const ZOOM_MAX: f64 = 10.0;

// ── History ─────────────────────────────────────────────────────

/// Default number of commands kept on the undo stack.
pub const MAX_HISTORY: usize = 100;

// ── Hit-testing ─────────────────────────────────────────────────

/// Side length of a corner or point handle, in screen pixels.
pub const HANDLE_SIZE_PX: f64 = 8.0;

/// Side length of a rotation zone outside each corner, in screen pixels.
pub const ROTATION_ZONE_PX: f64 = 12.0;

/// Gap between a corner handle and its rotation zone, in canvas units.
pub const ROTATION_ZONE_GAP: f64 = 2.0;

// ── Shapes ──────────────────────────────────────────────────────

/// Minimum width and height reported for a non-empty path.
pub const PATH_MIN_EXTENT: f64 = 1.0;

/// Default text box width.
pub const TEXT_BOX_WIDTH: f64 = 200.0;

/// Default text box height.
pub const TEXT_BOX_HEIGHT: f64 = 50.0;

/// Default text font size in canvas units.
pub const TEXT_FONT_SIZE: f64 = 16.0;

/// Default CSS font weight for text.
pub const TEXT_FONT_WEIGHT: u16 = 400;

// ── Rendering ───────────────────────────────────────────────────

/// Opacity multiplier for objects outside the entered group.
pub const ISOLATION_DIM_OPACITY: f64 = 0.3;

/// Padding around the entered-group outline, in screen pixels.
pub const GROUP_INDICATOR_PADDING_PX: f64 = 4.0;

/// Dash segment length of the entered-group outline, in screen pixels.
pub const GROUP_INDICATOR_DASH_PX: f64 = 4.0;

/// Stroke color of selection boxes, handles and the group indicator.
pub const SELECTION_COLOR: Color = Color::rgb(0x0e, 0xa5, 0xe9);

/// Fill color of selection handles.
pub const HANDLE_FILL: Color = Color::WHITE;
