//! The drawing boundary.
//!
//! Shapes and the editor never talk to a concrete graphics API; they draw
//! through [`Surface`], a minimal immediate-mode 2D interface modeled on the
//! canvas 2D context. [`crate::web::CanvasSurface`] implements it for the
//! browser. [`RecordingSurface`] implements it headlessly by logging every
//! call as a [`DrawOp`], which is what the tests assert against.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::convert::Infallible;

use crate::style::{Color, TextAlign};

/// Failure talking to a real drawing backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("2d rendering context unavailable")]
    ContextUnavailable,
    #[error("canvas call failed: {0}")]
    Js(String),
}

/// Stroke end-cap style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Stroke corner-join style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// A 2D immediate-mode drawing target.
///
/// Transform and alpha state is scoped by `save`/`restore`. Calls that can
/// fail on a real backend return `Result`; the rest are infallible.
pub trait Surface {
    /// Error produced by fallible drawing calls.
    type Error: std::fmt::Debug;

    // --- Sizing ---

    /// Size of the drawing area in CSS pixels.
    fn display_size(&self) -> (f64, f64);

    /// Resize the backing store, in device pixels.
    fn set_backing_size(&mut self, width: f64, height: f64);

    // --- State stack ---

    fn save(&mut self);
    fn restore(&mut self);

    // --- Transforms ---

    /// Replace the current transform with the matrix `[a c e; b d f]`.
    ///
    /// # Errors
    ///
    /// Backend-specific.
    #[allow(clippy::many_single_char_names)]
    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Backend-specific.
    fn translate(&mut self, x: f64, y: f64) -> Result<(), Self::Error>;

    /// Rotate by `angle` radians, clockwise in screen space.
    ///
    /// # Errors
    ///
    /// Backend-specific.
    fn rotate(&mut self, angle: f64) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Backend-specific.
    fn scale(&mut self, x: f64, y: f64) -> Result<(), Self::Error>;

    // --- Compositing ---

    fn global_alpha(&self) -> f64;
    fn set_global_alpha(&mut self, alpha: f64);

    /// Clear a rectangle in the current transform to transparent.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    // --- Path construction ---

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64);
    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64);

    /// # Errors
    ///
    /// Backend-specific (a negative radius is rejected by the canvas API).
    fn arc_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) -> Result<(), Self::Error>;

    /// Append a full axis-aligned ellipse centered on `(cx, cy)`.
    ///
    /// # Errors
    ///
    /// Backend-specific (negative radii are rejected by the canvas API).
    fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64) -> Result<(), Self::Error>;

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn close_path(&mut self);

    // --- Painting ---

    /// Fill the current path with a solid color.
    fn fill(&mut self, color: Color);

    /// Stroke the current path with a solid color.
    fn stroke(&mut self, color: Color, width: f64);

    fn set_line_cap(&mut self, cap: LineCap);
    fn set_line_join(&mut self, join: LineJoin);

    /// Set the dash pattern for subsequent strokes; empty means solid.
    ///
    /// # Errors
    ///
    /// Backend-specific.
    fn set_line_dash(&mut self, segments: &[f64]) -> Result<(), Self::Error>;

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color, line_width: f64);

    // --- Text ---

    /// Set the CSS font shorthand used by subsequent text calls.
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);

    /// Fill `text` with its top edge at `y`, anchored at `x` per the
    /// current alignment.
    ///
    /// # Errors
    ///
    /// Backend-specific.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color) -> Result<(), Self::Error>;

    /// Outline `text`; same anchoring as [`Surface::fill_text`].
    ///
    /// # Errors
    ///
    /// Backend-specific.
    fn stroke_text(&mut self, text: &str, x: f64, y: f64, color: Color, width: f64) -> Result<(), Self::Error>;
}

/// Run `draw` between `save` and `restore`. The restore happens even when
/// `draw` fails part-way.
///
/// # Errors
///
/// Returns whatever `draw` returns.
pub fn scoped<S, F>(surface: &mut S, draw: F) -> Result<(), S::Error>
where
    S: Surface + ?Sized,
    F: FnOnce(&mut S) -> Result<(), S::Error>,
{
    surface.save();
    let result = draw(surface);
    surface.restore();
    result
}

// =============================================================
// Recording surface
// =============================================================

/// One recorded call on a [`RecordingSurface`].
///
/// Painting ops carry the global alpha in effect when they were issued.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    SetBackingSize(f64, f64),
    Save,
    Restore,
    SetTransform([f64; 6]),
    Translate(f64, f64),
    Rotate(f64),
    Scale(f64, f64),
    ClearRect(f64, f64, f64, f64),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    BezierCurveTo([f64; 6]),
    QuadraticCurveTo([f64; 4]),
    ArcTo([f64; 5]),
    Ellipse([f64; 4]),
    Rect(f64, f64, f64, f64),
    ClosePath,
    Fill { color: Color, alpha: f64 },
    Stroke { color: Color, width: f64, alpha: f64 },
    LineCap(LineCap),
    LineJoin(LineJoin),
    LineDash(Vec<f64>),
    FillRect { rect: [f64; 4], color: Color, alpha: f64 },
    StrokeRect { rect: [f64; 4], color: Color, width: f64, alpha: f64 },
    Font(String),
    TextAlign(TextAlign),
    FillText { text: String, x: f64, y: f64, color: Color, alpha: f64 },
    StrokeText { text: String, x: f64, y: f64, color: Color, width: f64, alpha: f64 },
}

/// A headless [`Surface`] that records every call.
///
/// Only global alpha is tracked as live state (so painting ops can report
/// the effective opacity); transforms are recorded but not evaluated.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    alpha: f64,
    saved_alpha: Vec<f64>,
    display: (f64, f64),
    backing: (f64, f64),
}

impl RecordingSurface {
    /// A surface whose display area is `width` × `height` CSS pixels.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            ops: Vec::new(),
            alpha: 1.0,
            saved_alpha: Vec::new(),
            display: (width, height),
            backing: (width, height),
        }
    }

    /// Every call recorded so far, oldest first.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drop the recorded calls, keeping the current alpha and sizes.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Pretend the host element was resized.
    pub fn set_display_size(&mut self, width: f64, height: f64) {
        self.display = (width, height);
    }

    /// Backing-store size last set through [`Surface::set_backing_size`].
    #[must_use]
    pub fn backing_size(&self) -> (f64, f64) {
        self.backing
    }

    /// Depth of the save stack; zero when every `save` was restored.
    #[must_use]
    pub fn save_depth(&self) -> usize {
        self.saved_alpha.len()
    }
}

impl Surface for RecordingSurface {
    type Error = Infallible;

    fn display_size(&self) -> (f64, f64) {
        self.display
    }

    fn set_backing_size(&mut self, width: f64, height: f64) {
        self.backing = (width, height);
        self.ops.push(DrawOp::SetBackingSize(width, height));
    }

    fn save(&mut self) {
        self.saved_alpha.push(self.alpha);
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        if let Some(alpha) = self.saved_alpha.pop() {
            self.alpha = alpha;
        }
        self.ops.push(DrawOp::Restore);
    }

    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Result<(), Infallible> {
        self.ops.push(DrawOp::SetTransform([a, b, c, d, e, f]));
        Ok(())
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), Infallible> {
        self.ops.push(DrawOp::Translate(x, y));
        Ok(())
    }

    fn rotate(&mut self, angle: f64) -> Result<(), Infallible> {
        self.ops.push(DrawOp::Rotate(angle));
        Ok(())
    }

    fn scale(&mut self, x: f64, y: f64) -> Result<(), Infallible> {
        self.ops.push(DrawOp::Scale(x, y));
        Ok(())
    }

    fn global_alpha(&self) -> f64 {
        self.alpha
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::ClearRect(x, y, width, height));
    }

    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::LineTo(x, y));
    }

    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        self.ops.push(DrawOp::BezierCurveTo([cp1x, cp1y, cp2x, cp2y, x, y]));
    }

    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.ops.push(DrawOp::QuadraticCurveTo([cpx, cpy, x, y]));
    }

    fn arc_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) -> Result<(), Infallible> {
        self.ops.push(DrawOp::ArcTo([x1, y1, x2, y2, radius]));
        Ok(())
    }

    fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64) -> Result<(), Infallible> {
        self.ops.push(DrawOp::Ellipse([cx, cy, rx, ry]));
        Ok(())
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::Rect(x, y, width, height));
    }

    fn close_path(&mut self) {
        self.ops.push(DrawOp::ClosePath);
    }

    fn fill(&mut self, color: Color) {
        self.ops.push(DrawOp::Fill { color, alpha: self.alpha });
    }

    fn stroke(&mut self, color: Color, width: f64) {
        self.ops.push(DrawOp::Stroke { color, width, alpha: self.alpha });
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ops.push(DrawOp::LineCap(cap));
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.ops.push(DrawOp::LineJoin(join));
    }

    fn set_line_dash(&mut self, segments: &[f64]) -> Result<(), Infallible> {
        self.ops.push(DrawOp::LineDash(segments.to_vec()));
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.ops.push(DrawOp::FillRect { rect: [x, y, width, height], color, alpha: self.alpha });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color, line_width: f64) {
        self.ops.push(DrawOp::StrokeRect {
            rect: [x, y, width, height],
            color,
            width: line_width,
            alpha: self.alpha,
        });
    }

    fn set_font(&mut self, font: &str) {
        self.ops.push(DrawOp::Font(font.to_owned()));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ops.push(DrawOp::TextAlign(align));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color) -> Result<(), Infallible> {
        self.ops.push(DrawOp::FillText { text: text.to_owned(), x, y, color, alpha: self.alpha });
        Ok(())
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64, color: Color, width: f64) -> Result<(), Infallible> {
        self.ops.push(DrawOp::StrokeText {
            text: text.to_owned(),
            x,
            y,
            color,
            width,
            alpha: self.alpha,
        });
        Ok(())
    }
}
