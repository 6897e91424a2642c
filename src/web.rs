//! Browser [`Surface`] over `CanvasRenderingContext2d`.
//!
//! This module is the only place that touches `web_sys`. It is compiled on
//! every target but only does anything useful inside a browser.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::style::{Color, TextAlign};
use crate::surface::{LineCap, LineJoin, Surface, SurfaceError};

/// A `<canvas>` element and its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the 2D context of `canvas`.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::ContextUnavailable`] if the element has no 2D
    /// context (already claimed by WebGL, or detached).
    pub fn from_canvas(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or(SurfaceError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::ContextUnavailable)?;
        ctx.set_text_baseline("top");
        Ok(Self { canvas, ctx })
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

/// The window's device pixel ratio, or `None` outside a browser.
#[must_use]
pub fn device_pixel_ratio() -> Option<f64> {
    web_sys::window().map(|w| w.device_pixel_ratio())
}

fn js_error(value: JsValue) -> SurfaceError {
    SurfaceError::Js(format!("{value:?}"))
}

fn cap_keyword(cap: LineCap) -> &'static str {
    match cap {
        LineCap::Butt => "butt",
        LineCap::Round => "round",
        LineCap::Square => "square",
    }
}

fn join_keyword(join: LineJoin) -> &'static str {
    match join {
        LineJoin::Miter => "miter",
        LineJoin::Round => "round",
        LineJoin::Bevel => "bevel",
    }
}

impl Surface for CanvasSurface {
    type Error = SurfaceError;

    fn display_size(&self) -> (f64, f64) {
        let rect = self.canvas.get_bounding_client_rect();
        (rect.width(), rect.height())
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn set_backing_size(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width.round().max(0.0) as u32);
        self.canvas.set_height(height.round().max(0.0) as u32);
        // Resizing resets context state.
        self.ctx.set_text_baseline("top");
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Result<(), SurfaceError> {
        self.ctx.set_transform(a, b, c, d, e, f).map_err(js_error)
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.ctx.translate(x, y).map_err(js_error)
    }

    fn rotate(&mut self, angle: f64) -> Result<(), SurfaceError> {
        self.ctx.rotate(angle).map_err(js_error)
    }

    fn scale(&mut self, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.ctx.scale(x, y).map_err(js_error)
    }

    fn global_alpha(&self) -> f64 {
        self.ctx.global_alpha()
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        self.ctx.bezier_curve_to(cp1x, cp1y, cp2x, cp2y, x, y);
    }

    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.ctx.quadratic_curve_to(cpx, cpy, x, y);
    }

    fn arc_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) -> Result<(), SurfaceError> {
        self.ctx.arc_to(x1, y1, x2, y2, radius).map_err(js_error)
    }

    fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64) -> Result<(), SurfaceError> {
        self.ctx
            .ellipse(cx, cy, rx, ry, 0.0, 0.0, std::f64::consts::TAU)
            .map_err(js_error)
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.rect(x, y, width, height);
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn fill(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn stroke(&mut self, color: Color, width: f64) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.stroke();
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ctx.set_line_cap(cap_keyword(cap));
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.ctx.set_line_join(join_keyword(join));
    }

    fn set_line_dash(&mut self, segments: &[f64]) -> Result<(), SurfaceError> {
        let dash_array = js_sys::Array::new();
        for &segment in segments {
            dash_array.push(&segment.into());
        }
        self.ctx.set_line_dash(&dash_array).map_err(js_error)
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(x, y, width, height);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color, line_width: f64) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(line_width);
        self.ctx.stroke_rect(x, y, width, height);
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ctx.set_text_align(align.as_str());
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color) -> Result<(), SurfaceError> {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_text(text, x, y).map_err(js_error)
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64, color: Color, width: f64) -> Result<(), SurfaceError> {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.stroke_text(text, x, y).map_err(js_error)
    }
}
