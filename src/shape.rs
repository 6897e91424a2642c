//! Canvas objects: shared placement/style state plus a closed set of shape
//! payloads.
//!
//! Every object lives in its own local space: the origin is `(x, y)` in the
//! parent space (the document, or the enclosing group), and rotation turns
//! the object about the center of its local bounds. `render` draws in local
//! space; `render_placed` applies the object's own translate, rotate and
//! opacity first.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{TEXT_BOX_HEIGHT, TEXT_BOX_WIDTH, TEXT_FONT_SIZE, TEXT_FONT_WEIGHT};
use crate::geometry::{Bounds, Point, apply_rotation, corner_handles, rotate_point, rotated_extent};
use crate::group::GroupShape;
use crate::order::OrderKey;
use crate::path::{PathSegment, PathShape};
use crate::style::{Color, Fill, Stroke, TextAlign};
use crate::surface::{Surface, scoped};

/// Object identifier (UUID v4).
pub type ObjectId = Uuid;

/// A placed, styled shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasObject {
    pub id: ObjectId,
    pub name: String,
    pub order: OrderKey,
    pub x: f64,
    pub y: f64,
    /// Radians, about the center of the local bounds.
    pub rotation: f64,
    pub opacity: f64,
    pub visible: bool,
    pub locked: bool,
    pub fill: Option<Fill>,
    pub stroke: Option<Stroke>,
    pub shape: Shape,
}

/// The variant payload of a [`CanvasObject`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Rect(RectShape),
    Ellipse(EllipseShape),
    Path(PathShape),
    Text(TextShape),
    Group(GroupShape),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectShape {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub corner_radius: f64,
}

/// Ellipse inscribed in a `2·radius_x` × `2·radius_y` box whose top-left is
/// the object origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipseShape {
    pub radius_x: f64,
    pub radius_y: f64,
}

/// A single line of text in a fixed box, top-aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextShape {
    pub text: String,
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
    pub font_family: String,
    pub font_weight: u16,
    pub align: TextAlign,
}

impl TextShape {
    /// Text with the default box, font and alignment.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            width: TEXT_BOX_WIDTH,
            height: TEXT_BOX_HEIGHT,
            font_size: TEXT_FONT_SIZE,
            font_family: String::from("sans-serif"),
            font_weight: TEXT_FONT_WEIGHT,
            align: TextAlign::Left,
        }
    }

    /// CSS font shorthand, e.g. `400 16px sans-serif`.
    #[must_use]
    pub fn font(&self) -> String {
        format!("{} {}px {}", self.font_weight, self.font_size, self.font_family)
    }

    /// Horizontal anchor inside the box for the current alignment.
    #[must_use]
    pub fn anchor_x(&self) -> f64 {
        match self.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => self.width / 2.0,
            TextAlign::Right => self.width,
        }
    }
}

impl Shape {
    /// Display name given to new objects of this variant.
    #[must_use]
    pub fn default_name(&self) -> &'static str {
        match self {
            Self::Rect(_) => "Rectangle",
            Self::Ellipse(_) => "Ellipse",
            Self::Path(_) => "Path",
            Self::Text(_) => "Text",
            Self::Group(_) => "Group",
        }
    }

    /// Short lowercase tag, matching the serialized `type`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Rect(_) => "rect",
            Self::Ellipse(_) => "ellipse",
            Self::Path(_) => "path",
            Self::Text(_) => "text",
            Self::Group(_) => "group",
        }
    }

    /// Bounds in the owning object's local space.
    #[must_use]
    pub fn local_bounds(&self) -> Bounds {
        match self {
            Self::Rect(r) => Bounds::new(0.0, 0.0, r.width, r.height),
            Self::Ellipse(e) => Bounds::new(0.0, 0.0, e.radius_x * 2.0, e.radius_y * 2.0),
            Self::Text(t) => Bounds::new(0.0, 0.0, t.width, t.height),
            Self::Path(p) => p.local_bounds(),
            Self::Group(g) => g.local_bounds(),
        }
    }
}

// =============================================================
// Construction
// =============================================================

impl CanvasObject {
    /// A new visible, unlocked, unstyled object with a fresh id.
    #[must_use]
    pub fn new(x: f64, y: f64, shape: Shape) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: shape.default_name().to_owned(),
            order: OrderKey::first(),
            x,
            y,
            rotation: 0.0,
            opacity: 1.0,
            visible: true,
            locked: false,
            fill: None,
            stroke: None,
            shape,
        }
    }

    #[must_use]
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, Shape::Rect(RectShape { width, height, corner_radius: 0.0 }))
    }

    #[must_use]
    pub fn ellipse(x: f64, y: f64, radius_x: f64, radius_y: f64) -> Self {
        Self::new(x, y, Shape::Ellipse(EllipseShape { radius_x, radius_y }))
    }

    #[must_use]
    pub fn text(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self::new(x, y, Shape::Text(TextShape::new(text)))
    }

    #[must_use]
    pub fn path(x: f64, y: f64, segments: Vec<PathSegment>) -> Self {
        Self::new(x, y, Shape::Path(PathShape::new(segments)))
    }

    /// A two-segment path from `start` to `end`, named "Line".
    #[must_use]
    pub fn line(start: Point, end: Point) -> Self {
        let segments = vec![
            PathSegment::Move { x: 0.0, y: 0.0 },
            PathSegment::Line { x: end.x - start.x, y: end.y - start.y },
        ];
        Self::path(start.x, start.y, segments).with_name("Line")
    }

    /// A group at `(x, y)` whose children are already in group-local space.
    #[must_use]
    pub fn group(x: f64, y: f64, children: Vec<CanvasObject>) -> Self {
        Self::new(x, y, Shape::Group(GroupShape::new(children)))
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: OrderKey) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(Fill::solid(color));
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some(Stroke::new(color, width));
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }
}

// =============================================================
// Geometry
// =============================================================

impl CanvasObject {
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Bounds in local space (origin at the object position), pre-rotation.
    #[must_use]
    pub fn local_bounds(&self) -> Bounds {
        self.shape.local_bounds()
    }

    /// Bounds in the parent space, pre-rotation.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.local_bounds().translate(self.x, self.y)
    }

    /// Axis-aligned box covering the rotated bounds, in the parent space.
    #[must_use]
    pub fn extent(&self) -> Bounds {
        rotated_extent(self.bounds(), self.rotation)
    }

    /// Map a parent-space point into local space, undoing the rotation.
    #[must_use]
    pub fn to_local(&self, point: Point) -> Point {
        let local = point.offset(-self.x, -self.y);
        if self.rotation == 0.0 {
            return local;
        }
        rotate_point(local, self.local_bounds().center(), -self.rotation)
    }

    /// Undo the rotation of `point` about the bounds center, staying in the
    /// parent space. Selection UI is laid out in this unrotated frame.
    #[must_use]
    pub fn unrotate(&self, point: Point) -> Point {
        if self.rotation == 0.0 {
            return point;
        }
        rotate_point(point, self.bounds().center(), -self.rotation)
    }

    /// Whether a parent-space point hits this object. Hidden objects never hit.
    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        if !self.visible {
            return false;
        }
        let local = self.to_local(point);
        match &self.shape {
            Shape::Rect(RectShape { width, height, .. }) | Shape::Text(TextShape { width, height, .. }) => {
                local.x >= 0.0 && local.x <= *width && local.y >= 0.0 && local.y <= *height
            }
            Shape::Ellipse(e) => {
                if e.radius_x <= 0.0 || e.radius_y <= 0.0 {
                    return false;
                }
                let dx = (local.x - e.radius_x) / e.radius_x;
                let dy = (local.y - e.radius_y) / e.radius_y;
                dx * dx + dy * dy <= 1.0
            }
            Shape::Path(p) => p.local_bounds().contains(local),
            Shape::Group(g) => g.contains_local(local),
        }
    }

    /// Corner handle boxes around the unrotated bounds.
    #[must_use]
    pub fn handle_positions(&self, handle_size: f64) -> [Bounds; 4] {
        corner_handles(self.bounds(), handle_size)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Move the bounds origin to `bounds` and, where the variant has a size,
    /// take its width and height. Paths and groups only move.
    pub fn resize_to(&mut self, bounds: Bounds) {
        let current = self.bounds();
        self.translate(bounds.x - current.x, bounds.y - current.y);
        match &mut self.shape {
            Shape::Rect(r) => {
                r.width = bounds.width;
                r.height = bounds.height;
            }
            Shape::Text(t) => {
                t.width = bounds.width;
                t.height = bounds.height;
            }
            Shape::Ellipse(e) => {
                e.radius_x = bounds.width / 2.0;
                e.radius_y = bounds.height / 2.0;
            }
            Shape::Path(_) | Shape::Group(_) => {}
        }
    }

    #[must_use]
    pub fn as_group(&self) -> Option<&GroupShape> {
        match &self.shape {
            Shape::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut GroupShape> {
        match &mut self.shape {
            Shape::Group(g) => Some(g),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_path(&self) -> Option<&PathShape> {
        match &self.shape {
            Shape::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_path_mut(&mut self) -> Option<&mut PathShape> {
        match &mut self.shape {
            Shape::Path(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self.shape, Shape::Group(_))
    }
}

// =============================================================
// Rendering
// =============================================================

impl CanvasObject {
    /// Draw in local space; the caller has already placed the surface.
    ///
    /// # Errors
    ///
    /// Propagates surface errors.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<(), S::Error> {
        match &self.shape {
            Shape::Rect(r) => self.render_rect(surface, r),
            Shape::Ellipse(e) => self.render_ellipse(surface, e),
            Shape::Text(t) => self.render_text(surface, t),
            Shape::Path(p) => p.render(surface, self.fill, self.stroke),
            Shape::Group(g) => g.render(surface),
        }
    }

    /// Translate to the object origin, rotate about the local center,
    /// multiply opacity, then [`CanvasObject::render`]. Scoped by
    /// `save`/`restore`.
    ///
    /// # Errors
    ///
    /// Propagates surface errors.
    pub fn render_placed<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<(), S::Error> {
        scoped(surface, |s| {
            self.place(s)?;
            let alpha = s.global_alpha() * self.opacity;
            s.set_global_alpha(alpha);
            self.render(s)
        })
    }

    /// Push this object's translate and rotation onto the surface, so that
    /// subsequent drawing is in its local space.
    ///
    /// # Errors
    ///
    /// Propagates surface errors.
    pub fn place<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<(), S::Error> {
        surface.translate(self.x, self.y)?;
        apply_rotation(surface, self.local_bounds(), self.rotation)
    }

    fn paint<S: Surface + ?Sized>(&self, surface: &mut S) {
        if let Some(fill) = self.fill {
            surface.fill(fill.color());
        }
        if let Some(stroke) = self.stroke {
            surface.stroke(stroke.color, stroke.width);
        }
    }

    fn render_rect<S: Surface + ?Sized>(&self, surface: &mut S, rect: &RectShape) -> Result<(), S::Error> {
        let RectShape { width: w, height: h, corner_radius } = *rect;
        surface.begin_path();
        if corner_radius > 0.0 {
            let r = corner_radius.min(w.min(h) / 2.0);
            surface.move_to(r, 0.0);
            surface.line_to(w - r, 0.0);
            surface.arc_to(w, 0.0, w, r, r)?;
            surface.line_to(w, h - r);
            surface.arc_to(w, h, w - r, h, r)?;
            surface.line_to(r, h);
            surface.arc_to(0.0, h, 0.0, h - r, r)?;
            surface.line_to(0.0, r);
            surface.arc_to(0.0, 0.0, r, 0.0, r)?;
            surface.close_path();
        } else {
            surface.rect(0.0, 0.0, w, h);
        }
        self.paint(surface);
        Ok(())
    }

    fn render_ellipse<S: Surface + ?Sized>(&self, surface: &mut S, ellipse: &EllipseShape) -> Result<(), S::Error> {
        let EllipseShape { radius_x, radius_y } = *ellipse;
        if radius_x <= 0.0 || radius_y <= 0.0 {
            return Ok(());
        }
        surface.begin_path();
        surface.ellipse(radius_x, radius_y, radius_x, radius_y)?;
        surface.close_path();
        self.paint(surface);
        Ok(())
    }

    fn render_text<S: Surface + ?Sized>(&self, surface: &mut S, text: &TextShape) -> Result<(), S::Error> {
        if text.text.is_empty() {
            return Ok(());
        }
        surface.set_font(&text.font());
        surface.set_text_align(text.align);
        let x = text.anchor_x();
        if let Some(fill) = self.fill {
            surface.fill_text(&text.text, x, 0.0, fill.color())?;
        }
        if let Some(stroke) = self.stroke {
            surface.stroke_text(&text.text, x, 0.0, stroke.color, stroke.width)?;
        }
        Ok(())
    }
}
