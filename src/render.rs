//! Rendering: draws the full scene to a [`Surface`].
//!
//! It receives read-only views of document, camera and editor UI state and
//! produces pixels. It does not mutate any application state.
//!
//! All fallible surface calls propagate errors. The top-level caller
//! ([`crate::editor::Editor::render`]) decides what to do with them.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::camera::Camera;
use crate::consts::{
    GROUP_INDICATOR_DASH_PX, GROUP_INDICATOR_PADDING_PX, HANDLE_FILL, ISOLATION_DIM_OPACITY, SELECTION_COLOR,
};
use crate::doc::Document;
use crate::geometry::{Bounds, apply_rotation};
use crate::selection::Selection;
use crate::shape::{CanvasObject, ObjectId};
use crate::surface::{Surface, scoped};

/// Read-only view of everything one frame needs.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub doc: &'a Document,
    pub camera: &'a Camera,
    pub selection: &'a Selection,
    pub entered_group: Option<ObjectId>,
    pub editing_path: Option<ObjectId>,
    /// Handle side in screen pixels.
    pub handle_size: f64,
    pub device_pixel_ratio: f64,
    /// Backing-store size in device pixels.
    pub backing_size: (f64, f64),
}

/// Draw the full scene: objects, isolation indicator, then selection UI.
///
/// # Errors
///
/// Returns `Err` if any surface call fails.
pub fn draw<S: Surface + ?Sized>(surface: &mut S, scene: &Scene<'_>) -> Result<(), S::Error> {
    let dpr = scene.device_pixel_ratio;
    let (backing_w, backing_h) = scene.backing_size;

    // Layer 1: clear and set up transforms.
    surface.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    surface.clear_rect(0.0, 0.0, backing_w, backing_h);
    surface.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    surface.translate(scene.camera.pan_x, scene.camera.pan_y)?;
    surface.scale(scene.camera.zoom(), scene.camera.zoom())?;

    // Layer 2: objects in paint order (bottom first).
    let highlighted: Vec<ObjectId> = match scene.entered_group {
        Some(id) => scene.doc.ancestry(id).iter().map(|o| o.id).collect(),
        None => Vec::new(),
    };
    for obj in scene.doc.ordered().into_iter().filter(|o| o.visible) {
        let dimmed = scene.entered_group.is_some() && !highlighted.contains(&obj.id);
        scoped(surface, |s| {
            if dimmed {
                s.set_global_alpha(ISOLATION_DIM_OPACITY);
            }
            obj.render_placed(s)
        })?;
    }

    // Layer 3: entered-group outline.
    if let Some(id) = scene.entered_group {
        draw_group_indicator(surface, scene.doc, id, scene.camera.zoom())?;
    }

    // Layer 4: selection UI.
    for id in scene.selection.iter() {
        if let Some(obj) = scene.doc.get(id).filter(|o| o.visible) {
            let editing = scene.editing_path == Some(id);
            draw_selection(surface, obj, editing, scene.handle_size, scene.camera.zoom())?;
        }
    }

    Ok(())
}

// =============================================================
// Isolation
// =============================================================

fn draw_group_indicator<S: Surface + ?Sized>(
    surface: &mut S,
    doc: &Document,
    id: ObjectId,
    zoom: f64,
) -> Result<(), S::Error> {
    let chain = doc.ancestry(id);
    let Some((group, ancestors)) = chain.split_last() else {
        return Ok(());
    };
    if !group.is_group() {
        return Ok(());
    }

    let padding = GROUP_INDICATOR_PADDING_PX / zoom;
    let dash = GROUP_INDICATOR_DASH_PX / zoom;

    scoped(surface, |s| {
        // Nested groups live in their parents' local space.
        for ancestor in ancestors {
            ancestor.place(s)?;
        }
        let bounds = group.bounds();
        apply_rotation(s, bounds, group.rotation)?;
        s.set_line_dash(&[dash, dash])?;
        let outline = bounds.inflate(padding);
        s.stroke_rect(outline.x, outline.y, outline.width, outline.height, SELECTION_COLOR, 1.0 / zoom);
        s.set_line_dash(&[])
    })
}

// =============================================================
// Selection UI
// =============================================================

fn draw_selection<S: Surface + ?Sized>(
    surface: &mut S,
    obj: &CanvasObject,
    editing: bool,
    handle_size_px: f64,
    zoom: f64,
) -> Result<(), S::Error> {
    let line_width = 1.0 / zoom;
    let handle_size = handle_size_px / zoom;
    let bounds = obj.bounds();

    scoped(surface, |s| {
        // Box and handles rotate with the object.
        apply_rotation(s, bounds, obj.rotation)?;

        if let Some(path) = obj.as_path().filter(|_| editing) {
            s.begin_path();
            path.trace(s, obj.position());
            s.stroke(SELECTION_COLOR, line_width);
            let handles: Vec<Bounds> = path
                .point_handles(obj.position(), handle_size)
                .into_iter()
                .map(|(_, handle)| handle)
                .collect();
            draw_handles(s, &handles, line_width);
            return Ok(());
        }

        s.set_line_dash(&[])?;
        s.stroke_rect(bounds.x, bounds.y, bounds.width, bounds.height, SELECTION_COLOR, line_width);
        draw_handles(s, &obj.handle_positions(handle_size), line_width);
        Ok(())
    })
}

fn draw_handles<S: Surface + ?Sized>(surface: &mut S, handles: &[Bounds], line_width: f64) {
    for h in handles {
        surface.fill_rect(h.x, h.y, h.width, h.height, HANDLE_FILL);
        surface.stroke_rect(h.x, h.y, h.width, h.height, SELECTION_COLOR, line_width);
    }
}
