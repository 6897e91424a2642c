//! The editor: document, history, selection, isolation, viewport and
//! rendering behind one API.
//!
//! `Editor` is generic over its [`Surface`], so the same code runs against a
//! browser canvas ([`Editor::from_canvas`]) and a [`RecordingSurface`] in
//! tests. State-changing calls notify subscribers and then redraw; a failed
//! redraw is logged and the state change stands.
//!
//! [`RecordingSurface`]: crate::surface::RecordingSurface

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use web_sys::HtmlCanvasElement;

use crate::camera::Camera;
use crate::command::Command;
use crate::config::{ConfigError, EditorConfig};
use crate::doc::Document;
use crate::geometry::Point;
use crate::hit::{self, HitContext, HitTarget};
use crate::history::History;
use crate::render::{self, Scene};
use crate::selection::Selection;
use crate::shape::{CanvasObject, ObjectId};
use crate::surface::{Surface, SurfaceError};
use crate::web::{self, CanvasSurface};

/// Errors from building an [`Editor`].
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("invalid editor config: {0}")]
    Config(#[from] ConfigError),
    #[error("drawing surface unavailable: {0}")]
    Surface(#[from] SurfaceError),
}

/// Handle returned by [`Editor::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut()>;

pub struct Editor<S: Surface> {
    surface: S,
    config: EditorConfig,
    document: Document,
    history: History,
    selection: Selection,
    entered_group: Option<ObjectId>,
    entered_stack: Vec<ObjectId>,
    editing_path: Option<ObjectId>,
    camera: Camera,
    display_size: (f64, f64),
    backing_size: (f64, f64),
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl Editor<CanvasSurface> {
    /// Bind an editor to a `<canvas>` element.
    ///
    /// When the config leaves the pixel ratio unset, the window's ratio is
    /// used.
    ///
    /// # Errors
    ///
    /// Fails if the config is invalid or the element has no 2D context.
    pub fn from_canvas(canvas: HtmlCanvasElement, mut config: EditorConfig) -> Result<Self, EditorError> {
        if config.device_pixel_ratio.is_none() {
            config.device_pixel_ratio = web::device_pixel_ratio();
        }
        let surface = CanvasSurface::from_canvas(canvas)?;
        Self::new(surface, config)
    }
}

impl<S: Surface> Editor<S> {
    /// Create an editor over `surface` with an empty document, and size the
    /// backing store to the surface.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Config`] if `config` fails validation.
    pub fn new(surface: S, config: EditorConfig) -> Result<Self, EditorError> {
        config.validate()?;
        let mut editor = Self {
            surface,
            history: History::new(config.max_history),
            camera: Camera::new(config.zoom_min, config.zoom_max),
            config,
            document: Document::default(),
            selection: Selection::new(),
            entered_group: None,
            entered_stack: Vec::new(),
            editing_path: None,
            display_size: (0.0, 0.0),
            backing_size: (0.0, 0.0),
            listeners: Vec::new(),
            next_listener: 0,
        };
        editor.update_canvas_size();
        Ok(editor)
    }

    // --- Read access ---

    /// Top-level object by id.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&CanvasObject> {
        self.document.get(id)
    }

    /// Top-level objects in paint order.
    #[must_use]
    pub fn objects(&self) -> Vec<&CanvasObject> {
        self.document.ordered()
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // --- Subscriptions ---

    /// Register a callback run after every state change, in registration
    /// order.
    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener();
        }
    }

    fn changed(&mut self) {
        self.notify();
        self.redraw();
    }

    fn redraw(&mut self) {
        if let Err(e) = self.render() {
            tracing::warn!(error = ?e, "render failed");
        }
    }

    // --- History ---

    /// Apply a command and make it undoable.
    pub fn apply(&mut self, command: impl Command + 'static) {
        self.apply_boxed(Box::new(command));
    }

    pub fn apply_boxed(&mut self, command: Box<dyn Command>) {
        let label = command.label();
        let dropped = self.history.execute(command, &mut self.document);
        tracing::debug!(
            label,
            dropped,
            undo = self.history.undo_len(),
            redo = self.history.redo_len(),
            "command applied"
        );
        self.changed();
    }

    pub fn undo(&mut self) {
        if let Some(label) = self.history.undo(&mut self.document) {
            tracing::debug!(label, undo = self.history.undo_len(), redo = self.history.redo_len(), "undo");
            self.changed();
        }
    }

    pub fn redo(&mut self) {
        if let Some(label) = self.history.redo(&mut self.document) {
            tracing::debug!(label, undo = self.history.undo_len(), redo = self.history.redo_len(), "redo");
            self.changed();
        }
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Labels of the undoable commands, oldest first.
    #[must_use]
    pub fn history_labels(&self) -> Vec<&'static str> {
        self.history.labels()
    }

    // --- Selection ---

    #[must_use]
    pub fn selection(&self) -> &[ObjectId] {
        self.selection.ids()
    }

    #[must_use]
    pub fn is_selected(&self, id: ObjectId) -> bool {
        self.selection.contains(id)
    }

    pub fn select(&mut self, id: ObjectId) {
        if self.selection.insert(id) {
            self.changed();
        }
    }

    pub fn deselect(&mut self, id: ObjectId) {
        if self.selection.remove(id) {
            self.changed();
        }
    }

    pub fn select_only(&mut self, id: ObjectId) {
        self.selection.set([id]);
        self.changed();
    }

    pub fn select_multiple(&mut self, ids: impl IntoIterator<Item = ObjectId>) {
        self.selection.set(ids);
        self.changed();
    }

    pub fn clear_selection(&mut self) {
        if self.selection.clear() {
            self.changed();
        }
    }

    pub fn toggle_selection(&mut self, id: ObjectId) {
        self.selection.toggle(id);
        self.changed();
    }

    // --- Group isolation ---

    #[must_use]
    pub fn entered_group(&self) -> Option<ObjectId> {
        self.entered_group
    }

    /// Enter a group anywhere in the tree. Ignored unless `id` names a group.
    pub fn enter_group(&mut self, id: ObjectId) {
        if !self.document.find(id).is_some_and(CanvasObject::is_group) {
            return;
        }
        if let Some(current) = self.entered_group.replace(id) {
            self.entered_stack.push(current);
        }
        tracing::debug!(group = %id, depth = self.entered_stack.len() + 1, "entered group");
        self.selection.clear();
        self.changed();
    }

    /// Leave the current group, returning to the one entered before it.
    pub fn exit_group(&mut self) {
        self.entered_group = self.entered_stack.pop();
        tracing::debug!(group = ?self.entered_group, "exited group");
        self.selection.clear();
        self.changed();
    }

    pub fn exit_all_groups(&mut self) {
        self.entered_group = None;
        self.entered_stack.clear();
        tracing::debug!("exited all groups");
        self.selection.clear();
        self.changed();
    }

    // --- Path editing ---

    #[must_use]
    pub fn editing_path(&self) -> Option<ObjectId> {
        self.editing_path
    }

    /// Edit the points of a top-level path and select only it. Ignored for
    /// anything else.
    pub fn enter_path_edit_mode(&mut self, id: ObjectId) {
        if self.document.get(id).and_then(CanvasObject::as_path).is_none() {
            return;
        }
        self.editing_path = Some(id);
        self.selection.set([id]);
        self.changed();
    }

    pub fn exit_path_edit_mode(&mut self) {
        self.editing_path = None;
        self.changed();
    }

    // --- Hit-testing ---

    /// Classify a screen point. See [`crate::hit`] for tier order.
    #[must_use]
    pub fn hit_test(&self, screen: Point) -> HitTarget {
        let point = self.camera.screen_to_canvas(screen);
        let ctx = HitContext {
            doc: &self.document,
            selection: &self.selection,
            editing_path: self.editing_path,
            handle_size: self.camera.screen_dist_to_canvas(self.config.handle_size),
            zone_size: self.camera.screen_dist_to_canvas(self.config.rotation_zone_size),
        };
        let target = hit::hit_test(&ctx, point);
        tracing::trace!(?target, x = point.x, y = point.y, "hit test");
        target
    }

    // --- Viewport ---

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.camera.zoom()
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn pan(&mut self, delta: Point) {
        self.camera.pan_by(delta);
        self.redraw();
    }

    /// Zoom to `zoom` (clamped) keeping the point under `screen` fixed.
    pub fn zoom_at(&mut self, screen: Point, zoom: f64) {
        self.camera.zoom_at(screen, zoom);
        self.redraw();
    }

    pub fn zoom_by(&mut self, screen: Point, factor: f64) {
        self.camera.zoom_by(screen, factor);
        self.redraw();
    }

    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        self.camera.screen_to_canvas(screen)
    }

    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        self.camera.canvas_to_screen(canvas)
    }

    // --- Surface ---

    /// Display size in CSS pixels, as of the last [`Editor::update_canvas_size`].
    #[must_use]
    pub fn display_size(&self) -> (f64, f64) {
        self.display_size
    }

    /// Backing-store size in device pixels.
    #[must_use]
    pub fn backing_size(&self) -> (f64, f64) {
        self.backing_size
    }

    /// Re-read the display size and resize the backing store to match it
    /// times the pixel ratio.
    pub fn update_canvas_size(&mut self) {
        let (width, height) = self.surface.display_size();
        let dpr = self.config.pixel_ratio();
        self.display_size = (width, height);
        self.backing_size = (width * dpr, height * dpr);
        self.surface.set_backing_size(self.backing_size.0, self.backing_size.1);
    }

    /// Redraw the whole scene.
    ///
    /// # Errors
    ///
    /// Returns the surface error that stopped the frame.
    pub fn render(&mut self) -> Result<(), S::Error> {
        let scene = Scene {
            doc: &self.document,
            camera: &self.camera,
            selection: &self.selection,
            entered_group: self.entered_group,
            editing_path: self.editing_path,
            handle_size: self.config.handle_size,
            device_pixel_ratio: self.config.pixel_ratio(),
            backing_size: self.backing_size,
        };
        render::draw(&mut self.surface, &scene)
    }

    /// Drop the document, history, selection, modes and listeners.
    pub fn destroy(&mut self) {
        self.document = Document::default();
        self.history.clear();
        self.selection.clear();
        self.entered_group = None;
        self.entered_stack.clear();
        self.editing_path = None;
        self.listeners.clear();
    }
}
