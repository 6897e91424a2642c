//! Scene editor core for an in-browser 2D vector canvas.
//!
//! This crate is compiled to WebAssembly and runs in the browser, and natively
//! for tests. It owns a document of vector shapes, a reversible editing
//! history, selection and group isolation, hit-testing, and a pan/zoom
//! viewport, and draws the scene through the [`surface::Surface`] trait. The
//! host UI layer wires DOM events to [`editor::Editor`] calls and re-reads
//! state when a subscriber fires.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`editor`] | Top-level [`editor::Editor`] orchestrating everything below |
//! | [`doc`] | Document store of top-level objects in paint order |
//! | [`shape`] | [`shape::CanvasObject`] and the rect/ellipse/text payloads |
//! | [`path`] | Path segments, point handles |
//! | [`group`] | Groups, grouping and baking transforms |
//! | [`order`] | Fractional paint-order keys |
//! | [`command`] | Reversible document mutations |
//! | [`history`] | Bounded undo/redo stacks |
//! | [`selection`] | Ordered selection set |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`hit`] | Hit-testing against selection UI and objects |
//! | [`render`] | Full-scene rendering |
//! | [`surface`] | Drawing trait plus a recording implementation |
//! | [`web`] | Browser surface over `CanvasRenderingContext2d` |
//! | [`geometry`] | Points, bounds, handle and rotation-zone layout |
//! | [`style`] | Colors, fills and strokes |
//! | [`config`] | Editor configuration |
//! | [`consts`] | Shared constants (zoom limits, handle sizes, colors) |

pub mod camera;
pub mod command;
pub mod config;
pub mod consts;
pub mod doc;
pub mod editor;
pub mod geometry;
pub mod group;
pub mod hit;
pub mod history;
pub mod order;
pub mod path;
pub mod render;
pub mod selection;
pub mod shape;
pub mod style;
pub mod surface;
pub mod web;
