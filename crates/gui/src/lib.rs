// Library crate: the editor core, headless harness and command protocol.
// The egui front-end (app, ui, viewport painting) stays in the binary crate.

pub mod command;
pub mod controller;
pub mod editor;
pub mod geometry;
pub mod harness;
pub mod input;
pub mod scene;
pub mod state;
pub mod sync;

/// Mesh storage and ray queries shared by the scene and the viewport.
/// Camera and painting stay in the binary crate.
pub mod viewport {
    pub mod mesh;
    pub mod picking;
}
