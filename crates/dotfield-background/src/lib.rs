//! Animated dot field for the dotfield background.
//!
//! A grid of dots drifts on layered sine waves and bends toward (or away
//! from) the pointer. The simulation is split into a grid model, a pure
//! motion synthesizer, an exponential integrator and a two-pass renderer
//! drawing onto any [`Canvas`]. [`Controller`] ties them to a [`Host`]
//! that supplies the surface, input and frame callbacks.

mod canvas;
mod chars;
mod color;
mod controller;
mod grid;
mod integrator;
mod motion;
mod render;
mod state;

pub use canvas::{Canvas, CanvasView, CellCanvas, LinearGradient, Paint};
pub use chars::{DOT_CHARS, dot_char};
pub use color::Ink;
pub use controller::{Controller, FrameHandle, Host, Lifecycle, ListenerId, ListenerKind};
pub use grid::{Grid, MAX_POINTS, Point};
pub use integrator::blend;
pub use motion::{INTENSITY_SCALE, Motion, ambient_wave, pointer_ease, pointer_influence, synthesize};
pub use render::{Breathing, breathing_phase, render};
pub use state::{Clock, FieldState, POINTER_SENTINEL};
