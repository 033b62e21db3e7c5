//! Surface lifecycle: start, frame loop, resize, pointer, teardown.
//!
//! Starting a [`Controller`] acquires three host resources: a resize
//! listener, a pointer listener and a scheduled frame. Stopping releases
//! exactly those three, and dropping a running controller stops it.

use dotfield_core::{FieldSettings, SurfaceSize, Theme};
use glam::Vec2;

use crate::canvas::Canvas;
use crate::state::FieldState;

/// Notifications a controller subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Resize,
    PointerMove,
}

/// Registration returned by [`Host::listen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// A pending frame callback returned by [`Host::schedule_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// The environment hosting the drawing surface.
pub trait Host {
    /// Current surface size, or `None` when there is nothing to draw on.
    fn surface_size(&mut self) -> Option<SurfaceSize>;

    fn listen(&mut self, kind: ListenerKind) -> ListenerId;

    fn unlisten(&mut self, id: ListenerId);

    /// Request one frame callback.
    fn schedule_frame(&mut self) -> FrameHandle;

    /// Cancel a frame callback that has not fired yet.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Controller lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lifecycle {
    #[default]
    Uninitialized,
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Resources {
    resize: ListenerId,
    pointer: ListenerId,
    frame: FrameHandle,
}

/// Drives a [`FieldState`] from host callbacks.
#[derive(Debug)]
pub struct Controller<H: Host> {
    host: H,
    settings: FieldSettings,
    lifecycle: Lifecycle,
    state: Option<FieldState>,
    resources: Option<Resources>,
}

impl<H: Host> Controller<H> {
    pub fn new(host: H, settings: FieldSettings) -> Self {
        Self {
            host,
            settings,
            lifecycle: Lifecycle::Uninitialized,
            state: None,
            resources: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn settings(&self) -> &FieldSettings {
        &self.settings
    }

    /// Simulation state while running.
    pub fn state(&self) -> Option<&FieldState> {
        self.state.as_ref()
    }

    /// Build the grid, subscribe to the host and schedule the first frame.
    ///
    /// Returns `false` and registers nothing when the host has no surface.
    pub fn start(&mut self) -> bool {
        if self.lifecycle == Lifecycle::Running {
            return true;
        }

        let Some(surface) = self.host.surface_size() else {
            log::warn!("drawing surface unavailable; dot field disabled");
            self.lifecycle = Lifecycle::Stopped;
            return false;
        };

        let state = FieldState::new(self.settings, surface);
        log::info!(
            "dot field started: {}x{} grid on {}x{} surface",
            state.grid().cols(),
            state.grid().rows(),
            surface.width,
            surface.height
        );
        self.state = Some(state);

        let resize = self.host.listen(ListenerKind::Resize);
        let pointer = self.host.listen(ListenerKind::PointerMove);
        let frame = self.host.schedule_frame();
        self.resources = Some(Resources {
            resize,
            pointer,
            frame,
        });
        self.lifecycle = Lifecycle::Running;
        true
    }

    /// Run one update-and-render cycle if `handle` is the pending frame,
    /// then schedule the next one. Returns whether a frame was drawn.
    pub fn on_frame(&mut self, handle: FrameHandle, canvas: &mut impl Canvas, theme: Theme) -> bool {
        let (Some(resources), Some(state)) = (self.resources.as_mut(), self.state.as_mut()) else {
            return false;
        };
        if resources.frame != handle {
            log::trace!("ignoring stale frame {handle:?}");
            return false;
        }

        state.update();
        state.render(canvas, theme);
        resources.frame = self.host.schedule_frame();
        true
    }

    /// Rebuild the grid for the new surface size.
    pub fn on_resize(&mut self, surface: SurfaceSize) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }
        if let Some(state) = self.state.as_mut() {
            state.resize(surface);
        }
    }

    /// Record a pointer position given in viewport coordinates.
    pub fn on_pointer_move(&mut self, viewport: Vec2, surface_origin: Vec2) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }
        if let Some(state) = self.state.as_mut() {
            state.set_pointer(viewport - surface_origin);
        }
    }

    /// The pointer left the surface.
    pub fn on_pointer_leave(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.clear_pointer();
        }
    }

    /// Release every host resource acquired by [`Controller::start`].
    pub fn stop(&mut self) {
        if let Some(resources) = self.resources.take() {
            self.host.cancel_frame(resources.frame);
            self.host.unlisten(resources.resize);
            self.host.unlisten(resources.pointer);
            log::info!("dot field stopped");
        }
        self.state = None;
        if self.lifecycle == Lifecycle::Running {
            self.lifecycle = Lifecycle::Stopped;
        }
    }

    /// Stop, swap settings and start again with a fresh clock.
    pub fn restart(&mut self, settings: FieldSettings) -> bool {
        self.stop();
        self.settings = settings;
        self.start()
    }
}

impl<H: Host> Drop for Controller<H> {
    fn drop(&mut self) {
        self.stop();
    }
}
