//! Terminal implementation of the dot field host.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use crossterm::{execute, terminal};
use dotfield_background::{FrameHandle, Host, ListenerId, ListenerKind};
use dotfield_core::{CellMetrics, SurfaceSize};

/// How long to wait for input when no frame is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Hosts the dot field in the current terminal.
///
/// Frames are deadlines the event loop waits on; the pointer listener turns
/// mouse capture on and off.
#[derive(Debug)]
pub struct TerminalHost {
    metrics: CellMetrics,
    frame_interval: Duration,
    next_id: u64,
    resize_listener: Option<ListenerId>,
    pointer_listener: Option<ListenerId>,
    pending_frame: Option<(FrameHandle, Instant)>,
}

impl TerminalHost {
    pub fn new(metrics: CellMetrics, frame_interval: Duration) -> Self {
        Self {
            metrics,
            frame_interval,
            next_id: 0,
            resize_listener: None,
            pointer_listener: None,
            pending_frame: None,
        }
    }

    /// Whether resize events should reach the controller.
    pub fn wants_resize(&self) -> bool {
        self.resize_listener.is_some()
    }

    /// Whether mouse motion should reach the controller.
    pub fn wants_pointer(&self) -> bool {
        self.pointer_listener.is_some()
    }

    /// Time left before the pending frame is due.
    pub fn time_until_frame(&self) -> Duration {
        self.time_until_frame_at(Instant::now())
    }

    fn time_until_frame_at(&self, now: Instant) -> Duration {
        match self.pending_frame {
            Some((_, deadline)) => deadline.saturating_duration_since(now),
            None => IDLE_POLL,
        }
    }

    /// Hand out the pending frame once its deadline has passed.
    pub fn take_due_frame(&mut self) -> Option<FrameHandle> {
        self.take_due_frame_at(Instant::now())
    }

    fn take_due_frame_at(&mut self, now: Instant) -> Option<FrameHandle> {
        match self.pending_frame {
            Some((handle, deadline)) if deadline <= now => {
                self.pending_frame = None;
                Some(handle)
            }
            _ => None,
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn set_mouse_capture(enabled: bool) {
        let result = if enabled {
            execute!(io::stdout(), EnableMouseCapture, EnableFocusChange)
        } else {
            execute!(io::stdout(), DisableMouseCapture, DisableFocusChange)
        };
        if let Err(err) = result {
            log::warn!("failed to toggle mouse capture: {err}");
        }
    }
}

impl Host for TerminalHost {
    fn surface_size(&mut self) -> Option<SurfaceSize> {
        match terminal::size() {
            Ok((cols, rows)) if cols > 0 && rows > 0 => {
                Some(self.metrics.surface_size(cols, rows))
            }
            Ok(_) => None,
            Err(err) => {
                log::warn!("failed to query terminal size: {err}");
                None
            }
        }
    }

    fn listen(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_id());
        match kind {
            ListenerKind::Resize => self.resize_listener = Some(id),
            ListenerKind::PointerMove => {
                Self::set_mouse_capture(true);
                self.pointer_listener = Some(id);
            }
        }
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        if self.resize_listener == Some(id) {
            self.resize_listener = None;
        }
        if self.pointer_listener == Some(id) {
            self.pointer_listener = None;
            Self::set_mouse_capture(false);
        }
    }

    fn schedule_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.pending_frame = Some((handle, Instant::now() + self.frame_interval));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if matches!(self.pending_frame, Some((pending, _)) if pending == handle) {
            self.pending_frame = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> TerminalHost {
        TerminalHost::new(CellMetrics::default(), Duration::from_millis(16))
    }

    #[test]
    fn test_frame_deadline() {
        let mut host = host();
        assert_eq!(host.time_until_frame(), IDLE_POLL);

        let now = Instant::now();
        let handle = host.schedule_frame();
        assert!(host.time_until_frame_at(now) >= Duration::from_millis(16));
        assert_eq!(host.take_due_frame_at(now), None);

        let later = now + Duration::from_millis(50);
        assert_eq!(host.time_until_frame_at(later), Duration::ZERO);
        assert_eq!(host.take_due_frame_at(later), Some(handle));
        // Fired frames are consumed
        assert_eq!(host.take_due_frame_at(later), None);
    }

    #[test]
    fn test_cancel_frame() {
        let mut host = host();
        let first = host.schedule_frame();
        host.cancel_frame(FrameHandle(first.0 + 100));
        assert!(host.pending_frame.is_some());

        host.cancel_frame(first);
        assert!(host.pending_frame.is_none());
        let later = Instant::now() + Duration::from_secs(1);
        assert_eq!(host.take_due_frame_at(later), None);
    }

    #[test]
    fn test_resize_listener() {
        let mut host = host();
        assert!(!host.wants_resize());
        let id = host.listen(ListenerKind::Resize);
        assert!(host.wants_resize());
        assert!(!host.wants_pointer());
        host.unlisten(id);
        assert!(!host.wants_resize());
    }
}
