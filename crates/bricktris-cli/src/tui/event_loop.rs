use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use super::event::TuiEvent;

/// Produces frame, render and terminal events in order.
///
/// Frames are emitted at a fixed interval. A render is emitted once after
/// anything happened (a frame or a terminal event) and never more than once
/// per frame interval.
#[derive(Debug)]
pub(super) struct EventLoop {
    frame_interval: Duration,
    last_frame: Instant,
    last_render: Option<Instant>,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new(frame_interval: Duration) -> Self {
        Self {
            frame_interval,
            last_frame: Instant::now(),
            last_render: None,
            dirty: true,
        }
    }

    /// Blocks until the next event is due.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if now.duration_since(self.last_frame) >= self.frame_interval {
                self.last_frame += self.frame_interval;
                // skip frames lost while the process was suspended
                if now.duration_since(self.last_frame) >= self.frame_interval {
                    self.last_frame = now;
                }
                self.dirty = true;
                return Ok(TuiEvent::Frame);
            }

            if self.dirty && self.render_due(now) {
                self.last_render = Some(now);
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            let timeout = self.next_deadline().saturating_duration_since(now);
            if !event::poll(timeout)? {
                continue;
            }
            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn render_due(&self, now: Instant) -> bool {
        self.last_render
            .is_none_or(|last| now.duration_since(last) >= self.frame_interval)
    }

    fn next_deadline(&self) -> Instant {
        let next_frame = self.last_frame + self.frame_interval;
        match (self.dirty, self.last_render) {
            (true, Some(last)) => next_frame.min(last + self.frame_interval),
            _ => next_frame,
        }
    }
}
