use std::{io, time::Duration};

use anyhow::Context as _;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, terminal,
};
use tracing::debug;

use super::{App, event::TuiEvent, event_loop::EventLoop};

/// Terminal application runtime.
#[derive(Debug)]
pub struct Tui {
    events: EventLoop,
}

impl Tui {
    /// Creates a runtime that advances the app `rate` times per second.
    pub fn with_frame_rate(rate: u32) -> Self {
        Self {
            events: EventLoop::new(Duration::from_secs(1) / rate.max(1)),
        }
    }

    /// Runs the application until [`App::should_exit`] returns `true`.
    ///
    /// - `Frame`: calls `app.update()`
    /// - `Render`: calls `app.draw()`
    /// - terminal events: calls `app.handle_event()`
    ///
    /// Where the terminal supports it, key release and auto-repeat are
    /// reported as separate event kinds.
    pub fn run<A>(mut self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        ratatui::run(|terminal| {
            let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
            if enhanced {
                execute!(
                    io::stdout(),
                    PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
                )
                .context("Failed to enable keyboard enhancement")?;
            }
            debug!(enhanced, "Terminal initialized");

            let result = (|| {
                while !app.should_exit() {
                    match self.events.next().context("Failed to read terminal event")? {
                        TuiEvent::Frame => app.update(),
                        TuiEvent::Render => {
                            terminal
                                .draw(|f| app.draw(f))
                                .context("Failed to draw terminal")?;
                        }
                        TuiEvent::Crossterm(event) => app.handle_event(&event),
                    }
                }
                anyhow::Ok(())
            })();

            if enhanced {
                execute!(io::stdout(), PopKeyboardEnhancementFlags)
                    .context("Failed to restore keyboard mode")?;
            }
            result
        })
    }
}
