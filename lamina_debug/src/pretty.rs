// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable event output.
//!
//! [`PrettyPrintDelegate`] implements [`StackDelegate`] and writes one line
//! per notification to a [`Write`](std::io::Write) destination (default:
//! stderr). [`write_log`] renders a whole [`EventLog`](crate::recorder::EventLog)
//! dump in the same format.

use std::io::{self, Write};

use lamina_core::delegate::StackDelegate;
use lamina_core::lifecycle::LifecycleEvent;
use lamina_core::unit::PresentationUnit;

use crate::recorder::{Phase, Recorded, RotationHook, StackEvent};

/// Writes human-readable notification lines to a [`Write`](std::io::Write)
/// destination.
pub struct PrettyPrintDelegate<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintDelegate<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintDelegate").finish_non_exhaustive()
    }
}

impl PrettyPrintDelegate {
    /// Creates a delegate that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(io::stderr()),
        }
    }

    /// Creates a delegate that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintDelegate<W> {
    /// Creates a delegate that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the delegate and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, event: &StackEvent) {
        let _ = writeln!(self.writer, "{}", format_event(event));
    }
}

impl<U: PresentationUnit, W: Write> StackDelegate<U> for PrettyPrintDelegate<W> {
    fn will_show(&mut self, unit: &U, animated: bool) {
        self.emit(&StackEvent::Show {
            unit: unit.id(),
            phase: Phase::Will,
            animated,
        });
    }

    fn did_show(&mut self, unit: &U, animated: bool) {
        self.emit(&StackEvent::Show {
            unit: unit.id(),
            phase: Phase::Did,
            animated,
        });
    }

    fn will_hide(&mut self, unit: &U, animated: bool) {
        self.emit(&StackEvent::Hide {
            unit: unit.id(),
            phase: Phase::Will,
            animated,
        });
    }

    fn did_hide(&mut self, unit: &U, animated: bool) {
        self.emit(&StackEvent::Hide {
            unit: unit.id(),
            phase: Phase::Did,
            animated,
        });
    }
}

/// Writes every recorded event, one line each, prefixed with its virtual
/// time.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_log(events: &[Recorded], writer: &mut dyn Write) -> io::Result<()> {
    for r in events {
        writeln!(
            writer,
            "{:>8.1}ms {}",
            r.at.as_secs_f64() * 1000.0,
            format_event(&r.event)
        )?;
    }
    Ok(())
}

fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Will => "will",
        Phase::Did => "did",
    }
}

fn lifecycle_name(event: LifecycleEvent) -> (&'static str, Option<bool>) {
    match event {
        LifecycleEvent::Load => ("load", None),
        LifecycleEvent::Unload => ("unload", None),
        LifecycleEvent::WillAppear(a) => ("will_appear", Some(a)),
        LifecycleEvent::DidAppear(a) => ("did_appear", Some(a)),
        LifecycleEvent::WillDisappear(a) => ("will_disappear", Some(a)),
        LifecycleEvent::DidDisappear(a) => ("did_disappear", Some(a)),
    }
}

/// Formats one event as a single line, without trailing newline.
#[must_use]
pub fn format_event(event: &StackEvent) -> String {
    match event {
        StackEvent::Lifecycle { unit, event } => match lifecycle_name(*event) {
            (name, Some(animated)) => {
                format!("[unit] {name} unit={} animated={animated}", unit.0)
            }
            (name, None) => format!("[unit] {name} unit={}", unit.0),
        },
        StackEvent::Rotation {
            unit,
            hook,
            orientation,
        } => {
            let name = match hook {
                RotationHook::Will => "will_rotate",
                RotationHook::WillAnimate => "will_animate_rotation",
                RotationHook::Did => "did_rotate",
            };
            format!("[unit] {name} unit={} orientation={orientation:?}", unit.0)
        }
        StackEvent::Show {
            unit,
            phase,
            animated,
        } => format!(
            "[{}_show] unit={} animated={animated}",
            phase_name(*phase),
            unit.0
        ),
        StackEvent::Hide {
            unit,
            phase,
            animated,
        } => format!(
            "[{}_hide] unit={} animated={animated}",
            phase_name(*phase),
            unit.0
        ),
        StackEvent::Play {
            tag,
            kind,
            animated,
            duration,
        } => format!(
            "[play] tag={} kind={kind:?} animated={animated} duration={:.1}ms",
            tag.0,
            duration.as_secs_f64() * 1000.0
        ),
        StackEvent::Finish { tag } => format!("[finish] tag={}", tag.0),
        StackEvent::Discard { unit } => format!("[discard] unit={}", unit.0),
    }
}
