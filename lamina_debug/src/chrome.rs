// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads events recorded in an [`EventLog`](crate::recorder::EventLog)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Animated descriptions become complete (`"X"`) events spanning their
//! duration on the animation track; everything else is an instant event on
//! the track of the unit it concerns.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};
use std::time::Duration;

use serde_json::{Value, json};

use crate::pretty::format_event;
use crate::recorder::{Phase, Recorded, StackEvent};

/// Thread id of the animation track; unit tracks use `unit id + 1`.
const ANIMATION_TID: u64 = 0;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// # Errors
///
/// Propagates serialization and write failures.
pub fn export(events: &[Recorded], writer: &mut dyn Write) -> io::Result<()> {
    let mut out: Vec<Value> = Vec::with_capacity(events.len());

    for r in events {
        let ts = micros(r.at);
        let label = format_event(&r.event);
        let value = match &r.event {
            StackEvent::Play {
                tag,
                kind,
                animated: true,
                duration,
            } => json!({
                "ph": "X",
                "name": format!("{kind:?}"),
                "cat": "Animation",
                "ts": ts,
                "dur": micros(*duration),
                "pid": 0,
                "tid": ANIMATION_TID,
                "args": { "tag": tag.0, "seq": r.seq },
            }),
            StackEvent::Play { tag, kind, .. } => json!({
                "ph": "i",
                "name": format!("{kind:?}"),
                "cat": "Animation",
                "ts": ts,
                "pid": 0,
                "tid": ANIMATION_TID,
                "s": "t",
                "args": { "tag": tag.0, "seq": r.seq, "animated": false },
            }),
            StackEvent::Finish { tag } => json!({
                "ph": "i",
                "name": "Finish",
                "cat": "Animation",
                "ts": ts,
                "pid": 0,
                "tid": ANIMATION_TID,
                "s": "t",
                "args": { "tag": tag.0, "seq": r.seq },
            }),
            StackEvent::Show {
                unit,
                phase,
                animated,
            }
            | StackEvent::Hide {
                unit,
                phase,
                animated,
            } => {
                let scope = if *phase == Phase::Will { "t" } else { "p" };
                json!({
                    "ph": "i",
                    "name": label,
                    "cat": "Delegate",
                    "ts": ts,
                    "pid": 0,
                    "tid": unit.0 + 1,
                    "s": scope,
                    "args": { "seq": r.seq, "animated": animated },
                })
            }
            StackEvent::Lifecycle { unit, .. }
            | StackEvent::Rotation { unit, .. }
            | StackEvent::Discard { unit } => json!({
                "ph": "i",
                "name": label,
                "cat": "Unit",
                "ts": ts,
                "pid": 0,
                "tid": unit.0 + 1,
                "s": "t",
                "args": { "seq": r.seq },
            }),
        };
        out.push(value);
    }

    serde_json::to_writer_pretty(writer, &out)?;
    Ok(())
}

fn micros(d: Duration) -> f64 {
    d.as_secs_f64() * 1_000_000.0
}
