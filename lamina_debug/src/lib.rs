// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording doubles, pretty-printing, and Chrome trace export for lamina
//! diagnostics.
//!
//! This crate provides collaborators for
//! [`ContainerStack`](lamina_core::stack::ContainerStack) for development and
//! post-mortem analysis:
//!
//! - [`recorder`]: [`RecordingUnit`](recorder::RecordingUnit),
//!   [`RecordingDelegate`](recorder::RecordingDelegate), and
//!   [`RecordingPlayer`](recorder::RecordingPlayer), sharing one
//!   [`EventLog`](recorder::EventLog).
//! - [`pretty::PrettyPrintDelegate`]: human-readable one-line-per-event
//!   output.
//! - [`chrome::export`]: writes Chrome Trace Event Format JSON from recorded
//!   events.
//! - [`config`]: loads [`StackConfig`](lamina_core::config::StackConfig)
//!   from JSON.

pub mod chrome;
pub mod config;
pub mod pretty;
pub mod recorder;

#[cfg(test)]
mod scenarios;
