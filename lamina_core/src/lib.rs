// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container stack engine for hierarchical UI presentation.
//!
//! `lamina_core` manages the children of a container unit as a stack: the
//! root at the bottom, the visible unit on top. It keeps each child's
//! lifecycle hooks correctly ordered, loads and unloads child views lazily
//! under a capacity budget, and turns every change of the top into a
//! renderer-agnostic [`AnimationDescription`](animation::AnimationDescription).
//! It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   Host (container unit)
//!       │ push / pop / insert / remove / lifecycle hooks
//!       ▼
//!   ContainerStack ──► lifecycle::forward ──► PresentationUnit hooks
//!       │         └──► StackDelegate (will/did show, will/did hide)
//!       ▼
//!   AnimationDescription ──► AnimationPlayer::play()
//!                                   │
//!       ┌───────────────────────────┘
//!       ▼
//!   ContainerStack::animation_did_finish(tag) ──► CapacityPolicy
//! ```
//!
//! **[`stack`]**: [`ContainerStack`](stack::ContainerStack), the
//! orchestrator.
//!
//! **[`lifecycle`]**: The [`VisualState`](lifecycle::VisualState) machine.
//! Illegal hook sequences are swallowed, never forwarded.
//!
//! **[`transition`]**: Transition styles and the resting placements they
//! imply.
//!
//! **[`animation`]**: Pure builders for push, pop, and rotation
//! descriptions.
//!
//! **[`capacity`]**: Which buried views to unload or drop.
//!
//! **[`player`]**, **[`delegate`]**: Seams for the renderer and for
//! observers.
//!
//! **[`forwarding`]**: Exposes the top unit's title and toolbar through the
//! host.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `serde` (disabled by default): Derives `Serialize`/`Deserialize` for
//!   configuration and transition types.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod animation;
pub mod capacity;
pub mod config;
pub mod delegate;
pub mod entry;
pub mod error;
pub mod forwarding;
pub mod lifecycle;
pub mod player;
pub mod stack;
pub mod surface;
pub mod transition;
pub mod unit;
