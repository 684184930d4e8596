//! Spatial engine for the infinite-canvas board.
//!
//! This crate owns everything about *where* things are on the board: the
//! viewport (scale and scroll), the drag/resize/rotate gesture math, the
//! container-anchoring protocol that lets one element live inside another,
//! and the stacking rules driven by selection. Widget rendering, persistence
//! and uploads belong to the host, which talks to the engine through the
//! [`host::BoardHost`] trait and by feeding it raw input events.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::EngineCore`] state object and [`engine::Action`]s |
//! | [`element`] | Element record, kind table and patch type |
//! | [`registry`] | Ordered in-memory element store |
//! | [`migrate`] | Normalization of raw and legacy records |
//! | [`viewport`] | Scale/scroll model, zoom, pan, centering, home correction |
//! | [`input`] | Pointer targets, modifiers and the gesture state machine |
//! | [`transform`] | Drag, resize and rotation math |
//! | [`containment`] | Drop-time anchoring and explicit release |
//! | [`zorder`] | Baselines, selection promotion and click promotion |
//! | [`host`] | Async host boundary and action dispatch |
//! | [`config`] | Engine configuration from defaults or the environment |
//! | [`geom`] | Point, size and rectangle primitives |
//! | [`consts`] | Shared numeric constants (zoom limits, layers, timings) |

pub mod config;
pub mod consts;
pub mod containment;
pub mod element;
pub mod engine;
pub mod geom;
pub mod host;
pub mod input;
pub mod migrate;
pub mod registry;
pub mod transform;
pub mod viewport;
pub mod zorder;
