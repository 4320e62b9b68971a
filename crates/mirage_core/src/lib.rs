//! # MIRAGE Core
//!
//! Pose primitives shared by every MIRAGE crate:
//!
//! - [`Position`] / [`Velocity`]: blittable 2D value types, safe to copy
//!   straight into ECS or GPU storage
//! - [`angle`]: rotation wrapping helpers for shortest-path interpolation
//!
//! ## Architecture Rules
//!
//! 1. **No heap allocations** - every type here is `Copy` and `Pod`
//! 2. **No behavior** - value types carry data; systems live elsewhere
//! 3. **Finite or rejected** - helpers exist to validate untrusted input
//!    before it enters a hot path

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod angle;
pub mod pose;

pub use pose::{Position, Velocity};
