// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ready-made host pieces.
//!
//! - [`arena`]: generational view storage implementing [`ViewLookup`](crate::ViewLookup).
//! - [`region`]: rectangle hit testing implementing [`GeometryProbe`](crate::GeometryProbe).
//! - [`scene`]: both combined into a complete [`DragHost`](crate::DragHost).

pub mod arena;
pub mod region;
pub mod scene;
