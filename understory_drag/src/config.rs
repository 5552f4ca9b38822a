// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller configuration.

use crate::effect::{DEFAULT_EFFECT_PRIORITY, DropEffect};

/// Tunables for [`DragController`](crate::DragController).
///
/// ```
/// use understory_drag::{DragConfig, DropEffect};
///
/// let config = DragConfig::default()
///     .with_threshold(8.0)
///     .with_effect_priority([DropEffect::Copy, DropEffect::Move, DropEffect::Link]);
/// assert_eq!(config.threshold, 8.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DragConfig {
    /// Distance the pointer must move away from the press position, strictly
    /// exceeded, before a press turns into a drag.
    ///
    /// Negative values act as `0.0`: any movement starts the drag.
    pub threshold: f64,
    /// Order in which effects are tried when negotiating with a target.
    ///
    /// [`DropEffect::None`] entries are skipped and effects left out rank last,
    /// see [`negotiate`](crate::negotiate).
    pub effect_priority: [DropEffect; 3],
    /// Maximum number of diagnostics kept until drained; older entries are dropped.
    pub max_diagnostics: usize,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            threshold: 5.0,
            effect_priority: DEFAULT_EFFECT_PRIORITY,
            max_diagnostics: 64,
        }
    }
}

impl DragConfig {
    /// Set the drag start threshold. Negative values act as `0.0`.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the effect negotiation order.
    pub fn with_effect_priority(mut self, priority: [DropEffect; 3]) -> Self {
        self.effect_priority = priority;
        self
    }

    /// Set the diagnostics buffer size. Zero disables buffering; errors are still logged.
    pub fn with_max_diagnostics(mut self, max: usize) -> Self {
        self.max_diagnostics = max;
        self
    }
}
