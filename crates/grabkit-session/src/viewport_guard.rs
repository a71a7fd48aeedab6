#![forbid(unsafe_code)]

//! Edge classification and the out-of-viewport failsafe.
//!
//! Edges are measured with a precision of `ceil(device_pixel_ratio * scale)`
//! pixels. The far boundary is measured from the viewport's width and height,
//! not from its right and bottom, so a viewport with a non-zero origin keeps
//! its far edges where a zero-origin viewport would have them.
//!
//! ```text
//!           top: -1
//! left: -1     0     right: 1
//!         bottom: 1
//! ```

use grabkit_core::{AxisPair, AxisSign, Point, Rect};
use grabkit_runtime::{TimerHandle, TimerQueue};
use web_time::{Duration, Instant};

use crate::record::ResponseHandle;

/// Viewport edge detection plus failsafe timer management.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportGuard {
    precision_scale: f64,
    failsafe_timeout: Duration,
}

impl ViewportGuard {
    #[must_use]
    pub const fn new(precision_scale: f64, failsafe_timeout: Duration) -> Self {
        Self {
            precision_scale,
            failsafe_timeout,
        }
    }

    /// Edge precision in pixels.
    #[must_use]
    pub fn precision(&self, device_pixel_ratio: f64) -> f64 {
        (device_pixel_ratio * self.precision_scale).ceil()
    }

    /// Classify `point` against the edges of `rect`.
    #[must_use]
    pub fn classify(&self, point: Point, rect: Rect, device_pixel_ratio: f64) -> AxisPair {
        let precision = self.precision(device_pixel_ratio);
        AxisPair::new(
            edge(point.x, rect.left(), rect.width, precision),
            edge(point.y, rect.top(), rect.height, precision),
        )
    }

    #[must_use]
    pub fn contains(rect: Rect, point: Point) -> bool {
        rect.contains(point)
    }

    /// Arm the failsafe unless the response slot is already taken.
    ///
    /// Returns the new timer, or `None` when nothing was armed.
    pub fn arm<T>(
        &self,
        slot: &mut Option<ResponseHandle>,
        timers: &mut TimerQueue<T>,
        now: Instant,
        task: T,
    ) -> Option<TimerHandle> {
        if slot.is_some() {
            return None;
        }
        let handle = timers.schedule_after(now, self.failsafe_timeout, task);
        *slot = Some(ResponseHandle::Failsafe(handle));
        Some(handle)
    }

    /// Disarm the failsafe if it occupies the response slot.
    pub fn disarm<T>(slot: &mut Option<ResponseHandle>, timers: &mut TimerQueue<T>) -> bool {
        match *slot {
            Some(ResponseHandle::Failsafe(handle)) => {
                timers.cancel(handle);
                *slot = None;
                true
            }
            _ => false,
        }
    }
}

fn edge(value: f64, near: f64, extent: f64, precision: f64) -> AxisSign {
    if value <= near + precision {
        AxisSign::Negative
    } else if value >= extent - precision {
        AxisSign::Positive
    } else {
        AxisSign::Zero
    }
}
