//! Gradual re-seeding of tap lengths after a room-size change.
//!
//! Changing every delay length at once produces zipper noise. Instead, a
//! change arms a sweep that re-seeds exactly one tap per processing call,
//! on both channels in the same call, starting from tap `A`. A full sweep
//! therefore spans 26 calls; until it completes the bank mixes old and new
//! geometries. Another change mid-sweep restarts it from `A`.

use crate::bank::TAP_COUNT;

/// Divisors the near-prime search steers lengths away from.
pub const SMALL_DIVISORS: core::ops::RangeInclusive<usize> = 2..=70;

/// Sentinel that no real room size equals, forcing a sweep on the first call.
const UNSEEDED: f64 = -1.0;

/// Sweep state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Every tap has its target length.
    Idle,
    /// Taps `next..` still need re-seeding.
    Reseeding {
        /// Index of the next tap to re-seed.
        next: usize,
    },
}

/// Tracks the room size and hands out one tap index per call.
///
/// # Example
///
/// ```rust
/// use pocketverb_engine::LengthScheduler;
///
/// let mut scheduler = LengthScheduler::new();
/// assert_eq!(scheduler.begin_call(0.575), Some(0));
/// assert_eq!(scheduler.begin_call(0.575), Some(1));
/// assert_eq!(scheduler.countdown(), 24);
/// // A new size restarts the sweep
/// assert_eq!(scheduler.begin_call(1.0), Some(0));
/// ```
#[derive(Debug, Clone)]
pub struct LengthScheduler {
    state: SchedulerState,
    last_room_size: f64,
}

impl LengthScheduler {
    /// A scheduler that will start a sweep on its first call.
    pub fn new() -> Self {
        Self {
            state: SchedulerState::Idle,
            last_room_size: UNSEEDED,
        }
    }

    /// Current state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Taps still waiting for their new length.
    pub fn countdown(&self) -> usize {
        match self.state {
            SchedulerState::Idle => 0,
            SchedulerState::Reseeding { next } => TAP_COUNT - next,
        }
    }

    /// Whether a sweep is in progress.
    pub fn is_reseeding(&self) -> bool {
        matches!(self.state, SchedulerState::Reseeding { .. })
    }

    /// Register one processing call at `room_size`.
    ///
    /// Returns the index of the tap to re-seed during this call, if any.
    /// Any exact change from the last seen size restarts the sweep.
    pub fn begin_call(&mut self, room_size: f64) -> Option<usize> {
        if room_size != self.last_room_size {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                "reseed: room size {:.4} -> {:.4}",
                self.last_room_size,
                room_size
            );
            self.last_room_size = room_size;
            self.state = SchedulerState::Reseeding { next: 0 };
        }

        match self.state {
            SchedulerState::Idle => None,
            SchedulerState::Reseeding { next } => {
                let after = next + 1;
                self.state = if after >= TAP_COUNT {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("reseed: complete at room size {:.4}", room_size);
                    SchedulerState::Idle
                } else {
                    SchedulerState::Reseeding { next: after }
                };
                Some(next)
            }
        }
    }

    /// Forget the last room size so the next call sweeps again.
    pub fn rearm(&mut self) {
        self.state = SchedulerState::Idle;
        self.last_room_size = UNSEEDED;
    }
}

impl Default for LengthScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `n` has a divisor in [`SMALL_DIVISORS`] other than itself.
#[inline]
pub fn has_small_divisor(n: usize) -> bool {
    SMALL_DIVISORS.into_iter().any(|d| d != n && n % d == 0)
}

/// Bump `n` upward until it has no small divisor, never past `max`.
pub fn near_prime(mut n: usize, max: usize) -> usize {
    while n < max && has_small_divisor(n) {
        n += 1;
    }
    n.min(max)
}

/// Target active length of a tap with capacity `max` at `room_size`.
///
/// # Example
///
/// ```rust
/// use pocketverb_engine::target_length;
///
/// // round(7573 × 0.575) = 4354, bumped past its small divisors
/// assert_eq!(target_length(7573, 0.575), 4357);
/// // oversize rooms clamp to the capacity
/// assert_eq!(target_length(2088, 2.0), 2088);
/// ```
pub fn target_length(max: usize, room_size: f64) -> usize {
    let nominal = libm::round(max as f64 * room_size.max(0.0)) as usize;
    near_prime(nominal, max)
}
