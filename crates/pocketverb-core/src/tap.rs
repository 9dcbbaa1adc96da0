//! Allpass taps for the diffusion network.
//!
//! A [`Tap`] is one named delay element holding two independent allpass
//! rings (the inner and outer pass) that share a single active length.
//! The ring cursor walks *backward* through the buffer, and a step below
//! index 0 (or past the active length) wraps to the active length rather
//! than to 0. This asymmetric wrap shapes the impulse response of the whole
//! network, so it is reproduced exactly instead of using a modulo.
//!
//! Buffers are allocated once at `max_len + 1` slots and never resized;
//! only the active length and the buffer contents change at runtime.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// Feedback coefficient shared by every tap: the reciprocal golden ratio.
pub const ALLPASS_FEEDBACK: f64 = 0.618_033_988_749_894_8;

/// Active length a tap starts with before the first re-seed.
pub const INITIAL_LENGTH: usize = 4;

/// Number of history slots kept per pass.
pub const HISTORY_SLOTS: usize = 3;

/// Which of the two chained passes a tap operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// First traversal of the bank.
    Inner,
    /// Second traversal, fed by the inner pass result.
    Outer,
}

/// Step a cursor backward with the asymmetric wrap.
///
/// `cursor - 1` outside `[0, len]` lands on `len`.
#[inline]
pub fn wrap_back(cursor: usize, len: usize) -> usize {
    match cursor.checked_sub(1) {
        Some(prev) if prev <= len => prev,
        _ => len,
    }
}

/// One allpass ring: a buffer plus its read/write cursor.
#[derive(Debug, Clone)]
pub struct AllpassRing {
    buffer: Vec<f64>,
    cursor: usize,
}

impl AllpassRing {
    /// Create a zeroed ring able to hold `max_len + 1` samples.
    pub fn new(max_len: usize) -> Self {
        Self {
            buffer: vec![0.0; max_len + 1],
            cursor: 1.min(max_len),
        }
    }

    /// Run one allpass step over the first `len + 1` slots.
    ///
    /// `len` must not exceed the capacity given to [`new`](Self::new), and
    /// the cursor must already lie in `[0, len]`.
    #[inline]
    pub fn process(&mut self, input: f64, len: usize) -> f64 {
        debug_assert!(self.cursor <= len, "cursor {} past length {}", self.cursor, len);
        let read = wrap_back(self.cursor, len);
        let pre = input - ALLPASS_FEEDBACK * self.buffer[read];
        self.buffer[self.cursor] = pre;
        let recursive = pre * ALLPASS_FEEDBACK;
        self.cursor = wrap_back(self.cursor, len);
        recursive + self.buffer[self.cursor]
    }

    /// Zero every slot from the cursor to the physical end of the buffer,
    /// then pull the cursor inside `[0, len]` if the new length is shorter.
    pub fn reseed(&mut self, len: usize) {
        self.buffer[self.cursor..].fill(0.0);
        if self.cursor > len {
            self.cursor = len;
        }
    }

    /// Current cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Zero the buffer and park the cursor at its start position.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.cursor = 1.min(self.buffer.len() - 1);
    }
}

/// A named allpass tap with inner and outer rings.
///
/// # Example
///
/// ```rust
/// use pocketverb_core::{Pass, Tap};
///
/// let mut tap = Tap::new('A', 7573);
/// tap.set_len(4357);
/// let out = tap.process(Pass::Inner, 1.0);
/// assert!(out.is_finite());
/// assert_eq!(tap.history(Pass::Inner)[0], out);
/// ```
#[derive(Debug, Clone)]
pub struct Tap {
    name: char,
    max_len: usize,
    len: usize,
    inner: AllpassRing,
    outer: AllpassRing,
    // Newest first: [inner; 3] then [outer; 3].
    history: [f64; 2 * HISTORY_SLOTS],
}

impl Tap {
    /// Create a tap with the given name and maximum length.
    pub fn new(name: char, max_len: usize) -> Self {
        Self {
            name,
            max_len,
            len: INITIAL_LENGTH.min(max_len),
            inner: AllpassRing::new(max_len),
            outer: AllpassRing::new(max_len),
            history: [0.0; 2 * HISTORY_SLOTS],
        }
    }

    /// Tap name (`'A'..='Z'`).
    pub fn name(&self) -> char {
        self.name
    }

    /// Maximum active length.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Current active length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the active length is zero.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Cursor of the given pass.
    pub fn cursor(&self, pass: Pass) -> usize {
        self.ring(pass).cursor()
    }

    /// The three most recent outputs of a pass, newest first.
    #[inline]
    pub fn history(&self, pass: Pass) -> &[f64] {
        match pass {
            Pass::Inner => &self.history[..HISTORY_SLOTS],
            Pass::Outer => &self.history[HISTORY_SLOTS..],
        }
    }

    /// Run the allpass for one pass and push the result into that pass's history.
    #[inline]
    pub fn process(&mut self, pass: Pass, input: f64) -> f64 {
        let len = self.len;
        let (ring, base) = match pass {
            Pass::Inner => (&mut self.inner, 0),
            Pass::Outer => (&mut self.outer, HISTORY_SLOTS),
        };
        let out = ring.process(input, len);
        self.history[base + 2] = self.history[base + 1];
        self.history[base + 1] = self.history[base];
        self.history[base] = out;
        out
    }

    /// Install a new active length.
    ///
    /// The length is clamped to `max_len`; both rings have their tails
    /// zeroed from the cursor to the physical end before the length changes.
    pub fn set_len(&mut self, len: usize) {
        let len = len.min(self.max_len);
        self.inner.reseed(len);
        self.outer.reseed(len);
        self.len = len;
    }

    /// Clear buffers and history and return to the initial length.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.outer.clear();
        self.history = [0.0; 2 * HISTORY_SLOTS];
        self.len = INITIAL_LENGTH.min(self.max_len);
    }

    fn ring(&self, pass: Pass) -> &AllpassRing {
        match pass {
            Pass::Inner => &self.inner,
            Pass::Outer => &self.outer,
        }
    }
}
