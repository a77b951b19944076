//! Explicit tick source for frame-driven animation.
//!
//! Animations never re-arm themselves through closures. Each owner requests a
//! frame under its own key; the host drains the due keys once per frame and
//! routes each one back to its owner, which decides whether to request again.

use smallvec::SmallVec;

pub struct FrameScheduler<K> {
    pending: SmallVec<[K; 4]>,
    last_frame_time_nanos: Option<u64>,
    frames: u64,
}

impl<K: Copy + PartialEq> FrameScheduler<K> {
    pub fn new() -> Self {
        Self {
            pending: SmallVec::new(),
            last_frame_time_nanos: None,
            frames: 0,
        }
    }

    /// Requests a callback on the next frame. Repeated requests for the same
    /// key before that frame collapse into one.
    pub fn request(&mut self, key: K) {
        if !self.pending.contains(&key) {
            self.pending.push(key);
        }
    }

    pub fn cancel(&mut self, key: K) {
        self.pending.retain(|pending| *pending != key);
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_requested(&self, key: K) -> bool {
        self.pending.contains(&key)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Takes every key requested so far, in request order. Keys requested
    /// while the returned batch is being processed land in the next frame.
    pub fn begin_frame(&mut self, frame_time_nanos: u64) -> SmallVec<[K; 4]> {
        self.last_frame_time_nanos = Some(frame_time_nanos);
        self.frames += 1;
        std::mem::take(&mut self.pending)
    }

    pub fn last_frame_time_nanos(&self) -> Option<u64> {
        self.last_frame_time_nanos
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

impl<K: Copy + PartialEq> Default for FrameScheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// A one-shot deferred payload with a deadline in milliseconds.
///
/// Owners keep it in an `Option`; dropping or `take`-ing the option cancels it.
#[derive(Clone, Debug, PartialEq)]
pub struct DelayedTask<T> {
    deadline_millis: u64,
    payload: T,
}

impl<T> DelayedTask<T> {
    pub fn new(now_millis: u64, delay_millis: u64, payload: T) -> Self {
        Self {
            deadline_millis: now_millis.saturating_add(delay_millis),
            payload,
        }
    }

    pub fn deadline_millis(&self) -> u64 {
        self.deadline_millis
    }

    pub fn is_due(&self, now_millis: u64) -> bool {
        now_millis >= self.deadline_millis
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Removes the task from `slot` and returns its payload once due.
    pub fn take_due(slot: &mut Option<Self>, now_millis: u64) -> Option<T> {
        match slot {
            Some(task) if task.is_due(now_millis) => slot.take().map(|task| task.payload),
            _ => None,
        }
    }
}
