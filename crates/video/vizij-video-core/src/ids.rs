//! Identifiers and a simple allocator for play requests and timers.

use serde::{Deserialize, Serialize};

/// Tags one `play()` issued to the media resource so its asynchronous outcome
/// can be matched against the latest request.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PlayRequestId(pub u32);

/// Opaque handle for a scheduled hide timer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(pub u32);

/// Monotonic allocator for PlayRequestId and TimerHandle.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_play: u32,
    next_timer: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_play_request(&mut self) -> PlayRequestId {
        let id = PlayRequestId(self.next_play);
        self.next_play = self.next_play.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_timer(&mut self) -> TimerHandle {
        let id = TimerHandle(self.next_timer);
        self.next_timer = self.next_timer.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_play_request(), PlayRequestId(0));
        assert_eq!(alloc.alloc_play_request(), PlayRequestId(1));
        assert_eq!(alloc.alloc_timer(), TimerHandle(0));
        assert_eq!(alloc.alloc_timer(), TimerHandle(1));
    }
}
