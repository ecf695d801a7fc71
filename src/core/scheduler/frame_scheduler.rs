//=========================================================================
// Frame Scheduler
//=========================================================================
//
// Per-frame task queue driven by the host's paint cycle.
//
// Pattern: request() during frame N → take_due() at frame N+1
//
// Tasks requested while due tasks are being processed land in the
// following frame, so a step that reschedules itself runs exactly once
// per frame.
//
//=========================================================================

//=== FrameHandle =========================================================

/// Cancellable handle for a requested frame callback.
///
/// Handles are unique for the lifetime of a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

//=== FrameScheduler ======================================================

#[derive(Debug)]
pub struct FrameScheduler<T> {
    next_handle: u64,
    pending: Vec<(FrameHandle, T)>,
}

impl<T> FrameScheduler<T> {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            pending: Vec::new(),
        }
    }

    /// Requests `task` to run on the next frame.
    pub fn request(&mut self, task: T) -> FrameHandle {
        let handle = FrameHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push((handle, task));
        handle
    }

    /// Cancels a pending request. Returns false if it already ran or was
    /// cancelled before.
    pub fn cancel(&mut self, handle: FrameHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(h, _)| *h != handle);
        before != self.pending.len()
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.iter().any(|(h, _)| *h == handle)
    }

    /// Removes and returns every task due this frame, in request order.
    pub fn take_due(&mut self) -> Vec<(FrameHandle, T)> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl<T> Default for FrameScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique() {
        let mut scheduler = FrameScheduler::new();
        let a = scheduler.request("a");
        let b = scheduler.request("b");
        assert_ne!(a, b);
        assert_eq!(scheduler.pending(), 2);
    }

    #[test]
    fn take_due_preserves_request_order() {
        let mut scheduler = FrameScheduler::new();
        scheduler.request(1);
        scheduler.request(2);
        scheduler.request(3);

        let due: Vec<i32> = scheduler.take_due().into_iter().map(|(_, t)| t).collect();
        assert_eq!(due, vec![1, 2, 3]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn requests_during_processing_wait_for_next_frame() {
        let mut scheduler = FrameScheduler::new();
        scheduler.request("step");

        let due = scheduler.take_due();
        for (_, task) in due {
            scheduler.request(task);
        }

        assert_eq!(scheduler.pending(), 1, "Rescheduled task must not run twice in one frame");
    }

    #[test]
    fn cancel_removes_pending_request_once() {
        let mut scheduler = FrameScheduler::new();
        let keep = scheduler.request("keep");
        let drop = scheduler.request("drop");

        assert!(scheduler.cancel(drop));
        assert!(!scheduler.cancel(drop), "Second cancel is a no-op");
        assert!(scheduler.is_pending(keep));
        assert!(!scheduler.is_pending(drop));
    }

    #[test]
    fn cancel_after_run_is_noop() {
        let mut scheduler = FrameScheduler::new();
        let handle = scheduler.request(());
        scheduler.take_due();
        assert!(!scheduler.cancel(handle));
    }
}
