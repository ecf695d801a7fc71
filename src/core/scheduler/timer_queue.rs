//=========================================================================
// Timer Queue
//=========================================================================
//
// One-shot delayed tasks keyed by a millisecond clock supplied by the
// caller (the page frame timestamp), so the queue itself never reads
// wall-clock time.
//
//=========================================================================

//=== TimerId =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

//=== TimerQueue ==========================================================

#[derive(Debug)]
struct Timer<T> {
    id: TimerId,
    deadline_ms: f64,
    task: T,
}

#[derive(Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    timers: Vec<Timer<T>>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            timers: Vec::new(),
        }
    }

    /// Schedules `task` to fire once `delay_ms` after `now_ms`.
    ///
    /// Negative delays are treated as zero.
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            deadline_ms: now_ms + delay_ms.max(0.0),
            task,
        });
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        before != self.timers.len()
    }

    /// Removes and returns tasks whose deadline is at or before `now_ms`,
    /// ordered by deadline, then by scheduling order.
    pub fn take_expired(&mut self, now_ms: f64) -> Vec<T> {
        let (mut expired, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut self.timers)
            .into_iter()
            .partition(|t| t.deadline_ms <= now_ms);
        self.timers = remaining;

        expired.sort_by(|a, b| {
            a.deadline_ms
                .total_cmp(&b.deadline_ms)
                .then(a.id.cmp(&b.id))
        });
        expired.into_iter().map(|t| t.task).collect()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
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
    fn fires_only_after_deadline() {
        let mut timers = TimerQueue::new();
        timers.schedule(0.0, 120.0, "reveal");

        assert!(timers.take_expired(119.0).is_empty());
        assert_eq!(timers.take_expired(120.0), vec!["reveal"]);
        assert!(timers.is_empty());
    }

    #[test]
    fn expired_tasks_are_ordered_by_deadline_then_insertion() {
        let mut timers = TimerQueue::new();
        timers.schedule(0.0, 60.0, 'b');
        timers.schedule(0.0, 0.0, 'a');
        timers.schedule(0.0, 60.0, 'c');

        assert_eq!(timers.take_expired(100.0), vec!['a', 'b', 'c']);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule(0.0, 10.0, 1);
        assert!(timers.cancel(id));
        assert!(timers.take_expired(100.0).is_empty());
    }

    #[test]
    fn negative_delay_fires_immediately() {
        let mut timers = TimerQueue::new();
        timers.schedule(50.0, -10.0, ());
        assert_eq!(timers.take_expired(50.0).len(), 1);
        assert_eq!(timers.len(), 0);
    }
}
