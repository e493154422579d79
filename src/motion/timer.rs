#[derive(Debug, Clone)]
struct Pending<T> {
    due_ms: f64,
    payload: T,
}

/// One-shot timers fired from the frame clock rather than from their own
/// callbacks. Timers due at the same instant fire in the order they were
/// scheduled.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    pending: Vec<Pending<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn schedule(&mut self, due_ms: f64, payload: T) {
        let at = self
            .pending
            .partition_point(|p| p.due_ms.total_cmp(&due_ms).is_le());
        self.pending.insert(at, Pending { due_ms, payload });
    }

    /// Drop every pending timer, returning how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    /// Remove and return every payload due at or before `now_ms`, in firing order.
    pub fn pop_due(&mut self, now_ms: f64) -> Vec<T> {
        let n = self
            .pending
            .partition_point(|p| p.due_ms.total_cmp(&now_ms).is_le());
        self.pending.drain(..n).map(|p| p.payload).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_then_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(300.0, "c");
        q.schedule(100.0, "a");
        q.schedule(300.0, "d");
        q.schedule(200.0, "b");

        assert!(q.pop_due(50.0).is_empty());
        assert_eq!(q.pop_due(100.0), vec!["a"]);
        assert_eq!(q.pop_due(200.0), vec!["b"]);
        assert_eq!(q.pop_due(1000.0), vec!["c", "d"]);
        assert!(q.is_empty());
    }

    #[test]
    fn test_cancel_all() {
        let mut q = TimerQueue::new();
        q.schedule(10.0, 1);
        q.schedule(20.0, 2);
        q.schedule(30.0, 3);

        assert_eq!(q.pop_due(10.0), vec![1]);
        assert_eq!(q.len(), 2);
        assert_eq!(q.cancel_all(), 2);
        assert_eq!(q.cancel_all(), 0);
        assert!(q.pop_due(f64::MAX).is_empty());
    }
}
