use crate::models::Position;

/// Fixed-capacity ring buffer of the most recently accepted fixes.
///
/// Storage is allocated once; when full, the next push overwrites the oldest
/// slot. Iteration always runs oldest to newest.
#[derive(Debug, Clone)]
pub struct RecencyWindow {
    slots: Vec<Position>,
    capacity: usize,
    /// Index of the oldest entry once the buffer has wrapped.
    head: usize,
}

impl RecencyWindow {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "recency window needs at least one slot");
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            head: 0,
        }
    }

    /// Appends a fix, returning the evicted one when the window was full.
    pub fn push(&mut self, position: Position) -> Option<Position> {
        if self.slots.len() < self.capacity {
            self.slots.push(position);
            return None;
        }

        let evicted = std::mem::replace(&mut self.slots[self.head], position);
        self.head = (self.head + 1) % self.capacity;
        Some(evicted)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether enough fixes have been seen for statistics to update.
    pub fn is_ready(&self, min_positions: usize) -> bool {
        self.slots.len() >= min_positions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        let (newer, older) = self.slots.split_at(self.head);
        older.iter().chain(newer.iter())
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Duration, OffsetDateTime};

    fn fix(i: i64) -> Position {
        let t = OffsetDateTime::UNIX_EPOCH + Duration::seconds(i);
        Position::new(40.0 + i as f64 * 0.001, -105.0, 5.0, 3.0, t)
    }

    fn seconds(window: &RecencyWindow) -> Vec<i64> {
        window
            .iter()
            .map(|p| p.timestamp.unix_timestamp())
            .collect()
    }

    #[test]
    fn test_fills_then_evicts_oldest_first() {
        let mut window = RecencyWindow::new(5);
        for i in 0..5 {
            assert!(window.push(fix(i)).is_none());
        }
        assert_eq!(seconds(&window), vec![0, 1, 2, 3, 4]);

        let evicted = window.push(fix(5)).unwrap();
        assert_eq!(evicted.timestamp.unix_timestamp(), 0);
        assert_eq!(seconds(&window), vec![1, 2, 3, 4, 5]);

        let evicted = window.push(fix(6)).unwrap();
        assert_eq!(evicted.timestamp.unix_timestamp(), 1);
        assert_eq!(seconds(&window), vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut window = RecencyWindow::new(5);
        for i in 0..23 {
            window.push(fix(i));
            assert!(window.len() <= 5);
        }
        assert_eq!(window.len(), 5);
        assert_eq!(seconds(&window), vec![18, 19, 20, 21, 22]);
    }

    #[test]
    fn test_readiness() {
        let mut window = RecencyWindow::new(5);
        assert!(!window.is_ready(3));
        window.push(fix(0));
        window.push(fix(1));
        assert!(!window.is_ready(3));
        window.push(fix(2));
        assert!(window.is_ready(3));
    }

    #[test]
    fn test_clear_resets_order() {
        let mut window = RecencyWindow::new(2);
        for i in 0..3 {
            window.push(fix(i));
        }
        window.clear();
        assert!(window.is_empty());
        window.push(fix(7));
        window.push(fix(8));
        assert_eq!(seconds(&window), vec![7, 8]);
    }
}
