/// Fixed-capacity ring of recent frame timestamps

use std::time::Instant;

#[derive(Debug, Clone)]
pub struct FrameTimes {
    stamps: Vec<Option<Instant>>,
    /// Total number of recorded stamps; the write index is derived from it
    count: u64,
}

impl FrameTimes {
    pub fn new(capacity: usize) -> Self {
        Self {
            stamps: vec![None; capacity],
            count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.stamps.len()
    }

    /// Number of stamps held (saturates at capacity)
    pub fn len(&self) -> usize {
        (self.count as usize).min(self.stamps.len())
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Total number of frames recorded since creation
    pub fn total(&self) -> u64 {
        self.count
    }

    /// Record a frame timestamp, overwriting the oldest one when full
    pub fn record(&mut self, stamp: Instant) {
        let index = (self.count % self.stamps.len() as u64) as usize;
        self.stamps[index] = Some(stamp);
        self.count += 1;
    }

    /// Most recent stamp
    pub fn newest(&self) -> Option<Instant> {
        if self.count == 0 {
            return None;
        }
        let index = ((self.count - 1) % self.stamps.len() as u64) as usize;
        self.stamps[index]
    }

    /// Oldest stamp still in the ring
    pub fn oldest(&self) -> Option<Instant> {
        if self.count == 0 {
            return None;
        }
        let index = if self.count as usize <= self.stamps.len() {
            0
        } else {
            (self.count % self.stamps.len() as u64) as usize
        };
        self.stamps[index]
    }

    /// Frames per second over the ring, 0 with fewer than two stamps
    pub fn fps(&self) -> f64 {
        let (Some(oldest), Some(newest)) = (self.oldest(), self.newest()) else {
            return 0.0;
        };
        let elapsed = newest.duration_since(oldest).as_secs_f64();
        if self.len() < 2 || elapsed <= 0.0 {
            return 0.0;
        }
        (self.len() - 1) as f64 / elapsed
    }
}
