use crate::models::{Position, StoredSample};

/// Keeps every chosen fix for the live route, but only the first and then
/// every `stride`-th one for storage.
#[derive(Debug, Clone)]
pub struct TrackDownsampler {
    stride: u64,
    counter: u64,
    route: Vec<Position>,
    stored: Vec<StoredSample>,
}

impl TrackDownsampler {
    pub fn new(stride: u64) -> Self {
        assert!(stride > 0, "downsample stride must be at least 1");
        Self {
            stride,
            counter: 0,
            route: Vec::new(),
            stored: Vec::new(),
        }
    }

    /// Records a chosen fix. Returns true when it was also stored.
    pub fn record(&mut self, chosen: &Position) -> bool {
        self.route.push(*chosen);
        self.counter += 1;

        if self.counter == 1 || self.counter % self.stride == 0 {
            self.stored.push(StoredSample::from(chosen));
            return true;
        }
        false
    }

    pub fn chosen_count(&self) -> u64 {
        self.counter
    }

    pub fn route(&self) -> &[Position] {
        &self.route
    }

    pub fn stored(&self) -> &[StoredSample] {
        &self.stored
    }

    pub fn into_stored(self) -> Vec<StoredSample> {
        self.stored
    }
}

impl Default for TrackDownsampler {
    fn default() -> Self {
        Self::new(crate::config::DOWNSAMPLE_STRIDE)
    }
}
