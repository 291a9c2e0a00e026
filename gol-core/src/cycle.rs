/// Remembers the fingerprints of the last few generations and reports when
/// one comes back.
///
/// Periods up to `capacity - 1` are caught; longer ones slip through.
#[derive(Debug, Clone)]
pub struct CycleDetector {
    ring: Box<[Option<u32>]>,
    generation: usize,
}

impl CycleDetector {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 2, "a ring of {capacity} slots cannot hold a period");
        Self {
            ring: vec![None; capacity].into_boxed_slice(),
            generation: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.ring.len()
    }

    /// Generations recorded so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Stores `fingerprint` for the current generation and returns whether any
    /// other retained generation had the same one.
    pub fn record_and_check(&mut self, fingerprint: u32) -> bool {
        let slot = self.generation % self.ring.len();
        self.ring[slot] = Some(fingerprint);
        self.generation += 1;

        self.ring
            .iter()
            .enumerate()
            .any(|(index, &stored)| index != slot && stored == Some(fingerprint))
    }

    pub fn reset(&mut self) {
        self.ring.fill(None);
        self.generation = 0;
    }
}
