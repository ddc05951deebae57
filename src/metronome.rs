//! Beat clock for the front end. Beats fall on `n * interval` milliseconds
//! after the session start, beat 0 being the start itself.

/// Fraction of a beat during which the visual pulse stays lit.
pub const FLASH_FRACTION: f64 = 0.15;

#[derive(Debug, Clone, PartialEq)]
pub struct Metronome {
    interval_ms: f64,
    last_beat: Option<u64>,
}

impl Metronome {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_beat: None,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Index of the beat that most recently sounded.
    pub fn beat_index(&self, elapsed_ms: f64) -> u64 {
        (elapsed_ms.max(0.0) / self.interval_ms).floor() as u64
    }

    /// Position inside the current beat, in `[0, 1)`.
    pub fn phase(&self, elapsed_ms: f64) -> f64 {
        (elapsed_ms.max(0.0) % self.interval_ms) / self.interval_ms
    }

    pub fn is_flashing(&self, elapsed_ms: f64) -> bool {
        self.phase(elapsed_ms) < FLASH_FRACTION
    }

    /// Returns the new beat index the first time it is observed. Beats that
    /// elapse between two polls are collapsed into one.
    pub fn poll(&mut self, elapsed_ms: f64) -> Option<u64> {
        let beat = self.beat_index(elapsed_ms);
        if self.last_beat.is_some_and(|last| beat <= last) {
            return None;
        }
        self.last_beat = Some(beat);
        Some(beat)
    }

    pub fn reset(&mut self) {
        self.last_beat = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beat_index() {
        let m = Metronome::new(500.0);
        assert_eq!(m.beat_index(0.0), 0);
        assert_eq!(m.beat_index(499.9), 0);
        assert_eq!(m.beat_index(500.0), 1);
        assert_eq!(m.beat_index(2600.0), 5);
        assert_eq!(m.beat_index(-10.0), 0);
    }

    #[test]
    fn test_phase_and_flash() {
        let m = Metronome::new(500.0);
        assert_eq!(m.phase(0.0), 0.0);
        assert_eq!(m.phase(750.0), 0.5);
        assert!(m.is_flashing(1010.0));
        assert!(!m.is_flashing(1100.0));
    }

    #[test]
    fn test_poll_fires_once_per_beat() {
        let mut m = Metronome::new(500.0);
        assert_eq!(m.poll(0.0), Some(0));
        assert_eq!(m.poll(20.0), None);
        assert_eq!(m.poll(499.0), None);
        assert_eq!(m.poll(505.0), Some(1));
        assert_eq!(m.poll(520.0), None);
    }

    #[test]
    fn test_poll_collapses_missed_beats() {
        let mut m = Metronome::new(500.0);
        m.poll(0.0);
        assert_eq!(m.poll(1700.0), Some(3));
        assert_eq!(m.poll(1800.0), None);
    }

    #[test]
    fn test_reset() {
        let mut m = Metronome::new(500.0);
        m.poll(0.0);
        m.reset();
        assert_eq!(m.poll(0.0), Some(0));
    }
}
