// Elapsed-time clock for a game session
// Started when a board is dealt, stopped when the engine reports the game end

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
pub struct GameClock {
    start_time: Option<Instant>, // Some while running
    elapsed: Duration,           // Frozen value once stopped
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart from zero
    pub fn start(&mut self) {
        self.elapsed = Duration::ZERO;
        self.start_time = Some(Instant::now());
    }

    /// Freeze the elapsed time; no-op when not running
    pub fn stop(&mut self) {
        if let Some(t0) = self.start_time.take() {
            self.elapsed = t0.elapsed();
        }
    }

    pub fn reset(&mut self) {
        self.start_time = None;
        self.elapsed = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        match self.start_time {
            Some(t0) => t0.elapsed(),
            None => self.elapsed,
        }
    }

    /// Elapsed time as `mm:ss`
    pub fn display(&self) -> String {
        format_mm_ss(self.elapsed())
    }
}

/// Format the minute and second components as `mm:ss`.
/// Minutes wrap past the hour, like a clock face.
pub fn format_mm_ss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", (secs / 60) % 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mm_ss() {
        assert_eq!(format_mm_ss(Duration::ZERO), "00:00");
        assert_eq!(format_mm_ss(Duration::from_millis(65_900)), "01:05");
        assert_eq!(format_mm_ss(Duration::from_secs(59 * 60 + 59)), "59:59");
        assert_eq!(format_mm_ss(Duration::from_secs(3600 + 7)), "00:07");
    }

    #[test]
    fn test_clock_lifecycle() {
        let mut clock = GameClock::new();
        assert!(!clock.is_running());
        assert_eq!(clock.display(), "00:00");

        clock.start();
        assert!(clock.is_running());
        clock.stop();
        assert!(!clock.is_running());
        let frozen = clock.elapsed();
        assert_eq!(clock.elapsed(), frozen);

        // stopping twice keeps the first value
        clock.stop();
        assert_eq!(clock.elapsed(), frozen);

        clock.reset();
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }
}
