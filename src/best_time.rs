//! Persisted best survival time
//!
//! One scalar in LocalStorage: the longest run in seconds, stored as a plain
//! decimal string. Anything missing or malformed reads as zero.

/// The best-time record
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BestTime {
    pub seconds: f32,
}

impl BestTime {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "lane_rush_best_time";

    pub fn new() -> Self {
        Self { seconds: 0.0 }
    }

    /// Record a finished run. The stored value only moves up; returns whether
    /// this run set a new record.
    pub fn record(&mut self, survived: f32) -> bool {
        if survived > self.seconds {
            self.seconds = survived;
            true
        } else {
            false
        }
    }

    /// Parse a stored value; non-numeric, non-finite, and negative values
    /// all fall back to zero
    #[allow(dead_code)]
    fn parse_stored(raw: &str) -> f32 {
        raw.trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or(0.0)
    }

    /// Load the best time from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                let seconds = Self::parse_stored(&raw);
                log::info!("Loaded best time: {seconds:.1}s");
                return Self { seconds };
            }
        }

        log::info!("No best time found, starting fresh");
        Self::new()
    }

    /// Save the best time to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.seconds.to_string());
            log::info!("Best time saved ({:.1}s)", self.seconds);
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_the_maximum() {
        let mut best = BestTime { seconds: 30.0 };
        assert!(best.record(50.0));
        assert_eq!(best.seconds, 50.0);

        assert!(!best.record(10.0));
        assert_eq!(best.seconds, 50.0);

        // Ties are not improvements
        assert!(!best.record(50.0));
        assert_eq!(best.seconds, 50.0);
    }

    #[test]
    fn best_tracks_running_maximum_across_runs() {
        let mut best = BestTime::new();
        let runs = [12.0, 30.0, 7.5, 29.9, 30.0, 31.2, 0.0];
        let mut max = 0.0f32;
        for run in runs {
            best.record(run);
            max = max.max(run);
            assert_eq!(best.seconds, max);
        }
    }

    #[test]
    fn malformed_stored_values_read_as_zero() {
        assert_eq!(BestTime::parse_stored(""), 0.0);
        assert_eq!(BestTime::parse_stored("garbage"), 0.0);
        assert_eq!(BestTime::parse_stored("NaN"), 0.0);
        assert_eq!(BestTime::parse_stored("inf"), 0.0);
        assert_eq!(BestTime::parse_stored("-4.2"), 0.0);
        assert_eq!(BestTime::parse_stored(" 27.5 "), 27.5);
    }
}
