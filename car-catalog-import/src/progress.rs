//! Load progress reporting.

/// Receives progress updates while a document is loaded.
pub trait LoadProgress {
    /// Called after each brand and everything beneath it is inserted.
    fn on_brand(&self, current: usize, total: usize, name: &str);

    /// Called when a phase starts (e.g., "Loading cars.json").
    fn on_phase(&self, message: &str);

    /// Called when the load is complete.
    fn on_complete(&self, message: &str);
}

/// Discards all updates.
pub struct SilentProgress;

impl LoadProgress for SilentProgress {
    fn on_brand(&self, _current: usize, _total: usize, _name: &str) {}
    fn on_phase(&self, _message: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// Reports through the `log` crate.
pub struct LogProgress;

impl LoadProgress for LogProgress {
    fn on_brand(&self, current: usize, total: usize, name: &str) {
        if current.is_multiple_of(25) || current == total {
            log::info!("  [{}/{}] {}", current, total, name);
        }
    }

    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
