use log::{Level, LevelFilter};

/// Verbosity for the gallery's diagnostic output.
///
/// Passed down to the components that produce expensive debug dumps (gesture
/// state snapshots, per-frame scroll deltas) so they can skip formatting them
/// entirely. Regular `log` filtering still applies on top of this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LevelFilter,
}

impl LogConfig {
    pub const fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    pub const fn verbose() -> Self {
        Self::new(LevelFilter::Trace)
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    pub fn enabled(&self, level: Level) -> bool {
        level <= self.level && log::log_enabled!(level)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new(LevelFilter::Off)
    }
}
