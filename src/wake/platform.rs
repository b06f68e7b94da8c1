//! Platform seam for display-stay-active requests

use std::time::Duration;

use tracing::debug;

/// The underlying facility that keeps the display awake.
///
/// Injected into every [`super::WakeResource`] so the daemon carries no
/// hidden global platform state and tests can observe acquire/release pairs.
pub trait WakePlatform: Send + Sync {
    /// Request that the display stay active for at most `max_hold`.
    ///
    /// The platform may reclaim the resource once `max_hold` elapses; callers
    /// must not assume an indefinite hold.
    fn request_stay_awake(&self, max_hold: Duration) -> Result<(), String>;

    /// Relinquish a previously granted request immediately.
    fn release_stay_awake(&self);
}

/// Wake platform that only records requests in the log.
///
/// Used when no real display-power integration is configured. Sessions still
/// tick and render; the display simply is not forced to stay on.
#[derive(Debug, Default)]
pub struct LogOnlyWakePlatform;

impl WakePlatform for LogOnlyWakePlatform {
    fn request_stay_awake(&self, max_hold: Duration) -> Result<(), String> {
        debug!("Stay-awake requested for up to {:?} (log-only platform)", max_hold);
        Ok(())
    }

    fn release_stay_awake(&self) {
        debug!("Stay-awake released (log-only platform)");
    }
}
