//! Scoped display-wake resource guard

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::WakePlatform;

/// Maximum hold for an ambient clock session.
pub const AMBIENT_MAX_HOLD: Duration = Duration::from_secs(10 * 60);

/// Maximum hold for a countdown timer session.
pub const TIMER_MAX_HOLD: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug)]
struct Held {
    acquired_at: Instant,
    max_hold: Duration,
}

/// A display-stay-active resource with exactly one eventual release per
/// acquire.
///
/// `acquire` while held and `release` while released are both no-ops, so
/// every exit path, including drop, can release unconditionally. When the
/// platform refuses the request, the resource stays released and the caller
/// keeps running with the display no longer pinned on. One session owns one
/// instance; resources are never shared across sessions.
pub struct WakeResource {
    platform: Arc<dyn WakePlatform>,
    held: Option<Held>,
}

impl WakeResource {
    pub fn new(platform: Arc<dyn WakePlatform>) -> Self {
        Self {
            platform,
            held: None,
        }
    }

    /// Request the stay-awake resource for at most `max_hold`.
    ///
    /// Idempotent: a second acquire while held changes nothing. Platform
    /// refusal degrades gracefully and is logged, not propagated.
    pub fn acquire(&mut self, max_hold: Duration) {
        if self.held.is_some() {
            debug!("Wake resource already held, acquire is a no-op");
            return;
        }

        match self.platform.request_stay_awake(max_hold) {
            Ok(()) => {
                info!("Wake resource acquired for up to {:?}", max_hold);
                self.held = Some(Held {
                    acquired_at: Instant::now(),
                    max_hold,
                });
            }
            Err(e) => {
                warn!(
                    "Wake resource unavailable, display may not stay active: {}",
                    e
                );
            }
        }
    }

    /// Relinquish the resource. Safe to call repeatedly or when released.
    pub fn release(&mut self) {
        if let Some(held) = self.held.take() {
            self.platform.release_stay_awake();
            info!(
                "Wake resource released after {:?}",
                held.acquired_at.elapsed()
            );
        }
    }

    pub fn is_held(&self) -> bool {
        self.held.is_some()
    }

    /// When the platform may reclaim the hold, if currently held.
    pub fn expires_at(&self) -> Option<Instant> {
        self.held.as_ref().map(|h| h.acquired_at + h.max_hold)
    }
}

impl Drop for WakeResource {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Platform fake that counts acquire/release pairs.
    #[derive(Debug, Default)]
    pub(crate) struct CountingWakePlatform {
        pub acquires: AtomicUsize,
        pub releases: AtomicUsize,
        pub refuse: std::sync::atomic::AtomicBool,
    }

    impl WakePlatform for CountingWakePlatform {
        fn request_stay_awake(&self, _max_hold: Duration) -> Result<(), String> {
            if self.refuse.load(Ordering::SeqCst) {
                return Err("platform refused".to_string());
            }
            self.acquires.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn release_stay_awake(&self) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn double_acquire_holds_exactly_once() {
        let platform = Arc::new(CountingWakePlatform::default());
        let mut wake = WakeResource::new(Arc::clone(&platform) as Arc<dyn WakePlatform>);

        wake.acquire(AMBIENT_MAX_HOLD);
        wake.acquire(AMBIENT_MAX_HOLD);
        assert!(wake.is_held());
        assert_eq!(platform.acquires.load(Ordering::SeqCst), 1);

        wake.release();
        assert!(!wake.is_held());
        assert_eq!(platform.releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn double_release_is_a_noop() {
        let platform = Arc::new(CountingWakePlatform::default());
        let mut wake = WakeResource::new(Arc::clone(&platform) as Arc<dyn WakePlatform>);

        wake.release();
        wake.acquire(TIMER_MAX_HOLD);
        wake.release();
        wake.release();
        assert_eq!(platform.acquires.load(Ordering::SeqCst), 1);
        assert_eq!(platform.releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_releases_a_held_resource() {
        let platform = Arc::new(CountingWakePlatform::default());
        {
            let mut wake = WakeResource::new(Arc::clone(&platform) as Arc<dyn WakePlatform>);
            wake.acquire(AMBIENT_MAX_HOLD);
        }
        assert_eq!(platform.releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn platform_refusal_leaves_resource_released() {
        let platform = Arc::new(CountingWakePlatform::default());
        platform.refuse.store(true, Ordering::SeqCst);
        let mut wake = WakeResource::new(Arc::clone(&platform) as Arc<dyn WakePlatform>);

        wake.acquire(AMBIENT_MAX_HOLD);
        assert!(!wake.is_held());
        assert_eq!(wake.expires_at(), None);

        wake.release();
        assert_eq!(platform.releases.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn expiry_reflects_the_requested_hold() {
        let platform = Arc::new(CountingWakePlatform::default());
        let mut wake = WakeResource::new(platform as Arc<dyn WakePlatform>);
        wake.acquire(AMBIENT_MAX_HOLD);
        let expiry = wake.expires_at().unwrap();
        assert!(expiry > Instant::now());
    }
}
