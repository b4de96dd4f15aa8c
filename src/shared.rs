//! Lock-free hand-off of a fully built lookup service to concurrent readers.

use arc_swap::ArcSwap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::{IpInfo, LookupService};

/// SharedLookup publishes frozen [`LookupService`] instances to readers.
///
/// A service is built single-threaded, then handed over by value, after
/// which nobody can mutate it. Re-imports build a fresh service and
/// [`publish`](Self::publish) it atomically: in-flight lookups finish on the
/// old service, new lookups see the new one.
///
/// # Example
///
/// ```
/// use iplookup::{LookupService, SharedLookup};
/// use std::sync::Arc;
///
/// let shared = Arc::new(SharedLookup::new(LookupService::new()));
///
/// let reader = Arc::clone(&shared);
/// let handle = std::thread::spawn(move || reader.try_get("10.1.2.3".parse().unwrap()));
/// assert!(handle.join().unwrap().is_some());
///
/// shared.publish(LookupService::new());
/// assert_eq!(shared.generation(), 1);
/// ```
pub struct SharedLookup {
    inner: ArcSwap<LookupService>,
    generation: AtomicU64,
}

impl SharedLookup {
    /// Wrap a fully built service.
    pub fn new(service: LookupService) -> Self {
        Self {
            inner: ArcSwap::from_pointee(service),
            generation: AtomicU64::new(0),
        }
    }

    /// Replace the current service with a newly built one.
    pub fn publish(&self, service: LookupService) {
        let ranges = service.range_count();
        let infos = service.info_count();
        self.inner.store(Arc::new(service));
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        log::info!(
            "Published lookup index generation {}: {} ranges, {} distinct info",
            generation,
            ranges,
            infos
        );
    }

    /// Get a snapshot of the current service.
    pub fn load(&self) -> Arc<LookupService> {
        self.inner.load_full()
    }

    /// Look up an IP address in the current service.
    pub fn try_get(&self, ip: IpAddr) -> Option<IpInfo> {
        self.inner.load().try_get(ip)
    }

    /// Get the number of services published since creation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeoInfo;
    use std::thread;

    fn service_with(city: &str) -> LookupService {
        let mut service = LookupService::new();
        service
            .add(
                "1.0.0.0".parse().unwrap(),
                "1.0.0.255".parse().unwrap(),
                &GeoInfo::new(city, "", "AU"),
            )
            .unwrap();
        service
    }

    fn city_of(shared: &SharedLookup) -> Option<String> {
        shared
            .try_get("1.0.0.1".parse().unwrap())
            .and_then(|info| info.location().map(|geo| geo.city.clone()))
    }

    #[test]
    fn test_publish_replaces_service() {
        let shared = SharedLookup::new(service_with("old"));
        assert_eq!(shared.generation(), 0);
        assert_eq!(city_of(&shared).as_deref(), Some("old"));

        shared.publish(service_with("new"));
        assert_eq!(shared.generation(), 1);
        assert_eq!(city_of(&shared).as_deref(), Some("new"));
    }

    #[test]
    fn test_snapshot_survives_publish() {
        let shared = SharedLookup::new(service_with("old"));
        let snapshot = shared.load();

        shared.publish(LookupService::new());

        assert_eq!(snapshot.range_count(), 1);
        assert_eq!(shared.load().range_count(), 0);
    }

    #[test]
    fn test_concurrent_readers() {
        let shared = Arc::new(SharedLookup::new(service_with("city")));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        assert!(shared.try_get("1.0.0.7".parse().unwrap()).is_some());
                        assert!(shared.try_get("8.8.8.8".parse().unwrap()).is_none());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
