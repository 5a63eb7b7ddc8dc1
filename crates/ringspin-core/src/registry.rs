use std::collections::BTreeMap;

use tracing::debug;

use crate::color::CssColorParser;
use crate::error::Result;
use crate::options::{SpinnerOptions, SpinnerOverrides};
use crate::scheduler::Scheduler;
use crate::spinner::RingSpinner;
use crate::surface::Mount;

/// One spinner per mount point.
///
/// Attaching to a key that already has a spinner hands back the existing one
/// untouched; the new mount and options are dropped.
pub struct SpinnerRegistry<K: Ord, M: Mount, S: Scheduler> {
    spinners: BTreeMap<K, RingSpinner<M, S, CssColorParser>>,
}

impl<K: Ord, M: Mount, S: Scheduler> Default for SpinnerRegistry<K, M, S> {
    fn default() -> Self {
        Self {
            spinners: BTreeMap::new(),
        }
    }
}

impl<K: Ord + std::fmt::Debug, M: Mount, S: Scheduler> SpinnerRegistry<K, M, S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the spinner for `key`, creating it from `mount`, `scheduler` and
    /// `overrides` (over the default options) if there is none yet.
    pub fn attach(
        &mut self,
        key: K,
        mount: M,
        scheduler: S,
        overrides: &SpinnerOverrides,
    ) -> Result<&mut RingSpinner<M, S, CssColorParser>> {
        use std::collections::btree_map::Entry;

        match self.spinners.entry(key) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                debug!(key = ?entry.key(), "attaching spinner");
                let options = SpinnerOptions::with_overrides(overrides);
                let spinner = RingSpinner::new(mount, scheduler, options)?;
                Ok(entry.insert(spinner))
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&RingSpinner<M, S, CssColorParser>> {
        self.spinners.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut RingSpinner<M, S, CssColorParser>> {
        self.spinners.get_mut(key)
    }

    /// Remove and return the spinner for `key`, stopping it first.
    pub fn detach(&mut self, key: &K) -> Option<RingSpinner<M, S, CssColorParser>> {
        let mut spinner = self.spinners.remove(key)?;
        spinner.stop();
        Some(spinner)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.spinners.keys()
    }

    pub fn len(&self) -> usize {
        self.spinners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spinners.is_empty()
    }

    /// Feed due timer firings to every attached spinner.
    pub fn poll_timers(&mut self) -> usize {
        self.spinners.values_mut().map(|s| s.poll_timers()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use crate::scheduler::ManualScheduler;

    struct FixedMount(u32);

    impl Mount for FixedMount {
        type Surface = Scene;

        fn width(&self) -> u32 {
            self.0
        }

        fn height(&self) -> u32 {
            self.0
        }

        fn create_surface(&mut self, width: u32, height: u32) -> Scene {
            Scene::new(width, height)
        }
    }

    type Registry = SpinnerRegistry<&'static str, FixedMount, ManualScheduler>;

    #[test]
    fn test_attach_is_idempotent() {
        let mut registry = Registry::new();
        let overrides = SpinnerOverrides {
            tail_count: Some(2),
            ..Default::default()
        };
        registry
            .attach("header", FixedMount(100), ManualScheduler::new(), &overrides)
            .unwrap()
            .set_current_step(7);

        let again = registry
            .attach(
                "header",
                FixedMount(10),
                ManualScheduler::new(),
                &SpinnerOverrides::default(),
            )
            .unwrap();
        assert_eq!(again.current_step(), 7);
        assert_eq!(again.options().tail_count, 2);
        assert_eq!(again.mount().width(), 100);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_separate_keys_get_separate_spinners() {
        let mut registry = Registry::new();
        let none = SpinnerOverrides::default();
        registry
            .attach("a", FixedMount(10), ManualScheduler::new(), &none)
            .unwrap();
        registry
            .attach("b", FixedMount(20), ManualScheduler::new(), &none)
            .unwrap();
        assert_eq!(registry.keys().copied().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(registry.get(&"b").unwrap().mount().width(), 20);
    }

    #[test]
    fn test_attach_bad_color_leaves_registry_empty() {
        let mut registry = Registry::new();
        let overrides = SpinnerOverrides {
            active_color: Some("#zzzzzz".to_string()),
            ..Default::default()
        };
        assert!(registry
            .attach("x", FixedMount(10), ManualScheduler::new(), &overrides)
            .is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_detach_stops() {
        let mut registry = Registry::new();
        registry
            .attach("a", FixedMount(10), ManualScheduler::new(), &SpinnerOverrides::default())
            .unwrap()
            .start();
        let spinner = registry.detach(&"a").unwrap();
        assert!(!spinner.animating());
        assert!(!spinner.visible());
        assert!(registry.get_mut(&"a").is_none());
        assert!(registry.detach(&"a").is_none());
    }

    #[test]
    fn test_poll_timers_reaches_every_spinner() {
        let mut registry = Registry::new();
        let fast = SpinnerOverrides {
            cycle_time: Some(120),
            ..Default::default()
        };
        for key in ["a", "b"] {
            registry
                .attach(key, FixedMount(10), ManualScheduler::new(), &fast)
                .unwrap()
                .start();
        }
        for key in ["a", "b"] {
            registry
                .get_mut(&key)
                .unwrap()
                .scheduler_mut()
                .advance(std::time::Duration::from_millis(30));
        }
        assert_eq!(registry.poll_timers(), 6);
        assert_eq!(registry.get(&"a").unwrap().current_step(), 3);
    }
}
