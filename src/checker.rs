// Wi-Fi Reminder - Checker
// Copyright (C) 2026 Wi-Fi Reminder Developers
// SPDX-License-Identifier: MIT

//! One evaluation cycle: read the device, decide, persist, notify.

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::logind::LockProbe;
use crate::monitor::{Evaluation, Reading, UsageMonitor};
use crate::network::ConnectivityProbe;
use crate::notify::Notifier;
use crate::stats::TrafficSource;
use crate::storage::StateStore;

/// Runs evaluation cycles against live collaborators.
pub struct Checker {
    monitor: UsageMonitor,
    traffic: Box<dyn TrafficSource>,
    connectivity: Box<dyn ConnectivityProbe>,
    lock: Box<dyn LockProbe>,
    clock: Box<dyn Clock>,
    store: Box<dyn StateStore>,
    notifier: Box<dyn Notifier>,
}

impl Checker {
    pub fn new(
        monitor: UsageMonitor,
        traffic: Box<dyn TrafficSource>,
        connectivity: Box<dyn ConnectivityProbe>,
        lock: Box<dyn LockProbe>,
        clock: Box<dyn Clock>,
        store: Box<dyn StateStore>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            monitor,
            traffic,
            connectivity,
            lock,
            clock,
            store,
            notifier,
        }
    }

    /// Read every input of a cycle fresh from the collaborators.
    pub fn read(&self) -> Reading {
        Reading {
            device_locked: self.lock.device_locked(),
            network: self.connectivity.network_state(),
            current_mobile_bytes: self.traffic.mobile_bytes(),
            now_millis: self.clock.now_millis(),
        }
    }

    /// Run a single evaluation cycle.
    ///
    /// Notification failures are logged; only a failure to persist the new
    /// baseline is returned.
    pub fn run_once(&mut self) -> Result<Evaluation> {
        let reading = self.read();
        debug!("Reading: {:?}", reading);

        let before = self.store.load();
        let mut state = before.clone();
        let evaluation = self.monitor.evaluate(&reading, &mut state);

        if state != before {
            self.store.save(&state)?;
        }

        match &evaluation {
            Evaluation::Skipped(reason) => info!("Check skipped: {}", reason),
            Evaluation::Evaluated(events) if events.is_empty() => {
                info!("Mobile usage within threshold")
            }
            Evaluation::Evaluated(_) => {}
        }

        for event in evaluation.events() {
            info!("Dispatching {:?}", event);
            if let Err(e) = self.notifier.notify(event) {
                warn!("Failed to deliver notification: {:#}", e);
            }
        }

        Ok(evaluation)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::anyhow;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::clock::FixedClock;
    use crate::monitor::{Event, MonitorState, NetworkState, SkipReason};
    use crate::network::TransportFlags;
    use crate::storage::MemoryStateStore;

    const NOW: i64 = 1_700_000_000_000;

    struct Bytes(u64);
    impl TrafficSource for Bytes {
        fn mobile_bytes(&self) -> u64 {
            self.0
        }
    }

    struct Net(Option<TransportFlags>);
    impl ConnectivityProbe for Net {
        fn transports(&self) -> Result<TransportFlags> {
            self.0.ok_or_else(|| anyhow!("no connectivity service"))
        }
        fn name(&self) -> &'static str {
            "test"
        }
    }

    struct Lock(bool);
    impl LockProbe for Lock {
        fn is_locked(&self) -> Result<bool> {
            Ok(self.0)
        }
        fn name(&self) -> &'static str {
            "test"
        }
    }

    #[derive(Clone, Default)]
    struct Recorder {
        events: Rc<RefCell<Vec<Event>>>,
        fail: bool,
    }
    impl Notifier for Recorder {
        fn notify(&self, event: &Event) -> Result<()> {
            self.events.borrow_mut().push(*event);
            if self.fail {
                Err(anyhow!("daemon gone"))
            } else {
                Ok(())
            }
        }
    }

    /// Store shared with the test so saves can be inspected.
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<MemoryStateStore>>);
    impl StateStore for SharedStore {
        fn load(&mut self) -> MonitorState {
            self.0.borrow_mut().load()
        }
        fn save(&mut self, state: &MonitorState) -> Result<()> {
            self.0.borrow_mut().save(state)
        }
    }

    /// Store whose saves always fail.
    struct ReadOnlyStore(MonitorState);
    impl StateStore for ReadOnlyStore {
        fn load(&mut self) -> MonitorState {
            self.0.clone()
        }
        fn save(&mut self, _state: &MonitorState) -> Result<()> {
            Err(anyhow!("read-only file system"))
        }
    }

    const MOBILE: TransportFlags = TransportFlags { wifi: false, mobile: true };

    fn recent_state() -> MonitorState {
        MonitorState {
            total_mobile_usage_bytes: 1_000,
            last_verified_time_millis: NOW - 120_000,
            notify_threshold_bytes: 3_000,
            ..Default::default()
        }
    }

    fn checker(
        bytes: u64,
        net: Option<TransportFlags>,
        locked: bool,
        store: SharedStore,
        notifier: Recorder,
    ) -> Checker {
        Checker::new(
            UsageMonitor::default(),
            Box::new(Bytes(bytes)),
            Box::new(Net(net)),
            Box::new(Lock(locked)),
            Box::new(FixedClock(NOW)),
            Box::new(store),
            Box::new(notifier),
        )
    }

    #[test]
    fn test_over_threshold_dispatches_and_persists() {
        let store = SharedStore::default();
        store.0.borrow_mut().state = recent_state();
        let notifier = Recorder::default();

        let mut checker = checker(5_000, Some(MOBILE), false, store.clone(), notifier.clone());
        let result = checker.run_once().unwrap();

        assert_eq!(result.events(), &[Event::UsageExceeded { diff_bytes: 4_000 }]);
        assert_eq!(*notifier.events.borrow(), vec![Event::UsageExceeded { diff_bytes: 4_000 }]);

        let saved = store.0.borrow().state.clone();
        assert_eq!(saved.total_mobile_usage_bytes, 5_000);
        assert_eq!(saved.last_verified_time_millis, NOW);
        assert_eq!(saved.notify_counter, 1);
    }

    #[test]
    fn test_skip_without_mutation_does_not_save() {
        let store = SharedStore::default();
        store.0.borrow_mut().state = recent_state();
        let notifier = Recorder::default();

        let mut checker = checker(5_000, Some(MOBILE), true, store.clone(), notifier.clone());
        let result = checker.run_once().unwrap();

        assert_eq!(result, Evaluation::Skipped(SkipReason::DeviceLocked));
        assert_eq!(store.0.borrow().saves, 0);
        assert!(notifier.events.borrow().is_empty());
    }

    #[test]
    fn test_connectivity_failure_suppresses() {
        let store = SharedStore::default();
        store.0.borrow_mut().state = recent_state();

        let mut checker = checker(5_000, None, false, store.clone(), Recorder::default());
        let result = checker.run_once().unwrap();

        assert_eq!(result, Evaluation::Skipped(SkipReason::NotMobileOnly(NetworkState::Neither)));
        assert_eq!(store.0.borrow().saves, 0);
    }

    #[test]
    fn test_notifier_failure_is_not_fatal() {
        let store = SharedStore::default();
        store.0.borrow_mut().state = recent_state();
        let notifier = Recorder {
            fail: true,
            ..Default::default()
        };

        let mut checker = checker(5_000, Some(MOBILE), false, store.clone(), notifier.clone());
        assert!(checker.run_once().is_ok());
        assert_eq!(notifier.events.borrow().len(), 1);
        assert_eq!(store.0.borrow().state.notify_counter, 1);
    }

    #[test]
    fn test_first_run_records_baseline() {
        let store = SharedStore::default();

        let mut checker = checker(77_000, Some(MOBILE), false, store.clone(), Recorder::default());
        let result = checker.run_once().unwrap();

        assert_eq!(result, Evaluation::Skipped(SkipReason::StaleWindow));
        assert_eq!(store.0.borrow().saves, 1);
        assert_eq!(store.0.borrow().state.total_mobile_usage_bytes, 77_000);
    }

    #[test]
    fn test_save_failure_is_returned_without_dispatch() {
        let notifier = Recorder::default();
        let mut checker = Checker::new(
            UsageMonitor::default(),
            Box::new(Bytes(5_000)),
            Box::new(Net(Some(MOBILE))),
            Box::new(Lock(false)),
            Box::new(FixedClock(NOW)),
            Box::new(ReadOnlyStore(recent_state())),
            Box::new(notifier.clone()),
        );

        let err = checker.run_once().unwrap_err();
        assert!(err.to_string().contains("read-only"));
        assert!(notifier.events.borrow().is_empty());
    }

    #[test]
    fn test_tenth_notification_dispatches_prompt_after_usage() {
        let store = SharedStore::default();
        store.0.borrow_mut().state = MonitorState {
            notify_counter: 9,
            ..recent_state()
        };
        let notifier = Recorder::default();

        let mut checker = checker(5_000, Some(MOBILE), false, store.clone(), notifier.clone());
        checker.run_once().unwrap();

        assert_eq!(
            *notifier.events.borrow(),
            vec![
                Event::UsageExceeded { diff_bytes: 4_000 },
                Event::PeriodicPrompt { counter: 10 },
            ]
        );
        assert_eq!(store.0.borrow().state.notify_counter, 10);
    }
}
