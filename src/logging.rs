//! Client log facility with registrable observers
//!
//! The SDK reports its activity (including outgoing request headers at
//! `Debug`) through a process-wide log. Consumers register observers to
//! inspect level-tagged messages; everything is also forwarded to `tracing`
//! so a normal subscriber picks it up.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, trace, warn};

/// Log level for client log messages, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Everything, including wire-level detail
    All,
    /// Fine-grained tracing
    Trace,
    /// Debugging detail such as outgoing request headers
    Debug,
    /// Normal operational messages
    Info,
    /// Recoverable problems
    Warn,
    /// Failures
    Error,
    /// Nothing
    Off,
}

/// Observer receiving level-tagged client log messages
pub trait LogObserver: Send + Sync {
    /// Minimum level this observer wants to receive
    fn level(&self) -> LogLevel {
        LogLevel::All
    }

    /// Receive a single log message
    fn log(&self, level: LogLevel, message: &str);
}

/// Handle returned from [`add_observer`], used to remove the observer again
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverHandle(u64);

struct Registration {
    id: u64,
    observer: Arc<dyn LogObserver>,
}

struct ClientLog {
    level: RwLock<LogLevel>,
    observers: RwLock<Vec<Registration>>,
    next_id: AtomicU64,
}

static CLIENT_LOG: Lazy<ClientLog> = Lazy::new(|| ClientLog {
    level: RwLock::new(LogLevel::Info),
    observers: RwLock::new(Vec::new()),
    next_id: AtomicU64::new(1),
});

/// Get the current global log level
pub fn level() -> LogLevel {
    *CLIENT_LOG.level.read()
}

/// Set the global log level
///
/// Messages below this level are dropped before observers see them.
pub fn set_level(level: LogLevel) {
    *CLIENT_LOG.level.write() = level;
}

/// Register an observer; returns a handle for [`remove_observer`]
pub fn add_observer(observer: Arc<dyn LogObserver>) -> ObserverHandle {
    let id = CLIENT_LOG.next_id.fetch_add(1, Ordering::Relaxed);
    CLIENT_LOG
        .observers
        .write()
        .push(Registration { id, observer });
    ObserverHandle(id)
}

/// Remove a previously registered observer
pub fn remove_observer(handle: ObserverHandle) {
    CLIENT_LOG
        .observers
        .write()
        .retain(|registration| registration.id != handle.0);
}

/// Emit a message to all observers and forward it to `tracing`
pub fn log(level: LogLevel, message: &str) {
    match level {
        LogLevel::All | LogLevel::Trace => trace!(target: "driftsync", "{}", message),
        LogLevel::Debug => debug!(target: "driftsync", "{}", message),
        LogLevel::Info => info!(target: "driftsync", "{}", message),
        LogLevel::Warn => warn!(target: "driftsync", "{}", message),
        LogLevel::Error => error!(target: "driftsync", "{}", message),
        LogLevel::Off => return,
    }

    if level < *CLIENT_LOG.level.read() {
        return;
    }

    // Dispatch outside the read lock so observers may register or remove
    // observers from inside log() without deadlocking.
    let observers: Vec<Arc<dyn LogObserver>> = CLIENT_LOG
        .observers
        .read()
        .iter()
        .map(|registration| registration.observer.clone())
        .collect();
    for observer in observers {
        if level >= observer.level() {
            observer.log(level, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    // The registry is process-wide; tests touching it must not interleave.
    static REGISTRY_GUARD: Mutex<()> = Mutex::new(());

    struct Recorder {
        threshold: LogLevel,
        messages: Mutex<Vec<(LogLevel, String)>>,
    }

    impl LogObserver for Recorder {
        fn level(&self) -> LogLevel {
            self.threshold
        }

        fn log(&self, level: LogLevel, message: &str) {
            self.messages.lock().push((level, message.to_string()));
        }
    }

    #[test]
    fn test_observer_receives_messages_at_or_above_threshold() {
        let _guard = REGISTRY_GUARD.lock();
        let original = level();
        set_level(LogLevel::All);

        let recorder = Arc::new(Recorder {
            threshold: LogLevel::Debug,
            messages: Mutex::new(Vec::new()),
        });
        let handle = add_observer(recorder.clone());

        log(LogLevel::Trace, "too fine");
        log(LogLevel::Debug, "-> X-MyApp-Version: 1.0.0");
        log(LogLevel::Error, "boom");

        remove_observer(handle);
        log(LogLevel::Error, "after removal");
        set_level(original);

        let messages = recorder.messages.lock();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].0, LogLevel::Debug);
        assert!(messages[0].1.contains("X-MyApp-Version"));
        assert_eq!(messages[1].1, "boom");
    }

    #[test]
    fn test_global_level_filters_before_observers() {
        let _guard = REGISTRY_GUARD.lock();
        let original = level();
        set_level(LogLevel::Error);

        let recorder = Arc::new(Recorder {
            threshold: LogLevel::All,
            messages: Mutex::new(Vec::new()),
        });
        let handle = add_observer(recorder.clone());

        log(LogLevel::Debug, "dropped");
        log(LogLevel::Error, "kept");

        remove_observer(handle);
        set_level(original);

        let messages = recorder.messages.lock();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].1, "kept");
    }

    struct SelfRemover {
        handle: Mutex<Option<ObserverHandle>>,
        calls: Mutex<u32>,
    }

    impl LogObserver for SelfRemover {
        fn log(&self, _level: LogLevel, _message: &str) {
            *self.calls.lock() += 1;
            if let Some(handle) = self.handle.lock().take() {
                remove_observer(handle);
            }
        }
    }

    #[test]
    fn test_observer_may_remove_itself_during_dispatch() {
        let _guard = REGISTRY_GUARD.lock();
        let original = level();
        set_level(LogLevel::All);

        let remover = Arc::new(SelfRemover {
            handle: Mutex::new(None),
            calls: Mutex::new(0),
        });
        let handle = add_observer(remover.clone());
        *remover.handle.lock() = Some(handle);

        // Must not deadlock on the registry lock.
        log(LogLevel::Info, "first");
        log(LogLevel::Info, "second");

        set_level(original);
        assert_eq!(*remover.calls.lock(), 1);
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::All < LogLevel::Trace);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Error < LogLevel::Off);
    }
}
