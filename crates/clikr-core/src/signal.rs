//! Stop signal shared between the manager and a worker run.
//!
//! The signal is a latch: raising it drops the only sender, so every later
//! check on the receiving side sees a disconnected channel.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

/// Create a connected trigger/signal pair.
pub fn stop_signal() -> (StopTrigger, StopSignal) {
    let (tx, rx) = bounded::<()>(0);
    (StopTrigger { tx: Some(tx) }, StopSignal { rx })
}

/// Control side, held by whoever may cancel the run.
#[derive(Debug)]
pub struct StopTrigger {
    tx: Option<Sender<()>>,
}

impl StopTrigger {
    /// Raise the signal. Idempotent.
    pub fn stop(&mut self) {
        self.tx.take();
    }

    pub fn is_stopped(&self) -> bool {
        self.tx.is_none()
    }
}

/// Worker side.
#[derive(Debug, Clone)]
pub struct StopSignal {
    rx: Receiver<()>,
}

impl StopSignal {
    /// Non-blocking check.
    pub fn is_requested(&self) -> bool {
        matches!(self.rx.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Sleep for `timeout` unless the signal is raised first.
    /// Returns `true` if woken by a stop request.
    pub fn wait(&self, timeout: Duration) -> bool {
        if timeout.is_zero() {
            return self.is_requested();
        }
        match self.rx.recv_timeout(timeout) {
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => true,
            // Nothing is ever sent; treat a message like a stop.
            Ok(()) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_signal_latches() {
        let (mut trigger, signal) = stop_signal();
        assert!(!signal.is_requested());
        assert!(!trigger.is_stopped());

        trigger.stop();
        trigger.stop();
        assert!(trigger.is_stopped());
        assert!(signal.is_requested());
        assert!(signal.is_requested());
        assert!(signal.wait(Duration::from_secs(5)));
    }

    #[test]
    fn test_wait_times_out_without_stop() {
        let (_trigger, signal) = stop_signal();
        let start = Instant::now();
        assert!(!signal.wait(Duration::from_millis(30)));
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_wait_wakes_early_on_stop() {
        let (mut trigger, signal) = stop_signal();
        let start = Instant::now();
        let waiter = thread::spawn(move || signal.wait(Duration::from_secs(10)));
        thread::sleep(Duration::from_millis(20));
        trigger.stop();

        assert!(waiter.join().unwrap());
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_dropped_trigger_counts_as_stop() {
        let (trigger, signal) = stop_signal();
        drop(trigger);
        assert!(signal.is_requested());
    }
}
