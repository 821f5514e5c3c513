//! One-shot startup gate
//!
//! The UI thread holds the gate closed until the window has been exposed for
//! the first time. The app worker waits on it before making any drawing call.

use parking_lot::{Condvar, Mutex};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct StartGate {
    open: Mutex<bool>,
    cond: Condvar,
}

impl StartGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the gate and wake all waiters.
    ///
    /// Returns `true` only for the call that opened it.
    pub fn open(&self) -> bool {
        let mut open = self.open.lock();
        if *open {
            return false;
        }
        *open = true;
        self.cond.notify_all();
        true
    }

    pub fn is_open(&self) -> bool {
        *self.open.lock()
    }

    /// Block until the gate opens
    pub fn wait(&self) {
        let mut open = self.open.lock();
        while !*open {
            self.cond.wait(&mut open);
        }
    }

    /// Block until the gate opens or `timeout` passes. Returns whether it is open.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let mut open = self.open.lock();
        if !*open {
            self.cond.wait_while_for(&mut open, |open| !*open, timeout);
        }
        *open
    }
}
