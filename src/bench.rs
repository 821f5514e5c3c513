//! Shared drawing handle
//!
//! [`Bench`] is the only way app code touches the window. It is cloned into
//! the worker thread and kept by the UI thread; both sides go through the same
//! mutex, so a mouse click and an app draw call never interleave inside the
//! mirror. Every mutation asks the [`RedrawNotifier`] for a repaint once the
//! lock has been released.

use crate::canvas::{Pen, PixelMirror};
use crate::error::{BenchError, BenchResult};
use crate::gate::StartGate;
use log::debug;
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Wakes whoever paints the window
pub trait RedrawNotifier: Send + Sync {
    fn request_redraw(&self);
}

/// Notifier for benches nobody looks at
#[derive(Debug, Default)]
pub struct NoopNotifier;

impl RedrawNotifier for NoopNotifier {
    fn request_redraw(&self) {}
}

/// Counts repaint requests
#[derive(Debug, Default)]
pub struct CountingNotifier {
    requests: AtomicU64,
}

impl CountingNotifier {
    pub fn count(&self) -> u64 {
        self.requests.load(Ordering::SeqCst)
    }
}

impl RedrawNotifier for CountingNotifier {
    fn request_redraw(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

impl<T: RedrawNotifier + ?Sized> RedrawNotifier for Arc<T> {
    fn request_redraw(&self) {
        (**self).request_redraw()
    }
}

struct Shared {
    width: u32,
    height: u32,
    /// The drawing mutex
    mirror: Mutex<PixelMirror>,
    pen: Mutex<Pen>,
    gate: StartGate,
    closed: Mutex<bool>,
    closed_cond: Condvar,
    exposed: AtomicBool,
    notifier: Box<dyn RedrawNotifier>,
}

/// Cloneable handle to the bench window's drawing state
#[derive(Clone)]
pub struct Bench {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for Bench {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bench")
            .field("width", &self.shared.width)
            .field("height", &self.shared.height)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl Bench {
    pub fn new(width: u32, height: u32, notifier: impl RedrawNotifier + 'static) -> Self {
        Self {
            shared: Arc::new(Shared {
                width,
                height,
                mirror: Mutex::new(PixelMirror::new(width, height)),
                pen: Mutex::new(Pen::Draw),
                gate: StartGate::new(),
                closed: Mutex::new(false),
                closed_cond: Condvar::new(),
                exposed: AtomicBool::new(false),
                notifier: Box::new(notifier),
            }),
        }
    }

    /// Bench with no window behind it
    pub fn headless(width: u32, height: u32) -> Self {
        Self::new(width, height, NoopNotifier)
    }

    // ---- app-facing drawing API ----

    /// Logical window dimensions `(width, height)`
    #[inline]
    pub fn get_dim(&self) -> (u32, u32) {
        (self.shared.width, self.shared.height)
    }

    /// Blank the whole window
    pub fn clear_window(&self) -> BenchResult<()> {
        self.lock_open()?.clear();
        self.shared.notifier.request_redraw();
        Ok(())
    }

    /// Set one logical pixel with `pen`
    pub fn draw_point(&self, x: i32, y: i32, pen: Pen) -> BenchResult<()> {
        self.lock_open()?.set(x, y, pen)?;
        self.shared.notifier.request_redraw();
        Ok(())
    }

    /// Read one logical pixel back from the mirror
    pub fn get_pixel(&self, x: i32, y: i32) -> BenchResult<Pen> {
        self.shared.mirror.lock().get(x, y)
    }

    // ---- UI-facing state ----

    /// Pen applied to mouse clicks
    pub fn pen(&self) -> Pen {
        *self.shared.pen.lock()
    }

    pub fn set_pen(&self, pen: Pen) {
        *self.shared.pen.lock() = pen;
    }

    /// Flip the user's pen and return the new one
    pub fn toggle_pen(&self) -> Pen {
        let mut pen = self.shared.pen.lock();
        *pen = pen.toggle();
        *pen
    }

    pub fn gate(&self) -> &StartGate {
        &self.shared.gate
    }

    /// Handle a window-system expose.
    ///
    /// Returns `true` for the first expose, which is the one that releases the
    /// app worker.
    pub fn expose(&self, clear_mirror: bool) -> bool {
        if clear_mirror {
            self.shared.mirror.lock().clear();
        }
        let first = !self.shared.exposed.swap(true, Ordering::SeqCst);
        if first {
            debug!("first expose, opening start gate");
            self.shared.gate.open();
        }
        first
    }

    /// Run `f` against the mirror while holding the drawing mutex
    pub fn with_mirror<R>(&self, f: impl FnOnce(&PixelMirror) -> R) -> R {
        let mirror = self.shared.mirror.lock();
        f(&*mirror)
    }

    /// Mark the window as gone.
    ///
    /// Further drawing calls fail with [`BenchError::Closed`], a worker still
    /// waiting on the start gate is released and a running linger returns.
    pub fn close(&self) {
        // Flipped under the drawing mutex: a draw either finished before this
        // or sees the flag
        let mirror = self.shared.mirror.lock();
        let mut closed = self.shared.closed.lock();
        if !*closed {
            *closed = true;
            self.shared.closed_cond.notify_all();
        }
        drop(closed);
        drop(mirror);
        self.shared.gate.open();
    }

    pub fn is_closed(&self) -> bool {
        *self.shared.closed.lock()
    }

    /// Sleep for up to `duration`, returning early (with `true`) on close
    pub fn linger(&self, duration: Duration) -> bool {
        let mut closed = self.shared.closed.lock();
        if !*closed {
            self.shared
                .closed_cond
                .wait_while_for(&mut closed, |closed| !*closed, duration);
        }
        *closed
    }

    /// Take the drawing mutex, failing if the bench has been closed
    fn lock_open(&self) -> BenchResult<MutexGuard<'_, PixelMirror>> {
        let mirror = self.shared.mirror.lock();
        if self.is_closed() {
            return Err(BenchError::Closed);
        }
        Ok(mirror)
    }
}
