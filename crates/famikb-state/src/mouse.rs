//! Lock-free mouse accumulator.

use core::sync::atomic::{AtomicBool, AtomicI32, AtomicU8, Ordering};

use famikb_types::{MouseButtons, MouseExtra, MousePositioning, MouseSnapshot, MouseUpdate};

/// Mouse state written by the decoder that owns mouse input and snapshotted
/// once per frame by the responder.
///
/// Buttons are held twice: as the current level and as a sticky OR of every
/// press since the last snapshot, so a click shorter than a frame is still
/// reported once. Relative deltas and extra bits are cleared by the
/// snapshot; an absolute position is left in place.
#[derive(Debug)]
pub struct MouseState {
    buttons: AtomicU8,
    sticky_buttons: AtomicU8,
    x: AtomicI32,
    y: AtomicI32,
    extra: AtomicU8,
    absolute: AtomicBool,
}

impl Default for MouseState {
    fn default() -> Self {
        Self::new()
    }
}

impl MouseState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buttons: AtomicU8::new(0),
            sticky_buttons: AtomicU8::new(0),
            x: AtomicI32::new(0),
            y: AtomicI32::new(0),
            extra: AtomicU8::new(0),
            absolute: AtomicBool::new(false),
        }
    }

    /// Merge one decoder update.
    ///
    /// # RT Safety
    ///
    /// RT-safe. A fixed number of atomic stores and fetch-ops.
    pub fn apply(&self, update: &MouseUpdate) {
        let buttons = update.buttons.bits();
        self.buttons.store(buttons, Ordering::Relaxed);
        self.sticky_buttons.fetch_or(buttons, Ordering::Relaxed);

        match update.positioning {
            MousePositioning::Relative => {
                self.absolute.store(false, Ordering::Relaxed);
                self.x.fetch_add(update.x, Ordering::Relaxed);
                self.y.fetch_add(update.y, Ordering::Relaxed);
            }
            MousePositioning::Absolute => {
                self.absolute.store(true, Ordering::Relaxed);
                self.x.store(update.x, Ordering::Relaxed);
                self.y.store(update.y, Ordering::Relaxed);
            }
        }

        self.extra.fetch_or(update.extra.bits(), Ordering::Relaxed);
    }

    /// Capture the state for one frame and clear what a frame consumes.
    ///
    /// # RT Safety
    ///
    /// RT-safe. Called by the responder on each latch edge.
    pub fn snapshot(&self) -> MouseSnapshot {
        let level = self.buttons.load(Ordering::Relaxed);
        let sticky = self.sticky_buttons.swap(0, Ordering::Relaxed);
        let absolute = self.absolute.load(Ordering::Relaxed);

        let (x, y, positioning) = if absolute {
            (
                self.x.load(Ordering::Relaxed),
                self.y.load(Ordering::Relaxed),
                MousePositioning::Absolute,
            )
        } else {
            (
                self.x.swap(0, Ordering::Relaxed),
                self.y.swap(0, Ordering::Relaxed),
                MousePositioning::Relative,
            )
        };

        MouseSnapshot {
            buttons: MouseButtons::from_bits_truncate(level | sticky),
            x,
            y,
            extra: MouseExtra::from_bits_truncate(self.extra.swap(0, Ordering::Relaxed)),
            positioning,
        }
    }

    /// Current button level, without consuming anything.
    #[must_use]
    pub fn buttons(&self) -> MouseButtons {
        MouseButtons::from_bits_truncate(self.buttons.load(Ordering::Relaxed))
    }

    /// Current accumulator values, without consuming anything.
    #[must_use]
    pub fn position(&self) -> (i32, i32) {
        (self.x.load(Ordering::Relaxed), self.y.load(Ordering::Relaxed))
    }
}
