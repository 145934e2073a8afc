use crate::raw::RawRwLock;
use crate::sync::{AtomicUsize, Contender, Ordering};

// Bit 0 flags the exclusive holder, the remaining bits count shared holders.
const WRITER: usize = 1;
const READER: usize = 2;

/// Default reader-writer lock: all state packed in one word, acquired by
/// compare-and-swap with back-off snoozing on the contended path.
///
/// No fairness promise is made; a stream of overlapping shared holders can
/// starve a blocked exclusive attempt indefinitely.
pub struct SpinRwLock {
    state: AtomicUsize,
}

impl Default for SpinRwLock {
    fn default() -> Self {
        Self {
            state: AtomicUsize::new(0),
        }
    }
}

unsafe impl RawRwLock for SpinRwLock {
    fn lock_shared(&self) {
        let backoff = Contender::new();
        while !self.try_lock_shared() {
            backoff.snooze();
        }
    }

    fn try_lock_shared(&self) -> bool {
        // Retries only on CAS races between readers; an exclusive hold fails
        // the attempt outright.
        let mut state = self.state.load(Ordering::Relaxed);
        loop {
            if state & WRITER != 0 {
                return false;
            }

            match self.state.compare_exchange(
                state,
                state + READER,
                Ordering::Acquire,
                Ordering::Relaxed,
            ) {
                Ok(_) => return true,
                Err(err_state) => state = err_state,
            }
        }
    }

    unsafe fn unlock_shared(&self) {
        let prev = self.state.fetch_sub(READER, Ordering::Release);
        debug_assert!(prev >= READER, "shared release without a shared hold");
    }

    fn lock_exclusive(&self) {
        let backoff = Contender::new();
        while !self.try_lock_exclusive() {
            backoff.snooze();
        }
    }

    fn try_lock_exclusive(&self) -> bool {
        self.state
            .compare_exchange(0, WRITER, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    unsafe fn unlock_exclusive(&self) {
        let prev = self.state.swap(0, Ordering::Release);
        debug_assert_eq!(prev, WRITER, "exclusive release without the exclusive hold");
    }
}
