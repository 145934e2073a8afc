use std::cell::UnsafeCell;
use std::fmt::{self, Debug};

use crate::guard::{ReadGuard, WriteGuard};
use crate::raw::RawRwLock;
use crate::raw::spin::SpinRwLock;

/// A value coupled to the lock that protects it.
///
/// The value has no name outside of the guards this container issues:
/// [`read`](Guarded::read) and [`try_read`](Guarded::try_read) grant shared
/// access, [`write`](Guarded::write) and [`try_write`](Guarded::try_write)
/// grant exclusive access, and dropping the guard releases the hold. There
/// is no other path to the value.
///
/// ```
/// use lib::guarded::Guarded;
///
/// let counter = Guarded::new(55u32);
/// assert_eq!(*counter.read(), 55);
///
/// *counter.write() = 66;
/// assert_eq!(*counter.read(), 66);
/// ```
///
/// Guards borrow the container, so it cannot be relocated while any guard
/// lives:
///
/// ```compile_fail
/// use lib::guarded::Guarded;
///
/// let cell = Guarded::new(1u32);
/// let held = cell.read();
/// let relocated = cell;
/// assert_eq!(*held, 1);
/// ```
///
/// The lock itself is any [`RawRwLock`] implementor, [`SpinRwLock`] unless
/// another is named.
pub struct Guarded<T, R: RawRwLock = SpinRwLock> {
    pub(crate) raw: R,
    pub(crate) value: UnsafeCell<T>,
}

// SAFETY: the container hands the value to other threads only through its
// guards, which uphold reader-writer exclusion. Shared access from several
// threads needs `T: Sync`; moving or mutating the value from another thread
// needs `T: Send`.
unsafe impl<T: Send, R: RawRwLock + Send> Send for Guarded<T, R> {}
unsafe impl<T: Send + Sync, R: RawRwLock + Sync> Sync for Guarded<T, R> {}

impl<T> Guarded<T> {
    /// Wraps `value` behind the default lock.
    pub fn new(value: T) -> Guarded<T> {
        Guarded::with_lock(value)
    }
}

impl<T, R: RawRwLock> Guarded<T, R> {
    /// Wraps `value` behind a fresh, unlocked instance of any raw lock; the
    /// lock type is named at the binding or turbofish level.
    pub fn with_lock(value: T) -> Guarded<T, R> {
        Guarded {
            raw: R::default(),
            value: UnsafeCell::new(value),
        }
    }

    /// Blocks until shared access is granted.
    ///
    /// Any number of shared guards may live at once; an extant exclusive
    /// guard blocks this call until it drops. Guards must not outlive the
    /// container, which rules out acquiring through a temporary:
    ///
    /// ```compile_fail
    /// use lib::guarded::Guarded;
    ///
    /// let held = Guarded::new(5u32).read();
    /// assert_eq!(*held, 5);
    /// ```
    pub fn read(&self) -> ReadGuard<'_, T, R> {
        self.raw.lock_shared();
        ReadGuard::adopt(self)
    }

    /// Blocks until exclusive access is granted.
    pub fn write(&self) -> WriteGuard<'_, T, R> {
        self.raw.lock_exclusive();
        WriteGuard::adopt(self)
    }

    /// Shared access if it can be granted right now, `None` under exclusive
    /// contention. Never blocks.
    pub fn try_read(&self) -> Option<ReadGuard<'_, T, R>> {
        if self.raw.try_lock_shared() {
            Some(ReadGuard::adopt(self))
        } else {
            None
        }
    }

    /// Exclusive access if no hold of any mode exists, `None` otherwise.
    /// Never blocks.
    pub fn try_write(&self) -> Option<WriteGuard<'_, T, R>> {
        if self.raw.try_lock_exclusive() {
            Some(WriteGuard::adopt(self))
        } else {
            None
        }
    }

    /// Direct access through an exclusive borrow of the container.
    ///
    /// The borrow proves no guard exists, so no locking happens.
    pub fn get_mut(&mut self) -> &mut T {
        self.value.get_mut()
    }

    /// Consumes the container and returns the value.
    pub fn into_inner(self) -> T {
        self.value.into_inner()
    }
}

impl<T: Default, R: RawRwLock> Default for Guarded<T, R> {
    fn default() -> Self {
        Self::with_lock(T::default())
    }
}

impl<T, R: RawRwLock> From<T> for Guarded<T, R> {
    fn from(value: T) -> Self {
        Self::with_lock(value)
    }
}

impl<T: Debug, R: RawRwLock> Debug for Guarded<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Renders through a non-blocking attempt so printing a contended
        // container cannot deadlock.
        match self.try_read() {
            Some(value) => f.debug_struct("Guarded").field("value", &&*value).finish(),
            None => f
                .debug_struct("Guarded")
                .field("value", &format_args!("<locked>"))
                .finish(),
        }
    }
}
