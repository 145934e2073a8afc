use std::fmt::{self, Debug, Display};
use std::ops::{Deref, DerefMut};

use crate::guarded::Guarded;
use crate::raw::RawRwLock;

/// Shared access handle issued by [`Guarded::read`](Guarded::read) and
/// [`Guarded::try_read`](Guarded::try_read).
///
/// Dereferences to the protected value for as long as it lives and releases
/// its shared hold when dropped. The guard is move-only; taking another
/// shared hold is spelled `read()` again on the container.
pub struct ReadGuard<'a, T, R: RawRwLock> {
    owner: &'a Guarded<T, R>,
}

impl<'a, T, R: RawRwLock> ReadGuard<'a, T, R> {
    // The shared mode must already be held; the guard adopts it and becomes
    // responsible for the single matching release.
    pub(crate) fn adopt(owner: &'a Guarded<T, R>) -> Self {
        Self { owner }
    }
}

impl<T, R: RawRwLock> Deref for ReadGuard<'_, T, R> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: this guard's shared hold keeps every exclusive path out,
        // so no `&mut T` can exist while the reference handed out here does.
        unsafe { &*self.owner.value.get() }
    }
}

impl<T, R: RawRwLock> Drop for ReadGuard<'_, T, R> {
    fn drop(&mut self) {
        // SAFETY: constructed only around a held shared mode, and a moved
        // guard drops exactly once at its final resting place.
        unsafe { self.owner.raw.unlock_shared() }
    }
}

impl<T: Debug, R: RawRwLock> Debug for ReadGuard<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&**self, f)
    }
}

impl<T: Display, R: RawRwLock> Display for ReadGuard<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&**self, f)
    }
}

/// Exclusive access handle issued by [`Guarded::write`](Guarded::write) and
/// [`Guarded::try_write`](Guarded::try_write).
///
/// While it lives it is the only extant guard on its container; both reads
/// and writes of the protected value go through it. Dropped, it releases the
/// exclusive hold. The guard cannot be duplicated:
///
/// ```compile_fail
/// use lib::guarded::Guarded;
///
/// let cell = Guarded::new(0u32);
/// let writer = cell.write();
/// let second = Clone::clone(&writer);
/// ```
pub struct WriteGuard<'a, T, R: RawRwLock> {
    owner: &'a Guarded<T, R>,
}

impl<'a, T, R: RawRwLock> WriteGuard<'a, T, R> {
    // Same adoption contract as `ReadGuard::adopt`, for the exclusive mode.
    pub(crate) fn adopt(owner: &'a Guarded<T, R>) -> Self {
        Self { owner }
    }
}

impl<T, R: RawRwLock> Deref for WriteGuard<'_, T, R> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: the exclusive hold admits no other guard, shared or
        // exclusive, for this guard's whole lifetime.
        unsafe { &*self.owner.value.get() }
    }
}

impl<T, R: RawRwLock> DerefMut for WriteGuard<'_, T, R> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: as above, and `&mut self` forbids aliasing through the
        // guard's own `Deref`.
        unsafe { &mut *self.owner.value.get() }
    }
}

impl<T, R: RawRwLock> Drop for WriteGuard<'_, T, R> {
    fn drop(&mut self) {
        // SAFETY: constructed only around the held exclusive mode, dropped
        // exactly once.
        unsafe { self.owner.raw.unlock_exclusive() }
    }
}

impl<T: Debug, R: RawRwLock> Debug for WriteGuard<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&**self, f)
    }
}

impl<T: Display, R: RawRwLock> Display for WriteGuard<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&**self, f)
    }
}
