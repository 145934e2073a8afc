pub mod spin;

/// Lock capability consumed by [`Guarded`](crate::guarded::Guarded).
///
/// The six operations are the whole contract: a shared mode that any number
/// of holders may occupy at once, an exclusive mode that excludes everything
/// else, and a non-blocking attempt for each. Construction goes through
/// `Default`, which must yield an unlocked lock.
///
/// # Safety
///
/// Implementations must provide genuine reader-writer exclusion: while an
/// exclusive hold exists no other hold of either mode may be granted, and
/// `try_*` must only return `true` when the corresponding hold was actually
/// taken. A hold may be released from a different thread than the one that
/// acquired it; locks that cannot support that must not implement this
/// trait.
pub unsafe trait RawRwLock: Default {
    /// Blocks until a shared hold is taken.
    fn lock_shared(&self);

    /// Takes a shared hold if no exclusive hold exists, without blocking.
    fn try_lock_shared(&self) -> bool;

    /// Releases one shared hold.
    ///
    /// # Safety
    ///
    /// The calling context must own a shared hold on this lock.
    unsafe fn unlock_shared(&self);

    /// Blocks until the exclusive hold is taken.
    fn lock_exclusive(&self);

    /// Takes the exclusive hold if no hold of any mode exists, without
    /// blocking.
    fn try_lock_exclusive(&self) -> bool;

    /// Releases the exclusive hold.
    ///
    /// # Safety
    ///
    /// The calling context must own the exclusive hold on this lock.
    unsafe fn unlock_exclusive(&self);
}
