//! A value container coupled to the reader-writer lock that protects it.
//!
//! The protected value has no name outside of the guards the container
//! issues, so it cannot be observed or mutated without holding the matching
//! lock mode:
//!
//! ```
//! use lib::guarded::Guarded;
//!
//! let settings = Guarded::new(vec![1u8, 2, 3]);
//!
//! settings.write().push(4);
//! assert_eq!(settings.read().len(), 4);
//! ```
//!
//! The container is not duplicable; two containers sharing one value with
//! independent locks would be unsound:
//!
//! ```compile_fail
//! use lib::guarded::Guarded;
//!
//! let cell = Guarded::new(1u32);
//! let copy = cell.clone();
//! ```

pub mod guard;
pub mod guarded;
pub mod raw;
mod sync;

#[cfg(any(test, feature = "testing"))]
#[doc(hidden)]
pub mod tests;
