//! Hash states behind the `xb` lookup tables.
//!
//! - [`FixedHashState`] keys the string-indexed tables: bean names in the
//!   bean registry and extension ids while sorting by loading order.
//! - [`NoOpHashState`] keys [`TypeIdMap`](crate::TypeIdMap), which only ever
//!   hashes a `TypeId`.

use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHashState

const SEED: FixedState = FixedState::with_seed(0x3C6E_F372_FE94_F82B);

/// The `foldhash` hasher built by [`FixedHashState`].
pub type FixedHasher = FoldHasher<'static>;

/// A `foldhash` state with a compile-time seed.
///
/// Lookups by bean name do not face untrusted keys, so the seed is fixed and
/// the same name hashes identically in every registry.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use xb_utils::hash::FixedHashState;
///
/// assert_eq!(
///     FixedHashState.hash_one("Endpoint"),
///     FixedHashState.hash_one("Endpoint"),
/// );
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        SEED.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// NoOpHashState

/// Returns the last `u64` written as the hash.
///
/// A `TypeId` is already a well distributed hash of the type, so the binding
/// and bean registries use it as is. Byte input is folded in so other keys
/// still work.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(u64::from(byte));
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Builds a [`NoOpHasher`].
///
/// # Examples
///
/// ```
/// use core::hash::{BuildHasher, Hash, Hasher};
/// use xb_utils::hash::NoOpHashState;
///
/// let mut hasher = NoOpHashState.build_hasher();
/// 42_u64.hash(&mut hasher);
/// assert_eq!(hasher.finish(), 42);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher::default()
    }
}

// -----------------------------------------------------------------------------
// Tests
