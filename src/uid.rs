// Copyright (c) 2024 Mike Tsao. All rights reserved.

use serde::{Deserialize, Serialize};
use std::{hash::Hash, marker::PhantomData, sync::atomic::AtomicUsize};

/// A trait that helps identifier newtypes work with [UidFactory].
pub trait IsUid: Eq + Hash + Clone + Copy + From<usize> {
    /// The raw value of this identifier.
    fn as_usize(&self) -> usize;
}

/// Generates unique identifiers of the given type. The counter is atomic, so
/// a factory can be shared without additional locking.
#[derive(Debug, Serialize, Deserialize)]
pub struct UidFactory<U: IsUid> {
    next_uid_value: AtomicUsize,
    _phantom: PhantomData<U>,
}
impl<U: IsUid> UidFactory<U> {
    /// Creates a new [UidFactory] that starts minting at the given value.
    pub fn new(first_uid: usize) -> Self {
        Self {
            next_uid_value: AtomicUsize::new(first_uid),
            _phantom: Default::default(),
        }
    }

    /// Generates the next unique identifier.
    pub fn mint_next(&self) -> U {
        let uid_value = self
            .next_uid_value
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        U::from(uid_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    struct TestUid(usize);
    impl From<usize> for TestUid {
        fn from(value: usize) -> Self {
            Self(value)
        }
    }
    impl IsUid for TestUid {
        fn as_usize(&self) -> usize {
            self.0
        }
    }

    #[test]
    fn factory_mints_in_order() {
        let factory = UidFactory::<TestUid>::new(1024);
        assert_eq!(factory.mint_next(), TestUid(1024));
        assert_eq!(factory.mint_next(), TestUid(1025));
        assert_ne!(factory.mint_next(), factory.mint_next());
    }
}
