//! Component identifiers backed by a process-wide string interner.
//!
//! Component instance names are repeated across connections, positions and
//! per-node metrics, so they are interned once and compared as symbols.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Interned identifier of a component instance.
///
/// # Examples
///
/// ```
/// use uavplex_core::identifier::Id;
///
/// let hub = Id::new("MainHub_1");
/// assert_eq!(hub, "MainHub_1");
/// assert_eq!(hub, Id::new("MainHub_1"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a component instance name.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Returns `true` if the identifier text contains `pattern`.
    ///
    /// Instance names carry their role (`MainHub`, `Flange_3`, `Sensor_2`), and
    /// the position calculator matches on those fragments.
    pub fn contains(self, pattern: &str) -> bool {
        interner()
            .resolve(self.0)
            .is_some_and(|name| name.contains(pattern))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = interner().resolve(self.0).map(str::to_owned);
        match name {
            Some(name) => f.write_str(&name),
            None => Err(fmt::Error),
        }
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
