// the value half of a slot: a present key maps to Null or to a real value
//
// The outer Option of `EntryStore::get` says whether the key exists at all;
// Nullable says whether the existing key carries a real value. The two levels
// are never collapsed into each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nullable<V> {
    Null,
    Value(V),
}

impl<V> Nullable<V> {
    /// the empty marker as a process-wide sentinel
    pub const NULL: Self = Nullable::Null;

    pub fn is_null(&self) -> bool {
        match self {
            Nullable::Null => true,
            Nullable::Value(_) => false,
        }
    }

    pub fn is_value(&self) -> bool {
        !self.is_null()
    }

    /// Get the reference of the inner value.
    ///
    /// Panic if the slot is the marker. This is the caller-error path of
    /// `compute`: a remapping function which cannot accept the marker fails
    /// here, and the failure surfaces to the caller unchanged.
    pub fn value(&self) -> &V {
        match self {
            Nullable::Value(value) => value,
            Nullable::Null => panic!("called `Nullable::value()` on a Null slot"),
        }
    }

    pub fn as_ref(&self) -> Option<&V> {
        match self {
            Nullable::Value(value) => Some(value),
            Nullable::Null => None,
        }
    }

    pub fn as_mut(&mut self) -> Option<&mut V> {
        match self {
            Nullable::Value(value) => Some(value),
            Nullable::Null => None,
        }
    }

    pub fn into_option(self) -> Option<V> {
        match self {
            Nullable::Value(value) => Some(value),
            Nullable::Null => None,
        }
    }

    pub fn map<U, F: FnOnce(V) -> U>(self, f: F) -> Nullable<U> {
        match self {
            Nullable::Value(value) => Nullable::Value(f(value)),
            Nullable::Null => Nullable::Null,
        }
    }
}

impl<V> Default for Nullable<V> {
    fn default() -> Self {
        Nullable::Null
    }
}

impl<V> From<Option<V>> for Nullable<V> {
    fn from(value: Option<V>) -> Self {
        match value {
            Some(value) => Nullable::Value(value),
            None => Nullable::Null,
        }
    }
}

impl<V> From<Nullable<V>> for Option<V> {
    fn from(value: Nullable<V>) -> Self {
        value.into_option()
    }
}
