//! Newtype id wrappers for the different index spaces the minimizer works
//! over (states, transitions, partition sets). Keeping them distinct types
//! prevents accidentally indexing a block array with a transition id or
//! vice versa.

macro_rules! impl_id {
    ($name:ident, $tp:ty) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub(crate) struct $name($tp);

        impl $name {
            #[inline]
            pub(crate) const fn new(index: $tp) -> Self {
                $name(index)
            }

            #[inline]
            pub(crate) fn as_usize(self) -> usize {
                self.0 as usize
            }

            #[inline]
            #[allow(dead_code)]
            pub(crate) fn id(self) -> $tp {
                self.0
            }
        }

        impl<T> std::ops::Index<$name> for [T] {
            type Output = T;

            #[inline]
            fn index(&self, index: $name) -> &Self::Output {
                &self[index.0 as usize]
            }
        }

        impl<T> std::ops::IndexMut<$name> for [T] {
            #[inline]
            fn index_mut(&mut self, index: $name) -> &mut T {
                &mut self[index.0 as usize]
            }
        }

        impl<T> std::ops::Index<$name> for Vec<T> {
            type Output = T;

            #[inline]
            fn index(&self, index: $name) -> &Self::Output {
                &self[index.0 as usize]
            }
        }

        impl<T> std::ops::IndexMut<$name> for Vec<T> {
            #[inline]
            fn index_mut(&mut self, index: $name) -> &mut T {
                &mut self[index.0 as usize]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$tp> for $name {
            #[inline]
            fn from(index: $tp) -> Self {
                $name::new(index)
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(index: usize) -> Self {
                $name::new(index as $tp)
            }
        }
    };
}

/// The id of an element in a refinable partition's universe. Used both for
/// states (blocks partition) and for transitions (cords partition) since the
/// partition itself is universe-agnostic.
pub(crate) type ElementIdBase = u32;
impl_id!(ElementId, ElementIdBase);

/// The id of a set within a refinable partition (a block id or a cord id
/// depending on which partition instance produced it).
pub(crate) type SetIdBase = u32;
impl_id!(SetId, SetIdBase);

/// The id of a state in the automaton, i.e. an index into `blocks`' universe.
pub(crate) type StateIdBase = u32;
impl_id!(StateId, StateIdBase);

/// The id of a transition in the automaton, i.e. an index into `cords`'
/// universe, and an index into the parallel `tail`/`label`/`head` arrays.
pub(crate) type TransIdBase = u32;
impl_id!(TransId, TransIdBase);

impl From<StateId> for ElementId {
    #[inline]
    fn from(id: StateId) -> Self {
        ElementId::new(id.id())
    }
}

impl From<ElementId> for StateId {
    #[inline]
    fn from(id: ElementId) -> Self {
        StateId::new(id.id())
    }
}

impl From<TransId> for ElementId {
    #[inline]
    fn from(id: TransId) -> Self {
        ElementId::new(id.id())
    }
}

impl From<ElementId> for TransId {
    #[inline]
    fn from(id: ElementId) -> Self {
        TransId::new(id.id())
    }
}
