// One position in a fixed size table.

/// Table slots are either used or not. On disk an empty slot is one whose name
/// starts with a null byte, but in memory we never guess from the name.
#[derive(Debug, PartialEq, Eq, Clone)]
pub(crate) enum Slot<T> {
    Empty,
    Occupied(T),
}

impl<T> Slot<T> {
    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub(crate) fn occupant(&self) -> Option<&T> {
        match self {
            Slot::Empty => None,
            Slot::Occupied(item) => Some(item),
        }
    }

    pub(crate) fn occupant_mut(&mut self) -> Option<&mut T> {
        match self {
            Slot::Empty => None,
            Slot::Occupied(item) => Some(item),
        }
    }
}

/// Walk the used slots of a table, in slot order.
pub(crate) fn occupied<T>(slots: &[Slot<T>]) -> impl Iterator<Item = (usize, &T)> {
    slots
        .iter()
        .enumerate()
        .filter_map(|(index, slot)| slot.occupant().map(|item| (index, item)))
}

/// Lowest free slot, if there is one.
pub(crate) fn first_empty<T>(slots: &[Slot<T>]) -> Option<usize> {
    slots.iter().position(Slot::is_empty)
}
