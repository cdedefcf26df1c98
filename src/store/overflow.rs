use crate::note::PressedNote;

/// One position in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Entry {
    #[default]
    Empty,
    Occupied(PressedNote),
}

/// Fixed-capacity LIFO of notes that lost their voice.
///
/// The entries live in a flat array and are chained through `next` indices
/// starting at `head`. Occupied entries always form an unbroken run from the
/// head; an entry removed from the middle is unlinked and re-attached after
/// the tail, so no payload is ever moved. Lookups are linear in `C`, which is
/// small.
///
/// When every entry is occupied, [`insert`](Self::insert) drops the new note
/// instead of growing or evicting. Memory stays bounded at the cost of
/// forgetting that note.
#[derive(Debug, Clone)]
pub struct OverflowStore<const C: usize> {
    entries: [Entry; C],
    next: [Option<usize>; C],
    head: usize,
    tail: usize,
    len: usize,
}

impl<const C: usize> OverflowStore<C> {
    const NOT_EMPTY: () = assert!(C > 0, "overflow store capacity must be at least 1");

    pub fn new() -> Self {
        let () = Self::NOT_EMPTY;

        let mut next = [None; C];
        for (index, link) in next.iter_mut().enumerate() {
            *link = if index + 1 < C { Some(index + 1) } else { None };
        }

        Self {
            entries: [Entry::Empty; C],
            next,
            head: 0,
            tail: C - 1,
            len: 0,
        }
    }

    /// Store `pressed` after the most recent entry.
    ///
    /// Returns `false` (and stores nothing) when the store is full.
    pub fn insert(&mut self, pressed: PressedNote) -> bool {
        let mut cursor = Some(self.head);
        while let Some(index) = cursor {
            if self.entries[index] == Entry::Empty {
                self.entries[index] = Entry::Occupied(pressed);
                self.len += 1;
                return true;
            }
            cursor = self.next[index];
        }
        false
    }

    /// Forget the first queued entry for `note`, if there is one.
    pub fn remove_by_note(&mut self, note: u8) -> Option<PressedNote> {
        let mut prev = None;
        let mut cursor = Some(self.head);
        while let Some(index) = cursor {
            match self.entries[index] {
                Entry::Occupied(pressed) if pressed.note == note => {
                    self.entries[index] = Entry::Empty;
                    self.len -= 1;
                    self.relink_to_tail(prev, index);
                    return Some(pressed);
                }
                Entry::Occupied(_) => {
                    prev = Some(index);
                    cursor = self.next[index];
                }
                Entry::Empty => break,
            }
        }
        None
    }

    /// Remove and return the most recently inserted entry
    pub fn take_most_recent(&mut self) -> Option<PressedNote> {
        if self.entries[self.head] == Entry::Empty {
            return None;
        }

        let mut index = self.head;
        while let Some(after) = self.next[index] {
            if self.entries[after] == Entry::Empty {
                break;
            }
            index = after;
        }

        match std::mem::take(&mut self.entries[index]) {
            Entry::Occupied(pressed) => {
                self.len -= 1;
                Some(pressed)
            }
            Entry::Empty => None,
        }
    }

    /// Update the velocity of a queued note in place.
    ///
    /// Returns `false` when `note` is not queued.
    pub fn retrigger(&mut self, note: u8, velocity: u8) -> bool {
        let mut cursor = Some(self.head);
        while let Some(index) = cursor {
            match &mut self.entries[index] {
                Entry::Occupied(pressed) if pressed.note == note => {
                    pressed.velocity = velocity;
                    return true;
                }
                Entry::Occupied(_) => cursor = self.next[index],
                Entry::Empty => break,
            }
        }
        false
    }

    pub fn contains(&self, note: u8) -> bool {
        self.iter().any(|pressed| pressed.note == note)
    }

    /// Queued notes, oldest first
    pub fn iter(&self) -> Iter<'_, C> {
        Iter {
            store: self,
            cursor: Some(self.head),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == C
    }

    pub fn capacity(&self) -> usize {
        C
    }

    /// Drop every entry and restore the initial link order
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    // `index` has just been emptied; `prev` is the entry linking to it.
    fn relink_to_tail(&mut self, prev: Option<usize>, index: usize) {
        // Already last: emptying it in place keeps the occupied run intact.
        let Some(after) = self.next[index] else {
            return;
        };

        match prev {
            Some(prev) => self.next[prev] = Some(after),
            None => self.head = after,
        }
        self.next[self.tail] = Some(index);
        self.next[index] = None;
        self.tail = index;
    }
}

impl<const C: usize> Default for OverflowStore<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the occupied entries of an [`OverflowStore`]
pub struct Iter<'a, const C: usize> {
    store: &'a OverflowStore<C>,
    cursor: Option<usize>,
}

impl<const C: usize> Iterator for Iter<'_, C> {
    type Item = PressedNote;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        match self.store.entries[index] {
            Entry::Occupied(pressed) => {
                self.cursor = self.store.next[index];
                Some(pressed)
            }
            Entry::Empty => {
                self.cursor = None;
                None
            }
        }
    }
}
