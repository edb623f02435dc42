use crate::err::{ListError, Result};
use crate::list::{List, Stamp};
use std::fmt;
use std::marker::PhantomData;

/// A bidirectional cursor over a [`List`], able to edit the list as it walks.
///
/// A `Cursor` always sits in a *gap*: before the first element, between two
/// adjacent elements, or after the last one. In a list with length *n* there
/// are *n* + 1 gaps, indexed by 0, 1, ..., *n*; the index of a gap is the
/// number of elements before it.
///
/// The cursor does not borrow its list. Every operation is handed the list
/// the cursor was created from, and is checked against it first: if the list
/// has been modified by anybody but this cursor since the cursor last touched
/// it (or if it is another list altogether), the operation fails with
/// [`ListError::ConcurrentModification`] and does nothing.
///
/// # Examples
///
/// Here is a simple example showing how the gaps work. (The cursor is denoted
/// by `|`.)
/// ```
/// use cursor_list::List;
/// use std::iter::FromIterator;
///
/// // Create a list: [A B C]
/// let mut list = List::from_iter(['A', 'B', 'C']);
///
/// // Create a cursor at start: [|A B C] (index = 0)
/// let mut cursor = list.cursor();
/// assert_eq!(cursor.has_previous(&list), Ok(false));
///
/// // Step over `A`: [A|B C] (index = 1)
/// assert_eq!(cursor.next(&list), Ok(&'A'));
/// assert_eq!(cursor.next_index(), 1);
///
/// // Insert before the gap: [A X|B C] (index = 2)
/// cursor.add(&mut list, 'X').unwrap();
/// assert_eq!(cursor.next_index(), 2);
///
/// // Step back over `X` and replace it: [A|Y B C] (index = 1)
/// assert_eq!(cursor.previous(&list), Ok(&'X'));
/// assert_eq!(cursor.set(&mut list, 'Y'), Ok('X'));
///
/// assert_eq!(list.to_string_repr(), "[A, Y, B, C]");
/// ```
pub struct Cursor<T> {
    /// Key of the node right after the gap, `None` past the tail.
    next: Option<usize>,
    /// Number of elements before the gap.
    index: usize,
    /// Node returned by the latest `next`/`previous`, target of `remove`/`set`.
    last_returned: Option<usize>,
    expected: Stamp,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Cursor<T> {
    pub(crate) fn new(next: Option<usize>, index: usize, expected: Stamp) -> Self {
        Self {
            next,
            index,
            last_returned: None,
            expected,
            _marker: PhantomData,
        }
    }

    /// Fail unless `list` is the list this cursor last saw, unchanged.
    fn check(&self, list: &List<T>) -> Result<()> {
        let actual = list.stamp();
        if actual == self.expected {
            return Ok(());
        }
        tracing::debug!(
            expected = self.expected.mod_count,
            actual = actual.mod_count,
            same_list = self.expected.list == actual.list,
            "rejecting stale cursor"
        );
        Err(ListError::ConcurrentModification {
            expected: self.expected.mod_count,
            actual: actual.mod_count,
        })
    }

    /// Key of the node right before the gap.
    fn prev_node(&self, list: &List<T>) -> Option<usize> {
        match self.next {
            Some(next) => list.node(next).prev(),
            None => list.tail_key(),
        }
    }

    /// Insert `element` before the gap and step over it, without checking the
    /// stamp. Used by the list itself on cursors it just created.
    pub(crate) fn insert(&mut self, list: &mut List<T>, element: T) {
        let prev = self.prev_node(list);
        list.attach_node(prev, self.next, element);
        self.last_returned = None;
        self.index += 1;
        self.expected = list.stamp();
        tracing::trace!(index = self.index, "cursor inserted element");
    }
}

impl<T> Cursor<T> {
    /// Returns `true` if there is an element after the gap.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.cursor().has_next(&list), Ok(false));
    ///
    /// list.add(1);
    /// assert_eq!(list.cursor().has_next(&list), Ok(true));
    /// ```
    pub fn has_next(&self, list: &List<T>) -> Result<bool> {
        self.check(list)?;
        Ok(self.next.is_some())
    }

    /// Returns `true` if there is an element before the gap.
    pub fn has_previous(&self, list: &List<T>) -> Result<bool> {
        self.check(list)?;
        Ok(self.next != list.head_key())
    }

    /// Return the element after the gap and move the gap past it.
    ///
    /// Fails with [`ListError::EmptyCollection`] if the cursor is after the
    /// last element.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{List, ListError};
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2]);
    /// let mut cursor = list.cursor();
    /// assert_eq!(cursor.next(&list), Ok(&1));
    /// assert_eq!(cursor.next(&list), Ok(&2));
    /// assert_eq!(cursor.next(&list), Err(ListError::EmptyCollection));
    /// assert_eq!(cursor.next_index(), 2);
    /// ```
    pub fn next<'a>(&mut self, list: &'a List<T>) -> Result<&'a T> {
        self.check(list)?;
        let key = self.next.ok_or(ListError::EmptyCollection)?;
        let node = list.node(key);
        self.last_returned = Some(key);
        self.next = node.next();
        self.index += 1;
        Ok(node.element())
    }

    /// Return the element before the gap and move the gap before it.
    ///
    /// Fails with [`ListError::EmptyCollection`] if the cursor is before the
    /// first element.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{List, ListError};
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2]);
    /// let mut cursor = list.cursor_at(2).unwrap();
    /// assert_eq!(cursor.previous(&list), Ok(&2));
    /// assert_eq!(cursor.previous(&list), Ok(&1));
    /// assert_eq!(cursor.previous(&list), Err(ListError::EmptyCollection));
    /// assert_eq!(cursor.next_index(), 0);
    /// ```
    pub fn previous<'a>(&mut self, list: &'a List<T>) -> Result<&'a T> {
        self.check(list)?;
        let key = self.prev_node(list).ok_or(ListError::EmptyCollection)?;
        self.last_returned = Some(key);
        self.next = Some(key);
        self.index -= 1;
        Ok(list.node(key).element())
    }

    /// Remove the element returned by the latest [`next`](Cursor::next) or
    /// [`previous`](Cursor::previous), and return it.
    ///
    /// The gap keeps its neighbours on the other side: after `next` the index
    /// drops by one, since the removed element was before the gap; after
    /// `previous` the index stays and the gap now faces the removed element's
    /// successor.
    ///
    /// Fails with [`ListError::InvalidCursorState`] if there was no such
    /// move, or if the element was already removed, or if an `add` came in
    /// between.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{List, ListError};
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(0..5);
    /// let mut cursor = list.cursor_at(2).unwrap();
    /// assert_eq!(cursor.remove(&mut list), Err(ListError::InvalidCursorState));
    ///
    /// assert_eq!(cursor.next(&list), Ok(&2));
    /// assert_eq!(cursor.remove(&mut list), Ok(2)); // [0, 1|3, 4]
    /// assert_eq!(cursor.next_index(), 2);
    /// assert_eq!(cursor.remove(&mut list), Err(ListError::InvalidCursorState));
    ///
    /// assert_eq!(cursor.previous(&list), Ok(&1));
    /// assert_eq!(cursor.remove(&mut list), Ok(1)); // [0|3, 4]
    /// assert_eq!(cursor.next_index(), 1);
    /// assert_eq!(cursor.next(&list), Ok(&3));
    ///
    /// assert_eq!(Vec::from_iter(list), vec![0, 3, 4]);
    /// ```
    pub fn remove(&mut self, list: &mut List<T>) -> Result<T> {
        self.check(list)?;
        let key = self.last_returned.take().ok_or(ListError::InvalidCursorState)?;
        if self.next == Some(key) {
            // the latest move was `previous`, the gap sat right before `key`
            self.next = list.node(key).next();
        } else {
            self.index -= 1;
        }
        let element = list.detach_node(key);
        self.expected = list.stamp();
        tracing::trace!(index = self.index, "cursor removed element");
        Ok(element)
    }

    /// Replace the element returned by the latest [`next`](Cursor::next) or
    /// [`previous`](Cursor::previous), and return the old one. The list is
    /// not relinked and the cursor does not move.
    ///
    /// Fails with [`ListError::InvalidCursorState`] under the same conditions
    /// as [`remove`](Cursor::remove).
    pub fn set(&mut self, list: &mut List<T>, element: T) -> Result<T> {
        self.check(list)?;
        let key = self.last_returned.ok_or(ListError::InvalidCursorState)?;
        let old = list.replace_element(key, element);
        self.expected = list.stamp();
        Ok(old)
    }

    /// Insert `element` into the gap. The gap ends up right after the new
    /// element, so a following [`next`](Cursor::next) is unaffected and a
    /// following [`previous`](Cursor::previous) returns the new element.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_at(1).unwrap();
    ///
    /// cursor.add(&mut list, 4).unwrap(); // becomes [1, 4|2, 3]
    /// assert_eq!(cursor.next_index(), 2);
    /// assert_eq!(cursor.next(&list), Ok(&2));
    ///
    /// let mut cursor = list.cursor_at(list.size()).unwrap();
    /// cursor.add(&mut list, 5).unwrap(); // becomes [1, 4, 2, 3, 5|]
    /// assert_eq!(cursor.next_index(), 5);
    /// assert_eq!(cursor.previous(&list), Ok(&5));
    ///
    /// assert_eq!(Vec::from_iter(list), vec![1, 4, 2, 3, 5]);
    /// ```
    pub fn add(&mut self, list: &mut List<T>, element: T) -> Result<()> {
        self.check(list)?;
        self.insert(list, element);
        Ok(())
    }

    /// Index of the element a [`next`](Cursor::next) would return, which is
    /// also the number of elements before the gap.
    ///
    /// This reads only the cursor's own position, so it never fails, not even
    /// on a stale cursor.
    #[inline]
    pub fn next_index(&self) -> usize {
        self.index
    }

    /// Index of the element a [`previous`](Cursor::previous) would return,
    /// or `None` before the first element.
    ///
    /// Like [`next_index`](Cursor::next_index), this never fails.
    #[inline]
    pub fn previous_index(&self) -> Option<usize> {
        self.index.checked_sub(1)
    }
}

impl<T> Clone for Cursor<T> {
    fn clone(&self) -> Self {
        Self {
            next: self.next,
            index: self.index,
            last_returned: self.last_returned,
            expected: self.expected,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("has_last_returned", &self.last_returned.is_some())
            .field("expected_mod_count", &self.expected.mod_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::list::List;
    use crate::ListError;
    use std::iter::FromIterator;

    fn stale(err: ListError) -> bool {
        err.is_concurrent_modification()
    }

    #[test]
    fn cursor_walk_forward_and_back() {
        let list = List::from_iter(0..5);
        let mut cursor = list.cursor();
        assert_eq!(cursor.has_previous(&list), Ok(false));
        assert_eq!(cursor.previous_index(), None);
        for i in 0..5 {
            assert_eq!(cursor.has_next(&list), Ok(true));
            assert_eq!(cursor.next_index(), i as usize);
            assert_eq!(cursor.next(&list), Ok(&i));
            assert_eq!(cursor.previous_index(), Some(i as usize));
        }
        assert_eq!(cursor.has_next(&list), Ok(false));
        assert_eq!(cursor.next(&list), Err(ListError::EmptyCollection));
        for i in (0..5).rev() {
            assert_eq!(cursor.has_previous(&list), Ok(true));
            assert_eq!(cursor.previous(&list), Ok(&i));
            assert_eq!(cursor.next_index(), i as usize);
        }
        assert_eq!(cursor.has_previous(&list), Ok(false));
        assert_eq!(cursor.previous(&list), Err(ListError::EmptyCollection));
        assert_eq!(cursor.next_index(), 0);
    }

    #[test]
    fn cursor_on_empty_list() {
        let mut list = List::new();
        let mut cursor = list.cursor();
        assert_eq!(cursor.has_next(&list), Ok(false));
        assert_eq!(cursor.has_previous(&list), Ok(false));
        assert_eq!(cursor.next(&list), Err(ListError::EmptyCollection));
        assert_eq!(cursor.previous(&list), Err(ListError::EmptyCollection));
        assert_eq!(cursor.remove(&mut list), Err(ListError::InvalidCursorState));
        assert_eq!(cursor.set(&mut list, 1), Err(ListError::InvalidCursorState));

        cursor.add(&mut list, 1).unwrap();
        list.assert_links_consistent();
        assert_eq!(list.first(), Ok(&1));
        assert_eq!(list.last(), Ok(&1));
        assert_eq!(cursor.has_next(&list), Ok(false));
        assert_eq!(cursor.has_previous(&list), Ok(true));
    }

    #[test]
    fn cursor_next_previous_symmetry() {
        let list = List::from_iter(0..4);
        for k in 0..=4 {
            let mut cursor = list.cursor_at(k).unwrap();
            let before = cursor.clone().next(&list).ok().copied();
            if cursor.next(&list).is_ok() {
                assert!(cursor.previous(&list).is_ok());
            }
            assert_eq!(cursor.next_index(), k);
            assert_eq!(cursor.next(&list).ok().copied(), before);
        }
    }

    #[test]
    fn cursor_remove_after_next() {
        let mut list = List::from_iter(['A', 'B', 'C']);

        // head
        let mut cursor = list.cursor();
        assert_eq!(cursor.next(&list), Ok(&'A'));
        assert_eq!(cursor.remove(&mut list), Ok('A'));
        assert_eq!(cursor.next_index(), 0);
        assert_eq!(cursor.has_previous(&list), Ok(false));
        list.assert_links_consistent();

        // tail
        let mut cursor = list.cursor_at(1).unwrap();
        assert_eq!(cursor.next(&list), Ok(&'C'));
        assert_eq!(cursor.remove(&mut list), Ok('C'));
        assert_eq!(cursor.next_index(), 1);
        assert_eq!(cursor.has_next(&list), Ok(false));
        assert_eq!(cursor.previous(&list), Ok(&'B'));
        list.assert_links_consistent();

        // last remaining
        assert_eq!(cursor.remove(&mut list), Ok('B'));
        assert_eq!(cursor.next_index(), 0);
        assert!(list.is_empty());
        list.assert_links_consistent();
    }

    #[test]
    fn cursor_remove_after_previous() {
        let mut list = List::from_iter(['A', 'B', 'C', 'D']);
        let mut cursor = list.cursor_at(4).unwrap();

        // tail, with the gap after it
        assert_eq!(cursor.previous(&list), Ok(&'D'));
        assert_eq!(cursor.remove(&mut list), Ok('D'));
        assert_eq!(cursor.next_index(), 3);
        assert_eq!(cursor.has_next(&list), Ok(false));
        list.assert_links_consistent();

        // interior
        assert_eq!(cursor.previous(&list), Ok(&'C'));
        assert_eq!(cursor.previous(&list), Ok(&'B'));
        assert_eq!(cursor.remove(&mut list), Ok('B'));
        assert_eq!(cursor.next_index(), 1);
        assert_eq!(cursor.next(&list), Ok(&'C'));
        assert_eq!(cursor.previous(&list), Ok(&'C'));
        list.assert_links_consistent();

        // head
        assert_eq!(cursor.previous(&list), Ok(&'A'));
        assert_eq!(cursor.remove(&mut list), Ok('A'));
        assert_eq!(cursor.next_index(), 0);
        assert_eq!(cursor.has_previous(&list), Ok(false));
        assert_eq!(cursor.next(&list), Ok(&'C'));
        list.assert_links_consistent();
        assert_eq!(list.to_string_repr(), "[C]");
    }

    #[test]
    fn cursor_remove_needs_a_move() {
        let mut list = List::from_iter([1, 2, 3]);
        let mut cursor = list.cursor();
        assert_eq!(cursor.remove(&mut list), Err(ListError::InvalidCursorState));

        cursor.next(&list).unwrap();
        cursor.remove(&mut list).unwrap();
        assert_eq!(cursor.remove(&mut list), Err(ListError::InvalidCursorState));
        assert_eq!(cursor.set(&mut list, 9), Err(ListError::InvalidCursorState));

        cursor.next(&list).unwrap();
        cursor.add(&mut list, 7).unwrap();
        assert_eq!(cursor.remove(&mut list), Err(ListError::InvalidCursorState));
        assert_eq!(cursor.set(&mut list, 9), Err(ListError::InvalidCursorState));
        assert_eq!(list.to_string_repr(), "[2, 7, 3]");
    }

    #[test]
    fn cursor_set() {
        let mut list = List::from_iter([1, 2, 3]);
        let size = list.size();
        let mut cursor = list.cursor();
        cursor.next(&list).unwrap();
        assert_eq!(cursor.set(&mut list, 10), Ok(1));
        // `set` keeps the target, so it can be repeated
        assert_eq!(cursor.set(&mut list, 11), Ok(10));
        cursor.next(&list).unwrap();
        cursor.previous(&list).unwrap();
        assert_eq!(cursor.set(&mut list, 20), Ok(2));
        assert_eq!(cursor.next_index(), 1);
        assert_eq!(list.size(), size);
        assert_eq!(list.to_string_repr(), "[11, 20, 3]");
        list.assert_links_consistent();
    }

    #[test]
    fn cursor_add_at_every_gap() {
        for gap in 0..=3 {
            let mut list = List::from_iter([0, 1, 2]);
            let mut cursor = list.cursor_at(gap).unwrap();
            cursor.add(&mut list, 9).unwrap();
            list.assert_links_consistent();
            assert_eq!(cursor.next_index(), gap + 1);
            assert_eq!(list.get(gap), Ok(&9));
            assert_eq!(cursor.previous(&list), Ok(&9));
            let mut expected = vec![0, 1, 2];
            expected.insert(gap, 9);
            assert_eq!(Vec::from_iter(list), expected);
        }
    }

    #[test]
    fn cursor_add_twice_keeps_order() {
        let mut list = List::new();
        let mut cursor = list.cursor();
        cursor.add(&mut list, 'a').unwrap();
        cursor.add(&mut list, 'b').unwrap();
        cursor.add(&mut list, 'c').unwrap();
        assert_eq!(cursor.next_index(), 3);
        assert_eq!(list.to_string_repr(), "[a, b, c]");
        list.assert_links_consistent();
    }

    #[test]
    fn cursor_detects_foreign_changes() {
        let mut list = List::from_iter([1, 2, 3]);
        let mut c1 = list.cursor();
        let mut c2 = list.cursor_at(3).unwrap();

        // self-changes keep c1 usable and make c2 stale
        c1.next(&list).unwrap();
        c1.remove(&mut list).unwrap();
        assert_eq!(c1.has_next(&list), Ok(true));
        assert!(stale(c2.has_next(&list).unwrap_err()));
        assert!(stale(c2.has_previous(&list).unwrap_err()));
        assert!(stale(c2.previous(&list).unwrap_err()));
        assert!(stale(c2.next(&list).unwrap_err()));
        assert!(stale(c2.remove(&mut list).unwrap_err()));
        assert!(stale(c2.set(&mut list, 0).unwrap_err()));
        assert!(stale(c2.add(&mut list, 0).unwrap_err()));
        // positional reads never check
        assert_eq!(c2.next_index(), 3);
        assert_eq!(c2.previous_index(), Some(2));
        assert_eq!(list.to_string_repr(), "[2, 3]");

        // a direct change makes c1 stale too
        list.add_to_rear(4);
        assert!(stale(c1.next(&list).unwrap_err()));

        // as does a value change through the list
        let mut c3 = list.cursor();
        list.set(0, 20).unwrap();
        assert!(stale(c3.next(&list).unwrap_err()));
    }

    #[test]
    fn cursor_rejects_other_lists() {
        let mut list = List::from_iter([1, 2, 3]);
        let mut other = list.clone();
        assert_eq!(list.mod_count(), other.mod_count());
        let mut cursor = list.cursor();
        let err = cursor.next(&other).unwrap_err();
        assert!(stale(err));
        assert!(stale(cursor.add(&mut other, 4).unwrap_err()));
        assert_eq!(other.size(), 3);
        assert_eq!(cursor.next(&list), Ok(&1));
    }

    #[test]
    fn cursor_failed_ops_leave_state() {
        let mut list = List::from_iter([1]);
        let mut cursor = list.cursor_at(1).unwrap();
        let count = list.mod_count();
        assert_eq!(cursor.next(&list), Err(ListError::EmptyCollection));
        assert_eq!(cursor.remove(&mut list), Err(ListError::InvalidCursorState));
        assert_eq!(list.mod_count(), count);
        assert_eq!(cursor.next_index(), 1);
        assert_eq!(cursor.previous(&list), Ok(&1));
    }
}

// proptest doesn't run under miri with default config
#[cfg(all(not(miri), test))]
mod proptests {
    use crate::list::List;
    use crate::ListError;
    use proptest::prelude::*;

    /// One step of a random cursor session, mirrored on a `Vec`.
    #[derive(Clone, Debug)]
    enum Step {
        Next,
        Previous,
        Remove,
        Set(u8),
        Add(u8),
        AddToFront(u8),
        AddToRear(u8),
        RemoveFirst,
        RemoveLast,
        Reopen(usize),
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            3 => Just(Step::Next),
            3 => Just(Step::Previous),
            2 => Just(Step::Remove),
            1 => any::<u8>().prop_map(Step::Set),
            2 => any::<u8>().prop_map(Step::Add),
            1 => any::<u8>().prop_map(Step::AddToFront),
            1 => any::<u8>().prop_map(Step::AddToRear),
            1 => Just(Step::RemoveFirst),
            1 => Just(Step::RemoveLast),
            1 => any::<usize>().prop_map(Step::Reopen),
        ]
    }

    /// Reference cursor over a `Vec`: a gap index plus the position of the
    /// last returned element.
    struct Model {
        items: Vec<u8>,
        gap: usize,
        last: Option<usize>,
    }

    proptest! {
        #[test]
        fn cursor_matches_vec_model(
            init in proptest::collection::vec(any::<u8>(), 0..8),
            steps in proptest::collection::vec(step(), 0..64),
        ) {
            let mut list: List<u8> = init.iter().copied().collect();
            let mut cursor = list.cursor();
            let mut model = Model { items: init, gap: 0, last: None };

            for step in steps {
                match step {
                    Step::Next => {
                        let got = cursor.next(&list).map(|e| *e);
                        if model.gap < model.items.len() {
                            prop_assert_eq!(got, Ok(model.items[model.gap]));
                            model.last = Some(model.gap);
                            model.gap += 1;
                        } else {
                            prop_assert_eq!(got, Err(ListError::EmptyCollection));
                        }
                    }
                    Step::Previous => {
                        let got = cursor.previous(&list).map(|e| *e);
                        if model.gap > 0 {
                            model.gap -= 1;
                            model.last = Some(model.gap);
                            prop_assert_eq!(got, Ok(model.items[model.gap]));
                        } else {
                            prop_assert_eq!(got, Err(ListError::EmptyCollection));
                        }
                    }
                    Step::Remove => {
                        let got = cursor.remove(&mut list);
                        match model.last.take() {
                            Some(at) => {
                                let removed = model.items.remove(at);
                                prop_assert_eq!(got, Ok(removed));
                                if at < model.gap {
                                    model.gap -= 1;
                                }
                            }
                            None => prop_assert_eq!(got, Err(ListError::InvalidCursorState)),
                        }
                    }
                    Step::Set(value) => {
                        let got = cursor.set(&mut list, value);
                        match model.last {
                            Some(at) => {
                                let old = std::mem::replace(&mut model.items[at], value);
                                prop_assert_eq!(got, Ok(old));
                            }
                            None => prop_assert_eq!(got, Err(ListError::InvalidCursorState)),
                        }
                    }
                    Step::Add(value) => {
                        prop_assert_eq!(cursor.add(&mut list, value), Ok(()));
                        model.items.insert(model.gap, value);
                        model.gap += 1;
                        model.last = None;
                    }
                    // direct list changes: the cursor must notice, then reopen at its gap
                    Step::AddToFront(value) => {
                        list.add_to_front(value);
                        model.items.insert(0, value);
                        prop_assert!(cursor.has_next(&list).unwrap_err().is_concurrent_modification());
                        model.gap = model.gap.min(model.items.len());
                        cursor = list.cursor_at(model.gap).unwrap();
                        model.last = None;
                    }
                    Step::AddToRear(value) => {
                        list.add_to_rear(value);
                        model.items.push(value);
                        prop_assert!(cursor.has_previous(&list).unwrap_err().is_concurrent_modification());
                        cursor = list.cursor_at(model.gap).unwrap();
                        model.last = None;
                    }
                    Step::RemoveFirst => {
                        let got = list.remove_first();
                        if model.items.is_empty() {
                            prop_assert_eq!(got, Err(ListError::EmptyCollection));
                        } else {
                            let removed = model.items.remove(0);
                            prop_assert_eq!(got, Ok(removed));
                            model.gap = model.gap.min(model.items.len());
                            cursor = list.cursor_at(model.gap).unwrap();
                            model.last = None;
                        }
                    }
                    Step::RemoveLast => {
                        let got = list.remove_last();
                        match model.items.pop() {
                            Some(last) => {
                                prop_assert_eq!(got, Ok(last));
                                model.gap = model.gap.min(model.items.len());
                                cursor = list.cursor_at(model.gap).unwrap();
                                model.last = None;
                            }
                            None => prop_assert_eq!(got, Err(ListError::EmptyCollection)),
                        }
                    }
                    Step::Reopen(at) => {
                        model.gap = at % (model.items.len() + 1);
                        cursor = list.cursor_at(model.gap).unwrap();
                        model.last = None;
                    }
                }

                list.assert_links_consistent();
                prop_assert_eq!(list.size(), model.items.len());
                prop_assert_eq!(cursor.next_index(), model.gap);
                let contents: Vec<u8> = list.iter().copied().collect();
                prop_assert_eq!(&contents, &model.items);
            }
        }

        #[test]
        fn get_matches_forward_walk(items in proptest::collection::vec(any::<i32>(), 1..32)) {
            let list: List<i32> = items.iter().copied().collect();
            let mut cursor = list.cursor();
            for i in 0..list.size() {
                prop_assert_eq!(list.get(i), cursor.next(&list));
            }
            prop_assert_eq!(cursor.has_next(&list), Ok(false));
        }

        #[test]
        fn index_of_finds_first_match(
            items in proptest::collection::vec(0u8..8, 0..32),
            probe in 0u8..8,
        ) {
            let list: List<u8> = items.iter().copied().collect();
            prop_assert_eq!(list.index_of(&probe), items.iter().position(|x| *x == probe));
            prop_assert_eq!(list.contains(&probe), items.contains(&probe));
        }
    }
}
