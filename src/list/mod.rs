use std::sync::atomic::{AtomicU64, Ordering};

use slab::Slab;

use crate::err::{ListError, Result};
use crate::list::cursor::Cursor;
use crate::list::node::Node;
use crate::{Iter, IterMut};

pub mod cursor;
pub mod iterator;

mod algorithms;
mod node;

/// Source of list identities. Cursors remember the identity of the list that
/// issued them, so a cursor handed to another list is rejected.
static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(0);

/// The `List` is an index-addressable, doubly-linked list.
///
/// Elements can be added or removed at both ends in constant time, and at any
/// position through a [`Cursor`] standing there. Reaching a position by index
/// or by value takes *O*(*n*) time.
///
/// The `List` contains:
/// - an arena of nodes, each holding an element and the keys of its
///   neighbours;
/// - the keys of the `head` and `tail` nodes (`None` when the list is empty);
/// - a modification counter, bumped once by every change to the structure or
///   to a stored value.
///
/// # Cursors
///
/// A [`Cursor`] does not borrow the list: it is a small handle which is passed
/// the list on every call. Any number of cursors can therefore be alive at
/// once, interleaved with direct calls on the list. Each cursor remembers the
/// modification count it last saw, and refuses to act with
/// [`ListError::ConcurrentModification`] once the list was changed by anyone
/// else.
///
/// ```
/// use cursor_list::{List, ListError};
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut first = list.cursor();
/// let mut second = list.cursor();
///
/// assert_eq!(first.next(&list), Ok(&1));
/// assert_eq!(first.remove(&mut list), Ok(1));
/// // `first` did the change, so it stays usable
/// assert_eq!(first.next(&list), Ok(&2));
/// // `second` was not told about it
/// assert!(matches!(
///     second.has_next(&list),
///     Err(ListError::ConcurrentModification { .. })
/// ));
/// ```
pub struct List<T> {
    nodes: Slab<Node<T>>,
    head: Option<usize>,
    tail: Option<usize>,
    mod_count: u64,
    id: u64,
}

/// What a cursor checks the list against before every structural access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Stamp {
    pub(crate) list: u64,
    pub(crate) mod_count: u64,
}

// private methods
impl<T> List<T> {
    pub(crate) fn stamp(&self) -> Stamp {
        Stamp {
            list: self.id,
            mod_count: self.mod_count,
        }
    }

    pub(crate) fn head_key(&self) -> Option<usize> {
        self.head
    }

    pub(crate) fn tail_key(&self) -> Option<usize> {
        self.tail
    }

    /// The node stored under `key`. The key must belong to this list.
    pub(crate) fn node(&self, key: usize) -> &Node<T> {
        &self.nodes[key]
    }

    /// Key of the node at position `index`, or `None` if `index >= len`.
    ///
    /// Walks from whichever end of the list is closer.
    pub(crate) fn key_at(&self, index: usize) -> Option<usize> {
        let len = self.len();
        if index >= len {
            return None;
        }
        if index <= len / 2 {
            let mut key = self.head?;
            for _ in 0..index {
                key = self.nodes[key].next()?;
            }
            Some(key)
        } else {
            let mut key = self.tail?;
            for _ in 0..(len - 1 - index) {
                key = self.nodes[key].prev()?;
            }
            Some(key)
        }
    }

    /// Make `prev` and `next` neighbours. A `None` side stands for the
    /// corresponding end of the list.
    fn connect(&mut self, prev: Option<usize>, next: Option<usize>) {
        match prev {
            Some(prev) => self.nodes[prev].set_next(next),
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next].set_prev(prev),
            None => self.tail = prev,
        }
    }

    /// Store `element` in a new node between `prev` and `next`, and return
    /// its key.
    ///
    /// `prev` and `next` must be adjacent (checked only in
    /// `#[cfg(debug_assertions)]`), otherwise the list becomes ill-formed.
    pub(crate) fn attach_node(
        &mut self,
        prev: Option<usize>,
        next: Option<usize>,
        element: T,
    ) -> usize {
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, next);
        let key = self.nodes.insert(Node::new(element));
        self.connect(prev, Some(key));
        self.connect(Some(key), next);
        self.mod_count += 1;
        #[cfg(debug_assertions)]
        {
            self.assert_adjacent(prev, Some(key));
            self.assert_adjacent(Some(key), next);
        }
        key
    }

    /// Unlink the node under `key` and return its element. Its neighbours
    /// (or the list ends) are linked to each other.
    pub(crate) fn detach_node(&mut self, key: usize) -> T {
        let node = self.nodes.remove(key);
        self.connect(node.prev(), node.next());
        self.mod_count += 1;
        #[cfg(debug_assertions)]
        self.assert_adjacent(node.prev(), node.next());
        node.into_element()
    }

    /// Swap the element under `key` for `element`, without relinking.
    pub(crate) fn replace_element(&mut self, key: usize, element: T) -> T {
        let old = self.nodes[key].replace(element);
        self.mod_count += 1;
        old
    }

    #[cfg(debug_assertions)]
    fn assert_adjacent(&self, prev: Option<usize>, next: Option<usize>) {
        let after_prev = match prev {
            Some(prev) => self.nodes[prev].next(),
            None => self.head,
        };
        let before_next = match next {
            Some(next) => self.nodes[next].prev(),
            None => self.tail,
        };
        assert_eq!(after_prev, next);
        assert_eq!(before_next, prev);
    }

    /// Walk the whole list and check every link invariant.
    #[cfg(test)]
    pub(crate) fn assert_links_consistent(&self) {
        assert_eq!(self.head.is_none(), self.is_empty());
        assert_eq!(self.tail.is_none(), self.is_empty());
        let mut count = 0;
        let mut prev = None;
        let mut current = self.head;
        while let Some(key) = current {
            let node = &self.nodes[key];
            assert_eq!(node.prev(), prev, "broken back link at position {}", count);
            prev = Some(key);
            current = node.next();
            count += 1;
            assert!(count <= self.len(), "cycle in the forward links");
        }
        assert_eq!(prev, self.tail);
        assert_eq!(count, self.len());
    }
}

impl<T> List<T> {
    /// Create an empty `List`.
    ///
    /// # Examples
    /// ```
    /// use cursor_list::List;
    /// let list: List<u32> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty `List` with room for `capacity` elements before the
    /// node arena has to grow.
    ///
    /// # Examples
    /// ```
    /// use cursor_list::List;
    /// let list: List<u32> = List::with_capacity(16);
    /// assert!(list.capacity() >= 16);
    /// assert_eq!(list.size(), 0);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            head: None,
            tail: None,
            mod_count: 0,
            id: NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Number of elements the node arena can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the number of elements in the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::new();
    /// list.add_to_front(2);
    /// list.add_to_front(1);
    /// list.add_to_rear(3);
    /// assert_eq!(list.size(), 3);
    /// ```
    #[inline]
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Same as [`List::size`].
    #[inline]
    pub fn len(&self) -> usize {
        self.size()
    }

    /// The modification counter. It grows by one with every change to the
    /// list, whether made directly or through a cursor.
    #[inline]
    pub fn mod_count(&self) -> u64 {
        self.mod_count
    }

    /// Removes all elements from the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn clear(&mut self) {
        if self.is_empty() {
            return;
        }
        tracing::trace!(len = self.len(), "clearing list");
        self.nodes.clear();
        self.head = None;
        self.tail = None;
        self.mod_count += 1;
    }

    /// Provides a reference to the first element, or
    /// [`ListError::EmptyCollection`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{List, ListError};
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.first(), Err(ListError::EmptyCollection));
    ///
    /// list.add_to_front(1);
    /// assert_eq!(list.first(), Ok(&1));
    /// ```
    pub fn first(&self) -> Result<&T> {
        self.head
            .map(|key| self.nodes[key].element())
            .ok_or(ListError::EmptyCollection)
    }

    /// Provides a reference to the last element, or
    /// [`ListError::EmptyCollection`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{List, ListError};
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.last(), Err(ListError::EmptyCollection));
    ///
    /// list.add_to_rear(1);
    /// list.add_to_rear(2);
    /// assert_eq!(list.last(), Ok(&2));
    /// ```
    pub fn last(&self) -> Result<&T> {
        self.tail
            .map(|key| self.nodes[key].element())
            .ok_or(ListError::EmptyCollection)
    }

    /// Adds an element first in the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.add_to_front(2);
    /// assert_eq!(list.first(), Ok(&2));
    ///
    /// list.add_to_front(1);
    /// assert_eq!(list.first(), Ok(&1));
    /// ```
    pub fn add_to_front(&mut self, element: T) {
        let mut cursor = self.cursor();
        cursor.insert(self, element);
    }

    /// Appends an element to the back of the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::new();
    /// list.add_to_rear(1);
    /// list.add_to_rear(3);
    /// assert_eq!(list.last(), Ok(&3));
    /// ```
    pub fn add_to_rear(&mut self, element: T) {
        self.attach_node(self.tail, None, element);
    }

    /// Same as [`List::add_to_rear`].
    #[inline]
    pub fn add(&mut self, element: T) {
        self.add_to_rear(element)
    }

    /// Inserts `element` so that it ends up at position `index`, shifting
    /// everything from `index` on one place back.
    ///
    /// Fails with [`ListError::IndexOutOfRange`] if `index > len`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    ///
    /// list.add_at(2, 4).unwrap();
    /// list.add_at(4, 5).unwrap();
    /// assert!(list.add_at(7, 6).is_err());
    ///
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 4, 3, 5]);
    /// ```
    pub fn add_at(&mut self, index: usize, element: T) -> Result<()> {
        let mut cursor = self.cursor_at(index)?;
        cursor.insert(self, element);
        Ok(())
    }

    /// Inserts `element` right after the first element equal to `target`.
    ///
    /// Fails with [`ListError::NotFound`] if no element equals `target`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{List, ListError};
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(['A', 'C', 'A']);
    /// list.add_after('B', &'A').unwrap();
    /// assert_eq!(list.to_string_repr(), "[A, B, C, A]");
    ///
    /// assert_eq!(list.add_after('D', &'Z'), Err(ListError::NotFound));
    /// ```
    pub fn add_after(&mut self, element: T, target: &T) -> Result<()>
    where
        T: PartialEq,
    {
        let mut cursor = self.cursor();
        while cursor.has_next(self)? {
            if cursor.next(self)? == target {
                cursor.insert(self, element);
                return Ok(());
            }
        }
        Err(ListError::NotFound)
    }

    /// Removes the first element and returns it, or fails with
    /// [`ListError::EmptyCollection`] if the list is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{List, ListError};
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.remove_first(), Err(ListError::EmptyCollection));
    ///
    /// list.add_to_front(1);
    /// list.add_to_front(3);
    /// assert_eq!(list.remove_first(), Ok(3));
    /// assert_eq!(list.remove_first(), Ok(1));
    /// assert!(list.is_empty());
    /// ```
    pub fn remove_first(&mut self) -> Result<T> {
        let mut cursor = self.cursor();
        cursor.next(self)?;
        cursor.remove(self)
    }

    /// Removes the last element and returns it, or fails with
    /// [`ListError::EmptyCollection`] if the list is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{List, ListError};
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.remove_last(), Err(ListError::EmptyCollection));
    /// list.add_to_rear(1);
    /// list.add_to_rear(3);
    /// assert_eq!(list.remove_last(), Ok(3));
    /// ```
    pub fn remove_last(&mut self) -> Result<T> {
        let tail = self.tail.ok_or(ListError::EmptyCollection)?;
        Ok(self.detach_node(tail))
    }

    /// Removes and returns the first element equal to `element`.
    ///
    /// Fails with [`ListError::NotFound`] if there is no such element.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{List, ListError};
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3, 2]);
    /// assert_eq!(list.remove(&2), Ok(2));
    /// assert_eq!(list.to_string_repr(), "[1, 3, 2]");
    /// assert_eq!(list.remove(&5), Err(ListError::NotFound));
    /// ```
    pub fn remove(&mut self, element: &T) -> Result<T>
    where
        T: PartialEq,
    {
        let mut cursor = self.cursor();
        while cursor.has_next(self)? {
            if cursor.next(self)? == element {
                return cursor.remove(self);
            }
        }
        Err(ListError::NotFound)
    }

    /// Removes the element at the given index and returns it.
    ///
    /// Fails with [`ListError::IndexOutOfRange`] if `index >= len`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.add_to_front(1);
    /// list.add_to_front(2);
    /// list.add_to_front(3);
    ///
    /// assert_eq!(list.remove_at(1), Ok(2));
    /// assert_eq!(list.remove_at(0), Ok(3));
    /// assert_eq!(list.remove_at(0), Ok(1));
    /// assert!(list.remove_at(0).is_err());
    /// ```
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        if index >= self.len() {
            return Err(ListError::index_out_of_range(index, self.len()));
        }
        let mut cursor = self.cursor_at(index)?;
        cursor.next(self)?;
        cursor.remove(self)
    }

    /// Replaces the element at `index`, returning the old one. The links of
    /// the list are not touched.
    ///
    /// Fails with [`ListError::IndexOutOfRange`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(['A', 'B', 'C']);
    /// assert_eq!(list.set(1, 'X'), Ok('B'));
    /// assert_eq!(list.to_string_repr(), "[A, X, C]");
    /// assert!(list.set(3, 'Y').is_err());
    /// ```
    pub fn set(&mut self, index: usize, element: T) -> Result<T> {
        if index >= self.len() {
            return Err(ListError::index_out_of_range(index, self.len()));
        }
        let mut cursor = self.cursor_at(index)?;
        cursor.next(self)?;
        cursor.set(self, element)
    }

    /// Provides a reference to the element at `index`.
    ///
    /// Fails with [`ListError::IndexOutOfRange`] if `index >= len`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.get(0), Ok(&1));
    /// assert_eq!(list.get(2), Ok(&3));
    /// assert!(list.get(3).is_err());
    /// ```
    pub fn get(&self, index: usize) -> Result<&T> {
        self.key_at(index)
            .map(|key| self.nodes[key].element())
            .ok_or_else(|| ListError::index_out_of_range(index, self.len()))
    }

    /// Provides a mutable reference to the element at `index`.
    ///
    /// Handing out the reference counts as a modification, so every
    /// outstanding cursor becomes stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// *list.get_mut(1).unwrap() *= 10;
    /// assert_eq!(list.get(1), Ok(&20));
    /// ```
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let key = self
            .key_at(index)
            .ok_or_else(|| ListError::index_out_of_range(index, self.len()))?;
        self.mod_count += 1;
        Ok(self.nodes[key].element_mut())
    }

    /// Provides a cursor before the first element.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2]);
    /// let mut cursor = list.cursor();
    /// assert_eq!(cursor.next_index(), 0);
    /// assert_eq!(cursor.next(&list), Ok(&1));
    /// ```
    pub fn cursor(&self) -> Cursor<T> {
        Cursor::new(self.head, 0, self.stamp())
    }

    /// Provides a cursor in the gap before position `index`, so that the
    /// first call to [`Cursor::next`] returns the element at `index`.
    ///
    /// By convention, `index == len` places the cursor after the last element.
    /// Fails with [`ListError::IndexOutOfRange`] if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{List, ListError};
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.cursor_at(1).unwrap().next(&list), Ok(&2));
    /// assert_eq!(list.cursor_at(3).unwrap().previous(&list), Ok(&3));
    /// assert_eq!(
    ///     list.cursor_at(4).unwrap_err(),
    ///     ListError::IndexOutOfRange { index: 4, bound: 4 }
    /// );
    /// ```
    pub fn cursor_at(&self, index: usize) -> Result<Cursor<T>> {
        if index > self.len() {
            return Err(ListError::index_out_of_range(index, self.len() + 1));
        }
        Ok(Cursor::new(self.key_at(index), index, self.stamp()))
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.add_to_rear(0);
    /// list.add_to_rear(1);
    /// list.add_to_rear(2);
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// Like [`List::get_mut`], this counts as a modification and makes every
    /// outstanding cursor stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([0, 1, 2]);
    ///
    /// for element in list.iter_mut() {
    ///     *element += 10;
    /// }
    ///
    /// assert_eq!(Vec::from_iter(list), vec![10, 11, 12]);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.mod_count += 1;
        let (head, tail, len) = (self.head, self.tail, self.len());
        IterMut::new(&mut self.nodes, head, tail, len)
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}
