//! Capability interfaces of an index-addressable list and its cursor.
//!
//! Code written against [`IndexedList`] and [`ListCursor`] runs unchanged on
//! any implementation; the crate's conformance tests are written this way.

use crate::err::Result;
use crate::list::cursor::Cursor;
use crate::list::List;
use std::fmt::Display;

/// An ordered collection addressable by position, editable at both ends,
/// by position, by value, and through cursors.
pub trait IndexedList<T> {
    /// The cursor type issued by [`cursor`](IndexedList::cursor).
    type Cursor: ListCursor<T, Self>;

    fn add_to_front(&mut self, element: T);
    fn add_to_rear(&mut self, element: T);

    /// Same as [`add_to_rear`](IndexedList::add_to_rear).
    fn add(&mut self, element: T) {
        self.add_to_rear(element)
    }

    fn add_at(&mut self, index: usize, element: T) -> Result<()>;
    fn add_after(&mut self, element: T, target: &T) -> Result<()>
    where
        T: PartialEq;

    fn remove_first(&mut self) -> Result<T>;
    fn remove_last(&mut self) -> Result<T>;
    fn remove(&mut self, element: &T) -> Result<T>
    where
        T: PartialEq;
    fn remove_at(&mut self, index: usize) -> Result<T>;

    fn set(&mut self, index: usize, element: T) -> Result<T>;
    fn get(&self, index: usize) -> Result<&T>;
    fn index_of(&self, element: &T) -> Option<usize>
    where
        T: PartialEq;

    fn first(&self) -> Result<&T>;
    fn last(&self) -> Result<&T>;
    fn contains(&self, element: &T) -> bool
    where
        T: PartialEq;
    fn is_empty(&self) -> bool;
    fn size(&self) -> usize;
    fn to_string_repr(&self) -> String
    where
        T: Display;

    fn cursor(&self) -> Self::Cursor;
    fn cursor_at(&self, index: usize) -> Result<Self::Cursor>;
}

/// A bidirectional cursor over a list of type `L`, sitting in the gap
/// between two elements. See [`Cursor`] for the semantics.
pub trait ListCursor<T, L: ?Sized> {
    fn has_next(&self, list: &L) -> Result<bool>;
    fn has_previous(&self, list: &L) -> Result<bool>;
    fn next<'a>(&mut self, list: &'a L) -> Result<&'a T>
    where
        T: 'a;
    fn previous<'a>(&mut self, list: &'a L) -> Result<&'a T>
    where
        T: 'a;
    fn remove(&mut self, list: &mut L) -> Result<T>;
    fn set(&mut self, list: &mut L, element: T) -> Result<T>;
    fn add(&mut self, list: &mut L, element: T) -> Result<()>;
    fn next_index(&self) -> usize;
    fn previous_index(&self) -> Option<usize>;
}

impl<T> IndexedList<T> for List<T> {
    type Cursor = Cursor<T>;

    fn add_to_front(&mut self, element: T) {
        List::add_to_front(self, element)
    }

    fn add_to_rear(&mut self, element: T) {
        List::add_to_rear(self, element)
    }

    fn add_at(&mut self, index: usize, element: T) -> Result<()> {
        List::add_at(self, index, element)
    }

    fn add_after(&mut self, element: T, target: &T) -> Result<()>
    where
        T: PartialEq,
    {
        List::add_after(self, element, target)
    }

    fn remove_first(&mut self) -> Result<T> {
        List::remove_first(self)
    }

    fn remove_last(&mut self) -> Result<T> {
        List::remove_last(self)
    }

    fn remove(&mut self, element: &T) -> Result<T>
    where
        T: PartialEq,
    {
        List::remove(self, element)
    }

    fn remove_at(&mut self, index: usize) -> Result<T> {
        List::remove_at(self, index)
    }

    fn set(&mut self, index: usize, element: T) -> Result<T> {
        List::set(self, index, element)
    }

    fn get(&self, index: usize) -> Result<&T> {
        List::get(self, index)
    }

    fn index_of(&self, element: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        List::index_of(self, element)
    }

    fn first(&self) -> Result<&T> {
        List::first(self)
    }

    fn last(&self) -> Result<&T> {
        List::last(self)
    }

    fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        List::contains(self, element)
    }

    fn is_empty(&self) -> bool {
        List::is_empty(self)
    }

    fn size(&self) -> usize {
        List::size(self)
    }

    fn to_string_repr(&self) -> String
    where
        T: Display,
    {
        List::to_string_repr(self)
    }

    fn cursor(&self) -> Cursor<T> {
        List::cursor(self)
    }

    fn cursor_at(&self, index: usize) -> Result<Cursor<T>> {
        List::cursor_at(self, index)
    }
}

impl<T> ListCursor<T, List<T>> for Cursor<T> {
    fn has_next(&self, list: &List<T>) -> Result<bool> {
        Cursor::has_next(self, list)
    }

    fn has_previous(&self, list: &List<T>) -> Result<bool> {
        Cursor::has_previous(self, list)
    }

    fn next<'a>(&mut self, list: &'a List<T>) -> Result<&'a T>
    where
        T: 'a,
    {
        Cursor::next(self, list)
    }

    fn previous<'a>(&mut self, list: &'a List<T>) -> Result<&'a T>
    where
        T: 'a,
    {
        Cursor::previous(self, list)
    }

    fn remove(&mut self, list: &mut List<T>) -> Result<T> {
        Cursor::remove(self, list)
    }

    fn set(&mut self, list: &mut List<T>, element: T) -> Result<T> {
        Cursor::set(self, list, element)
    }

    fn add(&mut self, list: &mut List<T>, element: T) -> Result<()> {
        Cursor::add(self, list, element)
    }

    fn next_index(&self) -> usize {
        Cursor::next_index(self)
    }

    fn previous_index(&self) -> Option<usize> {
        Cursor::previous_index(self)
    }
}
