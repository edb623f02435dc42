use crate::list::List;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for List<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

/// The clone is a new list: cursors of the original are not valid on it.
impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    fn clone_from(&mut self, other: &Self) {
        while self.len() > other.len() {
            self.remove_last().ok();
        }
        let mut source = other.iter();
        for (elem, elem_other) in self.iter_mut().zip(&mut source) {
            elem.clone_from(elem_other);
        }
        self.extend(source.cloned());
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for elt in self {
            elt.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

/// Renders `[A, B, C]`, or `[]` for an empty list.
impl<T: fmt::Display> fmt::Display for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, elt) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", elt)?;
        }
        f.write_str("]")
    }
}

impl<T> List<T> {
    /// Returns `true` if the `List` contains an element equal to the given value.
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
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Position of the first element equal to `x`, or `None` if there is
    /// none.
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
    /// let list = List::from_iter(['A', 'B', 'A']);
    /// assert_eq!(list.index_of(&'A'), Some(0));
    /// assert_eq!(list.index_of(&'B'), Some(1));
    /// assert_eq!(list.index_of(&'C'), None);
    /// ```
    pub fn index_of(&self, x: &T) -> Option<usize>
    where
        T: PartialEq<T>,
    {
        self.iter().position(|e| e == x)
    }

    /// The elements in order, comma separated and bracketed: `[A, B, C]`.
    /// An empty list gives `[]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// assert_eq!(List::<u8>::new().to_string_repr(), "[]");
    /// assert_eq!(List::from_iter([1]).to_string_repr(), "[1]");
    /// assert_eq!(List::from_iter(['A', 'B', 'C']).to_string_repr(), "[A, B, C]");
    /// ```
    pub fn to_string_repr(&self) -> String
    where
        T: fmt::Display,
    {
        self.to_string()
    }
}
