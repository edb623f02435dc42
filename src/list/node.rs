use std::mem;

/// A storage cell of the list: one element and the arena keys of its
/// neighbours.
///
/// Nodes never own each other. All of them are owned by the list's arena,
/// and `next`/`prev` are plain keys into it (`None` past either end).
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    element: T,
    next: Option<usize>,
    prev: Option<usize>,
}

impl<T> Node<T> {
    /// Create an unlinked node.
    #[inline]
    pub(crate) fn new(element: T) -> Self {
        Self {
            element,
            next: None,
            prev: None,
        }
    }

    #[inline]
    pub(crate) fn element(&self) -> &T {
        &self.element
    }

    #[inline]
    pub(crate) fn element_mut(&mut self) -> &mut T {
        &mut self.element
    }

    /// Swap in a new element, returning the old one. Links are untouched.
    #[inline]
    pub(crate) fn replace(&mut self, element: T) -> T {
        mem::replace(&mut self.element, element)
    }

    #[inline]
    pub(crate) fn next(&self) -> Option<usize> {
        self.next
    }

    #[inline]
    pub(crate) fn prev(&self) -> Option<usize> {
        self.prev
    }

    #[inline]
    pub(crate) fn set_next(&mut self, next: Option<usize>) {
        self.next = next;
    }

    #[inline]
    pub(crate) fn set_prev(&mut self, prev: Option<usize>) {
        self.prev = prev;
    }

    #[inline]
    pub(crate) fn into_element(self) -> T {
        self.element
    }
}
