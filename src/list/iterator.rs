use crate::list::node::Node;
use crate::list::List;
use slab::Slab;
use std::fmt;
use std::iter::{FromIterator, FusedIterator};

/// An iterator over the elements of a `List`.
///
/// It walks the links from both ends towards each other, stopping once it
/// has yielded as many elements as the list held.
///
/// The list is borrowed immutably for the lifetime of the iterator.
///
/// # Examples
///
/// ```compile_fail
/// use cursor_list::List;
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut iter = list.iter();
///
/// // Won't compile, because list is already borrowed immutably.
/// list.add(4);
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    list: &'a List<T>,
    front: Option<usize>,
    back: Option<usize>,
    len: usize,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self {
            list,
            front: list.head_key(),
            back: list.tail_key(),
            len: list.len(),
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            front: self.front,
            back: self.back,
            len: self.len,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.list.node(self.front?);
        self.front = node.next();
        self.len -= 1;
        Some(node.element())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.list.node(self.back?);
        self.back = node.prev();
        self.len -= 1;
        Some(node.element())
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// A mutable iterator over the elements of a `List`.
///
/// The arena hands out the mutable node references in storage order, so
/// they are parked in a table by key first and then taken out following
/// the links.
///
/// # Complexity
///
/// Creating an `IterMut` allocates a table sized by the highest occupied
/// arena key, which can exceed the length of a list that grew and then
/// shrank. Each step after that is *O*(1).
///
/// # Examples
///
/// `List` is not readable after an `IterMut` is created.
/// ```compile_fail
/// use cursor_list::List;
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut iter = list.iter_mut();
/// println!("{:?}", list.last());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T: 'a> {
    slots: Vec<Option<&'a mut Node<T>>>,
    front: Option<usize>,
    back: Option<usize>,
    len: usize,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(
        nodes: &'a mut Slab<Node<T>>,
        front: Option<usize>,
        back: Option<usize>,
        len: usize,
    ) -> Self {
        let mut slots: Vec<Option<&'a mut Node<T>>> = Vec::new();
        for (key, node) in nodes.iter_mut() {
            if slots.len() <= key {
                slots.resize_with(key + 1, || None);
            }
            slots[key] = Some(node);
        }
        Self {
            slots,
            front,
            back,
            len,
        }
    }

    fn take(&mut self, key: Option<usize>) -> Option<&'a mut Node<T>> {
        self.slots.get_mut(key?)?.take()
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("len", &self.len).finish()
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.take(self.front)?;
        self.front = node.next();
        self.len -= 1;
        Some(node.element_mut())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.take(self.back)?;
        self.back = node.prev();
        self.len -= 1;
        Some(node.element_mut())
    }
}

impl<'a, T: 'a> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

/// An owning iterator over the elements of a `List`.
///
/// This `struct` is created by the [`into_iter`] method on [`List`]
/// (provided by the `IntoIterator` trait). See its documentation for more.
///
/// [`into_iter`]: List::into_iter
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("list", &self.list)
            .finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.remove_first().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.list.len();
        (len, Some(len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.remove_last().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| self.add_to_rear(item));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use crate::List;
    use std::iter::FromIterator;

    /// A list whose arena keys no longer follow list order: built from
    /// `0..len`, then every even element removed and re-added at the front.
    fn scrambled(len: i32) -> (List<i32>, Vec<i32>) {
        let mut list = List::from_iter(0..len);
        let evens: Vec<i32> = (0..len).filter(|e| e % 2 == 0).collect();
        for e in &evens {
            list.remove(e).unwrap();
        }
        for &e in &evens {
            list.add_to_front(e);
        }
        let mut expected: Vec<i32> = evens.iter().rev().copied().collect();
        expected.extend((0..len).filter(|e| e % 2 == 1));
        (list, expected)
    }

    #[test]
    fn iter_meets_in_the_middle() {
        for len in 0..7 {
            let (list, expected) = scrambled(len);
            list.assert_links_consistent();
            assert_eq!(list.iter().copied().collect::<Vec<_>>(), expected);
            assert_eq!(
                list.iter().rev().copied().collect::<Vec<_>>(),
                expected.iter().rev().copied().collect::<Vec<_>>()
            );
            for front in 0..=expected.len() {
                let mut iter = list.iter();
                let mut seen = Vec::new();
                for _ in 0..front {
                    seen.push(*iter.next().unwrap());
                }
                let mut back = Vec::new();
                while let Some(e) = iter.next_back() {
                    back.push(*e);
                    assert_eq!(iter.len(), expected.len() - seen.len() - back.len());
                }
                back.reverse();
                seen.extend(back);
                assert_eq!(seen, expected);
                assert_eq!(iter.next(), None);
                assert_eq!(iter.next_back(), None);
            }
        }
    }

    #[test]
    fn iter_mut_meets_in_the_middle() {
        for len in 0..7 {
            let (mut list, expected) = scrambled(len);
            let half = expected.len() / 2;
            let mut iter = list.iter_mut();
            for (i, want) in expected.iter().take(half).enumerate() {
                let e = iter.next().unwrap();
                assert_eq!(*e, *want);
                *e = -(i as i32) - 1;
            }
            for want in expected.iter().skip(half).rev() {
                let e = iter.next_back().unwrap();
                assert_eq!(*e, *want);
                *e += 100;
            }
            assert!(iter.next().is_none());
            assert!(iter.next_back().is_none());

            let rewritten: Vec<i32> = (0..half as i32)
                .map(|i| -i - 1)
                .chain(expected.iter().skip(half).map(|e| e + 100))
                .collect();
            assert_eq!(list.iter().copied().collect::<Vec<_>>(), rewritten);
        }
    }

    #[test]
    fn iter_after_removals_from_both_ends() {
        let mut list = List::from_iter(0..8);
        list.remove_first().unwrap();
        list.remove_last().unwrap();
        list.remove_at(2).unwrap();
        // [1, 2, 4, 5, 6]
        let mut iter = list.iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next_back(), Some(&6));
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next(), Some(&4));
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next_back(), None);
        assert_eq!(format!("{:?}", list.iter()), "Iter([1, 2, 4, 5, 6])");
    }

    #[test]
    fn iter_mut_after_shrinking() {
        // the arena keeps high keys occupied after the list shrinks
        let mut list = List::from_iter(0..64);
        for _ in 0..60 {
            list.remove_first().unwrap();
        }
        for e in &mut list {
            *e -= 60;
        }
        assert_eq!(list.to_string_repr(), "[0, 1, 2, 3]");
        assert_eq!(list.iter_mut().len(), 4);
    }

    #[test]
    fn iter_mut_after_churn() {
        // reused arena slots must still come out in list order
        let mut list = List::from_iter(0..6);
        list.remove_at(1).unwrap();
        list.remove_at(3).unwrap();
        list.add_to_front(10);
        list.add_at(2, 11).unwrap();
        let expected = vec![10, 0, 11, 2, 3, 5];
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), expected);
        for element in list.iter_mut() {
            *element *= 2;
        }
        assert_eq!(
            list.iter().copied().collect::<Vec<_>>(),
            expected.iter().map(|e| e * 2).collect::<Vec<_>>()
        );
        assert_eq!(
            list.iter_mut().rev().map(|e| *e).collect::<Vec<_>>(),
            vec![10, 6, 4, 22, 0, 20]
        );
    }

    #[test]
    fn into_iter_both_ends() {
        let list = List::from_iter(['a', 'b', 'c', 'd']);
        let mut iter = list.into_iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some('a'));
        assert_eq!(iter.next_back(), Some('d'));
        assert_eq!(iter.next(), Some('b'));
        assert_eq!(iter.next_back(), Some('c'));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn extend_by_reference() {
        let mut list = List::from_iter([1, 2]);
        list.extend(&[3, 4]);
        let values = [5];
        list.extend(values.iter());
        assert_eq!(list.to_string_repr(), "[1, 2, 3, 4, 5]");
        assert_eq!((&list).into_iter().count(), 5);
    }
}
