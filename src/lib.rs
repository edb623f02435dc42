//! This crate provides an index-addressable, doubly-linked list with
//! bidirectional cursors that can edit the list as they walk, and that fail
//! fast when the list changes behind their back.
//!
//! The [`List`] adds and removes elements at both ends in constant time, and
//! anywhere else in constant time once a [`Cursor`] stands there. Reaching a
//! position by index or by value takes *O*(*n*) time.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use cursor_list::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3, 4]);
//!
//! let mut cursor = list.cursor();
//! cursor.add(&mut list, 0).unwrap(); // insert 0 at the beginning of the list
//! assert_eq!(cursor.next(&list), Ok(&1));
//! assert_eq!(list, List::from_iter([0, 1, 2, 3, 4]));
//!
//! let mut cursor = list.cursor_at(3).unwrap(); // stand before position 3 and remove it
//! assert_eq!(cursor.next(&list), Ok(&3));
//! assert_eq!(cursor.remove(&mut list), Ok(3));
//! assert_eq!(list.to_string_repr(), "[0, 1, 2, 4]");
//!
//! list.add_to_front(5); // direct changes are allowed at any time...
//! assert!(cursor.next(&list).is_err()); // ...but make older cursors stale
//! ```
//!
//! # Memory Layout
//!
//! The nodes live in an arena (a [`slab::Slab`]) owned by the list, and link
//! to each other by arena key:
//! ```text
//!                ╔═══════════╗           ╔═══════════╗           ╔═══════════╗
//!     None ←──── ║   prev    ║ ←──────── ║   prev    ║ ←──────── ║   prev    ║
//!                ╟───────────╢           ╟───────────╢           ╟───────────╢
//!                ║   next    ║ ────────→ ║   next    ║ ────────→ ║   next    ║ ────→ None
//!                ╟───────────╢           ╟───────────╢           ╟───────────╢
//!                ║ element T ║           ║ element T ║           ║ element T ║
//!                ╚═══════════╝           ╚═══════════╝           ╚═══════════╝
//!                   Node 0                  Node 1                  Node 2
//!                     ↑                                               ↑
//!  ╔═══════════╗      │                                               │
//!  ║   head    ║ ─────┘                                               │
//!  ╟───────────╢                                                      │
//!  ║   tail    ║ ─────────────────────────────────────────────────────┘
//!  ╟───────────╢
//!  ║ mod_count ║
//!  ╚═══════════╝
//!      List
//! ```
//! No node owns another one, so dropping the list drops the arena and every
//! element in it, with no reference cycles to break.
//!
//! In convention, in a list with length *n*, the nodes are indexed by 0, 1,
//! ..., *n* - 1, and a cursor sits in one of the *n* + 1 gaps around them.
//!
//! # Iteration
//!
//! Iterating over a list is by the [`Iter`] and [`IterMut`] iterators. These
//! are double-ended, exact-size and fused. [`IterMut`] provides mutability of
//! the elements (but not the linked structure of the list).
//!
//! ```
//! use cursor_list::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next_back(), Some(&3));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), None);
//!
//! list.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(list), vec![2, 4, 6]);
//! ```
//!
//! # Cursors
//!
//! A [`Cursor`] is a detached handle: it does not borrow the list, and every
//! call is handed the list instead. That way several cursors and direct calls
//! on the list can be interleaved freely. The list counts its modifications;
//! a cursor remembers the count it last saw, and any call on a cursor whose
//! count is out of date fails with [`ListError::ConcurrentModification`]
//! without touching the list.
//!
//! The cursor edits the list around its gap:
//! - [`add`]: insert before the gap;
//! - [`remove`]: remove the element returned by the latest move;
//! - [`set`]: replace the element returned by the latest move.
//!
//! ```
//! use cursor_list::{List, ListError};
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter(['A', 'B', 'C']);
//! let mut walker = list.cursor();
//! let bystander = list.cursor();
//!
//! while walker.has_next(&list).unwrap() {
//!     if *walker.next(&list).unwrap() == 'B' {
//!         walker.remove(&mut list).unwrap();
//!     }
//! }
//! assert_eq!(list.to_string_repr(), "[A, C]");
//! assert!(matches!(
//!     bystander.has_next(&list),
//!     Err(ListError::ConcurrentModification { .. })
//! ));
//! ```
//!
//! # Generic Code
//!
//! The [`IndexedList`] and [`ListCursor`] traits describe the list and the
//! cursor as capabilities, so that algorithms and test suites can be written
//! once for any implementation.
//!
//! [`add`]: crate::Cursor::add
//! [`remove`]: crate::Cursor::remove
//! [`set`]: crate::Cursor::set

#[doc(inline)]
pub use err::{ListError, Result};
#[doc(inline)]
pub use list::cursor::Cursor;
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::List;
#[doc(inline)]
pub use traits::{IndexedList, ListCursor};

mod err;
pub mod list;
mod traits;
