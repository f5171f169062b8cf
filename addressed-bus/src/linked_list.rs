//! Doubly linked FIFO storage for [`Queue`](crate::queue::Queue).
//!
//! Nodes live in a slot arena and refer to their neighbours by index, so the
//! list owns every item outright and no node is ever aliased from outside.
//! Slots freed by [`LinkedList::pop_front`] are reused by later pushes.

use crate::error::EmptyCollectionError;

struct Node<T> {
    data: T,
    prev: Option<usize>,
    next: Option<usize>,
}

pub struct LinkedList<T> {
    slots: Vec<Option<Node<T>>>,
    vacant: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Appends `data` after the current tail.
    pub fn push_back(&mut self, data: T) {
        let node = Node {
            data,
            prev: self.tail,
            next: None,
        };
        let index = self.allocate(node);

        match self.tail {
            Some(tail) => self.node_mut(tail).next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;
    }

    /// Removes and returns the item at the head of the list.
    pub fn pop_front(&mut self) -> Result<T, EmptyCollectionError> {
        let index = self.head.ok_or(EmptyCollectionError)?;
        let Some(node) = self.slots[index].take() else {
            unreachable!("list head points at a vacant slot");
        };
        self.vacant.push(index);

        match node.next {
            Some(next) => {
                self.node_mut(next).prev = None;
                self.head = Some(next);
            }
            None => {
                self.head = None;
                self.tail = None;
            }
        }
        self.len -= 1;

        Ok(node.data)
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn front(&self) -> Option<&T> {
        self.head.map(|index| &self.node(index).data)
    }

    /// Iterates from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn allocate(&mut self, node: Node<T>) -> usize {
        match self.vacant.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                index
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    fn node(&self, index: usize) -> &Node<T> {
        match &self.slots[index] {
            Some(node) => node,
            None => unreachable!("link points at a vacant slot"),
        }
    }

    fn node_mut(&mut self, index: usize) -> &mut Node<T> {
        match &mut self.slots[index] {
            Some(node) => node,
            None => unreachable!("link points at a vacant slot"),
        }
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    cursor: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?);
        self.cursor = node.next;
        Some(&node.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl<T> LinkedList<T> {
        /// Walks the chain both ways and checks it describes the same items.
        fn assert_consistent(&self) {
            assert_eq!(self.head.is_none(), self.tail.is_none());
            assert_eq!(self.head.is_none(), self.len == 0);

            let mut forward = Vec::new();
            let mut cursor = self.head;
            let mut prev = None;
            while let Some(index) = cursor {
                let node = self.node(index);
                assert_eq!(node.prev, prev, "prev link of slot {index}");
                forward.push(index);
                prev = Some(index);
                cursor = node.next;
            }
            assert_eq!(prev, self.tail);

            let mut backward = Vec::new();
            let mut cursor = self.tail;
            while let Some(index) = cursor {
                backward.push(index);
                cursor = self.node(index).prev;
            }
            backward.reverse();

            assert_eq!(forward, backward);
            assert_eq!(forward.len(), self.len);
        }
    }

    #[test]
    fn pops_in_push_order_then_fails() {
        let mut list = LinkedList::new();
        list.push_back('a');
        list.push_back('b');
        list.push_back('c');
        list.assert_consistent();

        assert_eq!(list.pop_front(), Ok('a'));
        assert_eq!(list.pop_front(), Ok('b'));
        assert_eq!(list.pop_front(), Ok('c'));
        assert_eq!(list.pop_front(), Err(EmptyCollectionError));
        list.assert_consistent();
    }

    #[test]
    fn new_list_is_empty() {
        let mut list: LinkedList<u8> = LinkedList::default();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.front(), None);
        assert_eq!(list.pop_front(), Err(EmptyCollectionError));
        list.assert_consistent();
    }

    #[test]
    fn single_item_sets_head_and_tail() {
        let mut list = LinkedList::new();
        list.push_back(7);
        assert!(!list.is_empty());
        assert_eq!(list.front(), Some(&7));
        list.assert_consistent();

        assert_eq!(list.pop_front(), Ok(7));
        assert!(list.is_empty());
        list.assert_consistent();
    }

    #[test]
    fn interleaved_pushes_and_pops_stay_linked() {
        let mut list = LinkedList::new();
        let mut expected = std::collections::VecDeque::new();

        for round in 0..50u32 {
            for i in 0..(round % 4 + 1) {
                list.push_back(round * 10 + i);
                expected.push_back(round * 10 + i);
            }
            for _ in 0..(round % 3) {
                assert_eq!(list.pop_front().ok(), expected.pop_front());
            }
            list.assert_consistent();
            assert_eq!(list.iter().copied().collect::<Vec<_>>(), Vec::from(expected.clone()));
        }
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut list = LinkedList::new();
        for i in 0..4 {
            list.push_back(i);
        }
        for _ in 0..4 {
            list.pop_front().expect("item present");
        }
        for i in 0..4 {
            list.push_back(i);
        }
        assert_eq!(list.slots.len(), 4);
        list.assert_consistent();
    }
}
