//! Singly linked list used as the bucket of a [`ChainingMap`](crate::ChainingMap)

use std::fmt;

/// Link to the next node in a chain
type Link<V> = Option<Box<Node<V>>>;

/// A key-value pair linked into a chain
#[derive(Debug, Clone)]
struct Node<V> {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: V,
    /// Next node in insertion order
    next: Link<V>,
}

/// An insertion-ordered singly linked list of key-value pairs.
#[derive(Debug, Clone)]
pub struct Chain<V> {
    /// First node of the chain
    head: Link<V>,
    /// Number of nodes in the chain
    len: usize,
}

impl<V> Default for Chain<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Chain<V> {
    /// Creates an empty chain
    #[must_use]
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Appends a key-value pair at the tail. Does not check for an existing key.
    pub fn push_back(&mut self, key: String, value: V) {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node { key, value, next: None }));
        self.len = self.len.saturating_add(1);
    }

    /// Unlinks the first node holding `key` and returns its value
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let mut cursor = &mut self.head;
        while cursor.as_ref().is_some_and(|node| node.key != key) {
            cursor = &mut cursor.as_mut()?.next;
        }
        let Node { value, next, .. } = *cursor.take()?;
        *cursor = next;
        self.len = self.len.saturating_sub(1);
        Some(value)
    }

    /// Returns the value stored under `key`, if the chain holds it
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&V> {
        self.iter().find(|&(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value stored under `key`
    pub fn find_mut(&mut self, key: &str) -> Option<&mut V> {
        let mut cursor = self.head.as_deref_mut();
        while let Some(node) = cursor {
            if node.key == key {
                return Some(&mut node.value);
            }
            cursor = node.next.as_deref_mut();
        }
        None
    }

    /// Returns the number of nodes in the chain
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the chain has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns an iterator over the key-value pairs in insertion order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { next: self.head.as_deref() }
    }
}

impl<V> Drop for Chain<V> {
    fn drop(&mut self) {
        // Unlink iteratively so a long chain can't overflow the stack
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl<'a, V> IntoIterator for &'a Chain<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V> IntoIterator for Chain<V> {
    type Item = (String, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { chain: self }
    }
}

impl<V: fmt::Debug> fmt::Display for Chain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SLL [")?;
        for (position, (key, value)) in self.iter().enumerate() {
            if position > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "({key:?}: {value:?})")?;
        }
        write!(f, "]")
    }
}

/// Borrowing iterator over a [`Chain`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Node to yield next
    next: Option<&'a Node<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some((node.key.as_str(), &node.value))
    }
}

/// Consuming iterator over a [`Chain`], yielding owned pairs in insertion order
#[derive(Debug)]
pub struct IntoIter<V> {
    /// Remaining nodes
    chain: Chain<V>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.chain.head.take()?;
        let Node { key, value, next } = *node;
        self.chain.head = next;
        self.chain.len = self.chain.len.saturating_sub(1);
        Some((key, value))
    }
}
