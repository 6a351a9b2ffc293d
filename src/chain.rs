use crate::boxentry;

/// One collision chain: a singly-linked list of entries that hashed to the
/// same slot. New entries go in at the head, so the most recent insertion
/// for a slot is found first.
pub struct Chain<V> {
    head: Option<Box<Entry<V>>>,
    len: usize,
}

pub struct Entry<V> {
    pub(crate) key: String,
    pub(crate) value: V,
    pub(crate) next: Option<Box<Entry<V>>>,
}

impl<V> Chain<V> {
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push<S: Into<String>>(&mut self, key: S, value: V) {
        self.push_boxed(boxentry!(key, value));
    }

    pub(crate) fn push_boxed(&mut self, mut boxed: Box<Entry<V>>) {
        boxed.next = self.head.take();
        self.head = Some(boxed);
        self.len += 1;
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Entry<V>> {
        let mut entry = self.head.take()?;
        self.head = entry.next.take();
        self.len -= 1;
        Some(*entry)
    }

    /// Returns the entry stored under `key`, if any.
    pub fn find(&self, key: &str) -> Option<&Entry<V>> {
        self.iter().find(|e| e.key == key)
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut Entry<V>> {
        let mut cur = self.head.as_deref_mut();
        while let Some(entry) = cur {
            if entry.key == key {
                return Some(entry);
            }
            cur = entry.next.as_deref_mut();
        }
        None
    }

    /// Unlinks the entry stored under `key` and returns its value, or `None`
    /// if no entry matches. Ownership of the removed entry's successor moves
    /// to its predecessor (or to the head link).
    pub fn remove(&mut self, key: &str) -> Option<V> {
        // Head match: re-point the head at the second entry.
        if self.head.as_ref().is_some_and(|e| e.key == key) {
            let mut removed = self.head.take()?;
            self.head = removed.next.take();
            self.len -= 1;
            return Some(removed.value);
        }

        // Otherwise splice out of the middle, looking one entry ahead.
        let mut prev = self.head.as_deref_mut()?;
        loop {
            if prev.next.as_ref().is_some_and(|e| e.key == key) {
                let mut removed = prev.next.take()?;
                prev.next = removed.next.take();
                self.len -= 1;
                return Some(removed.value);
            }
            prev = prev.next.as_deref_mut()?;
        }
    }

    // [adapters]

    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self)
    }
}

impl<V> Default for Chain<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Drop for Chain<V> {
    fn drop(&mut self) {
        let mut curr = self.head.take();
        while let Some(mut entry) = curr {
            curr = entry.next.take();
            // entry goes out of scope here with `next` detached,
            // so dropping a long chain never recurses
        }
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for Chain<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<V> IntoIterator for Chain<V> {
    type Item = <IterOwn<V> as Iterator>::Item;
    type IntoIter = IterOwn<V>;

    fn into_iter(self) -> Self::IntoIter {
        IterOwn::new(self)
    }
}

impl<V> Entry<V> {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }
}

impl<V: PartialEq> PartialEq for Entry<V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}
impl<V: Eq> Eq for Entry<V> {}

impl<V: std::fmt::Debug> std::fmt::Debug for Entry<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}, {:?}>", self.key, self.value)
    }
}

// [iterators]

pub struct Iter<'a, V> {
    current: Option<&'a Entry<V>>,
    len: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Entry<V>;
    fn next(&mut self) -> Option<Self::Item> {
        match self.current.take() {
            None => None,
            Some(entry) => {
                self.current = entry.next.as_deref();
                Some(entry)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, V> Iter<'a, V> {
    pub fn new(chain: &'a Chain<V>) -> Self {
        Self {
            current: chain.head.as_deref(),
            len: chain.len,
        }
    }
}

pub struct IterOwn<V>(Chain<V>);

impl<V> Iterator for IterOwn<V> {
    type Item = Entry<V>;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<V> IterOwn<V> {
    pub fn new(chain: Chain<V>) -> Self {
        Self(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::Chain;
    use crate::entry;

    #[test]
    fn push() {
        let mut chain = Chain::new();

        for i in 0..10 {
            let k = format!("key{i}");
            let v = format!("value{i}");
            chain.push(k, v);
        }

        assert_eq!(10, chain.len());
    }

    #[test]
    fn pop() {
        let mut chain = Chain::new();

        // Check empty chain behaves right
        assert!(chain.pop().is_none());

        chain.push("k1", 1);
        chain.push("k2", 2);
        chain.push("k3", 3);

        // Head-first order
        let p = chain.pop().unwrap();
        assert_eq!(p.key, "k3");
        assert_eq!(p.value, 3);

        let p = chain.pop().unwrap();
        assert_eq!(p.key, "k2");
        assert_eq!(p.value, 2);

        // Push some more just to make sure nothing's corrupted
        chain.push("k5", 5);

        let p = chain.pop().unwrap();
        assert_eq!(p.key, "k5");
        assert_eq!(p.value, 5);

        // Check exhaustion
        let p = chain.pop().unwrap();
        assert_eq!(p.key, "k1");
        assert_eq!(p.value, 1);
        assert!(chain.pop().is_none());
    }

    #[test]
    fn find() {
        let mut chain = Chain::new();
        assert!(chain.find("k1").is_none());

        chain.push("k1", "v1");
        chain.push("k2", "v2");
        chain.push("k3", "v3");

        assert_eq!(chain.find("k1"), Some(&entry!("k1", "v1")));
        assert_eq!(chain.find("k3"), Some(&entry!("k3", "v3")));
        assert!(chain.find("nope").is_none());

        chain.find_mut("k2").unwrap().value = "patched";
        assert_eq!(chain.find("k2"), Some(&entry!("k2", "patched")));
    }

    #[test]
    fn remove_head() {
        let mut chain = Chain::new();
        chain.push("k1", 1);
        chain.push("k2", 2);

        // k2 sits at the head
        assert_eq!(chain.remove("k2"), Some(2));
        assert_eq!(chain.len(), 1);
        assert!(chain.find("k2").is_none());
        assert_eq!(chain.find("k1"), Some(&entry!("k1", 1)));
    }

    #[test]
    fn remove_middle_and_tail() {
        let mut chain = Chain::new();
        chain.push("k1", 1);
        chain.push("k2", 2);
        chain.push("k3", 3);

        assert_eq!(chain.remove("k2"), Some(2));
        assert_eq!(chain.len(), 2);
        // predecessor now links straight to the old successor
        let keys: Vec<_> = chain.iter().map(|e| e.key().to_owned()).collect();
        assert_eq!(keys, ["k3", "k1"]);

        assert_eq!(chain.remove("k1"), Some(1));
        assert_eq!(chain.remove("k3"), Some(3));
        assert!(chain.is_empty());
    }

    #[test]
    fn remove_missing() {
        let mut chain = Chain::new();
        assert_eq!(chain.remove("k1"), None);

        chain.push("k1", 1);
        chain.push("k2", 2);
        assert_eq!(chain.remove("nope"), None);
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn iter() {
        let mut chain = Chain::new();

        for i in 0..10 {
            let k = format!("key{i}");
            let v = format!("value{i}");
            chain.push(k, v);
        }

        for (i, e) in chain.iter().enumerate() {
            let k = format!("key{}", 10 - (i + 1));
            let v = format!("value{}", 10 - (i + 1));
            assert_eq!(e, &entry!(k, v));
        }

        assert_eq!(chain.len(), 10);

        for (i, e) in chain.into_iter().enumerate() {
            let k = format!("key{}", 10 - (i + 1));
            let v = format!("value{}", 10 - (i + 1));
            assert_eq!(e, entry!(k, v));
        }
    }

    #[test]
    fn drop_long_chain() {
        let mut chain = Chain::new();
        for i in 0..200_000 {
            chain.push(format!("{i}"), i);
        }
        // iterative Drop: must not blow the stack
        drop(chain);
    }
}
