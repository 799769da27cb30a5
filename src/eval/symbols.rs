//! The symbol table: names bound to syntax trees.
//!
//! This is a chained hash table with a fixed number of buckets.
//! Each bucket is a doubly-linked chain of entries, newest first;
//! entries live in a slab and link to each other by index.
//!
//! Inserting a name that's already bound shadows the old binding
//! rather than replacing it. Removing the name unlinks the newest binding,
//! and the shadowed one is visible again.
//!
//! Names are interned, so comparing keys along a chain is an integer compare.
//! Interned names are never released: removing a binding leaves its name in
//! the interner, and binding it again reuses the same key. The interner grows
//! with the number of distinct names ever bound, not with live bindings.

use string_interner::{DefaultStringInterner, DefaultSymbol};

use crate::data::Node;

pub const DEFAULT_BUCKETS: usize = 0x100;

/// The requested name has no binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndefinedSymbol(pub String);

impl std::fmt::Display for UndefinedSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "undefined symbol {:?}", self.0)
    }
}

impl std::error::Error for UndefinedSymbol {}

#[derive(Debug)]
struct Entry {
    key: DefaultSymbol,
    value: Node,
    prev: Option<usize>,
    next: Option<usize>,
}

pub struct SymbolTable {
    names: DefaultStringInterner,
    /// Head of each bucket's chain.
    buckets: Vec<Option<usize>>,
    entries: Vec<Option<Entry>>,
    /// Vacant slots in `entries`.
    free: Vec<usize>,
    len: usize,
}

impl std::fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new(DEFAULT_BUCKETS)
    }
}

/// Multiply-by-31 rolling hash over the bytes of the name.
fn hash(name: &str) -> u32 {
    name.bytes()
        .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(b as u32))
}

impl SymbolTable {
    /// Create a table with the given number of buckets (at least one).
    pub fn new(buckets: usize) -> Self {
        SymbolTable {
            names: DefaultStringInterner::default(),
            buckets: vec![None; buckets.max(1)],
            entries: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    fn bucket(&self, name: &str) -> usize {
        hash(name) as usize % self.buckets.len()
    }

    fn entry(&self, idx: usize) -> &Entry {
        self.entries[idx]
            .as_ref()
            .expect("chains only link to occupied entries")
    }

    fn entry_mut(&mut self, idx: usize) -> &mut Entry {
        self.entries[idx]
            .as_mut()
            .expect("chains only link to occupied entries")
    }

    /// Find the newest entry for the name.
    fn find(&self, name: &str) -> Option<usize> {
        let key = self.names.get(name)?;
        let mut cursor = self.buckets[self.bucket(name)];
        while let Some(idx) = cursor {
            let entry = self.entry(idx);
            if entry.key == key {
                return Some(idx);
            }
            cursor = entry.next;
        }
        None
    }

    /// Bind the name to the tree. The table takes ownership of the tree.
    ///
    /// An existing binding of the same name is shadowed, not dropped.
    pub fn insert(&mut self, name: &str, value: Node) {
        let key = self.names.get_or_intern(name);
        let bucket = self.bucket(name);
        let head = self.buckets[bucket];
        let entry = Entry {
            key,
            value,
            prev: None,
            next: head,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.entries[idx] = Some(entry);
                idx
            }
            None => {
                self.entries.push(Some(entry));
                self.entries.len() - 1
            }
        };
        if let Some(head) = head {
            self.entry_mut(head).prev = Some(idx);
        }
        self.buckets[bucket] = Some(idx);
        self.len += 1;
        tracing::trace!(name, bucket, "bound symbol");
    }

    /// The tree most recently bound to the name.
    pub fn lookup(&self, name: &str) -> Result<&Node, UndefinedSymbol> {
        self.find(name)
            .map(|idx| &self.entry(idx).value)
            .ok_or_else(|| UndefinedSymbol(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Unbind the most recent binding of the name, and return its tree.
    pub fn remove(&mut self, name: &str) -> Result<Node, UndefinedSymbol> {
        let idx = self
            .find(name)
            .ok_or_else(|| UndefinedSymbol(name.to_owned()))?;
        let bucket = self.bucket(name);
        let entry = self.entries[idx]
            .take()
            .expect("find only returns occupied entries");
        match entry.prev {
            Some(prev) => self.entry_mut(prev).next = entry.next,
            None => self.buckets[bucket] = entry.next,
        }
        if let Some(next) = entry.next {
            self.entry_mut(next).prev = entry.prev;
        }
        self.free.push(idx);
        self.len -= 1;
        tracing::trace!(name, bucket, "unbound symbol");
        Ok(entry.value)
    }

    /// Number of bindings, including shadowed ones.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All bindings, in bucket order; newest first within a bucket.
    pub fn iter(&self) -> impl '_ + Iterator<Item = (&str, &Node)> {
        self.buckets.iter().flat_map(move |head| {
            let mut cursor = *head;
            std::iter::from_fn(move || {
                let entry = self.entry(cursor?);
                cursor = entry.next;
                let name = self
                    .names
                    .resolve(entry.key)
                    .expect("keys are interned on insert");
                Some((name, &entry.value))
            })
        })
    }
}
