//! Property tables: named, arity-n partial functions over ids.
//!
//! A property pairs a nested map of explicit values with a rule chain;
//! the map side lives here. Lookup walks the map first, and only when
//! no explicit value is stored do the rule methods fire, so data always
//! overrides rule defaults. `set` is a whole-tuple upsert.

use fathom_foundation::Value;

/// One level of a nested property table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    /// An explicit value stored at this key path.
    Leaf(Value),
    /// Further keys below this one.
    Branch(im::HashMap<Value, Node>),
}

/// The nested map backing one property.
///
/// Keys at every level are [`Value`]s (in practice almost always ids);
/// a lookup is O(arity).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyTable {
    root: im::HashMap<Value, Node>,
}

impl PropertyTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Looks up an explicit value for the argument tuple.
    #[must_use]
    pub fn get(&self, args: &[Value]) -> Option<&Value> {
        let (first, rest) = args.split_first()?;
        let mut node = self.root.get(first)?;
        for key in rest {
            match node {
                Node::Branch(children) => node = children.get(key)?,
                Node::Leaf(_) => return None,
            }
        }
        match node {
            Node::Leaf(value) => Some(value),
            Node::Branch(_) => None,
        }
    }

    /// Whole-tuple upsert.
    ///
    /// Writing with an empty argument tuple is a no-op; a tuple that
    /// extends or shortens an existing path replaces what was there.
    pub fn set(&mut self, args: &[Value], value: Value) {
        if args.is_empty() {
            return;
        }
        insert(&mut self.root, args, value);
    }

    /// Removes the explicit value for the argument tuple, if any.
    pub fn unset(&mut self, args: &[Value]) {
        let Some((first, rest)) = args.split_first() else {
            return;
        };
        remove(&mut self.root, first, rest);
    }
}

fn insert(level: &mut im::HashMap<Value, Node>, args: &[Value], value: Value) {
    let (first, rest) = args.split_first().expect("insert needs at least one key");
    if rest.is_empty() {
        level.insert(first.clone(), Node::Leaf(value));
        return;
    }
    let entry = level
        .entry(first.clone())
        .or_insert(Node::Branch(im::HashMap::new()));
    if let Node::Leaf(_) = entry {
        // A shorter tuple was stored here; the deeper write wins.
        *entry = Node::Branch(im::HashMap::new());
    }
    if let Node::Branch(children) = entry {
        insert(children, rest, value);
    }
}

fn remove(level: &mut im::HashMap<Value, Node>, key: &Value, rest: &[Value]) {
    match rest.split_first() {
        None => {
            if matches!(level.get(key), Some(Node::Leaf(_))) {
                level.remove(key);
            }
        }
        Some((next, tail)) => {
            let mut emptied = false;
            if let Some(Node::Branch(children)) = level.get_mut(key) {
                remove(children, next, tail);
                emptied = children.is_empty();
            }
            if emptied {
                level.remove(key);
            }
        }
    }
}
