use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::models::{PreSession, Trade};

/// Anything that can sit in a two-level parent/child table: trades with
/// subtrades, pre-sessions with subsessions.
pub trait HasParent {
    fn id(&self) -> &str;
    fn parent_id(&self) -> Option<&str>;
}

impl HasParent for Trade {
    fn id(&self) -> &str {
        &self.id
    }
    fn parent_id(&self) -> Option<&str> {
        self.parent_trade_id.as_deref()
    }
}

impl HasParent for PreSession {
    fn id(&self) -> &str {
        &self.id
    }
    fn parent_id(&self) -> Option<&str> {
        self.parent_session_id.as_deref()
    }
}

/// Flatten a list of records into display order: parents sorted by the
/// comparator, each expanded parent immediately followed by its children in
/// the same order. Collapsed parents contribute no children; children whose
/// parent is gone are dropped.
///
/// Stateless — the expanded set is the caller's to keep. Every parent starts
/// life collapsed.
pub fn display_order<'a, T, F>(
    items: &'a [T],
    cmp: F,
    expanded: &HashSet<String>,
) -> Vec<&'a T>
where
    T: HasParent,
    F: Fn(&T, &T) -> Ordering,
{
    let mut parents: Vec<&T> = Vec::new();
    let mut children: HashMap<&str, Vec<&T>> = HashMap::new();

    for item in items {
        match item.parent_id() {
            Some(parent_id) => children.entry(parent_id).or_default().push(item),
            None => parents.push(item),
        }
    }

    parents.sort_by(|a, b| cmp(a, b));

    let mut ordered = Vec::with_capacity(items.len());
    for parent in parents {
        ordered.push(parent);
        if !expanded.contains(parent.id()) {
            continue;
        }
        if let Some(mut kids) = children.remove(parent.id()) {
            kids.sort_by(|a, b| cmp(a, b));
            ordered.extend(kids);
        }
    }

    ordered
}
