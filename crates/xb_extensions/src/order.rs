use alloc::collections::BinaryHeap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cmp::Reverse;
use core::fmt;

use xb_utils::hash::HashMap;

use crate::ExtensionError;

// -----------------------------------------------------------------------------
// Orderable

/// An item sorted by [`LoadingOrder::sort`].
pub trait Orderable {
    /// The constraints of this item.
    fn order(&self) -> Result<LoadingOrder, ExtensionError>;

    /// The id other items refer to in `before`/`after` constraints.
    fn order_id(&self) -> Option<&str>;
}

// -----------------------------------------------------------------------------
// LoadingOrder

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
enum Anchor {
    First,
    #[default]
    Any,
    Last,
}

/// Where an item goes relative to its siblings.
///
/// Parsed from a comma-separated list of `first`, `last`, `any`,
/// `before <id>` and `after <id>`; keywords are case-insensitive.
///
/// # Example
///
/// ```
/// use xb_extensions::LoadingOrder;
///
/// let order = LoadingOrder::parse("first, before vcs").unwrap();
/// assert!(order.is_first());
/// assert_eq!(order.before_ids().collect::<Vec<_>>(), ["vcs"]);
/// assert_eq!(order.to_string(), "first, before vcs");
///
/// assert_eq!(LoadingOrder::parse("").unwrap(), LoadingOrder::ANY);
/// assert!(LoadingOrder::parse("first, last").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadingOrder {
    anchor: Anchor,
    before: Vec<String>,
    after: Vec<String>,
}

impl LoadingOrder {
    pub const ANY: Self = Self::anchored(Anchor::Any);
    pub const FIRST: Self = Self::anchored(Anchor::First);
    pub const LAST: Self = Self::anchored(Anchor::Last);

    const fn anchored(anchor: Anchor) -> Self {
        Self {
            anchor,
            before: Vec::new(),
            after: Vec::new(),
        }
    }

    /// Goes before the items with id `id`.
    #[inline]
    pub fn before(id: impl Into<String>) -> Self {
        Self {
            before: alloc::vec![id.into()],
            ..Self::ANY
        }
    }

    /// Goes after the items with id `id`.
    #[inline]
    pub fn after(id: impl Into<String>) -> Self {
        Self {
            after: alloc::vec![id.into()],
            ..Self::ANY
        }
    }

    /// Parses an `order` attribute; `None` means [`ANY`](Self::ANY).
    #[inline]
    pub fn read(text: Option<&str>) -> Result<Self, ExtensionError> {
        text.map_or(Ok(Self::ANY), Self::parse)
    }

    pub fn parse(text: &str) -> Result<Self, ExtensionError> {
        let invalid = || ExtensionError::InvalidOrder(text.to_string());

        let mut order = Self::ANY;
        for token in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let (keyword, id) = match token.split_once(char::is_whitespace) {
                Some((keyword, id)) => (keyword, Some(id.trim())),
                None => (token, None),
            };
            let anchor = match (keyword.to_ascii_lowercase().as_str(), id) {
                ("first", None) => Anchor::First,
                ("last", None) => Anchor::Last,
                ("any", None) => continue,
                ("before", Some(id)) => {
                    order.before.push(id.to_string());
                    continue;
                }
                ("after", Some(id)) => {
                    order.after.push(id.to_string());
                    continue;
                }
                _ => return Err(invalid()),
            };
            if order.anchor != Anchor::Any && order.anchor != anchor {
                return Err(invalid());
            }
            order.anchor = anchor;
        }
        Ok(order)
    }

    #[inline]
    pub fn is_first(&self) -> bool {
        self.anchor == Anchor::First
    }

    #[inline]
    pub fn is_last(&self) -> bool {
        self.anchor == Anchor::Last
    }

    #[inline]
    pub fn before_ids(&self) -> impl Iterator<Item = &str> {
        self.before.iter().map(String::as_str)
    }

    #[inline]
    pub fn after_ids(&self) -> impl Iterator<Item = &str> {
        self.after.iter().map(String::as_str)
    }

    /// Sorts `items` by their loading orders.
    ///
    /// `before`/`after` constraints are always honored; constraints naming an
    /// unknown id are ignored. Among the items free to go next, `first` items
    /// win over the others and `last` items lose, ties keep the input order.
    /// On error `items` is left untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use xb_extensions::{ExtensionError, LoadingOrder, Orderable};
    ///
    /// struct Step(&'static str, &'static str);
    ///
    /// impl Orderable for Step {
    ///     fn order(&self) -> Result<LoadingOrder, ExtensionError> {
    ///         LoadingOrder::parse(self.1)
    ///     }
    ///     fn order_id(&self) -> Option<&str> {
    ///         Some(self.0)
    ///     }
    /// }
    ///
    /// let mut steps = vec![Step("b", "last"), Step("c", "after d"), Step("d", ""), Step("a", "first")];
    /// LoadingOrder::sort(&mut steps).unwrap();
    /// let ids: Vec<_> = steps.iter().map(|s| s.0).collect();
    /// assert_eq!(ids, ["a", "d", "c", "b"]);
    /// ```
    pub fn sort<T: Orderable>(items: &mut Vec<T>) -> Result<(), ExtensionError> {
        let orders = items
            .iter()
            .map(Orderable::order)
            .collect::<Result<Vec<_>, _>>()?;
        let ids: Vec<Option<&str>> = items.iter().map(Orderable::order_id).collect();

        let permutation = sorted_indices(&orders, &ids)?;

        let mut slots: Vec<Option<T>> = core::mem::take(items).into_iter().map(Some).collect();
        items.extend(permutation.into_iter().filter_map(|i| slots[i].take()));
        Ok(())
    }
}

// Kahn's algorithm, picking the ready item with the lowest (anchor, index).
fn sorted_indices(orders: &[LoadingOrder], ids: &[Option<&str>]) -> Result<Vec<usize>, ExtensionError> {
    let len = orders.len();

    let mut by_id: HashMap<&str, Vec<usize>> = HashMap::default();
    for (index, id) in ids.iter().enumerate() {
        if let Some(id) = id {
            by_id.entry(*id).or_default().push(index);
        }
    }

    let mut successors: Vec<Vec<usize>> = alloc::vec![Vec::new(); len];
    let mut in_degree: Vec<usize> = alloc::vec![0; len];
    let mut add_edge = |from: usize, to: usize| {
        if from != to {
            successors[from].push(to);
            in_degree[to] += 1;
        }
    };

    for (index, order) in orders.iter().enumerate() {
        for id in order.before_ids() {
            match by_id.get(id) {
                Some(targets) => targets.iter().for_each(|&t| add_edge(index, t)),
                None => log::trace!("loading order refers to unknown id `{id}`"),
            }
        }
        for id in order.after_ids() {
            match by_id.get(id) {
                Some(targets) => targets.iter().for_each(|&t| add_edge(t, index)),
                None => log::trace!("loading order refers to unknown id `{id}`"),
            }
        }
    }

    let mut ready: BinaryHeap<Reverse<(Anchor, usize)>> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, degree)| **degree == 0)
        .map(|(index, _)| Reverse((orders[index].anchor, index)))
        .collect();

    let mut sorted = Vec::with_capacity(len);
    while let Some(Reverse((_, index))) = ready.pop() {
        sorted.push(index);
        for &next in &successors[index] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                ready.push(Reverse((orders[next].anchor, next)));
            }
        }
    }

    if sorted.len() < len {
        let cycle = (0..len)
            .filter(|index| in_degree[*index] > 0)
            .map(|index| match ids[index] {
                Some(id) => id.to_string(),
                None => alloc::format!("#{index}"),
            })
            .collect();
        return Err(ExtensionError::Cycle(cycle));
    }
    Ok(sorted)
}

impl fmt::Display for LoadingOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        match self.anchor {
            Anchor::First => parts.push("first".into()),
            Anchor::Last => parts.push("last".into()),
            Anchor::Any => {}
        }
        parts.extend(self.before.iter().map(|id| alloc::format!("before {id}")));
        parts.extend(self.after.iter().map(|id| alloc::format!("after {id}")));
        if parts.is_empty() {
            return f.write_str("any");
        }
        f.write_str(&parts.join(", "))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{LoadingOrder, Orderable};
    use crate::ExtensionError;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    struct Item {
        id: Option<&'static str>,
        order: &'static str,
    }

    impl Orderable for Item {
        fn order(&self) -> Result<LoadingOrder, ExtensionError> {
            LoadingOrder::parse(self.order)
        }

        fn order_id(&self) -> Option<&str> {
            self.id
        }
    }

    fn item(id: &'static str, order: &'static str) -> Item {
        Item { id: Some(id), order }
    }

    fn sorted(mut items: Vec<Item>) -> Vec<&'static str> {
        LoadingOrder::sort(&mut items).unwrap();
        items.iter().map(|i| i.id.unwrap_or("?")).collect()
    }

    #[test]
    fn parse_keywords() {
        let order = LoadingOrder::parse(" LAST , after a,before b ").unwrap();
        assert!(order.is_last());
        assert_eq!(order.after_ids().collect::<Vec<_>>(), ["a"]);
        assert_eq!(order.before_ids().collect::<Vec<_>>(), ["b"]);
        assert_eq!(LoadingOrder::parse("any").unwrap(), LoadingOrder::ANY);
        assert_eq!(LoadingOrder::read(None).unwrap(), LoadingOrder::ANY);
        assert_eq!(LoadingOrder::parse("first").unwrap(), LoadingOrder::FIRST);
        assert_eq!(LoadingOrder::before("x"), LoadingOrder::parse("before x").unwrap());
        assert_eq!(LoadingOrder::ANY.to_string(), "any");
    }

    #[test]
    fn parse_rejects_malformed() {
        for text in ["sometime", "before", "after ", "first x", "first, last"] {
            assert_eq!(
                LoadingOrder::parse(text),
                Err(ExtensionError::InvalidOrder(text.to_string())),
                "{text}"
            );
        }
    }

    #[test]
    fn unconstrained_items_keep_input_order() {
        let items = alloc::vec![item("c", ""), item("a", ""), item("b", "any")];
        assert_eq!(sorted(items), ["c", "a", "b"]);
    }

    #[test]
    fn first_and_last() {
        let items = alloc::vec![
            item("a", "last"),
            item("b", ""),
            item("c", "first"),
            item("d", ""),
            item("e", "first"),
        ];
        assert_eq!(sorted(items), ["c", "e", "b", "d", "a"]);
    }

    #[test]
    fn before_and_after() {
        let items = alloc::vec![
            item("a", "after c"),
            item("b", "before a"),
            item("c", ""),
            item("d", "before c, after missing"),
        ];
        assert_eq!(sorted(items), ["b", "d", "c", "a"]);
    }

    #[test]
    fn constraints_override_anchor() {
        let items = alloc::vec![item("a", ""), item("b", "first, after a")];
        assert_eq!(sorted(items), ["a", "b"]);
    }

    #[test]
    fn cycle_is_reported_and_items_kept() {
        let mut items = alloc::vec![
            item("a", "after b"),
            item("b", "after a"),
            item("c", ""),
        ];
        let err = LoadingOrder::sort(&mut items).unwrap_err();
        assert_eq!(err, ExtensionError::Cycle(alloc::vec!["a".into(), "b".into()]));
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].id, Some("a"));
    }

    #[test]
    fn invalid_order_fails_sort() {
        let mut items = alloc::vec![item("a", "soon")];
        assert!(matches!(
            LoadingOrder::sort(&mut items),
            Err(ExtensionError::InvalidOrder(_))
        ));
    }
}
