use std::cmp::Ordering;

use crate::tree::{NodeId, NodeKind};

/// Something to take out of a [`Children`] collection.
pub enum Removal<'a> {
    /// The first occurrence of this id, if present.
    Node(NodeId),
    /// Every element the predicate accepts.
    Matching(&'a dyn Fn(NodeId) -> bool),
}

/// What [`Children::sort`] needs to know about an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortEntry<'a> {
    pub kind: NodeKind,
    pub name: &'a str,
}

/// Ordered child list of a folder. The order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Children {
    ids: Vec<NodeId>,
}

impl Children {
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.ids.iter().copied()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: impl Into<NodeId>) -> bool {
        self.ids.contains(&id.into())
    }

    pub fn first(&self) -> Option<NodeId> {
        self.ids.first().copied()
    }

    pub fn position(&self, id: impl Into<NodeId>) -> Option<usize> {
        let id = id.into();
        self.ids.iter().position(|&c| c == id)
    }

    pub(crate) fn push(&mut self, id: NodeId) {
        self.ids.push(id);
    }

    /// Removes every target and returns the removed ids in removal order.
    ///
    /// Predicate matches are collected before anything is removed, so
    /// removing one element never causes the next match to be skipped.
    pub fn remove<'a>(&mut self, targets: impl IntoIterator<Item = Removal<'a>>) -> Vec<NodeId> {
        let mut removed = Vec::new();
        for target in targets {
            match target {
                Removal::Node(id) => {
                    if let Some(index) = self.position(id) {
                        removed.push(self.ids.remove(index));
                    }
                }
                Removal::Matching(predicate) => {
                    let matches: Vec<NodeId> =
                        self.ids.iter().copied().filter(|&id| predicate(id)).collect();
                    removed.extend(self.remove(matches.into_iter().map(Removal::Node)));
                }
            }
        }
        removed
    }

    /// Transformed values of the elements accepted by `predicate`.
    pub fn map_where<T>(
        &self,
        predicate: impl Fn(NodeId) -> bool,
        transform: impl FnMut(NodeId) -> T,
    ) -> Vec<T> {
        self.iter().filter(|&id| predicate(id)).map(transform).collect()
    }

    /// Puts folders before files, then orders names within each kind.
    ///
    /// Elements `lookup` cannot resolve keep their relative order at the end.
    pub fn sort<'a>(&mut self, lookup: impl Fn(NodeId) -> Option<SortEntry<'a>>) -> &mut Self {
        let mut keyed: Vec<(Option<SortEntry<'a>>, NodeId)> =
            self.ids.iter().map(|&id| (lookup(id), id)).collect();
        keyed.sort_by(|(a, _), (b, _)| match (a, b) {
            (Some(a), Some(b)) => compare_entries(a, b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        self.ids = keyed.into_iter().map(|(_, id)| id).collect();
        self
    }
}

impl FromIterator<NodeId> for Children {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Children {
    type Item = NodeId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter().copied()
    }
}

fn compare_entries(a: &SortEntry<'_>, b: &SortEntry<'_>) -> Ordering {
    match (a.kind, b.kind) {
        (NodeKind::Folder, NodeKind::File) => Ordering::Less,
        (NodeKind::File, NodeKind::Folder) => Ordering::Greater,
        _ => compare_names(a.name, b.name),
    }
}

/// Case-insensitive ordering with lowercase sorting before uppercase on ties,
/// the way explorer UIs collate names.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn ids(raw: &[usize]) -> Children {
        raw.iter().map(|&i| NodeId::new(i)).collect()
    }

    fn raw(children: &Children) -> Vec<usize> {
        children.iter().map(NodeId::index).collect()
    }

    #[test]
    fn test_remove_by_identity_first_match_only() {
        let mut children = ids(&[1, 2, 1, 3]);

        let removed = children.remove([Removal::Node(NodeId::new(1))]);

        assert_eq!(removed, vec![NodeId::new(1)]);
        assert_eq!(raw(&children), vec![2, 1, 3]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut children = ids(&[1, 2]);
        assert!(children.remove([Removal::Node(NodeId::new(9))]).is_empty());
        assert_eq!(raw(&children), vec![1, 2]);
    }

    #[test]
    fn test_remove_matching_removes_adjacent_matches() {
        let mut children = ids(&[2, 4, 6, 7, 8]);
        let even = |id: NodeId| id.index() % 2 == 0;

        let removed = children.remove([Removal::Matching(&even)]);

        assert_eq!(removed.len(), 4);
        assert_eq!(raw(&children), vec![7]);
    }

    #[test]
    fn test_remove_mixed_targets() {
        let mut children = ids(&[1, 2, 3, 10, 11]);
        let big = |id: NodeId| id.index() >= 10;

        children.remove([Removal::Node(NodeId::new(2)), Removal::Matching(&big)]);

        assert_eq!(raw(&children), vec![1, 3]);
    }

    #[test]
    fn test_map_where_does_not_mutate() {
        let children = ids(&[1, 2, 3, 4]);

        let doubled = children.map_where(|id| id.index() > 2, |id| id.index() * 2);

        assert_eq!(doubled, vec![6, 8]);
        assert_eq!(children.len(), 4);
    }

    #[test]
    fn test_sort_folders_first_then_names() {
        let entries = [
            (NodeKind::File, "b.ts"),
            (NodeKind::Folder, "src"),
            (NodeKind::File, "A.md"),
            (NodeKind::Folder, "docs"),
        ];
        let mut children = ids(&[0, 1, 2, 3]);

        children.sort(|id| {
            entries
                .get(id.index())
                .map(|&(kind, name)| SortEntry { kind, name })
        });

        assert_eq!(raw(&children), vec![3, 1, 2, 0]);
    }

    #[test]
    fn test_sort_is_stable_and_unknown_last() {
        let entries = [(NodeKind::File, "same"), (NodeKind::File, "same")];
        let mut children = ids(&[7, 1, 0]);

        children.sort(|id| {
            entries
                .get(id.index())
                .map(|&(kind, name)| SortEntry { kind, name })
        });

        assert_eq!(raw(&children), vec![1, 0, 7]);
    }

    #[rstest]
    #[case("a", "b", Ordering::Less)]
    #[case("B", "a", Ordering::Greater)]
    #[case("a", "A", Ordering::Less)]
    #[case("readme", "README", Ordering::Less)]
    #[case("x.ts", "x.ts", Ordering::Equal)]
    #[case("file10", "file2", Ordering::Less)]
    fn test_compare_names(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(compare_names(a, b), expected);
    }
}
