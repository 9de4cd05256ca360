//! Ordered node selection.

use smallvec::SmallVec;

/// The node indices the user is currently manipulating.
///
/// Insertion-ordered and duplicate-free. Order matters only for rendering
/// (the highlight list is emitted in selection order); edge logic treats the
/// selection as a set. Selections are small in practice, so members live
/// inline until they spill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    nodes: SmallVec<[u16; 8]>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, node: u16) -> bool {
        self.nodes.contains(&node)
    }

    /// Members in insertion order.
    pub fn members(&self) -> &[u16] {
        &self.nodes
    }

    /// Remove the node if present, append it otherwise.
    pub fn toggle(&mut self, node: u16) {
        match self.nodes.iter().position(|&n| n == node) {
            Some(at) => {
                self.nodes.remove(at);
            }
            None => self.nodes.push(node),
        }
    }

    /// Replace the selection with every valid node index `0..count`.
    pub fn select_all(&mut self, count: usize) {
        self.nodes.clear();
        for node in 0..count {
            self.nodes.push(node as u16);
        }
    }

    /// Replace the selection with its complement over `0..count`.
    pub fn invert(&mut self, count: usize) {
        let previous = std::mem::take(&mut self.nodes);
        for node in 0..count {
            let node = node as u16;
            if !previous.contains(&node) {
                self.nodes.push(node);
            }
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_appends_then_removes() {
        let mut sel = SelectionSet::new();
        sel.toggle(3);
        sel.toggle(1);
        assert_eq!(sel.members(), &[3, 1]);

        sel.toggle(3);
        assert_eq!(sel.members(), &[1]);
        assert!(!sel.contains(3));
    }

    #[test]
    fn toggle_never_duplicates() {
        let mut sel = SelectionSet::new();
        for _ in 0..5 {
            sel.toggle(7);
            sel.toggle(7);
            sel.toggle(7);
        }
        assert_eq!(sel.members(), &[7]);
    }

    #[test]
    fn select_all_replaces_existing_selection() {
        let mut sel = SelectionSet::new();
        sel.toggle(9);
        sel.select_all(4);
        assert_eq!(sel.members(), &[0, 1, 2, 3]);
    }

    #[test]
    fn invert_is_complement() {
        let mut sel = SelectionSet::new();
        sel.toggle(0);
        sel.toggle(3);
        sel.invert(5);
        assert_eq!(sel.members(), &[1, 2, 4]);
    }

    #[test]
    fn invert_twice_restores_membership() {
        let mut sel = SelectionSet::new();
        sel.toggle(2);
        sel.toggle(4);
        sel.invert(6);
        sel.invert(6);

        let mut members: Vec<u16> = sel.members().to_vec();
        members.sort_unstable();
        assert_eq!(members, vec![2, 4]);
    }

    #[test]
    fn invert_of_empty_selects_all() {
        let mut sel = SelectionSet::new();
        sel.invert(3);
        assert_eq!(sel.members(), &[0, 1, 2]);
    }

    #[test]
    fn clear_empties() {
        let mut sel = SelectionSet::new();
        sel.select_all(3);
        sel.clear();
        assert!(sel.is_empty());
        assert_eq!(sel.len(), 0);
    }
}
