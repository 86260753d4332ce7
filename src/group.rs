//! Fixed-size member groups with a shared visibility gate.

/// An ownership container for scene members (confetti, hearts).
///
/// The member count is fixed when the group is built; there is no way to add
/// or remove members afterwards. A single `visible` flag gates both drawing
/// and per-frame updates for the whole group.
#[derive(Debug, Clone)]
pub struct Group<T> {
    members: Box<[T]>,
    visible: bool,
}

impl<T> Group<T> {
    /// Build a hidden group of `count` members, calling `make(index)` for each.
    pub fn from_fn(count: usize, make: impl FnMut(usize) -> T) -> Self {
        Self {
            members: (0..count).map(make).collect(),
            visible: false,
        }
    }

    /// Number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether the group is currently shown.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the whole group.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// All members, in creation order.
    #[inline]
    pub fn members(&self) -> &[T] {
        &self.members
    }

    /// Mutable access to the members. The slice length cannot change.
    #[inline]
    pub fn members_mut(&mut self) -> &mut [T] {
        &mut self.members
    }

    /// Run `f` on every member, but only while the group is visible.
    ///
    /// Returns whether anything ran.
    pub fn for_each_visible(&mut self, mut f: impl FnMut(&mut T)) -> bool {
        if !self.visible {
            return false;
        }
        self.members.iter_mut().for_each(|m| f(m));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_starts_hidden() {
        let group = Group::from_fn(3, |i| i);
        assert_eq!(group.len(), 3);
        assert!(!group.is_visible());
        assert_eq!(group.members(), &[0, 1, 2]);
    }

    #[test]
    fn test_hidden_group_skips_updates() {
        let mut group = Group::from_fn(4, |_| 0u32);
        assert!(!group.for_each_visible(|m| *m += 1));
        assert!(group.members().iter().all(|&m| m == 0));

        group.set_visible(true);
        assert!(group.for_each_visible(|m| *m += 1));
        assert!(group.members().iter().all(|&m| m == 1));
    }

    #[test]
    fn test_empty_group() {
        let group: Group<u8> = Group::from_fn(0, |_| 0);
        assert!(group.is_empty());
    }
}
