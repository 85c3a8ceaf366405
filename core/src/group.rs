//! Shared state for mutually-exclusive option groups.
//!
//! A [`SelectionGroup`] backs a family of enum-flavored options that together
//! select one value. Each member option registers with the group at
//! construction time and receives the next index; the group starts out
//! selecting index zero, so the first registered member is the default.
//! Parsing any member's token overwrites the group's selection, which is how
//! later tokens win over earlier ones.
//!
//! # Examples
//!
//! ```
//! use argwire_core::SelectionGroup;
//!
//! let group = SelectionGroup::new("color");
//! assert_eq!(group.selected_index(), 0);
//! assert_eq!(group.member_count(), 0);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Handle to the shared state of one mutually-exclusive option group.
///
/// Cloning the handle is cheap and every clone refers to the same underlying
/// state, so a group can be held by several options and by the program that
/// reads the final selection.
#[derive(Clone)]
pub struct SelectionGroup {
    inner: Rc<RefCell<GroupState>>,
}

struct GroupState {
    class_name: String,
    value: usize,
    num_registered: usize,
}

impl SelectionGroup {
    /// Creates an empty group with the given class name.
    ///
    /// The class name travels with every member's descriptor so consumers can
    /// tell which options belong together.
    pub fn new(class_name: impl Into<String>) -> Self {
        SelectionGroup {
            inner: Rc::new(RefCell::new(GroupState {
                class_name: class_name.into(),
                value: 0,
                num_registered: 0,
            })),
        }
    }

    /// Name shared by every member of this group.
    pub fn class_name(&self) -> String {
        self.inner.borrow().class_name.clone()
    }

    /// Index of the currently selected member.
    pub fn selected_index(&self) -> usize {
        self.inner.borrow().value
    }

    /// Number of members registered so far.
    pub fn member_count(&self) -> usize {
        self.inner.borrow().num_registered
    }

    /// Returns true when both handles refer to the same underlying group.
    pub fn same_group(&self, other: &SelectionGroup) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Claims the next member index. Called once per member option.
    pub(crate) fn register(&self) -> usize {
        let mut state = self.inner.borrow_mut();
        let index = state.num_registered;
        state.num_registered += 1;
        index
    }

    /// Makes `index` the selected member.
    pub(crate) fn select(&self, index: usize) {
        self.inner.borrow_mut().value = index;
    }
}

impl fmt::Debug for SelectionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("SelectionGroup")
            .field("class_name", &state.class_name)
            .field("value", &state.value)
            .field("num_registered", &state.num_registered)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_member_is_default() {
        let group = SelectionGroup::new("mode");
        let first = group.register();
        let second = group.register();
        assert_eq!(first, 0);
        assert_eq!(second, 1);
        assert_eq!(group.selected_index(), 0);
    }

    #[test]
    fn test_select_overwrites_previous_choice() {
        let group = SelectionGroup::new("mode");
        group.register();
        group.register();
        group.register();
        group.select(2);
        assert_eq!(group.selected_index(), 2);
        group.select(1);
        assert_eq!(group.selected_index(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let group = SelectionGroup::new("mode");
        let alias = group.clone();
        alias.register();
        group.select(0);
        assert_eq!(group.member_count(), 1);
        assert!(group.same_group(&alias));
        assert!(!group.same_group(&SelectionGroup::new("mode")));
    }

    #[test]
    fn test_class_name_round_trip() {
        let group = SelectionGroup::new("alignment");
        assert_eq!(group.class_name(), "alignment");
    }
}
