use shared::directory::{DirectoryAction, DirectoryState};
use std::ops::Deref;
use std::rc::Rc;
use yew::Reducible;

/// [`DirectoryState`] wired into `use_reducer`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryStore(DirectoryState);

impl Reducible for DirectoryStore {
    type Action = DirectoryAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        if next.0.apply(action) {
            Rc::new(next)
        } else {
            self
        }
    }
}

impl Deref for DirectoryStore {
    type Target = DirectoryState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
