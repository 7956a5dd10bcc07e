//! Fragments.

use std::rc::Rc;

use super::child::Child;
use crate::dom::Node;
use crate::reactive::Runtime;

impl Runtime {
    /// Build a fragment holding `children`.
    ///
    /// The fragment re-renders its whole child list when a store read by a
    /// reactive child changes. Appending the fragment to an element moves
    /// its current children out; later re-renders refill the fragment
    /// itself and leave the element untouched.
    pub fn fragment(&self, children: Vec<Child>) -> Node {
        let frag = Node::fragment();
        let children: Rc<[Child]> = children.into();
        self.bind_children(&frag, &children);
        frag
    }
}
