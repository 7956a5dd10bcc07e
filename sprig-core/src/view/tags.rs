//! Tag helpers.

use super::child::Child;
use super::props::Props;
use crate::dom::Node;
use crate::reactive::Runtime;

macro_rules! tag_helpers {
    ($($name:ident),* $(,)?) => {
        /// Tag names with a helper method on [`Runtime`].
        pub const TAG_HELPERS: &[&str] = &[$(stringify!($name)),*];

        impl Runtime {
            $(
                #[doc = concat!("Shorthand for `h(\"", stringify!($name), "\", props, children)`.")]
                pub fn $name(&self, props: Props, children: Vec<Child>) -> Node {
                    self.h(stringify!($name), props, children)
                }
            )*
        }
    };
}

tag_helpers!(div, span, button, input, h1, ul, li, section, p);
