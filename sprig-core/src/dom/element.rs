//! Default element properties.
//!
//! Every element exposes a fixed set of properties determined by its tag,
//! the same way a browser element's prototype chain does. This table is
//! what answers `key in element` for the element builder.

/// How a property stores its value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum PropertyKind {
    /// Mirrors a string attribute.
    Reflect(&'static str),
    /// Mirrors a boolean attribute by presence.
    ReflectBool(&'static str),
    /// Mirrors a numeric attribute, with the value read when it is absent.
    ReflectNumber(&'static str, f64),
    /// Lives in element state, defaulting to the empty string.
    StateText,
    /// Lives in element state, defaulting to `false`.
    StateBool,
    /// Replaces the element's children with a single text node.
    TextContent,
    /// Inline style text, stored in the `style` attribute.
    Style,
}

use PropertyKind::*;

const GLOBAL: &[(&str, PropertyKind)] = &[
    ("id", Reflect("id")),
    ("className", Reflect("class")),
    ("title", Reflect("title")),
    ("lang", Reflect("lang")),
    ("dir", Reflect("dir")),
    ("hidden", ReflectBool("hidden")),
    ("tabIndex", ReflectNumber("tabindex", -1.0)),
    ("textContent", TextContent),
    ("style", Style),
];

const INPUT: &[(&str, PropertyKind)] = &[
    ("value", StateText),
    ("checked", StateBool),
    ("disabled", ReflectBool("disabled")),
    ("readOnly", ReflectBool("readonly")),
    ("required", ReflectBool("required")),
    ("type", Reflect("type")),
    ("name", Reflect("name")),
    ("placeholder", Reflect("placeholder")),
];

const BUTTON: &[(&str, PropertyKind)] = &[
    ("disabled", ReflectBool("disabled")),
    ("type", Reflect("type")),
    ("name", Reflect("name")),
    ("value", Reflect("value")),
];

const TEXTAREA: &[(&str, PropertyKind)] = &[
    ("value", StateText),
    ("disabled", ReflectBool("disabled")),
    ("name", Reflect("name")),
    ("placeholder", Reflect("placeholder")),
];

const SELECT: &[(&str, PropertyKind)] = &[
    ("value", StateText),
    ("disabled", ReflectBool("disabled")),
    ("name", Reflect("name")),
];

const OPTION: &[(&str, PropertyKind)] = &[
    ("value", Reflect("value")),
    ("selected", StateBool),
    ("disabled", ReflectBool("disabled")),
];

const LI: &[(&str, PropertyKind)] = &[("value", ReflectNumber("value", 0.0))];

const ANCHOR: &[(&str, PropertyKind)] = &[
    ("href", Reflect("href")),
    ("target", Reflect("target")),
    ("rel", Reflect("rel")),
];

const IMG: &[(&str, PropertyKind)] = &[
    ("src", Reflect("src")),
    ("alt", Reflect("alt")),
    ("width", ReflectNumber("width", 0.0)),
    ("height", ReflectNumber("height", 0.0)),
];

const LABEL: &[(&str, PropertyKind)] = &[("htmlFor", Reflect("for"))];

const FORM: &[(&str, PropertyKind)] = &[
    ("action", Reflect("action")),
    ("method", Reflect("method")),
];

fn tag_properties(local_name: &str) -> &'static [(&'static str, PropertyKind)] {
    match local_name {
        "input" => INPUT,
        "button" => BUTTON,
        "textarea" => TEXTAREA,
        "select" => SELECT,
        "option" => OPTION,
        "li" => LI,
        "a" => ANCHOR,
        "img" => IMG,
        "label" => LABEL,
        "form" => FORM,
        _ => &[],
    }
}

/// Find the property `name` on an element with the given local name.
pub(crate) fn lookup(local_name: &str, name: &str) -> Option<PropertyKind> {
    tag_properties(local_name)
        .iter()
        .chain(GLOBAL)
        .find(|(prop, _)| *prop == name)
        .map(|(_, kind)| *kind)
}

/// Elements serialized without a closing tag.
pub(crate) fn is_void(local_name: &str) -> bool {
    matches!(
        local_name,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta"
            | "source" | "track" | "wbr"
    )
}
