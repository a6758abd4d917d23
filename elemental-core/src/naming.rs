//! Event namespacing.
//!
//! Every event a component emits is prefixed with the component's tag, so
//! two component types sharing a page can both emit `change` without their
//! listeners colliding: one sees `color-picker:change`, the other
//! `date-input:change`.

/// The reserved wildcard token.
///
/// `"*"` subscribes to every event an element dispatches, while
/// `"{TAG}:*"` subscribes to every event in that element's namespace.
/// It can never be emitted as a real event type.
pub const WILDCARD: &str = "*";

/// Separator between a namespace and a bare event type.
pub const SEPARATOR: char = ':';

/// Builds the namespaced event type `"{namespace}:{bare}"`.
///
/// # Example
///
/// ```rust
/// use elemental_core::event_name;
///
/// assert_eq!(event_name("my-element", "click"), "my-element:click");
/// ```
pub fn event_name(namespace: &str, bare: &str) -> String {
    let mut name = String::with_capacity(namespace.len() + 1 + bare.len());
    name.push_str(namespace);
    name.push(SEPARATOR);
    name.push_str(bare);
    name
}

/// Returns `true` if `kind` carries the `"{namespace}:"` prefix.
///
/// Matching is on the type string alone; the origin of the event is never
/// consulted.
pub fn in_namespace(kind: &str, namespace: &str) -> bool {
    kind.strip_prefix(namespace)
        .is_some_and(|rest| rest.starts_with(SEPARATOR))
}

/// A type bound to a component namespace at definition time.
///
/// This is the class-level view of a component's TAG. It is usually derived
/// with `#[derive(Component)]` rather than implemented by hand.
pub trait Tagged {
    /// The component namespace.
    const TAG: &'static str;

    /// Namespaced event type for `bare`, for use with the plain listener API.
    fn event(bare: &str) -> String {
        event_name(Self::TAG, bare)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Picker;

    impl Tagged for Picker {
        const TAG: &'static str = "color-picker";
    }

    #[test]
    fn test_event_name_joins_with_separator() {
        assert_eq!(event_name("test-component", "test"), "test-component:test");
        assert_eq!(event_name("a", ""), "a:");
        assert_eq!(event_name("a", "*"), "a:*");
    }

    #[test]
    fn test_event_name_is_pure() {
        let first = event_name("ns", "evt");
        let second = event_name("ns", "evt");
        assert_eq!(first, second);
    }

    #[test]
    fn test_in_namespace() {
        assert!(in_namespace("color-picker:change", "color-picker"));
        assert!(in_namespace("color-picker:", "color-picker"));
        assert!(!in_namespace("color-picker-x:change", "color-picker"));
        assert!(!in_namespace("change", "color-picker"));
        assert!(!in_namespace("color-picker", "color-picker"));
    }

    #[test]
    fn test_tagged_event() {
        assert_eq!(Picker::event("change"), "color-picker:change");
        assert_eq!(Picker::event(WILDCARD), "color-picker:*");
    }
}
