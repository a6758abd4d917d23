//! Component type descriptors.
//!
//! A [`ComponentDescriptor`] is the explicit configuration of a component
//! type: its name (the TAG every instance namespaces its events with), an
//! optional render function, an optional server-side string renderer and a
//! map of attribute handlers. It is built once and shared by every instance.

use super::{AttributeChange, Component};
use crate::{attributes::AttrValue, html::Template, native::NativeTarget};
use elemental_core::{
    Detail, ElementError, ElementRegistry, EventTarget, Tagged, WILDCARD, event_name,
};
use std::{collections::BTreeMap, fmt, sync::Arc};

/// Renders a component's inner markup.
pub type RenderFn<D, T> = Arc<dyn Fn(&Component<D, T>) -> Template + Send + Sync>;

/// Renders a whole component, host tag included, from attributes and
/// children markup. Replaces the default `<tag attrs>children</tag>` output.
pub type ServerRenderFn = Arc<dyn Fn(&[(&str, AttrValue)], &str) -> Template + Send + Sync>;

/// Reacts to a change of one observed attribute.
pub type AttributeHandler<D, T> = Arc<dyn Fn(&Component<D, T>, &AttributeChange) + Send + Sync>;

const RESERVED_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// Check that `name` is usable as a custom element name.
///
/// The name must start with a lowercase ASCII letter, contain a hyphen,
/// contain no uppercase ASCII letters or whitespace, and not be one of the
/// names reserved by the platform.
pub fn validate_name(name: &str) -> Result<(), ElementError> {
    let invalid = || ElementError::InvalidName(name.to_string());

    let first = name.chars().next().ok_or_else(invalid)?;
    if !first.is_ascii_lowercase() || !name.contains('-') {
        return Err(invalid());
    }
    if name
        .chars()
        .any(|c| c.is_ascii_uppercase() || c.is_whitespace() || c == ':' || c == '*')
    {
        return Err(invalid());
    }
    if RESERVED_NAMES.contains(&name) {
        return Err(invalid());
    }
    Ok(())
}

struct DescriptorInner<D: Detail, T: EventTarget<D>> {
    name: String,
    render: Option<RenderFn<D, T>>,
    server_render: Option<ServerRenderFn>,
    attributes: BTreeMap<String, AttributeHandler<D, T>>,
}

/// The shared definition of a component type.
///
/// Cloning is cheap; clones describe the same type.
pub struct ComponentDescriptor<D: Detail = (), T: EventTarget<D> = NativeTarget<D>> {
    inner: Arc<DescriptorInner<D, T>>,
}

impl<D: Detail, T: EventTarget<D>> Clone for ComponentDescriptor<D, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D: Detail, T: EventTarget<D>> fmt::Debug for ComponentDescriptor<D, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("name", &self.inner.name)
            .field("render", &self.inner.render.is_some())
            .field("server_render", &self.inner.server_render.is_some())
            .field("observed", &self.observed_attributes().collect::<Vec<_>>())
            .finish()
    }
}

impl<D: Detail, T: EventTarget<D>> ComponentDescriptor<D, T> {
    /// Start describing a component named `name`.
    pub fn builder(name: impl Into<String>) -> ComponentBuilder<D, T> {
        ComponentBuilder {
            name: name.into(),
            render: None,
            server_render: None,
            attributes: BTreeMap::new(),
        }
    }

    /// A bare component type bound to `name`, with no render function and no
    /// observed attributes.
    pub fn create(name: impl Into<String>) -> Result<Self, ElementError> {
        Self::builder(name).build()
    }

    /// Start describing the component named by a [`Tagged`] type.
    pub fn tagged<X: Tagged>() -> ComponentBuilder<D, T> {
        Self::builder(X::TAG)
    }

    /// The component name, which is also its event namespace.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Namespaced event type for `bare`.
    pub fn event(&self, bare: &str) -> String {
        event_name(&self.inner.name, bare)
    }

    /// The type that subscribes to every event in this namespace.
    pub fn namespace_wildcard(&self) -> String {
        self.event(WILDCARD)
    }

    /// Names of the attributes with a change handler, in sorted order.
    pub fn observed_attributes(&self) -> impl Iterator<Item = &str> {
        self.inner.attributes.keys().map(String::as_str)
    }

    /// The change handler for `attribute`, if it is observed.
    pub fn attribute_handler(&self, attribute: &str) -> Option<&AttributeHandler<D, T>> {
        self.inner.attributes.get(attribute)
    }

    /// Render `component` with this type's render function.
    ///
    /// Types without one render empty markup.
    pub fn render(&self, component: &Component<D, T>) -> Template {
        self.inner
            .render
            .as_ref()
            .map_or_else(Template::default, |render| render(component))
    }

    /// The server-side string renderer, if this type overrides the default.
    pub fn server_renderer(&self) -> Option<&ServerRenderFn> {
        self.inner.server_render.as_ref()
    }

    /// Whether both descriptors are the same type.
    pub fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Register this type with `registry`.
    ///
    /// Does nothing if the registry is unavailable or the name is already
    /// defined. Returns `true` only if this call registered the type.
    pub fn define<R>(&self, registry: &R) -> bool
    where
        R: ElementRegistry<ComponentDescriptor<D, T>>,
    {
        if !registry.is_available() {
            #[cfg(feature = "tracing")]
            tracing::debug!(name = %self.name(), "registry unavailable, skipping define");
            return false;
        }
        if registry.is_defined(self.name()) {
            #[cfg(feature = "tracing")]
            tracing::debug!(name = %self.name(), "already defined, skipping");
            return false;
        }
        match registry.define(self.name(), self.clone()) {
            Ok(()) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(name = %self.name(), "defined component");
                true
            }
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(name = %self.name(), error = %_err, "define skipped");
                false
            }
        }
    }
}

/// Builder for [`ComponentDescriptor`].
pub struct ComponentBuilder<D: Detail, T: EventTarget<D>> {
    name: String,
    render: Option<RenderFn<D, T>>,
    server_render: Option<ServerRenderFn>,
    attributes: BTreeMap<String, AttributeHandler<D, T>>,
}

impl<D: Detail, T: EventTarget<D>> ComponentBuilder<D, T> {
    /// Set the render function.
    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Component<D, T>) -> Template + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Override how [`render_to_string`](crate::html::render_to_string) writes
    /// this type.
    pub fn render_to_string<F>(mut self, render: F) -> Self
    where
        F: Fn(&[(&str, AttrValue)], &str) -> Template + Send + Sync + 'static,
    {
        self.server_render = Some(Arc::new(render));
        self
    }

    /// Observe `attribute`, calling `handler` whenever it changes.
    ///
    /// A later handler for the same attribute replaces the earlier one.
    pub fn on_attribute<F>(mut self, attribute: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Component<D, T>, &AttributeChange) + Send + Sync + 'static,
    {
        self.attributes.insert(attribute.into(), Arc::new(handler));
        self
    }

    /// Validate the name and build the descriptor.
    pub fn build(self) -> Result<ComponentDescriptor<D, T>, ElementError> {
        validate_name(&self.name)?;
        Ok(ComponentDescriptor {
            inner: Arc::new(DescriptorInner {
                name: self.name,
                render: self.render,
                server_render: self.server_render,
                attributes: self.attributes,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::MemoryRegistry;

    type Descriptor = ComponentDescriptor<()>;

    struct Picker;

    impl Tagged for Picker {
        const TAG: &'static str = "color-picker";
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("my-element").is_ok());
        assert!(validate_name("x-1.2_b").is_ok());
        for bad in ["", "element", "My-element", "1-element", "-element", "my element-x"] {
            assert_eq!(
                validate_name(bad),
                Err(ElementError::InvalidName(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
        assert!(validate_name("font-face").is_err());
        assert!(validate_name("my-el:x").is_err());
    }

    #[test]
    fn test_create_binds_name() {
        let descriptor = Descriptor::create("another-element").unwrap();
        assert_eq!(descriptor.name(), "another-element");
        assert_eq!(descriptor.event("test"), "another-element:test");
        assert_eq!(descriptor.namespace_wildcard(), "another-element:*");
    }

    #[test]
    fn test_tagged_builder() {
        let descriptor = Descriptor::tagged::<Picker>().build().unwrap();
        assert_eq!(descriptor.name(), Picker::TAG);
    }

    #[test]
    fn test_observed_attributes_sorted() {
        let descriptor = Descriptor::builder("my-element")
            .on_attribute("size", |_, _| {})
            .on_attribute("color", |_, _| {})
            .build()
            .unwrap();
        let observed: Vec<_> = descriptor.observed_attributes().collect();
        assert_eq!(observed, vec!["color", "size"]);
        assert!(descriptor.attribute_handler("color").is_some());
        assert!(descriptor.attribute_handler("other").is_none());
    }

    #[test]
    fn test_define_is_idempotent() {
        let registry = MemoryRegistry::new();
        let descriptor = Descriptor::create("my-element").unwrap();
        let rival = Descriptor::create("my-element").unwrap();

        assert!(descriptor.define(&registry));
        assert!(!descriptor.define(&registry));
        assert!(!rival.define(&registry));

        let stored = registry.get("my-element").unwrap();
        assert!(stored.same(&descriptor));
        assert!(!stored.same(&rival));
    }

    #[test]
    fn test_define_without_runtime_is_noop() {
        let registry = MemoryRegistry::unavailable();
        let descriptor = Descriptor::create("my-element").unwrap();
        assert!(!descriptor.define(&registry));
        assert!(!registry.is_defined("my-element"));
    }
}
