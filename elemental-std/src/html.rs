//! Rendering components to strings.
//!
//! [`html`] interleaves static markup with dynamic values, escaping text and
//! inlining nested [`Template`]s verbatim. It is a string builder, not a
//! templating engine: there is no diffing and no re-render tracking.
//!
//! [`render_to_string`], [`render_components`] and [`wrap_in_container`]
//! produce a component's outer markup on the server, where there is no host
//! runtime to upgrade the element.

use crate::{
    attributes::{AttrValue, render_pairs, to_attributes},
    component::ComponentDescriptor,
};
use elemental_core::{Detail, ElementError, EventTarget};
use std::fmt;

/// Escape text for inclusion in markup or attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            '`' => out.push_str("&#096;"),
            c => out.push(c),
        }
    }
    out
}

/// Markup that has already been rendered and is inserted as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    text: String,
}

impl Template {
    /// Trust `text` as markup. It will not be escaped.
    pub fn raw(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Escape `text` into a template.
    pub fn text(text: &str) -> Self {
        Self { text: escape(text) }
    }

    /// The markup.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the template renders nothing.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Take the markup.
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A dynamic value interpolated by [`html`].
#[derive(Debug, Clone, PartialEq)]
pub enum HtmlValue {
    /// Escaped text.
    Text(String),
    /// Markup inserted verbatim.
    Template(Template),
    /// Templates inserted verbatim, one per line.
    Templates(Vec<Template>),
    /// A number, stringified.
    Number(f64),
    /// A boolean, stringified.
    Bool(bool),
    /// Renders nothing.
    Null,
}

impl HtmlValue {
    fn render(&self) -> String {
        match self {
            HtmlValue::Text(text) => escape(text),
            HtmlValue::Template(t) => t.text.clone(),
            HtmlValue::Templates(ts) => ts
                .iter()
                .map(Template::as_str)
                .collect::<Vec<_>>()
                .join("\n"),
            HtmlValue::Number(n) => n.to_string(),
            HtmlValue::Bool(b) => b.to_string(),
            HtmlValue::Null => String::new(),
        }
    }
}

impl From<&str> for HtmlValue {
    fn from(value: &str) -> Self {
        HtmlValue::Text(value.to_string())
    }
}

impl From<String> for HtmlValue {
    fn from(value: String) -> Self {
        HtmlValue::Text(value)
    }
}

impl From<Template> for HtmlValue {
    fn from(value: Template) -> Self {
        HtmlValue::Template(value)
    }
}

impl From<Vec<Template>> for HtmlValue {
    fn from(value: Vec<Template>) -> Self {
        HtmlValue::Templates(value)
    }
}

impl From<f64> for HtmlValue {
    fn from(value: f64) -> Self {
        HtmlValue::Number(value)
    }
}

impl From<i64> for HtmlValue {
    fn from(value: i64) -> Self {
        HtmlValue::Number(value as f64)
    }
}

impl From<bool> for HtmlValue {
    fn from(value: bool) -> Self {
        HtmlValue::Bool(value)
    }
}

/// Interleave static `strings` with `values`.
///
/// `strings` must be exactly one longer than `values`, the shape of a
/// tagged template: `html(&["<b>", "</b>"], &["x".into()])`.
pub fn html(strings: &[&str], values: &[HtmlValue]) -> Result<Template, ElementError> {
    if strings.len() != values.len() + 1 {
        return Err(ElementError::InvalidArgument(format!(
            "html expects {} static parts for {} values, got {}",
            values.len() + 1,
            values.len(),
            strings.len()
        )));
    }

    let mut out = String::new();
    for (part, value) in strings.iter().zip(values) {
        out.push_str(part);
        out.push_str(&value.render());
    }
    if let Some(last) = strings.last() {
        out.push_str(last);
    }
    Ok(Template { text: out })
}

/// Render attribute pairs for spreading into a tag, kebab-casing the names.
///
/// `dataValue` becomes `data-value`.
pub fn spread(attrs: &[(&str, AttrValue)]) -> Template {
    Template {
        text: render_pairs(attrs, kebab_case),
    }
}

/// Render `component` as `<tag attrs>children</tag>`.
///
/// Children that are empty or only whitespace are dropped. A type built with
/// [`ComponentBuilder::render_to_string`](crate::component::ComponentBuilder::render_to_string)
/// renders itself instead.
pub fn render_to_string<D: Detail, T: EventTarget<D>>(
    component: &ComponentDescriptor<D, T>,
    attrs: &[(&str, AttrValue)],
    children: &str,
) -> Template {
    if let Some(render) = component.server_renderer() {
        return render(attrs, children);
    }
    let children = if children.trim().is_empty() {
        ""
    } else {
        children
    };
    Template {
        text: element(component.name(), attrs, children),
    }
}

/// One component to render with [`render_components`].
pub struct RenderItem<'a, D: Detail, T: EventTarget<D>> {
    /// The component type.
    pub component: &'a ComponentDescriptor<D, T>,
    /// Attributes of the host tag.
    pub attrs: Vec<(&'a str, AttrValue)>,
    /// Inner markup.
    pub children: &'a str,
}

impl<'a, D: Detail, T: EventTarget<D>> RenderItem<'a, D, T> {
    /// Render `component` with no attributes and no children.
    pub fn new(component: &'a ComponentDescriptor<D, T>) -> Self {
        Self {
            component,
            attrs: Vec::new(),
            children: "",
        }
    }

    /// Set the host tag attributes.
    pub fn attrs(mut self, attrs: Vec<(&'a str, AttrValue)>) -> Self {
        self.attrs = attrs;
        self
    }

    /// Set the inner markup.
    pub fn children(mut self, children: &'a str) -> Self {
        self.children = children;
        self
    }
}

/// Render each item with [`render_to_string`] and concatenate the results.
pub fn render_components<D: Detail, T: EventTarget<D>>(
    items: &[RenderItem<'_, D, T>],
) -> Template {
    Template {
        text: items
            .iter()
            .map(|item| render_to_string(item.component, &item.attrs, item.children).text)
            .collect(),
    }
}

/// Wrap `content` in a container tag, `div` unless `tag` is given.
pub fn wrap_in_container(
    content: &str,
    tag: Option<&str>,
    attrs: &[(&str, AttrValue)],
) -> Template {
    Template {
        text: element(tag.unwrap_or("div"), attrs, content),
    }
}

fn element(tag: &str, attrs: &[(&str, AttrValue)], children: &str) -> String {
    let attrs = to_attributes(attrs);
    if attrs.is_empty() {
        format!("<{tag}>{children}</{tag}>")
    } else {
        format!("<{tag} {attrs}>{children}</{tag}>")
    }
}

fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_ascii_uppercase() && prev_lower {
            out.push('-');
        }
        prev_lower = c.is_ascii_lowercase();
        out.push(c.to_ascii_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">'&'`</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#039;&amp;&#039;&#096;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_html_interleaves_and_escapes() {
        let inner = Template::raw("<i>ok</i>");
        let out = html(
            &["<div>", " ", " ", "</div>"],
            &["<b>".into(), inner.into(), 3.0f64.into()],
        )
        .unwrap();
        assert_eq!(out.as_str(), "<div>&lt;b&gt; <i>ok</i> 3</div>");
    }

    #[test]
    fn test_html_template_list() {
        let items = vec![Template::raw("<li>a</li>"), Template::raw("<li>b</li>")];
        let out = html(&["<ul>", "</ul>"], &[items.into()]).unwrap();
        assert_eq!(out.as_str(), "<ul><li>a</li>\n<li>b</li></ul>");
    }

    #[test]
    fn test_html_null_and_bool() {
        let out = html(&["[", "|", "]"], &[HtmlValue::Null, true.into()]).unwrap();
        assert_eq!(out.as_str(), "[|true]");
    }

    #[test]
    fn test_html_part_count_mismatch() {
        let err = html(&["<a>"], &["x".into()]).unwrap_err();
        assert!(matches!(err, ElementError::InvalidArgument(_)));
    }

    #[test]
    fn test_spread_kebab_cases_names() {
        let out = spread(&[
            ("dataValue", "7".into()),
            ("ariaHidden", true.into()),
            ("skipped", false.into()),
            ("id", "x".into()),
        ]);
        assert_eq!(out.as_str(), r#"data-value="7" aria-hidden id="x""#);
    }

    type Descriptor = ComponentDescriptor<()>;

    fn mock() -> Descriptor {
        Descriptor::create("mock-component").unwrap()
    }

    fn custom() -> Descriptor {
        Descriptor::builder("custom-component")
            .render_to_string(|_, children| {
                Template::raw(format!(
                    r#"<custom-component data-custom="true">{children}</custom-component>"#
                ))
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_render_bare_component() {
        let out = render_to_string(&mock(), &[], "");
        assert_eq!(out.as_str(), "<mock-component></mock-component>");
    }

    #[test]
    fn test_render_with_attributes() {
        let out = render_to_string(
            &mock(),
            &[
                ("class", "test-class".into()),
                ("data-id", "123".into()),
                ("disabled", true.into()),
            ],
            "",
        );
        assert_eq!(
            out.as_str(),
            r#"<mock-component class="test-class" data-id="123" disabled></mock-component>"#
        );
    }

    #[test]
    fn test_render_with_children() {
        let out = render_to_string(&mock(), &[], "<span>Hello World</span>");
        assert_eq!(
            out.as_str(),
            "<mock-component><span>Hello World</span></mock-component>"
        );
    }

    #[test]
    fn test_render_with_attributes_and_children() {
        let out = render_to_string(&mock(), &[("class", "container".into())], "<p>Content</p>");
        assert_eq!(
            out.as_str(),
            r#"<mock-component class="container"><p>Content</p></mock-component>"#
        );
    }

    #[test]
    fn test_render_uses_override() {
        let out = render_to_string(&custom(), &[("ignored", "value".into())], "test content");
        assert_eq!(
            out.as_str(),
            r#"<custom-component data-custom="true">test content</custom-component>"#
        );
    }

    #[test]
    fn test_render_components_concatenates() {
        let mock = mock();
        let items = [
            RenderItem::new(&mock).attrs(vec![("class", "first".into())]),
            RenderItem::new(&mock)
                .attrs(vec![("class", "second".into())])
                .children("content"),
        ];
        assert_eq!(
            render_components(&items).as_str(),
            concat!(
                r#"<mock-component class="first"></mock-component>"#,
                r#"<mock-component class="second">content</mock-component>"#
            )
        );
    }

    #[test]
    fn test_wrap_in_default_div() {
        let out = wrap_in_container("<mock-component></mock-component>", None, &[]);
        assert_eq!(out.as_str(), "<div><mock-component></mock-component></div>");
    }

    #[test]
    fn test_wrap_in_custom_tag() {
        let out = wrap_in_container(
            "<mock-component></mock-component>",
            Some("section"),
            &[("class", "wrapper".into()), ("id", "main".into())],
        );
        assert_eq!(
            out.as_str(),
            r#"<section class="wrapper" id="main"><mock-component></mock-component></section>"#
        );
    }

    #[test]
    fn test_render_drops_blank_children() {
        assert_eq!(
            render_to_string(&mock(), &[], "").as_str(),
            "<mock-component></mock-component>"
        );
        assert_eq!(
            render_to_string(&mock(), &[], "   ").as_str(),
            "<mock-component></mock-component>"
        );
    }

    #[test]
    fn test_render_complex_attributes() {
        let out = render_to_string(
            &mock(),
            &[
                ("data-list", vec!["item1", "item2", "item3"].into()),
                ("hidden", false.into()),
                ("visible", true.into()),
                ("count", 42i32.into()),
            ],
            "",
        );
        assert_eq!(
            out.as_str(),
            r#"<mock-component data-list="item1 item2 item3" visible count="42"></mock-component>"#
        );
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("fooBarBaz"), "foo-bar-baz");
        assert_eq!(kebab_case("plain"), "plain");
        assert_eq!(kebab_case("URL"), "url");
    }
}
