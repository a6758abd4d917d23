//! A minimal document of mounted components with selector queries.
//!
//! Supports compound simple selectors (`tag`, `*`, `#id`, `.class` and
//! combinations like `my-element#main.active`) and comma-separated lists of
//! them. Combinators and attribute selectors are rejected.

use crate::component::Component;
use elemental_core::{Detail, ElementError, EventTarget, Query};
use std::sync::{Arc, PoisonError, RwLock};

/// An ordered collection of mounted components.
pub struct Document<D: Detail, T: EventTarget<D>> {
    nodes: RwLock<Vec<Arc<Component<D, T>>>>,
}

impl<D: Detail, T: EventTarget<D>> Default for Document<D, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Detail, T: EventTarget<D>> Document<D, T> {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(Vec::new()),
        }
    }

    /// Append `component` and return the shared handle.
    pub fn mount(&self, component: Component<D, T>) -> Arc<Component<D, T>> {
        let node = Arc::new(component);
        self.nodes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(node.clone());
        node
    }

    /// Remove `component`. Returns `true` if it was mounted.
    pub fn unmount(&self, component: &Arc<Component<D, T>>) -> bool {
        let mut nodes = self.nodes.write().unwrap_or_else(PoisonError::into_inner);
        match nodes.iter().position(|n| Arc::ptr_eq(n, component)) {
            Some(pos) => {
                nodes.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Number of mounted components.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Whether nothing is mounted.
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    fn snapshot(&self) -> Vec<Arc<Component<D, T>>> {
        self.nodes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn matching(&self, selector: &str) -> Result<Vec<Arc<Component<D, T>>>, ElementError> {
        let list = parse_list(selector)?;
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|node| list.iter().any(|s| s.matches(node)))
            .collect())
    }
}

impl<D: Detail, T: EventTarget<D>> Query<Arc<Component<D, T>>> for Document<D, T> {
    fn query_selector(
        &self,
        selector: &str,
    ) -> Result<Option<Arc<Component<D, T>>>, ElementError> {
        Ok(self.matching(selector)?.into_iter().next())
    }

    fn query_selector_all(
        &self,
        selector: &str,
    ) -> Result<Vec<Arc<Component<D, T>>>, ElementError> {
        self.matching(selector)
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn matches<D: Detail, T: EventTarget<D>>(&self, node: &Component<D, T>) -> bool {
        if self.tag.as_deref().is_some_and(|tag| tag != node.tag()) {
            return false;
        }
        if self.id.is_some() && node.id() != self.id {
            return false;
        }
        self.classes.iter().all(|c| node.has_class(c))
    }
}

fn parse_list(selector: &str) -> Result<Vec<Compound>, ElementError> {
    selector
        .split(',')
        .map(|part| parse_compound(part.trim(), selector))
        .collect()
}

fn parse_compound(part: &str, whole: &str) -> Result<Compound, ElementError> {
    let unsupported = || ElementError::Selector(whole.to_string());
    if part.is_empty() {
        return Err(unsupported());
    }

    let mut compound = Compound::default();
    let mut rest = part;

    let tag_end = rest.find(['#', '.']).unwrap_or(rest.len());
    let tag = &rest[..tag_end];
    if tag != "*" && !tag.is_empty() {
        if !tag.chars().all(is_name_char) {
            return Err(unsupported());
        }
        compound.tag = Some(tag.to_ascii_lowercase());
    }
    rest = &rest[tag_end..];

    while let Some(marker) = rest.chars().next() {
        let body = &rest[1..];
        let end = body.find(['#', '.']).unwrap_or(body.len());
        let name = &body[..end];
        if name.is_empty() || !name.chars().all(is_name_char) {
            return Err(unsupported());
        }
        match marker {
            '#' if compound.id.is_none() => compound.id = Some(name.to_string()),
            '.' => compound.classes.push(name.to_string()),
            _ => return Err(unsupported()),
        }
        rest = &body[end..];
    }

    Ok(compound)
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
