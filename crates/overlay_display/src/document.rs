//! Element tree with id registry

use crate::element::{Element, ElementId, ElementKind};
use crate::DisplayError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Write;
use std::rc::Rc;

pub type ClickListener = Box<dyn FnMut()>;

/// Documents are shared between the host and every overlay attached to it.
pub type SharedDocument = Rc<RefCell<Document>>;

pub struct Document {
    elements: Vec<Element>,
    by_id: HashMap<String, ElementId>,
    listeners: HashMap<ElementId, Vec<ClickListener>>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            elements: vec![Element::new(ElementKind::Body)],
            by_id: HashMap::new(),
            listeners: HashMap::new(),
        }
    }

    pub fn shared() -> SharedDocument {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn body(&self) -> ElementId {
        ElementId(0)
    }

    /// Creates a detached element.
    pub fn create(&mut self, kind: ElementKind) -> ElementId {
        self.elements.push(Element::new(kind));
        ElementId(self.elements.len() - 1)
    }

    /// Creates a detached element carrying `text`.
    pub fn create_text(&mut self, kind: ElementKind, text: &str) -> ElementId {
        let id = self.create(kind);
        self.elements[id.0].text = text.to_string();
        id
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut Element, DisplayError> {
        self.elements
            .get_mut(id.0)
            .ok_or(DisplayError::UnknownElement(id))
    }

    pub fn get_element_by_id(&self, dom_id: &str) -> Option<ElementId> {
        self.by_id.get(dom_id).copied()
    }

    /// Returns the element registered under `dom_id`, creating it first if
    /// needed. The flag is true when the element was created by this call.
    pub fn get_or_create_by_id(&mut self, dom_id: &str, kind: ElementKind) -> (ElementId, bool) {
        if let Some(existing) = self.get_element_by_id(dom_id) {
            return (existing, false);
        }
        let id = self.create(kind);
        self.elements[id.0].dom_id = Some(dom_id.to_string());
        self.by_id.insert(dom_id.to_string(), id);
        tracing::trace!(dom_id, element = %id, "registered element id");
        (id, true)
    }

    /// Number of elements carrying `dom_id`, attached or not.
    pub fn count_with_id(&self, dom_id: &str) -> usize {
        self.elements
            .iter()
            .filter(|e| e.dom_id.as_deref() == Some(dom_id))
            .count()
    }

    pub fn set_text(&mut self, id: ElementId, text: &str) -> Result<(), DisplayError> {
        let element = self.element_mut(id)?;
        element.text.clear();
        element.text.push_str(text);
        Ok(())
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.element(id).map(|e| e.text.as_str())
    }

    pub fn set_style(&mut self, id: ElementId, style: &str) -> Result<(), DisplayError> {
        self.element_mut(id)?.style = style.to_string();
        Ok(())
    }

    pub fn style(&self, id: ElementId) -> Option<&str> {
        self.element(id).map(|e| e.style.as_str())
    }

    pub fn set_title(&mut self, id: ElementId, title: &str) -> Result<(), DisplayError> {
        self.element_mut(id)?.title = Some(title.to_string());
        Ok(())
    }

    pub fn set_class(&mut self, id: ElementId, class: &str) -> Result<(), DisplayError> {
        self.element_mut(id)?.class = Some(class.to_string());
        Ok(())
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.element(id).map(Element::children).unwrap_or(&[])
    }

    /// Appends `child` as the last child of `parent`, moving it out of any
    /// previous parent first.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), DisplayError> {
        self.element_mut(parent)?;
        self.element_mut(child)?;

        let mut cursor = Some(parent);
        while let Some(ancestor) = cursor {
            if ancestor == child {
                return Err(DisplayError::HierarchyCycle { parent, child });
            }
            cursor = self.elements[ancestor.0].parent;
        }

        if let Some(previous) = self.elements[child.0].parent {
            self.elements[previous.0].children.retain(|c| *c != child);
        }
        self.elements[child.0].parent = Some(parent);
        self.elements[parent.0].children.push(child);
        Ok(())
    }

    pub fn is_attached(&self, id: ElementId) -> bool {
        let body = self.body();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == body {
                return true;
            }
            cursor = self.element(current).and_then(Element::parent);
        }
        false
    }

    pub fn add_click_listener(
        &mut self,
        id: ElementId,
        listener: ClickListener,
    ) -> Result<(), DisplayError> {
        self.element_mut(id)?;
        self.listeners.entry(id).or_default().push(listener);
        Ok(())
    }

    pub fn has_click_listener(&self, id: ElementId) -> bool {
        self.listeners.get(&id).is_some_and(|l| !l.is_empty())
    }

    /// Concatenated text of `id` and its descendants, in document order.
    pub fn text_content(&self, id: ElementId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: ElementId, out: &mut String) {
        if let Some(element) = self.element(id) {
            out.push_str(&element.text);
            for child in &element.children {
                self.collect_text(*child, out);
            }
        }
    }

    /// Indented dump of the subtree under `id`.
    pub fn outline(&self, id: ElementId) -> String {
        let mut out = String::new();
        self.write_outline(id, 0, &mut out);
        out
    }

    fn write_outline(&self, id: ElementId, depth: usize, out: &mut String) {
        let Some(element) = self.element(id) else {
            return;
        };
        let _ = write!(out, "{:indent$}<{}", "", element.kind.tag(), indent = depth * 2);
        if let Some(dom_id) = &element.dom_id {
            let _ = write!(out, " id=\"{dom_id}\"");
        }
        if let ElementKind::Canvas { width, height } = element.kind {
            let _ = write!(out, " width={width} height={height}");
        }
        out.push('>');
        out.push_str(&element.text);
        out.push('\n');
        for child in &element.children {
            self.write_outline(*child, depth + 1, out);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the click listeners of `id`. Returns false if it has none.
///
/// The document is not borrowed while listeners run, so a listener may
/// itself update the document (e.g. through an overlay's loop status).
pub fn dispatch_click(document: &SharedDocument, id: ElementId) -> bool {
    let taken = document.borrow_mut().listeners.remove(&id);
    let Some(mut listeners) = taken else {
        return false;
    };

    for listener in listeners.iter_mut() {
        listener();
    }

    let mut document = document.borrow_mut();
    // Listeners registered during dispatch go after the existing ones
    let added = document.listeners.remove(&id).unwrap_or_default();
    listeners.extend(added);
    document.listeners.insert(id, listeners);
    true
}
