use std::fmt;

/// Handle to an element inside a [`crate::Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Body,
    Div,
    Span,
    /// Drawing surface placeholder with its physical pixel size.
    Canvas { width: u32, height: u32 },
}

impl ElementKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ElementKind::Body => "body",
            ElementKind::Div => "div",
            ElementKind::Span => "span",
            ElementKind::Canvas { .. } => "canvas",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    pub kind: ElementKind,
    pub dom_id: Option<String>,
    pub text: String,
    pub title: Option<String>,
    pub style: String,
    pub class: Option<String>,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
}

impl Element {
    pub(crate) fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            dom_id: None,
            text: String::new(),
            title: None,
            style: String::new(),
            class: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}
