use std::collections::HashSet;

use crate::parser::SymbolId;

/// Position of the walk within the tree: nesting level plus the breadcrumb
/// label inherited from the enclosing section.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub depth: usize,
    pub breadcrumb: Option<String>,
}

impl RenderContext {
    /// Context for the menus directly below the root. They never inherit a
    /// breadcrumb because the root's own prompt carries no information.
    pub fn top() -> Self {
        Self {
            depth: 1,
            breadcrumb: None,
        }
    }

    /// Context for the children of a section labeled `label`.
    pub fn section(&self, label: &str) -> Self {
        Self {
            depth: self.depth + 1,
            breadcrumb: Some(label.to_string()),
        }
    }
}

/// Mutable bookkeeping threaded through one render invocation. Freshly
/// allocated per render, so no state leaks across invocations.
#[derive(Debug, Default)]
pub struct RenderState {
    written: HashSet<SymbolId>,
    /// Set after a labeled block closes; the next label emitted in document
    /// order is preceded by a blank separator line.
    pub label_closed: bool,
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a symbol for emission. Returns false if an earlier tree path
    /// already claimed it.
    pub fn claim(&mut self, id: SymbolId) -> bool {
        self.written.insert(id)
    }

    pub fn is_written(&self, id: SymbolId) -> bool {
        self.written.contains(&id)
    }
}
