//! Emitter scope state: the module-wide function index map, the current
//! function's param/local index map, and the structural label stack.
//! Every resolver falls back to interpreting a bare integer name as the
//! index itself.

use std::collections::HashMap;

use smol_str::SmolStr;

use crate::error::{EmitError, Result};

/// Bare-integer fallback shared by every resolver.
fn numeric(name: &str) -> Option<u32> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

/// Scope state for one function body. The function map outlives the
/// function; locals and labels are reset per body.
#[derive(Debug, Default)]
pub struct EmitContext {
    funcs: HashMap<SmolStr, u32>,
    globals: HashMap<SmolStr, u32>,
    locals: HashMap<SmolStr, u32>,
    labels: Vec<SmolStr>,
}

impl EmitContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare_func(&mut self, name: SmolStr, index: u32) {
        if !name.is_empty() {
            self.funcs.insert(name, index);
        }
    }

    pub fn declare_global(&mut self, name: SmolStr, index: u32) {
        if !name.is_empty() {
            self.globals.insert(name, index);
        }
    }

    pub fn func_index(&self, name: &str) -> Option<u32> {
        self.funcs.get(name).copied()
    }

    /// Install the param+local index map for the next body, params first.
    pub fn begin_func<'a>(&mut self, names: impl Iterator<Item = &'a SmolStr>) {
        self.locals.clear();
        self.labels.clear();
        for (index, name) in names.enumerate() {
            self.locals.insert(name.clone(), index as u32);
        }
    }

    pub fn resolve_func(&self, name: &SmolStr) -> Result<u32> {
        self.funcs
            .get(name)
            .copied()
            .or_else(|| numeric(name))
            .ok_or_else(|| EmitError::UnresolvedName {
                kind: "function",
                name: name.clone(),
            })
    }

    pub fn resolve_local(&self, name: &SmolStr) -> Result<u32> {
        self.locals
            .get(name)
            .copied()
            .or_else(|| numeric(name))
            .ok_or_else(|| EmitError::UnresolvedName {
                kind: "local",
                name: name.clone(),
            })
    }

    pub fn resolve_global(&self, name: &SmolStr) -> Result<u32> {
        self.globals
            .get(name)
            .copied()
            .or_else(|| numeric(name))
            .ok_or_else(|| EmitError::UnresolvedName {
                kind: "global",
                name: name.clone(),
            })
    }

    pub fn push_label(&mut self, label: SmolStr) {
        self.labels.push(label);
    }

    pub fn pop_label(&mut self) {
        self.labels.pop();
    }

    /// Relative branch depth: distance from the innermost scope to the
    /// nearest enclosing label with this name.
    pub fn resolve_label(&self, name: &SmolStr) -> Result<u32> {
        if let Some(pos) = self.labels.iter().rposition(|l| l == name) {
            return Ok((self.labels.len() - 1 - pos) as u32);
        }
        numeric(name).ok_or_else(|| EmitError::UnresolvedName {
            kind: "label",
            name: name.clone(),
        })
    }
}
