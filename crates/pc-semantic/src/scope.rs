//! The scope tree: one node per procedure/block nesting level, each owning
//! a symbol table, a growing TAC listing, and a fully-qualified label
//! prefix computed from the root path (§3 "Scope tree", §4.3 `pushscope`).

use std::collections::HashMap;

use crate::value::Value;

/// A declared identifier: its type value plus the line it was declared on,
/// kept for "Redeclaration of identifier" diagnostics.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub ty: Value,
    pub declared_at_line: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Scope {
    pub name: String,
    pub full_id: String,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub symbols: HashMap<String, Symbol>,
    /// The enclosing procedure's formal-argument list, populated by
    /// `addarg` rather than `addtype`.
    pub formals: Vec<crate::value::FormalArg>,
    pub code: Vec<String>,
}

/// The scope tree, arena-indexed for the same reason the pna tree is
/// (§9 "cyclic parse-tree references"): a scope's label needs to walk up
/// to the root, and an owning-handle tree can't express that cheaply.
#[derive(Debug, Clone)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    /// The currently active scope, mirroring the original's process-wide
    /// `scope_tree` pointer (§5 "Shared resources").
    active: usize,
}

impl ScopeTree {
    pub fn new(root_name: impl Into<String>) -> Self {
        let name = root_name.into();
        let root = Scope {
            full_id: name.clone(),
            name,
            parent: None,
            ..Default::default()
        };
        Self {
            scopes: vec![root],
            active: 0,
        }
    }

    pub fn root(&self) -> usize {
        0
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn get(&self, idx: usize) -> &Scope {
        &self.scopes[idx]
    }

    pub fn get_mut(&mut self, idx: usize) -> &mut Scope {
        &mut self.scopes[idx]
    }

    /// `pushscope(name)`: `full_id = parent.full_id + "_" + name` (§4.3).
    pub fn push(&mut self, name: impl Into<String>) -> usize {
        let name = name.into();
        let parent_full_id = self.scopes[self.active].full_id.clone();
        let idx = self.scopes.len();
        self.scopes.push(Scope {
            full_id: format!("{parent_full_id}_{name}"),
            name,
            parent: Some(self.active),
            ..Default::default()
        });
        self.scopes[self.active].children.push(idx);
        self.active = idx;
        idx
    }

    /// `popscope()`. Popping the root is a logic error in the driver that
    /// calls it, not a recoverable condition.
    pub fn pop(&mut self) {
        self.active = self.scopes[self.active]
            .parent
            .expect("popscope called with scope_stack_depth already zero");
    }

    pub fn depth(&self) -> usize {
        let mut n = 0;
        let mut cur = self.active;
        while let Some(p) = self.scopes[cur].parent {
            cur = p;
            n += 1;
        }
        n
    }

    /// `addtype(id, type)`. Returns `Err` (already declared with a
    /// concrete, non-`NotEvaluated` type) rather than overwriting.
    pub fn add_type(&mut self, id: &str, ty: Value, line: u32) -> Result<(), &'static str> {
        let scope = &mut self.scopes[self.active];
        if let Some(existing) = scope.symbols.get(id) {
            if !existing.ty.is_not_evaluated() {
                return Err("Redeclaration of identifier");
            }
        }
        scope.symbols.insert(id.to_string(), Symbol { ty, declared_at_line: line });
        Ok(())
    }

    /// `addarg(id, type)`: scoped to the enclosing procedure's formal list
    /// rather than the general symbol table.
    pub fn add_arg(&mut self, id: &str, ty: &str) {
        let scope = &mut self.scopes[self.active];
        scope.formals.push(crate::value::FormalArg { name: id.to_string(), ty: ty.to_string() });
    }

    /// `lookup(id)`: search outward from the active scope, `None` if no
    /// reachable scope declares it.
    pub fn lookup(&self, id: &str) -> Option<&Value> {
        let mut cur = Some(self.active);
        while let Some(idx) = cur {
            if let Some(sym) = self.scopes[idx].symbols.get(id) {
                return Some(&sym.ty);
            }
            cur = self.scopes[idx].parent;
        }
        None
    }

    /// `resolveproc(name)`: walk the scope chain outward, then fall back to
    /// a global (root-scope) search, looking for a procedure symbol —
    /// matching `original_source/semantics.c`'s `sem_resolveproc`, which
    /// widens past the immediate parent rather than stopping there.
    pub fn resolve_proc(&self, name: &str) -> Option<&str> {
        let mut cur = Some(self.active);
        while let Some(idx) = cur {
            if self.scopes[idx].symbols.contains_key(name) || self.scopes[idx].name == name {
                return Some(&self.scopes[idx].full_id);
            }
            cur = self.scopes[idx].parent;
        }
        self.scopes
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.full_id.as_str())
    }

    pub fn emit(&mut self, line: String) {
        self.scopes[self.active].code.push(line);
    }

    pub fn active_full_id(&self) -> &str {
        &self.scopes[self.active].full_id
    }

    /// Post-order walk of the scope tree, writing each scope's code lines
    /// in turn (§5 "a single post-order tree walk").
    pub fn write_code(&self, out: &mut dyn std::io::Write) -> std::io::Result<()> {
        self.write_code_(self.root(), out)
    }

    fn write_code_(&self, idx: usize, out: &mut dyn std::io::Write) -> std::io::Result<()> {
        for line in &self.scopes[idx].code {
            writeln!(out, "{line}")?;
        }
        let children = self.scopes[idx].children.clone();
        for child in children {
            self.write_code_(child, out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod scope_tests;
