//! NFA fragments and the Thompson-construction builder, with union fusion.
//!
//! Standard Thompson construction builds one new start/accept pair per
//! binary `|`. For a chain `a | b | c | ...` that nests `n - 1` union
//! frames, doubling traversal depth for no semantic benefit. The builder
//! instead accumulates every alternative at one precedence level into a
//! flat list and calls [`NfaBuilder::union`] once, fusing them into a
//! single shared start/accept pair — the NFA stays linear in the number of
//! alternatives.

pub type StateId = usize;

/// What an edge matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeLabel {
    Epsilon,
    /// Match exactly this literal character.
    Terminal(char),
    /// Recurse into the named machine's NFA, then continue from the state
    /// following this edge with whatever buffer remains.
    Machine(String),
}

/// Whether traversing an edge contributes an attribute value, and which of
/// the original implementation's two distinct uses of "edge attribute" this
/// is: a `Fixed` literal constant (e.g. the operator `:=` always returns the
/// same attribute), or `Returned`, meaning the attribute is resolved later —
/// at identifier-intern time, not at NFA-traversal time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeAttribute {
    #[default]
    None,
    Fixed(i64),
    Returned,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeAnnotation {
    pub attribute: EdgeAttribute,
    pub length: Option<u32>,
    pub attcount: bool,
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub label: EdgeLabel,
    pub target: StateId,
    pub annotation: EdgeAnnotation,
}

#[derive(Debug, Clone, Default)]
pub struct State {
    pub edges: Vec<Edge>,
}

/// A start/accept pair delimiting one constructed NFA fragment.
#[derive(Debug, Clone, Copy)]
pub struct Frag {
    pub start: StateId,
    pub accept: StateId,
}

#[derive(Debug, Clone, Default)]
pub struct NfaBuilder {
    pub states: Vec<State>,
}

impl NfaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_state(&mut self) -> StateId {
        self.states.push(State::default());
        self.states.len() - 1
    }

    fn add_edge(&mut self, from: StateId, label: EdgeLabel, to: StateId, annotation: EdgeAnnotation) {
        self.states[from].edges.push(Edge {
            label,
            target: to,
            annotation,
        });
    }

    pub fn epsilon_frag(&mut self) -> Frag {
        let start = self.new_state();
        let accept = self.new_state();
        self.add_edge(start, EdgeLabel::Epsilon, accept, EdgeAnnotation::default());
        Frag { start, accept }
    }

    pub fn terminal_frag(&mut self, c: char, annotation: EdgeAnnotation) -> Frag {
        let start = self.new_state();
        let accept = self.new_state();
        self.add_edge(start, EdgeLabel::Terminal(c), accept, annotation);
        Frag { start, accept }
    }

    pub fn machine_frag(&mut self, name: String, annotation: EdgeAnnotation) -> Frag {
        let start = self.new_state();
        let accept = self.new_state();
        self.add_edge(start, EdgeLabel::Machine(name), accept, annotation);
        Frag { start, accept }
    }

    /// Concatenate two fragments in sequence.
    pub fn concat(&mut self, a: Frag, b: Frag) -> Frag {
        self.add_edge(a.accept, EdgeLabel::Epsilon, b.start, EdgeAnnotation::default());
        Frag {
            start: a.start,
            accept: b.accept,
        }
    }

    /// Fuse every alternative in `alts` into one shared start/accept pair.
    /// Must be called with the whole flattened alternative list, not
    /// pairwise, to get the linear (not nested) NFA shape.
    pub fn union(&mut self, alts: Vec<Frag>) -> Frag {
        if alts.len() == 1 {
            return alts[0];
        }
        let start = self.new_state();
        let accept = self.new_state();
        for frag in alts {
            self.add_edge(start, EdgeLabel::Epsilon, frag.start, EdgeAnnotation::default());
            self.add_edge(frag.accept, EdgeLabel::Epsilon, accept, EdgeAnnotation::default());
        }
        Frag { start, accept }
    }

    pub fn star(&mut self, inner: Frag) -> Frag {
        let start = self.new_state();
        let accept = self.new_state();
        self.add_edge(start, EdgeLabel::Epsilon, inner.start, EdgeAnnotation::default());
        self.add_edge(start, EdgeLabel::Epsilon, accept, EdgeAnnotation::default());
        self.add_edge(inner.accept, EdgeLabel::Epsilon, inner.start, EdgeAnnotation::default());
        self.add_edge(inner.accept, EdgeLabel::Epsilon, accept, EdgeAnnotation::default());
        Frag { start, accept }
    }

    pub fn plus(&mut self, inner: Frag) -> Frag {
        let start = self.new_state();
        let accept = self.new_state();
        self.add_edge(start, EdgeLabel::Epsilon, inner.start, EdgeAnnotation::default());
        self.add_edge(inner.accept, EdgeLabel::Epsilon, inner.start, EdgeAnnotation::default());
        self.add_edge(inner.accept, EdgeLabel::Epsilon, accept, EdgeAnnotation::default());
        Frag { start, accept }
    }

    pub fn optional(&mut self, inner: Frag) -> Frag {
        let start = self.new_state();
        let accept = self.new_state();
        self.add_edge(start, EdgeLabel::Epsilon, inner.start, EdgeAnnotation::default());
        self.add_edge(start, EdgeLabel::Epsilon, accept, EdgeAnnotation::default());
        self.add_edge(inner.accept, EdgeLabel::Epsilon, accept, EdgeAnnotation::default());
        Frag { start, accept }
    }
}

/// A finished NFA: the shared state arena plus its distinguished start and
/// accept states.
#[derive(Debug, Clone)]
pub struct Nfa {
    pub states: Vec<State>,
    pub start: StateId,
    pub accept: StateId,
}

impl Nfa {
    pub fn from_frag(builder: NfaBuilder, frag: Frag) -> Self {
        Self {
            states: builder.states,
            start: frag.start,
            accept: frag.accept,
        }
    }
}

#[cfg(test)]
mod nfa_tests;
