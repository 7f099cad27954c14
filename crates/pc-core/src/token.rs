//! The [`Token`] model and the three-way partition of the kind space.
//!
//! Every token kind lives in exactly one of three disjoint ranges: a fixed
//! set of lexer-reserved kinds (parens, EOL, epsilon, ...), a block of kinds
//! dynamically handed out to declared machines, and a fixed block reserved
//! for the attribute engine's own annotation-language tokens. The machine
//! block and the semantics block are separated by [`KindAllocator::CAPACITY`]
//! so no number of declared machines can ever collide with a semantics kind.

use std::fmt;

/// Which partition of the kind space a [`Kind`] was allocated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindSpace {
    Lexer,
    Machine,
    Semantics,
}

/// An opaque token-kind tag. Comparing two kinds is `u32` equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Kind(u32);

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kind({})", self.0)
    }
}

impl Kind {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub fn space(self) -> KindSpace {
        if self.0 < KindAllocator::MACHINE_BASE {
            KindSpace::Lexer
        } else if self.0 < KindAllocator::SEMANTICS_BASE {
            KindSpace::Machine
        } else {
            KindSpace::Semantics
        }
    }
}

/// Fixed lexer-reserved kinds, mirroring the original implementation's
/// `lex_types_` enum. `ANNOTATE` is the last reserved slot; machine kinds
/// start immediately after it.
macro_rules! lexer_kinds {
    ($($name:ident => $n:expr),* $(,)?) => {
        impl Kind {
            $(pub const $name: Kind = Kind($n);)*
        }
    };
}

lexer_kinds! {
    ERROR => 0,
    TERM => 1,
    EOL => 2,
    UNION => 3,
    KLEENE => 4,
    POSITIVE => 5,
    ORNULL => 6,
    RANDCHAR => 7,
    EPSILON => 8,
    PRODSYM => 9,
    NONTERM => 10,
    OPENPAREN => 11,
    CLOSEPAREN => 12,
    EOF => 13,
    NULLSET => 14,
    START => 15,
    CROSS => 16,
    CODE => 17,
    DOT => 18,
    ANNOTATE => 19,
}

/// Allocates dynamic [`Kind`]s for declared machines and for the
/// semantics engine, enforcing invariant (a): the three partitions never
/// overlap.
#[derive(Debug)]
pub struct KindAllocator {
    next: u32,
    limit: u32,
}

impl KindAllocator {
    /// First kind value available to a declared machine.
    pub const MACHINE_BASE: u32 = Kind::ANNOTATE.0 + 1;
    /// First kind value reserved for the semantics engine. No machine
    /// allocation may reach this value; [`alloc_machine`](Self::alloc_machine)
    /// returns `None` instead of crossing it.
    pub const SEMANTICS_BASE: u32 = 1_000;

    /// Allocator for a source-language regex spec: hands out kinds in the
    /// machine block `[MACHINE_BASE, SEMANTICS_BASE)`.
    pub fn new() -> Self {
        Self {
            next: Self::MACHINE_BASE,
            limit: Self::SEMANTICS_BASE,
        }
    }

    /// Allocator for the attribute engine's own annotation-language spec:
    /// hands out kinds starting at `SEMANTICS_BASE`, the partition's own
    /// open-ended block (nothing is allocated above it, so there is no
    /// further boundary to enforce).
    pub fn for_semantics_language() -> Self {
        Self {
            next: Self::SEMANTICS_BASE,
            limit: u32::MAX,
        }
    }

    /// Allocate the next kind, or `None` if this allocator's block is
    /// exhausted.
    pub fn alloc_machine(&mut self) -> Option<Kind> {
        if self.next >= self.limit {
            return None;
        }
        let kind = Kind(self.next);
        self.next += 1;
        Some(kind)
    }

    /// A fixed semantics-engine kind. `offset` is relative to
    /// [`SEMANTICS_BASE`](Self::SEMANTICS_BASE); callers name their own
    /// small enum of offsets for the annotation-language token set.
    pub const fn semantics(offset: u32) -> Kind {
        Kind(Self::SEMANTICS_BASE + offset)
    }
}

impl Default for KindAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// A lexeme, its `(kind, attribute)` pair, the source line it was matched on,
/// and an optional structural type name (e.g. `integer`, `real`) distinct
/// from the lexeme text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub lexeme: String,
    pub kind: Kind,
    pub attribute: i64,
    pub line: u32,
    pub structural_type: Option<String>,
}

impl Token {
    pub fn new(lexeme: impl Into<String>, kind: Kind, attribute: i64, line: u32) -> Self {
        Self {
            lexeme: lexeme.into(),
            kind,
            attribute,
            line,
            structural_type: None,
        }
    }

    pub fn with_structural_type(mut self, ty: impl Into<String>) -> Self {
        self.structural_type = Some(ty.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind == Kind::ERROR
    }
}

#[cfg(test)]
mod token_tests;
