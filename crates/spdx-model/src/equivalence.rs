//! Structural equivalence of files across arenas
//!
//! Identifiers and graph attachment are ignored. File references are
//! compared recursively; a pair already under comparison is assumed
//! equivalent, so cyclic reference graphs terminate.
//!
//! Finished pairs are remembered, so files shared by several referrers are
//! compared once. A negative result is always final. A positive one is
//! final only if it did not rest on an assumption about a pair that was
//! still open higher up the stack.

use crate::arena::{FileArena, FileId};
use crate::relationship::{RelatedElement, Relationship};
use std::collections::HashMap;

type Pair = (FileId, FileId);

struct Comparison<'a> {
    left: &'a FileArena,
    right: &'a FileArena,
    /// Open pairs and their stack depth
    in_progress: HashMap<Pair, usize>,
    settled: HashMap<Pair, bool>,
    /// Shallowest open pair assumed equivalent since the current pair opened
    lowest_assumed: usize,
}

impl<'a> Comparison<'a> {
    fn new(left: &'a FileArena, right: &'a FileArena) -> Self {
        Self {
            left,
            right,
            in_progress: HashMap::new(),
            settled: HashMap::new(),
            lowest_assumed: usize::MAX,
        }
    }

    fn files(&mut self, a: FileId, b: FileId) -> bool {
        let pair = (a, b);
        if let Some(result) = self.settled.get(&pair) {
            return *result;
        }
        if let Some(depth) = self.in_progress.get(&pair) {
            self.lowest_assumed = self.lowest_assumed.min(*depth);
            return true;
        }

        let depth = self.in_progress.len();
        self.in_progress.insert(pair, depth);
        let outer = std::mem::replace(&mut self.lowest_assumed, usize::MAX);
        let result = self.compare(a, b);
        self.in_progress.remove(&pair);

        if !result || self.lowest_assumed >= depth {
            self.settled.insert(pair, result);
        }
        if self.lowest_assumed >= depth {
            self.lowest_assumed = outer;
        } else {
            self.lowest_assumed = self.lowest_assumed.min(outer);
        }
        result
    }

    fn compare(&mut self, a: FileId, b: FileId) -> bool {
        let (left_arena, right_arena) = (self.left, self.right);
        let (Some(left), Some(right)) = (left_arena.get(a), right_arena.get(b)) else {
            return false;
        };
        if !left.equivalent_local(right) {
            return false;
        }
        self.dependencies(&left.dependencies, &right.dependencies)
            && self.relationships(&left.entity.relationships, &right.entity.relationships)
    }

    fn dependencies(&mut self, a: &[FileId], b: &[FileId]) -> bool {
        a.iter().all(|x| b.iter().any(|y| self.files(*x, *y)))
            && b.iter().all(|y| a.iter().any(|x| self.files(*x, *y)))
    }

    fn relationships(&mut self, a: &[Relationship], b: &[Relationship]) -> bool {
        a.iter().all(|x| b.iter().any(|y| self.relationship(x, y)))
            && b.iter().all(|y| a.iter().any(|x| self.relationship(x, y)))
    }

    fn relationship(&mut self, a: &Relationship, b: &Relationship) -> bool {
        if a.relationship_type() != b.relationship_type() || a.comment() != b.comment() {
            return false;
        }
        match (a.related(), b.related()) {
            (RelatedElement::File(x), RelatedElement::File(y)) => self.files(*x, *y),
            (RelatedElement::External(x), RelatedElement::External(y)) => x == y,
            _ => false,
        }
    }
}

impl FileArena {
    /// True if file `a` of this arena and file `b` of `other` describe the
    /// same content
    ///
    /// Compares every property except the identifier. Checksums, projects,
    /// licenses and annotations compare as sets; file types and
    /// contributors compare in order.
    #[must_use]
    pub fn equivalent(&self, a: FileId, other: &FileArena, b: FileId) -> bool {
        Comparison::new(self, other).files(a, b)
    }
}
