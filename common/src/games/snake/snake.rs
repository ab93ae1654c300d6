use std::collections::VecDeque;

use super::types::Cell;

/// Body cells, head first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    pub fn new(head: Cell) -> Self {
        Self {
            body: VecDeque::from([head]),
        }
    }

    /// Builds a snake from head-first segments. An empty list yields `None`.
    pub fn from_segments(segments: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let body: VecDeque<Cell> = segments.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self { body })
    }

    pub fn head(&self) -> Cell {
        // Never empty: construction requires a head and pop_tail keeps it.
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    /// True when `cell` is occupied by any segment after the head.
    pub fn body_contains(&self, cell: Cell) -> bool {
        self.body.iter().skip(1).any(|segment| *segment == cell)
    }

    pub fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    pub fn pop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_back();
        }
    }

    pub fn to_vec(&self) -> Vec<Cell> {
        self.body.iter().copied().collect()
    }
}
