//! Iterators on EliasGammaSeq.
#![cfg(target_pointer_width = "64")]

use super::{BitCursor, EliasGammaSeq};
use crate::error::{Error, Result};

/// Default distance beyond which [`MergeIter`] jumps through checkpoints.
pub const DEFAULT_LOOKAHEAD: u64 = 2048;

/// Iterator for enumerating integers stored in [`EliasGammaSeq`],
/// created by [`EliasGammaSeq::iter()`] or [`EliasGammaSeq::iter_from()`].
///
/// Each step decodes one codeword. The iterator cannot be rewound;
/// create a new one to start over.
pub struct Iter<'a> {
    seq: &'a EliasGammaSeq,
    cursor: BitCursor<'a>,
    // Integer at the starting checkpoint, not yet yielded.
    pending: Option<u64>,
    min: u64,
}

impl<'a> Iter<'a> {
    /// Creates an iterator enumerating integers from the first one.
    pub fn new(seq: &'a EliasGammaSeq) -> Self {
        Self {
            seq,
            cursor: BitCursor::new(seq.as_bytes()),
            pending: None,
            min: 0,
        }
    }

    /// Creates an iterator enumerating integers no less than `start`.
    pub fn from_value(seq: &'a EliasGammaSeq, start: u64) -> Self {
        match seq.checkpoints().floor(start) {
            Some(k) => {
                let cursor = seq.cursor_at(k);
                Self {
                    seq,
                    pending: Some(cursor.value()),
                    cursor,
                    min: start,
                }
            }
            None => Self {
                min: start,
                ..Self::new(seq)
            },
        }
    }

    #[inline(always)]
    fn remaining(&self) -> usize {
        self.seq.len() - self.cursor.num_decoded() + self.pending.is_some() as usize
    }
}

impl Iterator for Iter<'_> {
    type Item = u64;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if let Some(x) = self.pending.take() {
            if self.min <= x {
                return Some(x);
            }
        }
        while self.cursor.num_decoded() < self.seq.len() {
            let x = self.cursor.advance()?;
            if self.min <= x {
                return Some(x);
            }
        }
        None
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        if self.min == 0 {
            (remaining, Some(remaining))
        } else {
            (0, Some(remaining))
        }
    }
}

/// Iterator for looking up a non-decreasing stream of integers in [`EliasGammaSeq`],
/// created by [`EliasGammaSeq::merge_iter()`].
///
/// For each query, it yields `Ok(Some(k))` if the `k`-th integer equals the query,
/// or `Ok(None)` otherwise. The cursor never moves backward, so that
/// answering a whole stream costs a single pass over the buffer.
/// When a query is more than the lookahead beyond the current integer,
/// the cursor jumps to the last checkpoint no greater than the query,
/// provided that checkpoint is ahead of the cursor.
///
/// A query smaller than its predecessor yields [`Error::UnsortedQuery`],
/// after which the iterator is exhausted.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use gammaseq::{EliasGammaSeq, Error};
///
/// let seq = EliasGammaSeq::from_slice(&[2, 3, 5, 7, 11, 13])?;
/// let mut it = seq.merge_iter([3, 3, 4, 13, 12]);
///
/// assert_eq!(it.next(), Some(Ok(Some(1))));
/// assert_eq!(it.next(), Some(Ok(Some(1))));
/// assert_eq!(it.next(), Some(Ok(None)));
/// assert_eq!(it.next(), Some(Ok(Some(5))));
/// assert_eq!(it.next(), Some(Err(Error::UnsortedQuery { prev: 13, val: 12 })));
/// assert_eq!(it.next(), None);
/// # Ok(())
/// # }
/// ```
pub struct MergeIter<'a, I> {
    seq: &'a EliasGammaSeq,
    queries: I,
    cursor: BitCursor<'a>,
    lookahead: u64,
    last_query: Option<u64>,
    failed: bool,
}

impl<'a, I> MergeIter<'a, I>
where
    I: Iterator<Item = u64>,
{
    /// Creates an iterator answering `queries` with the given lookahead threshold.
    pub fn new(seq: &'a EliasGammaSeq, queries: I, lookahead: u64) -> Self {
        Self {
            seq,
            queries,
            cursor: BitCursor::new(seq.as_bytes()),
            lookahead,
            last_query: None,
            failed: false,
        }
    }

    /// Gets the lookahead threshold.
    pub const fn lookahead(&self) -> u64 {
        self.lookahead
    }

    fn jump(&mut self, query: u64) {
        let gap = match self.cursor.position() {
            Some(_) => query.saturating_sub(self.cursor.value()),
            None => query.saturating_add(1),
        };
        if gap <= self.lookahead {
            return;
        }
        let Some(k) = self.seq.checkpoints().floor(query) else {
            return;
        };
        let target = self.seq.checkpoints().position(k);
        if self.cursor.position().map_or(true, |pos| pos < target) {
            tracing::trace!(
                from = ?self.cursor.position(),
                to = target,
                query,
                "merge cursor jumped to checkpoint"
            );
            self.cursor = self.seq.cursor_at(k);
        }
    }

    fn find(&mut self, query: u64) -> Option<usize> {
        self.jump(query);
        while self.cursor.position().is_none() || self.cursor.value() < query {
            if self.seq.len() <= self.cursor.num_decoded() {
                return None;
            }
            self.cursor.advance()?;
        }
        self.cursor
            .position()
            .filter(|_| self.cursor.value() == query)
    }
}

impl<I> Iterator for MergeIter<'_, I>
where
    I: Iterator<Item = u64>,
{
    type Item = Result<Option<usize>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let query = self.queries.next()?;
        if let Some(prev) = self.last_query {
            if query < prev {
                self.failed = true;
                return Some(Err(Error::UnsortedQuery { prev, val: query }));
            }
        }
        self.last_query = Some(query);
        Some(Ok(self.find(query)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            self.queries.size_hint()
        }
    }
}
