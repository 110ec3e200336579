// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::num::NonZeroUsize;
use std::ops::Range;

use crate::error::{GridError, Result};

pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

pub fn page_count(len: usize, rows_per_page: NonZeroUsize) -> usize {
    len.div_ceil(rows_per_page.get())
}

/// Half-open bounds of `page` (1-based) within a sequence of `len` rows.
/// Pages past the end yield an empty range at `len`.
pub fn page_bounds(len: usize, page: usize, rows_per_page: NonZeroUsize) -> Range<usize> {
    let size = rows_per_page.get();
    let start = page.saturating_sub(1).saturating_mul(size).min(len);
    let end = start.saturating_add(size).min(len);
    start..end
}

pub fn page_window<T>(rows: &[T], page: usize, rows_per_page: NonZeroUsize) -> &[T] {
    &rows[page_bounds(rows.len(), page, rows_per_page)]
}

/// Pulls `page` back to the last non-empty page. An empty sequence has one
/// (empty) page, so the result is always at least 1.
pub fn clamp_page(page: usize, len: usize, rows_per_page: NonZeroUsize) -> usize {
    page.clamp(1, page_count(len, rows_per_page).max(1))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    rows_per_page: NonZeroUsize,
}

impl PageState {
    pub fn new(rows_per_page: usize) -> Result<Self> {
        Ok(Self {
            current_page: 1,
            rows_per_page: NonZeroUsize::new(rows_per_page).ok_or(GridError::ZeroRowsPerPage)?,
        })
    }

    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    pub const fn rows_per_page(&self) -> NonZeroUsize {
        self.rows_per_page
    }

    pub fn set_rows_per_page(&mut self, rows_per_page: usize, len: usize) -> Result<()> {
        self.rows_per_page = NonZeroUsize::new(rows_per_page).ok_or(GridError::ZeroRowsPerPage)?;
        self.clamp(len);
        Ok(())
    }

    pub fn page_count(&self, len: usize) -> usize {
        page_count(len, self.rows_per_page)
    }

    pub fn bounds(&self, len: usize) -> Range<usize> {
        page_bounds(len, self.current_page, self.rows_per_page)
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Re-evaluated whenever the underlying length changes. Returns true when
    /// the page moved.
    pub fn clamp(&mut self, len: usize) -> bool {
        let clamped = clamp_page(self.current_page, len, self.rows_per_page);
        let moved = clamped != self.current_page;
        self.current_page = clamped;
        moved
    }

    pub fn go_to(&mut self, page: usize, len: usize) -> bool {
        let before = self.current_page;
        self.current_page = clamp_page(page, len, self.rows_per_page);
        before != self.current_page
    }

    pub fn next(&mut self, len: usize) -> bool {
        self.go_to(self.current_page.saturating_add(1), len)
    }

    pub fn prev(&mut self, len: usize) -> bool {
        self.go_to(self.current_page.saturating_sub(1), len)
    }

    pub fn first(&mut self, len: usize) -> bool {
        self.go_to(1, len)
    }

    pub fn last(&mut self, len: usize) -> bool {
        self.go_to(self.page_count(len), len)
    }
}

#[cfg(test)]
mod tests {
    use super::{PageState, clamp_page, page_bounds, page_count, page_window};
    use crate::GridError;
    use std::num::NonZeroUsize;

    fn size(value: usize) -> NonZeroUsize {
        NonZeroUsize::new(value).expect("non-zero page size")
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, size(5)), 0);
        assert_eq!(page_count(1, size(5)), 1);
        assert_eq!(page_count(5, size(5)), 1);
        assert_eq!(page_count(12, size(5)), 3);
    }

    #[test]
    fn windows_never_exceed_page_size() {
        let rows = (0..12).collect::<Vec<_>>();
        let sizes = (1..=4)
            .map(|page| page_window(&rows, page, size(5)).len())
            .collect::<Vec<_>>();
        assert_eq!(sizes, vec![5, 5, 2, 0]);
    }

    #[test]
    fn concatenated_pages_reconstruct_rows() {
        for len in [0_usize, 1, 4, 5, 6, 17] {
            for per_page in [1_usize, 3, 5, 20] {
                let rows = (0..len).collect::<Vec<_>>();
                let pages = page_count(len, size(per_page));
                let rebuilt = (1..=pages)
                    .flat_map(|page| page_window(&rows, page, size(per_page)).iter().copied())
                    .collect::<Vec<_>>();
                assert_eq!(rebuilt, rows, "len {len} per_page {per_page}");
            }
        }
    }

    #[test]
    fn bounds_past_end_are_empty() {
        assert_eq!(page_bounds(12, 9, size(5)), 12..12);
        assert_eq!(page_bounds(12, 0, size(5)), 0..5);
    }

    #[test]
    fn clamp_moves_to_last_non_empty_page() {
        assert_eq!(clamp_page(3, 6, size(5)), 2);
        assert_eq!(clamp_page(3, 12, size(5)), 3);
        assert_eq!(clamp_page(3, 0, size(5)), 1);
        assert_eq!(clamp_page(0, 12, size(5)), 1);
    }

    #[test]
    fn navigation_stays_in_range() -> anyhow::Result<()> {
        let mut state = PageState::new(5)?;
        assert!(!state.prev(12));
        assert!(state.next(12));
        assert!(state.next(12));
        assert!(!state.next(12));
        assert_eq!(state.current_page(), 3);
        assert!(state.first(12));
        assert!(state.last(12));
        assert_eq!(state.current_page(), 3);
        assert!(!state.go_to(40, 12));
        assert_eq!(state.bounds(12), 10..12);
        Ok(())
    }

    #[test]
    fn shrinking_length_clamps_page() -> anyhow::Result<()> {
        let mut state = PageState::new(5)?;
        state.go_to(3, 12);
        assert!(state.clamp(6));
        assert_eq!(state.current_page(), 2);
        assert!(!state.clamp(6));
        Ok(())
    }

    #[test]
    fn resizing_pages_clamps() -> anyhow::Result<()> {
        let mut state = PageState::new(2)?;
        state.go_to(6, 12);
        state.set_rows_per_page(5, 12)?;
        assert_eq!(state.current_page(), 3);
        assert_eq!(
            state.set_rows_per_page(0, 12),
            Err(GridError::ZeroRowsPerPage)
        );
        Ok(())
    }

    #[test]
    fn zero_rows_per_page_is_rejected() {
        assert_eq!(PageState::new(0), Err(GridError::ZeroRowsPerPage));
    }
}
