// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::ops::Range;
use tracing::{debug, trace};

use crate::accessor::Accessor;
use crate::column::Column;
use crate::error::{GridError, Result};
use crate::filter::filter_rows;
use crate::format::ColumnKind;
use crate::page::{DEFAULT_ROWS_PER_PAGE, PageState};
use crate::record::{Identified, project};
use crate::selection::{SelectionController, SelectionMode};
use crate::sort::{SortDirection, SortState, sort_rows};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    pub rows_per_page: usize,
    /// When false, every filtered row is visible and page navigation is inert.
    pub show_pagination: bool,
    /// When false, the filter stage is skipped and the query is ignored.
    pub show_search_and_filter: bool,
    /// `None` builds a read-only grid.
    pub selection: Option<SelectionMode>,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            show_pagination: true,
            show_search_and_filter: true,
            selection: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCommand<Id> {
    SetFilter(String),
    ClearFilter,
    ToggleSort(usize),
    ClearSort,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    GoToPage(usize),
    SetRowsPerPage(usize),
    SelectRow { id: Id, checked: bool },
    ToggleRow(Id),
    ToggleSelectAllVisible,
    ClearSelection,
    ClickRow(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    FilterChanged { query: String, matches: usize },
    SortChanged(Option<SortState>),
    PageChanged { page: usize, page_count: usize },
    SelectionChanged { selected: usize },
    RowClicked { position: usize },
    Unavailable(GridUnavailable),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridUnavailable {
    NotSelectable,
    NoSuchColumn,
    NoSuchRow,
    ZeroRowsPerPage,
}

/// One row of the visible page, ready to hand to a presenter.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleRow<'a, T> {
    pub record: &'a T,
    pub selected: bool,
    pub cells: Vec<String>,
}

type SelectCallback<T> = Box<dyn FnMut(&[&T])>;
type RowClickCallback<T> = Box<dyn FnMut(&T)>;

/// Owns a dataset plus its filter, sort, page, and selection state.
///
/// Every state change re-derives the filtered and sorted view from scratch
/// and re-clamps the page; nothing is patched incrementally.
pub struct DataGrid<T: Identified> {
    columns: Vec<Column<T>>,
    rows: Vec<T>,
    projections: Vec<Value>,
    show_pagination: bool,
    show_search_and_filter: bool,
    filter: String,
    sort: Option<SortState>,
    page: PageState,
    selection: Option<SelectionController<T::Id>>,
    view: Vec<usize>,
    on_select: Option<SelectCallback<T>>,
    on_row_click: Option<RowClickCallback<T>>,
}

impl<T> DataGrid<T>
where
    T: Identified + Serialize,
{
    /// Fails on a zero page size or when two columns share an accessor,
    /// since sort state is keyed by accessor.
    pub fn new(columns: Vec<Column<T>>, options: GridOptions) -> Result<Self> {
        for (index, column) in columns.iter().enumerate() {
            if columns[..index]
                .iter()
                .any(|earlier| earlier.accessor() == column.accessor())
            {
                return Err(GridError::DuplicateAccessor {
                    path: column.accessor().path().to_owned(),
                });
            }
        }

        Ok(Self {
            columns,
            rows: Vec::new(),
            projections: Vec::new(),
            show_pagination: options.show_pagination,
            show_search_and_filter: options.show_search_and_filter,
            filter: String::new(),
            sort: None,
            page: PageState::new(options.rows_per_page)?,
            selection: options.selection.map(SelectionController::new),
            view: Vec::new(),
            on_select: None,
            on_row_click: None,
        })
    }

    pub fn with_rows(mut self, rows: Vec<T>) -> Self {
        self.set_rows(rows);
        self
    }

    /// Replaces the dataset. Selected ids are kept even when their rows are
    /// gone; they simply stop resolving.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.projections = rows.iter().map(project).collect();
        self.rows = rows;
        debug!(rows = self.rows.len(), "dataset replaced");
        self.refresh();
    }

    /// Called with the selected rows, resolved against the full dataset,
    /// after every selection mutation.
    pub fn on_select<F>(&mut self, callback: F)
    where
        F: FnMut(&[&T]) + 'static,
    {
        self.on_select = Some(Box::new(callback));
    }

    pub fn on_row_click<F>(&mut self, callback: F)
    where
        F: FnMut(&T) + 'static,
    {
        self.on_row_click = Some(Box::new(callback));
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn sort_direction_for(&self, column: usize) -> Option<SortDirection> {
        let column = self.columns.get(column)?;
        self.sort
            .as_ref()
            .filter(|sort| sort.key == *column.accessor())
            .map(|sort| sort.direction)
    }

    pub fn current_page(&self) -> usize {
        self.page.current_page()
    }

    pub fn rows_per_page(&self) -> usize {
        self.page.rows_per_page().get()
    }

    pub fn show_pagination(&self) -> bool {
        self.show_pagination
    }

    pub fn show_search_and_filter(&self) -> bool {
        self.show_search_and_filter
    }

    /// Zero for an empty view. Without pagination everything is one page.
    pub fn page_count(&self) -> usize {
        if self.show_pagination {
            self.page.page_count(self.view.len())
        } else {
            usize::from(!self.view.is_empty())
        }
    }

    /// Rows left after filtering, across all pages.
    pub fn filtered_len(&self) -> usize {
        self.view.len()
    }

    /// Positions of the visible window within the filtered and sorted view.
    pub fn visible_range(&self) -> Range<usize> {
        if self.show_pagination {
            self.page.bounds(self.view.len())
        } else {
            0..self.view.len()
        }
    }

    pub fn visible_records(&self) -> Vec<&T> {
        self.view[self.visible_range()]
            .iter()
            .map(|&index| &self.rows[index])
            .collect()
    }

    pub fn visible_ids(&self) -> Vec<T::Id> {
        self.view[self.visible_range()]
            .iter()
            .map(|&index| self.rows[index].id())
            .collect()
    }

    pub fn visible_rows(&self) -> Vec<VisibleRow<'_, T>> {
        self.view[self.visible_range()]
            .iter()
            .map(|&index| {
                let record = &self.rows[index];
                let selected = self.is_selected(&record.id());
                let cells = self
                    .columns
                    .iter()
                    .map(|column| column.cell_text(&self.projections[index], record, selected))
                    .collect();
                VisibleRow {
                    record,
                    selected,
                    cells,
                }
            })
            .collect()
    }

    pub fn is_selectable(&self) -> bool {
        self.selection.is_some()
    }

    pub fn selection_mode(&self) -> Option<SelectionMode> {
        self.selection.as_ref().map(SelectionController::mode)
    }

    pub fn is_selected(&self, id: &T::Id) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|selection| selection.is_selected(id))
    }

    pub fn selected_count(&self) -> usize {
        self.selection
            .as_ref()
            .map(SelectionController::len)
            .unwrap_or(0)
    }

    pub fn selected_ids(&self) -> Vec<T::Id> {
        self.selection
            .as_ref()
            .map(|selection| selection.selected_ids().cloned().collect())
            .unwrap_or_default()
    }

    pub fn selected_rows(&self) -> Vec<&T> {
        self.selection
            .as_ref()
            .map(|selection| selection.resolve(&self.rows))
            .unwrap_or_default()
    }

    pub fn all_visible_selected(&self) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|selection| selection.all_selected(&self.visible_ids()))
    }

    /// Any call resets the page to 1, even when the query is unchanged.
    pub fn set_filter(&mut self, query: impl Into<String>) {
        self.filter = query.into();
        self.page.reset();
        self.refresh();
        debug!(query = %self.filter, matches = self.view.len(), "filter applied");
    }

    pub fn set_sort(&mut self, sort: Option<SortState>) {
        self.sort = sort;
        self.refresh();
    }

    /// Sorts by `column` ascending, or flips the direction when the grid is
    /// already sorted by that column.
    pub fn toggle_sort(&mut self, column: usize) -> Result<()> {
        let count = self.columns.len();
        let key = self
            .columns
            .get(column)
            .ok_or(GridError::UnknownColumn {
                index: column,
                count,
            })?
            .accessor()
            .clone();

        let next = match &self.sort {
            Some(current) if current.key == key => SortState {
                key,
                direction: current.direction.toggled(),
            },
            _ => SortState::ascending(key),
        };
        debug!(key = %next.key, direction = next.direction.as_str(), "sort toggled");
        self.set_sort(Some(next));
        Ok(())
    }

    pub fn next_page(&mut self) -> bool {
        self.show_pagination && self.page.next(self.view.len())
    }

    pub fn prev_page(&mut self) -> bool {
        self.show_pagination && self.page.prev(self.view.len())
    }

    pub fn first_page(&mut self) -> bool {
        self.show_pagination && self.page.first(self.view.len())
    }

    pub fn last_page(&mut self) -> bool {
        self.show_pagination && self.page.last(self.view.len())
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.show_pagination && self.page.go_to(page, self.view.len())
    }

    pub fn set_rows_per_page(&mut self, rows_per_page: usize) -> Result<()> {
        self.page.set_rows_per_page(rows_per_page, self.view.len())
    }

    /// Returns false on a read-only grid, and when checking an id with no row
    /// in the dataset. Unchecking always applies, so ids left over from a
    /// replaced dataset can still be dropped.
    pub fn select_row(&mut self, id: &T::Id, checked: bool) -> bool {
        if checked && !self.contains_id(id) {
            return false;
        }
        let Some(selection) = self.selection.as_mut() else {
            return false;
        };
        selection.select_row(id, checked);
        self.notify_selection();
        true
    }

    pub fn toggle_row(&mut self, id: &T::Id) -> bool {
        let checked = !self.is_selected(id);
        self.select_row(id, checked)
    }

    /// Page-scoped select-all over the visible window.
    pub fn toggle_select_all_visible(&mut self) -> bool {
        let visible = self.visible_ids();
        let Some(selection) = self.selection.as_mut() else {
            return false;
        };
        selection.toggle_all(&visible);
        self.notify_selection();
        true
    }

    pub fn clear_selection(&mut self) -> bool {
        let Some(selection) = self.selection.as_mut() else {
            return false;
        };
        selection.clear();
        self.notify_selection();
        true
    }

    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        match self.selection.as_mut() {
            Some(selection) => {
                if selection.set_mode(mode) {
                    self.notify_selection();
                }
            }
            None => self.selection = Some(SelectionController::new(mode)),
        }
    }

    pub fn contains_id(&self, id: &T::Id) -> bool {
        self.rows.iter().any(|row| row.id() == *id)
    }

    /// `position` indexes the visible window.
    pub fn click_row(&mut self, position: usize) -> bool {
        let Some(&index) = self.view[self.visible_range()].get(position) else {
            return false;
        };
        trace!(position, "row clicked");
        if let Some(callback) = self.on_row_click.as_mut() {
            callback(&self.rows[index]);
        }
        true
    }

    pub fn dispatch(&mut self, command: GridCommand<T::Id>) -> Vec<GridEvent> {
        match command {
            GridCommand::SetFilter(query) => {
                let before = self.page.current_page();
                self.set_filter(query);
                self.filter_events(before)
            }
            GridCommand::ClearFilter => {
                let before = self.page.current_page();
                self.set_filter(String::new());
                self.filter_events(before)
            }
            GridCommand::ToggleSort(column) => match self.toggle_sort(column) {
                Ok(()) => vec![GridEvent::SortChanged(self.sort.clone())],
                Err(_) => vec![GridEvent::Unavailable(GridUnavailable::NoSuchColumn)],
            },
            GridCommand::ClearSort => {
                self.set_sort(None);
                vec![GridEvent::SortChanged(None)]
            }
            GridCommand::NextPage => {
                let moved = self.next_page();
                self.page_events(moved)
            }
            GridCommand::PrevPage => {
                let moved = self.prev_page();
                self.page_events(moved)
            }
            GridCommand::FirstPage => {
                let moved = self.first_page();
                self.page_events(moved)
            }
            GridCommand::LastPage => {
                let moved = self.last_page();
                self.page_events(moved)
            }
            GridCommand::GoToPage(page) => {
                let moved = self.go_to_page(page);
                self.page_events(moved)
            }
            GridCommand::SetRowsPerPage(rows_per_page) => {
                let before = (self.page.current_page(), self.page_count());
                match self.set_rows_per_page(rows_per_page) {
                    Ok(()) => {
                        let moved = before != (self.page.current_page(), self.page_count());
                        self.page_events(moved)
                    }
                    Err(_) => vec![GridEvent::Unavailable(GridUnavailable::ZeroRowsPerPage)],
                }
            }
            GridCommand::SelectRow { id, checked } => {
                let applied = self.select_row(&id, checked);
                self.row_selection_events(applied, &id)
            }
            GridCommand::ToggleRow(id) => {
                let applied = self.toggle_row(&id);
                self.row_selection_events(applied, &id)
            }
            GridCommand::ToggleSelectAllVisible => {
                let applied = self.toggle_select_all_visible();
                self.selection_events(applied)
            }
            GridCommand::ClearSelection => {
                let applied = self.clear_selection();
                self.selection_events(applied)
            }
            GridCommand::ClickRow(position) => {
                if self.click_row(position) {
                    vec![GridEvent::RowClicked { position }]
                } else {
                    vec![GridEvent::Unavailable(GridUnavailable::NoSuchRow)]
                }
            }
        }
    }

    fn filter_events(&self, page_before: usize) -> Vec<GridEvent> {
        let mut events = vec![GridEvent::FilterChanged {
            query: self.filter.clone(),
            matches: self.view.len(),
        }];
        if page_before != self.page.current_page() {
            events.push(self.page_changed());
        }
        events
    }

    fn page_events(&self, moved: bool) -> Vec<GridEvent> {
        if moved {
            vec![self.page_changed()]
        } else {
            Vec::new()
        }
    }

    fn page_changed(&self) -> GridEvent {
        GridEvent::PageChanged {
            page: self.page.current_page(),
            page_count: self.page_count(),
        }
    }

    fn selection_events(&self, applied: bool) -> Vec<GridEvent> {
        if applied {
            vec![GridEvent::SelectionChanged {
                selected: self.selected_count(),
            }]
        } else {
            vec![GridEvent::Unavailable(GridUnavailable::NotSelectable)]
        }
    }

    fn row_selection_events(&self, applied: bool, id: &T::Id) -> Vec<GridEvent> {
        if !applied && self.is_selectable() && !self.contains_id(id) {
            return vec![GridEvent::Unavailable(GridUnavailable::NoSuchRow)];
        }
        self.selection_events(applied)
    }

    fn sort_kind(&self, key: &Accessor) -> ColumnKind {
        self.columns
            .iter()
            .find(|column| column.accessor() == key)
            .map(Column::value_kind)
            .unwrap_or_default()
    }

    fn refresh(&mut self) {
        let mut view = if self.show_search_and_filter {
            filter_rows(&self.projections, &self.columns, &self.filter)
        } else {
            (0..self.rows.len()).collect()
        };

        if let Some(sort) = &self.sort {
            let kind = self.sort_kind(&sort.key);
            sort_rows(&mut view, &self.projections, &sort.key, kind, sort.direction);
        }
        self.view = view;

        let before = self.page.current_page();
        if self.page.clamp(self.view.len()) {
            debug!(
                from = before,
                to = self.page.current_page(),
                rows = self.view.len(),
                "page clamped"
            );
        }
    }

    fn notify_selection(&mut self) {
        let Some(selection) = &self.selection else {
            return;
        };
        let rows = selection.resolve(&self.rows);
        trace!(selected = selection.len(), resolved = rows.len(), "selection changed");
        if let Some(callback) = self.on_select.as_mut() {
            callback(&rows);
        }
    }
}

impl<T> fmt::Debug for DataGrid<T>
where
    T: Identified,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataGrid")
            .field("columns", &self.columns.len())
            .field("rows", &self.rows.len())
            .field("filter", &self.filter)
            .field("sort", &self.sort)
            .field("page", &self.page)
            .field("selection", &self.selection)
            .field("view", &self.view.len())
            .finish_non_exhaustive()
    }
}
