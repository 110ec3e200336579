// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod accessor;
pub mod column;
pub mod error;
pub mod filter;
pub mod format;
pub mod grid;
pub mod page;
pub mod record;
pub mod selection;
pub mod sort;

pub use accessor::Accessor;
pub use column::{CellRenderer, Column, ColumnSpec, RenderFn};
pub use error::{GridError, Result};
pub use filter::filter_rows;
pub use format::{ColumnKind, format_value, plain_text};
pub use grid::{DataGrid, GridCommand, GridEvent, GridOptions, GridUnavailable, VisibleRow};
pub use page::{DEFAULT_ROWS_PER_PAGE, PageState, clamp_page, page_bounds, page_count, page_window};
pub use record::{Identified, project};
pub use selection::{SelectionController, SelectionMode};
pub use sort::{SortDirection, SortState, compare_values, sort_rows};
