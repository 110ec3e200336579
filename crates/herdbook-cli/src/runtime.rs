// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use herdbook_grid::{Column, DataGrid, GridOptions, Identified, project};
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::info;

/// Rows the grid reported through its callbacks, kept until the terminal is
/// released and they can be printed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub selected: Vec<Value>,
    pub clicked: Option<Value>,
}

pub fn build_grid<T>(
    columns: Vec<Column<T>>,
    rows: Vec<T>,
    options: GridOptions,
) -> Result<(DataGrid<T>, Rc<RefCell<Outcome>>)>
where
    T: Identified + Serialize + 'static,
{
    let mut grid = DataGrid::new(columns, options)
        .context("configure grid; check [grid] in the config")?
        .with_rows(rows);

    let outcome = Rc::new(RefCell::new(Outcome::default()));
    let sink = Rc::clone(&outcome);
    grid.on_select(move |rows| {
        sink.borrow_mut().selected = rows.iter().map(|row| project(*row)).collect();
    });
    let sink = Rc::clone(&outcome);
    grid.on_row_click(move |row| {
        sink.borrow_mut().clicked = Some(project(row));
    });
    Ok((grid, outcome))
}

/// Text printed once the grid closes: the selection for a picker, the last
/// clicked row otherwise.
pub fn report(outcome: &Outcome, selectable: bool) -> Result<Option<String>> {
    if selectable {
        return serde_json::to_string_pretty(&outcome.selected)
            .map(Some)
            .context("encode selected rows");
    }
    outcome
        .clicked
        .as_ref()
        .map(|row| serde_json::to_string_pretty(row).context("encode clicked row"))
        .transpose()
}

pub fn open<T>(
    title: &str,
    columns: Vec<Column<T>>,
    rows: Vec<T>,
    options: GridOptions,
    check_only: bool,
) -> Result<()>
where
    T: Identified + Serialize + 'static,
{
    let selectable = options.selection.is_some();
    let (mut grid, outcome) = build_grid(columns, rows, options)?;
    info!(
        title,
        rows = grid.rows().len(),
        columns = grid.columns().len(),
        selectable,
        "grid ready"
    );
    if check_only {
        return Ok(());
    }

    herdbook_tui::run_grid(title, &mut grid)?;
    if let Some(text) = report(&outcome.borrow(), selectable)? {
        println!("{text}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Outcome, build_grid, report};
    use anyhow::Result;
    use herdbook_app::{ViewKind, package_columns};
    use herdbook_grid::{GridCommand, GridOptions, SelectionMode};
    use serde_json::json;

    fn options(selection: Option<SelectionMode>) -> GridOptions {
        GridOptions {
            rows_per_page: 5,
            selection,
            ..GridOptions::default()
        }
    }

    #[test]
    fn picker_reports_selected_rows_as_json() -> Result<()> {
        let herd = herdbook_testkit::demo_herd(7);
        let (mut grid, outcome) = build_grid(
            package_columns()?,
            herd.packages,
            options(Some(ViewKind::Packages.picker_mode())),
        )?;
        let ids = grid.visible_ids();
        grid.dispatch(GridCommand::ToggleRow(ids[0]));
        grid.dispatch(GridCommand::ToggleRow(ids[2]));

        let outcome = outcome.borrow().clone();
        let reported = outcome
            .selected
            .iter()
            .map(|row| row["id"].clone())
            .collect::<Vec<_>>();
        assert_eq!(reported, vec![json!(ids[0].get()), json!(ids[2].get())]);
        assert_eq!(outcome.clicked, None);

        let Some(text) = report(&outcome, true)? else {
            panic!("picker always reports");
        };
        let decoded: serde_json::Value = serde_json::from_str(&text)?;
        assert_eq!(decoded.as_array().map(Vec::len), Some(2));
        Ok(())
    }

    #[test]
    fn single_picker_reports_latest_choice_only() -> Result<()> {
        let herd = herdbook_testkit::demo_herd(7);
        let (mut grid, outcome) = build_grid(
            herdbook_app::dose_columns()?,
            herd.doses,
            options(Some(ViewKind::Doses.picker_mode())),
        )?;
        let ids = grid.visible_ids();
        grid.dispatch(GridCommand::ToggleRow(ids[1]));
        grid.dispatch(GridCommand::ToggleRow(ids[3]));

        let selected = outcome.borrow().selected.clone();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0]["id"], json!(ids[3].get()));
        Ok(())
    }

    #[test]
    fn read_only_grid_reports_last_click() -> Result<()> {
        let herd = herdbook_testkit::demo_herd(7);
        let (mut grid, outcome) = build_grid(package_columns()?, herd.packages, options(None))?;
        assert_eq!(report(&outcome.borrow(), false)?, None);

        let second = grid.visible_ids()[1];
        assert!(grid.click_row(1));
        let Some(text) = report(&outcome.borrow(), false)? else {
            panic!("a clicked row is reported");
        };
        let decoded: serde_json::Value = serde_json::from_str(&text)?;
        assert_eq!(decoded["id"], json!(second.get()));
        Ok(())
    }

    #[test]
    fn empty_selection_reports_empty_array() -> Result<()> {
        assert_eq!(report(&Outcome::default(), true)?, Some("[]".to_owned()));
        Ok(())
    }
}
