// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use herdbook_grid::{
    Column, ColumnKind, DataGrid, GridCommand, GridEvent, GridOptions, Identified, SelectionMode,
    SortDirection,
};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Package {
    id: u64,
    lot_number: String,
    medication: Option<MedicationRef>,
    expires_on: Option<String>,
    unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct MedicationRef {
    id: String,
}

impl Identified for Package {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

fn package(id: u64, medication: Option<&str>) -> Package {
    Package {
        id,
        lot_number: format!("LOT-{id:04}"),
        medication: medication.map(|id| MedicationRef { id: id.to_owned() }),
        expires_on: Some(format!("2027-{:02}-15", 1 + id % 12)),
        unit_price: 4.25 * id as f64,
    }
}

/// Twelve packages; six carry oxytetracycline ("OXY").
fn packages() -> Vec<Package> {
    (1..=12)
        .map(|id| {
            let medication = if id % 2 == 0 { "OXY" } else { "PEN" };
            package(id, Some(medication))
        })
        .collect()
}

fn columns() -> Result<Vec<Column<Package>>> {
    Ok(vec![
        Column::new("Lot", "lot_number")?.filterable(),
        Column::new("Medication", "medication.id")?.filterable(),
        Column::new("Expires", "expires_on")?.kind(ColumnKind::Date),
        Column::new("Unit price", "unit_price")?.kind(ColumnKind::Currency),
    ])
}

fn options(rows_per_page: usize, selection: Option<SelectionMode>) -> GridOptions {
    GridOptions {
        rows_per_page,
        selection,
        ..GridOptions::default()
    }
}

fn page_sizes(grid: &mut DataGrid<Package>) -> Vec<usize> {
    let current = grid.current_page();
    let sizes = (1..=grid.page_count())
        .map(|page| {
            grid.go_to_page(page);
            grid.visible_rows().len()
        })
        .collect();
    grid.go_to_page(current);
    sizes
}

#[test]
fn filtering_recomputes_pages_and_clamps_current_page() -> Result<()> {
    let mut grid = DataGrid::new(columns()?, options(5, None))?.with_rows(packages());
    assert_eq!(page_sizes(&mut grid), vec![5, 5, 2]);

    grid.go_to_page(3);
    assert_eq!(grid.current_page(), 3);

    // A filter always starts over on page 1; shrink the dataset instead to
    // exercise the clamp.
    let oxy_only = packages()
        .into_iter()
        .filter(|package| package.id % 2 == 0)
        .collect::<Vec<_>>();
    grid.set_rows(oxy_only);
    assert_eq!(grid.current_page(), 2);
    assert_eq!(page_sizes(&mut grid), vec![5, 1]);

    grid.set_rows(packages());
    grid.go_to_page(3);
    grid.set_filter("oxy");
    assert_eq!(grid.filtered_len(), 6);
    assert_eq!(grid.current_page(), 1);
    assert_eq!(page_sizes(&mut grid), vec![5, 1]);
    Ok(())
}

#[test]
fn single_select_keeps_only_latest_row() -> Result<()> {
    let mut grid =
        DataGrid::new(columns()?, options(5, Some(SelectionMode::Single)))?.with_rows(packages());
    let seen = Rc::new(RefCell::new(Vec::<Vec<u64>>::new()));
    let sink = Rc::clone(&seen);
    grid.on_select(move |rows| {
        sink.borrow_mut()
            .push(rows.iter().map(|package| package.id).collect());
    });

    grid.toggle_row(&2);
    grid.toggle_row(&4);

    assert_eq!(grid.selected_ids(), vec![4]);
    assert_eq!(*seen.borrow(), vec![vec![2], vec![4]]);
    Ok(())
}

#[test]
fn nested_accessor_renders_or_blanks() -> Result<()> {
    let grid = DataGrid::new(columns()?, GridOptions::default())?
        .with_rows(vec![package(1, Some("M1")), package(2, None)]);
    let rows = grid.visible_rows();
    assert_eq!(rows[0].cells[1], "M1");
    assert_eq!(rows[1].cells[1], "");
    assert_eq!(rows[0].cells[2], "2/15/2027");
    assert_eq!(rows[1].cells[3], "$8.50");
    Ok(())
}

#[test]
fn select_all_accumulates_across_pages() -> Result<()> {
    let mut grid = DataGrid::new(columns()?, options(6, Some(SelectionMode::Multiple)))?
        .with_rows(packages());
    assert_eq!(grid.page_count(), 2);

    grid.dispatch(GridCommand::ToggleSelectAllVisible);
    assert!(grid.all_visible_selected());
    grid.dispatch(GridCommand::NextPage);
    let events = grid.dispatch(GridCommand::ToggleSelectAllVisible);

    assert_eq!(events, vec![GridEvent::SelectionChanged { selected: 12 }]);
    assert_eq!(grid.selected_ids(), (1..=12).collect::<Vec<_>>());
    Ok(())
}

#[test]
fn sorted_filtered_view_pages_in_order() -> Result<()> {
    let mut grid = DataGrid::new(columns()?, options(4, None))?.with_rows(packages());
    grid.set_filter("oxy");
    grid.toggle_sort(3)?;
    grid.toggle_sort(3)?;
    assert_eq!(grid.sort_direction_for(3), Some(SortDirection::Descending));

    let mut ids = Vec::new();
    for page in 1..=grid.page_count() {
        grid.go_to_page(page);
        ids.extend(grid.visible_records().iter().map(|package| package.id));
    }
    assert_eq!(ids, vec![12, 10, 8, 6, 4, 2]);

    grid.dispatch(GridCommand::ClearSort);
    grid.first_page();
    assert_eq!(grid.visible_ids(), vec![2, 4, 6, 8]);
    Ok(())
}

#[test]
fn selection_outlives_the_visible_window() -> Result<()> {
    let mut grid = DataGrid::new(columns()?, options(5, Some(SelectionMode::Multiple)))?
        .with_rows(packages());
    grid.select_row(&1, true);
    grid.select_row(&12, true);
    grid.set_filter("LOT-0012");
    grid.toggle_sort(0)?;

    assert_eq!(grid.visible_ids(), vec![12]);
    let selected = grid
        .selected_rows()
        .iter()
        .map(|package| package.lot_number.clone())
        .collect::<Vec<_>>();
    assert_eq!(selected, vec!["LOT-0001".to_owned(), "LOT-0012".to_owned()]);
    Ok(())
}
