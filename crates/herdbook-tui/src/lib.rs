// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use herdbook_grid::{
    DataGrid, GridCommand, GridEvent, GridUnavailable, Identified, SelectionMode, SortDirection,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use serde::Serialize;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::debug;

const CHECKED: &str = "[x]";
const UNCHECKED: &str = "[ ]";
const NO_CHECKBOX: &str = "   ";
const EMPTY_STATE: &str = "No records found";
const SORT_ASC: &str = " ↑";
const SORT_DESC: &str = " ↓";
const STATUS_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UiCommand {
    MoveRow(isize),
    MoveColumn(isize),
    PrevPage,
    NextPage,
    FirstPage,
    LastPage,
    ToggleSort,
    ClearSort,
    OpenSearch,
    SearchInput(char),
    SearchBackspace,
    SearchAccept,
    SearchCancel,
    ToggleRow,
    ToggleAllVisible,
    ClickRow,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum UiEvent {
    CursorUpdated,
    Status(String),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewState {
    cursor_row: usize,
    cursor_col: usize,
    searching: bool,
    status: Option<String>,
    status_token: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InternalEvent {
    ClearStatus { token: u64 },
}

/// Runs one grid full-screen until the user quits. Selection and row-click
/// output reaches the caller through the grid's own callbacks.
pub fn run_grid<T>(title: &str, grid: &mut DataGrid<T>) -> Result<()>
where
    T: Identified + Serialize,
{
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view = ViewState::default();
    let (internal_tx, internal_rx) = mpsc::channel();
    debug!(title, rows = grid.rows().len(), "grid opened");

    let mut result = Ok(());
    loop {
        process_internal_events(&mut view, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, title, grid, &view)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if !has_event {
            continue;
        }
        match event::read().context("read event") {
            Ok(Event::Key(key)) => {
                if handle_key_event(grid, &mut view, &internal_tx, key) {
                    break;
                }
            }
            Ok(_) => {}
            Err(error) => {
                result = Err(error);
                break;
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    debug!(title, selected = grid.selected_count(), "grid closed");
    result
}

fn process_internal_events(view: &mut ViewState, rx: &Receiver<InternalEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view.status_token => {
                view.status = None;
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_TTL);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(view: &mut ViewState, internal_tx: &Sender<InternalEvent>, message: String) {
    view.status = Some(message);
    view.status_token = view.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view.status_token);
}

/// Returns true when the loop should exit.
fn handle_key_event<T>(
    grid: &mut DataGrid<T>,
    view: &mut ViewState,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool
where
    T: Identified + Serialize,
{
    let Some(command) = ui_command_for_key(key, view.searching) else {
        return false;
    };
    match apply_ui_command(grid, view, command) {
        UiEvent::Quit => true,
        UiEvent::Status(message) => {
            emit_status(view, internal_tx, message);
            false
        }
        UiEvent::CursorUpdated => false,
    }
}

fn ui_command_for_key(key: KeyEvent, searching: bool) -> Option<UiCommand> {
    if let (KeyCode::Char('q'), modifiers) = (key.code, key.modifiers)
        && modifiers.contains(KeyModifiers::CONTROL)
    {
        return Some(UiCommand::Quit);
    }

    if searching {
        return match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => Some(UiCommand::SearchCancel),
            (KeyCode::Enter, _) => Some(UiCommand::SearchAccept),
            (KeyCode::Backspace, _) => Some(UiCommand::SearchBackspace),
            (KeyCode::Char(ch), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
                Some(UiCommand::SearchInput(ch))
            }
            _ => None,
        };
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => Some(UiCommand::Quit),
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(UiCommand::MoveRow(1)),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(UiCommand::MoveRow(-1)),
        (KeyCode::Char('h'), _) => Some(UiCommand::MoveColumn(-1)),
        (KeyCode::Char('l'), _) => Some(UiCommand::MoveColumn(1)),
        (KeyCode::Left, _) | (KeyCode::Char('['), _) => Some(UiCommand::PrevPage),
        (KeyCode::Right, _) | (KeyCode::Char(']'), _) => Some(UiCommand::NextPage),
        (KeyCode::Char('g'), _) => Some(UiCommand::FirstPage),
        (KeyCode::Char('G'), _) => Some(UiCommand::LastPage),
        (KeyCode::Char('s'), KeyModifiers::NONE) => Some(UiCommand::ToggleSort),
        (KeyCode::Char('S'), _) => Some(UiCommand::ClearSort),
        (KeyCode::Char('/'), _) => Some(UiCommand::OpenSearch),
        (KeyCode::Char(' '), _) => Some(UiCommand::ToggleRow),
        (KeyCode::Char('a'), KeyModifiers::NONE) => Some(UiCommand::ToggleAllVisible),
        (KeyCode::Enter, _) => Some(UiCommand::ClickRow),
        _ => None,
    }
}

fn apply_ui_command<T>(grid: &mut DataGrid<T>, view: &mut ViewState, command: UiCommand) -> UiEvent
where
    T: Identified + Serialize,
{
    let event = match command {
        UiCommand::Quit => return UiEvent::Quit,
        UiCommand::MoveRow(delta) => {
            view.cursor_row = shift(view.cursor_row, delta);
            UiEvent::CursorUpdated
        }
        UiCommand::MoveColumn(delta) => {
            view.cursor_col = shift(view.cursor_col, delta);
            UiEvent::CursorUpdated
        }
        UiCommand::PrevPage => dispatch_status(grid, GridCommand::PrevPage),
        UiCommand::NextPage => dispatch_status(grid, GridCommand::NextPage),
        UiCommand::FirstPage => dispatch_status(grid, GridCommand::FirstPage),
        UiCommand::LastPage => dispatch_status(grid, GridCommand::LastPage),
        UiCommand::ToggleSort => dispatch_status(grid, GridCommand::ToggleSort(view.cursor_col)),
        UiCommand::ClearSort => dispatch_status(grid, GridCommand::ClearSort),
        UiCommand::OpenSearch => {
            if !grid.show_search_and_filter() {
                return UiEvent::Status("search disabled".to_owned());
            }
            view.searching = true;
            UiEvent::Status("search: enter keeps, esc clears".to_owned())
        }
        UiCommand::SearchInput(ch) => {
            let mut query = grid.filter().to_owned();
            query.push(ch);
            grid.dispatch(GridCommand::SetFilter(query));
            UiEvent::CursorUpdated
        }
        UiCommand::SearchBackspace => {
            let mut query = grid.filter().to_owned();
            query.pop();
            grid.dispatch(GridCommand::SetFilter(query));
            UiEvent::CursorUpdated
        }
        UiCommand::SearchAccept => {
            view.searching = false;
            UiEvent::Status(match_status(grid.filter(), grid.filtered_len()))
        }
        UiCommand::SearchCancel => {
            view.searching = false;
            dispatch_status(grid, GridCommand::ClearFilter)
        }
        UiCommand::ToggleRow => match grid.visible_ids().get(view.cursor_row).cloned() {
            Some(id) => dispatch_status(grid, GridCommand::ToggleRow(id)),
            None => UiEvent::Status(unavailable_status(GridUnavailable::NoSuchRow).to_owned()),
        },
        UiCommand::ToggleAllVisible => dispatch_status(grid, GridCommand::ToggleSelectAllVisible),
        UiCommand::ClickRow => dispatch_status(grid, GridCommand::ClickRow(view.cursor_row)),
    };
    clamp_cursor(grid, view);
    event
}

fn dispatch_status<T>(grid: &mut DataGrid<T>, command: GridCommand<T::Id>) -> UiEvent
where
    T: Identified + Serialize,
{
    let messages = grid
        .dispatch(command)
        .iter()
        .map(|event| status_text(grid, event))
        .collect::<Vec<_>>();
    if messages.is_empty() {
        UiEvent::CursorUpdated
    } else {
        UiEvent::Status(messages.join(", "))
    }
}

fn status_text<T>(grid: &DataGrid<T>, event: &GridEvent) -> String
where
    T: Identified + Serialize,
{
    match event {
        GridEvent::FilterChanged { query, matches } => match_status(query, *matches),
        GridEvent::SortChanged(None) => "sort cleared".to_owned(),
        GridEvent::SortChanged(Some(sort)) => {
            let header = grid
                .columns()
                .iter()
                .find(|column| *column.accessor() == sort.key)
                .map(|column| column.header())
                .unwrap_or(sort.key.path());
            format!("sort {header} {}", sort.direction.as_str())
        }
        GridEvent::PageChanged { page, page_count } => format!("page {page}/{page_count}"),
        GridEvent::SelectionChanged { selected } => format!("{selected} selected"),
        GridEvent::RowClicked { position } => format!("opened row {}", position + 1),
        GridEvent::Unavailable(reason) => unavailable_status(*reason).to_owned(),
    }
}

fn unavailable_status(reason: GridUnavailable) -> &'static str {
    match reason {
        GridUnavailable::NotSelectable => "selection unavailable",
        GridUnavailable::NoSuchColumn => "sort unavailable",
        GridUnavailable::NoSuchRow => "no row under cursor",
        GridUnavailable::ZeroRowsPerPage => "rows per page must be positive",
    }
}

fn match_status(query: &str, matches: usize) -> String {
    if query.is_empty() {
        return "search cleared".to_owned();
    }
    let noun = if matches == 1 { "match" } else { "matches" };
    format!("search {query:?}: {matches} {noun}")
}

fn shift(current: usize, delta: isize) -> usize {
    if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta.unsigned_abs())
    }
}

fn clamp_cursor<T>(grid: &DataGrid<T>, view: &mut ViewState)
where
    T: Identified + Serialize,
{
    let rows = grid.visible_range().len();
    view.cursor_row = view.cursor_row.min(rows.saturating_sub(1));
    view.cursor_col = view.cursor_col.min(grid.columns().len().saturating_sub(1));
}

fn render<T>(frame: &mut ratatui::Frame<'_>, title: &str, grid: &DataGrid<T>, view: &ViewState)
where
    T: Identified + Serialize,
{
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let search_style = if view.searching {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };
    let search = Paragraph::new(search_line_text(grid, view))
        .style(search_style)
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(search, layout[0]);

    render_table(frame, layout[1], grid, view);

    let status = view.status.clone().unwrap_or_else(|| help_text(grid).to_owned());
    let footer = Paragraph::new(format!("{}\n{status}", footer_text(grid)))
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(footer, layout[2]);
}

fn render_table<T>(frame: &mut ratatui::Frame<'_>, area: Rect, grid: &DataGrid<T>, view: &ViewState)
where
    T: Identified + Serialize,
{
    let selectable = grid.is_selectable();
    let mut widths = Vec::with_capacity(grid.columns().len() + 1);
    if selectable {
        widths.push(Constraint::Length(3));
    }
    widths.extend(grid.columns().iter().map(|_| Constraint::Min(8)));

    let header_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let mut header_cells = Vec::with_capacity(widths.len());
    if selectable {
        header_cells.push(Cell::from(select_all_marker(grid)).style(header_style));
    }
    header_cells.extend((0..grid.columns().len()).map(|index| {
        let mut style = header_style;
        if index == view.cursor_col {
            style = style.fg(Color::Cyan);
        }
        Cell::from(header_label(grid, index)).style(style)
    }));
    let header = Row::new(header_cells);

    let visible = grid.visible_rows();
    let rows = if visible.is_empty() {
        vec![Row::new(vec![
            Cell::from(EMPTY_STATE).style(Style::default().fg(Color::DarkGray)),
        ])]
    } else {
        visible
            .into_iter()
            .enumerate()
            .map(|(row_index, row)| {
                let cursor_row = row_index == view.cursor_row;
                let mut row_style = Style::default();
                if row.selected {
                    row_style = row_style.fg(Color::Green);
                }
                if cursor_row {
                    row_style = row_style.bg(Color::DarkGray);
                }

                let mut cells = Vec::with_capacity(row.cells.len() + 1);
                if selectable {
                    cells.push(Cell::from(checkbox(row.selected)).style(row_style));
                }
                cells.extend(row.cells.into_iter().enumerate().map(|(column, text)| {
                    let style = if cursor_row && column == view.cursor_col {
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        row_style
                    };
                    Cell::from(text).style(style)
                }));
                Row::new(cells)
            })
            .collect()
    };

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(table_title(grid))
                .borders(Borders::ALL),
        );
    frame.render_widget(table, area);
}

fn header_label<T>(grid: &DataGrid<T>, column: usize) -> String
where
    T: Identified + Serialize,
{
    let Some(spec) = grid.columns().get(column) else {
        return String::new();
    };
    let mut label = spec.header().to_owned();
    match grid.sort_direction_for(column) {
        Some(SortDirection::Ascending) => label.push_str(SORT_ASC),
        Some(SortDirection::Descending) => label.push_str(SORT_DESC),
        None => {}
    }
    label
}

fn checkbox(selected: bool) -> &'static str {
    if selected { CHECKED } else { UNCHECKED }
}

/// Single mode has no select-all, so its header cell stays blank.
fn select_all_marker<T>(grid: &DataGrid<T>) -> &'static str
where
    T: Identified + Serialize,
{
    match grid.selection_mode() {
        Some(SelectionMode::Multiple) => checkbox(grid.all_visible_selected()),
        Some(SelectionMode::Single) | None => NO_CHECKBOX,
    }
}

fn table_title<T>(grid: &DataGrid<T>) -> String
where
    T: Identified + Serialize,
{
    let shown = grid.filtered_len();
    let total = grid.rows().len();
    let count = if shown == total {
        format!("{total} rows")
    } else {
        format!("{shown} of {total} rows")
    };
    match grid.selection_mode() {
        Some(mode) => format!("{count} | pick {}", mode.as_str()),
        None => count,
    }
}

fn search_line_text<T>(grid: &DataGrid<T>, view: &ViewState) -> String
where
    T: Identified + Serialize,
{
    if !grid.show_search_and_filter() {
        return String::new();
    }
    if view.searching {
        return format!("/{}_", grid.filter());
    }
    if grid.filter().is_empty() {
        "press / to search".to_owned()
    } else {
        format!("search: {}", grid.filter())
    }
}

fn footer_text<T>(grid: &DataGrid<T>) -> String
where
    T: Identified + Serialize,
{
    let range = grid.visible_range();
    let total = grid.filtered_len();
    let showing = if range.is_empty() {
        format!("showing 0 of {total}")
    } else {
        format!("showing {}-{} of {total}", range.start + 1, range.end)
    };

    let mut parts = Vec::with_capacity(3);
    if grid.show_pagination() {
        parts.push(format!(
            "page {}/{}",
            grid.current_page(),
            grid.page_count().max(1)
        ));
    }
    parts.push(showing);
    if grid.is_selectable() {
        parts.push(format!("{} selected", grid.selected_count()));
    }
    parts.join("  ")
}

fn help_text<T>(grid: &DataGrid<T>) -> &'static str
where
    T: Identified + Serialize,
{
    match grid.selection_mode() {
        Some(SelectionMode::Multiple) => {
            "j/k row  h/l column  [/] page  s sort  / search  space pick  a pick page  q done"
        }
        Some(SelectionMode::Single) => {
            "j/k row  h/l column  [/] page  s sort  / search  space pick  q done"
        }
        None => "j/k row  h/l column  [/] page  s sort  / search  enter open  q quit",
    }
}

#[cfg(test)]
mod tests {
    use super::{
        UiCommand, UiEvent, ViewState, apply_ui_command, footer_text, header_label,
        search_line_text, select_all_marker, table_title, ui_command_for_key,
    };
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use herdbook_app::animal_columns;
    use herdbook_grid::{Column, ColumnKind, DataGrid, GridOptions, Identified, SelectionMode};
    use herdbook_testkit::demo_herd;
    use serde::Serialize;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Serialize)]
    struct Ewe {
        id: u32,
        tag: String,
        lambs: u32,
    }

    impl Identified for Ewe {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }
    }

    fn flock(count: u32) -> Vec<Ewe> {
        (1..=count)
            .map(|id| Ewe {
                id,
                tag: format!("E-{id:02}"),
                lambs: id % 3,
            })
            .collect()
    }

    fn grid(count: u32, selection: Option<SelectionMode>) -> DataGrid<Ewe> {
        let columns = vec![
            Column::new("Tag", "tag").expect("valid accessor").filterable(),
            Column::new("Lambs", "lambs")
                .expect("valid accessor")
                .kind(ColumnKind::Number),
        ];
        let options = GridOptions {
            rows_per_page: 5,
            selection,
            ..GridOptions::default()
        };
        DataGrid::new(columns, options)
            .expect("valid options")
            .with_rows(flock(count))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(grid: &mut DataGrid<Ewe>, view: &mut ViewState, code: KeyCode) -> Option<UiEvent> {
        let command = ui_command_for_key(key(code), view.searching)?;
        Some(apply_ui_command(grid, view, command))
    }

    #[test]
    fn navigation_keys_map_to_commands() {
        assert_eq!(
            ui_command_for_key(key(KeyCode::Char('j')), false),
            Some(UiCommand::MoveRow(1))
        );
        assert_eq!(
            ui_command_for_key(key(KeyCode::Char('h')), false),
            Some(UiCommand::MoveColumn(-1))
        );
        assert_eq!(
            ui_command_for_key(key(KeyCode::Right), false),
            Some(UiCommand::NextPage)
        );
        assert_eq!(
            ui_command_for_key(key(KeyCode::Char('[')), false),
            Some(UiCommand::PrevPage)
        );
        assert_eq!(
            ui_command_for_key(key(KeyCode::Char('G')), false),
            Some(UiCommand::LastPage)
        );
        assert_eq!(
            ui_command_for_key(key(KeyCode::Char(' ')), false),
            Some(UiCommand::ToggleRow)
        );
        assert_eq!(ui_command_for_key(key(KeyCode::Tab), false), None);
    }

    #[test]
    fn search_mode_captures_letters() {
        assert_eq!(
            ui_command_for_key(key(KeyCode::Char('q')), true),
            Some(UiCommand::SearchInput('q'))
        );
        assert_eq!(
            ui_command_for_key(key(KeyCode::Esc), true),
            Some(UiCommand::SearchCancel)
        );
        assert_eq!(
            ui_command_for_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL), true),
            Some(UiCommand::Quit)
        );
        assert_eq!(
            ui_command_for_key(key(KeyCode::Esc), false),
            Some(UiCommand::Quit)
        );
    }

    #[test]
    fn typing_filters_live_and_escape_clears() {
        let mut grid = grid(12, None);
        let mut view = ViewState::default();
        press(&mut grid, &mut view, KeyCode::Char('/'));
        assert!(view.searching);

        press(&mut grid, &mut view, KeyCode::Char('e'));
        press(&mut grid, &mut view, KeyCode::Char('-'));
        press(&mut grid, &mut view, KeyCode::Char('1'));
        assert_eq!(grid.filter(), "e-1");
        assert_eq!(grid.filtered_len(), 3);
        assert_eq!(search_line_text(&grid, &view), "/e-1_");

        press(&mut grid, &mut view, KeyCode::Backspace);
        assert_eq!(grid.filter(), "e-");

        let event = press(&mut grid, &mut view, KeyCode::Esc);
        assert_eq!(event, Some(UiEvent::Status("search cleared".to_owned())));
        assert!(!view.searching);
        assert_eq!(grid.filtered_len(), 12);
    }

    #[test]
    fn enter_keeps_search_and_reports_matches() {
        let mut grid = grid(12, None);
        let mut view = ViewState::default();
        press(&mut grid, &mut view, KeyCode::Char('/'));
        press(&mut grid, &mut view, KeyCode::Char('7'));
        let event = press(&mut grid, &mut view, KeyCode::Enter);
        assert_eq!(
            event,
            Some(UiEvent::Status("search \"7\": 1 match".to_owned()))
        );
        assert_eq!(search_line_text(&grid, &view), "search: 7");
    }

    #[test]
    fn footer_reports_page_and_window() {
        let mut grid = grid(12, Some(SelectionMode::Multiple));
        assert_eq!(footer_text(&grid), "page 1/3  showing 1-5 of 12  0 selected");
        grid.last_page();
        assert_eq!(footer_text(&grid), "page 3/3  showing 11-12 of 12  0 selected");
        grid.set_filter("nothing");
        assert_eq!(footer_text(&grid), "page 1/1  showing 0 of 0  0 selected");
    }

    #[test]
    fn sort_key_marks_header_and_cycles() {
        let mut grid = grid(6, None);
        let mut view = ViewState::default();
        press(&mut grid, &mut view, KeyCode::Char('l'));
        let event = press(&mut grid, &mut view, KeyCode::Char('s'));
        assert_eq!(event, Some(UiEvent::Status("sort Lambs asc".to_owned())));
        assert_eq!(header_label(&grid, 1), "Lambs ↑");
        press(&mut grid, &mut view, KeyCode::Char('s'));
        assert_eq!(header_label(&grid, 1), "Lambs ↓");
        press(&mut grid, &mut view, KeyCode::Char('S'));
        assert_eq!(header_label(&grid, 1), "Lambs");
    }

    #[test]
    fn space_and_a_pick_rows() {
        let mut grid = grid(12, Some(SelectionMode::Multiple));
        let mut view = ViewState::default();
        press(&mut grid, &mut view, KeyCode::Char('j'));
        let event = press(&mut grid, &mut view, KeyCode::Char(' '));
        assert_eq!(event, Some(UiEvent::Status("1 selected".to_owned())));
        assert_eq!(grid.selected_ids(), vec![2]);

        press(&mut grid, &mut view, KeyCode::Char('a'));
        assert_eq!(select_all_marker(&grid), "[x]");
        press(&mut grid, &mut view, KeyCode::Char(']'));
        assert_eq!(select_all_marker(&grid), "[ ]");
        assert_eq!(grid.selected_count(), 5);
    }

    #[test]
    fn read_only_grid_reports_selection_unavailable() {
        let mut grid = grid(3, None);
        let mut view = ViewState::default();
        let event = press(&mut grid, &mut view, KeyCode::Char(' '));
        assert_eq!(
            event,
            Some(UiEvent::Status("selection unavailable".to_owned()))
        );
    }

    #[test]
    fn enter_clicks_cursor_row() {
        let mut grid = grid(12, None);
        let clicked = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&clicked);
        grid.on_row_click(move |ewe| sink.borrow_mut().push(ewe.tag.clone()));

        let mut view = ViewState::default();
        press(&mut grid, &mut view, KeyCode::Char(']'));
        press(&mut grid, &mut view, KeyCode::Char('j'));
        press(&mut grid, &mut view, KeyCode::Enter);
        assert_eq!(*clicked.borrow(), vec!["E-07".to_owned()]);
    }

    #[test]
    fn cursor_clamps_to_short_last_page() {
        let mut grid = grid(12, None);
        let mut view = ViewState::default();
        for _ in 0..4 {
            press(&mut grid, &mut view, KeyCode::Char('j'));
        }
        press(&mut grid, &mut view, KeyCode::Char('G'));
        assert_eq!(view.cursor_row, 1);
        for _ in 0..5 {
            press(&mut grid, &mut view, KeyCode::Char('l'));
        }
        assert_eq!(view.cursor_col, 1);
    }

    #[test]
    fn demo_herd_renders_through_animal_view() {
        let herd = demo_herd(7);
        let grid = DataGrid::new(
            animal_columns().expect("animal columns"),
            GridOptions {
                selection: Some(SelectionMode::Multiple),
                ..GridOptions::default()
            },
        )
        .expect("valid options")
        .with_rows(herd.animals.clone());

        assert_eq!(grid.visible_rows().len(), 10);
        assert_eq!(
            table_title(&grid),
            format!("{} rows | pick multiple", herd.animals.len())
        );
        assert!(
            grid.visible_rows()
                .iter()
                .all(|row| row.cells[0].starts_with("US-"))
        );
    }
}
