// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A 50,000-row grid driven headlessly: scrolling, sorting, pinning, editing, undo.
//!
//! The host here is a plain struct standing in for a scroll container. Every
//! step prints what a renderer would have to draw.
//!
//! Run:
//! - `cargo run -p understory_demos --example data_grid_50k`
//! - append `-- --trace` for trace-level logs

use futures::executor::block_on;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use understory_data_grid::{
    CellPosition, Column, ColumnId, DataGrid, Direction, EditHandler, GridKey, GridOptions,
    GridRow, KeyResponse, Pin,
};
use understory_virtual_list::{Axis, ScrollViewport};

#[derive(Clone, Debug)]
struct Employee {
    id: u32,
    name: String,
    department: &'static str,
    age: i64,
    salary: i64,
}

#[derive(Clone, Debug, PartialEq, PartialOrd)]
enum Value {
    Text(String),
    Number(i64),
}

#[derive(Clone, Copy, Debug)]
enum Field {
    Id,
    Name,
    Department,
    Age,
    Salary,
}

impl GridRow for Employee {
    type Id = u32;
    type Field = Field;
    type Value = Value;

    fn id(&self) -> u32 {
        self.id
    }

    fn get(&self, field: &Field) -> Option<Value> {
        Some(match field {
            Field::Id => Value::Number(i64::from(self.id)),
            Field::Name => Value::Text(self.name.clone()),
            Field::Department => Value::Text(self.department.to_owned()),
            Field::Age => Value::Number(self.age),
            Field::Salary => Value::Number(self.salary),
        })
    }

    fn with(&self, field: &Field, value: Option<Value>) -> Self {
        let mut next = self.clone();
        match (field, value) {
            (Field::Name, Some(Value::Text(name))) => next.name = name,
            (Field::Age, Some(Value::Number(age))) => next.age = age,
            (Field::Salary, Some(Value::Number(salary))) => next.salary = salary,
            _ => {}
        }
        next
    }
}

/// Accepts ages between 18 and 100; everything else fails validation.
struct AgeValidator;

impl EditHandler<Employee> for AgeValidator {
    type Error = String;

    async fn commit(
        &self,
        row_id: &u32,
        column_id: &ColumnId,
        value: Option<&Value>,
    ) -> Result<bool, String> {
        match (column_id.as_str(), value) {
            ("age", Some(Value::Number(age))) => Ok((18..=100).contains(age)),
            ("age", _) => Err(format!("row {row_id}: age must be a number")),
            _ => Ok(true),
        }
    }
}

/// The host's scroll container.
struct Window {
    scroll_top: f64,
    scroll_left: f64,
    width: f64,
    height: f64,
}

impl ScrollViewport<f64> for Window {
    fn scroll_offset(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.scroll_top,
            Axis::Horizontal => self.scroll_left,
        }
    }

    fn viewport_extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.height,
            Axis::Horizontal => self.width,
        }
    }

    fn set_scroll_offset(&mut self, axis: Axis, offset: f64) {
        match axis {
            Axis::Vertical => self.scroll_top = offset,
            Axis::Horizontal => self.scroll_left = offset,
        }
    }
}

const DEPARTMENTS: [&str; 5] = ["Design", "Engineering", "Finance", "Sales", "Support"];

fn employees(count: u32) -> Vec<Employee> {
    (0..count)
        .map(|id| Employee {
            id,
            name: format!("Employee {id}"),
            department: DEPARTMENTS[id as usize % DEPARTMENTS.len()],
            age: 20 + i64::from(id * 7 % 45),
            salary: 40_000 + i64::from(id * 37 % 90) * 1_000,
        })
        .collect()
}

fn columns() -> Vec<Column<Field>> {
    vec![
        Column::new("id", "ID", Field::Id, 80.0).fixed_width().pinned(Pin::Left),
        Column::new("name", "Name", Field::Name, 220.0)
            .sortable()
            .editable(),
        Column::new("department", "Department", Field::Department, 160.0).sortable(),
        Column::new("age", "Age", Field::Age, 90.0)
            .sortable()
            .editable()
            .with_max_width(160.0),
        Column::new("salary", "Salary", Field::Salary, 140.0)
            .sortable()
            .editable()
            .pinned(Pin::Right),
    ]
}

fn print_window(grid: &mut DataGrid<Employee>) {
    let rows = grid.row_virtualizer_mut().visible_strip();
    let cols = grid.column_virtualizer_mut().visible_strip();
    println!(
        "  rows {:?} realized {:?} of {}, center columns {:?}, content {}x{}",
        rows.visible_indices(),
        rows.indices(),
        grid.row_count(),
        cols.indices(),
        grid.total_content_width(),
        grid.total_content_height(),
    );
    for (item, row) in grid.visible_rows().take(3) {
        println!(
            "    @{:>9}  #{:<6} {:<16} {:<12} age {:>3}  salary {}",
            item.start, row.id, row.name, row.department, row.age, row.salary
        );
    }
}

fn main() {
    let level = if std::env::args().any(|a| a == "--trace") {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)
        .expect("logger installs once");

    let mut window = Window {
        scroll_top: 0.0,
        scroll_left: 0.0,
        width: 600.0,
        height: 700.0,
    };
    let mut grid = DataGrid::new(columns(), employees(50_000), GridOptions::default())
        .expect("column ids are unique");
    grid.observe(&window);
    log::info!("{grid:?}");
    grid.set_sort_observer(|rules| {
        let summary: Vec<String> = rules
            .iter()
            .map(|r| format!("{} {:?}", r.column_id, r.direction))
            .collect();
        println!("  sort changed: [{}]", summary.join(", "));
    });

    println!("initial");
    print_window(&mut grid);

    println!("scroll to the middle");
    window.scroll_top = 25_000.0 * 40.0;
    grid.observe(&window);
    print_window(&mut grid);

    println!("sort by department, then age descending");
    let department = ColumnId::from("department");
    let age = ColumnId::from("age");
    grid.toggle_sort(&department).expect("department is sortable");
    grid.toggle_sort(&age).expect("age is sortable");
    grid.toggle_sort(&age).expect("age is sortable");
    print_window(&mut grid);

    println!("resize name to 10 (clamped) and age to 500 (clamped)");
    let name = ColumnId::from("name");
    let applied = grid.resize_column(&name, 10.0).expect("name is resizable");
    println!("  name -> {applied}");
    let applied = grid.resize_column(&age, 500.0).expect("age is resizable");
    println!("  age -> {applied}");
    print_window(&mut grid);

    println!("keyboard: focus the first row and edit its age");
    grid.set_focus(CellPosition::new(0, 0));
    for _ in 0..3 {
        grid.handle_key(GridKey::Arrow(Direction::Right), Some(&mut window));
    }
    grid.handle_key(GridKey::Enter, Some(&mut window));
    grid.set_edit_value(Some(Value::Number(150))).expect("an edit is open");
    let outcome = block_on(grid.commit_edit(&AgeValidator));
    println!(
        "  age 150 -> {outcome:?}, buffer error: {:?}",
        grid.edit_buffer().and_then(|e| e.error())
    );
    grid.set_edit_value(Some(Value::Number(33)))
        .expect("the edit stays open after a rejection");
    if let KeyResponse::CommitRequested(ticket) = grid.handle_key(GridKey::Enter, None) {
        let result =
            block_on(AgeValidator.commit(ticket.row_id(), ticket.column_id(), ticket.value()));
        println!("  age 33 -> {:?}", grid.finish_commit(ticket, result));
    }
    print_window(&mut grid);

    println!("undo everything ({} steps)", grid.undo_depth());
    while grid.handle_key(GridKey::Undo, None).is_handled() {}
    print_window(&mut grid);
}
