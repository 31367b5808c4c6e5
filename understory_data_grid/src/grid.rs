// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The grid controller.

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt::{self, Debug};

use hashbrown::HashSet;
use understory_history::History;
use understory_virtual_list::{
    Axis, FixedExtentModel, MeasurementTable, ScrollViewport, VirtualItem, Virtualizer,
};

use crate::sort::{self, sorted_order};
use crate::{
    CellPosition, Column, ColumnFlags, ColumnId, CommitOutcome, CommitTicket, Direction,
    EditBuffer, EditError, EditHandler, EditPhase, GridError, GridKey, GridOptions, GridRow,
    GridState, KeyResponse, PinnedColumns, Revisions, SortRule,
};

type SortObserver = Box<dyn FnMut(&[SortRule])>;

/// Headless controller of a virtualized, sortable, editable data grid.
///
/// The grid owns one [`History`] of [`GridState`] snapshots. Every user-facing
/// mutation (sorting, resizing, reordering, hiding a column, committing an edit,
/// replacing the data) installs a new snapshot, so [`DataGrid::undo`] reverts any
/// of them. Everything else is derived from the current snapshot:
///
/// - the sorted row order,
/// - a fixed-height row [`Virtualizer`] sized to the row count,
/// - a column [`Virtualizer`] over the unpinned visible columns, rebuilt only when
///   the snapshot's layout stamp changes.
///
/// Scroll and resize notifications go to [`DataGrid::on_scroll`] and
/// [`DataGrid::on_resize`]; the realized window is read back with
/// [`DataGrid::visible_rows`] and [`DataGrid::visible_center_columns`].
pub struct DataGrid<R: GridRow> {
    history: History<GridState<R>>,
    options: GridOptions,
    revision: u64,

    order: Vec<usize>,
    order_key: Option<(u64, u64, u64)>,
    rows: Virtualizer<FixedExtentModel<f64>>,
    columns: Virtualizer<MeasurementTable<f64>>,

    focus: Option<CellPosition>,
    edit: Option<EditBuffer<R>>,
    edit_generation: u64,
    sort_observer: Option<SortObserver>,
}

impl<R: GridRow> DataGrid<R> {
    /// Creates a grid over `columns` and `data`, unsorted.
    ///
    /// Each column's width is clamped to its bounds first.
    ///
    /// # Errors
    ///
    /// [`GridError::DuplicateColumn`] if two columns share an id.
    pub fn new(
        mut columns: Vec<Column<R::Field>>,
        data: Vec<R>,
        options: GridOptions,
    ) -> Result<Self, GridError> {
        {
            let mut seen = HashSet::with_capacity(columns.len());
            for column in &columns {
                if !seen.insert(&column.id) {
                    return Err(GridError::DuplicateColumn(column.id.clone()));
                }
            }
        }
        for column in &mut columns {
            column.width = column.clamp_width(column.width, options.default_min_width);
        }

        let state = GridState {
            columns,
            sort_config: Vec::new(),
            data: Arc::new(data),
            revisions: Revisions::default(),
        };
        let mut grid = Self {
            history: History::with_capacity(state, options.history_depth),
            options,
            revision: 0,
            order: Vec::new(),
            order_key: None,
            rows: Virtualizer::new(
                FixedExtentModel::new(0, options.row_height),
                Axis::Vertical,
                options.row_overscan,
            ),
            columns: Virtualizer::new(
                MeasurementTable::new(),
                Axis::Horizontal,
                options.column_overscan,
            ),
            focus: None,
            edit: None,
            edit_generation: 0,
            sort_observer: None,
        };
        grid.sync_derived();
        Ok(grid)
    }

    /// The current snapshot.
    #[must_use]
    pub fn state(&self) -> &GridState<R> {
        self.history.current()
    }

    /// All columns in display order, hidden ones included.
    #[must_use]
    pub fn columns(&self) -> &[Column<R::Field>] {
        &self.state().columns
    }

    /// Active sort rules, highest priority first.
    #[must_use]
    pub fn sort_config(&self) -> &[SortRule] {
        &self.state().sort_config
    }

    /// Rows in their original (unsorted) order.
    #[must_use]
    pub fn data(&self) -> &[R] {
        &self.state().data
    }

    /// The options the grid was created with.
    #[must_use]
    pub const fn options(&self) -> &GridOptions {
        &self.options
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.state().data.len()
    }

    /// Number of visible columns, pinned ones included.
    #[must_use]
    pub fn visible_column_count(&self) -> usize {
        self.columns().iter().filter(|c| c.is_visible()).count()
    }

    /// Indices into [`DataGrid::data`] in display order.
    #[must_use]
    pub fn sorted_indices(&self) -> &[usize] {
        &self.order
    }

    /// The row displayed at sorted position `index`.
    #[must_use]
    pub fn sorted_row(&self, index: usize) -> Option<&R> {
        self.order.get(index).map(|&i| &self.state().data[i])
    }

    /// All rows in display order.
    pub fn sorted_rows(&self) -> impl Iterator<Item = &R> + '_ {
        let data: &[R] = &self.state().data;
        self.order.iter().map(move |&i| &data[i])
    }

    /// Visible columns split into left-pinned, center, and right-pinned.
    #[must_use]
    pub fn pinned_columns(&self) -> PinnedColumns<'_, R::Field> {
        PinnedColumns::partition(self.columns())
    }

    /// The visible column at a logical index (left, then center, then right).
    #[must_use]
    pub fn column_at(&self, logical: usize) -> Option<&Column<R::Field>> {
        self.pinned_columns().get(logical)
    }

    /// Width of the scrollable content: both pinned groups plus every center column.
    #[must_use]
    pub fn total_content_width(&self) -> f64 {
        let pinned = self.pinned_columns();
        pinned.left_width() + pinned.right_width() + self.columns.total_size()
    }

    /// Height of the scrollable content.
    #[must_use]
    pub fn total_content_height(&self) -> f64 {
        self.rows.total_size()
    }

    /// The row axis.
    #[must_use]
    pub fn row_virtualizer(&self) -> &Virtualizer<FixedExtentModel<f64>> {
        &self.rows
    }

    /// The row axis, mutably (for overscan or direct scrolling).
    pub fn row_virtualizer_mut(&mut self) -> &mut Virtualizer<FixedExtentModel<f64>> {
        &mut self.rows
    }

    /// The center column axis.
    #[must_use]
    pub fn column_virtualizer(&self) -> &Virtualizer<MeasurementTable<f64>> {
        &self.columns
    }

    /// The center column axis, mutably.
    pub fn column_virtualizer_mut(&mut self) -> &mut Virtualizer<MeasurementTable<f64>> {
        &mut self.columns
    }

    /// Forwards a scroll notification to the virtualizer of `axis`.
    pub fn on_scroll(&mut self, axis: Axis, offset: f64) {
        match axis {
            Axis::Vertical => self.rows.on_scroll(offset),
            Axis::Horizontal => self.columns.on_scroll(offset),
        }
    }

    /// Forwards a resize notification to the virtualizer of `axis`.
    pub fn on_resize(&mut self, axis: Axis, extent: f64) {
        match axis {
            Axis::Vertical => self.rows.on_resize(extent),
            Axis::Horizontal => self.columns.on_resize(extent),
        }
    }

    /// Reads scroll offsets and viewport extents for both axes from `viewport`.
    pub fn observe(&mut self, viewport: &dyn ScrollViewport<f64>) {
        self.rows.observe(viewport);
        self.columns.observe(viewport);
    }

    /// The realized rows (visible plus overscan), in display order.
    pub fn visible_rows(&mut self) -> impl Iterator<Item = (VirtualItem<f64>, &R)> + '_ {
        let data: &[R] = &self.history.current().data;
        let order = &self.order;
        self.rows
            .virtual_items()
            .filter_map(move |item| order.get(item.index).map(|&i| (item, &data[i])))
    }

    /// The realized center columns (visible plus overscan).
    ///
    /// Pinned columns are always rendered; get them from [`DataGrid::pinned_columns`].
    pub fn visible_center_columns(
        &mut self,
    ) -> impl Iterator<Item = (VirtualItem<f64>, &Column<R::Field>)> + '_ {
        let center = PinnedColumns::partition(&self.history.current().columns).center;
        self.columns
            .virtual_items()
            .filter_map(move |item| center.get(item.index).map(|&c| (item, c)))
    }

    /// Registers a callback that receives the sort rules after every sort toggle.
    ///
    /// The callback only observes; it cannot change the grid. Replaces any previous one.
    pub fn set_sort_observer(&mut self, observer: impl FnMut(&[SortRule]) + 'static) {
        self.sort_observer = Some(Box::new(observer));
    }

    /// Removes the sort observer.
    pub fn clear_sort_observer(&mut self) {
        self.sort_observer = None;
    }

    /// Advances the sort state of a column: none → ascending → descending → none.
    ///
    /// # Errors
    ///
    /// [`GridError::UnknownColumn`] or [`GridError::NotSortable`].
    pub fn toggle_sort(&mut self, column_id: &ColumnId) -> Result<(), GridError> {
        let column = self.column_by_id(column_id)?;
        if !column.is_sortable() {
            return Err(GridError::NotSortable(column_id.clone()));
        }
        let rules = sort::toggle_sort(self.sort_config(), column_id);
        log::debug!("sort toggled on `{column_id}`: {} active rules", rules.len());

        let stamp = self.next_revision();
        self.history.update(move |state| GridState {
            sort_config: rules,
            revisions: Revisions {
                sort: stamp,
                ..state.revisions
            },
            ..state.clone()
        });
        self.sync_derived();

        if let Some(observer) = self.sort_observer.as_mut() {
            observer(&self.history.current().sort_config);
        }
        Ok(())
    }

    /// Resizes a column, clamping to its bounds. Returns the width applied.
    ///
    /// A width equal to the current one records nothing.
    ///
    /// # Errors
    ///
    /// [`GridError::UnknownColumn`] or [`GridError::NotResizable`].
    pub fn resize_column(&mut self, column_id: &ColumnId, width: f64) -> Result<f64, GridError> {
        let index = self.column_index(column_id)?;
        let column = &self.columns()[index];
        if !column.is_resizable() {
            return Err(GridError::NotResizable(column_id.clone()));
        }
        debug_assert!(width.is_finite(), "column width must be finite");
        let current = column.width;
        let width = if width.is_finite() {
            column.clamp_width(width, self.options.default_min_width)
        } else {
            current
        };
        if width == current {
            return Ok(width);
        }

        let stamp = self.next_revision();
        self.history.update(|state| {
            let mut next = state.clone();
            next.columns[index].width = width;
            next.revisions.layout = stamp;
            next
        });
        self.sync_derived();
        Ok(width)
    }

    /// Moves `source` to the position currently held by `target`.
    ///
    /// Moving a column onto itself is a no-op and records nothing.
    ///
    /// # Errors
    ///
    /// [`GridError::UnknownColumn`] if either id is unknown.
    pub fn reorder_column(&mut self, source: &ColumnId, target: &ColumnId) -> Result<(), GridError> {
        let from = self.column_index(source)?;
        let to = self.column_index(target)?;
        if from == to {
            return Ok(());
        }

        let stamp = self.next_revision();
        self.history.update(|state| {
            let mut next = state.clone();
            let column = next.columns.remove(from);
            next.columns.insert(to, column);
            next.revisions.layout = stamp;
            next
        });
        self.sync_derived();
        Ok(())
    }

    /// Shows a hidden column or hides a visible one. Returns whether it is now visible.
    ///
    /// # Errors
    ///
    /// [`GridError::UnknownColumn`].
    pub fn toggle_column_visibility(&mut self, column_id: &ColumnId) -> Result<bool, GridError> {
        let index = self.column_index(column_id)?;
        let visible = !self.columns()[index].is_visible();

        let stamp = self.next_revision();
        self.history.update(|state| {
            let mut next = state.clone();
            next.columns[index].flags.toggle(ColumnFlags::HIDDEN);
            next.revisions.layout = stamp;
            next.revisions.visibility = stamp;
            next
        });
        self.sync_derived();
        Ok(visible)
    }

    /// Replaces every row. Undo restores the previous rows.
    pub fn replace_data(&mut self, data: Vec<R>) {
        let stamp = self.next_revision();
        let data = Arc::new(data);
        self.history.update(move |state| {
            let mut next = state.clone();
            next.data = data;
            next.revisions.data = stamp;
            next
        });
        self.sync_derived();
    }

    /// Returns `true` if [`DataGrid::undo`] would change something.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Number of mutations that can be undone.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    /// Reverts the most recent mutation. Returns `false` if there was none.
    pub fn undo(&mut self) -> bool {
        if !self.history.undo() {
            return false;
        }
        log::debug!("undo; {} steps left", self.history.undo_depth());
        self.sync_derived();
        true
    }

    /// The focused cell, if any.
    #[must_use]
    pub const fn focused_cell(&self) -> Option<CellPosition> {
        self.focus
    }

    /// Focuses `cell`, clamped into the grid. Returns the cell focused, or `None`
    /// (clearing focus) if the grid has no cells.
    pub fn set_focus(&mut self, cell: CellPosition) -> Option<CellPosition> {
        self.focus = self.clamp_cell(cell);
        self.focus
    }

    /// Clears the focused cell.
    pub fn clear_focus(&mut self) {
        self.focus = None;
    }

    /// Moves focus one cell in `direction` and scrolls its row into view.
    ///
    /// Without a focused cell, movement starts from the top-left cell.
    /// Returns the new focus, or `None` if the grid has no cells.
    pub fn navigate(
        &mut self,
        direction: Direction,
        viewport: Option<&mut dyn ScrollViewport<f64>>,
    ) -> Option<CellPosition> {
        let from = self.focus.unwrap_or_default();
        self.focus = from.step(direction, self.row_count(), self.visible_column_count());
        let focus = self.focus?;
        self.rows.scroll_to_index(focus.row, viewport);
        Some(focus)
    }

    /// Dispatches a decoded key.
    ///
    /// [`GridKey::Undo`] always undoes. While an edit is open, Enter starts its
    /// commit and Escape cancels it; other keys are ignored. Otherwise arrows move
    /// focus and Enter opens an edit on the focused cell.
    pub fn handle_key(
        &mut self,
        key: GridKey,
        viewport: Option<&mut dyn ScrollViewport<f64>>,
    ) -> KeyResponse<R> {
        if key == GridKey::Undo {
            return handled(self.undo());
        }
        if self.edit.is_some() {
            return match key {
                GridKey::Enter => self
                    .begin_commit()
                    .map_or(KeyResponse::Ignored, KeyResponse::CommitRequested),
                GridKey::Escape => handled(self.cancel_edit()),
                _ => KeyResponse::Ignored,
            };
        }
        match key {
            GridKey::Arrow(direction) => handled(self.navigate(direction, viewport).is_some()),
            GridKey::Enter => {
                let Some(cell) = self.focus else {
                    return KeyResponse::Ignored;
                };
                let Some(column_id) = self.column_at(cell.column).map(|c| c.id.clone()) else {
                    return KeyResponse::Ignored;
                };
                handled(self.begin_edit(cell.row, &column_id).is_ok())
            }
            GridKey::Escape | GridKey::Undo => KeyResponse::Ignored,
        }
    }

    /// The open edit, if any.
    #[must_use]
    pub fn edit_buffer(&self) -> Option<&EditBuffer<R>> {
        self.edit.as_ref()
    }

    /// Opens an edit on the cell at sorted row `row` in `column_id`, replacing any
    /// edit that is not committing. The buffer starts with the cell's current value.
    ///
    /// # Errors
    ///
    /// [`GridError::CommitInFlight`], [`GridError::UnknownColumn`],
    /// [`GridError::NotEditable`], or [`GridError::RowOutOfRange`].
    pub fn begin_edit(&mut self, row: usize, column_id: &ColumnId) -> Result<(), GridError> {
        if self.edit.as_ref().is_some_and(EditBuffer::is_committing) {
            return Err(GridError::CommitInFlight);
        }
        let column = self.column_by_id(column_id)?;
        if !column.is_editable() {
            return Err(GridError::NotEditable(column_id.clone()));
        }
        let record = self.sorted_row(row).ok_or(GridError::RowOutOfRange {
            index: row,
            len: self.order.len(),
        })?;
        let field = column.field.clone();
        let row_id = record.id();
        let value = record.get(&field);

        self.edit_generation += 1;
        log::debug!("editing row {row_id:?} in column `{column_id}`");
        self.edit = Some(EditBuffer {
            row_id,
            column_id: column_id.clone(),
            field,
            value,
            phase: EditPhase::Editing,
            generation: self.edit_generation,
        });
        Ok(())
    }

    /// Replaces the pending value of the open edit.
    ///
    /// # Errors
    ///
    /// [`GridError::NoActiveEdit`], or [`GridError::CommitInFlight`] while the
    /// value is locked.
    pub fn set_edit_value(&mut self, value: Option<R::Value>) -> Result<(), GridError> {
        let edit = self.edit.as_mut().ok_or(GridError::NoActiveEdit)?;
        if edit.is_committing() {
            return Err(GridError::CommitInFlight);
        }
        edit.value = value;
        Ok(())
    }

    /// Locks the open edit and returns a ticket for its commit.
    ///
    /// Returns `None` if nothing is being edited or a commit is already in flight.
    pub fn begin_commit(&mut self) -> Option<CommitTicket<R>> {
        let edit = self.edit.as_mut()?;
        if edit.is_committing() {
            return None;
        }
        // Tickets from earlier attempts on this edit go stale.
        self.edit_generation += 1;
        edit.generation = self.edit_generation;
        edit.phase = EditPhase::Committing;
        Some(CommitTicket {
            row_id: edit.row_id.clone(),
            column_id: edit.column_id.clone(),
            value: edit.value.clone(),
            generation: edit.generation,
        })
    }

    /// Applies the edit handler's `result` for `ticket`.
    ///
    /// `Ok(true)` writes the value into the row with the ticket's id (one undo
    /// step) and closes the edit. `Ok(false)` and `Err(_)` leave the data alone and
    /// reopen the edit with [`EditError::Rejected`] or [`EditError::Failed`]. A stale
    /// ticket, or one whose row no longer exists, changes nothing.
    pub fn finish_commit<E: Debug>(
        &mut self,
        ticket: CommitTicket<R>,
        result: Result<bool, E>,
    ) -> CommitOutcome {
        let live = self
            .edit
            .as_ref()
            .is_some_and(|edit| edit.generation == ticket.generation && edit.is_committing());
        if !live {
            log::debug!(
                "discarding stale commit for row {:?} in column `{}`",
                ticket.row_id,
                ticket.column_id
            );
            return CommitOutcome::Discarded;
        }

        let error = match result {
            Ok(true) => {
                let Some(edit) = self.edit.take() else {
                    return CommitOutcome::Discarded;
                };
                return if self.write_cell(&edit.row_id, &edit.field, ticket.value) {
                    CommitOutcome::Applied
                } else {
                    log::debug!("row {:?} is gone; edit dropped", edit.row_id);
                    CommitOutcome::Discarded
                };
            }
            Ok(false) => EditError::Rejected,
            Err(err) => {
                log::warn!(
                    "saving row {:?} in column `{}` failed: {err:?}",
                    ticket.row_id,
                    ticket.column_id
                );
                EditError::Failed
            }
        };
        if let Some(edit) = self.edit.as_mut() {
            edit.phase = EditPhase::Failed(error);
        }
        CommitOutcome::Failed(error)
    }

    /// Commits the open edit through `handler`.
    ///
    /// Returns `None` if there was nothing to commit. If the returned future is
    /// dropped before it resolves, nothing is applied and the edit stays locked
    /// until [`DataGrid::abandon_edit`].
    pub async fn commit_edit<H: EditHandler<R>>(&mut self, handler: &H) -> Option<CommitOutcome> {
        let ticket = self.begin_commit()?;
        let result = handler
            .commit(&ticket.row_id, &ticket.column_id, ticket.value.as_ref())
            .await;
        Some(self.finish_commit(ticket, result))
    }

    /// Closes the open edit without applying it.
    ///
    /// Returns `false` if there is no edit or its commit is in flight.
    pub fn cancel_edit(&mut self) -> bool {
        match &self.edit {
            Some(edit) if !edit.is_committing() => {
                self.edit = None;
                true
            }
            _ => false,
        }
    }

    /// Drops the open edit in any phase, for teardown. An in-flight ticket becomes stale.
    ///
    /// Returns `false` if there was no edit.
    pub fn abandon_edit(&mut self) -> bool {
        self.edit.take().is_some()
    }

    fn write_cell(&mut self, row_id: &R::Id, field: &R::Field, value: Option<R::Value>) -> bool {
        let Some(position) = self.data().iter().position(|row| &row.id() == row_id) else {
            return false;
        };
        let stamp = self.next_revision();
        self.history.update(move |state| {
            let mut next = state.clone();
            let rows = Arc::make_mut(&mut next.data);
            let updated = rows[position].with(field, value);
            debug_assert!(updated.id() == *row_id, "GridRow::with must keep the row id");
            rows[position] = updated;
            next.revisions.data = stamp;
            next
        });
        self.sync_derived();
        true
    }

    fn column_index(&self, id: &ColumnId) -> Result<usize, GridError> {
        self.state()
            .column_index(id)
            .ok_or_else(|| GridError::UnknownColumn(id.clone()))
    }

    fn column_by_id(&self, id: &ColumnId) -> Result<&Column<R::Field>, GridError> {
        self.state()
            .column(id)
            .ok_or_else(|| GridError::UnknownColumn(id.clone()))
    }

    fn next_revision(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }

    fn clamp_cell(&self, cell: CellPosition) -> Option<CellPosition> {
        let rows = self.row_count();
        let columns = self.visible_column_count();
        if rows == 0 || columns == 0 {
            return None;
        }
        Some(CellPosition::new(
            cell.row.min(rows - 1),
            cell.column.min(columns - 1),
        ))
    }

    /// Brings the sorted order, both virtualizers, and focus in line with the current snapshot.
    fn sync_derived(&mut self) {
        let state = self.history.current();
        let revisions = state.revisions;

        let order_key = (revisions.data, revisions.sort, revisions.visibility);
        if self.order_key != Some(order_key) {
            self.order = sorted_order(state.data.as_slice(), &state.sort_config, &state.columns);
            self.order_key = Some(order_key);
            log::trace!(
                "sorted {} rows by {} rules",
                self.order.len(),
                state.sort_config.len()
            );
        }

        self.rows.set_count(state.data.len());
        let center = PinnedColumns::partition(&state.columns).center;
        self.columns
            .sync_sizes(center.len(), revisions.layout, |i| center[i].width);

        if let Some(cell) = self.focus {
            self.focus = self.clamp_cell(cell);
        }
    }
}

fn handled<R: GridRow>(consumed: bool) -> KeyResponse<R> {
    if consumed {
        KeyResponse::Handled
    } else {
        KeyResponse::Ignored
    }
}

impl<R: GridRow> Debug for DataGrid<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("DataGrid")
            .field("rows", &state.data.len())
            .field("columns", &state.columns.len())
            .field("sort_config", &state.sort_config)
            .field("revisions", &state.revisions)
            .field("undo_depth", &self.history.undo_depth())
            .field("focus", &self.focus)
            .field("edit", &self.edit)
            .finish_non_exhaustive()
    }
}
