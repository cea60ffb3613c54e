use std::collections::{BTreeSet, HashSet};

use rayon::prelude::*;
use tracing::{debug, info, trace};

use crate::record::{ColumnKey, UserId, UserRecord, UserStatus};

pub const PAGE_SIZES: [usize; 4] = [5, 10, 20, 50];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Selection state of the rows on the current page, used for the header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSelection {
    None,
    Partial,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    pub page_index: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub result_len: usize,
    pub total_len: usize,
}

/// Token handed out by `request_delete`. Dropping it cancels the delete.
#[derive(Debug)]
pub struct DeleteConfirmation {
    requested: usize,
}

impl DeleteConfirmation {
    /// Size of the selection when the delete was requested.
    pub fn count(&self) -> usize {
        self.requested
    }
}

/// Working set of users plus the view state (filter, sort, columns, selection, pagination).
///
/// Every mutation recomputes `rows`, the mapping from result position to working set index,
/// so reads never observe stale derived state.
pub struct UserTable {
    records: Vec<UserRecord>,
    rows: Vec<usize>,
    global_filter: String,
    status_filter: Option<UserStatus>,
    sort: Option<(ColumnKey, SortDirection)>,
    visible_columns: BTreeSet<ColumnKey>,
    selection: HashSet<UserId>,
    page_index: usize,
    page_size: usize,
}

impl UserTable {
    pub fn new(records: Vec<UserRecord>, page_size: usize) -> Self {
        let mut table = UserTable {
            rows: (0..records.len()).collect(),
            records,
            global_filter: String::new(),
            status_filter: None,
            sort: None,
            visible_columns: ColumnKey::ALL.into_iter().collect(),
            selection: HashSet::new(),
            page_index: 0,
            page_size: page_size.max(1),
        };
        table.refresh();
        table
    }

    // -------------------- Derivation ---------------------- //

    fn matches(record: &UserRecord, needle: &str, status: Option<UserStatus>) -> bool {
        if let Some(status) = status
            && record.status != status
        {
            return false;
        }
        needle.is_empty()
            || record.full_name().to_lowercase().contains(needle)
            || record.email.to_lowercase().contains(needle)
    }

    fn refresh(&mut self) {
        let needle = self.global_filter.trim().to_lowercase();
        let status = self.status_filter;

        // Indexed parallel collect keeps insertion order.
        let mut rows: Vec<usize> = self
            .records
            .par_iter()
            .enumerate()
            .filter(|(_, record)| Self::matches(record, &needle, status))
            .map(|(idx, _)| idx)
            .collect();

        if let Some((column, direction)) = self.sort {
            let records = &self.records;
            // Stable, so equal keys stay in insertion order in both directions.
            rows.sort_by(|&a, &b| {
                let ordering = column
                    .compare(&records[a], &records[b])
                    .unwrap_or(std::cmp::Ordering::Equal);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        self.rows = rows;
        self.clamp_page();
        debug!(
            "Refreshed table: {} of {} rows, sort {:?}, page {}/{}",
            self.rows.len(),
            self.records.len(),
            self.sort,
            self.page_index + 1,
            self.page_count()
        );
    }

    fn clamp_page(&mut self) {
        self.page_index = self.page_index.min(self.page_count() - 1);
    }

    fn prune_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let in_result: HashSet<UserId> = self.rows.iter().map(|&i| self.records[i].id).collect();
        let before = self.selection.len();
        self.selection.retain(|id| in_result.contains(id));
        if self.selection.len() != before {
            trace!(
                "Dropped {} selected rows no longer in the result",
                before - self.selection.len()
            );
        }
    }

    fn window(&self) -> &[usize] {
        let begin = std::cmp::min(self.page_index * self.page_size, self.rows.len());
        let end = std::cmp::min(begin + self.page_size, self.rows.len());
        &self.rows[begin..end]
    }

    // -------------------- Filtering ---------------------- //

    pub fn set_global_filter(&mut self, text: &str) {
        self.global_filter = text.to_string();
        self.refresh();
        self.prune_selection();
    }

    pub fn set_status_filter(&mut self, status: Option<UserStatus>) {
        self.status_filter = status;
        self.refresh();
        self.prune_selection();
    }

    /// All -> Active -> Inactive -> All
    pub fn cycle_status_filter(&mut self) {
        let next = match self.status_filter {
            None => Some(UserStatus::Active),
            Some(UserStatus::Active) => Some(UserStatus::Inactive),
            Some(UserStatus::Inactive) => None,
        };
        self.set_status_filter(next);
    }

    // -------------------- Sorting ---------------------- //

    pub fn set_sort(&mut self, sort: Option<(ColumnKey, SortDirection)>) {
        if let Some((column, _)) = sort
            && !column.is_sortable()
        {
            return;
        }
        self.sort = sort;
        self.refresh();
    }

    /// Cycles none -> ascending -> descending -> none on `column`.
    pub fn toggle_sort(&mut self, column: ColumnKey) {
        let next = match self.sort {
            Some((current, SortDirection::Ascending)) if current == column => {
                Some((column, SortDirection::Descending))
            }
            Some((current, SortDirection::Descending)) if current == column => None,
            _ => Some((column, SortDirection::Ascending)),
        };
        self.set_sort(next);
    }

    // -------------------- Pagination ---------------------- //

    pub fn page_count(&self) -> usize {
        std::cmp::max(1, self.rows.len().div_ceil(self.page_size))
    }

    pub fn first_page(&mut self) {
        self.page_index = 0;
    }

    pub fn previous_page(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    pub fn next_page(&mut self) {
        self.page_index = std::cmp::min(self.page_index + 1, self.page_count() - 1);
    }

    pub fn last_page(&mut self) {
        self.page_index = self.page_count() - 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size == 0 {
            return;
        }
        self.page_size = page_size;
        self.clamp_page();
    }

    /// Steps to the next larger (or smaller) entry of `PAGE_SIZES`.
    pub fn cycle_page_size(&mut self, forward: bool) {
        let current = self.page_size;
        let next = if forward {
            PAGE_SIZES.iter().find(|&&s| s > current).unwrap_or(&PAGE_SIZES[PAGE_SIZES.len() - 1])
        } else {
            PAGE_SIZES.iter().rev().find(|&&s| s < current).unwrap_or(&PAGE_SIZES[0])
        };
        self.set_page_size(*next);
    }

    // -------------------- Selection ---------------------- //

    /// Ids outside the current result are ignored.
    pub fn toggle_selected(&mut self, id: UserId) {
        if !self.rows.iter().any(|&i| self.records[i].id == id) {
            return;
        }
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
    }

    /// Selects every row of the current page unless all of them already are, then deselects them.
    pub fn toggle_page_selection(&mut self) {
        let ids: Vec<UserId> = self.window().iter().map(|&i| self.records[i].id).collect();
        if ids.is_empty() {
            return;
        }
        if ids.iter().all(|id| self.selection.contains(id)) {
            for id in ids.iter() {
                self.selection.remove(id);
            }
        } else {
            self.selection.extend(ids);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selects the given ids again, skipping any that are no longer in the result.
    pub fn restore_selection(&mut self, ids: &[UserId]) {
        for &id in ids {
            if !self.selection.contains(&id) {
                self.toggle_selected(id);
            }
        }
    }

    // -------------------- Deletion ---------------------- //

    pub fn request_delete(&self) -> Option<DeleteConfirmation> {
        if self.selection.is_empty() {
            return None;
        }
        Some(DeleteConfirmation {
            requested: self.selection.len(),
        })
    }

    /// Removes every selected row from the working set. Returns the number of removed rows.
    pub fn confirm_delete(&mut self, confirmation: DeleteConfirmation) -> usize {
        if confirmation.requested != self.selection.len() {
            debug!(
                "Selection changed from {} to {} rows since the delete was requested",
                confirmation.requested,
                self.selection.len()
            );
        }
        let doomed = std::mem::take(&mut self.selection);
        let before = self.records.len();
        self.records.retain(|r| !doomed.contains(&r.id));
        let removed = before - self.records.len();
        self.refresh();
        info!("Deleted {} users, {} remaining", removed, self.records.len());
        removed
    }

    // -------------------- Column visibility ---------------------- //

    pub fn toggle_column(&mut self, column: ColumnKey) {
        if !self.visible_columns.remove(&column) {
            self.visible_columns.insert(column);
        }
    }

    pub fn show_all_columns(&mut self) {
        self.visible_columns.extend(ColumnKey::ALL);
    }

    pub fn is_column_visible(&self, column: ColumnKey) -> bool {
        self.visible_columns.contains(&column)
    }

    /// Visible columns in display order.
    pub fn visible_columns(&self) -> Vec<ColumnKey> {
        self.visible_columns.iter().copied().collect()
    }

    // -------------------- Accessors ---------------------- //

    pub fn visible_rows(&self) -> Vec<&UserRecord> {
        self.window().iter().map(|&i| &self.records[i]).collect()
    }

    #[cfg(test)]
    pub fn result(&self) -> impl Iterator<Item = &UserRecord> {
        self.rows.iter().map(|&i| &self.records[i])
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn sort(&self) -> Option<(ColumnKey, SortDirection)> {
        self.sort
    }

    pub fn sort_indicator(&self, column: ColumnKey) -> Option<SortDirection> {
        match self.sort {
            Some((current, direction)) if current == column => Some(direction),
            _ => None,
        }
    }

    pub fn global_filter(&self) -> &str {
        &self.global_filter
    }

    pub fn status_filter(&self) -> Option<UserStatus> {
        self.status_filter
    }

    pub fn page_summary(&self) -> PageSummary {
        PageSummary {
            page_index: self.page_index,
            page_count: self.page_count(),
            page_size: self.page_size,
            result_len: self.rows.len(),
            total_len: self.records.len(),
        }
    }

    pub fn is_selected(&self, id: UserId) -> bool {
        self.selection.contains(&id)
    }

    pub fn selected_ids(&self) -> Vec<UserId> {
        self.selection.iter().copied().collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    pub fn page_selection(&self) -> PageSelection {
        let window = self.window();
        let selected = window
            .iter()
            .filter(|&&i| self.selection.contains(&self.records[i].id))
            .count();
        if selected == 0 {
            PageSelection::None
        } else if selected == window.len() {
            PageSelection::All
        } else {
            PageSelection::Partial
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_users;
    use chrono::NaiveDate;

    fn user(n: u8, first: &str, last: &str, status: UserStatus) -> UserRecord {
        UserRecord {
            id: UserId::from_bytes([n; 16]),
            first_name: first.to_string(),
            last_name: last.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1 + n as u32 % 28).unwrap(),
            email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
            phone: format!("+233 24 000 {:04}", n),
            country_code: "GH".to_string(),
            status,
        }
    }

    fn numbered(count: u8) -> Vec<UserRecord> {
        (0..count)
            .map(|n| user(n, &format!("User{n:02}"), "Test", UserStatus::Active))
            .collect()
    }

    fn generated(count: usize) -> Vec<UserRecord> {
        generate_users(count, Some(1234), NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    // Record numbers in result order, read back from the phone suffix.
    fn order(table: &UserTable) -> Vec<u8> {
        table
            .result()
            .map(|r| r.phone[r.phone.len() - 4..].parse().unwrap())
            .collect()
    }

    fn assert_page_in_bounds(table: &UserTable) {
        let summary = table.page_summary();
        assert!(summary.page_index < summary.page_count);
    }

    fn assert_selection_in_working_set(table: &UserTable) {
        let ids: HashSet<UserId> = table.records().iter().map(|r| r.id).collect();
        assert!(table.selection.iter().all(|id| ids.contains(id)));
    }

    #[test]
    fn status_filter_scenario() {
        let mut table = UserTable::new(
            vec![
                user(1, "Edwin", "Martinson", UserStatus::Active),
                user(2, "Kelcy", "Martinson", UserStatus::Inactive),
                user(3, "Ada", "Owusu", UserStatus::Active),
            ],
            10,
        );
        table.set_status_filter(Some(UserStatus::Inactive));
        let result: Vec<&UserRecord> = table.result().collect();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].first_name, "Kelcy");
    }

    #[test]
    fn filter_result_is_exactly_the_matching_records() {
        let records = generated(300);
        let mut table = UserTable::new(records.clone(), 10);
        for (text, status) in [
            ("", None),
            ("  MAR ", None),
            ("a", Some(UserStatus::Active)),
            ("gmail", Some(UserStatus::Inactive)),
            ("zzzz", None),
        ] {
            table.set_global_filter(text);
            table.set_status_filter(status);
            let needle = text.trim().to_lowercase();
            let expected: Vec<UserId> = records
                .iter()
                .filter(|r| status.is_none_or(|s| r.status == s))
                .filter(|r| {
                    needle.is_empty()
                        || r.full_name().to_lowercase().contains(&needle)
                        || r.email.to_lowercase().contains(&needle)
                })
                .map(|r| r.id)
                .collect();
            let actual: Vec<UserId> = table.result().map(|r| r.id).collect();
            assert_eq!(actual, expected, "filter {text:?} / {status:?}");
            assert_page_in_bounds(&table);
        }
    }

    #[test]
    fn global_filter_matches_full_name_and_email_only() {
        let mut records = vec![
            user(1, "Edwin", "Martinson", UserStatus::Active),
            user(2, "Kelcy", "Owusu", UserStatus::Active),
        ];
        records[1].phone = "+233 martinson".to_string();
        let mut table = UserTable::new(records, 10);

        table.set_global_filter("win mart");
        assert_eq!(table.result().count(), 1);

        table.set_global_filter("kelcy.owusu@");
        assert_eq!(table.result().next().map(|r| r.id), Some(UserId::from_bytes([2; 16])));

        // phone does not take part in the search
        table.set_global_filter("martinson");
        assert_eq!(table.result().count(), 1);
    }

    #[test]
    fn sort_is_stable_and_reversible() {
        let records = vec![
            user(1, "Bea", "A", UserStatus::Active),
            user(2, "Abe", "B", UserStatus::Inactive),
            user(3, "Bea", "C", UserStatus::Active),
            user(4, "Cid", "D", UserStatus::Inactive),
            user(5, "Abe", "E", UserStatus::Active),
        ];
        let mut table = UserTable::new(records, 10);

        table.set_sort(Some((ColumnKey::FirstName, SortDirection::Ascending)));
        let asc = order(&table);
        assert_eq!(asc, vec![2, 5, 1, 3, 4]);

        table.set_sort(Some((ColumnKey::FirstName, SortDirection::Ascending)));
        let again = order(&table);
        assert_eq!(asc, again);

        table.set_sort(Some((ColumnKey::FirstName, SortDirection::Descending)));
        let desc = order(&table);
        // ties keep insertion order, distinct keys reverse
        assert_eq!(desc, vec![4, 1, 3, 2, 5]);

        table.set_sort(None);
        let unsorted = order(&table);
        assert_eq!(unsorted, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn descending_reverses_distinct_keys_on_generated_data() {
        let mut table = UserTable::new(generated(200), 10);
        for column in [ColumnKey::Email, ColumnKey::DateOfBirth, ColumnKey::LastName] {
            table.set_sort(Some((column, SortDirection::Ascending)));
            let asc: Vec<UserRecord> = table.result().cloned().collect();
            table.set_sort(Some((column, SortDirection::Descending)));
            let desc: Vec<UserRecord> = table.result().cloned().collect();
            for pair in asc.windows(2) {
                assert_ne!(column.compare(&pair[0], &pair[1]), Some(std::cmp::Ordering::Greater));
            }
            for pair in desc.windows(2) {
                assert_ne!(column.compare(&pair[0], &pair[1]), Some(std::cmp::Ordering::Less));
            }
        }
    }

    #[test]
    fn toggle_sort_cycles_and_ignores_country() {
        let mut table = UserTable::new(numbered(3), 10);
        table.toggle_sort(ColumnKey::Email);
        assert_eq!(table.sort_indicator(ColumnKey::Email), Some(SortDirection::Ascending));
        table.toggle_sort(ColumnKey::Email);
        assert_eq!(table.sort_indicator(ColumnKey::Email), Some(SortDirection::Descending));
        table.toggle_sort(ColumnKey::Phone);
        assert_eq!(table.sort_indicator(ColumnKey::Email), None);
        assert_eq!(table.sort_indicator(ColumnKey::Phone), Some(SortDirection::Ascending));
        table.toggle_sort(ColumnKey::Phone);
        table.toggle_sort(ColumnKey::Phone);
        assert_eq!(table.sort(), None);

        table.toggle_sort(ColumnKey::Country);
        assert_eq!(table.sort(), None);
    }

    #[test]
    fn pagination_scenario() {
        let mut table = UserTable::new(numbered(25), 10);
        assert_eq!(table.page_count(), 3);
        table.last_page();
        let summary = table.page_summary();
        assert_eq!(summary.page_index, 2);
        assert_eq!(table.visible_rows().len(), 5);

        table.next_page();
        assert_eq!(table.page_summary().page_index, 2);
        table.previous_page();
        assert_eq!(table.page_summary().page_index, 1);
        table.first_page();
        table.previous_page();
        assert_eq!(table.page_summary().page_index, 0);
    }

    #[test]
    fn empty_result_has_one_page() {
        let mut table = UserTable::new(numbered(25), 10);
        table.last_page();
        table.set_global_filter("nobody");
        let summary = table.page_summary();
        assert_eq!(summary.page_count, 1);
        assert_eq!(summary.page_index, 0);
        assert!(table.visible_rows().is_empty());
        assert_eq!(table.page_selection(), PageSelection::None);
    }

    #[test]
    fn page_size_change_clamps_index() {
        let mut table = UserTable::new(numbered(25), 5);
        table.last_page();
        assert_eq!(table.page_summary().page_index, 4);
        table.set_page_size(20);
        assert_eq!(table.page_summary().page_index, 1);
        table.set_page_size(0);
        assert_eq!(table.page_summary().page_size, 20);

        table.cycle_page_size(true);
        assert_eq!(table.page_summary().page_size, 50);
        assert_eq!(table.page_summary().page_index, 0);
        table.cycle_page_size(true);
        assert_eq!(table.page_summary().page_size, 50);
        table.cycle_page_size(false);
        assert_eq!(table.page_summary().page_size, 20);

        table.set_page_size(7);
        table.cycle_page_size(false);
        assert_eq!(table.page_summary().page_size, 5);
    }

    #[test]
    fn page_index_stays_in_bounds_after_mutations() {
        let mut table = UserTable::new(generated(120), 10);
        table.last_page();
        assert_page_in_bounds(&table);
        table.set_status_filter(Some(UserStatus::Active));
        assert_page_in_bounds(&table);
        table.last_page();
        table.set_global_filter("e");
        assert_page_in_bounds(&table);
        table.toggle_page_selection();
        if let Some(confirmation) = table.request_delete() {
            table.confirm_delete(confirmation);
        }
        assert_page_in_bounds(&table);
        table.set_page_size(3);
        table.last_page();
        table.set_page_size(50);
        assert_page_in_bounds(&table);
    }

    #[test]
    fn select_all_on_partially_selected_page() {
        let mut table = UserTable::new(numbered(25), 10);
        let ids: Vec<UserId> = table.visible_rows().iter().map(|r| r.id).collect();
        for id in ids.iter().take(7) {
            table.toggle_selected(*id);
        }
        assert_eq!(table.page_selection(), PageSelection::Partial);

        table.toggle_page_selection();
        assert_eq!(table.selected_count(), 10);
        assert_eq!(table.page_selection(), PageSelection::All);

        table.toggle_page_selection();
        assert_eq!(table.selected_count(), 0);
        assert_eq!(table.page_selection(), PageSelection::None);
    }

    #[test]
    fn select_all_only_touches_the_current_page() {
        let mut table = UserTable::new(numbered(25), 10);
        table.toggle_page_selection();
        table.next_page();
        assert_eq!(table.page_selection(), PageSelection::None);
        table.toggle_page_selection();
        assert_eq!(table.selected_count(), 20);
        table.toggle_page_selection();
        assert_eq!(table.selected_count(), 10);
    }

    #[test]
    fn toggle_unknown_id_is_a_noop() {
        let mut table = UserTable::new(numbered(3), 10);
        table.toggle_selected(UserId::from_bytes([99; 16]));
        assert_eq!(table.selected_count(), 0);
        assert_selection_in_working_set(&table);
    }

    #[test]
    fn hidden_rows_cannot_be_selected() {
        let mut table = UserTable::new(
            vec![
                user(1, "Edwin", "Martinson", UserStatus::Active),
                user(2, "Kelcy", "Martinson", UserStatus::Inactive),
            ],
            10,
        );
        table.set_status_filter(Some(UserStatus::Active));
        table.toggle_selected(UserId::from_bytes([2; 16]));
        assert_eq!(table.selected_count(), 0);
        assert!(table.request_delete().is_none());

        table.set_status_filter(None);
        table.toggle_selected(UserId::from_bytes([2; 16]));
        assert!(table.is_selected(UserId::from_bytes([2; 16])));
    }

    #[test]
    fn filter_prunes_selection_to_result() {
        let mut table = UserTable::new(
            vec![
                user(1, "Edwin", "Martinson", UserStatus::Active),
                user(2, "Kelcy", "Martinson", UserStatus::Inactive),
            ],
            10,
        );
        table.toggle_page_selection();
        assert_eq!(table.selected_count(), 2);
        table.set_status_filter(Some(UserStatus::Active));
        assert_eq!(table.selected_count(), 1);
        assert!(table.is_selected(UserId::from_bytes([1; 16])));
    }

    #[test]
    fn delete_removes_selected_and_clears_selection() {
        let mut table = UserTable::new(numbered(25), 10);
        table.last_page();
        table.toggle_page_selection();
        let doomed: Vec<UserId> = table.visible_rows().iter().map(|r| r.id).collect();

        let confirmation = table.request_delete().unwrap();
        assert_eq!(confirmation.count(), 5);
        assert_eq!(table.confirm_delete(confirmation), 5);

        assert_eq!(table.selected_count(), 0);
        assert_eq!(table.records().len(), 20);
        assert!(table.records().iter().all(|r| !doomed.contains(&r.id)));
        let summary = table.page_summary();
        assert_eq!(summary.page_count, 2);
        assert_eq!(summary.page_index, 1);
        assert_selection_in_working_set(&table);
    }

    #[test]
    fn delete_uses_selection_at_confirm_time() {
        let mut table = UserTable::new(numbered(5), 10);
        let ids: Vec<UserId> = table.visible_rows().iter().map(|r| r.id).collect();
        table.toggle_selected(ids[1]);
        let confirmation = table.request_delete().unwrap();
        assert_eq!(confirmation.count(), 1);

        table.toggle_selected(ids[0]);
        assert_eq!(table.confirm_delete(confirmation), 2);
        assert_eq!(table.records().len(), 3);
        assert!(table.records().iter().all(|r| r.id != ids[0] && r.id != ids[1]));
        assert_eq!(table.selected_count(), 0);
    }

    #[test]
    fn cancelled_delete_changes_nothing() {
        let mut table = UserTable::new(numbered(5), 10);
        assert!(table.request_delete().is_none());

        table.toggle_page_selection();
        let confirmation = table.request_delete();
        assert!(confirmation.is_some());
        drop(confirmation);
        assert_eq!(table.records().len(), 5);
        assert_eq!(table.selected_count(), 5);
    }

    #[test]
    fn column_toggle_twice_restores_visibility() {
        let mut table = UserTable::new(numbered(3), 10);
        for column in ColumnKey::ALL {
            let before = table.is_column_visible(column);
            table.toggle_column(column);
            assert_ne!(table.is_column_visible(column), before);
            table.toggle_column(column);
            assert_eq!(table.is_column_visible(column), before);
        }

        table.toggle_column(ColumnKey::Email);
        table.toggle_column(ColumnKey::Phone);
        assert_eq!(table.visible_columns().len(), ColumnKey::ALL.len() - 2);
        assert!(table.records().iter().all(|r| !r.email.is_empty()));
        table.show_all_columns();
        assert_eq!(table.visible_columns(), ColumnKey::ALL.to_vec());
    }
}
