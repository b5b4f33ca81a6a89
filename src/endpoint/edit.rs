//! Copy-on-write edits.
//!
//! The editor never mutates a configuration in place. Each form action is an
//! [`Edit`] and [`EndpointConfig::apply`] produces the next snapshot.

use super::*;

/// A single editor action.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    SetMethod(Method),
    SetPath(String),
    SetPrimaryTable(String),
    SetPrimaryAlias(Option<String>),
    SetPagination(Pagination),
    SetDistinct(bool),
    SetHardLimit(Option<u32>),
    SetCustomSorting(bool),
    SetFieldSelection(bool),

    AddJoin,
    UpdateJoin(usize, JoinSpec),
    RemoveJoin(usize),

    AddField,
    UpdateField(usize, FieldSpec),
    RemoveField(usize),

    AddFilter,
    UpdateFilter(usize, FilterSpec),
    RemoveFilter(usize),

    AddSort,
    UpdateSort(usize, SortSpec),
    RemoveSort(usize),

    AddParam,
    UpdateParam(usize, QueryParam),
    RemoveParam(usize),
}

impl EndpointConfig {
    /// Return the configuration that results from applying `edit`.
    ///
    /// Out of range updates and removals leave the configuration unchanged.
    pub fn apply(&self, edit: Edit) -> EndpointConfig {
        let mut next = self.clone();
        match edit {
            Edit::SetMethod(m) => next.method = m,
            Edit::SetPath(p) => next.path = p,
            Edit::SetPrimaryTable(t) => next.primary_table = t,
            Edit::SetPrimaryAlias(a) => next.primary_table_alias = a,
            Edit::SetPagination(p) => next.pagination = p,
            Edit::SetDistinct(d) => next.enable_distinct = d,
            Edit::SetHardLimit(l) => next.hard_limit = l,
            Edit::SetCustomSorting(s) => next.allow_custom_sorting = s,
            Edit::SetFieldSelection(s) => next.allow_field_selection = s,

            Edit::AddJoin => next.joins.push(JoinSpec::default()),
            Edit::UpdateJoin(i, j) => replace(&mut next.joins, i, j),
            Edit::RemoveJoin(i) => remove(&mut next.joins, i),

            Edit::AddField => next.selected_fields.push(FieldSpec::default()),
            Edit::UpdateField(i, f) => replace(&mut next.selected_fields, i, f),
            Edit::RemoveField(i) => remove(&mut next.selected_fields, i),

            Edit::AddFilter => next.filters.push(FilterSpec::default()),
            Edit::UpdateFilter(i, f) => replace(&mut next.filters, i, f),
            Edit::RemoveFilter(i) => remove(&mut next.filters, i),

            Edit::AddSort => next.sorting.push(SortSpec::default()),
            Edit::UpdateSort(i, s) => replace(&mut next.sorting, i, s),
            Edit::RemoveSort(i) => remove(&mut next.sorting, i),

            Edit::AddParam => next.query_params.push(QueryParam::default()),
            Edit::UpdateParam(i, p) => replace(&mut next.query_params, i, p),
            Edit::RemoveParam(i) => remove(&mut next.query_params, i),
        }
        next
    }
}

fn replace<T>(items: &mut [T], index: usize, item: T) {
    if let Some(slot) = items.get_mut(index) {
        *slot = item;
    }
}

fn remove<T>(items: &mut Vec<T>, index: usize) {
    if index < items.len() {
        items.remove(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_leaves_original_untouched() {
        let before = EndpointConfig::new("users");
        let after = before.apply(Edit::AddFilter);
        assert!(before.filters.is_empty());
        assert_eq!(after.filters.len(), 1);
        assert_eq!(after.filters[0], FilterSpec::default());
    }

    #[test]
    fn test_update_and_remove() {
        let cfg = EndpointConfig::new("users")
            .apply(Edit::AddSort)
            .apply(Edit::AddSort)
            .apply(Edit::UpdateSort(1, SortSpec::desc("created_at")));
        assert_eq!(cfg.sorting[1].column, "created_at");

        let cfg = cfg.apply(Edit::RemoveSort(0));
        assert_eq!(cfg.sorting.len(), 1);
        assert_eq!(cfg.sorting[0].direction, SortOrder::Desc);
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let cfg = EndpointConfig::new("users");
        assert_eq!(cfg.apply(Edit::RemoveJoin(3)), cfg);
        assert_eq!(cfg.apply(Edit::UpdateField(0, FieldSpec::column("id"))), cfg);
    }
}
