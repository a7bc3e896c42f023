//! Compiles optional task filters into a parameterized SQL query.
//!
//! Predicates and their values are collected as pairs and placeholders are
//! numbered from list position only when the SQL is rendered, so `$n`
//! always refers to `params[n - 1]` whatever subset of filters is present.

use crate::types::CivilTime;

/// Column list for `completed_task_logs` SELECT queries.
pub const TASK_COLUMNS: &str = "\
    task_id, company_name, branch_name, machine_name, \
    task_start_date, task_start_time, task_end_date, task_end_time, \
    task_duration_in_minutes, is_rental, task_detail";

/// Optional criteria for narrowing a task query.
///
/// Both date bounds are inclusive and both compare against the task's
/// *start* date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub company_name: Option<String>,
    pub branch_name: Option<String>,
    pub start_date: Option<CivilTime>,
    pub end_date: Option<CivilTime>,
}

/// Typed bind value for a dynamically built query.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Timestamp(CivilTime),
}

/// Rendered SQL plus the values to bind, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredQuery {
    pub sql: String,
    pub params: Vec<FilterValue>,
}

/// Accumulates `AND` predicates on top of an always-true base.
#[derive(Debug)]
pub struct ConjunctionBuilder {
    base: String,
    predicates: Vec<(&'static str, FilterValue)>,
}

impl ConjunctionBuilder {
    /// `base` must end in a `WHERE` clause that every row satisfies.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            predicates: Vec::new(),
        }
    }

    /// Add `AND <predicate> $n`, e.g. `push("company_name =", value)`.
    pub fn push(&mut self, predicate: &'static str, value: FilterValue) -> &mut Self {
        self.predicates.push((predicate, value));
        self
    }

    /// Render placeholders from list position and append `suffix`.
    pub fn finish(self, suffix: &str) -> FilteredQuery {
        let mut sql = self.base;
        let mut params = Vec::with_capacity(self.predicates.len());

        for (idx, (predicate, value)) in self.predicates.into_iter().enumerate() {
            sql.push_str(&format!(" AND {predicate} ${}", idx + 1));
            params.push(value);
        }
        if !suffix.is_empty() {
            sql.push(' ');
            sql.push_str(suffix);
        }

        FilteredQuery { sql, params }
    }
}

/// Build the task listing query for `filter`.
///
/// Filters are applied in the fixed order company, branch, start date lower
/// bound, start date upper bound. Empty names count as absent.
pub fn build_filtered_query(filter: &TaskFilter) -> FilteredQuery {
    let mut builder = ConjunctionBuilder::new(format!(
        "SELECT {TASK_COLUMNS} FROM completed_task_logs WHERE 1=1"
    ));

    if let Some(company) = non_empty(&filter.company_name) {
        builder.push("company_name =", FilterValue::Text(company.to_string()));
    }
    if let Some(branch) = non_empty(&filter.branch_name) {
        builder.push("branch_name =", FilterValue::Text(branch.to_string()));
    }
    if let Some(from) = filter.start_date {
        builder.push("task_start_date >=", FilterValue::Timestamp(from));
    }
    if let Some(to) = filter.end_date {
        builder.push("task_start_date <=", FilterValue::Timestamp(to));
    }

    builder.finish("ORDER BY task_start_date ASC, task_id ASC")
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::civil_time::CivilTimeZone;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> CivilTime {
        CivilTimeZone::default().at_midnight(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn no_filters_is_a_full_scan() {
        let query = build_filtered_query(&TaskFilter::default());

        assert!(query.params.is_empty());
        assert!(!query.sql.contains('$'));
        assert!(!query.sql.contains(" AND "));
        assert!(query.sql.contains("WHERE 1=1"));
    }

    #[test]
    fn company_and_end_date_use_first_two_placeholders() {
        let end = day(2024, 2, 1);
        let query = build_filtered_query(&TaskFilter {
            company_name: Some("Acme".to_string()),
            end_date: Some(end),
            ..Default::default()
        });

        assert!(query.sql.contains("AND company_name = $1"));
        assert!(query.sql.contains("AND task_start_date <= $2"));
        assert_eq!(
            query.params,
            vec![
                FilterValue::Text("Acme".to_string()),
                FilterValue::Timestamp(end)
            ]
        );
    }

    #[test]
    fn all_filters_in_fixed_order() {
        let from = day(2024, 1, 1);
        let to = day(2024, 1, 31);
        let query = build_filtered_query(&TaskFilter {
            company_name: Some("Acme".to_string()),
            branch_name: Some("Kadikoy".to_string()),
            start_date: Some(from),
            end_date: Some(to),
        });

        let company = query.sql.find("company_name = $1").unwrap();
        let branch = query.sql.find("branch_name = $2").unwrap();
        let lower = query.sql.find("task_start_date >= $3").unwrap();
        let upper = query.sql.find("task_start_date <= $4").unwrap();
        assert!(company < branch && branch < lower && lower < upper);
        assert_eq!(query.params.len(), 4);
    }

    #[test]
    fn empty_names_are_ignored() {
        let query = build_filtered_query(&TaskFilter {
            company_name: Some(String::new()),
            branch_name: Some("Kadikoy".to_string()),
            ..Default::default()
        });

        assert!(query.sql.contains("AND branch_name = $1"));
        assert!(!query.sql.contains("company_name ="));
        assert_eq!(query.params, vec![FilterValue::Text("Kadikoy".to_string())]);
    }

    #[test]
    fn order_by_follows_predicates() {
        let query = build_filtered_query(&TaskFilter {
            branch_name: Some("Kadikoy".to_string()),
            ..Default::default()
        });

        assert!(query.sql.ends_with("ORDER BY task_start_date ASC, task_id ASC"));
    }
}
