//! Filtering and sorting of display rows.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::DisplayRow;

// ============================================================================
// SortKey / SortOrder
// ============================================================================

/// Column a row listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Port,
    ApplicationName,
    DisplayAddress,
    Status,
    /// Any unrecognized key. Every row yields the same empty sort value.
    Unknown,
}

impl SortKey {
    /// Parse a `sort_by` parameter.
    ///
    /// Accepts the dashboard form values (`laddr.port`, `display_laddr_ip`)
    /// as well as the plain field names.
    pub fn parse(value: &str) -> Self {
        match value {
            "laddr.port" | "port" => SortKey::Port,
            "application_name" => SortKey::ApplicationName,
            "display_laddr_ip" | "display_address" => SortKey::DisplayAddress,
            "status" => SortKey::Status,
            _ => SortKey::Unknown,
        }
    }

    /// The value submitted by the dashboard form for this key.
    pub fn as_param(&self) -> &'static str {
        match self {
            SortKey::Port => "laddr.port",
            SortKey::ApplicationName => "application_name",
            SortKey::DisplayAddress => "display_laddr_ip",
            SortKey::Status => "status",
            SortKey::Unknown => "",
        }
    }

    fn value<'a>(&self, row: &'a DisplayRow) -> SortValue<'a> {
        match self {
            SortKey::Port => SortValue::Number(row.port),
            SortKey::ApplicationName => SortValue::Text(&row.application_name),
            SortKey::DisplayAddress => SortValue::Text(&row.display_address),
            SortKey::Status => SortValue::Text(&row.status),
            SortKey::Unknown => SortValue::Empty,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse a `sort_order` parameter. Only `desc` is descending.
    pub fn parse(value: &str) -> Self {
        if value == "desc" {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue<'a> {
    Empty,
    Number(u16),
    Text(&'a str),
}

// ============================================================================
// RowQuery
// ============================================================================

/// Search and sort parameters of one listing request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RowQuery {
    /// Case-insensitive substring to search for. Empty disables filtering.
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub sort_key: SortKey,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl RowQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a query from raw request parameters.
    pub fn from_params(search: &str, sort_by: &str, sort_order: &str) -> Self {
        Self {
            search: search.to_string(),
            sort_key: SortKey::parse(sort_by),
            sort_order: SortOrder::parse(sort_order),
        }
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn with_sort(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort_key = key;
        self.sort_order = order;
        self
    }

    /// Apply this query to a list of rows.
    pub fn apply(&self, rows: Vec<DisplayRow>) -> Vec<DisplayRow> {
        process_rows(rows, &self.search, self.sort_key, self.sort_order)
    }
}

/// Filter, partition and sort rows for display.
///
/// Custom-mapped rows always come before auto-detected ones: the two groups
/// are sorted separately and concatenated, whatever the sort order.
pub fn process_rows(
    rows: Vec<DisplayRow>,
    search_query: &str,
    sort_key: SortKey,
    sort_order: SortOrder,
) -> Vec<DisplayRow> {
    let rows = if search_query.is_empty() {
        rows
    } else {
        let query_lower = search_query.to_lowercase();
        rows.into_iter()
            .filter(|row| row.matches_search(&query_lower))
            .collect()
    };

    let (mut mapped, mut unmapped): (Vec<_>, Vec<_>) =
        rows.into_iter().partition(|row| row.has_custom_mapping);

    sort_rows(&mut mapped, sort_key, sort_order);
    sort_rows(&mut unmapped, sort_key, sort_order);

    mapped.extend(unmapped);
    mapped
}

// Stable in both directions: equal rows keep their input order.
fn sort_rows(rows: &mut [DisplayRow], key: SortKey, order: SortOrder) {
    rows.sort_by(|a, b| {
        let ordering: Ordering = key.value(a).cmp(&key.value(b));
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(port: u16, name: &str, mapped: bool) -> DisplayRow {
        DisplayRow {
            local_ip: "0.0.0.0".to_string(),
            display_address: "Localhost Amplo".to_string(),
            port,
            status: "LISTEN".to_string(),
            application_name: name.to_string(),
            has_custom_mapping: mapped,
        }
    }

    fn ports(rows: &[DisplayRow]) -> Vec<u16> {
        rows.iter().map(|r| r.port).collect()
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(SortKey::parse("laddr.port"), SortKey::Port);
        assert_eq!(SortKey::parse("application_name"), SortKey::ApplicationName);
        assert_eq!(SortKey::parse("display_laddr_ip"), SortKey::DisplayAddress);
        assert_eq!(SortKey::parse("status"), SortKey::Status);
        assert_eq!(SortKey::parse("laddr.nope"), SortKey::Unknown);
        assert_eq!(SortKey::parse("pid"), SortKey::Unknown);
        assert_eq!(SortOrder::parse("desc"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("DESC"), SortOrder::Asc);
    }

    #[test]
    fn test_mapped_rows_come_first() {
        let rows = vec![row(1, "Processo: a", false), row(9999, "Mine", true)];
        let result = process_rows(rows, "", SortKey::Port, SortOrder::Asc);
        assert_eq!(ports(&result), vec![9999, 1]);
    }

    #[test]
    fn test_mapped_rows_come_first_descending() {
        let rows = vec![
            row(10, "Processo: a", false),
            row(20, "B", true),
            row(30, "Processo: c", false),
            row(5, "A", true),
        ];
        let result = process_rows(rows, "", SortKey::Port, SortOrder::Desc);
        assert_eq!(ports(&result), vec![20, 5, 30, 10]);
    }

    #[test]
    fn test_desc_reverses_asc() {
        let rows = vec![
            row(443, "x", false),
            row(22, "y", false),
            row(8080, "z", false),
            row(80, "w", false),
        ];
        let asc = process_rows(rows.clone(), "", SortKey::Port, SortOrder::Asc);
        let desc = process_rows(asc.clone(), "", SortKey::Port, SortOrder::Desc);

        let mut reversed = ports(&asc);
        reversed.reverse();
        assert_eq!(ports(&desc), reversed);
        assert_eq!(ports(&asc), vec![22, 80, 443, 8080]);
    }

    #[test]
    fn test_sort_by_application_name_is_stable() {
        let rows = vec![
            row(3, "Processo: b", false),
            row(1, "Processo: a", false),
            row(2, "Processo: b", false),
        ];
        let asc = process_rows(rows.clone(), "", SortKey::ApplicationName, SortOrder::Asc);
        assert_eq!(ports(&asc), vec![1, 3, 2]);

        let desc = process_rows(rows, "", SortKey::ApplicationName, SortOrder::Desc);
        assert_eq!(ports(&desc), vec![3, 2, 1]);
    }

    #[test]
    fn test_unknown_key_keeps_input_order() {
        let rows = vec![row(30, "c", false), row(10, "a", false), row(20, "b", false)];
        let result = process_rows(rows, "", SortKey::Unknown, SortOrder::Desc);
        assert_eq!(ports(&result), vec![30, 10, 20]);
    }

    #[test]
    fn test_filter_is_case_insensitive_and_idempotent() {
        let rows = vec![
            row(5000, "MyApp", true),
            row(22, "SSH", true),
            row(631, "Processo: cupsd", false),
        ];
        let once = process_rows(rows, "MYAPP", SortKey::Port, SortOrder::Asc);
        assert_eq!(ports(&once), vec![5000]);

        let twice = process_rows(once.clone(), "MYAPP", SortKey::Port, SortOrder::Asc);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_matches_port_text() {
        let rows = vec![row(8080, "a", false), row(3000, "b", false)];
        let result = RowQuery::new().with_search("80").apply(rows);
        assert_eq!(ports(&result), vec![8080]);
    }

    #[test]
    fn test_query_from_params() {
        let query = RowQuery::from_params("ssh", "status", "desc");
        assert_eq!(query.search, "ssh");
        assert_eq!(query.sort_key, SortKey::Status);
        assert_eq!(query.sort_order, SortOrder::Desc);
        assert_eq!(query.sort_key.as_param(), "status");
    }
}
