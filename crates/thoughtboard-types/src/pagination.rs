use serde::{Deserialize, Serialize};

/// Order of the `createdAt` sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    /// Newest first
    #[default]
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl SortDirection {
    /// Parse a client-supplied direction token, case-insensitively
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" | "oldest" | "1" => Some(SortDirection::Ascending),
            "desc" | "descending" | "newest" | "-1" => Some(SortDirection::Descending),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    /// 1 or -1, the usual document-store sort order value
    pub fn order(&self) -> i32 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }
}

/// Bounded fetch window handed verbatim to a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPlan {
    pub direction: SortDirection,
    pub page: u64,
    pub skip: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_per_page: u64,
    pub max_per_page: u64,
    pub default_sort: SortDirection,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_per_page: 20,
            max_per_page: 100,
            default_sort: SortDirection::Descending,
        }
    }
}

impl PaginationConfig {
    /// Turn raw `sort`, `page` and `perPage` query values into a fetch plan.
    ///
    /// Absent, unparseable, zero or negative numbers fall back to the
    /// defaults; `perPage` is capped at `max_per_page`.
    pub fn resolve(&self, sort: Option<&str>, page: Option<&str>, per_page: Option<&str>) -> FetchPlan {
        let direction = sort
            .and_then(SortDirection::parse)
            .unwrap_or(self.default_sort);

        let max_per_page = self.max_per_page.max(1);
        let per_page = parse_positive(per_page)
            .unwrap_or(self.default_per_page)
            .clamp(1, max_per_page);
        let page = parse_positive(page).unwrap_or(1);

        FetchPlan {
            direction,
            page,
            skip: (page - 1).saturating_mul(per_page),
            limit: per_page,
        }
    }
}

fn parse_positive(value: Option<&str>) -> Option<u64> {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
        .map(|n| n as u64)
}
