//! Pagination utilities for service layer
//!
//! Provides a simple `Pagination` struct and helpers to normalize inputs.

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u64,
    /// items per page
    pub limit: u64,
}

impl Pagination {
    /// Build from raw query strings under the default-substitution policy:
    /// anything that does not parse as a positive integer becomes the default.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(DEFAULT_PAGE);
        let limit = limit
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|l| *l >= 1)
            .unwrap_or(DEFAULT_LIMIT);
        Self { page, limit }
    }

    /// Records to skip before the current page. Saturates so extreme
    /// client-supplied values cannot overflow; a past-the-end skip just
    /// yields an empty page.
    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: DEFAULT_PAGE, limit: DEFAULT_LIMIT } }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn absent_values_use_defaults() {
        let p = Pagination::from_raw(None, None);
        assert_eq!(p, Pagination { page: 1, limit: 10 });
        assert_eq!(p.skip(), 0);
    }

    #[test]
    fn numeric_strings_parse() {
        let p = Pagination::from_raw(Some("3"), Some("5"));
        assert_eq!(p, Pagination { page: 3, limit: 5 });
        assert_eq!(p.skip(), 10);
    }

    #[test]
    fn extreme_values_saturate_instead_of_overflowing() {
        let p = Pagination::from_raw(Some("18446744073709551615"), Some("10"));
        assert_eq!(p.page, u64::MAX);
        assert_eq!(p.skip(), u64::MAX);
        let p = Pagination::from_raw(Some("18446744073709551615"), Some("18446744073709551615"));
        assert_eq!(p.skip(), u64::MAX);
    }

    #[test]
    fn garbage_and_zero_substitute_defaults() {
        let p = Pagination::from_raw(Some("abc"), Some("0"));
        assert_eq!(p, Pagination { page: 1, limit: 10 });
        let p = Pagination::from_raw(Some("-2"), Some("2.5"));
        assert_eq!(p, Pagination { page: 1, limit: 10 });
    }
}
