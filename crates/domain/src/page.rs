//! Pagination bounds shared by every list filter.

use serde::{Deserialize, Serialize};

/// Offset/limit window of a list query.
///
/// A zero `limit` means "unbounded" and a zero `offset` means "from the
/// start"; neither renders a clause in the generated SQL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Page {
    pub offset: u64,
    pub limit: u64,
}

impl Page {
    /// Largest bound a backend accepts; SQL engines store both as a signed
    /// 64-bit integer.
    pub const MAX_BOUND: u64 = i64::MAX.unsigned_abs();

    #[must_use]
    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// Fill a missing limit with `default` and clamp it to `max`.
    #[must_use]
    pub fn bounded(self, default: u64, max: u64) -> Self {
        let limit = match self.limit {
            0 => default,
            limit => limit.min(max),
        };
        Self {
            offset: self.offset,
            limit,
        }
        .clamped()
    }

    /// Clamp both bounds to [`Page::MAX_BOUND`]. A clamped offset still
    /// lies past any table a backend can hold.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            offset: self.offset.min(Self::MAX_BOUND),
            limit: self.limit.min(Self::MAX_BOUND),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_unbounded_page() {
        assert_eq!(Page::default(), Page::new(0, 0));
    }

    #[test]
    fn should_fill_missing_limit_with_default() {
        assert_eq!(Page::new(5, 0).bounded(25, 100), Page::new(5, 25));
    }

    #[test]
    fn should_clamp_limit_to_max() {
        assert_eq!(Page::new(0, 1_000).bounded(25, 100), Page::new(0, 100));
    }

    #[test]
    fn should_clamp_offset_to_signed_range() {
        let page = Page::new(u64::MAX, 20).bounded(25, 100);
        assert_eq!(page, Page::new(9_223_372_036_854_775_807, 20));
    }

    #[test]
    fn should_keep_small_offsets_when_clamping() {
        assert_eq!(Page::new(7, 0).clamped(), Page::new(7, 0));
    }

    #[test]
    fn should_keep_limit_within_bounds() {
        assert_eq!(Page::new(10, 40).bounded(25, 100), Page::new(10, 40));
    }
}
