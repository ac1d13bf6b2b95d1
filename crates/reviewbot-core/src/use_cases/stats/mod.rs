pub(crate) mod get_stats;

pub use get_stats::GetStatsInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::get_stats::MockGetStatsInterface;
