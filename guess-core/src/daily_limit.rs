/// Gate on how many games a user may start per calendar day.
///
/// The count itself comes from the history store; this is only the predicate.
pub struct DailyLimitGuard;

impl DailyLimitGuard {
    /// A user exactly at the limit is denied.
    pub fn can_start_new_session(played_today: u32, limit: u32) -> bool {
        played_today < limit
    }

    pub fn remaining(played_today: u32, limit: u32) -> u32 {
        limit.saturating_sub(played_today)
    }
}
