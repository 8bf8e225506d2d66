/// Position of the current question within the session, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based number of the question being shown.
    pub current: u32,
    pub total: u32,
    pub percentage: u8,
}

impl Progress {
    #[must_use]
    pub fn of(current: u32, total: u32) -> Self {
        Self {
            current,
            total,
            percentage: percentage(current, total),
        }
    }
}

/// `current * 100 / total`, capped at 100.
#[must_use]
pub fn percentage(current: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = u64::from(current.min(total)) * 100 / u64::from(total);
    u8::try_from(pct).unwrap_or(100)
}
