//! Day estimates from free-text durations
//!
//! Durations are whatever the planner wrote ("2 days", "1.5 weeks",
//! "about 3 days of review"). Only the first quantity followed by a known
//! unit counts; anything else yields no estimate.

use crate::plan::{AllocationPlan, Phase, Task};
use once_cell::sync::Lazy;
use regex::Regex;

static QUANTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(days?|weeks?|months?)\b").expect("duration pattern is valid")
});

/// Calendar days in one week
pub const DAYS_PER_WEEK: f64 = 7.0;

/// Calendar days in one month
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Parse a duration text into days
///
/// A range such as "2-3 days" counts its upper bound, since the unit follows
/// the last number.
#[must_use]
pub fn parse_days(text: &str) -> Option<f64> {
    let caps = QUANTITY.captures(text)?;
    let quantity: f64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2)?.as_str().to_ascii_lowercase();
    let factor = if unit.starts_with("week") {
        DAYS_PER_WEEK
    } else if unit.starts_with("month") {
        DAYS_PER_MONTH
    } else {
        1.0
    };
    Some(quantity * factor)
}

impl Task {
    /// Estimated days, if the duration names a quantity
    #[inline]
    #[must_use]
    pub fn estimated_days(&self) -> Option<f64> {
        parse_days(&self.duration)
    }
}

impl Phase {
    /// Sum of the tasks' known estimates
    #[must_use]
    pub fn total_days(&self) -> f64 {
        self.tasks.iter().filter_map(Task::estimated_days).sum()
    }
}

impl AllocationPlan {
    /// Sum of every phase's known estimates
    #[must_use]
    pub fn total_days(&self) -> f64 {
        self.phases.iter().map(Phase::total_days).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_units() {
        assert_eq!(parse_days("2 days"), Some(2.0));
        assert_eq!(parse_days("1 day"), Some(1.0));
        assert_eq!(parse_days("1.5 Weeks"), Some(10.5));
        assert_eq!(parse_days("2 months"), Some(60.0));
        assert_eq!(parse_days("about 3 days of review"), Some(3.0));
        assert_eq!(parse_days("2-3 days"), Some(3.0));
    }

    #[test]
    fn unknown_text_has_no_estimate() {
        assert_eq!(parse_days("To Be Determined"), None);
        assert_eq!(parse_days("ongoing"), None);
        assert_eq!(parse_days("3 sprints"), None);
    }

    #[test]
    fn totals_skip_unknown() {
        let mut phase = Phase::new(1, "Setup");
        phase.tasks.push(Task::new("1.1", "a").with_duration("2 days"));
        phase.tasks.push(Task::new("1.2", "b").with_duration("1 week"));
        phase.tasks.push(Task::new("1.3", "c").with_duration("To Be Determined"));

        let plan = AllocationPlan { phases: vec![phase.clone(), phase] };
        assert_eq!(plan.phases[0].total_days(), 9.0);
        assert_eq!(plan.total_days(), 18.0);
    }
}
