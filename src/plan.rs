//! Derived views over the task collection.
//!
//! Everything here is a pure function of the task slice and the selected
//! month/year. Callers recompute after every mutation instead of caching.

use chrono::{Datelike, NaiveDate};

use crate::fields::*;
use crate::task::{DayPlan, MonthlyStats, Task};

/// Tasks in `month`, ordered by day. Tasks on the same day keep collection order.
pub fn filter_and_sort_by_month(tasks: &[Task], month: u32) -> Vec<&Task> {
    let mut out: Vec<&Task> = tasks.iter().filter(|t| t.month == month).collect();
    // sort_by_key is stable
    out.sort_by_key(|t| t.day);
    out
}

/// Tasks that are not completed, order preserved.
pub fn pending_tasks<'a>(month_tasks: &[&'a Task]) -> Vec<&'a Task> {
    month_tasks
        .iter()
        .copied()
        .filter(|t| t.status != TaskStatus::Completed)
        .collect()
}

/// Count tasks per status and the completion rate.
///
/// Cancelled tasks count toward `total` only.
pub fn compute_stats(month_tasks: &[&Task]) -> MonthlyStats {
    let count = |status: TaskStatus| month_tasks.iter().filter(|t| t.status == status).count();
    let total = month_tasks.len();
    let completed = count(TaskStatus::Completed);
    let rate = if total > 0 {
        // f64::round rounds half away from zero
        (completed as f64 / total as f64 * 100.0).round() as u32
    } else {
        0
    };
    MonthlyStats {
        total,
        completed,
        in_progress: count(TaskStatus::InProgress),
        not_started: count(TaskStatus::NotStarted),
        rate,
    }
}

/// Gregorian leap year.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (0-based) of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 if is_leap_year(year) => 29,
        1 => 28,
        3 | 5 | 8 | 10 => 30,
        _ => 31,
    }
}

/// Calendar cells for a Monday-first grid: leading blanks, then days 1..=N.
///
/// The trailing row is not padded.
pub fn calendar_layout(year: i32, month: u32) -> Vec<Option<u32>> {
    let blanks = NaiveDate::from_ymd_opt(year, month + 1, 1)
        .map(|first| first.weekday().num_days_from_monday())
        .unwrap_or(0);
    let mut cells: Vec<Option<u32>> = vec![None; blanks as usize];
    cells.extend((1..=days_in_month(year, month)).map(Some));
    cells
}

/// One entry per calendar day with the tasks placed on it.
///
/// Tasks whose day is past the end of the month appear in no entry.
pub fn day_plans<'a>(month_tasks: &[&'a Task], year: i32, month: u32) -> Vec<DayPlan<'a>> {
    (1..=days_in_month(year, month))
        .map(|day| {
            let tasks: Vec<&Task> = month_tasks
                .iter()
                .copied()
                .filter(|t| u32::try_from(t.day) == Ok(day))
                .collect();
            let completed_count = tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Completed)
                .count();
            DayPlan {
                day,
                planned_count: tasks.len(),
                completed_count,
                tasks,
            }
        })
        .collect()
}

/// Stable sort of a task list by `key`.
pub fn sort_tasks(tasks: &mut [&Task], key: SortKey, direction: SortDirection) {
    tasks.sort_by(|a, b| {
        let ord = match key {
            SortKey::Day => a.day.cmp(&b.day),
            SortKey::Month => (a.month, a.day).cmp(&(b.month, b.day)),
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortKey::Status => status_rank(a.status).cmp(&status_rank(b.status)),
            SortKey::Priority => a.priority.rank().cmp(&b.priority.rank()),
        };
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

fn status_rank(status: TaskStatus) -> usize {
    TaskStatus::ALL.iter().position(|s| *s == status).unwrap_or(0)
}

/// The month after `month`, wrapping December to January.
pub fn next_month(month: u32) -> u32 {
    if month < 11 { month + 1 } else { 0 }
}

/// The month before `month`, wrapping January to December.
pub fn prev_month(month: u32) -> u32 {
    if month > 0 { month - 1 } else { 11 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, month: u32, day: i32, status: TaskStatus) -> Task {
        let mut t = Task::new(title, month, day, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        t.status = status;
        t
    }

    fn titles(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn month_filter_sorts_by_day_and_keeps_ties_in_order() {
        let tasks = vec![
            task("late", 0, 20, TaskStatus::NotStarted),
            task("other month", 1, 1, TaskStatus::NotStarted),
            task("tie-first", 0, 5, TaskStatus::NotStarted),
            task("early", 0, 1, TaskStatus::NotStarted),
            task("tie-second", 0, 5, TaskStatus::Completed),
        ];
        let month = filter_and_sort_by_month(&tasks, 0);
        assert_eq!(titles(&month), ["early", "tie-first", "tie-second", "late"]);
        assert!(month.windows(2).all(|w| w[0].day <= w[1].day));
        assert!(month.iter().all(|t| t.month == 0));
    }

    #[test]
    fn pending_excludes_completed_only() {
        let tasks = vec![
            task("a", 0, 1, TaskStatus::Completed),
            task("b", 0, 2, TaskStatus::Cancelled),
            task("c", 0, 3, TaskStatus::InProgress),
        ];
        let month = filter_and_sort_by_month(&tasks, 0);
        assert_eq!(titles(&pending_tasks(&month)), ["b", "c"]);
    }

    #[test]
    fn stats_of_nothing_is_zero() {
        assert_eq!(compute_stats(&[]), MonthlyStats::default());
    }

    #[test]
    fn cancelled_tasks_count_only_in_total() {
        let tasks = vec![
            task("a", 0, 1, TaskStatus::Completed),
            task("b", 0, 2, TaskStatus::Cancelled),
            task("c", 0, 3, TaskStatus::InProgress),
            task("d", 0, 4, TaskStatus::NotStarted),
        ];
        let month = filter_and_sort_by_month(&tasks, 0);
        let stats = compute_stats(&month);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed + stats.in_progress + stats.not_started, 3);
        assert_eq!(stats.rate, 25);
    }

    #[test]
    fn rate_rounds_half_away_from_zero() {
        // 1 of 8 is 12.5%
        let mut tasks = vec![task("done", 0, 1, TaskStatus::Completed)];
        for i in 0..7 {
            tasks.push(task(&i.to_string(), 0, 1, TaskStatus::NotStarted));
        }
        let month = filter_and_sort_by_month(&tasks, 0);
        assert_eq!(compute_stats(&month).rate, 13);

        // 2 of 3 is 66.67%
        let tasks = vec![
            task("a", 0, 1, TaskStatus::Completed),
            task("b", 0, 1, TaskStatus::Completed),
            task("c", 0, 1, TaskStatus::NotStarted),
        ];
        let month = filter_and_sort_by_month(&tasks, 0);
        assert_eq!(compute_stats(&month).rate, 67);
    }

    #[test]
    fn days_in_month_follows_gregorian_rule() {
        assert_eq!(days_in_month(2026, 1), 28);
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(1900, 1), 28);
        assert_eq!(days_in_month(2000, 1), 29);
        assert_eq!(days_in_month(2026, 0), 31);
        assert_eq!(days_in_month(2026, 3), 30);
        assert_eq!(days_in_month(2026, 11), 31);
        // Far outside the calendar range chrono supports.
        assert_eq!(days_in_month(i32::MAX, 11), 31);
        assert_eq!(days_in_month(300_000, 1), 29);
        assert_eq!(days_in_month(1, 1), 28);
        assert_eq!(days_in_month(9999, 1), 28);
    }

    #[test]
    fn calendar_at_the_cli_year_bounds() {
        // 0001-01-01 is a Monday, 9999-12-01 a Wednesday.
        assert_eq!(calendar_layout(1, 0)[0], Some(1));
        let december = calendar_layout(9999, 11);
        assert_eq!(&december[..3], &[None, None, Some(1)]);
        assert_eq!(december.len(), 2 + 31);
    }

    #[test]
    fn january_2026_starts_on_thursday() {
        let cells = calendar_layout(2026, 0);
        assert_eq!(&cells[..4], &[None, None, None, Some(1)]);
        assert_eq!(cells.len(), 3 + 31);
        assert_eq!(cells.last(), Some(&Some(31)));
    }

    #[test]
    fn monday_start_has_no_blanks_and_sunday_start_has_six() {
        // June 2026 starts on a Monday, February 2026 on a Sunday.
        assert_eq!(calendar_layout(2026, 5)[0], Some(1));
        let feb = calendar_layout(2026, 1);
        assert_eq!(feb.iter().take_while(|c| c.is_none()).count(), 6);
        assert_eq!(feb.len(), 6 + 28);
    }

    #[test]
    fn day_plans_skip_out_of_range_days() {
        let tasks = vec![
            task("feb 30", 1, 30, TaskStatus::NotStarted),
            task("feb -1", 1, -1, TaskStatus::NotStarted),
            task("feb 3 done", 1, 3, TaskStatus::Completed),
            task("feb 3 open", 1, 3, TaskStatus::NotStarted),
        ];
        let month = filter_and_sort_by_month(&tasks, 1);
        let plans = day_plans(&month, 2026, 1);
        assert_eq!(plans.len(), 28);
        assert_eq!(plans[2].day, 3);
        assert_eq!(plans[2].planned_count, 2);
        assert_eq!(plans[2].completed_count, 1);
        let placed: usize = plans.iter().map(|p| p.planned_count).sum();
        assert_eq!(placed, 2);
        // Still visible in the list view, negative day first.
        assert_eq!(month.len(), 4);
        assert_eq!(month[0].day, -1);
    }

    #[test]
    fn sort_by_priority_descending() {
        let mut high = task("high", 0, 1, TaskStatus::NotStarted);
        high.priority = TaskPriority::High;
        let mut low = task("low", 0, 1, TaskStatus::NotStarted);
        low.priority = TaskPriority::Low;
        let medium = task("medium", 0, 1, TaskStatus::NotStarted);
        let mut list = vec![&medium, &high, &low];

        sort_tasks(&mut list, SortKey::Priority, SortDirection::Asc);
        assert_eq!(titles(&list), ["high", "medium", "low"]);
        sort_tasks(&mut list, SortKey::Priority, SortDirection::Desc);
        assert_eq!(titles(&list), ["low", "medium", "high"]);
    }

    #[test]
    fn month_navigation_wraps() {
        assert_eq!(next_month(11), 0);
        assert_eq!(prev_month(0), 11);
        assert_eq!(next_month(4), 5);
        assert_eq!(prev_month(4), 3);
    }
}
