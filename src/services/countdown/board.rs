use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::cmp::Ordering;

use super::calculator::{snapshot_for, CountdownSnapshot, CountdownUrgency};
use crate::models::task::{Task, TaskStatus};

/// Length of the "due this week" window on the dashboard.
pub const WEEKLY_WINDOW_DAYS: i64 = 7;

/// A task together with its countdown at one evaluation instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskCountdown {
    #[serde(flatten)]
    pub task: Task,
    pub countdown: CountdownSnapshot,
    pub urgency: CountdownUrgency,
}

impl TaskCountdown {
    pub fn evaluate(task: Task, now: DateTime<Utc>) -> Self {
        let countdown = snapshot_for(task.deadline, now);
        Self {
            urgency: countdown.urgency(),
            task,
            countdown,
        }
    }
}

/// Tasks split by status for the task list view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskBoard {
    /// Soonest deadline first.
    pub pending: Vec<TaskCountdown>,
    /// Latest deadline first.
    pub completed: Vec<Task>,
}

/// What the dashboard shows for one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub tasks: Vec<TaskCountdown>,
    /// Pending tasks due within the next week, both ends inclusive.
    pub weekly_tasks: usize,
    pub evaluated_at: DateTime<Utc>,
}

fn by_deadline_ascending(a: &Task, b: &Task) -> Ordering {
    a.deadline.cmp(&b.deadline).then(a.id.cmp(&b.id))
}

fn by_deadline_descending(a: &Task, b: &Task) -> Ordering {
    b.deadline.cmp(&a.deadline).then(a.id.cmp(&b.id))
}

/// Split tasks into pending (with countdowns) and completed.
///
/// Unreadable deadlines sort first among pending tasks and last among
/// completed ones.
pub fn partition_tasks(tasks: impl IntoIterator<Item = Task>, now: DateTime<Utc>) -> TaskBoard {
    let (mut pending, mut completed): (Vec<Task>, Vec<Task>) = tasks
        .into_iter()
        .partition(|task| task.status == TaskStatus::Pending);

    pending.sort_by(by_deadline_ascending);
    completed.sort_by(by_deadline_descending);

    TaskBoard {
        pending: pending
            .into_iter()
            .map(|task| TaskCountdown::evaluate(task, now))
            .collect(),
        completed,
    }
}

/// Count pending tasks whose deadline lies in `[now, now + window]`.
pub fn count_due_within<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    now: DateTime<Utc>,
    window: Duration,
) -> usize {
    let end = now + window;
    tasks
        .into_iter()
        .filter(|task| task.is_pending())
        .filter_map(|task| task.deadline)
        .filter(|deadline| *deadline >= now && *deadline <= end)
        .count()
}

pub fn weekly_due_count<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    now: DateTime<Utc>,
) -> usize {
    count_due_within(tasks, now, Duration::days(WEEKLY_WINDOW_DAYS))
}

/// Assemble the dashboard: pending tasks with countdowns, soonest first,
/// plus the weekly count. Completed tasks are ignored.
pub fn build_dashboard(tasks: Vec<Task>, now: DateTime<Utc>) -> Dashboard {
    let weekly_tasks = weekly_due_count(&tasks, now);
    let board = partition_tasks(tasks, now);

    Dashboard {
        tasks: board.pending,
        weekly_tasks,
        evaluated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::ReminderType;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn task(id: i64, deadline: Option<DateTime<Utc>>, status: TaskStatus) -> Task {
        Task {
            id,
            user_id: 1,
            title: format!("Task {}", id),
            description: None,
            deadline,
            status,
            reminder_type: ReminderType::Notification,
            reminder_interval: 15,
            created_at: None,
        }
    }

    fn ids(tasks: &[TaskCountdown]) -> Vec<i64> {
        tasks.iter().map(|t| t.task.id).collect()
    }

    #[test]
    fn test_pending_sorted_soonest_first() {
        let d1 = now() + Duration::hours(1);
        let d2 = now() + Duration::days(2);
        let d3 = now() + Duration::days(30);
        let tasks = vec![
            task(3, Some(d3), TaskStatus::Pending),
            task(1, Some(d1), TaskStatus::Pending),
            task(2, Some(d2), TaskStatus::Pending),
        ];

        let board = partition_tasks(tasks, now());
        assert_eq!(ids(&board.pending), vec![1, 2, 3]);
        assert!(board.completed.is_empty());
    }

    #[test]
    fn test_completed_sorted_latest_first() {
        let d1 = now() - Duration::days(3);
        let d2 = now() + Duration::days(3);
        let tasks = vec![
            task(1, Some(d1), TaskStatus::Completed),
            task(2, Some(d2), TaskStatus::Completed),
        ];

        let board = partition_tasks(tasks, now());
        let completed: Vec<i64> = board.completed.iter().map(|t| t.id).collect();
        assert_eq!(completed, vec![2, 1]);
        assert!(board.pending.is_empty());
    }

    #[test]
    fn test_equal_deadlines_break_ties_by_id() {
        let d = now() + Duration::days(1);
        let tasks = vec![
            task(9, Some(d), TaskStatus::Pending),
            task(4, Some(d), TaskStatus::Pending),
        ];
        assert_eq!(ids(&partition_tasks(tasks, now()).pending), vec![4, 9]);
    }

    #[test]
    fn test_unreadable_deadline_sorts_first_and_is_overdue() {
        let tasks = vec![
            task(1, Some(now() + Duration::days(1)), TaskStatus::Pending),
            task(2, None, TaskStatus::Pending),
        ];
        let board = partition_tasks(tasks, now());
        assert_eq!(ids(&board.pending), vec![2, 1]);
        assert!(board.pending[0].countdown.overdue);
        assert_eq!(board.pending[0].urgency, CountdownUrgency::Overdue);
    }

    #[test]
    fn test_pending_carry_countdowns() {
        let deadline = Utc.with_ymd_and_hms(2024, 1, 3, 5, 30, 15).unwrap();
        let board = partition_tasks(vec![task(1, Some(deadline), TaskStatus::Pending)], now());
        let countdown = board.pending[0].countdown;
        assert_eq!(
            (countdown.days, countdown.hours, countdown.minutes, countdown.seconds),
            (2, 5, 30, 15)
        );
        assert_eq!(board.pending[0].urgency, CountdownUrgency::OnTime);
    }

    #[test]
    fn test_weekly_window_upper_bound_inclusive() {
        let at_edge = task(1, Some(now() + Duration::days(7)), TaskStatus::Pending);
        let past_edge = task(
            2,
            Some(now() + Duration::days(7) + Duration::seconds(1)),
            TaskStatus::Pending,
        );
        assert_eq!(weekly_due_count([&at_edge], now()), 1);
        assert_eq!(weekly_due_count([&past_edge], now()), 0);
    }

    #[test]
    fn test_weekly_window_lower_bound_inclusive() {
        let due_now = task(1, Some(now()), TaskStatus::Pending);
        let just_missed = task(2, Some(now() - Duration::seconds(1)), TaskStatus::Pending);
        assert_eq!(weekly_due_count([&due_now, &just_missed], now()), 1);
    }

    #[test]
    fn test_weekly_count_ignores_completed_and_unreadable() {
        let tasks = vec![
            task(1, Some(now() + Duration::days(1)), TaskStatus::Completed),
            task(2, None, TaskStatus::Pending),
            task(3, Some(now() + Duration::days(2)), TaskStatus::Pending),
        ];
        assert_eq!(weekly_due_count(&tasks, now()), 1);
    }

    #[test]
    fn test_dashboard_lists_only_pending() {
        let tasks = vec![
            task(1, Some(now() + Duration::days(10)), TaskStatus::Pending),
            task(2, Some(now() + Duration::days(1)), TaskStatus::Completed),
            task(3, Some(now() + Duration::days(3)), TaskStatus::Pending),
            task(4, Some(now() - Duration::days(1)), TaskStatus::Pending),
        ];

        let dashboard = build_dashboard(tasks, now());
        assert_eq!(ids(&dashboard.tasks), vec![4, 3, 1]);
        assert_eq!(dashboard.weekly_tasks, 1);
        assert_eq!(dashboard.evaluated_at, now());
        assert!(dashboard.tasks[0].countdown.overdue);
    }

    #[test]
    fn test_task_countdown_serializes_flat() {
        let tc = TaskCountdown::evaluate(
            task(5, Some(now() + Duration::minutes(5)), TaskStatus::Pending),
            now(),
        );
        let value = serde_json::to_value(&tc).unwrap();
        assert_eq!(value["id"], 5);
        assert_eq!(value["status"], "pending");
        assert_eq!(value["countdown"]["minutes"], 5);
        assert_eq!(value["urgency"], "urgent");
    }
}
