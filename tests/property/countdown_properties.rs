// Property-based tests for the countdown calculator and task ordering

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use task_reminder::models::task::{ReminderType, Task, TaskStatus};
use task_reminder::services::countdown::{
    compute_countdown, partition_tasks, weekly_due_count, CountdownSnapshot,
};

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn task(id: i64, offset_secs: i64, completed: bool) -> Task {
    Task {
        id,
        user_id: 1,
        title: format!("Task {}", id),
        description: None,
        deadline: Some(base() + Duration::seconds(offset_secs)),
        status: if completed {
            TaskStatus::Completed
        } else {
            TaskStatus::Pending
        },
        reminder_type: ReminderType::Notification,
        reminder_interval: 10,
        created_at: None,
    }
}

proptest! {
    /// Property: the parts always recompose to the whole remaining seconds
    #[test]
    fn prop_future_deadline_decomposes_exactly(
        now_offset in -1_000_000_000i64..1_000_000_000i64,
        remaining in 1i64..10_000_000_000i64,
    ) {
        let now = base() + Duration::seconds(now_offset);
        let deadline = now + Duration::seconds(remaining);
        let snapshot = compute_countdown(deadline, now);

        prop_assert!(!snapshot.overdue);
        prop_assert!(snapshot.hours < 24);
        prop_assert!(snapshot.minutes < 60);
        prop_assert!(snapshot.seconds < 60);
        prop_assert_eq!(
            snapshot.days as i64 * 86_400
                + i64::from(snapshot.hours) * 3_600
                + i64::from(snapshot.minutes) * 60
                + i64::from(snapshot.seconds),
            remaining
        );
    }

    /// Property: fractional seconds are floored, never rounded up
    #[test]
    fn prop_sub_second_part_is_floored(
        whole in 1i64..1_000_000i64,
        millis in 0i64..1000i64,
    ) {
        let now = base();
        let deadline = now + Duration::seconds(whole) + Duration::milliseconds(millis);
        prop_assert_eq!(compute_countdown(deadline, now).total_seconds(), whole as u64);
    }

    /// Property: any deadline at or before now is overdue with zeroed parts
    #[test]
    fn prop_past_or_present_deadline_is_overdue(
        elapsed in 0i64..10_000_000_000i64,
    ) {
        let now = base();
        let deadline = now - Duration::seconds(elapsed);
        prop_assert_eq!(compute_countdown(deadline, now), CountdownSnapshot::OVERDUE);
    }

    /// Property: pending output is ascending, completed output descending
    #[test]
    fn prop_partition_orders_by_deadline(
        cases in prop::collection::vec((-1_000_000i64..1_000_000i64, any::<bool>()), 0..40),
    ) {
        let tasks: Vec<Task> = cases
            .iter()
            .enumerate()
            .map(|(i, (offset, completed))| task(i as i64, *offset, *completed))
            .collect();
        let pending_count = tasks.iter().filter(|t| t.is_pending()).count();

        let board = partition_tasks(tasks, base());

        prop_assert_eq!(board.pending.len(), pending_count);
        prop_assert_eq!(board.pending.len() + board.completed.len(), cases.len());
        for pair in board.pending.windows(2) {
            prop_assert!(pair[0].task.deadline <= pair[1].task.deadline);
        }
        for pair in board.completed.windows(2) {
            prop_assert!(pair[0].deadline >= pair[1].deadline);
        }
    }

    /// Property: the weekly count matches a direct window check
    #[test]
    fn prop_weekly_count_matches_window(
        offsets in prop::collection::vec(-1_000_000i64..1_500_000i64, 0..40),
    ) {
        let week = 7 * 86_400;
        let tasks: Vec<Task> = offsets
            .iter()
            .enumerate()
            .map(|(i, offset)| task(i as i64, *offset, false))
            .collect();

        let expected = offsets.iter().filter(|o| **o >= 0 && **o <= week).count();
        prop_assert_eq!(weekly_due_count(&tasks, base()), expected);
    }
}
