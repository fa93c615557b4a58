//! Deadline countdowns and the task views built on them.
//!
//! `calculator` holds the pure countdown arithmetic, `board` orders and
//! counts tasks for display, and `service` wires both to the task store.

mod board;
mod calculator;
mod service;

pub use board::{
    build_dashboard, count_due_within, partition_tasks, weekly_due_count, Dashboard, TaskBoard,
    TaskCountdown, WEEKLY_WINDOW_DAYS,
};
pub use calculator::{
    compute_countdown, remaining_seconds, snapshot_for, CountdownSnapshot, CountdownUrgency,
    SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};
pub use service::CountdownService;
