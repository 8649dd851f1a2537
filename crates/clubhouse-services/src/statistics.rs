use crate::checkin::DATE_FORMAT;
use crate::context::AppContext;
use chrono::NaiveDate;
use clubhouse_core::model::{CheckIn, ClubEvent, UserStats};
use clubhouse_core::{seed, StorageKey};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalProgress {
    pub goal: &'static str,
    pub current: u32,
    pub target: u32,
    /// Percentage of `target`, capped at 100.
    pub progress: u32,
}

impl GoalProgress {
    fn new(goal: &'static str, current: u32, target: u32) -> Self {
        let progress = if target == 0 {
            100
        } else {
            (u64::from(current) * 100 / u64::from(target)).min(100) as u32
        };
        Self {
            goal,
            current,
            target,
            progress,
        }
    }
}

pub fn goal_progress(stats: &UserStats) -> Vec<GoalProgress> {
    vec![
        GoalProgress::new("Monthly Visits", stats.visits, 20),
        GoalProgress::new("Event Participation", stats.events, 15),
        GoalProgress::new("Consistency Streak", stats.streak, 30),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyAttendance {
    /// `YYYY-MM`.
    pub month: String,
    pub visits: u32,
}

/// Check-ins per calendar month, oldest month first. Entries with an
/// unparseable date are skipped.
pub fn monthly_attendance(history: &[CheckIn]) -> Vec<MonthlyAttendance> {
    let mut months: BTreeMap<String, u32> = BTreeMap::new();
    for entry in history {
        match NaiveDate::parse_from_str(&entry.date, DATE_FORMAT) {
            Ok(date) => *months.entry(date.format("%Y-%m").to_string()).or_default() += 1,
            Err(_) => tracing::debug!(date = %entry.date, "skipping check-in with bad date"),
        }
    }
    months
        .into_iter()
        .map(|(month, visits)| MonthlyAttendance { month, visits })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsReport {
    pub stats: UserStats,
    pub goals: Vec<GoalProgress>,
    pub attendance: Vec<MonthlyAttendance>,
    pub registered_events: usize,
}

pub struct StatisticsService<'a> {
    ctx: &'a AppContext,
}

impl<'a> StatisticsService<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    pub async fn report(&self) -> StatisticsReport {
        let stats: UserStats = self
            .ctx
            .load_or(StorageKey::UserStats, seed::default_stats)
            .await;
        let history: Vec<CheckIn> = self
            .ctx
            .load_or(StorageKey::CheckInHistory, Vec::new)
            .await;
        let events: Vec<ClubEvent> = self
            .ctx
            .load_or(StorageKey::UserEvents, seed::initial_events)
            .await;

        StatisticsReport {
            goals: goal_progress(&stats),
            attendance: monthly_attendance(&history),
            registered_events: events.iter().filter(|e| e.signed_up).count(),
            stats,
        }
    }
}
