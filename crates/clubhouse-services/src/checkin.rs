use crate::context::AppContext;
use chrono::{Local, NaiveDate, NaiveDateTime};
use clubhouse_bus::Topic;
use clubhouse_core::model::{CheckIn, UserStats};
use clubhouse_core::{seed, CoreError, CoreResult, StorageKey};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInOutcome {
    pub entry: CheckIn,
    pub stats: UserStats,
}

pub struct CheckInService<'a> {
    ctx: &'a AppContext,
}

impl<'a> CheckInService<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    /// Newest first.
    pub async fn history(&self) -> Vec<CheckIn> {
        self.ctx
            .load_or(StorageKey::CheckInHistory, Vec::new)
            .await
    }

    pub async fn checked_in_on(&self, date: NaiveDate) -> bool {
        let day = date.format(DATE_FORMAT).to_string();
        self.history().await.iter().any(|entry| entry.date == day)
    }

    pub async fn check_in(&self) -> CoreResult<CheckInOutcome> {
        self.check_in_at(Local::now().naive_local()).await
    }

    /// Records a visit at `now`. Only one check-in per calendar day.
    ///
    /// Both records are read before anything is written; a failed stats write
    /// puts the previous history back so the visit can be retried.
    pub async fn check_in_at(&self, now: NaiveDateTime) -> CoreResult<CheckInOutcome> {
        let storage = self.ctx.storage();
        let previous: Option<Vec<CheckIn>> = storage.get_as(StorageKey::CheckInHistory).await?;
        let mut stats: UserStats = storage
            .get_as(StorageKey::UserStats)
            .await?
            .unwrap_or_else(seed::default_stats);

        let date = now.date().format(DATE_FORMAT).to_string();
        let mut history = previous.clone().unwrap_or_default();
        if history.iter().any(|entry| entry.date == date) {
            return Err(CoreError::Rejected(format!("already checked in on {date}")));
        }

        let club = &self.ctx.config().club;
        let entry = CheckIn {
            id: now.and_utc().timestamp_millis().max(0) as u64,
            date,
            time: now.format("%H:%M").to_string(),
            kind: club.default_activity.clone(),
            location: club.home_location.clone(),
        };
        history.insert(0, entry.clone());
        stats.visits += 1;
        stats.streak += 1;

        storage.set(StorageKey::CheckInHistory, &history).await?;
        if let Err(e) = self
            .ctx
            .persist_and_notify(StorageKey::UserStats, Some(&Topic::STATS_UPDATED), &stats)
            .await
        {
            let restored = match &previous {
                Some(previous) => storage.set(StorageKey::CheckInHistory, previous).await,
                None => storage.remove(StorageKey::CheckInHistory).await,
            };
            if restored.is_err() {
                tracing::warn!(date = %entry.date, "could not restore check-in history");
            }
            return Err(e);
        }

        tracing::info!(date = %entry.date, visits = stats.visits, "checked in");
        Ok(CheckInOutcome { entry, stats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clubhouse_bus::EventBus;
    use clubhouse_core::KeyValueStore;
    use serde_json::Value;
    use std::sync::{Arc, Mutex};

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M").unwrap()
    }

    #[tokio::test]
    async fn first_check_in_bumps_seed_stats() {
        let ctx = AppContext::in_memory().unwrap();
        let service = CheckInService::new(&ctx);

        let outcome = service.check_in_at(at("2025-12-05", "07:45")).await.unwrap();
        assert_eq!(outcome.entry.date, "2025-12-05");
        assert_eq!(outcome.entry.time, "07:45");
        assert_eq!(outcome.entry.location, "Main Club");
        assert_eq!(outcome.stats, UserStats { visits: 13, events: 8, streak: 6 });

        let stored: UserStats = ctx
            .storage()
            .get_as(StorageKey::UserStats)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, outcome.stats);
    }

    #[tokio::test]
    async fn second_check_in_same_day_is_rejected() {
        let ctx = AppContext::in_memory().unwrap();
        let service = CheckInService::new(&ctx);
        service.check_in_at(at("2025-12-05", "07:45")).await.unwrap();

        let err = service
            .check_in_at(at("2025-12-05", "19:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Rejected(_)));
        assert_eq!(service.history().await.len(), 1);
    }

    #[tokio::test]
    async fn history_is_newest_first() {
        let ctx = AppContext::in_memory().unwrap();
        let service = CheckInService::new(&ctx);
        service.check_in_at(at("2025-12-05", "07:45")).await.unwrap();
        service.check_in_at(at("2025-12-06", "08:10")).await.unwrap();

        let dates: Vec<String> = service.history().await.into_iter().map(|c| c.date).collect();
        assert_eq!(dates, vec!["2025-12-06", "2025-12-05"]);

        let day = NaiveDate::from_ymd_opt(2025, 12, 6).unwrap();
        assert!(service.checked_in_on(day).await);
        assert!(!service.checked_in_on(day.succ_opt().unwrap()).await);
    }

    #[tokio::test]
    async fn check_in_announces_new_stats() {
        let ctx = AppContext::in_memory().unwrap();
        let seen = Arc::new(Mutex::new(Value::Null));
        let sink = seen.clone();
        let listener = clubhouse_bus::Listener::new(move |payload| {
            *sink.lock().unwrap() = payload.clone();
            Ok(())
        });
        ctx.bus().subscribe(Topic::STATS_UPDATED, listener);

        CheckInService::new(&ctx)
            .check_in_at(at("2025-12-05", "07:45"))
            .await
            .unwrap();
        assert_eq!(seen.lock().unwrap()["visits"], Value::from(13));
    }

    #[tokio::test]
    async fn corrupt_stats_abort_before_any_write() {
        let (store, ctx) = crate::testing::flaky_context();
        let emitted = crate::testing::count_emissions(&ctx);
        store.set_item("user_stats", "\"bad\"").await.unwrap();
        let service = CheckInService::new(&ctx);

        let err = service
            .check_in_at(at("2025-12-05", "07:45"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Serde(_)));
        assert!(store.get_item("checkin_history").await.unwrap().is_none());
        assert_eq!(emitted.load(std::sync::atomic::Ordering::SeqCst), 0);

        ctx.storage().remove(StorageKey::UserStats).await.unwrap();
        let retried = service.check_in_at(at("2025-12-05", "08:00")).await.unwrap();
        assert_eq!(retried.stats.visits, 13);
    }

    #[tokio::test]
    async fn failed_stats_write_restores_history() {
        let (store, ctx) = crate::testing::flaky_context();
        let service = CheckInService::new(&ctx);
        service.check_in_at(at("2025-12-04", "07:45")).await.unwrap();
        let emitted = crate::testing::count_emissions(&ctx);
        store.break_writes("user_stats");

        assert!(service.check_in_at(at("2025-12-05", "07:45")).await.is_err());
        let dates: Vec<String> = service.history().await.into_iter().map(|c| c.date).collect();
        assert_eq!(dates, vec!["2025-12-04"]);
        assert_eq!(emitted.load(std::sync::atomic::Ordering::SeqCst), 0);

        let stats: UserStats = ctx
            .storage()
            .get_as(StorageKey::UserStats)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stats.visits, 13);
    }
}
