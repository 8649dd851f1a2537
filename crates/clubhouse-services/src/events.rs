use crate::context::AppContext;
use clubhouse_bus::Topic;
use clubhouse_core::model::ClubEvent;
use clubhouse_core::{seed, CoreError, CoreResult, StorageKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupChange {
    pub event: ClubEvent,
    /// `true` when the member is now registered, `false` when cancelled.
    pub registered: bool,
}

pub struct EventsService<'a> {
    ctx: &'a AppContext,
}

impl<'a> EventsService<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    pub async fn list(&self) -> Vec<ClubEvent> {
        self.ctx
            .load_or(StorageKey::UserEvents, seed::initial_events)
            .await
    }

    /// Events the member has not signed up for, in stored order.
    pub async fn upcoming(&self) -> Vec<ClubEvent> {
        let limit = self.ctx.config().club.upcoming_limit;
        self.list()
            .await
            .into_iter()
            .filter(|e| !e.signed_up)
            .take(limit)
            .collect()
    }

    /// Registers for, or cancels registration in, the event with `id`.
    pub async fn toggle_signup(&self, id: u64) -> CoreResult<SignupChange> {
        let mut events: Vec<ClubEvent> = self
            .ctx
            .storage()
            .get_as(StorageKey::UserEvents)
            .await?
            .unwrap_or_else(seed::initial_events);

        let event = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CoreError::NotFound(format!("event {id}")))?;

        if event.signed_up {
            event.signed_up = false;
            event.participants = event.participants.saturating_sub(1);
        } else {
            if event.is_full() {
                return Err(CoreError::Rejected(format!("\"{}\" is full", event.title)));
            }
            event.signed_up = true;
            event.participants += 1;
        }
        let change = SignupChange {
            event: event.clone(),
            registered: event.signed_up,
        };

        self.ctx
            .persist_and_notify(StorageKey::UserEvents, Some(&Topic::EVENTS_UPDATED), &events)
            .await?;
        tracing::info!(event = id, registered = change.registered, "signup toggled");
        Ok(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clubhouse_core::model::EventKind;
    use clubhouse_core::KeyValueStore;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn list_starts_from_seed() {
        let ctx = AppContext::in_memory().unwrap();
        assert_eq!(EventsService::new(&ctx).list().await, seed::initial_events());
    }

    #[tokio::test]
    async fn toggle_registers_then_cancels() {
        let ctx = AppContext::in_memory().unwrap();
        let service = EventsService::new(&ctx);

        let joined = service.toggle_signup(2).await.unwrap();
        assert!(joined.registered);
        assert_eq!(joined.event.participants, 46);

        let stored = service.list().await;
        let event = stored.iter().find(|e| e.id == 2).unwrap();
        assert!(event.signed_up);

        let left = service.toggle_signup(2).await.unwrap();
        assert!(!left.registered);
        assert_eq!(left.event.participants, 45);
    }

    #[tokio::test]
    async fn toggle_emits_events_updated() {
        let ctx = AppContext::in_memory().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        ctx.bus().subscribe_fn(Topic::EVENTS_UPDATED, move |payload| {
            assert!(payload.is_array());
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        EventsService::new(&ctx).toggle_signup(1).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_event_is_not_found() {
        let ctx = AppContext::in_memory().unwrap();
        let err = EventsService::new(&ctx).toggle_signup(99).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn full_event_rejects_new_signup() {
        let ctx = AppContext::in_memory().unwrap();
        let full = ClubEvent {
            id: 42,
            title: "Sold Out Sprint".to_string(),
            kind: EventKind::Competition,
            date: "2025-12-20".to_string(),
            time: "10:00".to_string(),
            location: "Track".to_string(),
            coach: "Coach Anna".to_string(),
            participants: 10,
            max_participants: 10,
            signed_up: false,
            description: String::new(),
        };
        ctx.storage()
            .set(StorageKey::UserEvents, &vec![full])
            .await
            .unwrap();

        let err = EventsService::new(&ctx).toggle_signup(42).await.unwrap_err();
        assert!(matches!(err, CoreError::Rejected(_)));
    }

    #[tokio::test]
    async fn upcoming_skips_registered_and_respects_limit() {
        let ctx = AppContext::in_memory().unwrap();
        let service = EventsService::new(&ctx);
        service.toggle_signup(1).await.unwrap();

        let upcoming = service.upcoming().await;
        let ids: Vec<u64> = upcoming.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn failed_write_keeps_signup_unchanged_and_silent() {
        let (store, ctx) = crate::testing::flaky_context();
        let emitted = crate::testing::count_emissions(&ctx);
        store.break_writes("user_events");
        let service = EventsService::new(&ctx);

        let err = service.toggle_signup(1).await.unwrap_err();
        assert!(matches!(err, CoreError::Storage(_)));
        assert_eq!(emitted.load(Ordering::SeqCst), 0);
        assert!(service.list().await.iter().all(|e| !e.signed_up));
    }

    #[tokio::test]
    async fn corrupt_events_are_not_overwritten() {
        let (store, ctx) = crate::testing::flaky_context();
        let emitted = crate::testing::count_emissions(&ctx);
        store.set_item("user_events", "{oops").await.unwrap();

        let err = EventsService::new(&ctx).toggle_signup(1).await.unwrap_err();
        assert!(matches!(err, CoreError::Serde(_)));
        assert_eq!(store.get_item("user_events").await.unwrap().as_deref(), Some("{oops"));
        assert_eq!(emitted.load(Ordering::SeqCst), 0);
    }
}
