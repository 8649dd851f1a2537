use crate::checkin::DATE_FORMAT;
use crate::context::AppContext;
use chrono::{Local, NaiveDateTime};
use clubhouse_core::model::{FitnessLevel, PartnerRequest};
use clubhouse_core::{seed, CoreError, CoreResult, StorageKey};
use serde::{Deserialize, Serialize};

/// Form contents for a new partner request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPartnerRequest {
    pub activity: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub level: FitnessLevel,
    pub notes: String,
}

impl Default for NewPartnerRequest {
    fn default() -> Self {
        Self {
            activity: "running".to_string(),
            date: String::new(),
            time: String::new(),
            location: String::new(),
            level: FitnessLevel::Intermediate,
            notes: String::new(),
        }
    }
}

pub struct PartnerService<'a> {
    ctx: &'a AppContext,
}

impl<'a> PartnerService<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    /// Stored requests; on first run the seed requests are written and
    /// returned.
    pub async fn load(&self) -> CoreResult<Vec<PartnerRequest>> {
        let storage = self.ctx.storage();
        if let Some(requests) = storage
            .get_as::<Vec<PartnerRequest>>(StorageKey::PartnerRequests)
            .await?
        {
            return Ok(requests);
        }
        let requests = seed::initial_partner_requests();
        storage.set(StorageKey::PartnerRequests, &requests).await?;
        tracing::info!(count = requests.len(), "seeded partner requests");
        Ok(requests)
    }

    pub async fn preview(&self) -> Vec<PartnerRequest> {
        let limit = self.ctx.config().club.partner_preview_limit;
        let requests = self
            .ctx
            .load_or(StorageKey::PartnerRequests, seed::initial_partner_requests)
            .await;
        requests.into_iter().take(limit).collect()
    }

    pub async fn create(&self, form: NewPartnerRequest) -> CoreResult<PartnerRequest> {
        self.create_at(form, Local::now().naive_local()).await
    }

    /// Posts a request from the current member; it goes to the front.
    pub async fn create_at(
        &self,
        form: NewPartnerRequest,
        now: NaiveDateTime,
    ) -> CoreResult<PartnerRequest> {
        for (field, value) in [
            ("activity", &form.activity),
            ("date", &form.date),
            ("time", &form.time),
            ("location", &form.location),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::InvalidInput(format!("{field} is required")));
            }
        }

        let mut requests = self.load().await?;
        let request = PartnerRequest {
            id: now.and_utc().timestamp_millis().max(0) as u64,
            user: "You".to_string(),
            activity: form.activity,
            date: form.date,
            time: form.time,
            location: form.location,
            level: form.level,
            notes: form.notes,
            created_at: now.date().format(DATE_FORMAT).to_string(),
        };
        requests.insert(0, request.clone());
        self.ctx
            .persist_and_notify(StorageKey::PartnerRequests, None, &requests)
            .await?;
        Ok(request)
    }
}
