use crate::checkin::CheckInService;
use crate::context::AppContext;
use crate::events::EventsService;
use crate::partners::PartnerService;
use crate::profile::ProfileService;
use chrono::{Local, NaiveDate};
use clubhouse_core::model::{ClubEvent, PartnerRequest, UserProfile};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeSummary {
    pub profile: UserProfile,
    pub upcoming_events: Vec<ClubEvent>,
    pub checked_in_today: bool,
    pub partner_requests: Vec<PartnerRequest>,
}

pub async fn home_summary(ctx: &AppContext) -> HomeSummary {
    home_summary_on(ctx, Local::now().date_naive()).await
}

pub async fn home_summary_on(ctx: &AppContext, today: NaiveDate) -> HomeSummary {
    let profiles = ProfileService::new(ctx);
    let events = EventsService::new(ctx);
    let check_ins = CheckInService::new(ctx);
    let partners = PartnerService::new(ctx);
    let (profile, upcoming_events, checked_in_today, partner_requests) = tokio::join!(
        profiles.load(),
        events.upcoming(),
        check_ins.checked_in_on(today),
        partners.preview(),
    );
    HomeSummary {
        profile,
        upcoming_events,
        checked_in_today,
        partner_requests,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fresh_install_summary() {
        let ctx = AppContext::in_memory().unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 12, 5).unwrap();
        let summary = home_summary_on(&ctx, today).await;
        assert_eq!(summary.profile.name, "Alexey Petrov");
        assert_eq!(summary.upcoming_events.len(), 3);
        assert!(!summary.checked_in_today);
        assert_eq!(summary.partner_requests.len(), 2);
    }

    #[tokio::test]
    async fn summary_sees_todays_check_in() {
        let ctx = AppContext::in_memory().unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 12, 5).unwrap();
        let now = today.and_hms_opt(7, 30, 0).unwrap();
        CheckInService::new(&ctx).check_in_at(now).await.unwrap();

        let summary = home_summary_on(&ctx, today).await;
        assert!(summary.checked_in_today);
        assert_eq!(summary.profile.stats.visits, 13);
    }
}
