//! Campaign service tests, focused on the root-flag reassignment rules.

mod common;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use givehub::domain::{Campaign, CampaignDetails, CampaignStatus};
use givehub::errors::{AppError, AppResult};
use givehub::infra::repositories::{CampaignRepository, CampaignUpdate, NewCampaign};
use givehub::services::{CampaignManager, CampaignService};

use common::TestUnitOfWork;

/// In-memory campaign store backing the service under test
#[derive(Default)]
struct InMemoryCampaignRepository {
    campaigns: Mutex<HashMap<Uuid, Campaign>>,
}

impl InMemoryCampaignRepository {
    fn with_campaigns(campaigns: Vec<Campaign>) -> Self {
        Self {
            campaigns: Mutex::new(campaigns.into_iter().map(|c| (c.id, c)).collect()),
        }
    }

    fn root_ids(&self) -> Vec<Uuid> {
        self.campaigns
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.is_root)
            .map(|c| c.id)
            .collect()
    }
}

fn test_campaign(is_root: bool) -> Campaign {
    let now = Utc::now();
    Campaign {
        id: Uuid::new_v4(),
        title: "Food drive".to_string(),
        description: "Weekly food distribution".to_string(),
        target_amount_cents: 1_000_000,
        current_amount_cents: 0,
        starts_at: now,
        ends_at: None,
        status: CampaignStatus::Active,
        created_by: Uuid::new_v4(),
        is_root,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl CampaignRepository for InMemoryCampaignRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Campaign>> {
        Ok(self.campaigns.lock().unwrap().get(&id).cloned())
    }

    async fn find_details(&self, _id: Uuid) -> AppResult<Option<CampaignDetails>> {
        unimplemented!("not used by these tests")
    }

    async fn find_root(&self) -> AppResult<Option<Campaign>> {
        Ok(self
            .campaigns
            .lock()
            .unwrap()
            .values()
            .find(|c| c.is_root)
            .cloned())
    }

    async fn list(
        &self,
        _offset: u64,
        _limit: u64,
        _status: Option<CampaignStatus>,
    ) -> AppResult<(Vec<CampaignDetails>, u64)> {
        unimplemented!("not used by these tests")
    }

    async fn create(&self, _campaign: NewCampaign) -> AppResult<Campaign> {
        unimplemented!("not used by these tests")
    }

    async fn update(&self, _id: Uuid, _update: CampaignUpdate) -> AppResult<Campaign> {
        unimplemented!("not used by these tests")
    }

    async fn set_status(&self, id: Uuid, status: CampaignStatus) -> AppResult<Campaign> {
        let mut campaigns = self.campaigns.lock().unwrap();
        let campaign = campaigns.get_mut(&id).ok_or(AppError::NotFound)?;
        campaign.status = status;
        Ok(campaign.clone())
    }

    async fn set_is_root(&self, id: Uuid, is_root: bool) -> AppResult<()> {
        let mut campaigns = self.campaigns.lock().unwrap();
        let campaign = campaigns.get_mut(&id).ok_or(AppError::NotFound)?;
        campaign.is_root = is_root;
        Ok(())
    }

    async fn add_to_current_amount(&self, id: Uuid, amount_cents: i64) -> AppResult<()> {
        let mut campaigns = self.campaigns.lock().unwrap();
        let campaign = campaigns.get_mut(&id).ok_or(AppError::NotFound)?;
        campaign.current_amount_cents += amount_cents;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.campaigns
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::NotFound)
    }
}

fn service_over(
    repo: Arc<InMemoryCampaignRepository>,
) -> CampaignManager<TestUnitOfWork> {
    let uow = TestUnitOfWork::new().with_campaigns(repo);
    CampaignManager::new(Arc::new(uow))
}

#[tokio::test]
async fn set_root_with_no_prior_root_flags_exactly_the_target() {
    let a = test_campaign(false);
    let a_id = a.id;
    let repo = Arc::new(InMemoryCampaignRepository::with_campaigns(vec![a]));
    let service = service_over(repo.clone());

    let result = service.set_root(a_id).await.unwrap();

    assert!(result.is_root);
    assert_eq!(repo.root_ids(), vec![a_id]);
}

#[tokio::test]
async fn set_root_moves_the_flag_from_the_previous_holder() {
    let a = test_campaign(true);
    let b = test_campaign(false);
    let (a_id, b_id) = (a.id, b.id);
    let repo = Arc::new(InMemoryCampaignRepository::with_campaigns(vec![a, b]));
    let service = service_over(repo.clone());

    service.set_root(b_id).await.unwrap();

    let roots = repo.root_ids();
    assert_eq!(roots, vec![b_id]);
    assert!(!repo.find_by_id(a_id).await.unwrap().unwrap().is_root);
}

#[tokio::test]
async fn set_root_on_the_current_root_keeps_exactly_one_root() {
    let a = test_campaign(true);
    let b = test_campaign(false);
    let a_id = a.id;
    let repo = Arc::new(InMemoryCampaignRepository::with_campaigns(vec![a, b]));
    let service = service_over(repo.clone());

    let result = service.set_root(a_id).await.unwrap();

    assert!(result.is_root);
    assert_eq!(repo.root_ids(), vec![a_id]);
}

#[tokio::test]
async fn set_root_on_unknown_campaign_is_not_found() {
    let repo = Arc::new(InMemoryCampaignRepository::default());
    let service = service_over(repo);

    let result = service.set_root(Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn set_status_transitions_are_persisted() {
    let a = test_campaign(false);
    let a_id = a.id;
    let repo = Arc::new(InMemoryCampaignRepository::with_campaigns(vec![a]));
    let service = service_over(repo);

    let updated = service
        .set_status(a_id, CampaignStatus::Finished)
        .await
        .unwrap();

    assert_eq!(updated.status, CampaignStatus::Finished);
}
