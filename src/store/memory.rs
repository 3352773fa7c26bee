use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use super::{
    Draft, Investment, InvestmentModel, InvestmentStatus, NewInvestment, NewOtp, NewUser,
    OtpRecord, Project, Store, StoreError, StoreResult, User,
};

#[derive(Default)]
struct Inner {
    users: BTreeMap<i64, User>,
    projects: BTreeMap<String, Project>,
    models: BTreeMap<String, InvestmentModel>,
    investments: BTreeMap<i64, Investment>,
    otps: BTreeMap<i64, OtpRecord>,
    drafts: HashMap<(i64, String), Draft>,
    next_user_id: i64,
    next_investment_id: i64,
    next_otp_id: i64,
}

/// Map-backed store with monotonic ID counters.
///
/// All mutation happens under a single `RwLock`; `create_investment` holds
/// the write guard across the availability check, the decrement and the
/// insert, so concurrent purchases against one model are serialized.
pub struct MemStore {
    inner: RwLock<Inner>,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_user_id: 1,
                next_investment_id: 1,
                next_otp_id: 1,
                ..Inner::default()
            }),
        }
    }

    /// Store pre-populated with the demo catalog: two projects and their
    /// Gold/Platinum/Virtual tiers.
    pub fn with_demo_data() -> Self {
        let store = Self::new();
        {
            let mut inner = store
                .inner
                .try_write()
                .expect("no concurrent access during construction");
            for project in demo_projects() {
                inner.projects.insert(project.id.clone(), project);
            }
            for model in demo_models() {
                inner.models.insert(model.id.clone(), model);
            }
        }
        store
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemStore {
    async fn user(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn user_by_phone(&self, phone_number: &str) -> StoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|u| u.phone_number == phone_number)
            .cloned())
    }

    async fn create_user(&self, new: NewUser) -> StoreResult<User> {
        let mut inner = self.inner.write().await;
        if inner
            .users
            .values()
            .any(|u| u.phone_number == new.phone_number)
        {
            return Err(StoreError::Conflict(
                "User with this phone number already exists".into(),
            ));
        }
        let id = inner.next_user_id;
        inner.next_user_id += 1;
        let user = User {
            id,
            phone_number: new.phone_number,
            name: new.name,
            email: new.email,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.users.insert(id, user.clone());
        Ok(user)
    }

    async fn project(&self, id: &str) -> StoreResult<Option<Project>> {
        Ok(self.inner.read().await.projects.get(id).cloned())
    }

    async fn projects(&self) -> StoreResult<Vec<Project>> {
        Ok(self.inner.read().await.projects.values().cloned().collect())
    }

    async fn investment_model(&self, id: &str) -> StoreResult<Option<InvestmentModel>> {
        Ok(self.inner.read().await.models.get(id).cloned())
    }

    async fn models_by_project(&self, project_id: &str) -> StoreResult<Vec<InvestmentModel>> {
        let inner = self.inner.read().await;
        Ok(inner
            .models
            .values()
            .filter(|m| m.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn investments_by_user(&self, user_id: i64) -> StoreResult<Vec<Investment>> {
        let inner = self.inner.read().await;
        Ok(inner
            .investments
            .values()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_investment(&self, new: NewInvestment) -> StoreResult<Investment> {
        let mut inner = self.inner.write().await;

        let available = match inner.models.get(&new.model_id) {
            Some(model) => model.available_slots,
            None => {
                return Err(StoreError::NotFound {
                    entity: "Investment model",
                    id: new.model_id,
                })
            }
        };
        if new.slots > available {
            return Err(StoreError::InsufficientSlots {
                requested: new.slots,
                available,
            });
        }

        // Point of no return: decrement and insert under the same guard.
        if let Some(model) = inner.models.get_mut(&new.model_id) {
            model.available_slots = available - new.slots;
        }
        let id = inner.next_investment_id;
        inner.next_investment_id += 1;
        let investment = Investment {
            id,
            user_id: new.user_id,
            project_id: new.project_id,
            project_name: new.project_name,
            model_id: new.model_id,
            model_name: new.model_name,
            slots: new.slots,
            amount: new.amount,
            expected_returns: new.expected_returns,
            lock_in_period: new.lock_in_period,
            maturity_date: new.maturity_date,
            created_at: new.created_at,
            status: InvestmentStatus::Active,
        };
        inner.investments.insert(id, investment.clone());
        Ok(investment)
    }

    async fn create_otp(&self, new: NewOtp) -> StoreResult<OtpRecord> {
        let mut inner = self.inner.write().await;
        let id = inner.next_otp_id;
        inner.next_otp_id += 1;
        let otp = OtpRecord {
            id,
            phone_number: new.phone_number,
            code: new.code,
            expires_at: new.expires_at,
            used: false,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.otps.insert(id, otp.clone());
        Ok(otp)
    }

    async fn latest_unused_otp(&self, phone_number: &str) -> StoreResult<Option<OtpRecord>> {
        let inner = self.inner.read().await;
        // IDs are monotonic, so the highest ID is the latest issue.
        Ok(inner
            .otps
            .values()
            .filter(|o| o.phone_number == phone_number && !o.used)
            .max_by_key(|o| o.id)
            .cloned())
    }

    async fn mark_otp_used(&self, id: i64) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        match inner.otps.get_mut(&id) {
            Some(otp) => {
                otp.used = true;
                Ok(())
            }
            None => Err(StoreError::NotFound {
                entity: "Otp",
                id: id.to_string(),
            }),
        }
    }

    async fn draft(&self, user_id: i64, project_id: &str) -> StoreResult<Option<Draft>> {
        let inner = self.inner.read().await;
        Ok(inner
            .drafts
            .get(&(user_id, project_id.to_string()))
            .cloned())
    }

    async fn put_draft(&self, draft: Draft) -> StoreResult<Draft> {
        let mut inner = self.inner.write().await;
        inner
            .drafts
            .insert((draft.user_id, draft.project_id.clone()), draft.clone());
        Ok(draft)
    }

    async fn delete_draft(&self, user_id: i64, project_id: &str) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner
            .drafts
            .remove(&(user_id, project_id.to_string()))
            .is_some())
    }
}

fn demo_projects() -> Vec<Project> {
    vec![
        Project {
            id: "aura".into(),
            name: "Aura".into(),
            location: "Bangalore".into(),
            minimum_investment: 100_000,
            estimated_returns: 14.0,
            lock_in_period: 3,
            available_slots: 18,
            image: "https://images.unsplash.com/photo-1560518883-ce09059eeffa?auto=format&fit=crop&w=800&q=80".into(),
        },
        Project {
            id: "subha".into(),
            name: "Codename Skylife 2100".into(),
            location: "Mysore".into(),
            minimum_investment: 75_000,
            estimated_returns: 12.0,
            lock_in_period: 3,
            available_slots: 25,
            image: "https://images.unsplash.com/photo-1500382017468-9049fed747ef?auto=format&fit=crop&w=800&q=80".into(),
        },
    ]
}

fn demo_models() -> Vec<InvestmentModel> {
    let tiers = [
        ("aura", "aura-gold", "Gold", 100_000, 12.0, 3, 5),
        ("aura", "aura-platinum", "Platinum", 100_000, 14.0, 4, 3),
        ("aura", "aura-virtual", "Virtual", 100_000, 10.0, 2, 10),
        ("subha", "subha-gold", "Gold", 75_000, 12.0, 3, 10),
        ("subha", "subha-platinum", "Platinum", 75_000, 14.0, 4, 5),
        ("subha", "subha-virtual", "Virtual", 75_000, 10.0, 2, 15),
    ];
    tiers
        .into_iter()
        .map(
            |(project, id, name, min_investment, roi, lock_in, slots)| InvestmentModel {
                id: id.into(),
                name: name.into(),
                min_investment,
                roi,
                lock_in_period: lock_in,
                available_slots: slots,
                project_id: project.into(),
            },
        )
        .collect()
}
