//! Fixtures shared by the service tests.

use std::sync::Arc;

use hourbook_core::types::UserId;
use hourbook_database::Store;
use hourbook_database::store::{ClassStore, UserStore};
use hourbook_entity::class::CreateClass;
use hourbook_entity::user::{CreateUser, User, UserRole};

use crate::context::RequestContext;
use crate::notification::NotificationRules;

pub(crate) struct Fixture {
    pub store: Store,
    pub rules: Arc<NotificationRules>,
    pub volunteer: User,
    pub supervisor: User,
    pub other_supervisor: User,
    pub admin: User,
}

impl Fixture {
    pub async fn new() -> Self {
        let store = Store::memory();
        let rules = Arc::new(NotificationRules::new(store.users.clone()));

        let mk = |email: &str, first: &str, last: &str, role| {
            CreateUser::new(email, first.to_string(), last.to_string(), role)
        };
        let volunteer = store
            .users
            .create(&mk("vera@x.org", "Vera", "Lunde", UserRole::Volunteer))
            .await
            .unwrap();
        let supervisor = store
            .users
            .create(&mk("sam@x.org", "Sam", "Reyes", UserRole::Supervisor))
            .await
            .unwrap();
        let other_supervisor = store
            .users
            .create(&mk("olu@x.org", "Olu", "Adeyemi", UserRole::Supervisor))
            .await
            .unwrap();
        let admin = store
            .users
            .create(&mk("ada@x.org", "Ada", "Park", UserRole::Admin))
            .await
            .unwrap();

        store
            .classes
            .create(&CreateClass {
                class_name: "RSSW290".into(),
                hour_requirement: 20.0,
            })
            .await
            .unwrap();

        Self {
            store,
            rules,
            volunteer,
            supervisor,
            other_supervisor,
            admin,
        }
    }

    pub fn ctx(user: &User) -> RequestContext {
        let mut ctx = RequestContext::system(user.id, user.role);
        ctx.email = user.email.clone();
        ctx
    }

    pub fn stranger(role: UserRole) -> RequestContext {
        RequestContext::system(UserId::new(), role)
    }
}
