use std::sync::Arc;

use crate::application::auth::TokenVerifier;
use crate::application::contact::ContactService;
use crate::application::dashboard::DashboardService;
use crate::application::feed::FeedService;
use crate::application::ids::IdGenerator;
use crate::application::posts::PostService;
use crate::application::repos::UsersRepo;
use crate::infra::memory::InMemoryRepositories;

use super::rate_limit::ApiRateLimiter;

#[derive(Clone)]
pub struct ApiState {
    pub feed: Arc<FeedService>,
    pub posts: Arc<PostService>,
    pub contact: Arc<ContactService>,
    pub dashboard: Arc<DashboardService>,
    pub users: Arc<dyn UsersRepo>,
    pub tokens: Arc<TokenVerifier>,
    pub rate_limiter: Arc<ApiRateLimiter>,
}

impl ApiState {
    /// Wire every service against one in-memory store.
    pub fn in_memory(
        repos: Arc<InMemoryRepositories>,
        tokens: TokenVerifier,
        rate_limiter: ApiRateLimiter,
    ) -> Self {
        let ids = Arc::new(IdGenerator::new());
        Self {
            feed: Arc::new(FeedService::new(repos.clone())),
            posts: Arc::new(PostService::new(repos.clone(), repos.clone(), ids)),
            contact: Arc::new(ContactService::new(repos.clone())),
            dashboard: Arc::new(DashboardService::new(
                repos.clone(),
                repos.clone(),
                repos.clone(),
            )),
            users: repos,
            tokens: Arc::new(tokens),
            rate_limiter: Arc::new(rate_limiter),
        }
    }
}
