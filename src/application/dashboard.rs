use std::sync::Arc;

use crate::application::repos::{ContactRepo, PostsRepo, RepoError, UsersRepo};

/// Aggregates shown on the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub users: usize,
    pub pro_users: usize,
    pub verified_users: usize,
    pub posts: usize,
    pub job_posts: usize,
    pub boosted_posts: usize,
    pub total_likes: u64,
    pub total_comments: usize,
    pub contact_submissions: usize,
}

#[derive(Clone)]
pub struct DashboardService {
    posts: Arc<dyn PostsRepo>,
    users: Arc<dyn UsersRepo>,
    contacts: Arc<dyn ContactRepo>,
}

impl DashboardService {
    pub fn new(
        posts: Arc<dyn PostsRepo>,
        users: Arc<dyn UsersRepo>,
        contacts: Arc<dyn ContactRepo>,
    ) -> Self {
        Self {
            posts,
            users,
            contacts,
        }
    }

    pub async fn summary(&self) -> Result<DashboardSummary, RepoError> {
        let users = self.users.list_users().await?;
        let posts = self.posts.list_posts().await?;
        let contact_submissions = self.contacts.count_submissions().await?;

        Ok(DashboardSummary {
            users: users.len(),
            pro_users: users.iter().filter(|u| u.is_pro).count(),
            verified_users: users.iter().filter(|u| u.verified).count(),
            posts: posts.len(),
            job_posts: posts.iter().filter(|p| p.is_job()).count(),
            boosted_posts: posts.iter().filter(|p| p.boosted).count(),
            total_likes: posts.iter().map(|p| u64::from(p.likes)).sum(),
            total_comments: posts.iter().map(|p| p.comments.len()).sum(),
            contact_submissions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryRepositories;

    #[tokio::test]
    async fn summarises_the_seed_data() {
        let repos = Arc::new(InMemoryRepositories::seeded());
        let service = DashboardService::new(repos.clone(), repos.clone(), repos);

        let summary = service.summary().await.expect("summary");
        assert_eq!(
            summary,
            DashboardSummary {
                users: 4,
                pro_users: 2,
                verified_users: 2,
                posts: 3,
                job_posts: 2,
                boosted_posts: 1,
                total_likes: 53,
                total_comments: 3,
                contact_submissions: 0,
            }
        );
    }
}
