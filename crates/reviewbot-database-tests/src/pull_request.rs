use pretty_assertions::assert_eq;
use reviewbot_database_interface::DatabaseError;
use reviewbot_models::{PullRequest, PullRequestStatus};

use crate::{fixtures::create_team, testcase::db_test_case};

fn pull_request(id: &str, author_id: &str, reviewers: &[&str]) -> PullRequest {
    PullRequest {
        id: id.into(),
        name: format!("Pull request {id}"),
        author_id: author_id.into(),
        reviewers: reviewers.iter().map(|r| r.to_string()).collect(),
        ..Default::default()
    }
}

#[tokio::test]
async fn create() {
    db_test_case("pull_request_create", |db| async move {
        assert!(matches!(
            db.pull_requests_create(pull_request("pr-1", "ghost", &[])).await,
            Err(DatabaseError::UnknownUser(id)) if id == "ghost"
        ));

        create_team(
            db.as_ref(),
            "backend",
            &[("author", true), ("u1", true), ("u2", true)],
        )
        .await?;

        assert!(matches!(
            db.pull_requests_create(pull_request("pr-1", "author", &["u1", "ghost"])).await,
            Err(DatabaseError::UnknownUser(id)) if id == "ghost"
        ));
        assert_eq!(db.pull_requests_get("pr-1").await?, None);

        let pr = db
            .pull_requests_create(pull_request("pr-1", "author", &["u2", "u1"]))
            .await?;
        assert_eq!(pr.id, "pr-1");
        assert_eq!(pr.name, "Pull request pr-1");
        assert_eq!(pr.status, PullRequestStatus::Open);
        assert_eq!(pr.reviewers, vec!["u2".to_string(), "u1".to_string()]);
        assert_eq!(pr.merged_at, None);

        assert!(matches!(
            db.pull_requests_create(pull_request("pr-1", "author", &[])).await,
            Err(DatabaseError::PullRequestAlreadyExists(id)) if id == "pr-1"
        ));

        assert_eq!(db.pull_requests_get_expect("pr-1").await?, pr);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn set_status() {
    db_test_case("pull_request_set_status", |db| async move {
        assert!(matches!(
            db.pull_requests_set_status("pr-1", PullRequestStatus::Merged).await,
            Err(DatabaseError::UnknownPullRequest(id)) if id == "pr-1"
        ));

        create_team(db.as_ref(), "backend", &[("author", true), ("u1", true)]).await?;
        db.pull_requests_create(pull_request("pr-1", "author", &["u1"]))
            .await?;

        let merged = db
            .pull_requests_set_status("pr-1", PullRequestStatus::Merged)
            .await?;
        assert_eq!(merged.status, PullRequestStatus::Merged);
        assert!(merged.merged_at.is_some());
        assert_eq!(merged.reviewers, vec!["u1".to_string()]);

        // Merging again keeps the first merge date
        let merged_again = db
            .pull_requests_set_status("pr-1", PullRequestStatus::Merged)
            .await?;
        assert_eq!(merged_again.merged_at, merged.merged_at);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn list_by_reviewer() {
    db_test_case("pull_request_list_by_reviewer", |db| async move {
        create_team(
            db.as_ref(),
            "backend",
            &[("author", true), ("u1", true), ("u2", true)],
        )
        .await?;
        db.pull_requests_create(pull_request("pr-2", "author", &["u1", "u2"]))
            .await?;
        db.pull_requests_create(pull_request("pr-1", "author", &["u1"]))
            .await?;

        let ids: Vec<_> = db
            .pull_requests_list_by_reviewer("u1")
            .await?
            .into_iter()
            .map(|pr| pr.id)
            .collect();
        assert_eq!(ids, vec!["pr-1".to_string(), "pr-2".to_string()]);

        let ids: Vec<_> = db
            .pull_requests_list_by_reviewer("u2")
            .await?
            .into_iter()
            .map(|pr| pr.id)
            .collect();
        assert_eq!(ids, vec!["pr-2".to_string()]);

        assert!(db.pull_requests_list_by_reviewer("author").await?.is_empty());

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn all() {
    db_test_case("pull_request_all", |db| async move {
        assert!(db.pull_requests_all().await?.is_empty());

        create_team(db.as_ref(), "backend", &[("author", true)]).await?;
        db.pull_requests_create(pull_request("pr-b", "author", &[]))
            .await?;
        db.pull_requests_create(pull_request("pr-a", "author", &[]))
            .await?;

        let ids: Vec<_> = db
            .pull_requests_all()
            .await?
            .into_iter()
            .map(|pr| pr.id)
            .collect();
        assert_eq!(ids, vec!["pr-a".to_string(), "pr-b".to_string()]);

        Ok(())
    })
    .await;
}
