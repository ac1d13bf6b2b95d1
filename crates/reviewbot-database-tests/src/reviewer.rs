use pretty_assertions::assert_eq;
use reviewbot_database_interface::DatabaseError;
use reviewbot_models::{PullRequest, PullRequestStatus};

use crate::{fixtures::create_team, testcase::db_test_case};

#[tokio::test]
async fn list() {
    db_test_case("reviewer_list", |db| async move {
        assert!(matches!(
            db.pull_request_reviewers_list("pr-1").await,
            Err(DatabaseError::UnknownPullRequest(_))
        ));

        create_team(
            db.as_ref(),
            "backend",
            &[("author", true), ("u1", true), ("u2", true)],
        )
        .await?;
        db.pull_requests_create(PullRequest {
            id: "pr-1".into(),
            author_id: "author".into(),
            reviewers: vec!["u2".into(), "u1".into()],
            ..Default::default()
        })
        .await?;

        assert_eq!(
            db.pull_request_reviewers_list("pr-1").await?,
            vec!["u2".to_string(), "u1".to_string()]
        );

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn replace() {
    db_test_case("reviewer_replace", |db| async move {
        assert!(matches!(
            db.pull_request_reviewers_replace("pr-1", vec![]).await,
            Err(DatabaseError::UnknownPullRequest(_))
        ));

        create_team(
            db.as_ref(),
            "backend",
            &[("author", true), ("u1", true), ("u2", true), ("u3", true)],
        )
        .await?;
        db.pull_requests_create(PullRequest {
            id: "pr-1".into(),
            author_id: "author".into(),
            reviewers: vec!["u1".into(), "u2".into()],
            ..Default::default()
        })
        .await?;

        // Replaced reviewer keeps its slot
        db.pull_request_reviewers_replace("pr-1", vec!["u3".into(), "u2".into()])
            .await?;
        assert_eq!(
            db.pull_request_reviewers_list("pr-1").await?,
            vec!["u3".to_string(), "u2".to_string()]
        );
        assert_eq!(
            db.pull_requests_get_expect("pr-1").await?.reviewers,
            vec!["u3".to_string(), "u2".to_string()]
        );

        // A failed replacement leaves the previous set intact
        assert!(matches!(
            db.pull_request_reviewers_replace("pr-1", vec!["u1".into(), "ghost".into()])
                .await,
            Err(DatabaseError::UnknownUser(id)) if id == "ghost"
        ));
        assert_eq!(
            db.pull_request_reviewers_list("pr-1").await?,
            vec!["u3".to_string(), "u2".to_string()]
        );

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn replace_on_merged_pull_request() {
    db_test_case("reviewer_replace_merged", |db| async move {
        create_team(
            db.as_ref(),
            "backend",
            &[("author", true), ("u1", true), ("u2", true), ("u3", true)],
        )
        .await?;
        db.pull_requests_create(PullRequest {
            id: "pr-1".into(),
            author_id: "author".into(),
            reviewers: vec!["u1".into(), "u2".into()],
            ..Default::default()
        })
        .await?;
        db.pull_requests_set_status("pr-1", PullRequestStatus::Merged)
            .await?;

        assert!(matches!(
            db.pull_request_reviewers_replace("pr-1", vec!["u3".into(), "u2".into()])
                .await,
            Err(DatabaseError::PullRequestMerged(id)) if id == "pr-1"
        ));
        assert_eq!(
            db.pull_request_reviewers_list("pr-1").await?,
            vec!["u1".to_string(), "u2".to_string()]
        );

        Ok(())
    })
    .await;
}
