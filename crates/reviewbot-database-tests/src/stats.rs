use pretty_assertions::assert_eq;
use reviewbot_models::{PullRequest, PullRequestStats, PullRequestStatus, UserAssignmentStat};

use crate::{fixtures::create_team, testcase::db_test_case};

#[tokio::test]
async fn empty() {
    db_test_case("stats_empty", |db| async move {
        assert_eq!(db.stats_pull_requests().await?, PullRequestStats::default());
        assert!(db.stats_assignments().await?.is_empty());

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn counts() {
    db_test_case("stats_counts", |db| async move {
        create_team(
            db.as_ref(),
            "backend",
            &[("author", true), ("u1", true), ("u2", true)],
        )
        .await?;

        for (id, reviewers) in [("pr-1", vec!["u1", "u2"]), ("pr-2", vec!["u1"])] {
            db.pull_requests_create(PullRequest {
                id: id.into(),
                author_id: "author".into(),
                reviewers: reviewers.into_iter().map(Into::into).collect(),
                ..Default::default()
            })
            .await?;
        }
        db.pull_requests_set_status("pr-2", PullRequestStatus::Merged)
            .await?;

        assert_eq!(
            db.stats_pull_requests().await?,
            PullRequestStats {
                total: 2,
                open: 1,
                merged: 1
            }
        );
        assert_eq!(
            db.stats_assignments().await?,
            vec![
                UserAssignmentStat {
                    user_id: "u1".into(),
                    count: 2
                },
                UserAssignmentStat {
                    user_id: "u2".into(),
                    count: 1
                }
            ]
        );

        Ok(())
    })
    .await;
}
