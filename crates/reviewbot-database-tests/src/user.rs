use pretty_assertions::assert_eq;
use reviewbot_database_interface::DatabaseError;

use crate::{fixtures::create_team, testcase::db_test_case};

#[tokio::test]
async fn get() {
    db_test_case("user_get", |db| async move {
        assert_eq!(db.users_get("u1").await?, None);
        assert!(matches!(
            db.users_get_expect("u1").await,
            Err(DatabaseError::UnknownUser(id)) if id == "u1"
        ));

        create_team(db.as_ref(), "backend", &[("u1", true)]).await?;

        let user = db.users_get_expect("u1").await?;
        assert_eq!(user.name, "User u1");
        assert_eq!(user.team_name, "backend");
        assert!(user.is_active);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn set_is_active() {
    db_test_case("user_set_is_active", |db| async move {
        assert!(matches!(
            db.users_set_is_active("u1", false).await,
            Err(DatabaseError::UnknownUser(_))
        ));

        create_team(db.as_ref(), "backend", &[("u1", true)]).await?;

        let user = db.users_set_is_active("u1", false).await?;
        assert!(!user.is_active);
        assert!(!db.users_get_expect("u1").await?.is_active);

        let user = db.users_set_is_active("u1", true).await?;
        assert!(user.is_active);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn list_review_candidates() {
    db_test_case("user_list_review_candidates", |db| async move {
        create_team(
            db.as_ref(),
            "backend",
            &[("u3", true), ("author", true), ("u1", true), ("u2", false)],
        )
        .await?;
        create_team(db.as_ref(), "frontend", &[("u4", true)]).await?;

        let ids: Vec<_> = db
            .users_list_review_candidates("backend", "author")
            .await?
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec!["u1".to_string(), "u3".to_string()]);

        assert!(db
            .users_list_review_candidates("unknown", "author")
            .await?
            .is_empty());

        Ok(())
    })
    .await;
}
