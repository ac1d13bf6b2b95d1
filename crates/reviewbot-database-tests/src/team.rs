use pretty_assertions::assert_eq;
use reviewbot_database_interface::DatabaseError;

use crate::{fixtures::create_team, testcase::db_test_case};

#[tokio::test]
async fn create() {
    db_test_case("team_create", |db| async move {
        let team = create_team(db.as_ref(), "backend", &[("u2", true), ("u1", false)]).await?;

        assert_eq!(team.name, "backend");
        assert_eq!(
            team.members
                .iter()
                .map(|m| (m.id.as_str(), m.team_name.as_str(), m.is_active))
                .collect::<Vec<_>>(),
            vec![("u1", "backend", false), ("u2", "backend", true)]
        );

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn create_duplicate() {
    db_test_case("team_create_duplicate", |db| async move {
        create_team(db.as_ref(), "backend", &[("u1", true)]).await?;

        assert!(matches!(
            create_team(db.as_ref(), "backend", &[("u1", false), ("u2", true)]).await,
            Err(DatabaseError::TeamAlreadyExists(name)) if name == "backend"
        ));

        // Members are left untouched
        assert!(db.users_get_expect("u1").await?.is_active);
        assert_eq!(db.users_get("u2").await?, None);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn create_moves_existing_members() {
    db_test_case("team_create_moves_existing_members", |db| async move {
        create_team(db.as_ref(), "backend", &[("u1", true), ("u2", true)]).await?;
        create_team(db.as_ref(), "frontend", &[("u1", false)]).await?;

        let user = db.users_get_expect("u1").await?;
        assert_eq!(user.team_name, "frontend");
        assert!(!user.is_active);

        let backend = db.teams_get_expect("backend").await?;
        assert_eq!(
            backend.members.iter().map(|m| m.id.as_str()).collect::<Vec<_>>(),
            vec!["u2"]
        );

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn get() {
    db_test_case("team_get", |db| async move {
        assert_eq!(db.teams_get("backend").await?, None);
        assert!(matches!(
            db.teams_get_expect("backend").await,
            Err(DatabaseError::UnknownTeam(name)) if name == "backend"
        ));

        let created = create_team(db.as_ref(), "backend", &[("u1", true)]).await?;
        assert_eq!(db.teams_get_expect("backend").await?, created);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn all() {
    db_test_case("team_all", |db| async move {
        create_team(db.as_ref(), "frontend", &[("u2", true)]).await?;
        create_team(db.as_ref(), "backend", &[("u1", true)]).await?;

        let names: Vec<_> = db.teams_all().await?.into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["backend".to_string(), "frontend".to_string()]);

        Ok(())
    })
    .await;
}
