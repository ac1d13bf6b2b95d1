use reviewbot_database_interface::{DbService, Result};
use reviewbot_models::{Team, User};

pub(crate) fn member(id: &str, is_active: bool) -> User {
    User {
        id: id.into(),
        name: format!("User {id}"),
        is_active,
        ..Default::default()
    }
}

pub(crate) async fn create_team(db: &dyn DbService, name: &str, members: &[(&str, bool)]) -> Result<Team> {
    db.teams_create(Team {
        name: name.into(),
        members: members
            .iter()
            .map(|(id, is_active)| member(id, *is_active))
            .collect(),
    })
    .await
}
