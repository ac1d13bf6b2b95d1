pub(crate) mod add_team;
pub(crate) mod get_team;

pub use add_team::AddTeamInterface;
pub use get_team::GetTeamInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{add_team::MockAddTeamInterface, get_team::MockGetTeamInterface};
