use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Empty when the user belongs to no team.
    pub team_name: String,
    pub is_active: bool,
}

impl User {
    pub fn has_team(&self) -> bool {
        !self.team_name.is_empty()
    }
}
