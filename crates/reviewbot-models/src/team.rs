use serde::{Deserialize, Serialize};

use crate::User;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    pub members: Vec<User>,
}

impl Team {
    /// Attach members to the team, stamping their team name.
    pub fn with_members(mut self, members: Vec<User>) -> Self {
        self.members = members
            .into_iter()
            .map(|member| User {
                team_name: self.name.clone(),
                ..member
            })
            .collect();
        self
    }
}
