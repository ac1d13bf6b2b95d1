//! Reviewer selection.
//!
//! Candidates are considered in the order they are given, which the storage
//! layer guarantees to be ascending user id.

use reviewbot_models::{PullRequestStatus, User};

use crate::{DomainError, Result};

fn is_eligible(user: &User, author_id: &str) -> bool {
    user.is_active && user.id != author_id
}

/// Pick the initial reviewers of a pull request from its author's team.
///
/// Returns the first `max_reviewers` eligible members (active, not the author).
pub fn select_initial_reviewers(
    author_id: &str,
    roster: &[User],
    max_reviewers: usize,
) -> Result<Vec<String>> {
    let reviewers: Vec<String> = roster
        .iter()
        .filter(|u| is_eligible(u, author_id))
        .take(max_reviewers)
        .map(|u| u.id.clone())
        .collect();

    if reviewers.is_empty() {
        return Err(DomainError::NoCandidate {
            message: "no review candidates found".into(),
        });
    }

    Ok(reviewers)
}

/// Check that `old_reviewer_id` can be replaced at all.
pub fn check_reassignable(
    status: PullRequestStatus,
    current_reviewers: &[String],
    old_reviewer_id: &str,
) -> Result<()> {
    if status == PullRequestStatus::Merged {
        return Err(DomainError::PullRequestMerged {
            message: "pull request already merged".into(),
        });
    }

    if !current_reviewers.iter().any(|r| r == old_reviewer_id) {
        return Err(DomainError::NotAssigned {
            message: format!("reviewer '{old_reviewer_id}' is not assigned to this pull request"),
        });
    }

    Ok(())
}

/// Pick a replacement for `old_reviewer_id`.
///
/// The replacement is never the old reviewer nor anyone already assigned.
pub fn select_replacement_reviewer(
    status: PullRequestStatus,
    current_reviewers: &[String],
    old_reviewer_id: &str,
    author_id: &str,
    candidates: &[User],
) -> Result<String> {
    check_reassignable(status, current_reviewers, old_reviewer_id)?;

    candidates
        .iter()
        .filter(|u| is_eligible(u, author_id))
        .find(|u| u.id != old_reviewer_id && !current_reviewers.contains(&u.id))
        .map(|u| u.id.clone())
        .ok_or_else(|| DomainError::NoCandidate {
            message: "no replacement reviewer found".into(),
        })
}

/// Swap `old_reviewer_id` for `new_reviewer_id`, keeping every other slot as is.
pub fn replace_reviewer(
    current_reviewers: &[String],
    old_reviewer_id: &str,
    new_reviewer_id: &str,
) -> Vec<String> {
    current_reviewers
        .iter()
        .map(|r| {
            if r == old_reviewer_id {
                new_reviewer_id.to_string()
            } else {
                r.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ErrorCode;

    fn users(ids: &[&str]) -> Vec<User> {
        ids.iter()
            .map(|id| User {
                id: id.to_string(),
                name: id.to_uppercase(),
                team_name: "t1".into(),
                is_active: true,
            })
            .collect()
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn initial_picks_two_distinct_non_author() {
        let roster = users(&["author", "u1", "u2", "u3"]);
        let reviewers = select_initial_reviewers("author", &roster, 2).unwrap();

        assert_eq!(reviewers, ids(&["u1", "u2"]));
    }

    #[test]
    fn initial_single_candidate() {
        let roster = users(&["author", "u1"]);
        assert_eq!(
            select_initial_reviewers("author", &roster, 2).unwrap(),
            ids(&["u1"])
        );
    }

    #[test]
    fn initial_skips_inactive_members() {
        let mut roster = users(&["author", "u1", "u2", "u3"]);
        roster[1].is_active = false;

        assert_eq!(
            select_initial_reviewers("author", &roster, 2).unwrap(),
            ids(&["u2", "u3"])
        );
    }

    #[test]
    fn initial_without_candidates() {
        let mut roster = users(&["author", "u1"]);
        roster[1].is_active = false;

        let err = select_initial_reviewers("author", &roster, 2).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NoCandidate);

        let err = select_initial_reviewers("author", &users(&["author"]), 2).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NoCandidate);
    }

    #[test]
    fn initial_respects_max() {
        let roster = users(&["author", "u1", "u2", "u3"]);
        assert_eq!(
            select_initial_reviewers("author", &roster, 3).unwrap(),
            ids(&["u1", "u2", "u3"])
        );
        assert_eq!(
            select_initial_reviewers("author", &roster, 1).unwrap(),
            ids(&["u1"])
        );
    }

    #[test]
    fn replacement_skips_assigned_reviewers() {
        let candidates = users(&["a", "b", "c", "d"]);
        let current = ids(&["a", "b"]);

        assert_eq!(
            select_replacement_reviewer(
                PullRequestStatus::Open,
                &current,
                "a",
                "author",
                &candidates
            )
            .unwrap(),
            "c"
        );
    }

    #[test]
    fn replacement_third_candidate() {
        let candidates = users(&["u1", "u2", "u3"]);
        let current = ids(&["u1", "u2"]);

        assert_eq!(
            select_replacement_reviewer(
                PullRequestStatus::Open,
                &current,
                "u1",
                "author",
                &candidates
            )
            .unwrap(),
            "u3"
        );
    }

    #[test]
    fn replacement_without_candidate() {
        let candidates = users(&["u1", "u2"]);
        let current = ids(&["u1", "u2"]);

        let err = select_replacement_reviewer(
            PullRequestStatus::Open,
            &current,
            "u1",
            "author",
            &candidates,
        )
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NoCandidate);
    }

    #[test]
    fn replacement_on_merged_pull_request() {
        let candidates = users(&["u1", "u2", "u3", "u4"]);
        let current = ids(&["u1", "u2"]);

        let err = select_replacement_reviewer(
            PullRequestStatus::Merged,
            &current,
            "u1",
            "author",
            &candidates,
        )
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::PullRequestMerged);

        // Merged wins over a missing reviewer
        let err = select_replacement_reviewer(
            PullRequestStatus::Merged,
            &current,
            "u9",
            "author",
            &candidates,
        )
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::PullRequestMerged);
    }

    #[test]
    fn replacement_of_unassigned_reviewer() {
        let candidates = users(&["u1", "u2", "u3"]);
        let current = ids(&["u1", "u2"]);

        let err = select_replacement_reviewer(
            PullRequestStatus::Open,
            &current,
            "u3",
            "author",
            &candidates,
        )
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotAssigned);
    }

    #[test]
    fn replacement_never_picks_author() {
        let candidates = users(&["author", "u1", "u2"]);
        let current = ids(&["u1"]);

        assert_eq!(
            select_replacement_reviewer(
                PullRequestStatus::Open,
                &current,
                "u1",
                "author",
                &candidates
            )
            .unwrap(),
            "u2"
        );
    }

    #[test]
    fn replace_keeps_positions() {
        assert_eq!(
            replace_reviewer(&ids(&["u1", "u2"]), "u1", "u3"),
            ids(&["u3", "u2"])
        );
        assert_eq!(
            replace_reviewer(&ids(&["u1", "u2"]), "u2", "u3"),
            ids(&["u1", "u3"])
        );
    }
}
