//! Role matching.

use std::collections::HashSet;
use tagbot_core::RoleId;

/// True when the actor holds at least one of the `required` roles.
///
/// An empty `required` list means "no restriction" and is always satisfied.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use tagbot_core::RoleId;
/// use tagbot_security::matches;
///
/// let held: HashSet<RoleId> = [RoleId::new(1), RoleId::new(2)].into();
/// assert!(matches(&held, &[RoleId::new(2), RoleId::new(9)]));
/// assert!(!matches(&held, &[RoleId::new(9)]));
/// assert!(matches(&HashSet::new(), &[]));
/// ```
pub fn matches(actor_roles: &HashSet<RoleId>, required: &[RoleId]) -> bool {
    required.is_empty() || required.iter().any(|role| actor_roles.contains(role))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(ids: &[u64]) -> HashSet<RoleId> {
        ids.iter().copied().map(RoleId::new).collect()
    }

    fn required(ids: &[u64]) -> Vec<RoleId> {
        ids.iter().copied().map(RoleId::new).collect()
    }

    #[test]
    fn test_empty_required_ignores_actor_roles() {
        assert!(matches(&roles(&[]), &required(&[])));
        assert!(matches(&roles(&[1, 2, 3]), &required(&[])));
    }

    #[test]
    fn test_matches_iff_intersection_non_empty() {
        let held_sets: [&[u64]; 4] = [&[], &[1], &[2, 3], &[1, 2, 3, 4]];
        let required_sets: [&[u64]; 4] = [&[1], &[5], &[3, 5], &[4, 1]];
        for held in held_sets {
            for req in required_sets {
                let held_set = roles(held);
                let expected = req.iter().any(|id| held.contains(id));
                assert_eq!(
                    matches(&held_set, &required(req)),
                    expected,
                    "held={held:?} required={req:?}"
                );
            }
        }
    }

    #[test]
    fn test_no_roles_never_matches_non_empty_requirement() {
        assert!(!matches(&roles(&[]), &required(&[7])));
    }
}
