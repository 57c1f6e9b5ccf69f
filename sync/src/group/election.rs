use crate::SyncRole;

/// Picks the leader among `(role, blend weight)` entries, in registration order.
///
/// Always-leaders win outright, the last one listed taking precedence. Failing
/// that, the leader candidate with the strictly highest weight wins, ties going
/// to the earliest. When no member qualifies the first one leads. Returns
/// `None` only for an empty group.
pub fn find_leader_index<I>(members: I) -> Option<usize>
where
    I: IntoIterator<Item = (SyncRole, f32)>,
{
    let mut member_count = 0;
    let mut always_leader = None;
    let mut best_candidate: Option<(usize, f32)> = None;

    for (index, (role, weight)) in members.into_iter().enumerate() {
        member_count += 1;
        if role.is_always_leader() {
            always_leader = Some(index);
        } else if role.is_leader_candidate()
            && best_candidate.map_or(true, |(_, best_weight)| weight > best_weight)
        {
            best_candidate = Some((index, weight));
        }
    }

    if member_count == 0 {
        return None;
    }

    Some(
        always_leader
            .or(best_candidate.map(|(index, _)| index))
            .unwrap_or(0),
    )
}
