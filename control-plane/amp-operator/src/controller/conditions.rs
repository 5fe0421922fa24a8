use crate::crd::api_manager::{Condition, ConditionList};

/// Upsert `incoming` by type into a copy of `previous`.
///
/// An existing condition with the same status is kept verbatim, transition
/// time and reason included. A status flip replaces it and stamps `now`. A
/// new type is appended with `now`.
pub fn set_condition(
    previous: &ConditionList,
    incoming: Condition,
    now: &str,
) -> ConditionList {
    let mut out = previous.clone();
    let list = out.as_mut_vec();
    match list.iter_mut().find(|c| c.type_ == incoming.type_) {
        Some(existing) if existing.status == incoming.status => {}
        Some(existing) => {
            *existing = Condition {
                last_transition_time: Some(now.to_string()),
                ..incoming
            };
        }
        None => list.push(Condition {
            last_transition_time: Some(now.to_string()),
            ..incoming
        }),
    }
    out
}

/// Equality by type, ignoring `lastTransitionTime` and list order.
pub fn conditions_equal(a: &ConditionList, b: &ConditionList) -> bool {
    normalized(a) == normalized(b)
}

fn normalized(list: &ConditionList) -> Vec<Condition> {
    let mut out: Vec<Condition> = list
        .iter()
        .map(|c| Condition {
            last_transition_time: None,
            ..c.clone()
        })
        .collect();
    out.sort_by(|a, b| a.type_.cmp(&b.type_));
    out
}
