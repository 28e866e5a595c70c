//! Picture selection.
//!
//! [`resolve`] picks the single best [`PictureRule`] for an actor out of one
//! ordered rule list. Rules are tried in tiers rather than in plain order:
//!
//! 1. rule state is active on the actor **and** rule switch is ON
//! 2. rule state is active and the rule has no switch
//! 3. the actor has no active states at all, the rule has no state and its
//!    switch is ON
//! 4. the rule has neither state nor switch (the default picture)
//!
//! The first tier with a match wins; inside a tier the earliest rule wins.

use crate::resources::picturerules::{ActorId, PictureRule, StateId, SwitchId};

/// Read access to the game state the resolver needs.
pub trait StateView {
    /// Active status conditions of an actor; empty for unknown actors.
    fn actor_states(&self, actor: ActorId) -> &[StateId];
    /// Current value of a global switch.
    fn switch_on(&self, switch: SwitchId) -> bool;
}

/// Select the picture for `actor` from `rules`, or `None`.
///
/// Pure and total: no actor, an empty list or no match all yield `None`.
pub fn resolve<'r, V: StateView + ?Sized>(
    actor: Option<ActorId>,
    rules: &'r [PictureRule],
    view: &V,
) -> Option<&'r PictureRule> {
    let actor = actor?;
    let states = view.actor_states(actor);
    let candidates = move || rules.iter().filter(move |r| r.actor_id == Some(actor));

    let state_active = |rule: &PictureRule| rule.state_id.is_some_and(|s| states.contains(&s));
    let switch_on = |rule: &PictureRule| rule.switch_id.is_some_and(|s| view.switch_on(s));

    if !states.is_empty() {
        if let Some(rule) = candidates().find(|&r| state_active(r) && switch_on(r)) {
            return Some(rule);
        }
        if let Some(rule) = candidates().find(|&r| state_active(r) && r.switch_id.is_none()) {
            return Some(rule);
        }
    } else if let Some(rule) = candidates().find(|&r| r.state_id.is_none() && switch_on(r)) {
        return Some(rule);
    }

    candidates().find(|r| r.state_id.is_none() && r.switch_id.is_none())
}
