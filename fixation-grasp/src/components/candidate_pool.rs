use hecs::Entity;

use crate::classify::Graspability;

/// The objects a hand could grasp right now.
///
/// Any number of one-hand candidates are tracked, but only a single two-hand candidate: the most
/// recent one to come into reach. An object is never a one-hand and a two-hand candidate at the
/// same time. Being a candidate says nothing about who owns the object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidatePool {
    one_hand: Vec<Entity>,
    two_hands: Option<Entity>,
}

impl CandidatePool {
    /// An object came into reach and was classified as `graspability`
    pub fn on_enter(&mut self, object: Entity, graspability: Graspability) {
        match graspability {
            Graspability::OneHand => {
                if self.two_hands == Some(object) {
                    self.two_hands = None;
                }
                if !self.one_hand.contains(&object) {
                    self.one_hand.push(object);
                }
            }
            Graspability::TwoHands => {
                self.one_hand.retain(|e| *e != object);
                self.two_hands = Some(object);
            }
            Graspability::NotGraspable => {}
        }
    }

    /// An object went out of reach
    pub fn on_exit(&mut self, object: Entity) {
        self.one_hand.retain(|e| *e != object);
        if self.two_hands == Some(object) {
            self.two_hands = None;
        }
    }

    /// Take a one-hand candidate out of the pool.
    ///
    /// Which candidate is taken is deliberately unspecified. Candidates rejected by `eligible` are
    /// skipped and stay in the pool.
    pub fn take_one_hand(&mut self, mut eligible: impl FnMut(Entity) -> bool) -> Option<Entity> {
        let index = self.one_hand.iter().rposition(|e| eligible(*e))?;
        Some(self.one_hand.swap_remove(index))
    }

    /// The current two-hand candidate
    pub fn two_hands_candidate(&self) -> Option<Entity> {
        self.two_hands
    }

    /// Forget the two-hand candidate
    pub fn clear_two_hands(&mut self) {
        self.two_hands = None;
    }

    /// The current one-hand candidates, in no particular order
    pub fn one_hand_candidates(&self) -> &[Entity] {
        &self.one_hand
    }

    /// Is `object` a candidate of either kind?
    pub fn contains(&self, object: Entity) -> bool {
        self.two_hands == Some(object) || self.one_hand.contains(&object)
    }

    /// Every candidate of either kind
    pub fn candidates(&self) -> impl Iterator<Item = Entity> + '_ {
        self.one_hand.iter().copied().chain(self.two_hands)
    }

    /// Are there no candidates at all?
    pub fn is_empty(&self) -> bool {
        self.one_hand.is_empty() && self.two_hands.is_none()
    }
}
