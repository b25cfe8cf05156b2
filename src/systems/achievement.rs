//! Milestones earned once and kept until reset.

use crate::systems::sdk::{Lens, Predicate};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AchievementState {
    pub earned: bool,
}

pub struct Achievement<S> {
    pub name: String,
    pub requirement: Predicate<S>,
    pub visible: Predicate<S>,
}

impl<S> Achievement<S> {
    pub fn new(name: impl Into<String>, requirement: impl Into<Predicate<S>>) -> Self {
        Self {
            name: name.into(),
            requirement: requirement.into(),
            visible: Predicate::always(),
        }
    }

    pub fn visible_when(mut self, visible: impl Into<Predicate<S>>) -> Self {
        self.visible = visible.into();
        self
    }
}

pub struct Achievements<S> {
    states: Lens<S, Vec<AchievementState>>,
    defs: Vec<Achievement<S>>,
}

impl<S> Achievements<S> {
    pub fn new(states: Lens<S, Vec<AchievementState>>) -> Self {
        Self {
            states,
            defs: Vec::new(),
        }
    }

    pub fn with(mut self, achievement: Achievement<S>) -> Self {
        self.defs.push(achievement);
        self
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Achievement<S>> {
        self.defs.get(index)
    }

    pub fn default_states(&self) -> Vec<AchievementState> {
        vec![AchievementState::default(); self.defs.len()]
    }

    pub fn is_earned(&self, state: &S, index: usize) -> bool {
        self.states
            .get(state)
            .get(index)
            .is_some_and(|achievement| achievement.earned)
    }

    pub fn earned_count(&self, state: &S) -> usize {
        (0..self.defs.len())
            .filter(|&index| self.is_earned(state, index))
            .count()
    }

    pub fn is_visible(&self, state: &S, index: usize) -> bool {
        self.defs
            .get(index)
            .is_some_and(|achievement| achievement.visible.get(state))
    }

    /// One pass in declaration order. Hidden achievements are skipped, and
    /// an achievement earned here can reveal a later one in the same pass.
    /// Returns the indices earned by this pass.
    pub fn evaluate(&self, state: &mut S) -> Vec<usize> {
        let mut earned = Vec::new();
        for (index, achievement) in self.defs.iter().enumerate() {
            if self.is_earned(state, index) || !achievement.visible.get(state) {
                continue;
            }
            if !achievement.requirement.get(state) {
                continue;
            }
            if let Some(slot) = self.states.get_mut(state).get_mut(index) {
                slot.earned = true;
                tracing::info!(achievement = %achievement.name, "achievement earned");
                earned.push(index);
            }
        }
        earned
    }
}
