//! Enumeration of joint action profiles.
//!
//! Profiles are visited in mixed-radix order with player 0's action varying
//! fastest. Output formats align payoff rows with player labels using this
//! order, so it must never change.

use std::fmt;

use crate::error::ProfileError;

/// Cursor over the Cartesian product of per-player action sets.
///
/// Actions are one-based: player `i` chooses from `1..=action_counts[i]`.
/// The cursor starts at the all-ones profile with [`Self::has_next`] set, so
/// even a single-profile space is visited exactly once.
///
/// # Examples
/// ```
/// use gamegen_core::ActionProfile;
///
/// let mut profile = ActionProfile::new(&[2, 2])?;
/// let mut visited = Vec::new();
/// while profile.has_next() {
///     visited.push(profile.current().to_vec());
///     profile.advance()?;
/// }
/// assert_eq!(visited, [vec![1, 1], vec![2, 1], vec![1, 2], vec![2, 2]]);
/// # Ok::<(), gamegen_core::ProfileError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionProfile {
    action_counts: Vec<usize>,
    actions: Vec<usize>,
    has_next: bool,
}

impl ActionProfile {
    /// Creates a cursor for `action_counts.len()` players.
    ///
    /// # Errors
    /// Returns [`ProfileError::NoPlayers`] for an empty slice and
    /// [`ProfileError::ZeroActions`] when any player has no actions.
    pub fn new(action_counts: &[usize]) -> Result<Self, ProfileError> {
        if action_counts.is_empty() {
            return Err(ProfileError::NoPlayers);
        }
        if let Some(player) = action_counts.iter().position(|&count| count == 0) {
            return Err(ProfileError::ZeroActions { player });
        }
        Ok(Self {
            action_counts: action_counts.to_vec(),
            actions: vec![1; action_counts.len()],
            has_next: true,
        })
    }

    /// Builds a cursor from counts that were validated elsewhere, such as a
    /// tensor shape.
    pub(crate) fn from_validated(action_counts: &[usize]) -> Self {
        debug_assert!(
            !action_counts.is_empty() && action_counts.iter().all(|&count| count > 0),
            "counts must be validated before construction"
        );
        Self {
            action_counts: action_counts.to_vec(),
            actions: vec![1; action_counts.len()],
            has_next: true,
        }
    }

    /// Creates a cursor where every player shares the same number of actions.
    ///
    /// # Errors
    /// Propagates the validation performed by [`Self::new`].
    pub fn uniform(player_count: usize, actions: usize) -> Result<Self, ProfileError> {
        Self::new(&vec![actions; player_count])
    }

    /// Returns the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.action_counts.len()
    }

    /// Returns the per-player action counts.
    #[must_use]
    pub fn action_counts(&self) -> &[usize] {
        &self.action_counts
    }

    /// Returns `∏ action_counts[i]`.
    ///
    /// # Errors
    /// Returns [`ProfileError::Overflow`] when the product exceeds `usize`.
    pub fn profile_count(&self) -> Result<usize, ProfileError> {
        self.action_counts
            .iter()
            .try_fold(1_usize, |acc, &count| acc.checked_mul(count))
            .ok_or(ProfileError::Overflow)
    }

    /// Rewinds the cursor to the all-ones profile.
    pub fn reset(&mut self) {
        self.actions.fill(1);
        self.has_next = true;
    }

    /// Positions the cursor at `actions`, which becomes the next profile
    /// visited.
    ///
    /// # Errors
    /// Returns [`ProfileError::LengthMismatch`] when `actions` does not cover
    /// every player and [`ProfileError::ActionOutOfRange`] when a component lies
    /// outside `[1, action_counts[i]]`. The cursor is unchanged on error.
    pub fn reset_to(&mut self, actions: &[usize]) -> Result<(), ProfileError> {
        check_actions(&self.action_counts, actions)?;
        self.actions.copy_from_slice(actions);
        self.has_next = true;
        Ok(())
    }

    /// Returns whether [`Self::current`] holds a profile not yet visited.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Returns the profile under the cursor.
    ///
    /// The slice borrows the cursor, so it cannot be held across
    /// [`Self::advance`]; copy it with `to_vec` to keep it.
    #[must_use]
    pub fn current(&self) -> &[usize] {
        &self.actions
    }

    /// Moves to the next profile, carrying from player 0 upwards.
    ///
    /// Carrying past the last player's bound rewinds the cursor to all ones
    /// and clears [`Self::has_next`].
    ///
    /// # Errors
    /// Returns [`ProfileError::Exhausted`] when called after the final profile.
    pub fn advance(&mut self) -> Result<(), ProfileError> {
        if !self.has_next {
            return Err(ProfileError::Exhausted);
        }
        self.step();
        Ok(())
    }

    /// Returns an iterator over every profile of this shape, starting from
    /// the all-ones profile regardless of the cursor position.
    ///
    /// # Examples
    /// ```
    /// use gamegen_core::ActionProfile;
    ///
    /// let profile = ActionProfile::new(&[3, 1, 2])?;
    /// assert_eq!(profile.iter().count(), 6);
    /// # Ok::<(), gamegen_core::ProfileError>(())
    /// ```
    #[must_use]
    pub fn iter(&self) -> Profiles {
        let mut cursor = self.clone();
        cursor.reset();
        Profiles { cursor }
    }

    fn step(&mut self) {
        for (action, &count) in self.actions.iter_mut().zip(&self.action_counts) {
            if *action < count {
                *action += 1;
                return;
            }
            *action = 1;
        }
        self.has_next = false;
    }
}

/// Verifies that `actions` is a valid profile for `action_counts`.
pub(crate) fn check_actions(action_counts: &[usize], actions: &[usize]) -> Result<(), ProfileError> {
    if actions.len() != action_counts.len() {
        return Err(ProfileError::LengthMismatch {
            expected: action_counts.len(),
            got: actions.len(),
        });
    }
    for (player, (&action, &count)) in actions.iter().zip(action_counts).enumerate() {
        if action == 0 || action > count {
            return Err(ProfileError::ActionOutOfRange {
                player,
                action,
                count,
            });
        }
    }
    Ok(())
}

impl fmt::Display for ActionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, action) in self.actions.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{action}")?;
        }
        f.write_str("]")
    }
}

/// Owning iterator returned by [`ActionProfile::iter`].
#[derive(Clone, Debug)]
pub struct Profiles {
    cursor: ActionProfile,
}

impl Iterator for Profiles {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.cursor.has_next {
            return None;
        }
        let profile = self.cursor.actions.clone();
        self.cursor.step();
        Some(profile)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn drain(profile: &mut ActionProfile) -> Vec<Vec<usize>> {
        let mut visited = Vec::new();
        while profile.has_next() {
            visited.push(profile.current().to_vec());
            profile.advance().expect("cursor has a pending profile");
        }
        visited
    }

    #[test]
    fn player_zero_varies_fastest() {
        let mut profile = ActionProfile::new(&[4, 2, 3]).expect("shape is valid");
        let visited = drain(&mut profile);
        assert_eq!(visited.len(), 24);
        assert_eq!(visited[0], [1, 1, 1]);
        assert_eq!(visited[1], [2, 1, 1]);
        assert_eq!(visited[3], [4, 1, 1]);
        assert_eq!(visited[4], [1, 2, 1]);
        assert_eq!(visited[8], [1, 1, 2]);
        assert_eq!(visited[23], [4, 2, 3]);
    }

    #[test]
    fn single_profile_space_is_visited_once() {
        let mut profile = ActionProfile::new(&[1, 1]).expect("shape is valid");
        assert!(profile.has_next());
        assert_eq!(drain(&mut profile), [vec![1, 1]]);
        assert_eq!(profile.current(), [1, 1]);
    }

    #[test]
    fn advance_after_exhaustion_fails() {
        let mut profile = ActionProfile::new(&[2]).expect("shape is valid");
        drain(&mut profile);
        assert_eq!(profile.advance(), Err(ProfileError::Exhausted));
    }

    #[test]
    fn reset_restarts_enumeration() {
        let mut profile = ActionProfile::uniform(3, 2).expect("shape is valid");
        let first = drain(&mut profile);
        profile.reset();
        assert_eq!(drain(&mut profile), first);
    }

    #[test]
    fn reset_to_resumes_from_the_given_profile() {
        let mut profile = ActionProfile::new(&[2, 2]).expect("shape is valid");
        profile.reset_to(&[2, 1]).expect("profile is in range");
        assert_eq!(drain(&mut profile), [vec![2, 1], vec![1, 2], vec![2, 2]]);
    }

    #[rstest]
    #[case(&[0, 1], ProfileError::ActionOutOfRange { player: 0, action: 0, count: 2 })]
    #[case(&[1, 3], ProfileError::ActionOutOfRange { player: 1, action: 3, count: 2 })]
    #[case(&[1], ProfileError::LengthMismatch { expected: 2, got: 1 })]
    fn reset_to_rejects_invalid_profiles(
        #[case] actions: &[usize],
        #[case] expected: ProfileError,
    ) {
        let mut profile = ActionProfile::new(&[2, 2]).expect("shape is valid");
        assert_eq!(profile.reset_to(actions), Err(expected));
        assert_eq!(profile.current(), [1, 1]);
    }

    #[rstest]
    #[case(&[], ProfileError::NoPlayers)]
    #[case(&[2, 0, 3], ProfileError::ZeroActions { player: 1 })]
    fn new_rejects_invalid_shapes(#[case] counts: &[usize], #[case] expected: ProfileError) {
        assert_eq!(ActionProfile::new(counts), Err(expected));
    }

    #[test]
    fn profile_count_reports_overflow() {
        let profile = ActionProfile::new(&[usize::MAX, 2]).expect("shape is valid");
        assert_eq!(profile.profile_count(), Err(ProfileError::Overflow));
    }

    #[test]
    fn display_lists_actions() {
        let mut profile = ActionProfile::new(&[3, 3]).expect("shape is valid");
        profile.reset_to(&[2, 3]).expect("profile is in range");
        assert_eq!(profile.to_string(), "[2 3]");
    }

    #[test]
    fn iter_ignores_cursor_position() {
        let mut profile = ActionProfile::new(&[2, 3]).expect("shape is valid");
        profile.reset_to(&[2, 3]).expect("profile is in range");
        let from_iter: Vec<_> = profile.iter().collect();
        profile.reset();
        assert_eq!(from_iter, drain(&mut profile));
    }

    proptest! {
        #[test]
        fn visits_every_profile_exactly_once(
            counts in proptest::collection::vec(1_usize..=4, 1..=5),
        ) {
            let mut profile = ActionProfile::new(&counts).expect("shape is valid");
            let expected: usize = counts.iter().product();
            let visited = drain(&mut profile);
            let distinct: HashSet<_> = visited.iter().cloned().collect();
            prop_assert_eq!(visited.len(), expected);
            prop_assert_eq!(distinct.len(), expected);
            prop_assert_eq!(profile.profile_count(), Ok(expected));
            for actions in &visited {
                for (action, count) in actions.iter().zip(&counts) {
                    prop_assert!((1..=*count).contains(action));
                }
            }
        }
    }
}
