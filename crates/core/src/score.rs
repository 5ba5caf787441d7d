use crate::{hex::HexPointSet, AtomLayout, HexPoint};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Penalty for each guessed atom that turns out to be wrong
pub const MISSED_ATOM_PENALTY: usize = 5;

/// The outcome of a finished game. Lower is better.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub rays_shot: usize,
    pub atom_guesses: usize,
    pub atoms_hit: usize,
    pub atoms_missed: usize,
    pub score: usize,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rays shot:    {}", self.rays_shot)?;
        writeln!(f, "Atoms found:  {}/{}", self.atoms_hit, self.atom_guesses)?;
        writeln!(f, "Atoms missed: {}", self.atoms_missed)?;
        write!(
            f,
            "Score:        {} = {} + {} × {}",
            self.score, self.rays_shot, MISSED_ATOM_PENALTY, self.atoms_missed
        )
    }
}

/// Tallies rays as they're fired, and turns the final guesses into a [Score]
#[derive(Clone, Debug, Default)]
pub struct ScoreKeeper {
    rays_shot: usize,
    last: Option<Score>,
}

impl ScoreKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_ray_fired(&mut self) {
        self.rays_shot += 1;
    }

    pub fn rays_shot(&self) -> usize {
        self.rays_shot
    }

    /// The most recently finalized score, if guesses have been submitted
    pub fn score(&self) -> Option<Score> {
        self.last
    }

    /// Score a set of guessed atom positions against the real ones. Duplicate
    /// guesses only count once. This can be called again later, and the score
    /// will be recomputed with the current ray count.
    pub fn finalize_guesses(
        &mut self,
        guesses: impl IntoIterator<Item = HexPoint>,
        atoms: &AtomLayout,
    ) -> Score {
        let guesses: HexPointSet = guesses.into_iter().collect();
        let atom_guesses = guesses.len();
        let atoms_hit =
            guesses.iter().filter(|guess| atoms.is_atom(**guess)).count();
        let atoms_missed = atom_guesses - atoms_hit;
        let score = Score {
            rays_shot: self.rays_shot,
            atom_guesses,
            atoms_hit,
            atoms_missed,
            score: self.rays_shot + MISSED_ATOM_PENALTY * atoms_missed,
        };
        self.last = Some(score);
        score
    }
}
