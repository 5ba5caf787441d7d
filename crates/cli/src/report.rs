use blackbox::{Encounter, Game, GameConfig, HexPoint, Score, TextBoard};
use serde::Serialize;
use std::fmt::{self, Display};

/// Everything worth knowing about a session once the CLI is done with it
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub config: &'a GameConfig,
    pub board: String,
    pub encounters: &'a [Encounter],
    pub guesses: Vec<HexPoint>,
    /// Only included if the atoms were revealed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atoms: Option<Vec<HexPoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
}

impl<'a> Report<'a> {
    pub fn new(game: &'a Game, board: &TextBoard, show_atoms: bool) -> Self {
        Self {
            config: game.config(),
            board: board.render(),
            encounters: game.encounters(),
            guesses: game.guesses().iter().copied().collect(),
            atoms: if show_atoms {
                Some(game.atoms().atoms().iter().copied().collect())
            } else {
                None
            },
            score: game.final_score(),
        }
    }
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Seed: {}  Radius: {}",
            self.config.seed, self.config.radius
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.board)?;
        writeln!(f)?;
        writeln!(f, "{}", TextBoard::legend())?;

        if !self.encounters.is_empty() {
            writeln!(f)?;
            writeln!(f, "Rays:")?;
            for (i, encounter) in self.encounters.iter().enumerate() {
                write!(
                    f,
                    "{:>3}. {} -> {} ({})",
                    i + 1,
                    encounter.entry(),
                    encounter.final_hex(),
                    encounter.color().color_name()
                )?;
                match encounter.exit() {
                    Some(exit) => writeln!(f, ", exits at {}", exit)?,
                    None => writeln!(f)?,
                }
            }
        }

        if !self.guesses.is_empty() {
            writeln!(f)?;
            let guesses: Vec<String> =
                self.guesses.iter().map(HexPoint::to_string).collect();
            writeln!(f, "Guesses: {}", guesses.join(" "))?;
        }
        if let Some(atoms) = &self.atoms {
            let atoms: Vec<String> =
                atoms.iter().map(HexPoint::to_string).collect();
            writeln!(f, "Atoms:   {}", atoms.join(" "))?;
        }
        if let Some(score) = &self.score {
            writeln!(f)?;
            writeln!(f, "{}", score)?;
        }
        Ok(())
    }
}
