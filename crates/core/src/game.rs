use crate::{
    hex::{HexPoint, HexPointIndexSet},
    render::{BoardView, CellColor},
    timed, AtomLayout, BlackBoxError, Encounter, EntryPoint, EntryPointTable,
    GameConfig, HexGrid, RayTracer, Score, ScoreKeeper, ATOM_COUNT,
};
use anyhow::Context;
use fnv::FnvBuildHasher;
use indexmap::IndexSet;
use log::{debug, info};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use validator::Validate;

/// One play session: a board with hidden atoms, the rays fired so far, and
/// the player's current guesses. All game state lives here.
///
/// A game goes through two phases. While it's in progress, the player fires
/// rays and toggles guesses. Once exactly [ATOM_COUNT] guesses are placed,
/// [Game::finish] scores them and ends the game, after which nothing else can
/// change.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    grid: HexGrid,
    atoms: AtomLayout,
    entry_points: EntryPointTable,
    score_keeper: ScoreKeeper,
    /// Entry points that can't be fired anymore, either because a ray was
    /// fired from them or because a ray came out of them
    used_entry_points: IndexSet<EntryPoint, FnvBuildHasher>,
    encounters: Vec<Encounter>,
    guesses: HexPointIndexSet,
    atoms_revealed: bool,
    final_score: Option<Score>,
}

impl Game {
    /// Start a new game. Atoms are placed randomly, based on the config's
    /// seed. Returns an error if the config is invalid.
    pub fn new(config: GameConfig) -> anyhow::Result<Self> {
        info!("Starting game with config {:?}", config);
        config.validate().context("invalid config")?;

        let grid = HexGrid::new(config.radius)?;
        let mut rng = Pcg64::seed_from_u64(config.seed.to_u64());
        let atoms = timed!(
            "Atom placement",
            AtomLayout::select(&grid, &mut rng)
        )?;
        Ok(Self::from_parts(config, grid, atoms))
    }

    /// Start a game with a known set of atoms, instead of placing them
    /// randomly. The config's seed is ignored.
    pub fn with_atoms(
        config: GameConfig,
        atoms: impl IntoIterator<Item = HexPoint>,
    ) -> anyhow::Result<Self> {
        info!("Starting game with fixed atoms and config {:?}", config);
        config.validate().context("invalid config")?;

        let grid = HexGrid::new(config.radius)?;
        let atoms = AtomLayout::new(&grid, atoms)?;
        Ok(Self::from_parts(config, grid, atoms))
    }

    fn from_parts(
        config: GameConfig,
        grid: HexGrid,
        atoms: AtomLayout,
    ) -> Self {
        let entry_points = EntryPointTable::new(&grid);
        info!(
            "Board has {} cells and {} entry points",
            grid.len(),
            entry_points.len()
        );
        Self {
            config,
            grid,
            atoms,
            entry_points,
            score_keeper: ScoreKeeper::new(),
            used_entry_points: IndexSet::default(),
            encounters: Vec::new(),
            guesses: HexPointIndexSet::default(),
            atoms_revealed: false,
            final_score: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    pub fn entry_points(&self) -> &EntryPointTable {
        &self.entry_points
    }

    /// The hidden atoms. Peeking at these is cheating, but it's useful for
    /// testing and for showing the answer afterwards.
    pub fn atoms(&self) -> &AtomLayout {
        &self.atoms
    }

    /// A tracer over this game's board. Tracing with it directly doesn't
    /// count as firing a ray; use [Game::fire] for that.
    pub fn tracer(&self) -> RayTracer<'_> {
        RayTracer::new(&self.grid, &self.atoms, &self.entry_points)
    }

    /// Every ray fired so far, in order
    pub fn encounters(&self) -> &[Encounter] {
        &self.encounters
    }

    pub fn guesses(&self) -> &HexPointIndexSet {
        &self.guesses
    }

    pub fn score_keeper(&self) -> &ScoreKeeper {
        &self.score_keeper
    }

    /// The final score, once the game is finished
    pub fn final_score(&self) -> Option<Score> {
        self.final_score
    }

    pub fn is_over(&self) -> bool {
        self.final_score.is_some()
    }

    pub fn is_used(&self, entry_point: EntryPoint) -> bool {
        self.used_entry_points.contains(&entry_point)
    }

    /// Entry points that can still be fired, in table order
    pub fn available_entry_points(
        &self,
    ) -> impl Iterator<Item = EntryPoint> + '_ {
        self.entry_points.all().filter(move |entry| !self.is_used(*entry))
    }

    /// Fire a ray. The result is painted onto the view, and the ray counts
    /// towards the score. Fails without changing anything if the game is
    /// over, or if the entry point is invalid or already used.
    pub fn fire(
        &mut self,
        entry: EntryPoint,
        view: &mut impl BoardView,
    ) -> anyhow::Result<&Encounter> {
        if self.is_over() {
            return Err(BlackBoxError::GameOver.into());
        }
        if self.is_used(entry) {
            return Err(BlackBoxError::EntryPointUsed(entry).into());
        }
        let encounter = self.tracer().fire(entry)?;

        self.score_keeper.record_ray_fired();
        self.used_entry_points.insert(entry);
        if let Some(exit) = encounter.exit() {
            self.used_entry_points.insert(exit);
            view.mark_exit_used(exit);
        }
        for (hex, color) in encounter.painted_cells() {
            view.color_cell(hex, color);
        }
        info!(
            "Ray #{} from {}: {:?} ending at {}",
            self.score_keeper.rays_shot(),
            entry,
            encounter.kind(),
            encounter.final_hex()
        );

        self.encounters.push(encounter);
        // We just pushed, so there's always a last element
        Ok(&self.encounters[self.encounters.len() - 1])
    }

    /// Add or remove a guessed atom position. Returns `true` if the cell is
    /// now guessed, `false` if the guess was removed. At most [ATOM_COUNT]
    /// guesses can be placed at once.
    pub fn toggle_guess(&mut self, hex: HexPoint) -> anyhow::Result<bool> {
        if self.is_over() {
            return Err(BlackBoxError::GameOver.into());
        }
        if !self.grid.contains(hex) {
            return Err(BlackBoxError::OffGrid(hex).into());
        }

        if self.guesses.shift_remove(&hex) {
            debug!("Removed guess {}", hex);
            Ok(false)
        } else if self.guesses.len() >= ATOM_COUNT {
            Err(BlackBoxError::TooManyGuesses(ATOM_COUNT).into())
        } else {
            self.guesses.insert(hex);
            debug!("Added guess {}", hex);
            Ok(true)
        }
    }

    /// Paint every atom onto the view. Only the first call does anything.
    pub fn reveal_atoms(&mut self, view: &mut impl BoardView) {
        if self.atoms_revealed {
            return;
        }
        for &atom in self.atoms.atoms() {
            view.color_cell(atom, CellColor::Atom);
        }
        self.atoms_revealed = true;
    }

    /// Score the current guesses and end the game. Requires exactly
    /// [ATOM_COUNT] guesses. The atoms are revealed on the view.
    pub fn finish(
        &mut self,
        view: &mut impl BoardView,
    ) -> anyhow::Result<Score> {
        if self.is_over() {
            return Err(BlackBoxError::GameOver.into());
        }
        if self.guesses.len() != ATOM_COUNT {
            return Err(BlackBoxError::WrongGuessCount {
                expected: ATOM_COUNT,
                actual: self.guesses.len(),
            }
            .into());
        }

        let score = self
            .score_keeper
            .finalize_guesses(self.guesses.iter().copied(), &self.atoms);
        self.reveal_atoms(view);
        self.final_score = Some(score);
        info!("Game over with score {}", score.score);
        Ok(score)
    }
}
