use blackbox::{
    BlackBoxError, BoardView, CellColor, Direction, Encounter, EncounterKind,
    EntryPoint, Game, GameConfig, HexPoint, Seed, TextBoard, ATOM_COUNT,
};
use std::collections::HashMap;

/// A view that records every call, to check what a game reports
#[derive(Default)]
struct RecordingView {
    painted: Vec<(HexPoint, CellColor)>,
    exits: Vec<EntryPoint>,
}

impl BoardView for RecordingView {
    fn color_cell(&mut self, hex: HexPoint, color: CellColor) {
        self.painted.push((hex, color));
    }

    fn mark_exit_used(&mut self, exit: EntryPoint) {
        self.exits.push(exit);
    }
}

fn ring_game() -> Game {
    let atoms = [(0, 0), (1, -1), (1, 0), (0, 1), (-1, 1), (-1, 0)]
        .iter()
        .map(|&(x, y)| HexPoint::new_xy(x, y));
    Game::with_atoms(
        GameConfig {
            seed: Seed::Int(0),
            radius: 4,
        },
        atoms,
    )
    .unwrap()
}

fn fire_remaining(game: &mut Game, view: &mut impl BoardView) {
    let all: Vec<EntryPoint> = game.entry_points().all().collect();
    for entry in all {
        if !game.is_used(entry) {
            game.fire(entry, view).unwrap();
        }
    }
    assert_eq!(game.available_entry_points().count(), 0);
}

#[test]
fn test_full_session() {
    let mut game = ring_game();
    let mut view = RecordingView::default();

    // A miss paints both ends and uses up the exit
    let miss = EntryPoint::new(HexPoint::new_xy(4, -4), Direction::Deg0);
    let encounter = game.fire(miss, &mut view).unwrap().clone();
    assert_eq!(encounter.kind(), EncounterKind::NoEncounter);
    assert_eq!(view.exits, vec![encounter.exit().unwrap()]);
    assert_eq!(
        view.painted,
        vec![
            (HexPoint::new_xy(4, -4), CellColor::Miss),
            (HexPoint::new_xy(0, -4), CellColor::Miss),
        ]
    );

    // A hit only paints the entry cell
    let hit = EntryPoint::new(HexPoint::new_xy(4, -4), Direction::Deg300);
    assert_eq!(
        game.fire(hit, &mut view).unwrap().kind(),
        EncounterKind::DirectHit
    );
    assert_eq!(view.painted.len(), 3);
    assert_eq!(view.painted[2], (HexPoint::new_xy(4, -4), CellColor::Hit));
    assert_eq!(view.exits.len(), 1);

    // Guess four right and two wrong
    let guesses = [(0, 0), (1, -1), (1, 0), (0, 1), (3, 0), (-3, 0)];
    for &(x, y) in &guesses {
        assert!(game.toggle_guess(HexPoint::new_xy(x, y)).unwrap());
    }
    let score = game.finish(&mut view).unwrap();
    assert_eq!(score.rays_shot, 2);
    assert_eq!(score.atoms_hit, 4);
    assert_eq!(score.atoms_missed, 2);
    assert_eq!(score.score, 12);

    // Finishing reveals every atom
    let revealed: Vec<HexPoint> = view
        .painted
        .iter()
        .filter(|(_, color)| *color == CellColor::Atom)
        .map(|(hex, _)| *hex)
        .collect();
    assert_eq!(revealed.len(), ATOM_COUNT);
    assert!(revealed.iter().all(|hex| game.atoms().is_atom(*hex)));
}

#[test]
fn test_fire_every_entry_point() {
    let mut game = Game::new(GameConfig {
        seed: Seed::Text("every ray".into()),
        radius: 4,
    })
    .unwrap();
    let mut board = TextBoard::new(game.grid());

    // Fire everything that's still available. Exits use up entry points, so
    // this takes at most as many rays as there are entry points.
    fire_remaining(&mut game, &mut board);
    let rays = game.score_keeper().rays_shot();
    assert!(rays > 0 && rays <= game.entry_points().len());
    assert_eq!(game.encounters().len(), rays);

    // Every exit is marked on the board, and every fired cell is painted
    let exits: Vec<EntryPoint> =
        game.encounters().iter().filter_map(|e| e.exit()).collect();
    assert_eq!(board.used_exits(), exits.as_slice());
    for encounter in game.encounters() {
        assert!(board.color_at(encounter.entry().hex).is_some());
    }
}

#[test]
fn test_rejections_leave_state_alone() {
    let mut game = ring_game();
    let mut board = TextBoard::new(game.grid());
    let before = board.render();

    let not_entry = EntryPoint::new(HexPoint::ORIGIN, Direction::Deg0);
    let err = game.fire(not_entry, &mut board).unwrap_err();
    assert_eq!(
        err.downcast_ref::<BlackBoxError>(),
        Some(&BlackBoxError::NotAnEntryPoint(not_entry))
    );
    assert_eq!(board.render(), before);
    assert_eq!(game.score_keeper().rays_shot(), 0);
    assert!(game.encounters().is_empty());
}

#[test]
fn test_colors_by_kind() {
    // Tally the colors painted for a whole seeded game, and make sure they
    // line up with the encounter kinds
    let mut game = Game::new(GameConfig {
        seed: Seed::Int(31337),
        radius: 4,
    })
    .unwrap();
    let mut view = RecordingView::default();
    fire_remaining(&mut game, &mut view);

    // The view sees exactly what each encounter paints, in firing order
    let expected_paint: Vec<(HexPoint, CellColor)> = game
        .encounters()
        .iter()
        .flat_map(|encounter| encounter.painted_cells())
        .collect();
    assert_eq!(view.painted, expected_paint);

    // Each cell ends up with the color of the last ray that painted it
    let mut painted: HashMap<HexPoint, CellColor> = HashMap::new();
    for (hex, color) in &view.painted {
        painted.insert(*hex, *color);
    }
    let mut last_painter: HashMap<HexPoint, &Encounter> = HashMap::new();
    for encounter in game.encounters() {
        last_painter.insert(encounter.entry().hex, encounter);
        if let Some(exit) = encounter.exit() {
            last_painter.insert(exit.hex, encounter);
        }
    }
    assert_eq!(painted.len(), last_painter.len());
    for (hex, encounter) in &last_painter {
        assert_eq!(painted[hex], encounter.color(), "{:?}", encounter);
    }

    for encounter in game.encounters() {
        let expected = match encounter.kind() {
            EncounterKind::NoEncounter => vec![CellColor::Miss],
            EncounterKind::DirectHit => {
                vec![CellColor::Hit, CellColor::OriginCollision]
            }
            EncounterKind::Deflection => {
                vec![CellColor::Deflected, CellColor::MultiDeflected]
            }
            EncounterKind::DoubleHit { reversed: true } => {
                vec![CellColor::Reversal]
            }
            EncounterKind::DoubleHit { reversed: false } => {
                vec![CellColor::DoubleDeflected]
            }
        };
        assert!(expected.contains(&encounter.color()), "{:?}", encounter);
    }
}
