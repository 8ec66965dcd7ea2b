//! Property tests for board generation, chain detection and swap checks.
//!
//! Boards come either from the generator (seeded) or from arbitrary
//! layouts that may contain chains, empty cells and busy tiles.

use proptest::prelude::*;

use match3_engine::board::{Board, BoardGenerator};
use match3_engine::bonus::BonusPolicy;
use match3_engine::chains::{max_run_length, ChainFinder, Orientation};
use match3_engine::core::{EngineConfig, GameRng, Position};
use match3_engine::engine::{CascadeEngine, ImmediatePresenter, Phase};
use match3_engine::swaps::SwapOracle;

const SIDE: usize = 6;

/// Arbitrary 6x6 layout; roughly one cell in ten is empty.
fn layout() -> impl Strategy<Value = Vec<String>> {
    let cell = prop::sample::select(vec!['R', 'G', 'B', 'V', 'K', 'R', 'G', 'B', 'V', '.']);
    prop::collection::vec(cell, SIDE * SIDE).prop_map(|cells| {
        cells
            .chunks(SIDE)
            .map(|row| row.iter().collect::<String>())
            .collect()
    })
}

fn board_from(rows: &[String]) -> Board {
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    Board::parse(&rows).unwrap()
}

/// Mark a few tiles busy, chosen by index.
fn with_busy(mut board: Board, busy: &[usize]) -> Board {
    for &index in busy {
        let at = Position::new(index % SIDE, index / SIDE);
        if let Some(tile) = board.get(at) {
            board.mark_busy(tile.id);
        }
    }
    board
}

fn neighbours(at: Position) -> impl Iterator<Item = Position> {
    [at.offset(1, 0), at.offset(0, 1)].into_iter().flatten()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Test that generated boards are full and chain-free.
    #[test]
    fn test_generated_boards_have_no_chains(
        seed in any::<u64>(),
        width in 3usize..10,
        height in 3usize..10,
        palette in 3usize..=5,
        match_length in 3usize..=4,
    ) {
        let config = EngineConfig::default()
            .with_size(width, height)
            .with_palette(palette)
            .with_match_length(match_length)
            .with_bonus_lengths(match_length + 1, match_length + 2);
        prop_assert!(config.validate().is_ok());

        let board = BoardGenerator::new(&config).generate(&mut GameRng::new(seed));
        prop_assert!(board.is_full());
        prop_assert!(ChainFinder::new(match_length).find(&board).is_empty());
        for at in board.positions() {
            prop_assert!(max_run_length(&board, at) < match_length);
        }
    }

    /// Test that every chain is long enough, uniform and straight.
    #[test]
    fn test_chain_soundness(rows in layout(), busy in prop::collection::vec(0..SIDE * SIDE, 0..4)) {
        let board = with_busy(board_from(&rows), &busy);

        for chain in ChainFinder::new(3).find(&board) {
            prop_assert!(chain.len() >= 3);
            let tiles = chain.tiles();
            prop_assert!(tiles.iter().all(|t| t.tile_type == chain.tile_type()));
            prop_assert!(tiles.iter().all(|t| board.usable(t.position()) == Some(*t)));

            match chain.orientation() {
                Orientation::Horizontal => {
                    let contiguous = tiles.windows(2).all(|w| {
                        w[0].position().row == w[1].position().row
                            && w[0].position().col + 1 == w[1].position().col
                    });
                    prop_assert!(contiguous);
                    prop_assert!(chain.intersection_tile().is_none());
                }
                Orientation::Vertical => {
                    let contiguous = tiles.windows(2).all(|w| {
                        w[0].position().col == w[1].position().col
                            && w[0].position().row + 1 == w[1].position().row
                    });
                    prop_assert!(contiguous);
                    prop_assert!(chain.intersection_tile().is_none());
                }
                Orientation::Intersection => {
                    let shared = chain.intersection_tile();
                    prop_assert!(shared.is_some());
                    let shared = shared.unwrap().position();
                    prop_assert!(chain.len() >= 5);
                    let on_cross = tiles.iter().all(|t| {
                        t.position().row == shared.row || t.position().col == shared.col
                    });
                    prop_assert!(on_cross);
                    let in_row = tiles.iter().filter(|t| t.position().row == shared.row).count();
                    let in_col = tiles.iter().filter(|t| t.position().col == shared.col).count();
                    prop_assert!(in_row >= 3 && in_col >= 3);
                    prop_assert_eq!(in_row + in_col, chain.len() + 1);
                }
            }
        }
    }

    /// Test that swap validity ignores argument order.
    #[test]
    fn test_swap_symmetry(rows in layout(), index in 0..SIDE * SIDE) {
        let mut board = board_from(&rows);
        let oracle = SwapOracle::new(3);
        let a = Position::new(index % SIDE, index / SIDE);

        let targets: Vec<_> = neighbours(a).filter(|b| board.in_bounds(*b)).collect();
        for b in targets {
            let forward = oracle.is_valid_swap(&mut board, a, b);
            let backward = oracle.is_valid_swap(&mut board, b, a);
            prop_assert_eq!(forward, backward);
        }
    }

    /// Test that the hint list and the single-swap check agree, and that
    /// checking leaves the board untouched.
    #[test]
    fn test_oracle_agreement(rows in layout(), busy in prop::collection::vec(0..SIDE * SIDE, 0..3)) {
        let mut board = with_busy(board_from(&rows), &busy);
        let before = board.clone();
        let oracle = SwapOracle::new(3);
        let hints = oracle.find_available_swaps(&mut board);
        prop_assert_eq!(&board, &before);

        for a in board.positions().collect::<Vec<_>>() {
            for b in neighbours(a).filter(|b| board.in_bounds(*b)).collect::<Vec<_>>() {
                let valid = oracle.is_valid_swap(&mut board, a, b);
                let hinted = hints.iter().any(|h| h.same_cells(a, b));
                prop_assert_eq!(valid, hinted);

                if valid {
                    let mut swapped = board.clone();
                    swapped.swap_positions(a, b);
                    let chains = ChainFinder::new(3).find(&swapped);
                    prop_assert!(chains.iter().any(|c| c.contains(a) || c.contains(b)));
                }
            }
        }
        prop_assert_eq!(&board, &before);
        prop_assert!(hints.iter().all(|h| h.legal));
    }

    /// Test that bonuses always land on one of the chain's cells.
    #[test]
    fn test_bonus_position_inside_chain(rows in layout(), seed in any::<u64>()) {
        let board = board_from(&rows);
        let policy = BonusPolicy::default();
        let mut rng = GameRng::new(seed);

        for chain in ChainFinder::new(3).find(&board) {
            match policy.decide(&chain, &mut rng) {
                Some(bonus) => {
                    prop_assert!(chain.len() >= 4 || chain.orientation() == Orientation::Intersection);
                    prop_assert!(chain.contains(bonus.position));
                    prop_assert_eq!(bonus.tile_type, chain.tile_type());
                }
                None => prop_assert_eq!(chain.len(), 3),
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Test that hinted swaps always run to a stable, full board.
    #[test]
    fn test_cascade_settles(seed in any::<u64>(), picks in prop::collection::vec(any::<prop::sample::Index>(), 1..4)) {
        let mut engine = CascadeEngine::new(EngineConfig::default().with_seed(seed)).unwrap();
        let mut presenter = ImmediatePresenter::new();
        engine.pump(&mut presenter);

        for pick in picks {
            let hints = engine.available_swaps();
            if hints.is_empty() {
                break;
            }
            let (a, b) = hints[pick.index(hints.len())].cells();
            engine.request_swap(a, b);
            engine.pump(&mut presenter);

            prop_assert_eq!(engine.state().phase, Phase::Idle);
            prop_assert!(engine.board().is_full());
            prop_assert!(!engine.is_field_animating());
            prop_assert!(ChainFinder::new(3).find(engine.board()).is_empty());
        }
    }
}
