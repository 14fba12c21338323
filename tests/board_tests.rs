//! Board engine integration tests: placement, flood fill, flags, outcomes.

use std::collections::{BTreeSet, HashSet, VecDeque};

use proptest::prelude::*;
use theme_sweeper::{Board, Coord, GameRng, GameStatus};

fn labels(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{prefix} {i}")).collect()
}

fn dealt(rows: usize, cols: usize, mines: usize, seed: u64) -> Board {
    let mut board = Board::new(GameRng::new(seed));
    board
        .initialize(rows, cols, labels("related", rows * cols - mines), labels("confusing", mines))
        .unwrap();
    board
}

fn is_mine(board: &Board, coord: Coord) -> bool {
    board.cell(coord).unwrap().is_mine()
}

/// Independent flood-fill oracle: zero cells connected to `start` through
/// unflagged zero cells, plus their unflagged non-mine neighbours.
fn expected_region(board: &Board, start: Coord) -> BTreeSet<Coord> {
    let (rows, cols) = board.dims();
    let mut region = BTreeSet::new();
    let mut queue = VecDeque::from([start]);
    region.insert(start);

    while let Some(coord) = queue.pop_front() {
        if board.cell(coord).unwrap().adjacent_mines() != 0 {
            continue;
        }
        for row in coord.row.saturating_sub(1)..=(coord.row + 1).min(rows - 1) {
            for col in coord.col.saturating_sub(1)..=(coord.col + 1).min(cols - 1) {
                let next = Coord::new(row, col);
                let cell = board.cell(next).unwrap();
                if !cell.is_flagged() && !cell.is_mine() && region.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }
    region
}

fn revealed_set(board: &Board) -> BTreeSet<Coord> {
    board
        .cells()
        .filter(|(_, cell)| cell.is_revealed())
        .map(|(coord, _)| coord)
        .collect()
}

// =============================================================================
// Placement
// =============================================================================

/// 10x10 with 20 mines: mine count, adjacency sums cross-checked per mine.
#[test]
fn test_standard_board_placement() {
    let board = dealt(10, 10, 20, 2024);

    let mines: Vec<Coord> = board.cells().filter(|(_, c)| c.is_mine()).map(|(coord, _)| coord).collect();
    assert_eq!(mines.len(), 20);
    assert_eq!(board.mine_count(), 20);
    assert_eq!(board.status(), GameStatus::Playing);

    let adjacency_sum: usize = board
        .cells()
        .filter(|(_, c)| !c.is_mine())
        .map(|(_, c)| usize::from(c.adjacent_mines()))
        .sum();
    let contributions: usize = mines
        .iter()
        .map(|m| m.neighbours(10, 10).into_iter().filter(|n| !is_mine(&board, *n)).count())
        .sum();
    assert_eq!(adjacency_sum, contributions);
}

#[test]
fn test_full_board_of_mines() {
    let board = dealt(3, 3, 9, 1);
    assert!(board.cells().all(|(_, c)| c.is_mine()));
}

#[test]
fn test_single_cell_board() {
    let mut board = dealt(1, 1, 0, 1);
    assert_eq!(board.reveal(Coord::new(0, 0)), vec![Coord::new(0, 0)]);
    assert_eq!(board.status(), GameStatus::Won);
}

proptest! {
    #[test]
    fn prop_mines_distinct_and_counted(
        (rows, cols, mines) in (1usize..12, 1usize..12).prop_flat_map(|(r, c)| (Just(r), Just(c), 0..=r * c)),
        seed in any::<u64>(),
    ) {
        let board = dealt(rows, cols, mines, seed);

        let positions: HashSet<Coord> = board.mines().iter().copied().collect();
        prop_assert_eq!(positions.len(), mines);
        prop_assert_eq!(board.cells().filter(|(_, c)| c.is_mine()).count(), mines);
        for coord in &positions {
            prop_assert!(is_mine(&board, *coord));
        }
    }

    #[test]
    fn prop_adjacency_matches_neighbours(
        (rows, cols, mines) in (1usize..12, 1usize..12).prop_flat_map(|(r, c)| (Just(r), Just(c), 0..=r * c)),
        seed in any::<u64>(),
    ) {
        let board = dealt(rows, cols, mines, seed);

        for (coord, cell) in board.cells() {
            if cell.is_mine() {
                continue;
            }
            let expected = coord.neighbours(rows, cols).into_iter().filter(|n| is_mine(&board, *n)).count();
            prop_assert_eq!(usize::from(cell.adjacent_mines()), expected);
        }
    }

    #[test]
    fn prop_flood_fill_reveals_exact_region(
        seed in any::<u64>(),
        flags in proptest::collection::vec((0usize..8, 0usize..8), 0..6),
    ) {
        let mut board = dealt(8, 8, 6, seed);
        for (row, col) in flags {
            board.toggle_flag(Coord::new(row, col));
        }
        let flagged: BTreeSet<Coord> = board.cells().filter(|(_, c)| c.is_flagged()).map(|(coord, _)| coord).collect();

        let start = board
            .cells()
            .find(|(_, c)| !c.is_mine() && c.is_hidden() && c.adjacent_mines() == 0)
            .map(|(coord, _)| coord);
        prop_assume!(start.is_some());
        let start = start.unwrap();

        let expected = expected_region(&board, start);
        let revealed = board.reveal(start);

        prop_assert_eq!(revealed.iter().copied().collect::<BTreeSet<_>>(), expected.clone());
        prop_assert_eq!(revealed.len(), expected.len());
        prop_assert_eq!(revealed_set(&board), expected);
        for coord in &flagged {
            prop_assert!(board.cell(*coord).unwrap().is_flagged());
        }
    }

    #[test]
    fn prop_adjacency_fixed_for_board_lifetime(seed in any::<u64>(), moves in proptest::collection::vec((0usize..6, 0usize..6, any::<bool>()), 0..20)) {
        let mut board = dealt(6, 6, 5, seed);
        let before: Vec<u8> = board.cells().map(|(_, c)| c.adjacent_mines()).collect();

        for (row, col, flag) in moves {
            if flag {
                board.toggle_flag(Coord::new(row, col));
            } else {
                board.reveal(Coord::new(row, col));
            }
        }

        let after: Vec<u8> = board.cells().map(|(_, c)| c.adjacent_mines()).collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn prop_flag_count_bounded_and_consistent(seed in any::<u64>(), toggles in proptest::collection::vec((0usize..5, 0usize..5), 0..40)) {
        let mut board = dealt(5, 5, 4, seed);
        for (row, col) in toggles {
            board.toggle_flag(Coord::new(row, col));
            let flagged = board.cells().filter(|(_, c)| c.is_flagged()).count();
            prop_assert_eq!(board.flag_count(), flagged);
            prop_assert!(board.flag_count() <= board.mine_count());
        }
    }

    #[test]
    fn prop_flag_count_matches_flagged_cells_through_play(
        seed in any::<u64>(),
        moves in proptest::collection::vec((0usize..5, 0usize..5, any::<bool>()), 0..40),
    ) {
        let mut board = dealt(5, 5, 4, seed);
        for (row, col, reveal) in moves {
            let coord = Coord::new(row, col);
            if reveal {
                board.reveal(coord);
            } else {
                board.toggle_flag(coord);
            }
            let flagged = board.cells().filter(|(_, c)| c.is_flagged()).count();
            prop_assert_eq!(board.flag_count(), flagged);
        }
    }

    #[test]
    fn prop_status_tracks_outcome(seed in any::<u64>(), order in Just((0..49).collect::<Vec<usize>>()).prop_shuffle()) {
        let mut board = dealt(7, 7, 8, seed);

        for index in order {
            if board.is_terminal() {
                break;
            }
            let coord = Coord::from_index(index, 7);
            let hit_mine = is_mine(&board, coord);
            board.reveal(coord);

            let all_safe = board.cells().all(|(_, c)| c.is_mine() || c.is_revealed());
            if hit_mine {
                prop_assert_eq!(board.status(), GameStatus::Lost);
            } else if all_safe {
                prop_assert_eq!(board.status(), GameStatus::Won);
            } else {
                prop_assert_eq!(board.status(), GameStatus::Playing);
            }
        }
    }
}

// =============================================================================
// Flood Fill
// =============================================================================

/// Revealing a zero corner cascades over the zero region and its numbered
/// border and leaves everything else hidden.
#[test]
fn test_corner_cascade() {
    let mut board = (0..200)
        .map(|seed| dealt(10, 10, 20, seed))
        .find(|b| {
            let corner = b.cell(Coord::new(0, 0)).unwrap();
            !corner.is_mine() && corner.adjacent_mines() == 0
        })
        .expect("some seed leaves the corner clear");

    let expected = expected_region(&board, Coord::new(0, 0));
    let revealed = board.reveal(Coord::new(0, 0));

    assert_eq!(revealed[0], Coord::new(0, 0));
    assert_eq!(revealed.iter().copied().collect::<BTreeSet<_>>(), expected);
    assert_eq!(revealed_set(&board), expected);
    assert!(expected.len() >= 4);
    for (coord, cell) in board.cells() {
        if !expected.contains(&coord) {
            assert!(cell.is_hidden(), "{coord} should stay hidden");
        }
    }
}

#[test]
fn test_numbered_cell_reveals_only_itself() {
    let mut board = dealt(10, 10, 20, 11);
    let numbered = board
        .cells()
        .find(|(_, c)| !c.is_mine() && c.adjacent_mines() > 0)
        .map(|(coord, _)| coord)
        .unwrap();

    assert_eq!(board.reveal(numbered), vec![numbered]);
    assert_eq!(revealed_set(&board).len(), 1);
}

#[test]
fn test_revealing_twice_is_noop() {
    let mut board = dealt(10, 10, 20, 12);
    let safe = board.cells().find(|(_, c)| !c.is_mine()).map(|(coord, _)| coord).unwrap();

    board.reveal(safe);
    let before = revealed_set(&board);
    assert!(board.reveal(safe).is_empty());
    assert_eq!(revealed_set(&board), before);
}

// =============================================================================
// Flags
// =============================================================================

/// Flag budget: `mine_count` flags succeed, the next is refused.
#[test]
fn test_flag_budget() {
    let mut board = dealt(10, 10, 20, 13);
    let hidden: Vec<Coord> = board.cells().map(|(coord, _)| coord).collect();

    for coord in &hidden[..20] {
        assert!(board.toggle_flag(*coord));
    }
    assert_eq!(board.flag_count(), 20);
    assert_eq!(board.remaining_flags(), 0);

    assert!(!board.toggle_flag(hidden[20]));
    assert!(!board.cell(hidden[20]).unwrap().is_flagged());
    assert_eq!(board.flag_count(), 20);

    // Unflagging frees budget again
    assert!(board.toggle_flag(hidden[0]));
    assert!(board.toggle_flag(hidden[20]));
    assert_eq!(board.flag_count(), 20);
}

#[test]
fn test_double_toggle_restores_state() {
    let mut board = dealt(10, 10, 20, 14);
    let coord = Coord::new(4, 4);

    assert!(board.toggle_flag(coord));
    assert!(board.toggle_flag(coord));

    assert_eq!(board.flag_count(), 0);
    assert!(board.cell(coord).unwrap().is_hidden());
}

#[test]
fn test_flagged_cell_cannot_be_revealed() {
    let mut board = dealt(10, 10, 20, 15);
    let mine = board.mines()[0];

    board.toggle_flag(mine);
    assert!(board.reveal(mine).is_empty());
    assert_eq!(board.status(), GameStatus::Playing);
}

#[test]
fn test_revealed_cell_cannot_be_flagged() {
    let mut board = dealt(10, 10, 20, 16);
    let safe = board.cells().find(|(_, c)| !c.is_mine()).map(|(coord, _)| coord).unwrap();

    board.reveal(safe);
    assert!(!board.toggle_flag(safe));
    assert_eq!(board.flag_count(), 0);
}

// =============================================================================
// Outcomes
// =============================================================================

#[test]
fn test_mine_loses_and_reveals_all_mines() {
    let mut board = dealt(10, 10, 20, 17);
    let safe = board.cells().find(|(_, c)| !c.is_mine() && c.adjacent_mines() > 0).map(|(coord, _)| coord).unwrap();
    board.reveal(safe);
    let mine = board.mines()[3];

    let revealed = board.reveal(mine);

    assert_eq!(board.status(), GameStatus::Lost);
    assert_eq!(revealed.len(), 20);
    for (_, cell) in board.cells() {
        if cell.is_mine() {
            assert!(cell.is_revealed());
        }
    }
    // Non-mines keep their prior state
    assert_eq!(board.cells().filter(|(_, c)| !c.is_mine() && c.is_revealed()).count(), 1);
}

#[test]
fn test_loss_keeps_flag_count_in_step_with_flagged_cells() {
    let mut board = dealt(10, 10, 20, 17);
    let flagged_mine = board.mines()[0];
    let flagged_safe = board.cells().find(|(_, c)| !c.is_mine()).map(|(coord, _)| coord).unwrap();
    assert!(board.toggle_flag(flagged_mine));
    assert!(board.toggle_flag(flagged_safe));

    let revealed = board.reveal(board.mines()[1]);

    assert_eq!(board.status(), GameStatus::Lost);
    assert_eq!(revealed.len(), 20);
    assert!(board.cell(flagged_mine).unwrap().is_revealed());
    assert!(board.cell(flagged_safe).unwrap().is_flagged());
    let flagged = board.cells().filter(|(_, c)| c.is_flagged()).count();
    assert_eq!(flagged, 1);
    assert_eq!(board.flag_count(), flagged);
    assert_eq!(board.snapshot().flag_count, flagged);
}

#[test]
fn test_terminal_board_is_frozen() {
    let mut board = dealt(10, 10, 20, 18);
    board.reveal(board.mines()[0]);
    assert_eq!(board.status(), GameStatus::Lost);

    let snapshot = board.snapshot();
    let safe = board.cells().find(|(_, c)| !c.is_mine()).map(|(coord, _)| coord).unwrap();

    assert!(board.reveal(safe).is_empty());
    assert!(!board.toggle_flag(safe));
    assert_eq!(board.status(), GameStatus::Lost);
    assert_eq!(
        serde_json::to_value(board.snapshot()).unwrap(),
        serde_json::to_value(&snapshot).unwrap()
    );
}

#[test]
fn test_revealing_every_safe_cell_wins() {
    let mut board = dealt(10, 10, 20, 19);
    let safe: Vec<Coord> = board.cells().filter(|(_, c)| !c.is_mine()).map(|(coord, _)| coord).collect();

    for coord in safe {
        board.reveal(coord);
    }

    assert_eq!(board.status(), GameStatus::Won);
    assert!(board.cells().filter(|(_, c)| c.is_mine()).all(|(_, c)| !c.is_revealed()));
}

#[test]
fn test_restored_rng_state_replays_reset() {
    let mut board = dealt(10, 10, 20, 23);
    let replay_point = board.rng_state();

    board.reset();
    let first_mines = board.mines().to_vec();
    let first_labels: Vec<String> = board.cells().map(|(_, c)| c.label().to_string()).collect();
    board.reveal(first_mines[0]);

    board.restore_rng_state(&replay_point);
    board.reset();

    assert_eq!(board.status(), GameStatus::Playing);
    assert_eq!(board.mines(), first_mines.as_slice());
    let labels: Vec<String> = board.cells().map(|(_, c)| c.label().to_string()).collect();
    assert_eq!(labels, first_labels);
}

#[test]
fn test_reset_after_loss_starts_new_game() {
    let mut board = dealt(10, 10, 20, 20);
    board.reveal(board.mines()[0]);
    assert_eq!(board.status(), GameStatus::Lost);

    board.reset();

    assert_eq!(board.status(), GameStatus::Playing);
    assert_eq!(board.mine_count(), 20);
    assert!(board.cells().all(|(_, c)| c.is_hidden()));
}

// =============================================================================
// Snapshot
// =============================================================================

#[test]
fn test_snapshot_hides_unrevealed_mines() {
    let mut board = dealt(10, 10, 20, 21);
    let before = board.snapshot();

    assert!(before.cells().all(|v| v.is_mine.is_none()));

    let mine = board.mines()[0];
    board.reveal(mine);
    let after = board.snapshot();

    assert_eq!(after.get(mine).unwrap().is_mine, Some(true));
    // Earlier snapshot is unaffected by later moves
    assert_eq!(before.get(mine).unwrap().is_mine, None);
    assert_eq!(after.status, GameStatus::Lost);
}

#[test]
fn test_snapshot_serializes_grid() {
    let board = dealt(3, 4, 2, 22);
    let json = serde_json::to_value(board.snapshot()).unwrap();

    assert_eq!(json["rows"], 3);
    assert_eq!(json["cols"], 4);
    assert_eq!(json["status"], "Playing");
    assert_eq!(json["mine_count"], 2);
    assert_eq!(json["grid"].as_array().unwrap().len(), 3);
    assert_eq!(json["grid"][0].as_array().unwrap().len(), 4);
    assert!(json["grid"][0][0]["is_mine"].is_null());
}
