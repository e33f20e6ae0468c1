//! Unit tests for tw-movement.

use std::collections::{HashMap, HashSet};

use tw_core::{Cell, EngineConfig, IdentityShuffle, SimRng};

use crate::{DeadlockBreak, GridPositions, Move, MovementError, MovementResolver, PositionStore};

// ── Helpers ───────────────────────────────────────────────────────────────────

type Grid = GridPositions<u32>;

const W: i32 = 5;
const H: i32 = 5;

fn grid(placements: &[(u32, (i32, i32))]) -> Grid {
    let mut g = Grid::new();
    for &(agent, cell) in placements {
        g.place(agent, cell.into()).unwrap();
    }
    g
}

/// Movement policy: head for `targets[agent]`.  Asked for a second choice,
/// step to the first free in-bounds orthogonal neighbour that is not the
/// excluded cell.
fn policy(
    targets: HashMap<u32, Cell>,
) -> impl FnMut(&Grid, &u32, Option<Cell>) -> Option<Cell> {
    move |store, agent, excluded| match excluded {
        None => targets.get(agent).copied(),
        Some(avoid) => {
            let here = store.cell_of(agent)?;
            here.neighbours4()
                .find(|&c| c != avoid && c.within(W, H) && !store.is_occupied(c))
        }
    }
}

fn targets(pairs: &[(u32, (i32, i32))]) -> HashMap<u32, Cell> {
    pairs.iter().map(|&(a, c)| (a, Cell::from(c))).collect()
}

fn cell(x: i32, y: i32) -> Cell {
    Cell::new(x, y)
}

fn distinct_cells(g: &Grid) -> bool {
    let cells: HashSet<Cell> = g.iter().map(|(_, c)| c).collect();
    cells.len() == g.len()
}

// ── GridPositions ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod grid_positions {
    use super::*;

    #[test]
    fn place_and_lookup() {
        let g = grid(&[(1, (0, 0)), (2, (3, 4))]);
        assert_eq!(g.cell_of(&1), Some(cell(0, 0)));
        assert_eq!(g.occupant(cell(3, 4)), Some(&2));
        assert!(g.is_occupied(cell(0, 0)));
        assert!(!g.is_occupied(cell(1, 1)));
        assert_eq!(g.len(), 2);
        assert!(g.is_consistent());
    }

    #[test]
    fn place_into_occupied_cell_errors() {
        let mut g = grid(&[(1, (0, 0))]);
        assert_eq!(g.place(2, cell(0, 0)), Err(MovementError::Occupied(cell(0, 0))));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn place_twice_errors() {
        let mut g = grid(&[(1, (0, 0))]);
        assert_eq!(g.place(1, cell(2, 2)), Err(MovementError::AlreadyPlaced(cell(0, 0))));
        assert!(!g.is_occupied(cell(2, 2)));
    }

    #[test]
    fn relocate_updates_both_directions() {
        let mut g = grid(&[(1, (0, 0))]);
        assert_eq!(g.relocate(&1, cell(1, 0)), Ok(cell(0, 0)));
        assert_eq!(g.cell_of(&1), Some(cell(1, 0)));
        assert!(!g.is_occupied(cell(0, 0)));
        assert!(g.is_consistent());
    }

    #[test]
    fn relocate_into_occupied_cell_leaves_store_unchanged() {
        let mut g = grid(&[(1, (0, 0)), (2, (1, 0))]);
        assert_eq!(g.relocate(&1, cell(1, 0)), Err(MovementError::Occupied(cell(1, 0))));
        assert_eq!(g.cell_of(&1), Some(cell(0, 0)));
        assert_eq!(g.occupant(cell(1, 0)), Some(&2));
    }

    #[test]
    fn relocate_to_own_cell_is_noop() {
        let mut g = grid(&[(1, (2, 2))]);
        assert_eq!(g.relocate(&1, cell(2, 2)), Ok(cell(2, 2)));
        assert!(g.is_consistent());
    }

    #[test]
    fn relocate_unknown_agent_errors() {
        let mut g = grid(&[]);
        assert_eq!(g.relocate(&7, cell(0, 0)), Err(MovementError::UnknownAgent));
    }

    #[test]
    fn remove_frees_cell() {
        let mut g = grid(&[(1, (0, 0))]);
        assert_eq!(g.remove(&1), Some(cell(0, 0)));
        assert_eq!(g.remove(&1), None);
        assert!(g.is_empty());
        assert!(!g.is_occupied(cell(0, 0)));
    }
}

// ── MovementResolver ──────────────────────────────────────────────────────────

#[cfg(test)]
mod resolver {
    use super::*;

    #[test]
    fn free_uncontested_destination_always_moves() {
        for seed in 0..16 {
            let mut g = grid(&[(1, (0, 0)), (2, (4, 4))]);
            let moves = MovementResolver::default().resolve(
                &mut g,
                &[1, 2],
                policy(targets(&[(1, (0, 1)), (2, (3, 4))])),
                &mut SimRng::new(seed),
            );
            assert_eq!(moves.len(), 2);
            assert_eq!(g.cell_of(&1), Some(cell(0, 1)));
            assert_eq!(g.cell_of(&2), Some(cell(3, 4)));
        }
    }

    #[test]
    fn chain_resolves_in_one_tick() {
        // A → B's cell, B → C's cell, C → empty.
        for seed in 0..16 {
            let mut g = grid(&[(1, (0, 0)), (2, (1, 0)), (3, (2, 0))]);
            let moves = MovementResolver::default().resolve(
                &mut g,
                &[1, 2, 3],
                policy(targets(&[(1, (1, 0)), (2, (2, 0)), (3, (3, 0))])),
                &mut SimRng::new(seed),
            );
            assert_eq!(moves.len(), 3, "seed {seed}");
            assert_eq!(g.cell_of(&1), Some(cell(1, 0)));
            assert_eq!(g.cell_of(&2), Some(cell(2, 0)));
            assert_eq!(g.cell_of(&3), Some(cell(3, 0)));
        }
    }

    #[test]
    fn chain_commit_order_follows_vacated_cells() {
        let mut g = grid(&[(1, (0, 0)), (2, (1, 0)), (3, (2, 0))]);
        let moves = MovementResolver::default().resolve(
            &mut g,
            &[1, 2, 3],
            policy(targets(&[(1, (1, 0)), (2, (2, 0)), (3, (3, 0))])),
            &mut IdentityShuffle,
        );
        let order: Vec<u32> = moves.iter().map(|m| m.agent).collect();
        assert_eq!(order, vec![3, 2, 1]);
    }

    #[test]
    fn two_cycle_never_both_stay_never_collide() {
        for seed in 0..32 {
            let mut g = grid(&[(1, (1, 1)), (2, (2, 1))]);
            let moves = MovementResolver::default().resolve(
                &mut g,
                &[1, 2],
                policy(targets(&[(1, (2, 1)), (2, (1, 1))])),
                &mut SimRng::new(seed),
            );
            assert_eq!(moves.len(), 1, "seed {seed}");
            assert_ne!(g.cell_of(&1), g.cell_of(&2));
            assert!(g.is_consistent());
        }
    }

    #[test]
    fn stay_put_leaves_cycle_blocked() {
        let mut g = grid(&[(1, (1, 1)), (2, (2, 1))]);
        let moves = MovementResolver::new(DeadlockBreak::StayPut).resolve(
            &mut g,
            &[1, 2],
            policy(targets(&[(1, (2, 1)), (2, (1, 1))])),
            &mut IdentityShuffle,
        );
        assert!(moves.is_empty());
        assert_eq!(g.cell_of(&1), Some(cell(1, 1)));
        assert_eq!(g.cell_of(&2), Some(cell(2, 1)));
    }

    #[test]
    fn deadlock_break_is_one_shot() {
        // Two independent 2-cycles.  Only the first blocked agent gets a
        // second choice; its partner's target frees up but nobody re-scans.
        let mut g = grid(&[(1, (0, 0)), (2, (1, 0)), (3, (3, 3)), (4, (4, 3))]);
        let moves = MovementResolver::default().resolve(
            &mut g,
            &[1, 2, 3, 4],
            policy(targets(&[(1, (1, 0)), (2, (0, 0)), (3, (4, 3)), (4, (3, 3))])),
            &mut IdentityShuffle,
        );
        assert_eq!(moves, vec![Move { agent: 1, from: cell(0, 0), to: cell(0, 1) }]);
        assert_eq!(g.cell_of(&2), Some(cell(1, 0)));
        assert_eq!(g.cell_of(&3), Some(cell(3, 3)));
        assert_eq!(g.cell_of(&4), Some(cell(4, 3)));
    }

    #[test]
    fn contested_free_cell_goes_to_one_agent() {
        let mut g = grid(&[(1, (0, 1)), (2, (2, 1))]);
        let moves = MovementResolver::default().resolve(
            &mut g,
            &[1, 2],
            policy(targets(&[(1, (1, 1)), (2, (1, 1))])),
            &mut IdentityShuffle,
        );
        assert_eq!(g.occupant(cell(1, 1)), Some(&1));
        // The loser is the first blocked agent, so it gets its second choice.
        assert_eq!(g.cell_of(&2), Some(cell(2, 0)));
        assert_eq!(moves.len(), 2);

        for seed in 0..16 {
            let mut g = grid(&[(1, (0, 1)), (2, (2, 1))]);
            MovementResolver::default().resolve(
                &mut g,
                &[1, 2],
                policy(targets(&[(1, (1, 1)), (2, (1, 1))])),
                &mut SimRng::new(seed),
            );
            assert!(matches!(g.occupant(cell(1, 1)), Some(&1) | Some(&2)));
            assert!(distinct_cells(&g));
        }
    }

    #[test]
    fn three_agents_converging_on_the_middle_cell() {
        // (0,0), (1,0), (2,0) on an empty 5×5 grid all ask for (1,0), which
        // the middle agent already holds.
        let initial: HashSet<Cell> = [cell(0, 0), cell(1, 0), cell(2, 0)].into();
        for seed in 0..32 {
            let mut g = grid(&[(1, (0, 0)), (2, (1, 0)), (3, (2, 0))]);
            let moves = MovementResolver::default().resolve(
                &mut g,
                &[1, 2, 3],
                policy(targets(&[(1, (1, 0)), (2, (1, 0)), (3, (1, 0))])),
                &mut SimRng::new(seed),
            );
            assert_eq!(g.len(), 3);
            assert!(distinct_cells(&g), "seed {seed}");
            assert!(g.is_consistent());
            for m in &moves {
                assert!(!initial.contains(&m.to), "seed {seed}: moved into {}", m.to);
            }
        }
    }

    #[test]
    fn unplaced_agents_and_empty_proposals_are_skipped() {
        let mut g = grid(&[(1, (0, 0)), (2, (1, 1))]);
        let mut asked = Vec::new();
        let moves = MovementResolver::default().resolve(
            &mut g,
            &[1, 2, 99],
            |_: &Grid, agent: &u32, _| {
                asked.push(*agent);
                None
            },
            &mut IdentityShuffle,
        );
        assert!(moves.is_empty());
        assert_eq!(asked, vec![1, 2]);
    }

    #[test]
    fn second_choice_only_asked_when_deadlocked() {
        let mut g = grid(&[(1, (0, 0))]);
        let mut exclusions = Vec::new();
        MovementResolver::default().resolve(
            &mut g,
            &[1],
            |_: &Grid, _: &u32, excluded| {
                exclusions.push(excluded);
                Some(cell(0, 1))
            },
            &mut IdentityShuffle,
        );
        assert_eq!(exclusions, vec![None]);
    }

    #[test]
    fn from_config_picks_variant() {
        let off = EngineConfig { deadlock_break_enabled: false, ..EngineConfig::default() };
        assert_eq!(MovementResolver::from_config(&off).deadlock_break, DeadlockBreak::StayPut);
        assert_eq!(
            MovementResolver::from_config(&EngineConfig::default()).deadlock_break,
            DeadlockBreak::FirstFitThenGiveUp,
        );
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    fn all_cells() -> Vec<(i32, i32)> {
        (0..W).flat_map(|x| (0..H).map(move |y| (x, y))).collect()
    }

    proptest! {
        #[test]
        fn resolution_preserves_injectivity(
            starts    in prop::sample::subsequence(all_cells(), 1..=12),
            proposals in prop::collection::vec(prop::option::of((0..W, 0..H)), 12),
            seed      in any::<u64>(),
        ) {
            let placements: Vec<(u32, (i32, i32))> =
                starts.iter().enumerate().map(|(i, &c)| (i as u32, c)).collect();
            let wanted: Vec<(u32, (i32, i32))> = placements
                .iter()
                .zip(&proposals)
                .filter_map(|(&(a, _), p)| p.map(|c| (a, c)))
                .collect();
            let agents: Vec<u32> = placements.iter().map(|&(a, _)| a).collect();
            let initial: HashSet<Cell> = starts.iter().map(|&c| Cell::from(c)).collect();

            let mut g = grid(&placements);
            MovementResolver::default().resolve(
                &mut g,
                &agents,
                policy(targets(&wanted)),
                &mut SimRng::new(seed),
            );

            prop_assert!(g.is_consistent());
            prop_assert_eq!(g.len(), agents.len());
            prop_assert!(distinct_cells(&g));

            // A free destination nobody else wants is always reached.
            for &(agent, dest) in &wanted {
                let dest = Cell::from(dest);
                let contested = wanted.iter().filter(|&&(_, d)| Cell::from(d) == dest).count() > 1;
                if !contested && !initial.contains(&dest) {
                    prop_assert_eq!(g.cell_of(&agent), Some(dest));
                }
            }
        }
    }
}
