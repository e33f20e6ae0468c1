//! The arena world: one scripted hero and a pack of monsters on a 5×5 grid.

use anyhow::{Result, ensure};
use tracing::{debug, trace, warn};

use tw_core::{Cell, EngineConfig, Shuffle, SimRng, SpeedTier, Tick};
use tw_movement::{GridPositions, Move, MovementResolver, PositionStore};
use tw_schedule::{Scheduler, Speed, SpeedBased};
use tw_turn::{ActionOutcome, TurnWorld};

pub const SIZE: i32 = 5;
pub const HERO: u32 = 0;

const TIERS: [SpeedTier; 3] = [SpeedTier::Slow, SpeedTier::Normal, SpeedTier::Fast];

// ── Commands ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Wait,
    Step { dx: i32, dy: i32 },
}

// ── Monsters ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Monster {
    pub id:   u32,
    pub tier: SpeedTier,
}

impl Speed for Monster {
    fn speed(&self) -> f64 {
        self.tier.relative_speed()
    }
}

/// Movement policy: close in on the hero.  A second choice never steps away.
fn chase(store: &GridPositions<u32>, agent: &u32, excluded: Option<Cell>) -> Option<Cell> {
    let here = store.cell_of(agent)?;
    let goal = store.cell_of(&HERO)?;
    let dist = here.manhattan(goal);
    here.neighbours4()
        .filter(|&c| c.within(SIZE, SIZE))
        .filter(|&c| match excluded {
            None        => c.manhattan(goal) < dist,
            Some(avoid) => c != avoid && c.manhattan(goal) <= dist && !store.is_occupied(c),
        })
        .min_by_key(|&c| (c.manhattan(goal), c.y, c.x))
}

// ── Arena ─────────────────────────────────────────────────────────────────────

pub struct Arena {
    positions: GridPositions<u32>,
    monsters:  Vec<Monster>,
    hero_tier: SpeedTier,
    /// Monster turn order.  Scheduler time unit = one tick.
    turns:     Scheduler<Monster, SpeedBased>,
    /// Popped from `turns` but due in a later tick.
    carry:     Option<Monster>,
    resolver:  MovementResolver,
    rng:       SimRng,
    moves:     u64,
}

impl Arena {
    pub fn new(config: &EngineConfig, monsters: usize, hero_tier: SpeedTier) -> Result<Self> {
        let mut rng = SimRng::new(config.seed);
        let mut placement = rng.child(1);

        let hero_at = Cell::new(SIZE / 2, SIZE / 2);
        let mut free: Vec<Cell> = (0..SIZE)
            .flat_map(|y| (0..SIZE).map(move |x| Cell::new(x, y)))
            .filter(|&c| c != hero_at)
            .collect();
        ensure!(
            monsters <= free.len(),
            "at most {} monsters fit in a {SIZE}×{SIZE} arena",
            free.len()
        );
        placement.shuffle(&mut free);

        let mut positions = GridPositions::new();
        positions.place(HERO, hero_at)?;

        let mut turns = Scheduler::new(SpeedBased);
        let mut pack = Vec::with_capacity(monsters);
        for (i, cell) in free.into_iter().take(monsters).enumerate() {
            let monster = Monster { id: i as u32 + 1, tier: TIERS[i % TIERS.len()] };
            positions.place(monster.id, cell)?;
            // Everyone gets a turn at tick 0.
            turns.add(monster, true, Some(0.0))?;
            pack.push(monster);
        }

        Ok(Self {
            positions,
            monsters: pack,
            hero_tier,
            turns,
            carry: None,
            resolver: MovementResolver::from_config(config),
            rng,
            moves: 0,
        })
    }

    pub fn hero_cell(&self) -> Option<Cell> {
        self.positions.cell_of(&HERO)
    }

    pub fn monster_moves(&self) -> u64 {
        self.moves
    }

    /// Monsters standing next to the hero.
    pub fn adjacent_monsters(&self) -> usize {
        let Some(hero) = self.hero_cell() else { return 0 };
        self.monsters
            .iter()
            .filter_map(|m| self.positions.cell_of(&m.id))
            .filter(|c| c.manhattan(hero) == 1)
            .count()
    }

    /// Every monster turn that falls inside `tick`, in scheduler order.  A
    /// fast monster can appear more than once.
    fn due(&mut self, tick: Tick) -> Vec<Monster> {
        let horizon = tick.next().0 as f64;
        let mut due = Vec::new();
        loop {
            if self.carry.is_none() {
                match self.turns.advance() {
                    Ok(next) => self.carry = next,
                    Err(e) => {
                        warn!(error = %e, "monster turn order stalled");
                        break;
                    }
                }
            }
            match self.carry {
                Some(monster) if self.turns.time() < horizon => {
                    due.push(monster);
                    self.carry = None;
                }
                _ => break,
            }
        }
        due
    }

    /// ASCII board: `@` hero, digits monsters, `.` empty.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(((SIZE + 1) * SIZE) as usize);
        for y in 0..SIZE {
            for x in 0..SIZE {
                let glyph = match self.positions.occupant(Cell::new(x, y)) {
                    None           => '.',
                    Some(&HERO)    => '@',
                    Some(&id)      => char::from_digit(id % 10, 10).unwrap_or('?'),
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}

impl TurnWorld for Arena {
    type Action = Command;

    fn controlled_eligible(&self, tick: Tick) -> bool {
        self.hero_tier.acts_on(tick)
    }

    fn execute(&mut self, action: Command, tick: Tick) -> ActionOutcome {
        let Command::Step { dx, dy } = action else {
            return ActionOutcome::Accepted;
        };
        let Some(here) = self.hero_cell() else {
            return ActionOutcome::Rejected;
        };
        let to = here.offset(dx, dy);
        if !to.within(SIZE, SIZE) {
            debug!(%tick, %to, "hero bumped into the wall");
            return ActionOutcome::Rejected;
        }
        match self.positions.relocate(&HERO, to) {
            Ok(_) => ActionOutcome::Accepted,
            Err(e) => {
                debug!(%tick, error = %e, "hero blocked");
                ActionOutcome::Rejected
            }
        }
    }

    fn run_uncontrolled(&mut self, tick: Tick) {
        // A monster due twice this tick moves in two successive rounds.
        let mut rounds: Vec<Vec<u32>> = Vec::new();
        for monster in self.due(tick) {
            match rounds.iter_mut().find(|r| !r.contains(&monster.id)) {
                Some(round) => round.push(monster.id),
                None        => rounds.push(vec![monster.id]),
            }
        }

        for (round, movers) in rounds.iter().enumerate() {
            let moved = self
                .resolver
                .resolve(&mut self.positions, movers, chase, &mut self.rng);
            for Move { agent, from, to } in &moved {
                trace!(%tick, round, agent, %from, %to, "monster moved");
            }
            self.moves += moved.len() as u64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena(monsters: usize) -> Arena {
        Arena::new(&EngineConfig::default(), monsters, SpeedTier::Normal).unwrap()
    }

    #[test]
    fn too_many_monsters_is_an_error() {
        assert!(Arena::new(&EngineConfig::default(), 25, SpeedTier::Normal).is_err());
        assert!(Arena::new(&EngineConfig::default(), 24, SpeedTier::Normal).is_ok());
    }

    #[test]
    fn fast_monsters_are_due_twice_per_tick() {
        let mut a = arena(3);
        // Tick 0: everyone at t=0, the fast one again at t=0.5.
        let due: Vec<u32> = a.due(Tick(0)).iter().map(|m| m.id).collect();
        assert_eq!(due.iter().filter(|&&id| id == 3).count(), 2);
        assert_eq!(due.iter().filter(|&&id| id == 1).count(), 1);
        // Tick 1: slow monster (speed 0.5) rests.
        let due: Vec<u32> = a.due(Tick(1)).iter().map(|m| m.id).collect();
        assert!(!due.contains(&1));
        assert!(due.contains(&2));
        // Tick 2: slow monster is back.
        let due: Vec<u32> = a.due(Tick(2)).iter().map(|m| m.id).collect();
        assert!(due.contains(&1));
    }

    #[test]
    fn walls_reject_the_hero() {
        let mut a = arena(0);
        assert_eq!(a.execute(Command::Step { dx: 1, dy: 0 }, Tick(0)), ActionOutcome::Accepted);
        assert_eq!(a.execute(Command::Step { dx: 1, dy: 0 }, Tick(0)), ActionOutcome::Accepted);
        assert_eq!(a.execute(Command::Step { dx: 1, dy: 0 }, Tick(0)), ActionOutcome::Rejected);
        assert_eq!(a.hero_cell(), Some(Cell::new(4, 2)));
    }

    #[test]
    fn render_shows_everyone() {
        let a = arena(4);
        let board = a.render();
        assert_eq!(board.lines().count(), SIZE as usize);
        assert_eq!(board.matches('@').count(), 1);
        assert_eq!(board.chars().filter(|c| c.is_ascii_digit()).count(), 4);
    }
}
