//! The cascade state machine.
//!
//! The engine owns the board and advances only on animation completions.
//! Every phase follows the same pattern: on entry it mutates the board as
//! far as it can and hands a batch of [`AnimationRequest`]s out; when the
//! last of them completes (the barrier) it decides the next phase.
//!
//! Board mutation timing:
//!
//! - Swaps commit at the barrier, and only when legal. A rejected swap
//!   animates there and back without touching the board.
//! - A collected tile's cell empties when its own `Collect` completes.
//! - Collapse and fill are applied on phase entry. The moved or new tiles
//!   stay busy until their animation completes, so chain detection never
//!   sees a half-collapsed column.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace, warn};

use crate::board::{Board, BoardGenerator};
use crate::bonus::{chain_reaction, BonusPolicy, PendingBonus};
use crate::chains::ChainFinder;
use crate::core::{BonusKind, ConfigError, EngineConfig, GameRng, Position, Tile, TileId, TileType};
use crate::events::{CascadeEvent, EventBus, EventKind, ListenerId};
use crate::swaps::{PendingSwap, SwapOracle};

use super::phase::{CascadeState, Phase};
use super::presentation::{AnimationKind, AnimationRequest, Presenter};

/// Outcome of [`CascadeEngine::request_swap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapResponse {
    /// Not idle, off the board, not adjacent, or a cell is empty or busy.
    /// Nothing changed.
    Ignored,

    /// The swap makes a chain; it commits once both tiles finish moving.
    Accepted,

    /// Adjacent but makes no chain; the tiles move there and back.
    Rejected,
}

#[derive(Clone, Copy, Debug)]
struct ActiveSwap {
    a: Position,
    b: Position,
    legal: bool,
    reverting: bool,
}

/// Swap, collect, collapse and fill, until the board is stable.
///
/// ```
/// use match3_engine::core::EngineConfig;
/// use match3_engine::engine::{CascadeEngine, ImmediatePresenter, Phase};
///
/// let mut engine = CascadeEngine::new(EngineConfig::default().with_seed(7)).unwrap();
/// assert_eq!(engine.state().phase, Phase::Loading);
///
/// let mut presenter = ImmediatePresenter::new();
/// engine.pump(&mut presenter);
/// assert_eq!(engine.state().phase, Phase::Idle);
///
/// if let Some(hint) = engine.available_swaps().first().copied() {
///     let (a, b) = hint.cells();
///     engine.request_swap(a, b);
///     engine.pump(&mut presenter);
///     assert_eq!(engine.state().phase, Phase::Idle);
///     assert!(engine.board().is_full());
/// }
/// ```
#[derive(Debug)]
pub struct CascadeEngine {
    config: EngineConfig,
    board: Board,
    finder: ChainFinder,
    oracle: SwapOracle,
    policy: BonusPolicy,
    refill_rng: GameRng,
    bonus_rng: GameRng,
    state: CascadeState,
    swap: Option<ActiveSwap>,
    pending_bonuses: Vec<PendingBonus>,
    /// Tiles created by the last fill.
    filled: usize,
    in_flight: FxHashMap<TileId, AnimationKind>,
    outbox: Vec<AnimationRequest>,
    bus: EventBus,
}

impl CascadeEngine {
    /// Generate a chain-free board and start loading it.
    ///
    /// Every tile gets an `Appear` request; the engine is idle once they
    /// have all completed.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = GameRng::new(config.seed).for_context("generation");
        let board = BoardGenerator::new(&config).generate(&mut rng);

        let mut engine = Self::build(config, board, Phase::Loading);
        let tiles: Vec<Tile> = engine.board.tiles().copied().collect();
        for tile in tiles {
            engine.request(tile.id, AnimationKind::Appear { at: tile.position() });
        }
        debug!(
            width = engine.config.width,
            height = engine.config.height,
            seed = engine.config.seed,
            "board generated"
        );
        Ok(engine)
    }

    /// Start idle on an existing board.
    ///
    /// The board's dimensions replace the configured ones. The board is
    /// taken as-is: chains already on it are collected after the next
    /// committed swap.
    pub fn with_board(config: EngineConfig, board: Board) -> Result<Self, ConfigError> {
        let config = config.with_size(board.width(), board.height());
        config.validate()?;
        Ok(Self::build(config, board, Phase::Idle))
    }

    fn build(config: EngineConfig, board: Board, phase: Phase) -> Self {
        let root = GameRng::new(config.seed);
        Self {
            finder: ChainFinder::new(config.match_length),
            oracle: SwapOracle::new(config.match_length),
            policy: BonusPolicy::from_config(&config),
            refill_rng: root.for_context("refill"),
            bonus_rng: root.for_context("bonus"),
            state: CascadeState::new(phase),
            swap: None,
            pending_bonuses: Vec::new(),
            filled: 0,
            in_flight: FxHashMap::default(),
            outbox: Vec::new(),
            bus: EventBus::new(),
            board,
            config,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &CascadeState {
        &self.state
    }

    /// Check if any tile is still animating.
    #[must_use]
    pub fn is_field_animating(&self) -> bool {
        self.board.is_any_tile_busy()
    }

    /// Number of requests awaiting completion.
    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Every swap the engine would accept right now.
    ///
    /// Empty unless the engine is idle.
    pub fn available_swaps(&mut self) -> Vec<PendingSwap> {
        if !self.state.phase.accepts_swaps() {
            return Vec::new();
        }
        self.oracle.find_available_swaps(&mut self.board)
    }

    // === Events ===

    /// Listen to every event.
    pub fn subscribe(&mut self, listener: impl FnMut(&CascadeEvent) + 'static) -> ListenerId {
        self.bus.subscribe(listener)
    }

    /// Listen to the given kinds of event.
    pub fn subscribe_to(
        &mut self,
        kinds: &[EventKind],
        listener: impl FnMut(&CascadeEvent) + 'static,
    ) -> ListenerId {
        self.bus.subscribe_to(kinds, listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.bus.unsubscribe(id)
    }

    // === Driving ===

    /// Ask to exchange two cells.
    ///
    /// Structurally invalid requests are ignored without any state change
    /// or event. Otherwise both tiles get a `SwapTo` request and the engine
    /// waits for them.
    #[instrument(level = "debug", skip(self))]
    pub fn request_swap(&mut self, a: Position, b: Position) -> SwapResponse {
        if !self.state.phase.accepts_swaps() {
            trace!(phase = ?self.state.phase, "swap ignored while busy");
            return SwapResponse::Ignored;
        }
        if !self.board.in_bounds(a) || !self.board.in_bounds(b) || !a.is_adjacent(b) {
            trace!("swap ignored, cells not adjacent");
            return SwapResponse::Ignored;
        }
        let (Some(first), Some(second)) = (self.board.usable(a), self.board.usable(b)) else {
            trace!("swap ignored, cell not usable");
            return SwapResponse::Ignored;
        };

        let legal = self.oracle.is_valid_swap(&mut self.board, a, b);
        self.swap = Some(ActiveSwap {
            a,
            b,
            legal,
            reverting: false,
        });
        self.set_phase(Phase::AwaitingSwapAnimation);
        self.request(first.id, AnimationKind::SwapTo { from: a, to: b });
        self.request(second.id, AnimationKind::SwapTo { from: b, to: a });

        if legal {
            SwapResponse::Accepted
        } else {
            SwapResponse::Rejected
        }
    }

    /// Drain the requests issued since the last call.
    pub fn take_requests(&mut self) -> Vec<AnimationRequest> {
        std::mem::take(&mut self.outbox)
    }

    /// Report that a tile's animation completed.
    ///
    /// Completions for tiles with nothing in flight (unknown or repeated)
    /// are logged and ignored. The last completion of a phase advances the
    /// state machine, possibly through several phases.
    pub fn animation_finished(&mut self, tile: TileId) {
        let Some(kind) = self.in_flight.remove(&tile) else {
            warn!(%tile, "completion for a tile with no animation in flight");
            return;
        };
        trace!(%tile, ?kind, "animation finished");

        match kind {
            AnimationKind::Collect { at } => {
                let removed = self.board.take(at);
                debug_assert_eq!(removed.map(|t| t.id), Some(tile), "collected tile left its cell");
            }
            _ => {
                self.board.clear_busy(tile);
            }
        }

        if self.in_flight.is_empty() {
            self.advance();
        }
    }

    /// Feed requests to a presenter and its completions back, until the
    /// presenter has nothing finished to report.
    ///
    /// Returns the number of completions delivered.
    pub fn pump(&mut self, presenter: &mut impl Presenter) -> usize {
        let mut completed = 0;
        loop {
            for request in self.take_requests() {
                presenter.begin(&request);
            }
            let finished = presenter.poll_finished();
            if finished.is_empty() {
                return completed;
            }
            completed += finished.len();
            for tile in finished {
                self.animation_finished(tile);
            }
        }
    }

    // === Phases ===

    /// Run barrier decisions until something is in flight or the engine idles.
    fn advance(&mut self) {
        while self.in_flight.is_empty() && self.state.phase != Phase::Idle {
            match self.state.phase {
                Phase::Idle => {}
                Phase::Loading => self.set_phase(Phase::Idle),
                Phase::AwaitingSwapAnimation => self.finish_swap(),
                Phase::Collecting => {
                    self.state.multiplier += 1;
                    self.state.rounds += 1;
                    self.begin_collapsing();
                }
                Phase::Collapsing => self.begin_filling(),
                Phase::Filling => {
                    if self.filled > 0 {
                        self.begin_collecting();
                    } else {
                        self.settle();
                    }
                }
            }
        }
    }

    fn finish_swap(&mut self) {
        let Some(mut swap) = self.swap.take() else {
            self.set_phase(Phase::Idle);
            return;
        };

        if swap.reverting {
            self.set_phase(Phase::Idle);
            self.publish(CascadeEvent::SwapReverted {
                from: swap.a,
                to: swap.b,
            });
        } else if swap.legal {
            self.board.swap_positions(swap.a, swap.b);
            self.state.multiplier = 1;
            self.state.rounds = 0;
            self.begin_collecting();
        } else {
            // The board never changed; each tile heads back to its own cell.
            swap.reverting = true;
            for (from, to) in [(swap.b, swap.a), (swap.a, swap.b)] {
                if let Some(tile) = self.board.get(to) {
                    self.request(tile.id, AnimationKind::SwapTo { from, to });
                }
            }
            self.swap = Some(swap);
        }
    }

    fn begin_collecting(&mut self) {
        let chains = self.finder.find(&self.board);
        if chains.is_empty() {
            self.settle();
            return;
        }
        self.set_phase(Phase::Collecting);

        let multiplier = self.state.multiplier;
        let mut queued = FxHashSet::default();
        let mut collected: Vec<Tile> = Vec::new();

        for chain in &chains {
            if let Some(bonus) = self.policy.decide(chain, &mut self.bonus_rng) {
                self.pending_bonuses.push(bonus);
            }
            self.publish(CascadeEvent::ChainCollected {
                orientation: chain.orientation(),
                tile_type: chain.tile_type(),
                length: chain.len(),
                multiplier,
            });
            for &tile in chain.tiles() {
                if queued.insert(tile.id) {
                    self.publish(CascadeEvent::BlockCollected { tile, multiplier });
                    collected.push(tile);
                }
            }
        }

        let activations = chain_reaction(&self.board, &mut queued, collected.iter().copied());
        for activation in activations {
            let tile = activation.trigger;
            let count = activation.area;
            let event = match tile.bonus {
                BonusKind::Bomb => CascadeEvent::BombBonusCollected { tile, count, multiplier },
                kind if kind.is_line() => {
                    CascadeEvent::LineBonusCollected { tile, count, multiplier }
                }
                _ => continue,
            };
            self.publish(event);
            for tile in activation.affected {
                self.publish(CascadeEvent::BlockCollected { tile, multiplier });
                collected.push(tile);
            }
        }

        debug!(
            chains = chains.len(),
            tiles = collected.len(),
            bonuses = self.pending_bonuses.len(),
            multiplier,
            "collecting"
        );
        for tile in collected {
            self.request(tile.id, AnimationKind::Collect { at: tile.position() });
        }
    }

    fn begin_collapsing(&mut self) {
        self.set_phase(Phase::Collapsing);

        let mut spawned: Vec<TileId> = Vec::new();
        for bonus in std::mem::take(&mut self.pending_bonuses) {
            if self.board.get(bonus.position).is_some() {
                warn!(position = %bonus.position, kind = ?bonus.kind, "bonus cell already taken, dropping bonus");
                continue;
            }
            spawned.push(self.board.place(bonus.position, bonus.tile_type, bonus.kind));
        }

        let (width, height) = (self.board.width(), self.board.height());
        let mut moves = Vec::new();
        for col in 0..width {
            // Next free row, counting up from the bottom.
            let mut target = height;
            for row in (0..height).rev() {
                let from = Position::new(col, row);
                let Some(tile) = self.board.get(from) else {
                    continue;
                };
                target -= 1;
                let to = Position::new(col, target);
                if from != to {
                    self.board.relocate(from, to);
                    if !spawned.contains(&tile.id) {
                        moves.push((tile.id, from, to));
                    }
                }
            }
        }

        for id in spawned {
            let Some(tile) = self.board.locate(id).and_then(|at| self.board.get(at)) else {
                continue;
            };
            self.request(id, AnimationKind::Appear { at: tile.position() });
            self.publish(CascadeEvent::BonusSpawned { tile });
        }
        debug!(moved = moves.len(), "collapsing");
        for (id, from, to) in moves {
            self.request(id, AnimationKind::MoveTo { from, to });
        }
    }

    fn begin_filling(&mut self) {
        self.set_phase(Phase::Filling);

        let palette_size = self.config.palette_size;
        let mut falls = Vec::new();
        for col in 0..self.board.width() {
            let empty: Vec<Position> = (0..self.board.height())
                .map(|row| Position::new(col, row))
                .filter(|&at| self.board.get(at).is_none())
                .collect();
            let drop = empty.len();
            for at in empty {
                let tile_type = TileType::random(&mut self.refill_rng, palette_size);
                let id = self.board.place(at, tile_type, BonusKind::None);
                falls.push((id, at, drop));
            }
        }

        self.filled = falls.len();
        debug!(filled = self.filled, "filling");
        for (id, to, drop) in falls {
            self.request(id, AnimationKind::FallIn { to, drop });
        }
    }

    fn settle(&mut self) {
        self.set_phase(Phase::Idle);
        debug!(
            multiplier = self.state.multiplier,
            rounds = self.state.rounds,
            "cascade settled"
        );
        self.publish(CascadeEvent::CascadeSettled {
            multiplier: self.state.multiplier,
            rounds: self.state.rounds,
        });
    }

    // === Helpers ===

    fn set_phase(&mut self, phase: Phase) {
        debug!(from = ?self.state.phase, to = ?phase, multiplier = self.state.multiplier, "phase");
        self.state.phase = phase;
    }

    fn request(&mut self, tile: TileId, kind: AnimationKind) {
        let fresh = self.board.mark_busy(tile);
        debug_assert!(fresh, "{} already has an animation in flight", tile);
        trace!(%tile, ?kind, "animation requested");
        self.in_flight.insert(tile, kind);
        self.outbox.push(AnimationRequest { tile, kind });
    }

    fn publish(&mut self, event: CascadeEvent) {
        self.bus.publish(&event);
    }
}
