//! The board engine: deck, turn buffer, counters and timers.
//!
//! ## Turn state machine
//!
//! ```text
//!   select a  ──►  [a]  ──select b──►  [a, b]  ── move += 1
//!                                         │
//!                     match ◄─────────────┴─────────────► mismatch
//!        both Matched, buffer cleared          conceal timer armed,
//!        all pairs? ──► Won                    board locked until it fires
//! ```
//!
//! ## Timers
//!
//! The engine owns at most two timers on its injected `Scheduler`: the
//! repeating tick and the one-shot conceal. Every path that ends or replaces
//! a game goes through `stop_timers`, and firings whose id no longer matches
//! an armed timer are dropped.

use std::sync::Arc;
use std::time::Duration;

use smallvec::SmallVec;
use tracing::{debug, info, trace};

use super::card::Visibility;
use super::deck::Deck;
use super::snapshot::BoardSnapshot;
use super::Card;
use crate::clock::{Firing, ManualClock, Scheduler, TimerId, TimerTask};
use crate::core::{ConfigError, GameConfig, GameRng, SymbolId, SymbolPool, TimerStart};
use crate::scoring::ScoringRule;

/// Lifecycle of one deal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Dealt, clock not running yet.
    Idle,
    /// At least one card flipped (or the clock started at deal time).
    InProgress,
    /// Every pair matched.
    Won,
}

/// Final numbers of a won game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WinSummary {
    /// Completed two-card turns.
    pub moves: u32,
    /// Elapsed ticks.
    pub time_seconds: u32,
    /// Points under the configured scoring rule.
    pub points: u64,
    /// Pairs on the board.
    pub pairs: usize,
}

/// Result of a `select_card` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Nothing changed.
    Ignored,
    /// First card of a turn turned face-up.
    Revealed { position: usize },
    /// Second card completed a pair. `won` is set on the final pair.
    Matched {
        first: usize,
        second: usize,
        symbol: SymbolId,
        won: Option<WinSummary>,
    },
    /// Second card did not match; both stay up until the conceal timer fires.
    Mismatched { first: usize, second: usize },
}

impl Selection {
    /// Did the selection change the board?
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Selection::Ignored)
    }

    /// The win payload, if this selection finished the game.
    #[must_use]
    pub fn win(&self) -> Option<WinSummary> {
        match self {
            Selection::Matched { won, .. } => *won,
            _ => None,
        }
    }
}

/// Something a timer did to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardEvent {
    /// A mismatched pair was turned face-down.
    Concealed { first: usize, second: usize },
    /// Elapsed time advanced.
    Ticked { seconds: u32 },
}

/// Memory-match board driven by card selections and timer firings.
pub struct BoardEngine<C: Scheduler> {
    clock: C,
    rng: GameRng,
    pool: Arc<SymbolPool>,
    pair_count: usize,
    flip_delay: Duration,
    tick_interval: Duration,
    timer_start: TimerStart,
    scoring: ScoringRule,

    // === Per-deal state ===
    deck: Deck,
    turn: SmallVec<[usize; 2]>,
    matched_pairs: usize,
    moves: u32,
    elapsed_seconds: u32,
    phase: Phase,

    // === Armed timers ===
    conceal_timer: Option<TimerId>,
    tick_timer: Option<TimerId>,
}

impl<C: Scheduler> BoardEngine<C> {
    /// Validate `config` and deal the first game.
    pub fn new(config: &GameConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let mut engine = Self {
            clock,
            rng,
            pool: Arc::new(config.symbols.clone()),
            pair_count: config.pair_count,
            flip_delay: config.flip_delay(),
            tick_interval: config.tick_interval(),
            timer_start: config.timer_start,
            scoring: config.scoring,
            deck: Deck::default(),
            turn: SmallVec::new(),
            matched_pairs: 0,
            moves: 0,
            elapsed_seconds: 0,
            phase: Phase::Idle,
            conceal_timer: None,
            tick_timer: None,
        };
        engine.restart();
        Ok(engine)
    }

    // === Lifecycle ===

    /// Deal a new game of `pair_count` pairs drawn from `pool`.
    ///
    /// Pending timers are cancelled first. On error the current game is left
    /// untouched.
    pub fn initialize(&mut self, pair_count: usize, pool: SymbolPool) -> Result<(), ConfigError> {
        let deck = Deck::deal(pair_count, &pool, &mut self.rng)?;
        self.pool = Arc::new(pool);
        self.pair_count = pair_count;
        self.install(deck);
        Ok(())
    }

    /// Deal a fresh game with the current pair count and pool.
    pub fn restart(&mut self) {
        // pair_count and pool were validated together when they were set
        let Ok(deck) = Deck::deal(self.pair_count, &self.pool, &mut self.rng) else {
            return;
        };
        self.install(deck);
    }

    /// Cancel the tick and conceal timers. Safe to call any number of times.
    pub fn stop_timers(&mut self) {
        if let Some(id) = self.tick_timer.take() {
            self.clock.cancel(id);
        }
        if let Some(id) = self.conceal_timer.take() {
            self.clock.cancel(id);
        }
    }

    fn install(&mut self, deck: Deck) {
        self.stop_timers();
        self.deck = deck;
        self.turn.clear();
        self.matched_pairs = 0;
        self.moves = 0;
        self.elapsed_seconds = 0;
        self.phase = Phase::Idle;

        if self.timer_start == TimerStart::OnInitialize {
            self.start();
        }
        debug!(pairs = self.pair_count, cards = self.deck.len(), "new game");
    }

    fn start(&mut self) {
        self.phase = Phase::InProgress;
        if self.tick_timer.is_none() {
            self.tick_timer = Some(
                self.clock
                    .schedule_repeating(self.tick_interval, TimerTask::Tick),
            );
        }
    }

    // === Play ===

    /// Flip the card at `position`.
    ///
    /// Ignored when the game is won, the position is off the board, the card
    /// is already face-up, or a turn is waiting to be resolved.
    pub fn select_card(&mut self, position: usize) -> Selection {
        if self.phase == Phase::Won || self.turn.len() >= 2 || self.turn.contains(&position) {
            return Selection::Ignored;
        }
        match self.deck.get(position) {
            Some(card) if card.visibility == Visibility::Hidden => {}
            _ => return Selection::Ignored,
        }

        if self.phase == Phase::Idle {
            self.start();
        }

        if let Some(card) = self.deck.get_mut(position) {
            card.reveal();
        }
        self.turn.push(position);

        if self.turn.len() < 2 {
            return Selection::Revealed { position };
        }

        self.moves += 1;
        self.resolve_turn()
    }

    fn resolve_turn(&mut self) -> Selection {
        let (first, second) = (self.turn[0], self.turn[1]);
        let symbol_of = |deck: &Deck, p: usize| deck.get(p).map(|c| c.symbol);
        let a = symbol_of(&self.deck, first);
        let b = symbol_of(&self.deck, second);

        match (a, b) {
            (Some(symbol), Some(other)) if symbol == other => {
                for p in [first, second] {
                    if let Some(card) = self.deck.get_mut(p) {
                        card.mark_matched();
                    }
                }
                self.turn.clear();
                self.matched_pairs += 1;
                debug!(first, second, matched = self.matched_pairs, "pair matched");

                let won = (self.matched_pairs == self.pair_count).then(|| self.finish());
                Selection::Matched {
                    first,
                    second,
                    symbol,
                    won,
                }
            }
            _ => {
                self.conceal_timer = Some(
                    self.clock
                        .schedule_once(self.flip_delay, TimerTask::ConcealMismatch),
                );
                debug!(first, second, moves = self.moves, "mismatch");
                Selection::Mismatched { first, second }
            }
        }
    }

    fn finish(&mut self) -> WinSummary {
        self.phase = Phase::Won;
        self.stop_timers();

        let summary = self.summary_now();
        info!(
            moves = summary.moves,
            seconds = summary.time_seconds,
            points = summary.points,
            "game won"
        );
        summary
    }

    fn summary_now(&self) -> WinSummary {
        WinSummary {
            moves: self.moves,
            time_seconds: self.elapsed_seconds,
            points: self
                .scoring
                .points(self.moves, self.elapsed_seconds, self.pair_count),
            pairs: self.pair_count,
        }
    }

    /// Advance elapsed time by one tick. Returns the new value while the game
    /// is in progress.
    pub fn tick(&mut self) -> Option<u32> {
        if self.phase != Phase::InProgress {
            return None;
        }
        self.elapsed_seconds += 1;
        Some(self.elapsed_seconds)
    }

    // === Timer dispatch ===

    /// Apply a timer firing. Stale firings are ignored.
    pub fn on_timer(&mut self, firing: Firing) -> Option<BoardEvent> {
        match firing.task {
            TimerTask::Tick if self.tick_timer == Some(firing.id) => {
                self.tick().map(|seconds| BoardEvent::Ticked { seconds })
            }
            TimerTask::ConcealMismatch if self.conceal_timer == Some(firing.id) => {
                self.conceal_timer = None;
                self.conceal_turn()
            }
            _ => {
                trace!(id = %firing.id, task = ?firing.task, "stale timer firing");
                None
            }
        }
    }

    fn conceal_turn(&mut self) -> Option<BoardEvent> {
        if self.turn.len() != 2 {
            self.turn.clear();
            return None;
        }
        let (first, second) = (self.turn[0], self.turn[1]);
        for p in [first, second] {
            if let Some(card) = self.deck.get_mut(p) {
                card.conceal();
            }
        }
        self.turn.clear();
        Some(BoardEvent::Concealed { first, second })
    }

    /// Dispatch every firing the clock reports as due.
    pub fn run_due(&mut self) -> Vec<BoardEvent> {
        let mut events = Vec::new();
        while let Some(firing) = self.clock.pop_due() {
            events.extend(self.on_timer(firing));
        }
        events
    }

    // === Accessors ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Completed turns so far.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Elapsed ticks so far.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Pairs matched so far.
    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    /// Pairs on the board (N).
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    /// Positions revealed in the current, unresolved turn.
    #[must_use]
    pub fn turn(&self) -> &[usize] {
        &self.turn
    }

    /// True while a mismatched pair waits to be concealed.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.conceal_timer.is_some()
    }

    /// The dealt deck.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Card at a position.
    #[must_use]
    pub fn card(&self, position: usize) -> Option<&Card> {
        self.deck.get(position)
    }

    /// Display text for a symbol.
    #[must_use]
    pub fn symbol_text(&self, symbol: SymbolId) -> Option<&str> {
        self.pool.get(symbol)
    }

    /// Final numbers, once the game is won.
    #[must_use]
    pub fn summary(&self) -> Option<WinSummary> {
        (self.phase == Phase::Won).then(|| self.summary_now())
    }

    /// The injected scheduler.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable access to the scheduler, for hosts that drive it directly.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Immutable view of the board for rendering.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            cards: self.deck.cards().clone(),
            pool: Arc::clone(&self.pool),
            phase: self.phase,
            moves: self.moves,
            elapsed_seconds: self.elapsed_seconds,
            matched_pairs: self.matched_pairs,
            pair_count: self.pair_count,
        }
    }
}

impl BoardEngine<ManualClock> {
    /// Move the manual clock forward, dispatching firings in due order.
    pub fn advance(&mut self, by: Duration) -> Vec<BoardEvent> {
        let deadline = self.clock.now() + by;
        let mut events = Vec::new();

        while let Some(due) = self.clock.next_due().filter(|&d| d <= deadline) {
            self.clock.set_now(due);
            events.extend(self.run_due());
        }
        self.clock.set_now(deadline);
        events
    }
}
