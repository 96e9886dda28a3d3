//! The round engine: the only component whose behavior depends on phase.
//!
//! `RoundEngine` exclusively owns the score ledger, the event pools, the
//! round state, and the injected randomness. Callers drive it with the six
//! action inputs and read everything else through queries.
//!
//! ## Committing a round
//!
//! `commit_round` runs to completion in one call:
//!
//! 1. Fold provisional scores into cumulative totals
//! 2. Rank on the committed totals
//! 3. Pick the winner: the leader on the final round, otherwise the leader
//!    with probability `primary_winner_chance` and the runner-up (or the
//!    leader when there is none) otherwise
//! 4. Draw the winner's final event (final round) or a non-final event;
//!    a failed draw substitutes the configured fallback event
//! 5. Record the result and enter the next round in event view, or finish

use log::{debug, info, warn};

use super::state::{
    Direction, MovementStep, Phase, PrimaryAction, RoundOutcome, RoundState, ViewMode,
};
use crate::core::{
    Action, ActionRecord, ConfigError, EngineError, GameRng, Identity, Pick, Randomizer,
    RoundConfig, Seat,
};
use crate::events::{Event, EventCatalog, EventPool};
use crate::scores::{Ranking, ScoreLedger, ScoreLine, Standing};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Setup,
    Active,
    Finished,
}

/// Result of [`RoundEngine::apply`].
#[derive(Clone, Debug, PartialEq)]
pub enum ActionOutcome {
    /// A game started with this many players.
    Started { players: usize },
    /// A provisional score changed.
    ScoreAdjusted { identity: Identity, provisional: i64 },
    /// A round was committed.
    RoundCommitted(RoundOutcome),
    /// The view mode changed.
    ModeToggled(ViewMode),
    /// A movement step was spent.
    Moved(MovementStep),
    /// The session was discarded.
    Reset,
}

/// Round and event resolution state machine.
///
/// ## Example
///
/// ```
/// use party_rounds::core::{Identity, RoundConfig, SequenceRng};
/// use party_rounds::events::{Event, EventCatalog, Mechanic};
/// use party_rounds::round::{PrimaryAction, RoundEngine, ViewMode};
///
/// let catalog = EventCatalog::new()
///     .with_events("a", vec![Event::new("Storm", "").with_mechanic(Mechanic::new("Move twice.", 2))])
///     .with_events("b", vec![Event::new("Calm", "")]);
///
/// // 0.0 always selects the leader, and the first remaining event
/// let mut engine = RoundEngine::new(RoundConfig::default(), catalog, SequenceRng::constant(0.0)).unwrap();
/// let a = Identity::new("a");
///
/// engine.start_game(&[Some(a.clone()), Some(Identity::new("b"))]).unwrap();
/// engine.adjust_score(&a, 3).unwrap();
///
/// let outcome = engine.commit_round().unwrap();
/// assert_eq!(outcome.winner, a);
/// assert_eq!(engine.round(), 2);
/// assert_eq!(engine.mode(), ViewMode::Event);
/// assert_eq!(engine.movement_remaining(), 2);
/// assert_eq!(engine.primary_action(), PrimaryAction::ResolveMovement);
/// ```
#[derive(Clone, Debug)]
pub struct RoundEngine<R: Randomizer = GameRng> {
    config: RoundConfig,
    catalog: EventCatalog,
    pool: EventPool,
    ledger: ScoreLedger,
    state: RoundState,
    stage: Stage,
    rng: R,
    history: Vec<ActionRecord>,
}

impl RoundEngine<GameRng> {
    /// Create an engine driven by a seeded `GameRng`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn seeded(config: RoundConfig, catalog: EventCatalog, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, catalog, GameRng::new(seed))
    }
}

impl<R: Randomizer> RoundEngine<R> {
    /// Create an engine in the setup phase.
    ///
    /// The engine keeps `catalog` as the pristine content for every
    /// playthrough and draws from its own copy.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(config: RoundConfig, catalog: EventCatalog, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let pool = EventPool::from_catalog(&catalog);
        Ok(Self {
            config,
            catalog,
            pool,
            ledger: ScoreLedger::new(),
            state: RoundState::new(),
            stage: Stage::Setup,
            rng,
            history: Vec::new(),
        })
    }

    // === Actions ===

    /// Start a game from one identity choice per player slot.
    ///
    /// Slot order becomes seat order, which breaks ranking ties and
    /// rotates the starting player.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` outside setup
    /// - `TooFewPlayers` below the configured minimum
    /// - `IncompleteSelection` if any slot is `None`
    /// - `DuplicateSelection` if an identity is chosen twice
    pub fn start_game(&mut self, assignments: &[Option<Identity>]) -> Result<(), EngineError> {
        if self.stage != Stage::Setup {
            return Err(self.invalid("start-game"));
        }
        if assignments.len() < self.config.min_players {
            return Err(EngineError::TooFewPlayers {
                min: self.config.min_players,
                got: assignments.len(),
            });
        }

        let chosen: Vec<Identity> = assignments.iter().flatten().cloned().collect();
        if chosen.len() < assignments.len() {
            return Err(EngineError::IncompleteSelection {
                chosen: chosen.len(),
                required: assignments.len(),
            });
        }

        let mut ledger = ScoreLedger::new();
        ledger.initialize(&chosen)?;

        for identity in &chosen {
            if !self.catalog.contains(identity) {
                warn!("identity {identity} has no authored events; its draws will fall back");
            }
        }

        self.ledger = ledger;
        self.state = RoundState::new();
        self.stage = Stage::Active;
        info!("game started with {} players", chosen.len());
        Ok(())
    }

    /// Change an identity's provisional score for the current round.
    ///
    /// Returns the new provisional value.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` outside an active round, `UnknownIdentity` if
    /// the identity is not in play.
    pub fn adjust_score(&mut self, identity: &Identity, delta: i64) -> Result<i64, EngineError> {
        if self.stage != Stage::Active {
            return Err(self.invalid("adjust-score"));
        }
        self.ledger.adjust_provisional(identity, delta)
    }

    /// Commit the round: scores, winner, event, then the next round.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless the primary action is `CommitRound`,
    /// i.e. outside an active round or while movement steps remain in
    /// event view. Draw failures are never errors.
    pub fn commit_round(&mut self) -> Result<RoundOutcome, EngineError> {
        if self.primary_action() != PrimaryAction::CommitRound || self.ledger.is_empty() {
            return Err(self.invalid("commit-round"));
        }

        let round = self.state.round;
        let is_final = round >= self.config.max_rounds;

        self.ledger.commit();
        let ranking = self.ledger.ranking();
        let (winner, randomized) = self.resolve_winner(&ranking, is_final)?;

        let draw = if is_final {
            self.pool.draw_final(&winner)
        } else {
            self.pool.draw_non_final(&winner, &mut self.rng)
        };
        let (event, fallback) = match draw {
            Ok(event) => (event, None),
            Err(err) => {
                warn!("round {round}: {err}; using fallback event");
                (self.config.fallback_event.clone(), Some(err))
            }
        };
        let movement = if fallback.is_some() { 0 } else { event.movement() };

        self.ledger.reset_provisional();
        self.state.last_winner = Some(winner.clone());
        self.state.last_event = Some(event.clone());
        self.state.mode = ViewMode::Event;
        if is_final {
            self.stage = Stage::Finished;
            self.state.movement_remaining = 0;
        } else {
            self.state.round += 1;
            self.state.movement_remaining = movement;
        }

        info!(
            "round {round} committed: {winner} draws \"{}\"{}",
            event.title,
            if is_final { " (final)" } else { "" }
        );

        Ok(RoundOutcome {
            round,
            ranking,
            winner,
            event,
            fallback,
            randomized,
            next: self.phase(),
        })
    }

    /// Switch between scoring and event view.
    ///
    /// Never touches scores, the movement counter, or the pools.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless an active round after the first.
    pub fn toggle_mode(&mut self) -> Result<ViewMode, EngineError> {
        if !self.can_toggle_mode() {
            return Err(self.invalid("toggle-mode"));
        }
        self.state.mode = self.state.mode.toggled();
        debug!("view mode -> {}", self.state.mode);
        Ok(self.state.mode)
    }

    /// Spend one movement step and reveal its direction.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless in event view with steps remaining.
    pub fn resolve_movement_step(&mut self) -> Result<MovementStep, EngineError> {
        if self.primary_action() != PrimaryAction::ResolveMovement {
            return Err(self.invalid("resolve-movement-step"));
        }

        let direction = self
            .rng
            .uniform_index(Direction::ALL.len())
            .map_or(Direction::North, Direction::from_index);
        self.state.movement_remaining -= 1;
        debug!(
            "movement {:?}, {} step(s) left",
            direction, self.state.movement_remaining
        );

        Ok(MovementStep {
            direction,
            remaining: self.state.movement_remaining,
        })
    }

    /// Return to setup from any phase.
    ///
    /// Clears the ledger, the round state and the action history, and
    /// restores every pool to the authored content.
    pub fn reset(&mut self) {
        self.ledger.clear();
        self.state = RoundState::new();
        self.pool.restore(&self.catalog);
        self.stage = Stage::Setup;
        self.history.clear();
        info!("session reset");
    }

    /// Apply any action, recording it in the history on success.
    ///
    /// `Reset` clears the history instead of being recorded.
    ///
    /// # Errors
    ///
    /// Whatever the underlying action returns.
    pub fn apply(&mut self, action: Action) -> Result<ActionOutcome, EngineError> {
        let round = if self.stage == Stage::Setup { 0 } else { self.state.round };

        let outcome = match &action {
            Action::StartGame { assignments } => {
                self.start_game(assignments)?;
                ActionOutcome::Started {
                    players: self.ledger.len(),
                }
            }
            Action::AdjustScore { identity, delta } => {
                let provisional = self.adjust_score(identity, *delta)?;
                ActionOutcome::ScoreAdjusted {
                    identity: identity.clone(),
                    provisional,
                }
            }
            Action::CommitRound => ActionOutcome::RoundCommitted(self.commit_round()?),
            Action::ToggleMode => ActionOutcome::ModeToggled(self.toggle_mode()?),
            Action::ResolveMovementStep => ActionOutcome::Moved(self.resolve_movement_step()?),
            Action::Reset => {
                self.reset();
                return Ok(ActionOutcome::Reset);
            }
        };

        let sequence = self.history.len();
        self.history.push(ActionRecord::new(action, round, sequence));
        Ok(outcome)
    }

    fn resolve_winner(
        &mut self,
        ranking: &Ranking,
        is_final: bool,
    ) -> Result<(Identity, bool), EngineError> {
        let Some(leader) = ranking.first() else {
            return Err(self.invalid("commit-round"));
        };

        if is_final {
            debug!("final round: leader {leader} wins outright");
            return Ok((leader.clone(), false));
        }

        let winner = match self.rng.weighted_binary(self.config.primary_winner_chance) {
            Pick::Primary => leader,
            Pick::Secondary => ranking.get(1).unwrap_or(leader),
        };
        debug!("round winner {winner} (leader {leader})");
        Ok((winner.clone(), true))
    }

    fn invalid(&self, action: &'static str) -> EngineError {
        EngineError::InvalidTransition {
            action,
            phase: self.phase(),
        }
    }

    // === Queries ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.stage {
            Stage::Setup => Phase::Setup,
            Stage::Active => Phase::Active {
                round: self.state.round,
                mode: self.state.mode,
            },
            Stage::Finished => Phase::Finished,
        }
    }

    /// What the primary action means right now.
    #[must_use]
    pub fn primary_action(&self) -> PrimaryAction {
        match self.stage {
            Stage::Setup => PrimaryAction::StartGame,
            Stage::Finished => PrimaryAction::ReturnHome,
            Stage::Active
                if self.state.mode == ViewMode::Event && self.state.movement_remaining > 0 =>
            {
                PrimaryAction::ResolveMovement
            }
            Stage::Active => PrimaryAction::CommitRound,
        }
    }

    /// Whether the scoring/event toggle is offered.
    #[must_use]
    pub fn can_toggle_mode(&self) -> bool {
        self.stage == Stage::Active && self.state.round > 1
    }

    /// Current round (1-indexed). In `Finished`, the last round played.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.state.round
    }

    /// Current view mode.
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.state.mode
    }

    /// Check if all rounds have been played.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Finished
    }

    /// Winner of the last committed round.
    #[must_use]
    pub fn last_winner(&self) -> Option<&Identity> {
        self.state.last_winner.as_ref()
    }

    /// Event of the last committed round.
    #[must_use]
    pub fn last_event(&self) -> Option<&Event> {
        self.state.last_event.as_ref()
    }

    /// Movement steps left to resolve.
    #[must_use]
    pub fn movement_remaining(&self) -> u32 {
        self.state.movement_remaining
    }

    /// Scores for an identity in play.
    #[must_use]
    pub fn scores(&self, identity: &Identity) -> Option<ScoreLine> {
        self.ledger.line(identity)
    }

    /// Ranking on committed scores.
    #[must_use]
    pub fn ranking(&self) -> Ranking {
        self.ledger.ranking()
    }

    /// Final standings (meaningful once finished).
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        self.ledger.standings()
    }

    /// Identity that opens the current round.
    #[must_use]
    pub fn starting_player(&self) -> Option<&Identity> {
        if self.stage != Stage::Active {
            return None;
        }
        self.ledger
            .identity_at(Seat::opening(self.state.round, self.ledger.len()))
    }

    /// Identities in seat order.
    #[must_use]
    pub fn players(&self) -> &[Identity] {
        self.ledger.identities()
    }

    /// Round data.
    #[must_use]
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Score ledger.
    #[must_use]
    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    /// Event pools of the current playthrough.
    #[must_use]
    pub fn pool(&self) -> &EventPool {
        &self.pool
    }

    /// Authored content.
    #[must_use]
    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    /// Configuration.
    #[must_use]
    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Actions applied through [`apply`](Self::apply) this session.
    #[must_use]
    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    /// Randomness source.
    #[must_use]
    pub fn rng(&self) -> &R {
        &self.rng
    }
}
