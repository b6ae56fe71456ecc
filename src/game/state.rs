//! Game state and the turn controller.
//!
//! [`GameState`] is the single owned aggregate for one game: board, status
//! flags, energy pools, and turn state. All mutation goes through validated
//! operations; a rejected operation leaves everything but the transient
//! selection untouched.

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::{ConfigError, GameConfig};
use crate::error::{GameError, GameResult};
use crate::game::abilities::{self, AbilityOutcome};
use crate::game::movement::{first_blocker, is_legal_move, is_vector_jump};
use crate::game::{
    Ability, Board, EnergyPools, Faction, Outcome, Piece, PieceId, Snapshot, Square, StatusFlags,
    outcome,
};

/// Where the controller is in a turn segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "phase", content = "square")]
pub enum Phase {
    /// No piece chosen.
    AwaitingSelection,
    /// A piece was chosen and awaits a destination or ability target.
    PieceSelected(Square),
}

/// A committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    /// The piece that moved.
    pub piece: Piece,
    /// Origin square.
    pub from: Square,
    /// Destination square.
    pub to: Square,
    /// Opposing piece removed from the destination, if any.
    pub captured: Option<Piece>,
    /// Turn counter after the move.
    pub turn: u32,
}

/// What a square selection did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum Event {
    /// A piece was chosen.
    Selected {
        /// Square of the chosen piece.
        square: Square,
    },
    /// The chosen piece was clicked again and released.
    Deselected {
        /// Square of the released piece.
        square: Square,
    },
    /// A move was committed.
    Moved(MoveRecord),
    /// An ability was applied.
    AbilityActivated(AbilityOutcome),
}

/// Running totals used to check that pieces only appear through the
/// initial layout or replication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PieceTally {
    /// Pieces on the starting board.
    pub initial: u32,
    /// Pieces created by replication.
    pub replicated: u32,
    /// Pieces removed by capture.
    pub captured: u32,
}

impl PieceTally {
    /// Pieces that should currently be on the board.
    #[must_use]
    pub const fn expected_on_board(&self) -> u32 {
        (self.initial + self.replicated).saturating_sub(self.captured)
    }
}

/// Complete state of one game.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Rules in effect.
    pub(crate) config: GameConfig,
    /// Piece placement.
    pub(crate) board: Board,
    /// Concealed/tagged/mutated flags and cooldowns.
    pub(crate) status: StatusFlags,
    /// Energy per faction.
    pub(crate) energy: EnergyPools,
    /// Faction whose turn it is.
    pub(crate) to_move: Faction,
    /// Turn counter, starting at 1.
    pub(crate) turn: u32,
    /// Chosen piece, if any.
    pub(crate) selection: Option<Square>,
    /// Ability armed for the next square selection.
    pub(crate) pending: Option<Ability>,
    /// Piece population bookkeeping.
    pub(crate) tally: PieceTally,
}

impl Default for GameState {
    fn default() -> Self {
        Self::assemble(Board::initial(), GameConfig::default())
    }
}

impl GameState {
    /// Start a game from the configured layout.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a rule value is out of range or the
    /// configured layout is malformed.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate_rules()?;
        let board = config.starting_board()?;
        Ok(Self::assemble(board, config))
    }

    /// Start a game from an explicit board. The configured layout is ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a rule value is out of range.
    pub fn from_board(board: Board, config: GameConfig) -> Result<Self, ConfigError> {
        config.validate_rules()?;
        Ok(Self::assemble(board, config))
    }

    fn assemble(board: Board, config: GameConfig) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let initial = board.pieces().count() as u32;
        Self {
            energy: EnergyPools::new(config.initial_energy),
            config,
            board,
            status: StatusFlags::new(),
            to_move: Faction::Defender,
            turn: 1,
            selection: None,
            pending: None,
            tally: PieceTally {
                initial,
                ..PieceTally::default()
            },
        }
    }

    /// Rules in effect.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Piece placement.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Status flags and cooldowns, keyed by piece.
    #[must_use]
    pub const fn status(&self) -> &StatusFlags {
        &self.status
    }

    /// Energy pools of both factions.
    #[must_use]
    pub const fn energy_pools(&self) -> &EnergyPools {
        &self.energy
    }

    /// Energy of one faction.
    #[must_use]
    pub const fn energy(&self, faction: Faction) -> u32 {
        self.energy.get(faction)
    }

    /// Faction whose turn it is.
    #[must_use]
    pub const fn to_move(&self) -> Faction {
        self.to_move
    }

    /// Turn counter, starting at 1.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Piece population bookkeeping.
    #[must_use]
    pub const fn tally(&self) -> PieceTally {
        self.tally
    }

    /// Current selection phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self.selection {
            Some(square) => Phase::PieceSelected(square),
            None => Phase::AwaitingSelection,
        }
    }

    /// Ability armed for the next square selection.
    #[must_use]
    pub const fn pending_ability(&self) -> Option<Ability> {
        self.pending
    }

    /// Squares of concealed pieces.
    #[must_use]
    pub fn concealed_squares(&self) -> Vec<Square> {
        self.squares_of(self.status.concealed())
    }

    /// Squares of tagged pieces.
    #[must_use]
    pub fn tagged_squares(&self) -> Vec<Square> {
        self.squares_of(self.status.tagged())
    }

    /// Squares of mutated pieces.
    #[must_use]
    pub fn mutated_squares(&self) -> Vec<Square> {
        self.squares_of(self.status.mutated())
    }

    /// Remaining mutation cooldown of the piece on `square`, zero if none.
    #[must_use]
    pub fn cooldown_at(&self, square: Square) -> u8 {
        self.board
            .get(square)
            .map_or(0, |piece| self.status.cooldown(piece.id))
    }

    /// Whether `viewer` can see what stands on `square`.
    ///
    /// Own pieces and empty squares are always visible. An opposing piece is
    /// hidden while concealed, unless it is also tagged.
    #[must_use]
    pub fn is_visible_to(&self, viewer: Faction, square: Square) -> bool {
        match self.board.get(square) {
            None => true,
            Some(piece) if piece.faction == viewer => true,
            Some(piece) => !self.status.is_concealed(piece.id) || self.status.is_tagged(piece.id),
        }
    }

    /// The board as `viewer` sees it: hidden pieces read as empty.
    #[must_use]
    pub fn view_for(&self, viewer: Faction) -> Vec<Option<Piece>> {
        Square::all()
            .map(|sq| {
                if self.is_visible_to(viewer, sq) {
                    self.board.get(sq)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Victory state of the board, if any. The engine itself never stops.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        outcome(&self.board, self.config.force_control_percent)
    }

    /// Serializable copy of the observable state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    /// Route a square selection to ability activation or move handling.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason. Any rejection clears the selection and
    /// the pending ability; nothing else changes.
    pub fn select_square(&mut self, square: Square) -> GameResult<Event> {
        let result = self.dispatch_selection(square);
        if let Err(err) = &result {
            trace!(%square, %err, "selection rejected");
            self.clear_selection();
        }
        result
    }

    /// Arm an ability for the next square selection.
    ///
    /// Self-targeted abilities take the next selected square as the actor.
    /// Targeted abilities use the currently selected piece as the actor and
    /// the next selected square as the target.
    pub fn select_ability(&mut self, ability: Ability) {
        trace!(%ability, "ability armed");
        self.pending = Some(ability);
    }

    /// Arm an ability by name.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownAbility`] if the name is not recognised;
    /// the pending ability is cleared in that case.
    pub fn select_ability_named(&mut self, name: &str) -> GameResult<Ability> {
        match name.parse::<Ability>() {
            Ok(ability) => {
                self.select_ability(ability);
                Ok(ability)
            }
            Err(err) => {
                self.pending = None;
                Err(err)
            }
        }
    }

    /// Drop the selection and any pending ability.
    pub fn cancel(&mut self) {
        self.clear_selection();
    }

    /// Validate and commit a move for the faction to move.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason; state is unchanged apart from the
    /// selection being cleared.
    pub fn try_move(&mut self, from: Square, to: Square) -> GameResult<MoveRecord> {
        let result = self.check_move(from, to).map(|piece| self.commit_move(piece, from, to));
        if let Err(err) = &result {
            trace!(%from, %to, %err, "move rejected");
        }
        self.clear_selection();
        result
    }

    /// Validate and apply an ability for the faction to move.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason; state is unchanged apart from the
    /// selection and pending ability being cleared.
    pub fn activate_ability(
        &mut self,
        ability: Ability,
        actor: Square,
        target: Option<Square>,
    ) -> GameResult<AbilityOutcome> {
        let result = abilities::plan(self, ability, actor, target)
            .map(|plan| abilities::apply(self, plan));
        match &result {
            Ok(outcome) => debug!(
                faction = %self.to_move,
                %ability,
                %actor,
                cost = outcome.cost,
                "ability activated"
            ),
            Err(err) => trace!(%ability, %actor, %err, "ability rejected"),
        }
        self.clear_selection();
        result
    }

    /// Destinations the piece on `from` may legally reach this turn.
    #[must_use]
    pub fn legal_moves_from(&self, from: Square) -> Vec<Square> {
        Square::all()
            .filter(|to| self.check_move(from, *to).is_ok())
            .collect()
    }

    /// Every legal move of the faction to move.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<(Square, Square)> {
        self.board
            .pieces_of(self.to_move)
            .flat_map(|(from, _)| {
                self.legal_moves_from(from)
                    .into_iter()
                    .map(move |to| (from, to))
            })
            .collect()
    }

    /// Check a move without applying it, returning the moving piece.
    ///
    /// # Errors
    ///
    /// Returns the reason the move would be rejected.
    pub fn check_move(&self, from: Square, to: Square) -> GameResult<Piece> {
        for square in [from, to] {
            if !square.is_on_board() {
                return Err(GameError::OutOfBounds(square));
            }
        }
        let piece = self.owned_piece(from)?;

        if from == to {
            return Err(GameError::IllegalMove {
                class: piece.class,
                from,
                to,
            });
        }
        if self
            .board
            .get(to)
            .is_some_and(|target| target.faction == piece.faction)
        {
            return Err(GameError::BlockedByOwnPiece(to));
        }

        let by_class = is_legal_move(piece.class, piece.faction, from, to);
        let (dx, dy) = from.deltas(to);
        let by_mutation = self.status.is_mutated(piece.id) && is_vector_jump(dx, dy);
        if !by_class && !by_mutation {
            return Err(GameError::IllegalMove {
                class: piece.class,
                from,
                to,
            });
        }

        if by_class && self.config.path_blocking {
            if let Some(blocker) = first_blocker(&self.board, piece.class, from, to) {
                return Err(GameError::PathBlocked { from, to, blocker });
            }
        }

        Ok(piece)
    }

    /// The piece on `square`, provided it belongs to the faction to move.
    ///
    /// A hidden opposing piece is reported as an empty square.
    pub(crate) fn owned_piece(&self, square: Square) -> GameResult<Piece> {
        let piece = self.board.get(square).ok_or(GameError::NoPiece(square))?;
        if piece.faction != self.to_move {
            if !self.is_visible_to(self.to_move, square) {
                return Err(GameError::NoPiece(square));
            }
            return Err(GameError::NotYourTurn {
                square,
                piece_owner: piece.faction,
                to_move: self.to_move,
            });
        }
        Ok(piece)
    }

    fn dispatch_selection(&mut self, square: Square) -> GameResult<Event> {
        if !square.is_on_board() {
            return Err(GameError::OutOfBounds(square));
        }

        if let Some(ability) = self.pending {
            let (actor, target) = if ability.needs_target() {
                let actor = self.selection.ok_or(GameError::InvalidTarget {
                    ability,
                    reason: "select the acting piece before its target",
                })?;
                (actor, Some(square))
            } else {
                (square, None)
            };
            return self
                .activate_ability(ability, actor, target)
                .map(Event::AbilityActivated);
        }

        match self.selection {
            None => {
                self.owned_piece(square)?;
                self.selection = Some(square);
                Ok(Event::Selected { square })
            }
            Some(origin) if origin == square => {
                self.selection = None;
                Ok(Event::Deselected { square })
            }
            Some(origin) => self.try_move(origin, square).map(Event::Moved),
        }
    }

    fn commit_move(&mut self, piece: Piece, from: Square, to: Square) -> MoveRecord {
        let captured = self.board.relocate(from, to);
        if let Some(victim) = captured {
            self.status.forget(victim.id);
            self.tally.captured += 1;
        }

        let mover = self.to_move;
        let movers: Vec<PieceId> = self.board.pieces_of(mover).map(|(_, p)| p.id).collect();
        self.status.end_turn(movers);

        self.to_move = mover.opponent();
        self.turn = self.turn.saturating_add(1);
        self.energy.accrue(self.to_move, self.config.energy_per_turn);

        debug!(
            faction = %mover,
            class = %piece.class,
            %from,
            %to,
            captured = captured.is_some(),
            turn = self.turn,
            "move committed"
        );

        MoveRecord {
            piece,
            from,
            to,
            captured,
            turn: self.turn,
        }
    }

    fn clear_selection(&mut self) {
        self.selection = None;
        self.pending = None;
    }

    fn squares_of(&self, ids: impl Iterator<Item = PieceId>) -> Vec<Square> {
        let mut squares: Vec<Square> = ids.filter_map(|id| self.board.locate(id)).collect();
        squares.sort_unstable();
        squares
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::PieceClass;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col)
    }

    fn game_from(rows: [&str; 8]) -> GameState {
        GameState::from_board(Board::from_rows(&rows).unwrap(), GameConfig::default()).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let game = GameState::default();
        assert_eq!(game.turn(), 1);
        assert_eq!(game.to_move(), Faction::Defender);
        assert_eq!(game.phase(), Phase::AwaitingSelection);
        assert_eq!(game.pending_ability(), None);
        assert_eq!(game.energy(Faction::Defender), 10);
        assert_eq!(game.energy(Faction::Pathogen), 10);
        assert!(game.concealed_squares().is_empty());
    }

    #[test]
    fn test_select_then_move() {
        let mut game = GameState::default();
        assert_eq!(
            game.select_square(sq(6, 4)),
            Ok(Event::Selected { square: sq(6, 4) })
        );
        assert_eq!(game.phase(), Phase::PieceSelected(sq(6, 4)));

        let event = game.select_square(sq(4, 4)).unwrap();
        assert!(matches!(event, Event::Moved(MoveRecord { turn: 2, .. })));
        assert_eq!(game.to_move(), Faction::Pathogen);
        assert_eq!(game.phase(), Phase::AwaitingSelection);
        assert_eq!(game.board().get(sq(4, 4)).map(|p| p.code()), Some('P'));
    }

    #[test]
    fn test_reselecting_same_square_deselects() {
        let mut game = GameState::default();
        game.select_square(sq(7, 1)).unwrap();
        assert_eq!(
            game.select_square(sq(7, 1)),
            Ok(Event::Deselected { square: sq(7, 1) })
        );
        assert_eq!(game.phase(), Phase::AwaitingSelection);
    }

    #[test]
    fn test_selecting_opponent_piece_is_not_your_turn() {
        let mut game = GameState::default();
        let err = game.select_square(sq(1, 0)).unwrap_err();
        assert!(matches!(err, GameError::NotYourTurn { .. }));
        assert_eq!(game.phase(), Phase::AwaitingSelection);
    }

    #[test]
    fn test_selecting_empty_square() {
        let mut game = GameState::default();
        assert_eq!(game.select_square(sq(4, 4)), Err(GameError::NoPiece(sq(4, 4))));
    }

    #[test]
    fn test_off_board_selection() {
        let mut game = GameState::default();
        assert_eq!(
            game.select_square(sq(8, 2)),
            Err(GameError::OutOfBounds(sq(8, 2)))
        );
    }

    #[test]
    fn test_illegal_move_clears_selection_only() {
        let mut game = GameState::default();
        game.select_square(sq(6, 4)).unwrap();
        let err = game.select_square(sq(3, 4)).unwrap_err();
        assert!(matches!(err, GameError::IllegalMove { .. }));
        assert_eq!(game.phase(), Phase::AwaitingSelection);
        assert_eq!(game.turn(), 1);
        assert_eq!(game.to_move(), Faction::Defender);
        assert_eq!(game.board(), &Board::initial());
    }

    #[test]
    fn test_own_piece_blocks() {
        let mut game = GameState::default();
        assert_eq!(
            game.try_move(sq(7, 0), sq(6, 0)),
            Err(GameError::BlockedByOwnPiece(sq(6, 0)))
        );
    }

    #[test]
    fn test_sliders_jump_by_default() {
        let mut game = GameState::default();
        // The factory passes over its own particle when blocking is off.
        let record = game.try_move(sq(7, 0), sq(4, 0)).unwrap();
        assert_eq!(record.piece.class, PieceClass::Factory);
    }

    #[test]
    fn test_path_blocking_flag() {
        let config = GameConfig {
            path_blocking: true,
            ..GameConfig::default()
        };
        let mut game = GameState::from_board(Board::initial(), config).unwrap();
        assert_eq!(
            game.try_move(sq(7, 0), sq(4, 0)),
            Err(GameError::PathBlocked {
                from: sq(7, 0),
                to: sq(4, 0),
                blocker: sq(6, 0),
            })
        );
        // Vector jumps are never blocked.
        assert!(game.try_move(sq(7, 1), sq(5, 2)).is_ok());
    }

    fn blocking_game(rows: [&str; 8]) -> GameState {
        let config = GameConfig {
            path_blocking: true,
            ..GameConfig::default()
        };
        GameState::from_board(Board::from_rows(&rows).unwrap(), config).unwrap()
    }

    #[test]
    fn test_path_blocking_stops_diagonal_sliders() {
        let mut game = blocking_game([
            "....k...", "........", "........", "........", "........", "....p...",
            "....P...", "..B..Q.K",
        ]);
        assert_eq!(
            game.try_move(sq(7, 2), sq(4, 5)),
            Err(GameError::PathBlocked {
                from: sq(7, 2),
                to: sq(4, 5),
                blocker: sq(5, 4),
            })
        );
        assert_eq!(
            game.try_move(sq(7, 5), sq(4, 2)),
            Err(GameError::PathBlocked {
                from: sq(7, 5),
                to: sq(4, 2),
                blocker: sq(6, 4),
            })
        );
        assert_eq!(game.turn(), 1);

        // Stopping on the blocker captures it.
        let record = game.try_move(sq(7, 2), sq(5, 4)).unwrap();
        assert_eq!(record.captured.map(|p| p.class), Some(PieceClass::Particle));
    }

    #[test]
    fn test_path_blocking_stops_particle_double_step() {
        let rows = [
            "....k...", "........", "........", "........", "........", "...p....",
            "...P....", "....K...",
        ];
        let mut game = blocking_game(rows);
        assert_eq!(
            game.try_move(sq(6, 3), sq(4, 3)),
            Err(GameError::PathBlocked {
                from: sq(6, 3),
                to: sq(4, 3),
                blocker: sq(5, 3),
            })
        );
        assert_eq!(game.board(), &Board::from_rows(&rows).unwrap());

        // Without blocking the particle passes over the intermediate square.
        let mut open = game_from(rows);
        assert!(open.try_move(sq(6, 3), sq(4, 3)).is_ok());
    }

    #[test]
    fn test_constructors_reject_out_of_range_rules() {
        let zero_cooldown = GameConfig {
            mutation_cooldown: 0,
            initial_energy: 100,
            ..GameConfig::default()
        };
        assert!(matches!(
            GameState::new(zero_cooldown.clone()),
            Err(ConfigError::Invalid {
                field: "mutation_cooldown",
                ..
            })
        ));
        assert!(GameState::from_board(Board::initial(), zero_cooldown).is_err());

        let premature_win = GameConfig {
            force_control_percent: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            GameState::new(premature_win),
            Err(ConfigError::Invalid {
                field: "force_control_percent",
                ..
            })
        ));

        let bad_layout = GameConfig {
            layout: Some(vec!["k".to_string()]),
            ..GameConfig::default()
        };
        assert!(matches!(
            GameState::new(bad_layout),
            Err(ConfigError::Layout(_))
        ));
    }

    #[test]
    fn test_hidden_opponent_reads_as_empty_square() {
        let mut game = GameState::default();
        game.try_move(sq(6, 0), sq(5, 0)).unwrap();
        game.activate_ability(Ability::Conceal, sq(1, 3), None)
            .unwrap();
        game.try_move(sq(1, 0), sq(2, 0)).unwrap();

        assert_eq!(game.select_square(sq(1, 3)), Err(GameError::NoPiece(sq(1, 3))));
        assert_eq!(
            game.activate_ability(Ability::Conceal, sq(1, 3), None),
            Err(GameError::NoPiece(sq(1, 3)))
        );
        // Visible opponents are still reported as such.
        assert!(matches!(
            game.select_square(sq(1, 4)),
            Err(GameError::NotYourTurn { .. })
        ));
    }

    #[test]
    fn test_capture_removes_piece_and_flags() {
        let mut game = game_from([
            "....k...", "........", "........", "...p....", "........", "........",
            "........", "...QK...",
        ]);
        let victim = game.board().get(sq(3, 3)).unwrap();
        game.status.conceal(victim.id);

        let record = game.try_move(sq(7, 3), sq(3, 3)).unwrap();
        assert_eq!(record.captured, Some(victim));
        assert!(!game.status().is_concealed(victim.id));
        assert_eq!(game.tally().captured, 1);
        assert_eq!(game.board().count(Faction::Pathogen), 1);
    }

    #[test]
    fn test_energy_accrues_to_incoming_faction() {
        let mut game = GameState::default();
        game.try_move(sq(6, 0), sq(5, 0)).unwrap();
        assert_eq!(game.energy(Faction::Pathogen), 12);
        assert_eq!(game.energy(Faction::Defender), 10);

        game.try_move(sq(1, 0), sq(2, 0)).unwrap();
        assert_eq!(game.energy(Faction::Defender), 12);
        assert_eq!(game.energy(Faction::Pathogen), 12);
    }

    #[test]
    fn test_flags_travel_with_piece() {
        let mut game = GameState::default();
        let id = game.board().get(sq(6, 2)).unwrap().id;
        game.status.conceal(id);
        game.try_move(sq(6, 2), sq(4, 2)).unwrap();
        assert_eq!(game.concealed_squares(), vec![sq(4, 2)]);
    }

    #[test]
    fn test_visibility_rules() {
        let mut game = GameState::default();
        let id = game.board().get(sq(1, 1)).unwrap().id;
        game.status.conceal(id);
        assert!(!game.is_visible_to(Faction::Defender, sq(1, 1)));
        assert!(game.is_visible_to(Faction::Pathogen, sq(1, 1)));
        assert!(game.view_for(Faction::Defender)[sq(1, 1).index()].is_none());

        game.status.tag(id);
        assert!(game.is_visible_to(Faction::Defender, sq(1, 1)));
        assert!(game.status().is_concealed(id));
    }

    #[test]
    fn test_legal_moves_from_start() {
        let game = GameState::default();
        let moves = game.legal_moves();
        assert!(moves.contains(&(sq(6, 0), sq(4, 0))));
        assert!(moves.contains(&(sq(7, 1), sq(5, 0))));
        assert!(!moves.contains(&(sq(7, 4), sq(6, 4))));
        assert!(
            moves
                .iter()
                .all(|(from, _)| game.board().get(*from).map(|p| p.faction)
                    == Some(Faction::Defender))
        );
    }

    #[test]
    fn test_unknown_ability_name_clears_pending() {
        let mut game = GameState::default();
        game.select_ability(Ability::Reveal);
        assert_eq!(
            game.select_ability_named("teleport"),
            Err(GameError::UnknownAbility("teleport".to_string()))
        );
        assert_eq!(game.pending_ability(), None);
    }

    #[test]
    fn test_cancel_clears_everything() {
        let mut game = GameState::default();
        game.select_square(sq(7, 1)).unwrap();
        game.select_ability(Ability::Tag);
        game.cancel();
        assert_eq!(game.phase(), Phase::AwaitingSelection);
        assert_eq!(game.pending_ability(), None);
    }
}
