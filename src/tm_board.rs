// Board engine: grid model, mine layout, adjacency counts, reveal with
// flood fill, and win/loss evaluation.
// The engine owns all cell storage and reports changes through `BoardEvents`.

use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Default message sent with `game_ended` on a win
pub const WIN_MESSAGE: &str = "Congratulations! You win!";
/// Default message sent with `game_ended` on a loss
pub const LOSS_MESSAGE: &str = "Bad luck! You lose!";

/// What a host should draw for a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Hidden,
    Flagged,
    RevealedNumber(u8), // 1..=8
    RevealedBlank,
    RevealedMine,
}

/// Final outcome of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Won,
    Lost,
}

/// Lifecycle of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardState {
    Uninitialized,
    Ready,  // mines placed, nothing revealed yet
    Active, // at least one reveal
    Ended(GameResult),
}

/// Whether a flag stops a reveal on that cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlagPolicy {
    /// Flags are markers only; revealing a flagged cell clears the flag
    #[default]
    Cosmetic,
    /// Flagged cells are skipped by reveal and by flood expansion
    Strict,
}

/// Which cells may receive a mine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MinePlacement {
    #[default]
    FullGrid,
    /// Column 0 and row 0 never hold a mine
    SkipFirstRowAndColumn,
}

/// Engine rules chosen by the host
#[derive(Debug, Clone)]
pub struct Rules {
    pub flag_policy: FlagPolicy,
    pub mine_placement: MinePlacement,
    pub win_message: &'static str,
    pub loss_message: &'static str,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            flag_policy: FlagPolicy::default(),
            mine_placement: MinePlacement::default(),
            win_message: WIN_MESSAGE,
            loss_message: LOSS_MESSAGE,
        }
    }
}

/// A single cell on the board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    pub is_mine: bool,
    pub is_flagged: bool,
    pub is_revealed: bool,
    pub adjacent: u8, // meaningful only when !is_mine
}

impl Cell {
    /// Display state for this cell as seen by the player
    pub fn display_state(&self) -> DisplayState {
        if self.is_revealed {
            if self.is_mine {
                DisplayState::RevealedMine
            } else if self.adjacent > 0 {
                DisplayState::RevealedNumber(self.adjacent)
            } else {
                DisplayState::RevealedBlank
            }
        } else if self.is_flagged {
            DisplayState::Flagged
        } else {
            DisplayState::Hidden
        }
    }
}

/// Notifications sent by the engine to its host, synchronously.
pub trait BoardEvents {
    /// A new grid was allocated; every cell is hidden
    fn board_reset(&mut self, _width: usize, _height: usize) {}
    fn cell_changed(&mut self, col: usize, row: usize, state: DisplayState);
    /// Sent exactly once per session
    fn game_ended(&mut self, won: bool, message: &str);
}

/// Owned form of a notification, for hosts that drain events after each call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    Reset { width: usize, height: usize },
    CellChanged { col: usize, row: usize, state: DisplayState },
    GameEnded { won: bool, message: String },
}

impl BoardEvents for Vec<BoardEvent> {
    fn board_reset(&mut self, width: usize, height: usize) {
        self.push(BoardEvent::Reset { width, height });
    }

    fn cell_changed(&mut self, col: usize, row: usize, state: DisplayState) {
        self.push(BoardEvent::CellChanged { col, row, state });
    }

    fn game_ended(&mut self, won: bool, message: &str) {
        self.push(BoardEvent::GameEnded {
            won,
            message: message.to_string(),
        });
    }
}

impl BoardEvents for () {
    fn cell_changed(&mut self, _col: usize, _row: usize, _state: DisplayState) {}
    fn game_ended(&mut self, _won: bool, _message: &str) {}
}

/// Minesweeper board engine
pub struct Board {
    width: usize,
    height: usize,
    mines: usize,
    cells: Vec<Cell>,
    revealed: usize, // revealed non-mine cells
    state: BoardState,
    rules: Rules,
    rng: StdRng,
}

impl Board {
    /// Create an uninitialized engine with an entropy-seeded RNG
    pub fn new(rules: Rules) -> Self {
        Self::with_rng(rules, StdRng::from_entropy())
    }

    /// Create an uninitialized engine whose mine layouts are reproducible
    pub fn with_seed(rules: Rules, seed: u64) -> Self {
        Self::with_rng(rules, StdRng::seed_from_u64(seed))
    }

    fn with_rng(rules: Rules, rng: StdRng) -> Self {
        Board {
            width: 0,
            height: 0,
            mines: 0,
            cells: Vec::new(),
            revealed: 0,
            state: BoardState::Uninitialized,
            rules,
            rng,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn mine_count(&self) -> usize {
        self.mines
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Replace the rules; takes effect from the next action
    pub fn set_rules(&mut self, rules: Rules) {
        self.rules = rules;
    }

    /// Number of revealed non-mine cells
    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    pub fn flag_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_flagged).count()
    }

    /// Mine counter display value (total mines - flags)
    /// Can be negative if the player places too many flags
    pub fn remaining_mines(&self) -> isize {
        self.mines as isize - self.flag_count() as isize
    }

    pub fn in_bounds(&self, col: usize, row: usize) -> bool {
        col < self.width && row < self.height
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        if self.in_bounds(col, row) {
            self.cells.get(self.index(col, row))
        } else {
            None
        }
    }

    pub fn display_state(&self, col: usize, row: usize) -> Option<DisplayState> {
        self.cell(col, row).map(Cell::display_state)
    }

    fn index(&self, col: usize, row: usize) -> usize {
        row * self.width + col
    }

    fn accepts_input(&self) -> bool {
        matches!(self.state, BoardState::Ready | BoardState::Active)
    }

    /// Start a new session with a random mine layout.
    /// Fails without touching the current board if the parameters are invalid.
    #[instrument(level = "trace", skip(self, events))]
    pub fn initialize(
        &mut self,
        width: usize,
        height: usize,
        mine_count: usize,
        events: &mut impl BoardEvents,
    ) -> Result<()> {
        validate_params(width, height, mine_count)?;
        if self.rules.mine_placement == MinePlacement::SkipFirstRowAndColumn
            && mine_count > (width - 1) * (height - 1)
        {
            warn!(width, height, mine_count, "not enough cells outside the first row and column");
            bail!(
                "{} mines do not fit a {}x{} board without its first row and column",
                mine_count,
                width,
                height
            );
        }
        self.allocate(width, height, mine_count, events);
        self.place_mines();
        self.compute_adjacency();
        self.state = BoardState::Ready;
        info!("New board: {}x{} with {} mines", width, height, mine_count);
        Ok(())
    }

    /// Start a new session with a fixed mine layout given as (col, row) pairs
    #[instrument(level = "trace", skip(self, mines, events))]
    pub fn initialize_with_mines(
        &mut self,
        width: usize,
        height: usize,
        mines: &[(usize, usize)],
        events: &mut impl BoardEvents,
    ) -> Result<()> {
        validate_params(width, height, mines.len())?;
        let mut layout = vec![false; width * height];
        for &(col, row) in mines {
            if col >= width || row >= height {
                bail!("mine at ({}, {}) is outside a {}x{} board", col, row, width, height);
            }
            let idx = row * width + col;
            if layout[idx] {
                bail!("duplicate mine at ({}, {})", col, row);
            }
            layout[idx] = true;
        }
        self.allocate(width, height, mines.len(), events);
        for (cell, mine) in self.cells.iter_mut().zip(layout) {
            cell.is_mine = mine;
        }
        self.compute_adjacency();
        self.state = BoardState::Ready;
        info!("New board: {}x{} with {} fixed mines", width, height, mines.len());
        Ok(())
    }

    fn allocate(
        &mut self,
        width: usize,
        height: usize,
        mine_count: usize,
        events: &mut impl BoardEvents,
    ) {
        self.width = width;
        self.height = height;
        self.mines = mine_count;
        self.cells = vec![Cell::default(); width * height];
        self.revealed = 0;
        self.state = BoardState::Uninitialized;
        events.board_reset(width, height);
    }

    /// Mark `mine_count` distinct cells as mines, uniformly without replacement
    fn place_mines(&mut self) {
        let candidates: Vec<usize> = match self.rules.mine_placement {
            MinePlacement::FullGrid => (0..self.cells.len()).collect(),
            MinePlacement::SkipFirstRowAndColumn => (1..self.height)
                .flat_map(|row| (1..self.width).map(move |col| (col, row)))
                .map(|(col, row)| self.index(col, row))
                .collect(),
        };
        for pick in index::sample(&mut self.rng, candidates.len(), self.mines) {
            self.cells[candidates[pick]].is_mine = true;
        }
    }

    /// Set the adjacency count of every non-mine cell from the mine layout
    fn compute_adjacency(&mut self) {
        for row in 0..self.height {
            for col in 0..self.width {
                let idx = self.index(col, row);
                if self.cells[idx].is_mine {
                    continue;
                }
                let adj = self
                    .neighbors(col, row)
                    .filter(|&(c, r)| self.cells[self.index(c, r)].is_mine)
                    .count();
                self.cells[idx].adjacent = adj as u8;
            }
        }
    }

    /// Moore neighborhood of (col, row), clipped at the borders
    fn neighbors(&self, col: usize, row: usize) -> impl Iterator<Item = (usize, usize)> + use<> {
        let (w, h) = (self.width, self.height);
        (row.saturating_sub(1)..=(row + 1).min(h - 1))
            .flat_map(move |r| (col.saturating_sub(1)..=(col + 1).min(w - 1)).map(move |c| (c, r)))
            .filter(move |&(c, r)| !(c == col && r == row))
    }

    /// Reveal a cell.
    /// - A mine ends the session as lost and nothing else is revealed
    /// - A numbered cell is revealed alone
    /// - A zero cell floods its connected zero region and the numbered border
    #[instrument(level = "trace", skip(self, events))]
    pub fn reveal(&mut self, col: usize, row: usize, events: &mut impl BoardEvents) {
        if !self.accepts_input() {
            debug!("Ignoring reveal at ({}, {}) in state {:?}", col, row, self.state);
            return;
        }
        if !self.in_bounds(col, row) {
            warn!("Invalid reveal position: ({}, {})", col, row);
            return;
        }
        let cell = self.cells[self.index(col, row)];
        if cell.is_revealed {
            return;
        }
        if cell.is_flagged && self.rules.flag_policy == FlagPolicy::Strict {
            debug!("Ignoring reveal on flagged cell ({}, {})", col, row);
            return;
        }

        self.state = BoardState::Active;
        self.reveal_cell(col, row, events);

        if cell.is_mine {
            warn!("Mine hit at ({}, {}) - game over", col, row);
            self.end(GameResult::Lost, events);
            return;
        }
        if cell.adjacent == 0 {
            let before = self.revealed;
            self.flood_from(col, row, events);
            debug!("Flood from ({}, {}) revealed {} cells", col, row, self.revealed - before + 1);
        }
        if self.evaluate_win() {
            info!("All safe cells revealed");
            self.end(GameResult::Won, events);
        }
    }

    /// Expand from a zero cell that is already revealed
    fn flood_from(&mut self, col: usize, row: usize, events: &mut impl BoardEvents) {
        let strict = self.rules.flag_policy == FlagPolicy::Strict;
        let mut stack = vec![(col, row)];
        while let Some((c, r)) = stack.pop() {
            for (nc, nr) in self.neighbors(c, r) {
                let next = self.cells[self.index(nc, nr)];
                if next.is_revealed || (strict && next.is_flagged) {
                    continue;
                }
                debug_assert!(!next.is_mine, "flood reached a mine at ({nc}, {nr})");
                self.reveal_cell(nc, nr, events);
                if next.adjacent == 0 {
                    stack.push((nc, nr));
                }
            }
        }
    }

    fn reveal_cell(&mut self, col: usize, row: usize, events: &mut impl BoardEvents) {
        let idx = self.index(col, row);
        let cell = &mut self.cells[idx];
        cell.is_revealed = true;
        cell.is_flagged = false;
        if !cell.is_mine {
            self.revealed += 1;
        }
        events.cell_changed(col, row, cell.display_state());
    }

    /// Toggle the flag on an unrevealed cell
    #[instrument(level = "trace", skip(self, events))]
    pub fn toggle_flag(&mut self, col: usize, row: usize, events: &mut impl BoardEvents) {
        if !self.accepts_input() {
            debug!("Ignoring flag at ({}, {}) in state {:?}", col, row, self.state);
            return;
        }
        if !self.in_bounds(col, row) {
            warn!("Invalid flag position: ({}, {})", col, row);
            return;
        }
        let idx = self.index(col, row);
        let cell = &mut self.cells[idx];
        if cell.is_revealed {
            return;
        }
        cell.is_flagged = !cell.is_flagged;
        debug!("Cell ({}, {}) flagged: {}", col, row, cell.is_flagged);
        events.cell_changed(col, row, cell.display_state());
    }

    /// True when every non-mine cell has been revealed
    pub fn evaluate_win(&self) -> bool {
        self.state != BoardState::Uninitialized
            && self.revealed == self.width * self.height - self.mines
    }

    fn end(&mut self, result: GameResult, events: &mut impl BoardEvents) {
        self.state = BoardState::Ended(result);
        let (won, message) = match result {
            GameResult::Won => (true, self.rules.win_message),
            GameResult::Lost => (false, self.rules.loss_message),
        };
        info!("Game ended: {:?}", result);
        events.game_ended(won, message);
    }
}

fn validate_params(width: usize, height: usize, mine_count: usize) -> Result<()> {
    if width == 0 || height == 0 {
        warn!(width, height, "rejected empty board");
        bail!("board dimensions must be positive, got {}x{}", width, height);
    }
    let Some(area) = width.checked_mul(height) else {
        warn!(width, height, "rejected oversized board");
        bail!("a {}x{} board does not fit in memory", width, height);
    };
    if mine_count >= area {
        warn!(width, height, mine_count, "rejected mine count");
        bail!(
            "{} mines do not leave a safe cell on a {}x{} board",
            mine_count,
            width,
            height
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Beginner layout used by several tests:
    //   col: 0 1 2 3 4 5 6 7 8
    // row 0  . . . . . . . . .
    // row 1  . . . . . . . . .
    // row 2  . . . . . . . . .
    // row 3  . . . . . . . . .
    // row 4  . . . . * * * . .
    // row 5  . . . . * . * . .
    // row 6  . . . . * * * . .
    // row 7  . . . . . . . . .
    // row 8  * * . . . . . . .
    const MINES: [(usize, usize); 10] = [
        (4, 4), (5, 4), (6, 4),
        (4, 5), (6, 5),
        (4, 6), (5, 6), (6, 6),
        (0, 8), (1, 8),
    ];

    fn fixed_board(policy: FlagPolicy) -> Board {
        let rules = Rules { flag_policy: policy, ..Rules::default() };
        let mut board = Board::with_seed(rules, 7);
        board.initialize_with_mines(9, 9, &MINES, &mut ()).unwrap();
        board
    }

    fn brute_force_adjacent(board: &Board, col: usize, row: usize) -> u8 {
        let mut n = 0;
        for r in row as isize - 1..=row as isize + 1 {
            for c in col as isize - 1..=col as isize + 1 {
                if (c, r) == (col as isize, row as isize) || c < 0 || r < 0 {
                    continue;
                }
                if let Some(cell) = board.cell(c as usize, r as usize) {
                    if cell.is_mine {
                        n += 1;
                    }
                }
            }
        }
        n
    }

    #[test]
    fn test_random_layout_counts() {
        for (w, h, m) in [(9, 9, 10), (16, 16, 40), (30, 16, 99), (1, 2, 1), (5, 3, 14)] {
            let mut board = Board::with_seed(Rules::default(), 42);
            board.initialize(w, h, m, &mut ()).unwrap();
            let mut mines = 0;
            for row in 0..h {
                for col in 0..w {
                    let cell = board.cell(col, row).unwrap();
                    if cell.is_mine {
                        mines += 1;
                    } else {
                        assert_eq!(cell.adjacent, brute_force_adjacent(&board, col, row));
                    }
                }
            }
            assert_eq!(mines, m);
            assert_eq!(board.state(), BoardState::Ready);
        }
    }

    #[test]
    fn test_skip_first_row_and_column() {
        let rules = Rules { mine_placement: MinePlacement::SkipFirstRowAndColumn, ..Rules::default() };
        let mut board = Board::with_seed(rules, 3);
        board.initialize(9, 9, 64, &mut ()).unwrap();
        for i in 0..9 {
            assert!(!board.cell(i, 0).unwrap().is_mine);
            assert!(!board.cell(0, i).unwrap().is_mine);
        }
        assert!(board.initialize(9, 9, 65, &mut ()).is_err());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let mut board = Board::new(Rules::default());
        assert!(board.initialize(0, 9, 0, &mut ()).is_err());
        assert!(board.initialize(9, 0, 0, &mut ()).is_err());
        assert!(board.initialize(3, 3, 9, &mut ()).is_err());
        assert!(board.initialize_with_mines(3, 3, &[(3, 0)], &mut ()).is_err());
        assert!(board.initialize_with_mines(3, 3, &[(1, 1), (1, 1)], &mut ()).is_err());
        assert_eq!(board.state(), BoardState::Uninitialized);
    }

    #[test]
    fn test_oversized_board_rejected() {
        let mut board = Board::new(Rules::default());
        assert!(board.initialize(usize::MAX / 2, 4, 1, &mut ()).is_err());
        assert!(board.initialize_with_mines(4, usize::MAX, &[], &mut ()).is_err());

        board.set_rules(Rules { mine_placement: MinePlacement::SkipFirstRowAndColumn, ..Rules::default() });
        assert!(board.initialize(usize::MAX, usize::MAX, 1, &mut ()).is_err());
        assert_eq!(board.state(), BoardState::Uninitialized);
    }

    #[test]
    fn test_failed_initialize_keeps_previous_board() {
        let mut board = fixed_board(FlagPolicy::Cosmetic);
        board.reveal(0, 7, &mut ());
        assert!(board.initialize(4, 4, 16, &mut ()).is_err());
        assert_eq!((board.width(), board.height()), (9, 9));
        assert!(board.cell(0, 7).unwrap().is_revealed);
    }

    #[test]
    fn test_initialize_emits_reset_only() {
        let mut events = Vec::new();
        let mut board = Board::with_seed(Rules::default(), 1);
        board.initialize(4, 3, 2, &mut events).unwrap();
        assert_eq!(events, vec![BoardEvent::Reset { width: 4, height: 3 }]);
    }

    #[test]
    fn test_reveal_mine_loses() {
        let mut board = fixed_board(FlagPolicy::Cosmetic);
        let mut events = Vec::new();
        board.reveal(5, 4, &mut events);
        assert_eq!(
            events,
            vec![
                BoardEvent::CellChanged { col: 5, row: 4, state: DisplayState::RevealedMine },
                BoardEvent::GameEnded { won: false, message: LOSS_MESSAGE.to_string() },
            ]
        );
        assert_eq!(board.state(), BoardState::Ended(GameResult::Lost));
        assert_eq!(board.revealed_count(), 0);
    }

    #[test]
    fn test_reveal_number_reveals_single_cell() {
        let mut board = fixed_board(FlagPolicy::Cosmetic);
        let mut events = Vec::new();
        board.reveal(3, 5, &mut events);
        assert_eq!(
            events,
            vec![BoardEvent::CellChanged { col: 3, row: 5, state: DisplayState::RevealedNumber(3) }]
        );
        assert_eq!(board.state(), BoardState::Active);
    }

    #[test]
    fn test_flood_reveals_region_and_border() {
        let mut board = fixed_board(FlagPolicy::Cosmetic);
        let mut events = Vec::new();
        board.reveal(0, 0, &mut events);

        // Every safe cell touches the outer zero region except the enclosed
        // (5, 5), which stays hidden.
        for row in 0..9 {
            for col in 0..9 {
                let cell = board.cell(col, row).unwrap();
                if cell.is_mine {
                    assert!(!cell.is_revealed, "mine at ({col}, {row}) revealed");
                }
            }
        }
        assert!(!board.cell(5, 5).unwrap().is_revealed);
        assert_eq!(board.display_state(2, 8), Some(DisplayState::RevealedNumber(1)));
        assert_eq!(board.display_state(7, 5), Some(DisplayState::RevealedNumber(3)));
        assert_eq!(board.display_state(1, 7), Some(DisplayState::RevealedNumber(2)));
        assert_eq!(board.display_state(8, 8), Some(DisplayState::RevealedBlank));

        // one event per newly revealed cell, no game end
        assert_eq!(events.len(), board.revealed_count());
        assert_eq!(board.revealed_count(), 81 - 10 - 1);
        assert_eq!(board.state(), BoardState::Active);
    }

    #[test]
    fn test_reveal_is_idempotent() {
        let mut board = fixed_board(FlagPolicy::Cosmetic);
        board.reveal(5, 5, &mut ());
        let mut events = Vec::new();
        board.reveal(5, 5, &mut events);
        board.reveal(9, 0, &mut events);
        board.toggle_flag(5, 5, &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn test_win_emitted_once() {
        let mut board = fixed_board(FlagPolicy::Cosmetic);
        let mut events = Vec::new();
        board.reveal(0, 0, &mut events);
        assert!(!board.evaluate_win());
        board.reveal(5, 5, &mut events);
        assert!(board.evaluate_win());
        assert_eq!(board.state(), BoardState::Ended(GameResult::Won));
        let ends: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, BoardEvent::GameEnded { .. }))
            .collect();
        assert_eq!(
            ends,
            vec![&BoardEvent::GameEnded { won: true, message: WIN_MESSAGE.to_string() }]
        );
    }

    #[test]
    fn test_no_mutation_after_end() {
        let mut board = fixed_board(FlagPolicy::Cosmetic);
        board.reveal(4, 4, &mut ());
        let mut events = Vec::new();
        board.reveal(0, 0, &mut events);
        board.toggle_flag(1, 1, &mut events);
        assert!(events.is_empty());
        assert!(!board.cell(0, 0).unwrap().is_revealed);
        assert!(!board.cell(1, 1).unwrap().is_flagged);
    }

    #[test]
    fn test_cosmetic_flag_does_not_block_reveal() {
        let mut board = fixed_board(FlagPolicy::Cosmetic);
        let mut events = Vec::new();
        board.toggle_flag(3, 5, &mut events);
        assert_eq!(board.display_state(3, 5), Some(DisplayState::Flagged));
        board.reveal(3, 5, &mut events);
        assert_eq!(board.display_state(3, 5), Some(DisplayState::RevealedNumber(3)));
        assert!(!board.cell(3, 5).unwrap().is_flagged);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_strict_flag_blocks_reveal_and_flood() {
        let mut board = fixed_board(FlagPolicy::Strict);
        board.toggle_flag(3, 5, &mut ());
        let mut events = Vec::new();
        board.reveal(3, 5, &mut events);
        assert!(events.is_empty());
        assert_eq!(board.state(), BoardState::Ready);

        // 5x1 strip: . F . . *
        // the flag cuts the flood off from the zero cell behind it
        let rules = Rules { flag_policy: FlagPolicy::Strict, ..Rules::default() };
        let mut strip = Board::with_seed(rules, 3);
        strip.initialize_with_mines(5, 1, &[(4, 0)], &mut ()).unwrap();
        strip.toggle_flag(1, 0, &mut ());
        let mut events = Vec::new();
        strip.reveal(0, 0, &mut events);
        assert_eq!(
            events,
            vec![BoardEvent::CellChanged { col: 0, row: 0, state: DisplayState::RevealedBlank }]
        );
        assert_eq!(strip.display_state(1, 0), Some(DisplayState::Flagged));
        assert_eq!(strip.display_state(2, 0), Some(DisplayState::Hidden));
        assert_eq!(strip.display_state(3, 0), Some(DisplayState::Hidden));
        assert_eq!(strip.state(), BoardState::Active);
    }

    #[test]
    fn test_toggle_flag_round_trip_and_counter() {
        let mut board = fixed_board(FlagPolicy::Cosmetic);
        let mut events = Vec::new();
        board.toggle_flag(2, 2, &mut events);
        assert_eq!(board.remaining_mines(), 9);
        board.toggle_flag(2, 2, &mut events);
        assert_eq!(board.remaining_mines(), 10);
        assert_eq!(
            events,
            vec![
                BoardEvent::CellChanged { col: 2, row: 2, state: DisplayState::Flagged },
                BoardEvent::CellChanged { col: 2, row: 2, state: DisplayState::Hidden },
            ]
        );
        // flags never move the board out of Ready
        assert_eq!(board.state(), BoardState::Ready);
    }

    #[test]
    fn test_uninitialized_ignores_actions() {
        let mut board = Board::new(Rules::default());
        let mut events = Vec::new();
        board.reveal(0, 0, &mut events);
        board.toggle_flag(0, 0, &mut events);
        assert!(events.is_empty());
        assert!(!board.evaluate_win());
    }

    #[test]
    fn test_zero_mines_single_reveal_wins() {
        let mut board = Board::with_seed(Rules::default(), 9);
        board.initialize(4, 4, 0, &mut ()).unwrap();
        let mut events = Vec::new();
        board.reveal(2, 1, &mut events);
        assert_eq!(events.len(), 17);
        assert_eq!(board.state(), BoardState::Ended(GameResult::Won));
    }

    #[test]
    fn test_large_open_board_does_not_recurse() {
        let mut board = Board::with_seed(Rules::default(), 11);
        board.initialize_with_mines(500, 500, &[(499, 499)], &mut ()).unwrap();
        board.reveal(0, 0, &mut ());
        assert_eq!(board.state(), BoardState::Ended(GameResult::Won));
        assert_eq!(board.revealed_count(), 500 * 500 - 1);
    }
}
