// Minesweeper board engine and session clock, usable without the terminal host

pub mod tm_board;
pub mod tm_clock;

pub use tm_board::{
    Board, BoardEvent, BoardEvents, BoardState, Cell, DisplayState, FlagPolicy, GameResult,
    MinePlacement, Rules,
};
pub use tm_clock::{format_mm_ss, GameClock};
