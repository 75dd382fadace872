//! Per-mode matrix layouts: which canonical key sits in each scan cell.
//!
//! Cells are listed in scan order, four per row, the first cell of a row
//! being the most significant output bit. [`KeyCode::NONE`] marks an unused
//! cell. A key may appear in several cells; every matching cell is driven.

use famikb_types::{KeyCode, Mode};

use crate::matrix::{MATRIX_CAPACITY, ROW_WIDTH};

/// A fixed cell table for one matrix mode.
#[derive(Debug, Clone, Copy)]
pub struct MatrixLayout {
    name: &'static str,
    cells: &'static [KeyCode],
}

impl MatrixLayout {
    /// Layout scanned by the console in `mode`, `None` for Generic.
    #[must_use]
    pub fn for_mode(mode: Mode) -> Option<&'static MatrixLayout> {
        match mode {
            Mode::FamilyBasic | Mode::HoriTrack => Some(&FAMILY_BASIC),
            Mode::Subor => Some(&SUBOR),
            Mode::Generic => None,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn cells(&self) -> &'static [KeyCode] {
        self.cells
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.cells.len() / ROW_WIDTH
    }

    /// Key at a cell, `None` for unused or out-of-range cells.
    #[must_use]
    pub fn key_at(&self, index: usize) -> Option<KeyCode> {
        self.cells
            .get(index)
            .copied()
            .filter(|key| *key != KeyCode::NONE)
    }

    /// Every cell index holding `key`.
    pub fn cells_for(&self, key: KeyCode) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, cell)| key != KeyCode::NONE && **cell == key)
            .map(|(index, _)| index)
    }

    /// True if `key` has at least one cell.
    #[must_use]
    pub fn contains(&self, key: KeyCode) -> bool {
        self.cells_for(key).next().is_some()
    }
}

const _: () = assert!(FAMILY_BASIC_CELLS.len() == 72);
const _: () = assert!(SUBOR_CELLS.len() == MATRIX_CAPACITY);

/// Family Basic keyboard, 18 rows of 4.
pub static FAMILY_BASIC: MatrixLayout = MatrixLayout {
    name: "family_basic",
    cells: &FAMILY_BASIC_CELLS,
};

/// Subor keyboard, 13 row pairs scanned as 26 rows of 4.
pub static SUBOR: MatrixLayout = MatrixLayout {
    name: "subor",
    cells: &SUBOR_CELLS,
};

// The grave key drives both the `@` cell (10) and the `^` cell (12).
#[rustfmt::skip]
const FAMILY_BASIC_CELLS: [KeyCode; 72] = [
    KeyCode::RIGHTBRACE, KeyCode::LEFTBRACE, KeyCode::ENTER, KeyCode::F8,
    KeyCode::END, KeyCode::YEN, KeyCode::RIGHTSHIFT, KeyCode::KATAKANAHIRAGANA,
    KeyCode::SEMICOLON, KeyCode::APOSTROPHE, KeyCode::GRAVE, KeyCode::F7,
    KeyCode::GRAVE, KeyCode::MINUS, KeyCode::SLASH, KeyCode::BACKSLASH,
    KeyCode::K, KeyCode::L, KeyCode::O, KeyCode::F6,
    KeyCode::DIGIT_0, KeyCode::P, KeyCode::COMMA, KeyCode::DOT,
    KeyCode::J, KeyCode::U, KeyCode::I, KeyCode::F5,
    KeyCode::DIGIT_8, KeyCode::DIGIT_9, KeyCode::N, KeyCode::M,
    KeyCode::H, KeyCode::G, KeyCode::Y, KeyCode::F4,
    KeyCode::DIGIT_6, KeyCode::DIGIT_7, KeyCode::V, KeyCode::B,
    KeyCode::D, KeyCode::R, KeyCode::T, KeyCode::F3,
    KeyCode::DIGIT_4, KeyCode::DIGIT_5, KeyCode::C, KeyCode::F,
    KeyCode::A, KeyCode::S, KeyCode::W, KeyCode::F2,
    KeyCode::DIGIT_3, KeyCode::E, KeyCode::Z, KeyCode::X,
    KeyCode::LEFTCTRL, KeyCode::Q, KeyCode::ESC, KeyCode::F1,
    KeyCode::DIGIT_2, KeyCode::DIGIT_1, KeyCode::TAB, KeyCode::LEFTSHIFT,
    KeyCode::LEFT, KeyCode::RIGHT, KeyCode::UP, KeyCode::HOME,
    KeyCode::INSERT, KeyCode::BACKSPACE, KeyCode::SPACE, KeyCode::DOWN,
];

// Row pair r, column c is scanned as row 2r + c.
#[rustfmt::skip]
const SUBOR_CELLS: [KeyCode; MATRIX_CAPACITY] = [
    KeyCode::DIGIT_4, KeyCode::G, KeyCode::F, KeyCode::C,
    KeyCode::F2, KeyCode::E, KeyCode::DIGIT_5, KeyCode::V,
    KeyCode::DIGIT_2, KeyCode::D, KeyCode::S, KeyCode::END,
    KeyCode::F1, KeyCode::W, KeyCode::DIGIT_3, KeyCode::X,
    KeyCode::INSERT, KeyCode::BACKSPACE, KeyCode::PAGEDOWN, KeyCode::RIGHT,
    KeyCode::F8, KeyCode::PAGEUP, KeyCode::DELETE, KeyCode::HOME,
    KeyCode::DIGIT_9, KeyCode::I, KeyCode::L, KeyCode::COMMA,
    KeyCode::F5, KeyCode::O, KeyCode::DIGIT_0, KeyCode::DOT,
    KeyCode::RIGHTBRACE, KeyCode::ENTER, KeyCode::UP, KeyCode::LEFT,
    KeyCode::F7, KeyCode::LEFTBRACE, KeyCode::BACKSLASH, KeyCode::DOWN,
    KeyCode::Q, KeyCode::CAPSLOCK, KeyCode::Z, KeyCode::TAB,
    KeyCode::ESC, KeyCode::A, KeyCode::DIGIT_1, KeyCode::LEFTCTRL,
    KeyCode::DIGIT_7, KeyCode::Y, KeyCode::K, KeyCode::M,
    KeyCode::F4, KeyCode::U, KeyCode::DIGIT_8, KeyCode::J,
    KeyCode::MINUS, KeyCode::SEMICOLON, KeyCode::APOSTROPHE, KeyCode::SLASH,
    KeyCode::F6, KeyCode::P, KeyCode::EQUAL, KeyCode::LEFTSHIFT,
    KeyCode::T, KeyCode::H, KeyCode::N, KeyCode::SPACE,
    KeyCode::F3, KeyCode::R, KeyCode::DIGIT_6, KeyCode::B,
    KeyCode::KP6, KeyCode::KP5, KeyCode::KP2, KeyCode::KP1,
    KeyCode::KP8, KeyCode::KPMINUS, KeyCode::KPPLUS, KeyCode::KPASTERISK,
    KeyCode::KP4, KeyCode::KP0, KeyCode::KP9, KeyCode::KP3,
    KeyCode::KP7, KeyCode::KPDOT, KeyCode::KPSLASH, KeyCode::NUMLOCK,
    KeyCode::GRAVE, KeyCode::KPENTER, KeyCode::RIGHTSHIFT, KeyCode::LEFTALT,
    KeyCode::F9, KeyCode::F10, KeyCode::F11, KeyCode::F12,
    KeyCode::PAUSE, KeyCode::RIGHTCTRL, KeyCode::RIGHTALT, KeyCode::NONE,
    KeyCode::NONE, KeyCode::NONE, KeyCode::NONE, KeyCode::NONE,
];
