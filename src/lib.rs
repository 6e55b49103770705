//! Corporate buzzword bingo.
//!
//! Generates 5x5 cards of meeting jargon around a fixed free space, tracks
//! marks per card and reports every completed row, column and diagonal.
//!
//! - `word_bank`: meeting types and their candidate buzzwords
//! - `shuffle`: injected randomness and the Fisher–Yates shuffle
//! - `card`: card layout, generation and mark state
//! - `win`: line table and bingo evaluation
//! - `session`: one user's card set, active card and win events
//! - `api`: typed generate request/response
//! - `share`, `board_renderer`: share text and PNG export

pub mod api;
pub mod board_renderer;
pub mod card;
pub mod config;
pub mod error;
pub mod registry;
pub mod session;
pub mod share;
pub mod shuffle;
pub mod win;
pub mod word_bank;

pub use crate::api::{GenerateRequest, GenerateResponse, handle_generate};
pub use crate::card::{Card, CardGenerator, FREE_SPACE, FREE_SPACE_INDEX, TOTAL_CELLS};
pub use crate::config::{RenderSettings, Settings};
pub use crate::error::{BingoError, Result};
pub use crate::registry::{CardRecord, CardRegistry};
pub use crate::session::{BingoEvent, CardSession, CardSet};
pub use crate::shuffle::{RandomSource, RngSource, SeededSource};
pub use crate::win::{BingoStatus, LINES, Line, evaluate};
pub use crate::word_bank::{MeetingType, MeetingTypeInfo, WordBank};
