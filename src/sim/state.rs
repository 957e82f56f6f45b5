//! Game state and mode controller types
//!
//! All per-session state lives here. The simulation is deterministic:
//! same seed, same config, same input trace - same session.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::matrix::TileMatrix;
use super::petting::{Feedback, PettingSession};
use super::tigers::{TigerId, TigerManager};
use crate::config::{Config, ConfigError};
use crate::consts::{FRAME_CENTER, PLAYER_RADIUS};
use crate::Rect;

/// Which update path runs this tick; exactly one mode is ever active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// A message screen is up, waiting for dismissal
    Message,
    /// Free movement across the tile map
    Walking,
    /// Petting minigame against the active tiger
    Petting,
    /// Help screen interrupt; resumes whatever it interrupted
    Help,
    /// Terminal; only a full restart leaves this
    GameOver,
}

/// Where a dismissed message screen leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextMode {
    Walking,
    Petting,
    GameOver,
}

/// A pending message screen
#[derive(Debug, Clone)]
pub struct MessageScreen {
    pub text: String,
    /// Dismiss input is ignored while this runs down, so the press that
    /// raised the screen cannot also clear it
    pub cooldown: u32,
    pub next: NextMode,
}

/// Things that happened during a tick, for the host to react to
/// (audio, FX, logging); draining them never changes the simulation
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ModeChanged(Mode),
    Recycled {
        direction: super::grid::Direction,
    },
    Rehomed {
        tiger: TigerId,
    },
    Roar {
        tiger: TigerId,
    },
    PettingStarted {
        tiger: TigerId,
    },
    PettingEnded {
        tiger: TigerId,
        outcome: Feedback,
        purr_score: f32,
        ticks_spent: u32,
    },
    QuitRequested,
}

/// Index bounds for rolling visuals; the sim never touches real images
#[derive(Debug, Clone, Copy)]
pub struct AssetCatalog {
    pub tile_images: usize,
    pub portraits: usize,
}

/// Complete game state for one session
#[derive(Debug)]
pub struct GameState {
    pub seed: u64,
    pub config: Config,
    pub catalog: AssetCatalog,
    pub rng: Pcg32,

    pub mode: Mode,
    pub matrix: TileMatrix,
    pub tigers: TigerManager,

    /// Present exactly while mode == Petting
    pub session: Option<PettingSession>,
    /// The tiger currently engaged (collision through end of petting)
    pub active_tiger: Option<TigerId>,
    /// Present while mode == Message
    pub message: Option<MessageScreen>,

    /// Mode to resume when the help screen is dismissed
    pub help_resume: Option<Mode>,
    pub help_cooldown: u32,

    /// Sum of purr scores across all finished sessions (partial credit
    /// counts even when a session fails)
    pub total_score: f32,
    pub time_ticks: u64,
    /// Set once the player asked to quit; the driver stops the loop
    pub quit: bool,

    events: Vec<GameEvent>,
}

impl GameState {
    /// Start a session. The config is the precondition gate; an invalid
    /// matrix size never reaches the matrix constructor.
    pub fn new(seed: u64, config: Config, catalog: AssetCatalog) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut matrix = TileMatrix::new(config.matrix_size, config.tile_size, &mut rng, &catalog);
        let mut tigers = TigerManager::new(&config, &catalog, &mut rng);
        tigers.place_all(&mut matrix, &mut rng);

        log::info!(
            "New session: seed {}, {}x{} window, {} tigers",
            seed,
            config.matrix_size,
            config.matrix_size,
            tigers.len()
        );

        let mut state = Self {
            seed,
            catalog,
            rng,
            mode: Mode::Message,
            matrix,
            tigers,
            session: None,
            active_tiger: None,
            message: None,
            help_resume: None,
            help_cooldown: 0,
            total_score: 0.0,
            time_ticks: 0,
            quit: false,
            events: Vec::new(),
            config,
        };
        state.show_message(welcome_text(), NextMode::Walking);
        Ok(state)
    }

    /// The player's collision bounds, fixed at the frame center
    pub fn player_bounds(&self) -> Rect {
        Rect::from_center_size(FRAME_CENTER, glam::Vec2::splat(PLAYER_RADIUS * 2.0))
    }

    /// Raise a message screen and switch to MESSAGE mode
    pub fn show_message(&mut self, text: String, next: NextMode) {
        log::info!("Message screen: {:?} -> {:?}", text, next);
        self.message = Some(MessageScreen {
            text,
            cooldown: self.config.message_cooldown_ticks,
            next,
        });
        self.set_mode(Mode::Message);
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            self.push_event(GameEvent::ModeChanged(mode));
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand this tick's events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

pub fn welcome_text() -> String {
    "Somewhere out there, wild tigers are waiting to be petted.\n\
     Walk with the arrow keys. Press space to set out."
        .to_string()
}

pub fn before_pet_text() -> String {
    "You found a wild tiger! Pet it at the speed it likes -\n\
     not too fast, not too slow. Press space when ready."
        .to_string()
}

pub fn outcome_text(outcome: Feedback) -> String {
    match outcome {
        Feedback::Purr => "The tiger purrs and nuzzles your hand. A friend for life!",
        Feedback::Yawn => "The tiger yawns, stretches, and wanders off. Too boring.",
        Feedback::Grrr => "GRRR! The tiger swats you away. Far too rough.",
    }
    .to_string()
}

pub fn game_over_text(total_score: f32, tiger_count: usize) -> String {
    format!(
        "Every one of the {tiger_count} tigers has been petted.\n\
         Final purr score: {total_score:.0}. Press space."
    )
}

pub fn help_text() -> String {
    "Arrow keys walk. Bump into a tiger to pet it: hold the mouse\n\
     button and stroke at the speed it likes. Watch the clock -\n\
     when it runs out, the tiger counts as petted. Space resumes."
        .to_string()
}
