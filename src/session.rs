use crate::error::UiError;
use crate::world::{Direction, GameStatus, World, WorldSnapshot};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Welcome,
    Playing,
    Won,
    Lost,
}

impl Phase {
    pub fn from_status(status: Option<GameStatus>) -> Self {
        match status {
            None => Phase::Welcome,
            Some(GameStatus::Played) => Phase::Playing,
            Some(GameStatus::Won) => Phase::Won,
            Some(GameStatus::Lost) => Phase::Lost,
        }
    }

    pub fn is_over(self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Welcome => "Ready",
            Phase::Playing => "Playing",
            Phase::Won => "You won!",
            Phase::Lost => "Game over",
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            Phase::Welcome => "Start",
            Phase::Playing => "Playing...",
            Phase::Won | Phase::Lost => "Replay",
        }
    }
}

/// What a start request (button, click, Enter) resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartAction {
    Started,
    /// The game is over; the caller builds a fresh world.
    Replay,
    Ignored,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusReport {
    pub phase: Phase,
    pub points: u32,
    pub best: u32,
}

pub struct GameSession<W: World> {
    world: W,
    best: u32,
}

impl<W: World> GameSession<W> {
    pub fn new(world: W, best: u32) -> Self {
        Self { world, best }
    }

    pub fn reset_best(&mut self) {
        self.best = 0;
    }

    pub fn snapshot(&self) -> Result<WorldSnapshot, UiError> {
        self.world.snapshot()
    }

    pub fn phase(&self) -> Result<Phase, UiError> {
        Ok(Phase::from_status(self.world.snapshot()?.status))
    }

    /// Starts the game if it has not started yet.
    pub fn start(&mut self) -> Result<bool, UiError> {
        if self.phase()? != Phase::Welcome {
            return Ok(false);
        }
        self.world.start();
        log::info!("game started");
        Ok(true)
    }

    pub fn on_start(&mut self) -> Result<StartAction, UiError> {
        let phase = self.phase()?;
        if phase.is_over() {
            log::info!("replay requested");
            return Ok(StartAction::Replay);
        }
        if self.start()? {
            Ok(StartAction::Started)
        } else {
            log::debug!("start ignored in {:?}", phase);
            Ok(StartAction::Ignored)
        }
    }

    pub fn turn(&self, direction: Direction) -> Result<(), UiError> {
        if self.phase()? == Phase::Playing {
            self.world.set_direction(direction);
        } else {
            log::debug!("ignoring {:?} outside of play", direction);
        }
        Ok(())
    }

    /// Steps the world while in play and returns the state to draw.
    pub fn advance(&mut self) -> Result<WorldSnapshot, UiError> {
        if self.phase()? == Phase::Playing {
            self.world.step();
        }
        let snap = self.world.snapshot()?;
        if snap.is_terminal() {
            if snap.points > self.best {
                self.best = snap.points;
            }
            log::info!("game finished: {:?} with {} points", snap.status, snap.points);
        }
        Ok(snap)
    }

    pub fn report(&self, snap: &WorldSnapshot) -> StatusReport {
        StatusReport {
            phase: Phase::from_status(snap.status),
            points: snap.points,
            best: self.best,
        }
    }
}
