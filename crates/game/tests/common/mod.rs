//! Deterministic driver: steps a virtual clock through the controller's
//! own deadlines so every alarm fires exactly when scheduled.

#![allow(dead_code, clippy::unwrap_used, clippy::arithmetic_side_effects)]

use embassy_time::{Duration, Instant};
use game::{EdgeOutcome, GameConfig, GameController, Position, Source};
use platform::{mocks::MockBoard, AnalogChannel};
use rand::SeedableRng;
use rand_pcg::Pcg32;

pub struct Harness {
    pub game: GameController<Pcg32>,
    pub board: MockBoard,
    pub now: Instant,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(GameConfig::DEFAULT)
    }

    pub fn with_config(config: GameConfig) -> Self {
        let mut board = MockBoard::new();
        let mut game = GameController::new(config, Pcg32::seed_from_u64(0x5EED));
        let now = Instant::from_millis(1_000);
        game.start(now, &mut board).unwrap();
        Self { game, board, now }
    }

    /// Run every alarm up to and including `ms` milliseconds from now.
    pub fn advance(&mut self, ms: u64) {
        let until = self.now + Duration::from_millis(ms);
        while let Some(deadline) = self.game.next_deadline() {
            if deadline > until {
                break;
            }
            self.now = deadline;
            self.game.run_due(deadline, &mut self.board);
        }
        self.now = until;
    }

    pub fn press(&mut self, source: Source) -> EdgeOutcome {
        self.game.on_edge(source, self.now)
    }

    /// Script the joystick so the next tick samples exactly `p`.
    pub fn aim(&mut self, p: Position) {
        self.board
            .set_analog(AnalogChannel::CursorX, u16::from(p.x) * 32);
        self.board
            .set_analog(AnalogChannel::CursorY, 4063 - u16::from(p.y) * 64);
    }

    pub fn aim_on_target(&mut self) {
        let target = self.game.state().target;
        self.aim(target);
    }

    pub fn aim_off_target(&mut self) {
        let t = self.game.state().target;
        let x = if t.x < 64 { t.x + 20 } else { t.x - 20 };
        self.aim(Position::new(x, t.y));
    }

    /// Confirm click, then wait until the switch accepts the next one.
    pub fn click(&mut self) {
        assert_eq!(self.press(Source::JoystickConfirm), EdgeOutcome::Accepted);
        self.advance(120);
    }

    pub fn hit(&mut self) {
        self.aim_on_target();
        self.click();
    }

    pub fn miss(&mut self) {
        self.aim_off_target();
        self.click();
    }

    /// Press a button and let its debounce window close.
    pub fn tap(&mut self, source: Source) {
        assert_eq!(self.press(source), EdgeOutcome::Accepted);
        self.advance(200);
    }
}
