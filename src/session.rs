// SPDX-License-Identifier: GPL-3.0-only

//! Session screen state machine
//!
//! The booth moves through four screens:
//!
//! ```text
//! Landing → Camera → Processing → Result
//!              ▲          │          │
//!              │◄─────────┘ (compose failed, photos reset)
//!              │◄────────────────────┘ (retake)
//! Landing ◄────┴─────────────────────┘ (cancel / new session)
//! ```
//!
//! Every other transition is rejected, so callers cannot, say, jump from
//! the landing screen straight into processing.

/// The screen currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Start screen with template selection
    #[default]
    Landing,
    /// Live capture with countdown
    Camera,
    /// Strip composition in flight
    Processing,
    /// Finished strip with share/retake actions
    Result,
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Screen::Landing => write!(f, "landing"),
            Screen::Camera => write!(f, "camera"),
            Screen::Processing => write!(f, "processing"),
            Screen::Result => write!(f, "result"),
        }
    }
}

/// A transition that is not part of the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: Screen,
    pub action: &'static str,
}

impl std::fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cannot {} from the {} screen", self.action, self.from)
    }
}

impl std::error::Error for InvalidTransition {}

/// Screen-level session state
#[derive(Debug, Default)]
pub struct Session {
    screen: Screen,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    fn transition(
        &mut self,
        allowed_from: &[Screen],
        to: Screen,
        action: &'static str,
    ) -> Result<(), InvalidTransition> {
        if allowed_from.contains(&self.screen) {
            self.screen = to;
            Ok(())
        } else {
            Err(InvalidTransition {
                from: self.screen,
                action,
            })
        }
    }

    /// Landing → Camera: the user picked a template and started
    pub fn start_capture(&mut self) -> Result<(), InvalidTransition> {
        self.transition(&[Screen::Landing], Screen::Camera, "start capturing")
    }

    /// Camera → Processing: all photos taken, composer running
    pub fn begin_processing(&mut self) -> Result<(), InvalidTransition> {
        self.transition(&[Screen::Camera], Screen::Processing, "begin processing")
    }

    /// Processing → Result: the strip is ready
    pub fn finish_processing(&mut self) -> Result<(), InvalidTransition> {
        self.transition(&[Screen::Processing], Screen::Result, "finish processing")
    }

    /// Processing → Camera: the composer failed; the caller must clear the
    /// photo list so capture starts fresh
    pub fn fail_processing(&mut self) -> Result<(), InvalidTransition> {
        self.transition(&[Screen::Processing], Screen::Camera, "recover from failure")
    }

    /// Result → Camera: retake; the caller clears the photo list
    pub fn retake(&mut self) -> Result<(), InvalidTransition> {
        self.transition(&[Screen::Result], Screen::Camera, "retake")
    }

    /// Camera|Result → Landing: new session / cancel
    pub fn cancel(&mut self) -> Result<(), InvalidTransition> {
        self.transition(
            &[Screen::Camera, Screen::Result],
            Screen::Landing,
            "return to landing",
        )
    }
}
