// SPDX-License-Identifier: GPL-3.0-only

//! Shutter sound playback
//!
//! Plays the freedesktop camera-shutter sample through whichever system
//! player is installed. Sound is cosmetic: every failure here is logged
//! and swallowed so a missing player never breaks a capture.

use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Freedesktop sound theme sample played on capture
const SHUTTER_SAMPLE: &str = "/usr/share/sounds/freedesktop/stereo/camera-shutter.oga";

/// Player candidates, tried in order
const PLAYERS: [(&str, &[&str]); 3] = [
    ("canberra-gtk-play", &["-i", "camera-shutter"]),
    ("pw-play", &[SHUTTER_SAMPLE]),
    ("paplay", &[SHUTTER_SAMPLE]),
];

/// Shutter sound player
pub struct ShutterSound {
    muted: bool,
}

impl ShutterSound {
    pub fn new(muted: bool) -> Self {
        Self { muted }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Fire the shutter sound unless muted.
    ///
    /// The player runs detached; we do not wait for it.
    pub fn play(&self) {
        if self.muted {
            return;
        }

        for (player, args) in PLAYERS {
            match Command::new(player)
                .args(args)
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
            {
                Ok(_) => {
                    debug!(player, "Shutter sound triggered");
                    return;
                }
                Err(e) => {
                    debug!(player, error = %e, "Player unavailable, trying next");
                }
            }
        }

        warn!("No audio player available, shutter sound skipped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_is_silent() {
        // Must return without touching any player
        let sound = ShutterSound::new(true);
        sound.play();
        assert!(sound.is_muted());
    }

    #[test]
    fn test_toggle() {
        let mut sound = ShutterSound::new(false);
        sound.set_muted(true);
        assert!(sound.is_muted());
        sound.set_muted(false);
        assert!(!sound.is_muted());
    }
}
