//! Live Havan Session
//!
//! Couples the fire loop with the mantra progression. The session owns both
//! resources: the loop player (and through it the output device) and the
//! pending mantra timer. `stop()` releases them explicitly and dropping the
//! session releases them on every other exit path.
//!
//! Time is driven by the caller through [`HavanSession::tick`], so the
//! session never spawns threads or sleeps.

use std::time::Duration;

use log::{debug, info};
use uuid::Uuid;

use crate::content::{Mantra, MantraCycle};
use crate::engine::player::{LoopPlayer, OutputDevice};
use crate::error::Result;

/// Countdown until the current mantra gives way to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MantraTimer {
    remaining: Duration,
}

/// A running (or idle) havan: fire audio plus mantra display
pub struct HavanSession<D: OutputDevice> {
    id: Uuid,
    player: LoopPlayer<D>,
    mantras: MantraCycle,
    active: bool,
    muted: bool,
    volume: f32,
    current_index: usize,
    cycle_count: u64,
    timer: Option<MantraTimer>,
}

impl<D: OutputDevice> HavanSession<D> {
    /// Idle session over the built-in mantras
    pub fn new(device: D) -> Self {
        Self::with_parts(LoopPlayer::new(device), MantraCycle::builtin())
    }

    /// Session over a prepared player; its current volume becomes the
    /// session volume
    pub fn with_parts(player: LoopPlayer<D>, mantras: MantraCycle) -> Self {
        let volume = player.volume();
        Self {
            id: Uuid::new_v4(),
            player,
            mantras,
            active: false,
            muted: false,
            volume,
            current_index: 0,
            cycle_count: 0,
            timer: None,
        }
    }

    /// Begin the havan: arm the mantra timer and light the fire unless muted
    pub fn start(&mut self) -> Result<()> {
        if self.active {
            return Ok(());
        }

        if !self.muted {
            self.player.play()?;
        }
        self.active = true;
        self.arm_timer();
        info!(
            "Havan {} started at mantra {} ({})",
            self.id,
            self.current_index,
            self.current_mantra().id
        );
        Ok(())
    }

    /// End the havan: stop the fire and cancel the pending mantra timer
    pub fn stop(&mut self) {
        if self.active {
            info!(
                "Havan {} stopped after {} mantra change(s)",
                self.id, self.cycle_count
            );
        }
        self.active = false;
        self.player.stop();
        self.timer = None;
    }

    /// Advance session time by `elapsed`
    ///
    /// Moves to the next mantra each time the current one's display duration
    /// runs out, possibly several times for a long tick. Returns how many
    /// mantra changes happened. Idle sessions ignore time.
    pub fn tick(&mut self, elapsed: Duration) -> usize {
        let Some(mut timer) = self.timer else {
            return 0;
        };

        let mut left = elapsed;
        let mut advanced = 0;
        while left >= timer.remaining {
            left -= timer.remaining;
            self.current_index = self.mantras.next_index(self.current_index);
            self.cycle_count += 1;
            advanced += 1;
            timer.remaining = self.current_mantra().display_duration();
            debug!(
                "Mantra {} -> {}",
                self.current_index,
                self.current_mantra().transliteration
            );
        }
        timer.remaining -= left;
        self.timer = Some(timer);
        advanced
    }

    /// Set the fire volume, clamped to [0, 1]; applied now unless muted
    pub fn set_volume(&mut self, volume: f32) {
        self.player.set_volume(volume);
        self.volume = self.player.volume();
        if self.muted {
            self.player.set_volume(0.0);
        }
    }

    /// Flip mute and return the new muted state
    ///
    /// Muting silences the fire without stopping it. Unmuting restores the
    /// volume and, if the havan is active, makes sure the fire is playing.
    pub fn toggle_mute(&mut self) -> Result<bool> {
        self.muted = !self.muted;
        if self.muted {
            self.player.set_volume(0.0);
        } else {
            self.player.set_volume(self.volume);
            if self.active {
                self.player.play()?;
            }
        }
        Ok(self.muted)
    }

    /// Render `frames` samples of fire audio to the output device
    pub fn pump(&mut self, frames: usize) {
        self.player.pump(frames);
    }

    pub fn current_mantra(&self) -> &Mantra {
        self.mantras.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Number of mantra changes since the session was created
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Time left on the current mantra, None while idle
    pub fn time_remaining(&self) -> Option<Duration> {
        self.timer.map(|t| t.remaining)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn session_id(&self) -> Uuid {
        self.id
    }

    pub fn player(&self) -> &LoopPlayer<D> {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut LoopPlayer<D> {
        &mut self.player
    }

    fn arm_timer(&mut self) {
        self.timer = Some(MantraTimer {
            remaining: self.current_mantra().display_duration(),
        });
    }
}

impl<D: OutputDevice> Drop for HavanSession<D> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::buffer::{AudioBuffer, SAMPLE_RATE};
    use crate::engine::player::{CaptureDevice, DEFAULT_VOLUME};

    fn mantra(id: &str, duration: u32) -> Mantra {
        Mantra {
            id: id.to_string(),
            sanskrit: String::new(),
            transliteration: id.to_uppercase(),
            meaning: String::new(),
            duration,
        }
    }

    fn session() -> HavanSession<CaptureDevice> {
        let mut player = LoopPlayer::new(CaptureDevice::default());
        player.load(AudioBuffer::from_mono(vec![0.5; 8], SAMPLE_RATE));
        let cycle = MantraCycle::new(vec![mantra("a", 2), mantra("b", 3), mantra("c", 1)]).unwrap();
        HavanSession::with_parts(player, cycle)
    }

    #[test]
    fn test_idle_session_ignores_time() {
        let mut s = session();
        assert_eq!(s.tick(Duration::from_secs(100)), 0);
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.time_remaining(), None);
    }

    #[test]
    fn test_start_plays_and_arms_timer() {
        let mut s = session();
        s.start().unwrap();
        assert!(s.is_active());
        assert!(s.player().is_playing());
        assert_eq!(s.time_remaining(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_mantras_advance_after_their_duration() {
        let mut s = session();
        s.start().unwrap();

        assert_eq!(s.tick(Duration::from_millis(1500)), 0);
        assert_eq!(s.current_mantra().id, "a");

        assert_eq!(s.tick(Duration::from_millis(500)), 1);
        assert_eq!(s.current_mantra().id, "b");
        assert_eq!(s.time_remaining(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_long_tick_wraps_the_cycle() {
        let mut s = session();
        s.start().unwrap();

        // 2 + 3 + 1 = one full cycle, then 1s into "a"
        assert_eq!(s.tick(Duration::from_secs(7)), 3);
        assert_eq!(s.current_mantra().id, "a");
        assert_eq!(s.cycle_count(), 3);
        assert_eq!(s.time_remaining(), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_stop_cancels_timer_and_audio() {
        let mut s = session();
        s.start().unwrap();
        s.stop();
        assert!(!s.is_active());
        assert!(!s.player().is_playing());
        assert_eq!(s.tick(Duration::from_secs(10)), 0);
        s.stop();
    }

    #[test]
    fn test_restart_resumes_at_current_mantra() {
        let mut s = session();
        s.start().unwrap();
        s.tick(Duration::from_secs(2));
        s.stop();
        s.start().unwrap();
        assert_eq!(s.current_mantra().id, "b");
        assert_eq!(s.time_remaining(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_start_while_muted_stays_silent() {
        let mut s = session();
        assert!(s.toggle_mute().unwrap());
        s.start().unwrap();
        assert!(s.is_active());
        assert!(!s.player().is_playing());

        assert!(!s.toggle_mute().unwrap());
        assert!(s.player().is_playing());
        assert_eq!(s.player().volume(), DEFAULT_VOLUME);
    }

    #[test]
    fn test_mute_keeps_playing_at_zero_volume() {
        let mut s = session();
        s.start().unwrap();
        s.toggle_mute().unwrap();
        assert!(s.player().is_playing());
        assert_eq!(s.player().volume(), 0.0);

        s.set_volume(0.8);
        assert_eq!(s.player().volume(), 0.0);
        assert_eq!(s.volume(), 0.8);

        s.toggle_mute().unwrap();
        assert_eq!(s.player().volume(), 0.8);
    }

    #[test]
    fn test_pump_reaches_device() {
        let mut s = session();
        s.set_volume(1.0);
        s.start().unwrap();
        s.pump(4);
        assert_eq!(s.player().device().captured(), &[0.5; 4]);
    }

    #[test]
    fn test_drop_releases_device() {
        let mut s = session();
        s.start().unwrap();
        assert!(s.player().device().is_open());
        drop(s);
    }
}
