//! Frame driver
//!
//! Owns the world and its collaborators. Each animation frame it turns the
//! timestamp into a dt, samples input, ticks the simulation, then drains the
//! tick's events into audio cues and persistence writes.

use crate::audio::{AudioCue, AudioSink};
use crate::highscores::{HighScores, ScoreRecord};
use crate::persistence::{PersistenceStore, StorageBackend, keys};
use crate::platform::InputState;
use crate::renderer::{FrameView, Renderer};
use crate::settings::Settings;
use crate::sim::{FrameClock, GameEvent, World, tick, waves};

const FPS_WINDOW: usize = 60;

/// Frames per second over a sliding window of frame timestamps
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    pub fn record(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Slot after the newest is the oldest sample
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// A game session: world, storage, audio and input
pub struct Game<B: StorageBackend, A: AudioSink> {
    world: World,
    store: PersistenceStore<B>,
    audio: A,
    settings: Settings,
    high_scores: HighScores,
    input: InputState,
    clock: FrameClock,
    fps: FpsCounter,
    score_submitted: bool,
}

impl<B: StorageBackend, A: AudioSink> Game<B, A> {
    /// Load saved progress and preferences; the world starts idle
    pub fn new(backend: B, mut audio: A, seed: u64) -> Self {
        let store = PersistenceStore::new(backend);
        let eggs = store.get_integer(keys::EGGS);
        let settings = Settings::load(&store);
        let high_scores = HighScores::load(&store);
        audio.set_muted(settings.muted);
        audio.set_volume(settings.effective_volume());
        log::info!("Game created (seed: {}, eggs: {})", seed, eggs);

        Self {
            world: World::new(seed, eggs),
            store,
            audio,
            settings,
            high_scores,
            input: InputState::new(),
            clock: FrameClock::new(),
            fps: FpsCounter::default(),
            score_submitted: false,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct world access for scripted sessions
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn store(&self) -> &PersistenceStore<B> {
        &self.store
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Start (or restart) a run at wave 0.
    ///
    /// `reset_progress` zeroes the saved egg counter as well.
    pub fn start_run(&mut self, reset_progress: bool) {
        waves::start_run(&mut self.world, reset_progress);
        if reset_progress {
            self.store.set_integer(keys::EGGS, 0);
        }
        self.score_submitted = false;
        self.input.clear();
        self.clock.reset();
        self.dispatch_events();
    }

    /// Flip pause; ignored when no run is in progress
    pub fn toggle_pause(&mut self) {
        if !self.world.run.running {
            return;
        }
        self.world.run.paused = !self.world.run.paused;
        log::info!(
            "{}",
            if self.world.run.paused { "Paused" } else { "Resumed" }
        );
    }

    /// Pause without toggling (focus lost, tab hidden)
    pub fn force_pause(&mut self) {
        if self.world.run.running && !self.world.run.paused {
            self.world.run.paused = true;
            log::info!("Auto-paused");
        }
    }

    /// Window focus changed
    pub fn set_focused(&mut self, focused: bool) {
        if focused {
            self.audio.set_muted(self.settings.muted);
        } else {
            self.force_pause();
            self.input.clear();
            if self.settings.mute_on_blur {
                self.audio.set_muted(true);
            }
        }
    }

    /// Record the finished run's score. Returns the rank, or `None` when
    /// there is no lost run to record or it was already recorded.
    pub fn submit_score(&mut self, name: &str, timestamp: f64) -> Option<usize> {
        if !self.world.run.lost || self.score_submitted {
            return None;
        }
        let record = ScoreRecord::new(name, self.world.score(), timestamp);
        log::info!("Score submitted: {} {}", record.name, record.score);
        let rank = self.high_scores.add(record);
        self.high_scores.save(&mut self.store);
        self.score_submitted = true;
        if rank == 1 {
            self.audio.play(AudioCue::HighScore);
        }
        Some(rank)
    }

    /// Flip mute and remember it. Returns the new state.
    pub fn toggle_mute(&mut self) -> bool {
        self.settings.muted = !self.settings.muted;
        self.audio.set_muted(self.settings.muted);
        self.audio.set_volume(self.settings.effective_volume());
        self.settings.save(&mut self.store);
        log::info!("Muted: {}", self.settings.muted);
        self.settings.muted
    }

    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.audio.set_muted(self.settings.muted);
        self.audio.set_volume(self.settings.effective_volume());
        self.settings.save(&mut self.store);
    }

    /// Advance one animation frame
    pub fn frame(&mut self, timestamp_ms: f64) {
        let dt = self.clock.advance(timestamp_ms);
        let input = self.input.sample();
        tick(&mut self.world, &input, dt);
        if !self.settings.effective_screen_shake() {
            self.world.shake = 0.0;
        }
        self.fps.record(timestamp_ms);
        self.dispatch_events();
    }

    /// FPS for display, when enabled
    pub fn fps(&self) -> Option<u32> {
        self.settings.show_fps.then(|| self.fps.fps())
    }

    pub fn render<R: Renderer>(&self, renderer: &mut R) {
        let view = FrameView::new(
            &self.world,
            self.fps(),
            self.settings.effective_screen_shake(),
        );
        renderer.draw(&view);
    }

    fn dispatch_events(&mut self) {
        for event in self.world.drain_events() {
            if let Some(cue) = AudioCue::for_event(&event) {
                self.audio.play(cue);
            }
            match event {
                GameEvent::WaveWon { eggs, .. } => self.store.set_integer(keys::EGGS, eggs),
                GameEvent::FighterHit { side, damage } => {
                    log::debug!("{:?} hit for {:.0}", side, damage)
                }
                _ => {}
            }
        }
    }
}
