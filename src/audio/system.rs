use flume::Receiver;
use tracing::{debug, trace};

use crate::{
    audio::{
        commands::Intent,
        config::{PlayerConfig, ResumePolicy},
        error::PlaybackError,
        state::{PlaybackState, PlayerState},
        store::{StateChange, Store},
        sync::PlaybackSynchronizer,
        traits::MediaSource,
        volume::MuteMemory,
    },
    event::events::Event,
    ui::view::PlayerView,
};

pub struct PlayerSystem<S: MediaSource> {
    store: Store,
    sync: PlaybackSynchronizer<S>,
    mute: MuteMemory,
    config: PlayerConfig,
}

impl<S: MediaSource> PlayerSystem<S> {
    pub fn new(source: S, config: PlayerConfig) -> Self {
        let mut store = Store::new(PlayerState::new(PlaybackState::with_volume(config.volume)));
        let sync = PlaybackSynchronizer::new(source, &mut store);

        Self {
            store,
            sync,
            mute: MuteMemory::new(),
            config,
        }
    }

    /// Handles one event to completion, including every source update it
    /// causes.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::CanPlayThrough(_) | Event::TimeUpdate(..) | Event::Ended(_) => {
                if let Err(e) = self.sync.handle_media_event(&mut self.store, &event) {
                    match e {
                        PlaybackError::StaleEvent(_) => trace!("Discarding {e}"),
                        _ => debug!("{e}"),
                    }
                }
            }
            Event::LoadPlaylist(tracks, start) => {
                self.store.dispatch(Intent::LoadPlaylist { tracks, start });
            }
            Event::SelectTrack(id) => {
                self.store.dispatch(Intent::SelectTrack(id));
            }
            Event::PlayPause => self.play_pause(),
            Event::Next => self.play_next(),
            Event::Previous => self.play_previous(),
            Event::Volume(volume) => self.set_volume(volume),
            Event::VolumeUp => self.set_volume(self.volume() + self.config.volume_step),
            Event::VolumeDown => self.set_volume(self.volume() - self.config.volume_step),
            Event::ToggleMute => self.toggle_mute(),
            Event::Seek(position) => self.seek(position),
            Event::SeekCommit => {
                let policy = self.config.resume_policy;
                self.sync.commit_seek(&mut self.store, policy);
            }
            Event::SeekForward => self.seek_by(self.config.seek_step_secs),
            Event::SeekBackward => self.seek_by(-self.config.seek_step_secs),
            Event::CursorUp | Event::CursorDown | Event::PlaySelected | Event::Quit => {}
        }

        self.sync.reconcile();
    }

    fn play_pause(&mut self) {
        let intent = if self.is_playing() {
            Intent::PauseTrack
        } else {
            Intent::ResumeTrack
        };
        self.store.dispatch(intent);
    }

    fn play_next(&mut self) {
        if self.store.is_last_track() {
            debug!("Already at the last track");
            return;
        }
        self.store.dispatch(Intent::PlayNextTrack);
    }

    fn play_previous(&mut self) {
        if self.store.is_first_track() {
            debug!("Already at the first track");
            return;
        }
        self.store.dispatch(Intent::PlayPrevTrack);
    }

    fn set_volume(&mut self, volume: f64) {
        let previous = self.volume();
        self.store.dispatch(Intent::SetVolume(volume));
        self.mute.observe(previous, self.volume());
    }

    fn toggle_mute(&mut self) {
        let volume = self.mute.toggle(self.volume());
        self.store.dispatch(Intent::SetVolume(volume));
    }

    fn seek(&mut self, position: f64) {
        if let Err(e) = self.sync.begin_seek(&mut self.store, position) {
            debug!("Ignoring seek: {e}");
        }
    }

    fn seek_by(&mut self, delta: f64) {
        let position = self.store.playback().progress + delta;
        if self.sync.begin_seek(&mut self.store, position).is_ok() {
            let policy = ResumePolicy::IfWasPlaying;
            self.sync.commit_seek(&mut self.store, policy);
        }
    }

    pub fn subscribe(&mut self) -> Receiver<StateChange> {
        self.store.subscribe()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn is_playing(&self) -> bool {
        self.store.playback().is_playing
    }

    pub fn volume(&self) -> f64 {
        self.store.playback().volume
    }

    /// The playback surface, or `None` when there is nothing playable.
    pub fn view(&self) -> Option<PlayerView> {
        let playback = self.store.playback();
        let track = playback
            .current_track
            .as_ref()
            .filter(|t| t.is_playable())?;

        Some(PlayerView {
            track_id: track.id.clone(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            cover_image: track.cover_image.clone(),
            is_playing: playback.is_playing,
            volume: playback.volume,
            is_muted: playback.is_muted(),
            progress: playback.progress,
            duration: self.sync.duration(),
            can_go_previous: !self.store.is_first_track(),
            can_go_next: !self.store.is_last_track(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{
        fake::{FakeSource, SourceCall},
        track::Track,
    };

    fn track(id: &str) -> Track {
        Track::new(id, format!("Track {id}"), "Artist").with_audio_file(format!("{id}.mp3"))
    }

    fn create_test_system(tracks: Vec<Track>) -> (PlayerSystem<FakeSource>, FakeSource) {
        let source = FakeSource::new();
        let mut system = PlayerSystem::new(source.clone(), PlayerConfig::default());
        if !tracks.is_empty() {
            system.handle_event(Event::LoadPlaylist(tracks, 0));
        }
        (system, source)
    }

    fn make_ready(system: &mut PlayerSystem<FakeSource>) {
        let id = system.store().playback().current_track_id().unwrap().clone();
        system.handle_event(Event::CanPlayThrough(id));
    }

    #[tokio::test]
    async fn test_seek_drag_scenario() {
        let (mut system, source) = create_test_system(vec![track("a")]);
        source.set_duration(200.0);
        make_ready(&mut system);
        assert!(system.is_playing());

        system.handle_event(Event::Seek(30.0));
        system.handle_event(Event::Seek(50.0));
        assert!(!system.is_playing());
        assert_eq!(system.store().playback().progress, 50.0);
        assert_eq!(source.current_time(), 50.0);

        system.handle_event(Event::SeekCommit);
        assert!(system.is_playing());
        assert!((source.current_time() - 50.0).abs() < 1e-9);
        assert_eq!(source.calls().last(), Some(&SourceCall::Play));
    }

    #[tokio::test]
    async fn test_mute_restores_previous_volume() {
        let (mut system, source) = create_test_system(vec![track("a")]);

        system.handle_event(Event::Volume(0.42));
        system.handle_event(Event::Volume(0.0));
        system.handle_event(Event::ToggleMute);
        assert_eq!(system.volume(), 0.42);
        assert_eq!(source.last_volume(), Some(0.42));

        system.handle_event(Event::ToggleMute);
        assert_eq!(system.volume(), 0.0);
        system.handle_event(Event::ToggleMute);
        assert_eq!(system.volume(), 0.42);
    }

    #[tokio::test]
    async fn test_volume_without_track_only_sets_volume() {
        let (mut system, source) = create_test_system(vec![]);
        let changes = system.subscribe();
        source.clear();

        system.handle_event(Event::Volume(0.3));

        let change = changes.try_recv().unwrap();
        assert_eq!(change.current.volume, 0.3);
        assert!(change.current.current_track.is_none());
        assert!(!change.current.is_playing);
        assert!(changes.try_recv().is_err());
        assert_eq!(source.calls(), vec![SourceCall::Volume(0.3)]);
        assert!(system.view().is_none());
    }

    #[tokio::test]
    async fn test_previous_on_first_track_is_noop() {
        let (mut system, _source) = create_test_system(vec![track("a"), track("b")]);
        let before = system.store().state().clone();

        system.handle_event(Event::Previous);
        assert_eq!(system.store().state(), &before);

        system.handle_event(Event::Next);
        let last = system.store().state().clone();
        system.handle_event(Event::Next);
        assert_eq!(system.store().state(), &last);
    }

    #[tokio::test]
    async fn test_ended_on_last_track_does_not_wrap() {
        let (mut system, _source) = create_test_system(vec![track("a"), track("b")]);
        system.handle_event(Event::Next);
        make_ready(&mut system);

        system.handle_event(Event::Ended("b".into()));

        assert_eq!(
            system.store().playback().current_track_id().unwrap().as_str(),
            "b"
        );
        assert!(!system.is_playing());
        let view = system.view().unwrap();
        assert!(!view.can_go_next);
        assert!(view.can_go_previous);
    }

    #[tokio::test]
    async fn test_play_pause_toggles_intent() {
        let (mut system, source) = create_test_system(vec![track("a")]);
        make_ready(&mut system);

        system.handle_event(Event::PlayPause);
        assert!(!system.is_playing());
        assert_eq!(source.calls().last(), Some(&SourceCall::Pause));

        system.handle_event(Event::PlayPause);
        assert!(system.is_playing());
        assert_eq!(source.calls().last(), Some(&SourceCall::Play));
    }

    #[tokio::test]
    async fn test_keyboard_seek_keeps_paused_state() {
        let (mut system, source) = create_test_system(vec![track("a")]);
        source.set_duration(120.0);
        make_ready(&mut system);
        system.handle_event(Event::PlayPause);

        system.handle_event(Event::SeekForward);
        assert_eq!(system.store().playback().progress, 5.0);
        assert!(!system.is_playing());

        system.handle_event(Event::SeekBackward);
        system.handle_event(Event::SeekBackward);
        assert_eq!(system.store().playback().progress, 0.0);
    }

    #[tokio::test]
    async fn test_volume_steps_are_clamped() {
        let (mut system, _source) = create_test_system(vec![]);

        system.handle_event(Event::VolumeUp);
        assert_eq!(system.volume(), 1.0);

        system.handle_event(Event::Volume(0.02));
        system.handle_event(Event::VolumeDown);
        assert_eq!(system.volume(), 0.0);
    }

    #[tokio::test]
    async fn test_view_hidden_for_track_without_audio() {
        let (system, _source) = create_test_system(vec![Track::new("x", "Demo", "Band")]);
        assert!(system.store().playback().current_track.is_some());
        assert!(system.view().is_none());
    }

    #[tokio::test]
    async fn test_view_reports_duration_once_ready() {
        let (mut system, source) = create_test_system(vec![track("a"), track("b")]);
        let view = system.view().unwrap();
        assert_eq!(view.duration, None);
        assert_eq!(view.progress_max(), 100.0);

        source.set_duration(240.0);
        make_ready(&mut system);
        let view = system.view().unwrap();
        assert_eq!(view.duration, Some(240.0));
        assert_eq!(view.title, "Track a");
        assert!(!view.can_go_previous);
        assert!(view.can_go_next);
    }
}
