//! Shared fakes for the playback integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tubecast_core::{CoreError, MetadataResolver, VideoId, VideoInfo};
use tubecast_playback::{
    MediaWidget, PlayerConfig, PlayerSession, PlayerState, WidgetApi, WidgetBootstrap,
    WidgetError, WidgetEventSink, WidgetHost, WidgetLifecycle, WidgetOptions, WidgetResult,
};

// ===== Widget fakes =====

/// Observes and drives one fake widget instance
pub struct WidgetSpy {
    pub container_id: String,
    pub video_id: String,
    sink: WidgetEventSink,
    pub plays: AtomicUsize,
    pub pauses: AtomicUsize,
    pub time_reads: AtomicUsize,
    pub destroys: AtomicUsize,
    pub seeks: Mutex<Vec<f64>>,
    pub position: Mutex<f64>,
    pub duration: Mutex<f64>,
    pub fail_duration: bool,
    pub fail_destroy: bool,
}

impl WidgetSpy {
    pub fn ready(&self) {
        self.sink.ready();
    }

    pub fn state(&self, state: PlayerState) -> bool {
        self.sink.emit(tubecast_playback::WidgetEvent::StateChanged(state))
    }

    pub fn set_position(&self, seconds: f64) {
        *self.position.lock().unwrap() = seconds;
    }

    pub fn set_duration(&self, seconds: f64) {
        *self.duration.lock().unwrap() = seconds;
    }

    pub fn plays(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }

    pub fn pauses(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }

    pub fn time_reads(&self) -> usize {
        self.time_reads.load(Ordering::SeqCst)
    }

    pub fn destroys(&self) -> usize {
        self.destroys.load(Ordering::SeqCst)
    }
}

struct FakeWidget {
    spy: Arc<WidgetSpy>,
}

impl MediaWidget for FakeWidget {
    fn play(&self) -> WidgetResult<()> {
        self.spy.plays.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn pause(&self) -> WidgetResult<()> {
        self.spy.pauses.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn seek_to(&self, seconds: f64, _allow_seek_ahead: bool) -> WidgetResult<()> {
        self.spy.seeks.lock().unwrap().push(seconds);
        Ok(())
    }

    fn current_time(&self) -> WidgetResult<f64> {
        self.spy.time_reads.fetch_add(1, Ordering::SeqCst);
        Ok(*self.spy.position.lock().unwrap())
    }

    fn duration(&self) -> WidgetResult<f64> {
        if self.spy.fail_duration {
            return Err(WidgetError::Call("getDuration is not a function".into()));
        }
        Ok(*self.spy.duration.lock().unwrap())
    }

    fn destroy(&self) -> WidgetResult<()> {
        self.spy.destroys.fetch_add(1, Ordering::SeqCst);
        if self.spy.fail_destroy {
            return Err(WidgetError::Call("destroy threw".into()));
        }
        Ok(())
    }
}

/// Widget API that records every instance it builds
#[derive(Default)]
pub struct FakeApi {
    created: Mutex<Vec<Arc<WidgetSpy>>>,
    pub fail_duration: AtomicBool,
    pub fail_destroy: AtomicBool,
    pub refuse: AtomicBool,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn created(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    pub fn widget(&self, index: usize) -> Arc<WidgetSpy> {
        Arc::clone(&self.created.lock().unwrap()[index])
    }

    pub fn last(&self) -> Arc<WidgetSpy> {
        Arc::clone(self.created.lock().unwrap().last().expect("no widget created"))
    }
}

impl WidgetApi for FakeApi {
    fn create(
        &self,
        container_id: &str,
        video_id: &str,
        _options: &WidgetOptions,
        events: WidgetEventSink,
    ) -> WidgetResult<Box<dyn MediaWidget>> {
        if self.refuse.load(Ordering::SeqCst) {
            return Err(WidgetError::Unavailable);
        }
        let spy = Arc::new(WidgetSpy {
            container_id: container_id.to_string(),
            video_id: video_id.to_string(),
            sink: events,
            plays: AtomicUsize::new(0),
            pauses: AtomicUsize::new(0),
            time_reads: AtomicUsize::new(0),
            destroys: AtomicUsize::new(0),
            seeks: Mutex::new(Vec::new()),
            position: Mutex::new(0.0),
            duration: Mutex::new(0.0),
            fail_duration: self.fail_duration.load(Ordering::SeqCst),
            fail_destroy: self.fail_destroy.load(Ordering::SeqCst),
        });
        self.created.lock().unwrap().push(Arc::clone(&spy));
        Ok(Box::new(FakeWidget { spy }))
    }
}

/// Page that either already has the API or needs the loader injected
pub struct FakeHost {
    api: Arc<FakeApi>,
    preloaded: bool,
    pub injections: AtomicUsize,
    pub fullscreen_requests: Mutex<Vec<String>>,
    pub fullscreen_exits: AtomicUsize,
    pub refuse_fullscreen: AtomicBool,
}

impl FakeHost {
    pub fn new(api: Arc<FakeApi>, preloaded: bool) -> Arc<Self> {
        Arc::new(Self {
            api,
            preloaded,
            injections: AtomicUsize::new(0),
            fullscreen_requests: Mutex::new(Vec::new()),
            fullscreen_exits: AtomicUsize::new(0),
            refuse_fullscreen: AtomicBool::new(false),
        })
    }

    pub fn injections(&self) -> usize {
        self.injections.load(Ordering::SeqCst)
    }

    pub fn fullscreen_requests(&self) -> Vec<String> {
        self.fullscreen_requests.lock().unwrap().clone()
    }

    pub fn fullscreen_exits(&self) -> usize {
        self.fullscreen_exits.load(Ordering::SeqCst)
    }
}

impl WidgetHost for FakeHost {
    fn loaded_api(&self) -> Option<Arc<dyn WidgetApi>> {
        self.preloaded
            .then(|| Arc::clone(&self.api) as Arc<dyn WidgetApi>)
    }

    fn inject_loader(&self, _src: &str) -> WidgetResult<()> {
        self.injections.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn request_fullscreen(&self, element_id: &str) -> WidgetResult<()> {
        if self.refuse_fullscreen.load(Ordering::SeqCst) {
            return Err(WidgetError::Call("fullscreen not allowed".into()));
        }
        self.fullscreen_requests
            .lock()
            .unwrap()
            .push(element_id.to_string());
        Ok(())
    }

    fn exit_fullscreen(&self) -> WidgetResult<()> {
        self.fullscreen_exits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct Harness {
    pub session: PlayerSession,
    pub api: Arc<FakeApi>,
    pub host: Arc<FakeHost>,
    pub bootstrap: Arc<WidgetBootstrap>,
}

/// Session over a fresh bootstrap; `preloaded` decides whether the API is already present
pub fn harness(api: Arc<FakeApi>, preloaded: bool) -> Harness {
    let bootstrap = Arc::new(WidgetBootstrap::new());
    let host = FakeHost::new(Arc::clone(&api), preloaded);
    Harness {
        session: session_on(&bootstrap, &host),
        api,
        host,
        bootstrap,
    }
}

/// Another session sharing `bootstrap` and `host`
pub fn session_on(bootstrap: &Arc<WidgetBootstrap>, host: &Arc<FakeHost>) -> PlayerSession {
    let config = PlayerConfig::default();
    let lifecycle = WidgetLifecycle::new(
        Arc::clone(bootstrap),
        Arc::clone(host) as Arc<dyn WidgetHost>,
        config.loader_src.clone(),
        config.widget.clone(),
    );
    PlayerSession::new(lifecycle, &config)
}

// ===== Metadata fakes =====

/// Resolver answering from a fixed table, optionally after a delay
#[derive(Default)]
pub struct FakeResolver {
    known: Mutex<HashMap<String, VideoInfo>>,
    delay: Mutex<Option<Duration>>,
    pub calls: AtomicUsize,
}

impl FakeResolver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with(self: Arc<Self>, id: &str, title: &str) -> Arc<Self> {
        let video_id = vid(id);
        self.known.lock().unwrap().insert(
            video_id.as_str().to_string(),
            VideoInfo::new(video_id, title, "Test Channel"),
        );
        self
    }

    /// Answer lookups for `id` with the info of `other`
    pub fn misroute(self: Arc<Self>, id: &str, other: &str) -> Arc<Self> {
        let other = vid(other);
        self.known.lock().unwrap().insert(
            vid(id).as_str().to_string(),
            VideoInfo::new(other, "Someone Else", "Test Channel"),
        );
        self
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataResolver for FakeResolver {
    async fn resolve(&self, id: &VideoId) -> tubecast_core::Result<VideoInfo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let found = self.known.lock().unwrap().get(id.as_str()).cloned();
        found.ok_or_else(|| CoreError::resolution(format!("no such video: {}", id)))
    }
}

// ===== Helpers =====

/// Eleven-character id built from a short tag, e.g. `vid("A")` -> `AAAAAAAAAAA`
pub fn vid(tag: &str) -> VideoId {
    if tag.len() == 11 {
        return VideoId::parse(tag).unwrap();
    }
    let id: String = tag.chars().cycle().take(11).collect();
    VideoId::parse(id).unwrap()
}

/// Let spawned tasks run without moving the paused clock
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}
