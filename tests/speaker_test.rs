//! Speech cache behaviour against a scripted synthesizer

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::mock_audio::{CountingSink, MockSynth};
use common::mock_tts::MockTts;
use kana_quest::tts::{Speaker, Synthesizer};

struct Rig {
    speaker: Speaker,
    synth: MockSynth,
    fallback: MockTts,
    sink: Arc<CountingSink>,
}

fn rig(latency: Duration, pacing: Duration) -> Rig {
    let synth = MockSynth::with_latency(latency);
    let fallback = MockTts::new();
    let sink = Arc::new(CountingSink::default());
    let speaker = Speaker::new(
        Some(Arc::new(synth.clone()) as Arc<dyn Synthesizer>),
        Arc::new(fallback.clone()),
        sink.clone(),
        "Kore",
        pacing,
    );
    Rig {
        speaker,
        synth,
        fallback,
        sink,
    }
}

async fn wait_until_settled(speaker: &Speaker, text: &str) {
    for _ in 0..100 {
        if !speaker.is_pending(text) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("fetch for '{text}' never finished");
}

#[tokio::test]
async fn test_miss_falls_back_then_hits_cache() {
    let r = rig(Duration::from_millis(5), Duration::from_millis(1));

    r.speaker.speak("あ").await;
    assert!(r.fallback.was_spoken("あ"));
    assert_eq!(r.sink.count(), 0);

    wait_until_settled(&r.speaker, "あ").await;
    assert!(r.speaker.cached("あ").is_some());

    r.speaker.speak("あ").await;
    assert_eq!(r.sink.count(), 1);
    assert_eq!(r.fallback.get_spoken(), vec!["あ".to_string()]);
    assert_eq!(r.synth.requested(), vec!["あ".to_string()]);
}

#[tokio::test]
async fn test_concurrent_fetches_issue_one_request() {
    let r = rig(Duration::from_millis(40), Duration::from_millis(1));

    let results = futures::future::join_all((0..3).map(|_| r.speaker.fetch("りんご"))).await;

    assert_eq!(r.synth.requested().len(), 1);
    assert_eq!(results.iter().filter(|c| c.is_some()).count(), 1);
    assert!(r.speaker.cached("りんご").is_some());
}

#[tokio::test]
async fn test_preload_is_paced_and_skips_known_texts() {
    let pacing = Duration::from_millis(30);
    let r = rig(Duration::from_millis(1), pacing);
    let texts: Vec<String> = ["あ", "い", "う"].iter().map(|s| s.to_string()).collect();

    r.speaker.preload(&texts).await;
    for t in &texts {
        wait_until_settled(&r.speaker, t).await;
    }

    assert_eq!(r.synth.requested(), texts);
    let times = r.synth.times();
    for pair in times.windows(2) {
        assert!(pair[1].duration_since(pair[0]) >= Duration::from_millis(25));
    }

    // Everything is cached now, so nothing new is requested
    r.speaker.preload(&texts).await;
    assert_eq!(r.synth.requested().len(), 3);
}

#[tokio::test]
async fn test_failed_synthesis_is_swallowed_and_retryable() {
    let r = rig(Duration::from_millis(1), Duration::from_millis(1));
    r.synth.fail_on("い");

    r.speaker.preload(&["い".to_string()]).await;
    wait_until_settled(&r.speaker, "い").await;
    assert!(r.speaker.cached("い").is_none());

    assert!(r.speaker.fetch("い").await.is_none());
    assert_eq!(r.synth.requested().len(), 2);
}

#[tokio::test]
async fn test_fallback_failure_does_not_propagate() {
    let r = rig(Duration::from_millis(1), Duration::from_millis(1));
    *r.fallback.should_fail.lock().unwrap() = true;

    r.speaker.speak("え").await;
    assert!(r.fallback.get_spoken().is_empty());
    wait_until_settled(&r.speaker, "え").await;
    assert!(r.speaker.cached("え").is_some());
}
