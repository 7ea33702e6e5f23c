//! Fallback policy of the verification client against a scripted judge

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::mock_audio::ScriptedJudge;
use kana_quest::verify::{
    AudioPayload, Judge, Verdict, VerificationClient, PRONUNCIATION_FALLBACK_FEEDBACK,
};

#[tokio::test]
async fn test_unreachable_judge() {
    let judge = Arc::new(ScriptedJudge::unreachable());
    let client = VerificationClient::new(Some(judge.clone() as Arc<dyn Judge>));

    // Handwriting surfaces the failure so the learner can retry
    assert!(client.verify_handwriting(b"png", "う").await.is_err());

    // Pronunciation never blocks progress
    let verdict = client
        .verify_pronunciation(&AudioPayload::wav(Vec::new()), "いちご")
        .await;
    assert_eq!(verdict, Verdict::pass(PRONUNCIATION_FALLBACK_FEEDBACK));
    assert_eq!(judge.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_judge_verdict_is_passed_through() {
    let judge = Arc::new(ScriptedJudge::answering(Verdict::fail("線條歪了")));
    let client = VerificationClient::new(Some(judge as Arc<dyn Judge>));

    let verdict = client.verify_handwriting(b"png", "お").await.unwrap();
    assert!(!verdict.is_correct);
    assert_eq!(verdict.feedback, "線條歪了");
}
