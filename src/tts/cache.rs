//! Session-lifetime cache of synthesized speech
//!
//! No eviction: the vocabulary is small and fixed. A pending set keeps
//! concurrent requests for the same key from being issued twice.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::audio::AudioClip;

/// Text plus voice, the identity of a synthesized clip
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub text: String,
    pub voice: String,
}

impl CacheKey {
    pub fn new(text: &str, voice: &str) -> Self {
        Self {
            text: text.to_string(),
            voice: voice.to_string(),
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.text, self.voice)
    }
}

#[derive(Default)]
struct Inner {
    clips: HashMap<CacheKey, Arc<AudioClip>>,
    pending: HashSet<CacheKey>,
}

#[derive(Default)]
pub struct AudioCache {
    inner: Mutex<Inner>,
}

impl AudioCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Entries are inserted whole, so a poisoned map is still consistent
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<AudioClip>> {
        self.lock().clips.get(key).cloned()
    }

    pub fn is_pending(&self, key: &CacheKey) -> bool {
        self.lock().pending.contains(key)
    }

    /// Reserve `key` for a fetch. False when it is cached or already in flight.
    pub fn try_begin(&self, key: &CacheKey) -> bool {
        let mut inner = self.lock();
        if inner.clips.contains_key(key) || inner.pending.contains(key) {
            return false;
        }
        inner.pending.insert(key.clone());
        true
    }

    /// Release a reservation, storing the clip if the fetch produced one
    pub fn finish(&self, key: &CacheKey, clip: Option<AudioClip>) -> Option<Arc<AudioClip>> {
        let mut inner = self.lock();
        inner.pending.remove(key);
        let clip = Arc::new(clip?);
        inner.clips.insert(key.clone(), clip.clone());
        Some(clip)
    }

    pub fn len(&self) -> usize {
        self.lock().clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip() -> AudioClip {
        AudioClip::from_pcm16_le(&[0, 0, 1, 0], 24_000, 1)
    }

    #[test]
    fn test_key_display() {
        assert_eq!(CacheKey::new("あ", "Kore").to_string(), "あ_Kore");
    }

    #[test]
    fn test_pending_suppresses_duplicates() {
        let cache = AudioCache::new();
        let key = CacheKey::new("う", "Kore");
        assert!(cache.try_begin(&key));
        assert!(cache.is_pending(&key));
        assert!(!cache.try_begin(&key));

        cache.finish(&key, Some(clip()));
        assert!(!cache.is_pending(&key));
        assert!(cache.get(&key).is_some());
        assert!(!cache.try_begin(&key));
    }

    #[test]
    fn test_failed_fetch_allows_retry() {
        let cache = AudioCache::new();
        let key = CacheKey::new("え", "Kore");
        assert!(cache.try_begin(&key));
        assert!(cache.finish(&key, None).is_none());
        assert!(cache.is_empty());
        assert!(cache.try_begin(&key));
    }

    #[test]
    fn test_voice_is_part_of_key() {
        let cache = AudioCache::new();
        cache.try_begin(&CacheKey::new("お", "Kore"));
        cache.finish(&CacheKey::new("お", "Kore"), Some(clip()));
        assert!(cache.get(&CacheKey::new("お", "Puck")).is_none());
        assert_eq!(cache.len(), 1);
    }
}
