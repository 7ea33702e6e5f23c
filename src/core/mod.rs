//! Core remote integrations
//!
//! Contains the generative-AI client used for verification and speech.

pub mod gemini;
