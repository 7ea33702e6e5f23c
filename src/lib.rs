//! Kana Quest Library
//!
//! Core modules for the Kana Quest hiragana and vocabulary adventure.

pub mod audio;
pub mod canvas;
pub mod config;
pub mod content;
pub mod core;
pub mod error;
pub mod flow;
pub mod gui;
pub mod progress;
pub mod tts;
pub mod verify;
