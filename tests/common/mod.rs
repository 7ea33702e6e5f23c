#![allow(dead_code)]

pub mod mock_audio;
pub mod mock_tts;

use kana_quest::content::{LearnItem, HIRAGANA_A_COLUMN};
use kana_quest::flow::{Attempt, Effect, Event, Screen, Session, TimerKind, TimerTicket};
use kana_quest::verify::Verdict;

/// Drives a seeded session the way the GUI would, firing timers by hand
pub struct Driver {
    pub session: Session,
    /// Every effect produced so far, in order
    pub log: Vec<Effect>,
}

impl Driver {
    pub fn new(seed: u64) -> Self {
        Self {
            session: Session::with_seed(seed),
            log: Vec::new(),
        }
    }

    pub fn at_menu(seed: u64) -> Self {
        let mut d = Self::new(seed);
        d.send(Event::Start);
        d.send(Event::Ready);
        assert_eq!(d.session.screen(), Screen::Menu);
        d
    }

    pub fn send(&mut self, event: Event) -> Vec<Effect> {
        let effects = self.session.update(event);
        self.log.extend(effects.iter().cloned());
        effects
    }

    /// Fire every timer among `effects`, returning what they produced
    pub fn fire(&mut self, effects: &[Effect]) -> Vec<Effect> {
        let tickets: Vec<TimerTicket> = effects.iter().filter_map(ticket).collect();
        let mut out = Vec::new();
        for t in tickets {
            out.extend(self.send(Event::TimerFired(t)));
        }
        out
    }

    pub fn send_and_fire(&mut self, event: Event) -> Vec<Effect> {
        let effects = self.send(event);
        let mut out = effects.clone();
        out.extend(self.fire(&effects));
        out
    }

    /// Menu → game1 with every card flipped twice
    pub fn master_hiragana(&mut self) -> Vec<Effect> {
        self.send(Event::ChooseHiragana);
        let mut last = Vec::new();
        for c in HIRAGANA_A_COLUMN {
            self.send(Event::LearnChar(c.id()));
            last = self.send(Event::LearnChar(c.id()));
        }
        self.fire(&last)
    }

    /// Pick every target correctly until the listening game is over
    pub fn clear_listen_hiragana(&mut self) -> Vec<Effect> {
        let mut last = Vec::new();
        while self.session.screen() == Screen::Game1 {
            let target = self.session.char_targets().current().expect("target");
            last = self.send_and_fire(Event::PickChar(target.id()));
        }
        last
    }

    /// Write every target and have the judge accept it
    pub fn clear_writing(&mut self) {
        while self.session.screen() == Screen::Game2 {
            let sent = self.send(Event::DrawingSubmitted(vec![0x89, b'P', b'N', b'G']));
            self.send_and_fire(Event::HandwritingJudged {
                attempt: attempt(&sent).expect("verification requested"),
                result: Ok(Verdict::pass("")),
            });
        }
    }

    pub fn spoken(&self) -> Vec<String> {
        self.log
            .iter()
            .filter_map(|e| match e {
                Effect::Speak(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

pub fn ticket(effect: &Effect) -> Option<TimerTicket> {
    match effect {
        Effect::Schedule { ticket, .. } => Some(*ticket),
        _ => None,
    }
}

pub fn attempt(effects: &[Effect]) -> Option<Attempt> {
    effects.iter().find_map(|e| match e {
        Effect::VerifyHandwriting { attempt, .. } | Effect::VerifyPronunciation { attempt, .. } => {
            Some(*attempt)
        }
        _ => None,
    })
}

pub fn ticket_of(effects: &[Effect], kind: TimerKind) -> Option<TimerTicket> {
    effects.iter().filter_map(ticket).find(|t| t.kind == kind)
}
