//! Interruption-aware audio priority queue.
//!
//! Independent of the table engine. The host owns actual playback: the
//! queue emits [`AudioCommand`]s, and the host reports back with
//! [`AudioQueue::on_finished`] / [`AudioQueue::on_failed`]. Time comes
//! from the same host-supplied millisecond clock the table uses.

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;

use log::debug;

/// Pause between items, after completion or terminal failure.
const GAP_MS: u64 = 300;

/// Playback priority, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AudioPriority {
    /// Ambient flavor; freely discarded when interrupted.
    Low,
    /// Ordinary speech.
    Normal,
    /// Important lines, resumed if interrupted.
    High,
    /// Must play now.
    Immediate,
}

impl AudioPriority {
    /// Whether an interrupted item of this priority goes back to the front
    /// of the queue instead of being discarded.
    #[must_use]
    pub const fn requeue_on_interrupt(self) -> bool {
        matches!(self, Self::High | Self::Immediate)
    }
}

/// One utterance waiting to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioCue {
    /// Character id of the speaker, for asset lookup.
    pub speaker: String,
    /// The text being spoken.
    pub message: String,
    /// Queue priority.
    pub priority: AudioPriority,
}

/// Resolves a cue to a playable asset reference.
///
/// The reference is opaque to the queue; the host interprets it. `resolve`
/// is the cache/lookup path; `generate` is the fallback synthesis path
/// tried when `resolve` misses.
pub trait AssetSource {
    /// Looks up an existing asset for this line.
    fn resolve(&mut self, message: &str, speaker: &str) -> Option<String>;

    /// Attempts to synthesize a substitute asset.
    fn generate(&mut self, message: &str, speaker: &str) -> Option<String>;
}

/// What the host should do with its playback device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioCommand {
    /// Start playing `asset` for `cue`.
    Play {
        /// Opaque asset reference from the [`AssetSource`].
        asset: String,
        /// The cue being played.
        cue: AudioCue,
    },
    /// Stop whatever is currently playing. A `Play` for the preempting
    /// item follows in the same drain.
    Stop,
}

/// Priority queue over utterances; at most one item plays at a time.
#[derive(Debug, Default)]
pub struct AudioQueue {
    waiting: VecDeque<AudioCue>,
    playing: Option<AudioCue>,
    gap_until: Option<u64>,
    commands: Vec<AudioCommand>,
}

impl AudioQueue {
    /// An empty, idle queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cue currently playing, if any.
    #[must_use]
    pub fn playing(&self) -> Option<&AudioCue> {
        self.playing.as_ref()
    }

    /// Number of cues waiting behind the current item.
    #[must_use]
    pub fn waiting(&self) -> usize {
        self.waiting.len()
    }

    /// Hands accumulated playback commands to the host, in order.
    pub fn drain_commands(&mut self) -> Vec<AudioCommand> {
        core::mem::take(&mut self.commands)
    }

    /// Adds a cue.
    ///
    /// A strictly higher-priority cue preempts the current item: the item
    /// is stopped, re-queued at the front if its priority was high enough,
    /// and the new cue plays immediately. Anything else waits its turn.
    pub fn enqueue(&mut self, cue: AudioCue, now: u64, source: &mut dyn AssetSource) {
        if let Some(current) = self.playing.take() {
            if cue.priority > current.priority {
                debug!(
                    "audio preempt: {:?} interrupts {:?}",
                    cue.priority, current.priority
                );
                self.commands.push(AudioCommand::Stop);
                if current.priority.requeue_on_interrupt() {
                    self.waiting.push_front(current);
                }
                self.waiting.push_front(cue);
                self.gap_until = None;
                self.start_next(now, source);
            } else {
                self.playing = Some(current);
                self.waiting.push_back(cue);
            }
            return;
        }

        self.waiting.push_back(cue);
        if self.gap_until.is_none() {
            self.start_next(now, source);
        }
    }

    /// Host callback: the current item finished playing.
    pub fn on_finished(&mut self, now: u64) {
        self.playing = None;
        self.gap_until = Some(now + GAP_MS);
    }

    /// Host callback: the current item failed during playback. Treated as
    /// terminal; the queue moves on after the usual gap.
    pub fn on_failed(&mut self, now: u64) {
        if let Some(cue) = self.playing.take() {
            debug!("audio playback failed for {:?}", cue.speaker);
        }
        self.gap_until = Some(now + GAP_MS);
    }

    /// Advances the clock; starts the next item once any gap has elapsed.
    pub fn tick(&mut self, now: u64, source: &mut dyn AssetSource) {
        if self.playing.is_some() {
            return;
        }
        if let Some(until) = self.gap_until {
            if now < until {
                return;
            }
            self.gap_until = None;
        }
        self.start_next(now, source);
    }

    /// Picks the highest-priority waiting cue (arrival order within a
    /// tier), resolves its asset, and issues a `Play`. A cue whose asset
    /// cannot be resolved or generated is dropped and the queue pauses for
    /// the usual gap.
    fn start_next(&mut self, now: u64, source: &mut dyn AssetSource) {
        let Some(index) = self.best_waiting() else {
            return;
        };
        let Some(cue) = self.waiting.remove(index) else {
            return;
        };

        let asset = source
            .resolve(&cue.message, &cue.speaker)
            .or_else(|| source.generate(&cue.message, &cue.speaker));

        match asset {
            Some(asset) => {
                self.commands.push(AudioCommand::Play {
                    asset,
                    cue: cue.clone(),
                });
                self.playing = Some(cue);
            }
            None => {
                debug!("no asset for {:?}; dropping cue", cue.speaker);
                self.gap_until = Some(now + GAP_MS);
            }
        }
    }

    fn best_waiting(&self) -> Option<usize> {
        let mut best: Option<(usize, AudioPriority)> = None;
        for (index, cue) in self.waiting.iter().enumerate() {
            match best {
                Some((_, priority)) if cue.priority <= priority => {}
                _ => best = Some((index, cue.priority)),
            }
        }
        best.map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::ToString;

    /// Resolves everything except messages containing "missing"; never
    /// generates unless the message contains "fallback".
    struct FakeAssets;

    impl AssetSource for FakeAssets {
        fn resolve(&mut self, message: &str, speaker: &str) -> Option<String> {
            if message.contains("missing") || message.contains("fallback") {
                None
            } else {
                Some(format!("asset:{speaker}:{message}"))
            }
        }

        fn generate(&mut self, message: &str, speaker: &str) -> Option<String> {
            if message.contains("fallback") {
                Some(format!("generated:{speaker}:{message}"))
            } else {
                None
            }
        }
    }

    fn cue(message: &str, priority: AudioPriority) -> AudioCue {
        AudioCue {
            speaker: "dealer".to_string(),
            message: message.to_string(),
            priority,
        }
    }

    #[test]
    fn idle_enqueue_plays_immediately() {
        let mut queue = AudioQueue::new();
        queue.enqueue(cue("hello", AudioPriority::Normal), 0, &mut FakeAssets);

        let commands = queue.drain_commands();
        assert_eq!(commands.len(), 1);
        assert!(matches!(&commands[0], AudioCommand::Play { cue, .. } if cue.message == "hello"));
    }

    #[test]
    fn immediate_discards_interrupted_low() {
        let mut queue = AudioQueue::new();
        queue.enqueue(cue("ambient", AudioPriority::Low), 0, &mut FakeAssets);
        queue.drain_commands();

        queue.enqueue(cue("now!", AudioPriority::Immediate), 10, &mut FakeAssets);
        let commands = queue.drain_commands();
        assert_eq!(commands[0], AudioCommand::Stop);
        assert!(matches!(&commands[1], AudioCommand::Play { cue, .. } if cue.message == "now!"));

        // The low item is gone for good.
        queue.on_finished(20);
        queue.tick(320, &mut FakeAssets);
        assert!(queue.drain_commands().is_empty());
    }

    #[test]
    fn immediate_requeues_interrupted_high_at_the_front() {
        let mut queue = AudioQueue::new();
        queue.enqueue(cue("callout", AudioPriority::High), 0, &mut FakeAssets);
        queue.enqueue(cue("chatter", AudioPriority::Normal), 1, &mut FakeAssets);
        queue.drain_commands();

        queue.enqueue(cue("now!", AudioPriority::Immediate), 10, &mut FakeAssets);
        let commands = queue.drain_commands();
        assert_eq!(commands[0], AudioCommand::Stop);
        assert!(matches!(&commands[1], AudioCommand::Play { cue, .. } if cue.message == "now!"));

        // After the immediate item, the interrupted callout resumes first.
        queue.on_finished(20);
        queue.tick(320, &mut FakeAssets);
        let commands = queue.drain_commands();
        assert!(
            matches!(&commands[0], AudioCommand::Play { cue, .. } if cue.message == "callout")
        );
    }

    #[test]
    fn equal_priority_does_not_preempt() {
        let mut queue = AudioQueue::new();
        queue.enqueue(cue("first", AudioPriority::High), 0, &mut FakeAssets);
        queue.drain_commands();

        queue.enqueue(cue("second", AudioPriority::High), 5, &mut FakeAssets);
        assert!(queue.drain_commands().is_empty());
        assert_eq!(queue.waiting(), 1);
    }

    #[test]
    fn gap_is_honored_between_items() {
        let mut queue = AudioQueue::new();
        queue.enqueue(cue("first", AudioPriority::Normal), 0, &mut FakeAssets);
        queue.enqueue(cue("second", AudioPriority::Normal), 1, &mut FakeAssets);
        queue.drain_commands();

        queue.on_finished(1000);
        queue.tick(1200, &mut FakeAssets);
        assert!(queue.drain_commands().is_empty());

        queue.tick(1300, &mut FakeAssets);
        let commands = queue.drain_commands();
        assert!(matches!(&commands[0], AudioCommand::Play { cue, .. } if cue.message == "second"));
    }

    #[test]
    fn highest_priority_wins_with_fifo_ties() {
        let mut queue = AudioQueue::new();
        queue.enqueue(cue("playing", AudioPriority::High), 0, &mut FakeAssets);
        queue.enqueue(cue("low", AudioPriority::Low), 1, &mut FakeAssets);
        queue.enqueue(cue("normal-a", AudioPriority::Normal), 2, &mut FakeAssets);
        queue.enqueue(cue("normal-b", AudioPriority::Normal), 3, &mut FakeAssets);
        queue.drain_commands();

        queue.on_finished(100);
        queue.tick(400, &mut FakeAssets);
        let commands = queue.drain_commands();
        assert!(
            matches!(&commands[0], AudioCommand::Play { cue, .. } if cue.message == "normal-a")
        );
    }

    #[test]
    fn fallback_generation_is_used_on_miss() {
        let mut queue = AudioQueue::new();
        queue.enqueue(cue("fallback line", AudioPriority::Normal), 0, &mut FakeAssets);

        let commands = queue.drain_commands();
        assert!(
            matches!(&commands[0], AudioCommand::Play { asset, .. } if asset.starts_with("generated:"))
        );
    }

    #[test]
    fn double_failure_drops_the_item_and_advances() {
        let mut queue = AudioQueue::new();
        queue.enqueue(cue("missing line", AudioPriority::Normal), 0, &mut FakeAssets);
        queue.enqueue(cue("next", AudioPriority::Normal), 1, &mut FakeAssets);

        // The broken item produced no Play; the queue pauses, then moves on.
        assert!(queue.drain_commands().is_empty());
        queue.tick(300, &mut FakeAssets);
        let commands = queue.drain_commands();
        assert!(matches!(&commands[0], AudioCommand::Play { cue, .. } if cue.message == "next"));
    }
}
