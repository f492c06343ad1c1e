//! Emoji taxonomy and the shared mood percentage

use super::observation::Observation;

/// Reported when there is nothing to summarize
pub const NEUTRAL_DEFAULT_EMOJI: &str = "😐";

const POSITIVE_EMOJIS: [&str; 3] = ["😊", "😎", "🥰"];
const NEGATIVE_EMOJIS: [&str; 3] = ["😢", "😡", "😷"];
const NEUTRAL_EMOJIS: [&str; 3] = ["😐", "🤔", "😴"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoodClass {
    Positive,
    Negative,
    Neutral,
}

impl MoodClass {
    /// Classify an emoji; `None` for anything outside the taxonomy
    pub fn of(emoji: &str) -> Option<Self> {
        if POSITIVE_EMOJIS.contains(&emoji) {
            Some(MoodClass::Positive)
        } else if NEGATIVE_EMOJIS.contains(&emoji) {
            Some(MoodClass::Negative)
        } else if NEUTRAL_EMOJIS.contains(&emoji) {
            Some(MoodClass::Neutral)
        } else {
            None
        }
    }
}

/// Percentage of positive mood (0-100), neutral counting as half positive
///
/// Emoji outside the taxonomy are left out of the denominator. Returns 50
/// when no observation carries a classified emoji.
pub fn mood_percentage<'a, I>(observations: I) -> u8
where
    I: IntoIterator<Item = &'a Observation>,
{
    let mut positive = 0u64;
    let mut negative = 0u64;
    let mut neutral = 0u64;

    for obs in observations {
        match MoodClass::of(&obs.emoji) {
            Some(MoodClass::Positive) => positive += 1,
            Some(MoodClass::Negative) => negative += 1,
            Some(MoodClass::Neutral) => neutral += 1,
            None => {}
        }
    }

    let total = positive + negative + neutral;
    if total == 0 {
        return 50;
    }

    // floor((P + U/2) / T * 100) without float rounding
    let pct = (200 * positive + 100 * neutral) / (2 * total);
    pct.min(100) as u8
}

/// Most frequent emoji; ties go to the one encountered first
pub fn dominant_emoji<'a, I>(observations: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a Observation>,
{
    let mut tally: Vec<(&'a str, usize)> = Vec::new();

    for obs in observations {
        match tally.iter_mut().find(|(emoji, _)| *emoji == obs.emoji) {
            Some((_, count)) => *count += 1,
            None => tally.push((obs.emoji.as_str(), 1)),
        }
    }

    let mut best: Option<(&'a str, usize)> = None;
    for (emoji, count) in tally {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((emoji, count));
        }
    }

    best.map(|(emoji, _)| emoji)
}
