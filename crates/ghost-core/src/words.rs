//! Static spirit-box vocabulary, keyed by question and tier.

use contracts::{GhostType, Personality, QuestionId, WordPools};

fn common_words(question: QuestionId) -> &'static [&'static str] {
    match question {
        QuestionId::Intent => &["leave", "help", "nothing"],
        QuestionId::Location => &["here", "near", "below"],
        QuestionId::Confirmation => &["yes", "no", "maybe"],
    }
}

fn pooled_personality_words(
    personality: Personality,
    question: QuestionId,
) -> &'static [&'static str] {
    match (personality, question) {
        (Personality::Aggressive, QuestionId::Intent) => &["kill", "hurt", "blood"],
        (Personality::Aggressive, QuestionId::Location) => &["behind", "close", "everywhere"],
        (Personality::Aggressive, QuestionId::Confirmation) => &["always", "mine", "forever"],
        (Personality::Shy, QuestionId::Intent) => &["alone", "quiet", "hide"],
        (Personality::Shy, QuestionId::Location) => &["dark", "corner", "away"],
        (Personality::Shy, QuestionId::Confirmation) => &["perhaps", "afraid", "gone"],
        (Personality::Chaotic, QuestionId::Intent) => &["play", "break", "noise"],
        (Personality::Chaotic, QuestionId::Location) => &["up", "down", "around"],
        (Personality::Chaotic, QuestionId::Confirmation) => &["never", "again", "who"],
        (Personality::Contradictory, _) => &[],
    }
}

/// Shared personality tier. Contradictory ghosts get every pooled personality
/// concatenated in `Personality::POOLED` order.
pub fn personality_words(personality: Personality, question: QuestionId) -> Vec<&'static str> {
    match personality {
        Personality::Contradictory => Personality::POOLED
            .into_iter()
            .flat_map(|pooled| pooled_personality_words(pooled, question).iter().copied())
            .collect(),
        other => pooled_personality_words(other, question).to_vec(),
    }
}

pub fn unique_words(ghost: GhostType, question: QuestionId) -> &'static [&'static str] {
    match (ghost, question) {
        (GhostType::Wraith, QuestionId::Intent) => &["vengeance", "reap"],
        (GhostType::Wraith, QuestionId::Location) => &["threshold", "grave"],
        (GhostType::Wraith, QuestionId::Confirmation) => &["judgement", "eternal"],
        (GhostType::Shade, QuestionId::Intent) => &["forget", "shadow"],
        (GhostType::Shade, QuestionId::Location) => &["beneath", "veil"],
        (GhostType::Shade, QuestionId::Confirmation) => &["hush", "faded"],
        (GhostType::Poltergeist, QuestionId::Intent) => &["chaos", "smash"],
        (GhostType::Poltergeist, QuestionId::Location) => &["walls", "ceiling"],
        (GhostType::Poltergeist, QuestionId::Confirmation) => &["boo", "giggle"],
        (GhostType::Banshee, QuestionId::Intent) => &["wail", "mourn"],
        (GhostType::Banshee, QuestionId::Location) => &["river", "hollow"],
        (GhostType::Banshee, QuestionId::Confirmation) => &["doom", "keening"],
        (GhostType::Phantom, QuestionId::Intent) => &["unseen", "linger"],
        (GhostType::Phantom, QuestionId::Location) => &["mirror", "nowhere"],
        (GhostType::Phantom, QuestionId::Confirmation) => &["invisible", "echo"],
        (GhostType::Onyx, QuestionId::Intent) => &["obsidian", "consume"],
        (GhostType::Onyx, QuestionId::Location) => &["stone", "abyss"],
        (GhostType::Onyx, QuestionId::Confirmation) => &["absolute", "black"],
        (GhostType::Trickster, QuestionId::Intent) => &["lies", "game"],
        (GhostType::Trickster, QuestionId::Location) => &["wrong", "elsewhere"],
        (GhostType::Trickster, QuestionId::Confirmation) => &["truth", "both"],
    }
}

pub fn word_pools(ghost: GhostType, personality: Personality, question: QuestionId) -> WordPools {
    fn owned(words: &[&str]) -> Vec<String> {
        words.iter().map(|word| (*word).to_string()).collect()
    }

    WordPools {
        common: owned(common_words(question)),
        personality: owned(&personality_words(personality, question)),
        unique: owned(unique_words(ghost, question)),
    }
}
