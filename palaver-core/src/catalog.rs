//! Static identity catalog — the pools persons are bootstrapped from.
//!
//! Names may repeat across a population; biographies and goals are sampled
//! independently, so a run can produce a chef who wants to recruit shelter
//! volunteers. Sampling takes an injected random source so drivers and
//! tests control determinism.

use rand::Rng;
use rand::seq::SliceRandom;

/// Verbose biography descriptions, a few sentences each.
pub const IDENTITIES: &[&str] = &[
    "a hardworking single mother who dedicates most of her time to her two children. In her spare time she enjoys painting landscapes and taking nature walks. She is passionate about environmental conservation and dreams of one day opening her own art gallery",
    "a young software engineer who loves to explore new technologies and programming languages. He is a talented musician, playing the guitar and piano in a local band, and volunteers at a local animal shelter caring for abandoned pets",
    "a talented chef who runs her own restaurant, specializing in fusion cuisine. She loves to travel the world, sampling various cultures and incorporating their flavors into her cooking, and sources her ingredients from local organic farms",
    "a professional athlete playing soccer for a renowned team. He is passionate about fitness, a role model for young athletes, and actively participates in charity events to raise funds for underprivileged children",
    "a compassionate nurse who works long hours to provide care and comfort to her patients. She is an avid reader who unwinds with a good book after a long day, and a talented baker who brings homemade treats to share with her colleagues",
    "a successful entrepreneur who has built a tech startup from the ground up. He is deeply interested in artificial intelligence and its potential to revolutionize various industries, and enjoys mentoring young entrepreneurs",
    "a dedicated high school teacher who is passionate about helping her students reach their full potential. She volunteers at a local community center teaching adult literacy courses, and loves long hikes with her dog",
    "an accomplished architect designing sustainable and innovative buildings around the world. He is a history enthusiast who visits historical sites during his travels, and an amateur photographer",
    "a talented dancer who performs with a prestigious ballet company. She spends hours perfecting her technique and supports organizations that work toward the protection of wildlife",
    "a gifted scientist working on cutting-edge research in the field of renewable energy. He frequently gives lectures at universities, and spends his weekends birdwatching and joining local conservation efforts",
];

/// Display names. Not unique — two persons can share a name.
pub const NAMES: &[&str] = &[
    "Aaliyah", "Aaron", "Abigail", "Adam", "Adrian", "Adriana", "Adrianna", "Adrienne", "Agnes",
    "Aidan", "Aiden", "Aileen", "Aimee", "Aisha", "Aiyana", "Akeem", "Alaina", "Alan", "Albert",
    "Alberto", "Alden", "Alec", "Alex", "Alexander", "Alexandra", "Alexandria", "Brenda",
    "Brendan", "Brennan",
];

/// Motivating directives — each person carries one into every conversation.
pub const GOALS: &[&str] = &[
    "find a partner for a new business venture",
    "persuade someone to join a community garden project",
    "learn something surprising about a stranger",
    "recruit a volunteer for the animal shelter",
    "get someone to recommend a good book",
    "talk someone into trying your cooking",
    "make a new friend who shares your interests",
    "gather support for a neighborhood cleanup",
    "convince someone to visit your art exhibition",
    "find out what people really think of this town",
];

/// Sample a biography uniformly from the catalog.
#[must_use]
pub fn sample_identity(rng: &mut impl Rng) -> String {
    IDENTITIES
        .choose(rng)
        .map(|s| (*s).to_string())
        .unwrap_or_default()
}

/// Sample a display name uniformly from the catalog.
#[must_use]
pub fn sample_name(rng: &mut impl Rng) -> String {
    NAMES
        .choose(rng)
        .map(|s| (*s).to_string())
        .unwrap_or_default()
}

/// Sample a goal uniformly from the catalog.
#[must_use]
pub fn sample_goal(rng: &mut impl Rng) -> String {
    GOALS
        .choose(rng)
        .map(|s| (*s).to_string())
        .unwrap_or_default()
}
