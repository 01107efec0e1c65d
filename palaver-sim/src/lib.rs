//! # palaver-sim — Simulation Driver
//!
//! The thin driver around `palaver-core`: it bootstraps a population from
//! the identity catalog, repeatedly selects an ordered pair of persons, and
//! runs one bounded conversation between them to completion before starting
//! the next. Pairing choice, round count, and pacing live here; all agent
//! state lives in the core.

pub mod config;
pub mod encounter;

use std::sync::Arc;
use std::time::Duration;

use palaver_core::Person;
use palaver_llm::Oracle;
use rand::Rng;
use tracing::{info, warn};

use crate::config::SimConfig;

/// Bootstrap a population and run the configured number of encounters.
///
/// Conversations run strictly one at a time. A failed conversation is
/// logged and abandoned on both sides; the run continues with the next
/// encounter.
pub async fn run_sim(
    config: &SimConfig,
    oracle: Arc<dyn Oracle>,
    rng: &mut impl Rng,
) -> anyhow::Result<()> {
    let mut people: Vec<Person> = (0..config.population)
        .map(|_| Person::spawn(rng, None, Arc::clone(&oracle)))
        .collect();

    for person in &people {
        println!("{}, {}", person.name(), person.identity());
        println!("  goal: {}", person.goal());
    }
    println!("\nStarting conversations...\n");

    let pace = Duration::from_millis(config.pace_ms);
    for _ in 0..config.encounters {
        let Some((i, j)) = encounter::pick_pair(rng, people.len()) else {
            anyhow::bail!("population of {} is too small to pair", people.len());
        };
        let (a, b) = pair_mut(&mut people, i, j);

        println!("{} is talking to {}", a.name(), b.name());
        if let Err(error) = encounter::converse(a, b, config.rounds, pace).await {
            warn!(%error, "conversation aborted");
            a.abandon_conversation();
            b.abandon_conversation();
        }
        println!();
    }

    info!(encounters = config.encounters, "simulation finished");
    Ok(())
}

/// Mutably borrow two distinct members of the population.
fn pair_mut(people: &mut [Person], i: usize, j: usize) -> (&mut Person, &mut Person) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = people.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = people.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palaver_llm::ScriptedOracle;

    #[test]
    fn pair_mut_returns_the_requested_members() {
        let oracle: Arc<dyn Oracle> = Arc::new(ScriptedOracle::fixed("ok"));
        let mut people = vec![
            Person::new("Aisha", "a chef", "cook", Arc::clone(&oracle)),
            Person::new("Brendan", "an athlete", "train", Arc::clone(&oracle)),
            Person::new("Agnes", "a nurse", "read", Arc::clone(&oracle)),
        ];

        let (a, b) = pair_mut(&mut people, 2, 0);
        assert_eq!(a.name(), "Agnes");
        assert_eq!(b.name(), "Aisha");

        let (a, b) = pair_mut(&mut people, 0, 1);
        assert_eq!(a.name(), "Aisha");
        assert_eq!(b.name(), "Brendan");
    }
}
