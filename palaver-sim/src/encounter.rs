//! The two-party conversation protocol — strict alternation, bounded rounds.

use std::time::Duration;

use palaver_core::{Person, Result};
use rand::Rng;

/// Run one bounded conversation between `a` and `b`.
///
/// `rounds` message-pairs, strictly alternating, seeded with an empty
/// utterance on round one. There is no early termination on content — a
/// "goodbye" does not shorten the loop. After the loop the final utterance
/// is handed back to the side that spoke first, so both mirrors close at
/// equal length; then both sides revise their beliefs independently.
///
/// Dialogue lines stream to stdout with `pace` between them; each turn
/// blocks on its oracle call before the next may begin.
pub async fn converse(
    a: &mut Person,
    b: &mut Person,
    rounds: usize,
    pace: Duration,
) -> Result<()> {
    if rounds == 0 {
        return Ok(());
    }

    let handle_a = a.handle();
    let handle_b = b.handle();

    let mut b_message = String::new();
    for _ in 0..rounds {
        let a_message = a.get_message(&b_message, &handle_b).await?;
        b_message = b.get_message(&a_message, &handle_a).await?;

        println!("{} says: {a_message}", handle_a.name);
        tokio::time::sleep(pace).await;
        println!("{} says: {b_message}", handle_b.name);
        tokio::time::sleep(pace).await;
    }
    a.hear(&b_message, &handle_b)?;

    a.end_conversation().await?;
    b.end_conversation().await?;
    Ok(())
}

/// Pick an ordered pair of distinct indices from a population of `len`.
///
/// Uniform over ordered pairs; returns `None` when fewer than two members
/// exist.
pub fn pick_pair(rng: &mut impl Rng, len: usize) -> Option<(usize, usize)> {
    if len < 2 {
        return None;
    }
    let first = rng.gen_range(0..len);
    let mut second = rng.gen_range(0..len - 1);
    if second >= first {
        second += 1;
    }
    Some((first, second))
}
