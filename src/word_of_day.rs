//! "Word of the day" selection.
//!
//! Two policies are offered and kept apart: [`PickPolicy::Random`] draws a
//! fresh candidate on every call, [`PickPolicy::Daily`] derives the candidate
//! from the local calendar date so every call on the same day agrees.

use crate::error::LookupError;
use crate::lookup::DictionaryClient;
use crate::models::LookupResult;
use chrono::{Datelike, Local, NaiveDate};
use log::info;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Embedded candidate list.
pub const CANDIDATES: &[&str] = &[
    "serendipity",
    "ephemeral",
    "eloquent",
    "resilience",
    "ubiquitous",
    "quintessential",
    "mellifluous",
    "petrichor",
    "sonder",
    "luminous",
    "wanderlust",
    "halcyon",
    "nostalgia",
    "epiphany",
    "solitude",
    "labyrinth",
    "zenith",
    "aurora",
    "cascade",
    "whimsical",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickPolicy {
    /// Independent uniform pick per call.
    #[default]
    Random,
    /// One word per local calendar day.
    Daily,
}

#[derive(Debug, Clone, Copy)]
pub struct WordOfDay {
    candidates: &'static [&'static str],
    policy: PickPolicy,
}

impl WordOfDay {
    pub fn new(policy: PickPolicy) -> Self {
        WordOfDay {
            candidates: CANDIDATES,
            policy,
        }
    }

    pub fn policy(&self) -> PickPolicy {
        self.policy
    }

    /// Chooses a candidate according to the configured policy.
    pub fn pick(&self) -> String {
        match self.policy {
            PickPolicy::Random => self.pick_with(&mut rand::rng()),
            PickPolicy::Daily => self.pick_for_date(Local::now().date_naive()),
        }
    }

    /// Uniform pick using the given generator.
    pub fn pick_with<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        // The list is a non-empty constant.
        self.candidates
            .choose(rng)
            .copied()
            .unwrap_or(self.candidates[0])
            .to_string()
    }

    /// Deterministic pick for `date`.
    pub fn pick_for_date(&self, date: NaiveDate) -> String {
        let day = date.num_days_from_ce() as u64;
        let index = (mix(day) % self.candidates.len() as u64) as usize;
        self.candidates[index].to_string()
    }

    /// Picks a candidate and looks it up. Fails exactly like a user lookup.
    pub async fn resolve(&self, client: &DictionaryClient) -> Result<LookupResult, LookupError> {
        let candidate = self.pick();
        info!("Word of the day ({:?}): '{}'", self.policy(), candidate);
        client.lookup(&candidate).await
    }
}

impl Default for WordOfDay {
    fn default() -> Self {
        Self::new(PickPolicy::default())
    }
}

/// splitmix64 finalizer; spreads consecutive day numbers over the list.
fn mix(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::tests::{HELLO_BODY, serve};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;
    use std::time::Duration;

    #[test]
    fn test_pick_is_a_candidate() {
        let wotd = WordOfDay::default();
        for _ in 0..100 {
            assert!(CANDIDATES.contains(&wotd.pick().as_str()));
        }
    }

    #[test]
    fn test_pick_is_roughly_uniform() {
        let wotd = WordOfDay::new(PickPolicy::Random);
        let mut rng = StdRng::seed_from_u64(7);
        let draws = 40_000;
        let mut counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..draws {
            *counts.entry(wotd.pick_with(&mut rng)).or_default() += 1;
        }

        assert_eq!(counts.len(), CANDIDATES.len());
        let expected = draws as f64 / CANDIDATES.len() as f64;
        for (word, count) in counts {
            let deviation = (count as f64 - expected).abs() / expected;
            assert!(deviation < 0.15, "'{}' drawn {} times, expected ~{}", word, count, expected);
        }
    }

    #[test]
    fn test_daily_pick_is_stable_within_a_day() {
        let wotd = WordOfDay::new(PickPolicy::Daily);
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let first = wotd.pick_for_date(date);
        for _ in 0..10 {
            assert_eq!(wotd.pick_for_date(date), first);
        }
    }

    #[test]
    fn test_daily_pick_varies_across_days() {
        let wotd = WordOfDay::new(PickPolicy::Daily);
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let mut seen = std::collections::HashSet::new();
        for offset in 0..60 {
            seen.insert(wotd.pick_for_date(start + chrono::Days::new(offset)));
        }
        assert!(seen.len() > 5, "only {} distinct words over 60 days", seen.len());
    }

    #[tokio::test]
    async fn test_resolve_looks_up_the_candidate() {
        let server = serve(200, HELLO_BODY).await;
        let client = DictionaryClient::new(&server.base, Duration::from_secs(5)).unwrap();

        let result = WordOfDay::default()
            .resolve(&client)
            .await
            .expect("resolve should succeed");
        assert!(CANDIDATES.contains(&result.term()));

        let requests = server.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].contains(&format!("/{} ", result.term())));
    }
}
