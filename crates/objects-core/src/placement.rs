//! Weighted-random candidate selection, shared by the locator's PUT
//! placement (spec.md §4.2 step 7) and the replicator's destination
//! sampling (spec.md §4.3 step e) so both pick candidates the same way.

use crate::health::NodeHealth;
use rand::distributions::WeightedIndex;
use rand::prelude::*;

/// Weight a candidate as `available * percent` (spec.md §4.2 step 7).
pub fn weight(health: &NodeHealth) -> u64 {
    health.available.saturating_mul(health.percent as u64)
}

/// Weighted-random sample of one candidate. Returns `None` if
/// `candidates` is empty.
pub fn sample_one<'a>(candidates: &'a [(String, NodeHealth)]) -> Option<&'a str> {
    if candidates.is_empty() {
        return None;
    }
    let weights: Vec<u64> = candidates.iter().map(|(_, h)| weight(h).max(1)).collect();
    let dist = WeightedIndex::new(&weights).ok()?;
    let idx = dist.sample(&mut thread_rng());
    Some(candidates[idx].0.as_str())
}

/// Weighted-random sample of up to `count` *distinct* candidates,
/// sampling without replacement (spec.md §9 decided: replicator
/// destination sampling never double-assigns a node in one pass).
pub fn sample_without_replacement(candidates: &[(String, NodeHealth)], count: usize) -> Vec<String> {
    let mut pool: Vec<(String, NodeHealth)> = candidates.to_vec();
    let mut chosen = Vec::new();
    let mut rng = thread_rng();
    while chosen.len() < count && !pool.is_empty() {
        let weights: Vec<u64> = pool.iter().map(|(_, h)| weight(h).max(1)).collect();
        let Ok(dist) = WeightedIndex::new(&weights) else {
            break;
        };
        let idx = dist.sample(&mut rng);
        chosen.push(pool.remove(idx).0);
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn health(available: u64, percent: u8) -> NodeHealth {
        NodeHealth {
            read: true,
            write: true,
            available,
            percent,
        }
    }

    #[test]
    fn sample_one_picks_from_candidates() {
        let candidates = vec![("a".to_string(), health(100, 50)), ("b".to_string(), health(200, 50))];
        let picked = sample_one(&candidates).unwrap();
        assert!(picked == "a" || picked == "b");
    }

    #[test]
    fn sample_one_empty_is_none() {
        assert!(sample_one(&[]).is_none());
    }

    #[test]
    fn sample_without_replacement_never_repeats() {
        let candidates = vec![
            ("a".to_string(), health(100, 50)),
            ("b".to_string(), health(100, 50)),
            ("c".to_string(), health(100, 50)),
        ];
        let chosen = sample_without_replacement(&candidates, 5);
        assert_eq!(chosen.len(), 3); // capped by pool size
        let mut sorted = chosen.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), chosen.len());
    }
}
