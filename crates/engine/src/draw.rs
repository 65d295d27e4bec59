//! Roulette-wheel draw over weighted candidates.

use movodoro_core::item::Item;
use rand::Rng;

/// Pick one candidate with probability proportional to its weight.
///
/// Returns `None` only for an empty slice. The last candidate is the
/// fallback when floating-point accumulation never exceeds the draw.
pub fn draw_weighted<'a, R: Rng + ?Sized>(
    weighted: &[(&'a Item, f64)],
    rng: &mut R,
) -> Option<&'a Item> {
    let &(last, _) = weighted.last()?;
    if weighted.len() == 1 {
        return Some(last);
    }

    let total: f64 = weighted.iter().map(|(_, w)| w).sum();
    if !(total > 0.0) || !total.is_finite() {
        return Some(last);
    }

    let r = rng.random_range(0.0..total);
    let mut running = 0.0;
    for &(item, weight) in weighted {
        running += weight;
        if running > r {
            return Some(item);
        }
    }
    Some(last)
}
