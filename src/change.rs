// 🧮 Change Making - Pick banknotes that add up to an exact amount
//
// Works in units of the smallest denomination (5). For every prefix of the
// denominations (smallest first) a bounded-knapsack table records which
// unit totals are payable. Reconstruction walks from the largest
// denomination down, taking as many notes as possible while the rest stays
// payable with the smaller notes. The result is the exact combination with
// the most 100s, then 50s, then 20s, then 10s, then 5s.

use crate::denomination::Denomination;
use crate::stash::MoneyStash;

const UNIT: i64 = 5;

/// Banknotes from `vault` summing to exactly `amount`
///
/// Returns `None` when no combination exists. Negative vault counts are
/// treated as zero notes available. Time and memory grow linearly with
/// `amount`, so callers bound it.
pub fn make_change(vault: &MoneyStash, amount: i64) -> Option<MoneyStash> {
    if amount < 0 {
        return None;
    }
    if amount == 0 {
        return Some(MoneyStash::empty());
    }

    let mut usable = *vault;
    for (d, count) in vault.iter() {
        usable.set(d, count.max(0));
    }
    if amount % UNIT != 0 || amount as i128 > usable.total_value() {
        return None;
    }

    let target = usize::try_from(amount / UNIT).ok()?;
    let notes: Vec<(Denomination, usize, usize)> = Denomination::ALL
        .iter()
        .map(|&d| {
            let value = (d.face_value() / UNIT) as usize;
            let available = usize::try_from(usable.count(d))
                .unwrap_or(usize::MAX)
                .min(target);
            (d, value, available)
        })
        .collect();

    let tables = payable_tables(&notes, target);
    if !tables[notes.len()][target] {
        return None;
    }

    let mut change = MoneyStash::empty();
    let mut remaining = target;
    for (i, &(denomination, value, available)) in notes.iter().enumerate().rev() {
        let most = available.min(remaining / value);
        let take = (0..=most)
            .rev()
            .find(|&k| tables[i][remaining - k * value])?;
        change.set(denomination, take as i64);
        remaining -= take * value;
    }

    debug_assert_eq!(remaining, 0);
    Some(change)
}

/// `tables[i][s]`: can `s` units be paid with the first `i` denominations
fn payable_tables(notes: &[(Denomination, usize, usize)], target: usize) -> Vec<Vec<bool>> {
    let mut tables = Vec::with_capacity(notes.len() + 1);
    let mut base = vec![false; target + 1];
    base[0] = true;
    tables.push(base);

    for &(_, value, available) in notes {
        let prev = &tables[tables.len() - 1];
        let mut next = vec![false; target + 1];
        // Notes of this denomination spent to reach each total
        let mut used = vec![0usize; target + 1];

        for s in 0..=target {
            if prev[s] {
                next[s] = true;
            } else if s >= value && next[s - value] && used[s - value] < available {
                next[s] = true;
                used[s] = used[s - value] + 1;
            }
        }
        tables.push(next);
    }

    tables
}

// ============================================================================
// TESTS
// ============================================================================
