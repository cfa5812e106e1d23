// Greedy pairing of itineraries between two snapshots
use tracing::debug;

use crate::config::ReturnPolicy;
use crate::itinerary::Itinerary;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItineraryChange<'a> {
    /// Same flight numbers on both sides; prices and times may differ.
    Matched {
        old: &'a Itinerary,
        new: &'a Itinerary,
    },
    Removed(&'a Itinerary),
    Added(&'a Itinerary),
}

fn same_numbers<'l, 'r>(
    left: impl ExactSizeIterator<Item = &'l str>,
    right: impl ExactSizeIterator<Item = &'r str>,
) -> bool {
    left.len() == right.len() && left.zip(right).all(|(l, r)| l == r)
}

pub fn is_same_itinerary(old: &Itinerary, new: &Itinerary, policy: ReturnPolicy) -> bool {
    if !same_numbers(old.onward_numbers(), new.onward_numbers()) {
        return false;
    }
    match policy {
        ReturnPolicy::Strict => same_numbers(old.return_numbers(), new.return_numbers()),
        ReturnPolicy::Lenient => true,
    }
}

/// Pairs every itinerary of `old` with the first not yet consumed itinerary
/// of `new` that has the same flight numbers.
///
/// Results follow the order of `old` (matched or removed), then every
/// unconsumed itinerary of `new` as added, in document order. First match
/// wins; there is no backtracking.
pub fn match_itineraries<'a>(
    old: &'a [Itinerary],
    new: &'a [Itinerary],
    policy: ReturnPolicy,
) -> Vec<ItineraryChange<'a>> {
    let mut consumed = vec![false; new.len()];
    let mut changes = Vec::with_capacity(old.len() + new.len());

    for (old_index, old_itinerary) in old.iter().enumerate() {
        let candidate = new.iter().enumerate().find(|(index, new_itinerary)| {
            !consumed[*index] && is_same_itinerary(old_itinerary, new_itinerary, policy)
        });

        match candidate {
            Some((new_index, new_itinerary)) => {
                debug!(old_index, new_index, "matched itinerary");
                consumed[new_index] = true;
                changes.push(ItineraryChange::Matched {
                    old: old_itinerary,
                    new: new_itinerary,
                });
            }
            None => {
                debug!(old_index, "no match for itinerary");
                changes.push(ItineraryChange::Removed(old_itinerary));
            }
        }
    }

    changes.extend(
        new.iter()
            .zip(consumed)
            .filter(|(_, consumed)| !consumed)
            .map(|(itinerary, _)| ItineraryChange::Added(itinerary)),
    );

    changes
}
