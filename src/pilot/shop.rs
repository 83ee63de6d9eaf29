//! Decides which upgrade, if any, to buy on a given tick.

use rand::Rng;

use crate::pilot::extract::{extract_priority_score, parse_cost};
use crate::surface::{Surface, Target};

/// One purchasable option as scraped this tick. Field text is kept raw so
/// parsing failures can exclude the offer instead of mis-pricing it; nothing
/// here outlives the tick.
#[derive(Debug)]
pub struct Offer<E> {
    pub handle: E,
    pub cost_text: Option<String>,
    pub desc_text: Option<String>,
}

/// Reads every offer currently on the surface together with its cost and
/// description fields. A field that is missing or unreadable stays `None`.
pub fn scan_offers<S: Surface>(surface: &S) -> Vec<Offer<S::Element>> {
    surface
        .find_all(Target::Offer)
        .into_iter()
        .map(|handle| {
            let cost_text = surface
                .find_in(&handle, Target::OfferCost)
                .and_then(|field| surface.text(&field).ok());
            let desc_text = surface
                .find_in(&handle, Target::OfferDescription)
                .and_then(|field| surface.text(&field).ok());
            Offer {
                handle,
                cost_text,
                desc_text,
            }
        })
        .collect()
}

/// Picks at most one offer to buy this tick.
///
/// A lone offer is a guaranteed acquisition: it is bought whenever its cost
/// fits the current total, even at zero cost. With several offers on the
/// board, zero-cost and unparsable entries drop out, the best positive
/// recurring yield wins (first seen on a tie), and scoreless affordable
/// offers are drawn uniformly at random.
pub fn choose<'a, E>(
    resources: f64,
    offers: &'a [Offer<E>],
    rng: &mut impl Rng,
) -> Option<&'a Offer<E>> {
    match offers {
        [] => None,
        [only] => {
            let cost = parse_cost(only.cost_text.as_deref()?)?;
            (cost <= resources).then_some(only)
        }
        _ => {
            let mut affordable: Vec<&Offer<E>> = Vec::new();
            let mut best: Option<(&Offer<E>, f64)> = None;
            for offer in offers {
                let (Some(cost_text), Some(desc_text)) =
                    (offer.cost_text.as_deref(), offer.desc_text.as_deref())
                else {
                    continue;
                };
                let Some(cost) = parse_cost(cost_text) else {
                    continue;
                };
                if cost <= 0.0 || cost > resources {
                    continue;
                }
                affordable.push(offer);
                let score = extract_priority_score(desc_text);
                if score > 0.0 {
                    let update = match &best {
                        Some((_, best_score)) => score > *best_score,
                        None => true,
                    };
                    if update {
                        best = Some((offer, score));
                    }
                }
            }
            if let Some((offer, _)) = best {
                return Some(offer);
            }
            if affordable.is_empty() {
                return None;
            }
            let index = rng.gen_range(0..affordable.len());
            Some(affordable[index])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn offer(handle: u32, cost_text: Option<&str>, desc_text: Option<&str>) -> Offer<u32> {
        Offer {
            handle,
            cost_text: cost_text.map(str::to_string),
            desc_text: desc_text.map(str::to_string),
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn lone_offer_bought_only_when_affordable() {
        let offers = vec![offer(1, Some("Cost: 50"), None)];
        let pick = choose(100.0, &offers, &mut rng());
        assert_eq!(pick.map(|o| o.handle), Some(1));

        let pick = choose(49.0, &offers, &mut rng());
        assert!(pick.is_none());
    }

    #[test]
    fn lone_zero_cost_offer_is_still_bought() {
        let offers = vec![offer(1, Some("Cost: 0"), None)];
        let pick = choose(0.0, &offers, &mut rng());
        assert_eq!(pick.map(|o| o.handle), Some(1));
    }

    #[test]
    fn lone_offer_without_a_cost_field_is_skipped() {
        let offers = vec![offer(1, None, Some("+9 stimulation per second"))];
        assert!(choose(1_000.0, &offers, &mut rng()).is_none());

        let offers = vec![offer(1, Some("ask inside"), None)];
        assert!(choose(1_000.0, &offers, &mut rng()).is_none());
    }

    #[test]
    fn highest_affordable_recurring_yield_wins() {
        let offers = vec![
            offer(1, Some("Cost: 10"), Some("makes everything shinier")),
            offer(2, Some("Cost: 20"), Some("+5 stimulation per second")),
            offer(3, Some("Cost: 1,000"), Some("+9 stimulation per second")),
        ];
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pick = choose(100.0, &offers, &mut rng);
            assert_eq!(pick.map(|o| o.handle), Some(2));
        }
    }

    #[test]
    fn score_ties_resolve_to_the_first_seen() {
        let offers = vec![
            offer(1, Some("Cost: 30"), Some("+4 stimulation per second")),
            offer(2, Some("Cost: 40"), Some("+4 stimulation per second")),
        ];
        let pick = choose(100.0, &offers, &mut rng());
        assert_eq!(pick.map(|o| o.handle), Some(1));
    }

    #[test]
    fn zero_cost_offers_are_excluded_among_several() {
        let offers = vec![
            offer(1, Some("Cost: 0"), Some("a little treat")),
            offer(2, Some("Cost: 10,000"), Some("+9 stimulation per second")),
        ];
        assert!(choose(100.0, &offers, &mut rng()).is_none());
    }

    #[test]
    fn offers_missing_fields_are_excluded_among_several() {
        let offers = vec![
            offer(1, Some("Cost: 10"), None),
            offer(2, None, Some("+2 stimulation per second")),
            offer(3, Some("Cost: 20"), Some("makes everything shinier")),
        ];
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pick = choose(100.0, &offers, &mut rng);
            assert_eq!(pick.map(|o| o.handle), Some(3));
        }
    }

    #[test]
    fn scoreless_offers_are_drawn_roughly_uniformly() {
        let offers = vec![
            offer(1, Some("Cost: 10"), Some("a cozy blanket")),
            offer(2, Some("Cost: 20"), Some("a warm drink")),
        ];
        let mut rng = rng();
        let mut first = 0;
        let mut second = 0;
        for _ in 0..400 {
            match choose(100.0, &offers, &mut rng).map(|o| o.handle) {
                Some(1) => first += 1,
                Some(2) => second += 1,
                other => panic!("unexpected pick {other:?}"),
            }
        }
        assert!(first > 120, "first offer picked {first} of 400");
        assert!(second > 120, "second offer picked {second} of 400");
    }

    #[test]
    fn nothing_affordable_means_no_purchase() {
        let offers = vec![
            offer(1, Some("Cost: 500"), Some("+1 stimulation per second")),
            offer(2, Some("Cost: 900"), Some("a warm drink")),
        ];
        assert!(choose(100.0, &offers, &mut rng()).is_none());

        let empty: Vec<Offer<u32>> = Vec::new();
        assert!(choose(100.0, &empty, &mut rng()).is_none());
    }
}
