use crate::state::{PrizeLevel, PrizeTable};

/// Resolves one uniform sample in [0, 1) against the current prize table.
///
/// Levels are visited in ascending order of probability, ties keeping template
/// order, so the rarest prizes own the first and narrowest cumulative bands.
/// Each level that still has stock adds its probability to a running sum and
/// wins when `sample <= sum`. Exhausted levels are skipped without adding their
/// mass, so the overall chance of winning shrinks as stock runs out instead of
/// being renormalised.
///
/// When a real prize is returned one unit of its stock has been consumed. When
/// no band matches the outcome is [`PrizeLevel::None`] and the table is left
/// untouched.
pub fn draw_prize(sample: f64, prize_config: &mut PrizeTable) -> PrizeLevel {
    let slots = prize_config.slots_mut();

    let mut order: Vec<usize> = (0..slots.len()).collect();
    order.sort_by(|&a, &b| {
        slots[a]
            .state
            .probability
            .total_cmp(&slots[b].state.probability)
    });

    let mut cumulative = 0.0;
    for index in order {
        let slot = &mut slots[index];
        if !slot.level.is_prize() || !slot.state.is_available() {
            continue;
        }
        cumulative += slot.state.probability;
        if sample <= cumulative {
            if slot.state.consume() {
                return slot.level;
            }
            break;
        }
    }

    PrizeLevel::None
}
