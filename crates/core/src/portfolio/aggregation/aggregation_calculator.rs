use std::collections::HashMap;

use log::trace;

use super::positions_model::{Position, PositionKey};
use crate::investments::Lot;

/// Merges lots sharing an instrument and venue into positions.
///
/// Lots are folded in the order given, so the last lot of a key sets the
/// position's current price. Closed positions are dropped and the rest are
/// sorted by current value, highest first; ties keep first-seen order.
pub fn aggregate_lots(lots: &[Lot]) -> Vec<Position> {
    let mut positions: Vec<Position> = Vec::new();
    let mut index_by_key: HashMap<PositionKey, usize> = HashMap::new();

    for lot in lots {
        let key = PositionKey::for_lot(lot);
        match index_by_key.get(&key) {
            Some(&index) => positions[index].merge(lot),
            None => {
                index_by_key.insert(key, positions.len());
                positions.push(Position::from_lot(lot));
            }
        }
    }

    let merged = positions.len();
    positions.retain(Position::is_active);
    trace!(
        "Aggregated {} lots into {} positions ({} closed)",
        lots.len(),
        positions.len(),
        merged - positions.len()
    );

    // `sort_by` is stable.
    positions.sort_by(|a, b| b.current_value.cmp(&a.current_value));
    positions
}
