//! Action shape catalog.
//!
//! Each entry maps a difficulty tier and the card ranks that trigger it
//! to a polyomino. The catalog is read-only input to the placement
//! search; custom catalogs can be loaded from board files.

use crate::deck::CardValue;
use crate::geometry::Shape;

/// One catalog entry: a shape, its difficulty tier (1-5), and the card
/// ranks that can place it.
#[derive(Clone, Debug)]
pub struct ActionShape {
    pub id: u32,
    pub value: u8,
    pub shape: Shape,
    pub card_values: Vec<CardValue>,
}

/// Catalog entries whose rank list contains `value`, in catalog order.
pub fn shapes_for_card(catalog: &[ActionShape], value: CardValue) -> Vec<&ActionShape> {
    catalog
        .iter()
        .filter(|entry| entry.card_values.contains(&value))
        .collect()
}

fn entry(id: u32, value: u8, rows: &[&[u8]], cards: &[CardValue]) -> ActionShape {
    let rows: Vec<Vec<u8>> = rows.iter().map(|r| r.to_vec()).collect();
    ActionShape {
        id,
        value,
        // builtin tables are rectangular and non-empty
        shape: Shape::from_rows(&rows).expect("builtin action shape is well-formed"),
        card_values: cards.to_vec(),
    }
}

/// The standard 15-shape catalog of the board designer.
///
/// Tiers grow with card rank: dominoes and corners for 2-3, triominoes
/// for 4-5, tetrominoes for 6-8, pentominoes for 9-10, hexominoes for
/// aces. Face cards have no shapes; they resolve to encounters.
pub fn standard_catalog() -> Vec<ActionShape> {
    use CardValue::{Ace, Eight, Five, Four, Nine, Seven, Six, Ten, Three, Two};

    vec![
        entry(1, 1, &[&[1, 1]], &[Two, Three]),
        entry(2, 1, &[&[1], &[1]], &[Two, Three]),
        entry(3, 1, &[&[1, 0], &[1, 1]], &[Two, Three]),
        entry(4, 2, &[&[1, 1, 1]], &[Four, Five]),
        entry(5, 2, &[&[1, 1], &[1, 0]], &[Four, Five]),
        entry(6, 2, &[&[1, 0], &[1, 1], &[0, 1]], &[Four, Five]),
        entry(7, 3, &[&[1, 1], &[1, 1]], &[Six, Seven, Eight]),
        entry(8, 3, &[&[1, 1, 1, 1]], &[Six, Seven, Eight]),
        entry(9, 3, &[&[1, 1], &[0, 1], &[0, 1]], &[Six, Seven, Eight]),
        entry(10, 4, &[&[1, 1, 1], &[1, 0, 1]], &[Nine, Ten]),
        entry(11, 4, &[&[1, 1, 1], &[1, 1, 0]], &[Nine, Ten]),
        entry(12, 4, &[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0]], &[Nine, Ten]),
        entry(13, 5, &[&[1, 1, 1], &[1, 1, 1]], &[Ace]),
        entry(14, 5, &[&[1, 1, 1, 1, 1, 1]], &[Ace]),
        entry(15, 5, &[&[1, 1], &[1, 1], &[1, 1]], &[Ace]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        let catalog = standard_catalog();
        assert_eq!(catalog.len(), 15);
        let mut ids: Vec<u32> = catalog.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 15);
    }

    #[test]
    fn test_tiers_cover_one_through_five() {
        let catalog = standard_catalog();
        for tier in 1..=5u8 {
            assert_eq!(
                catalog.iter().filter(|e| e.value == tier).count(),
                3,
                "tier {tier} should have three shapes"
            );
        }
    }

    #[test]
    fn test_shape_sizes_grow_with_tier() {
        for entry in standard_catalog() {
            let cells = entry.shape.cell_count();
            let expected = match entry.value {
                1 => 2..=3,
                2 => 3..=4,
                3 => 4..=4,
                4 => 5..=5,
                _ => 6..=6,
            };
            assert!(
                expected.contains(&cells),
                "shape {} (tier {}) has {} cells",
                entry.id,
                entry.value,
                cells
            );
        }
    }

    #[test]
    fn test_every_number_rank_has_shapes() {
        let catalog = standard_catalog();
        for value in CardValue::ALL {
            let matches = shapes_for_card(&catalog, value);
            if value.is_face() {
                assert!(matches.is_empty());
            } else {
                assert_eq!(matches.len(), 3, "rank {value} should map to one tier");
            }
        }
    }
}
