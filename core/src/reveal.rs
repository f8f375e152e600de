use alloc::collections::{BTreeSet, VecDeque};

use crate::*;

/// Cells exposed by selecting `start`, which must be a valid, non-hazard index.
///
/// A numbered cell reveals only itself. A zero cell opens the connected region of
/// zero cells around it together with the numbered fringe bordering that region.
/// Flagged cells are never part of the result and never expanded.
pub(crate) fn reveal_region(
    layout: &HazardLayout,
    start: CellIndex,
    is_flagged: impl Fn(CellIndex) -> bool,
) -> BTreeSet<CellIndex> {
    let mut revealed = BTreeSet::from([start]);
    if layout.hazards_around(start) != 0 {
        return revealed;
    }

    let mut discovered = BTreeSet::from([start]);
    let mut frontier = VecDeque::from([start]);

    while let Some(node) = frontier.pop_front() {
        for neighbor in layout.iter_neighbors(node) {
            if !discovered.insert(neighbor) || is_flagged(neighbor) {
                continue;
            }

            revealed.insert(neighbor);
            if layout.hazards_around(neighbor) == 0 {
                frontier.push_back(neighbor);
            }
        }
    }

    log::trace!("flood fill from {} reached {} cells", start, revealed.len());
    revealed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(grid_size: Coord, hazards: &[CellIndex]) -> HazardLayout {
        HazardLayout::from_hazard_indices(grid_size, hazards.iter().copied()).unwrap()
    }

    #[test]
    fn numbered_cell_reveals_only_itself() {
        let layout = layout(3, &[0, 1, 3]);

        assert_eq!(reveal_region(&layout, 4, |_| false), BTreeSet::from([4]));
    }

    #[test]
    fn zero_cell_opens_region_and_fringe() {
        // hazards fill the left column of a 4x4 grid
        let layout = layout(4, &[0, 4, 8, 12]);

        let revealed = reveal_region(&layout, 3, |_| false);

        let expected: BTreeSet<CellIndex> = (0..16).filter(|index| index % 4 != 0).collect();
        assert_eq!(revealed, expected);
    }

    #[test]
    fn flagged_cells_are_excluded_and_block_expansion() {
        // a single hazard in the corner, every other cell is zero or borders it
        let layout = layout(5, &[24]);
        let flags = BTreeSet::from([2, 7, 12, 17, 22]);

        let revealed = reveal_region(&layout, 0, |index| flags.contains(&index));

        assert!(revealed.is_disjoint(&flags));
        assert!(!revealed.contains(&24));
        // the flagged column walls off the right side
        let expected: BTreeSet<CellIndex> = (0..25).filter(|index| index % 5 < 2).collect();
        assert_eq!(revealed, expected);
    }

    #[test]
    fn region_never_contains_hazards_and_is_zero_connected() {
        let layout = layout(6, &[7, 20, 33]);

        for start in 0..36 {
            if layout.contains_hazard(start) || layout.hazards_around(start) != 0 {
                continue;
            }
            let revealed = reveal_region(&layout, start, |_| false);

            assert!(revealed.contains(&start));
            assert!(revealed.iter().all(|index| !layout.contains_hazard(*index)));
            // every revealed cell touches a revealed zero cell, or is the start itself
            for &index in &revealed {
                let touches_zero = index == start
                    || layout
                        .iter_neighbors(index)
                        .any(|n| revealed.contains(&n) && layout.hazards_around(n) == 0);
                assert!(touches_zero, "cell {index} is not connected to the region");
            }
        }
    }
}
