//! ASCII battlefield map
//!
//! One character per grid square, row 0 first. Creatures are drawn over
//! terrain across their whole footprint and listed in a legend.

use std::ops::Range;

use ahash::AHashSet;

use crate::battle::battlefield::Battlefield;
use crate::battle::creature::Creature;
use crate::battle::terrain::TerrainKind;

const OPEN_GLYPH: char = '.';

/// Squares along one axis touched by `[start, start + extent]`
fn square_span(start: f64, extent: f64, square_feet: f64, limit: u32) -> Option<Range<u32>> {
    if !start.is_finite() || !extent.is_finite() {
        return None;
    }
    let lo = (start / square_feet).floor() as i64;
    let hi = (((start + extent) / square_feet).ceil() as i64).max(lo + 1);
    let lo = lo.max(0);
    let hi = hi.min(limit as i64);
    if lo >= hi {
        return None;
    }
    Some(lo as u32..hi as u32)
}

/// Pick a map letter for each creature, unique across the map
fn assign_letters(creatures: &[&Creature]) -> Vec<char> {
    let mut used: AHashSet<char> = AHashSet::new();
    // Pillars are drawn as 'O'
    used.insert(TerrainKind::Pillar.glyph());

    creatures
        .iter()
        .map(|creature| {
            let preferred = creature
                .name
                .chars()
                .chain(creature.id.as_str().chars())
                .filter(|c| c.is_ascii_alphabetic())
                .map(|c| c.to_ascii_uppercase());
            let fallback = ('A'..='Z').chain('a'..='z').chain('0'..='9');

            let letter = preferred
                .chain(fallback)
                .find(|c| !used.contains(c))
                .unwrap_or('?');
            used.insert(letter);
            letter
        })
        .collect()
}

/// Render the battlefield as an ASCII grid followed by a legend
pub fn generate_battlefield_map(battlefield: &Battlefield) -> String {
    let width = battlefield.width();
    let height = battlefield.height();
    let square = battlefield.config().grid_square_feet;
    let mut grid = vec![vec![OPEN_GLYPH; width as usize]; height as usize];

    // Later features draw over earlier ones
    for feature in battlefield.terrain() {
        let (Some(cols), Some(rows)) = (
            square_span(feature.origin.x, feature.dimensions.width, square, width),
            square_span(feature.origin.y, feature.dimensions.height, square, height),
        ) else {
            continue;
        };
        for row in rows {
            for col in cols.clone() {
                grid[row as usize][col as usize] = feature.kind.glyph();
            }
        }
    }

    let creatures: Vec<&Creature> = battlefield.list_creatures().collect();
    let letters = assign_letters(&creatures);

    for (creature, letter) in creatures.iter().zip(&letters) {
        let Some((col, row)) = battlefield.grid_square(&creature.position) else {
            continue;
        };
        let side = creature.size.footprint_squares.max(1);
        for r in row..(row + side).min(height) {
            for c in col..(col + side).min(width) {
                grid[r as usize][c as usize] = *letter;
            }
        }
    }

    let mut s = String::new();
    for row in &grid {
        s.extend(row.iter());
        s.push('\n');
    }

    s.push_str("\nLegend:\n");
    s.push_str(&format!(
        "  {} open  {} wall  {} pillar  {} difficult  {} other\n",
        OPEN_GLYPH,
        TerrainKind::Wall.glyph(),
        TerrainKind::Pillar.glyph(),
        TerrainKind::Difficult.glyph(),
        TerrainKind::Other.glyph()
    ));
    for (creature, letter) in creatures.iter().zip(&letters) {
        s.push_str(&format!(
            "  {} {} [{}] at {}\n",
            letter, creature.name, creature.id, creature.position
        ));
    }

    s
}
