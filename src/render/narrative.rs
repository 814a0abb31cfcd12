//! Plain-text descriptions of battlefield state
//!
//! Every line is built from engine query results; nothing here decides
//! tactics on its own.

use crate::battle::battlefield::Battlefield;
use crate::battle::creature::Creature;
use crate::battle::tactics::{battlefield_overview, tactical_situation, Contact, RelativeElevation};
use crate::battle::terrain::{CoverLevel, TerrainFeature};
use crate::core::error::Result;

/// Distance in feet, whole numbers without decimals
pub(crate) fn format_feet(feet: f64) -> String {
    if (feet - feet.round()).abs() < 0.05 {
        format!("{:.0} ft", feet)
    } else {
        format!("{:.1} ft", feet)
    }
}

fn terrain_line(index: usize, feature: &TerrainFeature) -> String {
    let mut flags = Vec::new();
    if feature.blocks_movement {
        flags.push("blocks movement");
    }
    if feature.blocks_line_of_sight {
        flags.push("blocks sight");
    }
    if feature.cover != CoverLevel::None {
        flags.push(feature.cover.label());
    }
    if flags.is_empty() {
        flags.push("passable");
    }

    let d = feature.dimensions;
    format!(
        "  [{}] {} at {}, {} x {} x {} ft; {}\n",
        index,
        feature.kind.label(),
        feature.origin,
        d.width,
        d.height,
        d.depth,
        flags.join(", ")
    )
}

fn creature_line(creature: &Creature) -> String {
    format!(
        "  {} [{}] at {}, {}, speed {}, reach {}\n",
        creature.name,
        creature.id,
        creature.position,
        creature.size.category.label(),
        format_feet(creature.speed_feet as f64),
        format_feet(creature.reach())
    )
}

/// Summary of dimensions, terrain and creatures
pub fn describe_battlefield(battlefield: &Battlefield) -> String {
    let overview = battlefield_overview(battlefield);
    let mut s = String::new();

    s.push_str(&format!(
        "Battlefield: {} x {} squares ({} x {})\n",
        overview.width,
        overview.height,
        format_feet(overview.width_feet),
        format_feet(overview.height_feet)
    ));

    if overview.terrain.is_empty() {
        s.push_str("Terrain: open ground\n");
    } else {
        s.push_str(&format!("Terrain ({}):\n", overview.terrain.len()));
        for (index, feature) in overview.terrain.iter().enumerate() {
            s.push_str(&terrain_line(index, feature));
        }
    }

    if overview.creatures.is_empty() {
        s.push_str("Creatures: none\n");
    } else {
        s.push_str(&format!("Creatures ({}):\n", overview.creatures.len()));
        for creature in &overview.creatures {
            s.push_str(&creature_line(creature));
        }
    }

    s
}

fn sight_phrase(contact: &Contact) -> String {
    if !contact.line_of_sight {
        "no line of sight".to_string()
    } else if contact.cover == CoverLevel::None {
        "clear line of sight".to_string()
    } else {
        match contact.cover.armor_class_bonus() {
            Some(bonus) => format!("line of sight, {} (+{} AC)", contact.cover.label(), bonus),
            None => format!("line of sight, {}", contact.cover.label()),
        }
    }
}

fn elevation_phrase(contact: &Contact) -> &'static str {
    match contact.elevation {
        RelativeElevation::Above => "above you, holds the high ground",
        RelativeElevation::Below => "below you, you hold the high ground",
        RelativeElevation::Level => "level",
    }
}

fn contact_line(contact: &Contact) -> String {
    let mut parts = vec![
        format!("{} ({})", format_feet(contact.distance_feet), contact.range.label()),
    ];
    if let Some(bearing) = contact.bearing_degrees {
        parts.push(format!("bearing {:.0} deg", bearing));
    }
    parts.push(elevation_phrase(contact).to_string());
    parts.push(sight_phrase(contact));
    if contact.threatened {
        parts.push("in your reach".to_string());
    }
    if contact.threatens {
        parts.push("threatens you".to_string());
    }

    format!("  {} [{}]: {}\n", contact.name, contact.id, parts.join(", "))
}

/// Narrative of one creature's position: flanking, threats and every contact
pub fn describe_tactical_situation(battlefield: &Battlefield, id: &str) -> Result<String> {
    let situation = tactical_situation(battlefield, id)?;
    let creature = &situation.creature;
    let mut s = String::new();

    s.push_str(&format!(
        "{} [{}] at {} ({})\n",
        creature.name,
        creature.id,
        creature.position,
        creature.size.category.label()
    ));

    match &situation.flanked_by {
        Some((a, b)) => s.push_str(&format!("Status: flanked by {} and {}\n", a, b)),
        None => s.push_str("Status: not flanked\n"),
    }

    let threats: Vec<String> = situation
        .threats()
        .map(|c| format!("{} ({})", c.name, format_feet(c.distance_feet)))
        .collect();
    if threats.is_empty() {
        s.push_str("Threatened by: nobody\n");
    } else {
        s.push_str(&format!("Threatened by: {}\n", threats.join(", ")));
    }

    if situation.contacts.is_empty() {
        s.push_str("No other creatures on the battlefield\n");
    } else {
        s.push_str("Contacts, nearest first:\n");
        for contact in &situation.contacts {
            s.push_str(&contact_line(contact));
        }
    }

    Ok(s)
}
