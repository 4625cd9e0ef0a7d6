/// Coherence rules: keep generated attributes consistent with each other.
///
/// Pure functions only; nothing here touches catalogs or randomness.
use crate::schema::attribute::Attribute;
use crate::schema::character::AgeCategory;
use crate::schema::family::FamilyTemplate;
use crate::schema::race::{AgeRange, CharacterClass, Race};

/// Minimum age at which a character can have children of their own.
pub const MIN_PARENT_AGE: u32 = 16;

/// Map an age to a life stage.
///
/// With a known lifespan the stage is the position of `age` within
/// `[min, max]`: below 15% child, 25% young, 60% adult, 80% middle-aged,
/// 95% old, otherwise venerable. Without one, fixed breakpoints at
/// 13/20/40/60/80 years apply.
pub fn age_category(age: u32, race: Option<&Race>) -> AgeCategory {
    let Some(range) = race.and_then(|r| r.age_ranges) else {
        return match age {
            0..=12 => AgeCategory::Child,
            13..=19 => AgeCategory::Young,
            20..=39 => AgeCategory::Adult,
            40..=59 => AgeCategory::MiddleAged,
            60..=79 => AgeCategory::Old,
            _ => AgeCategory::Venerable,
        };
    };

    // Zero-length lifespan: the division yields -inf, NaN or +inf, which
    // the comparisons below map to child, venerable and venerable.
    let lifespan = range.max as f64 - range.min as f64;
    let position = (age as f64 - range.min as f64) / lifespan;

    if position < 0.15 {
        AgeCategory::Child
    } else if position < 0.25 {
        AgeCategory::Young
    } else if position < 0.6 {
        AgeCategory::Adult
    } else if position < 0.8 {
        AgeCategory::MiddleAged
    } else if position < 0.95 {
        AgeCategory::Old
    } else {
        AgeCategory::Venerable
    }
}

/// Returns true if `age` lies within the race's range. Races without a
/// range accept any age.
pub fn is_age_valid_for_race(age: u32, race: Option<&Race>) -> bool {
    match race.and_then(|r| r.age_ranges) {
        Some(range) => range.contains(age),
        None => true,
    }
}

/// The race's lifespan, or 18-80 when unknown.
pub fn age_range_for_race(race: Option<&Race>) -> AgeRange {
    race.and_then(|r| r.age_ranges).unwrap_or(AgeRange::DEFAULT)
}

/// Returns true if every non-empty tag list on `item` admits the subject.
pub fn is_compatible(
    item: &Attribute,
    race: Option<&Race>,
    class: Option<&CharacterClass>,
    category: AgeCategory,
) -> bool {
    if !item.race_tags.is_empty() {
        match race {
            Some(r) if item.race_tags.iter().any(|t| *t == r.id) => {}
            _ => return false,
        }
    }

    if !item.class_tags.is_empty() {
        match class {
            Some(c) if item.class_tags.iter().any(|t| *t == c.id) => {}
            _ => return false,
        }
    }

    if !item.age_tags.is_empty() && !item.age_tags.iter().any(|t| t == category.tag()) {
        return false;
    }

    true
}

/// Keep only the items compatible with the subject's race, class and age.
pub fn filter_by_compatibility(
    items: &[Attribute],
    race: Option<&Race>,
    class: Option<&CharacterClass>,
    age: u32,
) -> Vec<Attribute> {
    if items.is_empty() {
        return Vec::new();
    }

    let category = age_category(age, race);
    items
        .iter()
        .filter(|item| is_compatible(item, race, class, category))
        .cloned()
        .collect()
}

/// Drop later items that an earlier item declares as conflicting.
///
/// Resolution is one-directional: an item only removes items after it,
/// so the earlier of two mutually exclusive items always survives.
pub fn resolve_trait_conflicts(selected: &[Attribute]) -> Vec<Attribute> {
    let mut result: Vec<Attribute> = selected.to_vec();

    let mut i = 0;
    while i < result.len() {
        if !result[i].conflicts_with.is_empty() {
            let (head, tail) = result.split_at(i + 1);
            let keeper = &head[i];
            let kept_tail: Vec<Attribute> = tail
                .iter()
                .filter(|later| {
                    let clash = keeper.conflicts_with_id(&later.id);
                    if clash {
                        log::debug!("trait '{}' pruned by conflicting '{}'", later.id, keeper.id);
                    }
                    !clash
                })
                .cloned()
                .collect();
            result.truncate(i + 1);
            result.extend(kept_tail);
        }
        i += 1;
    }

    result
}

/// Returns true if `template` suits a subject of the given race and age.
///
/// A missing race or a zero age makes every template invalid. Children
/// cannot have a spouse or children; young subjects can only have children
/// from age 16; venerable subjects must have extended family.
pub fn is_family_template_valid(race: Option<&Race>, age: u32, template: &FamilyTemplate) -> bool {
    if race.is_none() || age == 0 {
        return false;
    }

    match age_category(age, race) {
        AgeCategory::Child if template.has_spouse || template.has_children => false,
        AgeCategory::Young if template.has_children => age >= MIN_PARENT_AGE,
        AgeCategory::Venerable if !template.has_extended_family => false,
        _ => true,
    }
}
