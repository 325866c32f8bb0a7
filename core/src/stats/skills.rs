use std::collections::BTreeMap;

use phf::phf_map;
use serde::{Deserialize, Serialize};

use super::safe_div;
use crate::log::{ParsedEvent, event_type};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Combat,
    Attributes,
    Profession,
    Support,
    Other,
}

static SKILL_CATEGORIES: phf::Map<&'static str, SkillCategory> = phf_map! {
    // Attributes
    "Agility" => SkillCategory::Attributes,
    "Intelligence" => SkillCategory::Attributes,
    "Psyche" => SkillCategory::Attributes,
    "Stamina" => SkillCategory::Attributes,
    "Strength" => SkillCategory::Attributes,
    "Health" => SkillCategory::Attributes,

    // Ranged and melee combat
    "Aim" => SkillCategory::Combat,
    "Anatomy" => SkillCategory::Combat,
    "Athletics" => SkillCategory::Combat,
    "BLP Weaponry Technology" => SkillCategory::Combat,
    "Clubs" => SkillCategory::Combat,
    "Combat Reflexes" => SkillCategory::Combat,
    "Combat Sense" => SkillCategory::Combat,
    "Courage" => SkillCategory::Combat,
    "Dexterity" => SkillCategory::Combat,
    "Dodge" => SkillCategory::Combat,
    "Evade" => SkillCategory::Combat,
    "Handgun" => SkillCategory::Combat,
    "Heavy Melee Weapons" => SkillCategory::Combat,
    "Inflict Melee Damage" => SkillCategory::Combat,
    "Inflict Ranged Damage" => SkillCategory::Combat,
    "Kinetic Weaponry Technology" => SkillCategory::Combat,
    "Laser Weaponry Technology" => SkillCategory::Combat,
    "Light Melee Weapons" => SkillCategory::Combat,
    "Longblades" => SkillCategory::Combat,
    "Marksmanship" => SkillCategory::Combat,
    "Melee Combat" => SkillCategory::Combat,
    "Melee Damage Assessment" => SkillCategory::Combat,
    "Plasma Weaponry Technology" => SkillCategory::Combat,
    "Ranged Damage Assessment" => SkillCategory::Combat,
    "Rifle" => SkillCategory::Combat,
    "Shortblades" => SkillCategory::Combat,
    "Support Weapon Systems" => SkillCategory::Combat,
    "Weapons Handling" => SkillCategory::Combat,
    "Whip" => SkillCategory::Combat,
    "Wounding" => SkillCategory::Combat,

    // Healing
    "Bioregenesis" => SkillCategory::Support,
    "Diagnosis" => SkillCategory::Support,
    "First Aid" => SkillCategory::Support,
    "Medical Therapy" => SkillCategory::Support,
    "Treatment" => SkillCategory::Support,
    "Alertness" => SkillCategory::Support,
    "Concentration" => SkillCategory::Support,
    "Perception" => SkillCategory::Support,

    // Hunting byproducts, mining and crafting
    "Animal Lore" => SkillCategory::Profession,
    "Animal Taming" => SkillCategory::Profession,
    "Butchering" => SkillCategory::Profession,
    "Skinning" => SkillCategory::Profession,
    "Scourging" => SkillCategory::Profession,
    "Drilling" => SkillCategory::Profession,
    "Extraction" => SkillCategory::Profession,
    "Geology" => SkillCategory::Profession,
    "Mining" => SkillCategory::Profession,
    "Prospecting" => SkillCategory::Profession,
    "Surveying" => SkillCategory::Profession,
    "Electronics" => SkillCategory::Profession,
    "Engineering" => SkillCategory::Profession,
    "Machinery" => SkillCategory::Profession,
    "Manufacture Armor" => SkillCategory::Profession,
    "Manufacture Attachments" => SkillCategory::Profession,
    "Manufacture Electronic Equipment" => SkillCategory::Profession,
    "Manufacture Mechanical Equipment" => SkillCategory::Profession,
    "Manufacture Tools" => SkillCategory::Profession,
    "Manufacture Weapons" => SkillCategory::Profession,
    "Mechanics" => SkillCategory::Profession,
    "Tailoring" => SkillCategory::Profession,
};

/// Category of a skill name; unknown skills fall into [`SkillCategory::Other`].
pub fn skill_category(skill: &str) -> SkillCategory {
    SKILL_CATEGORIES
        .get(skill)
        .copied()
        .unwrap_or(SkillCategory::Other)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillStat {
    pub total: f64,
    pub count: u32,
    pub average: f64,
    pub category: Option<SkillCategory>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub total: f64,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillBreakdown {
    pub skills: BTreeMap<String, SkillStat>,
    pub by_category: BTreeMap<SkillCategory, CategoryTotal>,
    pub total_skill: f64,
    pub total_gains: u32,
    pub levels_gained: u32,
    pub new_skills: Vec<String>,
}

impl SkillBreakdown {
    pub(crate) fn record(&mut self, event: &ParsedEvent) {
        match event.event_type.as_str() {
            event_type::SKILL_GAIN | event_type::ATTRIBUTE_GAIN => {
                let Some(skill) = event.text("skill") else {
                    return;
                };
                let value = event.number("value");
                let category = skill_category(skill);

                let stat = self.skills.entry(skill.to_string()).or_default();
                stat.total += value;
                stat.count += 1;
                stat.category = Some(category);

                let rollup = self.by_category.entry(category).or_default();
                rollup.total += value;
                rollup.count += 1;

                self.total_skill += value;
                self.total_gains += 1;
            }
            event_type::SKILL_LEVEL => self.levels_gained += 1,
            event_type::NEW_SKILL => {
                if let Some(skill) = event.text("skill") {
                    self.new_skills.push(skill.to_string());
                }
            }
            _ => {}
        }
    }

    pub(crate) fn finish(&mut self) {
        for stat in self.skills.values_mut() {
            stat.average = safe_div(stat.total, stat.count as f64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_categories() {
        assert_eq!(skill_category("Rifle"), SkillCategory::Combat);
        assert_eq!(skill_category("Agility"), SkillCategory::Attributes);
        assert_eq!(skill_category("First Aid"), SkillCategory::Support);
        assert_eq!(skill_category("Skinning"), SkillCategory::Profession);
        assert_eq!(skill_category("Brand New Skill"), SkillCategory::Other);
    }
}
