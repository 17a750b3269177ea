//! # Skills
//!
//! Pure helpers over skill lists. The handlers load a record, apply one of
//! these, and write the result back.

use lib_core::dto::SkillStat;
use lib_core::model::store::User;
use std::collections::BTreeMap;

/// Append `skill` unless already present. Returns whether the list changed.
pub fn add_skill(skills: &mut Vec<String>, skill: &str) -> bool {
    if skills.iter().any(|s| s == skill) {
        return false;
    }
    skills.push(skill.to_string());
    true
}

/// Remove every exact match of `skill`. Returns whether the list changed.
pub fn remove_skill(skills: &mut Vec<String>, skill: &str) -> bool {
    let before = skills.len();
    skills.retain(|s| s != skill);
    skills.len() != before
}

/// Per skill: how many listings it has and the names behind them, in user order.
///
/// A user listing a skill twice is counted twice.
pub fn skill_stats(users: &[User]) -> BTreeMap<String, SkillStat> {
    let mut stats: BTreeMap<String, SkillStat> = BTreeMap::new();

    for user in users {
        for skill in user.skills.iter() {
            let entry = stats.entry(skill.clone()).or_default();
            entry.count += 1;
            entry.users.push(user.name.clone());
        }
    }

    stats
}
