use serde::{Deserialize, Serialize};

use crate::models::resume::Resume;
use crate::scoring::predicates::{
    all_bullets, has_action_verb, has_metric, is_blank, word_count, MAX_BULLET_WORDS,
    MIN_BULLET_WORDS,
};

/// Fewer skills than this triggers the "list more skills" advice.
pub const MIN_SKILLS: usize = 4;
/// More skills than this triggers the "trim your skills" advice.
pub const MAX_SKILLS: usize = 20;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Area {
    Summary,
    Experience,
    Education,
    Skills,
    Contact,
    Bullets,
}

/// One actionable suggestion. `priority` is the 0-based position among the
/// rules that fired for this resume, so it is dense and stable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    pub priority: u32,
    pub message: String,
    pub area: Area,
}

/// Values derived once from a resume and read by every rule and deduction.
pub struct ResumeFacts<'a> {
    pub resume: &'a Resume,
    pub bullets: Vec<&'a str>,
    pub short_bullets: usize,
    pub long_bullets: usize,
    pub with_action_verb: usize,
    pub with_metric: usize,
}

impl<'a> ResumeFacts<'a> {
    pub fn derive(resume: &'a Resume) -> Self {
        let bullets = all_bullets(resume);

        let mut short_bullets = 0;
        let mut long_bullets = 0;
        let mut with_action_verb = 0;
        let mut with_metric = 0;

        for bullet in &bullets {
            let words = word_count(bullet);
            if words < MIN_BULLET_WORDS {
                short_bullets += 1;
            }
            if words > MAX_BULLET_WORDS {
                long_bullets += 1;
            }
            if has_action_verb(bullet) {
                with_action_verb += 1;
            }
            if has_metric(bullet) {
                with_metric += 1;
            }
        }

        Self {
            resume,
            bullets,
            short_bullets,
            long_bullets,
            with_action_verb,
            with_metric,
        }
    }

    pub fn total_bullets(&self) -> usize {
        self.bullets.len()
    }

    pub fn skill_count(&self) -> usize {
        self.resume.skills.len()
    }
}

/// A single check: returns the message when the rule fires.
pub struct Rule {
    pub area: Area,
    pub check: fn(&ResumeFacts) -> Option<String>,
}

/// Recommendation rules in emission order. Each is evaluated independently.
pub const RULES: &[Rule] = &[
    Rule {
        area: Area::Summary,
        check: missing_summary,
    },
    Rule {
        area: Area::Experience,
        check: missing_experience,
    },
    Rule {
        area: Area::Education,
        check: missing_education,
    },
    Rule {
        area: Area::Skills,
        check: missing_skills,
    },
    Rule {
        area: Area::Contact,
        check: missing_name,
    },
    Rule {
        area: Area::Contact,
        check: missing_email,
    },
    Rule {
        area: Area::Bullets,
        check: short_bullets,
    },
    Rule {
        area: Area::Bullets,
        check: long_bullets,
    },
    Rule {
        area: Area::Bullets,
        check: bullets_without_action_verb,
    },
    Rule {
        area: Area::Bullets,
        check: bullets_without_metric,
    },
    Rule {
        area: Area::Skills,
        check: too_few_skills,
    },
    Rule {
        area: Area::Skills,
        check: too_many_skills,
    },
];

/// Runs every rule in order and numbers the ones that fired.
pub fn collect_recommendations(facts: &ResumeFacts) -> Vec<Recommendation> {
    RULES
        .iter()
        .filter_map(|rule| (rule.check)(facts).map(|message| (rule.area, message)))
        .enumerate()
        .map(|(priority, (area, message))| Recommendation {
            priority: priority as u32,
            message,
            area,
        })
        .collect()
}

fn missing_summary(facts: &ResumeFacts) -> Option<String> {
    is_blank(&facts.resume.summary).then(|| {
        "Add a professional summary to give recruiters a quick overview.".to_string()
    })
}

fn missing_experience(facts: &ResumeFacts) -> Option<String> {
    facts
        .resume
        .experience
        .is_empty()
        .then(|| "Add at least one experience entry.".to_string())
}

fn missing_education(facts: &ResumeFacts) -> Option<String> {
    facts
        .resume
        .education
        .is_empty()
        .then(|| "Add your education section.".to_string())
}

fn missing_skills(facts: &ResumeFacts) -> Option<String> {
    (facts.skill_count() == 0)
        .then(|| "List relevant skills to improve ATS match.".to_string())
}

fn missing_name(facts: &ResumeFacts) -> Option<String> {
    is_blank(&facts.resume.name).then(|| "Add your name.".to_string())
}

fn missing_email(facts: &ResumeFacts) -> Option<String> {
    is_blank(&facts.resume.email).then(|| "Add your email address.".to_string())
}

fn short_bullets(facts: &ResumeFacts) -> Option<String> {
    (facts.short_bullets > 0).then(|| {
        format!(
            "{} bullet(s) are very short. Aim for 10–25 words with impact.",
            facts.short_bullets
        )
    })
}

fn long_bullets(facts: &ResumeFacts) -> Option<String> {
    (facts.long_bullets > 0).then(|| {
        format!(
            "{} bullet(s) are long. Keep bullets to 1–2 lines (under ~25 words).",
            facts.long_bullets
        )
    })
}

fn bullets_without_action_verb(facts: &ResumeFacts) -> Option<String> {
    let total = facts.total_bullets();
    let missing = total - facts.with_action_verb;
    (total > 0 && missing > 0).then(|| {
        format!(
            "{missing} of {total} bullets don’t start with a strong action verb (e.g. Led, Built, Improved)."
        )
    })
}

fn bullets_without_metric(facts: &ResumeFacts) -> Option<String> {
    let total = facts.total_bullets();
    (total > 0 && facts.with_metric < total).then(|| {
        "Add numbers or impact where possible (e.g. “Reduced load time by 40%”, “Managed 5 engineers”)."
            .to_string()
    })
}

fn too_few_skills(facts: &ResumeFacts) -> Option<String> {
    let count = facts.skill_count();
    (count > 0 && count < MIN_SKILLS).then(|| {
        "Consider listing more relevant skills (often 5–15) for better ATS coverage.".to_string()
    })
}

fn too_many_skills(facts: &ResumeFacts) -> Option<String> {
    (facts.skill_count() > MAX_SKILLS).then(|| {
        "Consider trimming to the most relevant 10–15 skills to keep the resume focused."
            .to_string()
    })
}
