//! Resume scoring — rules-based quality score and recommendations.
//!
//! Default: `RuleBasedScorer` (pure, deterministic, no I/O).
//!
//! `AppState` holds an `Arc<dyn ResumeScorer>` so handlers never name the backend.

use serde::{Deserialize, Serialize};

use crate::models::resume::Resume;
use crate::scoring::predicates::is_blank;
use crate::scoring::rules::{
    collect_recommendations, Recommendation, ResumeFacts, MAX_SKILLS, MIN_SKILLS,
};

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// Overall score plus every triggered recommendation, in emission order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResumeScore {
    pub overall: u32, // 0 – 100
    pub recommendations: Vec<Recommendation>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching handlers.
pub trait ResumeScorer: Send + Sync {
    fn score(&self, resume: &Resume) -> ResumeScore;

    /// Short label reported to clients, e.g. `"rules"`.
    fn backend(&self) -> &'static str;
}

pub struct RuleBasedScorer;

impl ResumeScorer for RuleBasedScorer {
    fn score(&self, resume: &Resume) -> ResumeScore {
        score_resume(resume)
    }

    fn backend(&self) -> &'static str {
        "rules"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core scoring algorithm
// ────────────────────────────────────────────────────────────────────────────

const NO_SUMMARY: u32 = 12;
const NO_EXPERIENCE: u32 = 20;
const NO_EDUCATION: u32 = 12;
const NO_SKILLS: u32 = 10;
const INCOMPLETE_CONTACT: u32 = 10;
const WEAK_ACTION_VERBS: u32 = 10;
const WEAK_METRICS: u32 = 8;
const BAD_LENGTH_PER_BULLET: u32 = 2;
const BAD_LENGTH_CAP: u32 = 8;
const TOO_FEW_SKILLS: u32 = 5;
const TOO_MANY_SKILLS: u32 = 3;

const MIN_ACTION_VERB_RATIO: f64 = 0.7;
const MIN_METRIC_RATIO: f64 = 0.5;

/// Scores a resume on a 0–100 scale and lists what to fix.
///
/// Total over any document: an empty resume scores 36.
pub fn score_resume(resume: &Resume) -> ResumeScore {
    let facts = ResumeFacts::derive(resume);

    ResumeScore {
        overall: compute_overall_score(&facts),
        recommendations: collect_recommendations(&facts),
    }
}

/// First `n` recommendations in emission order.
pub fn top_recommendations(score: &ResumeScore, n: usize) -> &[Recommendation] {
    let end = n.min(score.recommendations.len());
    &score.recommendations[..end]
}

fn compute_overall_score(facts: &ResumeFacts) -> u32 {
    let resume = facts.resume;
    let mut deduction = 0;

    // Missing sections
    if is_blank(&resume.summary) {
        deduction += NO_SUMMARY;
    }
    if resume.experience.is_empty() {
        deduction += NO_EXPERIENCE;
    }
    if resume.education.is_empty() {
        deduction += NO_EDUCATION;
    }
    if resume.skills.is_empty() {
        deduction += NO_SKILLS;
    }
    if is_blank(&resume.name) || is_blank(&resume.email) {
        deduction += INCOMPLETE_CONTACT;
    }

    deduction += bullet_deduction(facts);

    let skills = facts.skill_count();
    if skills > 0 && skills < MIN_SKILLS {
        deduction += TOO_FEW_SKILLS;
    }
    if skills > MAX_SKILLS {
        deduction += TOO_MANY_SKILLS;
    }

    100u32.saturating_sub(deduction).min(100)
}

fn bullet_deduction(facts: &ResumeFacts) -> u32 {
    let total = facts.total_bullets();
    if total == 0 {
        return 0;
    }

    let mut deduction = 0;

    let action_verb_ratio = facts.with_action_verb as f64 / total as f64;
    if action_verb_ratio < MIN_ACTION_VERB_RATIO {
        deduction += WEAK_ACTION_VERBS;
    }

    let metric_ratio = facts.with_metric as f64 / total as f64;
    if metric_ratio < MIN_METRIC_RATIO {
        deduction += WEAK_METRICS;
    }

    // A bullet is either short or long, never both.
    let bad_length = (facts.short_bullets + facts.long_bullets) as u32;
    deduction += (bad_length.saturating_mul(BAD_LENGTH_PER_BULLET)).min(BAD_LENGTH_CAP);

    deduction
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{EducationEntry, ExperienceEntry, ProjectEntry};
    use crate::scoring::rules::Area;

    const STRONG_BULLET: &str =
        "Led migration of legacy monolith to microservices, reducing downtime by 40%";

    fn experience(bullets: &[&str]) -> ExperienceEntry {
        ExperienceEntry {
            id: "exp-1".to_string(),
            company: "Acme".to_string(),
            role: "Engineer".to_string(),
            location: Some("Remote".to_string()),
            start_date: Some("2021-01".to_string()),
            end_date: None,
            bullets: bullets.iter().map(|b| b.to_string()).collect(),
        }
    }

    fn education() -> EducationEntry {
        EducationEntry {
            id: "edu-1".to_string(),
            institution: "University of London".to_string(),
            degree: Some("BSc".to_string()),
            field: Some("Mathematics".to_string()),
            location: None,
            start_date: None,
            end_date: None,
        }
    }

    fn skills(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("skill-{i}")).collect()
    }

    fn complete_resume(bullets: &[&str]) -> Resume {
        Resume {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            summary: "Backend engineer focused on reliability.".to_string(),
            experience: vec![experience(bullets)],
            education: vec![education()],
            skills: skills(6),
            ..Resume::default()
        }
    }

    #[test]
    fn test_empty_resume_scores_36() {
        let score = score_resume(&Resume::default());
        assert_eq!(score.overall, 36);
        assert_eq!(score.recommendations.len(), 6);
        assert_eq!(score.recommendations[0].area, Area::Summary);
        assert_eq!(score.recommendations[5].priority, 5);
    }

    #[test]
    fn test_strong_bullet_has_no_bullet_deduction() {
        let score = score_resume(&complete_resume(&[STRONG_BULLET]));
        assert_eq!(score.overall, 100);
        assert!(score.recommendations.is_empty());
    }

    #[test]
    fn test_weak_bullet_deducts_20() {
        let score = score_resume(&complete_resume(&["Helped"]));
        // 10 (action verb) + 8 (metric) + 2 (one short bullet)
        assert_eq!(score.overall, 80);
        assert_eq!(score.recommendations.len(), 3);
    }

    #[test]
    fn test_bad_length_deduction_capped_at_8() {
        let bullets = ["Led 5 teams"; 6];
        let score = score_resume(&complete_resume(&bullets));
        assert_eq!(score.overall, 92);
    }

    fn long_bullet() -> String {
        // 36 words, opens with a verb, carries a metric
        format!("Led {} by 40%", vec!["work"; 33].join(" "))
    }

    #[test]
    fn test_long_bullets_deduct_two_each() {
        let long = long_bullet();
        let score = score_resume(&complete_resume(&[long.as_str(), long.as_str()]));
        assert_eq!(score.overall, 96);
    }

    #[test]
    fn test_short_and_long_bullets_share_length_cap() {
        let long = long_bullet();
        let bullets = [
            "Led 5 teams",
            "Led 5 teams",
            long.as_str(),
            long.as_str(),
            long.as_str(),
        ];
        let score = score_resume(&complete_resume(&bullets));
        // 5 bad-length bullets would cost 10; capped at 8
        assert_eq!(score.overall, 92);
    }

    #[test]
    fn test_ratio_thresholds() {
        // 7 of 10 start with a verb (ratio 0.7, no deduction), 5 of 10 carry a metric (0.5, none)
        let mut bullets = vec![STRONG_BULLET; 5];
        bullets.extend(vec![
            "Built an internal deployment tool used by the platform team";
            2
        ]);
        bullets.extend(vec![
            "Worked closely with design on the onboarding flow for new users";
            3
        ]);
        let score = score_resume(&complete_resume(&bullets));
        assert_eq!(score.overall, 100);

        // 6 of 10 with a verb drops below 0.7
        bullets[5] = "Worked closely with design on the onboarding flow for new users";
        let score = score_resume(&complete_resume(&bullets));
        assert_eq!(score.overall, 90);
    }

    #[test]
    fn test_missing_name_and_email_is_single_deduction() {
        let mut resume = complete_resume(&[STRONG_BULLET]);
        resume.name.clear();
        resume.email = "  ".to_string();
        let score = score_resume(&resume);
        assert_eq!(score.overall, 90);
        assert_eq!(score.recommendations.len(), 2);
    }

    #[test]
    fn test_skill_count_deductions() {
        let mut resume = complete_resume(&[STRONG_BULLET]);

        resume.skills = skills(3);
        assert_eq!(score_resume(&resume).overall, 95);

        resume.skills = skills(4);
        assert_eq!(score_resume(&resume).overall, 100);

        resume.skills = skills(20);
        assert_eq!(score_resume(&resume).overall, 100);

        resume.skills = skills(21);
        assert_eq!(score_resume(&resume).overall, 97);
    }

    #[test]
    fn test_worst_case_stays_in_range() {
        let resume = Resume {
            projects: vec![ProjectEntry {
                id: String::new(),
                name: "Toy".to_string(),
                bullets: vec!["meh".to_string(); 10],
            }],
            skills: skills(30),
            ..Resume::default()
        };
        let score = score_resume(&resume);
        // 54 (sections + contact) + 26 (bullets) + 3 (too many skills)
        assert_eq!(score.overall, 17);
    }

    #[test]
    fn test_scoring_is_deterministic_and_non_mutating() {
        let resume = complete_resume(&["Helped", STRONG_BULLET, ""]);
        let snapshot = resume.clone();

        let first = score_resume(&resume);
        let second = score_resume(&resume);
        assert_eq!(first, second);
        assert_eq!(resume, snapshot);
    }

    #[test]
    fn test_empty_bullets_are_ignored() {
        let score = score_resume(&complete_resume(&["", STRONG_BULLET, ""]));
        assert_eq!(score.overall, 100);
    }

    #[test]
    fn test_top_recommendations_truncates_in_order() {
        let score = score_resume(&Resume::default());

        let top = top_recommendations(&score, 3);
        assert_eq!(top.len(), 3);
        assert_eq!(top, &score.recommendations[..3]);

        assert!(top_recommendations(&score, 0).is_empty());
        assert_eq!(top_recommendations(&score, 50).len(), 6);
    }

    #[test]
    fn test_top_recommendations_on_clean_resume() {
        let score = score_resume(&complete_resume(&[STRONG_BULLET]));
        assert!(top_recommendations(&score, 3).is_empty());
    }

    #[test]
    fn test_rule_based_scorer_backend() {
        let scorer = RuleBasedScorer;
        assert_eq!(scorer.backend(), "rules");
        assert_eq!(scorer.score(&Resume::default()).overall, 36);
    }
}
