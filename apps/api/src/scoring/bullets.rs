use serde::{Deserialize, Serialize};

use crate::models::resume::Resume;
use crate::scoring::predicates::{
    bullet_length, has_action_verb, has_metric, word_count, BulletLength,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BulletSource {
    Experience,
    Project,
}

/// Per-bullet view of the checks the score is built from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulletInsight {
    pub source: BulletSource,
    pub entry_index: usize,
    pub bullet_index: usize,
    pub text: String,
    pub word_count: usize,
    pub length: BulletLength,
    pub has_action_verb: bool,
    pub has_metric: bool,
    pub needs_attention: bool,
}

/// Inspects a single bullet.
pub fn inspect_bullet(
    source: BulletSource,
    entry_index: usize,
    bullet_index: usize,
    text: &str,
) -> BulletInsight {
    let length = bullet_length(text);
    let has_action_verb = has_action_verb(text);
    let has_metric = has_metric(text);

    BulletInsight {
        source,
        entry_index,
        bullet_index,
        text: text.to_string(),
        word_count: word_count(text),
        length,
        has_action_verb,
        has_metric,
        needs_attention: length != BulletLength::Ok || !has_action_verb || !has_metric,
    }
}

/// Inspects every non-empty bullet, experience first, then projects.
/// Indices point back into the original entry lists, empty bullets included.
pub fn analyze_bullets(resume: &Resume) -> Vec<BulletInsight> {
    let experience = resume.experience.iter().enumerate().flat_map(|(i, e)| {
        e.bullets
            .iter()
            .enumerate()
            .map(move |(j, b)| (BulletSource::Experience, i, j, b))
    });
    let projects = resume.projects.iter().enumerate().flat_map(|(i, p)| {
        p.bullets
            .iter()
            .enumerate()
            .map(move |(j, b)| (BulletSource::Project, i, j, b))
    });

    experience
        .chain(projects)
        .filter(|(_, _, _, text)| !text.is_empty())
        .map(|(source, i, j, text)| inspect_bullet(source, i, j, text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{ExperienceEntry, ProjectEntry};
    use crate::scoring::predicates::all_bullets;

    fn resume() -> Resume {
        Resume {
            experience: vec![ExperienceEntry {
                id: "exp-1".to_string(),
                company: "Acme".to_string(),
                role: "Engineer".to_string(),
                location: None,
                start_date: None,
                end_date: None,
                bullets: vec![
                    "".to_string(),
                    "Reduced p99 latency by 35% by rewriting the cache layer in Rust".to_string(),
                    "Helped".to_string(),
                ],
            }],
            projects: vec![ProjectEntry {
                id: "proj-1".to_string(),
                name: "Compiler".to_string(),
                bullets: vec!["Wrote a parser and type checker for a small language".to_string()],
            }],
            ..Resume::default()
        }
    }

    #[test]
    fn test_strong_bullet_needs_no_attention() {
        let insight = inspect_bullet(
            BulletSource::Experience,
            0,
            0,
            "Reduced p99 latency by 35% by rewriting the cache layer in Rust",
        );
        assert_eq!(insight.length, BulletLength::Ok);
        assert!(insight.has_action_verb);
        assert!(insight.has_metric);
        assert!(!insight.needs_attention);
    }

    #[test]
    fn test_weak_bullet_flags_every_check() {
        let insight = inspect_bullet(BulletSource::Project, 2, 1, "Helped");
        assert_eq!(insight.word_count, 1);
        assert_eq!(insight.length, BulletLength::Short);
        assert!(!insight.has_action_verb);
        assert!(!insight.has_metric);
        assert!(insight.needs_attention);
    }

    #[test]
    fn test_analyze_preserves_original_indices() {
        let insights = analyze_bullets(&resume());
        assert_eq!(insights.len(), 3);

        assert_eq!(insights[0].source, BulletSource::Experience);
        assert_eq!(insights[0].bullet_index, 1);
        assert_eq!(insights[1].bullet_index, 2);
        assert_eq!(insights[2].source, BulletSource::Project);
        assert_eq!(insights[2].entry_index, 0);
        assert_eq!(insights[2].bullet_index, 0);
    }

    #[test]
    fn test_analyze_matches_flattened_bullets() {
        let resume = resume();
        let texts: Vec<String> = analyze_bullets(&resume)
            .into_iter()
            .map(|i| i.text)
            .collect();
        assert_eq!(texts, all_bullets(&resume));
    }

    #[test]
    fn test_analyze_empty_resume() {
        assert!(analyze_bullets(&Resume::default()).is_empty());
    }
}
