//! Roadmap generation — deterministic template expansion that turns a skill
//! gap into an ordered sequence of learning phases. Pure function of its
//! inputs; no error conditions.

use serde::Serialize;

/// One named phase of a roadmap with its ordered steps.
#[derive(Debug, Clone, Serialize)]
pub struct Phase {
    pub title: String,
    pub steps: Vec<String>,
}

/// Fixed step appended after the flattened phases when a plan is persisted.
pub const TRAILING_PROJECT_STEP: &str = "Build a small project to demonstrate skills";

/// Up to two curated resource names per skill, keyed by lowercased skill name.
fn suggested_resources(skill: &str) -> &'static [&'static str] {
    match skill {
        "python" => &["Official Python Tutorial", "Automate the Boring Stuff"],
        "sql" => &["SQLBolt", "Mode SQL Tutorial"],
        "data-structures" => &["NeetCode Roadmap", "CS50 Data Structures"],
        "statistics" => &["Khan Academy Stats", "Think Stats (book)"],
        "algorithms" => &["Grokking Algorithms", "CLRS (chapters 1-4)"],
        "figma" => &["Figma Learn", "Build a UI Kit"],
        "design-principles" => &["Laws of UX", "Refactoring UI"],
        _ => &[],
    }
}

/// Expands a skill gap into fixed learning phases:
/// Foundations (only when skills are missing), Core Practice, Projects,
/// Portfolio, Apply & Iterate.
pub fn build_roadmap(
    _career_title: &str,
    required_skills: &[String],
    missing_skills: &[String],
) -> Vec<Phase> {
    let mut phases = Vec::with_capacity(5);

    if !missing_skills.is_empty() {
        let steps = missing_skills
            .iter()
            .map(|s| {
                let curated = suggested_resources(&s.to_lowercase());
                let res = if curated.is_empty() {
                    "Pick a beginner resource".to_string()
                } else {
                    curated[..curated.len().min(2)].join(", ")
                };
                format!("Learn the basics of {s} (2-3 weeks). Suggested: {res}.")
            })
            .collect();
        phases.push(Phase {
            title: "Foundations".to_string(),
            steps,
        });
    }

    phases.push(Phase {
        title: "Core Practice".to_string(),
        steps: required_skills
            .iter()
            .map(|s| format!("Do 3-5 medium practice sets for {s}. Summarize notes in a wiki/notion."))
            .collect(),
    });

    phases.push(Phase {
        title: "Projects".to_string(),
        steps: vec![
            "Build Project 1: pick a small scoped idea (2 weeks).".to_string(),
            "Build Project 2: increase scope, add 1 new concept (APIs, auth, charts, etc.)."
                .to_string(),
            "Write concise READMEs with screenshots; push everything to GitHub.".to_string(),
        ],
    });

    phases.push(Phase {
        title: "Portfolio".to_string(),
        steps: vec![
            "Create a clean portfolio page (about, skills, 2 projects, contact).".to_string(),
            "Polish LinkedIn: headline, summary, skills, project links.".to_string(),
            "Prepare a 5-minute project walkthrough (story, demo, learning).".to_string(),
        ],
    });

    phases.push(Phase {
        title: "Apply & Iterate".to_string(),
        steps: vec![
            "Set a weekly target: 5 tailored applications + 1 coffee chat.".to_string(),
            "Mock interviews weekly; log weak areas and revisit notes.".to_string(),
            "Iterate projects based on feedback; ship small improvements weekly.".to_string(),
        ],
    });

    phases
}

/// Flattens phases into globally-ordered plan step titles, with the fixed
/// trailing project step last.
pub fn flatten_plan_steps(phases: &[Phase]) -> Vec<String> {
    let mut steps: Vec<String> = phases
        .iter()
        .flat_map(|ph| ph.steps.iter().map(move |s| format!("{}: {s}", ph.title)))
        .collect();
    steps.push(TRAILING_PROJECT_STEP.to_string());
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_five_phases_when_skills_missing() {
        let phases = build_roadmap("Software Engineer", &strs(&["python"]), &strs(&["python"]));
        assert_eq!(phases.len(), 5);
        assert_eq!(phases[0].title, "Foundations");
    }

    #[test]
    fn test_four_phases_when_nothing_missing() {
        let phases = build_roadmap("Software Engineer", &strs(&["python"]), &[]);
        assert_eq!(phases.len(), 4);
        assert_eq!(phases[0].title, "Core Practice");
    }

    #[test]
    fn test_core_practice_has_one_step_per_required_skill() {
        let required = strs(&["python", "sql", "statistics"]);
        let phases = build_roadmap("Data Analyst", &required, &[]);
        let core = phases.iter().find(|p| p.title == "Core Practice").unwrap();
        assert_eq!(core.steps.len(), required.len());
    }

    #[test]
    fn test_foundations_has_one_step_per_missing_skill() {
        let phases = build_roadmap(
            "Data Analyst",
            &strs(&["sql", "statistics"]),
            &strs(&["sql", "statistics"]),
        );
        assert_eq!(phases[0].steps.len(), 2);
    }

    #[test]
    fn test_curated_resources_appear_in_foundation_steps() {
        let phases = build_roadmap("Data Analyst", &strs(&["sql"]), &strs(&["sql"]));
        assert!(phases[0].steps[0].contains("SQLBolt"));
        assert!(phases[0].steps[0].contains("Mode SQL Tutorial"));
    }

    #[test]
    fn test_unknown_skill_gets_generic_prompt() {
        let phases = build_roadmap("Blacksmith", &strs(&["forging"]), &strs(&["forging"]));
        assert!(phases[0].steps[0].contains("Pick a beginner resource"));
    }

    #[test]
    fn test_resource_lookup_is_case_insensitive() {
        let phases = build_roadmap("Data Analyst", &strs(&["SQL"]), &strs(&["SQL"]));
        assert!(phases[0].steps[0].contains("SQLBolt"));
    }

    #[test]
    fn test_fixed_phases_have_three_steps_each() {
        let phases = build_roadmap("Software Engineer", &strs(&["python"]), &[]);
        for title in ["Projects", "Portfolio", "Apply & Iterate"] {
            let phase = phases.iter().find(|p| p.title == title).unwrap();
            assert_eq!(phase.steps.len(), 3, "{title} should have 3 steps");
        }
    }

    #[test]
    fn test_flatten_prefixes_phase_and_appends_project_step() {
        let phases = build_roadmap("Software Engineer", &strs(&["python"]), &strs(&["python"]));
        let steps = flatten_plan_steps(&phases);

        let expected =
            1 + 1 + 3 + 3 + 3 + 1; // foundations + core + projects + portfolio + apply + trailing
        assert_eq!(steps.len(), expected);
        assert!(steps[0].starts_with("Foundations: "));
        assert_eq!(steps.last().unwrap(), TRAILING_PROJECT_STEP);
    }

    #[test]
    fn test_flatten_preserves_phase_order() {
        let phases = build_roadmap("Data Analyst", &strs(&["sql"]), &strs(&["sql"]));
        let steps = flatten_plan_steps(&phases);
        let first_core = steps.iter().position(|s| s.starts_with("Core Practice:"));
        let first_apply = steps.iter().position(|s| s.starts_with("Apply & Iterate:"));
        assert!(first_core.unwrap() < first_apply.unwrap());
    }
}
