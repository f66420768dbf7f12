//! Catalog seeding: skills, careers with weighted requirements, and starter
//! resources. Idempotent; every entity is get-or-create so reruns are safe.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::catalog::{ensure_requirement, get_or_create_career, get_or_create_skill};

const SKILLS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "html",
    "css",
    "react",
    "node",
    "data-structures",
    "algorithms",
    "git",
    "linux",
    "sql",
    "statistics",
    "data-analysis",
    "machine-learning",
    "deep-learning",
    "pandas",
    "numpy",
    "powerbi",
    "tableau",
    "aws",
    "docker",
    "kubernetes",
    "bash",
    "networking",
    "security-basics",
    "figma",
    "design-principles",
    "ux-research",
    "communication",
    "problem-solving",
    "spreadsheets",
];

/// (career title, [(skill, importance, level)])
const CAREERS: &[(&str, &[(&str, f64, &str)])] = &[
    (
        "Software Engineer",
        &[
            ("python", 1.0, "intermediate"),
            ("java", 0.7, "intermediate"),
            ("data-structures", 1.0, "intermediate"),
            ("algorithms", 1.0, "intermediate"),
            ("git", 0.8, "intermediate"),
            ("linux", 0.6, "beginner"),
        ],
    ),
    (
        "Front-end Developer",
        &[
            ("html", 1.0, "intermediate"),
            ("css", 1.0, "intermediate"),
            ("javascript", 1.0, "intermediate"),
            ("react", 0.9, "beginner"),
            ("git", 0.7, "beginner"),
            ("design-principles", 0.5, "beginner"),
        ],
    ),
    (
        "Back-end Developer",
        &[
            ("python", 1.0, "intermediate"),
            ("node", 0.8, "beginner"),
            ("sql", 1.0, "intermediate"),
            ("data-structures", 0.9, "intermediate"),
            ("linux", 0.8, "beginner"),
            ("docker", 0.6, "beginner"),
        ],
    ),
    (
        "Data Analyst",
        &[
            ("sql", 1.0, "intermediate"),
            ("spreadsheets", 1.0, "intermediate"),
            ("data-analysis", 1.0, "intermediate"),
            ("statistics", 0.9, "beginner"),
            ("powerbi", 0.7, "beginner"),
            ("tableau", 0.7, "beginner"),
            ("python", 0.6, "beginner"),
        ],
    ),
    (
        "Data Scientist",
        &[
            ("python", 1.0, "intermediate"),
            ("statistics", 1.0, "intermediate"),
            ("machine-learning", 1.0, "intermediate"),
            ("pandas", 0.9, "intermediate"),
            ("numpy", 0.9, "intermediate"),
            ("sql", 0.8, "beginner"),
            ("deep-learning", 0.7, "beginner"),
        ],
    ),
    (
        "ML Engineer",
        &[
            ("python", 1.0, "intermediate"),
            ("machine-learning", 1.0, "intermediate"),
            ("deep-learning", 0.9, "beginner"),
            ("docker", 0.7, "beginner"),
            ("aws", 0.7, "beginner"),
            ("data-structures", 0.8, "intermediate"),
        ],
    ),
    (
        "Cloud Engineer",
        &[
            ("aws", 1.0, "beginner"),
            ("linux", 0.9, "intermediate"),
            ("docker", 0.8, "beginner"),
            ("kubernetes", 0.8, "beginner"),
            ("bash", 0.7, "beginner"),
            ("networking", 0.7, "beginner"),
        ],
    ),
    (
        "Cybersecurity Analyst",
        &[
            ("security-basics", 1.0, "beginner"),
            ("networking", 1.0, "beginner"),
            ("linux", 0.8, "beginner"),
            ("bash", 0.7, "beginner"),
            ("python", 0.6, "beginner"),
        ],
    ),
    (
        "Business Analyst",
        &[
            ("spreadsheets", 1.0, "intermediate"),
            ("sql", 0.9, "beginner"),
            ("communication", 1.0, "intermediate"),
            ("problem-solving", 1.0, "intermediate"),
            ("powerbi", 0.7, "beginner"),
        ],
    ),
    (
        "UI/UX Designer",
        &[
            ("figma", 1.0, "intermediate"),
            ("design-principles", 1.0, "intermediate"),
            ("ux-research", 0.9, "beginner"),
            ("communication", 0.8, "intermediate"),
            ("html", 0.4, "beginner"),
        ],
    ),
];

/// (title, url, type, provider, [skills], [careers]; the first career becomes
/// the resource's primary career link)
const RESOURCES: &[(&str, &str, &str, &str, &[&str], &[&str])] = &[
    (
        "Automate the Boring Stuff with Python",
        "https://automatetheboringstuff.com/",
        "book",
        "Al Sweigart",
        &["python"],
        &["Software Engineer", "Data Analyst", "Data Scientist"],
    ),
    (
        "CS50 Data Structures (Lecture)",
        "https://cs50.harvard.edu/x/2024/notes/5/",
        "article",
        "Harvard",
        &["data-structures", "algorithms"],
        &["Software Engineer", "Back-end Developer"],
    ),
    (
        "SQLBolt",
        "https://sqlbolt.com/",
        "course",
        "SQLBolt",
        &["sql"],
        &["Data Analyst", "Back-end Developer"],
    ),
    (
        "Khan Academy — Statistics",
        "https://www.khanacademy.org/math/statistics-probability",
        "course",
        "Khan Academy",
        &["statistics"],
        &["Data Scientist", "Data Analyst"],
    ),
    (
        "React Docs — Learn",
        "https://react.dev/learn",
        "docs",
        "Meta",
        &["react", "javascript"],
        &["Front-end Developer"],
    ),
    (
        "Figma Learn",
        "https://help.figma.com/hc/en-us/articles/360040514173-Get-started-with-Figma",
        "guide",
        "Figma",
        &["figma", "design-principles"],
        &["UI/UX Designer"],
    ),
    (
        "Docker — Getting Started",
        "https://docs.docker.com/get-started/",
        "docs",
        "Docker",
        &["docker"],
        &["Back-end Developer", "ML Engineer", "Cloud Engineer"],
    ),
    (
        "AWS Skill Builder (Free)",
        "https://explore.skillbuilder.aws/",
        "course",
        "AWS",
        &["aws"],
        &["Cloud Engineer", "ML Engineer"],
    ),
];

#[derive(Debug)]
pub struct SeedSummary {
    pub careers: i64,
    pub skills: i64,
    pub requirements: i64,
    pub resources: i64,
}

pub async fn run(pool: &PgPool, reset: bool) -> Result<SeedSummary> {
    if reset {
        info!("Resetting all tables before seeding");
        sqlx::query(
            r#"
            TRUNCATE resource_skills, resources, plan_steps, plans, career_skills,
                     careers, user_skills, sessions, users, skills CASCADE
            "#,
        )
        .execute(pool)
        .await?;
    }

    let mut tx = pool.begin().await?;

    for name in SKILLS {
        get_or_create_skill(&mut *tx, name).await?;
    }

    for (title, requirements) in CAREERS {
        let career = get_or_create_career(&mut *tx, title).await?;
        for (skill_name, importance, level) in *requirements {
            let skill = get_or_create_skill(&mut *tx, skill_name).await?;
            ensure_requirement(&mut *tx, career.id, skill.id, *importance, Some(*level)).await?;
        }
    }

    for (title, url, resource_type, provider, skill_names, career_titles) in RESOURCES {
        let primary_career = match career_titles.first() {
            Some(t) => Some(get_or_create_career(&mut *tx, t).await?.id),
            None => None,
        };

        let existing: Option<(uuid::Uuid,)> =
            sqlx::query_as("SELECT id FROM resources WHERE title = $1")
                .bind(title)
                .fetch_optional(&mut *tx)
                .await?;
        let resource_id = match existing {
            Some((id,)) => id,
            None => {
                let (id,): (uuid::Uuid,) = sqlx::query_as(
                    r#"
                    INSERT INTO resources (career_id, title, url, resource_type, provider)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING id
                    "#,
                )
                .bind(primary_career)
                .bind(title)
                .bind(url)
                .bind(resource_type)
                .bind(provider)
                .fetch_one(&mut *tx)
                .await?;
                id
            }
        };

        for skill_name in *skill_names {
            let skill = get_or_create_skill(&mut *tx, skill_name).await?;
            sqlx::query(
                r#"
                INSERT INTO resource_skills (resource_id, skill_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(resource_id)
            .bind(skill.id)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    let (careers,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM careers")
        .fetch_one(pool)
        .await?;
    let (skills,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM skills")
        .fetch_one(pool)
        .await?;
    let (requirements,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM career_skills")
        .fetch_one(pool)
        .await?;
    let (resources,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM resources")
        .fetch_one(pool)
        .await?;

    Ok(SeedSummary {
        careers,
        skills,
        requirements,
        resources,
    })
}
