//! Skills catalog — the fixed set of canonical skill names used for substring matching.

/// Canonical skill names, grouped by area. Order is preserved for deterministic output
/// but carries no ranking meaning.
#[rustfmt::skip]
const CANONICAL_SKILLS: &[&str] = &[
    // Programming languages
    "Python", "JavaScript", "Java", "C++", "C#", "PHP", "Ruby", "Go", "Rust", "Swift",
    "TypeScript", "Kotlin", "Scala", "R", "MATLAB", "Perl", "Shell", "Bash",
    // Web
    "React", "Angular", "Vue.js", "Node.js", "Express.js", "Django", "Flask", "Spring",
    "HTML", "CSS", "SASS", "LESS", "Bootstrap", "Tailwind CSS", "jQuery",
    // Databases
    "SQL", "MySQL", "PostgreSQL", "MongoDB", "Redis", "SQLite", "Oracle", "Cassandra",
    "DynamoDB", "Elasticsearch", "Neo4j",
    // Cloud & DevOps
    "AWS", "Azure", "GCP", "Docker", "Kubernetes", "Jenkins", "GitLab CI", "GitHub Actions",
    "Terraform", "Ansible", "Chef", "Puppet",
    // Tools & frameworks
    "Git", "GitHub", "GitLab", "Bitbucket", "JIRA", "Confluence", "Slack",
    "REST API", "GraphQL", "Microservices", "API Gateway",
    // Methodologies
    "Agile", "Scrum", "Kanban", "DevOps", "CI/CD", "TDD", "BDD",
    // Data & AI
    "Machine Learning", "Deep Learning", "AI", "Data Science", "Analytics",
    "Pandas", "NumPy", "TensorFlow", "PyTorch", "Scikit-learn",
    // Operating systems
    "Linux", "Unix", "Windows", "macOS", "Ubuntu", "CentOS",
];

/// Returns the catalog in its fixed order.
pub fn canonical_skills() -> &'static [&'static str] {
    CANONICAL_SKILLS
}

/// Catalog entries contained (case-insensitively) in `text`, deduplicated and
/// sorted by byte order of the canonical name.
pub fn match_skills(text: &str) -> Vec<String> {
    let text_lower = text.to_lowercase();
    let mut found: Vec<String> = canonical_skills()
        .iter()
        .filter(|skill| text_lower.contains(&skill.to_lowercase()))
        .map(|skill| skill.to_string())
        .collect();
    found.sort();
    found.dedup();
    found
}
