/// Degree markers matched case-sensitively against each line.
pub(crate) const EDUCATION_KEYWORDS: [&str; 11] = [
    "B.E", "B.Tech", "B.S", "B.A", "M.Tech", "M.S", "MBA", "M.A", "PhD", "Bachelor", "Master",
];

/// Role, seniority, and duration words matched against the lowercased line.
pub(crate) const EXPERIENCE_KEYWORDS: [&str; 7] = [
    "experience",
    "worked",
    "years",
    "software engineer",
    "developer",
    "manager",
    "analyst",
];

/// Known skills in reporting order.
pub(crate) const SKILL_KEYWORDS: [&str; 26] = [
    "Python",
    "Java",
    "JavaScript",
    "C++",
    "C#",
    "SQL",
    "HTML",
    "CSS",
    "React",
    "Angular",
    "Vue",
    "Node.js",
    "Django",
    "Flask",
    "AWS",
    "Azure",
    "Machine Learning",
    "Data Analysis",
    "Git",
    "Docker",
    "Kubernetes",
    "REST API",
    "GraphQL",
    "MongoDB",
    "PostgreSQL",
    "MySQL",
];

pub(crate) const NAME_SCAN_LINES: usize = 10;
pub(crate) const EDUCATION_CONTEXT_LIMIT: usize = 3;
pub(crate) const EXPERIENCE_CONTEXT_LIMIT: usize = 2;
