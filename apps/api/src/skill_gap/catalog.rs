//! Built-in job roles: required skills plus platform resources for each role.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct JobRole {
    pub name: &'static str,
    pub skills: &'static [&'static str],
    /// Platform name → URL, in display order.
    pub resources: &'static [(&'static str, &'static str)],
}

pub const JOB_ROLES: &[JobRole] = &[
    JobRole {
        name: "data analyst",
        skills: &[
            "python", "excel", "sql", "data visualization", "statistics",
            "pandas", "power bi", "tableau", "data cleaning", "business analysis",
        ],
        resources: &[
            ("LinkedIn Learning", "https://www.linkedin.com/learning/paths/become-a-data-analyst"),
            ("Forage Virtual Internship", "https://www.theforage.com/virtual-internships/prototype/ytc/JP-Morgan-Data-Analytics-Virtual-Experience"),
            ("DataCamp Courses", "https://www.datacamp.com/career-tracks/data-analyst"),
            ("Kaggle Learn", "https://www.kaggle.com/learn"),
            ("Google Data Analytics Certificate", "https://www.coursera.org/professional-certificates/google-data-analytics"),
        ],
    },
    JobRole {
        name: "web developer",
        skills: &[
            "html", "css", "javascript", "react", "node.js",
            "express", "mongodb", "git", "responsive design", "typescript",
            "rest api", "graphql", "webpack", "jest",
        ],
        resources: &[
            ("LinkedIn Learning", "https://www.linkedin.com/learning/paths/become-a-web-developer"),
            ("Forage Virtual Internship", "https://www.theforage.com/virtual-internships/prototype/yzg/Accenture-Developer-Virtual-Experience"),
            ("freeCodeCamp", "https://www.freecodecamp.org/learn"),
            ("Frontend Mentor", "https://www.frontendmentor.io/"),
            ("MDN Web Docs", "https://developer.mozilla.org/"),
            ("JavaScript.info", "https://javascript.info/"),
        ],
    },
    JobRole {
        name: "software engineer",
        skills: &[
            "java", "python", "c++", "data structures", "algorithms",
            "system design", "docker", "kubernetes", "aws", "rest api",
            "microservices", "testing", "debugging", "oop",
        ],
        resources: &[
            ("LeetCode", "https://leetcode.com/"),
            ("CodeSignal", "https://codesignal.com/"),
            ("Grokking the System Design Interview", "https://www.educative.io/courses/grokking-the-system-design-interview"),
            ("The Missing Semester", "https://missing.csail.mit.edu/"),
            ("Tech Interview Handbook", "https://www.techinterviewhandbook.org/"),
            ("NeetCode", "https://neetcode.io/"),
        ],
    },
    JobRole {
        name: "ux/ui designer",
        skills: &[
            "figma", "adobe xd", "user research", "wireframing", "prototyping",
            "interaction design", "color theory", "typography", "user testing",
            "accessibility", "design systems", "user flows",
        ],
        resources: &[
            ("Google UX Design Certificate", "https://www.coursera.org/professional-certificates/google-ux-design"),
            ("Figma Learn", "https://www.figma.com/resources/learn-design/"),
            ("UX Collective", "https://uxdesign.cc/"),
            ("Awwwards", "https://www.awwwards.com/"),
            ("Laws of UX", "https://lawsofux.com/"),
            ("UI Design Daily", "https://www.uidesigndaily.com/"),
        ],
    },
    JobRole {
        name: "product manager",
        skills: &[
            "product strategy", "roadmapping", "user stories", "agile methodology",
            "market research", "competitive analysis", "stakeholder management", "jira",
            "prioritization", "metrics analysis", "customer discovery",
        ],
        resources: &[
            ("Product School", "https://www.productschool.com/"),
            ("Lenny's Newsletter", "https://www.lennysnewsletter.com/"),
            ("Product Management Exercises", "https://www.productmanagementexercises.com/"),
            ("Marty Cagan's Blog", "https://svpg.com/articles/"),
            ("The Product Book", "https://www.productbook.com/"),
            ("Mind the Product", "https://www.mindtheproduct.com/"),
        ],
    },
    JobRole {
        name: "data scientist",
        skills: &[
            "python", "r", "machine learning", "statistics", "data visualization",
            "sql", "pandas", "numpy", "tensorflow", "pytorch",
            "natural language processing", "deep learning", "data mining",
        ],
        resources: &[
            ("Kaggle", "https://www.kaggle.com/"),
            ("Fast.ai", "https://course.fast.ai/"),
            ("Towards Data Science", "https://towardsdatascience.com/"),
            ("DeepLearning.AI", "https://www.deeplearning.ai/"),
            ("Data Science Central", "https://www.datasciencecentral.com/"),
            ("Google Machine Learning Crash Course", "https://developers.google.com/machine-learning/crash-course"),
        ],
    },
    JobRole {
        name: "devops engineer",
        skills: &[
            "docker", "kubernetes", "aws", "azure", "ci/cd",
            "terraform", "ansible", "jenkins", "linux", "bash scripting",
            "monitoring", "infrastructure as code",
        ],
        resources: &[
            ("DevOps Roadmap", "https://roadmap.sh/devops"),
            ("Kubernetes Docs", "https://kubernetes.io/docs/home/"),
            ("AWS Training", "https://aws.amazon.com/training/"),
            ("DevOps Bootcamp", "https://www.udemy.com/course/devopsbootcamp/"),
            ("Google Cloud Training", "https://cloud.google.com/training"),
            ("The DevOps Handbook", "https://www.amazon.com/DevOps-Handbook-World-Class-Reliability-Organizations/dp/1942788002"),
        ],
    },
];

/// Looks up a role by name, ignoring case and surrounding whitespace.
pub fn find_role(name: &str) -> Option<&'static JobRole> {
    let wanted = name.trim().to_lowercase();
    JOB_ROLES.iter().find(|r| r.name == wanted)
}

pub fn role_names() -> Vec<&'static str> {
    JOB_ROLES.iter().map(|r| r.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_role_is_case_insensitive() {
        let role = find_role("  Data Analyst ").unwrap();
        assert_eq!(role.name, "data analyst");
        assert!(role.skills.contains(&"sql"));
    }

    #[test]
    fn test_unknown_role_is_none() {
        assert!(find_role("astronaut").is_none());
    }

    #[test]
    fn test_every_role_has_skills_and_resources() {
        assert_eq!(JOB_ROLES.len(), 7);
        for role in JOB_ROLES {
            assert!(!role.skills.is_empty(), "{} has no skills", role.name);
            assert!(!role.resources.is_empty(), "{} has no resources", role.name);
        }
    }
}
