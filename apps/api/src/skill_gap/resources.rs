//! Learning links attached to each missing skill.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningLink {
    pub platform: String,
    pub url: String,
}

type StaticLinks = &'static [(&'static str, &'static str)];

const SKILL_RESOURCES: &[(&str, StaticLinks)] = &[
    (
        "python",
        &[
            ("Python Official Docs", "https://docs.python.org/3/"),
            ("Real Python", "https://realpython.com/"),
            ("Python Crash Course", "https://ehmatthes.github.io/pcc/"),
            ("LeetCode Python", "https://leetcode.com/problemset/python/"),
            ("Forage Data Analytics", "https://www.theforage.com/virtual-internships/prototype/ytc/JP-Morgan-Data-Analytics-Virtual-Experience"),
        ],
    ),
    (
        "javascript",
        &[
            ("MDN JavaScript", "https://developer.mozilla.org/en-US/docs/Web/JavaScript"),
            ("JavaScript.info", "https://javascript.info/"),
            ("Eloquent JavaScript", "https://eloquentjavascript.net/"),
            ("LeetCode JavaScript", "https://leetcode.com/problemset/javascript/"),
            ("Forage Web Development", "https://www.theforage.com/virtual-internships/prototype/yzg/Accenture-Developer-Virtual-Experience"),
        ],
    ),
    (
        "sql",
        &[
            ("SQLZoo", "https://sqlzoo.net/"),
            ("Mode SQL Tutorial", "https://mode.com/sql-tutorial/"),
            ("SQLBolt", "https://sqlbolt.com/"),
            ("LeetCode SQL", "https://leetcode.com/problemset/database/"),
            ("Forage Data Analytics", "https://www.theforage.com/virtual-internships/prototype/ytc/JP-Morgan-Data-Analytics-Virtual-Experience"),
        ],
    ),
    (
        "react",
        &[
            ("React Official Docs", "https://reactjs.org/docs/getting-started.html"),
            ("React Tutorial", "https://react-tutorial.app/"),
            ("Epic React", "https://epicreact.dev/"),
            ("LeetCode Front End", "https://leetcode.com/problemset/frontend/"),
            ("Forage Web Development", "https://www.theforage.com/virtual-internships/prototype/yzg/Accenture-Developer-Virtual-Experience"),
        ],
    ),
    (
        "data structures",
        &[
            ("VisuAlgo", "https://visualgo.net/en"),
            ("GeeksforGeeks", "https://www.geeksforgeeks.org/data-structures/"),
            ("CodeChef", "https://www.codechef.com/certification/data-structures-and-algorithms/prepare"),
            ("LeetCode DS & Algorithms", "https://leetcode.com/explore/learn/"),
            ("Forage Software Development", "https://www.theforage.com/virtual-internships/prototype/hzmoNKtzvAzXsEqx8/Goldman-Sachs-Software-Engineering-Virtual-Experience"),
        ],
    ),
    (
        "aws",
        &[
            ("AWS Training", "https://aws.amazon.com/training/"),
            ("AWS Docs", "https://docs.aws.amazon.com/"),
            ("AWS Free Tier", "https://aws.amazon.com/free/"),
            ("Forage Cloud Engineering", "https://www.theforage.com/virtual-internships/prototype/9q7FuwKL8SfpCLQK7/Clifford-Chance-Cloud-Computing-Virtual-Experience-Programme"),
        ],
    ),
];

/// Search templates used when a skill has no curated entry. `{q}` is the skill.
const FALLBACK_SEARCHES: &[(&str, &str)] = &[
    ("LeetCode", "https://leetcode.com/problemset/all/?search={q}"),
    ("Forage Programs", "https://www.theforage.com/browse-programs?keywords={q}"),
    ("LinkedIn Learning", "https://www.linkedin.com/learning/search?keywords={q}"),
];

/// Curated links for `skill` (exact lowercase key, no further normalization),
/// else three generated search links.
pub fn skill_resources(skill: &str) -> Vec<LearningLink> {
    let key = skill.to_lowercase();

    if let Some((_, links)) = SKILL_RESOURCES.iter().find(|(k, _)| *k == key) {
        return links
            .iter()
            .map(|(platform, url)| LearningLink {
                platform: platform.to_string(),
                url: url.to_string(),
            })
            .collect();
    }

    let query = skill.replace(' ', "%20");
    FALLBACK_SEARCHES
        .iter()
        .map(|(platform, template)| LearningLink {
            platform: platform.to_string(),
            url: template.replace("{q}", &query),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curated_skill_uses_static_table() {
        let links = skill_resources("SQL");
        assert_eq!(links.len(), 5);
        assert_eq!(links[0].platform, "SQLZoo");
    }

    #[test]
    fn test_unknown_skill_gets_three_search_links() {
        let links = skill_resources("power bi");
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].url, "https://leetcode.com/problemset/all/?search=power%20bi");
        assert_eq!(
            links[1].url,
            "https://www.theforage.com/browse-programs?keywords=power%20bi"
        );
        assert_eq!(links[2].platform, "LinkedIn Learning");
    }

    #[test]
    fn test_every_space_is_escaped() {
        let links = skill_resources("natural language processing");
        assert!(links[2].url.ends_with("keywords=natural%20language%20processing"));
    }

    #[test]
    fn test_lookup_does_not_normalize_separators() {
        // "data-structures" is not the curated key "data structures"
        let links = skill_resources("data-structures");
        assert_eq!(links.len(), 3);
    }
}
