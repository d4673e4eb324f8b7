use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{Listing, ListingSource, Salary};

/// Marker prefixed to every synthetic description
pub const FALLBACK_TAG: &str = "[FALLBACK]";

pub const PREVIEW_CHARS: usize = 150;

/// Salary bands: min in [70k, 110k), max in [110k, 180k)
pub const SALARY_MIN_FLOOR: u32 = 70_000;
pub const SALARY_MIN_SPREAD: u32 = 40_000;
pub const SALARY_MAX_FLOOR: u32 = 110_000;
pub const SALARY_MAX_SPREAD: u32 = 70_000;

/// Posted dates fall within the last 30 days
pub const MAX_POSTED_AGE_DAYS: i64 = 30;

const TITLES: &[&str] = &[
    "Software Engineer",
    "Full Stack Developer",
    "Frontend Developer",
    "Backend Developer",
    "DevOps Engineer",
    "Data Scientist",
    "Machine Learning Engineer",
    "Product Manager",
    "UX Designer",
    "UI Designer",
    "Project Manager",
    "Business Analyst",
];

const COMPANIES: &[&str] = &[
    "Tech Corp",
    "Innovation Labs",
    "Digital Solutions",
    "Cloud Services Inc",
    "Data Analytics Co",
    "Software Systems",
    "Tech Innovations",
    "Digital Ventures",
];

const DEFAULT_LOCATIONS: &[&str] = &[
    "Remote",
    "San Francisco, CA",
    "New York, NY",
    "Austin, TX",
    "Seattle, WA",
];

/// Upper bound on generated listings regardless of the requested limit
pub const MAX_GENERATED: usize = TITLES.len() * 2;

/// Synthesizes clearly labeled listings when no provider returned anything.
///
/// With a seed, every call replays the same salary bands and dates.
#[derive(Debug, Clone, Default)]
pub struct FallbackGenerator {
    seed: Option<u64>,
}

impl FallbackGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    pub fn generate(
        &self,
        keywords: &[String],
        original_description: &str,
        location: &str,
        limit: usize,
    ) -> Vec<Listing> {
        if keywords.is_empty() {
            return Vec::new();
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let location = location.trim();
        let locations: Vec<&str> = if location.is_empty() {
            DEFAULT_LOCATIONS.to_vec()
        } else {
            vec![location]
        };

        let keyword_list = keywords.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
        let preview = description_preview(original_description);
        let now = Utc::now();

        (0..limit.min(MAX_GENERATED))
            .map(|i| {
                let title = TITLES[i % TITLES.len()];
                let search_terms = format!("{} jobs {}", title, location);

                Listing {
                    title: title.to_string(),
                    company: COMPANIES[i % COMPANIES.len()].to_string(),
                    location: locations[i % locations.len()].to_string(),
                    description: format!(
                        "{} Seeking a {} with expertise in {}. Original JD: {}",
                        FALLBACK_TAG,
                        title.to_lowercase(),
                        keyword_list,
                        preview
                    ),
                    url: format!(
                        "https://www.google.com/search?q={}",
                        urlencoding::encode(search_terms.trim_end())
                    ),
                    salary: Some(Salary {
                        min: Some(f64::from(SALARY_MIN_FLOOR + rng.gen_range(0..SALARY_MIN_SPREAD))),
                        max: Some(f64::from(SALARY_MAX_FLOOR + rng.gen_range(0..SALARY_MAX_SPREAD))),
                        currency: "USD".to_string(),
                    }),
                    posted_at: now - Duration::days(rng.gen_range(0..MAX_POSTED_AGE_DAYS)),
                    source: ListingSource::Suggested,
                    is_suggested: true,
                }
            })
            .collect()
    }
}

fn description_preview(description: &str) -> String {
    if description.chars().count() > PREVIEW_CHARS {
        let head: String = description.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        description.to_string()
    }
}
