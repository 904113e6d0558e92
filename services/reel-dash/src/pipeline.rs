// services/reel-dash/src/pipeline.rs
//
// View pipeline: record set + view params -> everything the dashboard renders.
// Pure functions only; recomputed before every frame.
//

use std::collections::{HashMap, HashSet};

use feruca::Collator;
use svckit::Record;

pub const TOP_ACTORS_LIMIT: usize = 6;
pub const RECENT_ACTIVITY_LIMIT: usize = 6;
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    All,
    ByActor,
    ByMovie,
}

impl FilterMode {
    pub fn next(self) -> Self {
        match self {
            FilterMode::All => FilterMode::ByActor,
            FilterMode::ByActor => FilterMode::ByMovie,
            FilterMode::ByMovie => FilterMode::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterMode::All => "All",
            FilterMode::ByActor => "Actor",
            FilterMode::ByMovie => "Movie",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Newest,
    Oldest,
    ActorName,
}

impl SortMode {
    pub fn next(self) -> Self {
        match self {
            SortMode::Newest => SortMode::Oldest,
            SortMode::Oldest => SortMode::ActorName,
            SortMode::ActorName => SortMode::Newest,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Newest => "Newest",
            SortMode::Oldest => "Oldest",
            SortMode::ActorName => "Actor",
        }
    }
}

/// User-controlled view selection; never persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewParams {
    pub filter_mode: FilterMode,
    pub filter_text: String,
    pub sort_mode: SortMode,
    /// 1-based; clamped by `compute`
    pub page: usize,
    pub page_size: usize,
}

impl ViewParams {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            filter_mode: FilterMode::All,
            filter_text: String::new(),
            sort_mode: SortMode::Newest,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One bar of the top-actors chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPoint {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedView {
    pub total_count: usize,
    pub filtered_count: usize,
    pub unique_actor_count: usize,
    pub top_actors: Vec<ChartPoint>,
    /// The page actually shown after clamping
    pub page: usize,
    pub page_count: usize,
    pub page_rows: Vec<Record>,
    pub recent_activity: Vec<Record>,
}

pub fn compute(records: &[Record], params: &ViewParams) -> DerivedView {
    let mut rows = filter_records(records, params.filter_mode, &params.filter_text);
    sort_records(&mut rows, params.sort_mode);

    let filtered_count = rows.len();
    let page_size = params.page_size.max(1);
    let page_count = page_count(filtered_count, page_size);
    let page = params.page.clamp(1, page_count);

    let page_rows = rows
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();

    DerivedView {
        total_count: records.len(),
        filtered_count,
        unique_actor_count: unique_actor_count(records),
        top_actors: top_actors(records, TOP_ACTORS_LIMIT),
        page,
        page_count,
        page_rows,
        recent_activity: recent_activity(records, RECENT_ACTIVITY_LIMIT),
    }
}

pub fn filter_records<'a>(
    records: &'a [Record],
    mode: FilterMode,
    text: &str,
) -> Vec<&'a Record> {
    let needle = text.to_lowercase();

    records
        .iter()
        .filter(|r| match mode {
            FilterMode::All => true,
            FilterMode::ByActor => contains_ignore_case(&r.actor_name, &needle),
            FilterMode::ByMovie => contains_ignore_case(&r.movie_name, &needle),
        })
        .collect()
}

fn contains_ignore_case(haystack: &str, lowered_needle: &str) -> bool {
    lowered_needle.is_empty() || haystack.to_lowercase().contains(lowered_needle)
}

/// Stable sort: rows with equal keys keep their incoming order.
/// Actor names use CLDR root collation, so accented names sit with their base
/// letter and lowercase precedes uppercase when names differ only in case.
pub fn sort_records(rows: &mut [&Record], mode: SortMode) {
    match mode {
        SortMode::Newest => {
            rows.sort_by(|a, b| b.created_at.instant().cmp(&a.created_at.instant()))
        }
        SortMode::Oldest => {
            rows.sort_by(|a, b| a.created_at.instant().cmp(&b.created_at.instant()))
        }
        SortMode::ActorName => {
            let mut collator = Collator::default();
            rows.sort_by(|a, b| collator.collate(a.actor_name.as_str(), b.actor_name.as_str()))
        }
    }
}

pub fn page_count(filtered_count: usize, page_size: usize) -> usize {
    filtered_count.div_ceil(page_size.max(1)).max(1)
}

pub fn unique_actor_count(records: &[Record]) -> usize {
    records
        .iter()
        .map(|r| r.actor_name.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Movies per actor, most first. Equal counts keep first-appearance order.
pub fn top_actors(records: &[Record], limit: usize) -> Vec<ChartPoint> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, u64)> = Vec::new();

    for record in records {
        let actor = record.actor_name.as_str();
        match slots.get(actor) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(actor, counts.len());
                counts.push((actor, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .take(limit)
        .map(|(label, value)| ChartPoint {
            label: label.to_string(),
            value,
        })
        .collect()
}

pub fn recent_activity(records: &[Record], limit: usize) -> Vec<Record> {
    let mut rows: Vec<&Record> = records.iter().collect();
    sort_records(&mut rows, SortMode::Newest);
    rows.into_iter().take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use svckit::{RecordId, Timestamp};

    fn record(id: i64, actor: &str, movie: &str, created_at: &str) -> Record {
        Record {
            id: RecordId::Number(id),
            actor_name: actor.to_string(),
            movie_name: movie.to_string(),
            created_at: Timestamp::parse(created_at),
        }
    }

    fn ids(rows: &[Record]) -> Vec<RecordId> {
        rows.iter().map(|r| r.id.clone()).collect()
    }

    fn two_records() -> Vec<Record> {
        vec![
            record(1, "A", "X", "2024-01-01"),
            record(2, "B", "Y", "2024-02-01"),
        ]
    }

    fn many_records(n: i64) -> Vec<Record> {
        (1..=n)
            .map(|i| {
                record(
                    i,
                    &format!("Actor {}", i % 8),
                    &format!("Movie {}", i),
                    &format!("2024-01-{:02} 10:00:00", (i % 28) + 1),
                )
            })
            .collect()
    }

    #[test]
    fn test_newest_first_scenario() {
        let view = compute(&two_records(), &ViewParams::default());

        assert_eq!(ids(&view.page_rows), vec![RecordId::Number(2), RecordId::Number(1)]);
        assert_eq!(view.total_count, 2);
        assert_eq!(view.filtered_count, 2);
        assert_eq!(view.page_count, 1);
    }

    #[test]
    fn test_actor_filter_is_case_insensitive() {
        let params = ViewParams {
            filter_mode: FilterMode::ByActor,
            filter_text: "a".to_string(),
            ..ViewParams::default()
        };
        let view = compute(&two_records(), &params);

        assert_eq!(ids(&view.page_rows), vec![RecordId::Number(1)]);
        assert_eq!(view.filtered_count, 1);
        // aggregates ignore the filter
        assert_eq!(view.total_count, 2);
        assert_eq!(view.unique_actor_count, 2);
    }

    #[test]
    fn test_movie_filter_and_empty_text() {
        let records = two_records();

        let by_movie = filter_records(&records, FilterMode::ByMovie, "y");
        assert_eq!(by_movie.len(), 1);
        assert_eq!(by_movie[0].movie_name, "Y");

        let empty = filter_records(&records, FilterMode::ByMovie, "");
        assert_eq!(empty.len(), 2);
    }

    #[test]
    fn test_empty_record_set() {
        for sort_mode in [SortMode::Newest, SortMode::Oldest, SortMode::ActorName] {
            let params = ViewParams {
                filter_mode: FilterMode::ByActor,
                filter_text: "nobody".to_string(),
                sort_mode,
                page: 4,
                ..ViewParams::default()
            };
            let view = compute(&[], &params);

            assert_eq!(view.page_count, 1);
            assert_eq!(view.page, 1);
            assert!(view.page_rows.is_empty());
            assert!(view.top_actors.is_empty());
            assert!(view.recent_activity.is_empty());
            assert_eq!(view.unique_actor_count, 0);
        }
    }

    #[test]
    fn test_page_count_formula() {
        let records = many_records(25);

        for filter_mode in [FilterMode::All, FilterMode::ByActor, FilterMode::ByMovie] {
            for page_size in [1, 3, 10, 25, 40] {
                let params = ViewParams {
                    filter_mode,
                    filter_text: "1".to_string(),
                    page_size,
                    ..ViewParams::default()
                };
                let view = compute(&records, &params);
                let expected = std::cmp::max(1, (view.filtered_count + page_size - 1) / page_size);
                assert_eq!(view.page_count, expected);
            }
        }
    }

    #[test]
    fn test_page_is_clamped() {
        let records = many_records(25);

        let beyond = compute(&records, &ViewParams { page: 99, ..ViewParams::default() });
        assert_eq!(beyond.page, 3);
        assert_eq!(beyond.page_rows.len(), 5);

        let zero = compute(&records, &ViewParams { page: 0, ..ViewParams::default() });
        assert_eq!(zero.page, 1);
        assert_eq!(zero.page_rows.len(), 10);
    }

    #[test]
    fn test_pages_partition_sorted_rows() {
        let records = many_records(23);
        let mut seen = Vec::new();

        for page in 1..=3 {
            let params = ViewParams {
                sort_mode: SortMode::Oldest,
                page,
                ..ViewParams::default()
            };
            seen.extend(ids(&compute(&records, &params).page_rows));
        }

        let mut all: Vec<&Record> = records.iter().collect();
        sort_records(&mut all, SortMode::Oldest);
        let expected: Vec<RecordId> = all.iter().map(|r| r.id.clone()).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_sort_is_stable_for_equal_timestamps() {
        let records = vec![
            record(1, "C", "M1", "2024-03-01"),
            record(2, "A", "M2", "2024-03-01"),
            record(3, "B", "M3", "2024-01-01"),
            record(4, "D", "M4", "2024-03-01"),
        ];

        let newest = compute(&records, &ViewParams::default());
        assert_eq!(
            ids(&newest.page_rows),
            vec![1, 2, 4, 3].into_iter().map(RecordId::Number).collect::<Vec<_>>()
        );

        let oldest = compute(
            &records,
            &ViewParams {
                sort_mode: SortMode::Oldest,
                ..ViewParams::default()
            },
        );
        assert_eq!(
            ids(&oldest.page_rows),
            vec![3, 1, 2, 4].into_iter().map(RecordId::Number).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_actor_sort_collation_and_stability() {
        let records = vec![
            record(1, "bob", "M1", "2024-01-01"),
            record(2, "Alice", "M2", "2024-01-02"),
            record(3, "alice", "M3", "2024-01-03"),
            record(4, "bob", "M4", "2024-01-04"),
            record(5, "Bob", "M5", "2024-01-05"),
        ];
        let params = ViewParams {
            sort_mode: SortMode::ActorName,
            ..ViewParams::default()
        };
        let view = compute(&records, &params);

        assert_eq!(
            ids(&view.page_rows),
            vec![3, 2, 1, 4, 5].into_iter().map(RecordId::Number).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_actor_sort_places_accented_names_by_base_letter() {
        let records = vec![
            record(1, "Zoe", "M1", "2024-01-01"),
            record(2, "Émile", "M2", "2024-01-02"),
            record(3, "Ángela", "M3", "2024-01-03"),
            record(4, "Bob", "M4", "2024-01-04"),
        ];
        let params = ViewParams {
            sort_mode: SortMode::ActorName,
            ..ViewParams::default()
        };
        let view = compute(&records, &params);

        let names: Vec<&str> = view.page_rows.iter().map(|r| r.actor_name.as_str()).collect();
        assert_eq!(names, vec!["Ángela", "Bob", "Émile", "Zoe"]);
    }

    #[test]
    fn test_top_actors_ties_keep_first_seen() {
        let records = vec![
            record(1, "Ana", "M1", "2024-01-01"),
            record(2, "Ben", "M2", "2024-01-02"),
            record(3, "Ben", "M3", "2024-01-03"),
            record(4, "Ana", "M4", "2024-01-04"),
            record(5, "Cal", "M5", "2024-01-05"),
        ];
        let top = top_actors(&records, TOP_ACTORS_LIMIT);

        let labels: Vec<&str> = top.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Ana", "Ben", "Cal"]);
        assert_eq!(top[0].value, 2);
        assert_eq!(top[2].value, 1);
    }

    #[test]
    fn test_top_actors_length_and_order() {
        let records = many_records(40);
        let view = compute(&records, &ViewParams::default());

        assert_eq!(view.unique_actor_count, 8);
        assert_eq!(view.top_actors.len(), TOP_ACTORS_LIMIT.min(view.unique_actor_count));
        assert!(view.top_actors.windows(2).all(|w| w[0].value >= w[1].value));

        let few = compute(&two_records(), &ViewParams::default());
        assert_eq!(few.top_actors.len(), 2);
    }

    #[test]
    fn test_recent_activity_newest_first() {
        let records = many_records(30);
        let view = compute(&records, &ViewParams::default());

        assert_eq!(view.recent_activity.len(), RECENT_ACTIVITY_LIMIT.min(view.total_count));
        assert!(view
            .recent_activity
            .windows(2)
            .all(|w| w[0].created_at.instant() >= w[1].created_at.instant()));

        let short = compute(&two_records(), &ViewParams::default());
        assert_eq!(ids(&short.recent_activity), vec![RecordId::Number(2), RecordId::Number(1)]);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let records = many_records(37);
        let params = ViewParams {
            filter_mode: FilterMode::ByMovie,
            filter_text: "movie 1".to_string(),
            sort_mode: SortMode::ActorName,
            page: 2,
            page_size: 4,
        };

        assert_eq!(compute(&records, &params), compute(&records, &params));
    }

    #[test]
    fn test_zero_page_size_is_treated_as_one() {
        let view = compute(&two_records(), &ViewParams::with_page_size(0));
        assert_eq!(view.page_count, 2);
        assert_eq!(view.page_rows.len(), 1);
    }

    #[test]
    fn test_mode_cycles() {
        assert_eq!(FilterMode::All.next().next().next(), FilterMode::All);
        assert_eq!(SortMode::Newest.next(), SortMode::Oldest);
        assert_eq!(SortMode::ActorName.label(), "Actor");
    }
}
