use crate::domain::model::{
    CategoryBoard, CategoryBucket, Leaderboard, LeaderboardRow, PointsTable, StageDescriptor,
    StageOrder, StageResult,
};

/// Inputs to leaderboard assembly that come from configuration rather than the file.
#[derive(Debug, Clone, Copy)]
pub struct AssemblyOptions<'a> {
    /// Output category order; categories missing from the file are dropped.
    pub categories: &'a [String],
    pub points: &'a PointsTable,
    pub stage_order: StageOrder,
    pub event_title: &'a str,
    pub source_name: &'a str,
}

/// Builds the per-category leaderboard for one file.
pub fn assemble(
    bucket: &CategoryBucket,
    mut stages: Vec<StageDescriptor>,
    options: &AssemblyOptions<'_>,
) -> Leaderboard {
    let categories = sanitize_categories(options.categories, bucket);

    for unconfigured in bucket
        .categories()
        .filter(|name| !options.categories.iter().any(|c| c == name))
    {
        tracing::warn!(
            "⚠️ {}: category '{}' is not configured, its {} racers are left out",
            options.source_name,
            unconfigured,
            bucket.get(unconfigured).map_or(0, |racers| racers.len())
        );
    }

    sort_stages(&mut stages);

    let categories = categories
        .into_iter()
        .map(|name| {
            let rows = bucket
                .get(&name)
                .unwrap_or_default()
                .iter()
                .map(|racer| {
                    let mut racer = racer.clone();
                    sort_stage_results(&mut racer.stage_results, options.stage_order);
                    LeaderboardRow {
                        points: options.points.points_for(&racer.place),
                        racer,
                    }
                })
                .collect();
            CategoryBoard { name, rows }
        })
        .collect();

    Leaderboard {
        source_name: options.source_name.to_string(),
        event_title: options.event_title.to_string(),
        stages,
        categories,
    }
}

/// Keeps the configured categories that have at least one racer, in configured order.
pub fn sanitize_categories(configured: &[String], bucket: &CategoryBucket) -> Vec<String> {
    configured
        .iter()
        .filter(|name| bucket.contains(name))
        .cloned()
        .collect()
}

pub fn sort_stages(stages: &mut [StageDescriptor]) {
    stages.sort_by_key(|stage| stage.stage_number);
}

pub fn sort_stage_results(results: &mut [StageResult], order: StageOrder) {
    match order {
        StageOrder::Source => results.sort_by_key(|result| result.stage_number.to_string()),
        StageOrder::Numeric => results.sort_by_key(|result| result.stage_number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grouper::group_by_category;
    use crate::domain::model::{Place, RacerRecord};

    fn stage(n: u32) -> StageDescriptor {
        StageDescriptor {
            stage_number: n,
            time_column_label: format!("S{}T", n),
            place_column_label: format!("S{}P", n),
        }
    }

    fn result(n: u32) -> StageResult {
        StageResult {
            stage_number: n,
            stage_time: format!("{}:00.00", n),
            stage_place: n.to_string(),
        }
    }

    fn racer(plate: &str, category: &str, place: Place, stages: &[u32]) -> RacerRecord {
        RacerRecord {
            plate_number: plate.to_string(),
            place,
            name: format!("Racer {}", plate),
            team_or_sponsor: String::new(),
            category: category.to_string(),
            overall_time: "*1:00:00.00".to_string(),
            time_behind: String::new(),
            stage_results: stages.iter().copied().map(result).collect(),
        }
    }

    fn points() -> PointsTable {
        [
            ("1".to_string(), 50.0),
            ("2".to_string(), 40.0),
            ("N/C".to_string(), 1.0),
        ]
        .into_iter()
        .collect()
    }

    fn categories(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_output_follows_configured_order() {
        let bucket = group_by_category(vec![
            racer("1", "Men Pro", Place::Rank("1".into()), &[1]),
            racer("2", "Women Pro", Place::Rank("1".into()), &[1]),
        ]);
        let configured = categories(&["Women Pro", "Junior", "Men Pro"]);
        let points = points();
        let options = AssemblyOptions {
            categories: &configured,
            points: &points,
            stage_order: StageOrder::Source,
            event_title: "Enduro #1",
            source_name: "round1.csv",
        };

        let board = assemble(&bucket, vec![stage(1)], &options);

        let names: Vec<&str> = board.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Women Pro", "Men Pro"]);
        assert_eq!(board.event_title, "Enduro #1");
        assert_eq!(board.source_name, "round1.csv");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let bucket = group_by_category(vec![racer("1", "Men Pro", Place::Unplaced, &[])]);
        let configured = categories(&["Women Pro", "Men Pro", "Junior"]);

        let once = sanitize_categories(&configured, &bucket);
        let twice = sanitize_categories(&once, &bucket);

        assert_eq!(once, vec!["Men Pro".to_string()]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rows_keep_grouped_order_and_points() {
        let bucket = group_by_category(vec![
            racer("9", "Men Pro", Place::Rank("2".into()), &[]),
            racer("4", "Men Pro", Place::Rank("1".into()), &[]),
            racer("6", "Men Pro", Place::NotClassified, &[]),
            racer("8", "Men Pro", Place::Unplaced, &[]),
            racer("3", "Men Pro", Place::DidNotFinish, &[]),
        ]);
        let configured = categories(&["Men Pro"]);
        let points = points();
        let options = AssemblyOptions {
            categories: &configured,
            points: &points,
            stage_order: StageOrder::Source,
            event_title: "",
            source_name: "race.csv",
        };

        let board = assemble(&bucket, Vec::new(), &options);
        let rows = &board.categories[0].rows;

        let plates: Vec<&str> = rows.iter().map(|r| r.racer.plate_number.as_str()).collect();
        assert_eq!(plates, vec!["9", "4", "6", "8", "3"]);

        let earned: Vec<Option<f64>> = rows.iter().map(|r| r.points).collect();
        assert_eq!(earned, vec![Some(40.0), Some(50.0), Some(1.0), None, None]);
    }

    #[test]
    fn test_stages_sort_numerically() {
        let mut stages = vec![stage(3), stage(1), stage(10), stage(2)];
        sort_stages(&mut stages);

        let numbers: Vec<u32> = stages.iter().map(|s| s.stage_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 10]);
        assert!(numbers.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_stage_results_source_order_is_textual() {
        let mut results: Vec<StageResult> = [3, 1, 10, 2].into_iter().map(result).collect();
        sort_stage_results(&mut results, StageOrder::Source);
        let numbers: Vec<u32> = results.iter().map(|r| r.stage_number).collect();
        assert_eq!(numbers, vec![1, 10, 2, 3]);

        sort_stage_results(&mut results, StageOrder::Numeric);
        let numbers: Vec<u32> = results.iter().map(|r| r.stage_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 10]);
    }

    #[test]
    fn test_racer_stage_results_are_sorted() {
        let bucket = group_by_category(vec![racer(
            "5",
            "Men Pro",
            Place::Rank("1".into()),
            &[2, 3, 1],
        )]);
        let configured = categories(&["Men Pro"]);
        let points = points();
        let options = AssemblyOptions {
            categories: &configured,
            points: &points,
            stage_order: StageOrder::Source,
            event_title: "",
            source_name: "race.csv",
        };

        let board = assemble(&bucket, vec![stage(2), stage(3), stage(1)], &options);

        let stage_numbers: Vec<u32> = board.stages.iter().map(|s| s.stage_number).collect();
        assert_eq!(stage_numbers, vec![1, 2, 3]);
        let result_numbers: Vec<u32> = board.categories[0].rows[0]
            .racer
            .stage_results
            .iter()
            .map(|r| r.stage_number)
            .collect();
        assert_eq!(result_numbers, vec![1, 2, 3]);
    }
}
