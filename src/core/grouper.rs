use crate::domain::model::{CategoryBucket, RacerRecord};

pub fn group_by_category(records: impl IntoIterator<Item = RacerRecord>) -> CategoryBucket {
    let mut bucket = CategoryBucket::new();
    for record in records {
        bucket.push(record);
    }

    tracing::debug!(
        "Grouped {} racers into {} categories",
        bucket.racer_count(),
        bucket.len()
    );
    bucket
}
