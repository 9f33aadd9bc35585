//! Statistics service

use crate::{
    models::{Average, Book, FieldStats, NumericField},
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Min, max and average of `field` over the current catalogue
    pub async fn field_stats(&self, field: NumericField) -> FieldStats {
        let books = self.repository.books_list().await;
        let stats = compute_field_stats(field, &books);
        tracing::debug!(
            "Stats: {} over {} of {} book(s)",
            field,
            stats.count,
            books.len()
        );
        stats
    }
}

/// Books with a zero value for `field` are treated as having no value.
/// Min and max keep the first book on ties.
pub fn compute_field_stats(field: NumericField, books: &[Book]) -> FieldStats {
    let mut min: Option<(f64, &Book)> = None;
    let mut max: Option<(f64, &Book)> = None;
    let mut sum = 0.0;
    let mut count = 0usize;

    for book in books {
        let Some(value) = field.value_of(book).filter(|v| *v != 0.0) else {
            continue;
        };

        sum += value;
        count += 1;

        if min.map_or(true, |(current, _)| value < current) {
            min = Some((value, book));
        }
        if max.map_or(true, |(current, _)| value > current) {
            max = Some((value, book));
        }
    }

    let average = (count > 0).then(|| {
        let mean = sum / count as f64;
        match field {
            NumericField::Year => Average::Whole(mean.round() as i64),
            _ => Average::Fractional(mean),
        }
    });

    FieldStats {
        field,
        count,
        min: min.map(|(_, b)| b.clone()),
        max: max.map(|(_, b)| b.clone()),
        average,
    }
}
