use time::OffsetDateTime;

use crate::meals::dto::{DayBucket, MetricsSnapshot};
use crate::meals::repo_types::Meal;

/// Largest gap, in whole hours, between two consecutive meals that still
/// counts as an unbroken sequence.
pub const MAX_SEQUENCE_GAP_HOURS: i64 = 24;

fn day_key(at: OffsetDateTime) -> String {
    let date = at.date();
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Groups meals into calendar-day buckets, preserving input order.
///
/// The caller supplies one user's meals ordered by `consumed_at` descending.
/// A meal joins the first bucket anywhere in the output that carries its day
/// key, so a stray same-day meal later in the input still lands in the
/// earlier bucket instead of opening a duplicate. Bucket order is the
/// first-occurrence order of each distinct day.
pub fn meals_by_day(meals: Vec<Meal>) -> Vec<DayBucket> {
    let mut days: Vec<DayBucket> = Vec::new();

    for meal in meals {
        let day = day_key(meal.consumed_at);
        match days.iter_mut().find(|bucket| bucket.day == day) {
            Some(bucket) => bucket.meals_of_day.push(meal),
            None => days.push(DayBucket {
                day,
                meals_of_day: vec![meal],
            }),
        }
    }

    days
}

/// Computes the adherence numbers over one user's full history, ordered by
/// `consumed_at` ascending.
///
/// The sequence counter only advances on a meal that is inside the diet AND
/// follows its predecessor within [`MAX_SEQUENCE_GAP_HOURS`]. Any other meal
/// resets the running sequence to zero, including a compliant meal that
/// arrives after a longer gap; accrual then resumes on the meal after it.
/// The first meal of a history has no predecessor and never advances the
/// counter.
pub fn adherence_metrics(meals: &[Meal]) -> MetricsSnapshot {
    let mut total_meals = 0;
    let mut inside_diet = 0;
    let mut off_diet = 0;

    let mut current_sequence = 0;
    let mut best_sequence = 0;
    let mut previous: Option<OffsetDateTime> = None;

    for meal in meals {
        total_meals += 1;
        if meal.is_inside_diet {
            inside_diet += 1;
        } else {
            off_diet += 1;
        }

        let within_window = previous
            .map(|prior| (meal.consumed_at - prior).whole_hours() <= MAX_SEQUENCE_GAP_HOURS)
            .unwrap_or(false);

        if meal.is_inside_diet && within_window {
            current_sequence += 1;
            if current_sequence > best_sequence {
                best_sequence = current_sequence;
            }
        } else {
            current_sequence = 0;
        }

        previous = Some(meal.consumed_at);
    }

    MetricsSnapshot {
        total_meals,
        total_meals_inside_diet: inside_diet,
        total_meals_off_diet: off_diet,
        best_sequence_of_meals_inside_diet: best_sequence,
    }
}
