use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Raw `meals` row. The diet flag is a 0/1 integer in storage.
#[derive(Debug, FromRow)]
pub struct MealRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub consumed_at: OffsetDateTime,
    pub is_inside_diet: i16,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

/// Domain meal. The diet flag is a strict boolean; the conversion from the
/// stored integer happens here, once, so downstream code never coerces.
#[derive(Debug, Clone, Serialize)]
pub struct Meal {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub consumed_at: OffsetDateTime,
    pub is_inside_diet: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl From<MealRow> for Meal {
    fn from(r: MealRow) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            name: r.name,
            description: r.description,
            consumed_at: r.consumed_at,
            is_inside_diet: r.is_inside_diet != 0,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn row(flag: i16) -> MealRow {
        MealRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Omelette".into(),
            description: "Three eggs, no cheese".into(),
            consumed_at: datetime!(2023-04-02 08:00 UTC),
            is_inside_diet: flag,
            created_at: datetime!(2023-04-02 08:01 UTC),
            updated_at: None,
        }
    }

    #[test]
    fn zero_flag_reads_as_off_diet() {
        assert!(!Meal::from(row(0)).is_inside_diet);
    }

    #[test]
    fn any_nonzero_flag_reads_as_inside_diet() {
        assert!(Meal::from(row(1)).is_inside_diet);
        assert!(Meal::from(row(7)).is_inside_diet);
    }

    #[test]
    fn serialized_meal_hides_owner_and_uses_rfc3339() {
        let json = serde_json::to_value(Meal::from(row(1))).unwrap();
        assert!(json.get("user_id").is_none());
        assert_eq!(json["consumed_at"], "2023-04-02T08:00:00Z");
        assert_eq!(json["updated_at"], serde_json::Value::Null);
    }
}
