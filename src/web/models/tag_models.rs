use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::entities::tag;
use crate::web::models::color::{Color, ColorError};

/// A tag as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSchema {
    pub id: Uuid,
    pub title: String,
    pub color: Color,
}

/// Body of `POST /api/tags`. The client picks the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTagSchema {
    pub id: Uuid,
    pub title: String,
    pub color: Color,
}

/// Body of `PUT /api/tags/{tag_id}`. Ids are immutable, so an `id` field is
/// rejected along with any other unknown field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTagSchema {
    pub title: String,
    pub color: Color,
}

impl TryFrom<tag::Model> for TagSchema {
    type Error = ColorError;

    fn try_from(model: tag::Model) -> Result<Self, Self::Error> {
        Ok(TagSchema {
            id: model.id,
            title: model.title,
            color: model.color.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_new_tag_from_json() {
        let tag: NewTagSchema = serde_json::from_value(json!({
            "id": "5f0c6f7e-3c1e-4f0a-9d55-0d1c2b3a4f5e",
            "title": "Urgent",
            "color": "#ff0000"
        }))
        .unwrap();
        assert_eq!(tag.title, "Urgent");
        assert_eq!(tag.color, Color::from_rgb(255, 0, 0));
    }

    #[test]
    fn test_invalid_color_produces_no_tag() {
        let result = serde_json::from_value::<NewTagSchema>(json!({
            "id": "5f0c6f7e-3c1e-4f0a-9d55-0d1c2b3a4f5e",
            "title": "Urgent",
            "color": "not-a-color"
        }));
        assert!(result.is_err());

        let result = serde_json::from_value::<TagSchema>(json!({
            "id": "5f0c6f7e-3c1e-4f0a-9d55-0d1c2b3a4f5e",
            "title": "Urgent",
            "color": "rgb(300, 0, 0)"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_id_or_missing_field_is_rejected() {
        assert!(serde_json::from_value::<NewTagSchema>(json!({
            "id": "not-a-uuid",
            "title": "Urgent",
            "color": "red"
        }))
        .is_err());
        assert!(serde_json::from_value::<NewTagSchema>(json!({
            "title": "Urgent",
            "color": "red"
        }))
        .is_err());
    }

    #[test]
    fn test_update_rejects_id() {
        let result = serde_json::from_value::<UpdateTagSchema>(json!({
            "id": "5f0c6f7e-3c1e-4f0a-9d55-0d1c2b3a4f5e",
            "title": "Renamed",
            "color": "blue"
        }));
        assert!(result.is_err());

        let update: UpdateTagSchema = serde_json::from_value(json!({
            "title": "Renamed",
            "color": "blue"
        }))
        .unwrap();
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({
            "title": "Renamed",
            "color": "blue"
        }));
    }

    #[test]
    fn test_schema_from_model() {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let model = tag::Model {
            id,
            owner_id: 1,
            title: "Later".to_string(),
            color: "#00ff0080".to_string(),
            created_at: now,
            updated_at: now,
        };
        let schema = TagSchema::try_from(model).unwrap();
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({ "id": id, "title": "Later", "color": "#00ff0080" })
        );
    }
}
