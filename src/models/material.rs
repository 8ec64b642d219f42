use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    Document,
    Video,
    Link,
    Image,
}

impl FromStr for MaterialType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "document" => Ok(MaterialType::Document),
            "video" => Ok(MaterialType::Video),
            "link" => Ok(MaterialType::Link),
            "image" => Ok(MaterialType::Image),
            other => Err(AppError::Validation(format!("unknown material type: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseMaterial {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: MaterialType,
    pub url: Option<String>,
    pub file_size: Option<u64>,
    pub uploaded_by: Option<String>,
    pub uploaded_at: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourseMaterial {
    pub course_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: MaterialType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<String>,
    pub is_active: bool,
}

impl NewCourseMaterial {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("Material title is required".to_string()));
        }
        match (&self.kind, &self.url) {
            (MaterialType::Link | MaterialType::Video, None) => Err(AppError::Validation(
                "A url is required for links and videos".to_string(),
            )),
            (_, Some(u)) => url::Url::parse(u)
                .map(|_| ())
                .map_err(|e| AppError::Validation(format!("invalid url {}: {}", u, e))),
            _ => Ok(()),
        }
    }
}
