use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Work the remote processing function knows how to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Render,
    Segment,
    ObjDetect,
}

impl TaskType {
    pub const ALL: [TaskType; 3] = [TaskType::Render, TaskType::Segment, TaskType::ObjDetect];

    /// Parse every task in order, failing on the first unrecognized value.
    pub fn parse_all<S: AsRef<str>>(values: &[S]) -> Result<Vec<TaskType>, AppError> {
        values.iter().map(|v| TaskType::from_str(v.as_ref())).collect()
    }
}

impl Display for TaskType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TaskType::Render => write!(f, "render"),
            TaskType::Segment => write!(f, "segment"),
            TaskType::ObjDetect => write!(f, "obj_detect"),
        }
    }
}

impl FromStr for TaskType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "render" => Ok(TaskType::Render),
            "segment" => Ok(TaskType::Segment),
            "obj_detect" => Ok(TaskType::ObjDetect),
            _ => Err(AppError::Validation(format!("Invalid task type: {}", s))),
        }
    }
}

/// Payload sent to the processing function.
///
/// Serializes as `{"filename": "...", "tasks": [...]}` with tasks in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingRequest {
    pub filename: String,
    pub tasks: Vec<TaskType>,
}

impl ProcessingRequest {
    pub fn new(filename: impl Into<String>, tasks: Vec<TaskType>) -> Result<Self, AppError> {
        if tasks.is_empty() {
            return Err(AppError::Validation(
                "At least one task is required".to_string(),
            ));
        }
        Ok(Self {
            filename: filename.into(),
            tasks,
        })
    }

    pub fn to_payload(&self) -> Result<Vec<u8>, AppError> {
        serde_json::to_vec(self)
            .map_err(|e| AppError::Internal(format!("Failed to encode processing payload: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_type_round_trips_through_display() {
        for task in TaskType::ALL {
            assert_eq!(task.to_string().parse::<TaskType>().unwrap(), task);
        }
    }

    #[test]
    fn test_parse_all_keeps_order() {
        let tasks = TaskType::parse_all(&["segment", "render", "obj_detect"]).unwrap();
        assert_eq!(
            tasks,
            vec![TaskType::Segment, TaskType::Render, TaskType::ObjDetect]
        );
    }

    #[test]
    fn test_parse_all_reports_first_invalid_task() {
        let err = TaskType::parse_all(&["render", "transcode", "blur"]).unwrap_err();
        match err {
            AppError::Validation(msg) => assert_eq!(msg, "Invalid task type: transcode"),
            other => panic!("Expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_task_names_are_case_sensitive() {
        assert!("Render".parse::<TaskType>().is_err());
        assert!("obj-detect".parse::<TaskType>().is_err());
    }

    #[test]
    fn test_payload_shape() {
        let request =
            ProcessingRequest::new("clip.mp4", vec![TaskType::Render, TaskType::Segment]).unwrap();
        let payload = request.to_payload().unwrap();
        assert_eq!(
            String::from_utf8(payload).unwrap(),
            r#"{"filename":"clip.mp4","tasks":["render","segment"]}"#
        );
    }

    #[test]
    fn test_empty_task_list_is_rejected() {
        assert!(matches!(
            ProcessingRequest::new("clip.mp4", vec![]),
            Err(AppError::Validation(_))
        ));
    }
}
