use serde::{Deserialize, Serialize};

/// Data bound into email templates as `model`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailViewModel {
    pub user_name: String,
    pub sender_name: String,
    pub user_data1: i32,
    pub user_data2: i32,
    #[serde(default)]
    pub title: Option<String>,
}

impl EmailViewModel {
    /// The model the console renders use
    pub fn sample() -> Self {
        Self {
            user_name: "User".to_string(),
            sender_name: "Sender".to_string(),
            user_data1: 1,
            user_data2: 2,
            title: None,
        }
    }

    pub fn sample_with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::sample()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_values() {
        let model = EmailViewModel::sample();
        assert_eq!(model.user_name, "User");
        assert_eq!(model.sender_name, "Sender");
        assert_eq!(model.user_data1, 1);
        assert_eq!(model.user_data2, 2);
        assert_eq!(model.title, None);

        let titled = EmailViewModel::sample_with_title("a");
        assert_eq!(titled.title.as_deref(), Some("a"));
        assert_eq!(titled.user_name, "User");
    }

    #[test]
    fn test_deserialize_without_title() {
        let model: EmailViewModel = serde_json::from_str(
            r#"{"user_name":"U","sender_name":"S","user_data1":3,"user_data2":4}"#,
        )
        .unwrap();
        assert_eq!(model.user_data1, 3);
        assert_eq!(model.title, None);
    }
}
