use chrono::{DateTime, Utc};

/// 当前时间（毫秒），用作收藏排序的 score
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn millis_to_str(millis: i64) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_format() {
        assert_eq!(millis_to_str(0), "1970-01-01 00:00:00");
        assert!(now_millis() > 1_600_000_000_000);
    }
}
